//! Module registry: callable functions per module plus the imported set.

use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

use hermes_types::ast::FunctionDecl;

use crate::builtins::{self, Builtin};
use crate::error::{EvalError, EvalResult};

/// Something callable as `module.function(...)`.
#[derive(Debug, Clone)]
pub enum Callable {
    Native(Builtin),
    /// A function declared in a user module file. Receives evaluated values directly.
    User(Rc<FunctionDecl>),
}

impl Callable {
    /// Required argument count; `None` means variadic.
    pub fn arity(&self) -> Option<usize> {
        match self {
            Callable::Native(builtin) => builtin.arity,
            Callable::User(decl) => Some(decl.params.len()),
        }
    }
}

/// Registered modules and which of them the program has imported.
///
/// Builtin modules are registered up front but still need an `@import`
/// before their functions can be called.
#[derive(Debug, Clone)]
pub struct ModuleRegistry {
    modules: BTreeMap<String, BTreeMap<String, Callable>>,
    imported: BTreeSet<String>,
}

impl ModuleRegistry {
    /// A registry holding the builtin modules, none of them imported.
    pub fn new() -> Self {
        let mut registry = Self {
            modules: BTreeMap::new(),
            imported: BTreeSet::new(),
        };
        for name in builtins::BUILTIN_MODULES {
            if let Some(functions) = builtins::builtin_module(name) {
                registry.register(
                    name,
                    functions
                        .iter()
                        .map(|b| (b.name.to_string(), Callable::Native(*b))),
                );
            }
        }
        registry
    }

    /// Register (or replace) a module's function table.
    pub fn register<I>(&mut self, module: &str, functions: I)
    where
        I: IntoIterator<Item = (String, Callable)>,
    {
        self.modules
            .insert(module.to_string(), functions.into_iter().collect());
    }

    /// Drop a module's functions and its imported mark.
    pub fn remove(&mut self, module: &str) {
        self.modules.remove(module);
        self.imported.remove(module);
    }

    pub fn is_registered(&self, module: &str) -> bool {
        self.modules.contains_key(module)
    }

    /// Mark a registered module as imported. Idempotent.
    pub fn mark_imported(&mut self, module: &str) {
        self.imported.insert(module.to_string());
    }

    pub fn is_imported(&self, module: &str) -> bool {
        self.imported.contains(module)
    }

    /// Find `module.function`. The module must be imported and registered.
    pub fn lookup(&self, module: &str, function: &str) -> EvalResult<&Callable> {
        if !self.is_imported(module) {
            return Err(EvalError::ModuleNotImported(module.to_string()));
        }
        self.modules
            .get(module)
            .ok_or_else(|| EvalError::ModuleNotImported(module.to_string()))?
            .get(function)
            .ok_or_else(|| EvalError::UnknownFunction(format!("{module}.{function}")))
    }

    /// Names of imported modules, sorted.
    pub fn imported(&self) -> impl Iterator<Item = &str> {
        self.imported.iter().map(String::as_str)
    }
}

impl Default for ModuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}
