//! Statement execution and expression evaluation.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::rc::Rc;

use hermes_types::ast::*;

use crate::console::Console;
use crate::env::Environment;
use crate::error::{EvalError, EvalResult};
use crate::modules::{Callable, ModuleRegistry};
use crate::resolver::{DirectoryResolver, ModuleResolver, NoModules};
use crate::value::Value;

/// Calls nested deeper than this raise [`EvalError::StackExhausted`].
///
/// Each Hermes call costs roughly 3 KiB of host stack in a debug build, so
/// this depth still fits a 2 MiB thread (the default for spawned threads
/// and tests). Raise it through [`EvalOptions`] on a larger stack.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 256;

/// Engine configuration, passed in explicitly.
#[derive(Debug, Clone, PartialEq)]
pub struct EvalOptions {
    /// Directory searched for `*.hs` module files. `None` disables user modules.
    pub module_path: Option<PathBuf>,
    pub max_call_depth: usize,
}

impl Default for EvalOptions {
    fn default() -> Self {
        Self {
            module_path: None,
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
        }
    }
}

/// Outcome of executing a statement.
#[derive(Debug)]
enum Flow {
    Next,
    /// A `return` was hit; unwinds to the enclosing call.
    Return(Value),
}

/// The tree-walking evaluator.
///
/// State persists across [`Evaluator::interpret`] calls, so a REPL can feed
/// it one line at a time.
pub struct Evaluator {
    env: Environment,
    /// Every function ever declared, by name. Later declarations replace earlier ones.
    functions: BTreeMap<String, Rc<FunctionDecl>>,
    modules: ModuleRegistry,
    resolver: Box<dyn ModuleResolver>,
    console: Console,
    options: EvalOptions,
    call_depth: usize,
}

impl Evaluator {
    pub fn new() -> Self {
        Self::with_options(EvalOptions::default())
    }

    /// Build an evaluator from options. A module path selects a
    /// [`DirectoryResolver`]; without one no user module can be imported.
    pub fn with_options(options: EvalOptions) -> Self {
        let resolver: Box<dyn ModuleResolver> = match &options.module_path {
            Some(path) => Box::new(DirectoryResolver::new(path.clone())),
            None => Box::new(NoModules),
        };
        Self {
            env: Environment::new(),
            functions: BTreeMap::new(),
            modules: ModuleRegistry::new(),
            resolver,
            console: Console::Stdio,
            options,
            call_depth: 0,
        }
    }

    pub fn with_console(mut self, console: Console) -> Self {
        self.console = console;
        self
    }

    /// Replace the module resolver chosen from the options.
    pub fn with_resolver(mut self, resolver: impl ModuleResolver + 'static) -> Self {
        self.resolver = Box::new(resolver);
        self
    }

    pub fn options(&self) -> &EvalOptions {
        &self.options
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    /// Current value of a variable, searched from the current frame outward.
    pub fn get_var(&self, name: &str) -> Option<&Value> {
        self.env.get(name)
    }

    pub fn has_function(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    pub fn modules(&self) -> &ModuleRegistry {
        &self.modules
    }

    pub fn console(&self) -> &Console {
        &self.console
    }

    pub fn console_mut(&mut self) -> &mut Console {
        &mut self.console
    }

    // ══════════════════════════════════════════════════════════════════════
    // Statements
    // ══════════════════════════════════════════════════════════════════════

    /// Execute a program against the persistent state.
    ///
    /// Top-level functions are hoisted first. The first error aborts the rest
    /// of the program; whatever ran before it stays in effect.
    ///
    /// A bare top-level `return` is an error. A `return` nested in a top-level
    /// `if` or `for` only ends that statement.
    pub fn interpret(&mut self, program: &Program) -> EvalResult<()> {
        for func in program.functions() {
            self.functions.insert(func.name.clone(), Rc::clone(func));
        }
        for stmt in &program.stmts {
            match stmt {
                Stmt::Return(_) => return Err(EvalError::ReturnOutsideFunction),
                Stmt::Module(module) => self.interpret(&module.body)?,
                _ => {
                    self.exec_stmt(stmt)?;
                }
            }
        }
        Ok(())
    }

    fn exec_program(&mut self, program: &Program) -> EvalResult<Flow> {
        for func in program.functions() {
            self.functions.insert(func.name.clone(), Rc::clone(func));
        }
        self.exec_block(&program.stmts)
    }

    /// Run statements in order, stopping at the first `return`.
    fn exec_block(&mut self, stmts: &[Stmt]) -> EvalResult<Flow> {
        for stmt in stmts {
            if let Flow::Return(value) = self.exec_stmt(stmt)? {
                return Ok(Flow::Return(value));
            }
        }
        Ok(Flow::Next)
    }

    fn exec_stmt(&mut self, stmt: &Stmt) -> EvalResult<Flow> {
        match stmt {
            Stmt::VarDecl(decl) => {
                let value = self.eval(&decl.value)?;
                self.env.define(&decl.name, value);
            }
            Stmt::MultiAssign(assign) => {
                // Evaluate every right-hand side before binding any name.
                let values = assign
                    .values
                    .iter()
                    .map(|expr| self.eval(expr))
                    .collect::<EvalResult<Vec<_>>>()?;
                for (name, value) in assign.names.iter().zip(values) {
                    self.env.define(name, value);
                }
            }
            Stmt::Function(func) => {
                self.functions.insert(func.name.clone(), Rc::clone(func));
            }
            Stmt::If(stmt) => return self.exec_if(stmt),
            Stmt::For(stmt) => return self.exec_for(stmt),
            Stmt::Return(ret) => {
                let value = match &ret.value {
                    Some(expr) => self.eval(expr)?,
                    None => Value::Null,
                };
                return Ok(Flow::Return(value));
            }
            Stmt::Import(import) => self.import(&import.module)?,
            Stmt::Module(module) => return self.exec_program(&module.body),
            Stmt::Expr(expr) => {
                self.eval(expr)?;
            }
        }
        Ok(Flow::Next)
    }

    fn exec_if(&mut self, stmt: &IfStmt) -> EvalResult<Flow> {
        if self.eval(&stmt.condition)?.is_truthy() {
            return self.exec_block(&stmt.body.stmts);
        }
        for branch in &stmt.else_ifs {
            if self.eval(&branch.condition)?.is_truthy() {
                return self.exec_block(&branch.body.stmts);
            }
        }
        match &stmt.else_body {
            Some(body) => self.exec_block(&body.stmts),
            None => Ok(Flow::Next),
        }
    }

    fn exec_for(&mut self, stmt: &ForStmt) -> EvalResult<Flow> {
        if let Some(init) = &stmt.init {
            if let Flow::Return(value) = self.exec_stmt(init)? {
                return Ok(Flow::Return(value));
            }
        }
        while self.eval(&stmt.condition)?.is_truthy() {
            if let Flow::Return(value) = self.exec_block(&stmt.body.stmts)? {
                return Ok(Flow::Return(value));
            }
            if let Some(increment) = &stmt.increment {
                self.eval(increment)?;
            }
        }
        Ok(Flow::Next)
    }

    // ── Imports ───────────────────────────────────────────────────────────

    /// Import `name`. Registered modules (builtins, modules loaded earlier)
    /// are only marked imported. Anything else goes to the resolver; on
    /// success the module's functions are registered and its body runs.
    fn import(&mut self, name: &str) -> EvalResult<()> {
        if self.modules.is_registered(name) {
            self.modules.mark_imported(name);
            return Ok(());
        }

        let module = match self.resolver.resolve(name) {
            Ok(Some(module)) => module,
            Ok(None) => {
                return Err(EvalError::ModuleLoadFailed {
                    module: name.to_string(),
                    reason: "module not found".to_string(),
                })
            }
            Err(err) => {
                return Err(EvalError::ModuleLoadFailed {
                    module: name.to_string(),
                    reason: err.to_string(),
                })
            }
        };

        let functions = module
            .body
            .functions()
            .map(|func| (func.name.clone(), Callable::User(Rc::clone(func))))
            .collect::<Vec<_>>();
        self.modules.register(name, functions);
        self.modules.mark_imported(name);

        // A body that fails leaves no trace of the module in the registry.
        let result = self.interpret(&module.body);
        if result.is_err() {
            self.modules.remove(name);
        }
        result
    }

    // ══════════════════════════════════════════════════════════════════════
    // Expressions
    // ══════════════════════════════════════════════════════════════════════

    /// Evaluate an expression to a value.
    pub fn eval(&mut self, expr: &Expr) -> EvalResult<Value> {
        match &expr.kind {
            ExprKind::Literal(lit) => Ok(Value::from_literal(lit.text())),
            ExprKind::Variable(name) => self
                .env
                .get(name)
                .cloned()
                .ok_or_else(|| EvalError::UndefinedVariable(name.clone())),
            ExprKind::ArrayLiteral(items) => items
                .iter()
                .map(|item| self.eval(item))
                .collect::<EvalResult<Vec<_>>>()
                .map(Value::List),
            ExprKind::ArrayAccess { array, index } => {
                let list = self.eval(array)?;
                let index = self.eval(index)?;
                index_value(&list, &index)
            }
            ExprKind::Binary { left, op, right } => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                binary_op(*op, &left, &right)
            }
            ExprKind::Negate(operand) => Ok(Value::Number(-self.eval(operand)?.to_number()?)),
            ExprKind::Assign { target, value } => {
                let value = self.eval(value)?;
                self.assign(target, value.clone())?;
                Ok(value)
            }
            ExprKind::Increment { name, prefix } => self.step(name, 1.0, *prefix),
            ExprKind::Decrement { name, prefix } => self.step(name, -1.0, *prefix),
            ExprKind::Call { target, args } => self.call(target, args),
        }
    }

    fn assign(&mut self, target: &Expr, value: Value) -> EvalResult<()> {
        match &target.kind {
            ExprKind::Variable(name) => {
                self.env.assign(name, value);
                Ok(())
            }
            ExprKind::ArrayAccess { .. } => self.assign_element(target, value),
            _ => Err(EvalError::TypeMismatch(
                "invalid assignment target".to_string(),
            )),
        }
    }

    /// `name[i]... = value`: walk down to the variable, then index back up.
    fn assign_element(&mut self, target: &Expr, value: Value) -> EvalResult<()> {
        let mut index_exprs = Vec::new();
        let mut base = target;
        while let ExprKind::ArrayAccess { array, index } = &base.kind {
            index_exprs.push(index.as_ref());
            base = array.as_ref();
        }
        let ExprKind::Variable(name) = &base.kind else {
            return Err(EvalError::TypeMismatch(
                "invalid assignment target".to_string(),
            ));
        };

        let indices = index_exprs
            .into_iter()
            .rev()
            .map(|expr| self.eval(expr))
            .collect::<EvalResult<Vec<_>>>()?;

        let mut slot = self
            .env
            .get_mut(name)
            .ok_or_else(|| EvalError::UndefinedVariable(name.clone()))?;
        for index in &indices {
            slot = element_mut(slot, index)?;
        }
        *slot = value;
        Ok(())
    }

    /// `++`/`--`: the variable must exist. Prefix yields the new value, postfix the old.
    fn step(&mut self, name: &str, delta: f64, prefix: bool) -> EvalResult<Value> {
        let slot = self
            .env
            .get_mut(name)
            .ok_or_else(|| EvalError::UndefinedVariable(name.to_string()))?;
        let old = slot.to_number()?;
        let new = old + delta;
        *slot = Value::Number(new);
        Ok(Value::Number(if prefix { new } else { old }))
    }

    // ── Calls ─────────────────────────────────────────────────────────────

    fn call(&mut self, target: &CallTarget, args: &[Expr]) -> EvalResult<Value> {
        match target {
            CallTarget::Local(name) => {
                let func = self
                    .functions
                    .get(name)
                    .cloned()
                    .ok_or_else(|| EvalError::UnknownFunction(name.clone()))?;
                let values = self.eval_args(args)?;
                self.call_user(name, &func, values)
            }
            CallTarget::Qualified { module, function } => {
                let callable = self.modules.lookup(module, function)?.clone();
                let values = self.eval_args(args)?;
                let qualified = target.to_string();
                match callable {
                    Callable::Native(builtin) => {
                        if let Some(expected) = builtin.arity {
                            check_arity(&qualified, expected, values.len())?;
                        }
                        (builtin.func)(&mut self.console, &values)
                    }
                    Callable::User(func) => self.call_user(&qualified, &func, values),
                }
            }
        }
    }

    fn eval_args(&mut self, args: &[Expr]) -> EvalResult<Vec<Value>> {
        args.iter().map(|arg| self.eval(arg)).collect()
    }

    /// Run a user function in a fresh frame linked to the globals.
    fn call_user(
        &mut self,
        name: &str,
        func: &FunctionDecl,
        args: Vec<Value>,
    ) -> EvalResult<Value> {
        check_arity(name, func.params.len(), args.len())?;
        if self.call_depth >= self.options.max_call_depth {
            return Err(EvalError::StackExhausted {
                depth: self.options.max_call_depth,
            });
        }

        self.call_depth += 1;
        self.env.push_frame();
        for (param, value) in func.params.iter().zip(args) {
            self.env.define(param, value);
        }
        let result = self.exec_block(&func.body);
        self.env.pop_frame();
        self.call_depth -= 1;

        match result? {
            Flow::Return(value) => Ok(value),
            Flow::Next => Ok(Value::Null),
        }
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

// ── Operators ─────────────────────────────────────────────────────────────────

fn binary_op(op: BinOp, left: &Value, right: &Value) -> EvalResult<Value> {
    let value = match op {
        BinOp::Add if left.is_string() || right.is_string() => {
            Value::String(format!("{left}{right}"))
        }
        BinOp::Add => Value::Number(left.to_number()? + right.to_number()?),
        BinOp::Sub => Value::Number(left.to_number()? - right.to_number()?),
        BinOp::Mul => Value::Number(left.to_number()? * right.to_number()?),
        BinOp::Less => Value::Bool(left.to_number()? < right.to_number()?),
        BinOp::Greater => Value::Bool(left.to_number()? > right.to_number()?),
        BinOp::LessEq => Value::Bool(left.to_number()? <= right.to_number()?),
        BinOp::GreaterEq => Value::Bool(left.to_number()? >= right.to_number()?),
        BinOp::Eq => Value::Bool(left == right),
        BinOp::NotEq => Value::Bool(left != right),
        BinOp::Div | BinOp::Mod => {
            return Err(EvalError::UnknownOperator(op.as_str().to_string()))
        }
    };
    Ok(value)
}

fn check_arity(name: &str, expected: usize, found: usize) -> EvalResult<()> {
    if expected == found {
        Ok(())
    } else {
        Err(EvalError::ArityMismatch {
            name: name.to_string(),
            expected,
            found,
        })
    }
}

/// Bounds-checked position of `index` in a list of `len` elements.
/// The index must be a number and is truncated toward zero.
fn list_index(index: &Value, len: usize) -> EvalResult<usize> {
    let Value::Number(n) = index else {
        return Err(EvalError::TypeMismatch(format!(
            "list index must be a number, got {}",
            index.type_name()
        )));
    };
    let i = n.trunc() as i64;
    match usize::try_from(i) {
        Ok(pos) if pos < len => Ok(pos),
        _ => Err(EvalError::IndexOutOfRange { index: i, len }),
    }
}

fn index_value(list: &Value, index: &Value) -> EvalResult<Value> {
    match list {
        Value::List(items) => Ok(items[list_index(index, items.len())?].clone()),
        other => Err(EvalError::TypeMismatch(format!(
            "cannot index into {}",
            other.type_name()
        ))),
    }
}

fn element_mut<'a>(slot: &'a mut Value, index: &Value) -> EvalResult<&'a mut Value> {
    match slot {
        Value::List(items) => {
            let pos = list_index(index, items.len())?;
            Ok(&mut items[pos])
        }
        other => Err(EvalError::TypeMismatch(format!(
            "cannot index into {}",
            other.type_name()
        ))),
    }
}
