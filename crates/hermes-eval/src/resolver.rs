//! Module resolution: mapping an imported name to a parsed module.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use hermes_types::ast::Module;
use hermes_types::SyntaxError;
use thiserror::Error;

/// File extension of Hermes module files.
pub const MODULE_EXTENSION: &str = "hs";

/// Failure while looking for a module. "Not found" is `Ok(None)`, not an error.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("cannot read module directory '{}': {source}", .path.display())]
    Directory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("module '{module}' does not parse: {source}")]
    Syntax {
        module: String,
        #[source]
        source: SyntaxError,
    },
}

/// Finds module source by name.
pub trait ModuleResolver {
    fn resolve(&mut self, name: &str) -> Result<Option<Module>, ResolveError>;
}

impl<R: ModuleResolver + ?Sized> ModuleResolver for Box<R> {
    fn resolve(&mut self, name: &str) -> Result<Option<Module>, ResolveError> {
        (**self).resolve(name)
    }
}

/// Resolves nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoModules;

impl ModuleResolver for NoModules {
    fn resolve(&mut self, _name: &str) -> Result<Option<Module>, ResolveError> {
        Ok(None)
    }
}

/// Scans a directory for `*.hs` files and matches on their
/// `!module["name"]` header, not on the file name.
///
/// Files that cannot be read or parsed are skipped. The directory is
/// rescanned on every lookup, so modules added between imports are found.
#[derive(Debug, Clone)]
pub struct DirectoryResolver {
    root: PathBuf,
}

impl DirectoryResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Every parsable module file in the directory, sorted by path.
    pub fn scan(&self) -> Result<Vec<(PathBuf, Module)>, ResolveError> {
        let entries = fs::read_dir(&self.root).map_err(|source| ResolveError::Directory {
            path: self.root.clone(),
            source,
        })?;

        let mut paths: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| {
                path.is_file()
                    && path.extension().and_then(|ext| ext.to_str()) == Some(MODULE_EXTENSION)
            })
            .collect();
        paths.sort();

        Ok(paths
            .into_iter()
            .filter_map(|path| {
                let source = fs::read_to_string(&path).ok()?;
                let module = hermes_parser::parse_module(&source).ok()?;
                Some((path, module))
            })
            .collect())
    }
}

impl ModuleResolver for DirectoryResolver {
    fn resolve(&mut self, name: &str) -> Result<Option<Module>, ResolveError> {
        Ok(self
            .scan()?
            .into_iter()
            .map(|(_, module)| module)
            .find(|module| module.name == name))
    }
}

/// In-memory resolver: import name to module source text.
#[derive(Debug, Clone, Default)]
pub struct SourceResolver {
    sources: BTreeMap<String, String>,
}

impl SourceResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_module(mut self, name: impl Into<String>, source: impl Into<String>) -> Self {
        self.insert(name, source);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, source: impl Into<String>) {
        self.sources.insert(name.into(), source.into());
    }
}

impl ModuleResolver for SourceResolver {
    fn resolve(&mut self, name: &str) -> Result<Option<Module>, ResolveError> {
        let Some(source) = self.sources.get(name) else {
            return Ok(None);
        };
        hermes_parser::parse_module(source)
            .map(Some)
            .map_err(|source| ResolveError::Syntax {
                module: name.to_string(),
                source,
            })
    }
}
