//! Module loader (§1, §6): the core never touches the filesystem. A host
//! supplies `(module-name → source-text)` through [`ModuleSource`]; the
//! loader parses and caches [`crate::module::ModuleDef`]s by name so a
//! function called from several sites is only parsed once.

use std::cell::RefCell;
use std::rc::Rc;

use ahash::AHashMap;

use crate::error::{Diagnostic, PResult, PostfixError};
use crate::module::{self, ModuleDef};

/// Supplies the text of a named module, on demand.
///
/// The entry module and every `CALL`ed function's module are requested by
/// name (`"<outerModule>$<funcName>"`, §6); the host decides how that name
/// maps to storage (a directory of `.postfix` files, an in-memory map, …).
pub trait ModuleSource {
    /// Returns the source text for `module_name`, or an `IOError`-shaped
    /// diagnostic if it cannot be found/read.
    fn read(&self, module_name: &str) -> PResult<String>;
}

/// Reads `.postfix` files from a directory, one per module name.
pub struct DirectorySource {
    dir: std::path::PathBuf,
}

impl DirectorySource {
    #[must_use]
    pub fn new(dir: impl Into<std::path::PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl ModuleSource for DirectorySource {
    fn read(&self, module_name: &str) -> PResult<String> {
        let path = self.dir.join(format!("{module_name}.postfix"));
        std::fs::read_to_string(&path).map_err(|e| Diagnostic {
            error: PostfixError::Io { path: path.display().to_string(), reason: e.to_string() },
            module: module_name.to_owned(),
            pc: 0,
            line: 0,
        })
    }
}

/// Serves module text from an in-memory map, keyed by module name.
///
/// Useful for tests and for hosts that assemble a program's source in
/// memory instead of from a directory of `.postfix` files.
#[derive(Debug, Default)]
pub struct MapSource(AHashMap<String, String>);

impl MapSource {
    #[must_use]
    pub fn new() -> Self {
        Self(AHashMap::default())
    }

    #[must_use]
    pub fn with(mut self, module_name: impl Into<String>, text: impl Into<String>) -> Self {
        self.0.insert(module_name.into(), text.into());
        self
    }
}

impl ModuleSource for MapSource {
    fn read(&self, module_name: &str) -> PResult<String> {
        self.0.get(module_name).cloned().ok_or_else(|| Diagnostic {
            error: PostfixError::Io { path: format!("<memory>/{module_name}"), reason: "no such module".to_owned() },
            module: module_name.to_owned(),
            pc: 0,
            line: 0,
        })
    }
}

/// Caches parsed [`ModuleDef`]s by name, loading each lazily and at most once.
pub struct Program<'s> {
    source: &'s dyn ModuleSource,
    symbolic_labels: bool,
    cache: RefCell<AHashMap<String, Rc<ModuleDef>>>,
}

impl<'s> Program<'s> {
    #[must_use]
    pub fn new(source: &'s dyn ModuleSource, symbolic_labels: bool) -> Self {
        Self { source, symbolic_labels, cache: RefCell::new(AHashMap::default()) }
    }

    /// Returns the cached `ModuleDef` for `name`, parsing it on first use.
    pub fn load(&self, name: &str) -> PResult<Rc<ModuleDef>> {
        if let Some(cached) = self.cache.borrow().get(name) {
            return Ok(Rc::clone(cached));
        }
        let text = self.source.read(name)?;
        let def = Rc::new(ModuleDef::parse(name, &text, self.symbolic_labels)?);
        self.cache.borrow_mut().insert(name.to_owned(), Rc::clone(&def));
        Ok(def)
    }

    /// The conventional nested-module name for `func` called from `outer`.
    #[must_use]
    pub fn nested_name(outer: &str, func: &str) -> String {
        module::nested_module_name(outer, func)
    }
}
