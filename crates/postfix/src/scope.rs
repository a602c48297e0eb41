//! Scope chain (§4.2): `type_of`/`get`/`set`, resolved local → globals (in
//! root) → lexically enclosing frame. A [`Scope`] is the storage half of a
//! frame (declarations + variable values); the call/pc/stack half lives in
//! [`crate::vm::Activation`], which is never shared, while a `Scope` is
//! shared via `Rc` whenever a nested function needs to reach back into an
//! ancestor's locals.

use std::cell::RefCell;
use std::rc::Rc;

use ahash::AHashMap;

use crate::error::{Diagnostic, PResult, PostfixError};
use crate::module::ModuleDef;
use crate::value::{Kind, Value};

/// One frame's variable storage: its static declarations plus the sparse
/// map of values actually assigned so far.
#[derive(Debug)]
pub struct Scope {
    pub module: Rc<ModuleDef>,
    locals: RefCell<AHashMap<String, Value>>,
}

pub type ScopeHandle = Rc<Scope>;

impl Scope {
    #[must_use]
    pub fn new(module: Rc<ModuleDef>) -> ScopeHandle {
        Rc::new(Self { module, locals: RefCell::new(AHashMap::default()) })
    }

    fn declares(&self, name: &str) -> bool {
        self.module.variable_types.contains_key(name)
    }

    fn delegates_to_root(&self, name: &str) -> bool {
        self.module.globals.iter().any(|g| g == name)
    }

    /// Binds a parameter directly into this scope's own locals, bypassing
    /// the scope chain. Used only at `CALL` time, where the name is known
    /// to be one of this scope's own declared parameters.
    pub(crate) fn bind_local(&self, name: &str, value: Value) {
        self.locals.borrow_mut().insert(name.to_owned(), value);
    }
}

/// The chain of scopes currently live on the host call stack, root first.
/// Used both to find the root (for `globals` delegation) and to find a
/// named ancestor (for `enclosing_module` delegation, §9 structural
/// nesting).
pub struct CallChain {
    scopes: Vec<ScopeHandle>,
}

impl CallChain {
    #[must_use]
    pub fn new(root: ScopeHandle) -> Self {
        Self { scopes: vec![root] }
    }

    #[must_use]
    pub fn root(&self) -> &ScopeHandle {
        &self.scopes[0]
    }

    pub fn push(&mut self, scope: ScopeHandle) {
        self.scopes.push(scope);
    }

    pub fn pop(&mut self) {
        self.scopes.pop();
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    fn find_by_module_name(&self, name: &str) -> Option<&ScopeHandle> {
        self.scopes.iter().rev().find(|s| s.module.name == name)
    }
}

fn name_err(module: &str, name: &str) -> Diagnostic {
    Diagnostic {
        error: PostfixError::Name { message: format!("undefined variable '{name}'") },
        module: module.to_owned(),
        pc: 0,
        line: 0,
    }
}

/// Resolves `name` to the scope that owns its storage, per §4.2's
/// precedence: local, then (if listed in `globals`) the root frame, then
/// (if this frame has a lexical parent currently live on the call chain)
/// recurse into that ancestor's own resolution.
pub fn resolve<'a>(chain: &'a CallChain, scope: &'a ScopeHandle, name: &str) -> PResult<&'a ScopeHandle> {
    if scope.declares(name) {
        return Ok(scope);
    }
    if scope.delegates_to_root(name) {
        return Ok(chain.root());
    }
    if let Some(parent_name) = &scope.module.lexical_parent {
        if let Some(enclosing) = chain.find_by_module_name(parent_name) {
            // Re-borrow through the chain rather than recursing on a
            // reference tied to `scope`'s lifetime, since `enclosing` may
            // itself need to delegate further outward.
            return resolve(chain, enclosing, name);
        }
    }
    Err(name_err(&scope.module.name, name))
}

/// §4.2 `type_of`: the declared kind of `name` as seen from `scope`.
pub fn type_of(chain: &CallChain, scope: &ScopeHandle, name: &str) -> PResult<Kind> {
    let owner = resolve(chain, scope, name)?;
    owner
        .module
        .variable_types
        .get(name)
        .copied()
        .ok_or_else(|| name_err(&scope.module.name, name))
}

/// §4.2 `get`: the current value of `name`, failing with `UninitError` if
/// it was never assigned.
pub fn get(chain: &CallChain, scope: &ScopeHandle, name: &str) -> PResult<Value> {
    let owner = resolve(chain, scope, name)?;
    let locals = owner.locals.borrow();
    locals.get(name).cloned().ok_or_else(|| Diagnostic {
        error: PostfixError::Uninit { name: name.to_owned() },
        module: scope.module.name.clone(),
        pc: 0,
        line: 0,
    })
}

/// §4.2 `set`: commits `value` into the owning frame's storage.
pub fn set(chain: &CallChain, scope: &ScopeHandle, name: &str, value: Value) -> PResult<()> {
    let owner = resolve(chain, scope, name)?;
    owner.locals.borrow_mut().insert(name.to_owned(), value);
    Ok(())
}
