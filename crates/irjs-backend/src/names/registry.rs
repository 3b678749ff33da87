//! Shared name registry
//!
//! One `StaticContext` exists per compilation and is shared by every
//! generation context, including those on parallel lowering workers.
//! Global names are assigned once per symbol through an insert-if-absent
//! map; scoped names go through the scope tree behind a read-write lock.
//!
//! Lock order: a global-name map shard is always taken before the scope
//! tree lock, never the other way round.

use super::namer;
use super::scope::{ScopeId, ScopeKind, ScopeTree};
use crate::js::JsName;
use dashmap::DashMap;
use irjs_ir::{Name, SymbolId, SyntheticRole};
use parking_lot::RwLock;

/// Compilation-wide name registry
#[derive(Debug, Default)]
pub struct StaticContext {
    scopes: RwLock<ScopeTree>,
    global_names: DashMap<SymbolId, JsName>,
}

impl StaticContext {
    /// Create a registry with an empty root scope
    pub fn new() -> Self {
        Self::default()
    }

    /// Identifier of a module-level declaration, assigned on first use
    ///
    /// Concurrent first uses of the same symbol agree on one identifier.
    pub fn name_for_symbol(&self, symbol: SymbolId, name: &Name) -> JsName {
        if let Some(existing) = self.global_names.get(&symbol) {
            return existing.clone();
        }
        self.global_names
            .entry(symbol)
            .or_insert_with(|| self.scopes.write().declare(ScopeId::ROOT, symbol, name))
            .clone()
    }

    /// Identifier of a module-level declaration, if one was assigned
    pub fn global_name(&self, symbol: SymbolId) -> Option<JsName> {
        self.global_names.get(&symbol).map(|entry| entry.clone())
    }

    /// Property name for a member; members live on objects, so they are
    /// never renamed for uniqueness, only away from wiring slots
    pub fn member_name(&self, name: &Name) -> JsName {
        JsName::new(namer::member_identifier(name))
    }

    /// Bind `symbol` in `scope` under a fresh identifier
    pub fn declare_name(&self, scope: ScopeId, symbol: SymbolId, name: &Name) -> JsName {
        self.scopes.write().declare(scope, symbol, name)
    }

    /// Create a scope nested in `parent`
    pub fn new_scope(&self, kind: ScopeKind, parent: ScopeId) -> ScopeId {
        self.scopes.write().push_scope(kind, parent)
    }

    /// Lexical lookup of `symbol` from `scope`
    pub fn resolve(&self, scope: ScopeId, symbol: SymbolId) -> Option<JsName> {
        self.scopes.read().resolve(scope, symbol).cloned()
    }

    /// Lexical lookup of a synthetic name from `scope`
    pub fn resolve_synthetic(&self, scope: ScopeId, role: SyntheticRole) -> Option<JsName> {
        self.scopes.read().resolve_synthetic(scope, role).cloned()
    }

    /// Number of scopes created so far
    pub fn scope_count(&self) -> usize {
        self.scopes.read().scope_count()
    }
}
