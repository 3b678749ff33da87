//! Scope tree for identifier assignment
//!
//! Scopes mirror function and block nesting of the generated code. Each
//! scope binds IR symbols (and synthetic roles) to the identifiers chosen
//! for them; lookup walks the parent chain so the innermost binding wins.

use super::namer;
use crate::js::JsName;
use irjs_ir::{Name, SymbolId, SyntheticRole};
use rustc_hash::{FxHashMap, FxHashSet};

/// Scope identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(pub u32);

impl ScopeId {
    /// The root (program) scope
    pub const ROOT: ScopeId = ScopeId(0);
}

/// Scope kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    /// Program scope
    Root,
    /// Function body and parameters
    Function,
    /// Nested block
    Block,
}

/// Scope in the scope tree
#[derive(Debug, Clone)]
struct Scope {
    kind: ScopeKind,
    parent: Option<ScopeId>,
    /// Identifiers bound to IR symbols in this scope
    bindings: FxHashMap<SymbolId, JsName>,
    /// Identifiers bound to synthetic names in this scope
    synthetic: FxHashMap<SyntheticRole, JsName>,
    /// Every identifier taken in this scope
    idents: FxHashSet<String>,
}

impl Scope {
    fn new(kind: ScopeKind, parent: Option<ScopeId>) -> Self {
        Scope {
            kind,
            parent,
            bindings: FxHashMap::default(),
            synthetic: FxHashMap::default(),
            idents: FxHashSet::default(),
        }
    }
}

/// Arena of scopes
#[derive(Debug, Clone)]
pub struct ScopeTree {
    /// All scopes (indexed by ScopeId)
    scopes: Vec<Scope>,
    /// Every identifier taken in any scope
    all_idents: FxHashSet<String>,
}

impl ScopeTree {
    /// Create a tree holding only the root scope
    pub fn new() -> Self {
        ScopeTree {
            scopes: vec![Scope::new(ScopeKind::Root, None)],
            all_idents: FxHashSet::default(),
        }
    }

    /// Number of scopes
    pub fn scope_count(&self) -> usize {
        self.scopes.len()
    }

    /// Kind of a scope
    pub fn kind(&self, scope: ScopeId) -> ScopeKind {
        self.scopes[scope.0 as usize].kind
    }

    /// Create a new scope nested in `parent`
    pub fn push_scope(&mut self, kind: ScopeKind, parent: ScopeId) -> ScopeId {
        let id = ScopeId(self.scopes.len() as u32);
        self.scopes.push(Scope::new(kind, Some(parent)));
        id
    }

    /// Bind `symbol` in `scope` under a fresh identifier derived from `name`
    ///
    /// Declaring the same symbol twice in one scope returns the first binding.
    pub fn declare(&mut self, scope: ScopeId, symbol: SymbolId, name: &Name) -> JsName {
        if let Some(existing) = self.scopes[scope.0 as usize].bindings.get(&symbol) {
            return existing.clone();
        }

        let js_name = self.declare_fresh(scope, &namer::suggested_identifier(name));
        let entry = &mut self.scopes[scope.0 as usize];
        entry.bindings.insert(symbol, js_name.clone());
        if let Name::Synthetic(role) = name {
            entry.synthetic.insert(*role, js_name.clone());
        }
        tracing::trace!(%symbol, %name, ident = js_name.ident(), scope = scope.0, "declared name");
        js_name
    }

    /// Take a fresh identifier in `scope`, starting from `suggested`
    ///
    /// The suggestion is used as-is when free; otherwise the first free
    /// `suggested_<n>` is taken. Root-scope identifiers also avoid every
    /// identifier taken anywhere in the tree.
    pub fn declare_fresh(&mut self, scope: ScopeId, suggested: &str) -> JsName {
        let ident = if self.is_free(scope, suggested) {
            suggested.to_string()
        } else {
            let mut n = 0usize;
            loop {
                let candidate = format!("{}_{}", suggested, n);
                if self.is_free(scope, &candidate) {
                    break candidate;
                }
                n += 1;
            }
        };

        self.scopes[scope.0 as usize].idents.insert(ident.clone());
        self.all_idents.insert(ident.clone());
        JsName::new(ident)
    }

    /// Find the binding of `symbol` visible from `scope`
    pub fn resolve(&self, scope: ScopeId, symbol: SymbolId) -> Option<&JsName> {
        self.chain(scope)
            .find_map(|s| self.scopes[s.0 as usize].bindings.get(&symbol))
    }

    /// Find the binding of a synthetic name visible from `scope`
    pub fn resolve_synthetic(&self, scope: ScopeId, role: SyntheticRole) -> Option<&JsName> {
        self.chain(scope)
            .find_map(|s| self.scopes[s.0 as usize].synthetic.get(&role))
    }

    /// Is `ident` taken in `scope` or any enclosing scope?
    pub fn is_visible(&self, scope: ScopeId, ident: &str) -> bool {
        self.chain(scope)
            .any(|s| self.scopes[s.0 as usize].idents.contains(ident))
    }

    fn is_free(&self, scope: ScopeId, ident: &str) -> bool {
        if namer::is_reserved(ident) || self.is_visible(scope, ident) {
            return false;
        }
        scope != ScopeId::ROOT || !self.all_idents.contains(ident)
    }

    /// Iterate from `scope` outwards to the root
    fn chain(&self, scope: ScopeId) -> impl Iterator<Item = ScopeId> + '_ {
        std::iter::successors(Some(scope), move |s| self.scopes[s.0 as usize].parent)
    }
}

impl Default for ScopeTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declare_and_resolve() {
        let mut tree = ScopeTree::new();
        let function = tree.push_scope(ScopeKind::Function, ScopeId::ROOT);

        let global = tree.declare(ScopeId::ROOT, SymbolId(1), &Name::identifier("count"));
        let param = tree.declare(function, SymbolId(2), &Name::identifier("step"));

        assert_eq!(global.ident(), "count");
        assert_eq!(param.ident(), "step");
        assert_eq!(tree.resolve(function, SymbolId(1)), Some(&global));
        assert_eq!(tree.resolve(function, SymbolId(2)), Some(&param));
        assert_eq!(tree.resolve(ScopeId::ROOT, SymbolId(2)), None);
    }

    #[test]
    fn test_shadowing_gets_suffix() {
        let mut tree = ScopeTree::new();
        let function = tree.push_scope(ScopeKind::Function, ScopeId::ROOT);
        let block = tree.push_scope(ScopeKind::Block, function);

        let outer = tree.declare(function, SymbolId(1), &Name::identifier("x"));
        let inner = tree.declare(block, SymbolId(2), &Name::identifier("x"));
        let innermost = tree.declare(block, SymbolId(3), &Name::identifier("x"));

        assert_eq!(outer.ident(), "x");
        assert_eq!(inner.ident(), "x_0");
        assert_eq!(innermost.ident(), "x_1");
        assert_eq!(tree.resolve(block, SymbolId(2)), Some(&inner));
    }

    #[test]
    fn test_siblings_reuse_identifiers() {
        let mut tree = ScopeTree::new();
        let first = tree.push_scope(ScopeKind::Function, ScopeId::ROOT);
        let second = tree.push_scope(ScopeKind::Function, ScopeId::ROOT);

        let a = tree.declare(first, SymbolId(1), &Name::identifier("it"));
        let b = tree.declare(second, SymbolId(2), &Name::identifier("it"));
        assert_eq!(a, b);
    }

    #[test]
    fn test_root_avoids_all_identifiers() {
        let mut tree = ScopeTree::new();
        let function = tree.push_scope(ScopeKind::Function, ScopeId::ROOT);
        tree.declare(function, SymbolId(1), &Name::identifier("helper"));

        let global = tree.declare(ScopeId::ROOT, SymbolId(2), &Name::identifier("helper"));
        assert_eq!(global.ident(), "helper_0");
    }

    #[test]
    fn test_reserved_words_are_suffixed() {
        let mut tree = ScopeTree::new();
        let name = tree.declare(ScopeId::ROOT, SymbolId(1), &Name::identifier("new"));
        assert_eq!(name.ident(), "new_0");
    }

    #[test]
    fn test_builtin_object_is_never_bound() {
        let mut tree = ScopeTree::new();
        let global = tree.declare(ScopeId::ROOT, SymbolId(1), &Name::identifier("Object"));
        assert_eq!(global.ident(), "Object_0");

        let function = tree.push_scope(ScopeKind::Function, ScopeId::ROOT);
        let local = tree.declare(function, SymbolId(2), &Name::identifier("Object"));
        assert_eq!(local.ident(), "Object_1");

        let sibling = tree.push_scope(ScopeKind::Function, ScopeId::ROOT);
        let other = tree.declare(sibling, SymbolId(3), &Name::identifier("Object"));
        assert_eq!(other.ident(), "Object_1");
    }

    #[test]
    fn test_redeclaring_symbol_is_stable() {
        let mut tree = ScopeTree::new();
        let first = tree.declare(ScopeId::ROOT, SymbolId(7), &Name::identifier("Shape"));
        let second = tree.declare(ScopeId::ROOT, SymbolId(7), &Name::identifier("Shape"));
        assert_eq!(first, second);
        assert_eq!(tree.scope_count(), 1);
    }

    #[test]
    fn test_synthetic_binding() {
        let mut tree = ScopeTree::new();
        let function = tree.push_scope(ScopeKind::Function, ScopeId::ROOT);
        let receiver = tree.declare(
            function,
            SymbolId(3),
            &Name::Synthetic(SyntheticRole::ExtensionReceiver),
        );

        assert_eq!(receiver.ident(), "$receiver");
        assert_eq!(
            tree.resolve_synthetic(function, SyntheticRole::ExtensionReceiver),
            Some(&receiver)
        );
        assert_eq!(
            tree.resolve_synthetic(ScopeId::ROOT, SyntheticRole::ExtensionReceiver),
            None
        );
        assert_eq!(tree.kind(function), ScopeKind::Function);
    }
}
