//! Generation context
//!
//! A chain of contexts mirrors declaration nesting during lowering. Each
//! context owns the block it appends to and knows its current scope; all
//! contexts of one compilation share a single `StaticContext`. A child
//! borrows its parent immutably, so descendants can never write to an
//! ancestor's block.

use crate::error::{LowerError, LowerResult};
use crate::js::{JsBlock, JsExpression, JsFunction, JsName, JsStatement};
use crate::lower::{args, stmt};
use crate::names::{ScopeId, ScopeKind, StaticContext};
use irjs_ir::{IrFunction, IrMemberAccess, Name, SymbolId, SyntheticRole};
use std::sync::Arc;

/// Lowering state for one declaration nesting level
#[derive(Debug)]
pub struct GenerationContext<'a> {
    parent: Option<&'a GenerationContext<'a>>,
    static_context: Arc<StaticContext>,
    current_block: JsBlock,
    current_scope: ScopeId,
}

impl GenerationContext<'static> {
    /// Create the root context of a compilation
    pub fn new(static_context: Arc<StaticContext>) -> Self {
        GenerationContext {
            parent: None,
            static_context,
            current_block: JsBlock::new(),
            current_scope: ScopeId::ROOT,
        }
    }
}

impl<'a> GenerationContext<'a> {
    /// Child context with an empty block and the given scope
    pub fn new_declaration(&self, scope: ScopeId) -> GenerationContext<'_> {
        GenerationContext {
            parent: Some(self),
            static_context: Arc::clone(&self.static_context),
            current_block: JsBlock::new(),
            current_scope: scope,
        }
    }

    /// Enclosing context, if any
    pub fn parent(&self) -> Option<&GenerationContext<'a>> {
        self.parent
    }

    /// Number of enclosing contexts
    pub fn depth(&self) -> usize {
        std::iter::successors(self.parent, |context| context.parent).count()
    }

    /// The shared name registry
    pub fn static_context(&self) -> &Arc<StaticContext> {
        &self.static_context
    }

    /// Current scope
    pub fn scope(&self) -> ScopeId {
        self.current_scope
    }

    /// Statements emitted so far at this level
    pub fn current_block(&self) -> &JsBlock {
        &self.current_block
    }

    /// Append a statement to this context's block
    pub fn add_statement(&mut self, statement: JsStatement) {
        self.current_block.add_statement(statement);
    }

    /// Append statements to this context's block
    pub fn add_statements(&mut self, statements: impl IntoIterator<Item = JsStatement>) {
        self.current_block.add_statements(statements);
    }

    /// Consume the context, yielding its block
    pub fn into_block(self) -> JsBlock {
        self.current_block
    }

    // ========================================================================
    // Names
    // ========================================================================

    /// Create a scope nested in the current one
    pub fn new_scope(&self, kind: ScopeKind) -> ScopeId {
        self.static_context.new_scope(kind, self.current_scope)
    }

    /// Bind a local declaration in the current scope
    pub fn declare_name(&self, symbol: SymbolId, name: &Name) -> JsName {
        self.static_context.declare_name(self.current_scope, symbol, name)
    }

    /// Identifier of a module-level declaration
    pub fn name_for_symbol(&self, symbol: SymbolId, name: &Name) -> JsName {
        self.static_context.name_for_symbol(symbol, name)
    }

    /// Property name of a member
    pub fn member_name(&self, name: &Name) -> JsName {
        self.static_context.member_name(name)
    }

    /// Binding of `symbol` visible from the current scope, if any
    pub fn resolve_local(&self, symbol: SymbolId) -> Option<JsName> {
        self.static_context.resolve(self.current_scope, symbol)
    }

    /// Identifier a value reference resolves to
    ///
    /// Lexical bindings win; module-level names are the fallback.
    pub fn name_for_value(&self, symbol: SymbolId, name: &Name) -> LowerResult<JsName> {
        self.resolve_local(symbol)
            .or_else(|| self.static_context.global_name(symbol))
            .ok_or_else(|| LowerError::UnknownSymbol {
                symbol,
                name: name.to_string(),
            })
    }

    /// Reference to a compiler-synthesized binding
    pub fn special_ref_for_name(&self, role: SyntheticRole) -> LowerResult<JsExpression> {
        if role == SyntheticRole::This {
            return Ok(JsExpression::This);
        }
        self.static_context
            .resolve_synthetic(self.current_scope, role)
            .map(|name| name.make_ref())
            .ok_or(LowerError::UnboundSyntheticName { role })
    }

    // ========================================================================
    // Functions and calls
    // ========================================================================

    /// Lower a function-like declaration into a function node
    pub fn translate_function(
        &self,
        declaration: &IrFunction,
        name: Option<JsName>,
    ) -> LowerResult<JsFunction> {
        self.translate_function_with(declaration, name, |_| Ok(()))
    }

    /// Lower a function-like declaration, then run `epilogue` in the
    /// function's body context to append trailing statements
    pub fn translate_function_with<F>(
        &self,
        declaration: &IrFunction,
        name: Option<JsName>,
        epilogue: F,
    ) -> LowerResult<JsFunction>
    where
        F: FnOnce(&mut GenerationContext<'_>) -> LowerResult<()>,
    {
        let function_scope = self.new_scope(ScopeKind::Function);
        let mut function_context = self.new_declaration(function_scope);

        let mut parameters = Vec::with_capacity(declaration.value_parameters.len() + 1);
        if let Some(receiver) = &declaration.extension_receiver {
            parameters.push(function_context.declare_name(
                receiver.symbol,
                &Name::Synthetic(SyntheticRole::ExtensionReceiver),
            ));
        }
        for parameter in &declaration.value_parameters {
            parameters.push(function_context.declare_name(parameter.symbol, &parameter.name));
        }

        if let Some(body) = &declaration.body {
            stmt::lower_body(body, &mut function_context)?;
        }
        epilogue(&mut function_context)?;

        tracing::trace!(
            function = %declaration.name,
            parameters = parameters.len(),
            depth = function_context.depth(),
            "translated function"
        );

        Ok(JsFunction {
            name,
            parameters,
            body: function_context.into_block(),
        })
    }

    /// Project a call's arguments onto `parameter_count` positional slots
    pub fn translate_call_arguments(
        &self,
        call: &impl IrMemberAccess,
        parameter_count: usize,
    ) -> LowerResult<Vec<JsExpression>> {
        args::project_arguments(call, parameter_count, self)
    }
}
