//! Statement lowering
//!
//! Lowers IR bodies and statements into the current context's block.

use super::expr::lower_expression;
use crate::context::GenerationContext;
use crate::error::LowerResult;
use crate::js::{make_stmt, JsStatement, JsVars};
use crate::names::ScopeKind;
use irjs_ir::{IrBody, IrExpression, IrStatement};

/// Lower a function body into `ctx`
///
/// An expression body becomes `return <expr>;`.
pub fn lower_body(body: &IrBody, ctx: &mut GenerationContext<'_>) -> LowerResult<()> {
    match body {
        IrBody::Block(block) => lower_statements(&block.statements, ctx),
        IrBody::Expression(body) => {
            let value = lower_expression(&body.expression, ctx)?;
            ctx.add_statement(JsStatement::Return(Some(value)));
            Ok(())
        }
    }
}

/// Lower statements in order into `ctx`
pub fn lower_statements(statements: &[IrStatement], ctx: &mut GenerationContext<'_>) -> LowerResult<()> {
    for statement in statements {
        lower_statement(statement, ctx)?;
    }
    Ok(())
}

/// Lower one statement into `ctx`
pub fn lower_statement(statement: &IrStatement, ctx: &mut GenerationContext<'_>) -> LowerResult<()> {
    match statement {
        IrStatement::Expression(expression) => {
            // The root type has no constructor of its own to delegate to
            if is_root_constructor_delegation(expression) {
                return Ok(());
            }
            let expression = lower_expression(expression, ctx)?;
            ctx.add_statement(make_stmt(expression));
        }
        IrStatement::Block(block) => {
            let scope = ctx.new_scope(ScopeKind::Block);
            let mut block_context = ctx.new_declaration(scope);
            lower_statements(&block.statements, &mut block_context)?;
            let block = block_context.into_block();
            ctx.add_statement(JsStatement::Block(block));
        }
        IrStatement::Variable(variable) => {
            // The initializer cannot see the variable it initializes
            let initializer = match &variable.initializer {
                Some(initializer) => Some(lower_expression(initializer, ctx)?),
                None => None,
            };
            let name = ctx.declare_name(variable.symbol, &variable.name);
            ctx.add_statement(JsStatement::Vars(JsVars { name, initializer }));
        }
        IrStatement::Return(ret) => {
            let value = match &ret.value {
                Some(value) => Some(lower_expression(value, ctx)?),
                None => None,
            };
            ctx.add_statement(JsStatement::Return(value));
        }
    }
    Ok(())
}

/// Is `expression` a delegating call to the root type's constructor?
pub(crate) fn is_root_constructor_delegation(expression: &IrExpression) -> bool {
    matches!(
        expression,
        IrExpression::DelegatingConstructorCall(call) if call.constructor.constructed_class.is_any()
    )
}
