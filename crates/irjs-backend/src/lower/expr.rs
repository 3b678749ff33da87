//! Expression lowering
//!
//! Converts one IR expression into one JavaScript expression. Sub-expressions
//! are lowered left to right, in source evaluation order.

use crate::context::GenerationContext;
use crate::error::{LowerError, LowerResult};
use crate::js::{js_assignment, JsExpression, JsName};
use crate::names::namer;
use irjs_ir::{
    IrCall, IrClassRef, IrConst, IrDelegatingConstructorCall, IrExpression, IrFieldRef,
    IrGetValue, SyntheticRole,
};

/// Lower an IR expression
pub fn lower_expression(
    expression: &IrExpression,
    ctx: &GenerationContext<'_>,
) -> LowerResult<JsExpression> {
    match expression {
        IrExpression::Const(constant) => lower_constant(constant),
        IrExpression::GetField(get) => field_reference(&get.field, get.receiver.as_deref(), ctx),
        IrExpression::SetField(set) => {
            let target = field_reference(&set.field, set.receiver.as_deref(), ctx)?;
            let value = lower_expression(&set.value, ctx)?;
            Ok(js_assignment(target, value))
        }
        IrExpression::GetValue(get) => lower_get_value(get, ctx),
        IrExpression::DelegatingConstructorCall(call) => lower_delegating_constructor_call(call, ctx),
        IrExpression::Call(call) => lower_call(call, ctx),
    }
}

/// Lower a literal constant to its typed JavaScript form
pub fn lower_constant(constant: &IrConst) -> LowerResult<JsExpression> {
    Ok(match constant {
        IrConst::Null => JsExpression::Null,
        IrConst::Boolean(value) => JsExpression::Bool(*value),
        IrConst::Char(value) => JsExpression::Int(*value as i32),
        IrConst::Byte(value) => JsExpression::Int(i32::from(*value)),
        IrConst::Short(value) => JsExpression::Int(i32::from(*value)),
        IrConst::Int(value) => JsExpression::Int(*value),
        IrConst::Long(_) => {
            return Err(LowerError::unsupported("64-bit integer constant"));
        }
        // Go through the decimal form so 0.1f prints as 0.1
        IrConst::Float(value) => {
            JsExpression::Double(value.to_string().parse().unwrap_or(f64::from(*value)))
        }
        IrConst::Double(value) => JsExpression::Double(*value),
        IrConst::String(value) => JsExpression::String(value.clone()),
    })
}

/// `receiver.field`, or the module-level name when there is no receiver
fn field_reference(
    field: &IrFieldRef,
    receiver: Option<&IrExpression>,
    ctx: &GenerationContext<'_>,
) -> LowerResult<JsExpression> {
    match receiver {
        Some(receiver) => Ok(JsExpression::qualified(
            ctx.member_name(&field.name),
            lower_expression(receiver, ctx)?,
        )),
        None => Ok(ctx.name_for_symbol(field.symbol, &field.name).make_ref()),
    }
}

fn lower_get_value(get: &IrGetValue, ctx: &GenerationContext<'_>) -> LowerResult<JsExpression> {
    match get.name.synthetic_role() {
        Some(SyntheticRole::This) => Ok(JsExpression::This),
        Some(role) => match ctx.resolve_local(get.symbol) {
            Some(name) => Ok(name.make_ref()),
            None => ctx.special_ref_for_name(role),
        },
        None => Ok(ctx.name_for_value(get.symbol, &get.name)?.make_ref()),
    }
}

/// `Base.call(this, args...)`
fn lower_delegating_constructor_call(
    call: &IrDelegatingConstructorCall,
    ctx: &GenerationContext<'_>,
) -> LowerResult<JsExpression> {
    let base = class_reference(&call.constructor.constructed_class, ctx);
    let mut arguments = vec![JsExpression::This];
    arguments.extend(ctx.translate_call_arguments(call, call.constructor.parameter_count)?);
    Ok(JsExpression::invoke(
        JsExpression::member(base, namer::CALL),
        arguments,
    ))
}

fn lower_call(call: &IrCall, ctx: &GenerationContext<'_>) -> LowerResult<JsExpression> {
    let callee = &call.callee;

    if callee.is_constructor() {
        if !callee.is_primary_constructor() {
            return Err(LowerError::unsupported(format!(
                "call to secondary constructor {}",
                callee.symbol
            )));
        }
        let owner = callee.owner.as_ref().ok_or_else(|| {
            LowerError::internal(format!(
                "primary constructor {} has no owning class",
                callee.symbol
            ))
        })?;
        let arguments = ctx.translate_call_arguments(call, callee.parameter_count)?;
        return Ok(JsExpression::new_instance(
            class_reference(owner, ctx),
            arguments,
        ));
    }

    let function = match &call.dispatch_receiver {
        Some(receiver) => {
            JsExpression::qualified(ctx.member_name(&callee.name), lower_expression(receiver, ctx)?)
        }
        None => ctx.name_for_symbol(callee.symbol, &callee.name).make_ref(),
    };

    let mut arguments = Vec::with_capacity(callee.parameter_count + 1);
    if let Some(receiver) = &call.extension_receiver {
        arguments.push(lower_expression(receiver, ctx)?);
    }
    arguments.extend(ctx.translate_call_arguments(call, callee.parameter_count)?);

    Ok(JsExpression::invoke(function, arguments))
}

/// Reference to a class's constructor function; the root type maps to `Object`
pub(crate) fn class_reference(class: &IrClassRef, ctx: &GenerationContext<'_>) -> JsExpression {
    if class.is_any() {
        JsName::new(namer::OBJECT).make_ref()
    } else {
        ctx.name_for_symbol(class.symbol, &class.name).make_ref()
    }
}
