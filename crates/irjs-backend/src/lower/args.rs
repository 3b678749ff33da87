//! Call-argument projection
//!
//! Maps a call's positional arguments onto the callee's declared parameter
//! slots, filling omitted ones with the absent-value marker.

use super::expr::lower_expression;
use crate::context::GenerationContext;
use crate::error::{LowerError, LowerResult};
use crate::js::{absent, JsExpression};
use irjs_ir::IrMemberAccess;

/// Produce exactly `parameter_count` argument expressions for `call`
///
/// Supplied arguments are lowered once each, in positional order; every
/// omitted slot becomes `void 1`.
pub fn project_arguments(
    call: &impl IrMemberAccess,
    parameter_count: usize,
    ctx: &GenerationContext<'_>,
) -> LowerResult<Vec<JsExpression>> {
    let supplied = call.value_argument_slots();
    if supplied > parameter_count {
        return Err(LowerError::ArgumentCountMismatch {
            callee: call.callee_name().to_string(),
            supplied,
            declared: parameter_count,
        });
    }

    (0..parameter_count)
        .map(|index| match call.value_argument(index) {
            Some(argument) => lower_expression(argument, ctx),
            None => Ok(absent()),
        })
        .collect()
}
