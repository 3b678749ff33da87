//! irjs JavaScript backend
//!
//! Lowers the typed IR of a class-based language into a JavaScript AST and
//! prints it as source text.
//!
//! # Architecture
//!
//! ```text
//! IrModule → lower_module → JsProgram → PrettyPrint → JavaScript source
//!                 │
//!                 ├── GenerationContext (per nesting level)
//!                 └── StaticContext (shared names and scopes)
//! ```
//!
//! Classes become constructor functions wired together through
//! `prototype` chains; calls, field accesses and constants become their
//! direct JavaScript equivalents.

#![warn(rust_2018_idioms)]

pub mod context;
pub mod error;
pub mod js;
pub mod lower;
pub mod names;

pub use context::GenerationContext;
pub use error::{LowerError, LowerResult};
pub use js::{JsProgram, PrettyPrint, PrinterOptions};
pub use lower::{lower_declaration, lower_module, ClassGenerator, LoweringOptions};
pub use names::{ScopeId, ScopeKind, StaticContext};

/// Lower a module and print it as JavaScript
pub fn compile_module(
    module: &irjs_ir::IrModule,
    lowering: &LoweringOptions,
    printer: &PrinterOptions,
) -> LowerResult<String> {
    let program = lower_module(module, lowering)?;
    Ok(program.pretty_print_with(printer))
}
