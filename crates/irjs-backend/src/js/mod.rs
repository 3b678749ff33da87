//! JavaScript AST and printer

pub mod ast;
pub mod pretty;

pub use ast::{
    absent, js_assignment, make_stmt, prototype_of, JsBlock, JsExpression, JsFunction, JsName,
    JsNameRef, JsObjectLiteral, JsProgram, JsPropertyInitializer, JsStatement, JsVars,
};
pub use pretty::{PrettyPrint, PrinterOptions};
