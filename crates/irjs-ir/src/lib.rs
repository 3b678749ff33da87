//! irjs IR
//!
//! The fully resolved, typed tree handed to the JavaScript backend by a
//! front-end. Every node is immutable during lowering; children are owned
//! exclusively by their parent, so the tree has no sharing and no cycles.
//!
//! # Structure
//!
//! - `IrModule` - A compilation unit with its top-level declarations
//! - `IrClass`, `IrFunction`, `IrField` - Declarations
//! - `IrExpression` - Constants, field/value access and calls
//! - `IrBody`, `IrStatement` - Function bodies and statements
//! - `Name`, `SymbolId` - Declaration names and stable identities

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod decl;
pub mod expr;
pub mod name;
pub mod stmt;
pub mod symbol;

pub use decl::{
    ClassKind, DeclarationOrigin, FunctionKind, IrClass, IrClassRef, IrDeclaration, IrField,
    IrFunction, IrMember, IrModule, IrValueParameter, Modality,
};
pub use expr::{
    IrCall, IrConst, IrConstructorRef, IrDelegatingConstructorCall, IrExpression,
    IrExpressionBody, IrFieldRef, IrFunctionRef, IrGetField, IrGetValue, IrMemberAccess,
    IrSetField,
};
pub use name::{Name, NameError, SyntheticRole};
pub use stmt::{IrBlock, IrBody, IrReturn, IrStatement, IrVariable};
pub use symbol::{Declared, SymbolId};

/// Parse an IR module from its JSON form
pub fn module_from_json(source: &str) -> serde_json::Result<IrModule> {
    serde_json::from_str(source)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_from_json() {
        let source = r#"{
            "name": "shapes",
            "declarations": [
                {
                    "declaration": "class",
                    "symbol": 10,
                    "name": "Point",
                    "declarations": [
                        { "declaration": "field", "symbol": 11, "name": "x" },
                        {
                            "declaration": "function",
                            "symbol": 12,
                            "name": "<init>",
                            "kind": { "type": "constructor", "is_primary": true },
                            "body": { "body": "block", "statements": [] }
                        }
                    ]
                },
                {
                    "declaration": "function",
                    "symbol": 20,
                    "name": "origin",
                    "body": {
                        "body": "expression",
                        "kind": "const",
                        "type": "string",
                        "value": "(0, 0)"
                    }
                }
            ]
        }"#;

        let module = module_from_json(source).unwrap();
        assert_eq!(module.name, "shapes");
        assert_eq!(module.declarations.len(), 2);

        let point = module.classes().next().unwrap();
        assert_eq!(point.fields().count(), 1);
        assert!(point.constructors().next().unwrap().is_primary_constructor());

        match &module.declarations[1] {
            IrDeclaration::Function(function) => assert_eq!(
                function.body,
                Some(IrBody::expression(IrExpression::Const(IrConst::String(
                    "(0, 0)".to_string()
                ))))
            ),
            other => panic!("expected function, got {:?}", other),
        }
    }
}
