//! IR Statements and bodies

use crate::expr::{IrExpression, IrExpressionBody};
use crate::name::Name;
use crate::symbol::{Declared, SymbolId};
use serde::{Deserialize, Serialize};

/// A function body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "body", rename_all = "snake_case")]
pub enum IrBody {
    /// Statement block
    Block(IrBlock),
    /// Single expression whose value is returned
    Expression(IrExpressionBody),
}

impl IrBody {
    /// Block body from statements
    pub fn block(statements: Vec<IrStatement>) -> Self {
        IrBody::Block(IrBlock { statements })
    }

    /// Expression body
    pub fn expression(expression: IrExpression) -> Self {
        IrBody::Expression(IrExpressionBody::new(expression))
    }
}

/// A block of statements
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IrBlock {
    /// Statements in order
    #[serde(default)]
    pub statements: Vec<IrStatement>,
}

/// An IR statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "statement", rename_all = "snake_case")]
pub enum IrStatement {
    /// Expression evaluated for its effect
    Expression(IrExpression),
    /// Nested block
    Block(IrBlock),
    /// Local variable declaration
    Variable(IrVariable),
    /// Return from the enclosing function
    Return(IrReturn),
}

/// Local variable declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrVariable {
    /// Variable symbol
    pub symbol: SymbolId,
    /// Variable name
    pub name: Name,
    /// Initializer, if any
    #[serde(default)]
    pub initializer: Option<IrExpression>,
}

impl IrVariable {
    /// Create a variable declaration
    pub fn new(symbol: SymbolId, name: impl Into<Name>, initializer: Option<IrExpression>) -> Self {
        Self {
            symbol,
            name: name.into(),
            initializer,
        }
    }
}

impl Declared for IrVariable {
    fn symbol(&self) -> SymbolId {
        self.symbol
    }

    fn name(&self) -> &Name {
        &self.name
    }
}

/// Return statement
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IrReturn {
    /// Returned value
    #[serde(default)]
    pub value: Option<IrExpression>,
}
