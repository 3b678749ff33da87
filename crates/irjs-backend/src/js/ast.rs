//! JavaScript AST
//!
//! The output tree of lowering. Nodes are plain owned values: a node belongs
//! to the block or list it was appended to. Identifiers are already resolved
//! to their final spelling, so the tree carries no scope information and two
//! lowerings of the same module compare equal.

use crate::names::namer;
use std::fmt;

// ============================================================================
// Names
// ============================================================================

/// A resolved JavaScript identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JsName(String);

impl JsName {
    /// Wrap an identifier that is already valid JavaScript
    pub fn new(ident: impl Into<String>) -> Self {
        JsName(ident.into())
    }

    /// The identifier text
    pub fn ident(&self) -> &str {
        &self.0
    }

    /// Unqualified reference to this name
    pub fn make_ref(&self) -> JsExpression {
        JsExpression::NameRef(JsNameRef {
            name: self.clone(),
            qualifier: None,
        })
    }
}

impl fmt::Display for JsName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reference to a name, optionally qualified (`qualifier.name`)
#[derive(Debug, Clone, PartialEq)]
pub struct JsNameRef {
    /// Referenced name
    pub name: JsName,
    /// Object the name is looked up on
    pub qualifier: Option<Box<JsExpression>>,
}

// ============================================================================
// Expressions
// ============================================================================

/// A JavaScript expression
#[derive(Debug, Clone, PartialEq)]
pub enum JsExpression {
    /// Name reference: `x` or `q.x`
    NameRef(JsNameRef),
    /// `this`
    This,
    /// `null`
    Null,
    /// `true` / `false`
    Bool(bool),
    /// Integer literal
    Int(i32),
    /// Number literal
    Double(f64),
    /// String literal
    String(String),
    /// `void operand`
    Void(Box<JsExpression>),
    /// `target = value`
    Assign {
        /// Assigned location
        target: Box<JsExpression>,
        /// Assigned value
        value: Box<JsExpression>,
    },
    /// `callee(arguments)`
    Invocation {
        /// Called expression
        callee: Box<JsExpression>,
        /// Arguments in order
        arguments: Vec<JsExpression>,
    },
    /// `new constructor(arguments)`
    New {
        /// Constructor expression
        constructor: Box<JsExpression>,
        /// Arguments in order
        arguments: Vec<JsExpression>,
    },
    /// Function expression
    Function(Box<JsFunction>),
    /// Object literal
    Object(JsObjectLiteral),
    /// Array literal
    Array(Vec<JsExpression>),
}

impl JsExpression {
    /// `qualifier.name`
    pub fn qualified(name: JsName, qualifier: JsExpression) -> Self {
        JsExpression::NameRef(JsNameRef {
            name,
            qualifier: Some(Box::new(qualifier)),
        })
    }

    /// `qualifier.member` for a fixed member name
    pub fn member(qualifier: JsExpression, member: &str) -> Self {
        Self::qualified(JsName::new(member), qualifier)
    }

    /// `callee(arguments)`
    pub fn invoke(callee: JsExpression, arguments: Vec<JsExpression>) -> Self {
        JsExpression::Invocation {
            callee: Box::new(callee),
            arguments,
        }
    }

    /// `new constructor(arguments)`
    pub fn new_instance(constructor: JsExpression, arguments: Vec<JsExpression>) -> Self {
        JsExpression::New {
            constructor: Box::new(constructor),
            arguments,
        }
    }

    /// String literal
    pub fn string(value: impl Into<String>) -> Self {
        JsExpression::String(value.into())
    }

    /// Is this the absent-value marker?
    pub fn is_absent(&self) -> bool {
        matches!(self, JsExpression::Void(operand) if **operand == JsExpression::Int(1))
    }
}

/// Object literal: `{label: value, ...}`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct JsObjectLiteral {
    /// Properties in order
    pub properties: Vec<JsPropertyInitializer>,
}

impl JsObjectLiteral {
    /// Create an empty object literal
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a property
    pub fn add_property(&mut self, label: impl Into<String>, value: JsExpression) {
        self.properties.push(JsPropertyInitializer {
            label: label.into(),
            value,
        });
    }
}

/// One `label: value` entry of an object literal
#[derive(Debug, Clone, PartialEq)]
pub struct JsPropertyInitializer {
    /// Property label
    pub label: String,
    /// Property value
    pub value: JsExpression,
}

/// Function expression or declaration
#[derive(Debug, Clone, PartialEq, Default)]
pub struct JsFunction {
    /// Function name; named function statements print as declarations
    pub name: Option<JsName>,
    /// Parameters in order
    pub parameters: Vec<JsName>,
    /// Function body
    pub body: JsBlock,
}

impl JsFunction {
    /// Create a function with an empty body
    pub fn new(name: Option<JsName>) -> Self {
        Self {
            name,
            parameters: Vec::new(),
            body: JsBlock::new(),
        }
    }
}

// ============================================================================
// Statements
// ============================================================================

/// A JavaScript statement
#[derive(Debug, Clone, PartialEq)]
pub enum JsStatement {
    /// Expression statement
    Expression(JsExpression),
    /// Nested block
    Block(JsBlock),
    /// `var name = initializer;`
    Vars(JsVars),
    /// `return value;`
    Return(Option<JsExpression>),
}

/// A single `var` binding
#[derive(Debug, Clone, PartialEq)]
pub struct JsVars {
    /// Bound name
    pub name: JsName,
    /// Initializer; `None` leaves the binding unset
    pub initializer: Option<JsExpression>,
}

/// An ordered, growable statement sequence
#[derive(Debug, Clone, PartialEq, Default)]
pub struct JsBlock {
    /// Statements in order
    pub statements: Vec<JsStatement>,
}

impl JsBlock {
    /// Create an empty block
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a statement
    pub fn add_statement(&mut self, statement: JsStatement) {
        self.statements.push(statement);
    }

    /// Append statements, preserving their order
    pub fn add_statements(&mut self, statements: impl IntoIterator<Item = JsStatement>) {
        self.statements.extend(statements);
    }

    /// Is the block empty?
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Number of statements
    pub fn len(&self) -> usize {
        self.statements.len()
    }
}

/// A whole lowered program
#[derive(Debug, Clone, PartialEq, Default)]
pub struct JsProgram {
    /// Top-level statements
    pub global_block: JsBlock,
}

// ============================================================================
// Construction helpers
// ============================================================================

/// The absent-value marker used for omitted arguments and unset fields: `void 1`
pub fn absent() -> JsExpression {
    JsExpression::Void(Box::new(JsExpression::Int(1)))
}

/// `left = right`
pub fn js_assignment(left: JsExpression, right: JsExpression) -> JsExpression {
    JsExpression::Assign {
        target: Box::new(left),
        value: Box::new(right),
    }
}

/// `classRef.prototype`
pub fn prototype_of(class_ref: JsExpression) -> JsExpression {
    JsExpression::member(class_ref, namer::PROTOTYPE)
}

/// Wrap an expression as a statement
pub fn make_stmt(expression: JsExpression) -> JsStatement {
    JsStatement::Expression(expression)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_marker() {
        assert!(absent().is_absent());
        assert!(!JsExpression::Void(Box::new(JsExpression::Int(0))).is_absent());
        assert!(!JsExpression::Null.is_absent());
    }

    #[test]
    fn test_block_appends_in_order() {
        let mut block = JsBlock::new();
        block.add_statement(make_stmt(JsExpression::Int(1)));
        block.add_statements(vec![
            make_stmt(JsExpression::Int(2)),
            JsStatement::Return(None),
        ]);
        assert_eq!(block.len(), 3);
        assert_eq!(block.statements[0], make_stmt(JsExpression::Int(1)));
        assert_eq!(block.statements[2], JsStatement::Return(None));
    }

    #[test]
    fn test_prototype_of() {
        let proto = prototype_of(JsName::new("Shape").make_ref());
        match proto {
            JsExpression::NameRef(JsNameRef { name, qualifier }) => {
                assert_eq!(name.ident(), "prototype");
                assert_eq!(qualifier.as_deref(), Some(&JsName::new("Shape").make_ref()));
            }
            other => panic!("expected name ref, got {:?}", other),
        }
    }
}
