//! IR Expressions
//!
//! The expression variants the front-end hands to the backend. The set is
//! closed: lowering matches exhaustively, so a new variant here forces a
//! lowering-side update.

use crate::decl::{FunctionKind, IrClassRef};
use crate::name::Name;
use crate::symbol::{Declared, SymbolId};
use serde::{Deserialize, Serialize};

/// An IR expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IrExpression {
    /// Literal constant
    Const(IrConst),
    /// Field read: `receiver.field`
    GetField(IrGetField),
    /// Field write: `receiver.field = value`
    SetField(IrSetField),
    /// Read of a local value, parameter or receiver
    GetValue(IrGetValue),
    /// Call to the superclass constructor from a constructor
    DelegatingConstructorCall(IrDelegatingConstructorCall),
    /// Function, method or constructor call
    Call(IrCall),
}

impl IrExpression {
    /// Literal constant expression
    pub fn constant(value: IrConst) -> Self {
        IrExpression::Const(value)
    }

    /// Read of a value symbol
    pub fn get_value(symbol: SymbolId, name: impl Into<Name>) -> Self {
        IrExpression::GetValue(IrGetValue {
            symbol,
            name: name.into(),
        })
    }

    /// Read of the dispatch receiver (`this`)
    pub fn this(symbol: SymbolId) -> Self {
        Self::get_value(symbol, Name::Synthetic(crate::name::SyntheticRole::This))
    }
}

/// Constant values in IR
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum IrConst {
    /// Null reference
    Null,
    /// Boolean value
    Boolean(bool),
    /// UTF-16 character
    Char(char),
    /// 8-bit integer
    Byte(i8),
    /// 16-bit integer
    Short(i16),
    /// 32-bit integer
    Int(i32),
    /// 64-bit integer
    Long(i64),
    /// 32-bit float
    Float(f32),
    /// 64-bit float
    Double(f64),
    /// String literal
    String(String),
}

impl IrConst {
    /// Human-readable kind, for diagnostics
    pub fn kind_name(&self) -> &'static str {
        match self {
            IrConst::Null => "null",
            IrConst::Boolean(_) => "boolean",
            IrConst::Char(_) => "char",
            IrConst::Byte(_) => "byte",
            IrConst::Short(_) => "short",
            IrConst::Int(_) => "int",
            IrConst::Long(_) => "long",
            IrConst::Float(_) => "float",
            IrConst::Double(_) => "double",
            IrConst::String(_) => "string",
        }
    }
}

/// Reference to a field declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IrFieldRef {
    /// Field symbol
    pub symbol: SymbolId,
    /// Field name
    pub name: Name,
}

impl IrFieldRef {
    /// Create a new field reference
    pub fn new(symbol: SymbolId, name: impl Into<Name>) -> Self {
        Self {
            symbol,
            name: name.into(),
        }
    }
}

impl Declared for IrFieldRef {
    fn symbol(&self) -> SymbolId {
        self.symbol
    }

    fn name(&self) -> &Name {
        &self.name
    }
}

/// Field read
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrGetField {
    /// Field being read
    pub field: IrFieldRef,
    /// Receiver; absent for top-level and static fields
    #[serde(default)]
    pub receiver: Option<Box<IrExpression>>,
}

/// Field write
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrSetField {
    /// Field being written
    pub field: IrFieldRef,
    /// Receiver; absent for top-level and static fields
    #[serde(default)]
    pub receiver: Option<Box<IrExpression>>,
    /// Assigned value
    pub value: Box<IrExpression>,
}

/// Read of a value declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IrGetValue {
    /// Symbol of the parameter, variable or receiver
    pub symbol: SymbolId,
    /// Its declared name
    pub name: Name,
}

/// Reference to a constructor, as seen from a delegating call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IrConstructorRef {
    /// Constructor symbol
    pub symbol: SymbolId,
    /// Class the constructor builds
    pub constructed_class: IrClassRef,
    /// Declared parameter count
    pub parameter_count: usize,
}

/// Reference to a callable, as seen from a call site
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IrFunctionRef {
    /// Callee symbol
    pub symbol: SymbolId,
    /// Callee name
    pub name: Name,
    /// Callee kind
    #[serde(default)]
    pub kind: FunctionKind,
    /// Owning class, for members and constructors
    #[serde(default)]
    pub owner: Option<IrClassRef>,
    /// Declared parameter count
    pub parameter_count: usize,
}

impl IrFunctionRef {
    /// Reference a simple function or method
    pub fn simple(symbol: SymbolId, name: impl Into<Name>, parameter_count: usize) -> Self {
        Self {
            symbol,
            name: name.into(),
            kind: FunctionKind::Simple,
            owner: None,
            parameter_count,
        }
    }

    /// Reference the primary constructor of `owner`
    pub fn primary_constructor(symbol: SymbolId, owner: IrClassRef, parameter_count: usize) -> Self {
        Self {
            symbol,
            name: Name::Synthetic(crate::name::SyntheticRole::Init),
            kind: FunctionKind::Constructor { is_primary: true },
            owner: Some(owner),
            parameter_count,
        }
    }

    /// Is the callee a primary constructor?
    pub fn is_primary_constructor(&self) -> bool {
        matches!(self.kind, FunctionKind::Constructor { is_primary: true })
    }

    /// Is the callee a constructor of any kind?
    pub fn is_constructor(&self) -> bool {
        matches!(self.kind, FunctionKind::Constructor { .. })
    }
}

impl Declared for IrFunctionRef {
    fn symbol(&self) -> SymbolId {
        self.symbol
    }

    fn name(&self) -> &Name {
        &self.name
    }
}

/// Superclass constructor invocation from a constructor body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrDelegatingConstructorCall {
    /// Target constructor
    pub constructor: IrConstructorRef,
    /// Positional arguments; `None` marks an omitted (defaulted) argument
    #[serde(default)]
    pub arguments: Vec<Option<IrExpression>>,
}

/// Function call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrCall {
    /// Callee
    pub callee: IrFunctionRef,
    /// Dispatch receiver of a member call
    #[serde(default)]
    pub dispatch_receiver: Option<Box<IrExpression>>,
    /// Extension receiver of an extension call
    #[serde(default)]
    pub extension_receiver: Option<Box<IrExpression>>,
    /// Positional arguments; `None` marks an omitted (defaulted) argument
    #[serde(default)]
    pub arguments: Vec<Option<IrExpression>>,
}

impl IrCall {
    /// Call with no receivers
    pub fn new(callee: IrFunctionRef, arguments: Vec<Option<IrExpression>>) -> Self {
        Self {
            callee,
            dispatch_receiver: None,
            extension_receiver: None,
            arguments,
        }
    }
}

/// Positional argument access shared by every call-like expression
pub trait IrMemberAccess {
    /// Argument supplied for the parameter at `index`, if any
    fn value_argument(&self, index: usize) -> Option<&IrExpression>;

    /// Number of argument slots present at the call site
    fn value_argument_slots(&self) -> usize;

    /// Name of the called function or constructed class, for diagnostics
    fn callee_name(&self) -> &Name;
}

impl IrMemberAccess for IrCall {
    fn value_argument(&self, index: usize) -> Option<&IrExpression> {
        self.arguments.get(index).and_then(Option::as_ref)
    }

    fn value_argument_slots(&self) -> usize {
        self.arguments.len()
    }

    fn callee_name(&self) -> &Name {
        &self.callee.name
    }
}

impl IrMemberAccess for IrDelegatingConstructorCall {
    fn value_argument(&self, index: usize) -> Option<&IrExpression> {
        self.arguments.get(index).and_then(Option::as_ref)
    }

    fn value_argument_slots(&self) -> usize {
        self.arguments.len()
    }

    fn callee_name(&self) -> &Name {
        &self.constructor.constructed_class.name
    }
}

/// An expression used as a body (field initializers, expression-bodied functions)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IrExpressionBody {
    /// The expression
    pub expression: IrExpression,
}

impl IrExpressionBody {
    /// Wrap an expression as a body
    pub fn new(expression: IrExpression) -> Self {
        Self { expression }
    }
}
