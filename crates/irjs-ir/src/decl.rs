//! IR Declarations
//!
//! Classes, functions, fields and value parameters, plus the module that
//! holds the top-level ones.

use crate::expr::IrExpressionBody;
use crate::name::{Name, SyntheticRole};
use crate::stmt::IrBody;
use crate::symbol::{Declared, SymbolId};
use serde::{Deserialize, Serialize};

/// An IR module (compilation unit)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrModule {
    /// Module name
    pub name: String,
    /// Top-level declarations in source order
    #[serde(default)]
    pub declarations: Vec<IrDeclaration>,
}

impl IrModule {
    /// Create a new empty module
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declarations: Vec::new(),
        }
    }

    /// Add a top-level declaration
    pub fn add(&mut self, declaration: impl Into<IrDeclaration>) {
        self.declarations.push(declaration.into());
    }

    /// Iterate over the top-level classes
    pub fn classes(&self) -> impl Iterator<Item = &IrClass> {
        self.declarations.iter().filter_map(|decl| match decl {
            IrDeclaration::Class(class) => Some(class),
            _ => None,
        })
    }
}

/// A top-level declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "declaration", rename_all = "snake_case")]
pub enum IrDeclaration {
    /// Class or interface
    Class(IrClass),
    /// Top-level function
    Function(IrFunction),
    /// Top-level property
    Property(IrField),
}

impl Declared for IrDeclaration {
    fn symbol(&self) -> SymbolId {
        match self {
            IrDeclaration::Class(class) => class.symbol,
            IrDeclaration::Function(function) => function.symbol,
            IrDeclaration::Property(field) => field.symbol,
        }
    }

    fn name(&self) -> &Name {
        match self {
            IrDeclaration::Class(class) => &class.name,
            IrDeclaration::Function(function) => &function.name,
            IrDeclaration::Property(field) => &field.name,
        }
    }
}

impl From<IrClass> for IrDeclaration {
    fn from(class: IrClass) -> Self {
        IrDeclaration::Class(class)
    }
}

impl From<IrFunction> for IrDeclaration {
    fn from(function: IrFunction) -> Self {
        IrDeclaration::Function(function)
    }
}

impl From<IrField> for IrDeclaration {
    fn from(field: IrField) -> Self {
        IrDeclaration::Property(field)
    }
}

/// Inheritance modality of a class or member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modality {
    /// Cannot be overridden
    #[default]
    Final,
    /// May be overridden
    Open,
    /// Has no implementation
    Abstract,
}

/// Whether a member was written in the class or only inherited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclarationOrigin {
    /// Declared in this class
    #[default]
    Defined,
    /// Inherited but not redeclared; never code-generated
    FakeOverride,
}

/// Kind of a class-like declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassKind {
    /// Ordinary class
    #[default]
    Class,
    /// Interface
    Interface,
    /// Singleton object
    Object,
}

/// Reference to a class, used for supertypes and constructor owners
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IrClassRef {
    /// Class symbol
    pub symbol: SymbolId,
    /// Class name
    pub name: Name,
    /// Class kind
    #[serde(default)]
    pub kind: ClassKind,
}

impl IrClassRef {
    /// Reference an ordinary class
    pub fn class(symbol: SymbolId, name: impl Into<Name>) -> Self {
        Self {
            symbol,
            name: name.into(),
            kind: ClassKind::Class,
        }
    }

    /// Reference an interface
    pub fn interface(symbol: SymbolId, name: impl Into<Name>) -> Self {
        Self {
            symbol,
            name: name.into(),
            kind: ClassKind::Interface,
        }
    }

    /// Reference the universal root type
    pub fn any() -> Self {
        Self::class(SymbolId::ANY, "Any")
    }

    /// Is this the universal root type?
    pub fn is_any(&self) -> bool {
        self.symbol.is_any()
    }

    /// Is this an interface?
    pub fn is_interface(&self) -> bool {
        self.kind == ClassKind::Interface
    }
}

impl Declared for IrClassRef {
    fn symbol(&self) -> SymbolId {
        self.symbol
    }

    fn name(&self) -> &Name {
        &self.name
    }
}

/// A class declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrClass {
    /// Class symbol
    pub symbol: SymbolId,
    /// Class name
    pub name: Name,
    /// Class kind
    #[serde(default)]
    pub kind: ClassKind,
    /// Class modality
    #[serde(default)]
    pub modality: Modality,
    /// Declared supertypes, in source order
    #[serde(default)]
    pub super_types: Vec<IrClassRef>,
    /// Members, in source order
    #[serde(default)]
    pub declarations: Vec<IrMember>,
}

impl IrClass {
    /// Create a new class with no supertypes and no members
    pub fn new(symbol: SymbolId, name: impl Into<Name>) -> Self {
        Self {
            symbol,
            name: name.into(),
            kind: ClassKind::Class,
            modality: Modality::Final,
            super_types: Vec::new(),
            declarations: Vec::new(),
        }
    }

    /// Add a supertype
    pub fn with_super_type(mut self, super_type: IrClassRef) -> Self {
        self.super_types.push(super_type);
        self
    }

    /// Add a member
    pub fn with_member(mut self, member: impl Into<IrMember>) -> Self {
        self.declarations.push(member.into());
        self
    }

    /// A reference to this class
    pub fn to_ref(&self) -> IrClassRef {
        IrClassRef {
            symbol: self.symbol,
            name: self.name.clone(),
            kind: self.kind,
        }
    }

    /// Iterate over the fields in declaration order
    pub fn fields(&self) -> impl Iterator<Item = &IrField> {
        self.declarations.iter().filter_map(|member| match member {
            IrMember::Field(field) => Some(field),
            IrMember::Function(_) => None,
        })
    }

    /// Iterate over the functions (including constructors) in declaration order
    pub fn functions(&self) -> impl Iterator<Item = &IrFunction> {
        self.declarations.iter().filter_map(|member| match member {
            IrMember::Function(function) => Some(function),
            IrMember::Field(_) => None,
        })
    }

    /// Iterate over the constructors in declaration order
    pub fn constructors(&self) -> impl Iterator<Item = &IrFunction> {
        self.functions().filter(|function| function.is_constructor())
    }
}

impl Declared for IrClass {
    fn symbol(&self) -> SymbolId {
        self.symbol
    }

    fn name(&self) -> &Name {
        &self.name
    }
}

/// A class member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "declaration", rename_all = "snake_case")]
pub enum IrMember {
    /// Method or constructor
    Function(IrFunction),
    /// Backing field
    Field(IrField),
}

impl From<IrFunction> for IrMember {
    fn from(function: IrFunction) -> Self {
        IrMember::Function(function)
    }
}

impl From<IrField> for IrMember {
    fn from(field: IrField) -> Self {
        IrMember::Field(field)
    }
}

/// Kind of a function-like declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FunctionKind {
    /// Ordinary function or method
    #[default]
    Simple,
    /// Class constructor
    Constructor {
        /// Is this the primary constructor?
        is_primary: bool,
    },
}

/// A function, method or constructor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrFunction {
    /// Function symbol
    pub symbol: SymbolId,
    /// Function name
    pub name: Name,
    /// Function kind
    #[serde(default)]
    pub kind: FunctionKind,
    /// Modality
    #[serde(default)]
    pub modality: Modality,
    /// Declaration origin
    #[serde(default)]
    pub origin: DeclarationOrigin,
    /// Dispatch receiver (`this`) of a member function
    #[serde(default)]
    pub dispatch_receiver: Option<IrValueParameter>,
    /// Extension receiver of an extension function
    #[serde(default)]
    pub extension_receiver: Option<IrValueParameter>,
    /// Ordinary value parameters
    #[serde(default)]
    pub value_parameters: Vec<IrValueParameter>,
    /// Body (absent for abstract members)
    #[serde(default)]
    pub body: Option<IrBody>,
}

impl IrFunction {
    /// Create a simple function with no parameters and no body
    pub fn new(symbol: SymbolId, name: impl Into<Name>) -> Self {
        Self {
            symbol,
            name: name.into(),
            kind: FunctionKind::Simple,
            modality: Modality::Final,
            origin: DeclarationOrigin::Defined,
            dispatch_receiver: None,
            extension_receiver: None,
            value_parameters: Vec::new(),
            body: None,
        }
    }

    /// Create a primary constructor
    pub fn primary_constructor(symbol: SymbolId) -> Self {
        Self {
            kind: FunctionKind::Constructor { is_primary: true },
            ..Self::new(symbol, Name::Synthetic(SyntheticRole::Init))
        }
    }

    /// Add a value parameter
    pub fn with_parameter(mut self, parameter: IrValueParameter) -> Self {
        self.value_parameters.push(parameter);
        self
    }

    /// Set the body
    pub fn with_body(mut self, body: IrBody) -> Self {
        self.body = Some(body);
        self
    }

    /// Is this a constructor?
    pub fn is_constructor(&self) -> bool {
        matches!(self.kind, FunctionKind::Constructor { .. })
    }

    /// Is this the primary constructor?
    pub fn is_primary_constructor(&self) -> bool {
        matches!(self.kind, FunctionKind::Constructor { is_primary: true })
    }

    /// Does this member need code of its own?
    ///
    /// Abstract members and fake overrides have no body to generate.
    pub fn is_generated(&self) -> bool {
        self.modality != Modality::Abstract && self.origin != DeclarationOrigin::FakeOverride
    }
}

impl Declared for IrFunction {
    fn symbol(&self) -> SymbolId {
        self.symbol
    }

    fn name(&self) -> &Name {
        &self.name
    }
}

/// A value parameter (or receiver parameter)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IrValueParameter {
    /// Parameter symbol
    pub symbol: SymbolId,
    /// Parameter name
    pub name: Name,
}

impl IrValueParameter {
    /// Create a new value parameter
    pub fn new(symbol: SymbolId, name: impl Into<Name>) -> Self {
        Self {
            symbol,
            name: name.into(),
        }
    }
}

impl Declared for IrValueParameter {
    fn symbol(&self) -> SymbolId {
        self.symbol
    }

    fn name(&self) -> &Name {
        &self.name
    }
}

/// A field (class backing field or top-level property)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrField {
    /// Field symbol
    pub symbol: SymbolId,
    /// Field name
    pub name: Name,
    /// Initializer, if any
    #[serde(default)]
    pub initializer: Option<IrExpressionBody>,
}

impl IrField {
    /// Create a field with no initializer
    pub fn new(symbol: SymbolId, name: impl Into<Name>) -> Self {
        Self {
            symbol,
            name: name.into(),
            initializer: None,
        }
    }

    /// Set the initializer
    pub fn with_initializer(mut self, expression: crate::expr::IrExpression) -> Self {
        self.initializer = Some(IrExpressionBody::new(expression));
        self
    }
}

impl Declared for IrField {
    fn symbol(&self) -> SymbolId {
        self.symbol
    }

    fn name(&self) -> &Name {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_function_generation_filter() {
        let method = IrFunction::new(SymbolId(1), "area");
        assert!(method.is_generated());

        let mut abstract_method = IrFunction::new(SymbolId(2), "perimeter");
        abstract_method.modality = Modality::Abstract;
        assert!(!abstract_method.is_generated());

        let mut inherited = IrFunction::new(SymbolId(3), "toString");
        inherited.origin = DeclarationOrigin::FakeOverride;
        assert!(!inherited.is_generated());
    }

    #[test]
    fn test_primary_constructor() {
        let ctor = IrFunction::primary_constructor(SymbolId(4));
        assert!(ctor.is_constructor());
        assert!(ctor.is_primary_constructor());
        assert_eq!(ctor.name, Name::Synthetic(SyntheticRole::Init));
    }

    #[test]
    fn test_class_member_views() {
        let class = IrClass::new(SymbolId(10), "Point")
            .with_member(IrField::new(SymbolId(11), "x"))
            .with_member(IrFunction::primary_constructor(SymbolId(12)))
            .with_member(IrField::new(SymbolId(13), "y"))
            .with_member(IrFunction::new(SymbolId(14), "norm"));

        let fields: Vec<_> = class.fields().map(|f| f.name.to_string()).collect();
        assert_eq!(fields, vec!["x", "y"]);
        assert_eq!(class.functions().count(), 2);
        assert_eq!(class.constructors().count(), 1);
    }

    #[test]
    fn test_root_class_ref() {
        assert!(IrClassRef::any().is_any());
        assert!(!IrClassRef::class(SymbolId(5), "Shape").is_any());
        assert!(IrClassRef::interface(SymbolId(6), "Drawable").is_interface());
    }
}
