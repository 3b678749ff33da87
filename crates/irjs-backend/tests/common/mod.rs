//! Shared IR fixtures for backend integration tests

#![allow(dead_code)]

use irjs_ir::{
    IrBody, IrCall, IrClass, IrClassRef, IrConst, IrConstructorRef, IrDelegatingConstructorCall,
    IrExpression, IrField, IrFieldRef, IrFunction, IrFunctionRef, IrGetField, IrModule,
    IrStatement, IrValueParameter, IrVariable, Name, SymbolId, SyntheticRole,
};

pub fn int(value: i32) -> IrExpression {
    IrExpression::constant(IrConst::Int(value))
}

pub fn string(value: &str) -> IrExpression {
    IrExpression::constant(IrConst::String(value.to_string()))
}

pub fn this_param(symbol: u32) -> IrValueParameter {
    IrValueParameter::new(SymbolId(symbol), Name::Synthetic(SyntheticRole::This))
}

pub fn this_field(field: u32, name: &str, this: u32) -> IrExpression {
    IrExpression::GetField(IrGetField {
        field: IrFieldRef::new(SymbolId(field), name),
        receiver: Some(Box::new(IrExpression::this(SymbolId(this)))),
    })
}

pub fn super_call(class: &IrClassRef, constructor: u32, arguments: Vec<IrExpression>) -> IrStatement {
    IrStatement::Expression(IrExpression::DelegatingConstructorCall(
        IrDelegatingConstructorCall {
            constructor: IrConstructorRef {
                symbol: SymbolId(constructor),
                constructed_class: class.clone(),
                parameter_count: arguments.len(),
            },
            arguments: arguments.into_iter().map(Some).collect(),
        },
    ))
}

/// `class Point(x, y)` with no explicit constructor and root supertype
pub fn point() -> IrClass {
    IrClass::new(SymbolId(10), "Point")
        .with_super_type(IrClassRef::any())
        .with_member(IrField::new(SymbolId(11), "x"))
        .with_member(IrField::new(SymbolId(12), "y"))
}

pub fn shape_ref() -> IrClassRef {
    IrClassRef::class(SymbolId(100), "Shape")
}

pub fn named_ref() -> IrClassRef {
    IrClassRef::interface(SymbolId(110), "Named")
}

/// Shape hierarchy: an open base class, a subclass that overrides a method
/// and implements an interface, and a top-level function that uses both
pub fn shapes_module() -> IrModule {
    let mut module = IrModule::new("shapes");

    // open class Shape(val name: String) { open fun area(): Double = 0.0 }
    let shape_ctor = IrFunction::primary_constructor(SymbolId(101))
        .with_parameter(IrValueParameter::new(SymbolId(102), "name"))
        .with_body(IrBody::block(vec![super_call(&IrClassRef::any(), 1, vec![])]));
    let mut shape_area = IrFunction::new(SymbolId(104), "area")
        .with_body(IrBody::expression(IrExpression::constant(IrConst::Double(0.0))));
    shape_area.dispatch_receiver = Some(this_param(105));
    let mut shape = IrClass::new(SymbolId(100), "Shape")
        .with_super_type(IrClassRef::any())
        .with_member(shape_ctor)
        .with_member(
            IrField::new(SymbolId(103), "name")
                .with_initializer(IrExpression::get_value(SymbolId(102), "name")),
        )
        .with_member(shape_area);
    shape.modality = irjs_ir::Modality::Open;
    module.add(shape);

    // interface Named { val name: String }
    let mut named = IrClass::new(SymbolId(110), "Named");
    named.kind = irjs_ir::ClassKind::Interface;
    module.add(named);

    // class Square(side: Int) : Shape("square"), Named { val side = side; override fun area() = side * 1.0 }
    let square_ctor = IrFunction::primary_constructor(SymbolId(121))
        .with_parameter(IrValueParameter::new(SymbolId(122), "side"))
        .with_body(IrBody::block(vec![super_call(&shape_ref(), 101, vec![string("square")])]));
    let mut square_area = IrFunction::new(SymbolId(124), "area").with_body(IrBody::block(vec![
        IrStatement::Variable(IrVariable::new(
            SymbolId(126),
            "side",
            Some(this_field(123, "side", 125)),
        )),
        IrStatement::Return(irjs_ir::IrReturn {
            value: Some(IrExpression::get_value(SymbolId(126), "side")),
        }),
    ]));
    square_area.dispatch_receiver = Some(this_param(125));
    let mut inherited_name = IrFunction::new(SymbolId(127), "toString");
    inherited_name.origin = irjs_ir::DeclarationOrigin::FakeOverride;
    let square = IrClass::new(SymbolId(120), "Square")
        .with_super_type(shape_ref())
        .with_super_type(named_ref())
        .with_member(
            IrField::new(SymbolId(123), "side")
                .with_initializer(IrExpression::get_value(SymbolId(122), "side")),
        )
        .with_member(square_area)
        .with_member(square_ctor)
        .with_member(inherited_name);
    module.add(square);

    // fun describe(shape: Shape, prefix: String = "shape") = print(prefix, shape.area())
    let mut area_call = IrCall::new(IrFunctionRef::simple(SymbolId(104), "area", 0), vec![]);
    area_call.dispatch_receiver = Some(Box::new(IrExpression::get_value(SymbolId(131), "shape")));
    let print_call = IrCall::new(
        IrFunctionRef::simple(SymbolId(900), "print", 2),
        vec![
            Some(IrExpression::get_value(SymbolId(132), "prefix")),
            Some(IrExpression::Call(area_call)),
        ],
    );
    module.add(
        IrFunction::new(SymbolId(130), "describe")
            .with_parameter(IrValueParameter::new(SymbolId(131), "shape"))
            .with_parameter(IrValueParameter::new(SymbolId(132), "prefix"))
            .with_body(IrBody::expression(IrExpression::Call(print_call))),
    );

    // val unit = Square(1)
    let new_square = IrCall::new(
        IrFunctionRef::primary_constructor(SymbolId(121), IrClassRef::class(SymbolId(120), "Square"), 1),
        vec![Some(int(1))],
    );
    module.add(IrField::new(SymbolId(140), "unit").with_initializer(IrExpression::Call(new_square)));

    module
}
