//! Class lowering
//!
//! A class becomes a constructor function plus statements that wire up its
//! prototype chain, attach its methods and record reflective metadata:
//!
//! ```text
//! function Circle(radius) { Shape.call(this); this.radius = radius; }
//! Circle.prototype = Object.create(Shape.prototype);
//! Circle.prototype.constructor = Circle;
//! Circle.prototype.area = function () { ... };
//! Circle.$metadata$ = {simpleName: "Circle", supertypes: [Shape]};
//! ```

use super::expr::{class_reference, lower_expression};
use crate::context::GenerationContext;
use crate::error::{LowerError, LowerResult};
use crate::js::{
    absent, js_assignment, make_stmt, prototype_of, JsExpression, JsFunction, JsName,
    JsObjectLiteral, JsStatement,
};
use crate::names::{namer, ScopeKind};
use irjs_ir::{IrClass, IrClassRef, IrFunction};

/// Generates the statements for one class declaration
pub struct ClassGenerator<'c, 'a> {
    class: &'c IrClass,
    context: &'c GenerationContext<'a>,
    class_name: JsName,
}

impl<'c, 'a> ClassGenerator<'c, 'a> {
    /// Create a generator for `class`, naming it through `context`
    pub fn new(class: &'c IrClass, context: &'c GenerationContext<'a>) -> Self {
        let class_name = context.name_for_symbol(class.symbol, &class.name);
        Self {
            class,
            context,
            class_name,
        }
    }

    /// Generate the class's statements
    ///
    /// Order: constructor, prototype linkage, methods in declaration order,
    /// metadata.
    pub fn generate(self) -> LowerResult<Vec<JsStatement>> {
        let base = self.primary_super_type()?;
        let constructor = self.primary_constructor()?;

        tracing::debug!(
            class = %self.class_name,
            members = self.class.declarations.len(),
            base = ?base.map(|b| b.name.to_string()),
            "lowering class"
        );

        let mut statements = Vec::new();

        let constructor = match constructor {
            Some(declaration) => self.generate_constructor(declaration)?,
            None => self.generate_default_constructor()?,
        };
        statements.push(make_stmt(JsExpression::Function(Box::new(constructor))));

        if let Some(base) = base {
            statements.extend(self.generate_inheritance_code(base));
        }

        for function in self
            .class
            .functions()
            .filter(|function| function.is_generated() && !function.is_constructor())
        {
            statements.push(self.generate_member_function(function)?);
        }

        statements.push(self.generate_class_metadata());
        Ok(statements)
    }

    /// The single concrete supertype to link the prototype chain to
    ///
    /// The root type counts as concrete here but is never linked;
    /// interfaces are skipped.
    fn primary_super_type(&self) -> LowerResult<Option<&'c IrClassRef>> {
        let mut concrete = self
            .class
            .super_types
            .iter()
            .filter(|super_type| !super_type.is_interface());

        let first = concrete.next();
        if concrete.next().is_some() {
            return Err(LowerError::unsupported(format!(
                "class '{}' with several concrete supertypes",
                self.class.name
            )));
        }
        Ok(first.filter(|super_type| !super_type.is_any()))
    }

    fn primary_constructor(&self) -> LowerResult<Option<&'c IrFunction>> {
        let mut primary = None;
        for constructor in self.class.constructors() {
            if !constructor.is_primary_constructor() {
                return Err(LowerError::unsupported(format!(
                    "secondary constructor of class '{}'",
                    self.class.name
                )));
            }
            if primary.replace(constructor).is_some() {
                return Err(LowerError::unsupported(format!(
                    "several primary constructors in class '{}'",
                    self.class.name
                )));
            }
        }
        Ok(primary)
    }

    // ========================================================================
    // Constructor
    // ========================================================================

    fn generate_constructor(&self, declaration: &IrFunction) -> LowerResult<JsFunction> {
        self.context.translate_function_with(
            declaration,
            Some(self.class_name.clone()),
            |body| self.generate_field_initializers(body),
        )
    }

    fn generate_default_constructor(&self) -> LowerResult<JsFunction> {
        let scope = self.context.new_scope(ScopeKind::Function);
        let mut body = self.context.new_declaration(scope);
        self.generate_field_initializers(&mut body)?;

        Ok(JsFunction {
            name: Some(self.class_name.clone()),
            parameters: Vec::new(),
            body: body.into_block(),
        })
    }

    /// `this.<field> = <initializer or void 1>;` for every field, in order
    fn generate_field_initializers(&self, body: &mut GenerationContext<'_>) -> LowerResult<()> {
        for field in self.class.fields() {
            let target = JsExpression::qualified(body.member_name(&field.name), JsExpression::This);
            let value = match &field.initializer {
                Some(initializer) => lower_expression(&initializer.expression, body)?,
                None => absent(),
            };
            body.add_statement(make_stmt(js_assignment(target, value)));
        }
        Ok(())
    }

    // ========================================================================
    // Inheritance and members
    // ========================================================================

    fn generate_inheritance_code(&self, base: &IrClassRef) -> Vec<JsStatement> {
        let class_ref = self.class_name.make_ref();
        let base_ref = class_reference(base, self.context);

        let create = JsExpression::invoke(
            JsExpression::member(JsName::new(namer::OBJECT).make_ref(), namer::CREATE),
            vec![prototype_of(base_ref)],
        );
        let link = js_assignment(prototype_of(class_ref.clone()), create);

        let restore_constructor = js_assignment(
            JsExpression::member(prototype_of(class_ref.clone()), namer::CONSTRUCTOR),
            class_ref,
        );

        vec![make_stmt(link), make_stmt(restore_constructor)]
    }

    fn generate_member_function(&self, function: &IrFunction) -> LowerResult<JsStatement> {
        let member = self.context.member_name(&function.name);
        let translated = self.context.translate_function(function, None)?;
        let slot = JsExpression::qualified(member, prototype_of(self.class_name.make_ref()));
        Ok(make_stmt(js_assignment(
            slot,
            JsExpression::Function(Box::new(translated)),
        )))
    }

    fn generate_class_metadata(&self) -> JsStatement {
        let mut metadata = JsObjectLiteral::new();

        if let Some(simple_name) = self.class.name.as_identifier() {
            metadata.add_property(namer::SIMPLE_NAME, JsExpression::string(simple_name));
        }

        let super_types = self
            .class
            .super_types
            .iter()
            .filter(|super_type| !super_type.is_any())
            .map(|super_type| class_reference(super_type, self.context))
            .collect();
        metadata.add_property(namer::SUPERTYPES, JsExpression::Array(super_types));

        make_stmt(js_assignment(
            JsExpression::member(self.class_name.make_ref(), namer::METADATA),
            JsExpression::Object(metadata),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::js::{JsBlock, JsProgram, PrettyPrint};
    use crate::names::StaticContext;
    use irjs_ir::{
        DeclarationOrigin, IrBody, IrConst, IrExpression, IrField, IrStatement, IrValueParameter,
        Modality, Name, SymbolId, SyntheticRole,
    };
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn generate(class: &IrClass) -> LowerResult<Vec<JsStatement>> {
        let root = GenerationContext::new(Arc::new(StaticContext::new()));
        ClassGenerator::new(class, &root).generate()
    }

    fn print(statements: Vec<JsStatement>) -> String {
        let mut global_block = JsBlock::new();
        global_block.add_statements(statements);
        JsProgram { global_block }.pretty_print()
    }

    #[test]
    fn test_point_without_constructor() {
        let point = IrClass::new(SymbolId(10), "Point")
            .with_super_type(IrClassRef::any())
            .with_member(IrField::new(SymbolId(11), "x"))
            .with_member(IrField::new(SymbolId(12), "y"));

        assert_eq!(
            print(generate(&point).unwrap()),
            "function Point() {\n  this.x = void 1;\n  this.y = void 1;\n}\n\
             Point.$metadata$ = {simpleName: \"Point\", supertypes: []};\n"
        );
    }

    #[test]
    fn test_explicit_constructor_gets_field_initializers_after_body() {
        let shape = IrClassRef::class(SymbolId(1), "Shape");
        let constructor = IrFunction::primary_constructor(SymbolId(21))
            .with_parameter(IrValueParameter::new(SymbolId(22), "radius"))
            .with_body(IrBody::block(vec![IrStatement::Expression(
                IrExpression::DelegatingConstructorCall(irjs_ir::IrDelegatingConstructorCall {
                    constructor: irjs_ir::IrConstructorRef {
                        symbol: SymbolId(2),
                        constructed_class: shape.clone(),
                        parameter_count: 0,
                    },
                    arguments: vec![],
                }),
            )]));
        let circle = IrClass::new(SymbolId(20), "Circle")
            .with_super_type(shape)
            .with_member(
                IrField::new(SymbolId(23), "radius")
                    .with_initializer(IrExpression::get_value(SymbolId(22), "radius")),
            )
            .with_member(IrField::new(SymbolId(24), "label").with_initializer(
                IrExpression::constant(IrConst::String("circle".to_string())),
            ))
            .with_member(constructor);

        assert_eq!(
            print(generate(&circle).unwrap()),
            "function Circle(radius) {\n  Shape.call(this);\n  this.radius = radius;\n  this.label = \"circle\";\n}\n\
             Circle.prototype = Object.create(Shape.prototype);\n\
             Circle.prototype.constructor = Circle;\n\
             Circle.$metadata$ = {simpleName: \"Circle\", supertypes: [Shape]};\n"
        );
    }

    #[test]
    fn test_linkage_follows_constructor_and_precedes_methods() {
        let mut area = IrFunction::new(SymbolId(31), "area")
            .with_body(IrBody::expression(IrExpression::constant(IrConst::Int(0))));
        area.dispatch_receiver = Some(IrValueParameter::new(
            SymbolId(32),
            Name::Synthetic(SyntheticRole::This),
        ));
        let square = IrClass::new(SymbolId(30), "Square")
            .with_member(area)
            .with_super_type(IrClassRef::class(SymbolId(1), "Shape"))
            .with_member(IrFunction::primary_constructor(SymbolId(33)));

        let statements = generate(&square).unwrap();
        assert_eq!(statements.len(), 5);
        let printed: Vec<String> = statements.iter().map(|s| s.pretty_print()).collect();
        assert!(printed[0].starts_with("function Square()"));
        assert_eq!(printed[1], "Square.prototype = Object.create(Shape.prototype);\n");
        assert_eq!(printed[2], "Square.prototype.constructor = Square;\n");
        assert_eq!(
            printed[3],
            "Square.prototype.area = function () {\n  return 0;\n};\n"
        );
        assert!(printed[4].starts_with("Square.$metadata$"));
    }

    #[test]
    fn test_abstract_and_fake_override_members_are_skipped() {
        let mut perimeter = IrFunction::new(SymbolId(41), "perimeter");
        perimeter.modality = Modality::Abstract;
        let mut inherited = IrFunction::new(SymbolId(42), "toString");
        inherited.origin = DeclarationOrigin::FakeOverride;

        let mut class = IrClass::new(SymbolId(40), "Polygon")
            .with_member(perimeter)
            .with_member(inherited);
        class.modality = Modality::Abstract;

        let statements = generate(&class).unwrap();
        assert_eq!(statements.len(), 2);
    }

    #[test]
    fn test_metadata_skips_root_type_and_keeps_order() {
        let class = IrClass::new(SymbolId(50), "Widget")
            .with_super_type(IrClassRef::interface(SymbolId(51), "A"))
            .with_super_type(IrClassRef::any())
            .with_super_type(IrClassRef::interface(SymbolId(52), "B"));

        let statements = generate(&class).unwrap();
        assert_eq!(statements.len(), 2);
        assert_eq!(
            statements[1].pretty_print(),
            "Widget.$metadata$ = {simpleName: \"Widget\", supertypes: [A, B]};\n"
        );
    }

    #[test]
    fn test_synthetic_class_name_has_no_simple_name() {
        let class = IrClass::new(SymbolId(60), Name::Synthetic(SyntheticRole::Anonymous));
        let statements = generate(&class).unwrap();
        assert_eq!(
            statements[1].pretty_print(),
            "$anonymous.$metadata$ = {supertypes: []};\n"
        );
    }

    #[test]
    fn test_several_concrete_supertypes_are_rejected() {
        let class = IrClass::new(SymbolId(70), "Both")
            .with_super_type(IrClassRef::class(SymbolId(71), "Left"))
            .with_super_type(IrClassRef::class(SymbolId(72), "Right"));
        assert!(matches!(generate(&class), Err(LowerError::Unsupported { .. })));
    }

    #[test]
    fn test_root_type_counts_as_concrete_supertype() {
        let class = IrClass::new(SymbolId(75), "Late")
            .with_super_type(IrClassRef::any())
            .with_super_type(IrClassRef::class(SymbolId(76), "Shape"));
        assert!(matches!(generate(&class), Err(LowerError::Unsupported { .. })));

        let only_root = IrClass::new(SymbolId(77), "Plain")
            .with_super_type(IrClassRef::interface(SymbolId(78), "Named"))
            .with_super_type(IrClassRef::any());
        assert_eq!(generate(&only_root).unwrap().len(), 2);
    }

    #[test]
    fn test_method_named_constructor_keeps_linkage() {
        let mut method = IrFunction::new(SymbolId(91), "constructor")
            .with_body(IrBody::expression(IrExpression::constant(IrConst::Int(1))));
        method.dispatch_receiver = Some(IrValueParameter::new(
            SymbolId(92),
            Name::Synthetic(SyntheticRole::This),
        ));
        let class = IrClass::new(SymbolId(90), "Builder")
            .with_super_type(IrClassRef::class(SymbolId(1), "Shape"))
            .with_member(method);

        let printed: Vec<String> = generate(&class)
            .unwrap()
            .iter()
            .map(|s| s.pretty_print())
            .collect();
        assert_eq!(printed[2], "Builder.prototype.constructor = Builder;\n");
        assert_eq!(
            printed[3],
            "Builder.prototype.constructor_0 = function () {\n  return 1;\n};\n"
        );
    }

    #[test]
    fn test_secondary_constructor_is_rejected() {
        let mut secondary = IrFunction::primary_constructor(SymbolId(81));
        secondary.kind = irjs_ir::FunctionKind::Constructor { is_primary: false };
        let class = IrClass::new(SymbolId(80), "Pair").with_member(secondary);
        assert!(matches!(generate(&class), Err(LowerError::Unsupported { .. })));
    }
}
