//! IR to JavaScript lowering
//!
//! Converts a module's top-level declarations into a JavaScript program.
//! Top-level names are registered up front, in declaration order, so the
//! identifiers chosen never depend on the order declarations are lowered
//! in. That makes it safe to lower declarations on parallel workers.

pub(crate) mod args;
mod class;
mod expr;
pub(crate) mod stmt;

pub use class::ClassGenerator;
pub use expr::{lower_constant, lower_expression};
pub use stmt::{lower_body, lower_statement};

use crate::context::GenerationContext;
use crate::error::{LowerError, LowerResult};
use crate::js::{make_stmt, JsExpression, JsProgram, JsStatement, JsVars};
use crate::names::StaticContext;
use irjs_ir::{
    Declared, IrBody, IrClass, IrClassRef, IrDeclaration, IrExpression, IrFunction, IrModule,
    IrStatement, Name, SymbolId,
};
use parking_lot::Mutex;
use rustc_hash::FxHashSet;
use serde::Deserialize;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

/// Lowering configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoweringOptions {
    /// Lower top-level declarations on worker threads
    pub parallel: bool,
    /// Worker count; defaults to the number of CPUs
    pub workers: Option<usize>,
}

impl LoweringOptions {
    /// Effective number of workers
    pub fn worker_count(&self) -> usize {
        self.workers.unwrap_or_else(num_cpus::get).max(1)
    }
}

/// Lower a whole module into a program
pub fn lower_module(module: &IrModule, options: &LoweringOptions) -> LowerResult<JsProgram> {
    let static_context = Arc::new(StaticContext::new());
    let mut root = GenerationContext::new(static_context);

    declare_module_names(module, &root);

    let declarations = &module.declarations;
    let workers = options.worker_count().min(declarations.len());
    let parallel = options.parallel && workers > 1;
    tracing::debug!(
        module = %module.name,
        declarations = declarations.len(),
        workers = if parallel { workers } else { 1 },
        "lowering module"
    );

    let lowered = if parallel {
        lower_parallel(declarations, &root, workers)?
    } else {
        declarations
            .iter()
            .map(|declaration| lower_declaration(declaration, &root))
            .collect::<LowerResult<Vec<_>>>()?
    };

    for statements in lowered {
        root.add_statements(statements);
    }

    Ok(JsProgram {
        global_block: root.into_block(),
    })
}

/// Lower one top-level declaration in its own child context
pub fn lower_declaration(
    declaration: &IrDeclaration,
    parent: &GenerationContext<'_>,
) -> LowerResult<Vec<JsStatement>> {
    let mut context = parent.new_declaration(parent.scope());

    match declaration {
        IrDeclaration::Class(class) => {
            let statements = ClassGenerator::new(class, &context).generate()?;
            context.add_statements(statements);
        }
        IrDeclaration::Function(function) => {
            if function.is_constructor() {
                return Err(LowerError::unsupported(format!(
                    "top-level constructor {}",
                    function.symbol
                )));
            }
            let name = context.name_for_symbol(function.symbol, &function.name);
            tracing::debug!(function = %name, "lowering function");
            let translated = context.translate_function(function, Some(name))?;
            context.add_statement(make_stmt(JsExpression::Function(Box::new(translated))));
        }
        IrDeclaration::Property(field) => {
            let name = context.name_for_symbol(field.symbol, &field.name);
            let initializer = match &field.initializer {
                Some(initializer) => Some(lower_expression(&initializer.expression, &context)?),
                None => None,
            };
            context.add_statement(JsStatement::Vars(JsVars { name, initializer }));
        }
    }

    Ok(context.into_block().statements)
}

/// Lower declarations on `workers` scoped threads; results keep declaration order
fn lower_parallel(
    declarations: &[IrDeclaration],
    root: &GenerationContext<'_>,
    workers: usize,
) -> LowerResult<Vec<Vec<JsStatement>>> {
    let next = AtomicUsize::new(0);
    let failed = AtomicBool::new(false);
    let results: Mutex<Vec<Option<LowerResult<Vec<JsStatement>>>>> =
        Mutex::new((0..declarations.len()).map(|_| None).collect());

    let outcome = crossbeam::scope(|scope| {
        for _ in 0..workers {
            scope.spawn(|_| loop {
                // Indices are claimed in increasing order, so every index below a
                // failure has already been claimed when a worker stops early
                if failed.load(Ordering::Relaxed) {
                    break;
                }
                let index = next.fetch_add(1, Ordering::Relaxed);
                if index >= declarations.len() {
                    break;
                }
                let result = lower_declaration(&declarations[index], root);
                if result.is_err() {
                    failed.store(true, Ordering::Relaxed);
                }
                results.lock()[index] = Some(result);
            });
        }
    });
    if outcome.is_err() {
        tracing::warn!("a lowering worker panicked");
    }

    let mut lowered = Vec::with_capacity(declarations.len());
    for (index, result) in results.into_inner().into_iter().enumerate() {
        match result {
            Some(result) => lowered.push(result?),
            None => return Err(LowerError::WorkerPanicked { index }),
        }
    }
    Ok(lowered)
}

// ============================================================================
// Module-level names
// ============================================================================

/// Register every module-level name before any body is lowered
///
/// Top-level declarations come first, in declaration order; then names the
/// module references without declaring (external functions, classes and
/// properties), in the order they are first referenced.
fn declare_module_names(module: &IrModule, root: &GenerationContext<'_>) {
    for declaration in &module.declarations {
        root.name_for_symbol(declaration.symbol(), declaration.name());
    }

    let mut collector = GlobalRefCollector::default();
    for declaration in &module.declarations {
        collector.visit_declaration(declaration);
    }
    for (symbol, name) in &collector.referenced {
        root.name_for_symbol(*symbol, name);
    }
}

/// Collects module-level symbols referenced by name from declaration bodies
#[derive(Default)]
struct GlobalRefCollector {
    seen: FxHashSet<SymbolId>,
    referenced: Vec<(SymbolId, Name)>,
}

impl GlobalRefCollector {
    fn add(&mut self, symbol: SymbolId, name: &Name) {
        if !symbol.is_any() && self.seen.insert(symbol) {
            self.referenced.push((symbol, name.clone()));
        }
    }

    fn add_class(&mut self, class: &IrClassRef) {
        self.add(class.symbol, &class.name);
    }

    fn visit_declaration(&mut self, declaration: &IrDeclaration) {
        match declaration {
            IrDeclaration::Class(class) => self.visit_class(class),
            IrDeclaration::Function(function) => self.visit_function(function),
            IrDeclaration::Property(field) => {
                if let Some(initializer) = &field.initializer {
                    self.visit_expression(&initializer.expression);
                }
            }
        }
    }

    fn visit_class(&mut self, class: &IrClass) {
        for super_type in &class.super_types {
            self.add_class(super_type);
        }
        for field in class.fields() {
            if let Some(initializer) = &field.initializer {
                self.visit_expression(&initializer.expression);
            }
        }
        for function in class.functions() {
            self.visit_function(function);
        }
    }

    fn visit_function(&mut self, function: &IrFunction) {
        match &function.body {
            Some(IrBody::Block(block)) => self.visit_statements(&block.statements),
            Some(IrBody::Expression(body)) => self.visit_expression(&body.expression),
            None => {}
        }
    }

    fn visit_statements(&mut self, statements: &[IrStatement]) {
        for statement in statements {
            match statement {
                IrStatement::Expression(expression) => self.visit_expression(expression),
                IrStatement::Block(block) => self.visit_statements(&block.statements),
                IrStatement::Variable(variable) => {
                    if let Some(initializer) = &variable.initializer {
                        self.visit_expression(initializer);
                    }
                }
                IrStatement::Return(ret) => {
                    if let Some(value) = &ret.value {
                        self.visit_expression(value);
                    }
                }
            }
        }
    }

    fn visit_expression(&mut self, expression: &IrExpression) {
        match expression {
            IrExpression::Const(_) | IrExpression::GetValue(_) => {}
            IrExpression::GetField(get) => match &get.receiver {
                Some(receiver) => self.visit_expression(receiver),
                None => self.add(get.field.symbol, &get.field.name),
            },
            IrExpression::SetField(set) => {
                match &set.receiver {
                    Some(receiver) => self.visit_expression(receiver),
                    None => self.add(set.field.symbol, &set.field.name),
                }
                self.visit_expression(&set.value);
            }
            IrExpression::DelegatingConstructorCall(call) => {
                self.add_class(&call.constructor.constructed_class);
                self.visit_arguments(&call.arguments);
            }
            IrExpression::Call(call) => {
                if call.callee.is_constructor() {
                    if let Some(owner) = &call.callee.owner {
                        self.add_class(owner);
                    }
                }
                match &call.dispatch_receiver {
                    Some(receiver) => self.visit_expression(receiver),
                    None if !call.callee.is_constructor() => {
                        self.add(call.callee.symbol, &call.callee.name)
                    }
                    None => {}
                }
                if let Some(receiver) = &call.extension_receiver {
                    self.visit_expression(receiver);
                }
                self.visit_arguments(&call.arguments);
            }
        }
    }

    fn visit_arguments(&mut self, arguments: &[Option<IrExpression>]) {
        for argument in arguments.iter().flatten() {
            self.visit_expression(argument);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::js::PrettyPrint;
    use irjs_ir::{IrCall, IrConst, IrField, IrFunctionRef};
    use pretty_assertions::assert_eq;

    fn call_external(symbol: u32, name: &str) -> IrExpression {
        IrExpression::Call(IrCall::new(IrFunctionRef::simple(SymbolId(symbol), name, 0), vec![]))
    }

    #[test]
    fn test_top_level_declarations_in_order() {
        let mut module = IrModule::new("demo");
        module.add(
            IrField::new(SymbolId(1), "limit")
                .with_initializer(IrExpression::constant(IrConst::Int(10))),
        );
        module.add(IrField::new(SymbolId(2), "cache"));
        module.add(
            IrFunction::new(SymbolId(3), "main")
                .with_body(IrBody::block(vec![IrStatement::Expression(call_external(
                    100, "log",
                ))])),
        );

        let program = lower_module(&module, &LoweringOptions::default()).unwrap();
        assert_eq!(
            program.pretty_print(),
            "var limit = 10;\nvar cache;\nfunction main() {\n  log();\n}\n"
        );
    }

    #[test]
    fn test_external_names_do_not_depend_on_lowering_order() {
        // `helper` is a local in `first` and an external function called from `second`
        let mut module = IrModule::new("demo");
        module.add(IrFunction::new(SymbolId(1), "first").with_body(IrBody::block(vec![
            IrStatement::Variable(irjs_ir::IrVariable::new(SymbolId(10), "helper", None)),
        ])));
        module.add(
            IrFunction::new(SymbolId(2), "second")
                .with_body(IrBody::expression(call_external(100, "helper"))),
        );

        let program = lower_module(&module, &LoweringOptions::default()).unwrap();
        assert_eq!(
            program.pretty_print(),
            "function first() {\n  var helper_0;\n}\nfunction second() {\n  return helper();\n}\n"
        );
    }

    #[test]
    fn test_forward_reference_uses_declared_name() {
        let mut module = IrModule::new("demo");
        module.add(
            IrFunction::new(SymbolId(1), "caller")
                .with_body(IrBody::expression(call_external(2, "callee"))),
        );
        module.add(IrFunction::new(SymbolId(2), "callee"));
        module.add(IrFunction::new(SymbolId(3), "callee"));

        let program = lower_module(&module, &LoweringOptions::default()).unwrap();
        assert_eq!(
            program.pretty_print(),
            "function caller() {\n  return callee();\n}\nfunction callee() {\n}\nfunction callee_0() {\n}\n"
        );
    }

    #[test]
    fn test_first_error_in_declaration_order_wins() {
        let mut module = IrModule::new("demo");
        for i in 0..8u32 {
            module.add(
                IrFunction::new(SymbolId(i + 1), format!("f{}", i).as_str()).with_body(
                    IrBody::expression(IrExpression::get_value(SymbolId(100 + i), "missing")),
                ),
            );
        }
        let options = LoweringOptions {
            parallel: true,
            workers: Some(4),
        };

        let err = lower_module(&module, &options).unwrap_err();
        assert_eq!(
            err,
            LowerError::UnknownSymbol {
                symbol: SymbolId(100),
                name: "missing".to_string()
            }
        );
    }

    #[test]
    fn test_worker_count() {
        assert_eq!(
            LoweringOptions {
                parallel: true,
                workers: Some(0)
            }
            .worker_count(),
            1
        );
        assert!(LoweringOptions::default().worker_count() >= 1);
    }
}
