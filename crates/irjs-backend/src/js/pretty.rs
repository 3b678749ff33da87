//! Pretty-printing for the JavaScript AST
//!
//! Renders lowered programs as JavaScript source text.

use super::ast::{JsBlock, JsExpression, JsFunction, JsNameRef, JsProgram, JsStatement};
use serde::Deserialize;

/// Printer configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PrinterOptions {
    /// Spaces per indentation level
    pub indent: usize,
}

impl Default for PrinterOptions {
    fn default() -> Self {
        Self { indent: 2 }
    }
}

/// Trait for pretty-printing JavaScript AST constructs
pub trait PrettyPrint {
    /// Print with the given options
    fn pretty_print_with(&self, options: &PrinterOptions) -> String;

    /// Print with default options
    fn pretty_print(&self) -> String {
        self.pretty_print_with(&PrinterOptions::default())
    }
}

impl PrettyPrint for JsProgram {
    fn pretty_print_with(&self, options: &PrinterOptions) -> String {
        let mut printer = Printer::new(options);
        for statement in &self.global_block.statements {
            printer.statement(statement);
        }
        printer.finish()
    }
}

impl PrettyPrint for JsStatement {
    fn pretty_print_with(&self, options: &PrinterOptions) -> String {
        let mut printer = Printer::new(options);
        printer.statement(self);
        printer.finish()
    }
}

impl PrettyPrint for JsExpression {
    fn pretty_print_with(&self, options: &PrinterOptions) -> String {
        let mut printer = Printer::new(options);
        printer.expression(self);
        printer.finish()
    }
}

struct Printer<'a> {
    options: &'a PrinterOptions,
    output: String,
    level: usize,
}

impl<'a> Printer<'a> {
    fn new(options: &'a PrinterOptions) -> Self {
        Self {
            options,
            output: String::new(),
            level: 0,
        }
    }

    fn finish(self) -> String {
        self.output
    }

    fn indent(&mut self) {
        let width = self.level * self.options.indent;
        self.output.extend(std::iter::repeat(' ').take(width));
    }

    // ========================================================================
    // Statements
    // ========================================================================

    fn statement(&mut self, statement: &JsStatement) {
        self.indent();
        match statement {
            JsStatement::Expression(JsExpression::Function(function)) if function.name.is_some() => {
                self.function(function);
            }
            JsStatement::Expression(expression) => {
                // A leading `{` or anonymous `function` would start a block or declaration
                let needs_parens = matches!(
                    expression,
                    JsExpression::Object(_) | JsExpression::Function(_)
                );
                if needs_parens {
                    self.output.push('(');
                    self.expression(expression);
                    self.output.push(')');
                } else {
                    self.expression(expression);
                }
                self.output.push(';');
            }
            JsStatement::Block(block) => self.block(block),
            JsStatement::Vars(vars) => {
                self.output.push_str("var ");
                self.output.push_str(vars.name.ident());
                if let Some(initializer) = &vars.initializer {
                    self.output.push_str(" = ");
                    self.expression(initializer);
                }
                self.output.push(';');
            }
            JsStatement::Return(value) => {
                self.output.push_str("return");
                if let Some(value) = value {
                    self.output.push(' ');
                    self.expression(value);
                }
                self.output.push(';');
            }
        }
        self.output.push('\n');
    }

    /// Print `{ ... }` starting at the cursor; the closing brace is indented
    /// to the current level and not followed by a newline.
    fn block(&mut self, block: &JsBlock) {
        self.output.push_str("{\n");
        self.level += 1;
        for statement in &block.statements {
            self.statement(statement);
        }
        self.level -= 1;
        self.indent();
        self.output.push('}');
    }

    fn function(&mut self, function: &JsFunction) {
        self.output.push_str("function ");
        if let Some(name) = &function.name {
            self.output.push_str(name.ident());
        }
        self.output.push('(');
        for (i, parameter) in function.parameters.iter().enumerate() {
            if i > 0 {
                self.output.push_str(", ");
            }
            self.output.push_str(parameter.ident());
        }
        self.output.push_str(") ");
        self.block(&function.body);
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    fn expression(&mut self, expression: &JsExpression) {
        match expression {
            JsExpression::NameRef(JsNameRef { name, qualifier }) => {
                if let Some(qualifier) = qualifier {
                    self.left_hand_side(qualifier);
                    self.output.push('.');
                }
                self.output.push_str(name.ident());
            }
            JsExpression::This => self.output.push_str("this"),
            JsExpression::Null => self.output.push_str("null"),
            JsExpression::Bool(value) => self.output.push_str(if *value { "true" } else { "false" }),
            JsExpression::Int(value) => self.output.push_str(&value.to_string()),
            JsExpression::Double(value) => self.output.push_str(&format_number(*value)),
            JsExpression::String(value) => self.string_literal(value),
            JsExpression::Void(operand) => {
                self.output.push_str("void ");
                if matches!(**operand, JsExpression::Assign { .. }) {
                    self.parenthesized(operand);
                } else {
                    self.expression(operand);
                }
            }
            JsExpression::Assign { target, value } => {
                self.expression(target);
                self.output.push_str(" = ");
                self.expression(value);
            }
            JsExpression::Invocation { callee, arguments } => {
                self.left_hand_side(callee);
                self.arguments(arguments);
            }
            JsExpression::New {
                constructor,
                arguments,
            } => {
                self.output.push_str("new ");
                match **constructor {
                    JsExpression::NameRef(_) | JsExpression::This => self.expression(constructor),
                    _ => self.parenthesized(constructor),
                }
                self.arguments(arguments);
            }
            JsExpression::Function(function) => self.function(function),
            JsExpression::Object(object) => {
                self.output.push('{');
                for (i, property) in object.properties.iter().enumerate() {
                    if i > 0 {
                        self.output.push_str(", ");
                    }
                    if is_identifier(&property.label) {
                        self.output.push_str(&property.label);
                    } else {
                        self.string_literal(&property.label);
                    }
                    self.output.push_str(": ");
                    self.expression(&property.value);
                }
                self.output.push('}');
            }
            JsExpression::Array(elements) => {
                self.output.push('[');
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        self.output.push_str(", ");
                    }
                    self.expression(element);
                }
                self.output.push(']');
            }
        }
    }

    /// Print an expression in member-qualifier or callee position
    fn left_hand_side(&mut self, expression: &JsExpression) {
        match expression {
            JsExpression::NameRef(_)
            | JsExpression::This
            | JsExpression::Null
            | JsExpression::Bool(_)
            | JsExpression::String(_)
            | JsExpression::Invocation { .. }
            | JsExpression::New { .. }
            | JsExpression::Object(_)
            | JsExpression::Array(_) => self.expression(expression),
            JsExpression::Int(_)
            | JsExpression::Double(_)
            | JsExpression::Void(_)
            | JsExpression::Assign { .. }
            | JsExpression::Function(_) => self.parenthesized(expression),
        }
    }

    fn parenthesized(&mut self, expression: &JsExpression) {
        self.output.push('(');
        self.expression(expression);
        self.output.push(')');
    }

    fn arguments(&mut self, arguments: &[JsExpression]) {
        self.output.push('(');
        for (i, argument) in arguments.iter().enumerate() {
            if i > 0 {
                self.output.push_str(", ");
            }
            self.expression(argument);
        }
        self.output.push(')');
    }

    fn string_literal(&mut self, value: &str) {
        self.output.push('"');
        for c in value.chars() {
            match c {
                '"' => self.output.push_str("\\\""),
                '\\' => self.output.push_str("\\\\"),
                '\n' => self.output.push_str("\\n"),
                '\r' => self.output.push_str("\\r"),
                '\t' => self.output.push_str("\\t"),
                '\u{2028}' => self.output.push_str("\\u2028"),
                '\u{2029}' => self.output.push_str("\\u2029"),
                c if (c as u32) < 0x20 => {
                    self.output.push_str(&format!("\\u{:04x}", c as u32));
                }
                c => self.output.push(c),
            }
        }
        self.output.push('"');
    }
}

fn format_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value == f64::INFINITY {
        "Infinity".to_string()
    } else if value == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else {
        value.to_string()
    }
}

fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' || first == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}
