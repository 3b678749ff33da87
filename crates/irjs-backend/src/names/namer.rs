//! Fixed identifiers and identifier sanitation
//!
//! Names the generated code relies on (`prototype`, `$metadata$`, ...), the
//! spellings given to synthetic IR names, and the rules that turn arbitrary
//! source names into valid JavaScript identifiers.

use irjs_ir::{Name, SyntheticRole};
use std::borrow::Cow;

/// Member table of a constructor function
pub const PROTOTYPE: &str = "prototype";
/// Back-pointer from a member table to its constructor
pub const CONSTRUCTOR: &str = "constructor";
/// `Function.prototype.call`
pub const CALL: &str = "call";
/// Global `Object`
pub const OBJECT: &str = "Object";
/// `Object.create`
pub const CREATE: &str = "create";
/// Reflective class metadata slot
pub const METADATA: &str = "$metadata$";
/// Metadata property holding the class's source name
pub const SIMPLE_NAME: &str = "simpleName";
/// Metadata property listing the direct supertypes
pub const SUPERTYPES: &str = "supertypes";

/// JavaScript reserved words and restricted identifiers that cannot be bound
const RESERVED_WORDS: &[&str] = &[
    "arguments", "await", "break", "case", "catch", "class", "const", "continue", "debugger",
    "default", "delete", "do", "else", "enum", "eval", "export", "extends", "false", "finally",
    "for", "function", "if", "implements", "import", "in", "instanceof", "interface", "let",
    "new", "null", "package", "private", "protected", "public", "return", "static", "super",
    "switch", "this", "throw", "true", "try", "typeof", "undefined", "var", "void", "while",
    "with", "yield", "NaN", "Infinity",
];

/// Globals that generated code refers to by name; never bound by user declarations
const BUILTIN_GLOBALS: &[&str] = &[OBJECT];

/// Prototype slots written by class lowering; members may not take them
const RESERVED_MEMBERS: &[&str] = &[CONSTRUCTOR];

/// Is `ident` reserved in JavaScript or used by generated code?
pub fn is_reserved(ident: &str) -> bool {
    RESERVED_WORDS.contains(&ident) || BUILTIN_GLOBALS.contains(&ident)
}

/// Property name for a member called `name`
///
/// Sanitized, plus a `_0` suffix when the name would overwrite a slot the
/// class wiring writes. The result depends on the name alone, so
/// declarations and call sites agree.
pub fn member_identifier(name: &Name) -> String {
    let ident = suggested_identifier(name);
    if RESERVED_MEMBERS.contains(&ident.as_str()) {
        format!("{}_0", ident)
    } else {
        ident
    }
}

/// Target spelling of a synthetic name
pub fn special_name_string(role: SyntheticRole) -> Cow<'static, str> {
    match role {
        SyntheticRole::This => Cow::Borrowed("this"),
        SyntheticRole::ExtensionReceiver => Cow::Borrowed("$receiver"),
        SyntheticRole::SetterValue => Cow::Borrowed("$value"),
        SyntheticRole::Init => Cow::Borrowed("$init"),
        SyntheticRole::Anonymous => Cow::Borrowed("$anonymous"),
        SyntheticRole::DestructuringParameter(index) => {
            Cow::Owned(format!("$destructured{}", index))
        }
    }
}

/// Make `text` a syntactically valid identifier
///
/// Characters outside `[A-Za-z0-9_$]` become `_`; a leading digit gets a `_`
/// prefix; an empty name becomes `_`. Reserved words are left alone here and
/// handled by the scope that declares the name.
pub fn sanitize(text: &str) -> String {
    let mut ident = String::with_capacity(text.len() + 1);
    if text.starts_with(|c: char| c.is_ascii_digit()) {
        ident.push('_');
    }
    for c in text.chars() {
        if c.is_ascii_alphanumeric() || c == '_' || c == '$' {
            ident.push(c);
        } else {
            ident.push('_');
        }
    }
    if ident.is_empty() {
        ident.push('_');
    }
    ident
}

/// Base identifier for a declared IR name, before collision avoidance
pub fn suggested_identifier(name: &Name) -> String {
    match name {
        Name::Identifier(text) => sanitize(text),
        Name::Synthetic(role) => special_name_string(*role).into_owned(),
    }
}
