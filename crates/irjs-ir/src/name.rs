//! Declaration names
//!
//! A name is either an ordinary identifier written by the user or a
//! synthetic name the front-end invented (receivers, anonymous classes,
//! destructured lambda parameters). Synthetic names carry a role tag
//! instead of a sentinel string, so lowering matches on the role.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Role of a compiler-synthesized name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SyntheticRole {
    /// Dispatch receiver of a member (`<this>`)
    This,
    /// Extension receiver of an extension function (`<receiver>`)
    ExtensionReceiver,
    /// Value parameter of a property setter (`<set-?>`)
    SetterValue,
    /// Constructor name (`<init>`)
    Init,
    /// Anonymous object or class (`<no name provided>`)
    Anonymous,
    /// Destructured lambda parameter (`<name for destructuring parameter N>`)
    DestructuringParameter(u32),
}

const DESTRUCTURING_PREFIX: &str = "name for destructuring parameter ";

impl fmt::Display for SyntheticRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyntheticRole::This => write!(f, "<this>"),
            SyntheticRole::ExtensionReceiver => write!(f, "<receiver>"),
            SyntheticRole::SetterValue => write!(f, "<set-?>"),
            SyntheticRole::Init => write!(f, "<init>"),
            SyntheticRole::Anonymous => write!(f, "<no name provided>"),
            SyntheticRole::DestructuringParameter(index) => {
                write!(f, "<{}{}>", DESTRUCTURING_PREFIX, index)
            }
        }
    }
}

impl FromStr for SyntheticRole {
    type Err = NameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let inner = s
            .strip_prefix('<')
            .and_then(|rest| rest.strip_suffix('>'))
            .ok_or_else(|| NameError::NotSynthetic(s.to_string()))?;

        match inner {
            "this" => Ok(SyntheticRole::This),
            "receiver" => Ok(SyntheticRole::ExtensionReceiver),
            "set-?" => Ok(SyntheticRole::SetterValue),
            "init" => Ok(SyntheticRole::Init),
            "no name provided" => Ok(SyntheticRole::Anonymous),
            _ => inner
                .strip_prefix(DESTRUCTURING_PREFIX)
                .and_then(|index| index.parse().ok())
                .map(SyntheticRole::DestructuringParameter)
                .ok_or_else(|| NameError::UnknownSynthetic(s.to_string())),
        }
    }
}

/// Errors produced when reading a name from its textual form
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    /// Empty name text
    #[error("Empty declaration name")]
    Empty,

    /// Angle-bracketed text that names no known synthetic role
    #[error("Unknown synthetic name '{0}'")]
    UnknownSynthetic(String),

    /// Text that is not angle-bracketed at all
    #[error("'{0}' is not a synthetic name")]
    NotSynthetic(String),
}

/// A declaration name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Name {
    /// User-written identifier
    Identifier(String),
    /// Compiler-synthesized name
    Synthetic(SyntheticRole),
}

impl Name {
    /// Create an ordinary identifier name
    pub fn identifier(text: impl Into<String>) -> Self {
        Name::Identifier(text.into())
    }

    /// Create a synthetic name
    pub fn synthetic(role: SyntheticRole) -> Self {
        Name::Synthetic(role)
    }

    /// Is this a compiler-synthesized name?
    pub fn is_synthetic(&self) -> bool {
        matches!(self, Name::Synthetic(_))
    }

    /// The synthetic role, if any
    pub fn synthetic_role(&self) -> Option<SyntheticRole> {
        match self {
            Name::Synthetic(role) => Some(*role),
            Name::Identifier(_) => None,
        }
    }

    /// The identifier text, if this is an ordinary name
    pub fn as_identifier(&self) -> Option<&str> {
        match self {
            Name::Identifier(text) => Some(text),
            Name::Synthetic(_) => None,
        }
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Name::Identifier(text) => f.write_str(text),
            Name::Synthetic(role) => write!(f, "{}", role),
        }
    }
}

impl FromStr for Name {
    type Err = NameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(NameError::Empty);
        }
        if s.starts_with('<') && s.ends_with('>') {
            return s.parse().map(Name::Synthetic);
        }
        Ok(Name::Identifier(s.to_string()))
    }
}

impl TryFrom<String> for Name {
    type Error = NameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Name> for String {
    fn from(name: Name) -> Self {
        name.to_string()
    }
}

impl From<&str> for Name {
    /// Convenience for ordinary identifiers; synthetic text is not parsed here
    fn from(text: &str) -> Self {
        Name::Identifier(text.to_string())
    }
}
