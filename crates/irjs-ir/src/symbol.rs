//! Symbol identities
//!
//! Every declaration carries a `SymbolId` assigned by the front-end.
//! References to a declaration carry the same id, which is what the
//! backend keys its name bindings on.

use crate::name::Name;
use serde::{Deserialize, Serialize};

/// Stable identity of an IR declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymbolId(pub u32);

impl SymbolId {
    /// The universal root type every class implicitly extends
    pub const ANY: SymbolId = SymbolId(0);

    /// Create a new symbol ID
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value
    pub fn as_u32(&self) -> u32 {
        self.0
    }

    /// Does this symbol denote the universal root type?
    pub fn is_any(&self) -> bool {
        *self == Self::ANY
    }
}

impl std::fmt::Display for SymbolId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "sym{}", self.0)
    }
}

/// Anything that declares a symbol under a name
pub trait Declared {
    /// The declared symbol
    fn symbol(&self) -> SymbolId;
    /// The declared name
    fn name(&self) -> &Name;
}
