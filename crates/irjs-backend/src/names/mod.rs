//! Name and scope registry
//!
//! Assigns stable, collision-free JavaScript identifiers to IR declarations.

pub mod namer;
mod registry;
mod scope;

pub use registry::StaticContext;
pub use scope::{ScopeId, ScopeKind, ScopeTree};
