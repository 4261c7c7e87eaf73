//! # furrow_core - Furrow Core Primitives
//!
//! Zero-dependency building blocks shared by the simulation crates.
//! Currently this is the generational handle machinery used to express
//! non-owning references between agents.

pub mod handle;

pub use handle::{Handle, HandleMap};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::handle::{Handle, HandleMap};
}
