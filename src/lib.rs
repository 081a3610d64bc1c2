//! # simplexcrate
//!
//! Simplicial complexes stored as simplex trees, with homotopy-preserving
//! edge contraction and mesh simplification built on top.
//!
//! This is the umbrella crate that provides convenient access to all simplexcrate functionality.
//! You can use this crate to get everything in one place, or use individual crates for
//! more granular control over dependencies.
//!
//! ## Features
//!
//! - **Core**: Geometry aliases, the indexed triangle mesh and the shared error type
//! - **Tree**: The simplex tree with coface, link and contraction queries
//! - **Simplification**: Mesh ingestion and the greedy contraction loop
//!
//! ## Quick Start
//!
//! ```rust
//! use simplexcrate::prelude::*;
//!
//! let mut tree: SimplexTree = SimplexTree::new();
//! tree.add(&[0, 1, 2], None);
//! assert_eq!(tree.get_simplices(1).len(), 3);
//!
//! assert!(tree.edge_contract(0, 1, true));
//! assert_eq!(tree.euler_characteristic(), 1);
//! ```
//!
//! ## Feature Flags
//!
//! - `default`: Enables tree and simplification
//! - `tree`: The simplex tree
//! - `simplification`: Mesh simplification (implies `tree`)
//! - `all`: Enables all features

// Re-export core functionality
pub use simplexcrate_core::*;

// Re-export sub-crates
#[cfg(feature = "tree")]
pub use simplexcrate_tree as tree;

#[cfg(feature = "simplification")]
pub use simplexcrate_simplification as simplification;

/// Convenient imports for common use cases
pub mod prelude {
    pub use simplexcrate_core::*;

    #[cfg(feature = "tree")]
    pub use simplexcrate_tree::*;

    #[cfg(feature = "simplification")]
    pub use simplexcrate_simplification::*;
}
