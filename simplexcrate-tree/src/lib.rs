//! Simplex tree storage for simplicial complexes
//!
//! A simplex tree stores every simplex of a complex as a root-to-node path of
//! ascending vertex ids. Alongside the tree sits a link index mapping
//! `(vertex id, depth)` to the nodes ending in that id, which lets coface
//! queries skip full-tree scans. On top of that the tree supports:
//! - Closed insertion and coface-closed removal
//! - Coface and link queries
//! - Edge contraction, optionally guarded by the link condition so the
//!   complex keeps its homotopy type
//! - f-vector and Euler characteristic
//!
//! ```rust
//! use simplexcrate_tree::SimplexTree;
//!
//! let mut tree: SimplexTree = SimplexTree::new();
//! tree.add(&[0, 1, 2], None);
//! assert_eq!(tree.get_simplices(1).len(), 3);
//!
//! let chi = tree.euler_characteristic();
//! assert!(tree.edge_contract(0, 2, true));
//! assert_eq!(tree.euler_characteristic(), chi);
//! ```

mod node;
pub mod simplex_tree;
pub mod euler;
mod validation;

pub use node::NodeKey;
pub use simplex_tree::*;
pub use euler::*;

/// Externally supplied vertex identity
pub type VertexId = usize;

/// Ascending, duplicate-free sequence of vertex ids
pub type Simplex = Vec<VertexId>;
