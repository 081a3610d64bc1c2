//! Euler characteristic of a simplex tree.
//!
//! χ = Σ(-1)^k · `f_k`, where `f_k` is the number of `k`-simplices.
//!
//! ```rust
//! use simplexcrate_tree::SimplexTree;
//!
//! let mut tree: SimplexTree = SimplexTree::new();
//! tree.add(&[0, 1, 2], None);
//!
//! let counts = tree.f_vector();
//! assert_eq!(counts.by_dim, vec![3, 3, 1]);
//! assert_eq!(tree.euler_characteristic(), 1);
//! ```

use crate::SimplexTree;
use serde::{Deserialize, Serialize};

/// Counts of `k`-simplices for all dimensions present.
///
/// In the topology literature this is the **f-vector** (f₀, f₁, ..., `f_d`).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FVector {
    /// `by_dim[k]` = `f_k` = number of `k`-simplices
    pub by_dim: Vec<usize>,
}

impl FVector {
    /// Number of `k`-simplices, 0 if `k` is out of range.
    #[must_use]
    pub fn count(&self, k: usize) -> usize {
        self.by_dim.get(k).copied().unwrap_or(0)
    }

    /// Highest dimension with at least one simplex, `None` when empty.
    #[must_use]
    pub fn dimension(&self) -> Option<usize> {
        self.by_dim.len().checked_sub(1)
    }

    /// Total number of simplices.
    #[must_use]
    pub fn total(&self) -> usize {
        self.by_dim.iter().sum()
    }
}

/// Alternating sum of an f-vector.
#[must_use]
pub fn euler_characteristic(counts: &FVector) -> isize {
    counts
        .by_dim
        .iter()
        .enumerate()
        .map(|(k, &f_k)| {
            let f_k = f_k as isize;
            if k % 2 == 0 {
                f_k
            } else {
                -f_k
            }
        })
        .sum()
}

impl<V> SimplexTree<V> {
    /// Count simplices per dimension.
    pub fn f_vector(&self) -> FVector {
        let mut by_dim: Vec<usize> = Vec::new();
        for (_, node) in self.store().iter() {
            let k = node.depth() - 1;
            if by_dim.len() <= k {
                by_dim.resize(k + 1, 0);
            }
            by_dim[k] += 1;
        }
        FVector { by_dim }
    }

    /// Euler characteristic of the complex.
    pub fn euler_characteristic(&self) -> isize {
        euler_characteristic(&self.f_vector())
    }
}
