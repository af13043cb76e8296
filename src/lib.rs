/*!
# ehm-net - hypothesis management structures for multi-target data association

Core structures for efficient hypothesis management in tracking pipelines:
given tracks and fresh detections, represent every jointly-consistent
assignment (each detection used by at most one track, null always allowed)
without enumerating the permutations.

## Components

- [`build_matrices`] - validation/likelihood matrix construction from
  per-track hypotheses
- [`gen_clusters`] - partitioning of tracks and detections into independent
  sub-problems
- [`HypothesisNet`] - the layered, identity-merged net encoding one
  cluster's joint-feasible assignments, grown by an external construction
  algorithm through [`add_node`](HypothesisNet::add_node) and
  [`add_edge`](HypothesisNet::add_edge)
- [`DecompositionTree`] - recursive record of a cluster's subnet
  partitioning

Probability propagation over a finished net, and any rendering of the net or
tree, are consumers of this crate and live elsewhere.

## Example

```rust
use std::collections::HashMap;
use ehm_net::{build_matrices, gen_clusters, Detection, Hypothesis, HypothesisList, Track};

let tracks = vec![Track::new(0), Track::new(1)];
let detections = vec![Detection::new(0), Detection::new(1)];

let mut hypotheses = HashMap::new();
hypotheses.insert(
    0,
    HypothesisList::from_vec(vec![Hypothesis::null(0.1), Hypothesis::detected(0, 0.9)]),
);
hypotheses.insert(
    1,
    HypothesisList::from_vec(vec![Hypothesis::null(0.2), Hypothesis::detected(1, 0.8)]),
);

let (validation, _likelihood) = build_matrices(&tracks, &detections, &hypotheses).unwrap();
let (clusters, unassociated) = gen_clusters(&validation);

// The two tracks share no detection, so each gets its own cluster
assert_eq!(clusters.len(), 2);
assert!(unassociated.is_empty());
```
*/

/// Track, detection and hypothesis input types
pub mod types;

/// Error types for matrix construction and net mutation
pub mod errors;

/// Validation and likelihood matrix construction
pub mod matrices;

/// Undirected connectivity graph helper
pub mod graph;

/// Independence clustering of tracks and detections
pub mod clustering;

/// The layered hypothesis net
pub mod net;

/// Decomposition tree for recursive cluster partitioning
pub mod tree;

// Core types
pub use types::{Detection, Hypothesis, HypothesisList, Track};

// Errors
pub use errors::{MatrixError, NetError};

// Matrix construction
pub use matrices::build_matrices;

// Clustering
pub use clustering::{gen_clusters, Cluster};

// Net and tree
pub use net::{HypothesisNet, NetNode, NodeId};
pub use tree::DecompositionTree;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
