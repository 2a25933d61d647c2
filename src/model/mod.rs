//! The data model the partitioning engine operates on: the dataflow graph and
//! the device's rectangular slot hierarchy.

pub mod graph;
pub mod resource;
pub mod slot;

pub use graph::{DataflowGraph, Edge, EdgeId, Vertex, VertexId};
pub use resource::{AreaVector, Resource, RESOURCE_TYPES};
pub use slot::{DeviceGrid, GridCoord, Slot, SlotId, SlotManager, SplitDir};

use std::collections::HashMap;

/// A total mapping from every vertex being refined to its current leaf slot.
/// The sole state threaded through the refinement pipeline.
pub type PartitionMap = HashMap<VertexId, Slot>;
