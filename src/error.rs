//! Error categories per the configuration-error contract: only structural or
//! configuration mistakes raise. Optimization outcomes never do — those are
//! surfaced as `None`/empty maps by the partitioning and search layers.

use thiserror::Error;

use crate::model::VertexId;

#[derive(Debug, Error)]
pub enum FloorplanError {
    #[error("pre-assignment references vertex {0:?} not present in the input mapping")]
    UnknownPreAssignedVertex(VertexId),

    #[error("pre-assignment for vertex {0:?} targets a region not contained in any current leaf slot")]
    PreAssignmentOutsideLeaves(VertexId),

    #[error("grouping constraint references vertex {0:?} not present in the input mapping")]
    UnknownGroupingVertex(VertexId),

    #[error("unrecognized partition_method: {0}")]
    UnknownPartitionMethod(String),

    #[error("unrecognized floorplan_opt_priority: {0}")]
    UnknownOptPriority(String),

    #[error("invalid search bounds: lo ({lo}) must be <= hi ({hi})")]
    InvalidSearchBounds { lo: f64, hi: f64 },

    #[error("failed to read floorplan configuration file: {0}")]
    ConfigIo(#[from] std::io::Error),

    #[error("failed to parse floorplan configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, FloorplanError>;
