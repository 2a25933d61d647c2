//! Bipartition solvers (spec §4.2–§4.4): the four-way and eight-way ILP
//! formulations, plus the four-way retry loop that relaxes the area cap.

mod common;
pub mod eight_way;
pub mod four_way;
pub mod retry;

pub use eight_way::{eight_way_partition, CrossingBudgets3};
pub use four_way::{four_way_partition, CrossingCaps3};
pub use retry::four_way_partition_with_retry;
