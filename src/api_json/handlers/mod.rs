pub mod courses;
pub mod docs;
pub mod graph;
pub mod snapshots;

pub use courses::*;
pub use docs::*;
pub use graph::*;
pub use snapshots::*;
