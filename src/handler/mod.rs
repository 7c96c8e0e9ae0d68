//! One handler per workflow stage. The workflow engine feeds each stage's
//! output to the next; no stage calls another.

pub mod fetch;
pub mod gate;
pub mod predict;
