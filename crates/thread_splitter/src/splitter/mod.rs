// src/splitter/mod.rs

pub mod finalize;
pub mod natural;
pub mod packer;
pub mod strategies;

pub use finalize::{finalize, Finalizer};
pub use natural::split_at_natural_boundary;
pub use packer::pack;
pub use strategies::{detect_thread_markers, remediate, split_at_offsets};
