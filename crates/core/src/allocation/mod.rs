//! Bill share allocation.

pub mod split;

#[cfg(test)]
mod split_props;

pub use split::{Allocation, ShareAllocator};
