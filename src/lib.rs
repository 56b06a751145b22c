//! Plant nursery: a composite garden tree of sections and plants, with plant
//! lifecycle rules, pluggable care strategies, traversal iterators and a
//! name-indexed registry.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod tree_traits;
pub mod util;
