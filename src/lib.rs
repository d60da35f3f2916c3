//! Hierarchical tag store for personal task management.
//!
//! Tags are named, optionally colored and iconed tree nodes held in a
//! single in-memory [`TagStore`] with name lookup, counting, printing
//! and distinct-color generation. [`StoreBuilder`] populates a store
//! from slash-separated tag specs such as `work/urgent/today`.

pub mod builder;
pub mod cli;
pub mod color;
pub mod config;
pub mod errors;
pub mod exitcode;
pub mod store;
pub mod tag;
pub mod util;

pub use builder::StoreBuilder;
pub use color::Color;
pub use errors::{StoreError, StoreResult};
pub use store::{TagIter, TagNode, TagStore};
pub use tag::Tag;
