//! Repository layer: in-memory record storage

pub mod records;

pub use records::{Entry, RecordStore};
