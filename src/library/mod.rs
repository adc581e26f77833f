//! Course asset library: records, the persistent catalog and the in-memory
//! store the panel reads from.

pub mod asset;
pub mod catalog;
pub mod store;
