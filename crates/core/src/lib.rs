//! Functional core for tickbox.
//!
//! Pure domain types, request merging, and the storage and cache contracts
//! implemented by the server crate. Nothing in here performs I/O.

pub mod cache;
pub mod storage;
pub mod todo;
