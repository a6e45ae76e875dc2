//! Functional core for evently.
//!
//! Pure data types, validation and ordering for event records, plus the
//! traits the server implements for storage and media hosting. Nothing in
//! this crate performs I/O.

pub mod event;
pub mod media;
pub mod storage;
