//! Functional core for prodcache.
//!
//! Pure types, key builders, record conversions and the trait seams that the
//! `prodcache` binary wires to concrete cache and store backends. Nothing in
//! this crate performs I/O.

pub mod cache;
pub mod product;
pub mod storage;
