//! Core types shared across ecsfit facilities
//!
//! This crate holds the canonical field keys and event names used by the
//! logging facility and by structured error reporting, so that every crate
//! emits the same vocabulary.

pub mod schema;
