// Path: crates/types/src/lib.rs
//! # Meridian SDK Types
//!
//! Shared data types for the Meridian SDK: key algorithm identifiers,
//! transaction wire types and the central error definitions used by every
//! other crate in the workspace.

pub mod error;
pub mod keys;
pub mod transaction;
