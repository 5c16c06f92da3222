//! # Wirebox Support
//!
//! Shared utilities for the wirebox crates.
//!
//! This crate provides text rendering for error messages: dependency
//! chains, readable type names and "did you mean?" suggestions.

pub mod rendering;
