//! Error types and error handling for the tokenizer.
//!
//! This module defines the error types raised while building pattern tables
//! and while scanning source text. It includes:
//!
//! - Error structures with source position information
//! - Specific error variants for table construction and scanning
//! - Helpful error messages and suggestions

pub mod errors;
