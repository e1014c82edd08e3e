//! Error types and error handling for the tokenizer.
//!
//! This module defines the error type returned by tokenization. It includes:
//!
//! - An error structure with source position information
//! - The unrecognised-token error variant
//! - Error naming and message formatting

pub mod errors;
