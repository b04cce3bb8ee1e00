//! Core types and rendering engine for texume.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; storage is reached only through the
//! [`store::ContentStore`] trait.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod body;
pub mod content;
pub mod error;
pub mod format;
pub mod formatting;
pub mod profile;
pub mod render;
pub mod resume;
pub mod section;
pub mod store;
pub mod template;

pub use error::{Error, Result};
