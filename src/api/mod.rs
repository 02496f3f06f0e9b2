//! Practicum API client and response validation
//!
//! One GET per poll cycle against the homework-status endpoint, followed by a
//! shape check on the decoded body. The client maps transport failures into a
//! small typed taxonomy so the poll loop can log and recover uniformly.

mod client;
pub mod validate;

pub use client::{ApiError, PracticumClient};
