//! Reviewer highlight sets keyed by `(document, reviewer)`.

pub mod handlers;
pub mod service;
pub mod timestamps;
