//! HTTP request handlers.

pub(crate) mod config;
pub(crate) mod help;
pub(crate) mod transform;
