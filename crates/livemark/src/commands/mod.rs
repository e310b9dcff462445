//! CLI command implementations.

pub(crate) mod render;
pub(crate) mod serve;
pub(crate) mod syntax;

pub(crate) use render::RenderArgs;
pub(crate) use serve::ServeArgs;
