//! CLI command implementations.

pub(crate) mod count;
pub(crate) mod cover;
pub(crate) mod publish;
pub(crate) mod render;

pub(crate) use count::CountArgs;
pub(crate) use cover::CoverArgs;
pub(crate) use publish::PublishArgs;
pub(crate) use render::RenderArgs;
