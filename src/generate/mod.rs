//! The three asset generators and the pipeline that runs them.

pub(crate) mod cards;
pub(crate) mod code;
pub(crate) mod histogram;
pub(crate) mod pipeline;
pub(crate) mod tiling;
