//! Raster layer: text shaping via `parley`, rasterization via `vello_cpu`, PNG output via `image`.

pub(crate) mod canvas;
pub(crate) mod text;
