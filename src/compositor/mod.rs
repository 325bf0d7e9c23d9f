pub(crate) mod blur;
/// Premultiplied RGBA8 pixel buffers.
pub mod buffer;
/// Shared glyph mask cache.
pub mod cache;
/// Blend modes and mask compositing.
pub mod composite;
/// Solid, gradient and pixel fills.
pub mod fill;
/// Text styles and glyph coverage masks.
pub mod mask;
/// Text to mask rasterizers.
pub mod raster;
/// Vector shape painting.
pub mod shape;
