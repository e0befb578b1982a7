pub mod extractor;
pub mod geometry;
pub mod position;
pub mod resolver;
pub mod skin_image;
pub mod texture;
