pub mod domain;
pub mod infrastructure;
pub mod services;
pub mod shared;

pub use domain::skin::{
    extractor::{extract_part, MAX_SCALE, MIN_SCALE},
    geometry::SkinPart,
    position::{compose_position, compose_view, PartPosition, SkinPosition, SkinView, MAX_CANVAS_TEXELS},
    skin_image::SkinImage,
    texture::SkinTexture,
};
pub use services::skin_loader::SkinLoader;
pub use shared::error::SkinError;
