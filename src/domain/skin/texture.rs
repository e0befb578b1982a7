use std::sync::OnceLock;

use image::{ImageFormat, RgbaImage};

use crate::{
    domain::skin::geometry::{Rect, LARGE_TEXTURE_HEIGHT, LEGACY_TEXTURE_HEIGHT, TEXTURE_WIDTH},
    shared::error::SkinError,
};

/// Unused regions on the right half of a 64x32 texture. Some editors store a
/// head overlay there, so any transparency means the overlay is real.
const LEGACY_DEAD_AREAS: [Rect; 5] = [
    Rect::new(32, 0, 8, 8),
    Rect::new(56, 0, 8, 8),
    Rect::new(36, 16, 8, 4),
    Rect::new(52, 16, 12, 4),
    Rect::new(56, 20, 8, 12),
];

#[derive(Debug)]
pub struct SkinTexture {
    image: RgbaImage,
    slim: bool,
    default: bool,
    legacy_overlay: OnceLock<bool>,
}

impl SkinTexture {
    pub fn new(image: RgbaImage, slim: bool, default: bool) -> Result<Self, SkinError> {
        let (width, height) = image.dimensions();
        let valid_height = height == LEGACY_TEXTURE_HEIGHT || height == LARGE_TEXTURE_HEIGHT;
        if width != TEXTURE_WIDTH || !valid_height {
            return Err(SkinError::InvalidArgument(format!(
                "Dimensiones inválidas {width}x{height}. Usa 64x64 o 64x32"
            )));
        }

        Ok(Self {
            image,
            slim,
            default,
            legacy_overlay: OnceLock::new(),
        })
    }

    pub fn from_png_bytes(bytes: &[u8], slim: bool) -> Result<Self, SkinError> {
        Self::decode_png(bytes, slim, false)
    }

    pub(crate) fn decode_png(bytes: &[u8], slim: bool, default: bool) -> Result<Self, SkinError> {
        let format = image::guess_format(bytes)
            .map_err(|err| SkinError::Decode(format!("No se pudo detectar formato: {err}")))?;
        if format != ImageFormat::Png {
            return Err(SkinError::Decode("La skin debe ser PNG".into()));
        }

        let image = image::load_from_memory_with_format(bytes, ImageFormat::Png)
            .map_err(|err| SkinError::Decode(format!("No se pudo leer PNG: {err}")))?;
        Self::new(image.to_rgba8(), slim, default)
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn is_slim(&self) -> bool {
        self.slim
    }

    /// Built-in Steve/Alex texture rather than one fetched for a player.
    pub fn is_default(&self) -> bool {
        self.default
    }

    pub fn is_large(&self) -> bool {
        self.image.height() == LARGE_TEXTURE_HEIGHT
    }

    /// Whether the head overlay should be drawn. Always true for 64x64
    /// textures; for 64x32 textures the dead areas are probed once.
    pub fn has_legacy_overlay(&self) -> bool {
        if self.is_large() {
            return true;
        }
        *self
            .legacy_overlay
            .get_or_init(|| !dead_areas_opaque(&self.image))
    }
}

fn dead_areas_opaque(image: &RgbaImage) -> bool {
    LEGACY_DEAD_AREAS.iter().all(|area| {
        (area.y..area.y + area.h)
            .all(|y| (area.x..area.x + area.w).all(|x| image.get_pixel(x, y)[3] == u8::MAX))
    })
}
