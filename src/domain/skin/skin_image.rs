use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{codecs::png::PngEncoder, ExtendedColorType, ImageEncoder, RgbaImage};

const PNG_DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// Rendered skin part, view or cape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkinImage {
    image: RgbaImage,
}

impl SkinImage {
    pub fn new(image: RgbaImage) -> Self {
        Self { image }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// PNG bytes of the image. Encoding failures are logged and yield an empty
    /// buffer.
    pub fn to_bytes(&self) -> Vec<u8> {
        let (width, height) = self.image.dimensions();
        let mut output = Vec::<u8>::new();
        let encoder = PngEncoder::new(&mut output);
        match encoder.write_image(&self.image, width, height, ExtendedColorType::Rgba8) {
            Ok(()) => output,
            Err(err) => {
                log::warn!("No se pudo codificar imagen de skin {width}x{height} a PNG: {err}");
                Vec::new()
            }
        }
    }

    pub fn to_data_uri(&self) -> String {
        format!("{PNG_DATA_URI_PREFIX}{}", STANDARD.encode(self.to_bytes()))
    }
}

impl From<RgbaImage> for SkinImage {
    fn from(image: RgbaImage) -> Self {
        Self::new(image)
    }
}
