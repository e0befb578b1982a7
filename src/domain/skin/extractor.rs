use image::{imageops, RgbaImage};

use crate::{
    domain::skin::{
        geometry::{Rect, SkinPart},
        resolver::resolve,
        skin_image::SkinImage,
        texture::SkinTexture,
    },
    shared::error::SkinError,
};

pub const MIN_SCALE: u32 = 1;
pub const MAX_SCALE: u32 = 50;

pub fn validate_scale(scale: u32) -> Result<(), SkinError> {
    if !(MIN_SCALE..=MAX_SCALE).contains(&scale) {
        return Err(SkinError::InvalidArgument(format!(
            "La escala debe estar entre {MIN_SCALE} y {MAX_SCALE} (actual: {scale})"
        )));
    }
    Ok(())
}

/// Extracts one part of the texture at `scale` pixels per texel.
pub fn extract_part(texture: &SkinTexture, part: SkinPart, scale: u32) -> Result<SkinImage, SkinError> {
    validate_scale(scale)?;
    Ok(SkinImage::new(render_part(texture, part, scale)))
}

pub(crate) fn render_part(texture: &SkinTexture, part: SkinPart, scale: u32) -> RgbaImage {
    let resolved = resolve(part, texture.is_large(), texture.is_slim());
    let layers = resolved.layers;

    let mut part_image = crop(texture.image(), layers.base);

    if overlay_visible(texture, part, layers.overlay) {
        let overlay = crop(texture.image(), layers.overlay);
        for (base, top) in part_image.pixels_mut().zip(overlay.pixels()) {
            if top[3] != 0 {
                *base = *top;
            }
        }
    }

    if resolved.mirrored {
        imageops::flip_horizontal_in_place(&mut part_image);
    }

    upscale(&part_image, scale)
}

fn crop(image: &RgbaImage, rect: Rect) -> RgbaImage {
    imageops::crop_imm(image, rect.x, rect.y, rect.w, rect.h).to_image()
}

/// Overlay regions below row 32 do not exist on 64x32 textures; the head
/// overlay of a 64x32 texture is only trusted when the dead areas say so.
fn overlay_visible(texture: &SkinTexture, part: SkinPart, overlay: Rect) -> bool {
    if texture.is_large() {
        return true;
    }
    if overlay.is_large_only() {
        return false;
    }
    !part.is_head() || texture.has_legacy_overlay()
}

fn upscale(image: &RgbaImage, scale: u32) -> RgbaImage {
    if scale == 1 {
        return image.clone();
    }
    RgbaImage::from_fn(image.width() * scale, image.height() * scale, |x, y| {
        *image.get_pixel(x / scale, y / scale)
    })
}

#[cfg(test)]
mod tests {
    use image::{imageops, Rgba, RgbaImage};

    use super::{extract_part, MAX_SCALE};
    use crate::domain::skin::{geometry::SkinPart, texture::SkinTexture};

    /// Every texel gets a distinct opaque colour.
    fn patterned(height: u32) -> RgbaImage {
        RgbaImage::from_fn(64, height, |x, y| Rgba([x as u8 * 4, y as u8 * 4, (x + y) as u8, 255]))
    }

    fn clear_region(image: &mut RgbaImage, x: u32, y: u32, w: u32, h: u32) {
        for py in y..y + h {
            for px in x..x + w {
                image.put_pixel(px, py, Rgba([0, 0, 0, 0]));
            }
        }
    }

    #[test]
    fn scale_out_of_range_fails_for_every_part() {
        let texture = SkinTexture::new(patterned(64), false, false).unwrap();
        for part in SkinPart::ALL {
            for scale in [0, MAX_SCALE + 1] {
                let err = extract_part(&texture, *part, scale).unwrap_err();
                assert!(err.is_invalid_argument(), "{part} x{scale}");
            }
        }
    }

    #[test]
    fn head_front_has_expected_size() {
        let mut image = patterned(64);
        clear_region(&mut image, 40, 8, 8, 8);
        let texture = SkinTexture::new(image, false, false).unwrap();

        let single = extract_part(&texture, SkinPart::HeadFront, 1).unwrap();
        assert_eq!((single.width(), single.height()), (8, 8));

        let scaled = extract_part(&texture, SkinPart::HeadFront, 4).unwrap();
        assert_eq!((scaled.width(), scaled.height()), (32, 32));
        for x in 0..8 {
            for y in 0..8 {
                let source = texture.image().get_pixel(8 + x, 8 + y);
                for dx in 0..4 {
                    for dy in 0..4 {
                        assert_eq!(scaled.image().get_pixel(4 * x + dx, 4 * y + dy), source);
                    }
                }
            }
        }
    }

    #[test]
    fn overlay_replaces_only_non_transparent_pixels() {
        let mut image = patterned(64);
        clear_region(&mut image, 40, 8, 8, 8);
        image.put_pixel(40, 8, Rgba([255, 0, 0, 128]));
        let texture = SkinTexture::new(image, false, false).unwrap();

        let head = extract_part(&texture, SkinPart::HeadFront, 1).unwrap();
        assert_eq!(*head.image().get_pixel(0, 0), Rgba([255, 0, 0, 128]));
        assert_eq!(head.image().get_pixel(1, 0), texture.image().get_pixel(9, 8));
    }

    #[test]
    fn translucent_base_pixels_are_kept_as_sampled() {
        let mut image = patterned(64);
        clear_region(&mut image, 40, 8, 8, 8);
        image.put_pixel(8, 8, Rgba([10, 20, 30, 40]));
        let texture = SkinTexture::new(image, false, false).unwrap();

        let head = extract_part(&texture, SkinPart::HeadFront, 1).unwrap();
        assert_eq!(*head.image().get_pixel(0, 0), Rgba([10, 20, 30, 40]));
    }

    #[test]
    fn legacy_head_overlay_depends_on_dead_areas() {
        let mut image = patterned(32);
        image.put_pixel(40, 8, Rgba([255, 255, 255, 255]));
        let opaque = SkinTexture::new(image.clone(), false, false).unwrap();
        let head = extract_part(&opaque, SkinPart::HeadFront, 1).unwrap();
        assert_eq!(head.image().get_pixel(0, 0), opaque.image().get_pixel(8, 8));
        assert_eq!(head.image().get_pixel(1, 1), opaque.image().get_pixel(9, 9));

        // unused strip beside the right arm
        image.put_pixel(60, 25, Rgba([0, 0, 0, 200]));
        let with_overlay = SkinTexture::new(image, false, false).unwrap();
        let head = extract_part(&with_overlay, SkinPart::HeadFront, 1).unwrap();
        assert_eq!(*head.image().get_pixel(0, 0), Rgba([255, 255, 255, 255]));
        assert_eq!(head.image().get_pixel(1, 1), with_overlay.image().get_pixel(41, 9));
    }

    #[test]
    fn legacy_left_arm_is_mirrored_right_arm() {
        let texture = SkinTexture::new(patterned(32), false, false).unwrap();
        let left = extract_part(&texture, SkinPart::ArmLeftFront, 1).unwrap();

        let right_rect = imageops::crop_imm(texture.image(), 44, 20, 4, 12).to_image();
        assert_eq!(left.image(), &imageops::flip_horizontal(&right_rect));
    }

    #[test]
    fn large_left_arm_reads_its_own_region() {
        let mut image = patterned(64);
        clear_region(&mut image, 52, 52, 4, 12);
        let texture = SkinTexture::new(image, false, false).unwrap();
        let left = extract_part(&texture, SkinPart::ArmLeftFront, 1).unwrap();

        let expected = imageops::crop_imm(texture.image(), 36, 52, 4, 12).to_image();
        assert_eq!(left.image(), &expected);
    }

    #[test]
    fn slim_arms_are_three_pixels_wide() {
        let texture = SkinTexture::new(patterned(64), true, false).unwrap();
        let arm = extract_part(&texture, SkinPart::ArmRightFront, 2).unwrap();
        assert_eq!((arm.width(), arm.height()), (6, 24));
    }
}
