use crate::domain::skin::geometry::{geometry, PartDefinition, PartLayers, SkinPart};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedPart {
    pub layers: PartLayers,
    /// The layers were read from the opposite limb of a 64x32 texture and the
    /// extracted image has to be flipped horizontally.
    pub mirrored: bool,
}

/// Picks the rectangles to read for a part. The legacy variant wins over the
/// slim one: 64x32 textures have no room for the left limbs at all.
pub fn select_layers(definition: &PartDefinition, is_large: bool, is_slim: bool) -> ResolvedPart {
    if !is_large {
        if let Some(legacy) = definition.legacy {
            return ResolvedPart {
                layers: legacy,
                mirrored: true,
            };
        }
    }

    let layers = match definition.slim {
        Some(slim) if is_slim => slim,
        _ => definition.layers,
    };

    ResolvedPart {
        layers,
        mirrored: false,
    }
}

pub fn resolve(part: SkinPart, is_large: bool, is_slim: bool) -> ResolvedPart {
    select_layers(geometry().definition(part), is_large, is_slim)
}

#[cfg(test)]
mod tests {
    use super::resolve;
    use crate::domain::skin::geometry::{Rect, SkinPart};

    #[test]
    fn large_textures_use_own_regions() {
        let resolved = resolve(SkinPart::LegLeftFront, true, false);
        assert!(!resolved.mirrored);
        assert_eq!(resolved.layers.base, Rect::new(20, 52, 4, 12));
        assert_eq!(resolved.layers.overlay, Rect::new(4, 52, 4, 12));
    }

    #[test]
    fn legacy_textures_read_mirrored_right_limb() {
        let resolved = resolve(SkinPart::LegLeftFront, false, false);
        assert!(resolved.mirrored);
        assert_eq!(resolved.layers.base, Rect::new(4, 20, 4, 12));
    }

    #[test]
    fn legacy_variant_takes_precedence_over_slim() {
        let resolved = resolve(SkinPart::ArmLeftBack, false, true);
        assert!(resolved.mirrored);
        assert_eq!(resolved.layers.base, Rect::new(52, 20, 4, 12));
    }

    #[test]
    fn slim_models_use_narrow_arms() {
        let resolved = resolve(SkinPart::ArmRightFront, true, true);
        assert!(!resolved.mirrored);
        assert_eq!(resolved.layers.base.w, 3);

        let classic = resolve(SkinPart::ArmRightFront, true, false);
        assert_eq!(classic.layers.base.w, 4);
    }

    #[test]
    fn parts_without_variants_are_unchanged() {
        let large = resolve(SkinPart::HeadFront, true, true);
        let small = resolve(SkinPart::HeadFront, false, true);
        assert_eq!(large, small);
        assert!(!small.mirrored);
    }
}
