use std::{fmt, str::FromStr, sync::OnceLock};

use crate::{domain::skin::resolver, shared::error::SkinError};

pub const TEXTURE_WIDTH: u32 = 64;
pub const LARGE_TEXTURE_HEIGHT: u32 = 64;
/// Height of the pre-1.8 texture layout. Rectangles starting at or below this
/// row only exist on 64x64 textures.
pub const LEGACY_TEXTURE_HEIGHT: u32 = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub const fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    pub fn is_large_only(&self) -> bool {
        self.y >= LEGACY_TEXTURE_HEIGHT
    }

    fn fits_texture(&self) -> bool {
        self.w > 0
            && self.h > 0
            && self.x + self.w <= TEXTURE_WIDTH
            && self.y + self.h <= LARGE_TEXTURE_HEIGHT
    }
}

/// Base and overlay rectangles of one part. Both share the same size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartLayers {
    pub base: Rect,
    pub overlay: Rect,
}

impl PartLayers {
    pub const fn new(base: Rect, overlay_x: u32, overlay_y: u32) -> Self {
        Self {
            base,
            overlay: Rect::new(overlay_x, overlay_y, base.w, base.h),
        }
    }
}

macro_rules! skin_parts {
    ($($variant:ident => $name:literal),+ $(,)?) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum SkinPart {
            $($variant),+
        }

        impl SkinPart {
            pub const ALL: &'static [SkinPart] = &[$(SkinPart::$variant),+];

            pub fn name(self) -> &'static str {
                match self {
                    $(SkinPart::$variant => $name),+
                }
            }
        }
    };
}

skin_parts! {
    HeadTop => "HEAD_TOP",
    HeadBottom => "HEAD_BOTTOM",
    HeadRight => "HEAD_RIGHT",
    HeadFront => "HEAD_FRONT",
    HeadLeft => "HEAD_LEFT",
    HeadBack => "HEAD_BACK",
    LegRightTop => "LEG_RIGHT_TOP",
    LegRightBottom => "LEG_RIGHT_BOTTOM",
    LegRightOutside => "LEG_RIGHT_OUTSIDE",
    LegRightFront => "LEG_RIGHT_FRONT",
    LegRightInside => "LEG_RIGHT_INSIDE",
    LegRightBack => "LEG_RIGHT_BACK",
    BodyTop => "BODY_TOP",
    BodyBottom => "BODY_BOTTOM",
    BodyRight => "BODY_RIGHT",
    BodyFront => "BODY_FRONT",
    BodyLeft => "BODY_LEFT",
    BodyBack => "BODY_BACK",
    ArmRightTop => "ARM_RIGHT_TOP",
    ArmRightBottom => "ARM_RIGHT_BOTTOM",
    ArmRightOutside => "ARM_RIGHT_OUTSIDE",
    ArmRightFront => "ARM_RIGHT_FRONT",
    ArmRightInside => "ARM_RIGHT_INSIDE",
    ArmRightBack => "ARM_RIGHT_BACK",
    LegLeftTop => "LEG_LEFT_TOP",
    LegLeftBottom => "LEG_LEFT_BOTTOM",
    LegLeftOutside => "LEG_LEFT_OUTSIDE",
    LegLeftFront => "LEG_LEFT_FRONT",
    LegLeftInside => "LEG_LEFT_INSIDE",
    LegLeftBack => "LEG_LEFT_BACK",
    ArmLeftTop => "ARM_LEFT_TOP",
    ArmLeftBottom => "ARM_LEFT_BOTTOM",
    ArmLeftOutside => "ARM_LEFT_OUTSIDE",
    ArmLeftFront => "ARM_LEFT_FRONT",
    ArmLeftInside => "ARM_LEFT_INSIDE",
    ArmLeftBack => "ARM_LEFT_BACK",
}

impl SkinPart {
    pub fn is_head(self) -> bool {
        matches!(
            self,
            Self::HeadTop
                | Self::HeadBottom
                | Self::HeadRight
                | Self::HeadFront
                | Self::HeadLeft
                | Self::HeadBack
        )
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for SkinPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SkinPart {
    type Err = SkinError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().replace('-', "_").to_ascii_uppercase();
        SkinPart::ALL
            .iter()
            .copied()
            .find(|part| part.name() == normalized)
            .ok_or_else(|| SkinError::InvalidArgument(format!("Parte de skin desconocida: {value}")))
    }
}

/// One row of the static layout: where a part lives on a 64x64 texture and
/// which variants replace it on legacy textures or slim models.
#[derive(Debug, Clone, Copy)]
pub struct PartLayout {
    pub part: SkinPart,
    pub layers: PartLayers,
    /// Part whose layers are read (mirrored) on 64x32 textures.
    pub legacy_source: Option<SkinPart>,
    pub slim: Option<PartLayers>,
}

impl PartLayout {
    pub const fn new(
        part: SkinPart,
        (x, y, w, h): (u32, u32, u32, u32),
        (overlay_x, overlay_y): (u32, u32),
    ) -> Self {
        Self {
            part,
            layers: PartLayers::new(Rect::new(x, y, w, h), overlay_x, overlay_y),
            legacy_source: None,
            slim: None,
        }
    }

    pub const fn mirrors(mut self, source: SkinPart) -> Self {
        self.legacy_source = Some(source);
        self
    }

    /// Slim rectangles keep the height of the classic one.
    pub const fn slim(mut self, (x, y, w): (u32, u32, u32), (overlay_x, overlay_y): (u32, u32)) -> Self {
        self.slim = Some(PartLayers::new(
            Rect::new(x, y, w, self.layers.base.h),
            overlay_x,
            overlay_y,
        ));
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartDefinition {
    pub part: SkinPart,
    pub layers: PartLayers,
    pub legacy: Option<PartLayers>,
    pub slim: Option<PartLayers>,
}

impl PartDefinition {
    pub fn new(
        part: SkinPart,
        layers: PartLayers,
        legacy: Option<PartLayers>,
        slim: Option<PartLayers>,
    ) -> Result<Self, SkinError> {
        let all_layers = [Some(layers), legacy, slim];
        for candidate in all_layers.iter().flatten() {
            if !candidate.base.fits_texture() || !candidate.overlay.fits_texture() {
                return Err(SkinError::InvalidArgument(format!(
                    "{part}: rectángulo fuera de la textura 64x64"
                )));
            }
        }

        if layers.base.is_large_only() && legacy.is_none() {
            return Err(SkinError::InvalidArgument(format!(
                "{part}: solo existe en texturas 64x64 y no declara variante para texturas 64x32"
            )));
        }

        if legacy.is_some_and(|legacy| legacy.base.is_large_only()) {
            return Err(SkinError::InvalidArgument(format!(
                "{part}: la variante 64x32 apunta a una zona inexistente en texturas 64x32"
            )));
        }

        Ok(Self {
            part,
            layers,
            legacy,
            slim,
        })
    }
}

#[derive(Debug, Clone)]
pub struct GeometryTable {
    definitions: Vec<PartDefinition>,
}

impl GeometryTable {
    /// Builds the table from layout rows. Every `SkinPart` must appear exactly
    /// once and legacy sources must refer to rows of the same table.
    pub fn build(rows: &[PartLayout]) -> Result<Self, SkinError> {
        let mut slots: Vec<Option<PartDefinition>> = vec![None; SkinPart::ALL.len()];

        for row in rows {
            let legacy = match row.legacy_source {
                Some(source) => {
                    let source_row = rows
                        .iter()
                        .find(|candidate| candidate.part == source)
                        .ok_or_else(|| {
                            SkinError::InvalidArgument(format!(
                                "{}: la parte de origen {source} no está en la tabla",
                                row.part
                            ))
                        })?;
                    Some(source_row.layers)
                }
                None => None,
            };

            let definition = PartDefinition::new(row.part, row.layers, legacy, row.slim)?;
            let slot = &mut slots[row.part.index()];
            if slot.is_some() {
                return Err(SkinError::InvalidArgument(format!(
                    "{}: parte duplicada en la tabla",
                    row.part
                )));
            }
            *slot = Some(definition);
        }

        let definitions = slots
            .into_iter()
            .zip(SkinPart::ALL)
            .map(|(slot, part)| {
                slot.ok_or_else(|| {
                    SkinError::InvalidArgument(format!("{part}: falta en la tabla de geometría"))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { definitions })
    }

    pub fn definition(&self, part: SkinPart) -> &PartDefinition {
        &self.definitions[part.index()]
    }

    pub fn base_rect(&self, part: SkinPart, slim: bool, legacy_small: bool) -> Rect {
        resolver::select_layers(self.definition(part), !legacy_small, slim)
            .layers
            .base
    }

    pub fn overlay_rect(&self, part: SkinPart, slim: bool, legacy_small: bool) -> Rect {
        resolver::select_layers(self.definition(part), !legacy_small, slim)
            .layers
            .overlay
    }
}

use SkinPart::*;

pub const SKIN_LAYOUT: &[PartLayout] = &[
    PartLayout::new(HeadTop, (8, 0, 8, 8), (40, 0)),
    PartLayout::new(HeadBottom, (16, 0, 8, 8), (48, 0)),
    PartLayout::new(HeadRight, (0, 8, 8, 8), (32, 8)),
    PartLayout::new(HeadFront, (8, 8, 8, 8), (40, 8)),
    PartLayout::new(HeadLeft, (16, 8, 8, 8), (48, 8)),
    PartLayout::new(HeadBack, (24, 8, 8, 8), (56, 8)),
    PartLayout::new(LegRightTop, (4, 16, 4, 4), (4, 32)),
    PartLayout::new(LegRightBottom, (8, 16, 4, 4), (8, 32)),
    PartLayout::new(LegRightOutside, (0, 20, 4, 12), (0, 36)),
    PartLayout::new(LegRightFront, (4, 20, 4, 12), (4, 36)),
    PartLayout::new(LegRightInside, (8, 20, 4, 12), (8, 36)),
    PartLayout::new(LegRightBack, (12, 20, 4, 12), (12, 36)),
    PartLayout::new(BodyTop, (20, 16, 8, 4), (20, 32)),
    PartLayout::new(BodyBottom, (28, 16, 8, 4), (28, 32)),
    PartLayout::new(BodyRight, (16, 20, 4, 12), (16, 36)),
    PartLayout::new(BodyFront, (20, 20, 8, 12), (20, 36)),
    PartLayout::new(BodyLeft, (28, 20, 4, 12), (28, 36)),
    PartLayout::new(BodyBack, (32, 20, 8, 12), (32, 36)),
    PartLayout::new(ArmRightTop, (44, 16, 4, 4), (44, 32)).slim((44, 16, 3), (44, 32)),
    PartLayout::new(ArmRightBottom, (48, 16, 4, 4), (48, 32)).slim((47, 16, 3), (47, 32)),
    PartLayout::new(ArmRightOutside, (40, 20, 4, 12), (40, 36)),
    PartLayout::new(ArmRightFront, (44, 20, 4, 12), (44, 36)).slim((44, 20, 3), (44, 36)),
    PartLayout::new(ArmRightInside, (48, 20, 4, 12), (48, 36)).slim((47, 20, 4), (47, 36)),
    PartLayout::new(ArmRightBack, (52, 20, 4, 12), (52, 36)).slim((51, 20, 3), (51, 36)),
    // 1.8+ layout: the left limbs have their own regions on 64x64 textures.
    PartLayout::new(LegLeftTop, (20, 48, 4, 4), (4, 48)).mirrors(LegRightTop),
    PartLayout::new(LegLeftBottom, (24, 48, 4, 4), (8, 48)).mirrors(LegRightBottom),
    PartLayout::new(LegLeftOutside, (24, 52, 4, 12), (8, 52)).mirrors(LegRightOutside),
    PartLayout::new(LegLeftFront, (20, 52, 4, 12), (4, 52)).mirrors(LegRightFront),
    PartLayout::new(LegLeftInside, (16, 52, 4, 12), (0, 52)).mirrors(LegRightInside),
    PartLayout::new(LegLeftBack, (28, 52, 4, 12), (12, 52)).mirrors(LegRightBack),
    PartLayout::new(ArmLeftTop, (36, 48, 4, 4), (52, 48))
        .mirrors(ArmRightTop)
        .slim((36, 48, 3), (52, 48)),
    PartLayout::new(ArmLeftBottom, (40, 48, 4, 4), (56, 48))
        .mirrors(ArmRightBottom)
        .slim((39, 48, 3), (55, 48)),
    PartLayout::new(ArmLeftOutside, (40, 52, 4, 12), (56, 52))
        .mirrors(ArmRightOutside)
        .slim((39, 52, 4), (55, 52)),
    PartLayout::new(ArmLeftFront, (36, 52, 4, 12), (52, 52))
        .mirrors(ArmRightFront)
        .slim((36, 52, 3), (52, 52)),
    PartLayout::new(ArmLeftInside, (32, 52, 4, 12), (48, 52)).mirrors(ArmRightInside),
    PartLayout::new(ArmLeftBack, (44, 52, 4, 12), (60, 52))
        .mirrors(ArmRightBack)
        .slim((43, 52, 3), (59, 52)),
];

static GEOMETRY: OnceLock<GeometryTable> = OnceLock::new();

/// Process-wide geometry table, validated on first access.
pub fn geometry() -> &'static GeometryTable {
    GEOMETRY.get_or_init(|| {
        GeometryTable::build(SKIN_LAYOUT)
            .unwrap_or_else(|err| panic!("Tabla de geometría de skin inválida: {err}"))
    })
}
