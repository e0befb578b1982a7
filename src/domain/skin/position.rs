use std::{fmt, str::FromStr, sync::OnceLock};

use image::{imageops, RgbaImage};

use crate::{
    domain::skin::{
        extractor::{render_part, validate_scale, MAX_SCALE},
        geometry::SkinPart,
        resolver::resolve,
        skin_image::SkinImage,
        texture::SkinTexture,
    },
    shared::error::SkinError,
};

/// Placement of one part inside a composite view, in texels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartPosition {
    pub part: SkinPart,
    pub offset: (u32, u32),
    pub slim_offset: (u32, u32),
}

impl PartPosition {
    /// Same offset for both models.
    pub const fn new(part: SkinPart, x: u32, y: u32) -> Self {
        Self::with_slim(part, x, y, x, y)
    }

    pub const fn with_slim(part: SkinPart, x: u32, y: u32, slim_x: u32, slim_y: u32) -> Self {
        Self {
            part,
            offset: (x, y),
            slim_offset: (slim_x, slim_y),
        }
    }

    pub fn offset(&self, slim: bool) -> (u32, u32) {
        if slim {
            self.slim_offset
        } else {
            self.offset
        }
    }

    fn extent(&self, slim: bool) -> Option<(u32, u32)> {
        let (x, y) = self.offset(slim);
        let rect = resolve(self.part, true, slim).layers.base;
        Some((x.checked_add(rect.w)?, y.checked_add(rect.h)?))
    }
}

/// Largest canvas side, in texels, a position may span. At `MAX_SCALE` the
/// rendered side stays at 6400 pixels.
pub const MAX_CANVAS_TEXELS: u32 = 128;

const _: () = assert!(MAX_CANVAS_TEXELS <= u32::MAX / MAX_SCALE);

/// Canvas size of a set of positioned parts. Empty sets and parts reaching
/// past `MAX_CANVAS_TEXELS` are rejected.
pub fn canvas_size(parts: &[PartPosition], slim: bool) -> Result<(u32, u32), SkinError> {
    let mut size: Option<(u32, u32)> = None;
    for position in parts {
        let (x, y) = position
            .extent(slim)
            .filter(|&(x, y)| x <= MAX_CANVAS_TEXELS && y <= MAX_CANVAS_TEXELS)
            .ok_or_else(|| {
                SkinError::InvalidArgument(format!(
                    "La parte {} en {:?} excede el lienzo máximo de {MAX_CANVAS_TEXELS}x{MAX_CANVAS_TEXELS}",
                    position.part,
                    position.offset(slim)
                ))
            })?;
        size = Some(match size {
            Some((width, height)) => (width.max(x), height.max(y)),
            None => (x, y),
        });
    }

    size.ok_or_else(|| SkinError::InvalidArgument("Una posición de skin necesita al menos una parte".into()))
}

/// Ordered set of parts composed into one image. Later parts overwrite
/// earlier ones where they overlap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkinPosition {
    parts: Vec<PartPosition>,
    size: (u32, u32),
    slim_size: (u32, u32),
}

impl SkinPosition {
    pub fn new(parts: Vec<PartPosition>) -> Result<Self, SkinError> {
        let size = canvas_size(&parts, false)?;
        let slim_size = canvas_size(&parts, true)?;

        Ok(Self {
            parts,
            size,
            slim_size,
        })
    }

    pub fn part_positions(&self) -> &[PartPosition] {
        &self.parts
    }

    pub fn canvas_size(&self, slim: bool) -> (u32, u32) {
        if slim {
            self.slim_size
        } else {
            self.size
        }
    }
}

use SkinPart::*;

const FRONT_LAYOUT: &[PartPosition] = &[
    PartPosition::with_slim(HeadFront, 4, 0, 3, 0),
    PartPosition::with_slim(ArmLeftFront, 12, 8, 11, 8),
    PartPosition::new(ArmRightFront, 0, 8),
    PartPosition::with_slim(BodyFront, 4, 8, 3, 8),
    PartPosition::with_slim(LegLeftFront, 8, 20, 7, 20),
    PartPosition::with_slim(LegRightFront, 4, 20, 3, 20),
];

const BACK_LAYOUT: &[PartPosition] = &[
    PartPosition::with_slim(HeadBack, 4, 0, 3, 0),
    PartPosition::new(ArmLeftBack, 0, 8),
    PartPosition::with_slim(ArmRightBack, 12, 8, 11, 8),
    PartPosition::with_slim(BodyBack, 4, 8, 3, 8),
    PartPosition::with_slim(LegLeftBack, 4, 20, 3, 20),
    PartPosition::with_slim(LegRightBack, 8, 20, 7, 20),
];

const LEFT_LAYOUT: &[PartPosition] = &[
    PartPosition::new(HeadLeft, 0, 0),
    PartPosition::new(ArmLeftOutside, 2, 8),
    PartPosition::new(LegLeftOutside, 2, 20),
];

const RIGHT_LAYOUT: &[PartPosition] = &[
    PartPosition::new(HeadRight, 0, 0),
    PartPosition::new(ArmRightOutside, 2, 8),
    PartPosition::new(LegRightOutside, 2, 20),
];

const TOP_LAYOUT: &[PartPosition] = &[
    PartPosition::with_slim(HeadTop, 4, 0, 3, 0),
    PartPosition::new(ArmLeftTop, 0, 2),
    PartPosition::with_slim(ArmRightTop, 12, 2, 11, 2),
];

const BOTTOM_LAYOUT: &[PartPosition] = &[
    PartPosition::with_slim(HeadBottom, 4, 0, 3, 0),
    PartPosition::new(ArmLeftBottom, 0, 2),
    PartPosition::with_slim(ArmRightBottom, 12, 2, 11, 2),
    PartPosition::with_slim(LegLeftBottom, 4, 2, 3, 2),
    PartPosition::with_slim(LegRightBottom, 8, 2, 7, 2),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkinView {
    Front,
    Back,
    Left,
    Right,
    Top,
    Bottom,
}

impl SkinView {
    pub const ALL: [SkinView; 6] = [
        Self::Front,
        Self::Back,
        Self::Left,
        Self::Right,
        Self::Top,
        Self::Bottom,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Front => "front",
            Self::Back => "back",
            Self::Left => "left",
            Self::Right => "right",
            Self::Top => "top",
            Self::Bottom => "bottom",
        }
    }

    fn layout(self) -> &'static [PartPosition] {
        match self {
            Self::Front => FRONT_LAYOUT,
            Self::Back => BACK_LAYOUT,
            Self::Left => LEFT_LAYOUT,
            Self::Right => RIGHT_LAYOUT,
            Self::Top => TOP_LAYOUT,
            Self::Bottom => BOTTOM_LAYOUT,
        }
    }

    pub fn position(self) -> &'static SkinPosition {
        static POSITIONS: OnceLock<Vec<SkinPosition>> = OnceLock::new();
        let positions = POSITIONS.get_or_init(|| {
            Self::ALL
                .iter()
                .map(|view| {
                    SkinPosition::new(view.layout().to_vec())
                        .unwrap_or_else(|err| panic!("Vista {view} inválida: {err}"))
                })
                .collect()
        });
        &positions[self as usize]
    }
}

impl fmt::Display for SkinView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SkinView {
    type Err = SkinError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|view| view.name() == normalized)
            .ok_or_else(|| SkinError::InvalidArgument(format!("Vista de skin desconocida: {value}")))
    }
}

pub fn compose_position(
    texture: &SkinTexture,
    position: &SkinPosition,
    scale: u32,
) -> Result<SkinImage, SkinError> {
    validate_scale(scale)?;

    let slim = texture.is_slim();
    let (width, height) = position.canvas_size(slim);
    let mut canvas = RgbaImage::new(width * scale, height * scale);

    for part_position in position.part_positions() {
        let part_image = render_part(texture, part_position.part, scale);
        let (x, y) = part_position.offset(slim);
        imageops::replace(
            &mut canvas,
            &part_image,
            i64::from(x * scale),
            i64::from(y * scale),
        );
    }

    Ok(SkinImage::new(canvas))
}

pub fn compose_view(texture: &SkinTexture, view: SkinView, scale: u32) -> Result<SkinImage, SkinError> {
    compose_position(texture, view.position(), scale)
}
