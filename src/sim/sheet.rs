//! Sheet geometry
//!
//! Sheet-local coordinates: x runs across the sheet, y runs from the far end
//! (top, y = 0) toward the thrower (bottom). Stones are thrown from the hack
//! toward decreasing y. The layout is:
//! - bounds: the playable rectangle
//! - house: the scoring target, a set of concentric rings
//! - hog line: below the house; a stone must pass it before stopping
//! - back line: above the house; a stone past it is out of play

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::stone::Stone;
use crate::consts::*;
use crate::distance;

/// Axis-aligned playable area
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Bounds {
    #[inline]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }
}

/// Fixed sheet layout shared by physics, scoring and the renderer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sheet {
    pub width: f32,
    pub height: f32,
    pub bounds: Bounds,
    pub house_center: Vec2,
    /// Ring radii, outermost first
    pub house_rings: [f32; 4],
    /// Throw origin
    pub hack: Vec2,
    pub hog_line_y: f32,
    pub back_line_y: f32,
}

impl Default for Sheet {
    fn default() -> Self {
        Self::new(SHEET_WIDTH, SHEET_HEIGHT)
    }
}

impl Sheet {
    /// Lay out a sheet inside a `width` x `height` area.
    ///
    /// Panics if the area is too small to hold the margins.
    pub fn new(width: f32, height: f32) -> Self {
        let bounds = Bounds {
            left: SHEET_SIDE_MARGIN,
            right: width - SHEET_SIDE_MARGIN,
            top: SHEET_END_MARGIN,
            bottom: height - SHEET_END_MARGIN,
        };
        assert!(
            bounds.width() > 0.0 && bounds.height() > 0.0,
            "sheet {width}x{height} is too small for its margins"
        );

        let house_center = Vec2::new(width / 2.0, HOUSE_Y);
        Self {
            width,
            height,
            bounds,
            house_center,
            house_rings: HOUSE_RINGS,
            hack: Vec2::new(width / 2.0, height - HACK_OFFSET),
            hog_line_y: house_center.y + HOG_LINE_OFFSET,
            back_line_y: house_center.y - BACK_LINE_OFFSET,
        }
    }

    /// Outer radius of the house
    #[inline]
    pub fn house_radius(&self) -> f32 {
        self.house_rings[0]
    }

    /// Stone has travelled past the hog line
    #[inline]
    pub fn is_beyond_hog_line(&self, stone: &Stone) -> bool {
        stone.pos.y < self.hog_line_y
    }

    /// Stone has travelled past the back line
    #[inline]
    pub fn is_beyond_back_line(&self, stone: &Stone) -> bool {
        stone.pos.y < self.back_line_y
    }

    /// Stone centre lies within the house
    pub fn in_house(&self, stone: &Stone) -> bool {
        distance(stone.pos, self.house_center) <= self.house_radius()
    }
}
