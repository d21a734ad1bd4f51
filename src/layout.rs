//! Geometry of the cylinder, independent of the terminal.
//!
//! Surface coordinates are centered on the cylinder axis with y pointing up
//! and span `-SURFACE_EXTENT..=SURFACE_EXTENT` on both axes.

use crate::game::{
    CHAMBER_COUNT,
    Chamber,
    GameState,
};
use ratatui::layout::Rect;
use std::f64::consts::PI;

pub const SURFACE_EXTENT: f64 = 100.0;
pub const RING_RADIUS: f64 = 50.0;
pub const CHAMBER_RADIUS: f64 = 20.0;
pub const CHAMBER_SPACING: f64 = 2.0 * PI / CHAMBER_COUNT as f64;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ChamberFill {
    /// Translucent default.
    Neutral,
    Safe,
    Fatal,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChamberSprite {
    pub chamber: Chamber,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub fill: ChamberFill,
    pub shows_bullet: bool,
}

impl ChamberSprite {
    /// Labels are drawn axis aligned, which is the same as rotating them by
    /// the negated cylinder angle around the chamber center.
    pub fn label(&self) -> String {
        self.chamber.label().to_string()
    }
}

pub fn chamber_fill(state: &GameState, chamber: Chamber) -> ChamberFill {
    if state.is_over() && state.bullet_chamber() == Some(chamber) {
        ChamberFill::Fatal
    } else if state.is_tried_safe(chamber) {
        ChamberFill::Safe
    } else {
        ChamberFill::Neutral
    }
}

pub fn cylinder_sprites(state: &GameState) -> Vec<ChamberSprite> {
    let rotation = state.rotation_angle();
    let placeholder = state.shows_bullet_placeholder();
    Chamber::all()
        .map(|chamber| {
            // screen convention: positive angles turn clockwise
            let angle = rotation + CHAMBER_SPACING * f64::from(chamber.index());
            ChamberSprite {
                chamber,
                x: angle.cos() * RING_RADIUS,
                y: -angle.sin() * RING_RADIUS,
                radius: CHAMBER_RADIUS,
                fill: chamber_fill(state, chamber),
                shows_bullet: placeholder && chamber.index() == 0,
            }
        })
        .collect()
}

/// Largest visually square area centered in `area`. Terminal cells are about
/// twice as tall as they are wide.
pub fn square_fit(area: Rect) -> Rect {
    let width = area.width.min(area.height.saturating_mul(2));
    let width = width - width % 2;
    let height = width / 2;
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
