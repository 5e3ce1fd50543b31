//! Static 3D composition of the wall.
//!
//! The grid is tilted once, at the container level, by a fixed rotation
//! under a fixed perspective depth. Column offsets animate *inside* that
//! transform: we project each column's frame here and let the layout apply
//! the animated row offset in column-local space afterwards, so the moving
//! parts never touch the rotation.
//!
//! Projection space is measured in pixels (the tilt constants were tuned
//! against card-sized px values); the layout converts projected px into
//! terminal cells.

use glam::{Mat4, Vec4};
use serde::{Deserialize, Serialize};

use super::MotionMode;

/// Smallest homogeneous w we will divide by.
const MIN_W: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TiltConfig {
    /// Perspective depth in px. Non-finite or zero depth disables
    /// foreshortening entirely.
    pub depth: f32,
    pub rot_x_deg: f32,
    pub rot_y_deg: f32,
    pub rot_z_deg: f32,
}

impl Default for TiltConfig {
    fn default() -> Self {
        Self::for_mode(MotionMode::Wrap)
    }
}

impl TiltConfig {
    /// The tilt each motion variant shipped with.
    pub fn for_mode(mode: MotionMode) -> Self {
        match mode {
            MotionMode::Wrap => Self {
                depth: 1000.0,
                rot_x_deg: 25.0,
                rot_y_deg: 0.0,
                rot_z_deg: -20.0,
            },
            MotionMode::Bounce => Self {
                depth: 300.0,
                rot_x_deg: 55.0,
                rot_y_deg: 0.0,
                rot_z_deg: -45.0,
            },
        }
    }

    /// `perspective(depth) ∘ rotX ∘ rotY ∘ rotZ` as a single matrix.
    pub fn compose(&self) -> Mat4 {
        let mut perspective = Mat4::IDENTITY;
        if self.depth.is_finite() && self.depth > f32::EPSILON {
            perspective.z_axis.w = -1.0 / self.depth;
        }
        perspective
            * Mat4::from_rotation_x(self.rot_x_deg.to_radians())
            * Mat4::from_rotation_y(self.rot_y_deg.to_radians())
            * Mat4::from_rotation_z(self.rot_z_deg.to_radians())
    }
}

/// Where a column's frame landed after projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnPlacement {
    /// Projected center, px, relative to the wall's optical center.
    pub center_x: f32,
    pub center_y: f32,
    /// Projected width over unprojected width.
    pub width_scale: f32,
    /// Apparent magnification; < 1 recedes, > 1 leans toward the viewer.
    /// The renderer dims receding columns with this.
    pub depth_scale: f32,
}

/// Project a grid point (px, z = 0) through the composed transform.
pub fn project(transform: &Mat4, x: f32, y: f32) -> (f32, f32, f32) {
    let v = *transform * Vec4::new(x, y, 0.0, 1.0);
    let w = v.w.max(MIN_W);
    (v.x / w, v.y / w, w)
}

/// Place `columns` frames of `pitch_px` width around the grid origin.
pub fn place_columns(tilt: &TiltConfig, columns: usize, pitch_px: f32) -> Vec<ColumnPlacement> {
    let transform = tilt.compose();
    let span = columns.saturating_sub(1) as f32;
    (0..columns)
        .map(|col| {
            let x0 = (col as f32 - span / 2.0) * pitch_px;
            let (cx, cy, w) = project(&transform, x0, 0.0);
            let (lx, _, _) = project(&transform, x0 - pitch_px / 2.0, 0.0);
            let (rx, _, _) = project(&transform, x0 + pitch_px / 2.0, 0.0);
            ColumnPlacement {
                center_x: cx,
                center_y: cy,
                width_scale: ((rx - lx).abs() / pitch_px).clamp(0.2, 2.0),
                depth_scale: (1.0 / w).clamp(0.5, 1.6),
            }
        })
        .collect()
}
