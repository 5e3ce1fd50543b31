//! The testimonial wall engine.
//!
//! A wall is built in stages: partition the testimonial list into columns,
//! measure each column's stack, sample the per-column animation offsets for
//! the current instant, project the tilted grid, and emit a [`WallLayout`]
//! the renderer (and the integration tests) consume.

pub mod animator;
pub mod geometry;
pub mod layout;
pub mod partition;
pub mod perspective;

use serde::{Deserialize, Serialize};
use strum_macros::Display;

pub use layout::{CardSlot, ColumnLayout, Track, Wall, WallLayout};

/// Column counts the wall supports.
pub const COLUMN_CHOICES: [usize; 3] = [3, 5, 6];

/// How the columns travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, Default)]
pub enum MotionMode {
    /// Seamless continuous scroll on two complementary tracks.
    #[default]
    Wrap,
    /// Oscillation between two clamped extremes.
    Bounce,
}

impl MotionMode {
    pub fn toggled(self) -> Self {
        match self {
            MotionMode::Wrap => MotionMode::Bounce,
            MotionMode::Bounce => MotionMode::Wrap,
        }
    }

    /// Fixed card footprint (cols, rows) for this variant.
    pub fn card_size(self) -> (u16, u16) {
        match self {
            MotionMode::Wrap => (32, 10),
            MotionMode::Bounce => (38, 11),
        }
    }
}

/// The user's motion capability, resolved once at startup and injected.
/// Engine code never probes the environment itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MotionPreference {
    #[default]
    Full,
    Reduced,
}

/// Everything the engine needs to lay a wall out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarqueeConfig {
    /// 3, 5, or 6; other values snap to the nearest choice.
    pub columns: usize,
    pub motion: MotionMode,
    /// Wrap-mode loop rate, see [`animator::SPEED_SCALE`].
    pub speed_scale: f32,
    /// Explicit tilt override; absent means the motion variant's own tilt.
    pub tilt: Option<perspective::TiltConfig>,
}

impl Default for MarqueeConfig {
    fn default() -> Self {
        Self {
            columns: 3,
            motion: MotionMode::Wrap,
            speed_scale: animator::SPEED_SCALE,
            tilt: None,
        }
    }
}

impl MarqueeConfig {
    pub fn for_motion(motion: MotionMode, columns: usize) -> Self {
        Self {
            columns: snap_columns(columns),
            motion,
            ..Self::default()
        }
    }

    pub fn effective_tilt(&self) -> perspective::TiltConfig {
        self.tilt
            .unwrap_or_else(|| perspective::TiltConfig::for_mode(self.motion))
    }

    /// Normalized copy: column count snapped, speed scale made positive.
    pub fn sanitized(&self) -> Self {
        let mut cfg = self.clone();
        cfg.columns = snap_columns(self.columns);
        if !(cfg.speed_scale.is_finite() && cfg.speed_scale > 0.0) {
            cfg.speed_scale = animator::SPEED_SCALE;
        }
        cfg
    }
}

/// Snap an arbitrary column count to the nearest supported choice.
pub fn snap_columns(requested: usize) -> usize {
    COLUMN_CHOICES
        .into_iter()
        .min_by_key(|choice| choice.abs_diff(requested))
        .unwrap_or(3)
}

/// The next column choice after `current`, wrapping around.
pub fn cycle_columns(current: usize) -> usize {
    let pos = COLUMN_CHOICES
        .iter()
        .position(|&c| c == current)
        .unwrap_or(0);
    COLUMN_CHOICES[(pos + 1) % COLUMN_CHOICES.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapping_prefers_nearest_choice() {
        assert_eq!(snap_columns(1), 3);
        assert_eq!(snap_columns(4), 3);
        assert_eq!(snap_columns(5), 5);
        assert_eq!(snap_columns(9), 6);
    }

    #[test]
    fn column_cycle_wraps() {
        assert_eq!(cycle_columns(3), 5);
        assert_eq!(cycle_columns(5), 6);
        assert_eq!(cycle_columns(6), 3);
        // An out-of-set value restarts the cycle.
        assert_eq!(cycle_columns(4), 5);
    }

    #[test]
    fn sanitize_repairs_bad_speed() {
        let cfg = MarqueeConfig {
            speed_scale: 0.0,
            ..MarqueeConfig::default()
        };
        assert_eq!(cfg.sanitized().speed_scale, animator::SPEED_SCALE);
    }
}
