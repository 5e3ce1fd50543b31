//! Time-driven column offsets.
//!
//! Offsets are a pure function of column index, travel distance, and elapsed
//! time. The draw loop samples this once per frame; nothing here owns a
//! timer or accumulates state, so a skipped frame can never drift a column
//! out of phase.

use std::time::Duration;

use keyframe::EasingFunction;
use keyframe::functions::EaseInOut;

use super::{MotionMode, MotionPreference};

/// Wrap-mode loop rate: fraction of the stack travelled per second.
/// 0.06 keeps the scroll slow enough to read a card in passing; raise it in
/// config for livelier walls.
pub const SPEED_SCALE: f32 = 0.06;

/// Extra seconds added to each successive column's wrap loop so neighbours
/// never scroll in lockstep.
pub const COLUMN_STAGGER_SECS: f32 = 4.0;

/// Bounce half-cycle lengths, alternating by column parity.
pub const BOUNCE_FAST_SECS: f32 = 10.0;
pub const BOUNCE_SLOW_SECS: f32 = 15.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub fn sign(self) -> f32 {
        match self {
            Direction::Up => -1.0,
            Direction::Down => 1.0,
        }
    }
}

/// Deterministic per-column direction.
///
/// Wrap mode sends the center column down and the outer columns up; bounce
/// mode alternates by parity. Both are fixed functions of the index so a
/// re-render never reshuffles the motion.
pub fn direction(mode: MotionMode, column: usize, columns: usize) -> Direction {
    match mode {
        MotionMode::Wrap => match columns > 0 && column == columns / 2 {
            true => Direction::Down,
            false => Direction::Up,
        },
        MotionMode::Bounce => match column % 2 == 0 {
            true => Direction::Up,
            false => Direction::Down,
        },
    }
}

/// Seconds for one full wrap loop of the given column.
pub fn wrap_loop_secs(speed_scale: f32, column: usize) -> f32 {
    let scale = match speed_scale > f32::EPSILON {
        true => speed_scale,
        false => SPEED_SCALE,
    };
    1.0 / scale + column as f32 * COLUMN_STAGGER_SECS
}

/// Seconds for one bounce half-cycle of the given column.
pub fn bounce_half_cycle_secs(column: usize) -> f32 {
    match column % 2 == 0 {
        true => BOUNCE_FAST_SECS,
        false => BOUNCE_SLOW_SECS,
    }
}

/// A column's sampled offsets, in rows.
///
/// `primary` shifts the column's card stack; `complement` is the second
/// wrap-mode track, pinned exactly one travel distance behind the first so
/// the loop tiles without a seam. Bounce mode has no second track.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnOffset {
    pub primary: f32,
    pub complement: Option<f32>,
}

impl ColumnOffset {
    pub fn at_rest() -> Self {
        Self {
            primary: 0.0,
            complement: None,
        }
    }
}

/// Sample a column's offset at the given elapsed time.
pub fn column_offset(
    mode: MotionMode,
    pref: MotionPreference,
    speed_scale: f32,
    column: usize,
    columns: usize,
    travel: f32,
    amplitude: f32,
    elapsed: Duration,
) -> ColumnOffset {
    // Reduced motion renders the rest position: sampling at t = 0 forever.
    let secs = match pref {
        MotionPreference::Reduced => 0.0,
        MotionPreference::Full => elapsed.as_secs_f32(),
    };
    let dir = direction(mode, column, columns);

    match mode {
        MotionMode::Wrap => {
            let loop_secs = wrap_loop_secs(speed_scale, column);
            let phase = (secs / loop_secs).fract();
            let primary = dir.sign() * phase * travel;
            ColumnOffset {
                primary,
                complement: Some(primary - dir.sign() * travel),
            }
        }
        MotionMode::Bounce => {
            let half = bounce_half_cycle_secs(column);
            let total = secs / half;
            let leg = total as u64 % 2;
            let eased = EaseInOut.y(total.fract() as f64) as f32;
            let swing = match leg {
                0 => -amplitude + 2.0 * amplitude * eased,
                _ => amplitude - 2.0 * amplitude * eased,
            };
            ColumnOffset {
                primary: dir.sign() * swing,
                complement: None,
            }
        }
    }
}
