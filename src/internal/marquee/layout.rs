//! Wall layout: the engine's rendered-output contract.
//!
//! [`Wall::layout`] composes the partitioner, geometry, animator and
//! perspective stages into a [`WallLayout`] value. The TUI draws exactly
//! what the layout says, and the integration tests treat it as a black box:
//! the root carries the expected card count, every column carries its index
//! and measure state, and every card slot carries its source index and rect.

use std::time::Duration;

use super::animator::{self, ColumnOffset};
use super::geometry::{ColumnGeometry, MeasureState, WallGeometry};
use super::partition;
use super::perspective::{self, ColumnPlacement};
use super::{MarqueeConfig, MotionMode, MotionPreference};

/// Horizontal gap between columns, in cells.
pub const COLUMN_GAP: u16 = 2;

/// Projection-space px per terminal column and row. A terminal cell is
/// roughly twice as tall as it is wide; these factors keep the tilt
/// constants (tuned in px) meaningful on a cell grid.
const PX_PER_COL: f32 = 10.0;
const PX_PER_ROW: f32 = 20.0;

/// Narrowest a projected column may collapse to.
const MIN_COLUMN_CELLS: u16 = 12;

/// Which wrap-mode track a card slot belongs to. Bounce mode only uses
/// [`Track::A`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Track {
    A,
    B,
}

/// One card instance placed on screen. `y` is relative to the wall frame
/// and may be negative while a card is partway above it.
#[derive(Debug, Clone, PartialEq)]
pub struct CardSlot {
    pub source: usize,
    pub track: Track,
    pub x: u16,
    pub y: i32,
    pub width: u16,
    pub height: u16,
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnLayout {
    pub index: usize,
    pub state: MeasureState,
    pub travel: f32,
    pub offset: ColumnOffset,
    pub x: u16,
    pub width: u16,
    pub depth_scale: f32,
    pub cards: Vec<CardSlot>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WallLayout {
    /// Wall frame size (cols, rows).
    pub frame: (u16, u16),
    /// Declared total: must equal the supplied testimonial count.
    pub expected_cards: usize,
    pub card_width: u16,
    pub card_height: u16,
    pub columns: Vec<ColumnLayout>,
}

impl WallLayout {
    /// Number of distinct card renderings (track-A slots). Equals
    /// [`Self::expected_cards`] for every input.
    pub fn card_count(&self) -> usize {
        self.columns
            .iter()
            .map(|col| col.cards.iter().filter(|c| c.track == Track::A).count())
            .sum()
    }

    /// True when any card slot crosses the frame's horizontal bounds.
    pub fn has_horizontal_overflow(&self) -> bool {
        let frame_w = self.frame.0;
        self.columns.iter().any(|col| {
            col.cards
                .iter()
                .any(|card| card.x.saturating_add(card.width) > frame_w)
        })
    }
}

/// A mounted wall: configuration, column assignment, and per-column
/// measurement state. The assignment is derived once per data or
/// configuration change, never per frame.
#[derive(Debug, Clone)]
pub struct Wall {
    cfg: MarqueeConfig,
    geometry: WallGeometry,
    item_count: usize,
    assignment: Vec<Vec<usize>>,
}

impl Wall {
    pub fn new(cfg: MarqueeConfig, item_count: usize) -> Self {
        let cfg = cfg.sanitized();
        let geometry = WallGeometry::new(cfg.columns);
        let mut wall = Self {
            cfg,
            geometry,
            item_count,
            assignment: Vec::new(),
        };
        wall.repartition();
        wall
    }

    /// Wrap scrolls round-robin columns; bounce chunks contiguously, the
    /// split each variant shipped with.
    fn repartition(&mut self) {
        self.assignment = match self.cfg.motion {
            MotionMode::Wrap => partition::round_robin(self.item_count, self.cfg.columns),
            MotionMode::Bounce => partition::chunked(self.item_count, self.cfg.columns),
        };
    }

    pub fn config(&self) -> &MarqueeConfig {
        &self.cfg
    }

    pub fn geometry(&self) -> &WallGeometry {
        &self.geometry
    }

    pub fn motion(&self) -> MotionMode {
        self.cfg.motion
    }

    pub fn columns(&self) -> usize {
        self.cfg.columns
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    /// Switch motion variant; the partition policy and tilt follow the
    /// variant (unless the tilt is explicitly overridden) and all columns
    /// re-measure.
    pub fn set_motion(&mut self, motion: MotionMode) {
        self.cfg.motion = motion;
        self.geometry.reset(self.cfg.columns);
        self.repartition();
    }

    pub fn set_columns(&mut self, columns: usize) {
        self.cfg.columns = super::snap_columns(columns);
        self.geometry.reset(self.cfg.columns);
        self.repartition();
    }

    /// The testimonial list changed; the assignment and all derived
    /// geometry are recomputed from scratch.
    pub fn set_item_count(&mut self, item_count: usize) {
        self.item_count = item_count;
        self.geometry.reset(self.cfg.columns);
        self.repartition();
    }

    /// Viewport resized: re-measure without interrupting rendering.
    pub fn on_resize(&mut self) {
        self.geometry.invalidate_all();
    }

    /// Build the layout for a frame of `frame_w` × `frame_h` cells at the
    /// given elapsed time.
    pub fn layout(
        &mut self,
        frame_w: u16,
        frame_h: u16,
        pref: MotionPreference,
        elapsed: Duration,
    ) -> WallLayout {
        let (card_w, card_h) = self.cfg.motion.card_size();
        let columns = self.cfg.columns;

        // Measurement pass: trust the laid-out stack extent unless the
        // column already animates against a current measurement.
        for index in 0..self.assignment.len() {
            let stack_rows = self.assignment[index].len() as f32 * card_h as f32;
            if let Some(col_geo) = self.geometry.column_mut(index)
                && col_geo.state() != MeasureState::Animating
            {
                col_geo.record(stack_rows);
            }
        }

        let pitch_px = (card_w + COLUMN_GAP) as f32 * PX_PER_COL;
        let placements = perspective::place_columns(&self.cfg.effective_tilt(), columns, pitch_px);

        let column_layouts = self
            .assignment
            .iter()
            .zip(placements.iter())
            .enumerate()
            .map(|(index, (sources, placement))| {
                self.layout_column(
                    index, sources, placement, card_w, card_h, frame_w, frame_h, pref, elapsed,
                )
            })
            .collect();

        WallLayout {
            frame: (frame_w, frame_h),
            expected_cards: self.item_count,
            card_width: card_w,
            card_height: card_h,
            columns: column_layouts,
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn layout_column(
        &self,
        index: usize,
        sources: &[usize],
        placement: &ColumnPlacement,
        card_w: u16,
        card_h: u16,
        frame_w: u16,
        frame_h: u16,
        pref: MotionPreference,
        elapsed: Duration,
    ) -> ColumnLayout {
        let col_geo: ColumnGeometry = self.geometry.column(index).cloned().unwrap_or_default();
        let travel = col_geo.travel();
        let amplitude = col_geo.amplitude(frame_h as f32);

        let offset = match sources.is_empty() {
            // Empty columns never animate.
            true => ColumnOffset::at_rest(),
            false => animator::column_offset(
                self.cfg.motion,
                pref,
                self.cfg.speed_scale,
                index,
                self.cfg.columns,
                travel,
                amplitude,
                elapsed,
            ),
        };

        // Projected px to cells, clamped into the frame so the tilt never
        // introduces horizontal overflow.
        let frame_cols = frame_w.max(1);
        let width = ((card_w as f32 * placement.width_scale).round() as u16)
            .clamp(MIN_COLUMN_CELLS.min(frame_cols), frame_cols);
        let center_x = frame_w as f32 / 2.0 + placement.center_x / PX_PER_COL;
        let x = (center_x - width as f32 / 2.0)
            .round()
            .clamp(0.0, frame_w.saturating_sub(width) as f32) as u16;
        let y_shift = placement.center_y / PX_PER_ROW;

        // Guaranteed-coverage band of the dual-track loop; bounce stacks
        // center on the same base line.
        let base = (frame_h as f32 - travel) / 2.0 + y_shift;

        let mut cards = Vec::with_capacity(sources.len() * 2);
        let mut push_track = |track: Track, track_offset: f32| {
            for (slot, &source) in sources.iter().enumerate() {
                let y = (base + slot as f32 * card_h as f32 + track_offset).round() as i32;
                let visible = y + (card_h as i32) > 0 && y < frame_h as i32;
                cards.push(CardSlot {
                    source,
                    track,
                    x,
                    y,
                    width,
                    height: card_h,
                    visible,
                });
            }
        };
        push_track(Track::A, offset.primary);
        if let Some(complement) = offset.complement {
            push_track(Track::B, complement);
        }

        ColumnLayout {
            index,
            state: col_geo.state(),
            travel,
            offset,
            x,
            width,
            depth_scale: placement.depth_scale,
            cards,
        }
    }
}
