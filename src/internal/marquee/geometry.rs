//! Per-column travel-distance measurement.
//!
//! A column's loop distance is the extent of one full stack of its cards, in
//! terminal rows. The measurement comes from the layout pass (cards have a
//! fixed size, so the extent is known once the column's item count is), but
//! it is only trusted after a layout has actually happened: before that the
//! column sits in `Unmeasured` and animates against a fallback distance, the
//! same way the web original scrolled against a constant before its first
//! `scrollHeight` read. Terminal resizes push columns back through
//! `Measuring` without ever dropping the last known distance, so a resize
//! mid-animation never blanks the wall.

/// Fallback travel distance (rows) used before the first real measurement.
pub const MIN_STACK_ROWS: f32 = 24.0;

/// Bounce amplitude ceiling, as a fraction of the visible container height.
pub const AMPLITUDE_FRACTION: f32 = 0.08;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasureState {
    /// Initial mount state; fallback distance active.
    Unmeasured,
    /// A (re-)measurement is pending; last known distance stays in use.
    Measuring,
    /// A finite measured distance is available.
    Animating,
}

#[derive(Debug, Clone)]
pub struct ColumnGeometry {
    state: MeasureState,
    stack_rows: f32,
}

impl Default for ColumnGeometry {
    fn default() -> Self {
        Self::new()
    }
}

impl ColumnGeometry {
    pub fn new() -> Self {
        Self {
            state: MeasureState::Unmeasured,
            stack_rows: MIN_STACK_ROWS,
        }
    }

    /// Record the laid-out stack extent for this column.
    ///
    /// Zero or non-finite extents (an empty column, a not-yet-sized frame)
    /// fall back to [`MIN_STACK_ROWS`] rather than stalling the animation.
    pub fn record(&mut self, measured_rows: f32) {
        self.stack_rows = match measured_rows.is_finite() && measured_rows > 0.0 {
            true => measured_rows.max(MIN_STACK_ROWS),
            false => MIN_STACK_ROWS,
        };
        self.state = MeasureState::Animating;
    }

    /// Mark the column for re-measurement, keeping the previous distance.
    pub fn invalidate(&mut self) {
        self.state = MeasureState::Measuring;
    }

    pub fn state(&self) -> MeasureState {
        self.state
    }

    /// Current travel distance in rows. Always finite and positive.
    pub fn travel(&self) -> f32 {
        self.stack_rows
    }

    /// Bounce amplitude for a container of the given height, clamped so the
    /// cards cannot swing out of frame.
    pub fn amplitude(&self, container_rows: f32) -> f32 {
        let ceiling = (container_rows * AMPLITUDE_FRACTION).max(1.0);
        (self.stack_rows / 2.0).min(ceiling)
    }
}

/// Geometry for every column of one mounted wall.
#[derive(Debug, Clone)]
pub struct WallGeometry {
    columns: Vec<ColumnGeometry>,
}

impl WallGeometry {
    pub fn new(columns: usize) -> Self {
        Self {
            columns: (0..columns).map(|_| ColumnGeometry::new()).collect(),
        }
    }

    /// Reset for a new column count or a new testimonial list.
    pub fn reset(&mut self, columns: usize) {
        self.columns = (0..columns).map(|_| ColumnGeometry::new()).collect();
    }

    /// Viewport resized: every column re-measures on the next layout pass.
    pub fn invalidate_all(&mut self) {
        for col in &mut self.columns {
            col.invalidate();
        }
    }

    pub fn column(&self, index: usize) -> Option<&ColumnGeometry> {
        self.columns.get(index)
    }

    pub fn column_mut(&mut self, index: usize) -> Option<&mut ColumnGeometry> {
        self.columns.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
