//! Black-box checks of the wall's rendered-output contract.

use std::collections::HashSet;
use std::time::Duration;

use tui_marquee::internal::marquee::geometry::{MIN_STACK_ROWS, MeasureState};
use tui_marquee::internal::marquee::layout::Track;
use tui_marquee::internal::marquee::{MarqueeConfig, MotionMode, MotionPreference, Wall};

fn wall(motion: MotionMode, columns: usize, items: usize) -> Wall {
    Wall::new(MarqueeConfig::for_motion(motion, columns), items)
}

#[test]
fn thirty_items_over_five_chunked_columns_are_even() {
    let mut wall = wall(MotionMode::Bounce, 5, 30);
    let layout = wall.layout(220, 50, MotionPreference::Full, Duration::ZERO);

    assert_eq!(layout.expected_cards, 30);
    assert_eq!(layout.card_count(), 30);

    let sizes: Vec<usize> = layout
        .columns
        .iter()
        .map(|col| col.cards.iter().filter(|c| c.track == Track::A).count())
        .collect();
    assert_eq!(sizes, vec![6, 6, 6, 6, 6]);
}

#[test]
fn every_item_appears_exactly_once_across_columns() {
    for motion in [MotionMode::Wrap, MotionMode::Bounce] {
        let mut wall = wall(motion, 3, 14);
        let layout = wall.layout(160, 40, MotionPreference::Full, Duration::from_millis(700));

        let sources: Vec<usize> = layout
            .columns
            .iter()
            .flat_map(|col| col.cards.iter())
            .filter(|card| card.track == Track::A)
            .map(|card| card.source)
            .collect();
        assert_eq!(sources.len(), 14);
        let unique: HashSet<usize> = sources.into_iter().collect();
        assert_eq!(unique.len(), 14);
    }
}

#[test]
fn empty_list_renders_an_empty_static_frame() {
    let mut wall = wall(MotionMode::Wrap, 3, 0);
    let early = wall.layout(120, 40, MotionPreference::Full, Duration::ZERO);
    let late = wall.layout(120, 40, MotionPreference::Full, Duration::from_secs(2));

    assert_eq!(early.expected_cards, 0);
    assert_eq!(early.card_count(), 0);
    // The root frame and its columns are still present.
    assert_eq!(early.columns.len(), 3);
    // Nothing moves on an empty wall.
    assert_eq!(early, late);
}

#[test]
fn no_horizontal_overflow_at_any_frame_size() {
    for motion in [MotionMode::Wrap, MotionMode::Bounce] {
        for columns in [3, 5, 6] {
            for (w, h) in [(240u16, 60u16), (120, 40), (40, 12)] {
                let mut wall = wall(motion, columns, 24);
                let layout =
                    wall.layout(w, h, MotionPreference::Full, Duration::from_millis(1500));
                assert!(
                    !layout.has_horizontal_overflow(),
                    "{motion:?} {columns} cols overflowed at {w}x{h}"
                );
            }
        }
    }
}

#[test]
fn columns_move_when_motion_is_allowed() {
    let mut wall = wall(MotionMode::Wrap, 3, 12);
    let t0 = wall.layout(160, 40, MotionPreference::Full, Duration::ZERO);
    let t1 = wall.layout(160, 40, MotionPreference::Full, Duration::from_millis(1200));

    let moved = t0
        .columns
        .iter()
        .zip(t1.columns.iter())
        .any(|(a, b)| a.offset.primary != b.offset.primary);
    assert!(moved);
}

#[test]
fn reduced_motion_is_static_over_a_sampling_window() {
    let mut wall = wall(MotionMode::Wrap, 3, 12);
    let samples: Vec<_> = [0u64, 400, 800, 1200, 1600, 2000]
        .iter()
        .map(|ms| {
            wall.layout(
                160,
                40,
                MotionPreference::Reduced,
                Duration::from_millis(*ms),
            )
        })
        .collect();

    for sample in &samples[1..] {
        assert_eq!(sample, &samples[0]);
    }
}

#[test]
fn resize_remeasures_without_dropping_the_wall() {
    let mut wall = wall(MotionMode::Wrap, 3, 12);
    let before = wall.layout(220, 50, MotionPreference::Full, Duration::ZERO);
    for col in &before.columns {
        assert_eq!(col.state, MeasureState::Animating);
    }

    // 1920px-wide desktop down to a phone-sized strip.
    wall.on_resize();
    for i in 0..wall.columns() {
        assert_eq!(
            wall.geometry().column(i).map(|c| c.state()),
            Some(MeasureState::Measuring)
        );
    }

    let after = wall.layout(46, 14, MotionPreference::Full, Duration::from_millis(16));
    assert_eq!(after.card_count(), 12);
    assert!(!after.has_horizontal_overflow());
    for col in &after.columns {
        assert_eq!(col.state, MeasureState::Animating);
        assert!(col.travel >= MIN_STACK_ROWS);
    }
}

#[test]
fn fallback_distance_applies_before_first_layout() {
    let wall = wall(MotionMode::Wrap, 3, 9);
    for i in 0..wall.columns() {
        let col = wall.geometry().column(i).unwrap();
        assert_eq!(col.state(), MeasureState::Unmeasured);
        assert_eq!(col.travel(), MIN_STACK_ROWS);
    }
}
