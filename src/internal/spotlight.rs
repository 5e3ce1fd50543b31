//! The rotating-highlight view: one testimonial at a time.
//!
//! Pure state. Autoplay is driven from the app shell by a cancellable timer
//! task that sends an advance action; this module only knows how to step
//! the active index and how to stage the quote reveal.

use std::time::Duration;

use crate::internal::marquee::MotionPreference;

/// Seconds between consecutive revealed words of the active quote.
pub const WORD_STAGGER_SECS: f32 = 0.018;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spotlight {
    active: usize,
    len: usize,
    pub autoplay: bool,
    pub interval: Duration,
}

impl Spotlight {
    pub fn new(len: usize, autoplay: bool, interval: Duration) -> Self {
        Self {
            active: 0,
            len,
            autoplay,
            interval,
        }
    }

    pub fn active(&self) -> usize {
        self.active
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Reset for a new testimonial list.
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        self.active = 0;
    }

    pub fn next(&mut self) {
        if self.len > 0 {
            self.active = (self.active + 1) % self.len;
        }
    }

    pub fn prev(&mut self) {
        if self.len > 0 {
            self.active = (self.active + self.len - 1) % self.len;
        }
    }

    /// Presentation tilt for a card, in degrees within -10..=10.
    ///
    /// A deterministic hash of the index: the deck must not reshuffle on
    /// re-render, only when the index itself changes.
    pub fn tilt_for(index: usize) -> i8 {
        let hash = (index as u64)
            .wrapping_mul(0x9E37_79B9_7F4A_7C15)
            .rotate_left(17);
        ((hash % 21) as i8) - 10
    }

    /// How many words of a quote are revealed at `elapsed` since the active
    /// card changed. Reduced motion reveals everything at once.
    pub fn revealed_words(total_words: usize, pref: MotionPreference, elapsed: Duration) -> usize {
        match pref {
            MotionPreference::Reduced => total_words,
            MotionPreference::Full => {
                let revealed = (elapsed.as_secs_f32() / WORD_STAGGER_SECS) as usize;
                revealed.min(total_words)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_and_prev_wrap_around() {
        let mut s = Spotlight::new(3, false, Duration::from_secs(5));
        s.next();
        s.next();
        s.next();
        assert_eq!(s.active(), 0);
        s.prev();
        assert_eq!(s.active(), 2);
    }

    #[test]
    fn empty_spotlight_stays_put() {
        let mut s = Spotlight::new(0, true, Duration::from_secs(5));
        s.next();
        s.prev();
        assert_eq!(s.active(), 0);
    }

    #[test]
    fn tilt_is_deterministic_and_bounded() {
        for index in 0..100 {
            let a = Spotlight::tilt_for(index);
            let b = Spotlight::tilt_for(index);
            assert_eq!(a, b);
            assert!((-10..=10).contains(&a));
        }
        // Neighbouring cards should not all share one angle.
        let distinct: std::collections::HashSet<i8> =
            (0usize..10).map(Spotlight::tilt_for).collect();
        assert!(distinct.len() > 3);
    }

    #[test]
    fn reveal_progresses_with_time() {
        let early = Spotlight::revealed_words(40, MotionPreference::Full, Duration::from_millis(0));
        let later =
            Spotlight::revealed_words(40, MotionPreference::Full, Duration::from_millis(400));
        assert_eq!(early, 0);
        assert!(later > early);
        assert!(later <= 40);
    }

    #[test]
    fn reduced_motion_reveals_instantly() {
        let n = Spotlight::revealed_words(12, MotionPreference::Reduced, Duration::ZERO);
        assert_eq!(n, 12);
    }
}
