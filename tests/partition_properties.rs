use proptest::prelude::*;
use tui_marquee::config::AppConfig;
use tui_marquee::internal::marquee::partition::{chunked, round_robin};
use tui_marquee::internal::models::Testimonial;

fn column_choice() -> impl Strategy<Value = usize> {
    prop_oneof![Just(3usize), Just(5usize), Just(6usize)]
}

proptest! {
    #[test]
    fn round_robin_conserves_every_item(n in 0usize..200, k in column_choice()) {
        let cols = round_robin(n, k);
        let mut all: Vec<usize> = cols.concat();
        all.sort_unstable();
        prop_assert_eq!(all, (0..n).collect::<Vec<_>>());
    }

    #[test]
    fn round_robin_balances_within_one(n in 0usize..200, k in column_choice()) {
        let cols = round_robin(n, k);
        let max = cols.iter().map(|c| c.len()).max().unwrap_or(0);
        let min = cols.iter().map(|c| c.len()).min().unwrap_or(0);
        prop_assert!(max - min <= 1);
    }

    #[test]
    fn chunked_conserves_every_item(n in 0usize..200, k in column_choice()) {
        let cols = chunked(n, k);
        let mut all: Vec<usize> = cols.concat();
        all.sort_unstable();
        prop_assert_eq!(all, (0..n).collect::<Vec<_>>());
    }

    #[test]
    fn chunked_blocks_never_exceed_ceil(n in 0usize..200, k in column_choice()) {
        let chunk = n.div_ceil(k);
        let cols = chunked(n, k);
        prop_assert_eq!(cols.len(), k);
        for col in &cols {
            prop_assert!(col.len() <= chunk);
        }
        // Blocks are contiguous and in order.
        let flat: Vec<usize> = cols.concat();
        prop_assert!(flat.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn star_display_is_always_five_glyphs(rating in any::<i8>()) {
        let t = Testimonial {
            name: "Test".to_string(),
            quote: "Quote".to_string(),
            rating: Some(rating),
            ..Testimonial::default()
        };
        let filled = t.stars();
        prop_assert!(filled <= 5);
        let empty = 5 - filled;
        prop_assert_eq!(filled + empty, 5);
    }

    #[test]
    fn config_parsing_never_panics(s in "\\PC*") {
        // Fuzz the config loader with random strings
        // It should return an Err, but not panic
        let _ = ron::from_str::<AppConfig>(&s);
    }
}
