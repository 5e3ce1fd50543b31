//! Avatar artwork for testimonial cards.
//!
//! Best effort: decode the referenced image and downsample it to a small
//! half-block mosaic. Any failure (no path, missing file, decode error)
//! falls back to an initials badge. Either way the artwork occupies the
//! same fixed cell footprint, so a fallback never moves the card layout.

use image::imageops::FilterType;
use ratatui::style::Color;

/// Avatar footprint in cells. Each cell row carries two image rows via the
/// upper-half block glyph.
pub const AVATAR_COLS: u16 = 6;
pub const AVATAR_ROWS: u16 = 3;

/// What a card should draw in its avatar slot.
#[derive(Debug, Clone, PartialEq)]
pub enum AvatarArt {
    /// Rows of (upper, lower) pixel colors for `▀` cells.
    Image(Vec<Vec<(Color, Color)>>),
    /// Two-letter badge.
    Initials(String),
}

impl AvatarArt {
    pub fn is_image(&self) -> bool {
        matches!(self, AvatarArt::Image(_))
    }
}

/// Resolve a testimonial's avatar. `initials` is the pre-computed badge
/// text used when the image cannot be produced.
pub fn load(avatar: Option<&str>, initials: &str) -> AvatarArt {
    match avatar {
        Some(path) => match decode_mosaic(path) {
            Some(rows) => AvatarArt::Image(rows),
            None => AvatarArt::Initials(initials.to_string()),
        },
        None => AvatarArt::Initials(initials.to_string()),
    }
}

fn decode_mosaic(path: &str) -> Option<Vec<Vec<(Color, Color)>>> {
    let img = match image::open(path) {
        Ok(img) => img,
        Err(e) => {
            // Expected for placeholder data; the badge covers it.
            tracing::debug!("Avatar '{}' not usable: {}", path, e);
            return None;
        }
    };

    let width = AVATAR_COLS as u32;
    let height = AVATAR_ROWS as u32 * 2;
    let rgb = img.resize_exact(width, height, FilterType::Triangle).to_rgb8();

    let rows = (0..AVATAR_ROWS as u32)
        .map(|row| {
            (0..width)
                .map(|col| {
                    let upper = rgb.get_pixel(col, row * 2).0;
                    let lower = rgb.get_pixel(col, row * 2 + 1).0;
                    (
                        Color::Rgb(upper[0], upper[1], upper[2]),
                        Color::Rgb(lower[0], lower[1], lower[2]),
                    )
                })
                .collect()
        })
        .collect();
    Some(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_path_yields_initials() {
        let art = load(None, "SM");
        assert_eq!(art, AvatarArt::Initials("SM".to_string()));
    }

    #[test]
    fn unreadable_file_yields_initials() {
        let art = load(Some("assets/nope/missing.png"), "JT");
        assert_eq!(art, AvatarArt::Initials("JT".to_string()));
    }

    #[test]
    fn decoded_mosaic_has_fixed_footprint() {
        // Write a tiny PNG and make sure the mosaic matches the fixed size.
        let path = std::env::temp_dir().join("tui_marquee_avatar_test.png");
        let img = image::RgbImage::from_pixel(4, 4, image::Rgb([200, 40, 120]));
        img.save(&path).unwrap();

        match load(path.to_str(), "XX") {
            AvatarArt::Image(rows) => {
                assert_eq!(rows.len(), AVATAR_ROWS as usize);
                assert!(rows.iter().all(|r| r.len() == AVATAR_COLS as usize));
            }
            AvatarArt::Initials(_) => panic!("expected decoded image"),
        }

        let _ = std::fs::remove_file(path);
    }
}
