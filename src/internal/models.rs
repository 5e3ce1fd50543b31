use serde::Deserialize;

/// One client testimonial as supplied by the data file.
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct Testimonial {
    /// Path to an avatar image; absent or unreadable paths fall back to an
    /// initials badge.
    #[serde(default)]
    pub avatar: Option<String>,
    pub name: String,
    #[serde(default)]
    pub role: Option<String>,
    pub quote: String,
    /// 1–5; out-of-range values are clamped for display, absent means 5.
    #[serde(default)]
    pub rating: Option<i8>,
}

impl Testimonial {
    /// Filled-star count for display: always in 0..=5.
    pub fn stars(&self) -> u8 {
        self.rating.unwrap_or(5).clamp(0, 5) as u8
    }

    /// Two-letter initials for the fallback avatar badge: the first letters
    /// of up to two words of the name, uppercased.
    pub fn initials(&self) -> String {
        let letters: String = self
            .name
            .split_whitespace()
            .take(2)
            .filter_map(|word| word.chars().next())
            .flat_map(|c| c.to_uppercase())
            .collect();
        match letters.is_empty() {
            true => "SS".to_string(),
            false => letters,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_rating(rating: Option<i8>) -> Testimonial {
        Testimonial {
            rating,
            name: "Sarah M.".to_string(),
            quote: "Lovely.".to_string(),
            ..Testimonial::default()
        }
    }

    #[test]
    fn missing_rating_defaults_to_five() {
        assert_eq!(with_rating(None).stars(), 5);
    }

    #[test]
    fn ratings_clamp_into_range() {
        assert_eq!(with_rating(Some(-3)).stars(), 0);
        assert_eq!(with_rating(Some(0)).stars(), 0);
        assert_eq!(with_rating(Some(3)).stars(), 3);
        assert_eq!(with_rating(Some(9)).stars(), 5);
    }

    #[test]
    fn initials_take_first_two_words() {
        let t = Testimonial {
            name: "jasmine taylor brooks".to_string(),
            ..Testimonial::default()
        };
        assert_eq!(t.initials(), "JT");
    }

    #[test]
    fn single_word_names_give_one_initial() {
        let t = Testimonial {
            name: "Cher".to_string(),
            ..Testimonial::default()
        };
        assert_eq!(t.initials(), "C");
    }

    #[test]
    fn empty_name_uses_house_badge() {
        let t = Testimonial::default();
        assert_eq!(t.initials(), "SS");
    }
}
