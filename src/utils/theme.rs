//! Theme-name helpers.
//!
//! Theme files carry paired "Dark"/"Light" variants; switching between them
//! toggles the standalone token inside the configured theme name while
//! keeping the rest of the name (and its capitalization pattern) intact.

use regex::Regex;

/// Toggle the textual token "Dark" <-> "Light" inside a theme name.
///
/// Only the first standalone occurrence is replaced. When the name carries
/// no token, the opposite of the runtime hint is appended ("Blossom" on a
/// dark terminal becomes "Blossom Light").
pub fn toggle_dark_light(name: &str, runtime_is_dark: Option<bool>) -> String {
    let re = Regex::new(r"(?i)\b(dark|light)\b").expect("regex compiles");
    match re.find(name) {
        Some(found) => {
            let replacement_base = match found.as_str().eq_ignore_ascii_case("dark") {
                true => "Light",
                false => "Dark",
            };
            let replacement = preserve_case(found.as_str(), replacement_base);
            let mut out = String::with_capacity(name.len() + 6);
            out.push_str(&name[..found.start()]);
            out.push_str(&replacement);
            out.push_str(&name[found.end()..]);
            out
        }
        None => {
            let suffix = match runtime_is_dark {
                Some(false) => " Dark",
                _ => " Light",
            };
            format!("{name}{suffix}")
        }
    }
}

fn preserve_case(orig: &str, replacement: &str) -> String {
    let any_upper = orig.chars().any(|c| c.is_uppercase());
    let any_lower = orig.chars().any(|c| c.is_lowercase());
    match (any_upper, any_lower) {
        (true, false) => replacement.to_uppercase(),
        (false, true) => replacement.to_lowercase(),
        _ => replacement.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_dark_to_light() {
        assert_eq!(toggle_dark_light("Blossom Dark", Some(false)), "Blossom Light");
    }

    #[test]
    fn toggle_light_to_dark() {
        assert_eq!(toggle_dark_light("Blossom Light", Some(true)), "Blossom Dark");
    }

    #[test]
    fn appends_based_on_runtime_hint() {
        assert_eq!(toggle_dark_light("Blossom", Some(true)), "Blossom Light");
        assert_eq!(toggle_dark_light("Blossom", Some(false)), "Blossom Dark");
    }

    #[test]
    fn replaces_only_the_standalone_token() {
        assert_eq!(
            toggle_dark_light("Darkness Dark", Some(false)),
            "Darkness Light"
        );
    }

    #[test]
    fn keeps_capitalization_pattern() {
        assert_eq!(
            toggle_dark_light("SOMETHING DARK", Some(false)),
            "SOMETHING LIGHT"
        );
        assert_eq!(
            toggle_dark_light("something dark", Some(false)),
            "something light"
        );
    }
}
