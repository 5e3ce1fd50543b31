//! Testimonial data loading.
//!
//! The wall renders whatever list the caller supplies; in the shipped app
//! that is a RON file (`testimonials.ron` by default) with a compiled-in
//! salon dataset as the fallback so the binary always has something to
//! show.

use std::fs;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;

use crate::internal::models::Testimonial;

static DEFAULT_TESTIMONIALS: Lazy<Vec<Testimonial>> = Lazy::new(|| {
    let entries: [(&str, &str, &str, &str); 10] = [
        (
            "assets/model.jpg",
            "Sarah M.",
            "Atlanta, GA",
            "Best braiding experience ever! The attention to detail is incredible.",
        ),
        (
            "assets/silk_press.png",
            "Jasmine T.",
            "Duluth, GA",
            "My hair has never looked this good! The silk press is perfection.",
        ),
        (
            "assets/bridal.png",
            "Amanda R.",
            "Bride",
            "They made me feel like a princess on my wedding day!",
        ),
        (
            "assets/extensions.png",
            "Nicole B.",
            "Norcross, GA",
            "The extensions look so natural! I'm in love with my new length.",
        ),
        (
            "assets/blowout.png",
            "Destiny K.",
            "Lawrenceville, GA",
            "The blowout lasted for weeks! Absolutely worth it.",
        ),
        (
            "assets/precision_cut.png",
            "Michelle P.",
            "Johns Creek, GA",
            "Finally found my forever salon! The precision is unmatched.",
        ),
        (
            "assets/braids.png",
            "Keisha L.",
            "Lilburn, GA",
            "Protective style done right. Zero tension, super neat, love it!",
        ),
        (
            "assets/volume.png",
            "Tiffany H.",
            "Suwanee, GA",
            "Volume, bounce, and shine. I can't stop getting compliments.",
        ),
        (
            "assets/updo.png",
            "Angela V.",
            "Bride",
            "Timely, professional, and my updo survived a full day of dancing!",
        ),
        (
            "assets/treatment.png",
            "Nia C.",
            "Regular Client",
            "The steamer treatment is a game-changer for my scalp and curls.",
        ),
    ];
    entries
        .into_iter()
        .map(|(avatar, name, role, quote)| Testimonial {
            avatar: Some(avatar.to_string()),
            name: name.to_string(),
            role: Some(role.to_string()),
            quote: quote.to_string(),
            rating: Some(5),
        })
        .collect()
});

/// Load testimonials from the configured RON file.
///
/// Candidates are the path as given and the same path next to the
/// executable. A missing or unparsable file logs and falls back to the
/// compiled-in dataset; an empty configured path skips the file search.
pub fn load_testimonials(configured: &str) -> Vec<Testimonial> {
    if !configured.trim().is_empty() {
        for path in candidate_paths(configured) {
            match read_file(&path) {
                Some(list) => {
                    tracing::info!("Loaded {} testimonials from {}", list.len(), path.display());
                    return list;
                }
                None => continue,
            }
        }
        tracing::warn!(
            "Testimonial file '{}' not usable, using built-in dataset",
            configured
        );
    }
    DEFAULT_TESTIMONIALS.clone()
}

fn candidate_paths(configured: &str) -> Vec<PathBuf> {
    let mut candidates = vec![PathBuf::from(configured)];
    if let Ok(exe) = std::env::current_exe()
        && let Some(dir) = exe.parent()
    {
        candidates.push(dir.join(configured));
    }
    candidates
}

fn read_file(path: &Path) -> Option<Vec<Testimonial>> {
    if !path.exists() {
        return None;
    }
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            tracing::error!("Failed to read {}: {}", path.display(), e);
            return None;
        }
    };
    match ron::from_str::<Vec<Testimonial>>(&content) {
        Ok(list) => Some(list),
        Err(e) => {
            tracing::error!("Failed to parse {}: {}", path.display(), e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn builtin_dataset_is_nonempty_and_in_range() {
        let list = load_testimonials("");
        assert!(!list.is_empty());
        for t in &list {
            assert!(t.stars() <= 5);
            assert!(!t.name.is_empty());
        }
    }

    #[test]
    fn loads_ron_file_when_present() {
        let path = std::env::temp_dir().join("tui_marquee_data_test.ron");
        {
            let mut file = fs::File::create(&path).unwrap();
            file.write_all(
                br#"[
    (name: "Erica D.", quote: "Precision cut that finally suits my face shape.", rating: Some(4)),
]"#,
            )
            .unwrap();
        }

        let list = load_testimonials(path.to_str().unwrap());
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].name, "Erica D.");
        assert_eq!(list[0].stars(), 4);

        let _ = fs::remove_file(path);
    }

    #[test]
    fn unreadable_file_falls_back_to_builtin() {
        let list = load_testimonials("definitely/not/a/real/path.ron");
        assert_eq!(list.len(), DEFAULT_TESTIMONIALS.len());
    }
}
