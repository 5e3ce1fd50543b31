use regex::RegexBuilder;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use crate::internal::marquee::MarqueeConfig;
use crate::internal::ui::app::Action;

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    /// Preferred theme name to apply (e.g., "Blossom Dark" / "Blossom Light")
    pub theme_name: String,
    /// Path to a theme file or directory to scan (e.g., "./themes")
    pub theme_file: String,
    /// Path to the testimonial data file (RON). Empty means the built-in
    /// dataset.
    pub testimonials_file: String,
    /// Explicit reduced-motion override. Absent means "ask the
    /// environment" (REDUCED_MOTION).
    pub reduced_motion: Option<bool>,
    pub marquee: MarqueeConfig,
    pub spotlight: SpotlightConfig,
    pub logging: LoggingConfig,
    pub keybindings: Option<KeyBindingConfig>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct SpotlightConfig {
    pub autoplay: bool,
    pub interval_ms: u64,
}

impl Default for SpotlightConfig {
    fn default() -> Self {
        Self {
            autoplay: true,
            interval_ms: 5000,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    /// Base level filter when RUST_LOG is not set.
    pub level: String,
    /// Directory for the rolling log file; defaults to "logs".
    pub log_directory: Option<String>,
    /// Emit per-frame render timings (debug builds only).
    pub enable_performance_metrics: bool,
    /// Per-module level overrides appended to the filter.
    pub module_levels: Vec<(String, String)>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            log_directory: None,
            enable_performance_metrics: false,
            module_levels: Vec::new(),
        }
    }
}

/// Key chords from config, merged over the compiled-in defaults.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct KeyBindingConfig {
    pub global: HashMap<String, Action>,
    pub wall: HashMap<String, Action>,
    pub spotlight: HashMap<String, Action>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            theme_name: "Blossom Dark".to_string(),
            theme_file: "./themes".to_string(),
            testimonials_file: "testimonials.ron".to_string(),
            reduced_motion: None,
            marquee: MarqueeConfig::default(),
            spotlight: SpotlightConfig::default(),
            logging: LoggingConfig::default(),
            keybindings: None,
        }
    }
}

impl AppConfig {
    pub fn load() -> Self {
        // config.ron in the working directory, next to the executable, or
        // in the user config directory.
        let mut candidates = Vec::new();
        candidates.push(PathBuf::from("config.ron"));

        if let Ok(exe) = std::env::current_exe()
            && let Some(dir) = exe.parent()
        {
            candidates.push(dir.join("config.ron"));
        }

        if let Some(dir) = dirs::config_dir() {
            candidates.push(dir.join("tui-marquee").join("config.ron"));
        }

        for path in candidates {
            if path.exists()
                && let Ok(content) = fs::read_to_string(&path)
            {
                match ron::from_str::<AppConfig>(&content) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {}", path.display());
                        return config;
                    }
                    Err(e) => {
                        tracing::error!("Failed to parse config at {}: {}", path.display(), e);
                    }
                }
            }
        }

        tracing::info!("No config file found, using defaults");
        Self::default()
    }

    pub fn save(&self) {
        self.save_to(PathBuf::from("config.ron"));
    }

    /// Save, preserving any comments in an existing file by rewriting only
    /// the toggled keys in place.
    pub fn save_to(&self, path: PathBuf) {
        let existing_content = fs::read_to_string(&path).unwrap_or_default();

        if existing_content.is_empty() {
            let pretty = ron::ser::PrettyConfig::default()
                .depth_limit(3)
                .separate_tuple_members(true);

            match ron::ser::to_string_pretty(self, pretty) {
                Ok(content) => {
                    if let Err(e) = fs::write(&path, content) {
                        tracing::error!("Failed to write config to {}: {}", path.display(), e);
                    } else {
                        tracing::info!("Saved config to {}", path.display());
                    }
                }
                Err(e) => {
                    tracing::error!("Failed to serialize config: {}", e);
                }
            }
            return;
        }

        let mut new_content = existing_content.clone();

        // Matches `key: "value"`
        let replace_str = |content: &mut String, key: &str, value: &str| {
            let re = RegexBuilder::new(&format!(r#"(\s*{}\s*:\s*)"[^"]*""#, regex::escape(key)))
                .build()
                .expect("static regex");
            *content = re
                .replace_all(content, format!(r#"${{1}}"{}""#, value))
                .to_string();
        };

        // Matches `key: value` for bare literals
        let replace_val = |content: &mut String, key: &str, value: String| {
            let re = RegexBuilder::new(&format!(r#"(\s*{}\s*:\s*)[^,\s)]+"#, regex::escape(key)))
                .build()
                .expect("static regex");
            *content = re
                .replace_all(content, format!(r#"${{1}}{}"#, value))
                .to_string();
        };

        replace_str(&mut new_content, "theme_name", &self.theme_name);
        replace_str(&mut new_content, "theme_file", &self.theme_file);
        replace_val(&mut new_content, "motion", self.marquee.motion.to_string());
        replace_val(&mut new_content, "columns", self.marquee.columns.to_string());
        replace_val(&mut new_content, "autoplay", self.spotlight.autoplay.to_string());

        if let Err(e) = fs::write(&path, new_content) {
            tracing::error!("Failed to update config at {}: {}", path.display(), e);
        } else {
            tracing::info!("Updated config at {} (preserving comments)", path.display());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::internal::marquee::MotionMode;
    use std::io::Write;

    #[test]
    fn test_save_preserves_comments() {
        let temp_dir = std::env::temp_dir();
        let config_path = temp_dir.join("tui_marquee_config_comments.ron");

        let initial_content = r#"(
    // Wall settings
    theme_name: "Old Theme",
    theme_file: "./themes",
    marquee: (
        columns: 3,
        motion: Wrap,
    ),
)"#;

        {
            let mut file = fs::File::create(&config_path).unwrap();
            file.write_all(initial_content.as_bytes()).unwrap();
        }

        let mut config: AppConfig = ron::from_str(initial_content).unwrap();
        config.theme_name = "Blossom Light".to_string();
        config.marquee.motion = MotionMode::Bounce;
        config.save_to(config_path.clone());

        let new_content = fs::read_to_string(&config_path).unwrap();
        assert!(new_content.contains("theme_name: \"Blossom Light\""));
        assert!(new_content.contains("motion: Bounce"));
        assert!(new_content.contains("// Wall settings"));

        let _ = fs::remove_file(config_path);
    }

    #[test]
    fn partial_config_fills_defaults() {
        let config: AppConfig = ron::from_str(r#"(theme_name: "Blossom Light")"#).unwrap();
        assert_eq!(config.theme_name, "Blossom Light");
        assert_eq!(config.marquee.columns, 3);
        assert!(config.spotlight.autoplay);
    }
}
