use anyhow::{Context, Result};
use ratatui::style::Color;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct ThemeFile {
    #[allow(dead_code)]
    pub name: String,
    pub themes: Vec<ThemeVariant>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ThemeVariant {
    #[allow(dead_code)]
    pub name: String,
    pub mode: String, // "light" or "dark"
    pub colors: HashMap<String, String>,
}

/// Resolved palette used by the renderer.
#[derive(Debug, Clone)]
pub struct TuiTheme {
    pub background: Color,
    pub foreground: Color,
    pub border: Color,
    pub card_bg: Color,
    pub card_border: Color,
    pub name: Color,
    pub role: Color,
    pub quote: Color,
    pub star_filled: Color,
    pub star_empty: Color,
    pub accent: Color,
    pub grid_line: Color,
}

impl Default for TuiTheme {
    fn default() -> Self {
        Self {
            background: Color::Reset,
            foreground: Color::Reset,
            border: Color::White,
            card_bg: Color::Reset,
            card_border: Color::Magenta,
            name: Color::White,
            role: Color::DarkGray,
            quote: Color::Gray,
            star_filled: Color::Magenta,
            star_empty: Color::DarkGray,
            accent: Color::Magenta,
            grid_line: Color::DarkGray,
        }
    }
}

#[tracing::instrument(skip(path, mode), fields(path = ?path, mode = %mode))]
pub fn load_theme(path: &Path, mode: &str, enable_performance_metrics: bool) -> Result<TuiTheme> {
    let start = std::time::Instant::now();
    let content = fs::read_to_string(path).context("Failed to read theme file")?;
    let theme_file: ThemeFile =
        serde_json::from_str(&content).context("Failed to parse theme JSON")?;

    let variant = theme_file
        .themes
        .iter()
        .find(|t| t.mode == mode)
        .or_else(|| theme_file.themes.first())
        .context("No matching theme variant found")?;

    let pick = |keys: &[&str], fallback: &str| -> Color {
        keys.iter()
            .find_map(|key| variant.colors.get(*key))
            .map(|hex| parse_color(hex))
            .unwrap_or_else(|| parse_color(fallback))
    };

    let theme = TuiTheme {
        background: pick(&["background"], "#000000"),
        foreground: pick(&["foreground"], "#ffffff"),
        border: pick(&["border"], "#ffffff"),
        card_bg: pick(&["card.background", "surface.background"], "#1a1118"),
        card_border: pick(&["card.border", "accent.foreground"], "#ff1493"),
        name: pick(&["card.name", "foreground"], "#ffffff"),
        role: pick(&["card.role", "muted.foreground"], "#808080"),
        quote: pick(&["card.quote", "foreground"], "#d0d0d0"),
        star_filled: pick(&["star.filled", "accent.foreground"], "#ff1493"),
        star_empty: pick(&["star.empty", "muted.foreground"], "#555555"),
        accent: pick(&["accent.foreground"], "#ff1493"),
        grid_line: pick(&["grid.line", "border"], "#333333"),
    };

    if enable_performance_metrics {
        tracing::debug!(elapsed = ?start.elapsed(), "Loaded theme");
    }

    Ok(theme)
}

fn parse_color(hex: &str) -> Color {
    if let Ok(c) = hex.parse::<Color>() {
        return c;
    }

    let hex = hex.trim_start_matches('#');
    match hex.len() {
        6 | 8 => {
            // 8-char hex carries alpha; use the RGB components only.
            let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(0);
            let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(0);
            let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(0);
            Color::Rgb(r, g, b)
        }
        _ => Color::Reset,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parse_color_accepts_hex_and_alpha_hex() {
        assert_eq!(parse_color("#ff1493"), Color::Rgb(255, 20, 147));
        assert_eq!(parse_color("#ff1493cc"), Color::Rgb(255, 20, 147));
        assert_eq!(parse_color("#xyz"), Color::Reset);
    }

    #[test]
    fn loads_matching_variant() {
        let path = std::env::temp_dir().join("tui_marquee_theme_test.json");
        {
            let mut file = fs::File::create(&path).unwrap();
            file.write_all(
                br##"{
  "name": "Test",
  "themes": [
    { "name": "Test Dark", "mode": "dark",
      "colors": { "background": "#101010", "star.filled": "#ff1493" } },
    { "name": "Test Light", "mode": "light",
      "colors": { "background": "#fafafa" } }
  ]
}"##,
            )
            .unwrap();
        }

        let dark = load_theme(&path, "dark", false).unwrap();
        assert_eq!(dark.background, Color::Rgb(16, 16, 16));
        assert_eq!(dark.star_filled, Color::Rgb(255, 20, 147));

        let light = load_theme(&path, "light", false).unwrap();
        assert_eq!(light.background, Color::Rgb(250, 250, 250));

        let _ = fs::remove_file(path);
    }
}
