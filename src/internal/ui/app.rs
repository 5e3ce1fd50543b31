#![allow(clippy::single_match)]
use anyhow::Result;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};
use tokio::sync::mpsc;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tokio_util::sync::CancellationToken;

use crate::config::AppConfig;
use crate::internal::data;
use crate::internal::marquee::{MotionPreference, Wall, cycle_columns};
use crate::internal::models::Testimonial;
use crate::internal::notification::Notification;
use crate::internal::spotlight::Spotlight;
use crate::internal::ui::keybindings::{KeyBindingContext, KeyBindingMap};
use crate::internal::ui::log_viewer::LogViewer;
use crate::utils::avatar::{self, AvatarArt};
use crate::utils::theme_loader::TuiTheme;

/// Application view modes.
#[derive(Debug, PartialEq, Clone, Copy, Display, EnumIter)]
pub enum ViewMode {
    Wall,
    Spotlight,
}

impl ViewMode {
    fn next(self) -> Self {
        let modes: Vec<ViewMode> = ViewMode::iter().collect();
        let pos = modes.iter().position(|m| *m == self).unwrap_or(0);
        modes[(pos + 1) % modes.len()]
    }
}

/// Actions/messages sent through the app action channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Quit,
    ToggleHelp,
    ToggleLogViewer,
    SwitchTheme,
    ToggleView,
    ToggleMotion,
    CycleColumns,
    TogglePause,
    ToggleAutoplay,
    NextTestimonial,
    PrevTestimonial,
    ToggleReducedMotion,
    ReloadData,
    ClearNotification,
}

/// Main application state.
pub struct App {
    pub running: bool,
    pub app_version: String,
    pub view_mode: ViewMode,
    pub config: AppConfig,
    pub theme: TuiTheme,
    pub available_themes: Vec<(String, String)>,
    pub current_theme_index: usize,
    pub terminal_mode: String,
    pub testimonials: Vec<Testimonial>,
    pub avatars: Vec<AvatarArt>,
    pub wall: Wall,
    pub spotlight: Spotlight,
    pub motion_pref: MotionPreference,
    pub paused: bool,
    pub notification: Option<Notification>,
    pub show_help: bool,
    pub keybindings: KeyBindingMap,
    pub log_viewer: LogViewer,
    pub action_tx: UnboundedSender<Action>,
    action_rx: UnboundedReceiver<Action>,
    autoplay_guard: Option<CancellationToken>,
    /// Animation clock origin; shifted forward on unpause so paused time
    /// never elapses.
    epoch: Instant,
    paused_at: Option<Instant>,
    spotlight_changed_at: Instant,
}

impl App {
    #[tracing::instrument]
    pub fn new() -> Self {
        let start = Instant::now();
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let config = AppConfig::load();

        let terminal_mode = Self::detect_terminal_mode();
        let available_themes = Self::discover_all_themes(&config.theme_file);
        tracing::info!(
            "Theme setup: name='{}', mode={}, {} candidates",
            config.theme_name,
            terminal_mode,
            available_themes.len()
        );
        let (theme, current_theme_index) =
            Self::select_theme(&config, &available_themes, &terminal_mode);

        let motion_pref = Self::resolve_motion_preference(&config);
        if motion_pref == MotionPreference::Reduced {
            tracing::info!("Reduced motion requested; wall renders statically");
        }

        let testimonials = data::load_testimonials(&config.testimonials_file);
        let avatars = Self::load_avatars(&testimonials);

        let wall = Wall::new(config.marquee.clone(), testimonials.len());
        let spotlight = Spotlight::new(
            testimonials.len(),
            config.spotlight.autoplay,
            Duration::from_millis(config.spotlight.interval_ms.max(250)),
        );

        let log_dir = config.logging.log_directory.as_deref().unwrap_or("logs");
        let log_viewer = LogViewer::new(log_dir.to_string());

        let mut keybindings = KeyBindingMap::defaults();
        if let Some(custom_bindings) = &config.keybindings {
            keybindings.merge_config(custom_bindings);
        }

        tracing::info!(elapsed = ?start.elapsed(), "App initialized");

        Self {
            running: true,
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            view_mode: ViewMode::Wall,
            config,
            theme,
            available_themes,
            current_theme_index,
            terminal_mode,
            testimonials,
            avatars,
            wall,
            spotlight,
            motion_pref,
            paused: false,
            notification: None,
            show_help: false,
            keybindings,
            log_viewer,
            action_tx,
            action_rx,
            autoplay_guard: None,
            epoch: Instant::now(),
            paused_at: None,
            spotlight_changed_at: Instant::now(),
        }
    }

    /// Animation time: monotonic elapsed, excluding paused stretches.
    pub fn elapsed(&self) -> Duration {
        match self.paused_at {
            Some(paused_at) => paused_at.duration_since(self.epoch),
            None => self.epoch.elapsed(),
        }
    }

    /// Time since the spotlight's active card changed (drives the reveal).
    pub fn spotlight_elapsed(&self) -> Duration {
        self.spotlight_changed_at.elapsed()
    }

    pub fn notify_info(&mut self, message: impl Into<String>) {
        self.notification = Some(Notification::info(message));
    }

    pub fn notify_error(&mut self, message: impl Into<String>) {
        self.notification = Some(Notification::error(message));
    }

    /// Resolve the reduced-motion capability once; the engine only ever
    /// sees the result.
    fn resolve_motion_preference(config: &AppConfig) -> MotionPreference {
        let reduced = match config.reduced_motion {
            Some(value) => value,
            None => std::env::var("REDUCED_MOTION")
                .map(|v| v != "0" && !v.is_empty())
                .unwrap_or(false),
        };
        match reduced {
            true => MotionPreference::Reduced,
            false => MotionPreference::Full,
        }
    }

    fn load_avatars(testimonials: &[Testimonial]) -> Vec<AvatarArt> {
        testimonials
            .iter()
            .map(|t| avatar::load(t.avatar.as_deref(), &t.initials()))
            .collect()
    }

    /// Detect terminal background mode (light or dark) from COLORFGBG.
    fn detect_terminal_mode() -> String {
        if let Ok(colorfgbg) = std::env::var("COLORFGBG") {
            let parts: Vec<&str> = colorfgbg.split(';').collect();
            if parts.len() >= 2
                && let Ok(bg) = parts.last().unwrap_or(&"").parse::<u8>()
            {
                return match bg {
                    0..=6 => "dark".to_string(),
                    _ => "light".to_string(),
                };
            }
        }
        // Dark is the more common terminal default.
        "dark".to_string()
    }

    fn discover_all_themes(configured: &str) -> Vec<(String, String)> {
        // Candidates in priority order: configured path, ./themes, themes
        // next to the executable. Each JSON file contributes a dark and a
        // light entry.
        let mut themes = Vec::new();
        let mut candidates: Vec<PathBuf> = Vec::new();

        if !configured.trim().is_empty() {
            candidates.push(PathBuf::from(configured));
        }
        candidates.push(PathBuf::from("themes"));
        if let Ok(exe) = std::env::current_exe()
            && let Some(dir) = exe.parent()
        {
            candidates.push(dir.join("themes"));
        }

        for cand in candidates {
            if !cand.exists() {
                continue;
            }
            match (cand.is_file(), std::fs::read_dir(&cand)) {
                (true, _) => Self::push_theme_file(&mut themes, &cand),
                (false, Ok(entries)) => {
                    for entry in entries.flatten() {
                        Self::push_theme_file(&mut themes, &entry.path());
                    }
                }
                _ => {}
            }
        }

        let mut seen = std::collections::HashSet::new();
        themes.retain(|(p, mode): &(String, String)| seen.insert(format!("{}:{}", p, mode)));
        themes
    }

    fn push_theme_file(themes: &mut Vec<(String, String)>, path: &Path) {
        if path.extension().and_then(|s| s.to_str()) == Some("json")
            && let Some(filename) = path.to_str()
        {
            themes.push((filename.to_string(), "dark".to_string()));
            themes.push((filename.to_string(), "light".to_string()));
        }
    }

    /// Pick the theme the config asks for: an explicit "Dark"/"Light" token
    /// in the name wins, otherwise the detected terminal mode decides.
    pub fn select_theme(
        config: &AppConfig,
        available_themes: &[(String, String)],
        terminal_mode: &str,
    ) -> (TuiTheme, usize) {
        if available_themes.is_empty() {
            return (TuiTheme::default(), 0);
        }

        let raw = config.theme_name.trim();
        let lowered = raw.to_lowercase();
        let (target_stem, target_mode) = match (lowered.ends_with(" dark"), lowered.ends_with(" light")) {
            (true, _) => (lowered.trim_end_matches(" dark").to_string(), "dark"),
            (_, true) => (lowered.trim_end_matches(" light").to_string(), "light"),
            _ => (lowered.clone(), terminal_mode),
        };

        let index = available_themes
            .iter()
            .position(|(path, mode)| {
                let stem = Path::new(path)
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or_default()
                    .to_lowercase();
                mode == target_mode && (target_stem.is_empty() || stem == target_stem)
            })
            .or_else(|| available_themes.iter().position(|(_, mode)| mode == target_mode))
            .unwrap_or(0);

        match available_themes.get(index) {
            Some((path, mode)) => match crate::utils::theme_loader::load_theme(
                Path::new(path),
                mode,
                config.logging.enable_performance_metrics,
            ) {
                Ok(theme) => (theme, index),
                Err(e) => {
                    tracing::error!("Failed to load theme '{}': {}", path, e);
                    (TuiTheme::default(), 0)
                }
            },
            None => (TuiTheme::default(), 0),
        }
    }

    pub async fn run(&mut self, mut tui: crate::tui::Tui) -> Result<()> {
        let mut frame_interval = tokio::time::interval(std::time::Duration::from_millis(16));

        loop {
            // Auto-dismiss expired notifications
            if let Some(notification) = &self.notification
                && notification.should_dismiss()
            {
                self.notification = None;
            }

            tui.draw(|f| crate::internal::ui::view::draw(self, f))?;

            tokio::select! {
                _ = frame_interval.tick() => {
                    if event::poll(std::time::Duration::from_millis(0))? {
                        match event::read()? {
                            Event::Key(key) if key.kind == KeyEventKind::Press => {
                                self.handle_key_event(key);
                            }
                            Event::Resize(width, height) => {
                                tracing::debug!(width, height, "Terminal resized, re-measuring");
                                self.wall.on_resize();
                            }
                            _ => {}
                        }
                    }
                }
                Some(action) = self.action_rx.recv() => {
                    self.handle_action(action);
                }
            }

            if !self.running {
                break;
            }
        }

        self.stop_autoplay();
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        // The log viewer traps input while visible
        if self.log_viewer.visible {
            match key.code {
                KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('L') => self.log_viewer.toggle(),
                KeyCode::Char('j') | KeyCode::Down => self.log_viewer.scroll_down(),
                KeyCode::Char('k') | KeyCode::Up => self.log_viewer.scroll_up(),
                KeyCode::Char('G') => self.log_viewer.scroll_to_bottom(),
                _ => {}
            }
            return;
        }

        let context = match self.view_mode {
            ViewMode::Wall => KeyBindingContext::Wall,
            ViewMode::Spotlight => KeyBindingContext::Spotlight,
        };
        if let Some(action) = self.keybindings.get_action(&key, context) {
            let _ = self.action_tx.send(action);
        }
    }

    fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => {
                self.running = false;
            }
            Action::ToggleHelp => {
                self.show_help = !self.show_help;
            }
            Action::ToggleLogViewer => {
                self.log_viewer.toggle();
            }
            Action::SwitchTheme => self.switch_theme(),
            Action::ToggleView => {
                self.view_mode = self.view_mode.next();
                // The autoplay timer only lives while the spotlight does.
                match self.view_mode {
                    ViewMode::Spotlight if self.spotlight.autoplay => self.spawn_autoplay(),
                    _ => self.stop_autoplay(),
                }
            }
            Action::ToggleMotion => {
                let motion = self.wall.motion().toggled();
                self.wall.set_motion(motion);
                self.config.marquee.motion = motion;
                self.config.save();
                self.notify_info(format!("Motion: {}", motion));
            }
            Action::CycleColumns => {
                let columns = cycle_columns(self.wall.columns());
                self.wall.set_columns(columns);
                self.config.marquee.columns = columns;
                self.config.save();
                self.notify_info(format!("Columns: {}", columns));
            }
            Action::TogglePause => match self.paused_at.take() {
                Some(paused_at) => {
                    self.epoch += paused_at.elapsed();
                    self.paused = false;
                }
                None => {
                    self.paused_at = Some(Instant::now());
                    self.paused = true;
                }
            },
            Action::ToggleAutoplay => {
                self.spotlight.autoplay = !self.spotlight.autoplay;
                self.config.spotlight.autoplay = self.spotlight.autoplay;
                match self.spotlight.autoplay {
                    true => {
                        // The timer itself only runs while the spotlight is
                        // on screen.
                        if self.view_mode == ViewMode::Spotlight {
                            self.spawn_autoplay();
                        }
                        self.notify_info("Autoplay on");
                    }
                    false => {
                        self.stop_autoplay();
                        self.notify_info("Autoplay off");
                    }
                }
            }
            Action::NextTestimonial => {
                self.spotlight.next();
                self.spotlight_changed_at = Instant::now();
            }
            Action::PrevTestimonial => {
                self.spotlight.prev();
                self.spotlight_changed_at = Instant::now();
            }
            Action::ToggleReducedMotion => {
                self.motion_pref = match self.motion_pref {
                    MotionPreference::Full => MotionPreference::Reduced,
                    MotionPreference::Reduced => MotionPreference::Full,
                };
                let label = match self.motion_pref {
                    MotionPreference::Reduced => "Reduced motion on",
                    MotionPreference::Full => "Reduced motion off",
                };
                self.notify_info(label);
            }
            Action::ReloadData => self.reload_data(),
            Action::ClearNotification => {
                self.notification = None;
            }
        }
    }

    fn switch_theme(&mut self) {
        if self.available_themes.is_empty() {
            self.notify_error("No theme files found");
            return;
        }
        self.current_theme_index = (self.current_theme_index + 1) % self.available_themes.len();
        let (path, mode) = self.available_themes[self.current_theme_index].clone();
        match crate::utils::theme_loader::load_theme(
            Path::new(&path),
            &mode,
            self.config.logging.enable_performance_metrics,
        ) {
            Ok(theme) => {
                self.theme = theme;
                self.config.theme_name = crate::utils::theme::toggle_dark_light(
                    &self.config.theme_name,
                    Some(mode == "light"),
                );
                self.config.save();
                let stem = Path::new(&path)
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("theme");
                self.notify_info(format!("Theme: {} ({})", stem, mode));
            }
            Err(e) => {
                tracing::error!("Failed to load theme '{}': {}", path, e);
                self.notify_error("Theme failed to load");
            }
        }
    }

    fn reload_data(&mut self) {
        let testimonials = data::load_testimonials(&self.config.testimonials_file);
        self.avatars = Self::load_avatars(&testimonials);
        self.wall.set_item_count(testimonials.len());
        self.spotlight.set_len(testimonials.len());
        self.spotlight_changed_at = Instant::now();
        let count = testimonials.len();
        self.testimonials = testimonials;
        self.notify_info(format!("Loaded {} testimonials", count));
    }

    /// Spawn the autoplay timer task. The token cancels it when autoplay is
    /// turned off, the spotlight unmounts, or the app exits.
    fn spawn_autoplay(&mut self) {
        self.stop_autoplay();
        let token = CancellationToken::new();
        let guard = token.clone();
        let tx = self.action_tx.clone();
        let interval = self.spotlight.interval;
        tokio::spawn(async move {
            let mut timer = tokio::time::interval(interval);
            // The first tick fires immediately; skip it so the opening card
            // gets its full stay.
            timer.tick().await;
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = timer.tick() => {
                        if tx.send(Action::NextTestimonial).is_err() {
                            break;
                        }
                    }
                }
            }
        });
        self.autoplay_guard = Some(guard);
    }

    fn stop_autoplay(&mut self) {
        if let Some(token) = self.autoplay_guard.take() {
            token.cancel();
        }
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.stop_autoplay();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    #[test]
    fn explicit_config_wins_over_environment() {
        let config = AppConfig {
            reduced_motion: Some(true),
            ..AppConfig::default()
        };
        assert_eq!(
            App::resolve_motion_preference(&config),
            MotionPreference::Reduced
        );

        let config = AppConfig {
            reduced_motion: Some(false),
            ..AppConfig::default()
        };
        assert_eq!(
            App::resolve_motion_preference(&config),
            MotionPreference::Full
        );
    }

    #[test]
    fn theme_selection_with_no_candidates_uses_default() {
        let config = AppConfig::default();
        let (theme, index) = App::select_theme(&config, &[], "dark");
        assert_eq!(index, 0);
        // Default palette renders on any terminal
        assert_eq!(theme.background, ratatui::style::Color::Reset);
    }
}
