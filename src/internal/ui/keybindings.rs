use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

use crate::config::KeyBindingConfig;
use crate::internal::ui::app::Action;

/// Context a key arrives in; context bindings win over global ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyBindingContext {
    Global,
    Wall,
    Spotlight,
}

/// Maps key events to actions.
#[derive(Debug, Clone, Default)]
pub struct KeyBindingMap {
    global: HashMap<KeyEvent, Action>,
    wall: HashMap<KeyEvent, Action>,
    spotlight: HashMap<KeyEvent, Action>,
}

impl KeyBindingMap {
    /// The compiled-in bindings.
    pub fn defaults() -> Self {
        let mut map = Self::default();
        let mut bind = |ctx, key: &str, action| {
            if let Some(event) = parse_key_str(key) {
                map.add_binding(ctx, event, action);
            }
        };

        bind(KeyBindingContext::Global, "q", Action::Quit);
        bind(KeyBindingContext::Global, "Esc", Action::Quit);
        bind(KeyBindingContext::Global, "?", Action::ToggleHelp);
        bind(KeyBindingContext::Global, "L", Action::ToggleLogViewer);
        bind(KeyBindingContext::Global, "t", Action::SwitchTheme);
        bind(KeyBindingContext::Global, "v", Action::ToggleView);
        bind(KeyBindingContext::Global, "r", Action::ReloadData);
        bind(KeyBindingContext::Global, "R", Action::ToggleReducedMotion);

        bind(KeyBindingContext::Wall, "m", Action::ToggleMotion);
        bind(KeyBindingContext::Wall, "c", Action::CycleColumns);
        bind(KeyBindingContext::Wall, " ", Action::TogglePause);

        bind(KeyBindingContext::Spotlight, "Right", Action::NextTestimonial);
        bind(KeyBindingContext::Spotlight, "l", Action::NextTestimonial);
        bind(KeyBindingContext::Spotlight, "Left", Action::PrevTestimonial);
        bind(KeyBindingContext::Spotlight, "h", Action::PrevTestimonial);
        bind(KeyBindingContext::Spotlight, "a", Action::ToggleAutoplay);

        map
    }

    /// Context-specific binding first, then the global fallback.
    pub fn get_action(&self, key: &KeyEvent, context: KeyBindingContext) -> Option<Action> {
        let context_map = match context {
            KeyBindingContext::Global => &self.global,
            KeyBindingContext::Wall => &self.wall,
            KeyBindingContext::Spotlight => &self.spotlight,
        };

        context_map
            .get(key)
            .or_else(|| self.global.get(key))
            .copied()
    }

    pub fn add_binding(&mut self, context: KeyBindingContext, key: KeyEvent, action: Action) {
        let map = match context {
            KeyBindingContext::Global => &mut self.global,
            KeyBindingContext::Wall => &mut self.wall,
            KeyBindingContext::Spotlight => &mut self.spotlight,
        };
        map.insert(key, action);
    }

    /// Merge custom keybindings from configuration.
    pub fn merge_config(&mut self, config: &KeyBindingConfig) {
        let mut merge = |ctx: KeyBindingContext, bindings: &HashMap<String, Action>| {
            for (key_str, action) in bindings {
                match parse_key_str(key_str) {
                    Some(key_event) => self.add_binding(ctx, key_event, *action),
                    None => tracing::warn!("Invalid key string in config: {}", key_str),
                }
            }
        };

        merge(KeyBindingContext::Global, &config.global);
        merge(KeyBindingContext::Wall, &config.wall);
        merge(KeyBindingContext::Spotlight, &config.spotlight);
    }
}

/// Parse a key string into a KeyEvent.
/// Supported formats:
/// - Single char: "j", "k", "1", " "
/// - Special keys: "Enter", "Tab", "Esc", "Up", "Down", "Left", "Right"
/// - With modifiers: "Ctrl+C", "Shift+Tab"
pub fn parse_key_str(key_str: &str) -> Option<KeyEvent> {
    let parts: Vec<&str> = key_str.split('+').collect();

    let mut modifiers = KeyModifiers::empty();
    let key_part = if parts.len() > 1 {
        for modifier in &parts[..parts.len() - 1] {
            match modifier.to_lowercase().as_str() {
                "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                "alt" => modifiers |= KeyModifiers::ALT,
                _ => return None,
            }
        }
        parts[parts.len() - 1]
    } else {
        parts[0]
    };

    let code = match key_part {
        "Enter" => KeyCode::Enter,
        "Tab" => KeyCode::Tab,
        "Esc" => KeyCode::Esc,
        "Up" => KeyCode::Up,
        "Down" => KeyCode::Down,
        "Left" => KeyCode::Left,
        "Right" => KeyCode::Right,
        "Backspace" => KeyCode::Backspace,
        "Home" => KeyCode::Home,
        "End" => KeyCode::End,
        s if s.chars().count() == 1 => KeyCode::Char(s.chars().next()?),
        _ => return None,
    };

    Some(KeyEvent::new(code, modifiers))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_char() {
        let key = parse_key_str("m").unwrap();
        assert_eq!(key.code, KeyCode::Char('m'));
        assert_eq!(key.modifiers, KeyModifiers::empty());
    }

    #[test]
    fn parses_special_key_and_modifier() {
        assert_eq!(parse_key_str("Left").unwrap().code, KeyCode::Left);
        let key = parse_key_str("Ctrl+C").unwrap();
        assert_eq!(key.code, KeyCode::Char('C'));
        assert!(key.modifiers.contains(KeyModifiers::CONTROL));
    }

    #[test]
    fn rejects_unknown_chords() {
        assert!(parse_key_str("Hyper+x").is_none());
        assert!(parse_key_str("NotAKey").is_none());
    }

    #[test]
    fn context_binding_overrides_global() {
        let mut map = KeyBindingMap::default();
        let key = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::empty());

        map.add_binding(KeyBindingContext::Global, key, Action::Quit);
        map.add_binding(KeyBindingContext::Spotlight, key, Action::NextTestimonial);

        assert!(matches!(
            map.get_action(&key, KeyBindingContext::Spotlight),
            Some(Action::NextTestimonial)
        ));
        assert!(matches!(
            map.get_action(&key, KeyBindingContext::Wall),
            Some(Action::Quit)
        ));
    }

    #[test]
    fn config_merge_overrides_defaults() {
        let mut map = KeyBindingMap::defaults();
        let mut config = KeyBindingConfig::default();
        config
            .global
            .insert("q".to_string(), Action::ToggleHelp);
        map.merge_config(&config);

        let q = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::empty());
        assert!(matches!(
            map.get_action(&q, KeyBindingContext::Wall),
            Some(Action::ToggleHelp)
        ));
    }
}
