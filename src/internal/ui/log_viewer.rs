use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};
use regex::Regex;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

const TAIL_LINES: usize = 500;

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: String,
    pub level: String,
    pub message: String,
}

/// Overlay tailing the rolling log file.
pub struct LogViewer {
    pub visible: bool,
    pub entries: Vec<LogEntry>,
    pub scroll: u16,
    log_dir: String,
}

impl LogViewer {
    pub fn new(log_dir: String) -> Self {
        Self {
            visible: false,
            entries: Vec::new(),
            scroll: 0,
            log_dir,
        }
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
        if self.visible {
            self.load_logs();
            self.scroll_to_bottom();
        }
    }

    pub fn load_logs(&mut self) {
        // tracing-appender's daily rotation: tui-marquee.log.YYYY-MM-DD
        let date_str = jiff::Zoned::now()
            .with_time_zone(jiff::tz::TimeZone::UTC)
            .strftime("%Y-%m-%d")
            .to_string();
        let path = Path::new(&self.log_dir).join(format!("tui-marquee.log.{}", date_str));
        if !path.exists() {
            return;
        }

        let Ok(file) = File::open(path) else {
            return;
        };
        // Example line: 2026-08-07T09:30:15.123456Z INFO module: message
        let re = Regex::new(r"^(\S+)\s+(\w+)\s+(.*)$").expect("static regex");

        let lines: Vec<String> = BufReader::new(file)
            .lines()
            .map_while(Result::ok)
            .collect();
        self.entries = lines
            .iter()
            .rev()
            .take(TAIL_LINES)
            .rev()
            .map(|line| match re.captures(line) {
                Some(caps) => LogEntry {
                    timestamp: caps[1].to_string(),
                    level: caps[2].to_string(),
                    message: caps[3].to_string(),
                },
                None => LogEntry {
                    timestamp: String::new(),
                    level: "UNKNOWN".to_string(),
                    message: line.clone(),
                },
            })
            .collect();
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        self.scroll += 1;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll = self.entries.len().saturating_sub(20) as u16;
    }

    pub fn render(&self, f: &mut Frame, area: Rect) {
        if !self.visible {
            return;
        }

        let width = area.width * 90 / 100;
        let height = area.height * 80 / 100;
        let x = (area.width.saturating_sub(width)) / 2;
        let y = (area.height.saturating_sub(height)) / 2;
        let overlay = Rect::new(x, y, width, height);
        f.render_widget(Clear, overlay);

        let block = Block::default()
            .borders(Borders::ALL)
            .title("Logs (j/k: Scroll, Esc: Close)")
            .padding(Padding::horizontal(1));
        let inner = block.inner(overlay);
        f.render_widget(block, overlay);

        let lines: Vec<Line> = self
            .entries
            .iter()
            .skip(self.scroll as usize)
            .take(inner.height as usize)
            .map(|entry| {
                let level_style = match entry.level.as_str() {
                    "ERROR" => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    "WARN" => Style::default().fg(Color::Yellow),
                    "INFO" => Style::default().fg(Color::Blue),
                    "DEBUG" => Style::default().fg(Color::Green),
                    "TRACE" => Style::default().fg(Color::Magenta),
                    _ => Style::default(),
                };
                Line::from(vec![
                    Span::styled(
                        format!("{} ", entry.timestamp),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::styled(format!("{:5} ", entry.level), level_style),
                    Span::raw(&entry.message),
                ])
            })
            .collect();

        f.render_widget(Paragraph::new(lines), inner);
    }
}
