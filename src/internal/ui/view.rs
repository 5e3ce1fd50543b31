#![allow(clippy::single_match)]
use std::time::Instant;

use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph, Widget, Wrap},
};

use super::app::{App, ViewMode};
use super::card::TestimonialCard;
use crate::internal::marquee::layout::CardSlot;
use crate::internal::notification::NotificationKind;
use crate::internal::spotlight::Spotlight;
use crate::utils::avatar::AvatarArt;

#[tracing::instrument(skip(app, f))]
pub fn draw(app: &mut App, f: &mut Frame) {
    let start = Instant::now();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(f.area());

    render_top_bar(app, f, chunks[0]);

    match app.view_mode {
        ViewMode::Wall => {
            let view_start = Instant::now();
            render_wall(app, f, chunks[1]);
            if app.config.logging.enable_performance_metrics && cfg!(debug_assertions) {
                tracing::debug!(elapsed = ?view_start.elapsed(), view = "wall", "render.wall");
            }
        }
        ViewMode::Spotlight => {
            let view_start = Instant::now();
            render_spotlight(app, f, chunks[1]);
            if app.config.logging.enable_performance_metrics && cfg!(debug_assertions) {
                tracing::debug!(elapsed = ?view_start.elapsed(), view = "spotlight", "render.spotlight");
            }
        }
    }

    render_status_bar(app, f, chunks[2]);

    // Overlays
    if app.notification.is_some() {
        render_notification(app, f);
    }
    if app.show_help {
        render_help_overlay(app, f);
    }
    if app.log_viewer.visible {
        app.log_viewer.render(f, f.area());
    }

    if app.config.logging.enable_performance_metrics && cfg!(debug_assertions) {
        tracing::debug!(elapsed = ?start.elapsed(), "render.draw");
    }
}

fn render_top_bar(app: &App, f: &mut Frame, area: Rect) {
    let title = Line::from(vec![
        Span::styled(
            " Salon Supreme · Client Love ",
            Style::default()
                .fg(app.theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("v{} ", app.app_version),
            Style::default().fg(app.theme.role),
        ),
        Span::styled(
            format!("· {} ", app.view_mode),
            Style::default().fg(app.theme.foreground),
        ),
    ]);
    f.render_widget(
        Paragraph::new(title).style(Style::default().bg(app.theme.background)),
        area,
    );

    // The declared total; QA scripts match this against rendered cards.
    let counter = Paragraph::new(format!("{} reviews ", app.testimonials.len()))
        .alignment(Alignment::Right)
        .style(Style::default().fg(app.theme.role).bg(app.theme.background));
    f.render_widget(counter, area);
}

fn render_wall(app: &mut App, f: &mut Frame, area: Rect) {
    let layout = app
        .wall
        .layout(area.width, area.height, app.motion_pref, app.elapsed());

    f.render_widget(
        Block::default().style(Style::default().bg(app.theme.background)),
        area,
    );

    if layout.expected_cards == 0 {
        let empty = Paragraph::new("No testimonials yet")
            .alignment(Alignment::Center)
            .style(Style::default().fg(app.theme.role));
        let y = area.y + area.height / 2;
        f.render_widget(empty, Rect::new(area.x, y.min(area.bottom().saturating_sub(1)), area.width, 1));
        return;
    }

    let buf = f.buffer_mut();

    // Faint rules between columns, the wall's grid lines.
    let rule_style = Style::default().fg(app.theme.grid_line).add_modifier(Modifier::DIM);
    for column in &layout.columns {
        if column.index == 0 || column.x == 0 {
            continue;
        }
        let x = area.x + column.x - 1;
        for y in area.top()..area.bottom() {
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_symbol("┆");
                cell.set_style(rule_style);
            }
        }
    }

    for column in &layout.columns {
        let dimmed = column.depth_scale < 0.95;
        for slot in column.cards.iter().filter(|slot| slot.visible) {
            let card = TestimonialCard {
                item: &app.testimonials[slot.source],
                avatar: &app.avatars[slot.source],
                theme: &app.theme,
                dimmed,
            };
            blit_card(buf, area, slot, card);
        }
    }
}

/// Render a card into a scratch buffer and copy the rows that fall inside
/// the wall area. Cards animate partly offscreen; the frame buffer only
/// ever sees the visible band.
fn blit_card(buf: &mut Buffer, area: Rect, slot: &CardSlot, card: TestimonialCard) {
    let local = Rect::new(0, 0, slot.width, slot.height);
    let mut scratch = Buffer::empty(local);
    card.render(local, &mut scratch);

    for row in 0..slot.height {
        let dest_y = slot.y + row as i32;
        if dest_y < 0 || dest_y >= area.height as i32 {
            continue;
        }
        for col in 0..slot.width {
            let dest_x = area.x + slot.x + col;
            if dest_x >= area.right() {
                break;
            }
            if let (Some(src), Some(dst)) = (
                scratch.cell((col, row)),
                buf.cell_mut((dest_x, area.y + dest_y as u16)),
            ) {
                *dst = src.clone();
            }
        }
    }
}

fn render_spotlight(app: &mut App, f: &mut Frame, area: Rect) {
    f.render_widget(
        Block::default().style(Style::default().bg(app.theme.background)),
        area,
    );

    if app.testimonials.is_empty() {
        let empty = Paragraph::new("No testimonials yet")
            .alignment(Alignment::Center)
            .style(Style::default().fg(app.theme.role));
        let y = area.y + area.height / 2;
        f.render_widget(empty, Rect::new(area.x, y.min(area.bottom().saturating_sub(1)), area.width, 1));
        return;
    }

    let active = app.spotlight.active();
    let item = &app.testimonials[active];
    let art = &app.avatars[active];

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(30), Constraint::Min(0)])
        .margin(1)
        .split(area);

    render_spotlight_deck(app, f, body[0], active, art);

    // Right: name, role, staged quote, stars, position.
    let revealed = Spotlight::revealed_words(
        item.quote.split_whitespace().count(),
        app.motion_pref,
        app.spotlight_elapsed(),
    );
    let quote: String = item
        .quote
        .split_whitespace()
        .take(revealed)
        .collect::<Vec<_>>()
        .join(" ");

    let filled = item.stars() as usize;
    let mut lines = vec![
        Line::from(Span::styled(
            item.name.clone(),
            Style::default()
                .fg(app.theme.name)
                .add_modifier(Modifier::BOLD),
        )),
    ];
    if let Some(role) = &item.role {
        lines.push(Line::from(Span::styled(
            role.clone(),
            Style::default().fg(app.theme.role),
        )));
    }
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        quote,
        Style::default().fg(app.theme.quote),
    )));
    lines.push(Line::default());
    lines.push(Line::from(vec![
        Span::styled("★".repeat(filled), Style::default().fg(app.theme.star_filled)),
        Span::styled(
            "★".repeat(5 - filled),
            Style::default()
                .fg(app.theme.star_empty)
                .add_modifier(Modifier::DIM),
        ),
    ]));
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        format!(
            "{}/{} · autoplay {}",
            active + 1,
            app.testimonials.len(),
            match app.spotlight.autoplay {
                true => "on",
                false => "off",
            }
        ),
        Style::default().fg(app.theme.role),
    )));

    f.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: true }),
        body[1].inner(ratatui::layout::Margin {
            horizontal: 2,
            vertical: 1,
        }),
    );
}

/// The stacked-deck framing around the active avatar. Tilt angles are a
/// fixed hash of the card index, nudging the backdrop frames sideways.
fn render_spotlight_deck(app: &App, f: &mut Frame, area: Rect, active: usize, art: &AvatarArt) {
    let deck = Rect {
        x: area.x + 2,
        y: area.y + 1,
        width: area.width.saturating_sub(6).min(22),
        height: area.height.saturating_sub(3).min(11),
    };
    if deck.width < 8 || deck.height < 5 {
        return;
    }

    let len = app.testimonials.len();
    for (depth, neighbour) in [(2u16, active + 2), (1u16, active + 1)] {
        let tilt = Spotlight::tilt_for(neighbour % len.max(1));
        let shift_x = (tilt / 4).unsigned_abs() as u16 + depth;
        let shadow = Rect {
            x: deck.x + shift_x,
            y: deck.y + depth,
            width: deck.width,
            height: deck.height,
        };
        f.render_widget(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(
                    Style::default()
                        .fg(app.theme.grid_line)
                        .add_modifier(Modifier::DIM),
                ),
            shadow.intersection(area),
        );
    }

    let frame_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(app.theme.card_border))
        .style(Style::default().bg(app.theme.card_bg));
    let inner = frame_block.inner(deck);
    f.render_widget(Clear, deck);
    f.render_widget(frame_block, deck);

    let buf = f.buffer_mut();
    match art {
        AvatarArt::Image(rows) if !rows.is_empty() => {
            // Upscale the mosaic to fill the frame.
            let scale_x = (inner.width / rows[0].len().max(1) as u16).max(1);
            let scale_y = (inner.height / rows.len().max(1) as u16).max(1);
            for (row, pixels) in rows.iter().enumerate() {
                for (col, (upper, lower)) in pixels.iter().enumerate() {
                    for sy in 0..scale_y {
                        for sx in 0..scale_x {
                            let x = inner.x + col as u16 * scale_x + sx;
                            let y = inner.y + row as u16 * scale_y + sy;
                            if x < inner.right()
                                && y < inner.bottom()
                                && let Some(cell) = buf.cell_mut((x, y))
                            {
                                cell.set_symbol("▀");
                                cell.set_fg(*upper);
                                cell.set_bg(*lower);
                            }
                        }
                    }
                }
            }
        }
        AvatarArt::Initials(initials) => {
            let style = Style::default()
                .fg(app.theme.accent)
                .add_modifier(Modifier::BOLD);
            let x = inner.x + (inner.width.saturating_sub(initials.chars().count() as u16)) / 2;
            let y = inner.y + inner.height / 2;
            buf.set_string(x, y, initials, style);
        }
        AvatarArt::Image(_) => {}
    }
}

fn render_status_bar(app: &App, f: &mut Frame, area: Rect) {
    let hints = match app.view_mode {
        ViewMode::Wall => "q quit · v view · m motion · c columns · space pause · t theme · ? help",
        ViewMode::Spotlight => "q quit · v view · ←/→ browse · a autoplay · t theme · ? help",
    };
    f.render_widget(
        Paragraph::new(format!(" {}", hints))
            .style(Style::default().fg(app.theme.role).bg(app.theme.background)),
        area,
    );

    let mut badges: Vec<String> = Vec::new();
    if app.paused {
        badges.push("paused".to_string());
    }
    if app.motion_pref == crate::internal::marquee::MotionPreference::Reduced {
        badges.push("reduced motion".to_string());
    }
    badges.push(format!(
        "{} × {}",
        app.wall.motion(),
        app.wall.columns()
    ));
    badges.push(format!(
        "up {}",
        crate::utils::datetime::format_uptime(app.elapsed())
    ));
    badges.push(crate::utils::datetime::clock_hm());

    f.render_widget(
        Paragraph::new(format!("{} ", badges.join(" · ")))
            .alignment(Alignment::Right)
            .style(Style::default().fg(app.theme.role).bg(app.theme.background)),
        area,
    );
}

fn render_notification(app: &App, f: &mut Frame) {
    let Some(notification) = &app.notification else {
        return;
    };

    let area = f.area();
    let width = (notification.message.chars().count() as u16 + 4).min(area.width.saturating_sub(2));
    let popup = Rect {
        x: area.right().saturating_sub(width + 1),
        y: area.bottom().saturating_sub(4),
        width,
        height: 3,
    };

    let border_color = match notification.kind {
        NotificationKind::Info => app.theme.accent,
        NotificationKind::Warning => ratatui::style::Color::Yellow,
        NotificationKind::Error => ratatui::style::Color::Red,
    };

    f.render_widget(Clear, popup);
    f.render_widget(
        Paragraph::new(notification.message.clone()).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border_color))
                .padding(Padding::horizontal(1)),
        ),
        popup,
    );
}

fn render_help_overlay(app: &App, f: &mut Frame) {
    let area = f.area();
    let width = 52.min(area.width.saturating_sub(4));
    let height = 16.min(area.height.saturating_sub(2));
    let popup = Rect {
        x: (area.width.saturating_sub(width)) / 2,
        y: (area.height.saturating_sub(height)) / 2,
        width,
        height,
    };

    let rows = [
        ("q / Esc", "quit"),
        ("v", "switch wall / spotlight"),
        ("m", "toggle wrap / bounce motion"),
        ("c", "cycle 3 / 5 / 6 columns"),
        ("space", "pause the wall"),
        ("←/→ or h/l", "previous / next testimonial"),
        ("a", "toggle autoplay"),
        ("t", "switch theme"),
        ("R", "toggle reduced motion"),
        ("r", "reload testimonials"),
        ("L", "log viewer"),
        ("?", "this help"),
    ];
    let lines: Vec<Line> = rows
        .iter()
        .map(|(key, what)| {
            Line::from(vec![
                Span::styled(
                    format!("{:>12}  ", key),
                    Style::default().fg(app.theme.accent),
                ),
                Span::styled(*what, Style::default().fg(app.theme.foreground)),
            ])
        })
        .collect();

    f.render_widget(Clear, popup);
    f.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Keys ")
                .border_style(Style::default().fg(app.theme.border))
                .padding(Padding::new(2, 2, 1, 1)),
        ),
        popup,
    );
}
