//! The testimonial card widget.
//!
//! Cards have a fixed footprint per motion variant; whatever happens inside
//! (avatar fallback, long quotes, missing roles) the bounding box never
//! changes. Quotes clip to three lines, the star row always shows exactly
//! five glyphs.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Widget};

use crate::internal::models::Testimonial;
use crate::utils::avatar::{AVATAR_COLS, AVATAR_ROWS, AvatarArt};
use crate::utils::theme_loader::TuiTheme;

/// Quote lines a card shows before clipping.
pub const QUOTE_LINES: usize = 3;

pub struct TestimonialCard<'a> {
    pub item: &'a Testimonial,
    pub avatar: &'a AvatarArt,
    pub theme: &'a TuiTheme,
    /// Receding columns render dimmed.
    pub dimmed: bool,
}

impl TestimonialCard<'_> {
    fn styled(&self, base: Style) -> Style {
        match self.dimmed {
            true => base.add_modifier(Modifier::DIM),
            false => base,
        }
    }

    fn render_avatar(&self, x: u16, y: u16, buf: &mut Buffer) {
        match self.avatar {
            AvatarArt::Image(rows) => {
                for (row, pixels) in rows.iter().enumerate() {
                    for (col, (upper, lower)) in pixels.iter().enumerate() {
                        if let Some(cell) = buf.cell_mut((x + col as u16, y + row as u16)) {
                            cell.set_symbol("▀");
                            cell.set_fg(*upper);
                            cell.set_bg(*lower);
                        }
                    }
                }
            }
            AvatarArt::Initials(initials) => {
                let badge_style = self.styled(
                    Style::default()
                        .fg(self.theme.card_bg)
                        .bg(self.theme.accent)
                        .add_modifier(Modifier::BOLD),
                );
                for row in 0..AVATAR_ROWS {
                    buf.set_string(x, y + row, " ".repeat(AVATAR_COLS as usize), badge_style);
                }
                let pad = (AVATAR_COLS as usize).saturating_sub(initials.chars().count()) / 2;
                buf.set_stringn(
                    x + pad as u16,
                    y + AVATAR_ROWS / 2,
                    initials,
                    AVATAR_COLS as usize,
                    badge_style,
                );
            }
        }
    }
}

impl Widget for TestimonialCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Below this there is no room for even a clipped card.
        if area.width < 12 || area.height < 6 {
            return;
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.styled(Style::default().fg(self.theme.card_border)))
            .style(Style::default().bg(self.theme.card_bg));
        let inner = block.inner(area);
        block.render(area, buf);

        // Header: avatar mosaic or initials badge, name and role beside it.
        self.render_avatar(inner.x, inner.y, buf);

        let text_x = inner.x + AVATAR_COLS + 1;
        let text_width = inner.width.saturating_sub(AVATAR_COLS + 1) as usize;
        buf.set_stringn(
            text_x,
            inner.y,
            &self.item.name,
            text_width,
            self.styled(
                Style::default()
                    .fg(self.theme.name)
                    .add_modifier(Modifier::BOLD),
            ),
        );
        if let Some(role) = &self.item.role {
            buf.set_stringn(
                text_x,
                inner.y + 1,
                role,
                text_width,
                self.styled(Style::default().fg(self.theme.role)),
            );
        }

        // Quote: hard-clipped to QUOTE_LINES, never growing the card.
        let stars_y = inner.y + inner.height - 1;
        let quote_y = inner.y + AVATAR_ROWS + u16::from(inner.height > AVATAR_ROWS + 5);
        let quote_style = self.styled(Style::default().fg(self.theme.quote));
        let max_lines = (stars_y.saturating_sub(quote_y) as usize).min(QUOTE_LINES);
        for (line_no, line) in textwrap::wrap(&self.item.quote, inner.width.max(1) as usize)
            .iter()
            .take(max_lines)
            .enumerate()
        {
            buf.set_stringn(
                inner.x,
                quote_y + line_no as u16,
                line.as_ref(),
                inner.width as usize,
                quote_style,
            );
        }

        // Star row: always five glyphs, filled count from the clamped rating.
        let filled = self.item.stars() as usize;
        let filled_style = self.styled(Style::default().fg(self.theme.star_filled));
        let empty_style = self.styled(
            Style::default()
                .fg(self.theme.star_empty)
                .add_modifier(Modifier::DIM),
        );
        buf.set_stringn(
            inner.x,
            stars_y,
            "★".repeat(filled),
            inner.width as usize,
            filled_style,
        );
        buf.set_stringn(
            inner.x + filled as u16,
            stars_y,
            "★".repeat(5 - filled),
            (inner.width as usize).saturating_sub(filled),
            empty_style,
        );
    }
}
