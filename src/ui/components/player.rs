use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Style, Stylize},
    symbols::{self, border},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Widget},
};

use crate::{catalog::format_duration, playback::PlaybackState, util::colors};

/// Persistent bar at the bottom of the screen.
pub struct PlayerWidget<'a> {
    playback: &'a PlaybackState,
}

impl<'a> PlayerWidget<'a> {
    pub fn new(playback: &'a PlaybackState) -> Self {
        Self { playback }
    }
}

impl<'a> Widget for PlayerWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(20), Constraint::Length(18)])
            .split(area);

        let state_icon = if self.playback.is_playing() {
            "".fg(colors::PRIMARY)
        } else {
            "".fg(colors::NEUTRAL)
        };

        let (title, total) = match self.playback.current() {
            Some(song) => (
                Line::from(vec![
                    state_icon,
                    Span::raw("  "),
                    song.title.as_str().bold(),
                    Span::raw(" by "),
                    song.artist.as_str().fg(colors::NEUTRAL),
                ]),
                format_duration(song.duration),
            ),
            None => (
                Line::from(vec![state_icon, Span::raw("  No track")]),
                format_duration(Default::default()),
            ),
        };

        let gauge = Gauge::default()
            .block(
                Block::default()
                    .title_top(title)
                    .title_alignment(Alignment::Center)
                    .borders(Borders::ALL)
                    .border_set(border::Set {
                        top_right: symbols::line::ROUNDED.horizontal_down,
                        bottom_right: symbols::line::ROUNDED.horizontal_up,
                        ..symbols::border::ROUNDED
                    }),
            )
            .gauge_style(Style::new().fg(colors::PRIMARY).bg(colors::MUTED))
            .ratio(0.0)
            .label(format!("0:00 / {}", total));
        gauge.render(layout[0], buf);

        let hint = Paragraph::new("␣ play/pause".fg(colors::NEUTRAL))
            .centered()
            .block(
                Block::default()
                    .borders(Borders::TOP | Borders::BOTTOM | Borders::RIGHT)
                    .border_set(border::ROUNDED),
            );
        hint.render(layout[1], buf);
    }
}
