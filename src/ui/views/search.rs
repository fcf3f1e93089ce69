use async_trait::async_trait;
use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    symbols::border,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::{
    catalog::BROWSE_STYLES,
    ui::{
        context::AppContext,
        state::AppState,
        traits::{Action, View},
    },
    util::colors,
};

const COLUMNS: usize = 5;
const TILE_HEIGHT: u16 = 5;

/// "Browse Styles" grid. Tiles are decorative; only the cursor moves.
#[derive(Default)]
pub struct Search {
    selected: usize,
}

impl Search {
    fn move_by(&mut self, delta: isize) {
        let len = BROWSE_STYLES.len() as isize;
        let next = self.selected as isize + delta;
        if (0..len).contains(&next) {
            self.selected = next as usize;
        }
    }
}

#[async_trait]
impl View for Search {
    fn render(&mut self, f: &mut Frame, area: Rect, _state: &AppState, ctx: &AppContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(1)])
            .split(area);

        f.render_widget(Paragraph::new("Browse Styles".bold()), chunks[0]);

        let styles = ctx.catalog.browse_styles();
        let rows = styles.len().div_ceil(COLUMNS);
        let row_areas = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![Constraint::Length(TILE_HEIGHT); rows])
            .split(chunks[1]);

        for (row, row_area) in row_areas.iter().enumerate() {
            let tiles = Layout::default()
                .direction(Direction::Horizontal)
                .constraints(vec![Constraint::Ratio(1, COLUMNS as u32); COLUMNS])
                .split(*row_area);

            for (col, tile_area) in tiles.iter().enumerate() {
                let index = row * COLUMNS + col;
                let Some(style) = styles.get(index) else {
                    break;
                };
                let (from, to) = style.gradient;
                let border_color = if index == self.selected {
                    Color::White
                } else {
                    to
                };

                let tile = Paragraph::new(style.name.bold())
                    .wrap(Wrap { trim: true })
                    .style(Style::default().bg(from).fg(Color::White))
                    .block(
                        Block::default()
                            .borders(Borders::ALL)
                            .border_set(border::ROUNDED)
                            .border_style(Style::default().fg(border_color).bg(from))
                            .title_bottom("󰎈".fg(to).add_modifier(Modifier::BOLD)),
                    );
                f.render_widget(tile, *tile_area);
            }
        }

        if let Some(style) = styles.get(self.selected) {
            let footer = Rect {
                y: (chunks[1].y + rows as u16 * TILE_HEIGHT)
                    .min(area.bottom().saturating_sub(1)),
                height: 1,
                ..chunks[1]
            };
            f.render_widget(
                Paragraph::new(format!("Cover: {}", style.cover_url).fg(colors::NEUTRAL)),
                footer,
            );
        }
    }

    async fn handle_input(
        &mut self,
        key: KeyEvent,
        _state: &AppState,
        _ctx: &AppContext,
    ) -> Option<Action> {
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => self.move_by(-1),
            KeyCode::Right | KeyCode::Char('l') => self.move_by(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_by(-(COLUMNS as isize)),
            KeyCode::Down | KeyCode::Char('j') => self.move_by(COLUMNS as isize),
            KeyCode::Enter => return Some(Action::None),
            _ => return None,
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_stays_on_the_grid() {
        let mut search = Search::default();
        search.move_by(-1);
        assert_eq!(search.selected, 0);
        search.move_by(COLUMNS as isize);
        assert_eq!(search.selected, 5);
        search.move_by(COLUMNS as isize);
        assert_eq!(search.selected, 5);
        search.move_by(4);
        assert_eq!(search.selected, 9);
        search.move_by(1);
        assert_eq!(search.selected, 9);
    }
}
