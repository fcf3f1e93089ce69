use async_trait::async_trait;
use chrono::{Local, Timelike};
use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
};

use crate::{
    catalog::{Catalog, Playlist},
    ui::{
        context::AppContext,
        state::AppState,
        traits::{Action, View},
        util::get_active_track_icon,
    },
    util::colors,
};

pub fn greeting(hour: u32) -> &'static str {
    if hour < 12 {
        "Good morning"
    } else if hour < 18 {
        "Good afternoon"
    } else {
        "Good evening"
    }
}

fn sections(catalog: &Catalog) -> Vec<(&'static str, Vec<&Playlist>)> {
    vec![
        ("Recently played", catalog.recently_played.iter().collect()),
        ("Generated For You", catalog.mixes.iter().collect()),
        ("Latest from Suno.ai", catalog.latest()),
    ]
}

#[derive(Default)]
pub struct Home {
    list_state: ListState,
    selected: usize,
}

impl Home {
    fn entries(catalog: &Catalog) -> Vec<&Playlist> {
        sections(catalog)
            .into_iter()
            .flat_map(|(_, playlists)| playlists)
            .collect()
    }
}

#[async_trait]
impl View for Home {
    fn render(&mut self, f: &mut Frame, area: Rect, state: &AppState, ctx: &AppContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(1)])
            .split(area);

        let header = Paragraph::new(greeting(Local::now().hour()))
            .style(Style::default().add_modifier(Modifier::BOLD));
        f.render_widget(header, chunks[0]);

        let current = state.playback.current();
        let mut items = Vec::new();
        let mut selected_row = 0;
        let mut index = 0;

        for (title, playlists) in sections(ctx.catalog) {
            items.push(ListItem::new(Line::from(title.fg(colors::PRIMARY).bold())));
            for playlist in playlists {
                if index == self.selected {
                    selected_row = items.len();
                }
                let is_current = current
                    .is_some_and(|song| playlist.songs.iter().any(|s| s.id == song.id));
                let marker = if is_current {
                    get_active_track_icon(state.playback.is_playing())
                } else {
                    " "
                };
                items.push(ListItem::new(Line::from(vec![
                    Span::raw(format!("  {} ", marker)),
                    Span::raw(playlist.name.clone()).bold(),
                    Span::raw(format!("  {} · {} tracks", playlist.owner, playlist.songs.len()))
                        .fg(colors::NEUTRAL),
                ])));
                index += 1;
            }
            items.push(ListItem::new(""));
        }

        let list = List::new(items)
            .highlight_style(Style::default().bg(colors::CARD).fg(colors::PRIMARY))
            .highlight_symbol("▶");
        self.list_state.select(Some(selected_row));
        f.render_stateful_widget(list, chunks[1], &mut self.list_state);
    }

    async fn handle_input(
        &mut self,
        key: KeyEvent,
        _state: &AppState,
        ctx: &AppContext,
    ) -> Option<Action> {
        let entries = Self::entries(ctx.catalog);
        let len = entries.len();
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                if len > 0 {
                    self.selected = (self.selected + 1).min(len - 1);
                }
                None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
                None
            }
            KeyCode::Char('g') => {
                self.selected = 0;
                None
            }
            KeyCode::Char('G') => {
                self.selected = len.saturating_sub(1);
                None
            }
            KeyCode::Enter => entries
                .get(self.selected)
                .map(|p| Action::PlayPlaylist((*p).clone())),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::app::App;
    use ratatui::{Terminal, backend::TestBackend};

    #[test]
    fn greeting_follows_the_clock() {
        assert_eq!(greeting(0), "Good morning");
        assert_eq!(greeting(11), "Good morning");
        assert_eq!(greeting(12), "Good afternoon");
        assert_eq!(greeting(17), "Good afternoon");
        assert_eq!(greeting(18), "Good evening");
        assert_eq!(greeting(23), "Good evening");
    }

    #[test]
    fn entries_cover_all_sections() {
        let catalog = Catalog::mock();
        assert_eq!(
            Home::entries(catalog).len(),
            catalog.recently_played.len() + catalog.mixes.len() + catalog.latest().len()
        );
    }

    #[tokio::test]
    async fn renders_section_titles() {
        let mut app = App::with_advice(std::sync::Arc::new(crate::http::GeminiClient::new(
            &Default::default(),
        )));
        let mut terminal = Terminal::new(TestBackend::new(80, 60)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                app.views.home.render(f, area, &app.state, &app.ctx)
            })
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Good "));
        assert!(text.contains("Recently played"));
        assert!(text.contains("Generated For You"));
        assert!(text.contains("Latest from Suno.ai"));
    }

    #[tokio::test]
    async fn selection_is_clamped() {
        let app = App::with_advice(std::sync::Arc::new(crate::http::GeminiClient::new(
            &Default::default(),
        )));
        let mut home = Home::default();
        let up = KeyEvent::from(KeyCode::Up);
        assert_eq!(home.handle_input(up, &app.state, &app.ctx).await, None);
        assert_eq!(home.selected, 0);

        let end = KeyEvent::from(KeyCode::Char('G'));
        home.handle_input(end, &app.state, &app.ctx).await;
        let last = Home::entries(app.ctx.catalog).len() - 1;
        assert_eq!(home.selected, last);
        home.handle_input(KeyEvent::from(KeyCode::Down), &app.state, &app.ctx)
            .await;
        assert_eq!(home.selected, last);
    }
}
