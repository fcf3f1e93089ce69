use async_trait::async_trait;
use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

use crate::{
    catalog::format_duration,
    ui::{
        context::AppContext,
        state::AppState,
        traits::{Action, View},
        util::get_active_track_icon,
    },
    util::colors,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Pane {
    #[default]
    Playlists,
    Tracks,
}

/// "Your Generations": every library playlist with its track list.
#[derive(Default)]
pub struct Library {
    playlists: ListState,
    tracks: ListState,
    focus: Pane,
}

fn step(state: &mut ListState, len: usize, down: bool) {
    if len == 0 {
        state.select(None);
        return;
    }
    let i = match (state.selected(), down) {
        (None, _) => 0,
        (Some(i), true) => (i + 1).min(len - 1),
        (Some(i), false) => i.saturating_sub(1),
    };
    state.select(Some(i));
}

impl Library {
    fn border(&self, pane: Pane) -> Style {
        if self.focus == pane {
            Style::default().fg(colors::PRIMARY)
        } else {
            Style::default().fg(colors::MUTED)
        }
    }
}

#[async_trait]
impl View for Library {
    fn render(&mut self, f: &mut Frame, area: Rect, state: &AppState, ctx: &AppContext) {
        let catalog = ctx.catalog;
        if self.playlists.selected().is_none() && !catalog.playlists.is_empty() {
            self.playlists.select(Some(0));
        }

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(area);

        let items: Vec<ListItem> = catalog
            .playlists
            .iter()
            .map(|playlist| {
                ListItem::new(vec![
                    Line::from(playlist.name.as_str().bold()),
                    Line::from(
                        format!(" {}", playlist.owner).fg(colors::NEUTRAL),
                    ),
                ])
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(self.border(Pane::Playlists))
                    .title(" Your Generations "),
            )
            .highlight_style(
                Style::default()
                    .fg(colors::PRIMARY)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");
        f.render_stateful_widget(list, chunks[0], &mut self.playlists);

        let detail_block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.border(Pane::Tracks));

        let Some(playlist) = self
            .playlists
            .selected()
            .and_then(|i| catalog.playlists.get(i))
        else {
            f.render_widget(detail_block, chunks[1]);
            return;
        };

        let detail_block = detail_block.title(format!(
            " {} · {} ",
            playlist.name,
            format_duration(playlist.total_duration())
        ));
        let inner = detail_block.inner(chunks[1]);
        f.render_widget(detail_block, chunks[1]);

        let detail = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(1)])
            .split(inner);

        f.render_widget(
            Paragraph::new(playlist.description.as_str().fg(colors::NEUTRAL))
                .wrap(Wrap { trim: true }),
            detail[0],
        );

        if playlist.songs.is_empty() {
            f.render_widget(
                Paragraph::new("No generations yet".fg(colors::NEUTRAL)).centered(),
                detail[1],
            );
            return;
        }

        let is_playing = state.playback.is_playing();
        let tracks: Vec<ListItem> = playlist
            .songs
            .iter()
            .enumerate()
            .map(|(i, song)| {
                let is_current = state.playback.is_current(song);
                let prefix = if is_current {
                    get_active_track_icon(is_playing).to_string()
                } else {
                    format!("{}", i + 1)
                };
                let item = ListItem::new(Line::from(vec![
                    Span::raw(format!("{:>2}  ", prefix)),
                    Span::raw(song.title.clone()),
                    Span::raw(format!(" · {}", song.artist)).fg(colors::NEUTRAL),
                    Span::raw(format!("  {}", song.duration_label())),
                ]));
                if is_current {
                    item.style(Style::default().fg(colors::PRIMARY))
                } else {
                    item
                }
            })
            .collect();

        let tracks = List::new(tracks).highlight_style(Style::default().bg(colors::CARD));
        if self.focus == Pane::Tracks {
            f.render_stateful_widget(tracks, detail[1], &mut self.tracks);
        } else {
            f.render_widget(tracks, detail[1]);
        }
    }

    async fn handle_input(
        &mut self,
        key: KeyEvent,
        _state: &AppState,
        ctx: &AppContext,
    ) -> Option<Action> {
        let catalog = ctx.catalog;
        let playlist = self
            .playlists
            .selected()
            .and_then(|i| catalog.playlists.get(i));
        let track_count = playlist.map_or(0, |p| p.songs.len());

        match (key.code, self.focus) {
            (KeyCode::Down | KeyCode::Char('j'), Pane::Playlists) => {
                step(&mut self.playlists, catalog.playlists.len(), true);
                self.tracks.select(None);
                None
            }
            (KeyCode::Up | KeyCode::Char('k'), Pane::Playlists) => {
                step(&mut self.playlists, catalog.playlists.len(), false);
                self.tracks.select(None);
                None
            }
            (KeyCode::Down | KeyCode::Char('j'), Pane::Tracks) => {
                step(&mut self.tracks, track_count, true);
                None
            }
            (KeyCode::Up | KeyCode::Char('k'), Pane::Tracks) => {
                step(&mut self.tracks, track_count, false);
                None
            }
            (KeyCode::Right | KeyCode::Char('l'), Pane::Playlists) if track_count > 0 => {
                self.focus = Pane::Tracks;
                if self.tracks.selected().is_none() {
                    self.tracks.select(Some(0));
                }
                None
            }
            (KeyCode::Left | KeyCode::Char('h'), Pane::Tracks) => {
                self.focus = Pane::Playlists;
                None
            }
            (KeyCode::Enter, Pane::Playlists) => playlist.map(|p| Action::PlayPlaylist(p.clone())),
            (KeyCode::Enter, Pane::Tracks) => self
                .tracks
                .selected()
                .and_then(|i| playlist?.songs.get(i))
                .map(|song| Action::PlaySong(song.clone())),
            _ => None,
        }
    }
}
