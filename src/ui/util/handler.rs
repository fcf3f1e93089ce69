use crossterm::event::KeyCode;
use ratatui::crossterm::event::{KeyEvent, KeyEventKind, KeyModifiers};
use tracing::{debug, info};

use crate::{
    event::{events::Event, settle::spawn_advice},
    ui::{
        app::App,
        input::InputHandler,
        state::ViewState,
        traits::Action,
        tui::{TerminalEvent, Tui},
    },
};

const ADVICE_TASK: &str = "advice";

pub struct EventHandler;

impl EventHandler {
    pub async fn handle_events(app: &mut App, tui: &mut Tui) -> color_eyre::Result<bool> {
        let mut should_render = false;
        if let Some(evt) = tui.next().await {
            if Self::handle_event(app, evt, tui).await? {
                should_render = true;
            }
        }

        while let Ok(evt) = app.event_rx.try_recv() {
            Self::handle_action(app, evt).await;
            should_render = true;
        }

        Ok(should_render)
    }

    pub async fn handle_event(
        app: &mut App,
        evt: TerminalEvent,
        tui: &mut Tui,
    ) -> color_eyre::Result<bool> {
        match evt {
            TerminalEvent::Init => info!("tui_ready"),
            TerminalEvent::FocusGained => {
                app.has_focus = true;
                tui.clear()?;
            }
            TerminalEvent::FocusLost => app.has_focus = false,
            TerminalEvent::Key(key) => Self::handle_key_event(app, key).await,
            TerminalEvent::Paste(text) => {
                if app.state.navigator.current() == ViewState::AiDj {
                    app.state.chat.paste(&text);
                }
            }
            TerminalEvent::Tick => return Ok(Self::tick_redraws(app)),
            TerminalEvent::Resize(..) => {}
        }

        Ok(true)
    }

    /// Ticks only redraw while something animates on screen.
    fn tick_redraws(app: &App) -> bool {
        app.has_focus && app.state.chat.is_busy()
    }

    /// Applies one app event to the state. The only place state changes.
    pub async fn handle_action(app: &mut App, evt: Event) {
        app.views.on_event(&evt, &app.ctx).await;

        match evt {
            Event::SetView(view) => app.state.navigator.set_view(view),
            Event::PlaySong(song) => app.state.playback.select_and_play(song),
            Event::PlayPlaylist(playlist) => {
                app.state.playback.play_playlist(&playlist);
            }
            Event::TogglePlayback => app.state.playback.toggle(),
            Event::SubmitChat => {
                let Some(pending) = app.state.chat.submit() else {
                    return;
                };
                let handle = spawn_advice(
                    app.ctx.advice.clone(),
                    pending,
                    app.ctx.event_tx.clone(),
                );
                app.task_manager.spawn(ADVICE_TASK, handle);
            }
            Event::AdviceSettled(result) => app.state.chat.settle(result),
            Event::Quit => app.should_quit = true,
        }
    }

    async fn handle_key_event(app: &mut App, evt: KeyEvent) {
        if evt.kind != KeyEventKind::Press {
            return;
        }

        match evt.code {
            KeyCode::Char('c') if evt.modifiers == KeyModifiers::CONTROL => {
                Self::handle_action(app, Event::Quit).await;
                return;
            }
            KeyCode::Tab => {
                app.state.navigator.next();
                return;
            }
            KeyCode::BackTab => {
                app.state.navigator.previous();
                return;
            }
            _ => {}
        }

        let current = app.state.navigator.current();
        let action = app
            .views
            .get_mut(current)
            .handle_input(evt, &app.state, &app.ctx)
            .await;

        if let Some(action) = action {
            Self::dispatch_action(app, action).await;
            return;
        }

        if let Some(evt) = InputHandler::handle_key(evt) {
            Self::handle_action(app, evt).await;
        }
    }

    async fn dispatch_action(app: &mut App, action: Action) {
        debug!(?action, "dispatch_action");
        match action {
            Action::Quit => Self::handle_action(app, Event::Quit).await,
            Action::PlayPause => Self::handle_action(app, Event::TogglePlayback).await,
            Action::PlaySong(song) => Self::handle_action(app, Event::PlaySong(song)).await,
            Action::PlayPlaylist(playlist) => {
                Self::handle_action(app, Event::PlayPlaylist(playlist)).await
            }
            Action::ChatInput(c) => {
                app.state.chat.push_char(c);
            }
            Action::ChatBackspace => {
                app.state.chat.pop_char();
            }
            Action::ChatSubmit => Self::handle_action(app, Event::SubmitChat).await,
            Action::None => {}
        }
    }
}
