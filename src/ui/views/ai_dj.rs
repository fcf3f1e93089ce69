use async_trait::async_trait;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use unicode_width::UnicodeWidthStr;

use crate::{
    chat::{ChatSession, Role},
    event::events::Event,
    ui::{
        components::spinner::Spinner,
        context::AppContext,
        state::AppState,
        traits::{Action, View},
        util::markdown,
    },
    util::colors,
};

const PLACEHOLDER: &str = "Ask for a style like '80s Japanese City Pop'...";
const SCROLL_STEP: u16 = 3;

/// Chat with the DJ. Lines scrolled up from the bottom of the transcript;
/// zero follows new messages.
#[derive(Default)]
pub struct AiDj {
    scroll_from_bottom: u16,
}

fn transcript(chat: &ChatSession, width: u16) -> Vec<Line<'static>> {
    let bubble = (width as usize * 4 / 5).max(8);
    let mut lines = Vec::new();

    for message in chat.messages() {
        match message.role {
            Role::User => {
                let style = Style::default()
                    .fg(colors::BACKGROUND)
                    .bg(colors::PRIMARY)
                    .add_modifier(Modifier::BOLD);
                lines.extend(
                    markdown::plain(&message.text, bubble, style)
                        .into_iter()
                        .map(|l| l.style(style).alignment(Alignment::Right)),
                );
            }
            Role::Model => {
                lines.push(Line::from("󱙺 Numus AI".fg(colors::PRIMARY).bold()));
                lines.extend(markdown::render(
                    &message.text,
                    bubble,
                    Style::default().fg(Color::White),
                ));
            }
        }
        lines.push(Line::default());
    }

    lines
}

#[async_trait]
impl View for AiDj {
    fn render(&mut self, f: &mut Frame, area: Rect, state: &AppState, _ctx: &AppContext) {
        let chat = &state.chat;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(3),
                Constraint::Length(1),
                Constraint::Length(3),
            ])
            .split(area);

        let header = Paragraph::new(vec![
            Line::from("Numus AI".bold().fg(colors::ACCENT)),
            Line::from("Explore music generated by Suno.ai".fg(colors::NEUTRAL)),
        ]);
        f.render_widget(header, chunks[0]);

        let log_block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(colors::MUTED));
        let log_area = log_block.inner(chunks[1]);
        f.render_widget(log_block, chunks[1]);

        let lines = transcript(chat, log_area.width);
        let overflow = (lines.len() as u16).saturating_sub(log_area.height);
        self.scroll_from_bottom = self.scroll_from_bottom.min(overflow);
        let offset = overflow - self.scroll_from_bottom;
        f.render_widget(Paragraph::new(lines).scroll((offset, 0)), log_area);

        if chat.is_busy() {
            f.render_widget(
                Spinner::default()
                    .with_style(Style::default().fg(colors::PRIMARY))
                    .with_label("The DJ is digging through crates..."),
                chunks[2],
            );
        }

        let border = if chat.can_submit() {
            colors::PRIMARY
        } else {
            colors::MUTED
        };
        let title = if chat.is_busy() {
            " waiting for reply "
        } else {
            " Enter to send "
        };
        let input_block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title_bottom(Line::from(title.fg(colors::NEUTRAL)).right_aligned());

        let input = if chat.input().is_empty() {
            Span::raw(PLACEHOLDER).fg(colors::NEUTRAL)
        } else {
            Span::raw(chat.input().to_string())
        };
        let inner_width = chunks[3].width.saturating_sub(2);
        let input_width = chat.input().width() as u16;
        let scroll = input_width.saturating_sub(inner_width.saturating_sub(1));
        f.render_widget(
            Paragraph::new(input).block(input_block).scroll((0, scroll)),
            chunks[3],
        );

        if !chat.is_busy() {
            f.set_cursor_position((
                chunks[3].x + 1 + input_width - scroll,
                chunks[3].y + 1,
            ));
        }
    }

    async fn handle_input(
        &mut self,
        key: KeyEvent,
        _state: &AppState,
        _ctx: &AppContext,
    ) -> Option<Action> {
        match key.code {
            KeyCode::Enter => Some(Action::ChatSubmit),
            KeyCode::Backspace => Some(Action::ChatBackspace),
            KeyCode::Up | KeyCode::PageUp => {
                self.scroll_from_bottom = self.scroll_from_bottom.saturating_add(SCROLL_STEP);
                Some(Action::None)
            }
            KeyCode::Down | KeyCode::PageDown => {
                self.scroll_from_bottom = self.scroll_from_bottom.saturating_sub(SCROLL_STEP);
                Some(Action::None)
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::ChatInput(c))
            }
            _ => None,
        }
    }

    async fn on_event(&mut self, event: &Event, _ctx: &AppContext) {
        if matches!(event, Event::SubmitChat | Event::AdviceSettled(_)) {
            self.scroll_from_bottom = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{http::GeminiClient, ui::app::App};
    use ratatui::{Terminal, backend::TestBackend};
    use std::sync::Arc;

    fn screen(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(70, 30)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                app.views.ai_dj.render(f, area, &app.state, &app.ctx)
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    fn app() -> App {
        App::with_advice(Arc::new(GeminiClient::new(&Default::default())))
    }

    #[test]
    fn shows_greeting_and_placeholder() {
        let mut app = app();
        let text = screen(&mut app);
        assert!(text.contains("Hello!"));
        assert!(text.contains("Ask for a style"));
    }

    #[test]
    fn shows_user_message_and_busy_spinner() {
        let mut app = app();
        app.state.chat.set_input("lofi beats");
        app.state.chat.submit();
        let text = screen(&mut app);
        assert!(text.contains("lofi beats"));
        assert!(text.contains("digging through crates"));
        assert!(text.contains("waiting for reply"));
    }

    #[test]
    fn user_lines_carry_bubble_style() {
        let mut chat = ChatSession::empty();
        chat.set_input("city pop");
        chat.submit();
        let lines = transcript(&chat, 40);
        assert_eq!(lines[0].alignment, Some(Alignment::Right));
        assert_eq!(lines[0].style.bg, Some(colors::PRIMARY));
    }

    #[test]
    fn user_text_is_shown_as_typed() {
        let mut chat = ChatSession::empty();
        chat.set_input("more *lo_fi* please");
        chat.submit();
        let lines = transcript(&chat, 60);
        let text: String = lines[0].spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "more *lo_fi* please");
    }

    #[test]
    fn model_lines_fit_the_bubble() {
        let mut chat = ChatSession::empty();
        chat.set_input("links");
        chat.submit();
        chat.settle(Ok(format!("**Listen**: https://suno.com/{}", "x".repeat(80))));
        let lines = transcript(&chat, 30);
        assert!(lines.iter().all(|l| l.width() <= 24));
    }

    #[tokio::test]
    async fn typing_keys_become_chat_actions() {
        let app = app();
        let mut view = AiDj::default();
        let press = |code| KeyEvent::from(code);
        assert_eq!(
            view.handle_input(press(KeyCode::Char('q')), &app.state, &app.ctx)
                .await,
            Some(Action::ChatInput('q'))
        );
        assert_eq!(
            view.handle_input(press(KeyCode::Enter), &app.state, &app.ctx)
                .await,
            Some(Action::ChatSubmit)
        );
        assert_eq!(
            view.handle_input(press(KeyCode::Esc), &app.state, &app.ctx)
                .await,
            None
        );
    }

    #[tokio::test]
    async fn new_messages_reset_scroll() {
        let app = app();
        let mut view = AiDj::default();
        view.handle_input(KeyEvent::from(KeyCode::Up), &app.state, &app.ctx)
            .await;
        assert_eq!(view.scroll_from_bottom, SCROLL_STEP);
        view.on_event(&Event::SubmitChat, &app.ctx).await;
        assert_eq!(view.scroll_from_bottom, 0);
    }
}
