use std::sync::Arc;

use flume::{Receiver, Sender};
use ratatui::{Frame, layout::Rect};
use tracing::info;

use crate::{
    catalog::Catalog,
    config::Config,
    event::events::Event,
    http::{AdviceService, GeminiClient},
    util::task::TaskManager,
};

use super::{
    context::AppContext,
    layout::AppLayout,
    state::{AppState, ViewState},
    traits::View,
    tui::{self, TerminalEvent},
    util::handler::EventHandler,
    views::{AiDj, Home, Library, Search},
};

/// One instance of each panel; they keep their cursor while hidden.
#[derive(Default)]
pub struct Views {
    pub home: Home,
    pub search: Search,
    pub library: Library,
    pub ai_dj: AiDj,
}

impl Views {
    pub fn get_mut(&mut self, view: ViewState) -> &mut dyn View {
        match view {
            ViewState::Home => &mut self.home,
            ViewState::Search => &mut self.search,
            ViewState::Library => &mut self.library,
            ViewState::AiDj => &mut self.ai_dj,
        }
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect, state: &AppState, ctx: &AppContext) {
        self.get_mut(state.navigator.current())
            .render(f, area, state, ctx);
    }

    pub async fn on_event(&mut self, event: &Event, ctx: &AppContext) {
        for view in ViewState::ALL {
            self.get_mut(view).on_event(event, ctx).await;
        }
    }
}

pub struct App {
    pub event_rx: Receiver<Event>,
    pub ctx: AppContext,
    pub state: AppState,
    pub views: Views,
    pub task_manager: TaskManager,
    pub has_focus: bool,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: &Config) -> Self {
        info!(model = config.advice.model.as_str(), "app_starting");
        Self::with_advice(Arc::new(GeminiClient::new(&config.advice)))
    }

    pub fn with_advice(advice: Arc<dyn AdviceService>) -> Self {
        let (event_tx, event_rx): (Sender<Event>, Receiver<Event>) = flume::unbounded();
        Self {
            event_rx,
            ctx: AppContext {
                advice,
                catalog: Catalog::mock(),
                event_tx,
            },
            state: AppState::default(),
            views: Views::default(),
            task_manager: TaskManager::new(),
            has_focus: true,
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> color_eyre::Result<()> {
        let mut tui = tui::Tui::new()?.paste(true);
        tui.enter()?;

        let mut should_render =
            EventHandler::handle_event(self, TerminalEvent::Init, &mut tui).await?;
        while !self.should_quit {
            if should_render && self.has_focus {
                tui.draw(|f| {
                    let area = f.area();
                    AppLayout::new(self).render(f, area);
                })?;
            }

            should_render = EventHandler::handle_events(self, &mut tui).await?;
        }

        self.task_manager.abort_all();
        tui.exit()?;
        info!("app_stopped");
        Ok(())
    }
}
