use std::sync::Arc;

use flume::Sender;

use crate::{catalog::Catalog, event::events::Event, http::AdviceService};

pub struct AppContext {
    pub advice: Arc<dyn AdviceService>,
    pub catalog: &'static Catalog,
    pub event_tx: Sender<Event>,
}
