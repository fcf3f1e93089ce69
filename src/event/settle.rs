use std::sync::Arc;

use flume::Sender;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use super::events::Event;
use crate::{
    chat::PendingAdvice,
    http::{AdviceService, AdviceUnavailable, UnavailableCause},
};

/// Delivers exactly one `AdviceSettled` when dropped, so the chat session
/// leaves its busy state even if the request task panics or is aborted.
struct Settlement {
    tx: Sender<Event>,
    result: Option<Result<String, AdviceUnavailable>>,
}

impl Drop for Settlement {
    fn drop(&mut self) {
        let result = self.result.take().unwrap_or_else(|| {
            warn!("advice_task_interrupted");
            Err(AdviceUnavailable::new(
                UnavailableCause::Interrupted,
                "advice task ended before replying",
            ))
        });
        let _ = self.tx.send(Event::AdviceSettled(result));
    }
}

pub fn spawn_advice(
    advice: Arc<dyn AdviceService>,
    pending: PendingAdvice,
    tx: Sender<Event>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut settlement = Settlement { tx, result: None };
        let result = advice.advise(&pending.query).await;
        info!(ok = result.is_ok(), "advice_settled");
        settlement.result = Some(result);
    })
}
