//! Background logging of store events

use chat_core::DomainEvent;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::broadcast::Receiver;
use tracing::{debug, info, warn};

/// Log every event until the channel closes.
///
/// Events a backend adapter would have to persist are logged at `info` and
/// counted; the count is returned once every sender is gone.
pub async fn log_events(mut events: Receiver<DomainEvent>) -> usize {
    let mut outbound = 0;
    loop {
        match events.recv().await {
            Ok(event) if event.needs_persisting() => {
                outbound += 1;
                info!(
                    event_type = event.event_type(),
                    channel_id = ?event.channel_id(),
                    at = %event.timestamp(),
                    "Outbound change"
                );
            }
            Ok(event) => debug!(
                event_type = event.event_type(),
                channel_id = ?event.channel_id(),
                "Store event"
            ),
            Err(RecvError::Lagged(skipped)) => warn!(skipped, "Event logger lagged"),
            Err(RecvError::Closed) => break,
        }
    }
    outbound
}
