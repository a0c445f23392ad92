use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;

use crate::application::usecases::{HandleTriggerUseCase, ReminderService};
use crate::domain::TriggerKind;
use crate::infrastructure::event_bus::TriggerBus;

/// Subscribe to the bus and run every trigger through [`HandleTriggerUseCase`].
/// The task ends when every bus sender is dropped.
pub fn spawn_trigger_listener(bus: &TriggerBus, reminders: ReminderService) -> JoinHandle<()> {
    let rx = bus.subscribe();
    tokio::spawn(listen(rx, reminders))
}

async fn listen(mut rx: broadcast::Receiver<TriggerKind>, reminders: ReminderService) {
    let handle_trigger = HandleTriggerUseCase {
        reminders: &reminders,
    };
    loop {
        match rx.recv().await {
            Ok(kind) => {
                handle_trigger.execute(kind).await;
            }
            Err(RecvError::Lagged(n)) => {
                // missed triggers only mean missed checks; the next one catches up
                tracing::debug!(skipped = n, "trigger listener lagged");
            }
            Err(RecvError::Closed) => break,
        }
    }
    tracing::debug!("trigger listener stopped");
}
