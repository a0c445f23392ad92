use tokio::sync::broadcast;

use crate::domain::TriggerKind;

/// Fan-out of host trigger events to listeners.
#[derive(Clone)]
pub struct TriggerBus {
    tx: broadcast::Sender<TriggerKind>,
}

impl TriggerBus {
    pub fn new(buffer: usize) -> Self {
        let (tx, _) = broadcast::channel(buffer);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<TriggerKind> {
        self.tx.subscribe()
    }

    pub fn publish(&self, kind: TriggerKind) {
        // no subscriber is fine: the event is simply dropped
        let _ = self.tx.send(kind);
    }

    pub fn build_finished(&self) {
        self.publish(TriggerKind::Compilation);
    }

    pub fn process_terminated(&self) {
        self.publish(TriggerKind::ProcessTermination);
    }

    pub fn indexing_started(&self) {
        self.publish(TriggerKind::Indexing);
    }
}
