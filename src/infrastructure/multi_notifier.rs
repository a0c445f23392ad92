use async_trait::async_trait;

use crate::application::{AppResult, Notifier};
use crate::domain::Reminder;

pub struct MultiNotifier {
    notifiers: Vec<Box<dyn Notifier>>,
}

impl MultiNotifier {
    pub fn new(notifiers: Vec<Box<dyn Notifier>>) -> Self {
        Self { notifiers }
    }
}

#[async_trait]
impl Notifier for MultiNotifier {
    async fn notify(&self, reminder: &Reminder) -> AppResult<()> {
        // 单个渠道失败不影响其它渠道：只要有一个渠道送达就算已展示
        let mut delivered = self.notifiers.is_empty();
        let mut last_err = None;

        for n in &self.notifiers {
            match n.notify(reminder).await {
                Ok(()) => delivered = true,
                Err(e) => {
                    tracing::warn!(id = %reminder.id, "notifier channel failed: {e}");
                    last_err = Some(e);
                }
            }
        }

        match last_err {
            Some(e) if !delivered => Err(e),
            _ => Ok(()),
        }
    }
}
