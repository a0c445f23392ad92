use std::sync::Arc;

use serde_json::{Value, json};
use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::application::usecases::{ApplySettingsUseCase, ReminderService};
use crate::application::{AppError, SettingsForm, SettingsPatch, SettingsStore};
use crate::domain::{ReminderAction, ReminderId, TriggerKind};
use crate::infrastructure::event_bus::TriggerBus;

const PARSE_ERROR: i64 = -32700;
const METHOD_NOT_FOUND: i64 = -32601;
const INVALID_PARAMS: i64 = -32602;
const INTERNAL_ERROR: i64 = -32603;

type RpcError = (i64, String);

/// Line-delimited JSON-RPC bridge to the editor host:
/// - trigger
/// - reminder/done, reminder/snooze, reminder/expire
/// - settings/get, settings/update
/// - status
///
/// Reminders arrive on `outbound` (see `StdioNotifier`) and are written as
/// `notification/show` messages between responses.
///
/// On end of input the bus is closed and `listener` (the task draining it) is
/// awaited before the remaining notifications are flushed.
pub struct HostBridge {
    pub bus: TriggerBus,
    pub reminders: ReminderService,
    pub store: Arc<dyn SettingsStore>,
    pub outbound: mpsc::UnboundedReceiver<Value>,
    pub listener: Option<JoinHandle<()>>,
}

impl HostBridge {
    pub async fn serve_stdio(self) -> anyhow::Result<()> {
        let reader = io::BufReader::new(io::stdin());
        let writer = io::BufWriter::new(io::stdout());
        self.serve(reader, writer).await
    }

    pub async fn serve<R, W>(self, reader: R, mut out: W) -> anyhow::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let HostBridge {
            bus,
            reminders,
            store,
            mut outbound,
            listener,
        } = self;
        let dispatcher = Dispatcher {
            bus,
            reminders,
            store,
        };
        let mut lines = reader.lines();
        let mut outbound_open = true;

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else { break };
                    if line.trim().is_empty() {
                        continue;
                    }
                    let resp = dispatcher.handle_line(&line).await;
                    write_json(&mut out, resp).await?;
                }
                msg = outbound.recv(), if outbound_open => match msg {
                    Some(msg) => write_json(&mut out, msg).await?,
                    None => outbound_open = false,
                },
            }
        }

        // host closed stdin: let accepted triggers finish, then flush
        drop(dispatcher);
        if let Some(listener) = listener {
            if let Err(e) = listener.await {
                tracing::warn!("trigger listener ended abnormally: {e}");
            }
        }
        while let Ok(msg) = outbound.try_recv() {
            write_json(&mut out, msg).await?;
        }
        Ok(())
    }
}

struct Dispatcher {
    bus: TriggerBus,
    reminders: ReminderService,
    store: Arc<dyn SettingsStore>,
}

impl Dispatcher {
    async fn handle_line(&self, line: &str) -> Value {
        let req: Value = match serde_json::from_str(line) {
            Ok(v) => v,
            Err(e) => return error_response(None, PARSE_ERROR, format!("invalid json: {e}")),
        };

        let id = req.get("id").cloned();
        let method = req.get("method").and_then(|v| v.as_str()).unwrap_or("");
        let params = req.get("params").cloned().unwrap_or(json!({}));

        let result = match method {
            "trigger" => self.trigger(&params),
            "reminder/done" => self.resolve(&params, Some(ReminderAction::Done)),
            "reminder/snooze" => self.resolve(&params, Some(ReminderAction::Snooze)),
            "reminder/expire" => self.resolve(&params, None),
            "settings/get" => self
                .reminders
                .read_settings()
                .map(|s| json!(s))
                .map_err(|e| (INTERNAL_ERROR, e.to_string())),
            "settings/update" => self.update_settings(params).await,
            "status" => self
                .reminders
                .status()
                .map(|s| json!(s))
                .map_err(|e| (INTERNAL_ERROR, e.to_string())),
            _ => Err((METHOD_NOT_FOUND, format!("unknown method: {method}"))),
        };

        match result {
            Ok(result) => json!({
                "jsonrpc": "2.0",
                "id": id,
                "result": result
            }),
            Err((code, msg)) => error_response(id, code, msg),
        }
    }

    fn trigger(&self, params: &Value) -> Result<Value, RpcError> {
        let kind = params
            .get("kind")
            .and_then(|v| v.as_str())
            .ok_or((INVALID_PARAMS, "missing kind".to_string()))?;
        let kind: TriggerKind = kind.parse().map_err(|e| (INVALID_PARAMS, format!("{e}")))?;
        self.bus.publish(kind);
        Ok(json!({ "accepted": true, "kind": kind }))
    }

    fn resolve(
        &self,
        params: &Value,
        action: Option<ReminderAction>,
    ) -> Result<Value, RpcError> {
        let id = params
            .get("id")
            .and_then(|v| v.as_u64())
            .map(ReminderId)
            .ok_or((INVALID_PARAMS, "missing id".to_string()))?;

        let outcome = match action {
            Some(action) => self.reminders.resolve(id, action).map(|last| {
                json!({ "id": id, "action": action, "last_exercise_time": last.to_rfc3339() })
            }),
            None => self
                .reminders
                .expire(id)
                .map(|_| json!({ "id": id, "expired": true })),
        };
        outcome.map_err(|e| match e {
            AppError::UnknownReminder(_) => (INVALID_PARAMS, e.to_string()),
            e => (INTERNAL_ERROR, e.to_string()),
        })
    }

    async fn update_settings(&self, params: Value) -> Result<Value, RpcError> {
        let patch: SettingsPatch = serde_json::from_value(params)
            .map_err(|e| (INVALID_PARAMS, format!("invalid params: {e}")))?;

        let current = self
            .reminders
            .read_settings()
            .map_err(|e| (INTERNAL_ERROR, e.to_string()))?;
        let mut form = SettingsForm::new(&current);
        let unknown = form.update(&patch);

        let apply = ApplySettingsUseCase {
            settings: self.reminders.settings(),
            store: self.store.as_ref(),
        };
        let modified = apply
            .execute(&form)
            .await
            .map_err(|e| (INTERNAL_ERROR, e.to_string()))?;

        Ok(json!({ "modified": modified, "unknown_exercises": unknown }))
    }
}

async fn write_json<W: AsyncWrite + Unpin>(out: &mut W, v: Value) -> anyhow::Result<()> {
    out.write_all(v.to_string().as_bytes()).await?;
    out.write_all(b"\n").await?;
    out.flush().await?;
    Ok(())
}

fn error_response(id: Option<Value>, code: i64, msg: String) -> Value {
    json!({
      "jsonrpc": "2.0",
      "id": id,
      "error": {
        "code": code,
        "message": msg,
      }
    })
}
