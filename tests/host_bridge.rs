mod common;

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration as StdDuration;

use common::{FirstPicker, ManualClock, settings_with, t0};
use serde_json::{Value, json};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, DuplexStream, Lines};
use tokio::sync::mpsc;

use idlefit::application::SettingsStore;
use idlefit::application::usecases::{ReminderService, shared_settings};
use idlefit::infrastructure::event_bus::TriggerBus;
use idlefit::infrastructure::memory_store::InMemorySettingsStore;
use idlefit::infrastructure::stdio_notifier::StdioNotifier;
use idlefit::infrastructure::trigger_listener::spawn_trigger_listener;
use idlefit::interfaces::stdio::HostBridge;

struct Host {
    tx: DuplexStream,
    rx: Lines<BufReader<DuplexStream>>,
    clock: ManualClock,
    store: InMemorySettingsStore,
    notifications: VecDeque<Value>,
}

impl Host {
    async fn send(&mut self, req: Value) {
        self.tx.write_all(req.to_string().as_bytes()).await.unwrap();
        self.tx.write_all(b"\n").await.unwrap();
    }

    async fn recv(&mut self) -> Value {
        let line = tokio::time::timeout(StdDuration::from_secs(2), self.rx.next_line())
            .await
            .expect("bridge answered in time")
            .unwrap()
            .expect("bridge still open");
        serde_json::from_str(&line).unwrap()
    }

    async fn call(&mut self, id: u64, method: &str, params: Value) -> Value {
        self.send(json!({ "jsonrpc": "2.0", "id": id, "method": method, "params": params }))
            .await;
        // notifications may interleave with responses
        loop {
            let msg = self.recv().await;
            if msg.get("id") == Some(&json!(id)) {
                return msg;
            }
            if msg["method"] == "notification/show" {
                self.notifications.push_back(msg["params"].clone());
            }
        }
    }

    async fn next_notification(&mut self) -> Value {
        if let Some(params) = self.notifications.pop_front() {
            return params;
        }
        loop {
            let msg = self.recv().await;
            if msg["method"] == "notification/show" {
                return msg["params"].clone();
            }
        }
    }
}

fn start() -> Host {
    let clock = ManualClock::at(t0());
    let store = InMemorySettingsStore::with_settings(settings_with(30, &[("Squat", true)]));
    let (out_tx, out_rx) = mpsc::unbounded_channel();
    let reminders = ReminderService::new(
        shared_settings(settings_with(30, &[("Squat", true)])),
        Arc::new(StdioNotifier::new(out_tx)),
        Arc::new(clock.clone()),
        Arc::new(FirstPicker),
    );
    let bus = TriggerBus::new(16);
    let listener = spawn_trigger_listener(&bus, reminders.clone());

    let (host_tx, bridge_in) = tokio::io::duplex(16 * 1024);
    let (bridge_out, host_rx) = tokio::io::duplex(16 * 1024);
    let bridge = HostBridge {
        bus,
        reminders,
        store: Arc::new(store.clone()),
        outbound: out_rx,
        listener: Some(listener),
    };
    tokio::spawn(bridge.serve(BufReader::new(bridge_in), bridge_out));

    Host {
        tx: host_tx,
        rx: BufReader::new(host_rx).lines(),
        clock,
        store,
        notifications: VecDeque::new(),
    }
}

#[tokio::test]
async fn trigger_then_done_over_the_bridge() {
    let mut host = start();

    let resp = host.call(1, "trigger", json!({ "kind": "compilation" })).await;
    assert_eq!(resp["result"]["accepted"], true);

    host.clock.advance_minutes(31);
    host.call(2, "trigger", json!({ "kind": "build-finished" })).await;
    let shown = host.next_notification().await;
    assert_eq!(shown["title"], "Time for a break!");
    assert_eq!(shown["body"], "Your exercise: Squat");
    assert_eq!(shown["actions"][0]["label"], "Done");
    assert_eq!(shown["actions"][1]["label"], "Snooze");

    let id = shown["id"].as_u64().unwrap();
    let status = host.call(3, "status", json!({})).await;
    assert_eq!(status["result"]["active"], id);

    let done = host.call(4, "reminder/done", json!({ "id": id })).await;
    assert_eq!(done["result"]["action"], "done");

    let status = host.call(5, "status", json!({})).await;
    assert_eq!(status["result"]["active"], Value::Null);

    // second click on the same popup
    let again = host.call(6, "reminder/done", json!({ "id": id })).await;
    assert_eq!(again["error"]["code"], -32602);
}

#[tokio::test]
async fn settings_update_goes_through_the_form() {
    let mut host = start();

    let resp = host
        .call(
            1,
            "settings/update",
            json!({ "cooldown_minutes": 200, "indexing": false, "exercises": { "Plank": true } }),
        )
        .await;
    assert_eq!(resp["result"]["modified"], true);
    assert_eq!(resp["result"]["unknown_exercises"], json!(["Plank"]));

    let settings = host.call(2, "settings/get", json!({})).await;
    assert_eq!(settings["result"]["cooldown_minutes"], 90);
    assert_eq!(settings["result"]["triggers"]["indexing"], false);
    assert_eq!(settings["result"]["exercises"], json!({ "Squat": true }));

    let saved = host.store.load().await.unwrap();
    assert_eq!(saved.cooldown_minutes.get(), 90);

    let resp = host
        .call(3, "settings/update", json!({ "cooldown_minutes": 90 }))
        .await;
    assert_eq!(resp["result"]["modified"], false);
}

#[tokio::test]
async fn bad_requests_get_errors() {
    let mut host = start();

    host.tx.write_all(b"{not json\n").await.unwrap();
    let resp = host.recv().await;
    assert_eq!(resp["error"]["code"], -32700);

    let resp = host.call(1, "reminder/dance", json!({})).await;
    assert_eq!(resp["error"]["code"], -32601);

    let resp = host.call(2, "trigger", json!({ "kind": "shutdown" })).await;
    assert_eq!(resp["error"]["code"], -32602);

    let resp = host.call(3, "reminder/snooze", json!({})).await;
    assert_eq!(resp["error"]["code"], -32602);
}

#[tokio::test]
async fn trigger_right_before_eof_is_still_delivered() {
    let mut host = start();
    host.clock.advance_minutes(30);

    host.send(json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": "trigger",
        "params": { "kind": "indexing" }
    }))
    .await;
    // host goes away immediately after the trigger
    host.tx.shutdown().await.unwrap();

    let mut seen = vec![];
    while let Some(line) = tokio::time::timeout(StdDuration::from_secs(2), host.rx.next_line())
        .await
        .expect("bridge shut down in time")
        .unwrap()
    {
        seen.push(serde_json::from_str::<Value>(&line).unwrap());
    }

    assert!(seen.iter().any(|m| m["id"] == 1 && m["result"]["accepted"] == true));
    let shown: Vec<_> = seen
        .iter()
        .filter(|m| m["method"] == "notification/show")
        .collect();
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0]["params"]["trigger"], "indexing");
}
