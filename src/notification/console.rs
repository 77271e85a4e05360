//! 控制台平台 - 把平台操作以 JSONL 打印到 stdout，供 `fk simulate` 使用

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::io::Write;
use std::sync::Mutex;
use tracing::debug;

use super::payload::NotificationOptions;
use super::platform::{ClientQuery, DisplayedNotification, PlatformNotificationService, WindowClient};

/// 一条平台操作记录
#[derive(Debug, Clone, Serialize)]
pub struct ConsoleRecord {
    pub ts: DateTime<Utc>,
    pub action: String,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub detail: Value,
}

/// 控制台平台
pub struct ConsolePlatform {
    clients: Vec<WindowClient>,
    can_open_window: bool,
    records: Mutex<Vec<ConsoleRecord>>,
}

impl ConsolePlatform {
    pub fn new(clients: Vec<WindowClient>) -> Self {
        Self {
            clients,
            can_open_window: true,
            records: Mutex::new(Vec::new()),
        }
    }

    pub fn with_open_window(mut self, enabled: bool) -> Self {
        self.can_open_window = enabled;
        self
    }

    /// 已记录的操作
    pub fn records(&self) -> Vec<ConsoleRecord> {
        self.records
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    fn emit(&self, action: &str, detail: Value) {
        let record = ConsoleRecord {
            ts: Utc::now(),
            action: action.to_string(),
            detail,
        };

        if let Ok(line) = serde_json::to_string(&record) {
            let mut stdout = std::io::stdout().lock();
            let _ = writeln!(stdout, "{line}");
        }
        debug!(action, "Console platform action");

        if let Ok(mut records) = self.records.lock() {
            records.push(record);
        }
    }
}

#[async_trait]
impl PlatformNotificationService for ConsolePlatform {
    fn name(&self) -> &str {
        "console"
    }

    async fn show_notification(&self, title: &str, options: &NotificationOptions) -> Result<()> {
        self.emit(
            "show_notification",
            serde_json::json!({ "title": title, "options": options }),
        );
        Ok(())
    }

    fn close_notification(&self, notification: &DisplayedNotification) {
        self.emit(
            "close_notification",
            serde_json::json!({ "tag": notification.tag }),
        );
    }

    async fn match_all_clients(&self, query: ClientQuery) -> Result<Vec<WindowClient>> {
        self.emit(
            "match_all_clients",
            serde_json::json!({
                "include_uncontrolled": query.include_uncontrolled,
                "count": self.clients.len(),
            }),
        );
        Ok(self.clients.clone())
    }

    async fn focus_client(&self, client: &WindowClient) -> Result<()> {
        self.emit("focus_client", serde_json::to_value(client)?);
        Ok(())
    }

    fn can_open_window(&self) -> bool {
        self.can_open_window
    }

    async fn open_window(&self, url: &str) -> Result<()> {
        self.emit("open_window", serde_json::json!({ "url": url }));
        Ok(())
    }

    async fn claim_clients(&self) -> Result<()> {
        self.emit("claim_clients", Value::Null);
        Ok(())
    }

    async fn skip_waiting(&self) -> Result<()> {
        self.emit("skip_waiting", Value::Null);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_console_platform_records_actions() {
        let platform = ConsolePlatform::new(vec![WindowClient::new("w1", "/inventory")]);

        let clients = platform
            .match_all_clients(ClientQuery {
                include_uncontrolled: true,
            })
            .await
            .unwrap();
        platform.focus_client(&clients[0]).await.unwrap();
        platform.skip_waiting().await.unwrap();

        let actions: Vec<String> = platform.records().into_iter().map(|r| r.action).collect();
        assert_eq!(actions, vec!["match_all_clients", "focus_client", "skip_waiting"]);
        assert_eq!(platform.records()[1].detail["url"], "/inventory");
    }

    #[test]
    fn test_console_platform_window_support_flag() {
        assert!(ConsolePlatform::new(vec![]).can_open_window());
        assert!(!ConsolePlatform::new(vec![]).with_open_window(false).can_open_window());
    }
}
