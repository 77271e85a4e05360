//! Push payload 解析 - 把原始推送内容转换成可展示的通知
//!
//! Payload 格式（所有字段可选）：
//! ```json
//! {
//!   "title": "Food Keeper",
//!   "body": "牛奶明天到期",
//!   "data": { "itemId": 42 }
//! }
//! ```
//!
//! 没有 payload 或解析失败时退回默认通知，不会报错。

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::config::NotificationConfig;

/// 推送 payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PushPayload {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
}

impl PushPayload {
    /// 默认 payload：应用名 + 默认提示文字
    pub fn fallback(config: &NotificationConfig) -> Self {
        Self {
            title: Some(config.app_name.clone()),
            body: Some(config.default_body.clone()),
            data: None,
        }
    }

    /// 解析原始推送内容
    pub fn from_raw(raw: Option<&[u8]>, config: &NotificationConfig) -> Self {
        let Some(bytes) = raw.filter(|b| !b.is_empty()) else {
            debug!("Push event without payload, using default notification");
            return Self::fallback(config);
        };

        match serde_json::from_slice::<PushPayload>(bytes) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(error = %e, "Malformed push payload, using default notification");
                Self::fallback(config)
            }
        }
    }

    /// 生成最终展示内容
    ///
    /// 空标题退回应用名，空正文为 ""，没有 data 时为 `{}`。
    pub fn resolve(self, config: &NotificationConfig) -> ResolvedNotification {
        let title = self
            .title
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| config.app_name.clone());
        let data = match self.data {
            None | Some(Value::Null) => Value::Object(Map::new()),
            Some(value) => value,
        };

        ResolvedNotification {
            title,
            options: NotificationOptions {
                body: self.body.unwrap_or_default(),
                icon: config.icon.clone(),
                badge: config.badge.clone(),
                data,
            },
        }
    }
}

/// 交给平台展示的通知选项
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationOptions {
    pub body: String,
    pub icon: String,
    pub badge: String,
    pub data: Value,
}

/// 标题 + 选项
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedNotification {
    pub title: String,
    pub options: NotificationOptions,
}
