//! 平台能力 trait 定义
//!
//! 通知展示、窗口枚举/聚焦/打开、生命周期控制都由宿主平台提供，
//! actor 只依赖这个 trait，测试时替换成 mock。

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::payload::NotificationOptions;

/// 已打开的客户端窗口
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowClient {
    pub id: String,
    pub url: String,
    #[serde(default)]
    pub focused: bool,
}

impl WindowClient {
    pub fn new(id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
            focused: false,
        }
    }
}

/// 窗口枚举条件
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClientQuery {
    /// 包含尚未被 actor 接管的窗口
    pub include_uncontrolled: bool,
}

/// 已展示的通知（点击事件携带）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayedNotification {
    pub tag: String,
    pub title: String,
    #[serde(default)]
    pub data: Value,
}

impl DisplayedNotification {
    pub fn new(tag: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            title: title.into(),
            data: Value::Object(Default::default()),
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = data;
        self
    }
}

/// 宿主平台能力
#[async_trait]
pub trait PlatformNotificationService: Send + Sync {
    /// 平台名称（用于日志）
    fn name(&self) -> &str;

    /// 展示系统通知
    async fn show_notification(&self, title: &str, options: &NotificationOptions) -> Result<()>;

    /// 关闭通知（立即生效）
    fn close_notification(&self, notification: &DisplayedNotification);

    /// 枚举当前打开的窗口
    async fn match_all_clients(&self, query: ClientQuery) -> Result<Vec<WindowClient>>;

    /// 把窗口带到前台
    async fn focus_client(&self, client: &WindowClient) -> Result<()>;

    /// 平台是否支持打开新窗口
    fn can_open_window(&self) -> bool {
        true
    }

    /// 打开新窗口
    async fn open_window(&self, url: &str) -> Result<()>;

    /// 接管所有已打开的页面
    async fn claim_clients(&self) -> Result<()>;

    /// 不等旧版本的客户端关闭，直接替换
    async fn skip_waiting(&self) -> Result<()>;
}
