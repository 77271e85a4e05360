//! 配置加载 - `~/.food-keeper/config.json`
//!
//! 文件不存在时使用默认值，所有字段都可省略。

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DEFAULT_APP_NAME: &str = "Food Keeper";
pub const DEFAULT_BODY: &str = "有即將到期的食材";
pub const DEFAULT_ICON: &str = "/icon-192.png";
pub const DEFAULT_TARGET_URL: &str = "/";

/// 通知相关的固定文字与资源路径
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// 默认标题
    pub app_name: String,
    /// 没有 payload 时的正文
    pub default_body: String,
    pub icon: String,
    pub badge: String,
    /// 点击通知后聚焦或打开的地址
    pub target_url: String,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            app_name: DEFAULT_APP_NAME.to_string(),
            default_body: DEFAULT_BODY.to_string(),
            icon: DEFAULT_ICON.to_string(),
            badge: DEFAULT_ICON.to_string(),
            target_url: DEFAULT_TARGET_URL.to_string(),
        }
    }
}

/// 顶层配置
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeeperConfig {
    pub notification: NotificationConfig,
}

impl KeeperConfig {
    /// 默认配置文件路径
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".food-keeper").join("config.json"))
    }

    /// 从默认路径加载
    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => {
                debug!("Cannot find home directory, using default config");
                Ok(Self::default())
            }
        }
    }

    /// 从指定路径加载，文件不存在时返回默认配置
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: KeeperConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }
}
