//! Food Keeper - 家庭食材库存的核心逻辑
//!
//! - `barcode`：EAN-13 校验位计算与规范化
//! - `item_key`：商品名到标准品项 key 的有序规则匹配
//! - `notification`：推送通知 actor

pub mod barcode;
pub mod cli;
pub mod config;
pub mod error;
pub mod item_key;
pub mod notification;

pub use barcode::{check_digit, is_valid, normalize, Digit12, Digit13};
pub use config::{KeeperConfig, NotificationConfig};
pub use error::BarcodeError;
pub use item_key::{resolve_item_key, ItemKeyResolver, ItemKeyRule, ItemPattern};
pub use notification::{
    ActorEvent, ActorLifecycleState, ClickOutcome, ExtendableEvent, NotificationActor,
    NotificationClickEvent, PlatformNotificationService, PushEvent, PushPayload,
};
