//! 通知模块 - 推送通知的接收、展示与点击处理
//!
//! # 组成
//! 1. `PlatformNotificationService`：宿主平台能力（展示通知、窗口操作、生命周期）
//! 2. `NotificationActor`：处理 install / activate / push / notificationclick 事件
//! 3. `PushPayload`：推送内容解析，失败时退回默认通知
//!
//! # 使用示例
//! ```ignore
//! use food_keeper::notification::{ActorEvent, ConsolePlatform, NotificationActor, PushEvent};
//!
//! let actor = NotificationActor::new(Arc::new(ConsolePlatform::new(vec![])));
//! actor.dispatch(ActorEvent::Install).settled().await?;
//! actor.dispatch(ActorEvent::Activate).settled().await?;
//! actor.dispatch(ActorEvent::Push(PushEvent::empty())).settled().await?;
//! ```

pub mod actor;
pub mod console;
pub mod payload;
pub mod platform;

pub use actor::{
    route_click, ActorEvent, ActorLifecycleState, ClickOutcome, ExtendableEvent,
    NotificationActor, NotificationClickEvent, PushEvent,
};
pub use console::{ConsolePlatform, ConsoleRecord};
pub use payload::{NotificationOptions, PushPayload, ResolvedNotification};
pub use platform::{ClientQuery, DisplayedNotification, PlatformNotificationService, WindowClient};
