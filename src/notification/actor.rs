//! 通知 actor - 处理生命周期、推送和通知点击事件
//!
//! 生命周期：`Installing` -install-> `WaitingToActivate` -activate-> `Active`。
//! 每个事件独立处理，处理函数本身同步执行完毕，耗时的平台操作通过
//! [`ExtendableEvent::wait_until`] 登记，平台等 [`ExtendableEvent::settled`]
//! 完成后才能结束 actor。

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::{anyhow, Result};
use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::payload::PushPayload;
use super::platform::{ClientQuery, DisplayedNotification, PlatformNotificationService};
use crate::config::NotificationConfig;

/// Actor 生命周期阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorLifecycleState {
    Installing,
    WaitingToActivate,
    Active,
}

impl ActorLifecycleState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActorLifecycleState::Installing => "installing",
            ActorLifecycleState::WaitingToActivate => "waiting_to_activate",
            ActorLifecycleState::Active => "active",
        }
    }
}

impl std::fmt::Display for ActorLifecycleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 推送事件（原始 payload 字节）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PushEvent {
    pub data: Option<Vec<u8>>,
}

impl PushEvent {
    /// 没有 payload 的推送
    pub fn empty() -> Self {
        Self { data: None }
    }

    pub fn with_data(data: impl Into<Vec<u8>>) -> Self {
        Self {
            data: Some(data.into()),
        }
    }
}

/// 通知点击事件
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationClickEvent {
    pub notification: DisplayedNotification,
}

/// 平台派发给 actor 的事件
#[derive(Debug, Clone, PartialEq)]
pub enum ActorEvent {
    Install,
    Activate,
    Push(PushEvent),
    NotificationClick(NotificationClickEvent),
}

impl ActorEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            ActorEvent::Install => "install",
            ActorEvent::Activate => "activate",
            ActorEvent::Push(_) => "push",
            ActorEvent::NotificationClick(_) => "notificationclick",
        }
    }
}

/// 延长 actor 生命周期的完成令牌
///
/// 登记的 future 立即在 tokio 上 spawn，`settled` 等它们全部结束。
#[derive(Debug)]
pub struct ExtendableEvent {
    kind: &'static str,
    pending: Vec<JoinHandle<Result<()>>>,
}

impl ExtendableEvent {
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            pending: Vec::new(),
        }
    }

    pub fn kind(&self) -> &'static str {
        self.kind
    }

    /// 登记异步操作，平台需等它完成
    pub fn wait_until<F>(&mut self, action: F)
    where
        F: Future<Output = Result<()>> + Send + 'static,
    {
        self.pending.push(tokio::spawn(action));
    }

    /// 尚未结算的操作数
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// 等待所有登记的操作完成，返回第一个错误
    pub async fn settled(self) -> Result<()> {
        let mut first_error = None;

        for handle in self.pending {
            let outcome = match handle.await {
                Ok(result) => result,
                Err(e) => Err(anyhow!("event task aborted: {e}")),
            };
            if let Err(e) = outcome {
                warn!(event = self.kind, error = %e, "Event action failed");
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

/// 点击处理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// 聚焦了已打开的窗口
    Focused(String),
    /// 打开了新窗口
    Opened(String),
    /// 没有匹配窗口，平台也不能开新窗口
    Ignored,
}

/// 把点击路由到已打开的窗口或新窗口
///
/// 包含未接管窗口在内，第一个 URL 含有 `target_url` 的窗口被聚焦；
/// 否则在平台支持时打开新窗口。
pub async fn route_click(
    platform: &dyn PlatformNotificationService,
    target_url: &str,
) -> Result<ClickOutcome> {
    let clients = platform
        .match_all_clients(ClientQuery {
            include_uncontrolled: true,
        })
        .await?;

    if let Some(client) = clients.iter().find(|c| c.url.contains(target_url)) {
        platform.focus_client(client).await?;
        return Ok(ClickOutcome::Focused(client.id.clone()));
    }

    if platform.can_open_window() {
        platform.open_window(target_url).await?;
        return Ok(ClickOutcome::Opened(target_url.to_string()));
    }

    Ok(ClickOutcome::Ignored)
}

/// 通知 actor
pub struct NotificationActor {
    platform: Arc<dyn PlatformNotificationService>,
    config: NotificationConfig,
    state: Mutex<ActorLifecycleState>,
}

impl NotificationActor {
    pub fn new(platform: Arc<dyn PlatformNotificationService>) -> Self {
        Self {
            platform,
            config: NotificationConfig::default(),
            state: Mutex::new(ActorLifecycleState::Installing),
        }
    }

    pub fn with_config(mut self, config: NotificationConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &NotificationConfig {
        &self.config
    }

    pub fn state(&self) -> ActorLifecycleState {
        *self.lock_state()
    }

    /// 派发事件
    ///
    /// 必须在 tokio runtime 内调用。返回的令牌交给平台等待。
    pub fn dispatch(&self, event: ActorEvent) -> ExtendableEvent {
        let mut ext = ExtendableEvent::new(event.kind());
        debug!(event = event.kind(), platform = self.platform.name(), "Dispatching event");

        match event {
            ActorEvent::Install => self.on_install(&mut ext),
            ActorEvent::Activate => self.on_activate(&mut ext),
            ActorEvent::Push(push) => self.on_push(push, &mut ext),
            ActorEvent::NotificationClick(click) => self.on_notification_click(click, &mut ext),
        }

        ext
    }

    fn on_install(&self, ext: &mut ExtendableEvent) {
        if !self.transition(
            ActorLifecycleState::Installing,
            ActorLifecycleState::WaitingToActivate,
        ) {
            return;
        }

        let platform = Arc::clone(&self.platform);
        ext.wait_until(async move { platform.skip_waiting().await });
    }

    fn on_activate(&self, ext: &mut ExtendableEvent) {
        if !self.transition(
            ActorLifecycleState::WaitingToActivate,
            ActorLifecycleState::Active,
        ) {
            return;
        }

        let platform = Arc::clone(&self.platform);
        ext.wait_until(async move { platform.claim_clients().await });
    }

    fn on_push(&self, event: PushEvent, ext: &mut ExtendableEvent) {
        let notification = PushPayload::from_raw(event.data.as_deref(), &self.config)
            .resolve(&self.config);
        info!(
            title = %notification.title,
            body = %notification.options.body,
            "Showing push notification"
        );

        let platform = Arc::clone(&self.platform);
        ext.wait_until(async move {
            platform
                .show_notification(&notification.title, &notification.options)
                .await
        });
    }

    fn on_notification_click(&self, event: NotificationClickEvent, ext: &mut ExtendableEvent) {
        self.platform.close_notification(&event.notification);
        debug!(tag = %event.notification.tag, "Notification closed");

        let platform = Arc::clone(&self.platform);
        let target_url = self.config.target_url.clone();
        ext.wait_until(async move {
            let outcome = route_click(platform.as_ref(), &target_url).await?;
            info!(outcome = ?outcome, target = %target_url, "Notification click handled");
            Ok(())
        });
    }

    fn transition(&self, from: ActorLifecycleState, to: ActorLifecycleState) -> bool {
        let mut state = self.lock_state();
        if *state != from {
            warn!(
                current = %*state,
                expected = %from,
                "Ignoring out-of-order lifecycle event"
            );
            return false;
        }
        *state = to;
        info!(from = %from, to = %to, "Actor lifecycle transition");
        true
    }

    fn lock_state(&self) -> MutexGuard<'_, ActorLifecycleState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::payload::NotificationOptions;
    use crate::notification::platform::WindowClient;
    use async_trait::async_trait;
    use serde_json::json;

    /// 记录所有调用的 mock 平台
    #[derive(Default)]
    struct MockPlatform {
        clients: Vec<WindowClient>,
        no_open_window: bool,
        fail_show: bool,
        calls: Mutex<Vec<String>>,
        shown: Mutex<Vec<(String, NotificationOptions)>>,
        queries: Mutex<Vec<ClientQuery>>,
    }

    impl MockPlatform {
        fn with_clients(urls: &[&str]) -> Self {
            Self {
                clients: urls
                    .iter()
                    .enumerate()
                    .map(|(i, url)| WindowClient::new(format!("client-{i}"), *url))
                    .collect(),
                ..Self::default()
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: String) {
            self.calls.lock().unwrap().push(call);
        }
    }

    #[async_trait]
    impl PlatformNotificationService for MockPlatform {
        fn name(&self) -> &str {
            "mock"
        }

        async fn show_notification(&self, title: &str, options: &NotificationOptions) -> Result<()> {
            if self.fail_show {
                return Err(anyhow!("permission denied"));
            }
            self.record(format!("show:{title}"));
            self.shown
                .lock()
                .unwrap()
                .push((title.to_string(), options.clone()));
            Ok(())
        }

        fn close_notification(&self, notification: &DisplayedNotification) {
            self.record(format!("close:{}", notification.tag));
        }

        async fn match_all_clients(&self, query: ClientQuery) -> Result<Vec<WindowClient>> {
            self.queries.lock().unwrap().push(query);
            Ok(self.clients.clone())
        }

        async fn focus_client(&self, client: &WindowClient) -> Result<()> {
            self.record(format!("focus:{}", client.id));
            Ok(())
        }

        fn can_open_window(&self) -> bool {
            !self.no_open_window
        }

        async fn open_window(&self, url: &str) -> Result<()> {
            self.record(format!("open:{url}"));
            Ok(())
        }

        async fn claim_clients(&self) -> Result<()> {
            self.record("claim".to_string());
            Ok(())
        }

        async fn skip_waiting(&self) -> Result<()> {
            self.record("skip_waiting".to_string());
            Ok(())
        }
    }

    fn click_event() -> ActorEvent {
        ActorEvent::NotificationClick(NotificationClickEvent {
            notification: DisplayedNotification::new("expiry", "Food Keeper")
                .with_data(json!({"url": "/inventory/42"})),
        })
    }

    #[tokio::test]
    async fn test_lifecycle_install_then_activate() {
        let platform = Arc::new(MockPlatform::default());
        let actor = NotificationActor::new(platform.clone());
        assert_eq!(actor.state(), ActorLifecycleState::Installing);

        actor.dispatch(ActorEvent::Install).settled().await.unwrap();
        assert_eq!(actor.state(), ActorLifecycleState::WaitingToActivate);

        actor.dispatch(ActorEvent::Activate).settled().await.unwrap();
        assert_eq!(actor.state(), ActorLifecycleState::Active);

        assert_eq!(platform.calls(), vec!["skip_waiting", "claim"]);
    }

    #[tokio::test]
    async fn test_out_of_order_lifecycle_event_is_ignored() {
        let platform = Arc::new(MockPlatform::default());
        let actor = NotificationActor::new(platform.clone());

        let ext = actor.dispatch(ActorEvent::Activate);
        assert_eq!(ext.pending(), 0);
        ext.settled().await.unwrap();

        assert_eq!(actor.state(), ActorLifecycleState::Installing);
        assert!(platform.calls().is_empty());
    }

    #[tokio::test]
    async fn test_push_without_payload_shows_default() {
        let platform = Arc::new(MockPlatform::default());
        let actor = NotificationActor::new(platform.clone());

        actor
            .dispatch(ActorEvent::Push(PushEvent::empty()))
            .settled()
            .await
            .unwrap();

        let shown = platform.shown.lock().unwrap();
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].0, "Food Keeper");
        assert_eq!(shown[0].1.body, "有即將到期的食材");
        assert_eq!(shown[0].1.icon, "/icon-192.png");
        assert_eq!(shown[0].1.badge, "/icon-192.png");
        assert_eq!(shown[0].1.data, json!({}));
    }

    #[tokio::test]
    async fn test_push_with_title_only() {
        let platform = Arc::new(MockPlatform::default());
        let actor = NotificationActor::new(platform.clone());

        actor
            .dispatch(ActorEvent::Push(PushEvent::with_data(r#"{"title":"X"}"#)))
            .settled()
            .await
            .unwrap();

        let shown = platform.shown.lock().unwrap();
        assert_eq!(shown[0].0, "X");
        assert_eq!(shown[0].1.body, "");
    }

    #[tokio::test]
    async fn test_push_with_malformed_payload_does_not_fail() {
        let platform = Arc::new(MockPlatform::default());
        let actor = NotificationActor::new(platform.clone());

        actor
            .dispatch(ActorEvent::Push(PushEvent::with_data("{oops")))
            .settled()
            .await
            .unwrap();

        let shown = platform.shown.lock().unwrap();
        assert_eq!(shown[0].0, "Food Keeper");
        assert_eq!(shown[0].1.body, "有即將到期的食材");
    }

    #[tokio::test]
    async fn test_push_platform_error_is_reported() {
        let platform = Arc::new(MockPlatform {
            fail_show: true,
            ..MockPlatform::default()
        });
        let actor = NotificationActor::new(platform);

        let result = actor.dispatch(ActorEvent::Push(PushEvent::empty())).settled().await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_click_focuses_existing_client() {
        let platform = Arc::new(MockPlatform::with_clients(&["/inventory"]));
        let actor = NotificationActor::new(platform.clone());

        actor.dispatch(click_event()).settled().await.unwrap();

        assert_eq!(platform.calls(), vec!["close:expiry", "focus:client-0"]);
        assert_eq!(
            platform.queries.lock().unwrap()[0],
            ClientQuery {
                include_uncontrolled: true
            }
        );
    }

    #[tokio::test]
    async fn test_click_focuses_first_matching_client_only() {
        let platform = Arc::new(MockPlatform::with_clients(&[
            "about:blank",
            "https://fk.local/settings",
            "https://fk.local/",
        ]));

        let outcome = route_click(platform.as_ref(), "/").await.unwrap();
        assert_eq!(outcome, ClickOutcome::Focused("client-1".to_string()));
        assert_eq!(platform.calls(), vec!["focus:client-1"]);
    }

    #[tokio::test]
    async fn test_click_without_clients_opens_window() {
        let platform = Arc::new(MockPlatform::default());
        let actor = NotificationActor::new(platform.clone());

        actor.dispatch(click_event()).settled().await.unwrap();

        // 目标固定为根路径，不使用通知 data 里的 url
        assert_eq!(platform.calls(), vec!["close:expiry", "open:/"]);
    }

    #[tokio::test]
    async fn test_click_without_clients_or_window_support_is_noop() {
        let platform = Arc::new(MockPlatform {
            no_open_window: true,
            ..MockPlatform::default()
        });

        let outcome = route_click(platform.as_ref(), "/").await.unwrap();
        assert_eq!(outcome, ClickOutcome::Ignored);
        assert!(platform.calls().is_empty());

        let actor = NotificationActor::new(platform.clone());
        actor.dispatch(click_event()).settled().await.unwrap();
        assert_eq!(platform.calls(), vec!["close:expiry"]);
    }

    #[tokio::test]
    async fn test_click_with_custom_target_ignores_unrelated_clients() {
        let platform = Arc::new(MockPlatform::with_clients(&["https://other.site/x"]));
        let config = NotificationConfig {
            target_url: "https://fk.local/".to_string(),
            ..NotificationConfig::default()
        };
        let actor = NotificationActor::new(platform.clone()).with_config(config);

        actor.dispatch(click_event()).settled().await.unwrap();

        assert_eq!(
            platform.calls(),
            vec!["close:expiry", "open:https://fk.local/"]
        );
    }

    #[tokio::test]
    async fn test_events_are_handled_in_any_phase() {
        let platform = Arc::new(MockPlatform::default());
        let actor = NotificationActor::new(platform.clone());

        let first = actor.dispatch(ActorEvent::Push(PushEvent::with_data(r#"{"title":"A"}"#)));
        let second = actor.dispatch(ActorEvent::Push(PushEvent::with_data(r#"{"title":"B"}"#)));
        first.settled().await.unwrap();
        second.settled().await.unwrap();

        let mut titles: Vec<String> = platform
            .shown
            .lock()
            .unwrap()
            .iter()
            .map(|(t, _)| t.clone())
            .collect();
        titles.sort();
        assert_eq!(titles, vec!["A", "B"]);
        assert_eq!(actor.state(), ActorLifecycleState::Installing);
    }
}
