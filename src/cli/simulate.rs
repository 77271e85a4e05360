//! Simulate 命令 - 用控制台平台驱动通知 actor
//!
//! actor 先走完 install / activate，再处理一次 push 或点击，
//! 每个平台操作以一行 JSON 输出到 stdout。

use anyhow::Result;
use clap::Subcommand;
use std::sync::Arc;
use tracing::info;

use crate::config::NotificationConfig;
use crate::notification::{
    ActorEvent, ConsolePlatform, DisplayedNotification, NotificationActor,
    NotificationClickEvent, PushEvent, WindowClient,
};

/// Simulate 子命令
#[derive(Subcommand, Debug)]
pub enum SimulateCommand {
    /// 模拟一次推送
    Push {
        /// 原始 payload（JSON），省略时视为空推送
        #[arg(long)]
        payload: Option<String>,
    },
    /// 模拟点击通知
    Click {
        /// 已打开窗口的 URL（可重复）
        #[arg(long = "client")]
        clients: Vec<String>,
        /// 平台不支持打开新窗口
        #[arg(long)]
        no_open_window: bool,
    },
}

/// 处理 simulate 命令
pub async fn handle_simulate(command: SimulateCommand, config: NotificationConfig) -> Result<()> {
    let (platform, event) = match command {
        SimulateCommand::Push { payload } => {
            let event = match payload {
                Some(raw) => PushEvent::with_data(raw),
                None => PushEvent::empty(),
            };
            (ConsolePlatform::new(Vec::new()), ActorEvent::Push(event))
        }
        SimulateCommand::Click {
            clients,
            no_open_window,
        } => {
            let clients = clients
                .into_iter()
                .enumerate()
                .map(|(i, url)| WindowClient::new(format!("window-{}", i + 1), url))
                .collect();
            let event = ActorEvent::NotificationClick(NotificationClickEvent {
                notification: DisplayedNotification::new("simulated", config.app_name.clone()),
            });
            (
                ConsolePlatform::new(clients).with_open_window(!no_open_window),
                event,
            )
        }
    };

    let actor = NotificationActor::new(Arc::new(platform)).with_config(config);
    actor.dispatch(ActorEvent::Install).settled().await?;
    actor.dispatch(ActorEvent::Activate).settled().await?;
    info!(state = %actor.state(), "Actor ready");

    actor.dispatch(event).settled().await
}
