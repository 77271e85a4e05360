//! Food Keeper CLI
//!
//! 条码校验、品项识别、推送通知模拟

use anyhow::Result;
use clap::{Parser, Subcommand};
use food_keeper::cli::{format_output, handle_barcode, handle_simulate, BarcodeCommand, SimulateCommand};
use food_keeper::{ItemKeyResolver, KeeperConfig};
use serde::Serialize;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "fk")]
#[command(about = "Food Keeper - 食材库存工具")]
#[command(version)]
struct Cli {
    /// 配置文件路径（默认 ~/.food-keeper/config.json）
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// EAN-13 条码工具
    Barcode {
        /// 输出 JSON 格式
        #[arg(long)]
        json: bool,

        #[command(subcommand)]
        command: BarcodeCommand,
    },
    /// 识别商品名对应的品项 key
    Resolve {
        /// 商品名
        name: String,
        /// 输出 JSON 格式
        #[arg(long)]
        json: bool,
    },
    /// 列出所有品项 key
    Keys {
        /// 输出 JSON 格式
        #[arg(long)]
        json: bool,
    },
    /// 模拟推送通知事件
    Simulate {
        #[command(subcommand)]
        command: SimulateCommand,
    },
}

#[derive(Serialize)]
struct ResolveOutput<'a> {
    name: &'a str,
    item_key: Option<&'a str>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // 通过 RUST_LOG 环境变量控制日志级别，例如: RUST_LOG=debug fk simulate push
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("food_keeper=info,fk=info"));

    fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Barcode { json, command } => {
            handle_barcode(command, json)?;
        }
        Commands::Resolve { name, json } => {
            let resolver = ItemKeyResolver::new();
            let output = ResolveOutput {
                name: &name,
                item_key: resolver.resolve(Some(name.as_str())),
            };
            println!(
                "{}",
                format_output(&output, json, |o| o.item_key.unwrap_or("(none)").to_string())
            );
        }
        Commands::Keys { json } => {
            let resolver = ItemKeyResolver::new();
            let keys = resolver.item_keys();
            println!("{}", format_output(&keys, json, |k| k.join("\n")));
        }
        Commands::Simulate { command } => {
            let config = match &cli.config {
                Some(path) => KeeperConfig::load_from(path)?,
                None => KeeperConfig::load()?,
            };
            debug!(config = ?config, "Loaded config");
            handle_simulate(command, config.notification).await?;
        }
    }

    Ok(())
}
