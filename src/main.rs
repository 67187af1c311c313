//! # 关键词检索量技能服务启动程序
//!
//! 读取环境变量中的凭证，启动对话平台 webhook

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use searchad_skill::{
    config::AppConfig,
    logger,
    searchad::{ClientConfig, Credentials, SearchAdClient},
    web::{AppState, WebServer},
};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    //*
    //* 读取配置并初始化日志
    //*
    let config = AppConfig::from_env();
    if let Err(e) = logger::init_logger(config.log.clone()) {
        eprintln!("Failed to initialize logger: {}", e);
        std::process::exit(1);
    }
    info!("Logger initialized successfully");

    //*
    //* 加载凭证
    //*
    let credentials = Arc::new(Credentials::from_env());
    if credentials.is_configured() {
        info!(credentials = ?credentials, "SearchAd credentials loaded");
    } else {
        warn!("SearchAd credentials missing, lookups will report unconfigured");
    }

    //*
    //* 构建客户端与服务
    //*
    let client = SearchAdClient::new_with_config(
        config.searchad_base_url.clone(),
        credentials.clone(),
        ClientConfig::default(),
    )?;
    let state = AppState::new(Arc::new(client), credentials);

    let addr: SocketAddr = config
        .bind_addr()
        .parse()
        .with_context(|| format!("Invalid bind address: {}", config.bind_addr()))?;

    WebServer::new(state).start(addr).await
}
