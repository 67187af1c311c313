//! # 运行配置
//!
//! 从环境变量读取监听端口、远端地址与日志设置

use tracing::warn;

use crate::logger::{LogConfig, LogLevel, Rotation};
use crate::searchad::DEFAULT_BASE_URL;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_BIND_HOST: &str = "0.0.0.0";

/// 进程级配置，启动时读取一次
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// 监听地址
    pub bind_host: String,
    /// 监听端口
    pub port: u16,
    /// 搜索广告 API 基础 URL
    pub searchad_base_url: String,
    /// 日志配置
    pub log: LogConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_host: DEFAULT_BIND_HOST.to_string(),
            port: DEFAULT_PORT,
            searchad_base_url: DEFAULT_BASE_URL.to_string(),
            log: LogConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_source(|name| std::env::var(name).ok())
    }

    /// 使用任意取值函数构建配置（测试时可传入 HashMap）
    pub fn from_source<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(port) = lookup("PORT") {
            match port.trim().parse::<u16>() {
                Ok(port) => config.port = port,
                Err(e) => warn!(value = %port, error = %e, "Invalid PORT, falling back to default"),
            }
        }

        if let Some(host) = lookup("BIND_HOST").filter(|v| !v.trim().is_empty()) {
            config.bind_host = host.trim().to_string();
        }

        if let Some(url) = lookup("SEARCHAD_BASE_URL").filter(|v| !v.trim().is_empty()) {
            config.searchad_base_url = url.trim().trim_end_matches('/').to_string();
        }

        if let Some(level) = lookup("LOG_LEVEL") {
            match LogLevel::parse(&level) {
                Some(level) => config.log.level = level,
                None => warn!(value = %level, "Unknown LOG_LEVEL, keeping info"),
            }
        }

        if let Some(dir) = lookup("LOG_DIR").filter(|v| !v.trim().is_empty()) {
            config.log.log_dir = dir;
        }

        if let Some(rotation) = lookup("LOG_ROTATION") {
            match Rotation::parse(&rotation) {
                Some(rotation) => config.log.rotation = rotation,
                None => warn!(value = %rotation, "Unknown LOG_ROTATION, keeping daily"),
            }
        }

        if let Some(json) = lookup("LOG_JSON") {
            config.log.json_format = matches!(json.trim(), "1" | "true" | "TRUE" | "yes");
        }

        config
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_host, self.port)
    }
}
