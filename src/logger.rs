use tracing_subscriber::{
    fmt::{self, time::ChronoUtc, writer::MakeWriter},
    layer::{Layered, SubscriberExt},
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};
use tracing_appender::{non_blocking, rolling};
use anyhow::Result;

/// 文件层挂载在过滤器之上
type FilteredRegistry = Layered<EnvFilter, Registry>;

/// 日志级别枚举
#[derive(Debug, Clone, PartialEq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for &'static str {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl LogLevel {
    /// 从环境变量中的字符串解析，无法识别时返回 None
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "error" => Some(LogLevel::Error),
            "warn" | "warning" => Some(LogLevel::Warn),
            "info" => Some(LogLevel::Info),
            "debug" => Some(LogLevel::Debug),
            "trace" => Some(LogLevel::Trace),
            _ => None,
        }
    }
}

/// 日志文件滚动策略
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rotation {
    Daily,
    Hourly,
}

impl Rotation {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "daily" => Some(Rotation::Daily),
            "hourly" => Some(Rotation::Hourly),
            _ => None,
        }
    }
}

/// 日志配置结构体
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// 日志级别
    pub level: LogLevel,
    /// 日志文件目录
    pub log_dir: String,
    /// 日志文件名前缀
    pub file_prefix: String,
    /// 是否启用控制台输出
    pub console_output: bool,
    /// 文件日志是否使用JSON格式
    pub json_format: bool,
    /// 日志文件滚动策略
    pub rotation: Rotation,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            log_dir: "logs".to_string(),
            file_prefix: "skill".to_string(),
            console_output: true,
            json_format: false,
            rotation: Rotation::Daily,
        }
    }
}

/// 文件日志层，JSON 与纯文本二选一，各自构建后装箱
fn build_file_layer<W>(json_format: bool, writer: W) -> Box<dyn Layer<FilteredRegistry> + Send + Sync>
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    if json_format {
        fmt::layer()
            .json()
            .with_writer(writer)
            .with_timer(ChronoUtc::rfc_3339())
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    } else {
        fmt::layer()
            .with_writer(writer)
            .with_timer(ChronoUtc::rfc_3339())
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    }
}

/// 初始化日志系统
///
/// 重复调用会返回错误而不是 panic
pub fn init_logger(config: LogConfig) -> Result<()> {
    // 确保日志目录存在
    std::fs::create_dir_all(&config.log_dir)?;

    // 创建文件appender
    let file_appender = match config.rotation {
        Rotation::Hourly => rolling::hourly(&config.log_dir, &config.file_prefix),
        Rotation::Daily => rolling::daily(&config.log_dir, &config.file_prefix),
    };

    let (non_blocking_file, guard) = non_blocking(file_appender);

    // 创建环境过滤器
    let env_filter = EnvFilter::new(format!(
        "{}={}",
        env!("CARGO_PKG_NAME").replace("-", "_"),
        <&str>::from(config.level.clone())
    ));

    let file_layer = build_file_layer(config.json_format, non_blocking_file);

    let console_layer = config.console_output.then(|| {
        fmt::layer()
            .with_timer(ChronoUtc::rfc_3339())
            .with_ansi(true)
            .with_target(false)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .try_init()?;

    // 防止guard被丢弃
    std::mem::forget(guard);

    Ok(())
}

/// 快速初始化开发环境日志
pub fn init_dev_logger() -> Result<()> {
    let config = LogConfig {
        level: LogLevel::Debug,
        file_prefix: "dev".to_string(),
        ..LogConfig::default()
    };
    init_logger(config)
}
