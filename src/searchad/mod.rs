//! # Naver 搜索广告 API 模块
//!
//! 核心部分：
//! - 凭证持有（credentials）
//! - HMAC-SHA256 请求签名（signer）
//! - 关键词检索量查询与响应归一化（client）
//! - 数量解析与千分位格式化（count）

pub mod client;
pub mod count;
pub mod credentials;
pub mod model;
pub mod signer;

pub use client::{ClientConfig, KeywordLookup, SearchAdClient, TimeoutConfig};
pub use count::{format_display, parse_count};
pub use credentials::Credentials;
pub use model::{ErrorKind, KeywordQuery, KeywordStat, LookupError, LookupResult};
pub use signer::{sign, SignedRequest};

/// 远端服务基础 URL
pub const DEFAULT_BASE_URL: &str = "https://api.searchad.naver.com";
/// 关键词工具路径
pub const KEYWORDS_TOOL_PATH: &str = "/keywordstool";
