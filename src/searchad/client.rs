//! # 搜索广告 API 客户端
//!
//! 负责单次 "关键词检索量" 调用：
//! - 预检凭证，缺失时不发起请求
//! - 签名并附加四个必需请求头
//! - 10 秒整体超时，不重试
//! - 将响应归一化为 `KeywordStat`

use async_trait::async_trait;
use reqwest::{Client as HttpClient, StatusCode};
use serde_json::Value;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::timeout;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::searchad::{
    DEFAULT_BASE_URL, KEYWORDS_TOOL_PATH,
    credentials::Credentials,
    model::{KeywordQuery, KeywordStat, LookupError, LookupResult},
    signer::SignedRequest,
};

/// 超时配置
#[derive(Debug, Clone)]
pub struct TimeoutConfig {
    /// 总请求超时时间（连接 + 响应）
    pub request_timeout: Duration,
    /// 连接超时时间
    pub connect_timeout: Duration,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(10),
            connect_timeout: Duration::from_secs(5),
        }
    }
}

impl TimeoutConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

/// 客户端配置
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// 超时配置
    pub timeout: TimeoutConfig,
    /// 用户代理
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: TimeoutConfig::default(),
            user_agent: format!("searchad-skill/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(mut self, timeout: TimeoutConfig) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: String) -> Self {
        self.user_agent = user_agent;
        self
    }
}

/// 请求上下文，用于日志关联
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// 请求唯一标识符
    pub request_id: String,
    /// 请求 URL（不含查询串）
    pub url: String,
    /// 查询关键词
    pub keyword: String,
    /// 请求开始时间
    pub start_time: Instant,
}

impl RequestContext {
    pub fn new(url: &str, keyword: &str) -> Self {
        Self {
            request_id: Uuid::new_v4().to_string(),
            url: url.to_string(),
            keyword: keyword.to_string(),
            start_time: Instant::now(),
        }
    }

    pub fn total_elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

/// 关键词检索接口
///
/// Web 适配层只依赖这个 trait
#[async_trait]
pub trait KeywordLookup: Send + Sync {
    /// 查询单个关键词
    async fn lookup(&self, keyword: &str) -> LookupResult;

    /// 是否具备发起查询的凭证
    fn is_configured(&self) -> bool;

    /// 获取客户端名称
    fn client_name(&self) -> &'static str;
}

/// Naver 搜索广告客户端
#[derive(Debug, Clone)]
pub struct SearchAdClient {
    /// HTTP 客户端，内部连接池可跨请求复用
    client: HttpClient,
    /// 客户端配置
    config: ClientConfig,
    /// 服务基础 URL
    base_url: String,
    /// 只读凭证
    credentials: Arc<Credentials>,
}

impl SearchAdClient {
    /// 使用默认地址和配置创建客户端
    pub fn new(credentials: Arc<Credentials>) -> anyhow::Result<Self> {
        Self::new_with_config(DEFAULT_BASE_URL.to_string(), credentials, ClientConfig::default())
    }

    /// 使用自定义地址和配置创建客户端
    pub fn new_with_config(
        base_url: String,
        credentials: Arc<Credentials>,
        config: ClientConfig,
    ) -> anyhow::Result<Self> {
        let client = HttpClient::builder()
            .timeout(config.timeout.request_timeout)
            .connect_timeout(config.timeout.connect_timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {}", e))?;

        Ok(Self::new_with_client(base_url, credentials, config, client))
    }

    /// 注入自定义 HTTP 客户端（用于测试）
    pub fn new_with_client(
        base_url: String,
        credentials: Arc<Credentials>,
        config: ClientConfig,
        client: HttpClient,
    ) -> Self {
        Self {
            client,
            config,
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// 查询关键词的月检索量
    pub async fn lookup_keyword(&self, keyword: &str) -> LookupResult {
        if !self.credentials.is_configured() {
            warn!("SearchAd credentials are not configured, skipping lookup");
            return Err(LookupError::Unconfigured);
        }

        let query = KeywordQuery::new(keyword);
        if query.is_empty() {
            return Err(LookupError::NoResults);
        }

        let url = format!("{}{}", self.base_url, KEYWORDS_TOOL_PATH);
        let ctx = RequestContext::new(&url, &query.hint_keyword);
        self.log_request_start(&ctx);

        let result = self.fetch(&ctx, &query).await;
        match &result {
            Ok(stat) => self.log_request_success(&ctx, stat),
            Err(e) => self.log_request_failure(&ctx, e),
        }
        result
    }

    async fn fetch(&self, ctx: &RequestContext, query: &KeywordQuery) -> LookupResult {
        // 每次调用都重新取时间戳签名
        let signed = SignedRequest::new(&self.credentials, "GET", KEYWORDS_TOOL_PATH);
        let headers = signed
            .headers(&self.credentials)
            .map_err(|e| LookupError::Transport { message: format!("invalid header value: {}", e) })?;

        let request = self
            .client
            .get(&ctx.url)
            .query(&query.query_pairs())
            .headers(headers)
            .send();

        // 超时同时覆盖发送与读取响应体
        let exchange = async {
            let response = request.await?;
            let status = response.status();
            let body = response.text().await?;
            Ok::<_, reqwest::Error>((status, body))
        };

        let (status, body) = match timeout(self.config.timeout.request_timeout, exchange).await {
            Ok(Ok(exchange)) => exchange,
            Ok(Err(e)) => {
                self.log_network_error(ctx, &e);
                return Err(e.into());
            }
            Err(_) => {
                self.log_timeout_error(ctx);
                return Err(LookupError::Transport {
                    message: format!(
                        "Request timeout after {:?}",
                        self.config.timeout.request_timeout
                    ),
                });
            }
        };

        if status != StatusCode::OK {
            self.log_api_error(ctx, status.as_u16());
            return Err(LookupError::remote(status.as_u16(), &body));
        }

        let json: Value = serde_json::from_str(&body)?;
        KeywordStat::from_response(&json, &query.hint_keyword).ok_or(LookupError::NoResults)
    }

    /// 记录请求开始日志
    fn log_request_start(&self, ctx: &RequestContext) {
        info!(
            request_id = %ctx.request_id,
            url = %ctx.url,
            keyword = %ctx.keyword,
            "Starting keyword lookup"
        );
    }

    /// 记录请求成功日志
    fn log_request_success(&self, ctx: &RequestContext, stat: &KeywordStat) {
        info!(
            request_id = %ctx.request_id,
            keyword = %stat.keyword,
            total = stat.total,
            total_elapsed_ms = ctx.total_elapsed().as_millis(),
            "Keyword lookup completed successfully"
        );
    }

    /// 记录请求失败日志
    fn log_request_failure(&self, ctx: &RequestContext, error: &LookupError) {
        warn!(
            request_id = %ctx.request_id,
            keyword = %ctx.keyword,
            error_kind = ?error.kind(),
            total_elapsed_ms = ctx.total_elapsed().as_millis(),
            error = %error,
            "Keyword lookup failed"
        );
    }

    /// 记录网络错误详细信息
    fn log_network_error(&self, ctx: &RequestContext, error: &reqwest::Error) {
        let error_details = format!(
            "is_timeout: {}, is_connect: {}, is_request: {}",
            error.is_timeout(),
            error.is_connect(),
            error.is_request(),
        );

        error!(
            request_id = %ctx.request_id,
            url = %ctx.url,
            error_type = "network_error",
            error_details = %error_details,
            error_message = %error,
            "Network error occurred"
        );
    }

    /// 记录超时错误
    fn log_timeout_error(&self, ctx: &RequestContext) {
        error!(
            request_id = %ctx.request_id,
            url = %ctx.url,
            timeout_duration_ms = self.config.timeout.request_timeout.as_millis(),
            actual_elapsed_ms = ctx.total_elapsed().as_millis(),
            error_type = "timeout_error",
            "Request timeout occurred"
        );
    }

    /// 记录 API 错误，响应体不写入日志
    fn log_api_error(&self, ctx: &RequestContext, status_code: u16) {
        debug!(
            request_id = %ctx.request_id,
            url = %ctx.url,
            status_code = status_code,
            error_type = "api_error",
            "SearchAd API returned non-200 status"
        );
    }
}

#[async_trait]
impl KeywordLookup for SearchAdClient {
    async fn lookup(&self, keyword: &str) -> LookupResult {
        self.lookup_keyword(keyword).await
    }

    fn is_configured(&self) -> bool {
        self.credentials.is_configured()
    }

    fn client_name(&self) -> &'static str {
        "NaverSearchAd"
    }
}
