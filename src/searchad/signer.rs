//! 请求签名
//!
//! 签名消息为 `"{timestamp}.{method}.{path}"`，以 secret 为密钥做 HMAC-SHA256，
//! 再用标准 Base64（带填充）编码。每次请求都必须重新取时间戳。

use base64::{Engine as _, engine::general_purpose};
use hmac::{Hmac, Mac};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, InvalidHeaderValue};
use sha2::Sha256;

use crate::searchad::credentials::Credentials;

type HmacSha256 = Hmac<Sha256>;

// HTTP 头名不区分大小写，HeaderName::from_static 要求小写
pub const HEADER_TIMESTAMP: &str = "x-timestamp";
pub const HEADER_API_KEY: &str = "x-api-key";
pub const HEADER_CUSTOMER: &str = "x-customer";
pub const HEADER_SIGNATURE: &str = "x-signature";

/// 计算签名，纯函数
pub fn sign(timestamp_ms: i64, method: &str, path: &str, secret: &str) -> String {
    let message = format!("{}.{}.{}", timestamp_ms, method, path);
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .expect("HMAC can take key of any size");
    mac.update(message.as_bytes());
    general_purpose::STANDARD.encode(mac.finalize().into_bytes())
}

/// 已签名的请求元数据，只在单次请求内有效
#[derive(Debug, Clone)]
pub struct SignedRequest {
    pub timestamp_ms: i64,
    pub method: String,
    pub path: String,
    pub signature_b64: String,
}

impl SignedRequest {
    /// 以当前时间签名
    pub fn new(credentials: &Credentials, method: &str, path: &str) -> Self {
        Self::at(chrono::Utc::now().timestamp_millis(), credentials, method, path)
    }

    /// 以指定时间签名
    pub fn at(timestamp_ms: i64, credentials: &Credentials, method: &str, path: &str) -> Self {
        let method = method.to_ascii_uppercase();
        // 签名路径不含查询串
        let path = path.split('?').next().unwrap_or_default().to_string();
        let signature_b64 = sign(timestamp_ms, &method, &path, credentials.secret_key());

        Self {
            timestamp_ms,
            method,
            path,
            signature_b64,
        }
    }

    /// 生成四个必需的请求头
    pub fn headers(&self, credentials: &Credentials) -> Result<HeaderMap, InvalidHeaderValue> {
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static(HEADER_TIMESTAMP),
            HeaderValue::from_str(&self.timestamp_ms.to_string())?,
        );
        headers.insert(
            HeaderName::from_static(HEADER_API_KEY),
            HeaderValue::from_str(credentials.access_key())?,
        );
        headers.insert(
            HeaderName::from_static(HEADER_CUSTOMER),
            HeaderValue::from_str(credentials.customer_id())?,
        );
        let mut signature = HeaderValue::from_str(&self.signature_b64)?;
        signature.set_sensitive(true);
        headers.insert(HeaderName::from_static(HEADER_SIGNATURE), signature);
        Ok(headers)
    }
}
