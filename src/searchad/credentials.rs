use std::fmt;

pub const ENV_API_KEY: &str = "NAVER_API_KEY";
pub const ENV_SECRET_KEY: &str = "NAVER_SECRET_KEY";
pub const ENV_CUSTOMER_ID: &str = "NAVER_CUSTOMER_ID";

/// API 凭证，进程启动时加载一次，之后只读
#[derive(Clone, Default)]
pub struct Credentials {
    access_key: String,
    secret_key: String,
    customer_id: String,
}

impl Credentials {
    pub fn new(
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
        customer_id: impl Into<String>,
    ) -> Self {
        Self {
            access_key: access_key.into(),
            secret_key: secret_key.into(),
            customer_id: customer_id.into(),
        }
    }

    /// 从环境变量读取，未设置的项为空字符串
    pub fn from_env() -> Self {
        Self::from_source(|name| std::env::var(name).ok())
    }

    pub fn from_source<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::new(
            lookup(ENV_API_KEY).unwrap_or_default(),
            lookup(ENV_SECRET_KEY).unwrap_or_default(),
            lookup(ENV_CUSTOMER_ID).unwrap_or_default(),
        )
    }

    pub fn access_key(&self) -> &str {
        &self.access_key
    }

    pub fn secret_key(&self) -> &str {
        &self.secret_key
    }

    pub fn customer_id(&self) -> &str {
        &self.customer_id
    }

    /// 三项均非空才视为已配置
    pub fn is_configured(&self) -> bool {
        !self.access_key.is_empty() && !self.secret_key.is_empty() && !self.customer_id.is_empty()
    }

    /// 诊断页使用的预览：前四个字符加省略号，空值显示 "없음"
    pub fn preview(value: &str) -> String {
        if value.is_empty() {
            return "없음".to_string();
        }
        let head: String = value.chars().take(4).collect();
        format!("{}...", head)
    }

    pub fn access_key_preview(&self) -> String {
        Self::preview(&self.access_key)
    }

    pub fn secret_key_preview(&self) -> String {
        Self::preview(&self.secret_key)
    }

    pub fn customer_id_preview(&self) -> String {
        Self::preview(&self.customer_id)
    }
}

// 避免密钥出现在日志中
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key", &self.access_key_preview())
            .field("secret_key", &if self.secret_key.is_empty() { "<empty>" } else { "<redacted>" })
            .field("customer_id", &self.customer_id_preview())
            .finish()
    }
}
