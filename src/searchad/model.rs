//! 查询输入、统计结果与错误类型

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::searchad::count::parse_count;

/// 远端没有返回竞争度时的占位
pub const COMPETITION_UNKNOWN: &str = "정보없음";
/// 错误响应体最多保留的字符数
pub const REMOTE_BODY_LIMIT: usize = 500;

/// 关键词查询
#[derive(Debug, Clone, PartialEq)]
pub struct KeywordQuery {
    pub hint_keyword: String,
    pub show_detail: bool,
}

impl KeywordQuery {
    pub fn new(keyword: &str) -> Self {
        Self {
            hint_keyword: keyword.trim().to_string(),
            show_detail: true,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.hint_keyword.is_empty()
    }

    /// 查询参数，由 reqwest 负责 URL 编码
    pub fn query_pairs(&self) -> [(&'static str, String); 2] {
        [
            ("hintKeywords", self.hint_keyword.clone()),
            ("showDetail", if self.show_detail { "1" } else { "0" }.to_string()),
        ]
    }
}

/// 单个关键词的月检索量
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordStat {
    pub keyword: String,
    pub pc_count: u64,
    pub mobile_count: u64,
    pub total: u64,
    pub competition: String,
}

impl KeywordStat {
    /// total 始终由两项相加得到，溢出时封顶为 u64::MAX
    pub fn new(keyword: String, pc_count: u64, mobile_count: u64, competition: String) -> Self {
        Self {
            keyword,
            pc_count,
            mobile_count,
            total: pc_count.saturating_add(mobile_count),
            competition,
        }
    }

    /// 解析 `keywordList` 的单个元素，未知字段忽略
    pub fn from_entry(entry: &Value, fallback_keyword: &str) -> Self {
        let keyword = entry
            .get("relKeyword")
            .and_then(|v| v.as_str())
            .unwrap_or(fallback_keyword)
            .to_string();
        // 非字符串值原样转成文本，null 视为缺失
        let competition = match entry.get("compIdx") {
            None | Some(Value::Null) => COMPETITION_UNKNOWN.to_string(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        };

        Self::new(
            keyword,
            parse_count(entry.get("monthlyPcQcCnt")),
            parse_count(entry.get("monthlyMobileQcCnt")),
            competition,
        )
    }

    /// 只看第一个元素，远端会把精确匹配放在最前面
    pub fn from_response(body: &Value, fallback_keyword: &str) -> Option<Self> {
        body.get("keywordList")
            .and_then(|v| v.as_array())
            .and_then(|list| list.first())
            .map(|entry| Self::from_entry(entry, fallback_keyword))
    }
}

/// 错误分类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Unconfigured,
    Transport,
    Remote,
    NoResults,
    Internal,
}

/// 查询失败，Display 即面向用户的提示文本
#[derive(Debug, Clone, PartialEq)]
pub enum LookupError {
    /// 凭证缺失
    Unconfigured,
    /// 网络、超时、读取或解析失败
    Transport { message: String },
    /// 非 200 响应
    Remote { status: u16, body: String },
    /// 200 但没有关键词
    NoResults,
    /// 适配层自身的错误
    Internal { message: String },
}

impl LookupError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LookupError::Unconfigured => ErrorKind::Unconfigured,
            LookupError::Transport { .. } => ErrorKind::Transport,
            LookupError::Remote { .. } => ErrorKind::Remote,
            LookupError::NoResults => ErrorKind::NoResults,
            LookupError::Internal { .. } => ErrorKind::Internal,
        }
    }

    /// 构造 Remote 错误，响应体截断到 500 个字符
    pub fn remote(status: u16, body: &str) -> Self {
        LookupError::Remote {
            status,
            body: body.chars().take(REMOTE_BODY_LIMIT).collect(),
        }
    }
}

impl std::fmt::Display for LookupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LookupError::Unconfigured => write!(f, "API 키가 설정되지 않았습니다."),
            LookupError::Transport { message } => write!(f, "예외 발생: {}", message),
            LookupError::Remote { status, body } => write!(f, "코드 {}: {}", status, body),
            LookupError::NoResults => write!(f, "검색 결과가 없습니다."),
            LookupError::Internal { message } => write!(f, "서버 오류: {}", message),
        }
    }
}

impl std::error::Error for LookupError {}

impl From<reqwest::Error> for LookupError {
    fn from(error: reqwest::Error) -> Self {
        LookupError::Transport { message: error.to_string() }
    }
}

impl From<serde_json::Error> for LookupError {
    fn from(error: serde_json::Error) -> Self {
        LookupError::Transport { message: error.to_string() }
    }
}

pub type LookupResult = Result<KeywordStat, LookupError>;
