use axum::{
    extract::{Query, State},
    response::Html,
};
use serde::Deserialize;
use tracing::debug;

use crate::web::{reply::format_html, server::AppState};

pub const DEFAULT_TEST_KEYWORD: &str = "맛집";

#[derive(Debug, Deserialize)]
pub struct TestQuery {
    pub keyword: Option<String>,
}

/// 手动测试页面，HTTP 层始终返回 200
///
/// 查询串无法解析时按未提供关键词处理
pub async fn test_page(State(state): State<AppState>, query: Option<Query<TestQuery>>) -> Html<String> {
    let keyword = query
        .as_ref()
        .and_then(|Query(q)| q.keyword.as_deref())
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .unwrap_or(DEFAULT_TEST_KEYWORD)
        .to_string();

    debug!(keyword = %keyword, "Test page lookup");
    let result = state.lookup.lookup(&keyword).await;
    Html(format_html(&keyword, &result))
}
