use axum::{
    extract::State,
    response::{Html, Json},
};
use serde_json::{json, Value};

use crate::web::server::AppState;

/// 健康检查端点
pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "configured": state.lookup.is_configured(),
    }))
}

/// 诊断首页，显示凭证是否加载
pub async fn index_page(State(state): State<AppState>) -> Html<String> {
    let creds = &state.credentials;
    Html(format!(
        "<h1>🔍 검색량 조회 스킬</h1>\
         <p>API_KEY: {}</p>\
         <p>SECRET_KEY: {}</p>\
         <p>CUSTOMER_ID: {}</p>\
         <p><a href=\"/test?keyword=맛집\">테스트: 맛집</a></p>",
        creds.access_key_preview(),
        creds.secret_key_preview(),
        creds.customer_id_preview(),
    ))
}
