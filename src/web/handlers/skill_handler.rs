use axum::{
    body::Bytes,
    extract::{State, rejection::BytesRejection},
    response::Json,
};
use tracing::{info, warn};

use crate::searchad::LookupError;
use crate::web::{
    dto::skill_dto::{SkillRequest, SkillResponse},
    reply::{EMPTY_UTTERANCE_REPLY, format_reply},
    server::AppState,
};

/// 对话平台 webhook
///
/// 平台把非 2xx 视为技能失败，所以任何结果都以 200 返回
pub async fn skill_webhook(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Json<SkillResponse> {
    // 请求体过大或读取失败同样以文本回复
    let body = match body {
        Ok(body) => body,
        Err(e) => {
            warn!(error = %e, "Failed to read skill request body");
            let error = LookupError::Internal { message: e.to_string() };
            return Json(SkillResponse::simple_text(error.to_string()));
        }
    };

    let request: SkillRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            warn!(error = %e, "Failed to decode skill request envelope");
            let error = LookupError::Internal { message: e.to_string() };
            return Json(SkillResponse::simple_text(error.to_string()));
        }
    };

    let keyword = request.keyword();
    if keyword.is_empty() {
        return Json(SkillResponse::simple_text(EMPTY_UTTERANCE_REPLY));
    }

    info!(keyword = %keyword, "Skill request received");
    let result = state.lookup.lookup(keyword).await;
    Json(SkillResponse::simple_text(format_reply(&result)))
}
