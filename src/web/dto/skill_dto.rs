//! 对话平台的请求与响应信封

use serde::{Deserialize, Serialize};

pub const SKILL_RESPONSE_VERSION: &str = "2.0";

/// 平台请求，只关心 `userRequest.utterance`
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillRequest {
    #[serde(default)]
    pub user_request: UserRequest,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UserRequest {
    #[serde(default)]
    pub utterance: String,
}

impl SkillRequest {
    /// 去除首尾空白后的用户输入
    pub fn keyword(&self) -> &str {
        self.user_request.utterance.trim()
    }
}

/// 平台响应信封
#[derive(Debug, Serialize, Deserialize)]
pub struct SkillResponse {
    pub version: String,
    pub template: SkillTemplate,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SkillTemplate {
    pub outputs: Vec<SkillOutput>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillOutput {
    pub simple_text: SimpleText,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SimpleText {
    pub text: String,
}

impl SkillResponse {
    /// 单条文本回复
    pub fn simple_text(text: impl Into<String>) -> Self {
        Self {
            version: SKILL_RESPONSE_VERSION.to_string(),
            template: SkillTemplate {
                outputs: vec![SkillOutput {
                    simple_text: SimpleText { text: text.into() },
                }],
            },
        }
    }
}
