//! 回复文本与 HTML 片段渲染

use crate::searchad::{KeywordStat, LookupResult, format_display};

pub const EMPTY_UTTERANCE_REPLY: &str = "🔍 검색할 키워드를 입력해주세요!";

/// 对话平台的回复文本
pub fn format_reply(result: &LookupResult) -> String {
    match result {
        Ok(stat) => format_success(stat),
        Err(e) => format!("❌ 조회 실패\n{}", e),
    }
}

fn format_success(stat: &KeywordStat) -> String {
    format!(
        "🔍 \"{}\" 검색량\n\n📊 월간 총: {}회\n📱 모바일: {}회\n💻 PC: {}회\n📈 경쟁도: {}",
        stat.keyword,
        format_display(stat.total),
        format_display(stat.mobile_count),
        format_display(stat.pc_count),
        stat.competition,
    )
}

/// `/test` 页面使用的 HTML 片段
pub fn format_html(keyword: &str, result: &LookupResult) -> String {
    match result {
        Ok(stat) => format!(
            "<h2>✅ \"{}\" 검색량</h2>\
             <p>📊 월간 총: {}회</p>\
             <p>📱 모바일: {}회</p>\
             <p>💻 PC: {}회</p>\
             <p>📈 경쟁도: {}</p>",
            html_escape(&stat.keyword),
            format_display(stat.total),
            format_display(stat.mobile_count),
            format_display(stat.pc_count),
            html_escape(&stat.competition),
        ),
        Err(e) => format!(
            "<h2>\"{}\"</h2><p style=\"color:red\">❌ 조회 실패: {}</p>",
            html_escape(keyword),
            html_escape(&e.to_string()),
        ),
    }
}

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
