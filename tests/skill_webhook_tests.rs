//! # Webhook 端到端测试
//!
//! 路由在进程内通过 oneshot 调用，远端服务由 mockito 模拟

use axum::{
    body::{Body, to_bytes},
    http::{Request, StatusCode},
    Router,
};
use mockito::{Matcher, Mock, Server, ServerGuard};
use searchad_skill::{
    searchad::{ClientConfig, Credentials, SearchAdClient},
    web::{AppState, WebServer},
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn configured() -> Credentials {
    Credentials::new("test-access", "testsecret", "1234567")
}

fn create_app(server: &ServerGuard, credentials: Credentials) -> Router {
    let credentials = Arc::new(credentials);
    let http = reqwest::Client::builder().no_proxy().build().unwrap();
    let client = SearchAdClient::new_with_client(
        server.url(),
        credentials.clone(),
        ClientConfig::default(),
        http,
    );
    WebServer::new(AppState::new(Arc::new(client), credentials)).create_app()
}

async fn mock_remote(server: &mut ServerGuard, status: usize, body: String) -> Mock {
    server
        .mock("GET", "/keywordstool")
        .match_query(Matcher::Any)
        .with_status(status)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await
}

async fn post_skill(app: Router, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/skill")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn get_text(app: Router, uri: &str) -> (StatusCode, String) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

fn reply_text(envelope: &Value) -> &str {
    assert_eq!(envelope["version"], "2.0");
    envelope["template"]["outputs"][0]["simpleText"]["text"]
        .as_str()
        .unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========== /skill ==========

    #[tokio::test]
    async fn test_skill_happy_path() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/keywordstool")
            .match_query(Matcher::UrlEncoded("hintKeywords".into(), "맛집".into()))
            .with_status(200)
            .with_body(
                json!({"keywordList":[{"relKeyword":"맛집","monthlyPcQcCnt":12000,"monthlyMobileQcCnt":88000,"compIdx":"높음"}]})
                    .to_string(),
            )
            .expect(1)
            .create_async()
            .await;

        let app = create_app(&server, configured());
        let (status, envelope) = post_skill(app, r#"{"userRequest":{"utterance":"맛집"}}"#).await;
        let text = reply_text(&envelope);

        assert_eq!(status, StatusCode::OK);
        assert!(text.contains("\"맛집\" 검색량"));
        assert!(text.contains("월간 총: 100,000회"));
        assert!(text.contains("모바일: 88,000회"));
        assert!(text.contains("PC: 12,000회"));
        assert!(text.contains("경쟁도: 높음"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_skill_masked_small_counts() {
        let mut server = Server::new_async().await;
        let _mock = mock_remote(
            &mut server,
            200,
            json!({"keywordList":[{"relKeyword":"희귀","monthlyPcQcCnt":"< 10","monthlyMobileQcCnt":"< 10","compIdx":"낮음"}]})
                .to_string(),
        )
        .await;

        let app = create_app(&server, configured());
        let (_, envelope) = post_skill(app, r#"{"userRequest":{"utterance":"희귀"}}"#).await;
        let text = reply_text(&envelope);

        assert!(text.contains("월간 총: 10회"));
        assert!(text.contains("모바일: 5회"));
        assert!(text.contains("PC: 5회"));
        assert!(text.contains("경쟁도: 낮음"));
    }

    #[tokio::test]
    async fn test_skill_empty_result() {
        let mut server = Server::new_async().await;
        let _mock = mock_remote(&mut server, 200, r#"{"keywordList":[]}"#.to_string()).await;

        let app = create_app(&server, configured());
        let (status, envelope) = post_skill(app, r#"{"userRequest":{"utterance":"없는키워드"}}"#).await;
        let text = reply_text(&envelope);

        assert_eq!(status, StatusCode::OK);
        assert!(text.starts_with("❌ 조회 실패"));
        assert!(text.contains("검색 결과가 없습니다."));
    }

    #[tokio::test]
    async fn test_skill_remote_error() {
        let mut server = Server::new_async().await;
        let _mock = mock_remote(&mut server, 401, "unauthorized".to_string()).await;

        let app = create_app(&server, configured());
        let (status, envelope) = post_skill(app, r#"{"userRequest":{"utterance":"맛집"}}"#).await;
        let text = reply_text(&envelope);

        assert_eq!(status, StatusCode::OK);
        assert!(text.contains("코드 401"));
        assert!(text.contains("unauthorized"));
    }

    #[tokio::test]
    async fn test_skill_unconfigured_makes_no_call() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/keywordstool")
            .match_query(Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let app = create_app(&server, Credentials::new("", "", ""));
        let (status, envelope) = post_skill(app, r#"{"userRequest":{"utterance":"맛집"}}"#).await;

        assert_eq!(status, StatusCode::OK);
        assert!(reply_text(&envelope).contains("API 키가 설정되지 않았습니다."));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_skill_empty_utterance_makes_no_call() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/keywordstool")
            .match_query(Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let app = create_app(&server, configured());
        let (status, envelope) = post_skill(app, r#"{"userRequest":{"utterance":"   "}}"#).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(reply_text(&envelope), "🔍 검색할 키워드를 입력해주세요!");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_skill_missing_utterance_treated_as_empty() {
        let server = Server::new_async().await;
        let app = create_app(&server, configured());
        let (_, envelope) = post_skill(app, r#"{"intent":{"name":"fallback"}}"#).await;

        assert_eq!(reply_text(&envelope), "🔍 검색할 키워드를 입력해주세요!");
    }

    #[tokio::test]
    async fn test_skill_malformed_body_returns_server_error_text() {
        let server = Server::new_async().await;
        let app = create_app(&server, configured());
        let (status, envelope) = post_skill(app, "not json").await;

        assert_eq!(status, StatusCode::OK);
        assert!(reply_text(&envelope).starts_with("서버 오류: "));
    }

    #[tokio::test]
    async fn test_skill_oversized_body_returns_server_error_text() {
        let server = Server::new_async().await;
        let app = create_app(&server, configured());
        // 超过默认 2 MB 的请求体上限
        let utterance = "가".repeat(1024 * 1024);
        let body = json!({"userRequest": {"utterance": utterance}}).to_string();
        let (status, envelope) = post_skill(app, &body).await;

        assert_eq!(status, StatusCode::OK);
        assert!(reply_text(&envelope).starts_with("서버 오류: "));
    }

    // ========== 诊断与测试页面 ==========

    #[tokio::test]
    async fn test_index_page_shows_previews() {
        let server = Server::new_async().await;
        let app = create_app(&server, Credentials::new("abcdefgh", "", "1234567"));
        let (status, html) = get_text(app, "/").await;

        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("abcd..."));
        assert!(html.contains("없음"));
        assert!(html.contains("1234..."));
        assert!(!html.contains("abcdefgh"));
        assert!(html.contains("/test?keyword=맛집"));
    }

    #[tokio::test]
    async fn test_test_page_defaults_keyword() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/keywordstool")
            .match_query(Matcher::UrlEncoded("hintKeywords".into(), "맛집".into()))
            .with_status(200)
            .with_body(
                json!({"keywordList":[{"relKeyword":"맛집","monthlyPcQcCnt":"1,000","monthlyMobileQcCnt":2500,"compIdx":"중간"}]})
                    .to_string(),
            )
            .expect(1)
            .create_async()
            .await;

        let app = create_app(&server, configured());
        let (status, html) = get_text(app, "/test").await;

        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("3,500회"));
        assert!(html.contains("2,500회"));
        assert!(html.contains("1,000회"));
        assert!(html.contains("중간"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_test_page_repeated_keyword_still_renders() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/keywordstool")
            .match_query(Matcher::UrlEncoded("hintKeywords".into(), "맛집".into()))
            .with_status(200)
            .with_body(json!({"keywordList": []}).to_string())
            .expect(1)
            .create_async()
            .await;

        let app = create_app(&server, configured());
        let (status, html) = get_text(app, "/test?keyword=a&keyword=b").await;

        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("맛집"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_test_page_error_is_red_and_200() {
        let mut server = Server::new_async().await;
        let _mock = mock_remote(&mut server, 403, "forbidden".to_string()).await;

        let app = create_app(&server, configured());
        let (status, html) = get_text(app, "/test?keyword=%EC%B9%B4%ED%8E%98").await;

        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("color:red"));
        assert!(html.contains("코드 403: forbidden"));
        assert!(html.contains("카페"));
    }

    #[tokio::test]
    async fn test_health_reports_configuration() {
        let server = Server::new_async().await;
        let app = create_app(&server, Credentials::new("", "", ""));
        let (status, body) = get_text(app, "/health").await;
        let value: Value = serde_json::from_str(&body).unwrap();

        assert_eq!(status, StatusCode::OK);
        assert_eq!(value["status"], "healthy");
        assert_eq!(value["configured"], false);
    }
}
