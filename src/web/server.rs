use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use std::net::SocketAddr;
use std::sync::Arc;
use anyhow::Result;
use tracing::info;

use crate::searchad::{Credentials, KeywordLookup};
use crate::web::{
    handlers::{
        health_handler::{health_check, index_page},
        skill_handler::skill_webhook,
        test_handler::test_page,
    },
    middleware::cors::cors_layer,
};

/// 所有处理器共享的只读状态
#[derive(Clone)]
pub struct AppState {
    pub lookup: Arc<dyn KeywordLookup>,
    pub credentials: Arc<Credentials>,
}

impl AppState {
    pub fn new(lookup: Arc<dyn KeywordLookup>, credentials: Arc<Credentials>) -> Self {
        Self { lookup, credentials }
    }
}

pub struct WebServer {
    state: AppState,
}

impl WebServer {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub async fn start(&self, addr: SocketAddr) -> Result<()> {
        let app = self.create_app();

        info!(%addr, client = self.state.lookup.client_name(), "Skill server listening");
        println!("🌐 技能服务启动中: http://{}", addr);
        println!("🔗 测试页面: http://{}/test?keyword=맛집", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("Skill server stopped");
        Ok(())
    }

    pub fn create_app(&self) -> Router {
        Router::new()
            .route("/", get(index_page))
            .route("/health", get(health_check))
            .route("/test", get(test_page))
            .route("/skill", post(skill_webhook))
            .layer(
                ServiceBuilder::new()
                    .layer(cors_layer())
            )
            .with_state(self.state.clone())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
