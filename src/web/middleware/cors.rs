use tower_http::cors::{CorsLayer, Any};
use hyper::Method;

/// 只开放 webhook 和诊断页用到的方法
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
        ])
        .allow_headers(Any)
        .allow_origin(Any)
}
