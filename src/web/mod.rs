//! # Web 适配层
//!
//! 对接对话平台的 webhook，以及诊断和手动测试页面

pub mod server;
pub mod handlers;
pub mod dto;
pub mod middleware;
pub mod reply;

pub use server::{AppState, WebServer};
