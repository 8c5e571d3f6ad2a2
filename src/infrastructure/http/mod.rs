//! HTTP Layer - RESTful API
//!
//! 两个业务端点（音色目录、语音合成）和健康检查

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use routes::create_routes;
pub use server::HttpServer;
pub use state::AppState;
