//! Application State
//!
//! 提供方客户端在启动时构造一次，由所有请求共享

use std::sync::Arc;

use crate::application::{ListVoicesHandler, SynthesizeSpeechHandler, TtsProviderPort};

/// 应用状态
pub struct AppState {
    // ========== Ports ==========
    pub provider: Arc<dyn TtsProviderPort>,

    // ========== Command Handlers ==========
    pub synthesize_handler: SynthesizeSpeechHandler,

    // ========== Query Handlers ==========
    pub list_voices_handler: ListVoicesHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(provider: Arc<dyn TtsProviderPort>) -> Self {
        Self {
            provider: provider.clone(),
            synthesize_handler: SynthesizeSpeechHandler::new(provider.clone()),
            list_voices_handler: ListVoicesHandler::new(provider),
        }
    }
}
