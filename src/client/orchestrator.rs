//! Client Orchestrator - 语言/音色/文本选择与合成流程的状态机
//!
//! 用户动作返回 [`Effect`]，由 [`Orchestrator::dispatch`] 对 [`TtsApi`] 执行，
//! 结果以 [`Event`] 回送到 [`Orchestrator::apply`]。

use crate::domain::synthesis::{SynthesisRequest, RECOMMENDED_MAX_CHARS};
use crate::domain::voice::{Voice, DEFAULT_LANGUAGE};

use super::api::{ClientError, TtsApi};

/// 目录加载失败提示
pub const VOICES_LOAD_FAILED: &str = "Error al cargar las voces disponibles";

/// 文本或音色缺失提示
pub const INPUT_REQUIRED: &str = "Por favor ingrese texto y seleccione una voz";

/// 编排器状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrchestratorState {
    Idle,
    VoicesLoading,
    Ready,
    Generating,
    Error(String),
}

/// 需要访问服务端的副作用
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchVoices { language_code: String },
    Synthesize(SynthesisRequest),
}

/// 副作用完成后回送的事件
#[derive(Debug, Clone)]
pub enum Event {
    VoicesLoaded {
        language_code: String,
        result: Result<Vec<Voice>, ClientError>,
    },
    AudioGenerated(Result<String, ClientError>),
}

/// 编排器选项
#[derive(Debug, Clone, Default)]
pub struct OrchestratorOptions {
    /// 丢弃语言已不匹配当前选择的目录响应
    pub discard_stale_catalogs: bool,
}

/// 客户端编排器
#[derive(Debug)]
pub struct Orchestrator {
    options: OrchestratorOptions,
    state: OrchestratorState,
    text: String,
    language_code: String,
    voices: Vec<Voice>,
    selected_voice: Option<String>,
    audio_content: Option<String>,
    notice: Option<&'static str>,
    /// 合成请求在途（切换语言不会清除）
    synthesis_pending: bool,
    /// 目录加载期间到达的合成错误，目录就绪后展示
    deferred_error: Option<String>,
}

impl Default for Orchestrator {
    fn default() -> Self {
        Self::new(OrchestratorOptions::default())
    }
}

impl Orchestrator {
    pub fn new(options: OrchestratorOptions) -> Self {
        Self {
            options,
            state: OrchestratorState::Idle,
            text: String::new(),
            language_code: DEFAULT_LANGUAGE.to_string(),
            voices: Vec::new(),
            selected_voice: None,
            audio_content: None,
            notice: None,
            synthesis_pending: false,
            deferred_error: None,
        }
    }

    // ========================================================================
    // 用户动作
    // ========================================================================

    /// 初次挂载：加载默认语言的目录
    pub fn mount(&mut self) -> Effect {
        let language_code = self.language_code.clone();
        self.select_language(language_code)
    }

    /// 切换语言，清空已选音色并重新加载目录
    ///
    /// 在途的合成请求保持在途，其结果仍会被应用
    pub fn select_language(&mut self, language_code: impl Into<String>) -> Effect {
        self.language_code = language_code.into();
        self.selected_voice = None;
        self.state = OrchestratorState::VoicesLoading;

        Effect::FetchVoices {
            language_code: self.language_code.clone(),
        }
    }

    pub fn select_voice(&mut self, voice_name: impl Into<String>) {
        self.selected_voice = Some(voice_name.into());
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// 请求合成
    ///
    /// 合成请求在途时忽略；文本为空白或未选音色时只设置提示，不访问服务端
    pub fn generate(&mut self) -> Option<Effect> {
        if self.synthesis_pending {
            return None;
        }

        let voice_name = match &self.selected_voice {
            Some(voice) if !self.text.trim().is_empty() => voice.clone(),
            _ => {
                self.notice = Some(INPUT_REQUIRED);
                return None;
            }
        };

        let request = match SynthesisRequest::new(
            self.text.clone(),
            voice_name,
            self.language_code.clone(),
        ) {
            Ok(request) => request,
            Err(_) => {
                self.notice = Some(INPUT_REQUIRED);
                return None;
            }
        };

        self.audio_content = None;
        self.notice = None;
        self.deferred_error = None;
        self.synthesis_pending = true;
        self.state = OrchestratorState::Generating;

        Some(Effect::Synthesize(request))
    }

    // ========================================================================
    // 事件
    // ========================================================================

    /// 应用副作用结果
    pub fn apply(&mut self, event: Event) {
        match event {
            Event::VoicesLoaded {
                language_code,
                result,
            } => self.apply_catalog(language_code, result),
            Event::AudioGenerated(result) => self.apply_audio(result),
        }
    }

    fn apply_catalog(&mut self, language_code: String, result: Result<Vec<Voice>, ClientError>) {
        if self.options.discard_stale_catalogs && language_code != self.language_code {
            tracing::debug!(
                response = %language_code,
                current = %self.language_code,
                "Discarding stale voice catalog"
            );
            return;
        }

        match result {
            Ok(voices) => {
                if self.selected_voice.is_none() {
                    self.selected_voice = voices.first().map(|v| v.name().to_string());
                }
                self.voices = voices;
                self.state = if self.synthesis_pending {
                    OrchestratorState::Generating
                } else if let Some(message) = self.deferred_error.take() {
                    OrchestratorState::Error(message)
                } else {
                    OrchestratorState::Ready
                };
            }
            Err(err) => {
                tracing::warn!(language_code = %language_code, error = %err, "Failed to load voices");
                self.voices.clear();
                if let Some(message) = self.deferred_error.take() {
                    tracing::warn!(error = %message, "Speech generation error superseded by catalog error");
                }
                self.state = OrchestratorState::Error(VOICES_LOAD_FAILED.to_string());
            }
        }
    }

    fn apply_audio(&mut self, result: Result<String, ClientError>) {
        self.synthesis_pending = false;
        // 目录仍在加载时，状态留给目录结果决定
        let catalog_loading = self.state == OrchestratorState::VoicesLoading;

        match result {
            Ok(audio_content) => {
                self.audio_content = Some(audio_content);
                if self.state == OrchestratorState::Generating {
                    self.state = OrchestratorState::Ready;
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "Speech generation failed");
                if catalog_loading {
                    self.deferred_error = Some(err.user_message());
                } else {
                    self.state = OrchestratorState::Error(err.user_message());
                }
            }
        }
    }

    /// 执行副作用并应用结果
    pub async fn dispatch(&mut self, api: &dyn TtsApi, effect: Effect) {
        let event = match effect {
            Effect::FetchVoices { language_code } => {
                let result = api.fetch_voices(&language_code).await;
                Event::VoicesLoaded {
                    language_code,
                    result,
                }
            }
            Effect::Synthesize(request) => Event::AudioGenerated(api.generate(&request).await),
        };
        self.apply(event);
    }

    // ========================================================================
    // 读取
    // ========================================================================

    pub fn state(&self) -> &OrchestratorState {
        &self.state
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn language_code(&self) -> &str {
        &self.language_code
    }

    pub fn voices(&self) -> &[Voice] {
        &self.voices
    }

    pub fn selected_voice(&self) -> Option<&str> {
        self.selected_voice.as_deref()
    }

    pub fn audio_content(&self) -> Option<&str> {
        self.audio_content.as_deref()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            OrchestratorState::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn voices_available(&self) -> usize {
        self.voices.len()
    }

    pub fn text_length(&self) -> usize {
        self.text.chars().count()
    }

    pub fn exceeds_recommended_length(&self) -> bool {
        self.text_length() > RECOMMENDED_MAX_CHARS
    }

    /// 生成按钮是否可用
    pub fn can_generate(&self) -> bool {
        !self.synthesis_pending
            && !self.text.trim().is_empty()
            && self.selected_voice.is_some()
    }
}
