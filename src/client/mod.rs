//! Client - habla 服务端的客户端
//!
//! - api: HTTP 调用
//! - orchestrator: 语言/音色/文本与合成流程状态机
//! - playback: 音频播放、下载

mod api;
mod orchestrator;
mod playback;

pub use api::{ClientError, HttpTtsApi, TtsApi};
pub use orchestrator::{
    Effect, Event, Orchestrator, OrchestratorOptions, OrchestratorState, INPUT_REQUIRED,
    VOICES_LOAD_FAILED,
};
pub use playback::{
    format_time, AudioOutput, AudioPlayer, CommandAudioOutput, PlaybackError, PlaybackEvent,
    PlaybackSession, DOWNLOAD_FILE_NAME,
};
