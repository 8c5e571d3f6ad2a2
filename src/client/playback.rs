//! Audio Playback - 生成音频的播放与下载
//!
//! 解码后的音频写入临时 `.mp3` 文件，由 [`PlaybackSession`] 独占；
//! 加载新音频或丢弃播放器时文件被删除。

use base64::{engine::general_purpose::STANDARD, Engine};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use tempfile::NamedTempFile;
use thiserror::Error;

use crate::domain::synthesis::AudioEncoding;

/// 下载文件名
pub const DOWNLOAD_FILE_NAME: &str = "generated-audio.mp3";

/// 播放错误
#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("Invalid audio payload: {0}")]
    InvalidPayload(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Audio output error: {0}")]
    Output(String),
}

/// 播放器事件（来自音频设备）
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlaybackEvent {
    LoadedMetadata { duration: f64 },
    TimeUpdate { current_time: f64 },
    Ended,
}

/// 音频输出设备
pub trait AudioOutput {
    /// 从 `position` 秒处开始播放
    fn play(&mut self, source: &Path, position: f64) -> Result<(), PlaybackError>;

    fn pause(&mut self) -> Result<(), PlaybackError>;
}

/// 一次加载的音频资源
#[derive(Debug)]
pub struct PlaybackSession {
    file: NamedTempFile,
    size: usize,
}

impl PlaybackSession {
    fn from_base64(audio_base64: &str) -> Result<Self, PlaybackError> {
        let bytes = STANDARD
            .decode(audio_base64.trim())
            .map_err(|e| PlaybackError::InvalidPayload(e.to_string()))?;
        if bytes.is_empty() {
            return Err(PlaybackError::InvalidPayload("empty audio".to_string()));
        }

        let suffix = format!(".{}", AudioEncoding::Mp3.extension());
        let mut file = tempfile::Builder::new()
            .prefix("habla-")
            .suffix(&suffix)
            .tempfile()?;
        file.write_all(&bytes)?;
        file.flush()?;

        Ok(Self {
            file,
            size: bytes.len(),
        })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn size(&self) -> usize {
        self.size
    }
}

/// 音频播放器
#[derive(Debug, Default)]
pub struct AudioPlayer {
    session: Option<PlaybackSession>,
    is_playing: bool,
    duration: f64,
    current_time: f64,
}

impl AudioPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// 加载 base64 音频；先释放上一次的资源。`None` 时播放器为空
    pub fn load(&mut self, audio_base64: Option<&str>) -> Result<(), PlaybackError> {
        self.release();

        let Some(payload) = audio_base64.filter(|p| !p.trim().is_empty()) else {
            return Ok(());
        };

        let session = PlaybackSession::from_base64(payload)?;
        tracing::debug!(path = ?session.path(), size = session.size(), "Audio loaded");
        self.session = Some(session);
        Ok(())
    }

    /// 释放当前音频资源
    pub fn release(&mut self) {
        if let Some(session) = self.session.take() {
            tracing::debug!(path = ?session.path(), "Releasing audio");
        }
        self.is_playing = false;
        self.duration = 0.0;
        self.current_time = 0.0;
    }

    /// 播放/暂停切换；暂停保留当前位置
    pub fn toggle_play(&mut self, output: &mut dyn AudioOutput) -> Result<(), PlaybackError> {
        let Some(session) = &self.session else {
            return Ok(());
        };

        if self.is_playing {
            output.pause()?;
            self.is_playing = false;
        } else {
            output.play(session.path(), self.current_time)?;
            self.is_playing = true;
        }
        Ok(())
    }

    pub fn handle_event(&mut self, event: PlaybackEvent) {
        match event {
            PlaybackEvent::LoadedMetadata { duration } => self.duration = duration,
            PlaybackEvent::TimeUpdate { current_time } => self.current_time = current_time,
            PlaybackEvent::Ended => {
                self.is_playing = false;
                self.current_time = 0.0;
            }
        }
    }

    /// 将音频保存为 `dir/generated-audio.mp3`，没有音频时返回 `None`
    pub fn download(&self, dir: &Path) -> Result<Option<PathBuf>, PlaybackError> {
        let Some(session) = &self.session else {
            return Ok(None);
        };

        let target = dir.join(DOWNLOAD_FILE_NAME);
        std::fs::copy(session.path(), &target)?;
        tracing::info!(path = ?target, "Audio saved");
        Ok(Some(target))
    }

    pub fn has_audio(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&PlaybackSession> {
        self.session.as_ref()
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    /// 进度百分比 (0..=100)
    pub fn progress_percent(&self) -> f64 {
        if self.duration > 0.0 && self.duration.is_finite() {
            (self.current_time / self.duration * 100.0).clamp(0.0, 100.0)
        } else {
            0.0
        }
    }
}

/// 格式化为 `m:ss`
pub fn format_time(secs: f64) -> String {
    if !secs.is_finite() || secs <= 0.0 {
        return "0:00".to_string();
    }
    let total = secs.floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

/// 通过外部程序播放（如 mpv、ffplay、afplay）
#[derive(Debug)]
pub struct CommandAudioOutput {
    program: String,
    args: Vec<String>,
    start_flag: Option<String>,
    child: Option<Child>,
}

impl CommandAudioOutput {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            start_flag: None,
            child: None,
        }
    }

    /// mpv：无界面播放，支持从指定位置开始
    pub fn mpv() -> Self {
        Self::new("mpv")
            .with_args(["--no-video", "--really-quiet"])
            .with_start_flag("--start=")
    }

    /// ffplay：播放完自动退出，不打开窗口
    pub fn ffplay() -> Self {
        Self::new("ffplay")
            .with_args(["-autoexit", "-nodisp", "-loglevel", "error"])
            .with_start_flag("-ss")
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// 起播位置参数；以 `=` 结尾时秒数直接拼接，否则作为下一个参数
    pub fn with_start_flag(mut self, flag: impl Into<String>) -> Self {
        self.start_flag = Some(flag.into());
        self
    }

    /// 等待当前播放结束
    pub fn wait(&mut self) -> Result<(), PlaybackError> {
        if let Some(mut child) = self.child.take() {
            let status = child.wait()?;
            if !status.success() {
                return Err(PlaybackError::Output(format!(
                    "{} exited with {}",
                    self.program, status
                )));
            }
        }
        Ok(())
    }

    fn stop(&mut self) -> Result<(), PlaybackError> {
        if let Some(mut child) = self.child.take() {
            // 进程可能已自然退出
            let _ = child.kill();
            child.wait()?;
        }
        Ok(())
    }
}

impl AudioOutput for CommandAudioOutput {
    fn play(&mut self, source: &Path, position: f64) -> Result<(), PlaybackError> {
        self.stop()?;

        let mut command = Command::new(&self.program);
        command.args(&self.args);
        if let Some(flag) = self.start_flag.as_deref().filter(|_| position > 0.0) {
            let secs = format!("{:.3}", position);
            if flag.ends_with('=') {
                command.arg(format!("{}{}", flag, secs));
            } else {
                command.arg(flag).arg(secs);
            }
        }
        command
            .arg(source)
            .stdin(Stdio::null())
            .stdout(Stdio::null());

        let child = command
            .spawn()
            .map_err(|e| PlaybackError::Output(format!("failed to start {}: {}", self.program, e)))?;
        self.child = Some(child);
        Ok(())
    }

    fn pause(&mut self) -> Result<(), PlaybackError> {
        self.stop()
    }
}

impl Drop for CommandAudioOutput {
    fn drop(&mut self) {
        let _ = self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AUDIO: &str = "//uQAA==";

    #[derive(Default)]
    struct RecordingOutput {
        plays: Vec<(PathBuf, f64)>,
        pauses: usize,
        fail: bool,
    }

    impl AudioOutput for RecordingOutput {
        fn play(&mut self, source: &Path, position: f64) -> Result<(), PlaybackError> {
            if self.fail {
                return Err(PlaybackError::Output("device busy".into()));
            }
            self.plays.push((source.to_path_buf(), position));
            Ok(())
        }

        fn pause(&mut self) -> Result<(), PlaybackError> {
            self.pauses += 1;
            Ok(())
        }
    }

    #[test]
    fn test_load_writes_decoded_audio() {
        let mut player = AudioPlayer::new();
        player.load(Some(AUDIO)).unwrap();

        let session = player.session().unwrap();
        assert_eq!(session.path().extension().unwrap(), "mp3");
        assert_eq!(std::fs::read(session.path()).unwrap(), vec![0xFF, 0xFB, 0x90, 0x00]);
    }

    #[test]
    fn test_load_none_leaves_player_empty() {
        let mut player = AudioPlayer::new();
        player.load(None).unwrap();
        assert!(!player.has_audio());

        let mut output = RecordingOutput::default();
        player.toggle_play(&mut output).unwrap();
        assert!(output.plays.is_empty());
    }

    #[test]
    fn test_invalid_payload() {
        let mut player = AudioPlayer::new();
        let err = player.load(Some("not base64!")).unwrap_err();
        assert!(matches!(err, PlaybackError::InvalidPayload(_)));
        assert!(!player.has_audio());
    }

    #[test]
    fn test_replacing_audio_releases_previous_file() {
        let mut player = AudioPlayer::new();
        player.load(Some(AUDIO)).unwrap();
        let first = player.session().unwrap().path().to_path_buf();
        assert!(first.exists());

        player.load(Some("AAEC")).unwrap();
        assert!(!first.exists());

        let second = player.session().unwrap().path().to_path_buf();
        drop(player);
        assert!(!second.exists());
    }

    #[test]
    fn test_toggle_keeps_position() {
        let mut player = AudioPlayer::new();
        player.load(Some(AUDIO)).unwrap();
        let mut output = RecordingOutput::default();

        player.toggle_play(&mut output).unwrap();
        assert!(player.is_playing());
        player.handle_event(PlaybackEvent::TimeUpdate { current_time: 1.5 });

        player.toggle_play(&mut output).unwrap();
        assert!(!player.is_playing());
        assert_eq!(output.pauses, 1);

        player.toggle_play(&mut output).unwrap();
        assert_eq!(output.plays.len(), 2);
        assert_eq!(output.plays[1].1, 1.5);
    }

    #[test]
    fn test_play_failure_stays_stopped() {
        let mut player = AudioPlayer::new();
        player.load(Some(AUDIO)).unwrap();
        let mut output = RecordingOutput {
            fail: true,
            ..Default::default()
        };

        assert!(player.toggle_play(&mut output).is_err());
        assert!(!player.is_playing());
    }

    #[test]
    fn test_ended_resets_position() {
        let mut player = AudioPlayer::new();
        player.load(Some(AUDIO)).unwrap();
        let mut output = RecordingOutput::default();
        player.toggle_play(&mut output).unwrap();

        player.handle_event(PlaybackEvent::LoadedMetadata { duration: 4.0 });
        player.handle_event(PlaybackEvent::TimeUpdate { current_time: 3.0 });
        assert_eq!(player.progress_percent(), 75.0);

        player.handle_event(PlaybackEvent::Ended);
        assert!(!player.is_playing());
        assert_eq!(player.current_time(), 0.0);
        assert_eq!(player.progress_percent(), 0.0);
    }

    #[test]
    fn test_download() {
        let dir = tempfile::tempdir().unwrap();
        let mut player = AudioPlayer::new();
        assert!(player.download(dir.path()).unwrap().is_none());

        player.load(Some(AUDIO)).unwrap();
        let path = player.download(dir.path()).unwrap().unwrap();
        assert_eq!(path.file_name().unwrap(), DOWNLOAD_FILE_NAME);
        assert_eq!(std::fs::read(path).unwrap(), vec![0xFF, 0xFB, 0x90, 0x00]);
    }

    #[test]
    fn test_command_output_missing_program() {
        let mut player = AudioPlayer::new();
        player.load(Some(AUDIO)).unwrap();
        let mut output = CommandAudioOutput::new("habla-no-such-player");

        let err = player.toggle_play(&mut output).unwrap_err();
        assert!(matches!(err, PlaybackError::Output(_)));
        assert!(!player.is_playing());
    }

    #[cfg(unix)]
    #[test]
    fn test_command_output_waits_for_exit() {
        let mut player = AudioPlayer::new();
        player.load(Some(AUDIO)).unwrap();

        let mut output = CommandAudioOutput::new("true");
        player.toggle_play(&mut output).unwrap();
        output.wait().unwrap();
        player.handle_event(PlaybackEvent::Ended);
        assert!(!player.is_playing());

        let mut failing = CommandAudioOutput::new("false");
        failing.play(player.session().unwrap().path(), 0.0).unwrap();
        assert!(matches!(failing.wait(), Err(PlaybackError::Output(_))));
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(5.9), "0:05");
        assert_eq!(format_time(65.0), "1:05");
        assert_eq!(format_time(600.0), "10:00");
        assert_eq!(format_time(f64::NAN), "0:00");
    }
}
