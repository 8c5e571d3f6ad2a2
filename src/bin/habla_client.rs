//! habla-client - 命令行客户端
//!
//! 选择语言与音色，请求服务端合成，保存或播放生成的音频

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser};
use std::path::PathBuf;

use habla::client::{
    format_time, AudioPlayer, CommandAudioOutput, HttpTtsApi, Orchestrator, OrchestratorOptions,
    PlaybackEvent,
};
use habla::domain::voice::{language_name, DEFAULT_LANGUAGE, SUPPORTED_LANGUAGES};

#[derive(Parser, Debug)]
#[command(name = "habla-client", version, about = "Generate speech through a habla server")]
struct Cli {
    /// Server base URL
    #[arg(long = "server", default_value = "http://localhost:3000")]
    server: String,

    /// Language code (es-US, en-US, he-IL)
    #[arg(short = 'l', long = "language", default_value = DEFAULT_LANGUAGE)]
    language: String,

    /// Voice name; defaults to the first voice of the catalog
    #[arg(short = 'v', long = "voice")]
    voice: Option<String>,

    /// Text to synthesize
    #[arg(short = 't', long = "text", required_unless_present = "list_voices")]
    text: Option<String>,

    /// Directory where generated-audio.mp3 is written
    #[arg(short = 'o', long = "output", value_name = "DIR")]
    output: Option<PathBuf>,

    /// List the voices for the language and exit
    #[arg(long = "list-voices", action = ArgAction::SetTrue)]
    list_voices: bool,

    /// External program used to play the audio (e.g. mpv, ffplay, afplay)
    #[arg(long = "player", value_name = "PROGRAM")]
    player: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if language_name(&cli.language).is_none() {
        let supported: Vec<&str> = SUPPORTED_LANGUAGES.iter().map(|l| l.code).collect();
        eprintln!(
            "warning: {} is not one of the offered languages ({})",
            cli.language,
            supported.join(", ")
        );
    }

    let api = HttpTtsApi::new(&cli.server).context("Failed to create HTTP client")?;
    let mut orchestrator = Orchestrator::new(OrchestratorOptions::default());

    let effect = orchestrator.select_language(&cli.language);
    orchestrator.dispatch(&api, effect).await;
    if let Some(error) = orchestrator.error() {
        bail!("{}", error);
    }

    if cli.list_voices {
        println!(
            "{} voices for {}",
            orchestrator.voices_available(),
            orchestrator.language_code()
        );
        for voice in orchestrator.voices() {
            let tier = if voice.is_free() { "free" } else { "premium" };
            println!(
                "{:<32} {:<8} {:>6} Hz  {}",
                voice.name(),
                voice.ssml_gender().as_str(),
                voice.natural_sample_rate_hertz(),
                tier
            );
        }
        return Ok(());
    }

    if let Some(voice) = &cli.voice {
        orchestrator.select_voice(voice);
    }
    orchestrator.set_text(cli.text.unwrap_or_default());

    if orchestrator.exceeds_recommended_length() {
        eprintln!(
            "warning: text is {} characters long; long texts may take longer or be rejected",
            orchestrator.text_length()
        );
    }

    let Some(effect) = orchestrator.generate() else {
        bail!("{}", orchestrator.notice().unwrap_or("Nothing to generate"));
    };
    orchestrator.dispatch(&api, effect).await;
    if let Some(error) = orchestrator.error() {
        bail!("{}", error);
    }

    let mut player = AudioPlayer::new();
    player
        .load(orchestrator.audio_content())
        .context("Failed to load generated audio")?;

    if let Some(dir) = &cli.output {
        if let Some(path) = player.download(dir).context("Failed to save audio")? {
            println!("Saved {}", path.display());
        }
    }

    if let Some(program) = &cli.player {
        let mut output = match program.as_str() {
            "mpv" => CommandAudioOutput::mpv(),
            "ffplay" => CommandAudioOutput::ffplay(),
            other => CommandAudioOutput::new(other),
        };

        let started = std::time::Instant::now();
        player.toggle_play(&mut output)?;
        println!("Playing with {}...", program);
        output.wait()?;
        player.handle_event(PlaybackEvent::Ended);
        println!("Finished ({})", format_time(started.elapsed().as_secs_f64()));
    }

    if cli.output.is_none() && cli.player.is_none() {
        println!(
            "Generated {} bytes of audio; use --output or --player",
            player.session().map(|s| s.size()).unwrap_or(0)
        );
    }

    Ok(())
}
