use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use salute_tts::config::SAMPLE_RATE;
use salute_tts::{AudioPlayback, Config, SpeechClient, Voice};

/// SaluteSpeech text-to-speech client
#[derive(Parser)]
#[command(name = "salute-tts", version, about)]
struct Cli {
    /// Text to synthesize; omit to enter interactive mode
    text: Option<String>,

    /// Voice to speak with
    #[arg(long, default_value_t = Voice::default())]
    voice: Voice,

    /// Write a WAV file instead of playing through the speakers
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Verify TLS certificates (disabled by default for parity with the
    /// upstream endpoints)
    #[arg(long, env = "SALUTESPEECH_VERIFY_TLS")]
    verify_tls: bool,

    /// HTTP timeout in seconds
    #[arg(long, default_value = "10")]
    timeout_secs: u64,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// List the available voices and their provider codes
    Voices,
    /// Test speaker output with a sine tone
    TestSpeaker,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 => "warn,salute_tts=info",
        1 => "info,salute_tts=debug",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    if let Some(cmd) = cli.command {
        return match cmd {
            Command::Voices => cmd_voices(),
            Command::TestSpeaker => cmd_test_speaker(),
        };
    }

    let config = Config {
        insecure_tls: !cli.verify_tls,
        timeout: Duration::from_secs(cli.timeout_secs),
        ..Config::default()
    };
    let client = SpeechClient::new(config)?;

    match cli.text {
        Some(text) => speak_once(&client, &text, cli.voice, cli.output.as_deref()).await,
        None => interactive(&client).await,
    }
}

/// One-shot synthesis: play the text, or write it to a file
async fn speak_once(
    client: &SpeechClient,
    text: &str,
    voice: Voice,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    match output {
        Some(path) => client.synthesize_to_file(text, voice, path).await?,
        None => client.synthesize_and_play(text, voice).await?,
    }
    Ok(())
}

/// Interactive prompt: a text line plus a voice menu, empty line to exit
///
/// Synthesis failures are rendered verbatim and the prompt comes back; only
/// terminal I/O errors abort the loop.
async fn interactive(client: &SpeechClient) -> anyhow::Result<()> {
    println!("SaluteSpeech TTS (empty line to exit)\n");

    let names = Voice::names();
    let default_index = Voice::ALL
        .iter()
        .position(|v| *v == Voice::default())
        .unwrap_or(0);

    loop {
        let text: String = dialoguer::Input::new()
            .with_prompt("Text")
            .allow_empty(true)
            .interact_text()?;
        if text.trim().is_empty() {
            return Ok(());
        }

        let selection = dialoguer::Select::new()
            .with_prompt("Voice")
            .items(&names)
            .default(default_index)
            .interact()?;
        let voice = Voice::ALL[selection];

        if let Err(e) = client.synthesize_and_play(&text, voice).await {
            eprintln!("error: {e}");
        }
    }
}

/// List the voice catalog
#[allow(clippy::unnecessary_wraps)]
fn cmd_voices() -> anyhow::Result<()> {
    for voice in Voice::ALL {
        let marker = if voice == Voice::default() { " (default)" } else { "" };
        println!("{:<12} {}{marker}", voice.name(), voice.code());
    }
    Ok(())
}

/// Play a 440 Hz sine tone so the user can confirm audio output works
fn cmd_test_speaker() -> anyhow::Result<()> {
    println!("You should hear a 440 Hz tone for 2 seconds");

    let frequency = 440.0_f32;
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    let samples: Vec<i16> = (0..SAMPLE_RATE * 2)
        .map(|i| {
            let t = i as f32 / SAMPLE_RATE as f32;
            let value = (2.0 * std::f32::consts::PI * frequency * t).sin() * 0.3;
            (value * f32::from(i16::MAX)) as i16
        })
        .collect();

    let playback = AudioPlayback::new(SAMPLE_RATE)?;
    playback.play(&samples)?;

    println!("If you heard the tone, your speakers are working");
    Ok(())
}
