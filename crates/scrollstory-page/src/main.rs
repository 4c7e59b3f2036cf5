//! Scrollstory replay entry point.
//!
//! Wires the page with timer-backed engines, replays a scroll script against
//! it and prints the final page state as JSON.

use std::error::Error;
use std::sync::Arc;

use scrollstory_audio::{SoundBank, TracingAudioSink};
use scrollstory_core::clock::SystemClock;
use scrollstory_core::rng::SeededRng;
use scrollstory_page::assets::{AssetGate, FontFiles, ReadyAssets};
use scrollstory_page::config::{LogFormat, PageConfig};
use scrollstory_page::engine::{TimerAnimationEngine, TimerSmoothScroll};
use scrollstory_page::page::{Collaborators, Page};
use scrollstory_page::runtime::{self, PageRuntime};
use scrollstory_page::script::ScrollScript;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.pretty().init(),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Read configuration from environment.
    let config = PageConfig::from_env()?;
    init_tracing(config.log_format);

    tracing::info!("Starting Scrollstory page replay");

    let content = config.load_content()?;
    tracing::info!(
        title = %content.title,
        fingerprint = %content.fingerprint()?,
        "page content loaded"
    );
    let script = match &config.script_path {
        Some(path) => ScrollScript::load(path)?,
        None => ScrollScript::demo_sweep(),
    };

    let (completion_tx, completion_rx) = mpsc::unbounded_channel();
    let (input_tx, input_rx) = mpsc::channel(64);
    let replay = tokio::spawn(script.replay(input_tx));

    let gate: Box<dyn AssetGate> = if config.font_paths.is_empty() {
        Box::new(ReadyAssets)
    } else {
        Box::new(FontFiles::new(config.font_paths.clone()))
    };
    let rng = config
        .rng_seed
        .map_or_else(SeededRng::from_os_rng, SeededRng::from_seed);

    let page = runtime::initialize(config.init_delay, gate.as_ref(), || {
        Page::new(
            &content,
            config.geometry,
            Collaborators {
                engine: Box::new(TimerAnimationEngine::new(completion_tx.clone())),
                scroll: Box::new(TimerSmoothScroll::new(completion_tx)),
                sounds: Box::new(SoundBank::new(Arc::new(TracingAudioSink))),
                clock: Arc::new(SystemClock),
                rng: Box::new(rng),
            },
        )
    })
    .await?;

    let (page, report) = PageRuntime::new(page, completion_rx).run(input_rx).await;
    match replay.await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => tracing::warn!(error = %e, "script replay stopped early"),
        Err(e) => tracing::warn!(error = %e, "script replay task failed"),
    }
    tracing::info!(
        released = report.released.len(),
        failed = report.failed.len(),
        "page torn down"
    );

    println!("{}", serde_json::to_string_pretty(&page.snapshot())?);
    Ok(())
}
