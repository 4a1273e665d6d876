use std::sync::Arc;
use std::time::Instant;

use anchorage::application::ports::BrowserPage;
use anchorage::application::services::{AudioPipeline, ChallengeSolver};
use anchorage::infrastructure::audio::{HttpAudioFetcher, WavTranscoder};
use anchorage::infrastructure::browser::ChromiumSession;
use anchorage::infrastructure::observability::init_tracing;
use anchorage::infrastructure::transcription::WhisperApiTranscriber;
use anchorage::presentation::Settings;

const DEMO_SUBMIT_SELECTOR: &str = "#recaptcha-demo-submit";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::from_env();
    init_tracing(settings.logging.tracing_config());

    let timing = settings.solver.timing();

    let session = ChromiumSession::launch(&settings.browser.demo_url, settings.browser.headless)
        .await?;
    let page = Arc::new(session.page());

    let pipeline = AudioPipeline::new(
        Arc::new(HttpAudioFetcher::new()),
        Arc::new(WavTranscoder),
        Arc::new(WhisperApiTranscriber::new(
            settings.transcriber.api_key.clone(),
            settings.transcriber.base_url.clone(),
            settings.transcriber.model.clone(),
        )),
    );
    let solver = ChallengeSolver::new(Arc::clone(&page), pipeline, timing);

    let started = Instant::now();
    solver.solve().await?;
    tracing::info!(elapsed_secs = started.elapsed().as_secs_f32(), "Challenge solved");

    if let Some(token) = solver.probes().token().await {
        tracing::info!(token_chars = token.len(), "Challenge token available");
        println!("{token}");
    }

    let submit = page
        .select(DEMO_SUBMIT_SELECTOR, timing.standard_timeout)
        .await?;
    submit.click().await?;

    session.close().await;

    Ok(())
}
