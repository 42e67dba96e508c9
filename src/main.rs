//! Wiring & DI. Entry point: bootstrap adapters, inject into the controller, run UI.
//! No business logic here.

use compete_insight::adapters::ai::{GeminiAdapter, MockAiAdapter};
use compete_insight::adapters::export::MarkdownExporter;
use compete_insight::adapters::ui::tui::TuiInputPort;
use compete_insight::ports::{AiPort, InputPort, ReportExportPort};
use compete_insight::shared::config::AppConfig;
use compete_insight::usecases::AnalysisController;
use dotenv::dotenv;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let env_loaded = dotenv();
    // Default to warn so log lines do not interleave with the interactive screens.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!(cwd = %cwd.display(), "no .env found (check CWD)"),
    }

    compete_insight::adapters::ui::init_ui();

    let cfg = AppConfig::load().unwrap_or_else(|e| {
        warn!(error = %e, "config load failed, using defaults");
        AppConfig::default()
    });

    // --- AI adapter ---
    let ai: Arc<dyn AiPort> = if cfg.use_mock_ai() {
        warn!("COMPETE_MOCK_AI is set, using mock AI adapter");
        Arc::new(MockAiAdapter::new())
    } else {
        let api_key = cfg.api_key();
        if api_key.is_none() {
            // Surfaced as a failed analysis, not a startup abort.
            warn!("no API key set (COMPETE_API_KEY / GEMINI_API_KEY / API_KEY)");
        }
        let request_timeout_secs = cfg.request_timeout_secs_or_default();
        info!(
            model = %cfg.model_or_default(),
            url = %cfg.api_url_or_default(),
            request_timeout_secs,
            "Gemini adapter enabled"
        );
        Arc::new(
            GeminiAdapter::new(
                cfg.api_url_or_default(),
                api_key,
                cfg.model_or_default(),
                Duration::from_secs(request_timeout_secs),
                Duration::from_secs(cfg.connect_timeout_secs_or_default()),
            )
            .map_err(|e| anyhow::anyhow!("{}", e))?,
        )
    };

    // --- Printable document export ---
    let reports_dir = PathBuf::from(cfg.reports_dir_or_default());
    info!(path = %reports_dir.display(), "reports directory");
    let exporter: Arc<dyn ReportExportPort> = Arc::new(MarkdownExporter::new(reports_dir));

    let controller = AnalysisController::new(ai);
    let input_port: Arc<dyn InputPort> = Arc::new(TuiInputPort::new(controller, exporter));

    // --- Run (brand form -> analysis -> report) ---
    input_port
        .run()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    Ok(())
}
