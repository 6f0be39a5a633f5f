//! Folio Terminal UI.
//!
//! A personal portfolio presented as a simulated chat: pick a persona, ask
//! about projects, patents or skills, and hand free-form questions to the
//! hosted Q&A agent.

use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use folio_core::{JsonFileStore, KeyValueStore, MemoryStore, Persona, ProfileData, SessionId};
use folio_genai::{ChatBackend, GenAiClient, DEFAULT_API_BASE, DEFAULT_MODEL};
use tokio::sync::mpsc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod app;
mod backend;
mod config;
mod event;
mod launcher;
mod panels;
mod render;
mod scheduler;
mod state;
mod store;

use app::App;
use config::AppConfig;
use event::{BackendCommand, UiEvent};
use launcher::Launcher;
use state::UiState;
use store::{Avatar, ProfileImageStore};

#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(about = "Terminal portfolio presented as a simulated chat")]
#[command(version)]
struct Cli {
    /// Skip the launcher and start as this persona (investor, researcher, collaborator, curious)
    #[arg(short, long)]
    persona: Option<Persona>,

    /// Profile JSON to show instead of the built-in one
    #[arg(long)]
    profile: Option<PathBuf>,

    /// Directory for persisted preferences
    #[arg(short = 'd', long, default_value = ".folio")]
    data_dir: PathBuf,

    /// Delay before a typed message is answered, in milliseconds
    #[arg(long, default_value = "800")]
    reply_delay_ms: u64,

    /// Delay before a menu navigation is answered, in milliseconds
    #[arg(long, default_value = "600")]
    nav_delay_ms: u64,

    /// Length of the launch transition, in milliseconds
    #[arg(long, default_value = "800")]
    launch_delay_ms: u64,

    /// Hosted model for the Q&A agent
    #[arg(short, long, default_value = DEFAULT_MODEL)]
    model: String,

    /// REST base URL of the hosted model API
    #[arg(long, default_value = DEFAULT_API_BASE)]
    api_base: String,

    /// Log file (the terminal is owned by the UI)
    #[arg(long, default_value = "/tmp/folio-tui.log")]
    log_file: PathBuf,
}

impl From<Cli> for AppConfig {
    fn from(cli: Cli) -> Self {
        Self {
            persona: cli.persona,
            profile_path: cli.profile,
            data_dir: cli.data_dir,
            reply_delay: Duration::from_millis(cli.reply_delay_ms),
            nav_delay: Duration::from_millis(cli.nav_delay_ms),
            launch_delay: Duration::from_millis(cli.launch_delay_ms),
            model: cli.model,
            api_base: cli.api_base,
            log_file: cli.log_file,
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::from(Cli::parse());

    // Initialize tracing - write to file to avoid terminal interference
    let log_file = std::fs::File::create(&config.log_file).ok();
    if let Some(file) = log_file {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("folio_tui=debug,folio_genai=debug"));
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_env_filter(filter)
            .with_ansi(false)
            .init();
    }

    let session_id = SessionId::generate();
    info!(session = %session_id.short(), persona = ?config.persona, "Starting folio");

    run_tui(config)
}

fn run_tui(config: AppConfig) -> Result<(), Box<dyn Error>> {
    let profile = match &config.profile_path {
        Some(path) => ProfileData::load(path)?,
        None => ProfileData::builtin()?,
    };
    let system_instruction = profile.system_context()?;

    let prefs: Box<dyn KeyValueStore> = match JsonFileStore::open(config.prefs_path()) {
        Ok(store) => Box::new(store),
        Err(e) => {
            warn!(error = %e, "Preferences unavailable, using in-memory store");
            Box::new(MemoryStore::new())
        }
    };
    let images = ProfileImageStore::open(prefs)?;
    info!(custom_image = images.current().is_some(), "Preferences loaded");

    let chat_backend: Option<Arc<dyn ChatBackend>> = match GenAiClient::from_env() {
        Ok(client) => {
            let client = client
                .with_model(config.model.clone())
                .with_api_base(config.api_base.clone());
            info!(model = %client.model(), "Q&A agent configured");
            Some(Arc::new(client))
        }
        Err(e) => {
            warn!(error = %e, "Q&A agent disabled");
            None
        }
    };

    // Create channels for UI <-> backend communication
    let (ui_tx, ui_rx) = mpsc::channel::<UiEvent>(100);
    let (cmd_tx, cmd_rx) = mpsc::channel::<BackendCommand>(100);

    // Spawn background thread with its own tokio runtime
    let bg_handle = std::thread::spawn(move || match tokio::runtime::Runtime::new() {
        Ok(rt) => rt.block_on(backend::run_backend(
            chat_backend,
            system_instruction,
            ui_tx,
            cmd_rx,
        )),
        Err(e) => error!(error = %e, "Failed to create tokio runtime"),
    });

    let launcher = match config.persona {
        Some(persona) => Launcher::running(Some(persona)),
        None => Launcher::new(config.launch_delay),
    };
    let state = UiState::new(
        profile,
        config.asset_dir(),
        launcher,
        Avatar::Missing(String::new()),
    );

    // Initialize terminal (enters alternate screen, enables raw mode)
    let terminal = ratatui::init();

    // Run UI loop on main thread
    let mut app = App::new(&config, state, images, ui_rx, cmd_tx);
    let result = app.run(terminal);

    // Restore terminal (exits alternate screen, disables raw mode)
    ratatui::restore();

    // Wait for background thread to finish
    let _ = bg_handle.join();

    info!("TUI shutdown complete");

    result.map_err(|e| e.into())
}
