//! College console
//!
//! ```sh
//! # Against the default development API
//! cargo run -p college-console
//!
//! # Against another server, with verbose logs
//! COLLEGE_API_BASE=https://college.example/api cargo run -p college-console -- --log-level debug
//! ```

use std::cell::RefCell;
use std::io;
use std::process::ExitCode;

use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use college_console::action::Action;
use college_console::api::ApiClient;
use college_console::config::{Cli, Config};
use college_console::dispatch::{EffectContext, EffectRuntime, EffectStore, TracingMiddleware};
use college_console::effect::{perform, Effect};
use college_console::error::ConsoleError;
use college_console::logging;
use college_console::reducer::reducer;
use college_console::state::AppState;
use college_console::ui::ConsoleUi;

#[tokio::main]
async fn main() -> ExitCode {
    // Configuration errors are reported before the terminal is taken over
    let config = match Cli::parse().into_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = logging::init(&config) {
        eprintln!("Error: {e}");
        return ExitCode::FAILURE;
    }

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "console exited with an error");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: Config) -> Result<(), ConsoleError> {
    tracing::info!(api_base = %config.api_base, "starting college console");

    // ===== Terminal setup =====
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = run_app(&mut terminal, &config).await;

    // ===== Cleanup =====
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result.map_err(ConsoleError::from)
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    config: &Config,
) -> io::Result<()> {
    let client = ApiClient::new(config.api_base.as_str());
    let store = EffectStore::new(AppState::default(), reducer).with_middleware(TracingMiddleware);

    let mut runtime = EffectRuntime::new(store).with_tick(config.tick, || Action::Tick);

    // Initial load of both collections
    runtime.enqueue(Action::DataFetch);

    let ui = RefCell::new(ConsoleUi::new());

    runtime
        .run(
            terminal,
            |frame, area, state| ui.borrow_mut().render(frame, area, state),
            |event, state| ui.borrow_mut().map_event(event, state),
            |action| matches!(action, Action::Quit),
            |effect, ctx| handle_effect(effect, ctx, &client),
        )
        .await
}

/// Run each effect as a keyed task; its result action re-enters the loop.
fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>, client: &ApiClient) {
    let key = effect.task_key();
    let client = client.clone();
    ctx.tasks()
        .spawn(key, async move { perform(effect, &client).await });
}
