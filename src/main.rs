use std::{error::Error, io, sync::Arc, time::Duration};

use clap::Parser;
use crossterm::{
    event, execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use phishscope::{
    api::HttpApi,
    commands, config,
    controller::Controller,
    logger::log,
    state::{AppState, LogLevel},
    ui::draw_ui,
};

#[derive(Parser)]
#[command(
    name = "phishscope",
    version,
    about = "Terminal client for an email phishing classification service."
)]
struct Cli {
    /// Base URL of the classification service (persisted for next run)
    #[arg(long)]
    api_url: Option<String>,

    /// Request timeout in seconds for health and predict calls
    #[arg(long)]
    timeout_secs: Option<u64>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let mut cfg = config::load().unwrap_or_default();
    let persist = cli.api_url.is_some() || cli.timeout_secs.is_some();
    if let Some(url) = cli.api_url {
        cfg.base_url = url;
    }
    if let Some(secs) = cli.timeout_secs {
        cfg.timeout_secs = secs;
    }
    cfg.validate()?;
    if persist {
        config::save(&cfg)?;
    }

    let api = Arc::new(HttpApi::new(cfg.clone()));
    let mut controller = Controller::new(api);
    let mut state = AppState::new(cfg);

    setup_terminal()?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    // one check on startup, then only on manual refresh
    controller.refresh_health();
    let checking_msg = format!("Checking API at {}", state.config.base_url);
    log(&mut state, LogLevel::Info, checking_msg);

    let result = run_loop(&mut terminal, &mut state, &mut controller);

    teardown_terminal(&mut terminal)?;
    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut AppState,
    controller: &mut Controller,
) -> Result<(), Box<dyn Error>> {
    loop {
        draw_ui(terminal, state, controller)?;

        if event::poll(Duration::from_millis(120))? {
            let ev = event::read()?;
            commands::handle_event(state, controller, ev);
        }

        for notice in controller.poll() {
            log(state, notice.level, notice.text);
        }

        if state.ui.should_exit {
            return Ok(());
        }
    }
}

fn setup_terminal() -> Result<(), Box<dyn Error>> {
    enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen)?;
    Ok(())
}

fn teardown_terminal(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<(), Box<dyn Error>> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
