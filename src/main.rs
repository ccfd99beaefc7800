use std::io;
use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::{error, info};

use chainpeek::app::App;
use chainpeek::config;
use chainpeek::infrastructure::runtime::connect_and_init;
use chainpeek::infrastructure::substrate::{parse_address, ProviderConfig};
use chainpeek::infrastructure::{InitRequest, RuntimeBridge, RuntimeEvent};
use chainpeek::ui;

#[derive(Debug, Parser)]
#[command(
    name = "chainpeek",
    version,
    about = "Chainpeek: reads a Substrate node's genesis hash, timestamp and an account on startup"
)]
struct Args {
    /// Node endpoint (e.g. wss://rpc.polkadot.io or http://localhost:9933)
    #[arg(long)]
    ws: Option<String>,

    /// SS58 address whose balance and nonce are read
    #[arg(long)]
    address: Option<String>,

    /// Print the console lines to stdout instead of starting the TUI
    #[arg(long)]
    headless: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Held for the app lifetime so buffered log lines are flushed
    let _log_guard = init_logging(args.headless);

    let config = config::load();
    let request = InitRequest {
        endpoint: ProviderConfig::from_url(&config.endpoint_or(args.ws.as_deref())),
        address: parse_address(&config.address_or(args.address.as_deref()))?,
    };

    if args.headless {
        return run_headless(request);
    }

    let mut stdout = io::stdout();
    enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, App::new(), request);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!("{err:#}");
        eprintln!("{err:?}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    request: InitRequest,
) -> Result<()> {
    let tick_rate = Duration::from_millis(200);
    let mut last_tick = Instant::now();

    // The bridge lives as long as the page; dropping it unmounts
    let mut runtime: Option<RuntimeBridge> = None;
    if app.mount() {
        runtime = Some(RuntimeBridge::mount(request)?);
    }

    loop {
        if let Some(runtime) = runtime.as_ref() {
            for event in runtime.poll_events() {
                app.apply_event(event);
            }
        }
        terminal.draw(|f| ui::draw(f, &app))?;
        if app.should_quit {
            info!("unmounting");
            return Ok(());
        }

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key);
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }
    }
}

fn run_headless(request: InitRequest) -> Result<()> {
    let rt = tokio::runtime::Runtime::new().context("Failed to create Tokio runtime")?;
    rt.block_on(connect_and_init(request, |event| {
        if let RuntimeEvent::Console(line) = event {
            println!("{}", line.text);
        }
    }))
}

/// File logging for the TUI (the terminal belongs to ratatui), stderr when headless
fn init_logging(headless: bool) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,chainpeek=debug"));

    if headless {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_writer(io::stderr).with_target(true))
            .init();
        return None;
    }

    let logs_dir = config::logs_dir()?;
    if std::fs::create_dir_all(&logs_dir).is_err() {
        return None;
    }
    let guard = init_file_logging(&logs_dir, env_filter);
    Some(guard)
}

fn init_file_logging(
    logs_dir: &Path,
    env_filter: tracing_subscriber::EnvFilter,
) -> tracing_appender::non_blocking::WorkerGuard {
    use tracing_subscriber::{fmt, prelude::*};

    let file_appender = tracing_appender::rolling::daily(logs_dir, "chainpeek.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    guard
}
