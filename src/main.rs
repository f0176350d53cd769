use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::{Parser, Subcommand};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::Terminal;

use crowdfund::app::{App, InputMode};
use crowdfund::config::{self, Config};
use crowdfund::infrastructure::ethereum::ProviderConfig;
use crowdfund::infrastructure::runtime::{RuntimeBridge, RuntimeCommand};
use crowdfund::logging;
use crowdfund::probe::{self, ProbeState, StdioSink};
use crowdfund::ui;

#[derive(Debug, Parser)]
#[command(
    name = "crowdfund",
    version,
    about = "Crowdfund: browse and start campaigns from the terminal"
)]
struct Args {
    /// HTTP JSON-RPC endpoint (e.g. https://rpc.ankr.com/eth_sepolia)
    #[arg(long, global = true)]
    rpc: Option<String>,

    /// WebSocket endpoint (e.g. wss://node.example/ws)
    #[arg(long, global = true, conflicts_with = "rpc")]
    ws: Option<String>,

    /// Config file (defaults to ~/.config/crowdfund/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Mode>,
}

#[derive(Debug, Subcommand)]
enum Mode {
    /// Print the node's client version and exit
    Probe,
}

fn main() -> Result<()> {
    let args = Args::parse();

    match args.command {
        Some(Mode::Probe) => {
            // stderr is the failure channel; without a log file, stay silent.
            if let Some(path) = config::log_path() {
                let _ = logging::init_file(&path);
            }
            let config = config::load(args.config.as_deref());
            run_probe(endpoint_from_args(&args, &config))
        }
        None => {
            if let Some(path) = config::log_path() {
                if let Err(err) = logging::init_file(&path) {
                    eprintln!("crowdfund: logging disabled: {err:#}");
                }
            }
            let config = config::load(args.config.as_deref());
            let endpoint = endpoint_from_args(&args, &config);
            run_tui(&config, endpoint)
        }
    }
}

fn endpoint_from_args(args: &Args, config: &Config) -> ProviderConfig {
    if let Some(ws) = &args.ws {
        return ProviderConfig::WebSocket(ws.clone());
    }
    if let Some(rpc) = &args.rpc {
        return ProviderConfig::from_url(rpc);
    }
    config.endpoint()
}

/// One request, success to stdout, failure to stderr, exit 0 either way
fn run_probe(endpoint: ProviderConfig) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let mut sink = StdioSink::stdio();
    let state = runtime.block_on(probe::run_probe(endpoint, &mut sink));
    tracing::debug!(?state, "probe finished");
    Ok(())
}

fn run_tui(config: &Config, endpoint: ProviderConfig) -> Result<()> {
    let mut app = App::new(config);
    app.endpoint = endpoint.display();
    app.probe = ProbeState::Pending;

    let runtime = RuntimeBridge::new(endpoint)?;

    let mut stdout = io::stdout();
    enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app, &runtime);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = ?err, "ui loop failed");
        eprintln!("{err:?}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    runtime: &RuntimeBridge,
) -> Result<()> {
    let tick_rate = Duration::from_millis(200);
    let mut last_tick = Instant::now();

    loop {
        for event in runtime.poll_events() {
            app.apply_runtime_event(event);
        }
        terminal.draw(|f| ui::draw(f, &app))?;
        if app.should_quit {
            let _ = runtime.send(RuntimeCommand::Shutdown);
            return Ok(());
        }

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => app.handle_key(key),
                Event::Mouse(mouse) => handle_mouse(&mut app, mouse),
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.on_tick();
            last_tick = Instant::now();
        }
    }
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    if app.help_open || app.input_mode == InputMode::Command {
        return;
    }
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return;
    }
    let Some(size) = terminal_rect() else {
        return;
    };
    let areas = ui::layout::areas(size);
    let cursor = app.nav.cursor();
    if let Some(index) = ui::layout::sidebar_row_at(&areas, mouse.column, mouse.row, cursor) {
        app.select_link(index);
    }
}

fn terminal_rect() -> Option<Rect> {
    let (width, height) = crossterm::terminal::size().ok()?;
    Some(Rect {
        x: 0,
        y: 0,
        width,
        height,
    })
}
