use std::io::stdout;
use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use color_eyre::Result;
use color_eyre::eyre::eyre;
use sysmon::app::App;
use sysmon::config::{Config, load_config, load_config_from_path};
use sysmon::event::{Event, EventHandler};
use sysmon::logging::{init_tracing_json, parse_level};
use sysmon::monitor::{Monitor, run_plain};
use sysmon::system::source::HostSource;
use sysmon::ui;

#[derive(Parser)]
#[command(
    name = "sysmon",
    about = "Terminal monitor for CPU, memory, disk and network usage"
)]
struct Cli {
    /// Path to config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Refresh rate in milliseconds
    #[arg(long)]
    refresh_rate: Option<u64>,

    /// Clear the screen and print a text snapshot each cycle instead of the TUI
    #[arg(long, default_value_t = false)]
    plain: bool,

    /// Stop after this many reports (plain mode only)
    #[arg(long)]
    cycles: Option<usize>,

    /// Report storage usage for the filesystem holding this path
    #[arg(long)]
    disk_path: Option<PathBuf>,

    /// Write JSON-lines logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let config = load_config_for_cli(&cli);

    if let Some(path) = &cli.log_file {
        init_tracing_json(path, parse_level(&config.logging.level))?;
    }
    if cli.cycles.is_some() && !config.general.plain {
        return Err(eyre!("--cycles only applies together with --plain"));
    }

    let source = HostSource::new(
        &config.sources.proc_root,
        &config.sources.disk_path,
        config.sources.loopback_pattern.as_str(),
    );

    if config.general.plain {
        let mut monitor = Monitor::new(Box::new(source));
        let mut out = stdout();
        run_plain(
            &mut monitor,
            config.general.refresh_interval(),
            cli.cycles,
            &mut out,
        )
        .await?;
        return Ok(());
    }

    let mut terminal = ratatui::init();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        ratatui::restore();
        original_hook(panic_info);
    }));

    let app = App::new(&config, Box::new(source));
    let result = run(&mut terminal, app).await;

    ratatui::restore();

    result
}

async fn run(terminal: &mut ratatui::DefaultTerminal, mut app: App) -> Result<()> {
    let mut events = EventHandler::new(app.refresh_interval);

    terminal.draw(|frame| ui::draw(frame, &app))?;

    while app.running {
        let Some(event) = events.next().await else {
            break;
        };
        match event {
            Event::Key(key) => app.handle_key(key),
            Event::Tick => app.on_tick(Instant::now()),
            Event::Resize => {}
        }
        if app.running {
            terminal.draw(|frame| ui::draw(frame, &app))?;
        }
    }

    Ok(())
}

fn load_config_for_cli(cli: &Cli) -> Config {
    let mut config = match &cli.config {
        Some(path) => load_config_from_path(path),
        None => load_config(),
    };

    if let Some(rate) = cli.refresh_rate {
        config.general.refresh_rate_ms = rate;
    }
    if cli.plain {
        config.general.plain = true;
    }
    if let Some(ref path) = cli.disk_path {
        config.sources.disk_path = path.clone();
    }
    config
}
