//! PetSim main entry point.
//!
//! Hexagonal architecture with a single loop thread owning the pet.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  DiskAdapter      MemoryStore    SystemClock    ConsoleView    │
//! │  (Store+Config)   (--ephemeral)  (ClockPort)    LogEventSink   │
//! │                                                 (EventSink)    │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              PetService (pure logic)                   │    │
//! │  │  FSM · Needs · Scheduler                               │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  stdin thread ──mpsc──▶ run loop (recv_timeout = loop tick)    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

// ── Imports ───────────────────────────────────────────────────
use std::io::BufRead;
use std::path::PathBuf;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{info, warn};
use tracing_subscriber::EnvFilter;

use petsim::adapters::console::{ConsoleView, render};
use petsim::adapters::disk::DiskAdapter;
use petsim::adapters::log_sink::LogEventSink;
use petsim::adapters::memory::MemoryStore;
use petsim::adapters::time::SystemClock;
use petsim::app::commands::PetCommand;
use petsim::app::ports::{ConfigPort, StorePort};
use petsim::app::service::PetService;
use petsim::config::SimConfig;

// ── CLI ───────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "petsim", version, about = "A virtual pet that gets hungry, bored and tired")]
struct Cli {
    /// Directory holding state.json and config.json
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Keep everything in memory; nothing is read or written on disk
    #[arg(long, global = true)]
    ephemeral: bool,

    /// Seed for the wake-up roll (overrides config.json)
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum Command {
    /// Interactive loop: needs decay live, commands come from stdin (default)
    Run,
    /// Apply time away, save and print the pet
    Status {
        /// Print the snapshot as JSON
        #[arg(long)]
        json: bool,
    },
    /// Feed the pet once
    Feed,
    /// Play with the pet once
    Play,
    /// Switch between fast and realistic decay
    ToggleMode,
    /// Forget the pet and start over
    Reset,
}

fn default_data_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("petsim")
}

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. Logging ────────────────────────────────────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("petsim=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Command::Run);
    info!("PetSim v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Store and config ───────────────────────────────────
    if cli.ephemeral {
        info!("Ephemeral run: nothing will be saved");
        let store = MemoryStore::new();
        let config = with_seed(store.load().context("loading default config")?, cli.seed);
        return dispatch(command, config, store);
    }

    let dir = cli.data_dir.unwrap_or_else(default_data_dir);
    let disk = DiskAdapter::open(&dir)
        .with_context(|| format!("opening data directory {}", dir.display()))?;
    let config = with_seed(
        disk.load()
            .with_context(|| format!("loading config from {}", dir.display()))?,
        cli.seed,
    );
    dispatch(command, config, disk)
}

fn with_seed(mut config: SimConfig, seed: Option<u64>) -> SimConfig {
    if seed.is_some() {
        config.rng_seed = seed;
    }
    config
}

fn dispatch<S: StorePort>(command: Command, config: SimConfig, store: S) -> Result<()> {
    let loop_tick_ms = config.loop_tick_ms;
    let mut service =
        PetService::new(config, store, SystemClock::new()).context("invalid configuration")?;

    let one_shot = match command {
        Command::Run => return run_loop(&mut service, loop_tick_ms),
        Command::Status { json } => {
            service.start(&mut LogEventSink::new()).context("starting pet")?;
            if json {
                println!("{}", serde_json::to_string_pretty(&service.snapshot())?);
            } else {
                println!("{}", render(&service.snapshot()));
            }
            return Ok(());
        }
        Command::Feed => PetCommand::Feed,
        Command::Play => PetCommand::Play,
        Command::ToggleMode => PetCommand::ToggleMode,
        Command::Reset => PetCommand::Reset,
    };

    let mut sink = (ConsoleView::stdout(), LogEventSink::new());
    service.start(&mut sink).context("starting pet")?;
    service
        .handle_command(one_shot, &mut sink)
        .with_context(|| format!("applying {:?}", one_shot))?;
    Ok(())
}

// ── Run loop ──────────────────────────────────────────────────

/// A line typed at the interactive prompt.
enum LoopInput {
    Command(PetCommand),
    Status,
    Help,
    Quit,
}

const HELP: &str = "commands: feed (f), play (p), mode (m), reset, status, help, quit (q)";

fn parse_line(line: &str) -> Option<LoopInput> {
    match line.trim().to_ascii_lowercase().as_str() {
        "" => None,
        "status" | "s" => Some(LoopInput::Status),
        "help" | "h" | "?" => Some(LoopInput::Help),
        "quit" | "q" | "exit" => Some(LoopInput::Quit),
        other => match other.parse() {
            Ok(cmd) => Some(LoopInput::Command(cmd)),
            Err(e) => {
                eprintln!("{} ({})", e, HELP);
                None
            }
        },
    }
}

/// Forward stdin lines until EOF or the loop hangs up.
fn read_stdin(tx: Sender<LoopInput>) {
    for line in std::io::stdin().lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!("stdin: {}", e);
                break;
            }
        };
        if let Some(input) = parse_line(&line) {
            if tx.send(input).is_err() {
                break;
            }
        }
    }
}

fn run_loop<S: StorePort>(service: &mut PetService<S, SystemClock>, loop_tick_ms: u64) -> Result<()> {
    let mut sink = (ConsoleView::stdout(), LogEventSink::new());
    service.start(&mut sink).context("starting pet")?;
    println!("{}", HELP);

    let (tx, rx) = mpsc::channel();
    thread::spawn(move || read_stdin(tx));

    let tick = Duration::from_millis(loop_tick_ms);
    let mut last = Instant::now();
    info!("Entering run loop ({}ms tick)", loop_tick_ms);

    loop {
        let input = rx.recv_timeout(tick);

        let now = Instant::now();
        let elapsed = u64::try_from(now.duration_since(last).as_millis()).unwrap_or(u64::MAX);
        last = now;
        service
            .advance(elapsed, &mut sink)
            .context("advancing timers")?;

        match input {
            Ok(LoopInput::Command(cmd)) => service
                .handle_command(cmd, &mut sink)
                .with_context(|| format!("applying {:?}", cmd))?,
            Ok(LoopInput::Status) => println!("{}", render(&service.snapshot())),
            Ok(LoopInput::Help) => println!("{}", HELP),
            Ok(LoopInput::Quit) | Err(RecvTimeoutError::Disconnected) => break,
            Err(RecvTimeoutError::Timeout) => {}
        }
    }

    info!("Goodbye");
    Ok(())
}
