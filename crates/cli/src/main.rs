//! Pipeline trace playback CLI.
//!
//! This binary is the terminal front end for the playback library. It performs:
//! 1. **Replay:** Load a saved engine response and print each cycle with its changes highlighted,
//!    stepping manually, jumping to one cycle, or driving the autoplay scheduler.
//! 2. **Log conversion:** Turn a testbench text log into an engine response document.
//! 3. **Normalization:** Reduce program text to the hex listing an engine accepts.

use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use pipetrace_core::common::abi;
use pipetrace_core::common::constants::WORD_BYTES;
use pipetrace_core::config::{Config, DisplayConfig};
use pipetrace_core::engine::{Program, RecordedEngine, SimulationResponse};
use pipetrace_core::playback::{AutoplayScheduler, SpeedLevel};
use pipetrace_core::trace::log::parse_log;
use pipetrace_core::trace::{SIGNAL_NAMES, Stage};
use pipetrace_core::{PlaybackController, ViewState};

type CliResult = Result<(), Box<dyn Error>>;

#[derive(Parser, Debug)]
#[command(
    name = "pipetrace",
    author,
    version,
    about = "Cycle-by-cycle playback of pipelined processor traces",
    long_about = "Replay a simulation trace cycle by cycle, convert testbench logs, or normalize programs.\n\nLog verbosity follows RUST_LOG (default: warn).\n\nExamples:\n  pipetrace replay run.json\n  pipetrace replay run.json --autoplay --speed 8\n  pipetrace replay run.json --cycle 4 --json\n  pipetrace parse-log sim_output.txt -o run.json\n  pipetrace normalize program.txt"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Replay a trace (engine response envelope or bare snapshot array).
    Replay {
        /// Trace document to load.
        trace: PathBuf,

        /// JSON configuration file.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Autoplay speed level, 1 (slowest) to 10 (fastest).
        #[arg(long)]
        speed: Option<u8>,

        /// Step through the trace on the autoplay timer.
        #[arg(long)]
        autoplay: bool,

        /// Print one JSON view per line instead of text.
        #[arg(long)]
        json: bool,

        /// Show only this cycle (0-based trace index).
        #[arg(long, conflicts_with = "autoplay")]
        cycle: Option<usize>,
    },

    /// Convert a testbench text log into an engine response document.
    ParseLog {
        /// Log file to read.
        log: PathBuf,

        /// Output file (stdout if omitted).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the hex listing an engine receives for a program.
    Normalize {
        /// Program text to normalize.
        program: PathBuf,
    },
}

/// How views are written to stdout.
struct Output {
    json: bool,
    display: DisplayConfig,
}

fn main() {
    init_logger();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Replay {
            trace,
            config,
            speed,
            autoplay,
            json,
            cycle,
        } => cmd_replay(&trace, config.as_deref(), speed, autoplay, json, cycle),
        Commands::ParseLog { log, output } => cmd_parse_log(&log, output.as_deref()),
        Commands::Normalize { program } => cmd_normalize(&program),
    };

    if let Err(e) = result {
        eprintln!("[!] {e}");
        process::exit(1);
    }
}

/// Installs the stderr subscriber; `RUST_LOG` overrides the `warn` default.
fn init_logger() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn cmd_replay(
    path: &Path,
    config_path: Option<&Path>,
    speed: Option<u8>,
    autoplay: bool,
    json: bool,
    cycle: Option<usize>,
) -> CliResult {
    let mut config = config_path.map_or_else(|| Ok(Config::default()), Config::from_file)?;
    if let Some(level) = speed {
        let level = SpeedLevel::new(level)
            .ok_or_else(|| format!("speed must be between 1 and 10, got {level}"))?;
        config.playback.speed = level.get();
        config.playback.interval_ms = None;
    }

    let engine = RecordedEngine::new(fs::read_to_string(path)?);
    let mut controller = PlaybackController::new();
    controller.load_from(&engine, "")?;
    if controller.is_empty() {
        println!("[*] {}: trace holds no cycles", path.display());
        return Ok(());
    }

    let out = Output {
        json,
        display: config.display.clone(),
    };

    if let Some(index) = cycle {
        if index >= controller.len() {
            return Err(format!(
                "cycle {index} out of range (trace has {} cycles)",
                controller.len()
            )
            .into());
        }
        let _ = controller.seek(index);
        return render(controller.current_view_state(), &out);
    }

    if autoplay || config.playback.autoplay {
        return autoplay_run(controller, &config, &out);
    }

    render(controller.current_view_state(), &out)?;
    while controller.step_forward() {
        render(controller.current_view_state(), &out)?;
    }
    Ok(())
}

/// Hands the controller to the scheduler and prints views as the worker emits them.
fn autoplay_run(mut controller: PlaybackController, config: &Config, out: &Output) -> CliResult {
    let views = controller.subscribe();
    render(controller.current_view_state(), out)?;
    if controller.is_at_end() {
        return Ok(());
    }

    let mut scheduler = AutoplayScheduler::new(controller.into_shared());
    let interval = config.playback.interval();
    if !out.json {
        println!("[*] Autoplay every {} ms", interval.as_millis());
    }
    scheduler.start(interval)?;

    for view in &views {
        render(&view, out)?;
        if view.is_last {
            break;
        }
    }

    // The worker exits on its own after the last step; this only joins it.
    let _ = scheduler.stop();
    Ok(())
}

fn cmd_parse_log(path: &Path, output: Option<&Path>) -> CliResult {
    let text = fs::read_to_string(path)?;
    let trace = parse_log(&text)?;
    let body = serde_json::to_string_pretty(&SimulationResponse::success(&trace))?;
    match output {
        Some(out) => {
            fs::write(out, body)?;
            eprintln!("[*] Wrote {} cycles to {}", trace.len(), out.display());
        }
        None => println!("{body}"),
    }
    Ok(())
}

fn cmd_normalize(path: &Path) -> CliResult {
    let program = Program::parse(&fs::read_to_string(path)?)?;
    if program.substituted() > 0 {
        warn!(
            lines = program.substituted(),
            "non-hex lines replaced with the no-op encoding"
        );
    }
    println!("{}", program.to_hex_listing());
    Ok(())
}

fn render(view: &ViewState, out: &Output) -> CliResult {
    if out.json {
        println!("{}", serde_json::to_string(view)?);
        return Ok(());
    }

    let snap = &view.snapshot;
    println!(
        "== cycle {} / {}  PC=0x{:08x} ==",
        view.cursor.unwrap_or(0),
        view.len.saturating_sub(1),
        snap.pc
    );

    println!("Registers:");
    let mut row = Vec::new();
    for (idx, value) in snap.registers.iter() {
        let changed = view.register_diff.contains(&idx);
        if !changed && !out.display.show_unchanged {
            continue;
        }
        let mark = if changed { '*' } else { ' ' };
        row.push(format!("{mark}{:<9} 0x{value:08x}", abi::register_label(idx)));
        if row.len() == 4 {
            println!("  {}", row.join("  "));
            row.clear();
        }
    }
    if !row.is_empty() {
        println!("  {}", row.join("  "));
    }

    println!("Memory:");
    for i in 0..out.display.memory_words as u32 {
        let addr = i * WORD_BYTES;
        let changed = view.memory_diff.contains(&addr);
        if !changed && !out.display.show_unchanged {
            continue;
        }
        let mark = if changed { '*' } else { ' ' };
        println!("  {mark}[0x{addr:04x}] 0x{:08x}", snap.memory.read(addr));
    }
    // Changes outside the window are still worth a line.
    let window_end = out.display.memory_words as u32 * WORD_BYTES;
    for addr in view.memory_diff.iter().filter(|&&a| a >= window_end) {
        println!("  *[0x{addr:04x}] 0x{:08x}", snap.memory.read(*addr));
    }

    println!("Pipeline:");
    for (stage, state) in snap.pipeline.iter() {
        if state.is_bubble() {
            println!("  {:<3}  (bubble)", stage.name());
        } else {
            let detail = match stage {
                Stage::Ex => format!("  alu=0x{:08x}", state.alu_result),
                Stage::Mem | Stage::Wb => format!("  result=0x{:08x}", state.result),
                Stage::If | Stage::Id => String::new(),
            };
            println!(
                "  {:<3}  pc=0x{:08x}  {}{detail}",
                stage.name(),
                state.pc,
                state.instruction
            );
        }
    }

    let asserted: Vec<&str> = snap
        .control_signals
        .entries()
        .into_iter()
        .filter_map(|(name, on)| on.then_some(name))
        .collect();
    if asserted.is_empty() {
        println!("Control: (none of {})", SIGNAL_NAMES.join(", "));
    } else {
        println!("Control: {}", asserted.join(", "));
    }

    let stats = &view.stats;
    println!(
        "Stats: retired={} cycles={} cpi={:.2} ipc={:.2}",
        stats.instructions_retired, stats.cycles_elapsed, stats.cpi, stats.ipc
    );
    println!();
    Ok(())
}
