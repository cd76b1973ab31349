use std::io::{IsTerminal, Write};
use std::time::Duration;

use clap::Args;
use pomocycle_core::view::format_time;
use pomocycle_core::{
    Command, Config, DurationPreset, Event, IntervalTicker, Mode, PomodoroTimer, SessionEngine,
    TOTAL_CYCLES,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::info;

use crate::terminal::TerminalView;

const HELP: &str = "commands: start|s  pause|p  reset|r  fast|f  medium|m  status  help|h  quit|q";

#[derive(Args)]
pub struct RunArgs {
    /// Duration preset (fast or medium); defaults to timer.default_preset
    #[arg(long)]
    preset: Option<DurationPreset>,
    /// Milliseconds per countdown second; defaults to timer.tick_interval_ms
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    interval_ms: Option<u64>,
    /// Start counting immediately
    #[arg(long)]
    auto_start: bool,
    /// Also print every event as a JSON line
    #[arg(long)]
    json: bool,
}

/// One line of user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Input {
    Timer(Command),
    Status,
    Help,
    Quit,
}

fn parse_input(line: &str) -> Option<Input> {
    let word = line.trim().to_ascii_lowercase();
    let input = match word.as_str() {
        "start" | "s" | "resume" => Input::Timer(Command::Start),
        "pause" | "p" => Input::Timer(Command::Pause),
        "reset" | "r" => Input::Timer(Command::Reset),
        "status" => Input::Status,
        "help" | "h" | "?" => Input::Help,
        "quit" | "q" | "exit" => Input::Quit,
        other => Input::Timer(Command::SelectPreset(other.parse().ok()?)),
    };
    Some(input)
}

fn print_event(json: bool, event: &Event) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string(event)?);
    }
    Ok(())
}

pub fn run(args: RunArgs, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let preset = args.preset.unwrap_or(config.timer.default_preset);
    let interval = args
        .interval_ms
        .map(Duration::from_millis)
        .unwrap_or_else(|| config.tick_interval());

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(run_loop(args, config, preset, interval));
    // The stdin reader sits on a blocking thread that never finishes while
    // stdin stays open; waiting for it would hang after Ctrl-C.
    runtime.shutdown_background();
    result
}

async fn run_loop(
    args: RunArgs,
    config: &Config,
    preset: DurationPreset,
    interval: Duration,
) -> Result<(), Box<dyn std::error::Error>> {
    let (tick_tx, mut tick_rx) = mpsc::unbounded_channel();
    let ansi = std::io::stdout().is_terminal() && !args.json;
    let view = TerminalView::new(std::io::stdout(), ansi, config.notifications.clone());
    let mut timer = PomodoroTimer::new(
        SessionEngine::new(preset),
        view,
        IntervalTicker::new(interval, tick_tx),
    );

    info!(%preset, interval_ms = interval.as_millis() as u64, "session opened");

    if args.auto_start {
        if let Some(event) = timer.start() {
            print_event(args.json, &event)?;
        }
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            Some(tick) = tick_rx.recv() => {
                if let Some(event) = timer.handle_tick(tick) {
                    print_event(args.json, &event)?;
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if line.trim().is_empty() {
                    continue;
                }
                match parse_input(&line) {
                    Some(Input::Quit) => break,
                    Some(Input::Timer(command)) => {
                        if let Some(event) = timer.dispatch(command) {
                            print_event(args.json, &event)?;
                        }
                    }
                    Some(Input::Status) => {
                        timer.view_mut().finish_line();
                        println!("{}", serde_json::to_string_pretty(&timer.engine().snapshot())?);
                    }
                    Some(Input::Help) => {
                        timer.view_mut().finish_line();
                        println!("{HELP}");
                    }
                    None => {
                        timer.view_mut().finish_line();
                        println!("unknown command: {}  ({HELP})", line.trim());
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    timer.view_mut().finish_line();
    std::io::stdout().flush()?;
    info!("session closed");
    Ok(())
}

pub fn table() -> Result<(), Box<dyn std::error::Error>> {
    let header: Vec<String> = DurationPreset::ALL
        .iter()
        .map(|preset| format!("{:>8}", preset.as_str()))
        .collect();
    println!("{:<12}{}", "mode", header.join(""));
    for mode in Mode::ALL {
        let row: Vec<String> = DurationPreset::ALL
            .iter()
            .map(|&preset| format!("{:>8}", format_time(mode.duration_secs(preset))))
            .collect();
        println!("{:<12}{}", mode.to_string(), row.join(""));
    }
    println!("cycles per session: {TOTAL_CYCLES}");
    Ok(())
}

pub fn status(preset: DurationPreset) -> Result<(), Box<dyn std::error::Error>> {
    let engine = SessionEngine::new(preset);
    println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
    Ok(())
}
