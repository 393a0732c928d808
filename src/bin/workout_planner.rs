// ABOUTME: Line-oriented chat front end for the Pierre workout planner
// ABOUTME: Reads prompts from stdin, prints summaries, and uploads workouts on request

use anyhow::Result;
use clap::Parser;
use pierre_workout_planner::config::PlannerConfig;
use pierre_workout_planner::conversation::Orchestrator;
use pierre_workout_planner::errors::ErrorCode;
use pierre_workout_planner::logging::LoggingConfig;
use tokio::io::{stdin, AsyncBufReadExt, BufReader};
use tokio::signal::ctrl_c;
use tokio::{pin, select};
use tracing::{error, warn};

#[derive(Parser)]
#[command(name = "workout-planner")]
#[command(about = "Pierre workout planner - build structured running workouts by chatting")]
struct Args {
    /// Override the language model
    #[arg(long)]
    model: Option<String>,

    /// Override the cap on model rounds per message
    #[arg(long)]
    max_tool_rounds: Option<usize>,

    /// Override the cap on automatic continuations
    #[arg(long)]
    max_continuations: Option<usize>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

const HELP: &str = "Commands: /workouts to list proposed workouts, /upload <name> to send one \
                    to Garmin Connect, /quit to exit. Anything else is sent to the coach.";

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut logging = LoggingConfig::from_env();
    if args.verbose {
        logging = logging.with_level("debug");
    }
    logging.init()?;

    let mut config = PlannerConfig::from_env();
    if let Some(model) = args.model {
        config.llm.model = model;
    }
    if let Some(rounds) = args.max_tool_rounds.filter(|rounds| *rounds > 0) {
        config.limits.max_tool_rounds = rounds;
    }
    if let Some(continuations) = args.max_continuations {
        config.limits.max_continuations = continuations;
    }

    let mut orchestrator = Orchestrator::from_config(&config)?;

    let cancellation = orchestrator.cancellation_flag();

    println!("{HELP}");
    let mut lines = BufReader::new(stdin()).lines();
    loop {
        // Ctrl-C at the prompt exits; during a message it cancels the turn
        let line = select! {
            line = lines.next_line() => line?,
            _ = ctrl_c() => None,
        };
        let Some(line) = line else {
            break;
        };
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match input.split_once(' ').map_or((input, ""), |(cmd, rest)| (cmd, rest.trim())) {
            ("/quit" | "/exit", _) => break,
            ("/help", _) => println!("{HELP}"),
            ("/workouts", _) => {
                let workouts = orchestrator.workouts();
                if workouts.is_empty() {
                    println!("No workouts have been created yet.");
                }
                for workout in workouts {
                    println!("{workout}\n");
                }
            }
            ("/upload", "") => println!("Usage: /upload <workout name>"),
            ("/upload", name) => match orchestrator.upload_workout(name).await {
                Ok(_) => println!("Uploaded '{name}' to Garmin Connect."),
                Err(e) => {
                    error!(error = %e, "Upload failed");
                    println!("Upload failed: {e}");
                }
            },
            _ => {
                cancellation.reset();
                let chat = orchestrator.chat(input);
                pin!(chat);
                let result = loop {
                    select! {
                        result = &mut chat => break result,
                        _ = ctrl_c() => {
                            warn!("Interrupt received, cancelling the current message");
                            cancellation.cancel();
                        }
                    }
                };
                match result {
                    Ok(chat) => {
                        println!("{}", chat.summary);
                        if chat.truncated {
                            println!("(The answer was cut short; send another message to keep going.)");
                        }
                    }
                    Err(e) if e.code == ErrorCode::Cancelled => println!("Cancelled."),
                    Err(e) => {
                        error!(error = %e, "Chat failed");
                        println!("Error: {e}");
                    }
                }
            }
        }
    }

    Ok(())
}
