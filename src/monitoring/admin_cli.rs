use tokio::io::{stdin, AsyncBufRead, AsyncBufReadExt, BufReader};

use crate::control_system::traffic_light_controller::TrafficLightController;
use crate::error::ControllerError;

pub const HELP_TEXT: &str = "\
Intersection Controller Admin CLI
  status                 Show current signal status (JSON)
  start | auto           Resume automatic cycling
  stop | manual          Freeze the cycle (all red)
  mode <name>            Set mode: auto, manual, emergency
  timer <seconds>        Set green duration (applies from next phase)
  emergency <approach>   Preempt for north, east, south or west
  help                   Show this help
  exit                   Quit";

/// Result of a single CLI line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliOutcome {
    Reply(String),
    Rejected(ControllerError),
    Usage(String),
    Exit,
}

// Parses and executes one command line against the controller.
pub fn handle_command(controller: &TrafficLightController, line: &str) -> CliOutcome {
    let mut parts = line.split_whitespace();
    let command = parts.next().unwrap_or("").to_ascii_lowercase();
    let argument = parts.next();

    let result = match (command.as_str(), argument) {
        ("", _) => return CliOutcome::Reply(String::new()),
        ("status", _) => {
            return match controller.snapshot().to_json() {
                Ok(json) => CliOutcome::Reply(json),
                Err(e) => CliOutcome::Reply(format!("Failed to encode status: {}", e)),
            }
        }
        ("start" | "auto", _) => {
            controller.start();
            Ok("Started automatic cycling".to_string())
        }
        ("stop" | "manual", _) => {
            controller.stop();
            Ok("Stopped: manual mode".to_string())
        }
        ("mode", Some(name)) => controller
            .set_mode_named(name)
            .map(|_| format!("Mode set to {}", name.to_ascii_lowercase())),
        ("timer", Some(raw)) => match raw.parse::<i64>() {
            Ok(seconds) => controller
                .set_green_duration(seconds)
                .map(|_| format!("Green duration set to {}s", seconds)),
            Err(_) => return CliOutcome::Usage(format!("'{}' is not a number of seconds", raw)),
        },
        ("emergency", Some(name)) => controller
            .request_emergency_named(name)
            .map(|_| format!("Emergency preemption requested for {}", name.to_ascii_lowercase())),
        ("mode" | "timer" | "emergency", None) => {
            return CliOutcome::Usage(format!("'{}' needs an argument", command))
        }
        ("help", _) => return CliOutcome::Reply(HELP_TEXT.to_string()),
        ("exit" | "quit", _) => return CliOutcome::Exit,
        (other, _) => return CliOutcome::Usage(format!("Unknown command '{}'", other)),
    };

    match result {
        Ok(reply) => CliOutcome::Reply(reply),
        Err(e) => CliOutcome::Rejected(e),
    }
}

/// Why the CLI stopped reading commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliExit {
    /// Operator typed `exit`.
    Requested,
    /// Input closed (no terminal attached) or could not be read.
    EndOfInput,
}

/// Reads commands from stdin until `exit` or end of input.
pub async fn run_cli(controller: TrafficLightController) -> CliExit {
    println!("{}", HELP_TEXT);
    run_cli_from(&controller, BufReader::new(stdin())).await
}

pub async fn run_cli_from<R>(controller: &TrafficLightController, input: R) -> CliExit
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => return CliExit::EndOfInput,
            Err(e) => {
                log::error!("[AdminCli] Failed to read input: {}", e);
                return CliExit::EndOfInput;
            }
        };
        match handle_command(controller, &line) {
            CliOutcome::Reply(reply) if reply.is_empty() => {}
            CliOutcome::Reply(reply) => println!("{}", reply),
            CliOutcome::Rejected(e) => eprintln!("Rejected: {}", e),
            CliOutcome::Usage(msg) => eprintln!("{} (type 'help')", msg),
            CliOutcome::Exit => {
                println!("Exiting CLI.");
                return CliExit::Requested;
            }
        }
    }
}
