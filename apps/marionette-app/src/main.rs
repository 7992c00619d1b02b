//! Marionette whole-body model CLI.
//!
//! Provides two modes of operation:
//! - direct queries (`limits`, `jacobian`, `mass-matrix`, `fk`, `bias`)
//!   against a chain model loaded from a TOML description
//! - `pipe`: read JSON requests from stdin, one per line, and write JSON
//!   responses to stdout, for driving the dispatcher from another process

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use marionette_core::{ModelConfig, OutputSlot, SlotShape, Value};
use marionette_dispatch::{Dispatcher, Request, Response, handle_request};
use marionette_model::ChainModel;

// ---------------------------------------------------------------------------
// CLI
// ---------------------------------------------------------------------------

/// Whole-body model queries over named components.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Path to the TOML model description.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the lower and upper joint limits.
    Limits,

    /// Print the frame Jacobian, column-major.
    Jacobian {
        /// Reference frame name.
        #[arg(short, long)]
        frame: String,

        /// Joint configuration, comma separated (defaults to zeros).
        #[arg(short, long)]
        q: Option<String>,
    },

    /// Print the joint-space mass matrix.
    MassMatrix {
        /// Joint configuration, comma separated (defaults to zeros).
        #[arg(short, long)]
        q: Option<String>,
    },

    /// Print the pose of a frame as xyz + wxyz quaternion.
    Fk {
        /// Reference frame name.
        #[arg(short, long)]
        frame: String,

        /// Joint configuration, comma separated (defaults to zeros).
        #[arg(short, long)]
        q: Option<String>,
    },

    /// Print the bias forces (gravity and velocity terms).
    Bias {
        /// Joint configuration, comma separated (defaults to zeros).
        #[arg(short, long)]
        q: Option<String>,

        /// Joint velocities, comma separated (defaults to zeros).
        #[arg(short, long)]
        dq: Option<String>,
    },

    /// Re-initialise the model, optionally from a different description.
    Init {
        /// Path of a TOML model description to initialise from.
        #[arg(short, long)]
        from: Option<PathBuf>,
    },

    /// Serve JSON requests from stdin, one per line.
    Pipe,

    /// Print crate information.
    Info,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn load_dispatcher(config: Option<&PathBuf>) -> Result<Dispatcher, String> {
    let path = config.ok_or("a model description is required: pass --config <path>")?;
    let config = ModelConfig::from_file(path).map_err(|e| e.to_string())?;
    let model = ChainModel::from_config(&config).map_err(|e| e.to_string())?;
    Ok(Dispatcher::with_model(Box::new(model)))
}

fn parse_values(text: Option<&String>, len: usize) -> Result<Vec<f64>, String> {
    let Some(text) = text else {
        return Ok(vec![0.0; len]);
    };
    text.split(',')
        .map(|v| v.trim().parse::<f64>().map_err(|e| format!("bad value {v:?}: {e}")))
        .collect()
}

fn print_slot(slot: &OutputSlot) {
    match slot.shape() {
        SlotShape::Vector { len } => {
            let row: Vec<String> = (0..len).map(|i| format!("{:10.4}", slot.as_slice()[i])).collect();
            println!("[{}]", row.join(" "));
        }
        SlotShape::Matrix { rows, cols } => {
            for r in 0..rows {
                let row: Vec<String> = (0..cols).map(|c| format!("{:10.4}", slot.element(r, c))).collect();
                println!("[{}]", row.join(" "));
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Mode implementations
// ---------------------------------------------------------------------------

fn run_query(
    dispatcher: &mut Dispatcher,
    component: &str,
    nargout: usize,
    args: Vec<Value>,
) -> Result<(), String> {
    let slots = dispatcher
        .dispatch(component, nargout, &args)
        .map_err(|e| e.to_string())?;
    for slot in &slots {
        print_slot(slot);
    }
    Ok(())
}

fn run_pipe(dispatcher: &mut Dispatcher) -> Result<(), String> {
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    for line in stdin.lock().lines() {
        let line = line.map_err(|e| e.to_string())?;
        if line.trim().is_empty() {
            continue;
        }
        let response = match serde_json::from_str::<Request>(&line) {
            Ok(request) => handle_request(dispatcher, &request),
            Err(e) => Response::error(format!("malformed request: {e}")),
        };
        let encoded = serde_json::to_string(&response).map_err(|e| e.to_string())?;
        writeln!(stdout, "{encoded}").map_err(|e| e.to_string())?;
    }
    Ok(())
}

fn run_info() {
    println!("marionette v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("crates:");
    println!("  marionette-core     {}", env!("CARGO_PKG_VERSION"));
    println!("  marionette-model    {}", env!("CARGO_PKG_VERSION"));
    println!("  marionette-dispatch {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("edition: 2024");
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

fn run(cli: Cli) -> Result<(), String> {
    if matches!(cli.command, Commands::Info) {
        run_info();
        return Ok(());
    }

    let mut dispatcher = load_dispatcher(cli.config.as_ref())?;
    let dof = dispatcher.state().dof().map_err(|e| e.to_string())?;

    match cli.command {
        Commands::Limits => run_query(&mut dispatcher, "joint-limits", 2, Vec::new()),
        Commands::Jacobian { frame, q } => {
            let q = parse_values(q.as_ref(), dof)?;
            let args = vec![Value::vector(q), Value::name(frame)];
            run_query(&mut dispatcher, "jacobian", 1, args)
        }
        Commands::MassMatrix { q } => {
            let q = parse_values(q.as_ref(), dof)?;
            run_query(&mut dispatcher, "mass-matrix", 1, vec![Value::vector(q)])
        }
        Commands::Fk { frame, q } => {
            let q = parse_values(q.as_ref(), dof)?;
            let args = vec![Value::vector(q), Value::name(frame)];
            run_query(&mut dispatcher, "forward-kinematics", 1, args)
        }
        Commands::Bias { q, dq } => {
            let q = parse_values(q.as_ref(), dof)?;
            let dq = parse_values(dq.as_ref(), dof)?;
            let args = vec![Value::vector(q), Value::vector(dq)];
            run_query(&mut dispatcher, "bias-forces", 1, args)
        }
        Commands::Init { from } => {
            let args = match from {
                Some(path) => vec![Value::name(path.display().to_string())],
                None => Vec::new(),
            };
            run_query(&mut dispatcher, "model-initialise", 0, args)?;
            println!("model initialised");
            Ok(())
        }
        Commands::Pipe => run_pipe(&mut dispatcher),
        Commands::Info => unreachable!(),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}
