//! taskdeck - interactive command-line task tracker
//!
//! Loads the persisted task list, runs the menu shell until the user exits,
//! and saves on every exit path (menu exit, error, or termination signal).

use std::io;
use std::path::Path;
use std::sync::{Arc, Mutex};

use clap::Parser;
use colored::Colorize;

use taskdeck::config::AppConfig;
use taskdeck::persistence::TaskPersistence;
use taskdeck::shell::Shell;
use taskdeck::shutdown::{SaveGuard, ShutdownResult, SignalHandler};
use taskdeck::store::TaskStore;

#[derive(Parser)]
#[command(name = "taskdeck")]
#[command(version = "0.1.0")]
#[command(about = "Interactive command-line task tracker", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing. Diagnostics go to stderr; stdout belongs to the
    // shell.
    let filter = if cli.verbose {
        "taskdeck=debug,info"
    } else {
        "taskdeck=warn,error"
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let config = match AppConfig::load(Path::new(".")) {
        Ok(config) => config,
        Err(e) => {
            println!(
                "{} {e}. Using default settings.",
                "Warning:".yellow()
            );
            AppConfig::default()
        }
    };

    if !config.color {
        colored::control::set_override(false);
    }

    let persistence = Arc::new(TaskPersistence::new(&config.tasks_file));

    // Load failures are reported and degrade to an empty list; they never
    // stop the application.
    let (tasks, load_error) = persistence.load_or_empty();
    if let Some(e) = load_error {
        println!("{} {e}", "Error:".red().bold());
        println!("Starting with an empty task list.");
    }

    let store = Arc::new(Mutex::new(TaskStore::from_tasks(tasks)));

    // Saves when main returns, on the success and error paths alike.
    let _save_guard = SaveGuard::new(Arc::clone(&persistence), Arc::clone(&store));

    let signal_handler = SignalHandler::new(Arc::clone(&persistence), Arc::clone(&store));

    // The shell blocks on stdin, so it runs on a blocking thread while the
    // signal listener stays on the runtime.
    let shell_store = Arc::clone(&store);
    let shell_task = tokio::task::spawn_blocking(move || {
        let stdin = io::stdin();
        let stdout = io::stdout();
        let mut shell = Shell::new(stdin.lock(), stdout.lock(), shell_store);
        shell.run()
    });

    tokio::select! {
        joined = shell_task => {
            joined??;
        }
        shutdown = signal_handler.wait_for_shutdown() => {
            if let Ok(ShutdownResult::SaveFailed(message)) = shutdown {
                eprintln!("{} {message}", "Error:".red().bold());
            }
            // The signal path has already saved; skip the guard and end.
            std::process::exit(0);
        }
    }

    Ok(())
}
