//! Interactive builtin command console
//!
//! Runs command strings against a `RecordingHost` and prints the result code
//! and the host calls each command made. Nothing leaves the process.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --example console
//!
//! # Start with a playing item and debug logging
//! RUST_LOG=debug cargo run --example console -- --playing
//! ```
//!
//! ## Commands
//!
//! - Any builtin, e.g. `PlayerControl(seekpercentage(50))`
//! - `help` - List every builtin with its description
//! - `history` - Show executed commands and their results
//! - `exit` - Leave the console

use std::sync::Arc;

use builtins_cmd::host::{PluginContent, WindowId};
use builtins_cmd::{BuiltinExecutor, RecordingHost, Services};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

/// Host preloaded with a few windows and add-ons to play with
fn demo_host(playing: bool) -> Arc<RecordingHost> {
    let host = Arc::new(RecordingHost::new());
    host.add_window("mywindow", WindowId(13000));
    host.add_plugin(
        "plugin.video.demo",
        PluginContent {
            video: true,
            ..PluginContent::default()
        },
    );
    host.add_script_addon("script.demo");
    host.add_directory("/tmp", &[]);
    host.set_playing(playing);
    host
}

fn run_line(host: &RecordingHost, executor: &mut BuiltinExecutor, line: &str) {
    if !executor.has_command(line) {
        log::warn!("'{}' is not a known command or is missing parameters", line);
    }

    let code = executor.execute(line);
    println!("=> {}", code);
    for call in host.take_calls() {
        println!("   {:?}", call);
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let playing = std::env::args().skip(1).any(|arg| arg == "--playing");
    let host = demo_host(playing);
    let mut executor = BuiltinExecutor::new(Services::uniform(host.clone()));

    let mut rl = match DefaultEditor::new() {
        Ok(rl) => rl,
        Err(e) => {
            eprintln!("Failed to create line editor: {}", e);
            return;
        }
    };

    loop {
        match rl.readline("builtin> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line);

                match line {
                    "exit" => break,
                    "help" => print!("{}", executor.help()),
                    "history" => {
                        for entry in executor.history().iter() {
                            println!("{:>4}  {}", entry.result, entry.command);
                        }
                    }
                    _ => run_line(&host, &mut executor, line),
                }
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => {
                log::info!("EOF/interrupt received, exiting...");
                break;
            }
            Err(e) => {
                eprintln!("Error reading input: {}", e);
                break;
            }
        }
    }
}
