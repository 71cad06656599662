//! KiranLink console monitor
//!
//! Stands in for the instrument-control front end: connects the serial
//! worker per the TOML config, prints line/status events, tracks the
//! `opmode` telemetry key, and forwards stdin lines to the device.

use crossbeam_channel::TryRecvError;
use kiran_link::config::AppConfig;
use kiran_link::error::{Error, Result};
use kiran_link::event::Event;
use kiran_link::protocol::{build_query, parse_key_value};
use kiran_link::transport::available_ports;
use kiran_link::worker::SerialWorker;
use std::env;
use std::io::BufRead;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Parse config path from command line arguments.
///
/// Supports:
/// - `kiran-link <path>` (positional)
/// - `kiran-link --config <path>` (flag-based)
/// - `kiran-link -c <path>` (short flag)
///
/// Defaults to `/etc/kiranlink.toml` if not specified.
fn parse_config_path() -> String {
    let args: Vec<String> = env::args().collect();

    for i in 1..args.len() {
        if (args[i] == "--config" || args[i] == "-c") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }

    if args.len() > 1 && !args[1].starts_with('-') {
        return args[1].clone();
    }

    "/etc/kiranlink.toml".to_string()
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if env::args().any(|a| a == "--list-ports") {
        for port in available_ports()? {
            println!("{}", port);
        }
        return Ok(());
    }

    let config_path = parse_config_path();
    log::info!("Using config: {}", config_path);
    let config = AppConfig::from_file(&config_path)?;

    let (mut worker, events) = SerialWorker::new();
    worker.connect(
        &config.link.port,
        config.link.baud,
        Duration::from_millis(config.link.read_timeout_ms),
    )?;

    let running = Arc::new(AtomicBool::new(true));
    let r = Arc::clone(&running);
    ctrlc::set_handler(move || {
        log::info!("Received shutdown signal");
        r.store(false, Ordering::Relaxed);
    })
    .map_err(|e| Error::Other(format!("Error setting Ctrl-C handler: {}", e)))?;

    // Stdin commands cross to the main loop on their own channel; the
    // reader thread is detached and dies with the process.
    let (stdin_tx, stdin_rx) = crossbeam_channel::unbounded::<String>();
    thread::Builder::new()
        .name("stdin-reader".to_string())
        .spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                match line {
                    Ok(line) => {
                        if stdin_tx.send(line).is_err() {
                            break;
                        }
                    }
                    Err(_) => break,
                }
            }
        })
        .map_err(|e| Error::Other(format!("Failed to spawn stdin reader: {}", e)))?;

    // Ask for the current operating mode up front, like the front end
    // does on connect.
    send_command(&mut worker, &config, &build_query("opmode"))?;

    let mut opmode = String::from("unknown");

    while running.load(Ordering::Relaxed) {
        let mut idle = true;

        match events.try_recv() {
            Ok(Event::Line(line)) => {
                idle = false;
                println!("<< {}", line);
                if let Some((key, value)) = parse_key_value(&line) {
                    if key == "opmode" && value != opmode {
                        log::info!("opmode: {} -> {}", opmode, value);
                        opmode = value;
                    }
                }
            }
            Ok(Event::Status(message)) => {
                idle = false;
                log::info!("{}", message);
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => break,
        }

        match stdin_rx.try_recv() {
            Ok(text) => {
                idle = false;
                let text = text.trim();
                if !text.is_empty() {
                    println!(">> {}", text);
                    send_command(&mut worker, &config, text)?;
                }
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => break,
        }

        if idle {
            thread::sleep(Duration::from_millis(10));
        }
    }

    log::info!("Shutting down...");
    worker.disconnect()?;
    log::info!("KiranLink stopped");
    Ok(())
}

/// Send one command, appending CRLF when the config asks for it.
fn send_command(worker: &mut SerialWorker, config: &AppConfig, text: &str) -> Result<()> {
    if config.link.append_crlf {
        worker.send(&format!("{}\r\n", text))
    } else {
        worker.send(text)
    }
}
