//! Host signals for the terminal: stdin commands and Ctrl-C

use sysmon_poller::HostEvent;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, warn};

pub fn parse_command(line: &str) -> Option<HostEvent> {
    match line.trim().to_lowercase().as_str() {
        "hide" | "h" => Some(HostEvent::VisibilityChanged { hidden: true }),
        "show" | "s" => Some(HostEvent::VisibilityChanged { hidden: false }),
        "offline" => Some(HostEvent::NetworkChanged { online: false }),
        "online" => Some(HostEvent::NetworkChanged { online: true }),
        "quit" | "q" | "exit" => Some(HostEvent::Unload),
        _ => None,
    }
}

/// Forward console commands until stdin closes
pub async fn forward_stdin(tx: mpsc::Sender<HostEvent>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break, // EOF
            Err(e) => {
                warn!("Failed to read console input: {}", e);
                break;
            }
        };

        if line.trim().is_empty() {
            continue;
        }

        let Some(event) = parse_command(&line) else {
            eprintln!("Unknown command: {} (hide, show, offline, online, quit)", line.trim());
            continue;
        };

        if tx.send(event).await.is_err() {
            break;
        }
    }
    debug!("Console input closed");
}

pub async fn forward_ctrl_c(tx: mpsc::Sender<HostEvent>) {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            let _ = tx.send(HostEvent::Unload).await;
        }
        Err(e) => warn!("Failed to listen for Ctrl-C: {}", e),
    }
}
