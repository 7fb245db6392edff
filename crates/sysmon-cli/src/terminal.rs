//! Text rendering of the dashboard for a terminal

use std::fmt::Write as _;
use std::io::{self, Write};

use sysmon_poller::{Dashboard, Element, TableRow, Tone, View};

const BAR_WIDTH: usize = 30;

/// View that keeps a [`Dashboard`] and prints it after every batch
pub struct TerminalView {
    dashboard: Dashboard,
    printed_at: Option<usize>,
}

impl TerminalView {
    pub fn new() -> Self {
        Self {
            dashboard: Dashboard::new(),
            printed_at: None,
        }
    }
}

impl Default for TerminalView {
    fn default() -> Self {
        Self::new()
    }
}

impl View for TerminalView {
    fn set_text(&mut self, element: Element, text: &str) {
        self.dashboard.set_text(element, text);
    }

    fn set_width(&mut self, element: Element, percent: f64) {
        self.dashboard.set_width(element, percent);
    }

    fn set_tone(&mut self, element: Element, tone: Tone) {
        self.dashboard.set_tone(element, tone);
    }

    fn clear_table(&mut self) {
        self.dashboard.clear_table();
    }

    fn append_row(&mut self, row: TableRow) {
        self.dashboard.append_row(row);
    }

    fn flush(&mut self) {
        let mutations = self.dashboard.mutations();
        if self.printed_at == Some(mutations) {
            return;
        }
        self.printed_at = Some(mutations);

        let mut stdout = io::stdout().lock();
        if let Err(e) = stdout
            .write_all(render_text(&self.dashboard).as_bytes())
            .and_then(|_| stdout.flush())
        {
            tracing::warn!("Failed to write dashboard: {}", e);
        }
    }
}

pub fn render_text(dashboard: &Dashboard) -> String {
    let mut out = String::new();

    let status = match dashboard.text(Element::StatusText) {
        "" => sysmon_core::Connectivity::Online.label(),
        text => text,
    };
    let dot = match dashboard.tone(Element::StatusIndicator) {
        Some(Tone::Error) => "x",
        _ => "*",
    };
    let _ = writeln!(out, "[{}] {}", dot, status);

    let _ = writeln!(
        out,
        "CPU {} {:>7}",
        bar(dashboard.width(Element::CpuBar)),
        or_dash(dashboard.text(Element::CpuValue))
    );
    let _ = writeln!(
        out,
        "GPU {} {:>7}",
        bar(dashboard.width(Element::GpuBar)),
        or_dash(dashboard.text(Element::GpuValue))
    );
    let _ = writeln!(
        out,
        "Updated {}   avg CPU {}   avg GPU {}",
        or_dash(dashboard.text(Element::Timestamp)),
        or_dash(dashboard.text(Element::AvgCpu)),
        or_dash(dashboard.text(Element::AvgGpu))
    );

    let _ = writeln!(out, "{:<32} {:>8} {:>8}", "PROCESS", "PID", "CPU");
    for row in dashboard.rows() {
        match row {
            TableRow::Process { name, pid, cpu, .. } => {
                let _ = writeln!(out, "{:<32} {:>8} {:>8}", truncate(name, 32), pid, cpu);
            }
            TableRow::Notice(message) => {
                let _ = writeln!(out, "  {}", message);
            }
            TableRow::Error { title, detail } => {
                let _ = writeln!(out, "  !! {}", title);
                let _ = writeln!(out, "     {}", detail);
            }
        }
    }
    out.push('\n');
    out
}

fn bar(width: Option<f64>) -> String {
    let filled = width
        .map(|percent| ((percent / 100.0) * BAR_WIDTH as f64).round() as usize)
        .unwrap_or(0)
        .min(BAR_WIDTH);
    format!("[{}{}]", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}

fn or_dash(text: &str) -> &str {
    if text.is_empty() {
        "-"
    } else {
        text
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max - 1).collect();
    cut.push('~');
    cut
}
