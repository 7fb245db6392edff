//! Projection of fetched samples onto a [`View`]

use std::time::Duration;

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use sysmon_core::display::{
    self, FETCH_ERROR_FALLBACK, FETCH_ERROR_TITLE, NO_NETWORK_DETAIL, NO_NETWORK_TITLE,
    NO_PROCESSES_MESSAGE, ROW_REVEAL_STEP_MS,
};
use sysmon_core::{Connectivity, LatestSample, MetricsSummary, ProcessEntry};
use tracing::warn;

use crate::view::{Element, TableContent, TableRow, Tone, View};

#[derive(Debug, Clone, PartialEq)]
pub enum ErrorBanner {
    /// The dual fetch failed; carries the failure text
    Fetch(String),
    /// The host reported it has no network
    NoNetwork,
}

impl ErrorBanner {
    fn into_row(self) -> TableRow {
        match self {
            Self::Fetch(detail) => {
                let detail = if detail.trim().is_empty() {
                    FETCH_ERROR_FALLBACK.to_string()
                } else {
                    detail
                };
                TableRow::Error {
                    title: FETCH_ERROR_TITLE.to_string(),
                    detail,
                }
            }
            Self::NoNetwork => TableRow::Error {
                title: NO_NETWORK_TITLE.to_string(),
                detail: NO_NETWORK_DETAIL.to_string(),
            },
        }
    }
}

pub fn show_status(view: &mut dyn View, connectivity: Connectivity) {
    let tone = if connectivity.is_online() {
        Tone::Ok
    } else {
        Tone::Error
    };
    view.set_tone(Element::StatusIndicator, tone);
    view.set_tone(Element::StatusText, tone);
    view.set_text(Element::StatusText, connectivity.label());
}

pub fn show_error_banner(view: &mut dyn View, banner: ErrorBanner) {
    view.clear_table();
    view.append_row(banner.into_row());
}

/// Update every field present in the sample and return what the table now shows
pub fn apply_sample(view: &mut dyn View, sample: &LatestSample, max_rows: usize) -> TableContent {
    if let Some(cpu) = sample.cpu_load {
        show_gauge(view, Element::CpuBar, Element::CpuValue, cpu);
    }
    if let Some(gpu) = sample.gpu_load {
        show_gauge(view, Element::GpuBar, Element::GpuValue, gpu);
    }

    if let Some(raw) = sample.timestamp.as_deref().filter(|ts| !ts.is_empty()) {
        match format_clock(raw) {
            Some(clock) => view.set_text(Element::Timestamp, &clock),
            None => warn!(timestamp = raw, "Failed to parse sample timestamp"),
        }
    }

    show_processes(
        view,
        sample.top_processes.as_deref().unwrap_or_default(),
        max_rows,
    )
}

pub fn apply_summary(view: &mut dyn View, summary: &MetricsSummary) {
    if let Some(avg) = summary.avg_cpu_load {
        view.set_text(Element::AvgCpu, &display::format_average(avg));
    }
    if let Some(avg) = summary.avg_gpu_load {
        view.set_text(Element::AvgGpu, &display::format_average(avg));
    }
}

fn show_gauge(view: &mut dyn View, bar: Element, label: Element, load: f64) {
    let percent = display::clamp_percent(load);
    let text = display::format_percent(percent);
    view.set_width(bar, percent);
    view.set_text(bar, &text);
    view.set_text(label, &text);
}

fn show_processes(view: &mut dyn View, processes: &[ProcessEntry], max_rows: usize) -> TableContent {
    view.clear_table();

    if processes.is_empty() {
        view.append_row(TableRow::Notice(NO_PROCESSES_MESSAGE.to_string()));
        return TableContent::Placeholder;
    }

    for (index, process) in processes.iter().take(max_rows).enumerate() {
        view.append_row(TableRow::Process {
            name: process.display_name(),
            pid: process.display_pid(),
            cpu: process.display_cpu(),
            reveal_delay: Duration::from_millis(ROW_REVEAL_STEP_MS * index as u64),
        });
    }
    TableContent::Processes
}

const LOCAL_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// ISO 8601 timestamp -> local `HH:MM:SS`; a timestamp without offset is already local
fn format_clock(raw: &str) -> Option<String> {
    let local = match DateTime::parse_from_rfc3339(raw) {
        Ok(parsed) => parsed.with_timezone(&Local),
        Err(_) => {
            let naive = LOCAL_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())?;
            Local.from_local_datetime(&naive).earliest()?
        }
    };
    Some(local.format("%H:%M:%S").to_string())
}
