//! Abstract dashboard surface the poller renders into

use std::collections::HashMap;
use std::time::Duration;

use sysmon_core::display::LOADING_MESSAGE;

/// Stable identifiers of the dashboard's indicators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    StatusIndicator,
    StatusText,
    CpuBar,
    CpuValue,
    GpuBar,
    GpuValue,
    Timestamp,
    AvgCpu,
    AvgGpu,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Ok,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TableRow {
    Process {
        name: String,
        pid: String,
        cpu: String,
        /// Cosmetic entrance delay, views may ignore it
        reveal_delay: Duration,
    },
    /// Single full-width informational row
    Notice(String),
    Error {
        title: String,
        detail: String,
    },
}

/// What the process table currently shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableContent {
    #[default]
    Loading,
    Processes,
    Placeholder,
    Error,
}

pub trait View {
    fn set_text(&mut self, element: Element, text: &str);

    /// Bar width as a percentage of the full gauge
    fn set_width(&mut self, element: Element, percent: f64);

    fn set_tone(&mut self, element: Element, tone: Tone);

    fn clear_table(&mut self);

    fn append_row(&mut self, row: TableRow);

    /// Called once after each batch of updates
    fn flush(&mut self) {}
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementState {
    pub text: String,
    pub width: Option<f64>,
    pub tone: Option<Tone>,
}

/// In-memory dashboard holding the last value written to every element
#[derive(Debug, Clone)]
pub struct Dashboard {
    elements: HashMap<Element, ElementState>,
    rows: Vec<TableRow>,
    mutations: usize,
}

impl Dashboard {
    pub fn new() -> Self {
        Self {
            elements: HashMap::new(),
            rows: vec![TableRow::Notice(LOADING_MESSAGE.to_string())],
            mutations: 0,
        }
    }

    pub fn element(&self, element: Element) -> Option<&ElementState> {
        self.elements.get(&element)
    }

    pub fn text(&self, element: Element) -> &str {
        self.elements
            .get(&element)
            .map(|state| state.text.as_str())
            .unwrap_or_default()
    }

    pub fn width(&self, element: Element) -> Option<f64> {
        self.elements.get(&element).and_then(|state| state.width)
    }

    pub fn tone(&self, element: Element) -> Option<Tone> {
        self.elements.get(&element).and_then(|state| state.tone)
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    /// Number of individual writes applied since creation
    pub fn mutations(&self) -> usize {
        self.mutations
    }

    fn entry(&mut self, element: Element) -> &mut ElementState {
        self.mutations += 1;
        self.elements.entry(element).or_default()
    }
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}

impl View for Dashboard {
    fn set_text(&mut self, element: Element, text: &str) {
        self.entry(element).text = text.to_string();
    }

    fn set_width(&mut self, element: Element, percent: f64) {
        self.entry(element).width = Some(percent);
    }

    fn set_tone(&mut self, element: Element, tone: Tone) {
        self.entry(element).tone = Some(tone);
    }

    fn clear_table(&mut self) {
        self.mutations += 1;
        self.rows.clear();
    }

    fn append_row(&mut self, row: TableRow) {
        self.mutations += 1;
        self.rows.push(row);
    }
}
