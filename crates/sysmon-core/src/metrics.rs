//! Payloads served by the `/api/latest` and `/api/metrics` endpoints

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::display::{self, PID_PLACEHOLDER, UNKNOWN_PROCESS_NAME};

/// Most recent point-in-time reading reported by the collector
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LatestSample {
    #[serde(default)]
    pub cpu_load: Option<f64>,
    #[serde(default)]
    pub gpu_load: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub timestamp: Option<String>,
    /// Anything other than a list is treated as absent; unreadable entries are skipped
    #[serde(default, deserialize_with = "lenient_list")]
    pub top_processes: Option<Vec<ProcessEntry>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessEntry {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_pid")]
    pub pid: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub cpu_percent: Option<f64>,
}

impl ProcessEntry {
    pub fn new(name: &str, pid: i64, cpu_percent: f64) -> Self {
        Self {
            name: Some(name.to_string()),
            pid: Some(pid),
            cpu_percent: Some(cpu_percent),
        }
    }

    pub fn display_name(&self) -> String {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => display::sanitize_name(name),
            _ => UNKNOWN_PROCESS_NAME.to_string(),
        }
    }

    /// A missing or zero pid renders as the placeholder
    pub fn display_pid(&self) -> String {
        match self.pid {
            Some(pid) if pid != 0 => pid.to_string(),
            _ => PID_PLACEHOLDER.to_string(),
        }
    }

    pub fn display_cpu(&self) -> String {
        display::format_percent(self.cpu_percent.unwrap_or(0.0))
    }
}

/// Rolling averages computed server-side
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsSummary {
    #[serde(default, deserialize_with = "lenient")]
    pub avg_cpu_load: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub avg_gpu_load: Option<f64>,
}

/// Deserialize a field, treating a value of the wrong shape as absent
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Keep every entry that reads as `T`, dropping only the ones that don't
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let serde_json::Value::Array(items) = serde_json::Value::deserialize(deserializer)? else {
        return Ok(None);
    };
    Ok(Some(
        items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
    ))
}

/// Any JSON number is accepted as a pid; fractions are truncated
fn lenient_pid<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value
        .as_i64()
        .or_else(|| value.as_f64().filter(|n| n.is_finite()).map(|n| n as i64)))
}
