//! Text formatting shared by every dashboard view

/// Maximum number of process rows shown in the table
pub const MAX_PROCESS_ROWS: usize = 10;

/// Delay between the reveal of consecutive process rows
pub const ROW_REVEAL_STEP_MS: u64 = 50;

pub const ONLINE_LABEL: &str = "Server reachable";
pub const OFFLINE_LABEL: &str = "Server unreachable";

pub const NO_PROCESSES_MESSAGE: &str = "No active high-load processes";
pub const UNKNOWN_PROCESS_NAME: &str = "Unknown process";
pub const LOADING_MESSAGE: &str = "Loading data...";

pub const FETCH_ERROR_TITLE: &str = "Failed to connect to server";
pub const FETCH_ERROR_FALLBACK: &str = "Could not load data";
pub const NO_NETWORK_TITLE: &str = "No network connection";
pub const NO_NETWORK_DETAIL: &str = "Check your network connection";

pub const PID_PLACEHOLDER: &str = "-";

/// Clamp a load value into the displayable 0-100 range
pub fn clamp_percent(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 100.0)
}

/// `42.0` -> `"42.0%"`
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

/// Averages are shown without a unit suffix
pub fn format_average(value: f64) -> String {
    format!("{:.1}", clamp_percent(value))
}

/// Strip angle brackets so a process name can never smuggle markup into a view
pub fn sanitize_name(name: &str) -> String {
    name.chars().filter(|c| !matches!(c, '<' | '>')).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_percent() {
        assert_eq!(clamp_percent(-12.5), 0.0);
        assert_eq!(clamp_percent(150.0), 100.0);
        assert_eq!(clamp_percent(37.25), 37.25);
        assert_eq!(clamp_percent(f64::NAN), 0.0);
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(0.0), "0.0%");
        assert_eq!(format_percent(99.96), "100.0%");
        assert_eq!(format_percent(12.34), "12.3%");
    }

    #[test]
    fn test_format_average_clamps() {
        assert_eq!(format_average(250.0), "100.0");
        assert_eq!(format_average(-1.0), "0.0");
        assert_eq!(format_average(41.26), "41.3");
    }

    #[test]
    fn test_sanitize_name() {
        assert_eq!(sanitize_name("<script>alert(1)</script>"), "scriptalert(1)/script");
        assert_eq!(sanitize_name("chrome.exe"), "chrome.exe");
        assert_eq!(sanitize_name("<>"), "");
    }
}
