use std::time::Duration;

/// Local wall-clock time for the status bar, "HH:MM".
pub fn clock_hm() -> String {
    jiff::Zoned::now().strftime("%H:%M").to_string()
}

/// Compact uptime for the status bar: "42s", "5m12s", "1h03m".
pub fn format_uptime(uptime: Duration) -> String {
    let total = uptime.as_secs();
    let hours = total / 3_600;
    let minutes = (total % 3_600) / 60;
    let seconds = total % 60;

    if hours > 0 {
        return format!("{}h{:02}m", hours, minutes);
    }
    if minutes > 0 {
        return format!("{}m{:02}s", minutes, seconds);
    }
    format!("{}s", seconds)
}

#[cfg(test)]
mod tests {
    use super::format_uptime;
    use std::time::Duration;

    #[test]
    fn formats_seconds_minutes_hours() {
        assert_eq!(format_uptime(Duration::from_secs(42)), "42s");
        assert_eq!(format_uptime(Duration::from_secs(5 * 60 + 12)), "5m12s");
        assert_eq!(format_uptime(Duration::from_secs(3_600 + 3 * 60)), "1h03m");
    }
}
