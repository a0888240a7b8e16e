/// Utilities for date formatting and default ranges

/// Format ISO date string to DD/MM/YYYY
/// Example: "2025-03-15" or "2025-03-15T14:02:26Z" -> "15/03/2025"
pub fn format_date(date_str: &str) -> String {
    let date_part = date_str.split('T').next().unwrap_or(date_str);
    if let Some((year, rest)) = date_part.split_once('-') {
        if let Some((month, day)) = rest.split_once('-') {
            return format!("{}/{}/{}", day, month, year);
        }
    }
    date_str.to_string()
}

/// Short DD/MM label for chart axes
pub fn format_day_label(date_str: &str) -> String {
    let date_part = date_str.split('T').next().unwrap_or(date_str);
    if let Some((_, rest)) = date_part.split_once('-') {
        if let Some((month, day)) = rest.split_once('-') {
            return format!("{}/{}", day, month);
        }
    }
    date_str.to_string()
}

/// Today's date as "YYYY-MM-DD"
pub fn today_iso() -> String {
    chrono::Utc::now().format("%Y-%m-%d").to_string()
}

/// Current (year, month) pair
pub fn current_year_month() -> (i32, u32) {
    use chrono::Datelike;
    let now = chrono::Utc::now();
    (now.year(), now.month())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2025-03-15"), "15/03/2025");
        assert_eq!(format_date("2025-03-15T14:02:26.123Z"), "15/03/2025");
    }

    #[test]
    fn test_format_day_label() {
        assert_eq!(format_day_label("2025-03-15"), "15/03");
    }

    #[test]
    fn test_invalid_format_passes_through() {
        assert_eq!(format_date("invalid"), "invalid");
        assert_eq!(format_day_label("invalid"), "invalid");
    }
}
