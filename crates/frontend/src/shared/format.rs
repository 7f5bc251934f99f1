/// Utilities for display formatting (dates, quantities, money)
///
/// Provides consistent formatting across the console

/// Format ISO date string to DD.MM.YYYY format
/// Example: "2026-03-15" or "2026-03-15T14:02:26Z" -> "15.03.2026"
pub fn format_date(date_str: &str) -> String {
    let date_part = date_str.split('T').next().unwrap_or(date_str);
    if let Some((year, rest)) = date_part.split_once('-') {
        if let Some((month, day)) = rest.split_once('-') {
            return format!("{}.{}.{}", day, month, year);
        }
    }
    date_str.to_string()
}

/// Format ISO datetime string to DD.MM.YYYY HH:MM format
pub fn format_datetime(datetime_str: &str) -> String {
    if let Some((date_part, time_part)) = datetime_str.split_once('T') {
        if let Some((year, rest)) = date_part.split_once('-') {
            if let Some((month, day)) = rest.split_once('-') {
                let time: String = time_part.chars().take(5).collect();
                return format!("{}.{}.{} {}", day, month, year, time);
            }
        }
    }
    datetime_str.to_string()
}

/// Количество с учётом единицы: целые — без дробной части,
/// дробные — до трёх знаков без хвостовых нулей
pub fn format_qty(value: f64, is_fractional: bool) -> String {
    if !is_fractional {
        return format!("{}", value.round() as i64);
    }
    let rendered = format!("{:.3}", value);
    let trimmed = rendered.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() || trimmed == "-" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Количество со знаком для журнала движений: "+5", "-3"
pub fn format_signed_qty(value: f64, is_fractional: bool) -> String {
    if value > 0.0 {
        format!("+{}", format_qty(value, is_fractional))
    } else {
        format_qty(value, is_fractional)
    }
}

pub fn format_money(value: f64) -> String {
    format!("{:.2}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2026-03-15"), "15.03.2026");
        assert_eq!(format_date("2026-03-15T14:02:26.123Z"), "15.03.2026");
        assert_eq!(format_date("invalid"), "invalid");
    }

    #[test]
    fn test_format_datetime() {
        assert_eq!(format_datetime("2026-12-31T23:59:59Z"), "31.12.2026 23:59");
    }

    #[test]
    fn test_format_qty() {
        assert_eq!(format_qty(5.0, false), "5");
        assert_eq!(format_qty(1.5, true), "1.5");
        assert_eq!(format_qty(0.125, true), "0.125");
        assert_eq!(format_qty(2.0, true), "2");
    }

    #[test]
    fn test_format_signed_qty() {
        assert_eq!(format_signed_qty(5.0, false), "+5");
        assert_eq!(format_signed_qty(-3.0, false), "-3");
    }
}
