use chrono::NaiveTime;
use validator::ValidationError;

/// Accepts `HH:MM` (24h).
pub fn validate_clock_time(value: &str) -> Result<(), ValidationError> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M")
        .map(|_| ())
        .map_err(|_| {
            let mut err = ValidationError::new("clock_time");
            err.message = Some("expected HH:MM".into());
            err
        })
}

/// Rejects lists containing blank entries.
pub fn validate_no_blank_items(values: &[String]) -> Result<(), ValidationError> {
    if values.iter().any(|v| v.trim().is_empty()) {
        let mut err = ValidationError::new("blank_item");
        err.message = Some("entries must not be blank".into());
        return Err(err);
    }
    Ok(())
}

/// Rejects strings that are empty once trimmed.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("must not be blank".into());
        return Err(err);
    }
    Ok(())
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}

/// Trims entries and drops duplicates, keeping first occurrence order.
pub fn tidy_list(values: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(values.len());
    for v in values {
        let v = v.trim();
        if !v.is_empty() && !out.iter().any(|o| o.eq_ignore_ascii_case(v)) {
            out.push(v.to_string());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_time_accepts_24h_minutes() {
        assert!(validate_clock_time("09:30").is_ok());
        assert!(validate_clock_time("23:59").is_ok());
        assert!(validate_clock_time("24:00").is_err());
        assert!(validate_clock_time("9am").is_err());
    }

    #[test]
    fn tidy_list_trims_and_dedupes() {
        let input = vec![" Cooking ".to_string(), "cooking".into(), "".into(), "Driving".into()];
        assert_eq!(tidy_list(&input), vec!["Cooking".to_string(), "Driving".into()]);
    }

    #[test]
    fn blank_items_are_rejected() {
        assert!(validate_no_blank_items(&["a".into(), " ".into()]).is_err());
        assert!(validate_no_blank_items(&["a".into()]).is_ok());
    }

    #[test]
    fn emails_are_normalized() {
        assert_eq!(normalize_email("  A@X.com "), "a@x.com");
    }
}
