//! Checks for the `format` keyword.
//!
//! Unknown formats are treated as annotations and always pass.

use chrono::NaiveDate;

/// Reason a string failed its format check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatFailure {
    pub cause: Option<String>,
}

/// Checks `value` against a named format.
pub fn check(format: &str, value: &str) -> Result<(), FormatFailure> {
    match format {
        "date" => check_date(value),
        "email" => check_email(value),
        _ => Ok(()),
    }
}

/// Calendar date as `YYYY-MM-DD`.
fn check_date(value: &str) -> Result<(), FormatFailure> {
    if value.len() != 10 {
        return Err(FormatFailure {
            cause: Some("expected YYYY-MM-DD".to_string()),
        });
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|_| ())
        .map_err(|e| FormatFailure {
            cause: Some(e.to_string()),
        })
}

fn check_email(value: &str) -> Result<(), FormatFailure> {
    let Some((local, domain)) = value.rsplit_once('@') else {
        return Err(FormatFailure { cause: None });
    };
    let valid = !local.is_empty()
        && !domain.is_empty()
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !value.chars().any(char::is_whitespace);
    if valid {
        Ok(())
    } else {
        Err(FormatFailure { cause: None })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dates() {
        assert!(check("date", "2024-02-29").is_ok());
        assert!(check("date", "2023-02-29").is_err());
        assert!(check("date", "2024-2-1").is_err());
        assert!(check("date", "01/15/2024").is_err());
    }

    #[test]
    fn test_date_failure_has_cause() {
        let failure = check("date", "2024-13-01").unwrap_err();
        assert!(failure.cause.is_some());
    }

    #[test]
    fn test_emails() {
        assert!(check("email", "ada@example.com").is_ok());
        assert!(check("email", "ada@localhost").is_ok());
        assert!(check("email", "ada.example.com").is_err());
        assert!(check("email", "@example.com").is_err());
        assert!(check("email", "ada @example.com").is_err());
    }

    #[test]
    fn test_unknown_format_passes() {
        assert!(check("uri", "not a uri").is_ok());
    }
}
