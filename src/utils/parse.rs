//! Strict parsing of user-entered amounts and dates.

use chrono::NaiveDate;

use crate::errors::{ClassBookError, Result};

/// Parses a non-negative amount such as `150000`, `150,000` or `12.5`.
///
/// Only plain decimal numbers are accepted; `,` and `_` may separate digit
/// groups. Anything else, including arithmetic, is rejected.
pub fn parse_amount(input: &str) -> Result<f64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ClassBookError::Validation("amount is required".into()));
    }
    let cleaned: String = trimmed.chars().filter(|c| !matches!(c, ',' | '_')).collect();
    let well_formed = !cleaned.is_empty()
        && cleaned.chars().all(|c| c.is_ascii_digit() || c == '.')
        && cleaned.chars().filter(|c| *c == '.').count() <= 1
        && cleaned.chars().any(|c| c.is_ascii_digit());
    if !well_formed {
        return Err(invalid_amount(input));
    }
    let value: f64 = cleaned.parse().map_err(|_| invalid_amount(input))?;
    if !value.is_finite() {
        return Err(invalid_amount(input));
    }
    Ok(value)
}

/// Parses an ISO `YYYY-MM-DD` date.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| {
        ClassBookError::Validation(format!("`{}` is not a YYYY-MM-DD date", input.trim()))
    })
}

fn invalid_amount(input: &str) -> ClassBookError {
    ClassBookError::Validation(format!("`{}` is not a valid amount", input.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_and_grouped_numbers() {
        assert_eq!(parse_amount("100000").unwrap(), 100_000.0);
        assert_eq!(parse_amount(" 150,000 ").unwrap(), 150_000.0);
        assert_eq!(parse_amount("1_000").unwrap(), 1_000.0);
        assert_eq!(parse_amount("12.5").unwrap(), 12.5);
        assert_eq!(parse_amount("0").unwrap(), 0.0);
    }

    #[test]
    fn rejects_expressions_and_garbage() {
        for input in ["", "  ", "abc", "100+50", "2*3", "-5", "1e9", "1.2.3", ".", "NaN", "inf"] {
            assert!(
                matches!(parse_amount(input), Err(ClassBookError::Validation(_))),
                "accepted `{input}`"
            );
        }
    }

    #[test]
    fn parses_iso_dates_only() {
        assert_eq!(
            parse_date("2024-05-01").unwrap(),
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
        );
        assert!(parse_date("01/05/2024").is_err());
        assert!(parse_date("2024-02-30").is_err());
    }
}
