//! Lexeme validation for `INTEGER`/`FLOAT` tokens (invariants I6/I7,
//! `spec.md` §3) and construction of [`Datetime`] from a `DATE_TIME`
//! lexeme. The Lexer matches these permissively (see `src/lexer.rs`); all
//! strictness lives here so the caller gets one clear message naming the
//! offending literal.

use crate::value::{Datetime, Time};

fn split_sign(lexeme: &str) -> (&str, &str) {
    match lexeme.as_bytes().first() {
        Some(b'+') | Some(b'-') => (&lexeme[..1], &lexeme[1..]),
        _ => ("", lexeme),
    }
}

fn check_underscore_placement(digits: &str) -> Result<(), String> {
    if digits.is_empty() {
        return Err("missing digits".to_string());
    }
    if digits.starts_with('_') || digits.ends_with('_') || digits.contains("__") {
        return Err(format!("underscore must sit between two digits in '{}'", digits));
    }
    Ok(())
}

fn check_no_leading_zero(digits: &str) -> Result<(), String> {
    let plain: String = digits.chars().filter(|c| *c != '_').collect();
    if plain.len() > 1 && plain.starts_with('0') {
        return Err(format!("leading zero not allowed in '{}'", digits));
    }
    Ok(())
}

pub(crate) fn validate_integer(lexeme: &str) -> Result<i64, String> {
    let (_, digits) = split_sign(lexeme);
    check_underscore_placement(digits)?;
    check_no_leading_zero(digits)?;
    let cleaned: String = lexeme.chars().filter(|c| *c != '_').collect();
    cleaned
        .parse::<i64>()
        .map_err(|_| format!("integer literal out of range: '{}'", lexeme))
}

pub(crate) fn validate_float(lexeme: &str) -> Result<f64, String> {
    let (_, body) = split_sign(lexeme);
    let (mantissa, exponent) = match body.find(['e', 'E']) {
        Some(i) => (&body[..i], Some(&body[i + 1..])),
        None => (body, None),
    };
    let (int_part, frac_part) = match mantissa.find('.') {
        Some(i) => (&mantissa[..i], Some(&mantissa[i + 1..])),
        None => (mantissa, None),
    };

    check_underscore_placement(int_part)?;
    check_no_leading_zero(int_part)?;
    if let Some(frac) = frac_part {
        check_underscore_placement(frac)?;
    }
    if let Some(exp) = exponent {
        let (_, exp_digits) = split_sign(exp);
        check_underscore_placement(exp_digits)?;
    }

    let cleaned: String = lexeme.chars().filter(|c| *c != '_').collect();
    cleaned
        .parse::<f64>()
        .map_err(|_| format!("invalid float literal '{}'", lexeme))
}

/// Parse a `DATE_TIME` lexeme already validated by the Lexer's anchored
/// regex (`YYYY-MM-DD` optionally followed by `THH:MM:SS[.ffffff][Z|±HH:MM]`).
pub(crate) fn parse_datetime(lexeme: &str) -> Datetime {
    let year = lexeme[0..4].parse().unwrap_or(0);
    let month = lexeme[5..7].parse().unwrap_or(0);
    let day = lexeme[8..10].parse().unwrap_or(0);
    if lexeme.len() <= 10 {
        return Datetime { year, month, day, time: None };
    }

    let hour = lexeme[11..13].parse().unwrap_or(0);
    let minute = lexeme[14..16].parse().unwrap_or(0);
    let second = lexeme[17..19].parse().unwrap_or(0);
    let mut rest = &lexeme[19..];

    let mut micros = 0u32;
    if let Some(stripped) = rest.strip_prefix('.') {
        let frac_end = stripped
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(stripped.len());
        let mut padded = stripped[..frac_end].to_string();
        while padded.len() < 6 {
            padded.push('0');
        }
        micros = padded[..6].parse().unwrap_or(0);
        rest = &stripped[frac_end..];
    }

    let offset_minutes = if rest.is_empty() {
        None
    } else if rest == "Z" {
        Some(0)
    } else {
        let sign = if rest.starts_with('-') { -1 } else { 1 };
        let hours: i32 = rest[1..3].parse().unwrap_or(0);
        let minutes: i32 = rest[4..6].parse().unwrap_or(0);
        Some(sign * (hours * 60 + minutes))
    };

    Datetime {
        year,
        month,
        day,
        time: Some(Time {
            hour,
            minute,
            second,
            micros,
            offset_minutes,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_integer() {
        assert_eq!(validate_integer("42").unwrap(), 42);
        assert_eq!(validate_integer("-7").unwrap(), -7);
        assert_eq!(validate_integer("1_000").unwrap(), 1000);
        assert_eq!(validate_integer("0").unwrap(), 0);
    }

    #[test]
    fn integer_rejects_bad_underscores_and_leading_zero() {
        assert!(validate_integer("_0").is_err());
        assert!(validate_integer("1_").is_err());
        assert!(validate_integer("1__0").is_err());
        assert!(validate_integer("01").is_err());
    }

    #[test]
    fn float_rejects_bad_forms() {
        assert!(validate_float("1_.0").is_err());
        assert!(validate_float("1._0").is_err());
        assert!(validate_float("1e_1").is_err());
        assert!(validate_float("1_e1").is_err());
        assert_eq!(validate_float("1.5").unwrap(), 1.5);
        assert_eq!(validate_float("1e10").unwrap(), 1e10);
    }

    #[test]
    fn datetime_with_offset() {
        let dt = parse_datetime("1979-05-27T07:32:00Z");
        assert_eq!(dt.year, 1979);
        assert_eq!(dt.time.unwrap().offset_minutes, Some(0));
    }

    #[test]
    fn date_only() {
        let dt = parse_datetime("1979-05-27");
        assert!(dt.time.is_none());
    }
}
