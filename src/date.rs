use crate::error::CliError;
use chrono::NaiveDate;
use std::cmp::Ordering;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Lenient parse used for stored visit dates; bad values are the caller's problem.
pub fn parse_visit_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok()
}

/// Strict parse used for user-supplied flags.
pub fn parse_date_string(s: &str, label: &str) -> Result<NaiveDate, CliError> {
    let t = s.trim();
    if t.len() != 10 {
        return Err(CliError::usage(format!("Invalid {}: {}", label, s)));
    }
    NaiveDate::parse_from_str(t, DATE_FORMAT)
        .map_err(|_| CliError::usage(format!("Invalid {}: {}", label, s)))
}

pub fn validate_range(
    from: Option<&str>,
    to: Option<&str>,
) -> Result<(Option<NaiveDate>, Option<NaiveDate>), CliError> {
    let from = from.map(|f| parse_date_string(f, "from")).transpose()?;
    let to = to.map(|t| parse_date_string(t, "to")).transpose()?;
    if let (Some(f), Some(t)) = (from, to) {
        if f > t {
            return Err(CliError::usage("Invalid range: from > to"));
        }
    }
    Ok((from, to))
}

/// Newest first. Unparsable dates sink below every valid one.
pub fn newest_first(a: &str, b: &str) -> Ordering {
    match (parse_visit_date(a), parse_visit_date(b)) {
        (Some(da), Some(db)) => db.cmp(&da),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

pub fn in_window(date: &str, from: Option<NaiveDate>, to: Option<NaiveDate>) -> bool {
    if from.is_none() && to.is_none() {
        return true;
    }
    match parse_visit_date(date) {
        Some(d) => from.map_or(true, |f| d >= f) && to.map_or(true, |t| d <= t),
        None => false,
    }
}
