//! Per-unit duration parsing.
//!
//! The media database reports durations as human-readable text:
//! `"24 min per ep"` for series, `"1 hr 55 min"` for feature-length entries,
//! `"Unknown"` when nobody filled it in, and nothing at all for print media.

/// Duration assumed when an entry carries no duration text.
pub const DEFAULT_DURATION_MINUTES: u32 = 90;

/// Parse a duration text into whole minutes.
///
/// Absent or blank text yields [`DEFAULT_DURATION_MINUTES`]. Each number is
/// read together with the unit that follows it (`hr`, `min`, `sec`); a bare
/// number counts as minutes. Seconds are dropped. Text without any hour or
/// minute component (`"Unknown"`, `"30 sec per ep"`) yields `None`.
#[must_use]
pub fn parse_duration(text: Option<&str>) -> Option<u32> {
    let Some(text) = text.map(str::trim).filter(|t| !t.is_empty()) else {
        return Some(DEFAULT_DURATION_MINUTES);
    };

    let mut tokens = text.split_whitespace().peekable();
    let mut minutes: Option<u32> = None;

    while let Some(token) = tokens.next() {
        let Ok(value) = token.parse::<u32>() else {
            continue;
        };
        let unit = tokens.peek().map(|u| u.trim_end_matches('.').to_ascii_lowercase());
        let contribution = match unit.as_deref() {
            Some("hr" | "hrs" | "hour" | "hours" | "h") => value.saturating_mul(60),
            Some("sec" | "secs" | "second" | "seconds" | "s") => {
                tokens.next();
                continue;
            }
            _ => value,
        };
        minutes = Some(minutes.unwrap_or(0).saturating_add(contribution));
    }

    minutes
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Some("2 hr 5 min"), Some(125))]
    #[case(Some("1 hr 55 min"), Some(115))]
    #[case(Some("1 hr"), Some(60))]
    #[case(Some("24 min"), Some(24))]
    #[case(Some("24 min per ep"), Some(24))]
    #[case(Some("23"), Some(23))]
    #[case(Some("1 min 30 sec per ep"), Some(1))]
    #[case(Some("30 sec per ep"), None)]
    #[case(Some("Unknown"), None)]
    #[case(Some("   "), Some(DEFAULT_DURATION_MINUTES))]
    #[case(None, Some(DEFAULT_DURATION_MINUTES))]
    fn parses_duration_text(#[case] text: Option<&str>, #[case] expected: Option<u32>) {
        assert_eq!(parse_duration(text), expected);
    }
}
