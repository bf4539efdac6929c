//! Period-string resolution.
//!
//! Two grammars coexist for historical reasons and both are accepted: a fixed
//! token set (`1y`, `6mo`, ..., `1w`) with hard-coded second counts, and a
//! general `<integer><unit>` pattern. Anything else resolves to the sentinel
//! `0`, which callers must treat as a rejected input, never as a zero-length
//! request.

pub const SECONDS_PER_DAY: u64 = 86_400;
pub const SECONDS_PER_WEEK: u64 = 604_800;
/// 30-day month approximation.
pub const SECONDS_PER_MONTH: u64 = 2_592_000;
/// 365-day year approximation.
pub const SECONDS_PER_YEAR: u64 = 31_536_000;

/// Shortest period worth charting; shorter requests are floored to this and
/// the caller attaches a user-visible note.
pub const MIN_CHART_SECONDS: u64 = 3 * SECONDS_PER_DAY;
/// Periods beyond this draw a readability warning but still proceed.
pub const MAX_READABLE_SECONDS: u64 = SECONDS_PER_YEAR;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DurationUnit {
    Day,
    Week,
    /// `m` always means month here; this system has no minute granularity.
    Month,
    Year,
}

impl DurationUnit {
    pub const fn seconds(self) -> u64 {
        match self {
            Self::Day => SECONDS_PER_DAY,
            Self::Week => SECONDS_PER_WEEK,
            Self::Month => SECONDS_PER_MONTH,
            Self::Year => SECONDS_PER_YEAR,
        }
    }
}

/// Parsed `<integer><unit>` period, e.g. `7mo` or `2 week`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationSpec {
    pub amount: u32,
    pub unit: DurationUnit,
}

impl DurationSpec {
    /// Parse the general grammar. The unit is matched on its first letter,
    /// case-insensitively, and whitespace between integer and unit is
    /// tolerated (`"2 week"` is the same as `"2w"`).
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        let digits_end = trimmed.find(|ch: char| !ch.is_ascii_digit())?;
        if digits_end == 0 {
            return None;
        }

        let amount: u32 = trimmed[..digits_end].parse().ok()?;
        if amount == 0 {
            return None;
        }

        let unit = match trimmed[digits_end..]
            .trim_start()
            .chars()
            .next()?
            .to_ascii_lowercase()
        {
            'y' => DurationUnit::Year,
            'm' => DurationUnit::Month,
            'w' => DurationUnit::Week,
            'd' => DurationUnit::Day,
            _ => return None,
        };

        Some(Self { amount, unit })
    }

    pub const fn seconds(self) -> u64 {
        self.amount as u64 * self.unit.seconds()
    }
}

/// Fixed second counts for the historical token set.
fn enumerated_seconds(token: &str) -> Option<u64> {
    let seconds = match token {
        "1y" => 31_536_000,
        "6mo" => 15_552_000,
        "3mo" => 7_776_000,
        "2mo" => 5_184_000,
        "1mo" => 2_592_000,
        "3w" => 1_814_400,
        "2w" => 1_209_600,
        "1w" => 604_800,
        _ => return None,
    };
    Some(seconds)
}

/// Resolve a period string to seconds, or `0` when neither grammar matches.
pub fn resolve_duration(input: &str) -> u64 {
    let token = input.trim().to_ascii_lowercase();
    if let Some(seconds) = enumerated_seconds(&token) {
        return seconds;
    }
    DurationSpec::parse(&token)
        .map(DurationSpec::seconds)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_enumerated_tokens() {
        assert_eq!(resolve_duration("1w"), 604_800);
        assert_eq!(resolve_duration("6mo"), 15_552_000);
        assert_eq!(resolve_duration("1y"), 31_536_000);
    }

    #[test]
    fn general_grammar_matches_enumerated_tokens() {
        assert_eq!(resolve_duration("2 week"), resolve_duration("2w"));
        assert_eq!(resolve_duration("1 Year"), resolve_duration("1y"));
        assert_eq!(resolve_duration("3MO"), resolve_duration("3mo"));
    }

    #[test]
    fn resolves_general_grammar_beyond_token_set() {
        assert_eq!(resolve_duration("7mo"), 7 * SECONDS_PER_MONTH);
        assert_eq!(resolve_duration("10d"), 10 * SECONDS_PER_DAY);
        assert_eq!(resolve_duration("3y"), 3 * SECONDS_PER_YEAR);
    }

    #[test]
    fn unrecognized_input_resolves_to_sentinel_zero() {
        assert_eq!(resolve_duration("xyz"), 0);
        assert_eq!(resolve_duration(""), 0);
        assert_eq!(resolve_duration("mo3"), 0);
        assert_eq!(resolve_duration("0d"), 0);
        assert_eq!(resolve_duration("5s"), 0);
    }

    #[test]
    fn month_unit_never_means_minute() {
        let spec = DurationSpec::parse("5m").expect("must parse");
        assert_eq!(spec.unit, DurationUnit::Month);
        assert_eq!(spec.seconds(), 5 * SECONDS_PER_MONTH);
    }
}
