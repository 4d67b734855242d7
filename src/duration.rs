use crate::error::FormatError;
use once_cell::sync::Lazy;
use regex::Regex;

// `[0-9]` rather than `\d`: the latter matches non-ASCII digits.
static DURATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:([0-9]+):)?([0-9]+):([0-9]{2})$").expect("duration regex is valid")
});

/// Parse `MM:SS` or `HH:MM:SS` into whole seconds.
///
/// The seconds group must be exactly two digits but is not range checked,
/// so `"10:75"` parses to 675. Hours and minutes have no upper bound; a
/// value that does not fit in `u64` is a format error.
pub fn parse_duration(text: &str) -> Result<u64, FormatError> {
    let trimmed = text.trim();
    let caps = DURATION_RE
        .captures(trimmed)
        .ok_or_else(|| FormatError::new(text))?;

    let group = |i: usize| -> Result<u64, FormatError> {
        caps.get(i)
            .map_or(Ok(0), |m| m.as_str().parse::<u64>())
            .map_err(|_| FormatError::new(text))
    };

    let hours = group(1)?;
    let minutes = group(2)?;
    let seconds = group(3)?;

    hours
        .checked_mul(3600)
        .and_then(|h| minutes.checked_mul(60).and_then(|m| h.checked_add(m)))
        .and_then(|hm| hm.checked_add(seconds))
        .ok_or_else(|| FormatError::new(text))
}

/// Clock-style display: `MM:SS` under an hour, `H:MM:SS` otherwise.
pub fn format_clock(total_secs: u64) -> String {
    let h = total_secs / 3600;
    let m = (total_secs % 3600) / 60;
    let s = total_secs % 60;
    if h > 0 {
        format!("{h}:{m:02}:{s:02}")
    } else {
        format!("{m:02}:{s:02}")
    }
}
