use crate::error::TimestampError;

pub fn format_vtt_timestamp(ms: u64) -> String {
    let total_seconds = ms / 1000;
    let milli = ms % 1000;

    let sec = total_seconds % 60;
    let total_minutes = total_seconds / 60;
    let min = total_minutes % 60;
    let hour = total_minutes / 60;

    format!("{hour:02}:{min:02}:{sec:02}.{milli:03}")
}

/// Parses `hh:mm:ss.ttt` or `mm:ss.ttt` into absolute milliseconds.
pub fn parse_vtt_timestamp(s: &str) -> Result<u64, TimestampError> {
    let t = s.trim();

    let (hms, frac) = t
        .split_once('.')
        .ok_or_else(|| TimestampError::BadFraction(t.to_string()))?;

    if frac.len() != 3 || !frac.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TimestampError::BadFraction(t.to_string()));
    }
    let milli: u64 = frac
        .parse()
        .map_err(|_| TimestampError::BadFraction(t.to_string()))?;

    let parts: Vec<&str> = hms.split(':').collect();
    let (h, m, sec) = match parts.as_slice() {
        [h, m, s] => (field(h, "hours", t)?, field(m, "minutes", t)?, field(s, "seconds", t)?),
        [m, s] => (0, field(m, "minutes", t)?, field(s, "seconds", t)?),
        _ => return Err(TimestampError::WrongFieldCount(t.to_string())),
    };

    if m > 59 {
        return Err(TimestampError::OutOfRange {
            field: "minutes",
            input: t.to_string(),
        });
    }
    if sec > 59 {
        return Err(TimestampError::OutOfRange {
            field: "seconds",
            input: t.to_string(),
        });
    }

    Ok(((h * 60 + m) * 60 + sec) * 1000 + milli)
}

fn field(raw: &str, name: &'static str, input: &str) -> Result<u64, TimestampError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TimestampError::BadField {
            field: name,
            input: input.to_string(),
        });
    }
    raw.parse().map_err(|_| TimestampError::OutOfRange {
        field: name,
        input: input.to_string(),
    })
}
