//! Time utilities: timezone-aware due-date parsing.

use anyhow::Result;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Parse a due date like "2026-09-01 17:30" or bare "2026-09-01" in an IANA
/// tz like "America/Chicago", returning UTC. A bare date means end of day
/// (23:59 local).
pub fn parse_due_date(input: &str, tz: &str) -> Result<DateTime<Utc>> {
    let tz: Tz = tz
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid timezone: {tz}"))?;

    let input = input.trim();
    let ndt = if let Ok(ndt) = NaiveDateTime::parse_from_str(input, "%Y-%m-%d %H:%M") {
        ndt
    } else {
        let date = NaiveDate::parse_from_str(input, "%Y-%m-%d").map_err(|e| {
            anyhow::anyhow!("invalid due date '{input}' (use YYYY-MM-DD [HH:MM]): {e}")
        })?;
        date.and_hms_opt(23, 59, 0)
            .ok_or_else(|| anyhow::anyhow!("invalid due date '{input}'"))?
    };

    let local_dt = tz
        .from_local_datetime(&ndt)
        .single()
        .ok_or_else(|| anyhow::anyhow!("ambiguous or invalid local time (DST?): {input} {tz}"))?;

    Ok(local_dt.with_timezone(&Utc))
}
