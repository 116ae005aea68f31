use navchart_core::RawPoint;

use super::minutes_after_open;

const SRC: &str = "nav-feed";

/// NAV history for a fixture fund.
pub fn by_fund(fund: &str) -> Option<Vec<RawPoint>> {
    match fund {
        // every 30 minutes for 8 hours, gently rising with a mid-day dip
        "NAVX" => Some(
            (0..=16)
                .map(|i: i32| {
                    let dip = if (6..=9).contains(&i) { -0.12 } else { 0.0 };
                    let v = 100.0 + f64::from(i) * 0.02 + dip;
                    RawPoint::nav(minutes_after_open(i64::from(i) * 30), v).with_source(SRC)
                })
                .collect(),
        ),
        // the producer that glues two ISO instants together, plus noise
        "DBLTS" => Some(vec![
            RawPoint::nav("2025-04-04T09:00:00.000Z2025-04-04T12:35:00.000Z", 100.10),
            RawPoint::nav("2025-04-04T09:30:00.000Z2025-04-04T13:05:00.000Z", 100.14),
            RawPoint::nav("2025-04-04T10:00:00.000Z", 100.18),
            RawPoint::nav("not-a-timestamp", 99.0),
            RawPoint::nav(minutes_after_open(90).timestamp_millis(), 100.20),
        ]),
        "SPARSE" => Some(vec![
            RawPoint::nav(minutes_after_open(0).to_rfc3339(), 100.0),
            RawPoint::nav(minutes_after_open(30).to_rfc3339(), 100.5),
        ]),
        "FLAT" => Some(
            (0..=8)
                .map(|i| RawPoint::nav(minutes_after_open(i * 60).to_rfc3339(), 100.0))
                .collect(),
        ),
        "EMPTY" | "TIMEOUT" => Some(vec![]),
        _ => None,
    }
}
