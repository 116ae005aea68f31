use navchart_core::RawPoint;

use super::minutes_after_open;

const SRC: &str = "yield-feed";

/// Yield history for a fixture fund. Sampled on a different cadence from NAV.
pub fn by_fund(fund: &str) -> Option<Vec<RawPoint>> {
    match fund {
        // every 45 minutes, offset so only some instants coincide with NAV
        "NAVX" => Some(
            (0..=10)
                .map(|i: i32| {
                    let v = 1.55 + f64::from(i % 4) * 0.01;
                    RawPoint::yield_pct(minutes_after_open(i64::from(i) * 45), v).with_source(SRC)
                })
                .collect(),
        ),
        "DBLTS" => Some(vec![
            RawPoint::yield_pct("2025-04-04T09:00:00Z", 1.58),
            RawPoint::yield_pct("2025-04-04T10:00:00.000Z2025-04-04T13:35:00.000Z", 1.61),
        ]),
        "SPARSE" => Some(vec![RawPoint::yield_pct(
            minutes_after_open(0).to_rfc3339(),
            1.5,
        )]),
        "FLAT" | "EMPTY" | "TIMEOUT" => Some(vec![]),
        _ => None,
    }
}
