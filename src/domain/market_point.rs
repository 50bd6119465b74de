use std::cmp::Ordering;

/// One day of the aggregate market series.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketPoint {
    pub date_key: String,
    pub total_market_cap: f64,

    // Optional columns of the daily overview row.
    pub total_coins: Option<u32>,
    pub total_volume: Option<f64>,
    pub top_coin: Option<String>,
    pub top_coin_market_cap: Option<f64>,
}

impl MarketPoint {
    pub fn new(date_key: impl Into<String>, total_market_cap: f64) -> Self {
        Self {
            date_key: date_key.into(),
            total_market_cap,
            total_coins: None,
            total_volume: None,
            top_coin: None,
            top_coin_market_cap: None,
        }
    }

    pub fn has_summary(&self) -> bool {
        self.total_coins.is_some() || self.total_volume.is_some() || self.top_coin.is_some()
    }
}

/// Most recent point by date key. Keys share one width per series (`20240101` or
/// `2024-01-01`), so ordering the text orders the dates.
pub fn latest_point(points: &[MarketPoint]) -> Option<&MarketPoint> {
    points
        .iter()
        .max_by(|a, b| cmp_date_keys(&a.date_key, &b.date_key))
}

pub(crate) fn cmp_date_keys(a: &str, b: &str) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_point_ignores_sequence_order() {
        let points = vec![
            MarketPoint::new("20240103", 3.0),
            MarketPoint::new("20240101", 1.0),
            MarketPoint::new("20240102", 2.0),
        ];
        assert_eq!(latest_point(&points).unwrap().date_key, "20240103");
        assert!(latest_point(&[]).is_none());
    }

    #[test]
    fn summary_needs_an_optional_column() {
        let mut point = MarketPoint::new("2024-01-01", 1.1e12);
        assert!(!point.has_summary());
        point.top_coin = Some("Bitcoin".into());
        assert!(point.has_summary());
    }
}
