use super::market_point::cmp_date_keys;

/// One day of a single symbol's price history.
#[derive(Debug, Clone, PartialEq)]
pub struct PricePoint {
    pub date_key: String,
    pub price: f64,

    /// Extra snapshot columns, present when the backend sends full rows.
    pub snapshot: Option<CoinSnapshot>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoinSnapshot {
    pub coin_name: Option<String>,
    pub rank: Option<u32>,
    pub market_cap: Option<f64>,
    pub volume_24h: Option<f64>,
    pub pct_change_24h: Option<f64>,
}

impl PricePoint {
    pub fn new(date_key: impl Into<String>, price: f64) -> Self {
        Self {
            date_key: date_key.into(),
            price,
            snapshot: None,
        }
    }
}

/// The most recent point that carries snapshot columns.
pub fn latest_snapshot(points: &[PricePoint]) -> Option<&PricePoint> {
    points
        .iter()
        .filter(|p| p.snapshot.is_some())
        .max_by(|a, b| cmp_date_keys(&a.date_key, &b.date_key))
}

impl CoinSnapshot {
    pub fn is_empty(&self) -> bool {
        *self == CoinSnapshot::default()
    }
}
