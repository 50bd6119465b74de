//! Wire shapes of the backend responses and their conversion into domain rows.

use serde::{Deserialize, Deserializer};

use crate::domain::{CoinRow, CoinSnapshot, MarketPoint, PricePoint};

/// Every endpoint wraps its rows as `{ "data": [...] }`.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub data: Vec<T>,
}

#[derive(Debug, Deserialize)]
pub struct CoinRecord {
    #[serde(rename = "MarketCapRank")]
    pub market_cap_rank: u32,
    #[serde(rename = "CoinName")]
    pub coin_name: String,
    #[serde(rename = "Symbol")]
    pub symbol: String,
    #[serde(rename = "Price")]
    pub price: f64,
    #[serde(rename = "MarketCap")]
    pub market_cap: f64,
    #[serde(rename = "Volume24h")]
    pub volume_24h: f64,
    #[serde(rename = "PctChange24h")]
    pub pct_change_24h: f64,
}

#[derive(Debug, Deserialize)]
pub struct OverviewRecord {
    #[serde(rename = "DateKey", deserialize_with = "date_key")]
    pub date_key: String,
    #[serde(rename = "TotalMarketCap")]
    pub total_market_cap: f64,
    #[serde(rename = "TotalCoins", default)]
    pub total_coins: Option<u32>,
    #[serde(rename = "TotalVolume", default)]
    pub total_volume: Option<f64>,
    #[serde(rename = "Top1_Coin", default)]
    pub top1_coin: Option<String>,
    #[serde(rename = "Top1_MarketCap", default)]
    pub top1_market_cap: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct AnalystRecord {
    #[serde(rename = "DateKey", deserialize_with = "date_key")]
    pub date_key: String,
    #[serde(rename = "Price")]
    pub price: f64,
    #[serde(rename = "CoinName", default)]
    pub coin_name: Option<String>,
    #[serde(rename = "MarketCapRank", default)]
    pub market_cap_rank: Option<u32>,
    #[serde(rename = "MarketCap", default)]
    pub market_cap: Option<f64>,
    #[serde(rename = "Volume24h", default)]
    pub volume_24h: Option<f64>,
    #[serde(rename = "PctChange24h", default)]
    pub pct_change_24h: Option<f64>,
}

/// Date keys arrive as `"2024-01-01"` or as the warehouse integer `20240101`.
fn date_key<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawDateKey {
        Text(String),
        Int(i64),
    }

    Ok(match RawDateKey::deserialize(deserializer)? {
        RawDateKey::Text(text) => text,
        RawDateKey::Int(n) => n.to_string(),
    })
}

impl From<CoinRecord> for CoinRow {
    fn from(r: CoinRecord) -> Self {
        CoinRow {
            rank: r.market_cap_rank,
            name: r.coin_name,
            symbol: r.symbol,
            price: r.price,
            market_cap: r.market_cap,
            volume_24h: r.volume_24h,
            pct_change_24h: r.pct_change_24h,
        }
    }
}

impl From<OverviewRecord> for MarketPoint {
    fn from(r: OverviewRecord) -> Self {
        MarketPoint {
            date_key: r.date_key,
            total_market_cap: r.total_market_cap,
            total_coins: r.total_coins,
            total_volume: r.total_volume,
            top_coin: r.top1_coin,
            top_coin_market_cap: r.top1_market_cap,
        }
    }
}

impl From<AnalystRecord> for PricePoint {
    fn from(r: AnalystRecord) -> Self {
        let snapshot = CoinSnapshot {
            coin_name: r.coin_name,
            rank: r.market_cap_rank,
            market_cap: r.market_cap,
            volume_24h: r.volume_24h,
            pct_change_24h: r.pct_change_24h,
        };
        PricePoint {
            date_key: r.date_key,
            price: r.price,
            snapshot: (!snapshot.is_empty()).then_some(snapshot),
        }
    }
}

/// Parses a response body and converts each record, keeping sequence order.
pub fn decode_rows<R, T>(body: &[u8]) -> Result<Vec<T>, serde_json::Error>
where
    R: for<'de> Deserialize<'de>,
    T: From<R>,
{
    let envelope: Envelope<R> = serde_json::from_slice(body)?;
    Ok(envelope.data.into_iter().map(T::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coin_records_map_onto_rows() {
        let body = br#"{"data":[{"MarketCapRank":1,"CoinName":"Bitcoin","Symbol":"btc","Price":65000,"MarketCap":1.2e12,"Volume24h":3e10,"PctChange24h":-1.5}]}"#;
        let rows: Vec<CoinRow> = decode_rows::<CoinRecord, _>(body).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].rank, 1);
        assert_eq!(rows[0].symbol, "btc");
        assert_eq!(rows[0].market_cap, 1.2e12);
        assert_eq!(rows[0].pct_change_24h, -1.5);
    }

    #[test]
    fn date_keys_accept_text_and_integers_in_order() {
        let body = br#"{"data":[
            {"DateKey":"2024-01-01","TotalMarketCap":1.1e12},
            {"DateKey":20240102,"TotalMarketCap":1.15e12,"TotalCoins":300,"Top1_Coin":"Bitcoin"}
        ]}"#;
        let points: Vec<MarketPoint> = decode_rows::<OverviewRecord, _>(body).unwrap();
        let keys: Vec<&str> = points.iter().map(|p| p.date_key.as_str()).collect();
        assert_eq!(keys, ["2024-01-01", "20240102"]);
        assert_eq!(points[1].total_coins, Some(300));
        assert_eq!(points[1].top_coin.as_deref(), Some("Bitcoin"));
        assert!(points[0].total_volume.is_none());
    }

    #[test]
    fn analyst_snapshot_only_when_columns_present() {
        let body = br#"{"data":[
            {"DateKey":20240101,"Price":2300.5},
            {"DateKey":20240102,"Price":2310.0,"CoinName":"Ethereum","MarketCapRank":2}
        ]}"#;
        let points: Vec<PricePoint> = decode_rows::<AnalystRecord, _>(body).unwrap();
        assert!(points[0].snapshot.is_none());
        let snap = points[1].snapshot.as_ref().unwrap();
        assert_eq!(snap.rank, Some(2));
        assert_eq!(snap.coin_name.as_deref(), Some("Ethereum"));
    }

    #[test]
    fn missing_data_field_is_an_error() {
        assert!(decode_rows::<CoinRecord, CoinRow>(br#"{"rows":[]}"#).is_err());
        assert!(decode_rows::<CoinRecord, CoinRow>(b"<html>oops</html>").is_err());
        assert!(decode_rows::<CoinRecord, CoinRow>(br#"{"data":null}"#).is_err());
    }

    #[test]
    fn empty_data_is_fine() {
        let points: Vec<PricePoint> = decode_rows::<AnalystRecord, _>(br#"{"data":[]}"#).unwrap();
        assert!(points.is_empty());
    }
}
