// Domain types and value objects
mod coin_row;
mod market_point;
mod price_point;
mod symbol;

// Re-export commonly used types to the world
pub use coin_row::{ChangeDirection, CoinRow};
pub use market_point::{MarketPoint, latest_point};
pub use price_point::{CoinSnapshot, PricePoint, latest_snapshot};
pub use symbol::Symbol;
