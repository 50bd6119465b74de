/// Direction of the 24h move. Zero counts as a gain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeDirection {
    Gain,
    Loss,
}

/// One ranked coin, as shown in the top coins table.
#[derive(Debug, Clone, PartialEq)]
pub struct CoinRow {
    pub rank: u32,
    pub name: String,
    pub symbol: String,

    pub price: f64,
    pub market_cap: f64,
    pub volume_24h: f64,
    /// Signed percentage, e.g. -1.5 for a 1.5% drop.
    pub pct_change_24h: f64,
}

impl CoinRow {
    // A method to determine the direction of the 24h move
    pub fn change_direction(&self) -> ChangeDirection {
        ChangeDirection::of(self.pct_change_24h)
    }

    /// Ticker as displayed everywhere in the UI.
    pub fn display_symbol(&self) -> String {
        self.symbol.to_uppercase()
    }
}

impl ChangeDirection {
    pub fn of(pct: f64) -> Self {
        if pct >= 0.0 {
            ChangeDirection::Gain
        } else {
            ChangeDirection::Loss
        }
    }
}
