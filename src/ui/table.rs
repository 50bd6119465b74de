use eframe::egui::{Color32, Grid, RichText, ScrollArea, Ui};

use crate::{
    config::PLOT_CONFIG,
    domain::{ChangeDirection, CoinRow},
    ui::UI_TEXT,
    utils::{format_change, format_usd},
};

/// One formatted table row: seven cells in column order plus the change styling.
#[derive(Debug, Clone, PartialEq)]
pub struct CoinTableRow {
    pub rank: String,
    pub name: String,
    pub symbol: String,
    pub price: String,
    pub market_cap: String,
    pub volume_24h: String,
    pub change: String,
    pub direction: ChangeDirection,
}

impl From<&CoinRow> for CoinTableRow {
    fn from(row: &CoinRow) -> Self {
        let (change, direction) = format_change(row.pct_change_24h);
        Self {
            rank: row.rank.to_string(),
            name: row.name.clone(),
            symbol: row.display_symbol(),
            price: format_usd(row.price),
            market_cap: format_usd(row.market_cap),
            volume_24h: format_usd(row.volume_24h),
            change,
            direction,
        }
    }
}

impl CoinTableRow {
    pub fn cells(&self) -> [&str; 7] {
        [
            &self.rank,
            &self.name,
            &self.symbol,
            &self.price,
            &self.market_cap,
            &self.volume_24h,
            &self.change,
        ]
    }
}

pub trait DirectionColor {
    fn color(&self) -> Color32;
}

impl DirectionColor for ChangeDirection {
    fn color(&self) -> Color32 {
        match self {
            Self::Gain => PLOT_CONFIG.color_profit,
            Self::Loss => PLOT_CONFIG.color_loss,
        }
    }
}

pub fn render_coin_table(ui: &mut Ui, rows: &[CoinTableRow]) {
    ScrollArea::horizontal().id_salt("top_coins_table").show(ui, |ui| {
        Grid::new("top_coins_grid")
            .striped(true)
            .num_columns(UI_TEXT.top_coins_headers.len())
            .spacing([16.0, 4.0])
            .show(ui, |ui| {
                for header in &UI_TEXT.top_coins_headers {
                    ui.label(RichText::new(*header).strong());
                }
                ui.end_row();

                for row in rows {
                    let [rank, name, symbol, price, cap, volume, change] = row.cells();
                    ui.label(rank);
                    ui.label(name);
                    ui.label(RichText::new(symbol).strong());
                    ui.label(price);
                    ui.label(cap);
                    ui.label(volume);
                    ui.label(RichText::new(change).color(row.direction.color()));
                    ui.end_row();
                }
            });
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn btc() -> CoinRow {
        CoinRow {
            rank: 1,
            name: "Bitcoin".into(),
            symbol: "btc".into(),
            price: 65000.0,
            market_cap: 1.2e12,
            volume_24h: 3e10,
            pct_change_24h: -1.5,
        }
    }

    #[test]
    fn btc_row_renders_with_dollar_grouping_and_loss_class() {
        let row = CoinTableRow::from(&btc());
        assert_eq!(
            row.cells(),
            [
                "1",
                "Bitcoin",
                "BTC",
                "$65,000",
                "$1,200,000,000,000",
                "$30,000,000,000",
                "-1.50%"
            ]
        );
        assert_eq!(row.direction, ChangeDirection::Loss);
        assert_eq!(row.direction.color(), PLOT_CONFIG.color_loss);
    }

    #[test]
    fn flat_change_counts_as_gain() {
        let mut coin = btc();
        coin.pct_change_24h = 0.0;
        let row = CoinTableRow::from(&coin);
        assert_eq!(row.change, "0.00%");
        assert_eq!(row.direction, ChangeDirection::Gain);
    }

    #[test]
    fn fractional_prices_keep_up_to_three_decimals() {
        let mut coin = btc();
        coin.price = 0.123456;
        coin.pct_change_24h = 12.346;
        let row = CoinTableRow::from(&coin);
        assert_eq!(row.price, "$0.123");
        assert_eq!(row.change, "12.35%");
    }
}
