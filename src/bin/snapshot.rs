//! Headless dump of the dashboard data: top coins, the market overview and
//! optionally one symbol's price history, printed as terminal tables.

#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::process::ExitCode;

    use anyhow::Result;
    use clap::Parser;
    use futures::future::OptionFuture;
    use tabled::{Table, Tabled, settings::Style};

    use coin_deck::{
        API, ApiClientConfig, HttpMarketApi, MarketApi,
        domain::{CoinRow, MarketPoint, PricePoint, Symbol},
        error::FetchResult,
        ui::table::CoinTableRow,
        utils::{format_number, format_usd},
    };

    #[derive(Parser, Debug)]
    #[command(author, version, about = "Print dashboard data to the terminal", long_about = None)]
    struct Args {
        /// Base URL of the dashboard REST API
        #[arg(long, default_value = API.base_url)]
        api_base: String,

        /// Also print the price history of this symbol
        #[arg(long)]
        symbol: Option<String>,

        /// Number of coins requested (0 leaves it to the backend)
        #[arg(long, default_value_t = API.top_coins_limit)]
        top_limit: u32,

        /// Rows printed per series
        #[arg(long, default_value_t = 10)]
        rows: usize,

        /// Per-request timeout in milliseconds
        #[arg(long, default_value_t = API.client.timeout_ms)]
        timeout_ms: u64,
    }

    #[derive(Tabled)]
    struct CoinLine {
        #[tabled(rename = "#")]
        rank: String,
        #[tabled(rename = "Name")]
        name: String,
        #[tabled(rename = "Symbol")]
        symbol: String,
        #[tabled(rename = "Price")]
        price: String,
        #[tabled(rename = "Market Cap")]
        market_cap: String,
        #[tabled(rename = "Volume (24h)")]
        volume_24h: String,
        #[tabled(rename = "Change (24h)")]
        change: String,
    }

    impl From<CoinTableRow> for CoinLine {
        fn from(row: CoinTableRow) -> Self {
            Self {
                rank: row.rank,
                name: row.name,
                symbol: row.symbol,
                price: row.price,
                market_cap: row.market_cap,
                volume_24h: row.volume_24h,
                change: row.change,
            }
        }
    }

    #[derive(Tabled)]
    struct SeriesLine {
        #[tabled(rename = "Date")]
        date_key: String,
        #[tabled(rename = "Value")]
        value: String,
        #[tabled(rename = "Details")]
        details: String,
    }

    fn overview_line(point: &MarketPoint) -> SeriesLine {
        let mut details = Vec::new();
        if let Some(coins) = point.total_coins {
            details.push(format!("{} coins", format_number(coins as f64)));
        }
        if let Some(volume) = point.total_volume {
            details.push(format!("vol {}", format_usd(volume)));
        }
        if let Some(leader) = &point.top_coin {
            details.push(format!("leader {}", leader));
        }
        SeriesLine {
            date_key: point.date_key.clone(),
            value: format_usd(point.total_market_cap),
            details: details.join(", "),
        }
    }

    fn price_line(point: &PricePoint) -> SeriesLine {
        let details = point
            .snapshot
            .as_ref()
            .and_then(|s| s.rank.map(|rank| format!("rank {}", rank)))
            .unwrap_or_default();
        SeriesLine {
            date_key: point.date_key.clone(),
            value: format_usd(point.price),
            details,
        }
    }

    /// Prints one section, or its error. Returns whether it succeeded.
    fn print_section<T>(
        title: &str,
        result: FetchResult<Vec<T>>,
        render: impl FnOnce(Vec<T>) -> String,
    ) -> bool {
        println!("\n== {} ==", title);
        match result {
            Ok(rows) if rows.is_empty() => {
                println!("(no rows)");
                true
            }
            Ok(rows) => {
                println!("{}", render(rows));
                true
            }
            Err(err) => {
                log::error!("{} failed: {}", title, err);
                eprintln!("{} failed: {}", title, err);
                false
            }
        }
    }

    fn render_table<R: Tabled>(lines: impl IntoIterator<Item = R>) -> String {
        Table::new(lines).with(Style::rounded()).to_string()
    }

    pub async fn run() -> Result<ExitCode> {
        let args = Args::parse();
        let config = ApiClientConfig {
            timeout_ms: args.timeout_ms,
            top_coins_limit: (args.top_limit > 0).then_some(args.top_limit),
            ..ApiClientConfig::default()
        }
        .with_base_url(args.api_base.clone())
        .validated()?;
        let symbol = args.symbol.as_deref().map(Symbol::parse).transpose()?;

        let api = HttpMarketApi::new(config)?;
        let analyst: OptionFuture<_> = symbol.as_ref().map(|s| api.analyst(s)).into();
        let (top, overview, history) = futures::join!(api.top_coins(), api.overview(), analyst);

        let rows = args.rows;
        let mut ok = print_section("Top Coins", top, |coins: Vec<CoinRow>| {
            render_table(
                coins
                    .iter()
                    .map(CoinTableRow::from)
                    .map(CoinLine::from),
            )
        });
        ok &= print_section("Market Overview", overview, |points| {
            render_table(points.iter().take(rows).map(overview_line))
        });
        if let (Some(symbol), Some(history)) = (&symbol, history) {
            let title = format!("{} Price", symbol.display());
            ok &= print_section(&title, history, |points| {
                render_table(points.iter().take(rows).map(price_line))
            });
        }

        Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
    }
}

#[cfg(not(target_arch = "wasm32"))]
#[tokio::main]
async fn main() -> anyhow::Result<std::process::ExitCode> {
    env_logger::Builder::new()
        .filter(None, log::LevelFilter::Warn)
        .filter(Some("coin_deck"), log::LevelFilter::Info)
        .parse_default_env()
        .init();

    native::run().await
}
