use std::sync::Arc;

use eframe::egui;

use crate::{
    data::{FetchTask, MarketApi, TaskSpawner},
    domain::{CoinRow, MarketPoint, PricePoint, Symbol},
    error::FetchResult,
};

pub type TopCoinsTask = FetchTask<FetchResult<Vec<CoinRow>>>;
pub type OverviewTask = FetchTask<FetchResult<Vec<MarketPoint>>>;
pub type AnalystTask = FetchTask<FetchResult<Vec<PricePoint>>>;

/// The market API paired with the spawner its requests run on. Cheap to clone.
#[derive(Clone)]
pub struct Backend {
    api: Arc<dyn MarketApi>,
    spawner: TaskSpawner,
}

impl Backend {
    pub fn new(api: Arc<dyn MarketApi>, spawner: TaskSpawner) -> Self {
        Self { api, spawner }
    }

    pub fn fetch_top_coins(&self, ctx: &egui::Context) -> TopCoinsTask {
        let api = self.api.clone();
        self.spawner
            .spawn(ctx, async move { api.top_coins().await })
    }

    pub fn fetch_overview(&self, ctx: &egui::Context) -> OverviewTask {
        let api = self.api.clone();
        self.spawner.spawn(ctx, async move { api.overview().await })
    }

    pub fn fetch_analyst(&self, ctx: &egui::Context, symbol: Symbol) -> AnalystTask {
        let api = self.api.clone();
        self.spawner
            .spawn(ctx, async move { api.analyst(&symbol).await })
    }
}
