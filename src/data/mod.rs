mod backend;
mod client;
mod envelope;
mod task;

pub use {
    backend::{AnalystTask, Backend, OverviewTask, TopCoinsTask},
    client::{Endpoint, HttpMarketApi, MarketApi},
    envelope::{AnalystRecord, CoinRecord, Envelope, OverviewRecord, decode_rows},
    task::{FetchTask, TaskPoll, TaskSpawner},
};
