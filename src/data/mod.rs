//! # Data Module
//!
//! Headline and price data structures, CSV loading and daily returns.

mod loader;
mod news;
mod prices;

pub use loader::{load_news, parse_date, read_news, try_load_news, LoaderError};
pub use news::{HeadlineRecord, ScoredHeadline};
pub use prices::{
    calculate_daily_returns, load_price_table, read_price_table, PriceBar, PriceError,
    PriceSeries, PriceTable,
};
