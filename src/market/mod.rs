//! Chain registry and stock market: chain names and tiers, per-chain state,
//! share pricing, and the bank's share pool.

pub mod chain;
pub mod pricing;
pub mod stock;

pub use chain::{Chain, ChainMap, ChainName, ChainParseError, Tier, CHAIN_COUNT};
pub use pricing::{majority_bonus, minority_bonus, stock_price};
pub use stock::StockMarket;
