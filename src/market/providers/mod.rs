//! History provider implementations.

pub mod world_trading_data;

pub use world_trading_data::WorldTradingDataClient;
