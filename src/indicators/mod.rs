//! Technical indicators for market analysis

pub mod candle;
mod ring_buffer;
pub mod volatility;
