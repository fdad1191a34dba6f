//! Core conversion logic and checkout state

pub mod config;
pub mod controller;
pub mod currency;
pub mod engine;
pub mod input;
pub mod log;
pub mod payment;
pub mod rates;
pub mod recipient;
pub mod resolver;

// Re-export main types for cleaner imports
pub use controller::{ConversionController, ConversionState, LastEdited, Mode};
pub use currency::{Currency, CurrencyClass};
pub use engine::ConversionEngine;
pub use rates::RateTable;
