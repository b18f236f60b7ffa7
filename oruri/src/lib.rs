pub mod client;
pub mod mode;
pub mod data;
pub mod error;
mod deserialize;
mod wire;

pub use client::{ClientBuilder, Client};
pub use data::*;
pub use mode::SplitMode;
