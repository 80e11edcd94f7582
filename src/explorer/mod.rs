pub mod arc;
pub mod client;
pub mod feed;
pub mod mock;
pub mod models;
pub mod throttle;

pub use arc::{ArcClient, ArcNetwork};
pub use client::ExplorerClient;
pub use feed::Feed;
pub use models::{ExplorerTransaction, is_txid};
