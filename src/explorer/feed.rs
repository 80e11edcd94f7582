use chrono::Utc;
use log::{debug, error, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Mutex;

use super::client::ExplorerClient;
use super::mock;
use super::models::{BlockInfo, ChainTip, ExplorerTransaction, NetworkStats, RawBlock, RawTransaction};
use crate::error::ExplorerError;

/// Blocks scanned at most when collecting recent transactions.
const MAX_BLOCKS_SCANNED: u64 = 3;
/// Rough transaction count assumed per block when sizing the scan.
const TXS_PER_BLOCK_ESTIMATE: usize = 20;

/// Live network data with mock fallback. Every operation answers something.
pub struct Feed {
    client: ExplorerClient,
    rng: Mutex<StdRng>,
}

impl Feed {
    pub fn new(client: ExplorerClient, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        Self {
            client,
            rng: Mutex::new(rng),
        }
    }

    #[cfg(test)]
    pub fn client(&self) -> &ExplorerClient {
        &self.client
    }

    pub async fn current_block(&self) -> BlockInfo {
        match self.fetch_current_block().await {
            Ok(block) => block,
            Err(e) => {
                error!("FEED - current block unavailable, serving mock: {e}");
                mock::block_info(Utc::now().timestamp())
            }
        }
    }

    pub async fn network_stats(&self) -> NetworkStats {
        match self.client.get::<NetworkStats>("chain/info").await {
            Ok(stats) => stats,
            Err(e) => {
                error!("FEED - network stats unavailable, serving mock: {e}");
                mock::network_stats(Utc::now().timestamp())
            }
        }
    }

    pub async fn recent_transactions(&self, limit: usize) -> Vec<ExplorerTransaction> {
        if limit == 0 {
            return Vec::new();
        }

        let txs = match self.fetch_recent(limit).await {
            Ok(txs) if !txs.is_empty() => txs,
            Ok(_) => {
                warn!("FEED - no live transactions collected, serving mock");
                self.mock_transactions(limit)
            }
            Err(e) => {
                error!("FEED - recent transactions unavailable, serving mock: {e}");
                self.mock_transactions(limit)
            }
        };
        info!("FEED - serving {} transactions", txs.len());
        txs
    }

    /// `None` when the explorer cannot produce the transaction.
    pub async fn transaction(&self, txid: &str) -> Option<ExplorerTransaction> {
        match self.client.get::<RawTransaction>(&format!("tx/hash/{txid}")).await {
            Ok(raw) => Some(raw.into()),
            Err(e) => {
                warn!("FEED - transaction {txid} not found: {e}");
                None
            }
        }
    }

    async fn fetch_current_block(&self) -> Result<BlockInfo, ExplorerError> {
        let tips: Vec<ChainTip> = self.client.get("chain/tips").await?;
        let tip = tips
            .into_iter()
            .find(ChainTip::is_main_tip)
            .ok_or(ExplorerError::NoActiveTip)?;
        debug!("FEED - active tip {} at {}", tip.hash, tip.height);

        let raw: RawBlock = self.client.get(&format!("block/hash/{}", tip.hash)).await?;
        Ok(raw.into())
    }

    async fn fetch_recent(&self, limit: usize) -> Result<Vec<ExplorerTransaction>, ExplorerError> {
        let tip = self.fetch_current_block().await?;
        let blocks = blocks_to_scan(limit);
        let per_block = limit.div_ceil(blocks as usize);

        let mut txs = Vec::new();
        for height in (0..blocks).filter_map(|i| tip.height.checked_sub(i)) {
            let block: RawBlock = match self.client.get(&format!("block/height/{height}")).await {
                Ok(b) => b,
                Err(e) => {
                    warn!("FEED - skipping block {height}: {e}");
                    continue;
                }
            };

            // skip the coinbase
            for txid in block.tx.iter().skip(1).take(per_block) {
                if txs.len() >= limit {
                    break;
                }
                match self.client.get::<RawTransaction>(&format!("tx/hash/{txid}")).await {
                    Ok(raw) => txs.push(ExplorerTransaction::from(raw)),
                    Err(e) => warn!("FEED - skipping transaction {txid}: {e}"),
                }
            }
            if txs.len() >= limit {
                break;
            }
        }

        txs.sort_by(|a, b| b.time.cmp(&a.time));
        txs.truncate(limit);
        Ok(txs)
    }

    fn mock_transactions(&self, count: usize) -> Vec<ExplorerTransaction> {
        let mut rng = self.rng.lock().expect("mutex poisoned");
        mock::transactions_now(&mut *rng, count)
    }
}

/// `min(3, ceil(limit / 20))`, never zero.
fn blocks_to_scan(limit: usize) -> u64 {
    (limit.div_ceil(TXS_PER_BLOCK_ESTIMATE) as u64).clamp(1, MAX_BLOCKS_SCANNED)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::explorer::client::tests::offline_settings;
    use serde_json::json;

    fn offline_feed() -> Feed {
        Feed::new(ExplorerClient::new(&offline_settings()).unwrap(), Some(42))
    }

    #[test]
    fn scan_depth_is_capped() {
        assert_eq!(blocks_to_scan(1), 1);
        assert_eq!(blocks_to_scan(20), 1);
        assert_eq!(blocks_to_scan(21), 2);
        assert_eq!(blocks_to_scan(500), 3);
    }

    #[actix_web::test]
    async fn offline_block_falls_back_to_mock() {
        let block = offline_feed().current_block().await;
        assert_eq!(block.height, 873_250);
        assert_eq!(block.tx_count, 2_156);
    }

    #[actix_web::test]
    async fn offline_transactions_fall_back_to_mock() {
        let txs = offline_feed().recent_transactions(4).await;
        assert_eq!(txs.len(), 4);
        assert_eq!(txs[0].txid, mock::mock_txid(0));
    }

    #[actix_web::test]
    async fn offline_lookup_is_none() {
        assert!(offline_feed().transaction("abcd").await.is_none());
    }

    #[actix_web::test]
    async fn live_path_collects_and_sorts() {
        let feed = offline_feed();
        let c = feed.client();
        c.prime_cache(
            "chain/tips",
            json!([
                {"height": 101, "hash": "fork", "branchlen": 1, "status": "valid-fork"},
                {"height": 100, "hash": "tip", "branchlen": 0, "status": "active"}
            ]),
        );
        c.prime_cache("block/hash/tip", json!({"hash": "tip", "height": 100, "tx": ["cb", "t1", "t2"]}));
        c.prime_cache("block/height/100", json!({"hash": "tip", "height": 100, "tx": ["cb", "t1", "t2"]}));
        c.prime_cache("tx/hash/t1", json!({"txid": "t1", "size": 200, "time": 5, "vin": [], "vout": []}));
        c.prime_cache("tx/hash/t2", json!({"txid": "t2", "size": 300, "time": 9, "vin": [], "vout": []}));

        let block = feed.current_block().await;
        assert_eq!((block.height, block.tx_count), (100, 3));

        let txs = feed.recent_transactions(5).await;
        let ids: Vec<&str> = txs.iter().map(|t| t.txid.as_str()).collect();
        assert_eq!(ids, ["t2", "t1"]);
    }
}
