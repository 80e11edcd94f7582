use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::error::ExplorerError;

const DEPLOYMENT_HEADER: &str = "X-DeploymentID";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArcNetwork {
    Mainnet,
    Testnet,
}

impl ArcNetwork {
    pub fn endpoints(self) -> &'static [&'static str] {
        match self {
            ArcNetwork::Mainnet => &["https://api.taal.com/arc", "https://arc.gorillapool.io"],
            ArcNetwork::Testnet => &["https://arc-test.taal.com"],
        }
    }
}

impl fmt::Display for ArcNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArcNetwork::Mainnet => write!(f, "mainnet"),
            ArcNetwork::Testnet => write!(f, "testnet"),
        }
    }
}

impl FromStr for ArcNetwork {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mainnet" | "main" => Ok(ArcNetwork::Mainnet),
            "testnet" | "test" => Ok(ArcNetwork::Testnet),
            other => Err(format!("unknown ARC network '{other}'")),
        }
    }
}

/// Transaction status as reported by an ARC node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArcTxStatus {
    pub txid: String,
    #[serde(default)]
    pub tx_status: Option<String>,
    #[serde(default)]
    pub block_hash: Option<String>,
    #[serde(default)]
    pub block_height: Option<u64>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub extra_info: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BroadcastBody<'a> {
    raw_tx: &'a str,
}

/// Broadcast/lookup client over a fixed list of ARC endpoints.
pub struct ArcClient {
    http: reqwest::Client,
    endpoints: Vec<String>,
    deployment_id: String,
    current: AtomicUsize,
}

impl ArcClient {
    pub fn new(network: ArcNetwork, deployment_id: &str, timeout: Duration) -> Result<Self, ExplorerError> {
        let endpoints = network.endpoints().iter().map(|e| e.to_string()).collect();
        Self::with_endpoints(endpoints, deployment_id, timeout)
    }

    pub fn with_endpoints(
        endpoints: Vec<String>,
        deployment_id: &str,
        timeout: Duration,
    ) -> Result<Self, ExplorerError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| ExplorerError::Transport {
                url: endpoints.first().cloned().unwrap_or_default(),
                source,
            })?;

        Ok(Self {
            http,
            endpoints: endpoints
                .into_iter()
                .map(|e| e.trim_end_matches('/').to_string())
                .collect(),
            deployment_id: deployment_id.to_string(),
            current: AtomicUsize::new(0),
        })
    }

    #[cfg(test)]
    pub fn endpoints(&self) -> &[String] {
        &self.endpoints
    }

    /// POST `{rawTx}` starting at the current endpoint, moving on after each
    /// failure. Gives up after every endpoint failed once.
    pub async fn broadcast(&self, raw_hex: &str) -> Result<String, ExplorerError> {
        let n = self.endpoints.len();
        for _ in 0..n {
            let idx = self.current.load(Ordering::Relaxed) % n;
            let url = format!("{}/v1/tx", self.endpoints[idx]);

            match self.post_tx(&url, raw_hex).await {
                Ok(status) => {
                    info!("ARC - broadcast accepted by {url}: {}", status.txid);
                    return Ok(status.txid);
                }
                Err(e) => {
                    warn!("ARC - endpoint {url} failed: {e}");
                    self.current.store((idx + 1) % n, Ordering::Relaxed);
                }
            }
        }
        Err(ExplorerError::AllEndpointsFailed)
    }

    /// First endpoint that knows `txid`, in configured order.
    pub async fn transaction(&self, txid: &str) -> Option<ArcTxStatus> {
        for endpoint in &self.endpoints {
            let url = format!("{endpoint}/v1/tx/{txid}");
            match self.get_tx(&url).await {
                Ok(status) => {
                    debug!("ARC - {txid} found at {endpoint}");
                    return Some(status);
                }
                Err(e) => warn!("ARC - lookup at {url} failed: {e}"),
            }
        }
        None
    }

    async fn post_tx(&self, url: &str, raw_hex: &str) -> Result<ArcTxStatus, ExplorerError> {
        let resp = self
            .http
            .post(url)
            .header(DEPLOYMENT_HEADER, &self.deployment_id)
            .json(&BroadcastBody { raw_tx: raw_hex })
            .send()
            .await
            .map_err(|source| ExplorerError::Transport {
                url: url.to_string(),
                source,
            })?;
        decode(url, resp).await
    }

    async fn get_tx(&self, url: &str) -> Result<ArcTxStatus, ExplorerError> {
        let resp = self
            .http
            .get(url)
            .header(DEPLOYMENT_HEADER, &self.deployment_id)
            .send()
            .await
            .map_err(|source| ExplorerError::Transport {
                url: url.to_string(),
                source,
            })?;
        decode(url, resp).await
    }
}

async fn decode(url: &str, resp: reqwest::Response) -> Result<ArcTxStatus, ExplorerError> {
    let status = resp.status();
    if !status.is_success() {
        return Err(ExplorerError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }
    let body = resp.bytes().await.map_err(|source| ExplorerError::Transport {
        url: url.to_string(),
        source,
    })?;
    serde_json::from_slice(&body).map_err(|source| ExplorerError::Decode {
        url: url.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dead_client() -> ArcClient {
        ArcClient::with_endpoints(
            vec!["http://127.0.0.1:9/arc-a/".into(), "http://127.0.0.1:9/arc-b".into()],
            "00000000",
            Duration::from_secs(2),
        )
        .unwrap()
    }

    #[test]
    fn network_endpoints() {
        assert_eq!(ArcNetwork::Mainnet.endpoints().len(), 2);
        assert_eq!(ArcNetwork::Testnet.endpoints(), &["https://arc-test.taal.com"]);
        assert_eq!("MAINNET".parse::<ArcNetwork>(), Ok(ArcNetwork::Mainnet));
        assert!("regtest".parse::<ArcNetwork>().is_err());
    }

    #[test]
    fn trailing_slashes_trimmed() {
        assert_eq!(dead_client().endpoints()[0], "http://127.0.0.1:9/arc-a");
    }

    #[test]
    fn status_payload_decodes() {
        let s: ArcTxStatus = serde_json::from_str(
            r#"{"txid":"ab","txStatus":"MINED","blockHeight":873250,"blockHash":"00ff"}"#,
        )
        .unwrap();
        assert_eq!(s.tx_status.as_deref(), Some("MINED"));
        assert_eq!(s.block_height, Some(873_250));
        assert_eq!(s.extra_info, None);
    }

    #[actix_web::test]
    async fn broadcast_gives_up_after_one_pass() {
        let c = dead_client();
        assert!(matches!(c.broadcast("0100").await, Err(ExplorerError::AllEndpointsFailed)));
        // two failures rotate back to the first endpoint
        assert_eq!(c.current.load(Ordering::Relaxed), 0);
    }

    #[actix_web::test]
    async fn lookup_on_dead_endpoints_is_none() {
        assert!(dead_client().transaction("ab").await.is_none());
    }
}
