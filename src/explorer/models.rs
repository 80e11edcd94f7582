use serde::{Deserialize, Serialize};

use crate::economics::SATOSHIS_PER_COIN;

/* ---------- Explorer wire types ---------- */

#[derive(Debug, Clone, Deserialize)]
pub struct ChainTip {
    pub height: u64,
    pub hash: String,
    pub branchlen: u64,
    pub status: String,
}

impl ChainTip {
    pub fn is_main_tip(&self) -> bool {
        self.status == "active" && self.branchlen == 0
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawBlock {
    pub hash: String,
    pub height: u64,
    #[serde(default)]
    pub time: i64,
    #[serde(default)]
    pub tx: Vec<String>,
    #[serde(default)]
    pub txcount: Option<u64>,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub difficulty: f64,
    #[serde(default)]
    pub merkleroot: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScriptSig {
    #[serde(default)]
    pub hex: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawInput {
    #[serde(default)]
    pub txid: String,
    #[serde(default)]
    pub vout: u32,
    #[serde(default, rename = "scriptSig")]
    pub script_sig: Option<ScriptSig>,
    #[serde(default)]
    pub sequence: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScriptPubKey {
    #[serde(default)]
    pub hex: String,
    #[serde(default)]
    pub addresses: Vec<String>,
    #[serde(default, rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawOutput {
    /// Amount in coins.
    #[serde(default)]
    pub value: f64,
    #[serde(rename = "scriptPubKey")]
    pub script_pub_key: ScriptPubKey,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawTransaction {
    pub txid: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub time: i64,
    #[serde(default)]
    pub vin: Vec<RawInput>,
    #[serde(default)]
    pub vout: Vec<RawOutput>,
}

/* ---------- Records served to the presentation ---------- */

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockInfo {
    pub hash: String,
    pub height: u64,
    pub time: i64,
    pub tx_count: u64,
    pub size: u64,
    pub difficulty: f64,
    pub merkle_root: Option<String>,
}

impl From<RawBlock> for BlockInfo {
    fn from(b: RawBlock) -> Self {
        let tx_count = b.txcount.unwrap_or(b.tx.len() as u64);
        Self {
            hash: b.hash,
            height: b.height,
            time: b.time,
            tx_count,
            size: b.size,
            difficulty: b.difficulty,
            merkle_root: b.merkleroot,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkStats {
    pub chain: String,
    pub blocks: u64,
    pub headers: u64,
    #[serde(rename = "bestblockhash")]
    pub best_block_hash: String,
    pub difficulty: f64,
    #[serde(rename = "mediantime")]
    pub median_time: i64,
    #[serde(rename = "verificationprogress")]
    pub verification_progress: f64,
    pub chainwork: String,
    #[serde(default)]
    pub size_on_disk: u64,
    #[serde(default)]
    pub pruned: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TxInputView {
    pub txid: String,
    pub vout: u32,
    pub sequence: u64,
    pub unlocking_script: String,
    pub address: Option<String>,
    pub satoshis: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TxOutputView {
    pub satoshis: u64,
    pub locking_script: String,
    pub address: Option<String>,
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExplorerTransaction {
    pub txid: String,
    pub size: u64,
    /// Unknown for live transactions (the explorer omits input values).
    pub fee_satoshis: Option<u64>,
    pub time: i64,
    pub inputs: Vec<TxInputView>,
    pub outputs: Vec<TxOutputView>,
}

/// A transaction id is exactly 64 hex characters.
pub fn is_txid(s: &str) -> bool {
    s.len() == 64 && s.bytes().all(|b| b.is_ascii_hexdigit())
}

impl ExplorerTransaction {
    /// sat/byte, when both fee and size are known.
    pub fn fee_rate(&self) -> Option<f64> {
        match (self.fee_satoshis, self.size) {
            (Some(fee), size) if size > 0 => Some(fee as f64 / size as f64),
            _ => None,
        }
    }
}

impl From<RawTransaction> for ExplorerTransaction {
    fn from(raw: RawTransaction) -> Self {
        let inputs = raw
            .vin
            .into_iter()
            .map(|i| TxInputView {
                txid: i.txid,
                vout: i.vout,
                sequence: i.sequence,
                unlocking_script: i.script_sig.map(|s| s.hex).unwrap_or_default(),
                address: None,
                satoshis: None,
            })
            .collect();
        let outputs = raw
            .vout
            .into_iter()
            .map(|o| TxOutputView {
                satoshis: (o.value * SATOSHIS_PER_COIN).round() as u64,
                locking_script: o.script_pub_key.hex,
                address: o.script_pub_key.addresses.into_iter().next(),
                kind: o.script_pub_key.kind,
            })
            .collect();
        Self {
            txid: raw.txid,
            size: raw.size,
            fee_satoshis: None,
            time: raw.time,
            inputs,
            outputs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn block_tx_count_prefers_reported_count() {
        let raw: RawBlock = serde_json::from_value(json!({
            "hash": "00ab", "height": 10, "time": 1, "tx": ["a", "b"], "txcount": 9
        }))
        .unwrap();
        assert_eq!(BlockInfo::from(raw).tx_count, 9);

        let raw: RawBlock =
            serde_json::from_value(json!({"hash": "00ab", "height": 10, "tx": ["a", "b"]})).unwrap();
        assert_eq!(BlockInfo::from(raw).tx_count, 2);
    }

    #[test]
    fn raw_transaction_maps_to_view() {
        let raw: RawTransaction = serde_json::from_value(json!({
            "txid": "ff", "size": 226, "time": 1700000000,
            "vin": [{"txid": "ee", "vout": 1, "scriptSig": {"hex": "4730"}, "sequence": 4294967295u64}],
            "vout": [{"value": 0.0001, "n": 0, "scriptPubKey": {
                "hex": "76a9", "addresses": ["1abc"], "type": "pubkeyhash"}}]
        }))
        .unwrap();
        let tx = ExplorerTransaction::from(raw);
        assert_eq!(tx.outputs[0].satoshis, 10_000);
        assert_eq!(tx.outputs[0].address.as_deref(), Some("1abc"));
        assert_eq!(tx.inputs[0].unlocking_script, "4730");
        assert_eq!(tx.fee_rate(), None);
    }

    #[test]
    fn txid_shape() {
        assert!(is_txid(&"ab".repeat(32)));
        assert!(is_txid(&"AB".repeat(32)));
        assert!(!is_txid("abcd"));
        assert!(!is_txid(&"zz".repeat(32)));
        assert!(!is_txid(&format!("..{}", "a".repeat(62))));
    }

    #[test]
    fn main_tip_detection() {
        let tip = ChainTip {
            height: 1,
            hash: "h".into(),
            branchlen: 0,
            status: "active".into(),
        };
        assert!(tip.is_main_tip());
        let fork = ChainTip {
            branchlen: 2,
            status: "valid-fork".into(),
            ..tip
        };
        assert!(!fork.is_main_tip());
    }
}
