use rand::Rng;
use secp256k1::{Message, PublicKey, Secp256k1, SecretKey, Signing};
use serde::Serialize;

use super::script::{MAX_PUSH_LEN, op_return, p2pkh_lock, p2pkh_unlock, write_varint};
use crate::economics::BSV_STANDARD_FEE_RATE;
use crate::error::TxError;
use crate::spv::proof::sha256d;

pub const TX_VERSION: u32 = 2;
pub const LOCK_TIME: u32 = 0;
const SEQUENCE_FINAL: u32 = 0xFFFF_FFFF;
/// SIGHASH_ALL | SIGHASH_FORKID
const SIGHASH_ALL_FORKID: u8 = 0x41;

pub const DEMO_RECIPIENT_PKH: &str = "1234567890123456789012345678901234567890";
pub const DEMO_AMOUNT_SATOSHIS: u64 = 1_000;
pub const DEMO_MESSAGE: &str = "AI requires Blockchain requires IPv6";

#[derive(Debug, Clone)]
struct TxIn {
    prev_txid: [u8; 32],
    vout: u32,
    unlocking_script: Vec<u8>,
    sequence: u32,
}

#[derive(Debug, Clone)]
struct TxOut {
    satoshis: u64,
    locking_script: Vec<u8>,
}

#[derive(Debug, Clone)]
struct RawTx {
    version: u32,
    inputs: Vec<TxIn>,
    outputs: Vec<TxOut>,
    lock_time: u32,
}

impl RawTx {
    fn serialize(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.extend_from_slice(&self.version.to_le_bytes());

        write_varint(&mut buf, self.inputs.len() as u64);
        for input in &self.inputs {
            buf.extend_from_slice(&input.prev_txid);
            buf.extend_from_slice(&input.vout.to_le_bytes());
            write_varint(&mut buf, input.unlocking_script.len() as u64);
            buf.extend_from_slice(&input.unlocking_script);
            buf.extend_from_slice(&input.sequence.to_le_bytes());
        }

        write_varint(&mut buf, self.outputs.len() as u64);
        for output in &self.outputs {
            buf.extend_from_slice(&output.satoshis.to_le_bytes());
            write_varint(&mut buf, output.locking_script.len() as u64);
            buf.extend_from_slice(&output.locking_script);
        }

        buf.extend_from_slice(&self.lock_time.to_le_bytes());
        buf
    }

    /// Digest signed by every input: the transaction with all unlocking
    /// scripts emptied, followed by the sighash type.
    fn sighash(&self, sighash_type: u8) -> [u8; 32] {
        let mut stripped = self.clone();
        for input in &mut stripped.inputs {
            input.unlocking_script.clear();
        }
        let mut preimage = stripped.serialize();
        preimage.extend_from_slice(&u32::from(sighash_type).to_le_bytes());
        sha256d(&preimage)
    }

    /// Displayed txid: byte-reversed double SHA-256 of the serialization.
    fn txid(&self) -> String {
        let mut hash = sha256d(&self.serialize());
        hash.reverse();
        hex::encode(hash)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuiltOutput {
    pub satoshis: u64,
    pub locking_script: String,
}

/// A signed transaction ready for `POST /arc/tx/`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MicropaymentTransaction {
    pub txid: String,
    pub raw_tx: String,
    pub size_bytes: usize,
    pub fee_satoshis: u64,
    pub version: u32,
    pub lock_time: u32,
    pub signer_pubkey: String,
    pub outputs: Vec<BuiltOutput>,
}

/// Fee at the standard BSV relay rate, rounded up to whole satoshis.
pub fn calculate_transaction_fee(size_bytes: usize) -> u64 {
    (size_bytes as f64 * BSV_STANDARD_FEE_RATE).ceil() as u64
}

/// Builds a P2PKH payment to `recipient_pkh` with an optional OP_RETURN
/// message, spending a placeholder outpoint signed by a throwaway key.
pub fn create_micropayment_transaction<R: Rng + ?Sized>(
    rng: &mut R,
    recipient_pkh: &str,
    amount_satoshis: u64,
    message: Option<&str>,
) -> Result<MicropaymentTransaction, TxError> {
    let (tx, pubkey) = build_signed(rng, recipient_pkh, amount_satoshis, message)?;
    let raw = tx.serialize();

    Ok(MicropaymentTransaction {
        txid: tx.txid(),
        raw_tx: hex::encode(&raw),
        size_bytes: raw.len(),
        fee_satoshis: calculate_transaction_fee(raw.len()),
        version: tx.version,
        lock_time: tx.lock_time,
        signer_pubkey: hex::encode(pubkey.serialize()),
        outputs: tx
            .outputs
            .iter()
            .map(|o| BuiltOutput {
                satoshis: o.satoshis,
                locking_script: hex::encode(&o.locking_script),
            })
            .collect(),
    })
}

/// The presentation's sample payment.
pub fn demo_transaction<R: Rng + ?Sized>(rng: &mut R) -> Result<MicropaymentTransaction, TxError> {
    create_micropayment_transaction(rng, DEMO_RECIPIENT_PKH, DEMO_AMOUNT_SATOSHIS, Some(DEMO_MESSAGE))
}

fn build_signed<R: Rng + ?Sized>(
    rng: &mut R,
    recipient_pkh: &str,
    amount_satoshis: u64,
    message: Option<&str>,
) -> Result<(RawTx, PublicKey), TxError> {
    let pkh: [u8; 20] = hex::decode(recipient_pkh)
        .ok()
        .and_then(|b| b.try_into().ok())
        .ok_or(TxError::InvalidRecipient)?;
    if amount_satoshis == 0 {
        return Err(TxError::ZeroAmount);
    }

    let mut outputs = vec![TxOut {
        satoshis: amount_satoshis,
        locking_script: p2pkh_lock(&pkh),
    }];
    if let Some(msg) = message.filter(|m| !m.is_empty()) {
        if msg.len() > MAX_PUSH_LEN {
            return Err(TxError::MessageTooLong { len: msg.len() });
        }
        outputs.push(TxOut {
            satoshis: 0,
            locking_script: op_return(msg.as_bytes()),
        });
    }

    let mut tx = RawTx {
        version: TX_VERSION,
        inputs: vec![TxIn {
            prev_txid: [0; 32],
            vout: 0,
            unlocking_script: Vec::new(),
            sequence: SEQUENCE_FINAL,
        }],
        outputs,
        lock_time: LOCK_TIME,
    };

    let secp = Secp256k1::new();
    let (sk, pk) = secp.generate_keypair(rng);
    sign_inputs(&secp, &mut tx, &sk, &pk)?;
    Ok((tx, pk))
}

fn sign_inputs<C: Signing>(
    secp: &Secp256k1<C>,
    tx: &mut RawTx,
    sk: &SecretKey,
    pk: &PublicKey,
) -> Result<(), TxError> {
    let msg = Message::from_digest_slice(&tx.sighash(SIGHASH_ALL_FORKID))?;
    let sig = secp.sign_ecdsa(&msg, sk);
    let unlocking = p2pkh_unlock(&sig.serialize_der(), SIGHASH_ALL_FORKID, &pk.serialize());
    for input in &mut tx.inputs {
        input.unlocking_script = unlocking.clone();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use secp256k1::ecdsa::Signature;

    #[test]
    fn fee_rounds_up_at_half_sat_per_byte() {
        assert_eq!(calculate_transaction_fee(0), 0);
        assert_eq!(calculate_transaction_fee(1), 1);
        assert_eq!(calculate_transaction_fee(250), 125);
        assert_eq!(calculate_transaction_fee(251), 126);
    }

    #[test]
    fn payment_with_message_has_expected_layout() {
        let mut rng = StdRng::seed_from_u64(1);
        let tx = create_micropayment_transaction(&mut rng, &"ab".repeat(20), 546, Some("hello")).unwrap();

        assert!(tx.raw_tx.starts_with(&format!("0200000001{}00000000", "00".repeat(32))));
        assert!(tx.raw_tx.ends_with("00000000"));
        assert_eq!(tx.size_bytes * 2, tx.raw_tx.len());
        assert_eq!(tx.fee_satoshis, calculate_transaction_fee(tx.size_bytes));
        assert_eq!(tx.txid.len(), 64);

        assert_eq!(tx.outputs.len(), 2);
        assert_eq!(tx.outputs[0].satoshis, 546);
        assert_eq!(tx.outputs[0].locking_script, format!("76a914{}88ac", "ab".repeat(20)));
        assert_eq!(tx.outputs[1].satoshis, 0);
        assert_eq!(tx.outputs[1].locking_script, format!("006a05{}", hex::encode("hello")));
        assert_eq!(tx.signer_pubkey.len(), 66);
    }

    #[test]
    fn txid_is_reversed_double_sha256() {
        let mut rng = StdRng::seed_from_u64(2);
        let tx = create_micropayment_transaction(&mut rng, &"cd".repeat(20), 1_000, None).unwrap();
        let mut hash = sha256d(&hex::decode(&tx.raw_tx).unwrap());
        hash.reverse();
        assert_eq!(tx.txid, hex::encode(hash));
        assert_eq!(tx.outputs.len(), 1);
    }

    #[test]
    fn input_signature_verifies_against_sighash() {
        let mut rng = StdRng::seed_from_u64(3);
        let (tx, pk) = build_signed(&mut rng, &"ef".repeat(20), 10, Some("m")).unwrap();

        let script = &tx.inputs[0].unlocking_script;
        let sig_len = script[0] as usize;
        let (der, sighash_type) = (&script[1..sig_len], script[sig_len]);
        assert_eq!(sighash_type, SIGHASH_ALL_FORKID);
        assert_eq!(&script[sig_len + 2..], &pk.serialize()[..]);

        let secp = Secp256k1::verification_only();
        let msg = Message::from_digest_slice(&tx.sighash(SIGHASH_ALL_FORKID)).unwrap();
        let sig = Signature::from_der(der).unwrap();
        assert!(secp.verify_ecdsa(&msg, &sig, &pk).is_ok());
    }

    #[test]
    fn same_seed_gives_same_transaction() {
        let a = demo_transaction(&mut StdRng::seed_from_u64(9)).unwrap();
        let b = demo_transaction(&mut StdRng::seed_from_u64(9)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.outputs[0].satoshis, DEMO_AMOUNT_SATOSHIS);
    }

    #[test]
    fn bad_parameters_are_rejected() {
        let mut rng = StdRng::seed_from_u64(4);
        let pkh = "ab".repeat(20);
        assert_eq!(
            create_micropayment_transaction(&mut rng, "abcd", 1, None),
            Err(TxError::InvalidRecipient)
        );
        assert_eq!(
            create_micropayment_transaction(&mut rng, &"zz".repeat(20), 1, None),
            Err(TxError::InvalidRecipient)
        );
        assert_eq!(
            create_micropayment_transaction(&mut rng, &pkh, 0, None),
            Err(TxError::ZeroAmount)
        );
        let long = "x".repeat(MAX_PUSH_LEN + 1);
        assert_eq!(
            create_micropayment_transaction(&mut rng, &pkh, 1, Some(&long)),
            Err(TxError::MessageTooLong { len: MAX_PUSH_LEN + 1 })
        );
    }
}
