//! Script and wire encoding helpers for raw BSV transactions.

const OP_FALSE: u8 = 0x00;
const OP_RETURN: u8 = 0x6a;
const OP_DUP: u8 = 0x76;
const OP_HASH160: u8 = 0xa9;
const OP_EQUALVERIFY: u8 = 0x88;
const OP_CHECKSIG: u8 = 0xac;
const OP_PUSHDATA1: u8 = 0x4c;
const OP_PUSHDATA2: u8 = 0x4d;

/// Largest payload a single push in these scripts may carry.
pub const MAX_PUSH_LEN: usize = u16::MAX as usize;

/// Appends a Bitcoin-style compact size integer.
pub fn write_varint(buf: &mut Vec<u8>, n: u64) {
    match n {
        0..=0xfc => buf.push(n as u8),
        0xfd..=0xffff => {
            buf.push(0xfd);
            buf.extend_from_slice(&(n as u16).to_le_bytes());
        }
        0x1_0000..=0xffff_ffff => {
            buf.push(0xfe);
            buf.extend_from_slice(&(n as u32).to_le_bytes());
        }
        _ => {
            buf.push(0xff);
            buf.extend_from_slice(&n.to_le_bytes());
        }
    }
}

/// Appends the smallest push opcode for `data`, then the data.
/// Callers keep `data` within `MAX_PUSH_LEN`.
pub fn push_data(script: &mut Vec<u8>, data: &[u8]) {
    match data.len() {
        0..=75 => script.push(data.len() as u8),
        76..=255 => {
            script.push(OP_PUSHDATA1);
            script.push(data.len() as u8);
        }
        len => {
            script.push(OP_PUSHDATA2);
            script.extend_from_slice(&(len as u16).to_le_bytes());
        }
    }
    script.extend_from_slice(data);
}

/// `OP_DUP OP_HASH160 <pkh> OP_EQUALVERIFY OP_CHECKSIG`
pub fn p2pkh_lock(pubkey_hash: &[u8; 20]) -> Vec<u8> {
    let mut script = vec![OP_DUP, OP_HASH160];
    push_data(&mut script, pubkey_hash);
    script.extend_from_slice(&[OP_EQUALVERIFY, OP_CHECKSIG]);
    script
}

/// `OP_FALSE OP_RETURN <push>` carrying `data`.
pub fn op_return(data: &[u8]) -> Vec<u8> {
    let mut script = vec![OP_FALSE, OP_RETURN];
    push_data(&mut script, data);
    script
}

/// `<sig || sighash type> <pubkey>`
pub fn p2pkh_unlock(der_sig: &[u8], sighash_type: u8, pubkey: &[u8]) -> Vec<u8> {
    let mut sig = der_sig.to_vec();
    sig.push(sighash_type);
    let mut script = Vec::with_capacity(sig.len() + pubkey.len() + 2);
    push_data(&mut script, &sig);
    push_data(&mut script, pubkey);
    script
}
