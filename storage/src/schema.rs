/// Key layout of the chain database.
///
/// Per-entity keys are `prefix ‖ chain tag ‖ suffix`, where the chain tag is
/// `0x00` for the root chain and `0x01 ‖ shard id (u32 BE)` for a shard, and
/// the suffix is either a block hash or a block number as a big-endian `u64`.
/// Fixed-width big-endian numbers keep canonical keys of one chain in numeric
/// order under byte comparison.
use containers::{Bytes32, ChainType};

/// Hash of the current head header.
pub const HEAD_HEADER_KEY: &[u8] = b"LastHeader";
/// Hash of the current fully validated head block.
pub const HEAD_BLOCK_KEY: &[u8] = b"LastBlock";
/// Hash of the current fast-sync head block.
pub const HEAD_FAST_BLOCK_KEY: &[u8] = b"LastFast";
/// Number of state entries imported by fast sync so far.
pub const FAST_TRIE_PROGRESS_KEY: &[u8] = b"TrieSync";

const HEADER_PREFIX: u8 = b'h';
const HEADER_NUMBER_PREFIX: u8 = b'H';
const CANONICAL_HASH_PREFIX: u8 = b'n';
const BLOCK_PREFIX: u8 = b'b';
const RECEIPTS_PREFIX: u8 = b'r';
const TD_PREFIX: u8 = b't';

const ROOT_TAG: u8 = 0x00;
const SHARD_TAG: u8 = 0x01;

fn namespace(prefix: u8, chain: ChainType, suffix_len: usize) -> Vec<u8> {
    let mut key = Vec::with_capacity(1 + 5 + suffix_len);
    key.push(prefix);
    match chain {
        ChainType::Root => key.push(ROOT_TAG),
        ChainType::Shard(id) => {
            key.push(SHARD_TAG);
            key.extend_from_slice(&id.to_be_bytes());
        }
    }
    key
}

fn hash_key(prefix: u8, chain: ChainType, hash: &Bytes32) -> Vec<u8> {
    let mut key = namespace(prefix, chain, 32);
    key.extend_from_slice(hash.as_bytes());
    key
}

/// Encodes a block number as a fixed-width big-endian `u64`.
pub fn encode_block_number(number: u64) -> [u8; 8] {
    number.to_be_bytes()
}

/// `h ‖ chain ‖ hash` → encoded header.
pub fn header_key(chain: ChainType, hash: &Bytes32) -> Vec<u8> {
    hash_key(HEADER_PREFIX, chain, hash)
}

/// `H ‖ chain ‖ hash` → block number.
pub fn header_number_key(chain: ChainType, hash: &Bytes32) -> Vec<u8> {
    hash_key(HEADER_NUMBER_PREFIX, chain, hash)
}

/// `n ‖ chain ‖ number` → canonical block hash.
pub fn canonical_hash_key(chain: ChainType, number: u64) -> Vec<u8> {
    let mut key = canonical_hash_prefix(chain);
    key.extend_from_slice(&encode_block_number(number));
    key
}

/// Common prefix of every canonical mapping key of `chain`.
pub fn canonical_hash_prefix(chain: ChainType) -> Vec<u8> {
    namespace(CANONICAL_HASH_PREFIX, chain, 8)
}

/// `b ‖ chain ‖ hash` → encoded block.
pub fn block_key(chain: ChainType, hash: &Bytes32) -> Vec<u8> {
    hash_key(BLOCK_PREFIX, chain, hash)
}

/// `r ‖ chain ‖ hash` → encoded receipt list.
pub fn block_receipts_key(chain: ChainType, hash: &Bytes32) -> Vec<u8> {
    hash_key(RECEIPTS_PREFIX, chain, hash)
}

/// `t ‖ chain ‖ hash` → total difficulty.
pub fn header_td_key(chain: ChainType, hash: &Bytes32) -> Vec<u8> {
    hash_key(TD_PREFIX, chain, hash)
}
