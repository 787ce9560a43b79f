/// Typed accessors over the chain database.
///
/// Every entity has a `try_*` form returning [`StoreError`] and a plain form
/// applying the default policy: reads degrade to an absent value (corrupt
/// entries and engine read failures are logged), writes and deletes abort the
/// process on failure because the reverse indexes can no longer be trusted.
///
/// Accessors never cache and never batch. Multi-key writes are sequenced so a
/// crash leaves at worst orphaned data, never a header without its number
/// index.
use containers::ssz::{SszReadDefault, SszWrite};
use containers::{
    Bytes32, ChainType, Header, MinorBlock, MinorBlockHeader, Receipt, Receipts, RootBlock,
    RootBlockHeader,
};
use num_bigint::BigUint;
use tracing::{error, warn};

use crate::database::{DatabaseDeleter, DatabaseReader, DatabaseWriter};
use crate::error::StoreError;
use crate::schema::{
    block_key, block_receipts_key, canonical_hash_key, encode_block_number, header_key,
    header_number_key, header_td_key, FAST_TRIE_PROGRESS_KEY, HEAD_BLOCK_KEY,
    HEAD_FAST_BLOCK_KEY, HEAD_HEADER_KEY,
};

// Default policies

/// Applies the read policy: any failure becomes an absent value.
fn or_absent<T>(result: Result<T, StoreError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(StoreError::NotFound { .. }) => None,
        Err(err @ StoreError::Corrupt { .. }) => {
            error!(error = %err, "Discarding corrupt database entry");
            None
        }
        Err(err) => {
            warn!(error = %err, "Database read failed, treating entry as absent");
            None
        }
    }
}

/// Applies the write policy: a failed write is unrecoverable.
fn or_abort(result: Result<(), StoreError>) {
    if let Err(err) = result {
        error!(error = %err, "Unrecoverable database write failure, aborting");
        std::process::abort();
    }
}

// Raw access

fn get_raw<D: DatabaseReader + ?Sized>(
    db: &D,
    key: &[u8],
    entity: &'static str,
) -> Result<Vec<u8>, StoreError> {
    match db.get(key) {
        Ok(Some(data)) if !data.is_empty() => Ok(data),
        Ok(_) => Err(StoreError::NotFound { entity }),
        Err(source) => Err(StoreError::Read { entity, source }),
    }
}

fn put_raw<D: DatabaseWriter + ?Sized>(
    db: &D,
    key: &[u8],
    value: &[u8],
    entity: &'static str,
) -> Result<(), StoreError> {
    db.put(key, value)
        .map_err(|source| StoreError::Write { entity, source })
}

fn delete_raw<D: DatabaseDeleter + ?Sized>(
    db: &D,
    key: &[u8],
    entity: &'static str,
) -> Result<(), StoreError> {
    db.delete(key)
        .map_err(|source| StoreError::Write { entity, source })
}

fn has_raw<D: DatabaseReader + ?Sized>(db: &D, key: &[u8]) -> bool {
    matches!(db.has(key), Ok(true))
}

// Value codecs

fn decode_ssz<T: SszReadDefault>(
    data: &[u8],
    key: &[u8],
    entity: &'static str,
) -> Result<T, StoreError> {
    T::from_ssz_default(data).map_err(|e| StoreError::corrupt(entity, key, format!("{e:?}")))
}

fn encode_ssz<T: SszWrite>(value: &T, entity: &'static str) -> Result<Vec<u8>, StoreError> {
    value.to_ssz().map_err(|e| StoreError::Encode {
        entity,
        reason: format!("{e:?}"),
    })
}

fn decode_hash(data: &[u8], key: &[u8], entity: &'static str) -> Result<Bytes32, StoreError> {
    Bytes32::from_slice(data).ok_or_else(|| {
        StoreError::corrupt(entity, key, format!("expected 32 bytes, got {}", data.len()))
    })
}

fn decode_number(data: &[u8], key: &[u8], entity: &'static str) -> Result<u64, StoreError> {
    let bytes: [u8; 8] = data.try_into().map_err(|_| {
        StoreError::corrupt(entity, key, format!("expected 8 bytes, got {}", data.len()))
    })?;
    Ok(u64::from_be_bytes(bytes))
}

/// Total difficulty is stored as a one-byte length followed by the big-endian
/// magnitude.
fn encode_td(td: &BigUint) -> Result<Vec<u8>, StoreError> {
    let magnitude = td.to_bytes_be();
    let len = u8::try_from(magnitude.len()).map_err(|_| StoreError::Encode {
        entity: "total difficulty",
        reason: format!("{} byte magnitude exceeds 255 bytes", magnitude.len()),
    })?;
    let mut data = Vec::with_capacity(1 + magnitude.len());
    data.push(len);
    data.extend_from_slice(&magnitude);
    Ok(data)
}

fn decode_td(data: &[u8], key: &[u8]) -> Result<BigUint, StoreError> {
    let (len, magnitude) = data
        .split_first()
        .ok_or_else(|| StoreError::corrupt("total difficulty", key, "empty value"))?;
    if magnitude.len() != usize::from(*len) {
        return Err(StoreError::corrupt(
            "total difficulty",
            key,
            format!("length prefix {len} but {} bytes follow", magnitude.len()),
        ));
    }
    Ok(BigUint::from_bytes_be(magnitude))
}

/// The fast-sync counter is stored as its minimal big-endian representation.
fn encode_counter(count: u64) -> Vec<u8> {
    let bytes = count.to_be_bytes();
    let first = bytes.iter().position(|b| *b != 0).unwrap_or(bytes.len());
    bytes[first..].to_vec()
}

fn decode_counter(data: &[u8], key: &[u8]) -> Result<u64, StoreError> {
    if data.len() > 8 {
        return Err(StoreError::corrupt(
            "fast trie progress",
            key,
            format!("{} bytes overflow a u64", data.len()),
        ));
    }
    let mut bytes = [0u8; 8];
    bytes[8 - data.len()..].copy_from_slice(data);
    Ok(u64::from_be_bytes(bytes))
}

// Canonical mapping

pub fn try_read_canonical_hash<D: DatabaseReader + ?Sized>(
    db: &D,
    chain: ChainType,
    number: u64,
) -> Result<Bytes32, StoreError> {
    let key = canonical_hash_key(chain, number);
    let data = get_raw(db, &key, "canonical hash")?;
    decode_hash(&data, &key, "canonical hash")
}

/// Hash of the canonical block at `number`, or the zero hash if unassigned.
pub fn read_canonical_hash<D: DatabaseReader + ?Sized>(
    db: &D,
    chain: ChainType,
    number: u64,
) -> Bytes32 {
    or_absent(try_read_canonical_hash(db, chain, number)).unwrap_or_else(Bytes32::zero)
}

pub fn try_write_canonical_hash<D: DatabaseWriter + ?Sized>(
    db: &D,
    chain: ChainType,
    hash: &Bytes32,
    number: u64,
) -> Result<(), StoreError> {
    put_raw(
        db,
        &canonical_hash_key(chain, number),
        hash.as_bytes(),
        "canonical hash",
    )
}

pub fn write_canonical_hash<D: DatabaseWriter + ?Sized>(
    db: &D,
    chain: ChainType,
    hash: &Bytes32,
    number: u64,
) {
    or_abort(try_write_canonical_hash(db, chain, hash, number))
}

pub fn try_delete_canonical_hash<D: DatabaseDeleter + ?Sized>(
    db: &D,
    chain: ChainType,
    number: u64,
) -> Result<(), StoreError> {
    delete_raw(db, &canonical_hash_key(chain, number), "canonical hash")
}

pub fn delete_canonical_hash<D: DatabaseDeleter + ?Sized>(db: &D, chain: ChainType, number: u64) {
    or_abort(try_delete_canonical_hash(db, chain, number))
}

// Hash -> number index

pub fn try_read_header_number<D: DatabaseReader + ?Sized>(
    db: &D,
    chain: ChainType,
    hash: &Bytes32,
) -> Result<u64, StoreError> {
    let key = header_number_key(chain, hash);
    let data = get_raw(db, &key, "header number")?;
    decode_number(&data, &key, "header number")
}

/// Number of the stored header with the given hash.
pub fn read_header_number<D: DatabaseReader + ?Sized>(
    db: &D,
    chain: ChainType,
    hash: &Bytes32,
) -> Option<u64> {
    or_absent(try_read_header_number(db, chain, hash))
}

// Head pointers

fn try_read_head<D: DatabaseReader + ?Sized>(
    db: &D,
    key: &[u8],
    entity: &'static str,
) -> Result<Bytes32, StoreError> {
    let data = get_raw(db, key, entity)?;
    decode_hash(&data, key, entity)
}

pub fn try_read_head_header_hash<D: DatabaseReader + ?Sized>(db: &D) -> Result<Bytes32, StoreError> {
    try_read_head(db, HEAD_HEADER_KEY, "head header hash")
}

/// Hash of the current head header, or the zero hash if none is recorded.
pub fn read_head_header_hash<D: DatabaseReader + ?Sized>(db: &D) -> Bytes32 {
    or_absent(try_read_head_header_hash(db)).unwrap_or_else(Bytes32::zero)
}

pub fn try_write_head_header_hash<D: DatabaseWriter + ?Sized>(
    db: &D,
    hash: &Bytes32,
) -> Result<(), StoreError> {
    put_raw(db, HEAD_HEADER_KEY, hash.as_bytes(), "head header hash")
}

pub fn write_head_header_hash<D: DatabaseWriter + ?Sized>(db: &D, hash: &Bytes32) {
    or_abort(try_write_head_header_hash(db, hash))
}

pub fn try_read_head_block_hash<D: DatabaseReader + ?Sized>(db: &D) -> Result<Bytes32, StoreError> {
    try_read_head(db, HEAD_BLOCK_KEY, "head block hash")
}

/// Hash of the current fully validated head block, or the zero hash.
pub fn read_head_block_hash<D: DatabaseReader + ?Sized>(db: &D) -> Bytes32 {
    or_absent(try_read_head_block_hash(db)).unwrap_or_else(Bytes32::zero)
}

pub fn try_write_head_block_hash<D: DatabaseWriter + ?Sized>(
    db: &D,
    hash: &Bytes32,
) -> Result<(), StoreError> {
    put_raw(db, HEAD_BLOCK_KEY, hash.as_bytes(), "head block hash")
}

pub fn write_head_block_hash<D: DatabaseWriter + ?Sized>(db: &D, hash: &Bytes32) {
    or_abort(try_write_head_block_hash(db, hash))
}

pub fn try_read_head_fast_block_hash<D: DatabaseReader + ?Sized>(
    db: &D,
) -> Result<Bytes32, StoreError> {
    try_read_head(db, HEAD_FAST_BLOCK_KEY, "head fast block hash")
}

/// Hash of the current fast-sync head block, or the zero hash.
pub fn read_head_fast_block_hash<D: DatabaseReader + ?Sized>(db: &D) -> Bytes32 {
    or_absent(try_read_head_fast_block_hash(db)).unwrap_or_else(Bytes32::zero)
}

pub fn try_write_head_fast_block_hash<D: DatabaseWriter + ?Sized>(
    db: &D,
    hash: &Bytes32,
) -> Result<(), StoreError> {
    put_raw(db, HEAD_FAST_BLOCK_KEY, hash.as_bytes(), "head fast block hash")
}

pub fn write_head_fast_block_hash<D: DatabaseWriter + ?Sized>(db: &D, hash: &Bytes32) {
    or_abort(try_write_head_fast_block_hash(db, hash))
}

// Fast sync progress

pub fn try_read_fast_trie_progress<D: DatabaseReader + ?Sized>(db: &D) -> Result<u64, StoreError> {
    let data = get_raw(db, FAST_TRIE_PROGRESS_KEY, "fast trie progress")?;
    decode_counter(&data, FAST_TRIE_PROGRESS_KEY)
}

/// Number of state entries fast sync has imported, persisted across restarts.
pub fn read_fast_trie_progress<D: DatabaseReader + ?Sized>(db: &D) -> u64 {
    or_absent(try_read_fast_trie_progress(db)).unwrap_or(0)
}

pub fn try_write_fast_trie_progress<D: DatabaseWriter + ?Sized>(
    db: &D,
    count: u64,
) -> Result<(), StoreError> {
    put_raw(
        db,
        FAST_TRIE_PROGRESS_KEY,
        &encode_counter(count),
        "fast trie progress",
    )
}

pub fn write_fast_trie_progress<D: DatabaseWriter + ?Sized>(db: &D, count: u64) {
    or_abort(try_write_fast_trie_progress(db, count))
}

// Headers

/// Whether a header with the given hash is stored.
pub fn has_header<D: DatabaseReader + ?Sized>(db: &D, chain: ChainType, hash: &Bytes32) -> bool {
    has_raw(db, &header_key(chain, hash))
}

fn try_read_header<T: SszReadDefault, D: DatabaseReader + ?Sized>(
    db: &D,
    chain: ChainType,
    hash: &Bytes32,
) -> Result<T, StoreError> {
    let key = header_key(chain, hash);
    let data = get_raw(db, &key, "block header")?;
    decode_ssz(&data, &key, "block header")
}

/// Writes the hash -> number index first, then the header itself, so a
/// readable header always has its index.
fn try_write_header<T: Header + SszWrite, D: DatabaseWriter + ?Sized>(
    db: &D,
    chain: ChainType,
    header: &T,
) -> Result<(), StoreError> {
    let hash = header.hash();
    put_raw(
        db,
        &header_number_key(chain, &hash),
        &encode_block_number(header.number()),
        "header number",
    )?;
    let data = encode_ssz(header, "block header")?;
    put_raw(db, &header_key(chain, &hash), &data, "block header")
}

/// Removes the header before its index, the reverse of the write order.
fn try_delete_header<D: DatabaseDeleter + ?Sized>(
    db: &D,
    chain: ChainType,
    hash: &Bytes32,
) -> Result<(), StoreError> {
    delete_raw(db, &header_key(chain, hash), "block header")?;
    delete_raw(db, &header_number_key(chain, hash), "header number")
}

pub fn try_read_minor_block_header<D: DatabaseReader + ?Sized>(
    db: &D,
    chain: ChainType,
    hash: &Bytes32,
) -> Result<MinorBlockHeader, StoreError> {
    try_read_header(db, chain, hash)
}

pub fn read_minor_block_header<D: DatabaseReader + ?Sized>(
    db: &D,
    chain: ChainType,
    hash: &Bytes32,
) -> Option<MinorBlockHeader> {
    or_absent(try_read_minor_block_header(db, chain, hash))
}

pub fn try_write_minor_block_header<D: DatabaseWriter + ?Sized>(
    db: &D,
    chain: ChainType,
    header: &MinorBlockHeader,
) -> Result<(), StoreError> {
    try_write_header(db, chain, header)
}

pub fn write_minor_block_header<D: DatabaseWriter + ?Sized>(
    db: &D,
    chain: ChainType,
    header: &MinorBlockHeader,
) {
    or_abort(try_write_minor_block_header(db, chain, header))
}

pub fn try_delete_minor_block_header<D: DatabaseDeleter + ?Sized>(
    db: &D,
    chain: ChainType,
    hash: &Bytes32,
) -> Result<(), StoreError> {
    try_delete_header(db, chain, hash)
}

pub fn delete_minor_block_header<D: DatabaseDeleter + ?Sized>(
    db: &D,
    chain: ChainType,
    hash: &Bytes32,
) {
    or_abort(try_delete_minor_block_header(db, chain, hash))
}

pub fn try_read_root_block_header<D: DatabaseReader + ?Sized>(
    db: &D,
    hash: &Bytes32,
) -> Result<RootBlockHeader, StoreError> {
    try_read_header(db, ChainType::Root, hash)
}

pub fn read_root_block_header<D: DatabaseReader + ?Sized>(
    db: &D,
    hash: &Bytes32,
) -> Option<RootBlockHeader> {
    or_absent(try_read_root_block_header(db, hash))
}

pub fn try_write_root_block_header<D: DatabaseWriter + ?Sized>(
    db: &D,
    header: &RootBlockHeader,
) -> Result<(), StoreError> {
    try_write_header(db, ChainType::Root, header)
}

pub fn write_root_block_header<D: DatabaseWriter + ?Sized>(db: &D, header: &RootBlockHeader) {
    or_abort(try_write_root_block_header(db, header))
}

pub fn try_delete_root_block_header<D: DatabaseDeleter + ?Sized>(
    db: &D,
    hash: &Bytes32,
) -> Result<(), StoreError> {
    try_delete_header(db, ChainType::Root, hash)
}

pub fn delete_root_block_header<D: DatabaseDeleter + ?Sized>(db: &D, hash: &Bytes32) {
    or_abort(try_delete_root_block_header(db, hash))
}

// Block bodies

/// Whether a block body with the given hash is stored.
pub fn has_block<D: DatabaseReader + ?Sized>(db: &D, chain: ChainType, hash: &Bytes32) -> bool {
    has_raw(db, &block_key(chain, hash))
}

fn try_read_body<T: SszReadDefault, D: DatabaseReader + ?Sized>(
    db: &D,
    chain: ChainType,
    hash: &Bytes32,
) -> Result<T, StoreError> {
    let key = block_key(chain, hash);
    let data = get_raw(db, &key, "block body")?;
    decode_ssz(&data, &key, "block body")
}

fn try_write_body<T: SszWrite, D: DatabaseWriter + ?Sized>(
    db: &D,
    chain: ChainType,
    hash: &Bytes32,
    block: &T,
) -> Result<(), StoreError> {
    let data = encode_ssz(block, "block body")?;
    put_raw(db, &block_key(chain, hash), &data, "block body")
}

pub fn try_read_minor_block<D: DatabaseReader + ?Sized>(
    db: &D,
    chain: ChainType,
    hash: &Bytes32,
) -> Result<MinorBlock, StoreError> {
    try_read_body(db, chain, hash)
}

pub fn read_minor_block<D: DatabaseReader + ?Sized>(
    db: &D,
    chain: ChainType,
    hash: &Bytes32,
) -> Option<MinorBlock> {
    or_absent(try_read_minor_block(db, chain, hash))
}

/// Stores the header (with its number index) and then the block.
pub fn try_write_minor_block<D: DatabaseWriter + ?Sized>(
    db: &D,
    chain: ChainType,
    block: &MinorBlock,
) -> Result<(), StoreError> {
    try_write_minor_block_header(db, chain, &block.header)?;
    try_write_body(db, chain, &block.hash(), block)
}

pub fn write_minor_block<D: DatabaseWriter + ?Sized>(db: &D, chain: ChainType, block: &MinorBlock) {
    or_abort(try_write_minor_block(db, chain, block))
}

pub fn try_read_root_block<D: DatabaseReader + ?Sized>(
    db: &D,
    hash: &Bytes32,
) -> Result<RootBlock, StoreError> {
    try_read_body(db, ChainType::Root, hash)
}

pub fn read_root_block<D: DatabaseReader + ?Sized>(db: &D, hash: &Bytes32) -> Option<RootBlock> {
    or_absent(try_read_root_block(db, hash))
}

/// Stores the header (with its number index) and then the block.
pub fn try_write_root_block<D: DatabaseWriter + ?Sized>(
    db: &D,
    block: &RootBlock,
) -> Result<(), StoreError> {
    try_write_root_block_header(db, &block.header)?;
    try_write_body(db, ChainType::Root, &block.hash(), block)
}

pub fn write_root_block<D: DatabaseWriter + ?Sized>(db: &D, block: &RootBlock) {
    or_abort(try_write_root_block(db, block))
}

/// Removes only the block body; header, receipts and TD are left alone.
pub fn try_delete_block<D: DatabaseDeleter + ?Sized>(
    db: &D,
    chain: ChainType,
    hash: &Bytes32,
) -> Result<(), StoreError> {
    delete_raw(db, &block_key(chain, hash), "block body")
}

pub fn delete_block<D: DatabaseDeleter + ?Sized>(db: &D, chain: ChainType, hash: &Bytes32) {
    or_abort(try_delete_block(db, chain, hash))
}

// Total difficulty

pub fn try_read_td<D: DatabaseReader + ?Sized>(
    db: &D,
    chain: ChainType,
    hash: &Bytes32,
) -> Result<BigUint, StoreError> {
    let key = header_td_key(chain, hash);
    let data = get_raw(db, &key, "total difficulty")?;
    decode_td(&data, &key)
}

/// Total difficulty of the block with the given hash.
pub fn read_td<D: DatabaseReader + ?Sized>(
    db: &D,
    chain: ChainType,
    hash: &Bytes32,
) -> Option<BigUint> {
    or_absent(try_read_td(db, chain, hash))
}

pub fn try_write_td<D: DatabaseWriter + ?Sized>(
    db: &D,
    chain: ChainType,
    hash: &Bytes32,
    td: &BigUint,
) -> Result<(), StoreError> {
    let data = encode_td(td)?;
    put_raw(db, &header_td_key(chain, hash), &data, "total difficulty")
}

pub fn write_td<D: DatabaseWriter + ?Sized>(db: &D, chain: ChainType, hash: &Bytes32, td: &BigUint) {
    or_abort(try_write_td(db, chain, hash, td))
}

pub fn try_delete_td<D: DatabaseDeleter + ?Sized>(
    db: &D,
    chain: ChainType,
    hash: &Bytes32,
) -> Result<(), StoreError> {
    delete_raw(db, &header_td_key(chain, hash), "total difficulty")
}

pub fn delete_td<D: DatabaseDeleter + ?Sized>(db: &D, chain: ChainType, hash: &Bytes32) {
    or_abort(try_delete_td(db, chain, hash))
}

// Receipts

/// Whether receipts for the block with the given hash are stored.
pub fn has_receipts<D: DatabaseReader + ?Sized>(db: &D, chain: ChainType, hash: &Bytes32) -> bool {
    has_raw(db, &block_receipts_key(chain, hash))
}

pub fn try_read_receipts<D: DatabaseReader + ?Sized>(
    db: &D,
    chain: ChainType,
    hash: &Bytes32,
) -> Result<Vec<Receipt>, StoreError> {
    let key = block_receipts_key(chain, hash);
    let data = get_raw(db, &key, "block receipts")?;
    let receipts: Receipts = decode_ssz(&data, &key, "block receipts")?;
    Ok(receipts.to_vec())
}

/// Receipts of the block in transaction order; empty if none are stored.
pub fn read_receipts<D: DatabaseReader + ?Sized>(
    db: &D,
    chain: ChainType,
    hash: &Bytes32,
) -> Vec<Receipt> {
    or_absent(try_read_receipts(db, chain, hash)).unwrap_or_default()
}

pub fn try_write_receipts<D: DatabaseWriter + ?Sized>(
    db: &D,
    chain: ChainType,
    hash: &Bytes32,
    receipts: &[Receipt],
) -> Result<(), StoreError> {
    let list = Receipts::from_slice(receipts).ok_or_else(|| StoreError::Encode {
        entity: "block receipts",
        reason: format!("{} receipts exceed the per-block limit", receipts.len()),
    })?;
    let data = encode_ssz(&list, "block receipts")?;
    put_raw(db, &block_receipts_key(chain, hash), &data, "block receipts")
}

pub fn write_receipts<D: DatabaseWriter + ?Sized>(
    db: &D,
    chain: ChainType,
    hash: &Bytes32,
    receipts: &[Receipt],
) {
    or_abort(try_write_receipts(db, chain, hash, receipts))
}

pub fn try_delete_receipts<D: DatabaseDeleter + ?Sized>(
    db: &D,
    chain: ChainType,
    hash: &Bytes32,
) -> Result<(), StoreError> {
    delete_raw(db, &block_receipts_key(chain, hash), "block receipts")
}

pub fn delete_receipts<D: DatabaseDeleter + ?Sized>(db: &D, chain: ChainType, hash: &Bytes32) {
    or_abort(try_delete_receipts(db, chain, hash))
}

// Composite deletes

/// Removes receipts, header (with index), body and TD of a minor block, in
/// that order. An interrupted delete leaves orphaned body or TD entries,
/// which are unreachable once the header is gone.
pub fn try_delete_minor_block<D: DatabaseDeleter + ?Sized>(
    db: &D,
    chain: ChainType,
    hash: &Bytes32,
) -> Result<(), StoreError> {
    try_delete_receipts(db, chain, hash)?;
    try_delete_minor_block_header(db, chain, hash)?;
    try_delete_block(db, chain, hash)?;
    try_delete_td(db, chain, hash)
}

pub fn delete_minor_block<D: DatabaseDeleter + ?Sized>(db: &D, chain: ChainType, hash: &Bytes32) {
    or_abort(try_delete_minor_block(db, chain, hash))
}

/// Removes header (with index), body and TD of a root block, in that order.
pub fn try_delete_root_block<D: DatabaseDeleter + ?Sized>(
    db: &D,
    hash: &Bytes32,
) -> Result<(), StoreError> {
    try_delete_root_block_header(db, hash)?;
    try_delete_block(db, ChainType::Root, hash)?;
    try_delete_td(db, ChainType::Root, hash)
}

pub fn delete_root_block<D: DatabaseDeleter + ?Sized>(db: &D, hash: &Bytes32) {
    or_abort(try_delete_root_block(db, hash))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_td_codec() {
        let key = b"t-test";
        for td in [
            BigUint::from(0u8),
            BigUint::from(1u8),
            BigUint::from(u64::MAX),
            BigUint::from(u64::MAX) * BigUint::from(u64::MAX) * 7u32,
        ] {
            let data = encode_td(&td).unwrap();
            assert_eq!(decode_td(&data, key).unwrap(), td);
        }
    }

    #[test]
    fn test_td_rejects_bad_length_prefix() {
        assert!(decode_td(&[], b"k").unwrap_err().is_corrupt());
        assert!(decode_td(&[3, 1, 2], b"k").unwrap_err().is_corrupt());
        assert!(decode_td(&[1, 1, 2], b"k").unwrap_err().is_corrupt());
    }

    #[test]
    fn test_counter_is_minimal_big_endian() {
        assert_eq!(encode_counter(0), Vec::<u8>::new());
        assert_eq!(encode_counter(1), vec![1]);
        assert_eq!(encode_counter(0x0102), vec![1, 2]);
        assert_eq!(decode_counter(&[1, 2], b"k").unwrap(), 0x0102);
        assert_eq!(decode_counter(&encode_counter(u64::MAX), b"k").unwrap(), u64::MAX);
        assert!(decode_counter(&[1; 9], b"k").unwrap_err().is_corrupt());
    }

    #[test]
    fn test_number_requires_eight_bytes() {
        assert_eq!(decode_number(&7u64.to_be_bytes(), b"k", "n").unwrap(), 7);
        assert!(decode_number(&[0, 7], b"k", "n").unwrap_err().is_corrupt());
    }
}
