use containers::{Bytes32, ChainType, Header, MinorBlockHeader, RootBlockHeader};
use tracing::debug;

use crate::accessors::{read_minor_block_header, read_root_block_header};
use crate::database::DatabaseReader;

/// Latest common ancestor of `a` and `b`, walking parent links via `lookup`.
///
/// The higher header is first walked down to the lower one's height, then both
/// are walked in lockstep until their hashes match. Returns `None` as soon as
/// a parent is missing, or when a parent does not sit strictly below its
/// child, which can only happen on a broken chain and would otherwise loop.
pub fn find_common_ancestor<H, F>(a: &H, b: &H, mut lookup: F) -> Option<H>
where
    H: Header + Clone,
    F: FnMut(&Bytes32) -> Option<H>,
{
    let mut parent_of = |header: &H| -> Option<H> {
        let parent = lookup(&header.parent_hash())?;
        if parent.number() >= header.number() {
            debug!(
                child = header.number(),
                parent = parent.number(),
                "Parent does not precede child, abandoning ancestor search"
            );
            return None;
        }
        Some(parent)
    };

    let mut a = a.clone();
    let mut b = b.clone();

    while a.number() > b.number() {
        a = parent_of(&a)?;
    }
    while b.number() > a.number() {
        b = parent_of(&b)?;
    }

    while a.hash() != b.hash() {
        a = parent_of(&a)?;
        b = parent_of(&b)?;
        // Parent numbers may skip heights; keep both walkers level.
        while a.number() > b.number() {
            a = parent_of(&a)?;
        }
        while b.number() > a.number() {
            b = parent_of(&b)?;
        }
    }

    Some(a)
}

/// Latest common ancestor of two minor block headers of `chain`.
pub fn find_common_minor_ancestor<D: DatabaseReader + ?Sized>(
    db: &D,
    chain: ChainType,
    a: &MinorBlockHeader,
    b: &MinorBlockHeader,
) -> Option<MinorBlockHeader> {
    find_common_ancestor(a, b, |hash| read_minor_block_header(db, chain, hash))
}

/// Latest common ancestor of two root block headers.
pub fn find_common_root_ancestor<D: DatabaseReader + ?Sized>(
    db: &D,
    a: &RootBlockHeader,
    b: &RootBlockHeader,
) -> Option<RootBlockHeader> {
    find_common_ancestor(a, b, |hash| read_root_block_header(db, hash))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn header(number: u64, parent: &RootBlockHeader, nonce: u64) -> RootBlockHeader {
        RootBlockHeader {
            number,
            parent_hash: parent.hash(),
            nonce,
            ..Default::default()
        }
    }

    #[test]
    fn test_parent_not_below_child_ends_search() {
        // A header whose "parent" claims the same height.
        let genesis = RootBlockHeader::default();
        let looped = RootBlockHeader {
            number: 0,
            nonce: 1,
            parent_hash: genesis.hash(),
            ..Default::default()
        };
        let other = header(0, &genesis, 2);

        let mut index = HashMap::new();
        index.insert(genesis.hash(), genesis.clone());

        assert_eq!(
            find_common_ancestor(&looped, &other, |h| index.get(h).cloned()),
            None
        );
    }

    #[test]
    fn test_identical_headers_need_no_lookup() {
        let genesis = RootBlockHeader::default();
        let tip = header(1, &genesis, 0);

        let found = find_common_ancestor(&tip, &tip, |_| -> Option<RootBlockHeader> {
            panic!("lookup should not be called")
        });
        assert_eq!(found, Some(tip));
    }
}
