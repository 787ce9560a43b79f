use crate::Bytes32;
use ssz::PersistentList;
use ssz_derive::Ssz;
use typenum::U4096;

pub const RECEIPT_STATUS_FAILED: u64 = 0;
pub const RECEIPT_STATUS_SUCCESSFUL: u64 = 1;

/// Outcome of executing a single transaction.
#[derive(Clone, Debug, PartialEq, Eq, Ssz, Default)]
pub struct Receipt {
    pub status: u64,
    pub cumulative_gas_used: u64,
    pub gas_used: u64,
    /// Address of the created contract, zero when the transaction created none.
    pub contract_address: Bytes32,
}

impl Receipt {
    pub fn is_successful(&self) -> bool {
        self.status == RECEIPT_STATUS_SUCCESSFUL
    }
}

/// Storage form of a block's receipts: an SSZ list, which carries its length.
#[derive(Clone, Debug, PartialEq, Eq, Ssz, Default)]
pub struct Receipts {
    pub receipts: PersistentList<Receipt, U4096>,
}

impl Receipts {
    /// Returns `None` if there are more receipts than a block can hold.
    pub fn from_slice(receipts: &[Receipt]) -> Option<Self> {
        let mut list = PersistentList::default();
        for receipt in receipts {
            list.push(receipt.clone()).ok()?;
        }
        Some(Self { receipts: list })
    }

    pub fn len(&self) -> usize {
        self.receipts.len_usize()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn to_vec(&self) -> Vec<Receipt> {
        (0..self.len() as u64)
            .filter_map(|i| self.receipts.get(i).ok().cloned())
            .collect()
    }
}
