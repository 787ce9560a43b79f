use std::fmt;

/// Block hierarchy a stored entity belongs to.
///
/// The root chain confirms shard state; each shard runs its own minor chain
/// identified by its full shard id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChainType {
    Root,
    Shard(u32),
}

impl fmt::Display for ChainType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChainType::Root => write!(f, "root"),
            ChainType::Shard(id) => write!(f, "shard-{id}"),
        }
    }
}
