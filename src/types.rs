/// Rank of a participant in the sorting chain (0-indexed).
pub type Rank = u32;

/// The scalar the chain sorts.
///
/// pipesort fixes a concrete non-negative integer rather than going
/// generic: the chain protocol only needs a total order with a strict
/// `<` comparison, and a fixed-width type keeps the wire format trivial.
pub type Value = u32;

/// The rank that seeds the chain and collects the sorted output.
pub const ROOT_RANK: Rank = 0;
