//! BEP52 leaf hashing and tree reduction
//!
//! Leaves are plain SHA256 of the block bytes. The leaf layer is padded to a
//! power of two with [`ZERO_HASH`] and reduced pairwise, `parent = H(left || right)`.

use sha2::{Digest, Sha256};
use crate::{Hash, ZERO_HASH};

/// Hash a single block (full or trailing short block)
#[inline]
pub fn hash_block(data: &[u8]) -> Hash {
    Sha256::digest(data).into()
}

/// Compute hash of two concatenated hashes (parent = H(left || right))
pub fn merkle_hash_pair(left: &Hash, right: &Hash) -> Hash {
    let mut hasher = Sha256::new();
    hasher.update(left);
    hasher.update(right);
    hasher.finalize().into()
}

/// Width of the padded leaf layer for `blocks` leaves.
///
/// Smallest power of two >= `blocks`, and 1 for an empty stream.
#[inline]
pub fn merkle_num_leafs(blocks: usize) -> usize {
    blocks.max(1).next_power_of_two()
}

/// Build the padded leaf layer.
///
/// `trailing` is the hash of the short final block, if any. Padding slots hold
/// the all-zero digest itself, not the hash of a zero-filled block.
pub fn merkle_leaf_layer(leaves: &[Hash], trailing: Option<Hash>) -> Vec<Hash> {
    let count = leaves.len() + usize::from(trailing.is_some());
    let width = merkle_num_leafs(count);

    let mut layer = Vec::with_capacity(width);
    layer.extend_from_slice(leaves);
    layer.extend(trailing);
    layer.resize(width, ZERO_HASH);
    layer
}

/// Reduce a padded layer to its root, in place.
///
/// # Panics
///
/// If a layer wider than one node has odd length, or a round fails to shrink
/// the layer. Both mean the layer was not padded to a power of two.
pub fn merkle_reduce(mut layer: Vec<Hash>) -> Hash {
    assert!(!layer.is_empty(), "leaf layer must hold at least the pad hash");

    while layer.len() > 1 {
        let width = layer.len();
        assert!(width % 2 == 0, "layer of width {} is not even", width);

        for i in 0..width / 2 {
            layer[i] = merkle_hash_pair(&layer[2 * i], &layer[2 * i + 1]);
        }
        layer.truncate(width / 2);

        assert!(layer.len() < width, "layer did not shrink");
    }

    layer[0]
}

/// Compute merkle root from leaf hashes with zero-padding
pub fn merkle_root(leaves: &[Hash]) -> Hash {
    merkle_reduce(merkle_leaf_layer(leaves, None))
}
