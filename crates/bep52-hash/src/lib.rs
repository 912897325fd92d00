//! BEP52 (BitTorrent v2) compatible streaming merkle root hasher
//!
//! Computes the pieces root of a byte stream:
//! - 16 KiB blocks, each hashed with plain SHA256 (the last block unpadded)
//! - Binary tree (2 children per node)
//! - Leaf layer padded to a power of 2 with the all-zero hash
//! - Parents are `SHA256(left || right)`
//!
//! # Example
//!
//! ```rust
//! use bep52_hash::{to_hex, Bep52Hasher};
//!
//! let mut hasher = Bep52Hasher::new();
//! hasher.append(b"Hello, ").unwrap();
//! hasher.append(b"World!").unwrap();
//!
//! let root = hasher.root();
//! println!("Root: {}", to_hex(&root));
//! assert_eq!(root, bep52_hash::root_of(b"Hello, World!"));
//! ```
//!
//! @see <https://www.bittorrent.org/beps/bep_0052.html>

/// 32-byte SHA256 hash
pub type Hash = [u8; 32];

/// BEP52 block size: 16 KiB
pub const BEP52_BLOCK_SIZE: usize = 16 * 1024;

/// Root and leaf digest size in bytes
pub const BEP52_DIGEST_SIZE: usize = 32;

/// Zero hash (32 bytes of zeros) used for padding
pub const ZERO_HASH: Hash = [0u8; BEP52_DIGEST_SIZE];

mod accumulator;
mod config;
mod digest_impl;
mod hasher;
mod merkle;
mod types;

pub use accumulator::BlockAccumulator;
pub use config::{Bep52Config, ConfigError, MAX_LEAF_CAPACITY, MAX_READ_BUFFER_SIZE};
pub use hasher::{root_of, Bep52Hasher, HasherError, IncrementalHash, StreamStats};
pub use types::{from_hex, to_hex};

// Re-export low-level merkle functions
pub use merkle::{
    hash_block,
    merkle_hash_pair,
    merkle_leaf_layer,
    merkle_num_leafs,
    merkle_reduce,
    merkle_root,
};
