//! Streaming BEP52 hasher
//!
//! Feeds bytes through the block accumulator, hashes each full 16 KiB block as
//! it completes, and reduces the leaf list to the pieces root on demand.

use futures::io::{AsyncRead, AsyncReadExt};
use std::io::{self, Read};
use tracing::{debug, trace};

use crate::accumulator::BlockAccumulator;
use crate::config::{Bep52Config, ConfigError};
use crate::merkle::{hash_block, merkle_leaf_layer, merkle_reduce};
use crate::{Hash, BEP52_BLOCK_SIZE, BEP52_DIGEST_SIZE};

/// Hasher error type
#[derive(Debug, thiserror::Error)]
pub enum HasherError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Generic incremental-hash capabilities
///
/// `sum` appends the digest to `prefix` and leaves the hasher untouched.
/// `append` is distinct from `io::Write::write` so both traits can be in scope.
pub trait IncrementalHash {
    fn append(&mut self, data: &[u8]) -> Result<usize, HasherError>;
    fn sum(&self, prefix: Vec<u8>) -> Vec<u8>;
    fn reset(&mut self);
    fn size(&self) -> usize;
    fn block_size(&self) -> usize;
}

/// Hasher stats
#[derive(Debug, Clone, PartialEq)]
pub struct StreamStats {
    /// Full blocks hashed so far
    pub blocks: usize,
    /// Bytes waiting for the next block boundary
    pub buffered: usize,
    /// Bytes appended since creation or last reset
    pub total_size: u64,
}

/// Incremental BEP52 merkle root hasher
#[derive(Debug, Clone)]
pub struct Bep52Hasher {
    config: Bep52Config,
    accumulator: BlockAccumulator,
    leaf_hashes: Vec<Hash>,
    total_size: u64,
}

impl Default for Bep52Hasher {
    fn default() -> Self {
        Self::new()
    }
}

impl Bep52Hasher {
    pub fn new() -> Self {
        Self::from_valid_config(Bep52Config::default())
    }

    pub fn with_config(config: Bep52Config) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: Bep52Config) -> Self {
        Self {
            leaf_hashes: Vec::with_capacity(config.leaf_capacity),
            accumulator: BlockAccumulator::new(),
            total_size: 0,
            config,
        }
    }

    /// Append data to the stream
    ///
    /// Returns the number of bytes written, which is always `data.len()`.
    pub fn append(&mut self, data: &[u8]) -> Result<usize, HasherError> {
        Ok(self.absorb(data))
    }

    pub(crate) fn absorb(&mut self, data: &[u8]) -> usize {
        let leaf_hashes = &mut self.leaf_hashes;
        self.accumulator.push(data, |block| {
            let hash = hash_block(block);
            trace!("block {} hashed", leaf_hashes.len());
            leaf_hashes.push(hash);
        });
        self.total_size += data.len() as u64;
        data.len()
    }

    /// Pieces root of everything appended so far
    ///
    /// Does not consume or modify the hasher; more data may follow.
    pub fn root(&self) -> Hash {
        let pending = self.accumulator.pending();
        let trailing = (!pending.is_empty()).then(|| hash_block(pending));

        let layer = merkle_leaf_layer(&self.leaf_hashes, trailing);
        let width = layer.len();
        let root = merkle_reduce(layer);

        debug!(
            "root over {} leaves (width {}): {}",
            self.leaf_hashes.len() + usize::from(trailing.is_some()),
            width,
            hex::encode(&root[..8])
        );
        root
    }

    /// Append the root to `prefix` and return the buffer
    pub fn finalize(&self, mut prefix: Vec<u8>) -> Vec<u8> {
        prefix.extend_from_slice(&self.root());
        prefix
    }

    /// Return to the freshly constructed state
    pub fn reset(&mut self) {
        debug!("reset after {} bytes", self.total_size);
        self.accumulator.clear();
        self.leaf_hashes.clear();
        self.total_size = 0;
    }

    pub fn digest_size(&self) -> usize {
        BEP52_DIGEST_SIZE
    }

    pub fn block_size(&self) -> usize {
        BEP52_BLOCK_SIZE
    }

    /// Hashes of the full blocks seen so far
    pub fn leaf_hashes(&self) -> &[Hash] {
        &self.leaf_hashes
    }

    pub fn config(&self) -> &Bep52Config {
        &self.config
    }

    /// Get current stats
    pub fn stats(&self) -> StreamStats {
        StreamStats {
            blocks: self.leaf_hashes.len(),
            buffered: self.accumulator.len(),
            total_size: self.total_size,
        }
    }

    /// Append everything `reader` yields until EOF
    ///
    /// Returns the number of bytes read. On error, bytes read before the
    /// failure stay appended.
    pub fn update_reader<R: Read>(&mut self, mut reader: R) -> Result<u64, HasherError> {
        let mut buffer = vec![0u8; self.config.read_buffer_size];
        let mut bytes_read: u64 = 0;

        loop {
            let n = match reader.read(&mut buffer) {
                Ok(0) => break, // EOF
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };
            self.absorb(&buffer[..n]);
            bytes_read += n as u64;
        }

        debug!("read {} bytes, {} blocks hashed", bytes_read, self.leaf_hashes.len());
        Ok(bytes_read)
    }

    /// Async counterpart of [`Bep52Hasher::update_reader`]
    pub async fn update_async_reader<R: AsyncRead + Unpin>(
        &mut self,
        mut reader: R,
    ) -> Result<u64, HasherError> {
        let mut buffer = vec![0u8; self.config.read_buffer_size];
        let mut bytes_read: u64 = 0;

        loop {
            let n = match reader.read(&mut buffer).await {
                Ok(0) => break, // EOF
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };
            self.absorb(&buffer[..n]);
            bytes_read += n as u64;
        }

        debug!("read {} bytes, {} blocks hashed", bytes_read, self.leaf_hashes.len());
        Ok(bytes_read)
    }
}

impl IncrementalHash for Bep52Hasher {
    fn append(&mut self, data: &[u8]) -> Result<usize, HasherError> {
        Bep52Hasher::append(self, data)
    }

    fn sum(&self, prefix: Vec<u8>) -> Vec<u8> {
        self.finalize(prefix)
    }

    fn reset(&mut self) {
        Bep52Hasher::reset(self)
    }

    fn size(&self) -> usize {
        self.digest_size()
    }

    fn block_size(&self) -> usize {
        Bep52Hasher::block_size(self)
    }
}

impl io::Write for Bep52Hasher {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(self.absorb(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// One-shot pieces root of `data`
pub fn root_of(data: &[u8]) -> Hash {
    let mut hasher = Bep52Hasher::new();
    hasher.absorb(data);
    hasher.root()
}
