//! Slices an incoming byte stream into 16 KiB blocks.

use crate::BEP52_BLOCK_SIZE;

/// Pending-bytes buffer that emits every completed block in stream order.
///
/// Between calls the buffer holds fewer than [`BEP52_BLOCK_SIZE`] bytes.
#[derive(Debug, Clone)]
pub struct BlockAccumulator {
    buffer: Vec<u8>,
}

impl Default for BlockAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockAccumulator {
    pub fn new() -> Self {
        Self {
            buffer: Vec::with_capacity(BEP52_BLOCK_SIZE),
        }
    }

    /// Append data, calling `on_block` for each full block it completes.
    ///
    /// Returns the number of blocks emitted.
    pub fn push<F>(&mut self, data: &[u8], mut on_block: F) -> usize
    where
        F: FnMut(&[u8]),
    {
        let mut rest = data;
        let mut emitted = 0;

        while !rest.is_empty() {
            // Whole blocks straight from the input while nothing is pending
            if self.buffer.is_empty() && rest.len() >= BEP52_BLOCK_SIZE {
                let (block, tail) = rest.split_at(BEP52_BLOCK_SIZE);
                on_block(block);
                emitted += 1;
                rest = tail;
                continue;
            }

            let space = BEP52_BLOCK_SIZE - self.buffer.len();
            let to_write = space.min(rest.len());
            self.buffer.extend_from_slice(&rest[..to_write]);
            rest = &rest[to_write..];

            if self.buffer.len() == BEP52_BLOCK_SIZE {
                on_block(&self.buffer[..]);
                emitted += 1;
                self.buffer.clear();
            }
        }

        emitted
    }

    /// Bytes not yet forming a full block
    pub fn pending(&self) -> &[u8] {
        &self.buffer
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect_blocks(acc: &mut BlockAccumulator, data: &[u8], out: &mut Vec<Vec<u8>>) -> usize {
        acc.push(data, |block| out.push(block.to_vec()))
    }

    #[test]
    fn test_empty_push_is_noop() {
        let mut acc = BlockAccumulator::new();
        let mut blocks = Vec::new();

        assert_eq!(collect_blocks(&mut acc, &[], &mut blocks), 0);
        assert!(acc.is_empty());
        assert!(blocks.is_empty());
    }

    #[test]
    fn test_short_push_stays_pending() {
        let mut acc = BlockAccumulator::new();
        let mut blocks = Vec::new();

        collect_blocks(&mut acc, &[7u8; 1000], &mut blocks);
        assert!(blocks.is_empty());
        assert_eq!(acc.len(), 1000);
        assert_eq!(acc.pending(), &[7u8; 1000][..]);
    }

    #[test]
    fn test_exact_block_is_emitted() {
        let mut acc = BlockAccumulator::new();
        let mut blocks = Vec::new();

        let emitted = collect_blocks(&mut acc, &vec![1u8; BEP52_BLOCK_SIZE], &mut blocks);
        assert_eq!(emitted, 1);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].len(), BEP52_BLOCK_SIZE);
        assert!(acc.is_empty());
    }

    #[test]
    fn test_blocks_span_pushes_in_order() {
        let mut acc = BlockAccumulator::new();
        let mut blocks = Vec::new();

        let data: Vec<u8> = (0..BEP52_BLOCK_SIZE * 2 + 100).map(|i| (i % 251) as u8).collect();

        // Straddle the first block boundary, then finish in one go
        collect_blocks(&mut acc, &data[..10_000], &mut blocks);
        assert!(blocks.is_empty());
        collect_blocks(&mut acc, &data[10_000..20_000], &mut blocks);
        assert_eq!(blocks.len(), 1);
        collect_blocks(&mut acc, &data[20_000..], &mut blocks);

        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0], &data[..BEP52_BLOCK_SIZE]);
        assert_eq!(blocks[1], &data[BEP52_BLOCK_SIZE..BEP52_BLOCK_SIZE * 2]);
        assert_eq!(acc.pending(), &data[BEP52_BLOCK_SIZE * 2..]);
    }

    #[test]
    fn test_clear() {
        let mut acc = BlockAccumulator::new();
        acc.push(&[1u8; 10], |_| {});
        acc.clear();
        assert!(acc.is_empty());
    }
}
