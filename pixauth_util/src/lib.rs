//! Small byte-level helpers shared by the software hash implementations.

use std::convert::TryInto;

/// Fills the `dest` array with little endian integers read from `source`. `source` must be at
/// least four times bigger than `dest`.
pub fn align_to_u32a_le(dest: &mut [u32], source: &[u8]) {
    assert!(source.len() >= dest.len() * 4);

    for (word, bytes) in dest.iter_mut().zip(source.chunks_exact(4)) {
        *word = u32::from_le_bytes(bytes.try_into().unwrap());
    }
}

/// Fills the `dest` array with big endian integers read from `source`. `source` must be at
/// least four times bigger than `dest`.
pub fn align_to_u32a_be(dest: &mut [u32], source: &[u8]) {
    assert!(source.len() >= dest.len() * 4);

    for (word, bytes) in dest.iter_mut().zip(source.chunks_exact(4)) {
        *word = u32::from_be_bytes(bytes.try_into().unwrap());
    }
}

/// Collects streamed input into blocks of `N` bytes. Input that does not fill a whole block
/// is kept until more data arrives or the hash is finished.
#[derive(Debug, Clone)]
pub struct BlockBuffer<const N: usize> {
    remaining_data: Vec<u8>,
    message_length: u64,
}

impl<const N: usize> BlockBuffer<N> {
    pub fn new() -> Self {
        BlockBuffer { remaining_data: Vec::with_capacity(N), message_length: 0 }
    }

    /// Append `input` and call `compress` for every full block that becomes available.
    pub fn update<F>(&mut self, mut input: &[u8], mut compress: F)
        where F: FnMut(&[u8; N]) {
        self.message_length = self.message_length.wrapping_add(input.len() as u64);

        // complete a block started by an earlier call
        if !self.remaining_data.is_empty() {
            let missing = N - self.remaining_data.len();
            if input.len() < missing {
                self.remaining_data.extend_from_slice(input);
                return;
            }

            self.remaining_data.extend_from_slice(&input[..missing]);
            compress(self.remaining_data.as_slice().try_into().unwrap());
            self.remaining_data.clear();
            input = &input[missing..];
        }

        let mut blocks = input.chunks_exact(N);
        for block in &mut blocks {
            compress(block.try_into().unwrap());
        }

        self.remaining_data.extend_from_slice(blocks.remainder());
    }

    /// Apply the Merkle-Damgård padding (a single 1-bit, zeros, and the message length in bits
    /// encoded by `encode_length`) and compress the final one or two blocks.
    pub fn finish<F, L>(&mut self, encode_length: L, mut compress: F)
        where F: FnMut(&[u8; N]),
              L: Fn(u64) -> [u8; 8] {
        let message_length_bits = self.message_length.wrapping_mul(8);
        let remaining = self.remaining_data.len();

        let mut last_block = [0u8; N];
        last_block[..remaining].copy_from_slice(&self.remaining_data);
        last_block[remaining] = 0x80;

        // if there is not enough space for the message length, a new block must be created
        if remaining + 1 + 8 > N {
            let mut overflow_block = [0u8; N];
            overflow_block[N - 8..].copy_from_slice(&encode_length(message_length_bits));

            compress(&last_block);
            compress(&overflow_block);
        } else {
            last_block[N - 8..].copy_from_slice(&encode_length(message_length_bits));
            compress(&last_block);
        }

        self.remaining_data.clear();
    }

    /// Number of bytes fed into the buffer so far.
    pub fn message_length(&self) -> u64 {
        self.message_length
    }
}

impl<const N: usize> Default for BlockBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}
