#![allow(clippy::unreadable_literal)]

use pixauth_util::{align_to_u32a_be, BlockBuffer};

use crate::{BlockHashFunction, HashFunction, HashValue};

const BLOCK_LENGTH_BYTES: usize = 64;

/// The initial state for any SHA1 hash. From here, all blocks are applied.
pub const INITIAL: SHA1Hash = SHA1Hash {
    a: 0x67452301,
    b: 0xEFCDAB89,
    c: 0x98BADCFE,
    d: 0x10325476,
    e: 0xC3D2E1F0,
};

/// A SHA1 hash state. It consists mainly out of 5 double-words named `a`, `b`, `c`, `d` and `e`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SHA1Hash {
    pub a: u32,
    pub b: u32,
    pub c: u32,
    pub d: u32,
    pub e: u32,
}

#[derive(Debug, Clone)]
pub struct SHA1HashState {
    hash: SHA1Hash,
    buffer: BlockBuffer<BLOCK_LENGTH_BYTES>,
}

fn round_function(hash: &mut SHA1Hash, block: &[u8; BLOCK_LENGTH_BYTES]) {
    let mut extended_block = [0_u32; 80];
    align_to_u32a_be(&mut extended_block[0..16], block);

    for i in 16..80 {
        extended_block[i] = u32::rotate_left(
            extended_block[i - 3]
                ^ extended_block[i - 8]
                ^ extended_block[i - 14]
                ^ extended_block[i - 16],
            1,
        )
    }

    let mut round_state = *hash;

    for (i, data_word) in extended_block.iter().enumerate() {
        let (scrambled_data, magic_constant) = match i {
            0..=19 => (
                (round_state.b & round_state.c) | ((!round_state.b) & round_state.d),
                0x5A827999,
            ),
            20..=39 => (round_state.b ^ round_state.c ^ round_state.d, 0x6ED9EBA1),
            40..=59 => (
                (round_state.b & round_state.c)
                    | (round_state.b & round_state.d)
                    | (round_state.c & round_state.d),
                0x8F1BBCDC,
            ),
            60..=79 => (round_state.b ^ round_state.c ^ round_state.d, 0xCA62C1D6),
            _ => unreachable!(),
        };

        let temp = u32::rotate_left(round_state.a, 5)
            .wrapping_add(scrambled_data)
            .wrapping_add(round_state.e)
            .wrapping_add(magic_constant)
            .wrapping_add(*data_word);
        round_state.e = round_state.d;
        round_state.d = round_state.c;
        round_state.c = u32::rotate_left(round_state.b, 30);
        round_state.b = round_state.a;
        round_state.a = temp;
    }

    hash.a = hash.a.wrapping_add(round_state.a);
    hash.b = hash.b.wrapping_add(round_state.b);
    hash.c = hash.c.wrapping_add(round_state.c);
    hash.d = hash.d.wrapping_add(round_state.d);
    hash.e = hash.e.wrapping_add(round_state.e);
}

impl HashFunction for SHA1Hash {
    type Context = ();
    type HashState = SHA1HashState;
    type HashData = SHA1Hash;

    fn init_hash(_ctx: &Self::Context) -> Self::HashState {
        SHA1HashState { hash: INITIAL, buffer: BlockBuffer::new() }
    }

    fn update_hash(hash: &mut Self::HashState, _ctx: &Self::Context, input: &[u8]) {
        let chaining_value = &mut hash.hash;
        hash.buffer.update(input, |block| round_function(chaining_value, block));
    }

    fn finish_hash(hash: &mut Self::HashState, _ctx: &Self::Context) -> Self::HashData {
        let chaining_value = &mut hash.hash;

        // note, that the length is appended as a big endian number
        hash.buffer.finish(u64::to_be_bytes, |block| round_function(chaining_value, block));

        hash.hash
    }

    fn digest_message(ctx: &Self::Context, input: &[u8]) -> Self::HashData {
        let mut hash_state = Self::init_hash(ctx);

        // digest all data
        Self::update_hash(&mut hash_state, ctx, input);

        // finish hashing by padding the remaining data within the hash state and digesting it
        Self::finish_hash(&mut hash_state, ctx)
    }
}

impl HashValue for SHA1Hash {
    /// Generates a raw `[u8; 20]` array from the current hash state.
    fn raw(&self) -> Vec<u8> {
        [self.a, self.b, self.c, self.d, self.e]
            .iter()
            .flat_map(|word| word.to_be_bytes().to_vec())
            .collect()
    }
}

impl BlockHashFunction for SHA1Hash {
    const BLOCK_SIZE: usize = BLOCK_LENGTH_BYTES;

    const OUTPUT_SIZE: usize = 20;
}
