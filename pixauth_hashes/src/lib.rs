//! This crate contains software-implementations of the MD5 and SHA-1 hash algorithms and a
//! keyed-hash signature engine (HMAC) built on top of them. All hash implementations offer
//! granular streaming APIs, so data can be digested in arbitrary chunks.

pub mod hmac;
pub mod md5;
pub mod sha1;

/// Output of a `HashFunction`.
pub trait HashValue {
    /// Obtain the hash as a raw byte array.
    fn raw(&self) -> Vec<u8>;
}

/// An implementation of a hashing algorithm. It defines three implementation dependent types,
/// one of which is the output hash type.
pub trait HashFunction {
    /// Implementation dependent context during hashing. May contain parameters specific to the
    /// algorithm.
    type Context;

    /// Contains the current unfinished hash value. It is constructed using `init_hash` and then
    /// used by this function as the target vector where all data is compressed into.
    type HashState: Clone;

    /// Final hash value that is obtained through completion of the hashing function. It may be
    /// the same type as `Self::HashState` though it is treated as a separate type to ensure
    /// correct usage.
    type HashData: HashValue;

    /// Obtain an initial hash value (usually the IV) conforming to the parameters set by the
    /// given `Self::Context`.
    fn init_hash(ctx: &Self::Context) -> Self::HashState;

    /// Update the hash with more data. If not all data can be consumed, the remaining buffer
    /// will be stored within the given hash state.
    fn update_hash(hash: &mut Self::HashState, ctx: &Self::Context, input: &[u8]);

    /// Finish the hash using the buffered input data. The resulting hash is returned. The
    /// given `hash` is then in a final state and may not be used for further hashing without a
    /// previous call of `init_hash`.
    fn finish_hash(hash: &mut Self::HashState, ctx: &Self::Context) -> Self::HashData;

    /// Convenience method to initialize a hash state and completely compress the given `input`
    /// into it. Then the final hash is returned.
    fn digest_message(ctx: &Self::Context, input: &[u8]) -> Self::HashData;
}

/// A special hash function that consumes input in blocks of uniform size and needs no
/// parameters to do so.
pub trait BlockHashFunction: HashFunction<Context = ()> {
    /// The digestion block size of this hash function in bytes.
    const BLOCK_SIZE: usize;

    /// The size of the output hash in bytes.
    const OUTPUT_SIZE: usize;
}

/// Compute the digest of `input` and return it as a lowercase hexadecimal string.
pub fn compute_checksum_for_data<H>(input: &[u8]) -> String
    where H: BlockHashFunction {
    hex::encode(H::digest_message(&(), input).raw())
}

/// Compute the digest of the UTF-8 bytes of `input` as a lowercase hexadecimal string.
pub fn compute_checksum_for_string<H>(input: &str) -> String
    where H: BlockHashFunction {
    compute_checksum_for_data::<H>(input.as_bytes())
}
