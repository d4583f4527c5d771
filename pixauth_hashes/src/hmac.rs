//! Keyed-hash message authentication codes following RFC 2104.
//!
//! A [`Signature`] is created once per key and can authenticate any number of messages: feed
//! the message with [`Signature::update`], read the code with [`Signature::finish`] or
//! [`Signature::finish_hex`] and call [`Signature::reset`] before starting the next message.

use base64::engine::general_purpose::STANDARD as BASE64_ENGINE;
use base64::Engine;

use crate::{BlockHashFunction, HashFunction, HashValue};

const OUTER_PAD_BYTE: u8 = 0x5c;

const INNER_PAD_BYTE: u8 = 0x36;

/// Textual encoding of a finished authentication code.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SignatureEncoding {
    /// lowercase hexadecimal digits
    Hex,
    /// standard Base64 alphabet with padding
    Base64,
}

/// An in-progress HMAC computation under a fixed key, using the hash function `H`.
#[derive(Clone)]
pub struct Signature<H>
    where H: BlockHashFunction {
    outer_pad: Box<[u8]>,
    inner_pad: Box<[u8]>,
    outer: H::HashState,
    inner: H::HashState,
}

impl<H> Signature<H>
    where H: BlockHashFunction {
    /// Derive the pads from `key` and seed both running hash states with them. Keys longer
    /// than the block size of `H` are hashed first, shorter keys are padded with zeros.
    pub fn new(key: &[u8]) -> Self {
        let shortened_key = if key.len() > H::BLOCK_SIZE {
            H::digest_message(&(), key).raw()
        } else {
            key.to_vec()
        };

        let padded_key = pad(&shortened_key, H::BLOCK_SIZE);
        let outer_pad = padded_key.iter().map(|v| v ^ OUTER_PAD_BYTE).collect::<Box<[u8]>>();
        let inner_pad = padded_key.iter().map(|v| v ^ INNER_PAD_BYTE).collect::<Box<[u8]>>();

        let mut outer = H::init_hash(&());
        H::update_hash(&mut outer, &(), &outer_pad);

        let mut inner = H::init_hash(&());
        H::update_hash(&mut inner, &(), &inner_pad);

        Signature { outer_pad, inner_pad, outer, inner }
    }

    /// Append `data` to the authenticated message.
    pub fn update(&mut self, data: &[u8]) {
        H::update_hash(&mut self.inner, &(), data);
    }

    /// Discard the message fed so far. The key is kept.
    pub fn reset(&mut self) {
        self.inner = H::init_hash(&());
        H::update_hash(&mut self.inner, &(), &self.inner_pad);
    }

    /// Compute the raw authentication code of the message fed so far. The running states are
    /// left untouched, so more data may still be appended afterwards.
    pub fn finish(&self) -> Vec<u8> {
        let mut inner = self.inner.clone();
        let inner_digest = H::finish_hash(&mut inner, &()).raw();

        let mut outer = self.outer.clone();
        H::update_hash(&mut outer, &(), &inner_digest);
        H::finish_hash(&mut outer, &()).raw()
    }

    /// Compute the authentication code as a lowercase hexadecimal string.
    pub fn finish_hex(&self) -> String {
        hex::encode(self.finish())
    }

    /// Compute the authentication code and encode it with `encoding`.
    pub fn finish_encoded(&self, encoding: SignatureEncoding) -> String {
        match encoding {
            SignatureEncoding::Hex => self.finish_hex(),
            SignatureEncoding::Base64 => BASE64_ENGINE.encode(self.finish()),
        }
    }

    /// The key derived pad that seeds the outer hash.
    pub fn outer_pad(&self) -> &[u8] {
        &self.outer_pad
    }

    /// The key derived pad that seeds the inner hash.
    pub fn inner_pad(&self) -> &[u8] {
        &self.inner_pad
    }
}

/// Generate a keyed-hash message authentication code from a `HashFunction` and a given key using the HMAC protocol
/// of RFC 2104.
/// #Parameters
/// - `key` a secret key for the authentication code
/// - `message` an arbitrary-sized message to authenticate
/// - `H` an arbitrary hash function
///
/// #Outputs
/// Returns a boxed slice containing the raw authentication code
pub fn hmac<H>(key: &[u8], message: &[u8]) -> Box<[u8]>
    where H: BlockHashFunction {
    let mut signature = Signature::<H>::new(key);
    signature.update(message);
    signature.finish().into_boxed_slice()
}

/// Authenticate `data` under `key` in one go and return the code in the given `encoding`.
pub fn compute_signature_for_data<H>(encoding: SignatureEncoding, key: &[u8], data: &[u8]) -> String
    where H: BlockHashFunction {
    let mut signature = Signature::<H>::new(key);
    signature.update(data);
    signature.finish_encoded(encoding)
}

/// Like [`compute_signature_for_data`], for a textual key and message.
pub fn compute_signature_for_string<H>(encoding: SignatureEncoding, key: &str, message: &str) -> String
    where H: BlockHashFunction {
    compute_signature_for_data::<H>(encoding, key.as_bytes(), message.as_bytes())
}

fn pad(key: &[u8], length: usize) -> Box<[u8]> {
    let mut padded_vec = key.to_vec();
    padded_vec.resize(length, 0u8);
    padded_vec.into_boxed_slice()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::md5::MD5Hash;
    use crate::sha1::SHA1Hash;

    use super::*;

    const HMAC_EXAMPLE: &[u8] = b"The quick brown fox jumps over the lazy dog";

    const LARGE_KEY_MESSAGE: &str = "Test Using Larger Than Block-Size Key - Hash Key First";

    const LARGE_KEY_AND_DATA_MESSAGE: &str =
        "Test Using Larger Than Block-Size Key and Larger Than One Block-Size Data";

    fn hex_md5(key: &[u8], data: &[u8]) -> String {
        compute_signature_for_data::<MD5Hash>(SignatureEncoding::Hex, key, data)
    }

    fn hex_sha1(key: &[u8], data: &[u8]) -> String {
        compute_signature_for_data::<SHA1Hash>(SignatureEncoding::Hex, key, data)
    }

    fn rfc2202_key_4() -> Vec<u8> {
        (0x01..=0x19).collect()
    }

    #[test]
    fn test_hmac_md5() {
        assert_eq!(hex::encode(hmac::<MD5Hash>(b"key", HMAC_EXAMPLE)),
                   "80070713463e7749b90c2dc24911e275");
    }

    #[test]
    fn test_hmac_sha1() {
        assert_eq!(hex::encode(hmac::<SHA1Hash>(b"key", HMAC_EXAMPLE)),
                   "de7c9b85b8b78aa6bc8a7a36f70a90701c9db4d9");
    }

    #[test]
    fn test_rfc2202_md5() {
        assert_eq!(hex_md5(&[0x0b; 16], b"Hi There"), "9294727a3638bb1c13f48ef8158bfc9d");
        assert_eq!(hex_md5(b"Jefe", b"what do ya want for nothing?"),
                   "750c783e6ab0b503eaa86e310a5db738");
        assert_eq!(hex_md5(&[0xaa; 16], &[0xdd; 50]), "56be34521d144c88dbb8c733f0e8b3f6");
        assert_eq!(hex_md5(&rfc2202_key_4(), &[0xcd; 50]), "697eaf0aca3a3aea3a75164746ffaa79");
        assert_eq!(hex_md5(&[0x0c; 16], b"Test With Truncation"), "56461ef2342edc00f9bab995690efd4c");
        assert_eq!(hex_md5(&[0xaa; 80], LARGE_KEY_MESSAGE.as_bytes()),
                   "6b1ab7fe4bd7bf8f0b62e6ce61b9d0cd");
        assert_eq!(hex_md5(&[0xaa; 80], LARGE_KEY_AND_DATA_MESSAGE.as_bytes()),
                   "6f630fad67cda0ee1fb1f562db3aa53e");
    }

    #[test]
    fn test_rfc2202_sha1() {
        assert_eq!(hex_sha1(&[0x0b; 20], b"Hi There"), "b617318655057264e28bc0b6fb378c8ef146be00");
        assert_eq!(hex_sha1(b"Jefe", b"what do ya want for nothing?"),
                   "effcdf6ae5eb2fa2d27416d5f184df9c259a7c79");
        assert_eq!(hex_sha1(&[0xaa; 20], &[0xdd; 50]), "125d7342b9ac11cd91a39af48aa17b4f63f175d3");
        assert_eq!(hex_sha1(&rfc2202_key_4(), &[0xcd; 50]), "4c9007f4026250c6bc8414f9bf50c86c2d7235da");
        assert_eq!(hex_sha1(&[0x0c; 20], b"Test With Truncation"), "4c1a03424b55e07fe7f27be1d58bb9324a9a5a04");
        assert_eq!(hex_sha1(&[0xaa; 80], LARGE_KEY_MESSAGE.as_bytes()),
                   "aa4ae5e15272d00e95705637ce8a3b55ed402112");
        assert_eq!(hex_sha1(&[0xaa; 80], LARGE_KEY_AND_DATA_MESSAGE.as_bytes()),
                   "e8e99d0f45237d786d6bbaa7965c7808bbff1a91");
    }

    #[test]
    fn test_textual_keys_sha1() {
        assert_eq!(
            compute_signature_for_string::<SHA1Hash>(
                SignatureEncoding::Hex,
                "secret",
                "This is a sample string used to test the hash_hmac function with various hashing algorithms"),
            "5bfdb62b97e2c987405463e9f7c193139c0e1fd0"
        );
        assert_eq!(
            compute_signature_for_string::<SHA1Hash>(SignatureEncoding::Hex, "Secret Passphrase", "Message"),
            "e90f713295ea4cc06c92c9248696ffafc5d01faf"
        );

        // the same message under keys shorter than, shorter than and longer than one block
        let expected = [
            (1, "4f8e4da5b85182a352041a22b4d566b4b53abf9e"),
            (20, "cb8da9d75b1cd177c00e8c46bd9c17fa313b9f6c"),
            (80, "f196c43f06a566cb096a72227a3196d97236898b"),
        ];
        for (repeat, digest) in expected.iter() {
            assert_eq!(
                compute_signature_for_string::<SHA1Hash>(
                    SignatureEncoding::Hex, &"aa".repeat(*repeat), LARGE_KEY_MESSAGE),
                *digest
            );
        }
    }

    #[test]
    fn test_base64_encoding() {
        let encoded = compute_signature_for_data::<SHA1Hash>(
            SignatureEncoding::Base64, &[0x0b; 20], b"Hi There");
        assert_eq!(encoded, "thcxhlUFcmTii8C2+zeMjvFGvgA=");

        let encoded = compute_signature_for_data::<MD5Hash>(SignatureEncoding::Base64, b"key", b"");
        assert_eq!(encoded.len(), 24);
        assert!(encoded.ends_with("=="));
    }

    #[test]
    fn test_block_size_key_is_not_hashed() {
        let key = [0x42u8; 64];
        let signature = Signature::<SHA1Hash>::new(&key);

        assert!(signature.inner_pad().iter().all(|b| *b == 0x42 ^ 0x36));
        assert!(signature.outer_pad().iter().all(|b| *b == 0x42 ^ 0x5c));
    }

    #[test]
    fn test_oversized_key_is_hashed() {
        let key = [0x42u8; 65];
        let hashed_key = SHA1Hash::digest_message(&(), &key).raw();

        let signature = Signature::<SHA1Hash>::new(&key);
        let expected = Signature::<SHA1Hash>::new(&hashed_key);

        assert_eq!(signature.inner_pad(), expected.inner_pad());
        assert_eq!(signature.outer_pad()[..20],
                   hashed_key.iter().map(|b| b ^ 0x5c).collect::<Vec<_>>()[..]);
        assert!(signature.outer_pad()[20..].iter().all(|b| *b == 0x5c));
        assert_eq!(hex_sha1(&key, HMAC_EXAMPLE), hex_sha1(&hashed_key, HMAC_EXAMPLE));
    }

    #[test]
    fn test_reset_reuses_key() {
        let mut signature = Signature::<MD5Hash>::new(b"Jefe");
        signature.update(b"some unrelated data");
        signature.reset();
        signature.update(b"what do ya want ");
        signature.update(b"for nothing?");

        assert_eq!(signature.finish_hex(), "750c783e6ab0b503eaa86e310a5db738");
        // finishing leaves the running state alone
        assert_eq!(signature.finish_hex(), "750c783e6ab0b503eaa86e310a5db738");
    }

    proptest! {
        #[test]
        fn test_reset_matches_fresh_context(key in proptest::collection::vec(any::<u8>(), 0..150),
                                            first in proptest::collection::vec(any::<u8>(), 0..150),
                                            message in proptest::collection::vec(any::<u8>(), 0..150)) {
            let mut reused = Signature::<SHA1Hash>::new(&key);
            reused.update(&first);
            reused.reset();
            reused.update(&message);

            let mut fresh = Signature::<SHA1Hash>::new(&key);
            fresh.update(&message);

            prop_assert_eq!(reused.finish(), fresh.finish());
        }

        #[test]
        fn test_encoded_lengths(key in proptest::collection::vec(any::<u8>(), 0..100),
                                message in proptest::collection::vec(any::<u8>(), 0..100)) {
            prop_assert_eq!(compute_signature_for_data::<MD5Hash>(SignatureEncoding::Hex, &key, &message).len(), 32);
            prop_assert_eq!(compute_signature_for_data::<SHA1Hash>(SignatureEncoding::Hex, &key, &message).len(), 40);
            prop_assert_eq!(compute_signature_for_data::<MD5Hash>(SignatureEncoding::Base64, &key, &message).len(), 24);
            prop_assert_eq!(compute_signature_for_data::<SHA1Hash>(SignatureEncoding::Base64, &key, &message).len(), 28);
        }

        #[test]
        fn test_chunked_update(message in proptest::collection::vec(any::<u8>(), 0..300),
                               chunk_size in 1usize..70) {
            let mut signature = Signature::<MD5Hash>::new(b"chunked");
            for chunk in message.chunks(chunk_size) {
                signature.update(chunk);
            }

            prop_assert_eq!(signature.finish(), hmac::<MD5Hash>(b"chunked", &message).to_vec());
        }
    }
}
