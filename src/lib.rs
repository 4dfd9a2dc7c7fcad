//! Implementation of the chained byte-mixer stream cipher.
//!
//! The construction is a byte-granular [self-synchronizing stream cipher][1]:
//! each output byte is produced by XORing the input byte, bit by bit, against
//! bits selected from the previous *ciphertext* byte (the IV before the first
//! byte), with the per-bit selection policy driven by an evolving keystream
//! counter derived from the key. Because the feedback value is always the
//! ciphertext byte, in both directions, decryption is the exact inverse of
//! encryption.
//!
//! Cipher functionality is accessed using traits from the re-exported
//! [`cipher`] crate.
//!
//! # ⚠️ Security Warning: Hazmat!
//!
//! This cipher provides no real cryptographic strength: the key, IV and
//! counter are single bytes and the mixing is a fixed bit permutation plus
//! XOR. It exists for byte-exact interoperability with an existing transform,
//! not for protecting data. It also does not ensure ciphertexts are
//! authentic.
//!
//! USE AT YOUR OWN RISK!
//!
//! # Example
//! ```
//! use chainmix::{Decryptor, Encryptor};
//! use chainmix::cipher::{AsyncStreamCipher, KeyIvInit};
//! use hex_literal::hex;
//!
//! let key = [0xCB];
//! // iv[0] seeds the ciphertext chain, iv[1] seeds the counter.
//! let iv = [0xB1, 0x35];
//!
//! let mut buf = *b"Hi!";
//! Encryptor::new(&key.into(), &iv.into()).encrypt(&mut buf);
//! assert_eq!(buf, hex!("F9F6CF"));
//!
//! Decryptor::new(&key.into(), &iv.into()).decrypt(&mut buf);
//! assert_eq!(&buf, b"Hi!");
//! ```
//!
//! [1]: https://en.wikipedia.org/wiki/Stream_cipher#Self-synchronizing_stream_ciphers

#![no_std]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub use cipher;

use cipher::{
    consts::{U1, U2},
    inout::InOut,
    AlgorithmName, AsyncStreamCipher, Block, BlockBackend, BlockClosure, BlockDecryptMut,
    BlockEncryptMut, BlockSizeUser, IvSizeUser, KeyIvInit, KeySizeUser, ParBlocksSizeUser,
};
use core::fmt;

#[cfg(feature = "zeroize")]
use cipher::zeroize::{Zeroize, ZeroizeOnDrop};

mod dump;

pub use dump::HexDump;

const BYTE_BITS: u32 = 8;

/// Chained byte-mixer key: the single mixing secret byte.
pub type Key = cipher::Key<Encryptor>;

/// Chained byte-mixer initialization vector: chain seed byte followed by
/// counter seed byte.
pub type Iv = cipher::Iv<Encryptor>;

/// Returns bit `n` of `b` (0 or 1). Out-of-range indices read as 0.
fn get_bit(b: u8, n: u32) -> u8 {
    if n < BYTE_BITS {
        (b >> n) & 1
    } else {
        0
    }
}

/// Returns `b` with bit `n` forced to 1. Out-of-range indices are a no-op.
fn set_bit(b: u8, n: u32) -> u8 {
    if n < BYTE_BITS {
        b | (1 << n)
    } else {
        b
    }
}

/// Returns `b` with bit `n` forced to 0. Out-of-range indices are a no-op.
fn clear_bit(b: u8, n: u32) -> u8 {
    if n < BYTE_BITS {
        b & !(1 << n)
    } else {
        b
    }
}

/// Derives the keystream counter actually used by the byte mixer.
///
/// Every second bit position, starting at 0 for an even `ctr` and 1 for an
/// odd one, becomes `ctr_bit XOR key_bit`; the remaining positions copy
/// through from `ctr` unchanged.
fn next_keystream_counter(ctr: u8, key: u8) -> u8 {
    let start = u32::from(ctr & 1);
    let mut out = ctr;
    for i in (start..BYTE_BITS).step_by(2) {
        if get_bit(ctr, i) ^ get_bit(key, i) == 1 {
            out = set_bit(out, i);
        } else {
            out = clear_bit(out, i);
        }
    }
    out
}

/// Mixes one byte against the chain byte under the counter's selection
/// policy.
///
/// For each bit position the mask bit comes from the chain byte: the same
/// position when the counter bit is 1, the mirror position `7 - i` when it
/// is 0. XOR of the input bit with the mask bit yields the output bit, so
/// the function is its own inverse for a fixed `ctr`/`chain` pair.
fn mix_byte(x: u8, ctr: u8, chain: u8) -> u8 {
    let mut out = 0;
    for i in 0..BYTE_BITS {
        let chain_bit = if get_bit(ctr, i) == 1 {
            get_bit(chain, i)
        } else {
            get_bit(chain, (BYTE_BITS - 1) - i)
        };
        if get_bit(x, i) ^ chain_bit == 1 {
            out = set_bit(out, i);
        }
    }
    out
}

/// Working state threaded across byte positions.
#[derive(Clone)]
struct State {
    key: u8,
    /// Previous ciphertext byte; the chain seed before the first byte.
    chain: u8,
    /// Keystream counter for the next byte, already run through
    /// [`next_keystream_counter`].
    ctr: u8,
}

impl State {
    fn new(key: u8, chain_seed: u8, ctr_seed: u8) -> Self {
        Self {
            key,
            chain: chain_seed,
            ctr: next_keystream_counter(ctr_seed, key),
        }
    }

    fn encrypt_byte(&mut self, pt: u8) -> u8 {
        let ct = mix_byte(pt, self.ctr, self.chain);
        self.advance(ct);
        ct
    }

    fn decrypt_byte(&mut self, ct: u8) -> u8 {
        let pt = mix_byte(ct, self.ctr, self.chain);
        self.advance(ct);
        pt
    }

    /// `ct` must be the ciphertext byte in both directions; chaining the
    /// recovered plaintext would break the inverse property.
    fn advance(&mut self, ct: u8) {
        self.chain = ct;
        self.ctr = next_keystream_counter(self.ctr.wrapping_add(1), self.key);
    }
}

#[cfg(feature = "zeroize")]
#[cfg_attr(docsrs, doc(cfg(feature = "zeroize")))]
impl Drop for State {
    fn drop(&mut self) {
        self.key.zeroize();
        self.chain.zeroize();
        self.ctr.zeroize();
    }
}

/// Chained byte-mixer encryptor.
#[derive(Clone)]
pub struct Encryptor {
    state: State,
}

/// Chained byte-mixer decryptor.
#[derive(Clone)]
pub struct Decryptor {
    state: State,
}

impl KeySizeUser for Encryptor {
    type KeySize = U1;
}

impl IvSizeUser for Encryptor {
    type IvSize = U2;
}

impl KeyIvInit for Encryptor {
    fn new(key: &cipher::Key<Self>, iv: &cipher::Iv<Self>) -> Self {
        Self {
            state: State::new(key[0], iv[0], iv[1]),
        }
    }
}

impl BlockSizeUser for Encryptor {
    type BlockSize = U1;
}

impl BlockEncryptMut for Encryptor {
    fn encrypt_with_backend_mut(&mut self, f: impl BlockClosure<BlockSize = U1>) {
        f.call(&mut EncBackend(&mut self.state));
    }
}

impl AsyncStreamCipher for Encryptor {}

impl AlgorithmName for Encryptor {
    fn write_alg_name(f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("chainmix::Encryptor")
    }
}

impl fmt::Debug for Encryptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("chainmix::Encryptor { ... }")
    }
}

#[cfg(feature = "zeroize")]
#[cfg_attr(docsrs, doc(cfg(feature = "zeroize")))]
impl ZeroizeOnDrop for Encryptor {}

impl KeySizeUser for Decryptor {
    type KeySize = U1;
}

impl IvSizeUser for Decryptor {
    type IvSize = U2;
}

impl KeyIvInit for Decryptor {
    fn new(key: &cipher::Key<Self>, iv: &cipher::Iv<Self>) -> Self {
        Self {
            state: State::new(key[0], iv[0], iv[1]),
        }
    }
}

impl BlockSizeUser for Decryptor {
    type BlockSize = U1;
}

impl BlockDecryptMut for Decryptor {
    fn decrypt_with_backend_mut(&mut self, f: impl BlockClosure<BlockSize = U1>) {
        f.call(&mut DecBackend(&mut self.state));
    }
}

impl AsyncStreamCipher for Decryptor {}

impl AlgorithmName for Decryptor {
    fn write_alg_name(f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("chainmix::Decryptor")
    }
}

impl fmt::Debug for Decryptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("chainmix::Decryptor { ... }")
    }
}

#[cfg(feature = "zeroize")]
#[cfg_attr(docsrs, doc(cfg(feature = "zeroize")))]
impl ZeroizeOnDrop for Decryptor {}

struct EncBackend<'a>(&'a mut State);

impl BlockSizeUser for EncBackend<'_> {
    type BlockSize = U1;
}

impl ParBlocksSizeUser for EncBackend<'_> {
    type ParBlocksSize = U1;
}

impl BlockBackend for EncBackend<'_> {
    #[inline(always)]
    fn proc_block(&mut self, mut block: InOut<'_, '_, Block<Self>>) {
        let ct = self.0.encrypt_byte(block.get_in()[0]);
        block.get_out()[0] = ct;
    }
}

struct DecBackend<'a>(&'a mut State);

impl BlockSizeUser for DecBackend<'_> {
    type BlockSize = U1;
}

impl ParBlocksSizeUser for DecBackend<'_> {
    type ParBlocksSize = U1;
}

impl BlockBackend for DecBackend<'_> {
    #[inline(always)]
    fn proc_block(&mut self, mut block: InOut<'_, '_, Block<Self>>) {
        let pt = self.0.decrypt_byte(block.get_in()[0]);
        block.get_out()[0] = pt;
    }
}
