#![warn(missing_docs)]

use std::io;
use thiserror::Error;

/// basE91 stream decoder
pub mod decoder;

/// basE91 stream encoder
pub mod encoder;

/// One-call-per-record adapter with a reused output buffer
pub mod record;

/// Values below or equal to this in the low 13 bits of a group are widened to 14 bits
pub(crate) const WIDEN_THRESHOLD: u32 = 88;

const MASK_13: u32 = (1 << 13) - 1;
const MASK_14: u32 = (1 << 14) - 1;

/// Errors that can occur while decoding (or writing out) basE91 data
#[derive(Error, Debug)]
pub enum CodecError {
    /// A byte that is not one of the 91 symbols
    #[error("invalid symbol {symbol:#04x} at offset {offset}")]
    InvalidSymbol {
        /// The offending byte
        symbol: u8,
        /// Its position in the symbol stream, counted from the start of the stream
        offset: usize,
    },

    /// IO error when writing the output somewhere else
    #[error("IO error")]
    IoError(#[from] io::Error),
}

/// The bit accumulator shared by the encoder and decoder.
///
/// Bits are stored least significant first. Never more than 21 bits are live: the encoder
/// drains down to at most 13 before taking another byte, and the decoder drains down to at
/// most 7 before taking another 14-bit group.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct State {
    bits: u32,
    count: u32,
}

impl State {
    /// Number of valid bits currently held
    #[inline]
    pub(crate) fn count(&self) -> u32 {
        self.count
    }

    /// The valid bits, zero-extended
    #[inline]
    pub(crate) fn bits(&self) -> u32 {
        self.bits
    }

    #[inline]
    pub(crate) fn push_byte(&mut self, byte: u8) {
        self.bits |= u32::from(byte) << self.count;
        self.count += 8;
    }

    /// Take the next 13- or 14-bit group off the bottom of the accumulator.
    ///
    /// Only call with more than 13 valid bits.
    #[inline]
    pub(crate) fn take_group(&mut self) -> u32 {
        debug_assert!(self.count > 13);
        let value = self.bits & MASK_13;
        if value > WIDEN_THRESHOLD {
            self.bits >>= 13;
            self.count -= 13;
            value
        } else {
            let value = self.bits & MASK_14;
            self.bits >>= 14;
            self.count -= 14;
            value
        }
    }

    /// Insert a decoded group, using the same width the encoder chose for it
    #[inline]
    pub(crate) fn push_group(&mut self, value: u32) {
        self.bits |= value << self.count;
        self.count += if value & MASK_13 > WIDEN_THRESHOLD {
            13
        } else {
            14
        };
    }

    /// Take the next whole byte. Only call with at least 8 valid bits.
    #[inline]
    pub(crate) fn take_byte(&mut self) -> u8 {
        debug_assert!(self.count >= 8);
        let byte = (self.bits & 0xFF) as u8;
        self.bits >>= 8;
        self.count -= 8;
        byte
    }

    #[inline]
    pub(crate) fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Upper bound on the number of symbols produced when encoding `len` bytes.
///
/// Every pair of symbols carries at least 13 bits, and a trailing partial group costs at
/// most two symbols.
pub const fn max_encoded_len(len: usize) -> usize {
    2 * ((len * 8 + 12) / 13)
}

/// Upper bound on the number of bytes produced when decoding `len` symbols
pub const fn max_decoded_len(len: usize) -> usize {
    len * 7 / 8 + 1
}
