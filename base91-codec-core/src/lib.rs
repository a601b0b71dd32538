//! # base91-codec-core
//!
//! Streaming basE91 binary-to-text encoding.
//!
//! basE91 packs 13 or 14 bits of input into every pair of printable ASCII symbols, for an
//! expansion of roughly 1.15x–1.23x (compared to 1.33x for base64). The alphabet is the
//! published basE91 table, so output is interchangeable with other basE91 tools.
//!
//! Everything writes into an [`OutputBuffer`], which **accumulates unless reset**. A caller
//! that runs the codec once per record keeps one buffer (or one [`RecordCodec`]) alive and
//! resets it between records, so a warmed-up buffer never reallocates.
//!
//! ```rust
//! use base91_codec_core::{decode, encode, OutputBuffer};
//!
//! let mut buffer = OutputBuffer::new();
//! encode(b"test", &mut buffer);
//! assert_eq!(buffer.as_slice(), b"fPNKd");
//!
//! let encoded = buffer.to_vec();
//! buffer.reset();
//! decode(&encoded, &mut buffer).unwrap();
//! assert_eq!(buffer.as_slice(), b"test");
//! ```
#![warn(missing_docs)]

pub mod alphabet;
mod buffer;
pub mod codec;

pub use buffer::{OutputBuffer, DEFAULT_CAPACITY};
pub use codec::decoder::Decoder;
pub use codec::encoder::Encoder;
pub use codec::record::{RecordCodec, RECORD_BUFFER_CAPACITY};
pub use codec::{max_decoded_len, max_encoded_len, CodecError};

/// Encode `input` as a complete basE91 stream, appending the symbols to `output`
pub fn encode(input: &[u8], output: &mut OutputBuffer) {
    Encoder::new().encode_all(input, output);
}

/// Decode a complete basE91 stream, appending the bytes to `output`
///
/// # Errors
///
/// Returns [`CodecError::InvalidSymbol`] if `input` contains a byte outside the alphabet.
pub fn decode(input: impl AsRef<[u8]>, output: &mut OutputBuffer) -> Result<(), CodecError> {
    Decoder::new().decode_all(input.as_ref(), output)
}

/// Encode `input` into a newly allocated `Vec` of symbols
pub fn encode_to_vec(input: &[u8]) -> Vec<u8> {
    let mut output = OutputBuffer::with_capacity(max_encoded_len(input.len()));
    encode(input, &mut output);
    output.into_vec()
}

/// Encode `input` into a newly allocated `String`
pub fn encode_to_string(input: &[u8]) -> String {
    // Every symbol is ASCII
    encode_to_vec(input).into_iter().map(char::from).collect()
}

/// Decode `input` into a newly allocated `Vec`
///
/// # Errors
///
/// Returns [`CodecError::InvalidSymbol`] if `input` contains a byte outside the alphabet.
pub fn decode_to_vec(input: impl AsRef<[u8]>) -> Result<Vec<u8>, CodecError> {
    let input = input.as_ref();
    let mut output = OutputBuffer::with_capacity(max_decoded_len(input.len()));
    decode(input, &mut output)?;
    Ok(output.into_vec())
}
