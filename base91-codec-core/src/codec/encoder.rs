use crate::alphabet::{symbol_unchecked, ALPHABET_SIZE};
use crate::buffer::OutputBuffer;
use crate::codec::{max_encoded_len, State};

const BASE: u32 = ALPHABET_SIZE as u32;

/// Struct for encoding bytes into basE91 symbols
///
/// The encoder only holds the bits that have not yet been turned into symbols, so input
/// may be fed in arbitrary chunks with [`Encoder::update`]. The symbols are identical to
/// encoding the concatenated input in one go. Call [`Encoder::finish`] once at the end of
/// the input to flush the remaining bits.
///
/// Symbols are appended to the given [`OutputBuffer`]. Nothing already in the buffer is
/// read or overwritten; reset it first if you want only this stream's output.
#[derive(Debug, Default, Clone)]
pub struct Encoder {
    state: State,
}

impl Encoder {
    /// Create a new [`Encoder`] with an empty bit accumulator
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of input bits waiting for [`Encoder::update`] or [`Encoder::finish`] to emit them
    pub fn pending_bits(&self) -> u32 {
        self.state.count()
    }

    /// Encode a chunk of input, appending the symbols for every complete group to `output`
    pub fn update(&mut self, input: &[u8], output: &mut OutputBuffer) {
        output.reserve(max_encoded_len(input.len()));
        for &byte in input {
            self.state.push_byte(byte);
            while self.state.count() > 13 {
                let value = self.state.take_group();
                emit_pair(value, output);
            }
        }
    }

    /// Flush the bits left over after the last [`Encoder::update`].
    ///
    /// Emits nothing if no bits are pending, one symbol if they fit in one, otherwise two.
    /// The encoder is ready for a new stream afterwards.
    pub fn finish(&mut self, output: &mut OutputBuffer) {
        let count = self.state.count();
        if count > 0 {
            let bits = self.state.bits();
            output.push(symbol_unchecked(bits % BASE));
            if count > 7 || bits >= BASE {
                output.push(symbol_unchecked(bits / BASE));
            }
        }
        self.state.clear();
    }

    /// Encode `input` as one complete stream
    pub fn encode_all(&mut self, input: &[u8], output: &mut OutputBuffer) {
        self.update(input, output);
        self.finish(output);
    }
}

#[inline]
fn emit_pair(value: u32, output: &mut OutputBuffer) {
    output.push(symbol_unchecked(value % BASE));
    output.push(symbol_unchecked(value / BASE));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(input: &[u8]) -> Vec<u8> {
        let mut output = OutputBuffer::new();
        Encoder::new().encode_all(input, &mut output);
        output.into_vec()
    }

    #[test]
    fn empty_input() {
        assert_eq!(encode(&[]), b"");
    }

    #[test]
    fn known_vectors() {
        assert_eq!(encode(b"test"), b"fPNKd");
        assert_eq!(encode(b"Hello, World!"), b">OwJh>}AQ;r@@Y?F");
        assert_eq!(encode(&[0x00]), b"AA");
        assert_eq!(encode(&[0xFF, 0x00, 0xFF]), b"/CmW");
    }

    #[test]
    fn one_symbol_flush() {
        // "ab" leaves 3 bits (0b011) after the first group, so the flush fits in one symbol
        assert_eq!(encode(b"ab"), b"#GD");
    }

    #[test]
    fn at_most_thirteen_bits_stay_pending() {
        let mut encoder = Encoder::new();
        let mut output = OutputBuffer::new();
        for byte in 0..=255u8 {
            encoder.update(&[byte], &mut output);
            assert!(encoder.pending_bits() <= 13);
        }
        encoder.finish(&mut output);
        assert_eq!(encoder.pending_bits(), 0);
    }

    #[test]
    fn appends_after_existing_content() {
        let mut output = OutputBuffer::new();
        output.append(b"prefix:");
        Encoder::new().encode_all(b"test", &mut output);
        assert_eq!(output.as_slice(), b"prefix:fPNKd");
    }

    #[test]
    fn finish_resets_for_next_stream() {
        let mut encoder = Encoder::new();
        let mut output = OutputBuffer::new();
        encoder.encode_all(b"Hello", &mut output);
        output.reset();
        encoder.encode_all(b"test", &mut output);
        assert_eq!(output.as_slice(), b"fPNKd");
    }

    #[test]
    fn chunked_matches_one_shot() {
        let input: Vec<u8> = (0..=255u8).cycle().take(1000).collect();
        let expected = encode(&input);
        for chunk_size in [1, 2, 3, 7, 13, 64, 999] {
            let mut encoder = Encoder::new();
            let mut output = OutputBuffer::new();
            for chunk in input.chunks(chunk_size) {
                encoder.update(chunk, &mut output);
            }
            encoder.finish(&mut output);
            assert_eq!(output.as_slice(), expected.as_slice(), "chunk size {chunk_size}");
        }
    }
}
