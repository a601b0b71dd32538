use crate::alphabet::{value_of, ALPHABET_SIZE};
use crate::buffer::OutputBuffer;
use crate::codec::{max_decoded_len, CodecError, State};

const BASE: u32 = ALPHABET_SIZE as u32;

/// Struct for decoding basE91 symbols back into bytes
///
/// Symbols are consumed in pairs; a chunk passed to [`Decoder::update`] may end between the
/// two halves of a pair, in which case the first half is held until the next chunk. Call
/// [`Decoder::finish`] at the end of the stream to resolve a lone trailing symbol.
///
/// Bytes are appended to the given [`OutputBuffer`], after whatever it already holds.
#[derive(Debug, Default, Clone)]
pub struct Decoder {
    state: State,

    /// Value of the first symbol of a pair, waiting for its second half
    pending: Option<u8>,

    /// Number of symbols consumed since the stream started
    position: usize,
}

impl Decoder {
    /// Create a new [`Decoder`] at the start of a stream
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of symbols consumed since the start of the stream
    pub fn position(&self) -> usize {
        self.position
    }

    /// Decode a chunk of symbols, appending every complete byte to `output`.
    ///
    /// # Errors
    ///
    /// Fails with [`CodecError::InvalidSymbol`] on the first byte that is not in the
    /// alphabet. Bytes decoded from the symbols before it have already been appended.
    pub fn update(&mut self, input: &[u8], output: &mut OutputBuffer) -> Result<(), CodecError> {
        output.reserve(max_decoded_len(input.len()));
        for &symbol in input {
            let value = match value_of(symbol) {
                Some(value) => value,
                None => {
                    log::debug!(
                        "rejecting symbol {:#04x} at offset {}",
                        symbol,
                        self.position
                    );
                    return Err(CodecError::InvalidSymbol {
                        symbol,
                        offset: self.position,
                    });
                }
            };
            self.position += 1;

            match self.pending.take() {
                None => self.pending = Some(value),
                Some(first) => {
                    self.state
                        .push_group(u32::from(first) + u32::from(value) * BASE);
                    while self.state.count() >= 8 {
                        output.push(self.state.take_byte());
                    }
                }
            }
        }
        Ok(())
    }

    /// End the stream.
    ///
    /// A lone trailing symbol completes the final byte, the same way the encoder produced it.
    /// Any other leftover bits are flush padding and are dropped. The decoder is ready for a
    /// new stream afterwards.
    pub fn finish(&mut self, output: &mut OutputBuffer) {
        if let Some(value) = self.pending.take() {
            let bits = self.state.bits() | u32::from(value) << self.state.count();
            output.push((bits & 0xFF) as u8);
        }
        self.state.clear();
        self.position = 0;
    }

    /// Decode `input` as one complete stream
    ///
    /// # Errors
    ///
    /// See [`Decoder::update`].
    pub fn decode_all(&mut self, input: &[u8], output: &mut OutputBuffer) -> Result<(), CodecError> {
        self.update(input, output)?;
        self.finish(output);
        Ok(())
    }
}
