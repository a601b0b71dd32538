use crate::buffer::OutputBuffer;
use crate::codec::decoder::Decoder;
use crate::codec::encoder::Encoder;
use crate::codec::CodecError;

/// Initial buffer size for a [`RecordCodec`]
pub const RECORD_BUFFER_CAPACITY: usize = 4096;

/// Encodes or decodes one record at a time, reusing a single output buffer.
///
/// Meant for batch jobs which call the codec once per row: the buffer is reset (not
/// reallocated) before every record, and the result is handed back as a view into it.
/// The view borrows the codec, so it has to be dropped (or copied) before the next record.
///
/// A `None` record is passed through as `None` without touching the buffer.
#[derive(Debug, Clone)]
pub struct RecordCodec {
    buffer: OutputBuffer,
    records: u64,
}

impl Default for RecordCodec {
    fn default() -> Self {
        Self::with_capacity(RECORD_BUFFER_CAPACITY)
    }
}

impl RecordCodec {
    /// Create a codec with a [`RECORD_BUFFER_CAPACITY`] byte buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a codec with a buffer of the given initial size
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: OutputBuffer::with_capacity(capacity),
            records: 0,
        }
    }

    /// Number of non-null records processed so far
    pub fn records(&self) -> u64 {
        self.records
    }

    /// The underlying buffer, holding the result of the last record
    pub fn buffer(&self) -> &OutputBuffer {
        &self.buffer
    }

    /// Encode one binary record into basE91 text
    pub fn base91(&mut self, record: Option<&[u8]>) -> Option<&[u8]> {
        let record = record?;
        self.buffer.reset();
        Encoder::new().encode_all(record, &mut self.buffer);
        self.records += 1;
        Some(self.buffer.as_slice())
    }

    /// Decode one basE91 text record back into binary
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InvalidSymbol`] if the record contains a byte outside the
    /// alphabet. The offset in the error is relative to the start of the record.
    pub fn unbase91(&mut self, record: Option<&[u8]>) -> Result<Option<&[u8]>, CodecError> {
        let Some(record) = record else {
            return Ok(None);
        };
        self.buffer.reset();
        Decoder::new().decode_all(record, &mut self.buffer)?;
        self.records += 1;
        Ok(Some(self.buffer.as_slice()))
    }
}
