use crate::codec::CodecError;
use std::io;
use std::io::Write;

/// Initial capacity of [`OutputBuffer::new`]
pub const DEFAULT_CAPACITY: usize = 32;

/// A growable, reusable byte buffer that the encoder and decoder write into.
///
/// The buffer **accumulates unless reset**: every encode/decode call appends after the
/// current logical length. A caller that processes many independent records keeps one
/// buffer alive, calls [`OutputBuffer::reset`] before each record, and reads the result
/// back with [`OutputBuffer::as_slice`] (borrowed) or [`OutputBuffer::to_vec`] (copied).
/// Resetting keeps the allocation, so a warmed-up buffer does not reallocate again.
///
/// When capacity runs out, the storage is reallocated to at least twice its current size.
#[derive(Clone, Debug)]
pub struct OutputBuffer {
    /// Backing storage. Always fully initialized; `buf.len()` is the capacity.
    buf: Vec<u8>,

    /// Logical length. Never exceeds `buf.len()`.
    count: usize,
}

impl Default for OutputBuffer {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl OutputBuffer {
    /// Create a buffer with [`DEFAULT_CAPACITY`] bytes of storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a buffer with `capacity` bytes of storage
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: vec![0; capacity],
            count: 0,
        }
    }

    /// The number of bytes written since the last reset
    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    /// Have no bytes been written since the last reset?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// The size of the backing storage
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Discard the contents. The backing storage is kept for reuse.
    #[inline]
    pub fn reset(&mut self) {
        self.count = 0;
    }

    /// Make sure at least `additional` more bytes fit without growing again.
    pub fn reserve(&mut self, additional: usize) {
        let required = self.count.saturating_add(additional);
        if required > self.buf.len() {
            self.grow(required);
        }
    }

    fn grow(&mut self, min_capacity: usize) {
        let old_capacity = self.buf.len();
        let new_capacity = (old_capacity << 1).max(min_capacity);
        log::trace!(
            "growing output buffer from {} to {} bytes",
            old_capacity,
            new_capacity
        );
        // Vec::resize copies the existing bytes over when it has to reallocate
        self.buf.resize(new_capacity, 0);
    }

    /// Append a single byte
    #[inline]
    pub fn push(&mut self, byte: u8) {
        if self.count == self.buf.len() {
            self.grow(self.count + 1);
        }
        self.buf[self.count] = byte;
        self.count += 1;
    }

    /// Append a slice of bytes
    pub fn append(&mut self, bytes: &[u8]) {
        self.reserve(bytes.len());
        let end = self.count + bytes.len();
        self.buf[self.count..end].copy_from_slice(bytes);
        self.count = end;
    }

    /// Borrow the bytes written since the last reset
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.buf[..self.count]
    }

    /// Borrow the whole backing storage together with the logical length.
    ///
    /// Only the first `len` bytes are meaningful; anything after them is left over from
    /// earlier use. The view is tied to this borrow and so can't outlive the next
    /// `push`/`append`/`reset`.
    #[inline]
    pub fn internal_array(&self) -> (&[u8], usize) {
        (&self.buf, self.count)
    }

    /// Copy the bytes written since the last reset into a new `Vec`
    pub fn to_vec(&self) -> Vec<u8> {
        self.as_slice().to_vec()
    }

    /// Consume the buffer, returning its contents without copying
    pub fn into_vec(mut self) -> Vec<u8> {
        self.buf.truncate(self.count);
        self.buf
    }

    /// Write the contents to `writer`
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::IoError`] if the writer fails.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<(), CodecError> {
        writer.write_all(self.as_slice())?;
        Ok(())
    }
}

impl AsRef<[u8]> for OutputBuffer {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl Write for OutputBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.append(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
