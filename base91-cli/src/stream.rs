use anyhow::Context;
use base91_codec_core::{max_encoded_len, Decoder, Encoder, OutputBuffer};
use std::io;
use std::io::{Read, Write};

/// Byte counts for one run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Totals {
    pub bytes_in: u64,
    pub bytes_out: u64,
}

/// Breaks the symbol stream into lines of `width` symbols. A width of 0 disables wrapping.
struct LineWrapper {
    width: usize,
    column: usize,
}

impl LineWrapper {
    fn new(width: usize) -> Self {
        Self { width, column: 0 }
    }

    fn write<W: Write>(&mut self, mut symbols: &[u8], writer: &mut W) -> io::Result<()> {
        if self.width == 0 {
            return writer.write_all(symbols);
        }
        while !symbols.is_empty() {
            if self.column == self.width {
                writer.write_all(b"\n")?;
                self.column = 0;
            }
            let take = symbols.len().min(self.width - self.column);
            writer.write_all(&symbols[..take])?;
            self.column += take;
            symbols = &symbols[take..];
        }
        Ok(())
    }

    /// Terminate the last line
    fn finish<W: Write>(&mut self, writer: &mut W) -> io::Result<()> {
        if self.width > 0 && self.column > 0 {
            writer.write_all(b"\n")?;
            self.column = 0;
        }
        Ok(())
    }
}

fn read_chunk<R: Read>(reader: &mut R, chunk: &mut [u8]) -> io::Result<usize> {
    loop {
        match reader.read(chunk) {
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            result => return result,
        }
    }
}

/// Encode everything `reader` yields, `chunk_size` bytes at a time
pub fn encode_stream<R: Read, W: Write>(
    mut reader: R,
    mut writer: W,
    chunk_size: usize,
    wrap: usize,
) -> anyhow::Result<Totals> {
    let mut chunk = vec![0; chunk_size];
    let mut buffer = OutputBuffer::with_capacity(max_encoded_len(chunk_size) + 2);
    let mut encoder = Encoder::new();
    let mut wrapper = LineWrapper::new(wrap);
    let mut totals = Totals::default();

    loop {
        let n = read_chunk(&mut reader, &mut chunk).context("read input")?;
        if n == 0 {
            break;
        }
        totals.bytes_in += n as u64;

        buffer.reset();
        encoder.update(&chunk[..n], &mut buffer);
        wrapper
            .write(buffer.as_slice(), &mut writer)
            .context("write output")?;
        totals.bytes_out += buffer.len() as u64;
    }

    buffer.reset();
    encoder.finish(&mut buffer);
    wrapper
        .write(buffer.as_slice(), &mut writer)
        .context("write output")?;
    totals.bytes_out += buffer.len() as u64;
    wrapper.finish(&mut writer).context("write output")?;
    writer.flush().context("flush output")?;

    log::debug!("encoded {} bytes into {} symbols", totals.bytes_in, totals.bytes_out);
    Ok(totals)
}

/// Decode everything `reader` yields. Line breaks are skipped; any other byte outside the
/// alphabet aborts the run.
pub fn decode_stream<R: Read, W: Write>(
    mut reader: R,
    mut writer: W,
    chunk_size: usize,
) -> anyhow::Result<Totals> {
    let mut chunk = vec![0; chunk_size];
    let mut symbols = Vec::with_capacity(chunk_size);
    let mut buffer = OutputBuffer::with_capacity(chunk_size);
    let mut decoder = Decoder::new();
    let mut totals = Totals::default();

    loop {
        let n = read_chunk(&mut reader, &mut chunk).context("read input")?;
        if n == 0 {
            break;
        }
        symbols.clear();
        symbols.extend(
            chunk[..n]
                .iter()
                .copied()
                .filter(|&b| b != b'\n' && b != b'\r'),
        );
        totals.bytes_in += symbols.len() as u64;

        buffer.reset();
        decoder
            .update(&symbols, &mut buffer)
            .context("decode input")?;
        buffer.write_to(&mut writer).context("write output")?;
        totals.bytes_out += buffer.len() as u64;
    }

    buffer.reset();
    decoder.finish(&mut buffer);
    buffer.write_to(&mut writer).context("write output")?;
    totals.bytes_out += buffer.len() as u64;
    writer.flush().context("flush output")?;

    log::debug!("decoded {} symbols into {} bytes", totals.bytes_in, totals.bytes_out);
    Ok(totals)
}
