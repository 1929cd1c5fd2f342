//! Input/output helpers
//!
//! Opens annotation and sequence inputs with transparent gzip/bzip2
//! decompression, memory-maps large plain files, and provides a line
//! iterator that reuses its buffer.

use memmap2::Mmap;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Read};
use std::path::Path;

/// Default buffer size for readers and writers (128KB)
pub const DEFAULT_BUFFER_SIZE: usize = 128 * 1024;

/// Threshold above which plain inputs are memory-mapped (100MB)
pub const MMAP_THRESHOLD: u64 = 100 * 1024 * 1024;

/// Compression format of an input file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionFormat {
    /// Plain text (uncompressed)
    Plain,
    /// Gzip or BGZF compressed (.gz)
    Gzip,
    /// Bzip2 compressed (.bz2)
    Bzip2,
}

/// Detect compression from the file extension, then from magic bytes
///
/// - gzip: `.gz` or `1f 8b`
/// - bzip2: `.bz2` or `BZh`
pub fn detect_compression(path: &Path) -> io::Result<CompressionFormat> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    if extension == "gz" {
        return Ok(CompressionFormat::Gzip);
    }
    if extension == "bz2" {
        return Ok(CompressionFormat::Bzip2);
    }

    let mut file = File::open(path)?;
    let mut magic = [0u8; 3];
    let bytes_read = file.read(&mut magic)?;

    if bytes_read >= 2 && magic[0] == 0x1f && magic[1] == 0x8b {
        return Ok(CompressionFormat::Gzip);
    }
    if bytes_read >= 3 && &magic == b"BZh" {
        return Ok(CompressionFormat::Bzip2);
    }
    Ok(CompressionFormat::Plain)
}

/// Plain input mapped into memory, read front to back
struct MappedFile {
    map: Mmap,
    offset: usize,
}

impl MappedFile {
    fn open(file: &File) -> io::Result<Self> {
        // SAFETY: inputs are not modified while a scan is running
        let map = unsafe { Mmap::map(file)? };
        Ok(Self { map, offset: 0 })
    }
}

impl Read for MappedFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = (&self.map[self.offset..]).read(buf)?;
        self.offset += n;
        Ok(n)
    }
}

impl BufRead for MappedFile {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        Ok(&self.map[self.offset..])
    }

    fn consume(&mut self, amt: usize) {
        self.offset = (self.offset + amt).min(self.map.len());
    }
}

/// Uncompressed input: buffered below [`MMAP_THRESHOLD`], mapped at or above it
enum PlainInput {
    Buffered(BufReader<File>),
    Mapped(MappedFile),
}

impl PlainInput {
    fn open(path: &Path) -> io::Result<Self> {
        let file = File::open(path)?;
        if file.metadata()?.len() >= MMAP_THRESHOLD {
            return Ok(PlainInput::Mapped(MappedFile::open(&file)?));
        }
        Ok(PlainInput::Buffered(BufReader::with_capacity(
            DEFAULT_BUFFER_SIZE,
            file,
        )))
    }
}

impl Read for PlainInput {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            PlainInput::Buffered(inner) => inner.read(buf),
            PlainInput::Mapped(inner) => inner.read(buf),
        }
    }
}

impl BufRead for PlainInput {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        match self {
            PlainInput::Buffered(inner) => inner.fill_buf(),
            PlainInput::Mapped(inner) => inner.fill_buf(),
        }
    }

    fn consume(&mut self, amt: usize) {
        match self {
            PlainInput::Buffered(inner) => inner.consume(amt),
            PlainInput::Mapped(inner) => inner.consume(amt),
        }
    }
}

/// Open an input file, decompressing gzip/bzip2 transparently
pub fn open_input<P: AsRef<Path>>(path: P) -> io::Result<Box<dyn BufRead>> {
    let path = path.as_ref();
    match detect_compression(path)? {
        CompressionFormat::Gzip => {
            // Multi-member decoder so BGZF files read past the first block
            let decoder = flate2::read::MultiGzDecoder::new(File::open(path)?);
            Ok(Box::new(BufReader::with_capacity(DEFAULT_BUFFER_SIZE, decoder)))
        }
        CompressionFormat::Bzip2 => {
            let decoder = bzip2::read::BzDecoder::new(File::open(path)?);
            Ok(Box::new(BufReader::with_capacity(DEFAULT_BUFFER_SIZE, decoder)))
        }
        CompressionFormat::Plain => Ok(Box::new(PlainInput::open(path)?)),
    }
}

/// Create an output file behind a large write buffer
pub fn create_output<P: AsRef<Path>>(path: P) -> io::Result<BufWriter<File>> {
    let file = File::create(path)?;
    Ok(BufWriter::with_capacity(DEFAULT_BUFFER_SIZE, file))
}

/// Line iterator that reuses a buffer to avoid allocations
pub struct LineIterator<R: BufRead> {
    reader: R,
    buffer: String,
}

impl<R: BufRead> LineIterator<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: String::with_capacity(1024),
        }
    }

    /// Read the next line into the internal buffer
    /// Returns None at EOF, Some(Ok(&str)) on success, Some(Err) on error
    pub fn next_line(&mut self) -> Option<io::Result<&str>> {
        self.buffer.clear();
        match self.reader.read_line(&mut self.buffer) {
            Ok(0) => None,
            Ok(_) => {
                if self.buffer.ends_with('\n') {
                    self.buffer.pop();
                    if self.buffer.ends_with('\r') {
                        self.buffer.pop();
                    }
                }
                Some(Ok(&self.buffer))
            }
            Err(e) => Some(Err(e)),
        }
    }
}
