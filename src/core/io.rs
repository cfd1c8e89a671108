//! Input/output plumbing
//!
//! Opens the variant file (plain, gzip or bzip2) behind a large buffer and
//! creates the buffered `.bed` writer next to it.

use super::error::{Result, Vcf2BedError};
use std::ffi::OsString;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

/// Default buffer size for readers and writers (128KB)
pub const DEFAULT_BUFFER_SIZE: usize = 128 * 1024;

/// Suffix appended to the input file name to form the output path
pub const OUTPUT_SUFFIX: &str = ".bed";

/// Compression format of the input file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionFormat {
    /// Plain text (uncompressed)
    Plain,
    /// Gzip compressed (.gz)
    Gzip,
    /// Bzip2 compressed (.bz2)
    Bzip2,
}

impl CompressionFormat {
    /// Classify by extension first, then by leading magic bytes
    fn classify(path: &Path, magic: &[u8]) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("gz") => return CompressionFormat::Gzip,
            Some("bz2") => return CompressionFormat::Bzip2,
            _ => {}
        }

        if magic.starts_with(&[0x1f, 0x8b]) {
            CompressionFormat::Gzip
        } else if magic.starts_with(b"BZh") {
            CompressionFormat::Bzip2
        } else {
            CompressionFormat::Plain
        }
    }
}

/// Detect compression format from file path and/or content
pub fn detect_compression(path: &Path) -> io::Result<CompressionFormat> {
    let mut file = File::open(path)?;
    let magic = read_magic(&mut file)?;
    Ok(CompressionFormat::classify(path, &magic))
}

fn read_magic(file: &mut File) -> io::Result<Vec<u8>> {
    let mut magic = Vec::with_capacity(3);
    file.by_ref().take(3).read_to_end(&mut magic)?;
    file.seek(SeekFrom::Start(0))?;
    Ok(magic)
}

/// Open the input file, transparently decompressing gzip/bzip2
pub fn open_input(path: &Path) -> Result<Box<dyn BufRead>> {
    let mut file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => Vcf2BedError::InputNotFound(path.to_path_buf()),
        _ => Vcf2BedError::Io(e),
    })?;
    let magic = read_magic(&mut file)?;
    let format = CompressionFormat::classify(path, &magic);
    log::debug!("Input {:?} detected as {:?}", path, format);

    let reader: Box<dyn BufRead> = match format {
        CompressionFormat::Gzip => {
            let decoder = flate2::read::MultiGzDecoder::new(file);
            Box::new(BufReader::with_capacity(DEFAULT_BUFFER_SIZE, decoder))
        }
        CompressionFormat::Bzip2 => {
            let decoder = bzip2::read::MultiBzDecoder::new(file);
            Box::new(BufReader::with_capacity(DEFAULT_BUFFER_SIZE, decoder))
        }
        CompressionFormat::Plain => Box::new(BufReader::with_capacity(DEFAULT_BUFFER_SIZE, file)),
    };
    Ok(reader)
}

/// Create (or truncate) the output file behind a buffered writer
pub fn create_output(path: &Path) -> io::Result<BufWriter<File>> {
    let file = File::create(path)?;
    Ok(BufWriter::with_capacity(DEFAULT_BUFFER_SIZE, file))
}

/// `<input>.bed`: the suffix is appended to the whole file name, so
/// `calls.vcf` becomes `calls.vcf.bed`
pub fn output_path_for(input: &Path) -> PathBuf {
    let mut name = OsString::from(input.as_os_str());
    name.push(OUTPUT_SUFFIX);
    PathBuf::from(name)
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
            Ok(0) => None, // EOF
            Ok(_) => {
                // Remove trailing newline
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
