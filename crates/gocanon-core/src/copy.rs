//! File copy with a reusable buffer and ordered error capture.
//!
//! The extractor opens one destination file per archive entry. Every handle
//! is scoped to a single call of [`copy_to_file`], so it is released on every
//! exit path. When both the copy and the final flush fail, the copy error is
//! the one reported.

use std::fs::File;
use std::fs::OpenOptions;
use std::io::BufWriter;
use std::io::Read;
use std::io::Write;
use std::io::{self};
use std::path::Path;

/// Buffer size for I/O operations (64KB).
const COPY_BUFFER_SIZE: usize = 64 * 1024;

/// Mode used for files whose archive entry records none.
pub const DEFAULT_FILE_MODE: u32 = 0o644;

/// Stack-allocated buffer reused across every entry of one extraction.
///
/// # Examples
///
/// ```no_run
/// # use gocanon_core::copy::{CopyBuffer, copy_with_buffer};
/// # fn example() -> std::io::Result<()> {
/// let mut buffer = CopyBuffer::new();
/// let mut input = std::fs::File::open("input.txt")?;
/// let mut output = std::fs::File::create("output.txt")?;
///
/// let bytes_copied = copy_with_buffer(&mut input, &mut output, &mut buffer)?;
/// println!("Copied {} bytes", bytes_copied);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct CopyBuffer {
    #[allow(clippy::large_stack_arrays)]
    buf: [u8; COPY_BUFFER_SIZE],
}

impl CopyBuffer {
    /// Creates a new zero-initialized copy buffer.
    #[inline]
    #[must_use]
    #[allow(clippy::large_stack_arrays)]
    pub fn new() -> Self {
        Self {
            buf: [0u8; COPY_BUFFER_SIZE],
        }
    }
}

impl Default for CopyBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Copies data from reader to writer using the provided buffer.
///
/// Interrupted reads are retried. Returns the number of bytes copied.
#[inline]
pub fn copy_with_buffer<R: Read + ?Sized, W: Write + ?Sized>(
    reader: &mut R,
    writer: &mut W,
    buffer: &mut CopyBuffer,
) -> io::Result<u64> {
    let mut total: u64 = 0;

    loop {
        let bytes_read = match reader.read(&mut buffer.buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };

        writer.write_all(&buffer.buf[..bytes_read])?;
        total += bytes_read as u64;
    }

    Ok(total)
}

/// Combines the result of an operation with the result of releasing its
/// resource. The first error wins: a release error is only surfaced when
/// the operation itself succeeded.
pub fn first_error<T>(primary: io::Result<T>, release: io::Result<()>) -> io::Result<T> {
    match (primary, release) {
        (Err(e), _) | (Ok(_), Err(e)) => Err(e),
        (Ok(value), Ok(())) => Ok(value),
    }
}

/// Streams `reader` into `path`, creating or truncating the file.
///
/// With `mode` set, the file is created with that mode and the mode is
/// applied again after writing so that pre-existing files and the process
/// umask do not change the result. Without it, the file is created with
/// [`DEFAULT_FILE_MODE`] (subject to umask) and an existing file keeps its
/// mode. On unix a symlink at `path` is never followed.
///
/// # Errors
///
/// Returns the first I/O error observed while opening, copying, flushing or
/// setting permissions.
pub fn copy_to_file<R: Read + ?Sized>(
    reader: &mut R,
    path: &Path,
    mode: Option<u32>,
    buffer: &mut CopyBuffer,
) -> io::Result<u64> {
    let file = open_truncated(path, mode.unwrap_or(DEFAULT_FILE_MODE))?;
    let written = stream_into(reader, file, buffer)?;

    #[cfg(unix)]
    if let Some(mode) = mode {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode))?;
    }

    Ok(written)
}

/// Copies `reader` into a buffered `writer`, then flushes and releases it.
///
/// A copy error takes precedence over a flush error.
fn stream_into<R: Read + ?Sized, W: Write>(
    reader: &mut R,
    writer: W,
    buffer: &mut CopyBuffer,
) -> io::Result<u64> {
    let mut writer = BufWriter::with_capacity(COPY_BUFFER_SIZE, writer);

    let copied = copy_with_buffer(reader, &mut writer, buffer);
    let released = writer
        .into_inner()
        .map_err(io::IntoInnerError::into_error)
        .and_then(|mut inner| inner.flush());
    first_error(copied, released)
}

#[cfg(unix)]
fn open_truncated(path: &Path, mode: u32) -> io::Result<File> {
    use std::os::unix::fs::OpenOptionsExt;

    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(mode)
        .custom_flags(libc::O_NOFOLLOW)
        .open(path)
}

#[cfg(not(unix))]
fn open_truncated(path: &Path, _mode: u32) -> io::Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
}
