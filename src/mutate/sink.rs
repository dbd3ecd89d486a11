//! Append-line output sinks

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{PsudohashError, Result};
use crate::types::SizeEstimate;

/// Sequential append-only destination for generated mutations
pub trait LineSink {
    /// Append one mutation as a line
    fn write_line(&mut self, line: &str) -> Result<()>;

    /// Push buffered lines to the backing store
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

impl<S: LineSink + ?Sized> LineSink for &mut S {
    fn write_line(&mut self, line: &str) -> Result<()> {
        (**self).write_line(line)
    }

    fn flush(&mut self) -> Result<()> {
        (**self).flush()
    }
}

/// Buffered UTF-8 text file, one `\n`-terminated mutation per line
pub struct FileSink {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl FileSink {
    /// Create (or truncate) the output file
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path).map_err(|e| {
            PsudohashError::io(
                format!("Failed to open output file: {}", e),
                Some(path.to_string_lossy().to_string()),
            )
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            writer: BufWriter::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_error(&self, err: std::io::Error) -> PsudohashError {
        PsudohashError::sink_write(err.to_string(), Some(self.path.to_string_lossy().to_string()))
    }
}

impl LineSink for FileSink {
    fn write_line(&mut self, line: &str) -> Result<()> {
        writeln!(self.writer, "{}", line).map_err(|e| self.write_error(e))
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush().map_err(|e| self.write_error(e))
    }
}

/// In-memory sink
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    lines: Vec<String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

impl LineSink for MemorySink {
    fn write_line(&mut self, line: &str) -> Result<()> {
        self.lines.push(line.to_string());
        Ok(())
    }
}

/// Wraps a sink and measures what passes through it
pub struct CountingSink<S> {
    inner: S,
    lines: u64,
    bytes: u64,
}

impl<S: LineSink> CountingSink<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            lines: 0,
            bytes: 0,
        }
    }

    /// Lines and bytes (terminators included) written so far
    pub fn measured(&self) -> SizeEstimate {
        SizeEstimate::new(self.lines, self.bytes)
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: LineSink> LineSink for CountingSink<S> {
    fn write_line(&mut self, line: &str) -> Result<()> {
        self.inner.write_line(line)?;
        self.lines += 1;
        self.bytes += line.len() as u64 + 1;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.inner.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_sink_writes_terminated_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        std::fs::write(&path, "stale\n").unwrap();

        let mut sink = FileSink::create(&path).unwrap();
        sink.write_line("root").unwrap();
        sink.write_line("r00t").unwrap();
        sink.flush().unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "root\nr00t\n");
    }

    #[test]
    fn test_file_sink_bad_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.txt");
        assert!(matches!(FileSink::create(&path), Err(PsudohashError::Io { .. })));
    }

    #[test]
    fn test_counting_sink_measures_bytes() {
        let mut sink = CountingSink::new(MemorySink::new());
        sink.write_line("abc").unwrap();
        sink.write_line("d€").unwrap();
        assert_eq!(sink.measured(), SizeEstimate::new(2, 4 + 5));
        assert_eq!(sink.into_inner().lines(), &["abc".to_string(), "d€".to_string()]);
    }
}
