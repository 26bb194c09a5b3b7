use anyhow::{Context, Result};
use chrono::Local;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

// @module: File and directory utilities

// @const: XLIFF content sniff
static XLIFF_SNIFF_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<\s*xliff[\s>]").unwrap()
});

// @const: Table header sniff
static TABLE_SNIFF_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^id,source,target,lang").unwrap()
});

// @const: Run separator marker, also the rotation anchor
const RUN_MARKER: &str = "NEW RUN";

// @const: Upper bound on retained log lines before marker-based trimming
const MAX_RETAINED_LOG_LINES: usize = 1000;

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    /// Read a file into memory
    pub fn read_bytes<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
        fs::read(&path).with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Write bytes through a temp file in the target directory, then rename.
    /// A failed write never leaves a partial file at the destination.
    pub fn write_bytes_atomic<P: AsRef<Path>>(path: P, content: &[u8]) -> Result<()> {
        let path = path.as_ref();
        let parent = path.parent().filter(|p| !p.as_os_str().is_empty());
        if let Some(parent) = parent {
            Self::ensure_dir(parent)?;
        }

        let mut temp_file = NamedTempFile::new_in(parent.unwrap_or_else(|| Path::new(".")))
            .with_context(|| format!("Failed to create temp file next to {:?}", path))?;
        temp_file
            .write_all(content)
            .with_context(|| format!("Failed to write output for {:?}", path))?;
        temp_file
            .persist(path)
            .with_context(|| format!("Failed to persist output file: {:?}", path))?;

        Ok(())
    }

    // @generates: Output path inside the output directory
    pub fn generate_output_path<P: AsRef<Path>>(output_dir: P, file_name: &str) -> PathBuf {
        output_dir.as_ref().join(file_name)
    }

    /// Detect whether a file is an XLIFF document or a translation table.
    /// Extension first, content sniffing as the fallback.
    pub fn detect_file_type<P: AsRef<Path>>(path: P) -> Result<FileType> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(anyhow::anyhow!("File does not exist: {:?}", path));
        }

        if let Some(ext) = path.extension() {
            let ext_str = ext.to_string_lossy().to_lowercase();
            match ext_str.as_str() {
                "xlf" | "xliff" => return Ok(FileType::Xliff),
                "csv" => return Ok(FileType::Table),
                _ => {}
            }
        }

        // Fall back to examining file contents
        if let Ok(content) = fs::read_to_string(path) {
            if XLIFF_SNIFF_REGEX.is_match(&content) {
                return Ok(FileType::Xliff);
            }
            if TABLE_SNIFF_REGEX.is_match(&content) {
                return Ok(FileType::Table);
            }
        }

        Ok(FileType::Unknown)
    }

    /// Append a timestamped run marker to the run log, keeping only the last
    /// `keep_runs` runs. Rotation happens before the new marker is written, so
    /// the log never grows past the configured window plus the current run.
    pub fn append_run_marker<P: AsRef<Path>>(path: P, keep_runs: usize) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            Self::ensure_dir(parent)?;
        }

        let mut lines: Vec<String> = match fs::read_to_string(path) {
            Ok(content) => content.lines().map(|line| line.to_string()).collect(),
            Err(_) => Vec::new(),
        };

        if lines.len() > MAX_RETAINED_LOG_LINES {
            lines.drain(..lines.len() - MAX_RETAINED_LOG_LINES);
        }

        let marker_positions: Vec<usize> = lines
            .iter()
            .enumerate()
            .filter(|(_, line)| line.contains(RUN_MARKER))
            .map(|(index, _)| index)
            .collect();
        if marker_positions.len() >= keep_runs && keep_runs > 0 {
            let cutoff = marker_positions[marker_positions.len() - keep_runs];
            lines.drain(..cutoff);
        }

        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        let mut rewritten = lines.join("\n");
        if !rewritten.is_empty() {
            rewritten.push('\n');
        }
        fs::write(path, rewritten)
            .with_context(|| format!("Failed to rewrite run log: {:?}", path))?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open run log: {:?}", path))?;
        writeln!(file, "----------------------------------------")?;
        writeln!(file, "{RUN_MARKER}: {timestamp}")?;
        writeln!(file, "----------------------------------------")?;

        Ok(())
    }

    /// Append one line to the run log with a timestamp
    pub fn append_to_log_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();

        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open log file: {:?}", path.as_ref()))?;

        writeln!(file, "[{}] {}", timestamp, content)
            .with_context(|| format!("Failed to write to log file: {:?}", path.as_ref()))?;

        Ok(())
    }
}

/// Enum representing different file types
#[derive(Debug, PartialEq, Eq)]
pub enum FileType {
    /// XLIFF translation document
    Xliff,
    /// Tabular translation file (CSV)
    Table,
    /// Unknown file type
    Unknown,
}
