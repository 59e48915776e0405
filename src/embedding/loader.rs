//! Loading word vectors from disk
//!
//! Reads the word2vec text format: an optional `<count> <dims>` header line,
//! then one `<word> <f1> <f2> ...` line per word.

use super::VectorModel;
use crate::core::LoadError;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

fn io_error(path: &Path, source: std::io::Error) -> LoadError {
    LoadError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn parse_error(path: &Path, line: usize, reason: impl Into<String>) -> LoadError {
    LoadError::Parse {
        path: path.to_path_buf(),
        line,
        reason: reason.into(),
    }
}

/// Parse a `<count> <dims>` header, if the line is one
fn parse_header(line: &str) -> Option<(u64, usize)> {
    let mut parts = line.split_whitespace();
    let count = parts.next()?.parse().ok()?;
    let dims = parts.next()?.parse().ok()?;
    parts.next().is_none().then_some((count, dims))
}

fn parse_vector_line(line: &str) -> Result<(String, Vec<f32>), String> {
    let mut parts = line.split_whitespace();
    let word = parts.next().ok_or("missing word")?.to_string();
    let vector = parts
        .map(|v| v.parse::<f32>().map_err(|e| format!("bad component `{v}`: {e}")))
        .collect::<Result<Vec<_>, _>>()?;
    if vector.is_empty() {
        return Err(format!("no vector components for `{word}`"));
    }
    Ok((word, vector))
}

fn progress_bar(len: Option<u64>) -> ProgressBar {
    match len {
        Some(len) => {
            let pb = ProgressBar::new(len);
            if let Ok(style) = ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) | {msg}")
            {
                pb.set_style(style.progress_chars("█▓▒░"));
            }
            pb
        }
        None => ProgressBar::new_spinner(),
    }
}

/// Load a vector model from a word2vec text file
///
/// # Errors
///
/// Returns a `LoadError` if the file cannot be read, a line is malformed, or
/// the file holds no vectors.
///
/// # Examples
/// ```no_run
/// use semantle_window::embedding::loader::load_vectors;
///
/// let model = load_vectors("data/vectors.txt", false).unwrap();
/// println!("Loaded {} words", model.len());
/// ```
pub fn load_vectors<P: AsRef<Path>>(path: P, show_progress: bool) -> Result<VectorModel, LoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| io_error(path, e))?;
    let mut lines = BufReader::new(file).lines().enumerate().peekable();

    let mut header = None;
    if let Some((_, Ok(first))) = lines.peek() {
        header = parse_header(first);
        if header.is_some() {
            lines.next();
        }
    }

    let pb = show_progress.then(|| progress_bar(header.map(|(count, _)| count)));
    if let Some(pb) = &pb {
        pb.set_message("loading vectors");
    }

    let mut entries = Vec::new();
    for (i, line) in lines {
        let line = line.map_err(|e| io_error(path, e))?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let (word, vector) = parse_vector_line(trimmed).map_err(|r| parse_error(path, i + 1, r))?;
        if let Some((_, dims)) = header
            && vector.len() != dims
        {
            return Err(parse_error(
                path,
                i + 1,
                format!("expected {dims} components, found {}", vector.len()),
            ));
        }
        entries.push((word, vector));

        if let Some(pb) = &pb {
            pb.inc(1);
        }
    }

    if let Some(pb) = pb {
        pb.finish_with_message(format!("{} vectors", entries.len()));
    }

    if entries.is_empty() {
        return Err(LoadError::Empty {
            path: path.to_path_buf(),
        });
    }

    VectorModel::from_entries(entries).map_err(|e| parse_error(path, 0, e.to_string()))
}

/// Load a plain word list, one word per line
///
/// Blank lines and lines starting with `#` are skipped.
///
/// # Errors
///
/// Returns a `LoadError` if the file cannot be read.
pub fn load_word_list<P: AsRef<Path>>(path: P) -> Result<Vec<String>, LoadError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| io_error(path, e))?;

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}
