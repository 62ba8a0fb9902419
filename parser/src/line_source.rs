use crate::types::SourceError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use tracing::debug;

const MESSAGE_FILE_EXTENSION: &str = "auv";
const MESSAGE_FILE_SUFFIX: &str = ".RAW.auv";

static REPEATED_SPACES: Lazy<Regex> =
    Lazy::new(|| Regex::new(" +").expect("space run is a valid regular expression"));

/// Read physical lines from a reader. Line terminators (`\n` or `\r\n`) are
/// stripped. Invalid UTF-8 is replaced with U+FFFD, so content never fails
/// the read.
pub fn read_lines<R: Read>(reader: R) -> Result<Vec<String>, SourceError> {
    let mut reader = BufReader::new(reader);
    let mut lines = Vec::new();
    let mut buffer = Vec::new();

    loop {
        buffer.clear();
        if reader.read_until(b'\n', &mut buffer)? == 0 {
            break;
        }
        let line = buffer
            .strip_suffix(b"\n")
            .map(|line| line.strip_suffix(b"\r").unwrap_or(line))
            .unwrap_or(&buffer[..]);
        lines.push(String::from_utf8_lossy(line).into_owned());
    }

    Ok(lines)
}

/// Read a raw AUV message file (`*.RAW.auv`).
///
/// The name is checked before the file is opened.
pub fn read_message_file(path: impl AsRef<Path>) -> Result<Vec<String>, SourceError> {
    let path = path.as_ref();

    if path.extension().and_then(|ext| ext.to_str()) != Some(MESSAGE_FILE_EXTENSION) {
        return Err(SourceError::InvalidExtension(path.display().to_string()));
    }
    let is_raw = path
        .file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with(MESSAGE_FILE_SUFFIX));
    if !is_raw {
        return Err(SourceError::InvalidFileType(path.display().to_string()));
    }

    read_text_file(path)
}

/// Read any text file without checking its name.
pub fn read_text_file(path: impl AsRef<Path>) -> Result<Vec<String>, SourceError> {
    let path = path.as_ref();
    debug!("Reading message lines from {}", path.display());
    let lines = read_lines(File::open(path)?)?;
    debug!("Read {} lines from {}", lines.len(), path.display());
    Ok(lines)
}

/// Collapse runs of spaces, trim, then turn tabs into single spaces.
pub fn normalize_line(line: &str) -> String {
    let collapsed: Cow<'_, str> = REPEATED_SPACES.replace_all(line, " ");
    collapsed.trim().replace('\t', " ")
}

/// A prepared line and its 1-based position in the source.
pub type NumberedLine = (usize, String);

/// Normalize every line and drop the ones left empty. Kept lines carry their
/// 1-based position in `lines`, so diagnostics point at the source line.
pub fn prepare_lines<I, S>(lines: I) -> Vec<NumberedLine>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .enumerate()
        .map(|(index, line)| (index + 1, normalize_line(line.as_ref())))
        .filter(|(_, line)| !line.is_empty())
        .collect()
}
