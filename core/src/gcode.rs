//! # Slicer Output Extraction
//!
//! Pulls the model name and the required filament mass out of sliced
//! G-code. Extraction is best-effort end to end: unreadable files,
//! undecodable bytes and absent markers all degrade to "nothing found"
//! rather than an error the operator has to deal with.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use thiserror::Error;
use walkdir::WalkDir;

/// Comment marker carrying a printed object, e.g.
/// `; printing object Vase.stl id:0`.
const MODEL_MARKER: &str = "; printing object ";
const MODEL_MARKER_END: &str = ".stl id:";

/// Current slicers write `; filament used [g] = 45.7`.
const MASS_MARKER: &str = "filament used [g]";
/// Older slicers wrote `;Filament used: 45.7 g`.
const MASS_MARKER_LEGACY: &str = "filament used:";

#[derive(Debug, Error)]
pub enum ExtractError {
    /// The slicer output vanished or cannot be read; the caller keeps
    /// whatever it extracted last.
    #[error("cannot read {path}: {source}")]
    Unreadable {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// What one pass over one slicer output file produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub required_g: Option<f64>,
    pub model_name: Option<String>,
    pub source: PathBuf,
    pub modified: SystemTime,
}

/// Parses one G-code file. Undecodable bytes are substituted, never fatal;
/// markers may be missing without this being an error.
pub fn parse(path: &Path) -> Result<Extraction, ExtractError> {
    let raw = fs::read(path).map_err(|source| ExtractError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;
    let text = String::from_utf8_lossy(&raw);

    Ok(Extraction {
        required_g: extract_required(&text),
        model_name: extract_models(&text),
        source: path.to_path_buf(),
        modified: effective_mtime(path).unwrap_or(SystemTime::UNIX_EPOCH),
    })
}

/// Convenience for the refresh path: newest watched file, parsed.
pub fn latest_extraction(dirs: &[PathBuf]) -> Option<Extraction> {
    let newest = find_latest(dirs)?;
    parse(&newest).ok()
}

/// The `.gcode` file with the newest effective timestamp under the watched
/// directories. The effective timestamp of a file is the later of its own
/// mtime and its parent directory's mtime; some slicers only touch the
/// job folder when a slice completes.
pub fn find_latest(dirs: &[PathBuf]) -> Option<PathBuf> {
    let mut newest: Option<(PathBuf, SystemTime)> = None;

    for dir in dirs {
        for entry in WalkDir::new(dir).into_iter().filter_map(|e| e.ok()) {
            if !entry.file_type().is_file() {
                continue;
            }
            if entry.path().extension().and_then(|e| e.to_str()) != Some("gcode") {
                continue;
            }
            let Some(stamp) = effective_mtime(entry.path()) else {
                continue;
            };
            if newest.as_ref().map_or(true, |(_, best)| stamp > *best) {
                newest = Some((entry.path().to_path_buf(), stamp));
            }
        }
    }

    newest.map(|(path, _)| path)
}

fn effective_mtime(path: &Path) -> Option<SystemTime> {
    let own = fs::metadata(path).ok()?.modified().ok()?;
    let parent = path
        .parent()
        .and_then(|p| fs::metadata(p).ok())
        .and_then(|m| m.modified().ok());

    Some(match parent {
        Some(parent) if parent > own => parent,
        _ => own,
    })
}

/// Distinct object names in first-seen order, joined for display.
fn extract_models(text: &str) -> Option<String> {
    let mut names: Vec<String> = Vec::new();

    for line in text.lines() {
        let Some(start) = line.find(MODEL_MARKER) else {
            continue;
        };
        let rest = &line[start + MODEL_MARKER.len()..];
        let Some(end) = rest.find(MODEL_MARKER_END) else {
            continue;
        };
        let name = rest[..end].trim();
        if !name.is_empty() && !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }

    if names.is_empty() {
        None
    } else {
        Some(names.join(", "))
    }
}

/// Required mass in grams. The current marker wins over the legacy one no
/// matter where in the file either appears; both match case-insensitively.
fn extract_required(text: &str) -> Option<f64> {
    let mut legacy: Option<f64> = None;

    for line in text.lines() {
        let Some(comment) = line.trim_start().strip_prefix(';') else {
            continue;
        };
        let lower = comment.to_lowercase();

        if let Some(rest) = lower.trim_start().strip_prefix(MASS_MARKER) {
            if let Some(rest) = rest.trim_start().strip_prefix('=') {
                if let Some(value) = leading_number(rest.trim_start()) {
                    return Some(value);
                }
            }
        }

        // The legacy marker sits flush against the semicolon and suffixes
        // the number with a unit.
        if legacy.is_none() {
            if let Some(rest) = lower.strip_prefix(MASS_MARKER_LEGACY) {
                let rest = rest.trim_start();
                if let Some(value) = leading_number(rest) {
                    let tail = rest
                        .trim_start_matches(|c: char| c.is_ascii_digit() || c == '.')
                        .trim_start();
                    if tail.starts_with('g') {
                        legacy = Some(value);
                    }
                }
            }
        }
    }

    legacy
}

/// The `[0-9.]+` run at the start of `s`, as a float.
fn leading_number(s: &str) -> Option<f64> {
    let digits: String = s
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    digits.parse().ok()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
