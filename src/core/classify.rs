//! Media classification for directory listings and the recursive scan.
//!
//! A file is media when its name ends in one of the configured extensions. The
//! recursive scan is stricter: sample clips, subtitle archives and follow-up volumes
//! of multi-part archives are left out so every release shows up once.

use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static SAMPLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)[.-]sample[.-]").expect("sample pattern is valid"));
static SUBS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)[.-]subs[.-]").expect("subs pattern is valid"));
static ARCHIVE_PART: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\.part0*(\d+)\.rar$").expect("archive part pattern is valid"));
static ARCHIVE_VOLUME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\.r\d{2,3}$").expect("archive volume pattern is valid"));

pub const DEFAULT_EXTENSIONS: &[&str] = &[".avi", ".mkv", ".mpg", ".wmv"];

#[derive(Debug, Clone)]
pub struct MediaClassifier {
    extensions: Vec<String>,
    filter_samples: bool,
    filter_subs: bool,
    rar_folders: bool,
}

impl Default for MediaClassifier {
    fn default() -> Self {
        let extensions: Vec<String> = DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect();
        MediaClassifier::new(&extensions, true, true, true)
    }
}

impl MediaClassifier {
    pub fn new(
        extensions: &[String],
        filter_samples: bool,
        filter_subs: bool,
        rar_folders: bool,
    ) -> Self {
        let extensions = extensions
            .iter()
            .map(|e| e.trim())
            .filter(|e| !e.is_empty())
            .map(|e| {
                let e = e.to_lowercase();
                if e.starts_with('.') { e } else { format!(".{e}") }
            })
            .collect();
        Self {
            extensions,
            filter_samples,
            filter_subs,
            rar_folders,
        }
    }

    #[inline]
    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    pub fn is_media(&self, name: &str) -> bool {
        let lowered = name.to_lowercase();
        self.extensions.iter().any(|ext| lowered.ends_with(ext.as_str()))
    }

    /// Whether the recursive scan should list this file at all.
    pub fn accept_in_scan(&self, name: &str) -> bool {
        if !self.is_media(name) {
            return false;
        }
        if self.filter_samples && SAMPLE.is_match(name) {
            return false;
        }
        if is_rar(name) {
            if self.filter_subs && SUBS.is_match(name) {
                return false;
            }
            if let Some(caps) = ARCHIVE_PART.captures(name)
                && caps[1].parse::<u32>().is_ok_and(|n| n > 1)
            {
                return false;
            }
        }
        !ARCHIVE_VOLUME.is_match(name)
    }

    /// Display label for a scanned file. Archives are usually named after the
    /// release folder's contents, so with `rar_folders` they read `<folder>/<name>`.
    pub fn scan_label(&self, path: &Path) -> Option<String> {
        if !self.rar_folders {
            return None;
        }
        let name = path.file_name()?.to_string_lossy();
        if !is_rar(&name) {
            return None;
        }
        let folder = path.parent()?.file_name()?.to_string_lossy();
        Some(format!("{folder}/{name}"))
    }
}

fn is_rar(name: &str) -> bool {
    name.to_lowercase().ends_with(".rar")
}
