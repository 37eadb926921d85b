//! # Download Planning
//!
//! Decides *whether* a resource can be downloaded and *what* the file should
//! be called. The transfer itself lives in `api::download`.

use std::path::{Path, PathBuf};

use crate::api::CourseResource;

/// A resolved download: source URL and the suggested file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub url: String,
    pub filename: String,
}

impl DownloadRequest {
    /// `None` when the resource carries no `file_url`.
    pub fn for_resource(resource: &CourseResource) -> Option<Self> {
        let url = resource.file_url()?;
        Some(Self {
            url: url.to_string(),
            filename: suggested_filename(resource, url),
        })
    }
}

/// Title when present, else `course_{id}.pdf`.
///
/// A title without an extension borrows the one from the URL path so the
/// saved file opens with the right application.
pub fn suggested_filename(resource: &CourseResource, url: &str) -> String {
    let title = resource
        .title
        .as_deref()
        .map(sanitize)
        .filter(|t| !t.is_empty());

    match title {
        Some(title) if file_extension(&title).is_some() => title,
        Some(title) => match url_extension(url) {
            Some(ext) => format!("{title}.{ext}"),
            None => title,
        },
        None => format!("course_{}.pdf", sanitize(resource.id.as_str())),
    }
}

/// Replace path separators and control characters, strip leading dots.
fn sanitize(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    cleaned.trim().trim_start_matches('.').trim().to_string()
}

fn url_extension(url: &str) -> Option<String> {
    let path = url.split(['?', '#']).next()?;
    file_extension(path.rsplit('/').next()?)
}

/// A short alphanumeric extension, lowercased. "Chapter 1. Basics" has none.
fn file_extension(name: &str) -> Option<String> {
    let ext = Path::new(name).extension()?.to_str()?;
    if ext.is_empty() || ext.len() > 5 || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// First free path in `dir`: `name.ext`, then `name (1).ext`, `name (2).ext`, ...
pub fn unique_path(dir: &Path, filename: &str, exists: impl Fn(&Path) -> bool) -> PathBuf {
    let candidate = dir.join(filename);
    if !exists(&candidate) {
        return candidate;
    }

    let as_path = Path::new(filename);
    let stem = as_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(filename);
    let ext = as_path.extension().and_then(|e| e.to_str());

    let mut n = 1usize;
    loop {
        let name = match ext {
            Some(ext) => format!("{stem} ({n}).{ext}"),
            None => format!("{stem} ({n})"),
        };
        let candidate = dir.join(name);
        if !exists(&candidate) {
            return candidate;
        }
        n += 1;
    }
}
