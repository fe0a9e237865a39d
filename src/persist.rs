// src/persist.rs
// =============================================================================
// Saves downloaded pages to disk.
//
// Every page lands in the directory of its depth, under a file name built
// from the URL's host and path:
//
//   https://example.com/docs/intro?x=1  ->  <root>/<depth>/example.com_docs_intro.html
//
// The query string and fragment are not part of the name, so two URLs that
// differ only there share a file. Whoever writes last wins.
// =============================================================================

use std::path::{Path, PathBuf};
use url::Url;

use crate::error::{CrawlError, Result};

// Characters that are not allowed (or are awkward) in file names on common
// file systems. Each one is replaced by '_'.
const UNSAFE_CHARS: [char; 9] = ['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

const EXTENSION: &str = ".html";

/// Derives the file name a page is saved under: host + path with every
/// unsafe character replaced by `_`, plus `.html`.
///
/// Host and path are taken as written in the URL: no lowercasing, no
/// percent-encoding, and no `/` added when the path is empty, so
/// `http://a.com` and `http://a.com/` get different names. The port is not
/// part of the host, so `http://localhost:8080/a` and `http://localhost:9090/a`
/// map to the same name.
pub fn safe_filename(url: &str) -> Result<String> {
    let parsed = Url::parse(url)?;
    let (host, path) = match raw_host_and_path(url) {
        Some(parts) => parts,
        None => (parsed.host_str().unwrap_or_default(), parsed.path()),
    };

    let mut name: String = host
        .chars()
        .chain(path.chars())
        .map(|c| if UNSAFE_CHARS.contains(&c) { '_' } else { c })
        .collect();
    name.push_str(EXTENSION);

    Ok(name)
}

// Splits `scheme://[user@]host[:port][/path][?query][#fragment]` without
// normalizing anything. Returns None when there is no `//` authority.
//
// Leading and trailing spaces and control characters are skipped, the same
// ones the URL parser ignores.
fn raw_host_and_path(url: &str) -> Option<(&str, &str)> {
    let url = url.trim_matches(|c: char| c <= ' ');
    let (_, rest) = url.split_once("://")?;

    let authority_end = rest
        .find(|c| matches!(c, '/' | '?' | '#'))
        .unwrap_or(rest.len());
    let (authority, tail) = rest.split_at(authority_end);

    let host_port = authority.rsplit_once('@').map_or(authority, |(_, h)| h);
    let host = match host_port.find(']') {
        // IPv6 literal: keep the brackets, drop what follows
        Some(end) if host_port.starts_with('[') => &host_port[..=end],
        _ => host_port.split(':').next().unwrap_or_default(),
    };

    let path_end = tail.find(|c| matches!(c, '?' | '#')).unwrap_or(tail.len());
    Some((host, &tail[..path_end]))
}

/// Writes `html` to `<dir>/<safe_filename(url)>`, creating `dir` first.
///
/// Creating an existing directory is not an error, so many tasks can race to
/// create the same depth directory. An existing file is truncated.
///
/// Returns the path that was written.
pub async fn persist(dir: &Path, url: &str, html: &str) -> Result<PathBuf> {
    let file_name = safe_filename(url)?;

    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|source| CrawlError::Persist {
            path: dir.to_path_buf(),
            source,
        })?;

    let path = dir.join(file_name);
    tokio::fs::write(&path, html)
        .await
        .map_err(|source| CrawlError::Persist {
            path: path.clone(),
            source,
        })?;

    Ok(path)
}
