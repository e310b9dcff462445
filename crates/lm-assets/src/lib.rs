//! Playground frontend assets for Livemark.
//!
//! One API for both modes:
//!
//! - **`embed` feature on**: assets are compiled into the binary via `rust-embed`
//! - **`embed` feature off**: assets are read from `frontend/` at runtime, so
//!   edits show up on reload

use std::borrow::Cow;
#[cfg(not(feature = "embed"))]
use std::path::Path;

#[cfg(feature = "embed")]
#[derive(rust_embed::RustEmbed)]
#[folder = "../../frontend"]
#[prefix = ""]
struct Assets;

#[cfg(not(feature = "embed"))]
const DEV_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../frontend");

/// Get a frontend asset by path (relative to `frontend/`).
#[cfg(feature = "embed")]
#[must_use]
pub fn get(path: &str) -> Option<Cow<'static, [u8]>> {
    Assets::get(path).map(|f| f.data)
}

/// Get a frontend asset by path (relative to `frontend/`).
#[cfg(not(feature = "embed"))]
#[must_use]
pub fn get(path: &str) -> Option<Cow<'static, [u8]>> {
    if path.split('/').any(|part| part == "..") {
        return None;
    }
    std::fs::read(Path::new(DEV_DIR).join(path))
        .ok()
        .map(Cow::Owned)
}

/// Iterate all available asset paths.
#[cfg(feature = "embed")]
pub fn iter() -> impl Iterator<Item = Cow<'static, str>> {
    Assets::iter()
}

/// Iterate all available asset paths.
#[cfg(not(feature = "embed"))]
pub fn iter() -> impl Iterator<Item = Cow<'static, str>> {
    walk_dir(Path::new(DEV_DIR)).into_iter().map(Cow::Owned)
}

/// MIME type for the given file path.
#[must_use]
pub fn mime_for(path: &str) -> &'static str {
    mime_guess::from_path(path)
        .first_raw()
        .unwrap_or("application/octet-stream")
}

#[cfg(not(feature = "embed"))]
fn walk_dir(base: &Path) -> Vec<String> {
    let mut result = Vec::new();
    walk_dir_inner(base, base, &mut result);
    result.sort();
    result
}

#[cfg(not(feature = "embed"))]
fn walk_dir_inner(base: &Path, dir: &Path, result: &mut Vec<String>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            walk_dir_inner(base, &path, result);
        } else if let Ok(rel) = path.strip_prefix(base) {
            // Forward slashes on every platform
            result.push(rel.to_string_lossy().replace('\\', "/"));
        }
    }
}
