//! MIME type detection module
//!
//! Returns the Content-Type for a file path. The platform table shipped with
//! `mime_guess` answers by default; a small override table takes precedence
//! for extensions that browsers need typed exactly.

use std::collections::HashMap;
use std::path::Path;

/// Fallback for paths without a known extension
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Extensions served with a fixed type regardless of the platform table.
///
/// `WebAssembly.instantiateStreaming` refuses anything but `application/wasm`.
pub const DEFAULT_OVERRIDES: [(&str, &str); 2] = [
    (".js", "application/javascript"),
    (".wasm", "application/wasm"),
];

/// Extension to MIME type mapping, built once at startup and never mutated.
///
/// Keys are lowercase with a leading dot (`.wasm`). Lookups through
/// [`MimeTable::lookup`] are exact, so callers pass normalized extensions;
/// [`MimeTable::resolve`] does that normalization for file paths.
#[derive(Debug, Clone)]
pub struct MimeTable {
    overrides: HashMap<String, String>,
}

impl MimeTable {
    /// Platform table overlaid with [`DEFAULT_OVERRIDES`]
    pub fn new() -> Self {
        Self::with_overrides(DEFAULT_OVERRIDES)
    }

    /// Platform table overlaid with the given `(extension, mime)` pairs
    pub fn with_overrides<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            overrides: entries
                .into_iter()
                .map(|(ext, mime)| (ext.into(), mime.into()))
                .collect(),
        }
    }

    /// Get the Content-Type for a file path
    ///
    /// # Examples
    /// ```
    /// use devserve::http::mime::MimeTable;
    /// use std::path::Path;
    ///
    /// let table = MimeTable::new();
    /// assert_eq!(table.resolve(Path::new("pkg/app_bg.wasm")), "application/wasm");
    /// assert_eq!(table.resolve(Path::new("INDEX.JS")), "application/javascript");
    /// assert_eq!(table.resolve(Path::new("Makefile")), "application/octet-stream");
    /// ```
    pub fn resolve(&self, path: &Path) -> &str {
        extension_of(path)
            .and_then(|ext| self.lookup(&ext))
            .unwrap_or(OCTET_STREAM)
    }

    /// Look up a normalized extension (`.html`): override first, then platform
    pub fn lookup(&self, extension: &str) -> Option<&str> {
        if let Some(mime) = self.overrides.get(extension) {
            return Some(mime.as_str());
        }
        platform_default(extension)
    }
}

impl Default for MimeTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Platform association for an extension, ignoring overrides
///
/// The table is `mime_guess`'s database compiled into the binary, not the
/// host's `/etc/mime.types` or registry, so every machine gives the same answer.
pub fn platform_default(extension: &str) -> Option<&'static str> {
    let bare = extension.strip_prefix('.')?;
    if bare.is_empty() {
        return None;
    }
    mime_guess::from_ext(bare).first_raw()
}

/// Lowercased extension of the final path segment, with its leading dot.
///
/// Dotfiles such as `.bashrc` have no extension.
fn extension_of(path: &Path) -> Option<String> {
    let ext = path.extension()?.to_str()?;
    Some(format!(".{}", ext.to_ascii_lowercase()))
}
