//! Request path translation
//!
//! Maps a request target onto the filesystem under the served root.
//! Normalization is purely lexical: `..` removes the previous segment and can
//! never climb above the root. Symbolic links inside the root are followed.

use std::path::{Component, Path, PathBuf};

/// Result of mapping a request path onto the root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatedPath {
    /// Filesystem location under the root
    pub fs_path: PathBuf,
    /// Whether the request path ended in `/`
    pub trailing_slash: bool,
}

/// Translate a request path (query and fragment allowed) to a location under `root`
pub fn translate(root: &Path, request_path: &str) -> TranslatedPath {
    let path = strip_query(request_path);
    let trailing_slash = path.trim_end().ends_with('/');
    let decoded = percent_decode(path);

    let mut fs_path = root.to_path_buf();
    for segment in normalize_segments(&decoded) {
        fs_path.push(segment);
    }

    TranslatedPath {
        fs_path,
        trailing_slash,
    }
}

/// Drop `?query` and `#fragment`
pub fn strip_query(request_path: &str) -> &str {
    request_path
        .split(['?', '#'])
        .next()
        .unwrap_or(request_path)
}

/// Resolve `.`, `..` and empty segments, keeping only plain file names
fn normalize_segments(decoded: &str) -> Vec<&str> {
    let mut segments: Vec<&str> = Vec::new();
    for segment in decoded.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            name if is_plain_name(name) => segments.push(name),
            _ => {}
        }
    }
    segments
}

/// A segment that is exactly one normal component (no drive prefix or separator)
fn is_plain_name(segment: &str) -> bool {
    let mut components = Path::new(segment).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

/// Decode `%XX` escapes. Invalid escapes are kept literally and invalid
/// UTF-8 is replaced. `+` is not a space in paths.
pub fn percent_decode(input: &str) -> String {
    fn hex(byte: u8) -> Option<u8> {
        match byte {
            b'0'..=b'9' => Some(byte - b'0'),
            b'a'..=b'f' => Some(byte - b'a' + 10),
            b'A'..=b'F' => Some(byte - b'A' + 10),
            _ => None,
        }
    }

    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let (Some(hi), Some(lo)) = (hex(bytes[i + 1]), hex(bytes[i + 2])) {
                out.push((hi << 4) | lo);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }

    String::from_utf8_lossy(&out).into_owned()
}

/// Percent-encode a path segment for use in a link.
/// Unreserved characters (`A-Z a-z 0-9 - . _ ~`) and `/` pass through.
pub fn percent_encode(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'.' | b'_' | b'~' | b'/') {
            out.push(char::from(byte));
        } else {
            out.push_str(&format!("%{byte:02X}"));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root() -> PathBuf {
        PathBuf::from("/srv/www")
    }

    #[test]
    fn test_translate_plain() {
        let t = translate(&root(), "/pkg/app_bg.wasm");
        assert_eq!(t.fs_path, PathBuf::from("/srv/www/pkg/app_bg.wasm"));
        assert!(!t.trailing_slash);

        let t = translate(&root(), "/");
        assert_eq!(t.fs_path, root());
        assert!(t.trailing_slash);
    }

    #[test]
    fn test_translate_strips_query_and_fragment() {
        let t = translate(&root(), "/index.html?v=3#top");
        assert_eq!(t.fs_path, PathBuf::from("/srv/www/index.html"));
        let t = translate(&root(), "/docs/?sort=name");
        assert!(t.trailing_slash);
    }

    #[test]
    fn test_translate_never_escapes_root() {
        for attempt in [
            "/../etc/passwd",
            "/../../etc/passwd",
            "/a/../../etc/passwd",
            "/%2e%2e/etc/passwd",
            "/..%2fetc/passwd",
        ] {
            let t = translate(&root(), attempt);
            assert!(t.fs_path.starts_with(root()), "{attempt}");
            assert_eq!(t.fs_path, PathBuf::from("/srv/www/etc/passwd"), "{attempt}");
        }
    }

    #[test]
    fn test_translate_collapses_dots() {
        let t = translate(&root(), "/a/./b//c/../d.js");
        assert_eq!(t.fs_path, PathBuf::from("/srv/www/a/b/d.js"));
    }

    #[test]
    fn test_percent_decode() {
        assert_eq!(percent_decode("hello%20world"), "hello world");
        assert_eq!(percent_decode("a+b"), "a+b");
        assert_eq!(percent_decode("caf%C3%A9"), "café");
        assert_eq!(percent_decode("100%"), "100%");
        assert_eq!(percent_decode("%2G%41"), "%2GA");
    }

    #[test]
    fn test_percent_encode() {
        assert_eq!(percent_encode("my file.txt"), "my%20file.txt");
        assert_eq!(percent_encode("café/"), "caf%C3%A9/");
        assert_eq!(percent_encode("a&b#c"), "a%26b%23c");
        assert_eq!(percent_decode(&percent_encode("x y%z")), "x y%z");
    }
}
