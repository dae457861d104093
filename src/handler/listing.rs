//! Directory listing module
//!
//! Generates the HTML index shown for directories without an index file.

use std::io;
use std::path::Path;
use tokio::fs;

use crate::http::path::percent_encode;

/// One directory entry as shown in the listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    pub name: String,
    pub is_dir: bool,
    pub is_symlink: bool,
}

impl ListingEntry {
    /// Link target: directories end in `/`
    fn href(&self) -> String {
        if self.is_dir {
            percent_encode(&format!("{}/", self.name))
        } else {
            percent_encode(&self.name)
        }
    }

    /// Visible name: directories end in `/`, symlinks in `@`
    fn label(&self) -> String {
        let mut label = self.name.clone();
        if self.is_dir {
            label.push('/');
        }
        if self.is_symlink {
            label.push('@');
        }
        label
    }
}

/// Read `dir` and render its listing. `display_path` is the decoded request path.
pub async fn render_directory(dir: &Path, display_path: &str) -> io::Result<String> {
    let mut entries = read_entries(dir).await?;
    entries.sort_by_cached_key(|e| e.name.to_lowercase());
    Ok(render_html(display_path, &entries))
}

async fn read_entries(dir: &Path) -> io::Result<Vec<ListingEntry>> {
    let mut entries = Vec::new();
    let mut read_dir = fs::read_dir(dir).await?;

    while let Some(entry) = read_dir.next_entry().await? {
        let file_type = entry.file_type().await?;
        let is_symlink = file_type.is_symlink();
        // Symlinks are classified by their target; dangling ones count as files
        let is_dir = if is_symlink {
            fs::metadata(entry.path())
                .await
                .is_ok_and(|m| m.is_dir())
        } else {
            file_type.is_dir()
        };

        entries.push(ListingEntry {
            name: entry.file_name().to_string_lossy().into_owned(),
            is_dir,
            is_symlink,
        });
    }

    Ok(entries)
}

/// Render entries in the order given
pub fn render_html(display_path: &str, entries: &[ListingEntry]) -> String {
    let title = format!("Directory listing for {}", escape_html(display_path));
    let mut html = format!(
        "<!DOCTYPE HTML>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n</head>\n<body>\n<h1>{title}</h1>\n<hr>\n<ul>\n"
    );
    for entry in entries {
        html.push_str(&format!(
            "<li><a href=\"{}\">{}</a></li>\n",
            escape_html(&entry.href()),
            escape_html(&entry.label())
        ));
    }
    html.push_str("</ul>\n<hr>\n</body>\n</html>\n");
    html
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
    out
}
