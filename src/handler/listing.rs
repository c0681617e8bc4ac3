//! Directory listing module
//!
//! Renders the HTML index page for a directory that has no index file.

use std::io;
use std::path::Path;

use tokio::fs;

/// Render an HTML listing of `dir`, titled with the request path.
///
/// Entries are sorted case-insensitively by name; directories get a
/// trailing slash in both the link and the label. Names are HTML-escaped.
pub async fn render_directory(url_path: &str, dir: &Path) -> io::Result<String> {
    let mut names = Vec::new();
    let mut reader = fs::read_dir(dir).await?;
    while let Some(entry) = reader.next_entry().await? {
        let is_dir = entry.file_type().await.map(|t| t.is_dir()).unwrap_or(false);
        let mut name = entry.file_name().to_string_lossy().into_owned();
        if is_dir {
            name.push('/');
        }
        names.push(name);
    }
    names.sort_by_key(|n| n.to_lowercase());

    Ok(render_page(url_path, &names))
}

fn render_page(url_path: &str, names: &[String]) -> String {
    let title = format!("Directory listing for {}", escape_html(url_path));

    let mut items = String::new();
    for name in names {
        let escaped = escape_html(name);
        items.push_str(&format!("<li><a href=\"{escaped}\">{escaped}</a></li>\n"));
    }

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
</head>
<body>
<h1>{title}</h1>
<hr>
<ul>
{items}</ul>
<hr>
</body>
</html>
"#
    )
}

/// Escape the characters HTML treats specially
fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a&b"), "a&amp;b");
        assert_eq!(escape_html("<script>"), "&lt;script&gt;");
        assert_eq!(escape_html("say \"hi\""), "say &quot;hi&quot;");
        assert_eq!(escape_html("plain.txt"), "plain.txt");
    }

    #[test]
    fn test_render_page_structure() {
        let names = vec!["a.txt".to_string(), "sub/".to_string()];
        let html = render_page("/files/", &names);

        assert!(html.contains("<title>Directory listing for /files/</title>"));
        assert!(html.contains("<h1>Directory listing for /files/</h1>"));
        assert!(html.contains("<a href=\"sub/\">sub/</a>"));
        assert!(html.contains("<a href=\"a.txt\">a.txt</a>"));
    }

    #[test]
    fn test_render_page_escapes_names() {
        let names = vec!["<img>.html".to_string()];
        let html = render_page("/", &names);
        assert!(html.contains("&lt;img&gt;.html"));
        assert!(!html.contains("<img>"));
    }

    #[tokio::test]
    async fn test_render_directory_sorts_case_insensitively() {
        let dir = std::env::temp_dir().join("freshd-listing-sort-test");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("Beta.txt"), b"").unwrap();
        std::fs::write(dir.join("alpha.txt"), b"").unwrap();

        let html = render_directory("/", &dir).await.unwrap();
        let alpha = html.find("alpha.txt").unwrap();
        let beta = html.find("Beta.txt").unwrap();
        assert!(alpha < beta);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
