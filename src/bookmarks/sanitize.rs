//! Output sanitization for bookmark text.
//!
//! Stored records keep the author's original text; sanitization runs on every read so a
//! ruleset change never needs a data migration.

use super::Bookmark;

/// Strips script-bearing markup while keeping harmless formatting tags such as `<strong>`.
pub fn clean_text(text: &str) -> String {
    ammonia::clean(text)
}

/// Returns the served representation of a stored bookmark.
pub fn bookmark(bookmark: Bookmark) -> Bookmark {
    Bookmark {
        title: clean_text(&bookmark.title),
        description: clean_text(&bookmark.description),
        ..bookmark
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removes_script_elements() {
        let out = clean_text(r#"Naughty <script>alert("xss");</script> bad"#);
        assert!(!out.contains("<script"));
        assert!(out.starts_with("Naughty"));
        assert!(out.ends_with("bad"));
    }

    #[test]
    fn test_keeps_benign_formatting() {
        let out = clean_text("Bad image <strong>bold</strong> text");
        assert_eq!(out, "Bad image <strong>bold</strong> text");
    }

    #[test]
    fn test_drops_event_handler_attributes() {
        let out = clean_text(r#"<img src="https://url.to.file.which/does-not.exist" onerror="alert(document.cookie);">"#);
        assert!(!out.contains("onerror"));
    }

    #[test]
    fn test_plain_text_is_entity_encoded() {
        assert_eq!(clean_text("Tom & Jerry"), "Tom &amp; Jerry");
        assert_eq!(clean_text("a<b"), "a");
    }

    #[test]
    fn test_plain_text_unchanged() {
        assert_eq!(clean_text("Search some things"), "Search some things");
    }

    #[test]
    fn test_sanitizes_title_and_description_only() {
        let stored = Bookmark {
            id: 7,
            title: "<script>x</script>Title".to_string(),
            url: "https://x.com".to_string(),
            description: "<strong>ok</strong><script>y</script>".to_string(),
            rating: 3,
        };

        let served = bookmark(stored);
        assert_eq!(served.id, 7);
        assert_eq!(served.title, "Title");
        assert_eq!(served.description, "<strong>ok</strong>");
        assert_eq!(served.url, "https://x.com");
        assert_eq!(served.rating, 3);
    }
}
