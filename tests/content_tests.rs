use slackguard::GuardError;
use slackguard::content::{
    ContentType, MAX_MESSAGE_LENGTH, escape_markup, sanitize_message_content, sanitize_text,
};

#[test]
fn test_plain_text_is_returned_unchanged() {
    let cases = ["Hello world", "<b>Bold text</b>", "Hello 世界 🌍", "", "Tom & Jerry's \"show\""];

    for content in cases {
        let result = sanitize_message_content(content.as_bytes(), ContentType::Plain).unwrap();
        assert_eq!(result, content, "Plain text should pass through: {content}");
    }
}

#[test]
fn test_markdown_without_markup_is_unchanged() {
    let result = sanitize_message_content(b"# Hello World", ContentType::Markdown).unwrap();
    assert_eq!(result, "# Hello World");
}

#[test]
fn test_markdown_escapes_script_tags() {
    let result =
        sanitize_message_content(b"<script>alert('xss')</script>", ContentType::Markdown).unwrap();
    assert_eq!(result, "&lt;script&gt;alert(&#39;xss&#39;)&lt;/script&gt;");
}

#[test]
fn test_markdown_escapes_all_five_characters() {
    let result = sanitize_text(r#"a<b>c&d'e"f"#, ContentType::Markdown).unwrap();
    assert_eq!(result, "a&lt;b&gt;c&amp;d&#39;e&#34;f");

    // Only the entities' own '&' and ';' remain; no raw markup survives.
    for c in ['<', '>', '\'', '"'] {
        assert!(!result.contains(c), "Raw {c} survived escaping: {result}");
    }
}

#[test]
fn test_escaping_twice_double_escapes() {
    let once = escape_markup("<b>");
    let twice = escape_markup(&once);
    assert_eq!(once, "&lt;b&gt;");
    assert_eq!(twice, "&amp;lt;b&amp;gt;");
    assert_ne!(once, twice);
}

#[test]
fn test_content_at_max_length_is_accepted() {
    let content = "A".repeat(MAX_MESSAGE_LENGTH);
    let result = sanitize_message_content(content.as_bytes(), ContentType::Plain).unwrap();
    assert_eq!(result, content);

    let result = sanitize_message_content(content.as_bytes(), ContentType::Markdown).unwrap();
    assert_eq!(result.len(), MAX_MESSAGE_LENGTH);
}

#[test]
fn test_content_over_max_length_is_rejected() {
    let content = "A".repeat(MAX_MESSAGE_LENGTH + 1);

    for content_type in [ContentType::Plain, ContentType::Markdown] {
        let err = sanitize_message_content(content.as_bytes(), content_type).unwrap_err();
        assert_eq!(
            err,
            GuardError::LengthExceeded {
                length: MAX_MESSAGE_LENGTH + 1,
                max: MAX_MESSAGE_LENGTH
            }
        );
    }
}

#[test]
fn test_length_is_checked_before_escaping() {
    // Escaping grows the text past the limit; the input itself is within it.
    let content = "<".repeat(MAX_MESSAGE_LENGTH);
    let result = sanitize_text(&content, ContentType::Markdown).unwrap();
    assert_eq!(result.len(), MAX_MESSAGE_LENGTH * 4);
}

#[test]
fn test_invalid_utf8_is_rejected() {
    let invalid: [&[u8]; 3] = [&[0xff, 0xfe, 0xfd], b"valid then \xc3", b"\xe2\x82"];

    for bytes in invalid {
        for content_type in [ContentType::Plain, ContentType::Markdown] {
            let err = sanitize_message_content(bytes, content_type).unwrap_err();
            assert!(
                matches!(err, GuardError::EncodingError { .. }),
                "Expected encoding error for {bytes:?}, got {err:?}"
            );
        }
    }
}

#[test]
fn test_invalid_utf8_wins_over_length() {
    let mut content = vec![b'A'; MAX_MESSAGE_LENGTH + 10];
    content[5] = 0xff;
    let err = sanitize_message_content(&content, ContentType::Plain).unwrap_err();
    assert_eq!(err, GuardError::EncodingError { offset: 5 });
}
