//! Output size cap behavior.

use pagesift::markdown::TRUNCATION_MARKER;
use pagesift::{extract_content, SnapshotBuilder};

#[test]
fn oversized_content_is_cut_at_the_cap_with_a_marker() {
    let mut builder = SnapshotBuilder::new();
    let body = builder.root();
    let paragraph = builder.element(body, "p");
    let long_text = "word ".repeat(7000);
    builder.text(paragraph, &long_text);
    let snapshot = builder.finish();

    let result = match extract_content(&snapshot) {
        Ok(result) => result,
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    };

    let marker_len = TRUNCATION_MARKER.chars().count();
    assert_eq!(result.content.chars().count(), 30_000 + marker_len);
    assert!(result.content.ends_with(TRUNCATION_MARKER));

    // The kept prefix is exactly the first 30000 characters of the
    // untruncated buffer.
    let expected_prefix: String = long_text.trim().chars().take(30_000).collect();
    let kept: String = result.content.chars().take(30_000).collect();
    assert_eq!(kept, expected_prefix);
}

#[test]
fn content_under_the_cap_is_untouched() {
    let mut builder = SnapshotBuilder::new();
    let body = builder.root();
    let paragraph = builder.element(body, "p");
    builder.text(paragraph, "A perfectly reasonable amount of text");
    let snapshot = builder.finish();

    let result = match extract_content(&snapshot) {
        Ok(result) => result,
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    };

    assert_eq!(result.content, "A perfectly reasonable amount of text");
    assert!(!result.content.contains(TRUNCATION_MARKER));
}

#[test]
fn serialized_interactive_form_is_capped_too() {
    let mut builder = SnapshotBuilder::new();
    let body = builder.root();
    for i in 0..50 {
        let button = builder.element(body, "button");
        builder.attr(button, "name", &format!("really-long-button-name-{i}"));
    }
    let snapshot = builder.finish();

    let result = match pagesift::extract_interactive(&snapshot) {
        Ok(result) => result,
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    };

    let text = result.to_text(500);
    assert_eq!(
        text.chars().count(),
        500 + TRUNCATION_MARKER.chars().count()
    );
    assert!(text.ends_with(TRUNCATION_MARKER));

    // The structured catalog itself is uncapped.
    assert_eq!(result.elements().count(), 50);
}
