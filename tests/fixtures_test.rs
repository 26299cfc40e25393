//! Integration tests for the test fixtures module.
//!
//! This file verifies that the fixtures module compiles and works correctly.

mod fixtures;

use emojikit::ValidationMode;
use emojikit::emoji::MANIFEST_FILE_NAME;
use fixtures::*;

#[test]
fn test_builder_writes_manifest_and_assets() {
    let bundle = BundleBuilder::new(2).emoji("a").emoji("b").without_asset("b").build();
    assert!(bundle.root().join(MANIFEST_FILE_NAME).is_file());
    assert!(bundle.root().join("a.png").is_file());
    assert!(!bundle.root().join("b.png").exists());
}

#[test]
fn test_builder_legacy_names() {
    let bundle = BundleBuilder::new(1).emoji("a").legacy_names().build();
    let json = std::fs::read_to_string(bundle.root().join(MANIFEST_FILE_NAME)).unwrap();
    assert!(json.contains("\"emojis\""));
    assert!(!json.contains("\"entries\""));
    assert_eq!(bundle.load(ValidationMode::Strict).unwrap().len(), 1);
}

#[test]
fn test_sample_bundle_matches_keys() {
    let bundle = sample_bundle();
    assert_eq!(bundle.keys().collect::<Vec<_>>(), SAMPLE_KEYS);
}

#[test]
fn test_mixed_texts_round_trip() {
    let codec = emojikit::EmojiCodec::new(sample_bundle(), emojikit::GlyphMetrics::default());
    for text in MIXED_TEXTS {
        let (buffer, _) = codec.decode_from_plain(text);
        assert_eq!(codec.encode_to_plain(&buffer), *text, "round trip of {text:?}");
    }
}
