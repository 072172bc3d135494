use jobwatch_core::{identity, normalize_whitespace, Identity, Posting, UNTITLED_PLACEHOLDER};
use pretty_assertions::assert_eq;

fn init_logging() {
    jobwatch_logging::initialize_for_tests();
}

#[test]
fn identity_is_deterministic() {
    init_logging();
    let a = identity("Store Assistant", "https://sainsburys.jobs/jobs/123");
    let b = identity("Store Assistant", "https://sainsburys.jobs/jobs/123");
    assert_eq!(a, b);
    assert_eq!(a.as_str().len(), 64);
    assert!(Identity::from_hex(a.as_str()).is_some());
}

#[test]
fn identity_changes_with_either_field() {
    init_logging();
    let base = identity("Store Assistant", "https://sainsburys.jobs/jobs/123");
    assert_ne!(base, identity("Store Assistant ", "https://sainsburys.jobs/jobs/123"));
    assert_ne!(base, identity("Store Manager", "https://sainsburys.jobs/jobs/123"));
    assert_ne!(base, identity("Store Assistant", "https://sainsburys.jobs/jobs/124"));
}

#[test]
fn identity_separates_the_field_boundary() {
    init_logging();
    // Same concatenation, different split.
    assert_ne!(identity("ab", "c"), identity("a", "bc"));
    assert_ne!(identity("", "abc"), identity("abc", ""));
}

#[test]
fn from_hex_rejects_malformed_digests() {
    assert!(Identity::from_hex("").is_none());
    assert!(Identity::from_hex("abc").is_none());
    assert!(Identity::from_hex("ABCD").is_none());
    assert!(Identity::from_hex("zz").is_none());
    assert_eq!(Identity::from_hex("0a1b").unwrap().as_str(), "0a1b");
}

#[test]
fn posting_normalizes_title_and_derives_identity() {
    let posting = Posting::new("  Store\n\t Assistant  ", " https://sainsburys.jobs/jobs/1 ");
    assert_eq!(posting.title, "Store Assistant");
    assert_eq!(posting.link, "https://sainsburys.jobs/jobs/1");
    assert_eq!(
        posting.identity,
        identity("Store Assistant", "https://sainsburys.jobs/jobs/1")
    );
}

#[test]
fn posting_with_blank_title_uses_placeholder() {
    let posting = Posting::new(" \n ", "https://sainsburys.jobs/jobs/1");
    assert_eq!(posting.title, UNTITLED_PLACEHOLDER);
}

#[test]
fn normalize_whitespace_collapses_runs() {
    assert_eq!(normalize_whitespace("a  b\u{a0}\n c"), "a b c");
    assert_eq!(normalize_whitespace("   "), "");
}
