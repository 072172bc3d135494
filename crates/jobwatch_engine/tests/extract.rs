use jobwatch_core::{identity, UNTITLED_PLACEHOLDER};
use jobwatch_engine::{
    decode_html, ExtractError, Extractor, JobLinkExtractor, DEFAULT_BASE_ORIGIN, JOB_PATH_MARKER,
};
use pretty_assertions::assert_eq;
use url::Url;

fn extractor() -> JobLinkExtractor {
    jobwatch_logging::initialize_for_tests();
    JobLinkExtractor::new(Url::parse(DEFAULT_BASE_ORIGIN).unwrap(), JOB_PATH_MARKER)
}

#[test]
fn page_without_job_links_yields_no_postings() {
    let html = r#"
    <html><body>
        <nav><a href="/about">About</a><a href="/jobs?page=2">Next</a></nav>
        <a name="top">anchor without href</a>
    </body></html>
    "#;
    let postings = extractor().extract(html).unwrap();
    assert!(postings.is_empty());
}

#[test]
fn relative_links_are_resolved_against_the_base_origin() {
    let html = r#"<ul><li><a href="/jobs/123"> Store
        Assistant </a></li></ul>"#;
    let postings = extractor().extract(html).unwrap();

    assert_eq!(postings.len(), 1);
    assert_eq!(postings[0].title, "Store Assistant");
    assert_eq!(postings[0].link, "https://sainsburys.jobs/jobs/123");
    assert_eq!(
        postings[0].identity,
        identity("Store Assistant", "https://sainsburys.jobs/jobs/123")
    );
}

#[test]
fn absolute_links_are_kept_verbatim() {
    let html = r#"<a href="https://careers.example.com/jobs/9?src=x">Baker</a>"#;
    let postings = extractor().extract(html).unwrap();
    assert_eq!(postings[0].link, "https://careers.example.com/jobs/9?src=x");
}

#[test]
fn duplicate_links_keep_the_first_occurrence() {
    let html = r#"
    <div>
        <a href="/jobs/1">Cashier</a>
        <a href="/jobs/2">Baker</a>
        <a href="https://sainsburys.jobs/jobs/1">Cashier</a>
        <a href="/jobs/1">  Cashier </a>
    </div>
    "#;
    let postings = extractor().extract(html).unwrap();
    let titles: Vec<_> = postings.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["Cashier", "Baker"]);
}

#[test]
fn same_link_with_different_title_is_a_different_posting() {
    let html = r#"<a href="/jobs/1">Cashier</a><a href="/jobs/1">View job</a>"#;
    let postings = extractor().extract(html).unwrap();
    assert_eq!(postings.len(), 2);
}

#[test]
fn nested_markup_and_empty_text() {
    let html = r#"
    <a href="/jobs/7"><span>Night</span> <strong>Colleague</strong></a>
    <a href="/jobs/8"><img src="logo.png"></a>
    "#;
    let postings = extractor().extract(html).unwrap();
    assert_eq!(postings[0].title, "Night Colleague");
    assert_eq!(postings[1].title, UNTITLED_PLACEHOLDER);
    assert_eq!(postings[1].link, "https://sainsburys.jobs/jobs/8");
}

#[test]
fn blank_page_is_a_parse_error() {
    assert_eq!(extractor().extract("  \n ").unwrap_err(), ExtractError::EmptyDocument);
}

#[test]
fn non_markup_body_is_a_parse_error() {
    let err = extractor()
        .extract(r#"{"error": "service unavailable"}"#)
        .unwrap_err();
    assert_eq!(err, ExtractError::NotMarkup);
}

#[test]
fn bare_page_shell_yields_no_postings() {
    let html = "<!DOCTYPE html><html><head></head><body>\n</body></html>";
    assert_eq!(extractor().extract(html).unwrap(), vec![]);
}

#[test]
fn plain_text_with_angle_brackets_is_a_parse_error() {
    let err = extractor().extract("status < 3 and x <= 4").unwrap_err();
    assert_eq!(err, ExtractError::NotMarkup);
}

#[test]
fn protocol_relative_links_do_not_replace_the_base_origin() {
    let html = r#"<a href="//careers.example.com/jobs/1">Picker</a>"#;
    let postings = extractor().extract(html).unwrap();
    assert_eq!(postings[0].link, "//careers.example.com/jobs/1");
}

#[test]
fn latin1_page_decodes_before_extraction() {
    let bytes = b"<a href=\"/jobs/5\">Caf\xe9 Assistant</a>";
    let decoded = decode_html(bytes, Some("text/html; charset=ISO-8859-1")).unwrap();
    let postings = extractor().extract(&decoded.html).unwrap();
    assert_eq!(postings[0].title, "Café Assistant");
}
