// Live network test (opt-in): cargo test --features online

#[cfg(feature = "online")]
#[test]
fn fetches_a_page_over_http() {
    let client = wxchart::PageClient::default();
    let body = client.fetch_page("https://example.org/").unwrap();
    assert!(!body.is_empty());
    assert!(body.contains("<html"));
}
