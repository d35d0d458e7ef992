use digest_aggregator::normalize_url;

#[test]
fn removes_fragment_and_query() {
    assert_eq!(
        normalize_url("https://example.com/path?q=1&utm=x#section"),
        "https://example.com/path"
    );
}

#[test]
fn lowercases_scheme_and_host() {
    assert_eq!(
        normalize_url("HTTPS://Example.COM/Path"),
        "https://example.com/Path"
    );
}

#[test]
fn removes_trailing_slash_from_path() {
    assert_eq!(
        normalize_url("https://example.com/foo/"),
        "https://example.com/foo"
    );
}

#[test]
fn empty_path_becomes_slash() {
    assert_eq!(normalize_url("https://example.com"), "https://example.com/");
}

#[test]
fn root_path_stays_root() {
    assert_eq!(normalize_url("https://example.com/"), "https://example.com/");
}

#[test]
fn strips_surrounding_whitespace() {
    assert_eq!(
        normalize_url("  https://example.com/a  "),
        "https://example.com/a"
    );
}

#[test]
fn empty_input_returns_empty() {
    assert_eq!(normalize_url(""), "");
    assert_eq!(normalize_url("   "), "");
}

#[test]
fn keeps_explicit_port() {
    assert_eq!(
        normalize_url("https://example.com:8080/a/"),
        "https://example.com:8080/a"
    );
}

#[test]
fn malformed_input_passes_through_trimmed() {
    assert_eq!(normalize_url("  not a url  "), "not a url");
}

#[test]
fn query_variants_normalize_equal() {
    let a = normalize_url("https://site.com/article?utm=twitter");
    let b = normalize_url("https://site.com/article?utm=email");
    assert_eq!(a, b);
    assert_eq!(a, "https://site.com/article");
}

#[test]
fn normalization_is_idempotent() {
    let inputs = [
        "https://example.com",
        "https://Example.COM/Foo/?q=1#x",
        "http://a.com/b/c/",
        "not a url",
        "",
    ];
    for input in inputs {
        let once = normalize_url(input);
        assert_eq!(normalize_url(&once), once, "not idempotent for {input:?}");
    }
}
