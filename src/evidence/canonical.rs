use url::Url;

const TRACKING_PARAMS: &[&str] = &["ref", "fbclid", "gclid", "mc_cid", "mc_eid"];

fn is_tracking_param(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    lower.starts_with("utm_") || TRACKING_PARAMS.contains(&lower.as_str())
}

/// Normalizes a URL so the same article reached through different links dedups.
///
/// Lower-cases scheme and host, drops the fragment and tracking parameters, and trims
/// trailing slashes. Unparseable input is trimmed and lower-cased.
pub fn canonicalize_url(raw: &str) -> String {
    let trimmed = raw.trim();
    let Ok(mut url) = Url::parse(trimmed) else {
        return trimmed.to_lowercase();
    };

    url.set_fragment(None);

    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| !is_tracking_param(k))
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    if kept.is_empty() {
        url.set_query(None);
    } else {
        url.query_pairs_mut().clear().extend_pairs(kept);
    }

    let path = url.path().to_string();
    if path.len() > 1 && path.ends_with('/') {
        url.set_path(path.trim_end_matches('/'));
    }

    let out = url.to_string();
    if url.query().is_none() && url.path() == "/" {
        out.trim_end_matches('/').to_string()
    } else {
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases_scheme_and_host() {
        assert_eq!(
            canonicalize_url("HTTPS://WWW.Reuters.COM/world/Story-1"),
            "https://www.reuters.com/world/Story-1"
        );
    }

    #[test]
    fn test_drops_fragment_and_tracking() {
        assert_eq!(
            canonicalize_url("https://example.org/a/b?utm_source=x&id=7&fbclid=abc#comments"),
            "https://example.org/a/b?id=7"
        );
        assert_eq!(
            canonicalize_url("https://example.org/a?utm_medium=social&ref=home"),
            "https://example.org/a"
        );
    }

    #[test]
    fn test_trims_trailing_slash() {
        assert_eq!(canonicalize_url("https://example.org/news/"), "https://example.org/news");
        assert_eq!(canonicalize_url("https://example.org/"), "https://example.org");
    }

    #[test]
    fn test_same_article_different_links() {
        let a = canonicalize_url("https://bbc.co.uk/news/123?utm_campaign=rss");
        let b = canonicalize_url("https://BBC.co.uk/news/123/#top");
        assert_eq!(a, b);
    }

    #[test]
    fn test_unparseable_input() {
        assert_eq!(canonicalize_url("  Not A URL  "), "not a url");
    }
}
