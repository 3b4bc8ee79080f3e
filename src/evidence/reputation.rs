use url::Url;

/// Publisher names, matched case-insensitively as substrings.
const REPUTABLE_PUBLISHERS: &[&str] = &[
    "reuters",
    "associated press",
    "ap news",
    "bbc",
    "npr",
    "pbs",
    "new york times",
    "washington post",
    "wall street journal",
    "the guardian",
    "bloomberg",
    "financial times",
    "the economist",
    "al jazeera",
    "cnn",
    "nbc news",
    "cbs news",
    "abc news",
    "axios",
    "politico",
    "the hill",
    "los angeles times",
    "usa today",
    "time",
    "nature",
    "science",
];

/// Hosts, matched as exact host or subdomain.
const REPUTABLE_DOMAINS: &[&str] = &[
    "reuters.com",
    "apnews.com",
    "bbc.co.uk",
    "bbc.com",
    "npr.org",
    "pbs.org",
    "nytimes.com",
    "washingtonpost.com",
    "wsj.com",
    "theguardian.com",
    "bloomberg.com",
    "ft.com",
    "economist.com",
    "aljazeera.com",
    "cnn.com",
    "nbcnews.com",
    "cbsnews.com",
    "abcnews.go.com",
    "axios.com",
    "politico.com",
    "nature.com",
    "science.org",
];

fn publisher_matches(publisher: &str) -> bool {
    let lower = publisher.trim().to_lowercase();
    if lower.is_empty() {
        return false;
    }
    REPUTABLE_PUBLISHERS.iter().any(|name| {
        if name.len() <= 4 {
            lower.split(|c: char| !c.is_alphanumeric()).any(|w| w == *name)
        } else {
            lower.contains(name)
        }
    })
}

fn domain_matches(url: &str) -> bool {
    let Some(host) = Url::parse(url).ok().and_then(|u| u.host_str().map(str::to_lowercase)) else {
        return false;
    };
    REPUTABLE_DOMAINS
        .iter()
        .any(|d| host == *d || host.ends_with(&format!(".{d}")))
}

/// Returns `true` when the publisher or URL host is on the allow-list.
pub fn is_reputable(publisher: &str, url: &str) -> bool {
    publisher_matches(publisher) || domain_matches(url)
}
