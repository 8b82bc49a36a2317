//! Root-domain canonicalization backed by the Public Suffix List.
//!
//! Only ICANN suffixes split a name. Private registry suffixes such as
//! `github.io` or `blogspot.com` are walked down to the ICANN suffix
//! beneath them, so every site hosted under one platform shares the
//! platform's root domain:
//! - `https://blog.example.co.uk/about` -> `example.co.uk`
//! - `www.example.com` -> `example.com`
//! - `mysite.github.io` -> `github.io`

use psl::Type;
use std::net::IpAddr;
use url::{Host, Url};

use crate::models::RootDomain;

/// Canonicalizes a URL or bare domain to its registrable root domain.
///
/// Input that has no parseable domain part comes back lower-cased and
/// trimmed instead of failing; such keys are low-confidence but still
/// usable for deduplication. The function is idempotent.
#[must_use]
pub fn root_domain(input: &str) -> RootDomain {
    let cleaned = input.trim().to_lowercase();
    let value = match extract_host(&cleaned) {
        Some(host) if host.parse::<IpAddr>().is_ok() => host,
        Some(host) => registrable_domain(&host).unwrap_or(cleaned),
        None => cleaned,
    };
    RootDomain::from_normalized(value)
}

/// Returns the ICANN public suffix of a URL or domain, lower-cased.
///
/// `None` when no host can be extracted or the host is an IP address.
#[must_use]
pub fn public_suffix(input: &str) -> Option<String> {
    let host = extract_host(&input.trim().to_lowercase())?;
    if host.parse::<IpAddr>().is_ok() {
        return None;
    }
    icann_suffix(&host).map(str::to_string)
}

/// Extracts the lower-cased host from a URL or bare `host[/path]` string.
///
/// Internationalized names come back in Unicode form, so `xn--` labels
/// and their Unicode spelling share one key.
fn extract_host(input: &str) -> Option<String> {
    if input.is_empty() {
        return None;
    }
    let parsed = if input.contains("://") {
        Url::parse(input)
    } else {
        Url::parse(&format!("http://{input}"))
    };

    let host = match parsed.ok().as_ref().and_then(Url::host) {
        Some(Host::Domain(domain)) => domain.trim_end_matches('.').to_lowercase(),
        Some(Host::Ipv4(ip)) => return Some(ip.to_string()),
        Some(Host::Ipv6(ip)) => return Some(ip.to_string()),
        None => lenient_host(input)?,
    };
    let host = url::quirks::domain_to_unicode(&host);
    (!host.is_empty()).then_some(host)
}

/// Host part of a URL the parser rejected, e.g. one with an out-of-range
/// port. Scheme, userinfo, port and path are cut off by hand.
fn lenient_host(input: &str) -> Option<String> {
    let rest = input.split_once("://").map_or(input, |(_, rest)| rest);
    let authority = rest.split(['/', '?', '#']).next()?;
    let host_port = authority.rsplit_once('@').map_or(authority, |(_, host)| host);
    let host = match host_port.rsplit_once(':') {
        Some((host, port)) if port.chars().all(|c| c.is_ascii_digit()) => host,
        _ => host_port,
    };
    let host = host.trim_matches('.');
    let valid = !host.is_empty()
        && host.contains('.')
        && host.chars().all(|c| c.is_alphanumeric() || matches!(c, '-' | '.' | '_'));
    valid.then(|| host.to_lowercase())
}

/// `label.suffix` for the label directly left of the ICANN suffix.
fn registrable_domain(host: &str) -> Option<String> {
    let suffix = icann_suffix(host)?;
    let prefix = host.strip_suffix(suffix)?.strip_suffix('.')?;
    let label = prefix.rsplit('.').next()?;
    if label.is_empty() {
        return None;
    }
    Some(format!("{label}.{suffix}"))
}

fn icann_suffix(host: &str) -> Option<&str> {
    let mut name = host;
    loop {
        let typ = psl::suffix(name.as_bytes())?.typ();
        let suffix = psl::suffix_str(name)?;
        if typ != Some(Type::Private) {
            return Some(suffix);
        }
        name = suffix.split_once('.')?.1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root(input: &str) -> String {
        root_domain(input).as_str().to_string()
    }

    #[test]
    fn test_strips_scheme_path_and_subdomain() {
        assert_eq!(root("https://blog.example.com/write-for-us?ref=1"), "example.com");
        assert_eq!(root("http://www.example.com:8080/"), "example.com");
        assert_eq!(root("www.example.com/about"), "example.com");
        assert_eq!(root("  Example.COM.  "), "example.com");
    }

    #[test]
    fn test_keeps_second_level_suffix() {
        assert_eq!(root("https://blog.example.co.uk/"), "example.co.uk");
        assert_eq!(root("a.b.c.example.co.uk"), "example.co.uk");
    }

    #[test]
    fn test_private_suffix_collapses_to_platform() {
        assert_eq!(root("https://mysite.github.io/post"), "github.io");
        assert_eq!(root("someone.blogspot.com"), "blogspot.com");
    }

    #[test]
    fn test_same_site_same_root() {
        let urls = [
            "https://example.org",
            "http://www.example.org/contact",
            "https://news.example.org/2024/01/post.html",
            "example.org",
        ];
        for url in urls {
            assert_eq!(root(url), "example.org", "{url}");
        }
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            "https://blog.example.co.uk/",
            "sub.example.com",
            "not a domain!!",
            "localhost",
            "192.168.0.1",
            "",
        ];
        for input in inputs {
            let once = root(input);
            assert_eq!(root(&once), once, "{input}");
        }
    }

    #[test]
    fn test_malformed_input_falls_back_to_lowercase() {
        assert_eq!(root("Not A Domain!!"), "not a domain!!");
        assert_eq!(root("localhost"), "localhost");
        assert_eq!(root("   "), "");
    }

    #[test]
    fn test_internationalized_host_stays_unicode() {
        assert_eq!(root("https://www.münchen.de/kontakt"), "münchen.de");
        assert_eq!(root("http://xn--mnchen-3ya.de/"), "münchen.de");
        assert_eq!(root("münchen.de"), "münchen.de");
    }

    #[test]
    fn test_unparseable_url_keeps_host() {
        let domain = root_domain("http://example.com:99999/");
        assert_eq!(domain.as_str(), "example.com");
        assert_eq!(domain.homepage(), "https://example.com/");
        assert_eq!(root("https://user@blog.example.co.uk:70000/x?y"), "example.co.uk");
        assert_eq!(root("http://bad host.com:99999/"), "http://bad host.com:99999/");
    }

    #[test]
    fn test_ip_host_kept() {
        assert_eq!(root("http://10.0.0.7/admin"), "10.0.0.7");
    }

    #[test]
    fn test_public_suffix() {
        assert_eq!(public_suffix("example.co.uk").as_deref(), Some("co.uk"));
        assert_eq!(public_suffix("https://shop.example.lv/x").as_deref(), Some("lv"));
        assert_eq!(public_suffix("mysite.github.io").as_deref(), Some("io"));
        assert_eq!(public_suffix("10.0.0.7"), None);
        assert_eq!(public_suffix(""), None);
    }
}
