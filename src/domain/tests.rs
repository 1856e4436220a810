// Domain module tests.

use super::*;

#[test]
fn test_normalize_url_adds_scheme() {
    assert_eq!(normalize_url("example.com"), "http://example.com");
    assert_eq!(normalize_url("   example.com/path  "), "http://example.com/path");
}

#[test]
fn test_normalize_url_keeps_existing_scheme() {
    assert_eq!(normalize_url("https://example.com"), "https://example.com");
    assert_eq!(normalize_url("http://example.com"), "http://example.com");
}

#[test]
fn test_url_host_lowercases_and_strips_port() {
    assert_eq!(url_host("https://WWW.Example.COM:8443/path"), "www.example.com");
}

#[test]
fn test_url_host_empty_input() {
    assert_eq!(url_host(""), "");
    assert_eq!(url_host("   "), "");
}

#[test]
fn test_raw_host_strips_userinfo_and_port() {
    assert_eq!(raw_host("http://user:pw@Example.com:8080/a@b"), "example.com");
    assert_eq!(raw_host("http://example.com?next=/x"), "example.com");
    assert_eq!(raw_host("http://[::1]:8080/"), "[::1]");
}

#[test]
fn test_raw_host_keeps_host_as_written() {
    // No WHATWG rewriting of numeric or Unicode hosts
    assert_eq!(url_host("http://3232235777/login"), "3232235777");
    assert_eq!(url_host("http://0x7f.0.0.1/"), "0x7f.0.0.1");
    assert_eq!(url_host("http://пример.com/"), "пример.com");
}

#[test]
fn test_split_host_basic() {
    let parts = split_host("www.example.com");
    assert_eq!(parts.subdomain, "www");
    assert_eq!(parts.domain, "example");
    assert_eq!(parts.suffix, "com");
    assert_eq!(parts.registered_domain, "example.com");
}

#[test]
fn test_split_host_multi_part_suffix() {
    // co.uk must be treated as a suffix, not as domain "co"
    let parts = split_host("login.mail.example.co.uk");
    assert_eq!(parts.subdomain, "login.mail");
    assert_eq!(parts.domain, "example");
    assert_eq!(parts.suffix, "co.uk");
    assert_eq!(parts.registered_domain, "example.co.uk");
    assert_eq!(parts.subdomain_count(), 2);
}

#[test]
fn test_split_host_no_subdomain() {
    let parts = split_host("google.com");
    assert_eq!(parts.subdomain, "");
    assert_eq!(parts.subdomain_count(), 0);
    assert_eq!(parts.registered_domain, "google.com");
}

#[test]
fn test_split_host_ipv4() {
    let parts = split_host("192.168.1.1");
    assert_eq!(parts.domain, "192.168.1.1");
    assert_eq!(parts.suffix, "");
    assert_eq!(parts.subdomain, "");
    assert_eq!(parts.registered_domain, "192.168.1.1");
}

#[test]
fn test_split_host_trailing_dot() {
    let parts = split_host("example.com.");
    assert_eq!(parts.registered_domain, "example.com");
}

#[test]
fn test_split_host_suffix_only() {
    let parts = split_host("gov.uk");
    assert_eq!(parts.domain, "");
    assert_eq!(parts.suffix, "gov.uk");
    assert_eq!(parts.registered_domain, "gov.uk");
}

#[test]
fn test_split_host_empty() {
    assert_eq!(split_host(""), DomainParts::default());
}

#[test]
fn test_domain_parts_from_url() {
    let parts = domain_parts("https://accounts.google.com/signin?x=1");
    assert_eq!(parts.subdomain, "accounts");
    assert_eq!(parts.domain, "google");
    assert_eq!(parts.suffix, "com");
}

#[test]
fn test_domain_parts_without_scheme() {
    let parts = domain_parts("example.tk");
    assert_eq!(parts.domain, "example");
    assert_eq!(parts.suffix, "tk");
}

#[test]
fn test_split_host_ignores_private_suffixes() {
    // github.io and netlify.app are private registry entries, not ICANN suffixes
    let parts = split_host("paypal.github.io");
    assert_eq!(parts.subdomain, "paypal");
    assert_eq!(parts.domain, "github");
    assert_eq!(parts.suffix, "io");
    assert_eq!(parts.registered_domain, "github.io");

    let parts = split_host("paypal.netlify.app");
    assert_eq!(parts.subdomain, "paypal");
    assert_eq!(parts.domain, "netlify");
    assert_eq!(parts.suffix, "app");

    let parts = split_host("login.paypal.herokuapp.com");
    assert_eq!(parts.subdomain, "login.paypal");
    assert_eq!(parts.domain, "herokuapp");
    assert_eq!(parts.suffix, "com");
}

#[test]
fn test_split_host_numeric_and_unicode_hosts() {
    let parts = split_host("3232235777");
    assert_eq!(parts.domain, "3232235777");
    assert_eq!(parts.suffix, "");

    let parts = split_host("0x7f.0.0.1");
    assert_eq!(parts.subdomain, "0x7f.0.0");
    assert_eq!(parts.domain, "1");
    assert_eq!(parts.suffix, "");

    let parts = split_host("пример.com");
    assert_eq!(parts.domain, "пример");
    assert_eq!(parts.suffix, "com");
}

#[test]
fn test_ipv4_literal_matches_split() {
    assert!(is_ipv4_literal("10.0.0.1"));
    assert!(is_ipv4_literal("01.2.3.4"));
    assert!(!is_ipv4_literal("256.1.1.1"));
    assert!(!is_ipv4_literal("3232235777"));
    // Anything the extractor calls an IP is also split as one
    assert_eq!(split_host("01.2.3.4").domain, "01.2.3.4");
}
