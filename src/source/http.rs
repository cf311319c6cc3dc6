// src/source/http.rs
// =============================================================================
// This module fetches pages over HTTP and turns them into ParsedPage values.
//
// How it works:
// 1. GET the page with reqwest (non-2xx is a failure)
// 2. Parse the HTML with scraper
// 3. Collect absolute http/https links from <a href="...">
// 4. Count the words in the page text
//
// Word rules:
// - lowercased
// - split on whitespace
// - anything that isn't a letter or digit is stripped
// - empty words and words matching an ignored-word pattern are dropped
//
// Rust concepts:
// - scraper: CSS selectors over a parsed DOM
// - url: resolving relative links against the page URL
// - regex: ignored-word patterns
// =============================================================================

use super::{PageSource, ParsedPage};
use crate::config::compile_anchored;
use crate::error::{ConfigError, FetchError};
use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use scraper::{Html, Selector};
use std::collections::HashMap;
use std::time::Duration;
use url::Url;

/// Page source backed by a real HTTP client.
#[derive(Debug, Clone)]
pub struct HttpPageSource {
    client: Client,
    ignored_words: Vec<Regex>,
}

impl HttpPageSource {
    // Builds the source with a per-request timeout
    pub fn new(request_timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(request_timeout)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;

        Ok(Self {
            client,
            ignored_words: Vec::new(),
        })
    }

    // Replaces the ignored-word patterns
    //
    // Like ignored URLs, a pattern has to match the whole word.
    pub fn with_ignored_words(mut self, patterns: &[String]) -> Result<Self, ConfigError> {
        self.ignored_words = compile_anchored(patterns)?;
        Ok(self)
    }

    async fn fetch_page(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status().as_u16()));
        }

        Ok(response.text().await?)
    }
}

#[async_trait]
impl PageSource for HttpPageSource {
    async fn fetch_and_parse(&self, url: &str) -> Result<ParsedPage, FetchError> {
        let base = Url::parse(url).map_err(|e| FetchError::InvalidUrl(format!("{url}: {e}")))?;
        let html = self.fetch_page(url).await?;
        Ok(parse_page(&html, &base, &self.ignored_words))
    }
}

/// Parses an HTML document into word counts and outbound links.
pub fn parse_page(html: &str, base: &Url, ignored_words: &[Regex]) -> ParsedPage {
    let document = Html::parse_document(html);

    ParsedPage {
        word_counts: count_words(&document, ignored_words),
        links: extract_links(&document, base),
    }
}

fn count_words(document: &Html, ignored_words: &[Regex]) -> HashMap<String, u64> {
    let mut counts = HashMap::new();

    // Text outside <body> (title, scripts in <head>) is not page content
    let body_selector = Selector::parse("body").expect("constant selector is valid");
    let Some(body) = document.select(&body_selector).next() else {
        return counts;
    };

    for text in body.text() {
        for raw in text.split_whitespace() {
            let word: String = raw
                .chars()
                .filter(|c| c.is_alphanumeric())
                .flat_map(char::to_lowercase)
                .collect();

            if word.is_empty() || ignored_words.iter().any(|re| re.is_match(&word)) {
                continue;
            }

            *counts.entry(word).or_insert(0) += 1;
        }
    }

    counts
}

fn extract_links(document: &Html, base: &Url) -> Vec<String> {
    let selector = Selector::parse("a[href]").expect("constant selector is valid");

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| resolve_link(base, href))
        .collect()
}

// Resolves a link (possibly relative) to an absolute http/https URL
//
// Fragments are dropped so "page#a" and "page#b" are the same page.
fn resolve_link(base: &Url, href: &str) -> Option<String> {
    if href.starts_with('#')
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("javascript:")
    {
        return None;
    }

    let mut url = base.join(href).ok()?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return None;
    }
    url.set_fragment(None);

    Some(url.to_string())
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why does parse_page take a &Url and not a &str?
//    - The caller has already validated the page URL
//    - url.join() needs a parsed base to resolve "../other" style links
//
// 2. What does flat_map(char::to_lowercase) do?
//    - Some characters lowercase to more than one char (e.g. 'İ')
//    - to_lowercase returns an iterator, flat_map flattens them
//
// 3. Why anchor the regex with ^(?:...)$?
//    - Regex::is_match finds a match anywhere in the string
//    - Anchoring makes "the" ignore only "the", not "theory"
//
// 4. Why expect() on the selectors?
//    - The selectors are constants and known to be valid
//    - A failure here is a programmer error, not a runtime condition
// -----------------------------------------------------------------------------
