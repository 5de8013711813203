//! Locale negotiation.
//!
//! An `Accept-Language` query parameter wins over the `Accept-Language`
//! header; the header is read by descending q-weight. Anything unsupported
//! falls back to English.

use std::convert::Infallible;

use axum::extract::{FromRequestParts, Query};
use axum::http::header::ACCEPT_LANGUAGE;
use axum::http::request::Parts;
use serde::Deserialize;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Locale {
    #[default]
    En,
    Fr,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::En, Locale::Fr];

    /// Match a language tag such as `fr`, `fr-CA` or `en_US` on its primary
    /// subtag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let primary = tag.trim().split(['-', '_']).next()?;
        match primary.to_ascii_lowercase().as_str() {
            "en" => Some(Self::En),
            "fr" => Some(Self::Fr),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Fr => "fr",
        }
    }
}

/// First supported language of an `Accept-Language` header value, by
/// descending `q`. Ties keep header order.
pub fn from_accept_language(header: &str) -> Option<Locale> {
    let mut ranges: Vec<(&str, f32)> = header
        .split(',')
        .filter_map(|range| {
            let mut parts = range.split(';');
            let tag = parts.next()?.trim();
            let q = parts
                .find_map(|p| p.trim().strip_prefix("q="))
                .map_or(Some(1.0), |q| q.trim().parse::<f32>().ok())?;
            (!tag.is_empty() && q > 0.0).then_some((tag, q))
        })
        .collect();
    ranges.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranges.into_iter().find_map(|(tag, _)| Locale::from_tag(tag))
}

pub fn negotiate(query: Option<&str>, header: Option<&str>) -> Locale {
    query
        .and_then(Locale::from_tag)
        .or_else(|| header.and_then(from_accept_language))
        .unwrap_or_default()
}

#[derive(Deserialize)]
struct LocaleQuery {
    #[serde(rename = "Accept-Language")]
    accept_language: Option<String>,
}

/// Extractor yielding the caller's [`Locale`]. Never rejects.
#[derive(Clone, Copy, Debug)]
pub struct RequestLocale(pub Locale);

impl<S> FromRequestParts<S> for RequestLocale
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let query = Query::<LocaleQuery>::try_from_uri(&parts.uri)
            .ok()
            .and_then(|Query(q)| q.accept_language);
        let header = parts
            .headers
            .get(ACCEPT_LANGUAGE)
            .and_then(|v| v.to_str().ok());
        Ok(Self(negotiate(query.as_deref(), header)))
    }
}
