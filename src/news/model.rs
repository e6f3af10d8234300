use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use url::Url;

/// Upstream is inconsistent about the type of `source.id`: most sources send
/// a slug string, some send a number, many send `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SourceId {
    Text(String),
    Number(serde_json::Number),
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceId::Text(s) => f.write_str(s),
            SourceId::Number(n) => write!(f, "{}", n),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Source {
    #[serde(default)]
    pub id: Option<SourceId>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    #[serde(default)]
    pub source: Source,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub author: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(default, deserialize_with = "web_link")]
    pub url: String,
    #[serde(default, deserialize_with = "web_link")]
    pub url_to_image: String,
    #[serde(default, deserialize_with = "rfc3339_opt", skip_serializing)]
    pub published_at: Option<OffsetDateTime>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub content: String,
}

impl Article {
    /// Publication date for display, e.g. `January 2, 2006`.
    pub fn formatted_published_date(&self) -> String {
        match self.published_at {
            Some(at) => format!("{} {}, {}", at.month(), at.day(), at.year()),
            None => String::new(),
        }
    }
}

/// Response envelope returned by the search endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Results {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub status: String,
    #[serde(default)]
    pub total_results: i64,
    #[serde(default)]
    pub articles: Vec<Article>,
}

fn null_as_empty<'de, D>(de: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(de)?.unwrap_or_default())
}

/// Links end up in `href`/`src` attributes, so anything that is not an
/// absolute http(s) URL is dropped.
fn web_link<'de, D>(de: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = null_as_empty(de)?;
    Ok(normalize_link(&raw).unwrap_or_default())
}

fn normalize_link(candidate: &str) -> Option<String> {
    let candidate = candidate.trim();
    if candidate.is_empty() {
        return None;
    }
    let parsed = Url::parse(candidate).ok()?;
    match parsed.scheme() {
        "http" | "https" => Some(parsed.into()),
        _ => None,
    }
}

fn rfc3339_opt<'de, D>(de: D) -> Result<Option<OffsetDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(de)? else {
        return Ok(None);
    };
    OffsetDateTime::parse(&raw, &Rfc3339)
        .map(Some)
        .map_err(serde::de::Error::custom)
}
