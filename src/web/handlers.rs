use super::AppState;
use super::page;
use crate::error::SearchError;
use crate::news::Search;
use axum::extract::{RawQuery, State};
use axum::response::Html;
use url::form_urlencoded;

/// Query parameters accepted by `/search`, already trimmed.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SearchParams {
    pub q: String,
    pub language: Option<String>,
    pub page: String,
}

impl SearchParams {
    /// Parses a raw query string. The first occurrence of a key wins and
    /// undecodable bytes are replaced rather than rejected.
    pub fn from_query(raw: &str) -> Self {
        let mut q: Option<String> = None;
        let mut language: Option<String> = None;
        let mut page: Option<String> = None;
        for (key, value) in form_urlencoded::parse(raw.as_bytes()) {
            let slot = match &*key {
                "q" => &mut q,
                "language" => &mut language,
                "page" => &mut page,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }

        Self {
            q: q.map(|s| s.trim().to_string()).unwrap_or_default(),
            language: language
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            page: page
                .filter(|p| !p.is_empty())
                .unwrap_or_else(|| "1".to_string()),
        }
    }
}

pub async fn index() -> Result<Html<String>, SearchError> {
    Ok(Html(page::render(None)?))
}

pub async fn search(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
) -> Result<Html<String>, SearchError> {
    let params = SearchParams::from_query(raw.as_deref().unwrap_or_default());
    if params.q.is_empty() {
        return index().await;
    }

    let requested: i64 = params
        .page
        .parse()
        .map_err(|_| SearchError::InvalidPage(params.page.clone()))?;

    let mut search = Search::new(params.q, params.language, requested);
    tracing::info!(query = %search.query, page = requested, language = ?search.language, "search");

    let results = state
        .news
        .search(&search.query, search.language.as_deref(), search.next_page)
        .await?;
    search.apply_results(results);

    Ok(Html(page::render(Some(&search))?))
}
