use url::Url;

pub const DEFAULT_ENDPOINT: &str = "https://newsapi.org/v2/everything";

// Newest articles first.
const SORT_BY: &str = "publishedAt";

/// Builds the upstream request URL. The returned URL embeds the access key,
/// so it must not end up in logs or responses.
pub fn search_url(
    endpoint: &Url,
    api_key: &str,
    term: &str,
    language: Option<&str>,
    page: i64,
    page_size: i64,
) -> Url {
    let mut url = endpoint.clone();
    {
        let mut pairs = url.query_pairs_mut();
        pairs
            .append_pair("q", term)
            .append_pair("pageSize", &page_size.to_string())
            .append_pair("page", &page.to_string())
            .append_pair("apiKey", api_key)
            .append_pair("sortBy", SORT_BY);
        if let Some(lang) = language.map(str::trim).filter(|l| !l.is_empty()) {
            pairs.append_pair("language", lang);
        }
    }
    url
}
