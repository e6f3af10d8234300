use super::model::Results;
use url::form_urlencoded;

/// Number of articles requested from upstream per page.
pub const PAGE_SIZE: i64 = 20;

/// `ceil(total / page_size)`, never negative.
pub fn total_pages(total: i64, page_size: i64) -> i64 {
    if total <= 0 || page_size <= 0 {
        return 0;
    }
    total / page_size + i64::from(total % page_size != 0)
}

/// State of a single search request.
///
/// `next_page` is the page a follow-up request should fetch. It starts at the
/// requested page and is only advanced once results for it came back and it
/// was not the last page, so the page on screen is derived from it.
#[derive(Debug, Clone)]
pub struct Search {
    pub query: String,
    pub language: Option<String>,
    pub next_page: i64,
    pub total_pages: i64,
    pub results: Results,
}

impl Search {
    pub fn new(query: impl Into<String>, language: Option<String>, requested_page: i64) -> Self {
        Self {
            query: query.into(),
            language,
            next_page: requested_page,
            total_pages: 0,
            results: Results::default(),
        }
    }

    pub fn apply_results(&mut self, results: Results) {
        self.total_pages = total_pages(results.total_results, PAGE_SIZE);
        self.results = results;
        if !self.is_last_page() {
            self.next_page = self.next_page.saturating_add(1);
        }
    }

    pub fn is_last_page(&self) -> bool {
        self.next_page >= self.total_pages
    }

    pub fn current_page(&self) -> i64 {
        if self.next_page == 1 {
            return self.next_page;
        }
        self.next_page.saturating_sub(1)
    }

    /// May be zero or negative; see [`Search::has_previous_page`].
    pub fn previous_page(&self) -> i64 {
        self.current_page().saturating_sub(1)
    }

    pub fn has_previous_page(&self) -> bool {
        self.previous_page() > 0
    }

    /// Relative link to another page of this search, keeping the query and language.
    pub fn page_href(&self, page: i64) -> String {
        let mut qs = form_urlencoded::Serializer::new(String::new());
        qs.append_pair("q", &self.query);
        if let Some(lang) = self.language.as_deref() {
            qs.append_pair("language", lang);
        }
        qs.append_pair("page", &page.to_string());
        format!("/search?{}", qs.finish())
    }

    pub fn next_page_href(&self) -> String {
        self.page_href(self.next_page)
    }

    pub fn previous_page_href(&self) -> String {
        self.page_href(self.previous_page())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn results_with_total(total: i64) -> Results {
        Results {
            status: "ok".into(),
            total_results: total,
            articles: Vec::new(),
        }
    }

    #[test]
    fn total_pages_rounds_up() {
        for size in [1, 3, 7, 20, 100] {
            for total in 0..250 {
                let expected = (total as f64 / size as f64).ceil() as i64;
                assert_eq!(total_pages(total, size), expected, "total={total} size={size}");
            }
        }
    }

    #[test]
    fn total_pages_clamps_negative_total() {
        assert_eq!(total_pages(-5, 20), 0);
    }

    #[test]
    fn total_pages_handles_huge_totals() {
        assert_eq!(total_pages(i64::MAX, 20), i64::MAX / 20 + 1);
        assert_eq!(total_pages(i64::MAX, 1), i64::MAX);
    }

    #[test]
    fn extreme_page_numbers_saturate() {
        let mut low = Search::new("x", None, i64::MIN);
        low.apply_results(results_with_total(45));
        assert_eq!(low.next_page, i64::MIN + 1);
        assert_eq!(low.current_page(), i64::MIN);
        assert_eq!(low.previous_page(), i64::MIN);
        assert!(!low.has_previous_page());

        let mut high = Search::new("x", None, i64::MAX);
        high.apply_results(results_with_total(i64::MAX));
        assert!(high.is_last_page());
        assert_eq!(high.next_page, i64::MAX);
        assert_eq!(high.current_page(), i64::MAX - 1);
        assert_eq!(high.next_page_href(), format!("/search?q=x&page={}", i64::MAX));
    }

    #[test]
    fn last_page_iff_requested_reaches_total() {
        for requested in 1..6 {
            let mut s = Search::new("bitcoin", None, requested);
            s.total_pages = 3;
            assert_eq!(s.is_last_page(), requested >= 3, "requested={requested}");
        }
    }

    #[test]
    fn current_page_is_asymmetric_for_first_page() {
        assert_eq!(Search::new("x", None, 1).current_page(), 1);
        for n in 2..10 {
            assert_eq!(Search::new("x", None, n).current_page(), n - 1);
        }
    }

    #[test]
    fn previous_page_follows_current() {
        let first = Search::new("x", None, 1);
        assert_eq!(first.previous_page(), 0);
        assert!(!first.has_previous_page());

        let later = Search::new("x", None, 4);
        assert_eq!(later.previous_page(), 2);
        assert!(later.has_previous_page());
    }

    #[test]
    fn first_page_advances_when_more_remain() {
        let mut s = Search::new("bitcoin", None, 1);
        s.apply_results(results_with_total(45));
        assert_eq!(s.total_pages, 3);
        assert!(!s.is_last_page());
        assert_eq!(s.next_page, 2);
        // The page shown is still page one.
        assert_eq!(s.current_page(), 1);
    }

    #[test]
    fn last_page_does_not_advance() {
        let mut s = Search::new("bitcoin", None, 3);
        s.apply_results(results_with_total(45));
        assert_eq!(s.total_pages, 3);
        assert!(s.is_last_page());
        assert_eq!(s.next_page, 3);
    }

    #[test]
    fn zero_results_is_always_last_page() {
        let mut s = Search::new("nothing", None, 1);
        s.apply_results(results_with_total(0));
        assert_eq!(s.total_pages, 0);
        assert!(s.is_last_page());
        assert_eq!(s.next_page, 1);
    }

    #[test]
    fn page_href_keeps_query_and_language() {
        let s = Search::new("rust lang", Some("fr".into()), 1);
        assert_eq!(s.page_href(2), "/search?q=rust+lang&language=fr&page=2");

        let plain = Search::new("a&b", None, 1);
        assert_eq!(plain.page_href(5), "/search?q=a%26b&page=5");
    }

    #[test]
    fn next_and_previous_hrefs_follow_page_state() {
        let mut s = Search::new("bitcoin", None, 2);
        s.apply_results(results_with_total(100));
        assert_eq!(s.next_page, 3);
        assert_eq!(s.next_page_href(), "/search?q=bitcoin&page=3");
        assert_eq!(s.previous_page_href(), "/search?q=bitcoin&page=1");
    }
}
