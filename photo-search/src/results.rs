use std::collections::HashSet;

use common::error::AppError;
use tracing::{debug, warn};

use crate::{
    card::ResultCard,
    client::SearchApi,
    photo_filter::PhotoFilter,
    request::{PageRequest, SearchOptions},
    submission::{Child, Listing},
    thumbnail::reddit_thumbnail,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultsState {
    /// No page has been received for the current query.
    Empty,
    /// A fetch is in flight.
    Loading,
    /// At least one page has been received.
    Populated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Appended { accepted: usize, dropped: usize },
    Failed,
    /// The response belonged to a query context that has since been replaced.
    Stale,
}

/// Incremental, deduplicated result list for one query at a time.
///
/// At most one fetch is in flight per query context. `load_more` while a
/// fetch is pending is ignored, and `set_query` bumps the generation so a
/// late response for the previous query is dropped.
pub struct SearchResults {
    options: SearchOptions,
    thumbnail_size: u32,
    filter: &'static PhotoFilter,
    query: Option<String>,
    after: Option<String>,
    seen: HashSet<String>,
    cards: Vec<ResultCard>,
    generation: u64,
    in_flight: bool,
    populated: bool,
}

impl SearchResults {
    pub fn new(options: SearchOptions, thumbnail_size: u32) -> Self {
        Self {
            options,
            thumbnail_size,
            filter: PhotoFilter::shared(),
            query: None,
            after: None,
            seen: HashSet::new(),
            cards: Vec::new(),
            generation: 0,
            in_flight: false,
            populated: false,
        }
    }

    pub fn state(&self) -> ResultsState {
        if self.in_flight {
            ResultsState::Loading
        } else if self.populated {
            ResultsState::Populated
        } else {
            ResultsState::Empty
        }
    }

    pub fn options(&self) -> SearchOptions {
        self.options
    }

    /// The component renders only while a query is active.
    pub fn visible(&self) -> bool {
        self.query.is_some()
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn cursor(&self) -> Option<&str> {
        self.after.as_deref()
    }

    pub fn cards(&self) -> &[ResultCard] {
        &self.cards
    }

    pub fn has_seen(&self, url: &str) -> bool {
        self.seen.contains(url)
    }

    /// Whether the "load more" control is shown.
    pub fn more_visible(&self) -> bool {
        self.after.is_some()
    }

    /// Whether the busy indicator is shown.
    pub fn is_busy(&self) -> bool {
        self.in_flight
    }

    /// Drops the current query context.
    pub fn clear(&mut self) {
        self.query = None;
        self.after = None;
        self.seen.clear();
        self.cards.clear();
        self.in_flight = false;
        self.populated = false;
        self.generation = self.generation.wrapping_add(1);
    }

    /// Replaces the query context and returns the request for its first page.
    pub fn set_query(&mut self, query: impl Into<String>) -> PageRequest {
        self.clear();
        let query = query.into();
        self.query = Some(query.clone());
        self.start_fetch(query)
    }

    /// Returns the request for the next page, if there is one and no fetch
    /// is already pending.
    pub fn load_more(&mut self) -> Option<PageRequest> {
        if self.in_flight {
            debug!("fetch already in flight, ignoring load more");
            return None;
        }
        if self.state() != ResultsState::Populated || self.after.is_none() {
            return None;
        }
        let query = self.query.clone()?;
        Some(self.start_fetch(query))
    }

    fn start_fetch(&mut self, query: String) -> PageRequest {
        self.in_flight = true;
        PageRequest {
            generation: self.generation,
            query,
            after: self.after.clone(),
            include_over_18: self.options.include_over_18,
        }
    }

    /// Folds the outcome of `request` back into the result list.
    pub fn complete(
        &mut self,
        request: &PageRequest,
        result: Result<Listing, AppError>,
    ) -> FetchOutcome {
        if request.generation != self.generation || !self.in_flight {
            debug!(query = %request.query, "discarding stale response");
            return FetchOutcome::Stale;
        }
        self.in_flight = false;

        match result {
            Ok(listing) => {
                let total = listing.data.children.len();
                let accepted = self.add(&listing.data.children);
                self.after = listing.data.after.filter(|after| !after.is_empty());
                self.populated = true;
                FetchOutcome::Appended {
                    accepted,
                    dropped: total.saturating_sub(accepted),
                }
            }
            Err(err) => {
                warn!(query = %request.query, error = ?err, "Reddit error: {}", err);
                FetchOutcome::Failed
            }
        }
    }

    /// Appends a card for every hit that links to a known photo host and has
    /// not been shown for this query. Returns the number of cards added.
    pub fn add(&mut self, hits: &[Child]) -> usize {
        let mut accepted = 0;
        for hit in hits {
            let posting = &hit.data;
            let url = posting.url.as_str();

            let Some(kind) = self.filter.classify(url) else {
                debug!(url, "bad");
                continue;
            };

            if self.seen.contains(url) {
                debug!(url, "dup");
                continue;
            }
            self.seen.insert(url.to_string());

            let thumb = reddit_thumbnail(posting, self.thumbnail_size);
            debug!(
                url,
                thumb = %thumb.url,
                width = thumb.width,
                height = thumb.height,
                "thumb"
            );

            self.cards.push(ResultCard::new(posting, kind, thumb));
            accepted += 1;
        }
        accepted
    }

    /// Performs `request` against `api` and folds in the response.
    pub async fn fill(&mut self, api: &dyn SearchApi, request: PageRequest) -> FetchOutcome {
        let result = api.fetch_page(&request).await;
        self.complete(&request, result)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use async_trait::async_trait;
    use serde_json::json;
    use tokio::sync::Mutex;

    use super::*;

    fn listing(urls: &[&str], after: Option<&str>) -> Listing {
        let children: Vec<_> = urls
            .iter()
            .enumerate()
            .map(|(i, url)| {
                json!({
                    "data": {
                        "url": url,
                        "title": format!("post {i}"),
                        "name": format!("t3_{i}"),
                        "subreddit": "pics",
                        "permalink": format!("/r/pics/comments/{i}/"),
                        "created_utc": 1_700_000_000.0,
                        "author": "someone",
                        "over_18": false
                    }
                })
            })
            .collect();

        serde_json::from_value(json!({ "data": { "children": children, "after": after } }))
            .expect("fixture listing decodes")
    }

    struct MockApi {
        pages: Mutex<VecDeque<Result<Listing, AppError>>>,
        requests: Mutex<Vec<PageRequest>>,
    }

    impl MockApi {
        fn new(pages: Vec<Result<Listing, AppError>>) -> Self {
            Self {
                pages: Mutex::new(pages.into()),
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl SearchApi for MockApi {
        async fn fetch_page(&self, request: &PageRequest) -> Result<Listing, AppError> {
            self.requests.lock().await.push(request.clone());
            self.pages
                .lock()
                .await
                .pop_front()
                .unwrap_or_else(|| Err(AppError::InternalError("no more pages".into())))
        }
    }

    fn urls(results: &SearchResults) -> Vec<&str> {
        results.cards().iter().map(|card| card.url.as_str()).collect()
    }

    #[test]
    fn starts_empty_and_hidden() {
        let results = SearchResults::new(SearchOptions::default(), 70);
        assert_eq!(results.state(), ResultsState::Empty);
        assert!(!results.visible());
        assert!(!results.more_visible());
        assert!(!results.is_busy());
        assert!(results.cards().is_empty());
    }

    #[test]
    fn rejected_urls_are_neither_rendered_nor_remembered() {
        let mut results = SearchResults::new(SearchOptions::default(), 70);
        let page = listing(
            &["https://example.com/abc123.jpg", "https://i.redd.it/abc123.jpg"],
            None,
        );

        let accepted = results.add(&page.data.children);

        assert_eq!(accepted, 1);
        assert_eq!(urls(&results), vec!["https://i.redd.it/abc123.jpg"]);
        assert!(!results.has_seen("https://example.com/abc123.jpg"));
        assert!(results.has_seen("https://i.redd.it/abc123.jpg"));
    }

    #[test]
    fn duplicates_within_a_page_render_once() {
        let mut results = SearchResults::new(SearchOptions::default(), 70);
        let page = listing(
            &[
                "https://i.redd.it/a.jpg",
                "https://imgur.com/b",
                "https://i.redd.it/a.jpg",
            ],
            None,
        );

        assert_eq!(results.add(&page.data.children), 2);
        assert_eq!(urls(&results), vec!["https://i.redd.it/a.jpg", "https://imgur.com/b"]);
    }

    #[tokio::test]
    async fn duplicate_across_pages_renders_once() {
        let api = MockApi::new(vec![
            Ok(listing(&["https://i.redd.it/a.jpg"], Some("t3_page2"))),
            Ok(listing(
                &["https://i.redd.it/a.jpg", "https://i.redd.it/b.png"],
                None,
            )),
        ]);
        let mut results = SearchResults::new(SearchOptions::default(), 70);

        let first = results.set_query("sunset");
        assert_eq!(results.state(), ResultsState::Loading);
        assert!(results.is_busy());
        let outcome = results.fill(&api, first).await;
        assert_eq!(outcome, FetchOutcome::Appended { accepted: 1, dropped: 0 });
        assert_eq!(results.state(), ResultsState::Populated);
        assert!(results.more_visible());

        let second = results.load_more().expect("cursor allows another page");
        assert_eq!(second.after.as_deref(), Some("t3_page2"));
        let outcome = results.fill(&api, second).await;
        assert_eq!(outcome, FetchOutcome::Appended { accepted: 1, dropped: 1 });

        assert_eq!(urls(&results), vec!["https://i.redd.it/a.jpg", "https://i.redd.it/b.png"]);
        assert!(!results.more_visible());
        assert!(results.load_more().is_none());
    }

    #[tokio::test]
    async fn new_query_discards_previous_context() {
        let api = MockApi::new(vec![
            Ok(listing(&["https://i.redd.it/a.jpg"], Some("t3_more"))),
            Ok(listing(&["https://i.redd.it/a.jpg"], None)),
        ]);
        let mut results = SearchResults::new(SearchOptions::default(), 70);

        let request = results.set_query("sunset");
        results.fill(&api, request).await;
        assert_eq!(results.cards().len(), 1);

        let request = results.set_query("mountains");
        assert!(results.cards().is_empty());
        assert!(!results.has_seen("https://i.redd.it/a.jpg"));
        assert!(!results.more_visible());
        assert!(request.after.is_none());
        assert_eq!(results.query(), Some("mountains"));

        results.fill(&api, request).await;
        assert_eq!(urls(&results), vec!["https://i.redd.it/a.jpg"]);

        let sent = api.requests.lock().await;
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[1].query, "mountains");
        assert!(sent[1].after.is_none());
    }

    #[tokio::test]
    async fn failure_keeps_previous_results_and_allows_retry() {
        let api = MockApi::new(vec![
            Ok(listing(&["https://i.redd.it/a.jpg"], Some("t3_more"))),
            Err(AppError::Status(503)),
            Ok(listing(&["https://i.redd.it/b.jpg"], None)),
        ]);
        let mut results = SearchResults::new(SearchOptions::default(), 70);

        let request = results.set_query("sunset");
        results.fill(&api, request).await;

        let request = results.load_more().expect("more available");
        assert_eq!(results.fill(&api, request).await, FetchOutcome::Failed);
        assert_eq!(results.state(), ResultsState::Populated);
        assert!(!results.is_busy());
        assert_eq!(results.cursor(), Some("t3_more"));

        let retry = results.load_more().expect("retry uses the same cursor");
        assert_eq!(retry.after.as_deref(), Some("t3_more"));
        results.fill(&api, retry).await;
        assert_eq!(urls(&results), vec!["https://i.redd.it/a.jpg", "https://i.redd.it/b.jpg"]);
    }

    #[tokio::test]
    async fn failed_first_fetch_returns_to_empty() {
        let api = MockApi::new(vec![Err(AppError::Status(500))]);
        let mut results = SearchResults::new(SearchOptions::default(), 70);

        let request = results.set_query("sunset");
        assert_eq!(results.fill(&api, request).await, FetchOutcome::Failed);
        assert_eq!(results.state(), ResultsState::Empty);
        assert!(results.visible());
        assert!(!results.more_visible());
    }

    #[test]
    fn load_more_is_ignored_while_fetch_in_flight() {
        let mut results = SearchResults::new(SearchOptions::default(), 70);
        let request = results.set_query("sunset");
        results.complete(&request, Ok(listing(&["https://i.redd.it/a.jpg"], Some("t3_more"))));

        let pending = results.load_more().expect("first click starts a fetch");
        assert!(results.load_more().is_none());
        assert!(results.is_busy());

        results.complete(&pending, Ok(listing(&["https://i.redd.it/b.jpg"], None)));
        assert_eq!(results.cards().len(), 2);
    }

    #[test]
    fn late_response_for_replaced_query_is_dropped() {
        let mut results = SearchResults::new(SearchOptions::default(), 70);
        let old = results.set_query("sunset");
        let new = results.set_query("mountains");

        let outcome = results.complete(&old, Ok(listing(&["https://i.redd.it/old.jpg"], Some("t3_x"))));
        assert_eq!(outcome, FetchOutcome::Stale);
        assert!(results.cards().is_empty());
        assert!(results.is_busy());

        results.complete(&new, Ok(listing(&["https://i.redd.it/new.jpg"], None)));
        assert_eq!(urls(&results), vec!["https://i.redd.it/new.jpg"]);
    }

    #[test]
    fn requests_carry_adult_flag_from_options() {
        let mut results = SearchResults::new(SearchOptions { include_over_18: true }, 70);
        assert!(results.set_query("sunset").include_over_18);

        let mut results = SearchResults::new(SearchOptions::default(), 70);
        assert!(!results.set_query("sunset").include_over_18);
    }

    #[test]
    fn whitespace_query_is_passed_through() {
        let mut results = SearchResults::new(SearchOptions::default(), 70);
        let request = results.set_query("  ");
        assert_eq!(request.query, "  ");
    }
}
