use url::Url;

/// Number of submissions requested per page.
pub const PAGE_LIMIT: u32 = 100;

/// Per-session search settings, fixed when the results component is built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchOptions {
    pub include_over_18: bool,
}

/// One outbound page fetch for a query context.
///
/// `generation` identifies the query context that issued the request; a
/// response for an older generation is discarded on completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub generation: u64,
    pub query: String,
    pub after: Option<String>,
    pub include_over_18: bool,
}

impl PageRequest {
    /// Builds the search URL: `q`, `limit`, then `include_over_18` and
    /// `after` when set. No other parameters are sent.
    pub fn url(&self, endpoint: &Url) -> Url {
        let mut url = endpoint.clone();
        url.set_query(None);
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("q", &self.query);
            pairs.append_pair("limit", &PAGE_LIMIT.to_string());
            if self.include_over_18 {
                pairs.append_pair("include_over_18", "on");
            }
            if let Some(after) = &self.after {
                pairs.append_pair("after", after);
            }
        }
        url
    }
}
