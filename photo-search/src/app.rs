use tracing::debug;

use crate::{
    client::SearchApi,
    request::{PageRequest, SearchOptions},
    results::{FetchOutcome, SearchResults},
};

pub const QUERY_INPUT: &str = "#query";
pub const SEARCH_BUTTON: &str = "#search";
pub const MORE_BUTTON: &str = "#more";

/// Parameters read once from the page URL at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeepLink {
    pub query: Option<String>,
    pub nsfw: bool,
}

impl DeepLink {
    /// Parses a location search string such as `?q=sunset&nsfw=1`.
    ///
    /// Only the first occurrence of each parameter counts. `nsfw` must be
    /// exactly `1`; an empty `q` is treated as absent.
    pub fn parse(search: &str) -> Self {
        let search = search.strip_prefix('?').unwrap_or(search);
        let mut query = None;
        let mut nsfw = None;

        for (key, value) in url::form_urlencoded::parse(search.as_bytes()) {
            match key.as_ref() {
                "q" if query.is_none() => query = Some(value.into_owned()),
                "nsfw" if nsfw.is_none() => nsfw = Some(value == "1"),
                _ => {}
            }
        }

        Self {
            query: query.filter(|q| !q.is_empty()),
            nsfw: nsfw.unwrap_or(false),
        }
    }

    pub fn options(&self) -> SearchOptions {
        SearchOptions {
            include_over_18: self.nsfw,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Click,
    KeyUp,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiEvent {
    pub target: String,
    pub kind: EventKind,
    pub key: Option<String>,
}

impl UiEvent {
    pub fn click(target: &str) -> Self {
        Self {
            target: target.to_string(),
            kind: EventKind::Click,
            key: None,
        }
    }

    pub fn key_up(target: &str, key: &str) -> Self {
        Self {
            target: target.to_string(),
            kind: EventKind::KeyUp,
            key: Some(key.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Search,
    LoadMore,
}

struct Binding {
    target: &'static str,
    kind: EventKind,
    key: Option<&'static str>,
    action: Action,
}

/// Explicit `(element, event) -> action` table.
#[derive(Default)]
pub struct EventBindings {
    bindings: Vec<Binding>,
}

impl EventBindings {
    pub fn bind(
        &mut self,
        target: &'static str,
        kind: EventKind,
        key: Option<&'static str>,
        action: Action,
    ) -> &mut Self {
        self.bindings.push(Binding {
            target,
            kind,
            key,
            action,
        });
        self
    }

    pub fn resolve(&self, event: &UiEvent) -> Option<Action> {
        self.bindings
            .iter()
            .find(|binding| {
                binding.target == event.target
                    && binding.kind == event.kind
                    && binding
                        .key
                        .map_or(true, |key| event.key.as_deref() == Some(key))
            })
            .map(|binding| binding.action)
    }
}

/// Top-level app component: the search box, the search button and the
/// results list.
pub struct PhotoSearchApp {
    input: String,
    results: SearchResults,
    bindings: EventBindings,
}

impl PhotoSearchApp {
    pub fn new(options: SearchOptions, thumbnail_size: u32) -> Self {
        let mut bindings = EventBindings::default();
        bindings
            .bind(QUERY_INPUT, EventKind::KeyUp, Some("Enter"), Action::Search)
            .bind(SEARCH_BUTTON, EventKind::Click, None, Action::Search)
            .bind(MORE_BUTTON, EventKind::Click, None, Action::LoadMore);

        Self {
            input: String::new(),
            results: SearchResults::new(options, thumbnail_size),
            bindings,
        }
    }

    /// Builds the app from the page's location search string. A deep-linked
    /// query is copied into the search box and submitted right away.
    pub fn boot(location_search: &str, thumbnail_size: u32) -> (Self, Option<PageRequest>) {
        let link = DeepLink::parse(location_search);
        let mut app = Self::new(link.options(), thumbnail_size);

        let request = link.query.and_then(|query| {
            app.input.clone_from(&query);
            app.submit_query(&query)
        });

        (app, request)
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn results(&self) -> &SearchResults {
        &self.results
    }

    pub fn results_mut(&mut self) -> &mut SearchResults {
        &mut self.results
    }

    /// Starts a new search unless `text` is empty.
    pub fn submit_query(&mut self, text: &str) -> Option<PageRequest> {
        if text.is_empty() {
            return None;
        }
        debug!(query = text, "query");
        Some(self.results.set_query(text))
    }

    /// Routes a UI event through the binding table.
    pub fn dispatch(&mut self, event: &UiEvent) -> Option<PageRequest> {
        match self.bindings.resolve(event)? {
            Action::Search => {
                let text = self.input.clone();
                self.submit_query(&text)
            }
            Action::LoadMore => self.results.load_more(),
        }
    }

    pub async fn run(&mut self, api: &dyn SearchApi, request: PageRequest) -> FetchOutcome {
        self.results.fill(api, request).await
    }
}
