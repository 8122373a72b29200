//! Client-side controller for searching Reddit submissions for photos.
//!
//! The controller owns one query context at a time: the query text, the
//! continuation cursor returned by the search API, and the set of photo URLs
//! already shown. Each fetched page is filtered down to known photo hosts,
//! deduplicated against that set and turned into [`ResultCard`]s.
//!
//! Fetching is split into two halves so that any frontend can drive it:
//! [`SearchResults::set_query`] and [`SearchResults::load_more`] hand out a
//! [`PageRequest`], and [`SearchResults::complete`] folds the response back in.
//! [`SearchResults::fill`] does both against a [`SearchApi`].

pub mod app;
pub mod card;
pub mod client;
pub mod photo_filter;
pub mod request;
pub mod results;
pub mod submission;
pub mod thumbnail;

pub use app::{Action, DeepLink, EventKind, PhotoSearchApp, UiEvent};
pub use card::{Marker, ResultCard};
pub use client::{RedditClient, SearchApi};
pub use photo_filter::{PhotoFilter, PhotoKind};
pub use request::{PageRequest, SearchOptions, PAGE_LIMIT};
pub use results::{FetchOutcome, ResultsState, SearchResults};
pub use submission::{Listing, Submission};
pub use thumbnail::{reddit_thumbnail, Thumbnail};
