use serde::{Deserialize, Serialize};

/// One page of search results as returned by `search.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Listing {
    pub data: ListingData,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListingData {
    #[serde(default)]
    pub children: Vec<Child>,
    /// Continuation cursor; `None` when there are no further pages.
    #[serde(default)]
    pub after: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Child {
    pub data: Submission,
}

/// The subset of a Reddit submission the controller reads.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Submission {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub thumbnail: Option<String>,
    pub thumbnail_width: Option<u32>,
    pub thumbnail_height: Option<u32>,
    #[serde(default)]
    pub preview: Option<Preview>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub over_18: bool,
    #[serde(default)]
    pub permalink: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub subreddit: String,
    #[serde(default)]
    pub created_utc: f64,
    #[serde(default)]
    pub author: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Preview {
    #[serde(default)]
    pub images: Vec<PreviewImage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewImage {
    pub source: ImageSource,
    #[serde(default)]
    pub resolutions: Vec<ImageSource>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSource {
    pub url: String,
    pub width: u32,
    pub height: u32,
}
