use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use tracing::error;

/// Which kind of photo link a URL was recognized as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PhotoKind {
    RedditImage,
    RedditGallery,
    ImgurImage,
    ImgurPage,
    ImgurAlbum,
}

/// Accepted photo links, scheme excluded. Checked in order; the first match wins.
pub const PHOTO_URL_PATTERNS: &[(PhotoKind, &str)] = &[
    (PhotoKind::RedditImage, r"i\.redd\.it/[A-Za-z0-9]+\.jpe?g"),
    (PhotoKind::RedditImage, r"i\.redd\.it/[A-Za-z0-9]+\.png"),
    (PhotoKind::RedditGallery, r"www\.reddit\.com/gallery/[A-Za-z0-9]+"),
    (PhotoKind::ImgurImage, r"imgur\.com/[A-Za-z0-9]+\.jpe?g"),
    (PhotoKind::ImgurImage, r"imgur\.com/[A-Za-z0-9]+\.png"),
    (PhotoKind::ImgurPage, r"imgur\.com/[A-Za-z0-9]+"),
    (PhotoKind::ImgurAlbum, r"imgur\.com/a/[A-Za-z0-9]+"),
    (PhotoKind::ImgurImage, r"i\.imgur\.com/[A-Za-z0-9]+\.jpe?g"),
    (PhotoKind::ImgurImage, r"i\.imgur\.com/[A-Za-z0-9]+\.png"),
    (PhotoKind::ImgurPage, r"i\.imgur\.com/[A-Za-z0-9]+"),
    (PhotoKind::ImgurAlbum, r"i\.imgur\.com/a/[A-Za-z0-9]+"),
];

/// Precompiled, anchored form of [`PHOTO_URL_PATTERNS`].
pub struct PhotoFilter {
    patterns: Vec<(PhotoKind, Regex)>,
}

impl PhotoFilter {
    /// Process-wide filter, compiled on first use.
    pub fn shared() -> &'static Self {
        static FILTER: OnceLock<PhotoFilter> = OnceLock::new();
        FILTER.get_or_init(Self::compile)
    }

    fn compile() -> Self {
        let patterns = PHOTO_URL_PATTERNS
            .iter()
            .filter_map(|(kind, body)| match Regex::new(&format!("^https?://{body}$")) {
                Ok(re) => Some((*kind, re)),
                Err(err) => {
                    error!(pattern = body, "Invalid photo url pattern: {}", err);
                    None
                }
            })
            .collect();

        Self { patterns }
    }

    /// Case-sensitive match of the whole URL against the allow-list.
    pub fn classify(&self, url: &str) -> Option<PhotoKind> {
        self.patterns
            .iter()
            .find(|(_, re)| re.is_match(url))
            .map(|(kind, _)| *kind)
    }

    pub fn is_photo_url(&self, url: &str) -> bool {
        self.classify(url).is_some()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// The allow-list as a single alternation, for clients that test URLs
/// with one expression.
pub fn combined_pattern() -> String {
    let bodies: Vec<&str> = PHOTO_URL_PATTERNS.iter().map(|(_, body)| *body).collect();
    format!("^https?://({})$", bodies.join("|"))
}
