use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{photo_filter::PhotoKind, submission::Submission, thumbnail::Thumbnail};

const REDDIT_BASE: &str = "https://www.reddit.com";

/// Adult-content marker; the lowercase name doubles as the CSS class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Marker {
    Nsfw,
    Sfw,
}

impl Marker {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Nsfw => "nsfw",
            Self::Sfw => "sfw",
        }
    }
}

/// View-model for one accepted, unique submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultCard {
    pub url: String,
    pub kind: PhotoKind,
    pub thumb: String,
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub marker: Marker,
    pub permalink: String,
    pub sid: String,
    pub sr: String,
    pub subreddit_url: String,
    pub timestamp: i64,
    pub date: String,
    pub author: String,
}

impl ResultCard {
    pub fn new(posting: &Submission, kind: PhotoKind, thumb: Thumbnail) -> Self {
        #[allow(clippy::cast_possible_truncation)]
        let timestamp = posting.created_utc.trunc() as i64;

        Self {
            url: posting.url.clone(),
            kind,
            thumb: thumb.url,
            width: thumb.width,
            height: thumb.height,
            title: posting.title.clone(),
            marker: if posting.over_18 {
                Marker::Nsfw
            } else {
                Marker::Sfw
            },
            permalink: format!("{REDDIT_BASE}{}", posting.permalink),
            sid: posting.name.clone(),
            sr: posting.subreddit.clone(),
            subreddit_url: format!("{REDDIT_BASE}/r/{}", posting.subreddit),
            timestamp,
            date: format_date(timestamp),
            author: posting.author.clone(),
        }
    }
}

fn format_date(timestamp: i64) -> String {
    DateTime::<Utc>::from_timestamp(timestamp, 0)
        .map(|date| date.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_default()
}

impl fmt::Display for ResultCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.marker == Marker::Nsfw {
            write!(f, "[NSFW] ")?;
        }
        writeln!(f, "{}", self.title)?;
        writeln!(
            f,
            "  Submitted on {} by {} to r/{}",
            self.date, self.author, self.sr
        )?;
        writeln!(f, "  {}", self.url)?;
        write!(f, "  {}", self.permalink)
    }
}
