use serde::Serialize;

use crate::submission::{ImageSource, Submission};

/// Image shown when a submission carries neither a thumbnail nor a preview.
pub const PLACEHOLDER_THUMBNAIL: &str = "/common/image/placeholder.svg";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Thumbnail {
    pub url: String,
    pub width: u32,
    pub height: u32,
}

/// Picks a thumbnail for `posting`, sized so its longer edge is `size` pixels.
///
/// The submission's own thumbnail wins when it is a real URL (Reddit uses
/// keywords such as `self`, `default` or `nsfw` otherwise). Next comes the
/// smallest preview rendition at least `size` wide, and finally a square
/// placeholder.
pub fn reddit_thumbnail(posting: &Submission, size: u32) -> Thumbnail {
    if let Some(url) = posting
        .thumbnail
        .as_deref()
        .filter(|url| url.starts_with("https://") || url.starts_with("http://"))
    {
        let (width, height) = scale(posting.thumbnail_width, posting.thumbnail_height, size);
        return Thumbnail {
            url: url.to_string(),
            width,
            height,
        };
    }

    if let Some(image) = posting
        .preview
        .as_ref()
        .and_then(|preview| preview.images.first())
    {
        let rendition: &ImageSource = image
            .resolutions
            .iter()
            .filter(|resolution| resolution.width >= size)
            .min_by_key(|resolution| resolution.width)
            .unwrap_or(&image.source);
        let (width, height) = scale(Some(rendition.width), Some(rendition.height), size);
        return Thumbnail {
            url: rendition.url.replace("&amp;", "&"),
            width,
            height,
        };
    }

    Thumbnail {
        url: PLACEHOLDER_THUMBNAIL.to_string(),
        width: size,
        height: size,
    }
}

fn scale(width: Option<u32>, height: Option<u32>, size: u32) -> (u32, u32) {
    match (width, height) {
        (Some(width), Some(height)) if width > 0 && height > 0 => {
            let longest = u64::from(width.max(height));
            let fit = |edge: u32| {
                let scaled = (u64::from(edge) * u64::from(size) + longest / 2) / longest;
                u32::try_from(scaled).unwrap_or(size).max(1)
            };
            (fit(width), fit(height))
        }
        _ => (size, size),
    }
}
