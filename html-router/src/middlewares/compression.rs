use tower_http::compression::CompressionLayer;

/// Compresses pages, the generated script and static assets according to the
/// request's `Accept-Encoding`.
pub fn compression_layer() -> CompressionLayer {
    CompressionLayer::new()
}
