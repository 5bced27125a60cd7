use crate::builder::PlaylistBuilder;
use crate::config::ParserConfig;
use crate::line::{Line, Lines, has_header};
use crate::playlist::MediaPlaylist;
use crate::{PlaylistError, Result};

/// Parses media playlist documents with a fixed [`ParserConfig`].
///
/// The parser holds no state between calls and can be shared across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct MediaPlaylistParser {
    config: ParserConfig,
}

impl MediaPlaylistParser {
    pub const fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    pub const fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse one media playlist.
    ///
    /// `base_uri` is the document's own URL. It is stored on the result and
    /// never fetched.
    pub fn parse(&self, base_uri: &str, input: &str) -> Result<MediaPlaylist> {
        if self.config.require_header && !has_header(input) {
            return Err(PlaylistError::MissingHeader);
        }

        let mut builder = PlaylistBuilder::new(base_uri, self.config);
        for line in Lines::new(input) {
            match line? {
                Line::Tag(tag) => builder.apply(tag)?,
                Line::Uri(uri) => builder.push_uri(uri)?,
            }
        }

        builder.finish()
    }
}

/// Parse a media playlist with the default configuration.
pub fn parse_media_playlist(base_uri: &str, input: &str) -> Result<MediaPlaylist> {
    MediaPlaylistParser::default().parse(base_uri, input)
}
