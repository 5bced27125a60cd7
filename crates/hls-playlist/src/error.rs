use thiserror::Error;

/// Errors that abort a media playlist parse.
///
/// No partial playlist is ever returned alongside one of these.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlaylistError {
    #[error("Segment URI without a preceding #EXTINF: {uri}")]
    MissingDuration { uri: String },

    #[error("Unterminated quoted value in attribute list: {input}")]
    UnterminatedQuote { input: String },

    #[error("Malformed attribute in attribute list: {input}")]
    MalformedAttribute { input: String },

    #[error("Invalid integer for {tag}: {value:?}")]
    InvalidInteger { tag: &'static str, value: String },

    #[error("Invalid decimal for {tag}: {value:?}")]
    InvalidFloat { tag: &'static str, value: String },

    #[error("Unsupported encryption method: {0}")]
    UnsupportedEncryptionMethod(String),

    #[error("Byte range without a length: {input:?}")]
    MissingByteRangeLength { input: String },

    #[error("Missing attribute {attribute} in {tag}")]
    MissingAttribute {
        tag: &'static str,
        attribute: &'static str,
    },

    #[error("#EXT-X-DISCONTINUITY-SEQUENCE must appear before the first segment")]
    DiscontinuitySequenceAfterSegment,

    #[error("Playlist does not start with #EXTM3U")]
    MissingHeader,

    #[error("Playlist has no #EXT-X-TARGETDURATION")]
    MissingTargetDuration,

    #[error("Invalid URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}
