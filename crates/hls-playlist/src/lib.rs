//! HLS (HTTP Live Streaming) media playlist parser.
//!
//! This crate turns the text of an HLS media playlist into an immutable
//! [`MediaPlaylist`]. Sticky tags (encryption key, byte-range offset,
//! discontinuity counter and program date time) are carried across segments,
//! and implicit values such as the derived IV are computed per segment.
//!
//! # Examples
//!
//! ```rust
//! # fn test() -> Result<(), Box<dyn std::error::Error>> {
//! use hls_playlist::parse_media_playlist;
//!
//! let playlist = parse_media_playlist(
//!     "https://example.com/live/index.m3u8",
//!     "#EXTM3U\n#EXT-X-TARGETDURATION:6\n#EXTINF:6.0,\nseg0.ts\n#EXT-X-ENDLIST\n",
//! )?;
//!
//! assert!(!playlist.live);
//! assert_eq!(playlist.segments.len(), 1);
//! assert_eq!(
//!     playlist.resolve_segment_url(&playlist.segments[0])?.as_str(),
//!     "https://example.com/live/seg0.ts"
//! );
//! # Ok(())
//! # }
//! # test().expect("test failed");
//! ```
//!
//! ## License
//!
//! MIT OR Apache-2.0
#![cfg_attr(all(coverage_nightly, test), feature(coverage_attribute))]
#![deny(unsafe_code)]

pub mod attribute;
pub mod builder;
pub mod config;
pub mod error;
pub mod line;
pub mod parser;
pub mod playlist;
pub mod tag;
pub mod timestamp;

pub use attribute::AttributeList;
pub use builder::PlaylistBuilder;
pub use config::{IvCase, ParserConfig};
pub use error::PlaylistError;
pub use line::{Line, Lines};
pub use parser::{MediaPlaylistParser, parse_media_playlist};
pub use playlist::{ByteRange, EncryptionMethod, LENGTH_UNBOUNDED, MediaPlaylist, Segment};
pub use tag::Tag;
pub use timestamp::resolve_timestamp;

/// Result type for playlist parsing operations
pub type Result<T> = std::result::Result<T, PlaylistError>;
