use std::fmt::Display;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Serialize;
use url::Url;

use crate::{PlaylistError, Result};

/// `byterange_length` of a segment that covers its whole resource.
pub const LENGTH_UNBOUNDED: i64 = -1;

/// A `(length, offset)` sub-range of the resource a segment points to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ByteRange {
    pub length: u64,
    pub offset: u64,
}

impl ByteRange {
    /// First byte after this range.
    #[inline]
    pub const fn end(&self) -> u64 {
        self.offset.saturating_add(self.length)
    }
}

/// Encryption method declared by `#EXT-X-KEY`, other than `NONE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EncryptionMethod {
    /// Whole segment AES-128 CBC
    Aes128,
    /// Sample level encryption of the elementary streams
    SampleAes,
}

impl Display for EncryptionMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EncryptionMethod::Aes128 => write!(f, "AES-128"),
            EncryptionMethod::SampleAes => write!(f, "SAMPLE-AES"),
        }
    }
}

impl FromStr for EncryptionMethod {
    type Err = PlaylistError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "AES-128" => Ok(EncryptionMethod::Aes128),
            "SAMPLE-AES" => Ok(EncryptionMethod::SampleAes),
            other => Err(PlaylistError::UnsupportedEncryptionMethod(other.to_string())),
        }
    }
}

/// One media segment of a [`MediaPlaylist`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segment {
    pub duration_secs: f64,
    /// Title from `#EXTINF`, if any
    pub title: Option<String>,
    pub discontinuity_sequence_number: u64,
    pub is_encrypted: bool,
    pub encryption_method: Option<EncryptionMethod>,
    pub encryption_key_uri: Option<String>,
    /// Explicit IV as written, or the hex digits of the segment's media sequence number.
    pub encryption_iv: Option<String>,
    /// Length in bytes, or [`LENGTH_UNBOUNDED`].
    pub byterange_length: i64,
    pub byterange_offset: u64,
    pub program_date_time: Option<DateTime<Utc>>,
    /// Segment reference as written in the playlist
    pub url: String,
}

impl Segment {
    pub fn byte_range(&self) -> Option<ByteRange> {
        u64::try_from(self.byterange_length)
            .ok()
            .map(|length| ByteRange {
                length,
                offset: self.byterange_offset,
            })
    }
}

/// A parsed HLS media playlist.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaPlaylist {
    pub base_uri: String,
    pub version: u64,
    /// 0 when the playlist has no `#EXT-X-TARGETDURATION`
    pub target_duration_secs: u64,
    pub media_sequence: u64,
    pub discontinuity_sequence: u64,
    pub allow_cache: Option<bool>,
    pub live: bool,
    pub segments: Vec<Segment>,
}

impl MediaPlaylist {
    pub fn total_duration_secs(&self) -> f64 {
        self.segments.iter().map(|s| s.duration_secs).sum()
    }

    /// Absolute media sequence number of the segment at `index`.
    pub fn segment_media_sequence(&self, index: usize) -> Option<u64> {
        (index < self.segments.len()).then(|| self.media_sequence.saturating_add(index as u64))
    }

    /// Resolve a segment's URL against the playlist's own URL.
    pub fn resolve_segment_url(&self, segment: &Segment) -> Result<Url> {
        let base = Url::parse(&self.base_uri).map_err(|source| PlaylistError::InvalidUrl {
            url: self.base_uri.clone(),
            source,
        })?;
        base.join(&segment.url)
            .map_err(|source| PlaylistError::InvalidUrl {
                url: segment.url.clone(),
                source,
            })
    }
}

#[cfg(test)]
#[cfg_attr(all(test, coverage_nightly), coverage(off))]
mod tests {
    use super::*;

    fn segment(url: &str, duration_secs: f64) -> Segment {
        Segment {
            duration_secs,
            title: None,
            discontinuity_sequence_number: 0,
            is_encrypted: false,
            encryption_method: None,
            encryption_key_uri: None,
            encryption_iv: None,
            byterange_length: LENGTH_UNBOUNDED,
            byterange_offset: 0,
            program_date_time: None,
            url: url.to_string(),
        }
    }

    fn playlist(base_uri: &str, segments: Vec<Segment>) -> MediaPlaylist {
        MediaPlaylist {
            base_uri: base_uri.to_string(),
            version: 1,
            target_duration_secs: 6,
            media_sequence: 100,
            discontinuity_sequence: 0,
            allow_cache: None,
            live: true,
            segments,
        }
    }

    #[test]
    fn test_byte_range_accessor() {
        let mut seg = segment("a.ts", 1.0);
        assert_eq!(seg.byte_range(), None);

        seg.byterange_length = 51501;
        seg.byterange_offset = 2147483648;
        let range = seg.byte_range().unwrap();
        assert_eq!(range.length, 51501);
        assert_eq!(range.end(), 2147535149);
    }

    #[test]
    fn test_encryption_method_round_trip_names() {
        for name in ["AES-128", "SAMPLE-AES"] {
            assert_eq!(EncryptionMethod::from_str(name).unwrap().to_string(), name);
        }
        assert!(EncryptionMethod::from_str("aes-128").is_err());
    }

    #[test]
    fn test_derived_accessors() {
        let pl = playlist(
            "https://example.com/live/index.m3u8",
            vec![segment("a.ts", 5.5), segment("b.ts", 4.5)],
        );

        assert_eq!(pl.total_duration_secs(), 10.0);
        assert_eq!(pl.segment_media_sequence(1), Some(101));
        assert_eq!(pl.segment_media_sequence(2), None);
    }

    #[test]
    fn test_resolve_segment_url() {
        let pl = playlist(
            "https://example.com/live/index.m3u8",
            vec![
                segment("17/50/44.ts", 5.0),
                segment("/root.ts", 5.0),
                segment("https://cdn.example.com/abs.ts", 5.0),
            ],
        );

        let resolved: Vec<String> = pl
            .segments
            .iter()
            .map(|s| pl.resolve_segment_url(s).unwrap().to_string())
            .collect();

        assert_eq!(
            resolved,
            vec![
                "https://example.com/live/17/50/44.ts",
                "https://example.com/root.ts",
                "https://cdn.example.com/abs.ts",
            ]
        );
    }

    #[test]
    fn test_resolve_segment_url_with_invalid_base() {
        let pl = playlist("not a url", vec![segment("a.ts", 1.0)]);
        let err = pl.resolve_segment_url(&pl.segments[0]).unwrap_err();

        assert!(matches!(err, PlaylistError::InvalidUrl { ref url, .. } if url == "not a url"));
    }

    #[test]
    fn test_serialize_snapshot() {
        let mut seg = segment("a.ts", 1.5);
        seg.is_encrypted = true;
        seg.encryption_method = Some(EncryptionMethod::Aes128);
        seg.encryption_iv = Some("64".to_string());
        seg.byterange_length = 10;
        seg.program_date_time = "2016-05-09T17:50:44Z".parse().ok();
        let pl = playlist("https://example.com/index.m3u8", vec![seg]);

        let value = serde_json::to_value(&pl).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "base_uri": "https://example.com/index.m3u8",
                "version": 1,
                "target_duration_secs": 6,
                "media_sequence": 100,
                "discontinuity_sequence": 0,
                "allow_cache": null,
                "live": true,
                "segments": [{
                    "duration_secs": 1.5,
                    "title": null,
                    "discontinuity_sequence_number": 0,
                    "is_encrypted": true,
                    "encryption_method": "Aes128",
                    "encryption_key_uri": null,
                    "encryption_iv": "64",
                    "byterange_length": 10,
                    "byterange_offset": 0,
                    "program_date_time": "2016-05-09T17:50:44Z",
                    "url": "a.ts"
                }]
            })
        );
    }
}
