// Media playlist builder: folds tags in document order into a MediaPlaylist.

use chrono::{DateTime, TimeDelta, Utc};
use tracing::debug;

use crate::config::ParserConfig;
use crate::playlist::{ByteRange, EncryptionMethod, LENGTH_UNBOUNDED, MediaPlaylist, Segment};
use crate::tag::{EXT_X_BYTERANGE, KeyTag, Tag, allow_cache_flag};
use crate::timestamp::resolve_timestamp;
use crate::{PlaylistError, Result};

/// Sticky encryption state set by `#EXT-X-KEY`.
#[derive(Debug, Clone, PartialEq)]
enum Encryption {
    Clear,
    Encrypted {
        method: EncryptionMethod,
        key_uri: Option<String>,
        iv: IvSource,
    },
}

#[derive(Debug, Clone, PartialEq)]
enum IvSource {
    Explicit(String),
    /// Hex digits of the segment's media sequence number
    Derived,
}

/// `#EXT-X-BYTERANGE` values waiting for their URI line.
///
/// The offset is resolved when the segment closes, so an explicit offset
/// survives a later length-only tag for the same segment.
#[derive(Debug, Clone, Copy, PartialEq)]
struct PendingByteRange {
    length: u64,
    offset: Option<u64>,
}

/// `#EXTINF` values waiting for their URI line.
#[derive(Debug, Clone, PartialEq)]
struct PendingInf {
    duration_secs: f64,
    title: Option<String>,
}

/// Stateful reducer producing one [`MediaPlaylist`].
///
/// Feed it tags with [`apply`](Self::apply) and segment URIs with
/// [`push_uri`](Self::push_uri) in document order, then call
/// [`finish`](Self::finish).
#[derive(Debug, Clone)]
pub struct PlaylistBuilder {
    config: ParserConfig,

    // Playlist-level values
    base_uri: String,
    version: u64,
    target_duration_secs: Option<u64>,
    media_sequence: u64,
    discontinuity_sequence: u64,
    allow_cache: Option<bool>,
    live: bool,
    segments: Vec<Segment>,

    // Sticky across segments
    discontinuity_counter: u64,
    encryption: Encryption,
    /// End of the previous segment's byte range, 0 if it had none
    next_byte_range_offset: u64,

    // Cleared after every segment
    pending_inf: Option<PendingInf>,
    pending_byte_range: Option<PendingByteRange>,
    pending_program_date_time: Option<DateTime<Utc>>,
}

impl PlaylistBuilder {
    pub fn new(base_uri: impl Into<String>, config: ParserConfig) -> Self {
        Self {
            config,
            base_uri: base_uri.into(),
            version: 1,
            target_duration_secs: None,
            media_sequence: 0,
            discontinuity_sequence: 0,
            allow_cache: None,
            live: true,
            segments: Vec::new(),
            discontinuity_counter: 0,
            encryption: Encryption::Clear,
            next_byte_range_offset: 0,
            pending_inf: None,
            pending_byte_range: None,
            pending_program_date_time: None,
        }
    }

    /// Number of segments closed so far.
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    pub fn apply(&mut self, tag: Tag<'_>) -> Result<()> {
        match tag {
            Tag::Header => {}
            Tag::Version(version) => self.version = version,
            Tag::TargetDuration(secs) => self.target_duration_secs = Some(secs),
            Tag::MediaSequence(sequence) => self.media_sequence = sequence,
            Tag::DiscontinuitySequence(sequence) => {
                if !self.segments.is_empty() {
                    if self.config.strict_discontinuity_sequence {
                        return Err(PlaylistError::DiscontinuitySequenceAfterSegment);
                    }
                    debug!(
                        sequence,
                        segment = self.segment_count(),
                        "Discontinuity sequence after the first segment, ignoring"
                    );
                    return Ok(());
                }
                self.discontinuity_sequence = sequence;
                self.discontinuity_counter = sequence;
            }
            Tag::Discontinuity => {
                self.discontinuity_counter = self.discontinuity_counter.saturating_add(1);
            }
            Tag::AllowCache(value) => {
                self.allow_cache = allow_cache_flag(value);
                if self.allow_cache.is_none() {
                    debug!(value, "Unrecognized allow cache value, ignoring");
                }
            }
            Tag::Key(key) => self.encryption = Self::encryption_from(key),
            Tag::Inf {
                duration_secs,
                title,
            } => {
                self.pending_inf = Some(PendingInf {
                    duration_secs,
                    title: title.map(str::to_string),
                });
            }
            Tag::ByteRange { length, offset } => {
                // Segment lengths are i64 so the unbounded sentinel fits.
                if i64::try_from(length).is_err() {
                    return Err(PlaylistError::InvalidInteger {
                        tag: EXT_X_BYTERANGE,
                        value: length.to_string(),
                    });
                }
                let offset = offset.or(self.pending_byte_range.and_then(|range| range.offset));
                self.pending_byte_range = Some(PendingByteRange { length, offset });
            }
            Tag::ProgramDateTime(text) => match resolve_timestamp(text) {
                Some(date_time) => self.pending_program_date_time = Some(date_time),
                None => {
                    debug!(
                        value = text,
                        segment = self.segment_count(),
                        "Unrecognized program date time, ignoring"
                    );
                }
            },
            Tag::EndList => self.live = false,
        }

        Ok(())
    }

    /// Close one segment using the pending and sticky state.
    pub fn push_uri(&mut self, uri: &str) -> Result<()> {
        let inf = self
            .pending_inf
            .take()
            .ok_or_else(|| PlaylistError::MissingDuration {
                uri: uri.to_string(),
            })?;

        let media_sequence = self.media_sequence.saturating_add(self.segments.len() as u64);
        let (is_encrypted, encryption_method, encryption_key_uri, encryption_iv) =
            match &self.encryption {
                Encryption::Clear => (false, None, None, None),
                Encryption::Encrypted {
                    method,
                    key_uri,
                    iv,
                } => {
                    let iv = match iv {
                        IvSource::Explicit(iv) => iv.clone(),
                        IvSource::Derived => self.config.format_iv(media_sequence),
                    };
                    (true, Some(*method), key_uri.clone(), Some(iv))
                }
            };

        let (byterange_length, byterange_offset) = match self.pending_byte_range.take() {
            Some(pending) => {
                let range = ByteRange {
                    length: pending.length,
                    offset: pending.offset.unwrap_or(self.next_byte_range_offset),
                };
                self.next_byte_range_offset = range.end();
                (range.length as i64, range.offset)
            }
            None => {
                self.next_byte_range_offset = 0;
                (LENGTH_UNBOUNDED, 0)
            }
        };

        let program_date_time = self
            .pending_program_date_time
            .take()
            .or_else(|| self.extrapolated_program_date_time());

        self.segments.push(Segment {
            duration_secs: inf.duration_secs,
            title: inf.title,
            discontinuity_sequence_number: self.discontinuity_counter,
            is_encrypted,
            encryption_method,
            encryption_key_uri,
            encryption_iv,
            byterange_length,
            byterange_offset,
            program_date_time,
            url: uri.to_string(),
        });

        Ok(())
    }

    pub fn finish(self) -> Result<MediaPlaylist> {
        let target_duration_secs = match self.target_duration_secs {
            Some(secs) => secs,
            None if self.config.require_target_duration => {
                return Err(PlaylistError::MissingTargetDuration);
            }
            None => 0,
        };

        debug!(
            base_uri = %self.base_uri,
            segments = self.segments.len(),
            media_sequence = self.media_sequence,
            live = self.live,
            "Parsed media playlist"
        );

        Ok(MediaPlaylist {
            base_uri: self.base_uri,
            version: self.version,
            target_duration_secs,
            media_sequence: self.media_sequence,
            discontinuity_sequence: self.discontinuity_sequence,
            allow_cache: self.allow_cache,
            live: self.live,
            segments: self.segments,
        })
    }

    fn encryption_from(key: KeyTag<'_>) -> Encryption {
        match key {
            KeyTag::None => Encryption::Clear,
            KeyTag::Encrypted { method, uri, iv } => Encryption::Encrypted {
                method,
                key_uri: uri.map(str::to_string),
                iv: iv.map_or(IvSource::Derived, |iv| IvSource::Explicit(iv.to_string())),
            },
        }
    }

    /// Previous segment's date-time advanced by its duration, in whole milliseconds.
    fn extrapolated_program_date_time(&self) -> Option<DateTime<Utc>> {
        let previous = self.segments.last()?;
        let anchor = previous.program_date_time?;
        let millis = (previous.duration_secs * 1000.0).round() as i64;
        anchor.checked_add_signed(TimeDelta::try_milliseconds(millis)?)
    }
}
