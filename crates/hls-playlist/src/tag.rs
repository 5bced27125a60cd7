use std::str::FromStr;

use crate::attribute::AttributeList;
use crate::playlist::EncryptionMethod;
use crate::{PlaylistError, Result};

pub(crate) const EXTM3U: &str = "#EXTM3U";
pub(crate) const EXT_X_VERSION: &str = "#EXT-X-VERSION";
pub(crate) const EXT_X_TARGETDURATION: &str = "#EXT-X-TARGETDURATION";
pub(crate) const EXT_X_MEDIA_SEQUENCE: &str = "#EXT-X-MEDIA-SEQUENCE";
pub(crate) const EXT_X_DISCONTINUITY_SEQUENCE: &str = "#EXT-X-DISCONTINUITY-SEQUENCE";
pub(crate) const EXT_X_ALLOW_CACHE: &str = "#EXT-X-ALLOW-CACHE";
pub(crate) const EXTINF: &str = "#EXTINF";
pub(crate) const EXT_X_BYTERANGE: &str = "#EXT-X-BYTERANGE";
pub(crate) const EXT_X_PROGRAM_DATE_TIME: &str = "#EXT-X-PROGRAM-DATE-TIME";
pub(crate) const EXT_X_KEY: &str = "#EXT-X-KEY";
pub(crate) const EXT_X_DISCONTINUITY: &str = "#EXT-X-DISCONTINUITY";
pub(crate) const EXT_X_ENDLIST: &str = "#EXT-X-ENDLIST";

/// A recognized media playlist tag with its payload already typed.
#[derive(Debug, Clone, PartialEq)]
pub enum Tag<'a> {
    /// `#EXTM3U`
    Header,
    Version(u64),
    TargetDuration(u64),
    MediaSequence(u64),
    DiscontinuitySequence(u64),
    /// Raw `YES` / `NO` text; other values are ignored by the builder.
    AllowCache(&'a str),
    /// `#EXTINF:<duration>,<title>`
    Inf {
        duration_secs: f64,
        title: Option<&'a str>,
    },
    /// `#EXT-X-BYTERANGE:<length>[@<offset>]`
    ByteRange { length: u64, offset: Option<u64> },
    /// Raw date-time text, resolved later so a bad value never aborts the parse.
    ProgramDateTime(&'a str),
    Key(KeyTag<'a>),
    Discontinuity,
    EndList,
}

/// Payload of `#EXT-X-KEY`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyTag<'a> {
    /// `METHOD=NONE`: segments that follow are not encrypted.
    None,
    Encrypted {
        method: EncryptionMethod,
        uri: Option<&'a str>,
        iv: Option<&'a str>,
    },
}

impl<'a> Tag<'a> {
    /// Classify a `#`-prefixed line.
    ///
    /// Returns `Ok(None)` for comments and tags outside the media playlist
    /// vocabulary. Tag names are matched case-sensitively.
    pub fn parse(line: &'a str) -> Result<Option<Self>> {
        let (name, value) = match line.split_once(':') {
            Some((name, value)) => (name, value.trim()),
            None => (line, ""),
        };

        let tag = match name {
            EXTM3U => Tag::Header,
            EXT_X_VERSION => Tag::Version(parse_integer(EXT_X_VERSION, value)?),
            EXT_X_TARGETDURATION => {
                Tag::TargetDuration(parse_integer(EXT_X_TARGETDURATION, value)?)
            }
            EXT_X_MEDIA_SEQUENCE => Tag::MediaSequence(parse_integer(EXT_X_MEDIA_SEQUENCE, value)?),
            EXT_X_DISCONTINUITY_SEQUENCE => Tag::DiscontinuitySequence(parse_integer(
                EXT_X_DISCONTINUITY_SEQUENCE,
                value,
            )?),
            EXT_X_ALLOW_CACHE => Tag::AllowCache(value),
            EXTINF => parse_inf(value)?,
            EXT_X_BYTERANGE => parse_byte_range(value)?,
            EXT_X_PROGRAM_DATE_TIME => Tag::ProgramDateTime(value),
            EXT_X_KEY => Tag::Key(parse_key(value)?),
            EXT_X_DISCONTINUITY => Tag::Discontinuity,
            EXT_X_ENDLIST => Tag::EndList,
            _ => return Ok(None),
        };

        Ok(Some(tag))
    }
}

fn parse_integer(tag: &'static str, value: &str) -> Result<u64> {
    value
        .trim()
        .parse()
        .map_err(|_| PlaylistError::InvalidInteger {
            tag,
            value: value.to_string(),
        })
}

/// `YES` / `NO` of `#EXT-X-ALLOW-CACHE`, `None` for anything else.
pub(crate) fn allow_cache_flag(value: &str) -> Option<bool> {
    match value {
        "YES" => Some(true),
        "NO" => Some(false),
        _ => None,
    }
}

fn parse_inf(value: &str) -> Result<Tag<'_>> {
    let (duration, title) = match value.split_once(',') {
        Some((duration, title)) => (duration.trim(), title.trim()),
        None => (value, ""),
    };

    let duration_secs = duration
        .parse::<f64>()
        .ok()
        .filter(|d| d.is_finite() && *d >= 0.0)
        .ok_or_else(|| PlaylistError::InvalidFloat {
            tag: EXTINF,
            value: duration.to_string(),
        })?;

    Ok(Tag::Inf {
        duration_secs,
        title: (!title.is_empty()).then_some(title),
    })
}

fn parse_byte_range(value: &str) -> Result<Tag<'_>> {
    let (length, offset) = match value.split_once('@') {
        Some((length, offset)) => (length.trim(), Some(offset.trim())),
        None => (value, None),
    };

    if length.is_empty() {
        return Err(PlaylistError::MissingByteRangeLength {
            input: value.to_string(),
        });
    }

    let length = parse_integer(EXT_X_BYTERANGE, length)?;
    let offset = offset
        .map(|offset| parse_integer(EXT_X_BYTERANGE, offset))
        .transpose()?;

    Ok(Tag::ByteRange { length, offset })
}

fn parse_key(value: &str) -> Result<KeyTag<'_>> {
    let attributes = AttributeList::parse(value)?;
    let method = attributes
        .get("METHOD")
        .ok_or(PlaylistError::MissingAttribute {
            tag: EXT_X_KEY,
            attribute: "METHOD",
        })?;

    if method == "NONE" {
        return Ok(KeyTag::None);
    }

    Ok(KeyTag::Encrypted {
        method: EncryptionMethod::from_str(method)?,
        uri: attributes.get("URI"),
        iv: attributes.get("IV"),
    })
}
