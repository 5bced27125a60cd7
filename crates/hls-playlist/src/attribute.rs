use crate::{PlaylistError, Result};

/// A parsed `KEY=VALUE,KEY="VALUE"` attribute list.
///
/// Values are borrowed from the input with surrounding double quotes removed.
/// Commas inside quoted values do not separate attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeList<'a> {
    pairs: Vec<(&'a str, &'a str)>,
}

impl<'a> AttributeList<'a> {
    pub fn parse(input: &'a str) -> Result<Self> {
        let mut pairs = Vec::new();
        let mut in_quotes = false;
        let mut start = 0;

        for (pos, byte) in input.bytes().enumerate() {
            match byte {
                b'"' => in_quotes = !in_quotes,
                b',' if !in_quotes => {
                    if let Some(pair) = split_pair(&input[start..pos])? {
                        pairs.push(pair);
                    }
                    start = pos + 1;
                }
                _ => {}
            }
        }

        if in_quotes {
            return Err(PlaylistError::UnterminatedQuote {
                input: input.to_string(),
            });
        }
        if let Some(pair) = split_pair(&input[start..])? {
            pairs.push(pair);
        }

        Ok(Self { pairs })
    }

    /// Value of the named attribute. A repeated name resolves to its last value.
    pub fn get(&self, name: &str) -> Option<&'a str> {
        self.pairs
            .iter()
            .rev()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| *value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a str)> + '_ {
        self.pairs.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

fn split_pair(raw: &str) -> Result<Option<(&str, &str)>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }

    let malformed = || PlaylistError::MalformedAttribute {
        input: raw.to_string(),
    };

    let (key, value) = raw.split_once('=').ok_or_else(malformed)?;
    let key = key.trim();
    if key.is_empty() {
        return Err(malformed());
    }

    let value = value.trim();
    let value = if value.starts_with('"') {
        value
            .strip_prefix('"')
            .and_then(|v| v.strip_suffix('"'))
            .ok_or_else(malformed)?
    } else {
        value
    };

    Ok(Some((key, value)))
}
