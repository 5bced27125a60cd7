/// Letter case used when formatting a derived initialization vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IvCase {
    #[default]
    Upper, // "A7A"
    Lower, // "a7a"
}

// --- Parser Configuration ---
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    pub iv_case: IvCase,
    /// Reject documents whose first non-blank line is not `#EXTM3U`.
    pub require_header: bool,
    /// Reject documents without `#EXT-X-TARGETDURATION` instead of reporting 0.
    pub require_target_duration: bool,
    /// Reject `#EXT-X-DISCONTINUITY-SEQUENCE` after the first segment instead of ignoring it.
    pub strict_discontinuity_sequence: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            iv_case: IvCase::Upper,
            require_header: false,          // Lenient, many servers omit the header
            require_target_duration: false, // Missing target duration is reported as 0
            strict_discontinuity_sequence: false,
        }
    }
}

impl ParserConfig {
    pub fn with_iv_case(mut self, iv_case: IvCase) -> Self {
        self.iv_case = iv_case;
        self
    }

    pub fn with_require_header(mut self, require_header: bool) -> Self {
        self.require_header = require_header;
        self
    }

    pub fn with_require_target_duration(mut self, require_target_duration: bool) -> Self {
        self.require_target_duration = require_target_duration;
        self
    }

    pub fn with_strict_discontinuity_sequence(mut self, strict: bool) -> Self {
        self.strict_discontinuity_sequence = strict;
        self
    }

    /// Format a media sequence number as a derived IV, without padding or `0x` prefix.
    pub(crate) fn format_iv(&self, media_sequence: u64) -> String {
        match self.iv_case {
            IvCase::Upper => format!("{media_sequence:X}"),
            IvCase::Lower => format!("{media_sequence:x}"),
        }
    }
}

#[cfg(test)]
#[cfg_attr(all(test, coverage_nightly), coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_lenient() {
        let config = ParserConfig::default();
        assert_eq!(config.iv_case, IvCase::Upper);
        assert!(!config.require_header);
        assert!(!config.require_target_duration);
        assert!(!config.strict_discontinuity_sequence);
    }

    #[test]
    fn test_format_iv() {
        let upper = ParserConfig::default();
        let lower = ParserConfig::default().with_iv_case(IvCase::Lower);

        assert_eq!(upper.format_iv(2682), "A7A");
        assert_eq!(lower.format_iv(2683), "a7b");
        assert_eq!(upper.format_iv(0), "0");
    }
}
