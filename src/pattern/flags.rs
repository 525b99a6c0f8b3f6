// Tue Jan 13 2026 - Alex

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

bitflags! {
    /// Per-pattern compile flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct PatternFlags: u32 {
        /// ASCII case-insensitive matching.
        const CASELESS = 1 << 0;
        /// `^` and `$` also match at internal line boundaries.
        const MULTILINE = 1 << 1;
        /// `.` also matches `\n`.
        const DOTALL = 1 << 2;
        /// Report at most one match for this pattern per scan.
        const SINGLEMATCH = 1 << 3;
        /// Report the leftmost start offset of each match.
        const SOM_LEFTMOST = 1 << 4;
        /// Permit a pattern that can match an empty buffer.
        const ALLOWEMPTY = 1 << 5;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown pattern flag: {0}")]
pub struct UnknownFlag(pub String);

impl PatternFlags {
    /// Looks up a single flag by name. Accepts the plain name, the
    /// `HS_FLAG_` prefixed name and the camel-case option keys.
    pub fn from_option_name(name: &str) -> Option<PatternFlags> {
        let name = name.trim();
        let name = name.strip_prefix("HS_FLAG_").unwrap_or(name);

        match name.to_ascii_lowercase().replace('_', "").as_str() {
            "caseless" => Some(PatternFlags::CASELESS),
            "multiline" => Some(PatternFlags::MULTILINE),
            "dotall" => Some(PatternFlags::DOTALL),
            "singlematch" => Some(PatternFlags::SINGLEMATCH),
            "somleftmost" | "startofmatch" => Some(PatternFlags::SOM_LEFTMOST),
            "allowempty" => Some(PatternFlags::ALLOWEMPTY),
            _ => None,
        }
    }

    /// Parses the single-letter suffix of a `/expr/flags` literal.
    pub fn from_letter(letter: char) -> Option<PatternFlags> {
        match letter {
            'i' => Some(PatternFlags::CASELESS),
            'm' => Some(PatternFlags::MULTILINE),
            's' => Some(PatternFlags::DOTALL),
            'H' => Some(PatternFlags::SINGLEMATCH),
            'L' => Some(PatternFlags::SOM_LEFTMOST),
            'E' => Some(PatternFlags::ALLOWEMPTY),
            _ => None,
        }
    }
}

impl FromStr for PatternFlags {
    type Err = UnknownFlag;

    /// `"CASELESS | SOM_LEFTMOST"`; an empty string gives no flags.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split(['|', ','])
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .try_fold(PatternFlags::empty(), |acc, part| {
                PatternFlags::from_option_name(part)
                    .map(|flag| acc | flag)
                    .ok_or_else(|| UnknownFlag(part.to_string()))
            })
    }
}
