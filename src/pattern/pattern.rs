// Tue Jan 13 2026 - Alex

use crate::pattern::flags::PatternFlags;
use crate::pattern::{parser, Ast, ParseError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A pattern submitted for compilation: source text plus its flags.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pattern {
    source: String,
    flags: PatternFlags,
}

impl Pattern {
    pub fn new(source: &str) -> Self {
        Self {
            source: source.to_string(),
            flags: PatternFlags::empty(),
        }
    }

    pub fn with_flags(mut self, flags: PatternFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn flags(&self) -> PatternFlags {
        self.flags
    }

    pub fn parse(&self) -> Result<Ast, ParseError> {
        parser::parse(&self.source, self.flags)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatternLiteralError {
    #[error("Pattern literal must look like /expr/flags")]
    Malformed,
    #[error("Unknown flag letter: {0}")]
    UnknownFlag(char),
}

impl FromStr for Pattern {
    type Err = PatternLiteralError;

    /// Parses `/expr/flags`, e.g. `/test.*stuff/iL`. Text without the
    /// surrounding slashes is taken as a bare expression with no flags.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !s.starts_with('/') {
            return Ok(Pattern::new(s));
        }

        let close = s.rfind('/').filter(|&i| i > 0).ok_or(PatternLiteralError::Malformed)?;
        let flags = s[close + 1..].chars().try_fold(PatternFlags::empty(), |acc, c| {
            PatternFlags::from_letter(c)
                .map(|flag| acc | flag)
                .ok_or(PatternLiteralError::UnknownFlag(c))
        })?;

        Ok(Pattern::new(&s[1..close]).with_flags(flags))
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/", self.source)?;
        let letters = [
            (PatternFlags::CASELESS, 'i'),
            (PatternFlags::MULTILINE, 'm'),
            (PatternFlags::DOTALL, 's'),
            (PatternFlags::SINGLEMATCH, 'H'),
            (PatternFlags::SOM_LEFTMOST, 'L'),
            (PatternFlags::ALLOWEMPTY, 'E'),
        ];
        for (flag, letter) in letters {
            if self.flags.contains(flag) {
                write!(f, "{}", letter)?;
            }
        }
        Ok(())
    }
}

impl From<&str> for Pattern {
    fn from(source: &str) -> Self {
        Pattern::new(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_syntax() {
        let pattern: Pattern = "/test.*stuff/HL".parse().unwrap();
        assert_eq!(pattern.source(), "test.*stuff");
        assert_eq!(pattern.flags(), PatternFlags::SINGLEMATCH | PatternFlags::SOM_LEFTMOST);
        assert_eq!(pattern.to_string(), "/test.*stuff/HL");
    }

    #[test]
    fn test_literal_with_inner_slash() {
        let pattern: Pattern = "/a\\/b/i".parse().unwrap();
        assert_eq!(pattern.source(), "a\\/b");
        assert_eq!(pattern.flags(), PatternFlags::CASELESS);
    }

    #[test]
    fn test_bare_and_malformed() {
        let bare: Pattern = "abc".parse().unwrap();
        assert_eq!(bare.flags(), PatternFlags::empty());
        assert_eq!("/abc".parse::<Pattern>(), Err(PatternLiteralError::Malformed));
        assert_eq!("/abc/q".parse::<Pattern>(), Err(PatternLiteralError::UnknownFlag('q')));
    }
}
