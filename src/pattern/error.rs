// Tue Jan 13 2026 - Alex

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} at position {position}")]
pub struct ParseError {
    pub position: usize,
    pub kind: ParseErrorKind,
}

impl ParseError {
    pub fn new(position: usize, kind: ParseErrorKind) -> Self {
        Self { position, kind }
    }

    pub fn is_unsupported(&self) -> bool {
        matches!(
            self.kind,
            ParseErrorKind::UnsupportedBackreference
                | ParseErrorKind::UnsupportedLookaround
                | ParseErrorKind::UnsupportedConstruct(_)
        )
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    #[error("unbalanced parenthesis")]
    UnbalancedGroup,
    #[error("unclosed character class")]
    UnclosedClass,
    #[error("invalid repetition bounds {{{0},{1}}}")]
    InvalidRepetition(u32, u32),
    #[error("repetition bound exceeds {0}")]
    RepetitionTooLarge(u32),
    #[error("quantifier has nothing to repeat")]
    NothingToRepeat,
    #[error("invalid escape sequence: \\{0}")]
    InvalidEscape(char),
    #[error("trailing backslash")]
    TrailingBackslash,
    #[error("invalid hex escape")]
    InvalidHexEscape,
    #[error("invalid class range {0:?}-{1:?}")]
    InvalidClassRange(char, char),
    #[error("unknown inline flag: {0}")]
    UnknownFlag(char),
    #[error("backreferences are not supported")]
    UnsupportedBackreference,
    #[error("lookaround assertions are not supported")]
    UnsupportedLookaround,
    #[error("unsupported construct: {0}")]
    UnsupportedConstruct(String),
}
