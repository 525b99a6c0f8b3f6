// Tue Jan 13 2026 - Alex

pub mod ast;
pub mod byteset;
pub mod error;
pub mod flags;
pub mod parser;
pub mod pattern;

pub use ast::{AnchorKind, Ast, LookContext};
pub use byteset::ByteSet;
pub use error::{ParseError, ParseErrorKind};
pub use flags::{PatternFlags, UnknownFlag};
pub use parser::parse;
pub use pattern::{Pattern, PatternLiteralError};
