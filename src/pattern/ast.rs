// Tue Jan 13 2026 - Alex

use crate::pattern::byteset::{is_word_byte, ByteSet};
use serde::{Deserialize, Serialize};

/// Parsed form of a single pattern. Flags are already applied: caseless
/// literals are folded, `.` is resolved against DOTALL and `^`/`$` against
/// MULTILINE.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ast {
    Empty,
    Literal(ByteSet),
    Concat(Vec<Ast>),
    Alternation(Vec<Ast>),
    Repetition {
        child: Box<Ast>,
        min: u32,
        max: Option<u32>,
    },
    Anchor(AnchorKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnchorKind {
    /// `\A`, or `^` without MULTILINE.
    StartText,
    /// `\z`
    EndText,
    /// `\Z`, or `$` without MULTILINE: end of text or before a final newline.
    EndTextNewline,
    StartLine,
    EndLine,
    WordBoundary,
    NotWordBoundary,
}

/// What an anchor can see around the position being tested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookContext {
    pub prev: Option<u8>,
    pub next: Option<u8>,
    /// `next` is the last byte of the input.
    pub next_is_last: bool,
}

impl LookContext {
    pub fn at(input: &[u8], pos: usize) -> Self {
        Self {
            prev: if pos == 0 { None } else { Some(input[pos - 1]) },
            next: input.get(pos).copied(),
            next_is_last: pos + 1 == input.len(),
        }
    }
}

impl AnchorKind {
    pub fn is_satisfied(self, ctx: &LookContext) -> bool {
        match self {
            AnchorKind::StartText => ctx.prev.is_none(),
            AnchorKind::EndText => ctx.next.is_none(),
            AnchorKind::EndTextNewline => {
                ctx.next.is_none() || (ctx.next == Some(b'\n') && ctx.next_is_last)
            }
            AnchorKind::StartLine => ctx.prev.map_or(true, |b| b == b'\n'),
            AnchorKind::EndLine => ctx.next.map_or(true, |b| b == b'\n'),
            AnchorKind::WordBoundary => is_word(ctx.prev) != is_word(ctx.next),
            AnchorKind::NotWordBoundary => is_word(ctx.prev) == is_word(ctx.next),
        }
    }
}

fn is_word(byte: Option<u8>) -> bool {
    byte.map_or(false, is_word_byte)
}

impl Ast {
    pub fn concat(mut items: Vec<Ast>) -> Ast {
        match items.len() {
            0 => Ast::Empty,
            1 => items.pop().unwrap_or(Ast::Empty),
            _ => Ast::Concat(items),
        }
    }

    pub fn alternation(mut items: Vec<Ast>) -> Ast {
        match items.len() {
            0 => Ast::Empty,
            1 => items.pop().unwrap_or(Ast::Empty),
            _ => Ast::Alternation(items),
        }
    }

    /// True when the node can match without consuming a byte.
    pub fn is_nullable(&self) -> bool {
        match self {
            Ast::Empty | Ast::Anchor(_) => true,
            Ast::Literal(_) => false,
            Ast::Concat(items) => items.iter().all(Ast::is_nullable),
            Ast::Alternation(items) => items.iter().any(Ast::is_nullable),
            Ast::Repetition { child, min, .. } => *min == 0 || child.is_nullable(),
        }
    }

    /// True when every match must begin at the start of the input.
    pub fn is_anchored(&self) -> bool {
        match self {
            Ast::Anchor(AnchorKind::StartText) => true,
            Ast::Concat(items) => items.first().map_or(false, Ast::is_anchored),
            Ast::Alternation(items) => items.iter().all(Ast::is_anchored),
            Ast::Repetition { child, min, .. } => *min > 0 && child.is_anchored(),
            _ => false,
        }
    }

    pub fn min_width(&self) -> usize {
        match self {
            Ast::Empty | Ast::Anchor(_) => 0,
            Ast::Literal(_) => 1,
            Ast::Concat(items) => items.iter().map(Ast::min_width).sum(),
            Ast::Alternation(items) => items.iter().map(Ast::min_width).min().unwrap_or(0),
            Ast::Repetition { child, min, .. } => child.min_width().saturating_mul(*min as usize),
        }
    }

    /// `None` when the width is unbounded.
    pub fn max_width(&self) -> Option<usize> {
        match self {
            Ast::Empty | Ast::Anchor(_) => Some(0),
            Ast::Literal(_) => Some(1),
            Ast::Concat(items) => items
                .iter()
                .try_fold(0usize, |acc, item| Some(acc.saturating_add(item.max_width()?))),
            Ast::Alternation(items) => items
                .iter()
                .try_fold(0usize, |acc, item| Some(acc.max(item.max_width()?))),
            Ast::Repetition { child, max, .. } => {
                let child_max = child.max_width()?;
                if child_max == 0 {
                    return Some(0);
                }
                max.map(|m| child_max.saturating_mul(m as usize))
            }
        }
    }
}
