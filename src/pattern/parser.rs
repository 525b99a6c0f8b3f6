// Tue Jan 13 2026 - Alex

use crate::pattern::ast::{AnchorKind, Ast};
use crate::pattern::byteset::{ByteSet, DIGIT, SPACE, WORD};
use crate::pattern::error::{ParseError, ParseErrorKind};
use crate::pattern::flags::PatternFlags;

/// Largest bound accepted in `{m,n}`.
pub const MAX_REPEAT: u32 = 65_535;

type Result<T> = std::result::Result<T, ParseError>;

/// Parses `source` under `flags`. Pure; the AST carries no flag state.
pub fn parse(source: &str, flags: PatternFlags) -> Result<Ast> {
    Parser::new(source, flags).parse()
}

#[derive(Debug, Clone, Copy)]
struct Mode {
    caseless: bool,
    multiline: bool,
    dotall: bool,
}

impl From<PatternFlags> for Mode {
    fn from(flags: PatternFlags) -> Self {
        Self {
            caseless: flags.contains(PatternFlags::CASELESS),
            multiline: flags.contains(PatternFlags::MULTILINE),
            dotall: flags.contains(PatternFlags::DOTALL),
        }
    }
}

enum ClassItem {
    Byte(u8),
    Set(ByteSet),
}

pub struct Parser<'a> {
    input: &'a [u8],
    pos: usize,
    mode: Mode,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str, flags: PatternFlags) -> Self {
        Self {
            input: source.as_bytes(),
            pos: 0,
            mode: Mode::from(flags),
        }
    }

    pub fn parse(mut self) -> Result<Ast> {
        let ast = self.parse_alternation()?;

        // Only an unmatched ')' can stop the top-level alternation early.
        if self.pos < self.input.len() {
            return Err(self.error_at(self.pos, ParseErrorKind::UnbalancedGroup));
        }

        Ok(ast)
    }

    fn error_at(&self, position: usize, kind: ParseErrorKind) -> ParseError {
        ParseError::new(position, kind)
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.input.get(self.pos + offset).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.pos += 1;
        Some(b)
    }

    fn eat(&mut self, expected: u8) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn parse_alternation(&mut self) -> Result<Ast> {
        let mut branches = vec![self.parse_concat()?];

        while self.eat(b'|') {
            branches.push(self.parse_concat()?);
        }

        Ok(Ast::alternation(branches))
    }

    fn parse_concat(&mut self) -> Result<Ast> {
        let mut items = Vec::new();

        loop {
            let c = match self.peek() {
                None | Some(b'|') | Some(b')') => break,
                Some(c) => c,
            };

            if matches!(c, b'*' | b'+' | b'?') || (c == b'{' && self.peek_bounds()?.is_some()) {
                return Err(self.error_at(self.pos, ParseErrorKind::NothingToRepeat));
            }

            if let Some(atom) = self.parse_atom()? {
                items.push(self.parse_quantifiers(atom)?);
            }
        }

        Ok(Ast::concat(items))
    }

    /// At most one quantifier per atom. A second one is left for
    /// `parse_concat`, which rejects it as `NothingToRepeat`.
    fn parse_quantifiers(&mut self, atom: Ast) -> Result<Ast> {
        let (min, max) = match self.peek() {
            Some(b'*') => {
                self.pos += 1;
                (0, None)
            }
            Some(b'+') => {
                self.pos += 1;
                (1, None)
            }
            Some(b'?') => {
                self.pos += 1;
                (0, Some(1))
            }
            Some(b'{') => match self.peek_bounds()? {
                Some((bounds, end)) => {
                    self.pos = end;
                    bounds
                }
                None => return Ok(atom),
            },
            _ => return Ok(atom),
        };

        // Laziness does not change which end offsets match.
        match self.peek() {
            Some(b'?') => self.pos += 1,
            Some(b'+') => {
                return Err(self.error_at(
                    self.pos,
                    ParseErrorKind::UnsupportedConstruct("possessive quantifier".to_string()),
                ));
            }
            _ => {}
        }

        Ok(Ast::Repetition {
            child: Box::new(atom),
            min,
            max,
        })
    }

    /// Reads `{m}`, `{m,}` or `{m,n}` at the cursor without consuming it.
    /// Anything else is not a quantifier and the `{` is a literal.
    fn peek_bounds(&self) -> Result<Option<((u32, Option<u32>), usize)>> {
        let open = self.pos;
        let mut i = open + 1;

        let min = match self.read_number(&mut i)? {
            Some(n) => n,
            None => return Ok(None),
        };

        let max = if self.input.get(i) == Some(&b',') {
            i += 1;
            self.read_number(&mut i)?
        } else {
            Some(min)
        };

        if self.input.get(i) != Some(&b'}') {
            return Ok(None);
        }

        if let Some(max) = max {
            if min > max {
                return Err(self.error_at(open, ParseErrorKind::InvalidRepetition(min, max)));
            }
        }

        Ok(Some(((min, max), i + 1)))
    }

    fn read_number(&self, i: &mut usize) -> Result<Option<u32>> {
        let begin = *i;
        let mut value: u32 = 0;

        while let Some(&b) = self.input.get(*i) {
            if !b.is_ascii_digit() {
                break;
            }
            value = value.saturating_mul(10).saturating_add((b - b'0') as u32);
            *i += 1;
        }

        if *i == begin {
            return Ok(None);
        }
        if value > MAX_REPEAT {
            return Err(self.error_at(begin, ParseErrorKind::RepetitionTooLarge(MAX_REPEAT)));
        }

        Ok(Some(value))
    }

    /// Returns `None` for constructs that produce no node: inline flag
    /// settings and comments.
    fn parse_atom(&mut self) -> Result<Option<Ast>> {
        let start = self.pos;
        let b = match self.bump() {
            Some(b) => b,
            None => return Ok(None),
        };

        let ast = match b {
            b'(' => return self.parse_group(start),
            b'[' => self.parse_class(start)?,
            b'.' => {
                let set = if self.mode.dotall {
                    ByteSet::full()
                } else {
                    ByteSet::single(b'\n').negate()
                };
                Ast::Literal(set)
            }
            b'^' => Ast::Anchor(if self.mode.multiline {
                AnchorKind::StartLine
            } else {
                AnchorKind::StartText
            }),
            b'$' => Ast::Anchor(if self.mode.multiline {
                AnchorKind::EndLine
            } else {
                AnchorKind::EndTextNewline
            }),
            b'\\' => self.parse_escape(start)?,
            _ => self.literal(b),
        };

        Ok(Some(ast))
    }

    fn literal(&self, b: u8) -> Ast {
        let set = ByteSet::single(b);
        Ast::Literal(if self.mode.caseless { set.case_fold() } else { set })
    }

    fn parse_group(&mut self, open: usize) -> Result<Option<Ast>> {
        let saved = self.mode;

        if self.eat(b'?') {
            match self.peek() {
                Some(b':') => self.pos += 1,
                Some(b'=') | Some(b'!') => {
                    return Err(self.error_at(open, ParseErrorKind::UnsupportedLookaround));
                }
                Some(b'<') if matches!(self.peek_at(1), Some(b'=') | Some(b'!')) => {
                    return Err(self.error_at(open, ParseErrorKind::UnsupportedLookaround));
                }
                Some(b'<') => {
                    self.pos += 1;
                    self.skip_group_name(open, b'>')?;
                }
                Some(b'\'') => {
                    self.pos += 1;
                    self.skip_group_name(open, b'\'')?;
                }
                Some(b'P') => {
                    self.pos += 1;
                    match self.peek() {
                        Some(b'<') => {
                            self.pos += 1;
                            self.skip_group_name(open, b'>')?;
                        }
                        Some(b'=') => {
                            let kind = ParseErrorKind::UnsupportedBackreference;
                            return Err(self.error_at(open, kind));
                        }
                        _ => {
                            return Err(self.unsupported(open, "pattern recursion"));
                        }
                    }
                }
                Some(b'#') => {
                    while let Some(b) = self.bump() {
                        if b == b')' {
                            return Ok(None);
                        }
                    }
                    return Err(self.error_at(open, ParseErrorKind::UnbalancedGroup));
                }
                Some(b'>') => return Err(self.unsupported(open, "atomic group")),
                Some(b'|') => return Err(self.unsupported(open, "branch reset group")),
                Some(b'(') => return Err(self.unsupported(open, "conditional group")),
                Some(b'R') | Some(b'&') | Some(b'+') | Some(b'0'..=b'9') => {
                    return Err(self.unsupported(open, "pattern recursion"));
                }
                Some(b'-') if matches!(self.peek_at(1), Some(b'0'..=b'9')) => {
                    return Err(self.unsupported(open, "pattern recursion"));
                }
                _ => {
                    if self.parse_inline_flags(open)? == b')' {
                        // Applies to the rest of the enclosing group.
                        return Ok(None);
                    }
                }
            }
        }

        let inner = self.parse_alternation()?;
        if !self.eat(b')') {
            return Err(self.error_at(open, ParseErrorKind::UnbalancedGroup));
        }

        self.mode = saved;
        Ok(Some(inner))
    }

    fn unsupported(&self, position: usize, what: &str) -> ParseError {
        self.error_at(position, ParseErrorKind::UnsupportedConstruct(what.to_string()))
    }

    fn skip_group_name(&mut self, open: usize, terminator: u8) -> Result<()> {
        while let Some(b) = self.bump() {
            if b == terminator {
                return Ok(());
            }
            if !(b.is_ascii_alphanumeric() || b == b'_') {
                return Err(self.unsupported(self.pos - 1, "malformed group name"));
            }
        }
        Err(self.error_at(open, ParseErrorKind::UnbalancedGroup))
    }

    /// Applies `ims` / `-ims` to the current mode. Returns the terminator,
    /// either `)` or `:`.
    fn parse_inline_flags(&mut self, open: usize) -> Result<u8> {
        let mut negate = false;

        loop {
            let pos = self.pos;
            match self.bump() {
                None => return Err(self.error_at(open, ParseErrorKind::UnbalancedGroup)),
                Some(b')') => return Ok(b')'),
                Some(b':') => return Ok(b':'),
                Some(b'-') if !negate => negate = true,
                Some(b'i') => self.mode.caseless = !negate,
                Some(b'm') => self.mode.multiline = !negate,
                Some(b's') => self.mode.dotall = !negate,
                Some(other) => {
                    return Err(self.error_at(pos, ParseErrorKind::UnknownFlag(other as char)));
                }
            }
        }
    }

    fn parse_escape(&mut self, start: usize) -> Result<Ast> {
        let c = self
            .bump()
            .ok_or_else(|| self.error_at(start, ParseErrorKind::TrailingBackslash))?;

        let ast = match c {
            b'd' => Ast::Literal(*DIGIT),
            b'D' => Ast::Literal(DIGIT.negate()),
            b'w' => Ast::Literal(*WORD),
            b'W' => Ast::Literal(WORD.negate()),
            b's' => Ast::Literal(*SPACE),
            b'S' => Ast::Literal(SPACE.negate()),
            b'b' => Ast::Anchor(AnchorKind::WordBoundary),
            b'B' => Ast::Anchor(AnchorKind::NotWordBoundary),
            b'A' => Ast::Anchor(AnchorKind::StartText),
            b'z' => Ast::Anchor(AnchorKind::EndText),
            b'Z' => Ast::Anchor(AnchorKind::EndTextNewline),
            b'1'..=b'9' | b'g' | b'k' => {
                return Err(self.error_at(start, ParseErrorKind::UnsupportedBackreference));
            }
            b'G' | b'K' | b'X' | b'R' | b'C' | b'p' | b'P' | b'Q' | b'E' => {
                return Err(self.unsupported(start, &format!("\\{}", c as char)));
            }
            _ => {
                let byte = self.escape_byte(c, start)?;
                self.literal(byte)
            }
        };

        Ok(ast)
    }

    fn escape_byte(&mut self, c: u8, start: usize) -> Result<u8> {
        let byte = match c {
            b'n' => b'\n',
            b'r' => b'\r',
            b't' => b'\t',
            b'f' => 0x0C,
            b'v' => 0x0B,
            b'a' => 0x07,
            b'e' => 0x1B,
            b'0' => self.parse_octal_tail(),
            b'x' => self.parse_hex(start)?,
            c if !c.is_ascii_alphanumeric() => c,
            c => return Err(self.error_at(start, ParseErrorKind::InvalidEscape(c as char))),
        };

        Ok(byte)
    }

    /// `\0` followed by up to two octal digits.
    fn parse_octal_tail(&mut self) -> u8 {
        let mut value: u8 = 0;
        for _ in 0..2 {
            match self.peek() {
                Some(d @ b'0'..=b'7') => {
                    value = value * 8 + (d - b'0');
                    self.pos += 1;
                }
                _ => break,
            }
        }
        value
    }

    fn parse_hex(&mut self, start: usize) -> Result<u8> {
        let invalid = ParseError::new(start, ParseErrorKind::InvalidHexEscape);

        if self.eat(b'{') {
            let input = self.input;
            let digits_start = self.pos;
            while matches!(self.peek(), Some(b) if b.is_ascii_hexdigit()) {
                self.pos += 1;
            }
            let digits = &input[digits_start..self.pos];
            if digits.is_empty() || !self.eat(b'}') {
                return Err(invalid);
            }
            let text = std::str::from_utf8(digits).map_err(|_| invalid.clone())?;
            let value = u32::from_str_radix(text, 16).map_err(|_| invalid.clone())?;
            return u8::try_from(value).map_err(|_| invalid);
        }

        let mut value: u8 = 0;
        let mut count = 0;
        while count < 2 {
            match self.peek().and_then(|b| (b as char).to_digit(16)) {
                Some(d) => {
                    value = value * 16 + d as u8;
                    self.pos += 1;
                    count += 1;
                }
                None => break,
            }
        }

        if count == 0 {
            return Err(invalid);
        }
        Ok(value)
    }

    fn parse_class(&mut self, open: usize) -> Result<Ast> {
        let negated = self.eat(b'^');
        let mut set = ByteSet::empty();
        let mut first = true;

        loop {
            let item_start = self.pos;
            let b = self
                .bump()
                .ok_or_else(|| self.error_at(open, ParseErrorKind::UnclosedClass))?;

            if b == b']' && !first {
                break;
            }
            first = false;

            if b == b'[' && self.peek() == Some(b':') {
                if let Some(posix) = self.parse_posix_class(item_start)? {
                    set.union(&posix);
                    continue;
                }
            }

            let lo = match b {
                b'\\' => match self.class_escape(item_start)? {
                    ClassItem::Byte(x) => x,
                    ClassItem::Set(s) => {
                        set.union(&s);
                        continue;
                    }
                },
                _ => b,
            };

            let is_range = self.peek() == Some(b'-')
                && matches!(self.peek_at(1), Some(next) if next != b']');
            if !is_range {
                set.insert(lo);
                continue;
            }

            self.pos += 1;
            let hi_start = self.pos;
            let hb = self
                .bump()
                .ok_or_else(|| self.error_at(open, ParseErrorKind::UnclosedClass))?;

            let hi = if hb == b'\\' {
                match self.class_escape(hi_start)? {
                    ClassItem::Byte(x) => x,
                    ClassItem::Set(s) => {
                        // `[a-\d]`: the dash is literal.
                        set.insert(lo);
                        set.insert(b'-');
                        set.union(&s);
                        continue;
                    }
                }
            } else {
                hb
            };

            if lo > hi {
                return Err(self.error_at(
                    item_start,
                    ParseErrorKind::InvalidClassRange(lo as char, hi as char),
                ));
            }
            set.insert_range(lo, hi);
        }

        if self.mode.caseless {
            set = set.case_fold();
        }
        if negated {
            set = set.negate();
        }

        Ok(Ast::Literal(set))
    }

    fn class_escape(&mut self, start: usize) -> Result<ClassItem> {
        let c = self
            .bump()
            .ok_or_else(|| self.error_at(start, ParseErrorKind::UnclosedClass))?;

        let item = match c {
            b'd' => ClassItem::Set(*DIGIT),
            b'D' => ClassItem::Set(DIGIT.negate()),
            b'w' => ClassItem::Set(*WORD),
            b'W' => ClassItem::Set(WORD.negate()),
            b's' => ClassItem::Set(*SPACE),
            b'S' => ClassItem::Set(SPACE.negate()),
            b'b' => ClassItem::Byte(0x08),
            _ => ClassItem::Byte(self.escape_byte(c, start)?),
        };

        Ok(item)
    }

    /// `[:name:]` or `[:^name:]` inside a bracket class. The cursor sits on
    /// the `:`. Returns `None` (consuming nothing) when there is no closing
    /// `:]`, in which case the `[` is literal.
    fn parse_posix_class(&mut self, start: usize) -> Result<Option<ByteSet>> {
        let input = self.input;
        let body_start = self.pos + 1;
        let close = input[body_start..]
            .windows(2)
            .position(|w| w == b":]")
            .map(|p| body_start + p);

        let close = match close {
            Some(close) => close,
            None => return Ok(None),
        };

        let mut name = &input[body_start..close];
        let negated = name.first() == Some(&b'^');
        if negated {
            name = &name[1..];
        }

        let set = posix_class(name).ok_or_else(|| {
            self.unsupported(
                start,
                &format!("POSIX class [:{}:]", String::from_utf8_lossy(name)),
            )
        })?;

        self.pos = close + 2;
        Ok(Some(if negated { set.negate() } else { set }))
    }
}

fn posix_class(name: &[u8]) -> Option<ByteSet> {
    let mut set = ByteSet::empty();

    match name {
        b"alpha" => {
            set.insert_range(b'a', b'z');
            set.insert_range(b'A', b'Z');
        }
        b"digit" => set = *DIGIT,
        b"alnum" => {
            set.insert_range(b'a', b'z');
            set.insert_range(b'A', b'Z');
            set.insert_range(b'0', b'9');
        }
        b"word" => set = *WORD,
        b"space" => set = *SPACE,
        b"blank" => {
            set.insert(b' ');
            set.insert(b'\t');
        }
        b"upper" => set.insert_range(b'A', b'Z'),
        b"lower" => set.insert_range(b'a', b'z'),
        b"xdigit" => {
            set.insert_range(b'0', b'9');
            set.insert_range(b'a', b'f');
            set.insert_range(b'A', b'F');
        }
        b"punct" => {
            for b in 0x21..=0x7Eu8 {
                if b.is_ascii_punctuation() {
                    set.insert(b);
                }
            }
        }
        b"print" => set.insert_range(0x20, 0x7E),
        b"graph" => set.insert_range(0x21, 0x7E),
        b"cntrl" => {
            set.insert_range(0x00, 0x1F);
            set.insert(0x7F);
        }
        _ => return None,
    }

    Some(set)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(b: u8) -> Ast {
        Ast::Literal(ByteSet::single(b))
    }

    fn parse_ok(source: &str) -> Ast {
        parse(source, PatternFlags::empty()).unwrap()
    }

    fn parse_err(source: &str) -> ParseError {
        parse(source, PatternFlags::empty()).unwrap_err()
    }

    #[test]
    fn test_literal_concat() {
        assert_eq!(parse_ok("ab"), Ast::Concat(vec![lit(b'a'), lit(b'b')]));
        assert_eq!(parse_ok(""), Ast::Empty);
    }

    #[test]
    fn test_alternation_and_groups() {
        let ast = parse_ok("a|(?:b|c)");
        assert_eq!(
            ast,
            Ast::Alternation(vec![lit(b'a'), Ast::Alternation(vec![lit(b'b'), lit(b'c')])])
        );
        assert_eq!(parse_ok("(?P<name>a)"), lit(b'a'));
        assert_eq!(parse_ok("(?<name>a)"), lit(b'a'));
    }

    #[test]
    fn test_repetition_forms() {
        let rep = |min, max| Ast::Repetition { child: Box::new(lit(b'a')), min, max };
        assert_eq!(parse_ok("a*"), rep(0, None));
        assert_eq!(parse_ok("a+"), rep(1, None));
        assert_eq!(parse_ok("a?"), rep(0, Some(1)));
        assert_eq!(parse_ok("a{3}"), rep(3, Some(3)));
        assert_eq!(parse_ok("a{2,}"), rep(2, None));
        assert_eq!(parse_ok("a{2,5}"), rep(2, Some(5)));
        assert_eq!(parse_ok("a*?"), rep(0, None));
    }

    #[test]
    fn test_brace_without_bounds_is_literal() {
        assert_eq!(parse_ok("a{x"), Ast::Concat(vec![lit(b'a'), lit(b'{'), lit(b'x')]));
        assert_eq!(parse_ok("{"), lit(b'{'));
    }

    #[test]
    fn test_dot_respects_dotall() {
        let plain = parse(".", PatternFlags::empty()).unwrap();
        let dotall = parse(".", PatternFlags::DOTALL).unwrap();
        match (plain, dotall) {
            (Ast::Literal(p), Ast::Literal(d)) => {
                assert!(!p.contains(b'\n'));
                assert!(d.contains(b'\n'));
                assert_eq!(d.len(), 256);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_anchors_respect_multiline() {
        assert_eq!(parse_ok("^"), Ast::Anchor(AnchorKind::StartText));
        assert_eq!(parse_ok("$"), Ast::Anchor(AnchorKind::EndTextNewline));
        let multiline = |source| parse(source, PatternFlags::MULTILINE).unwrap();
        assert_eq!(multiline("^"), Ast::Anchor(AnchorKind::StartLine));
        assert_eq!(multiline("$"), Ast::Anchor(AnchorKind::EndLine));
    }

    #[test]
    fn test_caseless_literal_and_inline_flags() {
        let folded = Ast::Literal(ByteSet::single(b'a').case_fold());
        assert_eq!(parse("a", PatternFlags::CASELESS).unwrap(), folded);
        assert_eq!(parse_ok("(?i)a"), folded);
        assert_eq!(parse_ok("(?i:a)b"), Ast::Concat(vec![folded.clone(), lit(b'b')]));
        assert_eq!(parse("(?-i)a", PatternFlags::CASELESS).unwrap(), lit(b'a'));
        assert_eq!(parse_ok("(?#comment)a"), lit(b'a'));
    }

    #[test]
    fn test_classes() {
        match parse_ok("[a-c\\d_]") {
            Ast::Literal(set) => {
                assert!(set.contains(b'b'));
                assert!(set.contains(b'7'));
                assert!(set.contains(b'_'));
                assert!(!set.contains(b'd'));
            }
            other => panic!("unexpected {:?}", other),
        }

        match parse_ok("[^]a]") {
            Ast::Literal(set) => {
                assert!(!set.contains(b']'));
                assert!(!set.contains(b'a'));
                assert!(set.contains(b'\n'));
            }
            other => panic!("unexpected {:?}", other),
        }

        match parse_ok("[[:upper:]-]") {
            Ast::Literal(set) => {
                assert!(set.contains(b'Q'));
                assert!(set.contains(b'-'));
                assert!(!set.contains(b'q'));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_escapes() {
        assert_eq!(parse_ok("\\x41"), lit(b'A'));
        assert_eq!(parse_ok("\\x{7f}"), lit(0x7F));
        assert_eq!(parse_ok("\\."), lit(b'.'));
        assert_eq!(parse_ok("\\n"), lit(b'\n'));
        assert_eq!(parse_ok("\\b"), Ast::Anchor(AnchorKind::WordBoundary));
    }

    #[test]
    fn test_unbalanced_groups() {
        assert_eq!(parse_err("(ab").kind, ParseErrorKind::UnbalancedGroup);
        assert_eq!(parse_err("(ab").position, 0);
        let err = parse_err("ab)");
        assert_eq!(err.kind, ParseErrorKind::UnbalancedGroup);
        assert_eq!(err.position, 2);
    }

    #[test]
    fn test_invalid_bounds() {
        let err = parse_err("a{5,2}");
        assert_eq!(err.kind, ParseErrorKind::InvalidRepetition(5, 2));
        assert_eq!(err.position, 1);
        assert_eq!(parse_err("a{70000}").kind, ParseErrorKind::RepetitionTooLarge(MAX_REPEAT));
    }

    #[test]
    fn test_unsupported_constructs() {
        assert_eq!(parse_err("(a)\\1").kind, ParseErrorKind::UnsupportedBackreference);
        assert_eq!(parse_err("a(?=b)").kind, ParseErrorKind::UnsupportedLookaround);
        assert_eq!(parse_err("(?<!a)b").kind, ParseErrorKind::UnsupportedLookaround);
        assert!(parse_err("(?>a)").is_unsupported());
        assert!(parse_err("a++").is_unsupported());
    }

    #[test]
    fn test_other_errors() {
        assert_eq!(parse_err("*a").kind, ParseErrorKind::NothingToRepeat);
        assert_eq!(parse_err("[abc").kind, ParseErrorKind::UnclosedClass);
        assert_eq!(parse_err("a\\").kind, ParseErrorKind::TrailingBackslash);
        assert_eq!(parse_err("\\q").kind, ParseErrorKind::InvalidEscape('q'));
        assert_eq!(parse_err("[z-a]").kind, ParseErrorKind::InvalidClassRange('z', 'a'));
        assert_eq!(parse_err("(?y)a").kind, ParseErrorKind::UnknownFlag('y'));
    }

    #[test]
    fn test_stacked_quantifiers_rejected() {
        let err = parse_err("a**");
        assert_eq!(err.kind, ParseErrorKind::NothingToRepeat);
        assert_eq!(err.position, 2);
        assert_eq!(parse_err("a{2}{3}").kind, ParseErrorKind::NothingToRepeat);
        assert_eq!(parse_err("(ab)+?*").kind, ParseErrorKind::NothingToRepeat);
        assert_eq!(parse_err("x?{2}").kind, ParseErrorKind::NothingToRepeat);

        assert_eq!(parse_ok("(?:a{2}){3}"), parse_ok("(a{2}){3}"));
        assert_eq!(parse_ok("a{2}{"), parse_ok("a{2}\\{"));
    }
}
