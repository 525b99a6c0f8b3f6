// Tue Jan 13 2026 - Alex

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A set of byte values, stored as a 256-bit bitmap.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ByteSet {
    bits: [u64; 4],
}

pub static DIGIT: Lazy<ByteSet> = Lazy::new(|| ByteSet::range(b'0', b'9'));

pub static WORD: Lazy<ByteSet> = Lazy::new(|| {
    let mut set = ByteSet::range(b'a', b'z');
    set.insert_range(b'A', b'Z');
    set.insert_range(b'0', b'9');
    set.insert(b'_');
    set
});

pub static SPACE: Lazy<ByteSet> = Lazy::new(|| {
    let mut set = ByteSet::empty();
    for b in [b' ', b'\t', b'\n', b'\r', 0x0B, 0x0C] {
        set.insert(b);
    }
    set
});

impl ByteSet {
    pub const fn empty() -> Self {
        Self { bits: [0; 4] }
    }

    pub const fn full() -> Self {
        Self { bits: [u64::MAX; 4] }
    }

    pub fn single(byte: u8) -> Self {
        let mut set = Self::empty();
        set.insert(byte);
        set
    }

    pub fn range(lo: u8, hi: u8) -> Self {
        let mut set = Self::empty();
        set.insert_range(lo, hi);
        set
    }

    pub fn insert(&mut self, byte: u8) {
        self.bits[(byte >> 6) as usize] |= 1u64 << (byte & 63);
    }

    pub fn insert_range(&mut self, lo: u8, hi: u8) {
        for b in lo..=hi {
            self.insert(b);
        }
    }

    #[inline]
    pub fn contains(&self, byte: u8) -> bool {
        self.bits[(byte >> 6) as usize] & (1u64 << (byte & 63)) != 0
    }

    pub fn union(&mut self, other: &ByteSet) {
        for (a, b) in self.bits.iter_mut().zip(other.bits.iter()) {
            *a |= *b;
        }
    }

    pub fn negate(&self) -> ByteSet {
        let mut bits = self.bits;
        for word in bits.iter_mut() {
            *word = !*word;
        }
        ByteSet { bits }
    }

    /// Adds the other-case counterpart of every ASCII letter in the set.
    pub fn case_fold(&self) -> ByteSet {
        let mut folded = *self;
        for b in self.iter() {
            if b.is_ascii_lowercase() {
                folded.insert(b.to_ascii_uppercase());
            } else if b.is_ascii_uppercase() {
                folded.insert(b.to_ascii_lowercase());
            }
        }
        folded
    }

    pub fn is_empty(&self) -> bool {
        self.bits.iter().all(|&w| w == 0)
    }

    pub fn len(&self) -> usize {
        self.bits.iter().map(|w| w.count_ones() as usize).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        (0..=255u8).filter(move |&b| self.contains(b))
    }

    /// Contiguous inclusive ranges covered by the set, in ascending order.
    pub fn ranges(&self) -> Vec<(u8, u8)> {
        let mut ranges = Vec::new();
        let mut current: Option<(u8, u8)> = None;

        for b in self.iter() {
            current = match current {
                Some((lo, hi)) if hi as u16 + 1 == b as u16 => Some((lo, b)),
                Some(range) => {
                    ranges.push(range);
                    Some((b, b))
                }
                None => Some((b, b)),
            };
        }

        if let Some(range) = current {
            ranges.push(range);
        }
        ranges
    }
}

impl fmt::Debug for ByteSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (lo, hi) in self.ranges() {
            if lo == hi {
                write!(f, "{}", std::ascii::escape_default(lo))?;
            } else {
                write!(
                    f,
                    "{}-{}",
                    std::ascii::escape_default(lo),
                    std::ascii::escape_default(hi)
                )?;
            }
        }
        write!(f, "]")
    }
}

pub fn is_word_byte(byte: u8) -> bool {
    WORD.contains(byte)
}
