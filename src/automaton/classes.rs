// Tue Jan 13 2026 - Alex

use crate::pattern::ByteSet;
use serde::{Deserialize, Serialize};

/// Partition of the 256 byte values into classes that no transition in
/// the automaton can tell apart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ByteClasses {
    map: Vec<u8>,
    count: usize,
}

impl ByteClasses {
    /// Every byte in its own class.
    pub fn singletons() -> Self {
        Self {
            map: (0..=255u8).collect(),
            count: 256,
        }
    }

    pub fn from_sets<'a>(sets: impl IntoIterator<Item = &'a ByteSet>) -> Self {
        // boundaries[b]: b and b + 1 fall in different classes
        let mut boundaries = [false; 256];

        for set in sets {
            for b in 0..255u8 {
                if set.contains(b) != set.contains(b + 1) {
                    boundaries[b as usize] = true;
                }
            }
        }

        let mut map = vec![0u8; 256];
        let mut class = 0usize;
        for b in 0..256usize {
            map[b] = class as u8;
            if b < 255 && boundaries[b] {
                class += 1;
            }
        }

        Self {
            map,
            count: class + 1,
        }
    }

    #[inline]
    pub fn get(&self, byte: u8) -> u8 {
        self.map[byte as usize]
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Lowest byte of each class, indexed by class.
    pub fn representatives(&self) -> Vec<u8> {
        let mut reps = Vec::with_capacity(self.count);
        for b in 0..=255u8 {
            if self.get(b) as usize == reps.len() {
                reps.push(b);
            }
        }
        reps
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.map.len() != 256 {
            return Err(format!("byte class map has {} entries", self.map.len()));
        }
        if self.count == 0 || self.count > 256 {
            return Err(format!("invalid byte class count {}", self.count));
        }
        // Classes are assigned in ascending, gap-free order.
        let mut expected = 0usize;
        for &class in &self.map {
            let class = class as usize;
            if class != expected && class != expected + 1 {
                return Err("byte class map is not contiguous".to_string());
            }
            expected = class;
        }
        if self.map[0] != 0 || expected + 1 != self.count {
            return Err("byte class count does not match map".to_string());
        }
        Ok(())
    }
}
