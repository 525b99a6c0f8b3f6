// Tue Jan 13 2026 - Alex

use crate::database::Database;
use crate::scanner::pikevm::Threads;
use crate::scanner::result::Match;
use parking_lot::Mutex;
use std::ops::{Deref, DerefMut};

/// Mutable per-scan buffers. Sized once for a database and reused, so
/// scanning never allocates per byte.
#[derive(Debug, Clone)]
pub struct Scratch {
    pub(crate) threads: Threads,
    pub(crate) pending: Vec<Match>,
    pub(crate) seen: Vec<bool>,
}

impl Scratch {
    pub fn new(db: &Database) -> Self {
        Self {
            threads: Threads::new(db.nfa_state_count()),
            pending: Vec::with_capacity(db.pattern_count()),
            seen: vec![false; db.pattern_count()],
        }
    }

    fn empty() -> Self {
        Self {
            threads: Threads::new(0),
            pending: Vec::new(),
            seen: Vec::new(),
        }
    }

    /// True when this scratch can serve `db` without growing.
    pub fn fits(&self, db: &Database) -> bool {
        self.threads.capacity() >= db.nfa_state_count()
    }

    pub(crate) fn prepare(&mut self, db: &Database) {
        if !self.fits(db) {
            log::debug!("growing scratch to {} NFA states", db.nfa_state_count());
            self.threads.resize(db.nfa_state_count());
        } else {
            self.threads.reset();
        }
        self.pending.clear();
    }
}

/// Hands out scratches to concurrent scans and takes them back on drop.
#[derive(Debug, Default)]
pub struct ScratchPool {
    free: Mutex<Vec<Scratch>>,
}

impl ScratchPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, db: &Database) -> PooledScratch<'_> {
        let scratch = self.free.lock().pop().unwrap_or_else(|| Scratch::new(db));
        PooledScratch { pool: self, scratch }
    }

    pub fn available(&self) -> usize {
        self.free.lock().len()
    }
}

pub struct PooledScratch<'a> {
    pool: &'a ScratchPool,
    scratch: Scratch,
}

impl Deref for PooledScratch<'_> {
    type Target = Scratch;

    fn deref(&self) -> &Scratch {
        &self.scratch
    }
}

impl DerefMut for PooledScratch<'_> {
    fn deref_mut(&mut self) -> &mut Scratch {
        &mut self.scratch
    }
}

impl Drop for PooledScratch<'_> {
    fn drop(&mut self) {
        let scratch = std::mem::replace(&mut self.scratch, Scratch::empty());
        self.pool.free.lock().push(scratch);
    }
}
