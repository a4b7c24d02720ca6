use pentago::board::PositionKey;
use pentago::eval::Score;
use pentago::moves::Move;

use crate::transposition_table::CacheTable;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TTFlag {
    /// Search raised alpha and was not pruned (PV-node)
    Exact,
    /// Search was beta pruned (CUT-node)
    Lower,
    /// Search did not raise alpha (ALL-node)
    Upper,
}

#[derive(Debug, Copy, Clone)]
pub struct TTEntry {
    pub flag: TTFlag,
    pub depth: u8,
    pub value: Score,
    pub best_move: Option<Move>,
}

impl TTEntry {
    #[inline]
    pub fn new(flag: TTFlag, depth: u8, value: Score, best_move: Option<Move>) -> Self {
        Self {
            flag,
            depth,
            value,
            best_move,
        }
    }

    /// Value usable to terminate a subtree searched to `depth` within the
    /// `(alpha, beta)` window. An entry recorded at a shallower depth is never
    /// usable; at sufficient depth an exact value always is, a lower bound
    /// only when it reaches beta, an upper bound only when it undercuts alpha.
    pub fn cutoff(&self, depth: u8, alpha: Score, beta: Score) -> Option<Score> {
        if self.depth < depth {
            return None;
        }
        match self.flag {
            TTFlag::Exact => Some(self.value),
            TTFlag::Lower if self.value >= beta => Some(self.value),
            TTFlag::Upper if self.value <= alpha => Some(self.value),
            _ => None,
        }
    }
}

pub const DEFAULT_SIZE_MB: u32 = 64;

/// Transposition table for the minimax engine, keyed by canonical position
/// keys. Writes overwrite unconditionally; the table persists across search
/// calls and is cleared explicitly at new-game boundaries.
pub struct TT {
    table: CacheTable<PositionKey, TTEntry>,
}

impl std::fmt::Debug for TT {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TT")
            .field("megabytes", &self.table.megabytes())
            .finish()
    }
}

impl TT {
    pub fn new(size_mb: u32) -> Self {
        Self {
            table: CacheTable::new(size_mb as usize),
        }
    }

    #[inline]
    pub fn get(&self, key: &PositionKey) -> Option<TTEntry> {
        self.table.get(key)
    }

    #[inline]
    pub fn insert(&mut self, key: PositionKey, entry: TTEntry) {
        self.table.set(&key, entry);
    }

    #[inline]
    pub fn clear(&mut self) {
        self.table.clear();
    }

    pub fn occupied_count(&self) -> usize {
        self.table.occupied_count()
    }
}

impl Default for TT {
    fn default() -> Self {
        Self::new(DEFAULT_SIZE_MB)
    }
}
