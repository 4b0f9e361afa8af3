//! Session high scores
//!
//! Lives only as long as the process. Entries stay sorted by descending score
//! and only the best ten are kept.

/// How many entries the board keeps
pub const LEADERBOARD_SIZE: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreEntry {
    pub name: String,
    pub score: u64,
}

#[derive(Debug, Clone, Default)]
pub struct Leaderboard {
    entries: Vec<ScoreEntry>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finished game. Returns the entry's rank (0 = best) if it made the board.
    pub fn record(&mut self, name: &str, score: u64) -> Option<usize> {
        // Insert after any equal scores so earlier results keep their place
        let rank = self.entries.partition_point(|entry| entry.score >= score);
        if rank >= LEADERBOARD_SIZE {
            return None;
        }
        self.entries.insert(
            rank,
            ScoreEntry {
                name: name.to_string(),
                score,
            },
        );
        self.entries.truncate(LEADERBOARD_SIZE);
        Some(rank)
    }

    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    pub fn best(&self) -> Option<&ScoreEntry> {
        self.entries.first()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_descending() {
        let mut board = Leaderboard::new();
        board.record("ana", 300);
        board.record("budi", 900);
        board.record("citra", 100);
        let scores: Vec<_> = board.entries().iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![900, 300, 100]);
        assert_eq!(board.best().unwrap().name, "budi");
    }

    #[test]
    fn test_ties_keep_arrival_order() {
        let mut board = Leaderboard::new();
        board.record("first", 500);
        assert_eq!(board.record("second", 500), Some(1));
        assert_eq!(board.entries()[0].name, "first");
    }

    #[test]
    fn test_keeps_top_ten() {
        let mut board = Leaderboard::new();
        for score in 1..=10 {
            board.record("p", score * 100);
        }
        assert_eq!(board.record("low", 50), None);
        assert_eq!(board.entries().len(), LEADERBOARD_SIZE);

        assert_eq!(board.record("high", 550), Some(5));
        assert_eq!(board.entries().len(), LEADERBOARD_SIZE);
        assert_eq!(board.entries().last().unwrap().score, 200);
    }

    #[test]
    fn test_empty() {
        let board = Leaderboard::new();
        assert!(board.is_empty());
        assert!(board.best().is_none());
    }
}
