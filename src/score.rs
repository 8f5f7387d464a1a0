/// Points awarded for every ghost destroyed
pub const SCORE_UNIT: u32 = 10;

/// Current score plus the best score seen since the process started.
///
/// One instance is owned by the game world and handed by `&mut` to every
/// operation that can award points.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreManager {
    score: u32,
    high_score: u32,
}

impl ScoreManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_score(&mut self) {
        self.score += SCORE_UNIT;
    }

    /// Clears the current score. The high score is kept.
    pub fn reset_score(&mut self) {
        self.score = 0;
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// Records the current score as the high score if it beats it.
    /// Returns whether a new high score was recorded.
    pub fn check_new_high_score(&mut self) -> bool {
        if self.score > self.high_score {
            log::info!(
                "new high score {} (previous {})",
                self.score,
                self.high_score
            );
            self.high_score = self.score;
            true
        } else {
            false
        }
    }
}
