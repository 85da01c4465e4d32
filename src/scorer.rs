use chrono::{DateTime, Local};

use crate::config::Config;
use crate::model::Verdict;

/// Weights for the abandonment score, normally taken from [`Config`].
#[derive(Debug, Clone, Copy)]
pub struct Weights {
    pub weight_size: f64,
    pub weight_days: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Weights { weight_size: 2.0, weight_days: 0.01 }
    }
}

impl From<&Config> for Weights {
    fn from(config: &Config) -> Self {
        Weights { weight_size: config.weight_size, weight_days: config.weight_days }
    }
}

/// What the scorer derives from size and recency.
#[derive(Debug, Clone, Copy)]
pub struct Scored {
    pub size_gb: f64,
    pub days_idle: u64,
    pub score: f64,
    pub verdict: Verdict,
}

/// Pure scoring function over `(size_bytes, last_used_at)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Scorer {
    weights: Weights,
}

impl Scorer {
    pub fn new(weights: Weights) -> Self {
        Scorer { weights }
    }

    pub fn score(
        &self,
        size_bytes: u64,
        last_used_at: DateTime<Local>,
        now: DateTime<Local>,
    ) -> Scored {
        let size_gb = size_bytes as f64 / (1u64 << 30) as f64;
        // Future-dated access times (clock skew) clamp to zero idle days.
        let days_idle = (now - last_used_at).num_days().max(0) as u64;

        let score = self.weights.weight_size * size_gb + self.weights.weight_days * days_idle as f64;
        let verdict = verdict_for(size_gb, days_idle);

        Scored { size_gb, days_idle, score, verdict }
    }
}

/// Verdict ladder, first match wins. SafeToRemove needs both conditions,
/// LikelyNeeded needs only one: a cautious bias against over-recommending
/// removal.
fn verdict_for(size_gb: f64, days_idle: u64) -> Verdict {
    if size_gb > 1.0 && days_idle > 90 {
        Verdict::SafeToRemove
    } else if size_gb < 0.1 || days_idle < 30 {
        Verdict::LikelyNeeded
    } else {
        Verdict::Consider
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    const GIB: u64 = 1 << 30;
    const MIB: u64 = 1 << 20;

    fn score_at(size_bytes: u64, idle_days: i64) -> Scored {
        let now = Local::now();
        Scorer::default().score(size_bytes, now - Duration::days(idle_days), now)
    }

    #[test]
    fn large_and_stale_scores_and_recommends_removal() {
        let scored = score_at(2 * GIB, 120);
        assert!((scored.score - 5.2).abs() < 1e-9);
        assert_eq!(scored.verdict, Verdict::SafeToRemove);
    }

    #[test]
    fn boundary_values_fall_to_consider() {
        // Thresholds are strict: exactly 1.0 GB and 90 idle days is not
        // enough for SafeToRemove.
        let scored = score_at(GIB, 90);
        assert_eq!(scored.verdict, Verdict::Consider);
    }

    #[test]
    fn tiny_apps_stay_likely_needed_however_stale() {
        let scored = score_at(50 * MIB, 200);
        assert_eq!(scored.verdict, Verdict::LikelyNeeded);
    }

    #[test]
    fn recently_used_apps_stay_likely_needed_however_big() {
        let scored = score_at(500 * MIB, 10);
        assert_eq!(scored.verdict, Verdict::LikelyNeeded);
    }

    #[test]
    fn future_access_time_clamps_idle_days_to_zero() {
        let now = Local::now();
        let scored = Scorer::default().score(2 * GIB, now + Duration::days(5), now);
        assert_eq!(scored.days_idle, 0);
        assert_eq!(scored.verdict, Verdict::LikelyNeeded);
        assert!((scored.score - 4.0).abs() < 1e-9);
    }

    #[test]
    fn custom_weights_change_the_score_only() {
        let scorer = Scorer::new(Weights { weight_size: 1.0, weight_days: 1.0 });
        let now = Local::now();
        let scored = scorer.score(GIB, now - Duration::days(40), now);
        assert!((scored.score - 41.0).abs() < 1e-9);
        assert_eq!(scored.verdict, Verdict::Consider);
    }
}
