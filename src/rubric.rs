use serde::Serialize;

// ---------------------------------------------------------------------------
// Status buckets
// ---------------------------------------------------------------------------

const GOOD_MIN_PERCENTAGE: u32 = 80;
const OK_MIN_PERCENTAGE: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Good,
    Ok,
    Poor,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Good => "good",
            Status::Ok => "ok",
            Status::Poor => "poor",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bucket an earned/max pair by its rounded percentage, so a reported
/// percentage and status never disagree. A zero max is always `Poor`.
pub fn status_for(earned: u32, max: u32) -> Status {
    if max == 0 {
        return Status::Poor;
    }
    status_for_percentage(percentage(earned, max))
}

/// Bucket a 0-100 percentage.
pub fn status_for_percentage(percentage: u32) -> Status {
    if percentage >= GOOD_MIN_PERCENTAGE {
        Status::Good
    } else if percentage >= OK_MIN_PERCENTAGE {
        Status::Ok
    } else {
        Status::Poor
    }
}

/// `round(100 * earned / max)`, clamped to 0..=100.
pub fn percentage(earned: u32, max: u32) -> u32 {
    if max == 0 {
        return 0;
    }
    let pct = (100.0 * earned as f64 / max as f64).round() as u32;
    pct.min(100)
}

// ---------------------------------------------------------------------------
// Factors and scores
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreFactor {
    pub name: String,
    pub points_earned: u32,
    pub points_max: u32,
    pub status: Status,
    pub message: String,
}

impl ScoreFactor {
    /// Award `earned` out of `max`; `earned` is capped at `max`.
    pub fn graded(name: &str, earned: u32, max: u32, message: impl Into<String>) -> Self {
        let earned = earned.min(max);
        Self {
            name: name.to_string(),
            points_earned: earned,
            points_max: max,
            status: status_for(earned, max),
            message: message.into(),
        }
    }

    /// All-or-nothing check.
    pub fn check(name: &str, passed: bool, max: u32, message: impl Into<String>) -> Self {
        Self::graded(name, if passed { max } else { 0 }, max, message)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RubricScore {
    pub factors: Vec<ScoreFactor>,
    pub earned: u32,
    pub max: u32,
    pub percentage: u32,
    pub status: Status,
}

impl RubricScore {
    pub fn from_factors(factors: Vec<ScoreFactor>) -> Self {
        let earned = factors.iter().map(|f| f.points_earned).sum();
        let max = factors.iter().map(|f| f.points_max).sum();
        let percentage = percentage(earned, max);
        Self {
            factors,
            earned,
            max,
            percentage,
            status: status_for_percentage(percentage),
        }
    }

    pub fn factor(&self, name: &str) -> Option<&ScoreFactor> {
        self.factors.iter().find(|f| f.name == name)
    }

    /// Factors that did not earn full points, worst first.
    pub fn failing(&self) -> Vec<&ScoreFactor> {
        let mut out: Vec<&ScoreFactor> = self
            .factors
            .iter()
            .filter(|f| f.points_earned < f.points_max)
            .collect();
        out.sort_by_key(|f| std::cmp::Reverse(f.points_max - f.points_earned));
        out
    }
}

// ---------------------------------------------------------------------------
// Unified report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct ReportSection {
    pub name: String,
    pub score: RubricScore,
}

/// Several rubric scores rolled into one overall bucket.
#[derive(Debug, Clone, Serialize)]
pub struct UnifiedReport {
    pub sections: Vec<ReportSection>,
    pub earned: u32,
    pub max: u32,
    pub percentage: u32,
    pub status: Status,
}

impl UnifiedReport {
    pub fn new() -> Self {
        Self {
            sections: Vec::new(),
            earned: 0,
            max: 0,
            percentage: 0,
            status: Status::Poor,
        }
    }

    pub fn push(&mut self, name: &str, score: RubricScore) {
        self.earned += score.earned;
        self.max += score.max;
        self.percentage = percentage(self.earned, self.max);
        self.status = status_for_percentage(self.percentage);
        self.sections.push(ReportSection {
            name: name.to_string(),
            score,
        });
    }
}

impl Default for UnifiedReport {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Bulk tallies
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusTally {
    pub good: usize,
    pub ok: usize,
    pub poor: usize,
}

impl StatusTally {
    pub fn record(&mut self, status: Status) {
        match status {
            Status::Good => self.good += 1,
            Status::Ok => self.ok += 1,
            Status::Poor => self.poor += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.good + self.ok + self.poor
    }
}

impl FromIterator<Status> for StatusTally {
    fn from_iter<I: IntoIterator<Item = Status>>(iter: I) -> Self {
        let mut tally = StatusTally::default();
        for status in iter {
            tally.record(status);
        }
        tally
    }
}
