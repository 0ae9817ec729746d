use std::fmt;
use std::time::Duration;

/// Condition that ends the iteration loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StopRule {
    /// Stop once this many iterations have completed.
    MaxIterations(usize),
    /// Stop once the relative improvement of the mean distance between two
    /// iterations drops below this fraction.
    RelativeChange(f64),
    /// Stop once this much wall-clock time has elapsed. Checked between
    /// iterations only.
    TimeLimit(Duration),
}

impl StopRule {
    fn rank(&self) -> u8 {
        match self {
            StopRule::MaxIterations(_) => 0,
            StopRule::RelativeChange(_) => 1,
            StopRule::TimeLimit(_) => 2,
        }
    }

    fn is_met(&self, progress: &Progress) -> bool {
        match *self {
            StopRule::MaxIterations(cap) => progress.iterations >= cap,
            StopRule::RelativeChange(threshold) => progress.relative_change < threshold,
            StopRule::TimeLimit(limit) => progress.elapsed > limit,
        }
    }
}

impl Default for StopRule {
    fn default() -> Self {
        StopRule::RelativeChange(0.01)
    }
}

impl fmt::Display for StopRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopRule::MaxIterations(cap) => write!(f, "iteration limit of {} reached", cap),
            StopRule::RelativeChange(threshold) => {
                write!(f, "relative change below {}", threshold)
            }
            StopRule::TimeLimit(limit) => {
                write!(f, "time limit of {:.3}s exceeded", limit.as_secs_f64())
            }
        }
    }
}

/// Snapshot of the loop state the rules are evaluated against.
#[derive(Debug, Clone, Copy)]
pub struct Progress {
    pub iterations: usize,
    pub relative_change: f64,
    pub elapsed: Duration,
}

/// Ordered, de-duplicated set of stop rules combined with OR.
///
/// Rules are evaluated iteration cap first, then relative change, then time
/// limit, so the reported reason is stable when several rules hold at once.
#[derive(Debug, Clone, PartialEq)]
pub struct StopPolicy {
    rules: Vec<StopRule>,
}

impl StopPolicy {
    /// Builds a policy. An empty set falls back to [`StopRule::default`].
    pub fn new<I>(rules: I) -> Self
    where
        I: IntoIterator<Item = StopRule>,
    {
        let mut unique: Vec<StopRule> = Vec::new();
        for rule in rules {
            if !unique.contains(&rule) {
                unique.push(rule);
            }
        }
        if unique.is_empty() {
            unique.push(StopRule::default());
        }
        unique.sort_by_key(StopRule::rank);
        Self { rules: unique }
    }

    pub fn rules(&self) -> &[StopRule] {
        &self.rules
    }

    /// First rule met by `progress`, if any.
    pub fn check(&self, progress: &Progress) -> Option<StopRule> {
        self.rules.iter().copied().find(|rule| rule.is_met(progress))
    }
}

impl Default for StopPolicy {
    fn default() -> Self {
        Self::new([])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn progress(iterations: usize, relative_change: f64, elapsed_ms: u64) -> Progress {
        Progress {
            iterations,
            relative_change,
            elapsed: Duration::from_millis(elapsed_ms),
        }
    }

    #[test]
    fn test_empty_set_falls_back_to_default() {
        let policy = StopPolicy::new(Vec::new());
        assert_eq!(policy.rules(), &[StopRule::RelativeChange(0.01)]);
        assert_eq!(StopPolicy::default(), policy);
    }

    #[test]
    fn test_duplicates_removed_and_rules_ordered() {
        let policy = StopPolicy::new([
            StopRule::TimeLimit(Duration::from_secs(1)),
            StopRule::RelativeChange(0.1),
            StopRule::MaxIterations(5),
            StopRule::RelativeChange(0.1),
            StopRule::MaxIterations(5),
        ]);
        assert_eq!(
            policy.rules(),
            &[
                StopRule::MaxIterations(5),
                StopRule::RelativeChange(0.1),
                StopRule::TimeLimit(Duration::from_secs(1)),
            ]
        );
    }

    #[test]
    fn test_no_rule_met() {
        let policy =
            StopPolicy::new([StopRule::MaxIterations(10), StopRule::RelativeChange(0.01)]);
        assert_eq!(policy.check(&progress(3, 0.5, 0)), None);
    }

    #[test]
    fn test_iteration_cap_reported_first() {
        let policy = StopPolicy::new([
            StopRule::TimeLimit(Duration::from_millis(1)),
            StopRule::RelativeChange(0.5),
            StopRule::MaxIterations(2),
        ]);
        assert_eq!(
            policy.check(&progress(2, 0.0, 100)),
            Some(StopRule::MaxIterations(2))
        );
        assert_eq!(
            policy.check(&progress(1, 0.0, 100)),
            Some(StopRule::RelativeChange(0.5))
        );
        assert_eq!(
            policy.check(&progress(1, 0.9, 100)),
            Some(StopRule::TimeLimit(Duration::from_millis(1)))
        );
    }

    #[test]
    fn test_huge_first_change_does_not_stop() {
        let policy = StopPolicy::default();
        let first_change = (f64::MAX - 4.0) / 4.0;
        assert_eq!(policy.check(&progress(1, first_change, 0)), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            StopRule::MaxIterations(3).to_string(),
            "iteration limit of 3 reached"
        );
        assert_eq!(
            StopRule::RelativeChange(0.01).to_string(),
            "relative change below 0.01"
        );
    }
}
