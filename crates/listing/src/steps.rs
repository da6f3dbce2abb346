//! Ordered wizard steps with a clamped cursor.

use itemforge_core::{DomainError, DomainResult};

/// Step positions of the listing wizard.
pub mod step {
    pub const GENERAL: usize = 0;
    pub const MEDIA: usize = 1;
    pub const PRICING: usize = 2;
    pub const FULFILLMENT: usize = 3;
    pub const DETAILS: usize = 4;
}

/// Labels of the listing wizard, in order.
pub const LISTING_STEPS: [&str; 5] = [
    "Basic Information",
    "Images & Media",
    "Pricing & Stock",
    "Services & Guarantees",
    "Additional Info",
];

/// An immutable list of step labels plus a cursor.
///
/// Every move clamps into `[0, step_count - 1]`; out-of-range requests are
/// never errors, so step indicators can always be clickable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepSequence {
    labels: Vec<String>,
    current: usize,
}

impl StepSequence {
    pub fn new<I, S>(labels: I) -> DomainResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        if labels.is_empty() {
            return Err(DomainError::invariant("a wizard needs at least one step"));
        }
        Ok(Self { labels, current: 0 })
    }

    /// The five-step listing wizard.
    pub fn listing() -> Self {
        Self {
            labels: LISTING_STEPS.iter().map(|l| l.to_string()).collect(),
            current: 0,
        }
    }

    pub fn step_count(&self) -> usize {
        self.labels.len()
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    pub fn current_label(&self) -> &str {
        &self.labels[self.current]
    }

    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    pub fn is_last(&self) -> bool {
        self.current == self.last()
    }

    fn last(&self) -> usize {
        self.labels.len() - 1
    }

    pub fn go_to(&mut self, index: usize) -> usize {
        self.current = index.min(self.last());
        self.current
    }

    pub fn advance(&mut self) -> usize {
        self.go_to(self.current.saturating_add(1))
    }

    pub fn retreat(&mut self) -> usize {
        self.go_to(self.current.saturating_sub(1))
    }
}

impl Default for StepSequence {
    fn default() -> Self {
        Self::listing()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_sequence_starts_at_first_step() {
        let steps = StepSequence::listing();
        assert_eq!(steps.step_count(), 5);
        assert_eq!(steps.current(), 0);
        assert_eq!(steps.current_label(), "Basic Information");
        assert!(steps.is_first());
        assert!(!steps.is_last());
    }

    #[test]
    fn moves_saturate_at_both_ends() {
        let mut steps = StepSequence::listing();
        assert_eq!(steps.retreat(), 0);

        for _ in 0..10 {
            steps.advance();
        }
        assert_eq!(steps.current(), step::DETAILS);
        assert!(steps.is_last());
        assert_eq!(steps.advance(), step::DETAILS);
    }

    #[test]
    fn go_to_clamps_out_of_range() {
        let mut steps = StepSequence::listing();
        assert_eq!(steps.go_to(usize::MAX), 4);
        assert_eq!(steps.go_to(2), 2);
        assert_eq!(steps.label(2), Some("Pricing & Stock"));
        assert_eq!(steps.label(9), None);
    }

    #[test]
    fn empty_sequence_is_rejected() {
        let err = StepSequence::new(Vec::<String>::new()).unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
    }

    #[test]
    fn single_step_sequence_is_first_and_last() {
        let mut steps = StepSequence::new(["Only"]).unwrap();
        assert_eq!(steps.advance(), 0);
        assert!(steps.is_first() && steps.is_last());
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        #[derive(Debug, Clone)]
        enum Move {
            GoTo(usize),
            Advance,
            Retreat,
        }

        fn moves() -> impl Strategy<Value = Move> {
            prop_oneof![
                any::<usize>().prop_map(Move::GoTo),
                Just(Move::Advance),
                Just(Move::Retreat),
            ]
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 1000,
                ..ProptestConfig::default()
            })]

            /// Property: for any N and any move sequence, the cursor stays in `[0, N-1]`.
            #[test]
            fn cursor_stays_in_bounds(
                n in 1usize..20,
                script in proptest::collection::vec(moves(), 0..50)
            ) {
                let mut steps = StepSequence::new((0..n).map(|i| format!("step {i}"))).unwrap();
                for m in script {
                    match m {
                        Move::GoTo(i) => { steps.go_to(i); }
                        Move::Advance => { steps.advance(); }
                        Move::Retreat => { steps.retreat(); }
                    }
                    prop_assert!(steps.current() < n);
                }
            }

            /// Property: `go_to(k)` twice equals `go_to(k)` once.
            #[test]
            fn go_to_is_idempotent(n in 1usize..20, start in 0usize..20, k in any::<usize>()) {
                let mut once = StepSequence::new((0..n).map(|i| format!("step {i}"))).unwrap();
                once.go_to(start);
                let mut twice = once.clone();

                once.go_to(k);
                twice.go_to(k);
                twice.go_to(k);

                prop_assert_eq!(once.current(), twice.current());
            }
        }
    }
}
