//! Review state machine.
//!
//! Three states (NEW, MASTERED, STRUGGLING) and one transition, `review`,
//! which is allowed from any state to either target. Counters only grow.

use chrono::{DateTime, Utc};

use crate::types::{Progress, ReviewAction};

/// Apply one review to `current` and return the next progress record.
///
/// A missing record is reviewed from `Progress::default()`, which is the
/// all-zero NEW state.
pub fn review(current: &Progress, action: ReviewAction, now: DateTime<Utc>) -> Progress {
    let mut next = current.clone();
    next.status = action.status();
    next.times_reviewed = next.times_reviewed.saturating_add(1);
    match action {
        ReviewAction::Mastered => next.times_mastered = next.times_mastered.saturating_add(1),
        ReviewAction::Struggling => next.times_struggled = next.times_struggled.saturating_add(1),
    }
    next.last_reviewed_at = Some(now);
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ProgressStatus;
    use chrono::Duration;

    #[test]
    fn first_review_from_missing_record() {
        let now = Utc::now();
        let next = review(&Progress::default(), ReviewAction::Struggling, now);
        assert_eq!(next.status, ProgressStatus::Struggling);
        assert_eq!(next.times_reviewed, 1);
        assert_eq!(next.times_mastered, 0);
        assert_eq!(next.times_struggled, 1);
        assert_eq!(next.last_reviewed_at, Some(now));
    }

    #[test]
    fn mastered_card_can_fall_back_to_struggling() {
        let now = Utc::now();
        let mastered = review(&Progress::default(), ReviewAction::Mastered, now);
        let next = review(&mastered, ReviewAction::Struggling, now + Duration::minutes(1));
        assert_eq!(next.status, ProgressStatus::Struggling);
        assert_eq!(next.times_mastered, 1);
        assert_eq!(next.times_struggled, 1);
        assert_eq!(next.times_reviewed, 2);
    }

    #[test]
    fn counters_stay_consistent_over_any_sequence() {
        let actions = [
            ReviewAction::Mastered,
            ReviewAction::Mastered,
            ReviewAction::Struggling,
            ReviewAction::Mastered,
            ReviewAction::Struggling,
            ReviewAction::Struggling,
        ];
        let start = Utc::now();
        let mut progress = Progress::default();

        for (i, action) in actions.iter().enumerate() {
            let next = review(&progress, *action, start + Duration::seconds(i as i64));
            assert_eq!(
                next.times_reviewed,
                next.times_mastered + next.times_struggled
            );
            assert!(next.times_reviewed > progress.times_reviewed);
            assert!(next.times_mastered >= progress.times_mastered);
            assert!(next.times_struggled >= progress.times_struggled);
            assert_eq!(next.status, action.status());
            progress = next;
        }
    }
}
