//! Unit coverage for thrill scoring and weight validation.
#![forbid(unsafe_code)]

use proptest::prelude::*;
use ridepark_core::{SatisfactionDelta, Scorer, ThrillLevel};
use rstest::{fixture, rstest};

use crate::{SatisfactionWeights, ScoreWeights, ScoreWeightsError, ThrillScorer};

#[fixture]
fn scorer() -> ThrillScorer {
    ThrillScorer::default()
}

fn level(raw: u8) -> ThrillLevel {
    ThrillLevel::new(raw).expect("valid level")
}

#[rstest]
#[expect(
    clippy::float_cmp,
    reason = "integer-valued weights produce exact priorities"
)]
fn priority_combines_match_and_saved_minutes(scorer: ThrillScorer) {
    assert_eq!(scorer.priority(10, 40, 40), 400.0_f32);
    assert_eq!(scorer.priority(4, 6, 40), 177.0_f32);
}

#[rstest]
fn close_match_outranks_short_queue(scorer: ThrillScorer) {
    let preference = level(8);
    let ride_a = scorer.thrill_match(level(8), preference);
    let ride_b = scorer.thrill_match(level(2), preference);
    assert!(scorer.priority(ride_a, 40, 40) > scorer.priority(ride_b, 5, 40));
}

#[rstest]
fn longest_queue_cannot_overturn_a_better_match(scorer: ThrillScorer) {
    let preference = level(8);
    let ride_a = scorer.thrill_match(level(8), preference);
    let ride_b = scorer.thrill_match(level(2), preference);
    assert!(scorer.priority(ride_a, 490, 490) > scorer.priority(ride_b, 0, 490));
}

#[rstest]
fn ratio_at_the_limit_is_accepted() {
    let weights = ScoreWeights {
        thrill_match: 10.0,
        wait_time: 1.0,
    };
    assert_eq!(weights.validate(), Ok(weights));
}

#[rstest]
#[case(10, 0, 2_000)]
#[case(10, 40, 1_000)]
#[case(5, 0, 1_000)]
#[case(0, 8, -200)]
fn satisfaction_delta_formula(
    scorer: ThrillScorer,
    #[case] thrill_match: u8,
    #[case] wait: u32,
    #[case] expected_hundredths: i32,
) {
    assert_eq!(
        scorer.satisfaction_delta(thrill_match, wait),
        SatisfactionDelta::from_hundredths(expected_hundredths)
    );
}

#[rstest]
fn gain_is_capped() {
    let weights = SatisfactionWeights {
        per_match_point: 5.0_f32,
        ..SatisfactionWeights::default()
    };
    let scorer = ThrillScorer::new(ScoreWeights::default(), weights).expect("valid weights");
    assert_eq!(
        scorer.satisfaction_delta(10, 0),
        SatisfactionDelta::from_hundredths(2_000)
    );
}

#[rstest]
#[case(ScoreWeights { thrill_match: f32::NAN, wait_time: 0.5 }, ScoreWeightsError::NonFinite { name: "thrill_match" })]
#[case(ScoreWeights { thrill_match: 40.0, wait_time: -1.0 }, ScoreWeightsError::Negative { name: "wait_time" })]
#[case(ScoreWeights { thrill_match: 0.0, wait_time: 0.5 }, ScoreWeightsError::ZeroThrillWeight)]
#[case(ScoreWeights { thrill_match: 1.0, wait_time: 100.0 }, ScoreWeightsError::WaitOutweighsThrill)]
#[case(ScoreWeights { thrill_match: 4.0, wait_time: 0.5 }, ScoreWeightsError::WaitOutweighsThrill)]
fn rejects_invalid_score_weights(#[case] weights: ScoreWeights, #[case] expected: ScoreWeightsError) {
    assert_eq!(weights.validate(), Err(expected));
}

#[rstest]
fn rejects_infinite_penalty() {
    let weights = SatisfactionWeights {
        wait_penalty_per_minute: f32::INFINITY,
        ..SatisfactionWeights::default()
    };
    assert_eq!(
        weights.validate(),
        Err(ScoreWeightsError::NonFinite {
            name: "wait_penalty_per_minute"
        })
    );
}

proptest! {
    #[test]
    fn better_match_always_ranks_higher(
        better in 1_u8..=10,
        wait_better in 0_u32..10_000,
        wait_worse in 0_u32..10_000,
        extra in 0_u32..10_000,
    ) {
        let scorer = ThrillScorer::default();
        let max_wait = wait_better.max(wait_worse) + extra;
        prop_assert!(
            scorer.priority(better, wait_better, max_wait)
                > scorer.priority(better - 1, wait_worse, max_wait)
        );
    }

    #[test]
    fn delta_never_grows_as_match_worsens(
        ride in 1_u8..=10,
        preference in 1_u8..=10,
        wait in 0_u32..300,
    ) {
        let scorer = ThrillScorer::default();
        let pref = level(preference);
        let closer = scorer.thrill_match(level(ride), pref);
        let further = closer.saturating_sub(1);
        prop_assert!(
            scorer.satisfaction_delta(closer, wait) >= scorer.satisfaction_delta(further, wait)
        );
    }

    #[test]
    fn longer_wait_never_raises_delta(thrill_match in 0_u8..=10, wait in 0_u32..300) {
        let scorer = ThrillScorer::default();
        prop_assert!(
            scorer.satisfaction_delta(thrill_match, wait)
                >= scorer.satisfaction_delta(thrill_match, wait + 1)
        );
    }
}
