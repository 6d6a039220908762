//! Property-based tests for the waveform synthesizer and EQ transform
//!
//! Uses proptest to verify the bounds and determinism guarantees across
//! arbitrary bar counts and EQ settings.

use museq_core::waveform::{apply_eq, eq_gain, synthesize};
use museq_core::EqVector;
use proptest::prelude::*;

fn arbitrary_eq() -> impl Strategy<Value = EqVector> {
    prop::array::uniform8(-12.0f32..=12.0).prop_map(EqVector::new)
}

proptest! {
    /// Property: equal bar counts yield identical sequences within [15, 80]
    #[test]
    fn synthesize_is_deterministic_and_bounded(bar_count in 0usize..1000) {
        let first = synthesize(bar_count);
        let second = synthesize(bar_count);

        prop_assert_eq!(first.len(), bar_count);
        prop_assert_eq!(&first, &second);
        prop_assert!(first.iter().all(|v| (15.0..=80.0).contains(v)));
    }

    /// Property: the transform keeps length and stays within [10, 90]
    #[test]
    fn apply_eq_is_bounded(eq in arbitrary_eq(), bar_count in 0usize..500) {
        let base = synthesize(bar_count);
        let processed = apply_eq(&eq, &base);

        prop_assert_eq!(processed.len(), base.len());
        prop_assert!(processed.iter().all(|v| (10.0..=90.0).contains(v)));
    }

    /// Property: gain is the mean slot value over 12 dB
    #[test]
    fn gain_matches_average(eq in arbitrary_eq()) {
        let expected = eq.as_array().iter().sum::<f32>() / 96.0;
        prop_assert!((eq_gain(&eq) - expected).abs() < 1e-5);
        prop_assert!((-1.0..=1.0).contains(&eq_gain(&eq)));
    }

    /// Property: transform of any waveform with a flat EQ is the clamped identity
    #[test]
    fn flat_eq_is_clamped_identity(bars in prop::collection::vec(0.0f32..100.0, 0..300)) {
        let processed = apply_eq(&EqVector::flat(), &bars);
        for (out, input) in processed.iter().zip(&bars) {
            prop_assert_eq!(*out, input.clamp(10.0, 90.0));
        }
    }

    /// Property: boosting any slot never lowers a bar
    #[test]
    fn boosting_is_monotonic(eq in arbitrary_eq(), slot in 0usize..8, extra in 0.0f32..6.0) {
        let base = synthesize(240);
        let mut boosted = eq;
        let current = eq.get(slot).unwrap_or(0.0);
        boosted.set(slot, current + extra);

        let before = apply_eq(&eq, &base);
        let after = apply_eq(&boosted, &base);
        for (a, b) in after.iter().zip(&before) {
            prop_assert!(a >= b);
        }
    }
}
