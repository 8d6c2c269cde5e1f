//! Property tests for the rating engine

mod fixtures;

use proptest::prelude::*;
use team_trueskill::rating::gaussian::{cdf, density, erf};
use team_trueskill::rating::trueskill::draw_margin;
use team_trueskill::rating::update_teams;
use team_trueskill::types::{MatchOutcome, Participant};
use team_trueskill::TrueSkillParams;

use fixtures::assert_mirrored;

fn belief() -> impl Strategy<Value = (f64, f64)> {
    (0.0f64..3000.0, 1.0f64..500.0)
}

fn team(prefix: &'static str) -> impl Strategy<Value = Vec<Participant>> {
    prop::collection::vec(belief(), 1..=4).prop_map(move |beliefs| {
        beliefs
            .into_iter()
            .enumerate()
            .map(|(i, (mu, sigma))| Participant::new(format!("{}{}", prefix, i), mu, sigma))
            .collect::<Vec<_>>()
    })
}

fn score() -> impl Strategy<Value = f64> {
    prop_oneof![(0u32..5).prop_map(f64::from), 0.0f64..100.0]
}

proptest! {
    #[test]
    fn swapping_teams_mirrors_every_update(
        team_a in team("a"),
        team_b in team("b"),
        score_a in score(),
        score_b in score(),
    ) {
        let params = TrueSkillParams::default();
        let original = update_teams(&team_a, &team_b, score_a, score_b, &params).unwrap();
        let swapped = update_teams(&team_b, &team_a, score_b, score_a, &params).unwrap();
        assert_mirrored(&original, &swapped);
    }

    #[test]
    fn exactly_one_outcome_flag_is_set(
        team_a in team("a"),
        team_b in team("b"),
        score_a in score(),
        score_b in score(),
    ) {
        let result = update_teams(&team_a, &team_b, score_a, score_b, &TrueSkillParams::default())
            .unwrap();
        let flags = [result.team_a_won, result.team_b_won, result.is_draw];
        prop_assert_eq!(flags.iter().filter(|flag| **flag).count(), 1);
        prop_assert_eq!(result.is_draw, score_a == score_b);
        prop_assert!(result.match_quality > 0.0 && result.match_quality <= 1.0);
    }

    #[test]
    fn sigma_strictly_shrinks_without_dynamics(
        team_a in team("a"),
        team_b in team("b"),
        score_a in score(),
        score_b in score(),
    ) {
        let params = TrueSkillParams { tau: 0.0, ..TrueSkillParams::default() };
        let result = update_teams(&team_a, &team_b, score_a, score_b, &params).unwrap();
        for change in result.team_a.iter().chain(result.team_b.iter()) {
            prop_assert!(change.sigma_after < change.sigma_before, "{:?}", change);
        }
    }

    #[test]
    fn sigma_never_drops_below_tau(
        team_a in team("a"),
        team_b in team("b"),
        score_a in score(),
        score_b in score(),
        tau in prop_oneof![Just(0.0), 0.01f64..50.0],
    ) {
        let params = TrueSkillParams { tau, ..TrueSkillParams::default() };
        let result = update_teams(&team_a, &team_b, score_a, score_b, &params).unwrap();
        for change in result.team_a.iter().chain(result.team_b.iter()) {
            prop_assert!(change.sigma_after >= tau, "{:?}", change);
            prop_assert!(change.mu_after.is_finite());
        }
    }

    #[test]
    fn draw_margin_vanishes_without_draw_probability(variance_sum in 1.0f64..1e7) {
        let params = TrueSkillParams { draw_probability: 0.0, ..TrueSkillParams::default() };
        prop_assert_eq!(draw_margin(MatchOutcome::Draw, variance_sum, &params), 0.0);
        let defaults = TrueSkillParams::default();
        prop_assert_eq!(draw_margin(MatchOutcome::TeamAWins, variance_sum, &defaults), 0.0);
        prop_assert!(draw_margin(MatchOutcome::Draw, variance_sum, &defaults) > 0.0);
    }

    #[test]
    fn erf_is_odd_and_bounded(x in -10.0f64..10.0) {
        prop_assert_eq!(erf(-x), -erf(x));
        prop_assert!(erf(x).abs() <= 1.0);
        prop_assert!((cdf(x) + cdf(-x) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn density_peaks_at_mean(x in -1e4f64..1e4, mean in -1e3f64..1e3, sigma in 0.1f64..1e3) {
        prop_assert!(density(x, mean, sigma) <= density(mean, mean, sigma));
    }
}
