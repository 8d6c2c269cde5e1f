//! Shared builders for integration tests

#![allow(dead_code)]

use team_trueskill::types::{Participant, RatingUpdateResult, TeamSide};

/// A team of `size` players with identical beliefs and ids `prefix-N`
pub fn uniform_team(prefix: &str, size: usize, mu: f64, sigma: f64) -> Vec<Participant> {
    (0..size)
        .map(|i| Participant::new(format!("{}-{}", prefix, i), mu, sigma))
        .collect()
}

/// A single-player team
pub fn solo(id: &str, mu: f64, sigma: f64) -> Vec<Participant> {
    vec![Participant::new(id, mu, sigma)]
}

/// Assert two floats agree to a relative tolerance
pub fn assert_close(left: f64, right: f64, context: &str) {
    let scale = left.abs().max(right.abs()).max(1.0);
    assert!(
        (left - right).abs() <= 1e-9 * scale,
        "{}: {} != {}",
        context,
        left,
        right
    );
}

/// Assert `swapped` is `original` rated with the teams exchanged
pub fn assert_mirrored(original: &RatingUpdateResult, swapped: &RatingUpdateResult) {
    assert_eq!(original.team_a_won, swapped.team_b_won);
    assert_eq!(original.team_b_won, swapped.team_a_won);
    assert_eq!(original.is_draw, swapped.is_draw);
    assert_close(original.match_quality, swapped.match_quality, "match quality");

    for (side, mirrored_side) in [(TeamSide::A, TeamSide::B), (TeamSide::B, TeamSide::A)] {
        let changes = original.changes(side);
        let mirrored = swapped.changes(mirrored_side);
        assert_eq!(changes.len(), mirrored.len());

        for (change, mirror) in changes.iter().zip(mirrored) {
            assert_eq!(change.id, mirror.id);
            assert_close(change.mu_after, mirror.mu_after, &change.id);
            assert_close(change.sigma_after, mirror.sigma_after, &change.id);
        }
    }
}
