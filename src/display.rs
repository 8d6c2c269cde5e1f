//! Caller-side display helpers
//!
//! None of this feeds back into rating. It covers the integer view kept for
//! the legacy single-number display and flags players whose displayed rating
//! moved against their match result, which happens when a shrinking sigma
//! outweighs a falling mu.

use crate::types::{
    PlayerId, PlayerRatingChange, RatingSnapshot, RatingUpdateResult, TeamSide, TeamStanding,
};
use serde::{Deserialize, Serialize};

/// Single number shown for a stored rating of either shape
pub fn displayed_rating(snapshot: &RatingSnapshot) -> i64 {
    match *snapshot {
        RatingSnapshot::Skill { mu, sigma } => {
            crate::rating::conservative_rating(mu, sigma).round() as i64
        }
        RatingSnapshot::Legacy { elo } => elo.round() as i64,
    }
}

/// True when the conservative rating moved opposite to the match result
pub fn moved_against_result(change: &PlayerRatingChange, standing: TeamStanding) -> bool {
    let delta = change.conservative_change();
    match standing {
        TeamStanding::Won => delta < 0.0,
        TeamStanding::Lost => delta > 0.0,
        TeamStanding::Drew => false,
    }
}

/// Rounded change in the legacy view.
///
/// Winners always show a gain and losers a loss of the same rounded size;
/// draws keep the raw sign.
pub fn legacy_rating_change(change: &PlayerRatingChange, standing: TeamStanding) -> i64 {
    let raw = change.conservative_change().round() as i64;
    match standing {
        TeamStanding::Won => raw.abs(),
        TeamStanding::Lost => -raw.abs(),
        TeamStanding::Drew => raw,
    }
}

/// Display row for one player after a rated match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerDisplay {
    pub id: PlayerId,
    pub side: TeamSide,
    pub standing: TeamStanding,
    pub rating_before: i64,
    pub rating_after: i64,
    pub legacy_change: i64,
    pub against_result: bool,
}

/// Display rows for every player, team A first
pub fn summarize(result: &RatingUpdateResult) -> Vec<PlayerDisplay> {
    [TeamSide::A, TeamSide::B]
        .into_iter()
        .flat_map(|side| {
            let standing = result.standing(side);
            result.changes(side).iter().map(move |change| PlayerDisplay {
                id: change.id.clone(),
                side,
                standing,
                rating_before: change.conservative_before.round() as i64,
                rating_after: change.conservative_after.round() as i64,
                legacy_change: legacy_rating_change(change, standing),
                against_result: moved_against_result(change, standing),
            })
        })
        .collect()
}
