pub mod match_utils;
pub mod ties;

pub use match_utils::{
    are_all_matches_finished, find_next_group, format_kickoff, is_knockout_group, sort_all_goals,
    sort_goals,
};
pub use ties::{
    AggregateScore, KnockoutTie, TeamIdentity, TieSlot, TieTeam, compare_matches,
    group_knockout_matches_by_tie,
};
