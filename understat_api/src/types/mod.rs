pub mod lenient;

mod match_summary;
pub use self::match_summary::{Forecast, MatchSummary, SideGoals, SideXg, TeamRef};

mod shot;
pub use self::shot::{ShotRecord, ShotResult, ShotType, Side, Situation};

/// Understat's numeric match identifier.
pub type MatchId = i64;
