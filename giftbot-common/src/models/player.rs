use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered roster account. `player_id` is the vendor-assigned fid and
/// never changes; `last_code`/`last_message` describe the most recent
/// redemption attempt and are written only by the redemption pass.
#[derive(Debug, Serialize, Deserialize, Clone, sqlx::FromRow)]
pub struct Player {
    pub player_id: i64,
    pub player_name: String,
    pub state_id: i64,
    pub furnace_level: i64,
    /// Gift code of the most recent *completed* attempt. NULL keeps the
    /// player eligible for every code.
    pub last_code: Option<String>,
    pub last_message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Profile returned by the vendor's player-lookup (sign-in) call.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerProfile {
    pub fid: i64,
    pub nickname: String,
    pub state_id: i64,
    pub furnace_level: i64,
    pub avatar_image: Option<String>,
    /// Requests left in the vendor's current quota window, from the
    /// `x-ratelimit-remaining` response header.
    pub ratelimit_remaining: i64,
}
