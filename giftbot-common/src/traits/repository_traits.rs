use async_trait::async_trait;

use crate::error::Error;
use crate::models::player::Player;

/// Storage operations the redemption workflow needs from the roster.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlayerRepo: Send + Sync {
    async fn create(&self, player: &Player) -> Result<(), Error>;
    async fn get(&self, player_id: i64) -> Result<Option<Player>, Error>;
    async fn delete(&self, player_id: i64) -> Result<(), Error>;
    async fn list_all(&self) -> Result<Vec<Player>, Error>;

    /// Players still owed an attempt for `code`: rows whose last completed
    /// attempt was for a different code, or for none at all.
    async fn list_eligible(&self, code: &str) -> Result<Vec<Player>, Error>;

    /// Record the outcome of a player's most recent attempt. `code` is set
    /// only when the attempt completed (success or a vendor rejection);
    /// rate-limited and failed attempts pass None so the player stays
    /// eligible on the next pass.
    async fn record_attempt<'a>(
        &self,
        player_id: i64,
        code: Option<&'a str>,
        message: &'a str,
    ) -> Result<(), Error>;
}
