use chrono::Utc;
use tracing::info;

use giftbot_common::error::Error;
use giftbot_common::models::Player;
use giftbot_common::traits::repository_traits::PlayerRepo;

use crate::platforms::wos::GiftCodeApi;

/// Registration and removal of roster accounts. A fid is only accepted
/// when the vendor's profile places it in the configured home state.
pub struct RosterService<A: GiftCodeApi, R: PlayerRepo> {
    api: A,
    repo: R,
    home_state: i64,
}

impl<A: GiftCodeApi, R: PlayerRepo> RosterService<A, R> {
    pub fn new(api: A, repo: R, home_state: i64) -> Self {
        Self {
            api,
            repo,
            home_state,
        }
    }

    pub async fn register(&self, fid: i64) -> Result<Player, Error> {
        if self.repo.get(fid).await?.is_some() {
            return Err(Error::AlreadyExists(format!("player {fid}")));
        }

        let profile = self.api.sign_in(fid).await?;
        if profile.state_id != self.home_state {
            return Err(Error::Ineligible(format!(
                "player {fid} belongs to state {}, not {}",
                profile.state_id, self.home_state
            )));
        }

        let now = Utc::now();
        let player = Player {
            player_id: fid,
            player_name: profile.nickname,
            state_id: profile.state_id,
            furnace_level: profile.furnace_level,
            last_code: None,
            last_message: None,
            created_at: now,
            updated_at: now,
        };
        self.repo.create(&player).await?;
        info!(
            "Registered player {fid} ({}) at furnace level {}",
            player.player_name, player.furnace_level
        );
        Ok(player)
    }

    pub async fn remove(&self, fid: i64) -> Result<(), Error> {
        if self.repo.get(fid).await?.is_none() {
            return Err(Error::NotFound(format!("No player with id {fid}")));
        }
        self.repo.delete(fid).await?;
        info!("Removed player {fid} from the roster");
        Ok(())
    }

    pub async fn list(&self) -> Result<Vec<Player>, Error> {
        self.repo.list_all().await
    }
}
