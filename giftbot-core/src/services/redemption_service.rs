use chrono::{DateTime, Utc};
use tracing::{debug, error, info, warn};

use giftbot_common::error::Error;
use giftbot_common::models::{Player, RedeemRecord, RunOutcome};
use giftbot_common::traits::repository_traits::PlayerRepo;

use crate::platforms::wos::{GiftCodeApi, RedeemOutcome};

/// Drives one full roster pass for a single gift code: strictly sequential
/// sign-in then redeem per player, quota backoff, and per-player status
/// bookkeeping. The vendor's quota is global across accounts, so the next
/// player is never contacted before the previous attempt resolves.
pub struct RedemptionService<A: GiftCodeApi, R: PlayerRepo> {
    api: A,
    repo: R,
}

impl<A: GiftCodeApi, R: PlayerRepo> RedemptionService<A, R> {
    pub fn new(api: A, repo: R) -> Self {
        Self { api, repo }
    }

    /// One invocation = one gift code, one pass over the eligible roster.
    /// Players whose last completed attempt already covers this code are
    /// filtered out up front, which also makes an interrupted pass resume
    /// where it left off on the next invocation.
    pub async fn redeem_for_all(&self, code: &str) -> Result<RunOutcome, Error> {
        let players = self.repo.list_eligible(code).await?;
        info!(
            "Starting redemption pass: code={code}, eligible players={}",
            players.len()
        );

        let mut records: Vec<RedeemRecord> = Vec::new();
        let mut quota_reset: Option<DateTime<Utc>> = None;

        for player in &players {
            // Once the quota window is exhausted the rest of the pass is
            // bookkeeping only: no further vendor calls.
            if let Some(reset_at) = quota_reset {
                let message = too_many_attempts_message(reset_at);
                self.record(player, None, &message).await;
                continue;
            }

            match self.attempt(player, code).await {
                Ok(RedeemOutcome::CodeNotFound) => {
                    warn!("Gift code {code} does not exist; aborting pass");
                    return Ok(RunOutcome::CodeInvalid {
                        code: code.to_string(),
                        message: RedeemOutcome::CodeNotFound.description(),
                    });
                }
                Ok(outcome) => {
                    let message = outcome.description();
                    info!(
                        "Player {} ({}): {message}",
                        player.player_id, player.player_name
                    );
                    self.record(player, Some(code), &message).await;
                    records.push(RedeemRecord {
                        player_id: player.player_id,
                        player_name: player.player_name.clone(),
                        message,
                        code: code.to_string(),
                    });
                }
                Err(Error::RateLimited { reset_at }) => {
                    warn!(
                        "Vendor quota exhausted at player {}; window resets at {reset_at}",
                        player.player_id
                    );
                    quota_reset = Some(reset_at);
                    let message = too_many_attempts_message(reset_at);
                    self.record(player, None, &message).await;
                }
                Err(e) => {
                    error!(
                        "Redemption attempt failed for player {}: {e}",
                        player.player_id
                    );
                    self.record(player, None, &e.to_string()).await;
                }
            }
        }

        info!(
            "Redemption pass finished: code={code}, {} players redeemed",
            records.len()
        );
        Ok(RunOutcome::Completed(records))
    }

    /// Store failures must not kill the pass; the write is retried
    /// implicitly on the next run because the player stays eligible.
    async fn record(&self, player: &Player, code: Option<&str>, message: &str) {
        if let Err(e) = self
            .repo
            .record_attempt(player.player_id, code, message)
            .await
        {
            error!(
                "Failed to persist status for player {}: {e}",
                player.player_id
            );
        }
    }

    async fn attempt(&self, player: &Player, code: &str) -> Result<RedeemOutcome, Error> {
        let profile = self.api.sign_in(player.player_id).await?;
        debug!(
            "Signed in player {} ({}); quota remaining: {}",
            profile.fid, profile.nickname, profile.ratelimit_remaining
        );

        let resp = self.api.redeem_code(player.player_id, code).await?;
        Ok(RedeemOutcome::from_response(&resp))
    }
}

/// Status recorded for the player that hit the quota wall and for everyone
/// after them in the pass. The seconds are recomputed against the captured
/// reset instant, so they shrink as wall time advances through the rest of
/// the pass; the players stay eligible for the next run.
pub fn too_many_attempts_message(reset_at: DateTime<Utc>) -> String {
    let seconds = (reset_at - Utc::now()).num_seconds().max(0);
    format!("Too many attempts: Retry in {seconds} seconds({reset_at})")
}
