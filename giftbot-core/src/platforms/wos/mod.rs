// File: src/platforms/wos/mod.rs

use async_trait::async_trait;

use giftbot_common::error::Error;
use giftbot_common::models::PlayerProfile;

pub mod client;
pub mod outcome;
pub mod sign;

pub use client::{GiftCodeResponse, WosClient, WosConfig};
pub use outcome::RedeemOutcome;

/// The two vendor operations of the redemption protocol. Sign-in must
/// complete before redeem for the same player: the vendor ties quota and
/// session context to successive calls per account.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GiftCodeApi: Send + Sync {
    async fn sign_in(&self, fid: i64) -> Result<PlayerProfile, Error>;
    async fn redeem_code(&self, fid: i64, cdk: &str) -> Result<GiftCodeResponse, Error>;
}
