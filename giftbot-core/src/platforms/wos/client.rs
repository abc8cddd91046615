// File: src/platforms/wos/client.rs

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use tracing::warn;

use giftbot_common::error::Error;
use giftbot_common::models::PlayerProfile;

use super::GiftCodeApi;
use super::sign::sign_request;

/// Immutable vendor endpoint configuration, loaded once at startup and
/// injected into the client.
#[derive(Debug, Clone)]
pub struct WosConfig {
    /// Base URL of the gift-code API, without a trailing slash.
    pub api_base: String,
    /// Shared secret appended to the signed parameter string.
    pub sign_secret: String,
}

/// Encapsulates the two signed, form-encoded vendor calls.
pub struct WosClient {
    http_client: Client,
    config: WosConfig,
}

/// Raw `{code, msg, err_code}` body of the redemption endpoint. Classified
/// into a `RedeemOutcome` by the caller; raw codes are never inspected
/// past that boundary.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GiftCodeResponse {
    pub code: i64,
    #[serde(default)]
    pub msg: String,
    #[serde(default)]
    pub err_code: i64,
}

/// JSON envelope of the player-lookup endpoint. `data` is an object on
/// success and an empty array on rejection, so it stays untyped here.
#[derive(Debug, Deserialize)]
struct SignInEnvelopeJson {
    code: i64,
    #[serde(default)]
    data: serde_json::Value,
    #[serde(default)]
    msg: String,
    #[serde(default)]
    err_code: i64,
}

#[derive(Debug, Default, Deserialize)]
struct SignInDataJson {
    #[serde(default)]
    fid: i64,
    #[serde(default)]
    nickname: String,
    #[serde(default)]
    kid: i64,
    #[serde(default)]
    stove_lv: i64,
    #[serde(default)]
    avatar_image: Option<String>,
}

impl WosClient {
    pub fn new(config: WosConfig) -> Result<Self, Error> {
        let http_client = Client::builder()
            .user_agent("giftbot/0.1")
            .build()
            .map_err(|e| Error::Vendor(format!("Failed to build reqwest client: {e}")))?;

        Ok(Self {
            http_client,
            config,
        })
    }

    /// Signed form-encoded POST shared by both operations. HTTP 429 becomes
    /// `Error::RateLimited` carrying the vendor-reported reset instant;
    /// every other non-2xx status is a transport failure.
    async fn post_form(
        &self,
        endpoint: &str,
        form: &[(&str, String)],
    ) -> Result<Response, Error> {
        let url = format!("{}/{endpoint}", self.config.api_base);
        let resp = self.http_client
            .post(&url)
            .form(form)
            .send()
            .await
            .map_err(|e| Error::Vendor(format!("POST {url}: request failed => {e}")))?;

        if resp.status() == StatusCode::TOO_MANY_REQUESTS {
            let reset_at = quota_reset_instant(&resp);
            warn!("Vendor quota exhausted on /{endpoint}; window resets at {reset_at}");
            return Err(Error::RateLimited { reset_at });
        }
        if !resp.status().is_success() {
            let st = resp.status();
            let txt = resp.text().await.unwrap_or_default();
            return Err(Error::Vendor(format!("POST {url} => HTTP {st}, {txt}")));
        }

        Ok(resp)
    }
}

#[async_trait]
impl GiftCodeApi for WosClient {
    async fn sign_in(&self, fid: i64) -> Result<PlayerProfile, Error> {
        let fid = fid.to_string();
        let time = Utc::now().timestamp_millis().to_string();
        let sign = sign_request(&[("fid", &fid), ("time", &time)], &self.config.sign_secret);

        let form = [("sign", sign), ("fid", fid.clone()), ("time", time)];
        let resp = self.post_form("player", &form).await?;
        let remaining = header_i64(&resp, "x-ratelimit-remaining");

        let envelope: SignInEnvelopeJson = resp.json().await
            .map_err(|e| Error::Vendor(format!("Parsing sign-in response => {e}")))?;
        if envelope.code != 0 {
            return Err(Error::Vendor(format!(
                "Sign-in rejected for fid {fid}: {} (err_code {})",
                envelope.msg, envelope.err_code
            )));
        }

        let data: SignInDataJson = serde_json::from_value(envelope.data)
            .map_err(|e| Error::Vendor(format!("Parsing sign-in profile => {e}")))?;

        Ok(PlayerProfile {
            fid: data.fid,
            nickname: data.nickname,
            state_id: data.kid,
            furnace_level: data.stove_lv,
            avatar_image: data.avatar_image,
            ratelimit_remaining: remaining,
        })
    }

    async fn redeem_code(&self, fid: i64, cdk: &str) -> Result<GiftCodeResponse, Error> {
        let fid = fid.to_string();
        let time = Utc::now().timestamp_millis().to_string();
        let sign = sign_request(
            &[("cdk", cdk), ("fid", &fid), ("time", &time)],
            &self.config.sign_secret,
        );

        let form = [
            ("sign", sign),
            ("fid", fid),
            ("time", time),
            ("cdk", cdk.to_string()),
        ];
        let resp = self.post_form("gift_code", &form).await?;

        resp.json::<GiftCodeResponse>().await
            .map_err(|e| Error::Vendor(format!("Parsing redeem response => {e}")))
    }
}

/// Reads the `x-ratelimit-reset` header (epoch seconds) from a 429
/// response. A missing or unparsable header falls back to one minute out,
/// the vendor's documented window length.
fn quota_reset_instant(resp: &Response) -> DateTime<Utc> {
    resp.headers()
        .get("x-ratelimit-reset")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<i64>().ok())
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .unwrap_or_else(|| Utc::now() + Duration::seconds(60))
}

fn header_i64(resp: &Response, name: &str) -> i64 {
    resp.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
        .unwrap_or(0)
}
