// File: src/platforms/wos/outcome.rs

use super::client::GiftCodeResponse;

/// Semantic classification of the vendor's redemption response codes.
#[derive(Debug, Clone, PartialEq)]
pub enum RedeemOutcome {
    /// err_code 40010: redemption accepted.
    Success,
    /// err_code 40007: the gift code is no longer valid.
    Expired,
    /// err_code 40014: the gift code does not exist. Fatal for the whole
    /// pass, since nobody can redeem it.
    CodeNotFound,
    /// err_code 40008: this account already used this code.
    AlreadyRedeemed,
    /// Any other code, passed through unmodified.
    Unknown { code: i64, msg: String },
}

impl RedeemOutcome {
    pub fn from_response(resp: &GiftCodeResponse) -> Self {
        match resp.err_code {
            40010 => RedeemOutcome::Success,
            40007 => RedeemOutcome::Expired,
            40014 => RedeemOutcome::CodeNotFound,
            40008 => RedeemOutcome::AlreadyRedeemed,
            _ => RedeemOutcome::Unknown {
                code: resp.err_code,
                msg: resp.msg.clone(),
            },
        }
    }

    /// Human-readable text recorded as the player's status and surfaced in
    /// the run report.
    pub fn description(&self) -> String {
        match self {
            RedeemOutcome::Success => "Gift code send.".to_string(),
            RedeemOutcome::Expired => "Gift code expired.".to_string(),
            RedeemOutcome::CodeNotFound => "Gift code does not exist.".to_string(),
            RedeemOutcome::AlreadyRedeemed => "Gift code already used.".to_string(),
            RedeemOutcome::Unknown { code, msg } => format!("{msg} (err_code {code})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(err_code: i64, msg: &str) -> GiftCodeResponse {
        GiftCodeResponse {
            code: if err_code == 40010 { 0 } else { 1 },
            msg: msg.to_string(),
            err_code,
        }
    }

    #[test]
    fn classifies_the_vendor_code_table() {
        assert_eq!(
            RedeemOutcome::from_response(&response(40010, "SUCCESS")),
            RedeemOutcome::Success
        );
        assert_eq!(
            RedeemOutcome::from_response(&response(40007, "TIME ERROR.")),
            RedeemOutcome::Expired
        );
        assert_eq!(
            RedeemOutcome::from_response(&response(40014, "CDK NOT FOUND.")),
            RedeemOutcome::CodeNotFound
        );
        assert_eq!(
            RedeemOutcome::from_response(&response(40008, "RECEIVED.")),
            RedeemOutcome::AlreadyRedeemed
        );
    }

    #[test]
    fn unclassified_codes_pass_through_unmodified() {
        let outcome = RedeemOutcome::from_response(&response(40004, "PARAMS ERROR."));
        assert_eq!(
            outcome,
            RedeemOutcome::Unknown {
                code: 40004,
                msg: "PARAMS ERROR.".to_string(),
            }
        );
        assert_eq!(outcome.description(), "PARAMS ERROR. (err_code 40004)");
    }

    #[test]
    fn descriptions_match_the_reported_messages() {
        assert_eq!(RedeemOutcome::Success.description(), "Gift code send.");
        assert_eq!(RedeemOutcome::Expired.description(), "Gift code expired.");
        assert_eq!(
            RedeemOutcome::CodeNotFound.description(),
            "Gift code does not exist."
        );
        assert_eq!(
            RedeemOutcome::AlreadyRedeemed.description(),
            "Gift code already used."
        );
    }
}
