use serde::{Deserialize, Serialize};

/// Per-player result record collected during one redemption pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedeemRecord {
    pub player_id: i64,
    pub player_name: String,
    pub message: String,
    pub code: String,
}

/// Terminal result of one redemption pass. Serializes to either the ordered
/// record list, or a single `{code, message}` object when the pass aborted
/// because the code does not exist for anyone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RunOutcome {
    CodeInvalid { code: String, message: String },
    Completed(Vec<RedeemRecord>),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn completed_run_serializes_as_record_list() {
        let outcome = RunOutcome::Completed(vec![RedeemRecord {
            player_id: 1,
            player_name: "frost".to_string(),
            message: "Gift code send.".to_string(),
            code: "ABC123".to_string(),
        }]);

        let value = serde_json::to_value(&outcome).unwrap();
        assert_eq!(
            value,
            json!([{
                "playerId": 1,
                "playerName": "frost",
                "message": "Gift code send.",
                "code": "ABC123",
            }])
        );
    }

    #[test]
    fn aborted_run_serializes_as_single_object() {
        let outcome = RunOutcome::CodeInvalid {
            code: "ABC123".to_string(),
            message: "Gift code does not exist.".to_string(),
        };

        let value = serde_json::to_value(&outcome).unwrap();
        assert_eq!(
            value,
            json!({
                "code": "ABC123",
                "message": "Gift code does not exist.",
            })
        );
    }
}
