use serde::{Deserialize, Serialize};

// Identity snapshot issued by the studio API on login. Replaced wholesale on
// every login, never edited in place.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInformation {
    pub token: String,
    #[serde(rename = "type")]
    pub token_type: String,
    pub id: u64,
    // The account email.
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub admin: bool,
}
