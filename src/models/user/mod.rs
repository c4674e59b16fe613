// User module
// Read-only directory record used for guest selection and display

use serde::Deserialize;

/// A user known to the appointment store. The calendar client only reads
/// these; account management lives elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub user_name: String,
}
