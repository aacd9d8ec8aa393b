//! Municipality record used by the city autocomplete.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A municipality from the public geographic lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct City {
    /// Official municipality code.
    pub id: i64,
    pub name: String,
}
