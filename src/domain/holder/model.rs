use chrono::{DateTime, Utc};

/// Account that places reservations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Holder {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}
