use serde::{Deserialize, Serialize};

/// Monthly revenue figure. Reference data, read as stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Revenue {
    pub month: String,
    pub revenue: i64,
}
