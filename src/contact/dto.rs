use serde::{Deserialize, Serialize};

use crate::contact::repo::{ContactMessage, ContactStatus};

#[derive(Debug, Deserialize)]
pub struct CreateContactRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

/// Partial update; absent fields keep their stored values.
#[derive(Debug, Deserialize)]
pub struct UpdateContactRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
    pub status: Option<ContactStatus>,
}

/// List response carries a count next to the envelope fields.
#[derive(Debug, Serialize)]
pub struct ContactListResponse {
    pub success: bool,
    pub count: usize,
    pub data: Vec<ContactMessage>,
}
