use serde::{Deserialize, Serialize};

/// The fixed `{"success":true}` body the auth endpoints return. The original frontend matches on
/// this exact shape, so it carries no message field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonResponse {
    pub success: bool,
}

impl JsonResponse {
    pub fn success() -> Self {
        Self { success: true }
    }
}
