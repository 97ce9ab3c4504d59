//! Task DTOs

use serde::{Deserialize, Serialize};

/// Body of `POST /tasks`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTask {
    pub input_data: String,
}
