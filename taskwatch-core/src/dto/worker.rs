//! Worker DTOs

use serde::{Deserialize, Serialize};

/// Body returned by `GET /workers/count`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerCountResponse {
    pub count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_count_rejected() {
        assert!(serde_json::from_str::<WorkerCountResponse>(r#"{"count": -1}"#).is_err());
    }

    #[test]
    fn test_count_parsed() {
        let body: WorkerCountResponse = serde_json::from_str(r#"{"count": 3}"#).unwrap();
        assert_eq!(body.count, 3);
    }
}
