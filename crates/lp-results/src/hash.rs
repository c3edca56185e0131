//! Content-based hashing for run IDs.

use sha2::{Digest, Sha256};

use crate::types::StudyDescriptor;

pub fn compute_run_id(descriptor: &StudyDescriptor, solver_version: &str) -> String {
    let mut hasher = Sha256::new();

    let descriptor_json = serde_json::to_string(descriptor).unwrap_or_default();
    hasher.update(descriptor_json.as_bytes());
    hasher.update(solver_version.as_bytes());

    let result = hasher.finalize();
    format!("{result:x}")
}
