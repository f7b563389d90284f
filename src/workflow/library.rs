use super::record::WorkflowRecord;
use crate::error::PersistenceError;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs;
use tracing::{debug, info};

/// Named workflows, kept in save order.
///
/// Serializes as a bare JSON array of records, which is the format the
/// storage collaborator reads and writes.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct WorkflowLibrary {
    workflows: Vec<WorkflowRecord>,
}

impl WorkflowLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a record. A record with the same name is overwritten in place
    /// and keeps its original creation time.
    pub fn save(&mut self, mut record: WorkflowRecord) {
        match self.workflows.iter_mut().find(|w| w.name == record.name) {
            Some(existing) => {
                record.created_at = existing.created_at;
                record.updated_at = Utc::now();
                debug!(workflow = %record.name, "workflow overwritten");
                *existing = record;
            }
            None => {
                debug!(workflow = %record.name, "workflow saved");
                self.workflows.push(record);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&WorkflowRecord> {
        self.workflows.iter().find(|w| w.name == name)
    }

    /// Looks up a record, failing with `WorkflowNotFound`.
    pub fn require(&self, name: &str) -> Result<&WorkflowRecord, PersistenceError> {
        self.get(name)
            .ok_or_else(|| PersistenceError::WorkflowNotFound(name.to_string()))
    }

    pub fn remove(&mut self, name: &str) -> Result<WorkflowRecord, PersistenceError> {
        let index = self
            .workflows
            .iter()
            .position(|w| w.name == name)
            .ok_or_else(|| PersistenceError::WorkflowNotFound(name.to_string()))?;
        Ok(self.workflows.remove(index))
    }

    pub fn names(&self) -> Vec<&str> {
        self.workflows.iter().map(|w| w.name.as_str()).collect()
    }

    pub fn workflows(&self) -> &[WorkflowRecord] {
        &self.workflows
    }

    pub fn len(&self) -> usize {
        self.workflows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workflows.is_empty()
    }

    pub fn to_json(&self) -> Result<String, PersistenceError> {
        serde_json::to_string_pretty(self).map_err(|e| PersistenceError::Json(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, PersistenceError> {
        serde_json::from_str(json).map_err(|e| PersistenceError::Json(e.to_string()))
    }

    pub fn save_to_file(&self, path: &str) -> Result<(), PersistenceError> {
        let json = self.to_json()?;
        fs::write(path, json).map_err(|e| PersistenceError::Io {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        info!(path, workflows = self.len(), "workflow library written");
        Ok(())
    }

    pub fn from_file(path: &str) -> Result<Self, PersistenceError> {
        let content = fs::read_to_string(path).map_err(|e| PersistenceError::Io {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        Self::from_json(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{GraphStore, NodeSpec};

    fn record(name: &str, nodes: usize) -> WorkflowRecord {
        let mut store = GraphStore::default();
        for i in 0..nodes {
            store.add_node(NodeSpec::prompt(format!("n{}", i), ""));
        }
        WorkflowRecord::capture(name, &store)
    }

    #[test]
    fn save_overwrites_by_name() {
        let mut library = WorkflowLibrary::new();
        let first = record("outreach", 1);
        let created = first.created_at;
        library.save(first);
        library.save(record("other", 0));
        library.save(record("outreach", 3));

        assert_eq!(library.names(), ["outreach", "other"]);
        let saved = library.get("outreach").unwrap();
        assert_eq!(saved.nodes.len(), 3);
        assert_eq!(saved.created_at, created);
        assert!(saved.updated_at >= created);
    }

    #[test]
    fn remove_missing_workflow_fails() {
        let mut library = WorkflowLibrary::new();
        assert!(matches!(
            library.remove("nope"),
            Err(PersistenceError::WorkflowNotFound(name)) if name == "nope"
        ));
    }

    #[test]
    fn library_is_a_json_array() {
        let mut library = WorkflowLibrary::new();
        library.save(record("a", 2));
        let json = library.to_json().unwrap();
        assert!(json.trim_start().starts_with('['));
        assert!(json.contains("\"executionOrder\""));
        assert!(json.contains("\"createdAt\""));

        let parsed = WorkflowLibrary::from_json(&json).unwrap();
        assert_eq!(parsed, library);
    }

    #[test]
    fn malformed_json_is_reported() {
        assert!(matches!(
            WorkflowLibrary::from_json("{not json"),
            Err(PersistenceError::Json(_))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        assert!(matches!(
            WorkflowLibrary::from_file("/nonexistent/promptflow/library.json"),
            Err(PersistenceError::Io { .. })
        ));
    }
}
