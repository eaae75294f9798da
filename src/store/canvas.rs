use super::blob::{BlobStore, blob_id};
use crate::error::StoreError;
use crate::graph::{Edge, Graph, Node};
use serde_json::Value;
use std::path::Path;
use tracing::{info, warn};
use uuid::Uuid;

pub const RIGS_TABLE: &str = "rigs";
pub const CONNECTIONS_TABLE: &str = "connections";

/// The rig and connection tables behind the canvas API.
#[derive(Debug, Clone)]
pub struct CanvasStore {
    rigs: BlobStore,
    connections: BlobStore,
}

impl CanvasStore {
    /// Opens (creating if needed) both tables in the database at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let store = Self {
            rigs: BlobStore::new(&path, RIGS_TABLE),
            connections: BlobStore::new(&path, CONNECTIONS_TABLE),
        };
        store.rigs.init()?;
        store.connections.init()?;
        info!(path = %path.as_ref().display(), "canvas store ready");
        Ok(store)
    }

    pub fn list_rigs(&self) -> Result<Vec<Value>, StoreError> {
        self.rigs.list()
    }

    /// Stores a rig blob, assigning an id when it has none.
    pub fn save_rig(&self, blob: Value) -> Result<Value, StoreError> {
        let blob = ensure_id(blob, "rig")?;
        self.rigs.put(&blob)?;
        Ok(blob)
    }

    /// Deletes a rig and every connection that references it.
    pub fn delete_rig(&self, id: &str) -> Result<bool, StoreError> {
        let removed = self.rigs.delete(id)?;
        let mut dropped = 0usize;
        for blob in self.connections.list()? {
            let references = ["source", "sourceId", "from", "target", "targetId", "to"]
                .iter()
                .any(|key| blob.get(key).and_then(Value::as_str) == Some(id));
            if references {
                if let Ok(connection_id) = blob_id(&blob) {
                    self.connections.delete(connection_id)?;
                    dropped += 1;
                }
            }
        }
        info!(rig = id, removed, dropped_connections = dropped, "deleted rig");
        Ok(removed)
    }

    pub fn list_connections(&self) -> Result<Vec<Value>, StoreError> {
        self.connections.list()
    }

    /// Stores a connection blob. The blob must name both endpoints, and the
    /// same pair may only be connected once in either direction. The duplicate
    /// check and the write share one transaction.
    pub fn save_connection(&self, blob: Value) -> Result<Value, StoreError> {
        let blob = ensure_id(blob, "connection")?;
        let edge: Edge =
            serde_json::from_value(blob.clone()).map_err(|e| StoreError::InvalidBlob {
                kind: "connection",
                message: e.to_string(),
            })?;

        self.connections.put_checked(&blob, |stored| {
            for existing in stored {
                let Ok(other) = serde_json::from_value::<Edge>(existing.clone()) else {
                    continue;
                };
                if other.id != edge.id && other.same_pair(&edge.source, &edge.target) {
                    return Err(StoreError::DuplicateConnection {
                        source_id: edge.source.clone(),
                        target_id: edge.target.clone(),
                    });
                }
            }
            Ok(())
        })?;
        Ok(blob)
    }

    pub fn delete_connection(&self, id: &str) -> Result<bool, StoreError> {
        self.connections.delete(id)
    }

    /// Builds a graph from the stored blobs. Rigs that are not code blocks and
    /// connections with unknown endpoints are skipped.
    pub fn load_graph(&self) -> Result<Graph, StoreError> {
        let mut graph = Graph::new();
        for blob in self.rigs.list()? {
            match serde_json::from_value::<Node>(blob) {
                Ok(node) => {
                    if let Err(e) = graph.add_node(node) {
                        warn!(error = %e, "skipping rig");
                    }
                }
                Err(e) => warn!(error = %e, "skipping rig that is not a code block"),
            }
        }
        for blob in self.connections.list()? {
            match serde_json::from_value::<Edge>(blob) {
                Ok(edge) => {
                    if let Err(e) = graph.connect(edge) {
                        warn!(error = %e, "skipping connection");
                    }
                }
                Err(e) => warn!(error = %e, "skipping malformed connection"),
            }
        }
        Ok(graph)
    }
}

fn ensure_id(mut blob: Value, kind: &'static str) -> Result<Value, StoreError> {
    let Some(object) = blob.as_object_mut() else {
        return Err(StoreError::InvalidBlob {
            kind,
            message: "expected a JSON object".to_string(),
        });
    };
    let missing = match object.get("id") {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    };
    if missing {
        object.insert("id".to_string(), Value::String(Uuid::new_v4().to_string()));
    }
    blob_id(&blob)?;
    Ok(blob)
}
