use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl std::borrow::Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id!(
    /// Unique identifier of a node on the canvas.
    NodeId
);

string_id!(
    /// Unique identifier of a connection between two nodes.
    ConnectionId
);

/// Hands out `node-<millis>-<seq>` and `conn-<millis>-<seq>` identifiers.
///
/// The timestamp keeps ids readable and roughly sortable across sessions,
/// the sequence keeps them unique within one process.
#[derive(Debug, Default)]
pub struct IdGenerator {
    seq: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_node_id(&mut self) -> NodeId {
        NodeId(self.next_with_prefix("node"))
    }

    pub fn next_connection_id(&mut self) -> ConnectionId {
        ConnectionId(self.next_with_prefix("conn"))
    }

    fn next_with_prefix(&mut self, prefix: &str) -> String {
        self.seq += 1;
        let millis = chrono::Utc::now().timestamp_millis();
        format!("{}-{}-{}", prefix, millis, self.seq)
    }
}
