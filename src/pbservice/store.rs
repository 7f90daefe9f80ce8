use crate::common::{combine_hash, ClientId, Token};
use crate::grpc::{ProtoFilterEntry, ProtoSnapshot};
use crate::pbservice::api::PutInput;
use std::collections::HashMap;

/// Last accepted write of one client, and what it replied.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct FilterEntry {
    pub(crate) token: Token,
    pub(crate) previous_value: String,
}

/// Snapshot is a full copy of a replica's state, used to bootstrap a backup.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct Snapshot {
    pub(crate) store: HashMap<String, String>,
    pub(crate) filter: HashMap<ClientId, FilterEntry>,
}

/// A write that passed duplicate detection, and can be committed once replicated.
#[derive(Debug)]
pub(crate) struct PendingWrite {
    client_id: ClientId,
    token: Token,
    key: String,
    new_value: String,
    pub(crate) previous_value: String,
}

#[derive(Debug)]
pub(crate) enum PreparedPut {
    // Retry of an already applied write. Carries the original reply.
    Duplicate { previous_value: String },
    Fresh(PendingWrite),
}

/// ReplicatedState is the key-value store plus the duplicate filter guarding it. Both are always
/// mutated together.
#[derive(Debug, Default)]
pub(crate) struct ReplicatedState {
    store: HashMap<String, String>,
    filter: HashMap<ClientId, FilterEntry>,
}

impl ReplicatedState {
    pub(crate) fn new() -> Self {
        ReplicatedState::default()
    }

    /// Checks for a duplicate and computes the value to store. Does not mutate anything.
    pub(crate) fn prepare(&self, input: &PutInput) -> PreparedPut {
        if let Some(entry) = self.filter.get(&input.client_id) {
            if entry.token == input.token {
                return PreparedPut::Duplicate {
                    previous_value: entry.previous_value.clone(),
                };
            }
        }

        let previous_value = self.store.get(&input.key).cloned().unwrap_or_default();
        let new_value = if input.combine_with_hash {
            combine_hash(&previous_value, &input.value)
        } else {
            input.value.clone()
        };

        PreparedPut::Fresh(PendingWrite {
            client_id: input.client_id,
            token: input.token,
            key: input.key.clone(),
            new_value,
            previous_value,
        })
    }

    /// Applies a prepared write, returning its previous value.
    pub(crate) fn commit(&mut self, write: PendingWrite) -> String {
        self.store.insert(write.key, write.new_value);
        self.filter.insert(
            write.client_id,
            FilterEntry {
                token: write.token,
                previous_value: write.previous_value.clone(),
            },
        );

        write.previous_value
    }

    pub(crate) fn get(&self, key: &str) -> Option<&String> {
        self.store.get(key)
    }

    pub(crate) fn snapshot(&self) -> Snapshot {
        Snapshot {
            store: self.store.clone(),
            filter: self.filter.clone(),
        }
    }

    /// Replaces everything held here with the snapshot. Leftovers from an earlier view, e.g. a
    /// forwarded write the primary never committed, must not survive a bootstrap.
    pub(crate) fn install(&mut self, snapshot: Snapshot) {
        self.store = snapshot.store;
        self.filter = snapshot.filter;
    }

    pub(crate) fn len(&self) -> usize {
        self.store.len()
    }
}

// ------- Conversions --------

impl From<Snapshot> for ProtoSnapshot {
    fn from(snapshot: Snapshot) -> Self {
        ProtoSnapshot {
            store: snapshot.store,
            filter: snapshot
                .filter
                .into_iter()
                .map(|(client_id, entry)| ProtoFilterEntry {
                    client_id: client_id.as_u64(),
                    token: entry.token.as_u64(),
                    previous_value: entry.previous_value,
                })
                .collect(),
        }
    }
}

impl From<ProtoSnapshot> for Snapshot {
    fn from(proto_snapshot: ProtoSnapshot) -> Self {
        Snapshot {
            store: proto_snapshot.store,
            filter: proto_snapshot
                .filter
                .into_iter()
                .map(|proto_entry| {
                    (
                        ClientId::new(proto_entry.client_id),
                        FilterEntry {
                            token: Token::new(proto_entry.token),
                            previous_value: proto_entry.previous_value,
                        },
                    )
                })
                .collect(),
        }
    }
}
