// In-memory AssociationStore for tests.
//
// Applies the two phases separately (no transaction), counts writes, and can
// be told to fail the next remove or add phase.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::sync::Mutex;
use uuid::Uuid;

use super::errors::ApplyError;
use super::store::AssociationStore;
use super::sync::AssociationDiff;
use crate::domains::content::ContentRef;
use crate::domains::taxonomy::TaxonomyKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailPhase {
    Remove,
    Add,
}

#[derive(Default)]
struct State {
    content: HashSet<ContentRef>,
    nodes: HashMap<TaxonomyKind, BTreeSet<Uuid>>,
    // row -> insertion serial, so tests can tell a kept row from a re-inserted one
    rows: HashMap<(ContentRef, TaxonomyKind), BTreeMap<Uuid, u64>>,
    next_serial: u64,
    writes: usize,
    fail_next: Option<FailPhase>,
}

#[derive(Default)]
pub struct MemoryAssociationStore {
    state: Mutex<State>,
}

impl MemoryAssociationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_content(self, content: ContentRef) -> Self {
        self.add_content(content);
        self
    }

    pub fn with_nodes(self, kind: TaxonomyKind, ids: &[Uuid]) -> Self {
        self.state
            .lock()
            .unwrap()
            .nodes
            .entry(kind)
            .or_default()
            .extend(ids.iter().copied());
        self
    }

    pub fn add_content(&self, content: ContentRef) {
        self.state.lock().unwrap().content.insert(content);
    }

    /// Stored node ids for `(content, kind)`.
    pub fn rows(&self, content: ContentRef, kind: TaxonomyKind) -> BTreeSet<Uuid> {
        self.state
            .lock()
            .unwrap()
            .rows
            .get(&(content, kind))
            .map(|rows| rows.keys().copied().collect())
            .unwrap_or_default()
    }

    pub fn insert_serial(&self, content: ContentRef, kind: TaxonomyKind, id: Uuid) -> Option<u64> {
        self.state
            .lock()
            .unwrap()
            .rows
            .get(&(content, kind))
            .and_then(|rows| rows.get(&id).copied())
    }

    /// Number of write phases executed so far.
    pub fn writes(&self) -> usize {
        self.state.lock().unwrap().writes
    }

    pub fn fail_next(&self, phase: FailPhase) {
        self.state.lock().unwrap().fail_next = Some(phase);
    }
}

#[async_trait]
impl AssociationStore for MemoryAssociationStore {
    async fn content_exists(&self, content: ContentRef) -> Result<bool> {
        Ok(self.state.lock().unwrap().content.contains(&content))
    }

    async fn existing_nodes(&self, kind: TaxonomyKind, ids: &BTreeSet<Uuid>) -> Result<BTreeSet<Uuid>> {
        let state = self.state.lock().unwrap();
        let known = state.nodes.get(&kind);
        Ok(ids
            .iter()
            .filter(|id| known.is_some_and(|k| k.contains(*id)))
            .copied()
            .collect())
    }

    async fn associated(&self, content: ContentRef, kind: TaxonomyKind) -> Result<BTreeSet<Uuid>> {
        Ok(self.rows(content, kind))
    }

    async fn clear(&self, content: ContentRef) -> Result<u64> {
        let mut state = self.state.lock().unwrap();
        let mut cleared = 0;
        state.rows.retain(|(owner, _), rows| {
            if *owner == content {
                cleared += rows.len() as u64;
                false
            } else {
                true
            }
        });
        state.writes += 1;
        Ok(cleared)
    }

    async fn apply(
        &self,
        content: ContentRef,
        kind: TaxonomyKind,
        diff: &AssociationDiff,
    ) -> std::result::Result<(), ApplyError> {
        let mut state = self.state.lock().unwrap();
        let fail = state.fail_next.take();

        if !diff.to_remove.is_empty() {
            if fail == Some(FailPhase::Remove) {
                return Err(ApplyError::Remove(anyhow!("injected remove failure")));
            }
            let rows = state.rows.entry((content, kind)).or_default();
            for id in &diff.to_remove {
                rows.remove(id);
            }
            state.writes += 1;
        }

        if !diff.to_add.is_empty() {
            if fail == Some(FailPhase::Add) {
                return Err(ApplyError::Add {
                    missing: diff.to_add.clone(),
                    source: anyhow!("injected add failure"),
                });
            }
            for id in &diff.to_add {
                state.next_serial += 1;
                let serial = state.next_serial;
                state.rows.entry((content, kind)).or_default().insert(*id, serial);
            }
            state.writes += 1;
        }

        Ok(())
    }
}
