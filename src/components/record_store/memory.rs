use super::{RecordFields, RecordId, RecordStore, TermId, EXTERNAL_ID_KEY};
use crate::error::{store_error, ImportResult};
use async_trait::async_trait;
use std::collections::{BTreeSet, HashMap};
use std::sync::Mutex;

/// In-memory record store used as a test double and for dry runs
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    next_record_id: RecordId,
    next_term_id: TermId,
    records: HashMap<RecordId, HashMap<String, String>>,
    by_external_id: HashMap<String, RecordId>,
    terms: HashMap<(String, String), TermId>,
    term_names: HashMap<TermId, String>,
    associations: HashMap<RecordId, BTreeSet<TermId>>,
    mutations: usize,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records currently stored
    pub fn record_count(&self) -> usize {
        self.inner.lock().unwrap().records.len()
    }

    /// Total number of store mutations performed
    pub fn mutation_count(&self) -> usize {
        self.inner.lock().unwrap().mutations
    }

    /// Read one field of a record
    pub fn field(&self, id: RecordId, key: &str) -> Option<String> {
        self.inner
            .lock()
            .unwrap()
            .records
            .get(&id)
            .and_then(|fields| fields.get(key).cloned())
    }

    /// All fields of a record, for whole-record comparisons
    pub fn fields(&self, id: RecordId) -> Option<HashMap<String, String>> {
        self.inner.lock().unwrap().records.get(&id).cloned()
    }

    /// Names of the terms a record is associated with, sorted
    pub fn term_names_for(&self, id: RecordId) -> Vec<String> {
        let inner = self.inner.lock().unwrap();
        let mut names: Vec<String> = inner
            .associations
            .get(&id)
            .map(|terms| {
                terms
                    .iter()
                    .filter_map(|t| inner.term_names.get(t).cloned())
                    .collect()
            })
            .unwrap_or_default();
        names.sort();
        names
    }

    /// Number of distinct terms across all taxonomies
    pub fn term_count(&self) -> usize {
        self.inner.lock().unwrap().terms.len()
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn find_by_external_id(&self, external_id: &str) -> ImportResult<Option<RecordId>> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .by_external_id
            .get(external_id)
            .copied())
    }

    async fn create_record(&self, fields: &RecordFields) -> ImportResult<RecordId> {
        let mut inner = self.inner.lock().unwrap();
        inner.next_record_id += 1;
        let id = inner.next_record_id;
        let map = canonical_map(fields);
        inner.records.insert(id, map);
        inner.mutations += 1;
        Ok(id)
    }

    async fn update_record(&self, id: RecordId, fields: &RecordFields) -> ImportResult<()> {
        let mut inner = self.inner.lock().unwrap();
        let record = inner
            .records
            .get_mut(&id)
            .ok_or_else(|| store_error(&format!("No record with id {}", id)))?;
        for (key, value) in canonical_map(fields) {
            record.insert(key, value);
        }
        inner.mutations += 1;
        Ok(())
    }

    async fn set_field(&self, id: RecordId, key: &str, value: &str) -> ImportResult<()> {
        let mut inner = self.inner.lock().unwrap();
        let record = inner
            .records
            .get_mut(&id)
            .ok_or_else(|| store_error(&format!("No record with id {}", id)))?;
        record.insert(key.to_string(), value.to_string());

        // The external identifier doubles as the lookup index
        if key == EXTERNAL_ID_KEY {
            inner.by_external_id.insert(value.to_string(), id);
        }
        inner.mutations += 1;
        Ok(())
    }

    async fn resolve_or_create_term(
        &self,
        name: &str,
        taxonomy: &str,
    ) -> ImportResult<(TermId, bool)> {
        let mut inner = self.inner.lock().unwrap();
        let key = (taxonomy.to_string(), name.to_string());
        if let Some(id) = inner.terms.get(&key) {
            return Ok((*id, false));
        }
        inner.next_term_id += 1;
        let id = inner.next_term_id;
        inner.terms.insert(key, id);
        inner.term_names.insert(id, name.to_string());
        inner.mutations += 1;
        Ok((id, true))
    }

    async fn associate_term(&self, id: RecordId, term: TermId, _taxonomy: &str) -> ImportResult<()> {
        let mut inner = self.inner.lock().unwrap();
        if !inner.records.contains_key(&id) {
            return Err(store_error(&format!("No record with id {}", id)));
        }
        inner.associations.entry(id).or_default().insert(term);
        inner.mutations += 1;
        Ok(())
    }
}

fn canonical_map(fields: &RecordFields) -> HashMap<String, String> {
    HashMap::from([
        ("title".to_string(), fields.title.clone()),
        ("content".to_string(), fields.content.clone()),
        ("record_type".to_string(), fields.record_type.clone()),
        ("status".to_string(), fields.status.clone()),
        ("comment_status".to_string(), fields.comment_status.clone()),
        ("ping_status".to_string(), fields.ping_status.clone()),
        ("author".to_string(), fields.author.to_string()),
    ])
}
