use std::fmt::Debug;

use crate::error::Error;
use crate::typedid::{TypedId, TypedIdMarker};

/// A flat entity that lives in a [`RecordStore`].
pub trait Record: TypedIdMarker + Clone + Debug + Sized {
    /// Human readable name of the record kind, used in errors.
    const KIND: &'static str;

    fn id(&self) -> TypedId<Self>;
}

/// A record that can absorb a partial update.
pub trait Patchable: Record {
    type Patch;

    /// Produces the updated record; the id must be carried over unchanged.
    fn merge(&self, patch: Self::Patch) -> Self;
}

/// An ordered, in-memory collection of records with unique ids.
#[derive(Clone, Debug)]
pub struct RecordStore<R: Record> {
    records: Vec<R>,
}

impl<R: Record> RecordStore<R> {
    pub fn new() -> RecordStore<R> {
        RecordStore { records: vec![] }
    }

    /// Builds a store from an initial collection, rejecting repeated ids.
    pub fn with_records(records: Vec<R>) -> Result<RecordStore<R>, Error> {
        let mut store = RecordStore::new();
        for record in records {
            store.append(record)?;
        }

        Ok(store)
    }

    pub fn get_all(&self) -> &[R] {
        &self.records
    }

    pub fn get(&self, id: TypedId<R>) -> Option<&R> {
        self.records.iter().find(|record| record.id() == id)
    }

    pub fn expect(&self, id: TypedId<R>) -> Result<&R, Error> {
        self.get(id).ok_or_else(|| Error::RecordNotFound {
            kind: R::KIND,
            id: id.to_string(),
        })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn next_id(&self) -> TypedId<R> {
        self.records
            .iter()
            .map(|record| record.id())
            .max()
            .map(|id| id.next())
            .unwrap_or_else(|| TypedId::new(1))
    }

    pub fn append(&mut self, record: R) -> Result<(), Error> {
        let id = record.id();
        if self.get(id).is_some() {
            return Err(Error::DuplicateRecordId {
                kind: R::KIND,
                id: id.to_string(),
            });
        }

        self.records.push(record);

        Ok(())
    }
}

impl<R: Patchable> RecordStore<R> {
    pub fn update(&mut self, id: TypedId<R>, patch: R::Patch) -> Result<R, Error> {
        let slot = self
            .records
            .iter_mut()
            .find(|record| record.id() == id)
            .ok_or_else(|| Error::RecordNotFound {
                kind: R::KIND,
                id: id.to_string(),
            })?;

        let updated = slot.merge(patch);
        *slot = updated.clone();

        Ok(updated)
    }
}

impl<R: Record> Default for RecordStore<R> {
    fn default() -> RecordStore<R> {
        RecordStore::new()
    }
}
