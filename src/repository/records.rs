//! Ordered in-memory record store

use serde::Serialize;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::FormRecord,
};

/// A stored record and its generated identifier
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entry<T> {
    pub id: Uuid,
    pub record: T,
}

/// Ordered sequence of records of one type.
///
/// Positions are the public addressing scheme; every entry also carries a
/// stable id that survives updates and earlier deletions.
#[derive(Debug, Clone)]
pub struct RecordStore<T> {
    entries: Vec<Entry<T>>,
}

impl<T> Default for RecordStore<T> {
    fn default() -> Self {
        Self { entries: Vec::new() }
    }
}

impl<T: FormRecord> RecordStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record at the tail
    pub fn add(&mut self, record: T) -> &Entry<T> {
        let index = self.entries.len();
        self.entries.push(Entry {
            id: Uuid::new_v4(),
            record,
        });
        &self.entries[index]
    }

    /// Replace the record at `position`, keeping its id
    pub fn update(&mut self, position: usize, record: T) -> AppResult<&Entry<T>> {
        let entry = self
            .entries
            .get_mut(position)
            .ok_or_else(|| not_found::<T>(position))?;
        entry.record = record;
        Ok(entry)
    }

    /// Remove the record at `position`; later records shift down by one
    pub fn delete(&mut self, position: usize) -> AppResult<Entry<T>> {
        if position >= self.entries.len() {
            return Err(not_found::<T>(position));
        }
        Ok(self.entries.remove(position))
    }

    pub fn get(&self, position: usize) -> AppResult<&Entry<T>> {
        self.entries
            .get(position)
            .ok_or_else(|| not_found::<T>(position))
    }

    /// Current position of the record with `id`
    pub fn position_of(&self, id: Uuid) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    pub fn list(&self) -> &[Entry<T>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn not_found<T: FormRecord>(position: usize) -> AppError {
    AppError::NotFound(format!("{} at position {} not found", T::KIND, position))
}
