use serde::{Deserialize, Serialize};

use crate::types::{PAGE_SIZE, PageNumber, record::Record};

/*
 * Record layout of a type
 * ┌──────────────────────────────────────────────────────────┐
 * │ page 0: [r0 .. r9]  (full)                               │
 * │ page 1: [r10 .. r19] (full)                              │
 * │ page 2: [r20 .. r24] (only the last page may have room)  │
 * └──────────────────────────────────────────────────────────┘
 *
 * Page numbers are assigned once, at creation, and never reassigned. A page
 * emptied by a delete is dropped from the sequence, leaving a gap.
 */
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub page_number: PageNumber,
    pub records: Vec<Record>,
}

impl Page {
    pub fn new(page_number: PageNumber) -> Self {
        Self {
            page_number,
            records: Vec::with_capacity(PAGE_SIZE),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.records.len() >= PAGE_SIZE
    }

    pub fn free_slots(&self) -> usize {
        PAGE_SIZE.saturating_sub(self.records.len())
    }

    /// Callers must check `is_full` first.
    pub fn push(&mut self, record: Record) {
        debug_assert!(!self.is_full(), "page {} is full", self.page_number);
        self.records.push(record);
    }

    pub fn remove(&mut self, slot: usize) -> Option<Record> {
        if slot < self.records.len() {
            Some(self.records.remove(slot))
        } else {
            None
        }
    }
}
