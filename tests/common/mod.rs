//! Common test utilities for integration tests.

#![allow(dead_code)]

pub mod harness;

use std::cell::RefCell;
use std::rc::Rc;

/// Install a test-mode logger once per process.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Records row-model notifications so tests can check what the canvas would see.
#[derive(Default, Clone)]
pub struct RowTracker {
    /// Label of every node row, captured after each interaction
    pub label_snapshots: Rc<RefCell<Vec<Vec<String>>>>,
}

impl RowTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&self) {
        self.label_snapshots.borrow_mut().clear();
    }
}
