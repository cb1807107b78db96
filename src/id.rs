use crate::diagram::NodeId;

/// Monotonic id source for nodes added at runtime.
///
/// Ids look like `{prefix}_{n}`. Each editor owns its own counter, and ids
/// already present in the diagram are skipped.
#[derive(Clone, Debug)]
pub struct IdGenerator {
    prefix: String,
    next: u64,
}

impl IdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into(), next: 1 }
    }

    /// Produce the next id for which `taken` is false.
    pub fn next_id(&mut self, taken: impl Fn(&NodeId) -> bool) -> NodeId {
        loop {
            let id = NodeId::new(format!("{}_{}", self.prefix, self.next));
            self.next += 1;
            if !taken(&id) {
                return id;
            }
            log::debug!("skipping node id {} already in use", id);
        }
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new("node")
    }
}
