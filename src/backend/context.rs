use std::collections::BTreeSet;

use crate::backend::ir::{Chunk, Helper};

/// output of the emitter, shared by all functions of the program
#[derive(Debug, Default)]
pub struct GlobalContext {
    chunks: Vec<Chunk>,
    helpers: BTreeSet<Helper>,
    /// current nesting level
    depth: usize,
}

impl GlobalContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, code: String) {
        self.chunks.push(Chunk::new(self.depth, code));
    }

    pub fn increase_depth(&mut self) {
        self.depth += 1;
    }

    pub fn decrease_depth(&mut self) {
        self.depth -= 1;
    }

    pub fn require_helper(&mut self, helper: Helper) {
        self.helpers.insert(helper);
    }

    /// all chunks of the program, preceded by definitions of required helpers
    pub fn into_chunks(self) -> Vec<Chunk> {
        let mut chunks: Vec<Chunk> = self.helpers.iter()
            .flat_map(|helper| helper.chunks())
            .collect();
        chunks.extend(self.chunks);
        chunks
    }
}
