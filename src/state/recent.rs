/// Recent creations: the last few successful outputs, newest first

use std::collections::VecDeque;

use crate::source::ImagePayload;

/// How many creations are kept
pub const RECENT_CAPACITY: usize = 4;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecentCreations {
    entries: VecDeque<ImagePayload>,
}

impl RecentCreations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend a creation, dropping the oldest beyond capacity
    pub fn push(&mut self, payload: ImagePayload) {
        self.entries.push_front(payload);
        self.entries.truncate(RECENT_CAPACITY);
    }

    /// Newest first
    pub fn list(&self) -> impl Iterator<Item = &ImagePayload> + '_ {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
