// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Explicit node id allocation.

/// Hands out increasing node ids.
///
/// Trees never generate ids; hosts own an allocator (or their own scheme) so
/// construction stays deterministic and ids are never reused.
#[derive(Clone, Debug)]
pub struct IdAllocator {
    next: Option<u32>,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdAllocator {
    /// An allocator whose first id is `0`.
    pub const fn new() -> Self {
        Self::starting_at(0)
    }

    /// An allocator whose first id is `first`.
    pub const fn starting_at(first: u32) -> Self {
        Self { next: Some(first) }
    }

    /// The id the next call to [`IdAllocator::next_id`] returns.
    pub const fn peek(&self) -> Option<u32> {
        self.next
    }

    /// Allocate an id. Returns `None` once `u32::MAX` has been handed out.
    pub fn next_id(&mut self) -> Option<u32> {
        let id = self.next?;
        self.next = id.checked_add(1);
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_up_from_start() {
        let mut ids = IdAllocator::starting_at(7);
        assert_eq!(ids.next_id(), Some(7));
        assert_eq!(ids.next_id(), Some(8));
        assert_eq!(ids.peek(), Some(9));
        assert_eq!(IdAllocator::default().peek(), Some(0));
    }

    #[test]
    fn never_wraps() {
        let mut ids = IdAllocator::starting_at(u32::MAX);
        assert_eq!(ids.next_id(), Some(u32::MAX));
        assert_eq!(ids.next_id(), None);
        assert_eq!(ids.next_id(), None);
    }
}
