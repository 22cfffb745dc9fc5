//! Buffer builder
//!
//! Repeats the logical sequence `copies` times so that scrolling past either
//! end stays visually seamless until the monitor relocates the view. The
//! middle copy is the home copy whose instances are measured for layout.

use std::ops::Range;

use super::types::{BufferKey, CarouselItem};

/// One buffered position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferSlot<Id> {
    pub key: BufferKey<Id>,
    pub absolute_index: usize,
    pub logical_index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferedSequence<Id> {
    logical_len: usize,
    copies: usize,
    slots: Vec<BufferSlot<Id>>,
}

impl<Id: Clone> BufferedSequence<Id> {
    /// Build `copies * items.len()` slots; slot `i` renders logical item `i mod N`.
    pub fn build<T>(items: &[T], copies: usize) -> Self
    where
        T: CarouselItem<Id = Id>,
    {
        let logical_len = items.len();
        let ids: Vec<Id> = items.iter().map(T::id).collect();
        let slots = (0..copies * logical_len)
            .map(|absolute_index| {
                let logical_index = absolute_index % logical_len;
                BufferSlot {
                    key: BufferKey {
                        id: ids[logical_index].clone(),
                        absolute_index,
                    },
                    absolute_index,
                    logical_index,
                }
            })
            .collect();

        Self {
            logical_len,
            copies,
            slots,
        }
    }
}

impl<Id> BufferedSequence<Id> {
    pub fn empty(copies: usize) -> Self {
        Self {
            logical_len: 0,
            copies,
            slots: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn logical_len(&self) -> usize {
        self.logical_len
    }

    pub fn copies(&self) -> usize {
        self.copies
    }

    pub fn slots(&self) -> &[BufferSlot<Id>] {
        &self.slots
    }

    pub fn slot(&self, absolute_index: usize) -> Option<&BufferSlot<Id>> {
        self.slots.get(absolute_index)
    }

    /// Index of the middle copy.
    pub fn home_copy(&self) -> usize {
        self.copies / 2
    }

    /// Absolute indices of the home copy.
    pub fn home_range(&self) -> Range<usize> {
        let start = self.home_copy() * self.logical_len;
        start..start + self.logical_len
    }

    pub fn is_home(&self, absolute_index: usize) -> bool {
        self.home_range().contains(&absolute_index)
    }

    pub fn logical_of(&self, absolute_index: usize) -> Option<usize> {
        self.slot(absolute_index).map(|s| s.logical_index)
    }

    pub fn copy_of(&self, absolute_index: usize) -> Option<usize> {
        (absolute_index < self.len())
            .then(|| absolute_index / self.logical_len)
    }

    /// Absolute index of `logical_index` inside `copy`.
    pub fn instance_in_copy(&self, logical_index: usize, copy: usize) -> Option<usize> {
        (logical_index < self.logical_len && copy < self.copies)
            .then(|| copy * self.logical_len + logical_index)
    }

    /// Absolute index of the home-copy instance of `logical_index`.
    pub fn home_absolute(&self, logical_index: usize) -> Option<usize> {
        self.instance_in_copy(logical_index, self.home_copy())
    }

    pub fn is_outermost_copy(&self, copy: usize) -> bool {
        copy == 0 || copy + 1 >= self.copies
    }
}
