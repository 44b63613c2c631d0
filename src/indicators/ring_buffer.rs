//! Fixed-capacity ring buffer holding the most recent values of a rolling window

#[derive(Clone, Debug)]
pub(crate) struct RingBuffer<T> {
    buffer: Vec<T>,
    head: usize,
    len: usize,
    capacity: usize,
}

impl<T: Copy + Default> RingBuffer<T> {
    /// Creates an empty buffer. `capacity` must be non-zero.
    pub(crate) fn new(capacity: usize) -> Self {
        debug_assert!(capacity > 0, "ring buffer capacity must be non-zero");

        Self {
            buffer: vec![T::default(); capacity],
            head: 0,
            len: 0,
            capacity,
        }
    }

    /// Returns true once the buffer holds `capacity` values.
    pub(crate) fn is_full(&self) -> bool {
        self.len == self.capacity
    }

    /// Appends a value, returning the evicted oldest value when full.
    pub(crate) fn push(&mut self, value: T) -> Option<T> {
        if self.is_full() {
            let old = self.buffer[self.head];
            self.buffer[self.head] = value;

            self.head += 1;
            if self.head == self.capacity {
                self.head = 0;
            }

            Some(old)
        } else {
            self.buffer[self.len] = value;
            self.len += 1;

            None
        }
    }

    /// Iterates the stored values from oldest to newest.
    pub(crate) fn iter(&self) -> impl Iterator<Item = &T> {
        let (newer, older) = self.buffer[..self.len].split_at(self.head);
        older.iter().chain(newer.iter())
    }
}
