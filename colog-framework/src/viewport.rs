use std::ops::Range;

/// visible window `[start, stop)` over `total` entries, at most `capacity` tall
///
/// every transition keeps `start <= stop <= total` and `stop - start <= capacity`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    start: usize,
    stop: usize,
    total: usize,
    capacity: usize,
}

impl Viewport {
    /// starts out on the first page
    pub fn new(total: usize, capacity: usize) -> Self {
        let mut viewport = Self {
            start: 0,
            stop: 0,
            total,
            capacity,
        };
        viewport.first_page();
        viewport
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn stop(&self) -> usize {
        self.stop
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.stop
    }

    pub fn len(&self) -> usize {
        self.stop - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.stop
    }

    pub fn first_page(&mut self) {
        self.start = 0;
        self.stop = self.capacity.min(self.total);
    }

    pub fn last_page(&mut self) {
        self.start = self.total.saturating_sub(self.capacity);
        self.stop = self.total;
    }

    pub fn next_page(&mut self) {
        if self.stop + self.capacity > self.total {
            self.last_page();
            return;
        }
        self.start = self.stop;
        self.stop += self.capacity;
    }

    /// steps back a full page; near the top this is the first page
    pub fn previous_page(&mut self) {
        if self.start <= self.capacity {
            self.first_page();
            return;
        }
        self.start -= self.capacity;
        self.stop = self.start + self.capacity;
    }

    /// scroll one entry down, returns whether the window moved
    pub fn next_line(&mut self) -> bool {
        if self.stop + 1 > self.total {
            return false;
        }
        self.start += 1;
        self.stop += 1;
        true
    }

    /// scroll one entry up, returns whether the window moved
    pub fn previous_line(&mut self) -> bool {
        if self.start == 0 {
            return false;
        }
        self.start -= 1;
        self.stop -= 1;
        true
    }

    /// adopt a new capacity, keeping the top entry in place when possible
    pub fn resize(&mut self, capacity: usize) {
        self.capacity = capacity;
        self.start = self.start.min(self.total.saturating_sub(capacity));
        self.stop = (self.start + capacity).min(self.total);
    }
}
