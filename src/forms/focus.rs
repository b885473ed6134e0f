// ABOUTME: Keyboard focus ring over a screen's interactive rows

/// Cycles focus over `len` rows, skipping rows the caller marks unfocusable
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FocusRing {
    index: usize,
}

impl FocusRing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(index: usize) -> Self {
        Self { index }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn set(&mut self, index: usize) {
        self.index = index;
    }

    pub fn next(&mut self, len: usize, focusable: impl Fn(usize) -> bool) {
        self.step(len, focusable, |i| (i + 1) % len);
    }

    pub fn prev(&mut self, len: usize, focusable: impl Fn(usize) -> bool) {
        self.step(len, focusable, |i| (i + len - 1) % len);
    }

    fn step(&mut self, len: usize, focusable: impl Fn(usize) -> bool, advance: impl Fn(usize) -> usize) {
        if len == 0 {
            return;
        }
        let mut candidate = self.index.min(len - 1);
        for _ in 0..len {
            candidate = advance(candidate);
            if focusable(candidate) {
                self.index = candidate;
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wraps_in_both_directions() {
        let mut ring = FocusRing::new();
        ring.prev(3, |_| true);
        assert_eq!(ring.index(), 2);
        ring.next(3, |_| true);
        assert_eq!(ring.index(), 0);
    }

    #[test]
    fn test_skips_unfocusable_rows() {
        let mut ring = FocusRing::new();
        ring.next(4, |i| i != 1 && i != 2);
        assert_eq!(ring.index(), 3);
    }

    #[test]
    fn test_nothing_focusable_keeps_position() {
        let mut ring = FocusRing::at(1);
        ring.next(3, |_| false);
        assert_eq!(ring.index(), 1);
    }
}
