use crate::codec::Point;

/// Transient storage shared by the order decoders.
///
/// Each lane grows to the largest length ever requested and is never shrunk. Slices handed out
/// borrow the arena mutably, so they cannot outlive the order being decoded. Content past what
/// the current order writes is stale and must not be relied upon.
#[derive(Debug, Default)]
pub struct ScratchArena {
    bytes: Vec<u8>,
    points: Vec<Point>,
}

impl ScratchArena {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: vec![0; capacity],
            points: Vec::new(),
        }
    }

    /// Current size of the byte lane.
    pub fn capacity(&self) -> usize {
        self.bytes.len()
    }

    pub fn bytes(&mut self, len: usize) -> &mut [u8] {
        if self.bytes.len() < len {
            self.bytes.resize(len, 0);
        }

        &mut self.bytes[..len]
    }

    pub fn points(&mut self, len: usize) -> &mut [Point] {
        if self.points.len() < len {
            self.points.resize(len, Point::default());
        }

        &mut self.points[..len]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grows_but_never_shrinks() {
        let mut arena = ScratchArena::with_capacity(16);

        assert_eq!(arena.bytes(4).len(), 4);
        assert_eq!(arena.capacity(), 16);

        arena.bytes(64).fill(0xAA);
        assert_eq!(arena.capacity(), 64);

        assert_eq!(arena.bytes(8).len(), 8);
        assert_eq!(arena.capacity(), 64);
    }

    #[test]
    fn stale_content_is_kept() {
        let mut arena = ScratchArena::with_capacity(0);

        arena.bytes(4).copy_from_slice(&[1, 2, 3, 4]);

        assert_eq!(arena.bytes(2), [1, 2]);
        assert_eq!(arena.bytes(4), [1, 2, 3, 4]);
    }

    #[test]
    fn point_lane() {
        let mut arena = ScratchArena::default();

        arena.points(3)[2] = Point::new(5, 6);

        assert_eq!(arena.points(3)[2], Point::new(5, 6));
        assert_eq!(arena.points(1).len(), 1);
    }
}
