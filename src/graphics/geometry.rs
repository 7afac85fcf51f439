/// Integer pixel rectangle, top-left anchored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[must_use]
    pub fn left(&self) -> i32 {
        self.x
    }

    #[must_use]
    pub fn top(&self) -> i32 {
        self.y
    }

    #[must_use]
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Horizontal center, truncated like the rest of the pixel math
    #[must_use]
    pub fn center_x(&self) -> i32 {
        self.x + self.width / 2
    }

    #[must_use]
    pub fn center_y(&self) -> i32 {
        self.y + self.height / 2
    }

    /// Grows the rect by `dx` and `dy` in total, keeping its center
    #[must_use]
    pub fn inflate(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x - dx / 2,
            y: self.y - dy / 2,
            width: self.width + dx,
            height: self.height + dy,
        }
    }

    #[must_use]
    pub fn translate(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Point containment; right and bottom edges are exclusive
    #[must_use]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.left() && x < self.right() && y >= self.top() && y < self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inflate_keeps_center() {
        let rect = Rect::new(10, 10, 20, 10).inflate(4, 6);
        assert_eq!(rect, Rect::new(8, 7, 24, 16));
    }

    #[test]
    fn test_contains_edges() {
        let rect = Rect::new(0, 0, 100, 20);
        assert!(rect.contains(0, 0));
        assert!(rect.contains(99, 19));
        assert!(!rect.contains(100, 10));
        assert!(!rect.contains(10, 20));
        assert!(!rect.contains(-1, 5));
    }

    #[test]
    fn test_center() {
        let rect = Rect::new(3, 4, 15, 15);
        assert_eq!((rect.center_x(), rect.center_y()), (10, 11));
    }
}
