//! Vertical layout cursor
//!
//! The cursor is the only state carried between draw units. Every unit
//! asks for its height through [`DocumentCursor::fits`] before drawing; the
//! renderer turns a miss into a page break.

/// Position of the next draw unit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DocumentCursor {
    /// Zero-based page index
    pub page: usize,
    /// Top of the next draw unit, in points from the page bottom
    pub y: f32,
    /// Lowest y any draw unit may reach
    pub bottom_margin: f32,
}

impl DocumentCursor {
    pub fn new(page: usize, y: f32, bottom_margin: f32) -> Self {
        Self {
            page,
            y,
            bottom_margin,
        }
    }

    /// Whether a unit of `needed` height fits above the bottom margin
    pub fn fits(&self, needed: f32) -> bool {
        self.y - needed >= self.bottom_margin
    }

    /// Cursor after consuming `height`
    pub fn advance(self, height: f32) -> Self {
        Self {
            y: self.y - height,
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fits_at_boundary() {
        let cursor = DocumentCursor::new(0, 100.0, 70.0);
        assert!(cursor.fits(30.0));
        assert!(!cursor.fits(30.5));
    }

    #[test]
    fn test_advance_keeps_page() {
        let cursor = DocumentCursor::new(2, 500.0, 70.0).advance(14.0);
        assert_eq!(cursor.page, 2);
        assert_eq!(cursor.y, 486.0);
        assert!(cursor.fits(416.0));
        assert!(!cursor.advance(1000.0).fits(0.0));
    }
}
