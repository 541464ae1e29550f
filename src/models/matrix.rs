/// Compact bit matrix holding a thresholded image (true = black)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitMatrix {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl BitMatrix {
    /// Create a new all-white bit matrix with given dimensions
    pub fn new(width: usize, height: usize) -> Self {
        let bytes_needed = (width * height).div_ceil(8);
        Self {
            width,
            height,
            data: vec![0; bytes_needed],
        }
    }

    /// Build a matrix from rows of booleans, one `Vec<bool>` per row
    ///
    /// Rows shorter than `width` leave the remaining bits white.
    pub fn from_rows(width: usize, rows: &[Vec<bool>]) -> Self {
        let mut matrix = Self::new(width, rows.len());
        for (y, row) in rows.iter().enumerate() {
            for (x, &black) in row.iter().take(width).enumerate() {
                if black {
                    matrix.set(x, y, true);
                }
            }
        }
        matrix
    }

    /// Get matrix width
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get matrix height
    pub fn height(&self) -> usize {
        self.height
    }

    /// Get bit at (x, y); out-of-range reads are white
    pub fn get(&self, x: usize, y: usize) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let index = y * self.width + x;
        (self.data[index / 8] >> (index % 8)) & 1 == 1
    }

    /// Set bit at (x, y); out-of-range writes are ignored
    pub fn set(&mut self, x: usize, y: usize, value: bool) {
        if x >= self.width || y >= self.height {
            return;
        }
        let index = y * self.width + x;
        let (byte_index, bit_index) = (index / 8, index % 8);
        if value {
            self.data[byte_index] |= 1 << bit_index;
        } else {
            self.data[byte_index] &= !(1 << bit_index);
        }
    }

    /// Toggle bit at (x, y)
    pub fn toggle(&mut self, x: usize, y: usize) {
        if x >= self.width || y >= self.height {
            return;
        }
        let index = y * self.width + x;
        self.data[index / 8] ^= 1 << (index % 8);
    }

    /// Clear all bits to 0
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// One row as booleans
    pub fn row(&self, y: usize) -> Vec<bool> {
        (0..self.width).map(|x| self.get(x, y)).collect()
    }

    /// Number of black bits
    pub fn count_set(&self) -> usize {
        self.data.iter().map(|b| b.count_ones() as usize).sum()
    }

    /// Copy out the rectangle starting at (left, top)
    ///
    /// The rectangle is clamped to the matrix bounds.
    pub fn crop(&self, left: usize, top: usize, width: usize, height: usize) -> Self {
        let width = width.min(self.width.saturating_sub(left));
        let height = height.min(self.height.saturating_sub(top));
        let mut out = Self::new(width, height);
        for y in 0..height {
            for x in 0..width {
                if self.get(left + x, top + y) {
                    out.set(x, y, true);
                }
            }
        }
        out
    }

    /// Get raw data as bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

impl Default for BitMatrix {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_matrix() {
        let mut matrix = BitMatrix::new(8, 8);
        assert_eq!(matrix.width(), 8);
        assert_eq!(matrix.height(), 8);

        matrix.set(3, 4, true);
        assert!(matrix.get(3, 4));
        assert!(!matrix.get(3, 3));
        assert_eq!(matrix.count_set(), 1);

        matrix.toggle(3, 4);
        assert!(!matrix.get(3, 4));

        matrix.set(1, 1, true);
        matrix.clear();
        assert_eq!(matrix.count_set(), 0);
    }

    #[test]
    fn test_out_of_bounds() {
        let mut matrix = BitMatrix::new(8, 8);
        matrix.set(10, 10, true); // Should not panic
        assert!(!matrix.get(10, 10));
    }

    #[test]
    fn test_crop_clamps_to_bounds() {
        let mut matrix = BitMatrix::new(6, 4);
        matrix.set(4, 3, true);
        matrix.set(0, 0, true);

        let cropped = matrix.crop(3, 2, 10, 10);
        assert_eq!((cropped.width(), cropped.height()), (3, 2));
        assert!(cropped.get(1, 1));
        assert_eq!(cropped.count_set(), 1);
    }

    #[test]
    fn test_from_rows() {
        let rows = vec![vec![true, false, true], vec![false, true]];
        let matrix = BitMatrix::from_rows(3, &rows);
        assert_eq!(matrix.row(0), vec![true, false, true]);
        assert_eq!(matrix.row(1), vec![false, true, false]);
    }
}
