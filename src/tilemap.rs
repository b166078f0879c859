/// A bounded 2D grid stored row-major. Unlike a planet map it does not wrap:
/// coordinates outside the canvas are simply absent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tilemap<T> {
    pub width: usize,
    pub height: usize,
    data: Vec<T>,
}

impl<T: Clone + Default> Tilemap<T> {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![T::default(); width * height],
        }
    }
}

impl<T: Clone> Tilemap<T> {
    pub fn new_with(width: usize, height: usize, value: T) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }

    fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(self.in_bounds(x, y), "({}, {}) outside {}x{}", x, y, self.width, self.height);
        y * self.width + x
    }

    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    pub fn get(&self, x: usize, y: usize) -> &T {
        &self.data[self.index(x, y)]
    }

    pub fn set(&mut self, x: usize, y: usize, value: T) {
        let idx = self.index(x, y);
        self.data[idx] = value;
    }

    /// Fill a `w x h` rectangle with its top-left corner at `(x, y)`.
    /// The rectangle is clipped to the map; returns how many cells were written.
    pub fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, value: T) -> usize {
        let x_end = x.saturating_add(w).min(self.width);
        let y_end = y.saturating_add(h).min(self.height);
        if x >= x_end || y >= y_end {
            return 0;
        }

        for row in y..y_end {
            let start = row * self.width;
            self.data[start + x..start + x_end].fill(value.clone());
        }
        (x_end - x) * (y_end - y)
    }

    /// 4-connected neighbours (right, down, left, up) that lie inside the map.
    pub fn neighbors(&self, x: usize, y: usize) -> impl Iterator<Item = (usize, usize)> + '_ {
        const DIRS: [(isize, isize); 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];
        DIRS.into_iter().filter_map(move |(dx, dy)| {
            let nx = x.checked_add_signed(dx)?;
            let ny = y.checked_add_signed(dy)?;
            self.in_bounds(nx, ny).then_some((nx, ny))
        })
    }

    /// One row as a slice.
    pub fn row(&self, y: usize) -> &[T] {
        let start = y * self.width;
        &self.data[start..start + self.width]
    }

    /// Iterate over all cells with their coordinates.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &T)> {
        let width = self.width;
        self.data.iter().enumerate().map(move |(idx, val)| {
            let x = idx % width;
            let y = idx / width;
            (x, y, val)
        })
    }

    pub fn values(&self) -> &[T] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_rect_clips_to_bounds() {
        let mut map = Tilemap::new_with(5, 4, 0u8);
        let written = map.fill_rect(3, 2, 10, 10, 7);

        assert_eq!(written, 4);
        assert_eq!(*map.get(3, 2), 7);
        assert_eq!(*map.get(4, 3), 7);
        assert_eq!(*map.get(2, 2), 0);
        assert_eq!(map.values().iter().filter(|&&v| v == 7).count(), 4);
    }

    #[test]
    fn test_fill_rect_outside_is_noop() {
        let mut map = Tilemap::new_with(5, 4, 0u8);
        assert_eq!(map.fill_rect(5, 0, 2, 2, 1), 0);
        assert_eq!(map.fill_rect(0, 0, 0, 3, 1), 0);
        assert!(map.values().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_neighbors_do_not_wrap() {
        let map: Tilemap<u8> = Tilemap::new(3, 3);

        let corner: Vec<_> = map.neighbors(0, 0).collect();
        assert_eq!(corner, vec![(1, 0), (0, 1)]);

        let center: Vec<_> = map.neighbors(1, 1).collect();
        assert_eq!(center.len(), 4);

        let far: Vec<_> = map.neighbors(2, 2).collect();
        assert_eq!(far, vec![(1, 2), (2, 1)]);
    }

    #[test]
    fn test_iter_yields_row_major_coordinates() {
        let mut map = Tilemap::new_with(2, 2, 0u8);
        map.set(1, 0, 5);
        let coords: Vec<_> = map.iter().map(|(x, y, &v)| (x, y, v)).collect();
        assert_eq!(coords, vec![(0, 0, 0), (1, 0, 5), (0, 1, 0), (1, 1, 0)]);
        assert_eq!(map.row(0), &[0, 5]);
    }
}
