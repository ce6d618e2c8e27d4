// Copyright (C) 2020-2026 Andy Kurnia.

// A lane is a row (across) or a column (down); idx walks along it.

#[derive(Clone)]
pub struct Strider {
    base: i16,
    step: i8,
    len: i8,
}

impl Strider {
    #[inline(always)]
    pub fn len(&self) -> i8 {
        self.len
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline(always)]
    pub fn at(&self, idx: i8) -> usize {
        ((self.base as isize) + (idx as isize) * (self.step as isize)) as usize
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Dim {
    pub rows: i8,
    pub cols: i8,
}

impl Dim {
    #[inline(always)]
    pub fn across(&self, row: i8) -> Strider {
        Strider {
            base: (row as i16) * (self.cols as i16),
            step: 1,
            len: self.cols,
        }
    }

    #[inline(always)]
    pub fn down(&self, col: i8) -> Strider {
        Strider {
            base: col as i16,
            step: self.cols,
            len: self.rows,
        }
    }

    #[inline(always)]
    pub fn lane(&self, down: bool, lane: i8) -> Strider {
        if down {
            self.down(lane)
        } else {
            self.across(lane)
        }
    }

    #[inline(always)]
    pub fn num_lanes(&self, down: bool) -> i8 {
        if down { self.cols } else { self.rows }
    }

    #[inline(always)]
    pub fn num_cells(&self) -> usize {
        (self.rows as usize) * (self.cols as usize)
    }

    #[inline(always)]
    pub fn at_row_col(&self, row: i8, col: i8) -> usize {
        (((row as isize) * (self.cols as isize)) + (col as isize)) as usize
    }

    #[inline(always)]
    pub fn contains(&self, row: i8, col: i8) -> bool {
        (0..self.rows).contains(&row) && (0..self.cols).contains(&col)
    }

    // Across lanes are rows, down lanes are columns.
    #[inline(always)]
    pub fn row_col(&self, down: bool, lane: i8, idx: i8) -> (i8, i8) {
        if down { (idx, lane) } else { (lane, idx) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn striders_walk_rows_and_columns() {
        let dim = Dim { rows: 15, cols: 15 };
        assert_eq!(dim.across(2).at(3), 33);
        assert_eq!(dim.down(3).at(2), 33);
        assert_eq!(dim.lane(true, 3).at(2), dim.at_row_col(2, 3));
        assert_eq!(dim.num_cells(), 225);
    }

    #[test]
    fn bounds() {
        let dim = Dim { rows: 15, cols: 15 };
        assert!(dim.contains(0, 14));
        assert!(!dim.contains(15, 0));
        assert!(!dim.contains(-1, 3));
        assert_eq!(dim.row_col(true, 9, 4), (4, 9));
    }
}
