use embassy_time::Instant;

/// Physical position of a key in the matrix
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyPos {
    pub row: u8,
    pub col: u8,
}

/// A debounced key transition reported by the matrix scanner.
///
/// `time` is stamped by the scanner when the transition is detected, all timing
/// decisions are made against it rather than against the time it is processed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyEvent {
    pub pos: KeyPos,
    pub pressed: bool,
    pub time: Instant,
}

impl KeyEvent {
    pub fn key(row: u8, col: u8, pressed: bool, time: Instant) -> Self {
        Self {
            pos: KeyPos { row, col },
            pressed,
            time,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Hand {
    Left,
    Right,
}

impl Hand {
    /// Which half of the keyboard a key belongs to.
    ///
    /// If the matrix has more columns than rows, the columns are split in half,
    /// otherwise the rows are (split keyboards commonly stack both halves vertically).
    pub fn of(pos: KeyPos, rows: u8, cols: u8) -> Self {
        let (n, count) = if cols > rows { (pos.col, cols) } else { (pos.row, rows) };
        if n < count / 2 { Hand::Left } else { Hand::Right }
    }
}
