/// Responsive breakpoints for row layout.
///
/// Single source of truth for width thresholds. Rows drop columns as the
/// terminal narrows instead of wrapping.

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Breakpoint {
    /// < 60 cols: name and stars only
    Compact,
    /// 60-99 cols: adds the creation date
    Normal,
    /// 100+ cols: adds the description
    Wide,
}

impl Breakpoint {
    pub fn from_width(width: u16) -> Self {
        match width {
            0..=59 => Breakpoint::Compact,
            60..=99 => Breakpoint::Normal,
            _ => Breakpoint::Wide,
        }
    }

    /// Check if at least this breakpoint (inclusive)
    pub fn at_least(&self, min: Breakpoint) -> bool {
        *self >= min
    }

    /// Column budget for the `owner/name` or contributor label column
    pub fn name_width(&self) -> usize {
        match self {
            Breakpoint::Compact => 28,
            Breakpoint::Normal => 36,
            Breakpoint::Wide => 44,
        }
    }

    pub fn shows_created(&self) -> bool {
        self.at_least(Breakpoint::Normal)
    }

    pub fn shows_description(&self) -> bool {
        self.at_least(Breakpoint::Wide)
    }
}
