/// Responsive breakpoint system for the card layout.
///
/// Single source of truth for width thresholds - no magic numbers scattered in render code.

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Breakpoint {
    /// < 60 cols: link hints hidden
    Compact,
    /// 60-109 cols: card and contact form stacked
    Normal,
    /// 110+ cols: card and contact form side by side
    Wide,
}

impl Breakpoint {
    pub fn from_width(width: u16) -> Self {
        match width {
            0..=59 => Breakpoint::Compact,
            60..=109 => Breakpoint::Normal,
            _ => Breakpoint::Wide,
        }
    }

    /// Check if at least this breakpoint (inclusive)
    pub fn at_least(&self, min: Breakpoint) -> bool {
        *self >= min
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakpoint_thresholds() {
        assert_eq!(Breakpoint::from_width(40), Breakpoint::Compact);
        assert_eq!(Breakpoint::from_width(59), Breakpoint::Compact);
        assert_eq!(Breakpoint::from_width(60), Breakpoint::Normal);
        assert_eq!(Breakpoint::from_width(109), Breakpoint::Normal);
        assert_eq!(Breakpoint::from_width(110), Breakpoint::Wide);
    }

    #[test]
    fn at_least_comparisons() {
        let normal = Breakpoint::Normal;
        assert!(normal.at_least(Breakpoint::Compact));
        assert!(normal.at_least(Breakpoint::Normal));
        assert!(!normal.at_least(Breakpoint::Wide));
    }
}
