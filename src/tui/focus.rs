// Keyboard focus ring
//
// Order follows the card top to bottom: link buttons, the email button,
// then the contact form. Form items drop out of the ring while the
// confirmation panel is showing.

use crate::card::form::Field;

/// What currently receives Enter and text input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// Link button by index into the card's links
    Link(usize),
    CopyEmail,
    Field(Field),
    Send,
}

impl Focus {
    /// All focusable items, in Tab order
    pub fn ring(link_count: usize, form_visible: bool) -> Vec<Focus> {
        let mut ring: Vec<Focus> = (0..link_count).map(Focus::Link).collect();
        ring.push(Focus::CopyEmail);
        if form_visible {
            ring.extend(Field::ALL.iter().copied().map(Focus::Field));
            ring.push(Focus::Send);
        }
        ring
    }

    /// Next item in the ring, wrapping around
    pub fn next_in(self, ring: &[Focus]) -> Focus {
        self.step(ring, 1)
    }

    /// Previous item in the ring, wrapping around
    pub fn prev_in(self, ring: &[Focus]) -> Focus {
        self.step(ring, ring.len().saturating_sub(1))
    }

    fn step(self, ring: &[Focus], by: usize) -> Focus {
        if ring.is_empty() {
            return self;
        }
        match ring.iter().position(|&f| f == self) {
            Some(i) => ring[(i + by) % ring.len()],
            None => ring[0],
        }
    }

    /// The form field under focus, if any
    pub fn field(&self) -> Option<Field> {
        match self {
            Focus::Field(field) => Some(*field),
            _ => None,
        }
    }

    /// True for items that belong to the contact form
    pub fn in_form(&self) -> bool {
        matches!(self, Focus::Field(_) | Focus::Send)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_order_with_form() {
        let ring = Focus::ring(4, true);
        assert_eq!(ring.len(), 9);
        assert_eq!(ring[0], Focus::Link(0));
        assert_eq!(ring[4], Focus::CopyEmail);
        assert_eq!(ring[5], Focus::Field(Field::Name));
        assert_eq!(ring[8], Focus::Send);
    }

    #[test]
    fn test_ring_without_form() {
        let ring = Focus::ring(4, false);
        assert_eq!(ring.len(), 5);
        assert!(!ring.iter().any(|f| f.in_form()));
    }

    #[test]
    fn test_next_and_prev_wrap() {
        let ring = Focus::ring(4, true);
        assert_eq!(Focus::Send.next_in(&ring), Focus::Link(0));
        assert_eq!(Focus::Link(0).prev_in(&ring), Focus::Send);
        assert_eq!(
            Focus::CopyEmail.next_in(&ring),
            Focus::Field(Field::Name)
        );
    }

    #[test]
    fn test_focus_outside_ring_snaps_to_start() {
        let ring = Focus::ring(4, false);
        assert_eq!(Focus::Send.next_in(&ring), Focus::Link(0));
    }
}
