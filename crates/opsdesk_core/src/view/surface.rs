//! Detail/edit overlay state machine.
//!
//! Transitions:
//! - `Closed -> Viewing(r)` on `open_detail`.
//! - `Closed -> Editing(None)` on `open_create`.
//! - `Closed | Viewing -> Editing(Some(r))` on `open_edit`.
//! - any state `-> Closed` on `dismiss`.
//!
//! Requests that are not listed above are ignored and return `false`.

/// Overlay currently shown above the list.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Surface<R> {
    #[default]
    Closed,
    Viewing(R),
    /// `None` is the create form, `Some` the edit form for an existing record.
    Editing(Option<R>),
}

impl<R> Surface<R> {
    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Closed)
    }

    pub fn open_detail(&mut self, record: R) -> bool {
        if !self.is_closed() {
            return false;
        }
        *self = Self::Viewing(record);
        true
    }

    pub fn open_create(&mut self) -> bool {
        if !self.is_closed() {
            return false;
        }
        *self = Self::Editing(None);
        true
    }

    pub fn open_edit(&mut self, record: R) -> bool {
        if matches!(self, Self::Editing(_)) {
            return false;
        }
        *self = Self::Editing(Some(record));
        true
    }

    /// Closes whatever is open (cancel, backdrop click or successful save).
    pub fn dismiss(&mut self) {
        *self = Self::Closed;
    }

    /// Record shown in the detail view or loaded into the edit form.
    pub fn record(&self) -> Option<&R> {
        match self {
            Self::Viewing(record) | Self::Editing(Some(record)) => Some(record),
            Self::Closed | Self::Editing(None) => None,
        }
    }

    pub fn is_creating(&self) -> bool {
        matches!(self, Self::Editing(None))
    }
}

#[cfg(test)]
mod tests {
    use super::Surface;

    #[test]
    fn detail_then_edit_then_dismiss() {
        let mut surface = Surface::default();
        assert!(surface.open_detail("ORD-1"));
        assert_eq!(surface, Surface::Viewing("ORD-1"));

        assert!(surface.open_edit("ORD-1"));
        assert_eq!(surface.record(), Some(&"ORD-1"));

        surface.dismiss();
        assert!(surface.is_closed());
    }

    #[test]
    fn create_only_from_closed() {
        let mut surface = Surface::Viewing("ORD-1");
        assert!(!surface.open_create());
        assert_eq!(surface, Surface::Viewing("ORD-1"));

        surface.dismiss();
        assert!(surface.open_create());
        assert!(surface.is_creating());
        assert_eq!(surface.record(), None);
    }

    #[test]
    fn no_stacking_while_editing() {
        let mut surface = Surface::Editing(Some("ORD-1"));
        assert!(!surface.open_detail("ORD-2"));
        assert!(!surface.open_edit("ORD-2"));
        assert_eq!(surface.record(), Some(&"ORD-1"));
    }
}
