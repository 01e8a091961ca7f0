//! Which file is displayed and which chart row is hovered.

/// Where the selection state machine currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionPhase {
    /// No document loaded yet, or a document with no files.
    NoFileSelected,
    /// A file is displayed, nothing hovered since it was chosen.
    FileSelected,
    /// A file is displayed and a chart row is hovered.
    RowHovered,
}

/// Selection state for the comparison page.
///
/// Choosing a file always clears the hovered row, so a row index from a
/// previous file's chart is never resolved against the new one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    selected_file: Option<String>,
    selected_row: Option<usize>,
    hovered_row: Option<usize>,
    criterion: String,
}

impl SelectionState {
    /// Start with nothing selected.
    #[must_use]
    pub fn new(criterion: impl Into<String>) -> Self {
        Self {
            criterion: criterion.into(),
            ..Self::default()
        }
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> SelectionPhase {
        match (&self.selected_file, self.hovered_row) {
            (None, _) => SelectionPhase::NoFileSelected,
            (Some(_), None) => SelectionPhase::FileSelected,
            (Some(_), Some(_)) => SelectionPhase::RowHovered,
        }
    }

    /// Select the file shown in summary row `table_row`.
    pub fn select_file(&mut self, table_row: usize, file: impl Into<String>) {
        self.selected_file = Some(file.into());
        self.selected_row = Some(table_row);
        self.hovered_row = None;
    }

    /// Apply a chart hover event.
    ///
    /// Events without a row (mouse-out, non-data elements) leave the state
    /// untouched. Returns whether the state changed.
    pub fn hover(&mut self, row: Option<usize>) -> bool {
        match row {
            Some(row) if self.selected_file.is_some() => {
                self.hovered_row = Some(row);
                true
            }
            _ => false,
        }
    }

    /// File currently displayed.
    #[must_use]
    pub fn selected_file(&self) -> Option<&str> {
        self.selected_file.as_deref()
    }

    /// Summary row the displayed file came from.
    #[must_use]
    pub fn selected_row(&self) -> Option<usize> {
        self.selected_row
    }

    /// Chart row currently hovered.
    #[must_use]
    pub fn hovered_row(&self) -> Option<usize> {
        self.hovered_row
    }

    /// Evaluation criterion the document was generated for.
    #[must_use]
    pub fn criterion(&self) -> &str {
        &self.criterion
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transitions() {
        let mut state = SelectionState::new("psnr");
        assert_eq!(state.phase(), SelectionPhase::NoFileSelected);
        assert!(!state.hover(Some(2)));
        assert_eq!(state.phase(), SelectionPhase::NoFileSelected);

        state.select_file(0, "a.y4m");
        assert_eq!(state.phase(), SelectionPhase::FileSelected);
        assert_eq!(state.selected_file(), Some("a.y4m"));

        assert!(state.hover(Some(3)));
        assert_eq!(state.phase(), SelectionPhase::RowHovered);
        assert_eq!(state.hovered_row(), Some(3));
    }

    #[test]
    fn test_null_hover_keeps_previous() {
        let mut state = SelectionState::new("psnr");
        state.select_file(0, "a.y4m");
        state.hover(Some(4));
        assert!(!state.hover(None));
        assert_eq!(state.hovered_row(), Some(4));
    }

    #[test]
    fn test_reselect_clears_hover() {
        let mut state = SelectionState::new("psnr");
        state.select_file(1, "b.y4m");
        state.hover(Some(7));
        state.select_file(0, "a.y4m");
        assert_eq!(state.hovered_row(), None);
        assert_eq!(state.selected_row(), Some(0));
        assert_eq!(state.phase(), SelectionPhase::FileSelected);
        assert_eq!(state.criterion(), "psnr");
    }
}
