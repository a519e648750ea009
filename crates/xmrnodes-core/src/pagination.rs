// ── Page-button window ──
//
// At most five numbered pages around the current one, plus the first and
// last page behind an ellipsis when the range is cut.

use std::fmt;

use serde::Serialize;

/// Numbered buttons shown at once.
pub const MAX_BUTTONS: u64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PageButton {
    Page(u64),
    Ellipsis,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageWindow {
    pub current_page: u64,
    pub total_pages: u64,
    pub buttons: Vec<PageButton>,
}

impl PageWindow {
    /// Build the window for `current_page` of `total_pages`.
    ///
    /// `current_page` is clamped into `1..=total_pages`; zero pages yields
    /// no buttons.
    pub fn new(current_page: u64, total_pages: u64) -> Self {
        let current_page = current_page.clamp(1, total_pages.max(1));

        let buttons = if total_pages <= MAX_BUTTONS {
            (1..=total_pages).map(PageButton::Page).collect()
        } else {
            let mut start = current_page.saturating_sub(2).max(1);
            let mut end = (current_page + 2).min(total_pages);

            if current_page <= 3 {
                end = MAX_BUTTONS;
            } else if current_page > total_pages - 3 {
                start = total_pages - (MAX_BUTTONS - 1);
            }

            let mut buttons = Vec::with_capacity(usize::try_from(MAX_BUTTONS + 4).unwrap_or(9));
            if start > 1 {
                buttons.extend([PageButton::Page(1), PageButton::Ellipsis]);
            }
            buttons.extend((start..=end).map(PageButton::Page));
            if end < total_pages {
                buttons.extend([PageButton::Ellipsis, PageButton::Page(total_pages)]);
            }
            buttons
        };

        Self {
            current_page,
            total_pages,
            buttons,
        }
    }
}

/// `1 … 4 5 [6] 7 8 … 10`
impl fmt::Display for PageWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, button) in self.buttons.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            match *button {
                PageButton::Page(n) if n == self.current_page => write!(f, "[{n}]")?,
                PageButton::Page(n) => write!(f, "{n}")?,
                PageButton::Ellipsis => f.write_str("…")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn render(current: u64, total: u64) -> String {
        PageWindow::new(current, total).to_string()
    }

    #[test]
    fn short_ranges_show_every_page() {
        assert_eq!(render(2, 3), "1 [2] 3");
        assert_eq!(render(5, 5), "1 2 3 4 [5]");
        assert!(PageWindow::new(1, 0).buttons.is_empty());
    }

    #[test]
    fn near_start_keeps_first_five() {
        assert_eq!(render(1, 10), "[1] 2 3 4 5 … 10");
        assert_eq!(render(3, 10), "1 2 [3] 4 5 … 10");
    }

    #[test]
    fn middle_has_ellipsis_on_both_sides() {
        assert_eq!(render(6, 10), "1 … 4 5 [6] 7 8 … 10");
    }

    #[test]
    fn near_end_keeps_last_five() {
        assert_eq!(render(9, 10), "1 … 6 7 8 [9] 10");
        assert_eq!(render(10, 10), "1 … 6 7 8 9 [10]");
    }

    #[test]
    fn out_of_range_page_is_clamped() {
        assert_eq!(PageWindow::new(99, 4).current_page, 4);
        assert_eq!(PageWindow::new(0, 4).current_page, 1);
    }
}
