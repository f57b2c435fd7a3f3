//! Page-range computation and pagination controls (pure).
//!
//! [`page_range`] decides which page numbers are rendered; [`Pagination`]
//! wraps it with Previous/Next semantics for a concrete list state.

use crate::model::{total_pages, PageNumber};

/// Page counts up to this value are rendered without truncation.
pub const FULL_RANGE_MAX_PAGES: u32 = 9;

/// Number of leading (or trailing) pages shown at the edges.
const EDGE_WINDOW: u32 = 8;

/// One rendered entry of a page range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageEntry {
    /// A concrete, clickable page number.
    Page(u32),
    /// A gap of one or more omitted pages.
    Ellipsis,
}

impl PageEntry {
    /// The page number, or `None` for an ellipsis.
    pub fn page(self) -> Option<u32> {
        match self {
            PageEntry::Page(n) => Some(n),
            PageEntry::Ellipsis => None,
        }
    }
}

/// Compute the entries rendered between Previous and Next.
///
/// - `total <= 9`: every page, no ellipsis.
/// - `current <= 6`: pages 1-8, ellipsis, last page.
/// - `current > total - 5`: page 1, ellipsis, the last 9 pages.
/// - otherwise: page 1, ellipsis, `current ± 2`, ellipsis, last page.
pub fn page_range(current: u32, total: u32) -> Vec<PageEntry> {
    if total <= FULL_RANGE_MAX_PAGES {
        return (1..=total).map(PageEntry::Page).collect();
    }

    let mut entries = Vec::with_capacity(11);

    if current <= 6 {
        entries.extend((1..=EDGE_WINDOW).map(PageEntry::Page));
        entries.push(PageEntry::Ellipsis);
        entries.push(PageEntry::Page(total));
    } else if current > total - 5 {
        entries.push(PageEntry::Page(1));
        entries.push(PageEntry::Ellipsis);
        entries.extend((total - EDGE_WINDOW..=total).map(PageEntry::Page));
    } else {
        entries.push(PageEntry::Page(1));
        entries.push(PageEntry::Ellipsis);
        entries.extend((current - 2..=current + 2).map(PageEntry::Page));
        entries.push(PageEntry::Ellipsis);
        entries.push(PageEntry::Page(total));
    }

    entries
}

/// A renderable pagination control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageControl {
    /// "Previous" button.
    Previous {
        /// True on page 1.
        disabled: bool,
    },
    /// A page-number button.
    Page {
        /// Page this button selects.
        number: u32,
        /// Whether this is the current page.
        current: bool,
    },
    /// Non-clickable gap marker.
    Ellipsis,
    /// "Next" button.
    Next {
        /// True on the last page.
        disabled: bool,
    },
}

impl PageControl {
    /// Whether the control is a button (the ellipsis is not).
    pub fn is_button(self) -> bool {
        !matches!(self, PageControl::Ellipsis)
    }

    /// Whether the control is a disabled button.
    pub fn is_disabled(self) -> bool {
        matches!(
            self,
            PageControl::Previous { disabled: true } | PageControl::Next { disabled: true }
        )
    }

    /// Label rendered for the control.
    pub fn label(self) -> String {
        match self {
            PageControl::Previous { .. } => "Previous".to_string(),
            PageControl::Page { number, .. } => number.to_string(),
            PageControl::Ellipsis => "...".to_string(),
            PageControl::Next { .. } => "Next".to_string(),
        }
    }
}

/// Pagination controls for a list with known totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    current: u32,
    total_pages: u32,
}

impl Pagination {
    /// Controls for `total_posts` posts shown `per_page` at a time.
    pub fn new(total_posts: u64, per_page: u32, current: PageNumber) -> Self {
        Self {
            current: current.get(),
            total_pages: total_pages(total_posts, per_page),
        }
    }

    /// Current page.
    pub fn current(&self) -> u32 {
        self.current
    }

    /// Number of pages.
    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Whether the Previous control is disabled.
    pub fn is_previous_disabled(&self) -> bool {
        self.current <= 1
    }

    /// Whether the Next control is disabled.
    pub fn is_next_disabled(&self) -> bool {
        self.current >= self.total_pages
    }

    /// Page selected by Previous, or `None` when disabled.
    pub fn previous(&self) -> Option<PageNumber> {
        if self.is_previous_disabled() {
            return None;
        }
        PageNumber::new(self.current - 1)
    }

    /// Page selected by Next, or `None` when disabled.
    pub fn next(&self) -> Option<PageNumber> {
        if self.is_next_disabled() {
            return None;
        }
        PageNumber::new(self.current + 1)
    }

    /// First page, or `None` when already there.
    pub fn first(&self) -> Option<PageNumber> {
        (self.current != 1).then_some(PageNumber::FIRST)
    }

    /// Last page, or `None` when already there or there are no pages.
    pub fn last(&self) -> Option<PageNumber> {
        if self.total_pages == 0 || self.current == self.total_pages {
            return None;
        }
        PageNumber::new(self.total_pages)
    }

    /// Page-number entries between Previous and Next.
    pub fn entries(&self) -> Vec<PageEntry> {
        page_range(self.current, self.total_pages)
    }

    /// Every control in render order: Previous, entries, Next.
    pub fn controls(&self) -> Vec<PageControl> {
        let mut controls = Vec::with_capacity(13);
        controls.push(PageControl::Previous {
            disabled: self.is_previous_disabled(),
        });
        controls.extend(self.entries().into_iter().map(|entry| match entry {
            PageEntry::Page(number) => PageControl::Page {
                number,
                current: number == self.current,
            },
            PageEntry::Ellipsis => PageControl::Ellipsis,
        }));
        controls.push(PageControl::Next {
            disabled: self.is_next_disabled(),
        });
        controls
    }

    /// Number of clickable controls (ellipses excluded).
    pub fn buttons(&self) -> usize {
        self.controls().into_iter().filter(|c| c.is_button()).count()
    }

    /// Page a click on `control` navigates to.
    ///
    /// Disabled buttons, the ellipsis and the current page yield `None`.
    pub fn select(&self, control: PageControl) -> Option<PageNumber> {
        match control {
            PageControl::Previous { .. } => self.previous(),
            PageControl::Next { .. } => self.next(),
            PageControl::Page { number, .. } if number != self.current => {
                PageNumber::new(number).filter(|p| p.get() <= self.total_pages)
            }
            PageControl::Page { .. } | PageControl::Ellipsis => None,
        }
    }
}
