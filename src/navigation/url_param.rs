//! Single named query parameter backed by the shared [`Navigation`].
//!
//! Writes replace the current history entry, so paging and searching never
//! add history entries.

use super::Navigation;
use crate::model::PageNumber;
use std::fmt::Display;

/// Which written values remove the parameter from the query string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Sentinel {
    /// Only `None` removes the parameter. An empty string is stored as-is.
    #[default]
    Absent,
    /// `None` and the empty string both remove the parameter.
    AbsentOrEmpty,
}

/// A named query parameter with a default for reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlParam {
    name: String,
    default: String,
    sentinel: Sentinel,
}

impl UrlParam {
    /// Parameter with an empty-string default and [`Sentinel::Absent`].
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: String::new(),
            sentinel: Sentinel::Absent,
        }
    }

    /// Value returned by [`read`](Self::read) when the parameter is missing.
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = default.into();
        self
    }

    /// Configure which values remove the parameter.
    pub fn with_sentinel(mut self, sentinel: Sentinel) -> Self {
        self.sentinel = sentinel;
        self
    }

    /// The `search` parameter of the post list.
    pub fn search() -> Self {
        Self::new("search").with_sentinel(Sentinel::AbsentOrEmpty)
    }

    /// Parameter name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current value, or the configured default when missing.
    pub fn read(&self, nav: &Navigation) -> String {
        nav.current()
            .param(&self.name)
            .map(str::to_string)
            .unwrap_or_else(|| self.default.clone())
    }

    /// Whether the parameter is present in the current location.
    pub fn is_present(&self, nav: &Navigation) -> bool {
        nav.current().param(&self.name).is_some()
    }

    /// Set or remove the parameter.
    ///
    /// `None` removes it; so does an empty value under
    /// [`Sentinel::AbsentOrEmpty`]. Anything else is stored via `Display`.
    pub fn write<V: Display>(&self, nav: &mut Navigation, value: Option<V>) {
        let mut location = nav.current().clone();

        match value.map(|v| v.to_string()) {
            Some(text) if !(text.is_empty() && self.sentinel == Sentinel::AbsentOrEmpty) => {
                location.set_param(&self.name, text);
            }
            _ => location.remove_param(&self.name),
        }

        nav.replace(location);
    }
}

/// The `page` parameter, typed as a positive page number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageParam {
    param: UrlParam,
}

impl PageParam {
    /// The `page` parameter.
    pub fn new() -> Self {
        Self {
            param: UrlParam::new("page"),
        }
    }

    /// Current page; 1 when absent, zero, or not a number.
    pub fn read(&self, nav: &Navigation) -> PageNumber {
        self.param
            .read(nav)
            .trim()
            .parse::<u32>()
            .ok()
            .and_then(PageNumber::new)
            .unwrap_or_default()
    }

    /// Store `page` in the query string.
    pub fn write(&self, nav: &mut Navigation, page: PageNumber) {
        self.param.write(nav, Some(page));
    }

    /// Remove the parameter so the list falls back to page 1.
    pub fn reset(&self, nav: &mut Navigation) {
        self.param.write::<PageNumber>(nav, None);
    }
}

impl Default for PageParam {
    fn default() -> Self {
        Self::new()
    }
}
