//! Navigation state: the current location and its history.
//!
//! A single [`Navigation`] value is owned by the application state and passed
//! to components by reference. Components read and write query parameters
//! through [`UrlParam`]; screens are derived from the path through [`Route`].
//! Every change notifies subscribers with the new current location.

pub mod route;
pub mod url_param;

pub use route::Route;
pub use url_param::{PageParam, Sentinel, UrlParam};

use std::fmt;
use url::form_urlencoded;

// ===== Location =====

/// A navigable location: a path plus an ordered query string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Location {
    path: String,
    query: Vec<(String, String)>,
}

impl Location {
    /// Location with the given path and no query.
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            path: if path.is_empty() { "/".to_string() } else { path },
            query: Vec::new(),
        }
    }

    /// Parse `"/posts?page=2&search=foo"`.
    ///
    /// Query values are percent- and plus-decoded. A missing path becomes `/`.
    pub fn parse(raw: &str) -> Self {
        let (path, query) = match raw.split_once('?') {
            Some((path, query)) => (path, query),
            None => (raw, ""),
        };

        let query = form_urlencoded::parse(query.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        Self {
            path: if path.is_empty() { "/".to_string() } else { path.to_string() },
            query,
        }
    }

    /// The path component.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// First value of a query parameter.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Set a query parameter, keeping its position if already present.
    ///
    /// Duplicate occurrences of `name` are collapsed into one.
    pub fn set_param(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.query.iter().position(|(k, _)| k == name) {
            Some(index) => {
                self.query[index].1 = value;
                let mut seen = false;
                self.query.retain(|(k, _)| {
                    if k != name {
                        return true;
                    }
                    let keep = !seen;
                    seen = true;
                    keep
                });
            }
            None => self.query.push((name.to_string(), value)),
        }
    }

    /// Remove every occurrence of a query parameter.
    pub fn remove_param(&mut self, name: &str) {
        self.query.retain(|(k, _)| k != name);
    }

    /// Serialized query string without the leading `?`.
    pub fn query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.query.iter())
            .finish()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.query.is_empty() {
            write!(f, "{}", self.path)
        } else {
            write!(f, "{}?{}", self.path, self.query_string())
        }
    }
}

// ===== Navigation =====

/// Handle returned by [`Navigation::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&Location)>;

/// History of locations with change notification.
///
/// Invariant: the history is never empty.
pub struct Navigation {
    entries: Vec<Location>,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl fmt::Debug for Navigation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Navigation")
            .field("entries", &self.entries)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl Navigation {
    /// Start at `initial` with a one-entry history.
    pub fn new(initial: Location) -> Self {
        Self {
            entries: vec![initial],
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// The current location.
    pub fn current(&self) -> &Location {
        // entries is never empty
        &self.entries[self.entries.len() - 1]
    }

    /// The entry [`back`](Self::back) would return to.
    pub fn previous(&self) -> Option<&Location> {
        let len = self.entries.len();
        (len > 1).then(|| &self.entries[len - 2])
    }

    /// Number of history entries.
    pub fn history_len(&self) -> usize {
        self.entries.len()
    }

    /// Navigate to a new location, adding a history entry.
    pub fn push(&mut self, location: Location) {
        self.entries.push(location);
        self.notify();
    }

    /// Replace the current history entry.
    ///
    /// Subscribers are not notified when the location is unchanged.
    pub fn replace(&mut self, location: Location) {
        let last = self.entries.len() - 1;
        if self.entries[last] == location {
            return;
        }
        self.entries[last] = location;
        self.notify();
    }

    /// Pop the current entry. Returns `false` at the first entry.
    pub fn back(&mut self) -> bool {
        if self.entries.len() <= 1 {
            return false;
        }
        self.entries.pop();
        self.notify();
        true
    }

    /// Register a callback invoked with the new location after every change.
    pub fn subscribe(&mut self, callback: impl FnMut(&Location) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Remove a subscription. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub, _)| *sub != id);
        self.subscribers.len() != before
    }

    fn notify(&mut self) {
        let current = self.entries[self.entries.len() - 1].clone();
        for (_, callback) in &mut self.subscribers {
            callback(&current);
        }
    }
}

impl Default for Navigation {
    fn default() -> Self {
        Self::new(Location::new("/posts"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn parse_splits_path_and_query() {
        let location = Location::parse("/posts?page=2&search=hello+world");
        assert_eq!(location.path(), "/posts");
        assert_eq!(location.param("page"), Some("2"));
        assert_eq!(location.param("search"), Some("hello world"));
    }

    #[test]
    fn parse_without_path_defaults_to_root() {
        let location = Location::parse("?page=3");
        assert_eq!(location.path(), "/");
        assert_eq!(location.param("page"), Some("3"));
    }

    #[test]
    fn display_round_trips_encoded_values() {
        let mut location = Location::new("/posts");
        location.set_param("search", "a&b c");
        let rendered = location.to_string();
        assert_eq!(rendered, "/posts?search=a%26b+c");
        assert_eq!(Location::parse(&rendered), location);
    }

    #[test]
    fn set_param_keeps_position_and_collapses_duplicates() {
        let mut location = Location::parse("/posts?page=1&search=x&page=9");
        location.set_param("page", "4");
        assert_eq!(location.to_string(), "/posts?page=4&search=x");
    }

    #[test]
    fn remove_param_drops_every_occurrence() {
        let mut location = Location::parse("/posts?page=1&search=x&page=9");
        location.remove_param("page");
        assert_eq!(location.to_string(), "/posts?search=x");
    }

    #[test]
    fn replace_does_not_grow_history() {
        let mut nav = Navigation::new(Location::new("/posts"));
        nav.replace(Location::parse("/posts?page=2"));
        nav.replace(Location::parse("/posts?page=3"));
        assert_eq!(nav.history_len(), 1);
        assert_eq!(nav.current().param("page"), Some("3"));
    }

    #[test]
    fn push_and_back_walk_history() {
        let mut nav = Navigation::new(Location::new("/posts"));
        nav.push(Location::new("/posts/1"));
        assert_eq!(nav.current().path(), "/posts/1");
        assert!(nav.back());
        assert_eq!(nav.current().path(), "/posts");
        assert!(!nav.back(), "first entry cannot be popped");
    }

    #[test]
    fn previous_peeks_at_back_target() {
        let mut nav = Navigation::new(Location::parse("/posts?page=3"));
        assert_eq!(nav.previous(), None);
        nav.push(Location::new("/posts/1"));
        assert_eq!(nav.previous(), Some(&Location::parse("/posts?page=3")));
    }

    #[test]
    fn subscribers_see_every_change() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);

        let mut nav = Navigation::new(Location::new("/posts"));
        nav.subscribe(move |location| sink.borrow_mut().push(location.to_string()));

        nav.replace(Location::parse("/posts?page=2"));
        nav.push(Location::new("/posts/5"));
        nav.back();

        assert_eq!(
            *seen.borrow(),
            vec!["/posts?page=2", "/posts/5", "/posts?page=2"]
        );
    }

    #[test]
    fn unchanged_replace_does_not_notify() {
        let count = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&count);

        let mut nav = Navigation::new(Location::parse("/posts?page=2"));
        nav.subscribe(move |_| *sink.borrow_mut() += 1);
        nav.replace(Location::parse("/posts?page=2"));

        assert_eq!(*count.borrow(), 0);
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let count = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&count);

        let mut nav = Navigation::default();
        let id = nav.subscribe(move |_| *sink.borrow_mut() += 1);
        nav.push(Location::new("/posts/1"));
        assert!(nav.unsubscribe(id));
        nav.push(Location::new("/posts/2"));

        assert_eq!(*count.borrow(), 1);
        assert!(!nav.unsubscribe(id));
    }
}
