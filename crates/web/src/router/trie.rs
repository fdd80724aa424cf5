//! Hand-rolled radix trie over path segments.
//!
//! Each node owns a map of literal children keyed by segment text, at most one
//! `:param` child, and at most one `*wildcard` child — enforced here at
//! insert time rather than left to the caller. Matching walks the original
//! path string directly (no intermediate `Vec<&str>` of segments) so that
//! parameter and wildcard-tail values stay borrowed slices of the request
//! path: no percent-decoding, no copying.
//!
//! Lookup prefers literal over parameter over wildcard at every node,
//! backtracking (via `Vec::truncate` on the params accumulator) when a more
//! specific branch turns out not to lead anywhere.

use std::collections::HashMap;

/// A trie mapping path patterns to values of type `T`.
pub struct PathTrie<T> {
    root: Node<T>,
}

struct Node<T> {
    literal_children: HashMap<Box<str>, Node<T>>,
    param_child: Option<Box<ParamChild<T>>>,
    wildcard: Option<WildcardChild<T>>,
    value: Option<T>,
}

struct ParamChild<T> {
    name: Box<str>,
    node: Node<T>,
}

struct WildcardChild<T> {
    name: Box<str>,
    value: T,
}

impl<T> Node<T> {
    fn empty() -> Self {
        Self { literal_children: HashMap::new(), param_child: None, wildcard: None, value: None }
    }

    fn insert(&mut self, pattern: &str, value: T) {
        if pattern.is_empty() {
            self.value = Some(value);
            return;
        }
        let (seg, rest) = split_first_segment(pattern);

        if let Some(name) = seg.strip_prefix(':') {
            let child = self.param_child.get_or_insert_with(|| Box::new(ParamChild { name: name.into(), node: Node::empty() }));
            assert_eq!(
                &*child.name, name,
                "router: node already has parameter `:{}`, cannot also add `:{}` at the same position",
                child.name, name
            );
            child.node.insert(rest, value);
        } else if let Some(name) = seg.strip_prefix('*') {
            assert!(rest.is_empty(), "router: wildcard segment `*{name}` must be the last segment of a route pattern");
            if let Some(existing) = &self.wildcard {
                assert_eq!(
                    &*existing.name, name,
                    "router: node already has wildcard `*{}`, cannot also add `*{}` at the same position",
                    existing.name, name
                );
            }
            self.wildcard = Some(WildcardChild { name: name.into(), value });
        } else {
            let child = self.literal_children.entry(seg.into()).or_insert_with(Node::empty);
            child.insert(rest, value);
        }
    }

    fn find<'t, 'p>(&'t self, path: &'p str, params: &mut Vec<(&'t str, &'p str)>) -> Option<&'t T> {
        if path.is_empty() {
            return self.value.as_ref();
        }
        let (seg, rest) = split_first_segment(path);
        let checkpoint = params.len();

        if let Some(child) = self.literal_children.get(seg) {
            if let Some(v) = child.find(rest, params) {
                return Some(v);
            }
            params.truncate(checkpoint);
        }

        if let Some(param) = &self.param_child {
            params.push((&param.name, seg));
            if let Some(v) = param.node.find(rest, params) {
                return Some(v);
            }
            params.truncate(checkpoint);
        }

        if let Some(wildcard) = &self.wildcard {
            params.push((&wildcard.name, path));
            return Some(&wildcard.value);
        }

        None
    }
}

/// Splits `s` at its first `/`, returning `(before, after)` with the
/// separator consumed. When there's no `/`, the whole string is the segment
/// and the remainder is empty.
#[inline]
fn split_first_segment(s: &str) -> (&str, &str) {
    match s.find('/') {
        Some(i) => (&s[..i], &s[i + 1..]),
        None => (s, ""),
    }
}

impl<T> Default for PathTrie<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> PathTrie<T> {
    pub fn new() -> Self {
        Self { root: Node::empty() }
    }

    /// Inserts `value` at `pattern`. Re-inserting the same pattern overwrites
    /// the previous value. Panics on conflicting parameter/wildcard names at
    /// the same trie position — a configuration error caught at build time,
    /// the same way the donor's prior `matchit::Router::insert(..).unwrap()`
    /// surfaced pattern conflicts.
    pub fn insert(&mut self, pattern: &str, value: T) {
        self.root.insert(pattern.trim_start_matches('/'), value);
    }

    /// Matches `path`, returning the stored value and any captured
    /// parameters. Never fails: an unmatched path is simply `None`.
    pub fn find<'t, 'p>(&'t self, path: &'p str) -> Option<Match<'t, 'p, T>> {
        let mut params = Vec::new();
        self.root.find(path.trim_start_matches('/'), &mut params).map(|value| Match { value, params: Params(params) })
    }
}

/// The result of a successful trie lookup.
pub struct Match<'t, 'p, T> {
    pub value: &'t T,
    pub params: Params<'t, 'p>,
}

/// Captured `:param`/`*wildcard` values, in the order their segments
/// appeared in the pattern. Values are raw slices of the request path — no
/// percent-decoding is performed anywhere in the trie.
#[derive(Debug, Clone)]
pub struct Params<'t, 'p>(Vec<(&'t str, &'p str)>);

impl<'t, 'p> Params<'t, 'p> {
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, key: impl AsRef<str>) -> Option<&'p str> {
        let key = key.as_ref();
        self.0.iter().find(|(name, _)| *name == key).map(|(_, value)| *value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_match() {
        let mut trie = PathTrie::new();
        trie.insert("/hello", 1);
        let m = trie.find("/hello").unwrap();
        assert_eq!(*m.value, 1);
        assert!(m.params.is_empty());
    }

    #[test]
    fn param_capture() {
        let mut trie = PathTrie::new();
        trie.insert("/users/:id", 1);
        let m = trie.find("/users/42").unwrap();
        assert_eq!(*m.value, 1);
        assert_eq!(m.params.get("id"), Some("42"));
    }

    #[test]
    fn wildcard_tail_is_raw_and_unescaped() {
        let mut trie = PathTrie::new();
        trie.insert("/static/*rest", 1);
        let m = trie.find("/static/js/app%20min.js").unwrap();
        assert_eq!(*m.value, 1);
        assert_eq!(m.params.get("rest"), Some("js/app%20min.js"));
    }

    #[test]
    fn literal_beats_param_beats_wildcard() {
        let mut trie = PathTrie::new();
        trie.insert("/a/*rest", "wildcard");
        trie.insert("/a/:id", "param");
        trie.insert("/a/b", "literal");

        assert_eq!(*trie.find("/a/b").unwrap().value, "literal");
        assert_eq!(*trie.find("/a/c").unwrap().value, "param");
        assert_eq!(*trie.find("/a/c/d").unwrap().value, "wildcard");
    }

    #[test]
    fn no_match_is_none_not_panic() {
        let mut trie: PathTrie<u32> = PathTrie::new();
        trie.insert("/a/b", 1);
        assert!(trie.find("/a/x").is_none());
        assert!(trie.find("/completely/different").is_none());
    }

    #[test]
    fn trailing_slash_is_equivalent() {
        let mut trie = PathTrie::new();
        trie.insert("/hello/", 1);
        assert_eq!(*trie.find("/hello").unwrap().value, 1);
    }

    #[test]
    fn reinsert_overwrites() {
        let mut trie = PathTrie::new();
        trie.insert("/a", 1);
        trie.insert("/a", 2);
        assert_eq!(*trie.find("/a").unwrap().value, 2);
    }

    #[test]
    #[should_panic(expected = "wildcard segment")]
    fn wildcard_must_be_last_segment() {
        let mut trie = PathTrie::new();
        trie.insert("/a/*rest/b", 1);
    }
}
