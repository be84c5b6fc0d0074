use indexmap::IndexMap;

use crate::section::Section;

/// Parents each section has declared but not yet received keys from.
///
/// A parent that is never declared stays here for good; that is not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pending {
    table: IndexMap<String, Vec<String>>,
}

impl Pending {
    pub(crate) fn declare(&mut self, child: &str, parents: Vec<String>) {
        if let Some(existing) = self.table.get_mut(child) {
            existing.extend(parents);
        } else {
            self.table.insert(child.to_owned(), parents);
        }
    }

    /// Parents of `child` still waiting to be merged, in declared order.
    #[must_use]
    pub fn get(&self, child: &str) -> &[String] {
        self.table.get(child).map_or(&[], Vec::as_slice)
    }

    /// Every child that still has at least one pending parent.
    pub fn unresolved(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.table
            .iter()
            .filter(|(_, parents)| !parents.is_empty())
            .map(|(child, parents)| (child.as_str(), parents.as_slice()))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.unresolved().next().is_none()
    }

    fn remove_one(&mut self, child: &str, parent: &str) {
        if let Some(parents) = self.table.get_mut(child) {
            if let Some(i) = parents.iter().position(|p| p == parent) {
                parents.remove(i);
            }
        }
    }
}

/// Merge every pending parent that now exists into its child.
///
/// Children are visited once each, in the order they were first declared, and
/// take a parent's keys as they are at that moment. Parents are applied in
/// declared order and never overwrite a key the child already has, so the
/// earliest parent wins. Returns the number of parent links merged; running it
/// again without new sections merges nothing.
pub(crate) fn resolve(sections: &mut IndexMap<String, Section>, pending: &mut Pending) -> usize {
    let children = pending
        .unresolved()
        .map(|(child, _)| child.to_owned())
        .collect::<Vec<String>>();

    let mut merged = 0;

    for child in &children {
        // Iterate a snapshot; the real list shrinks as parents are merged.
        let parents = pending.get(child).to_vec();

        for parent in &parents {
            let Some(source) = sections.get(parent.as_str()).cloned() else {
                log::trace!("[{child}] is still waiting for [{parent}]");
                continue;
            };
            let Some(target) = sections.get_mut(child.as_str()) else {
                continue;
            };

            let copied = target.inherit(&source);
            log::debug!("[{child}] inherited {copied} keys from [{parent}]");

            pending.remove_one(child, parent);
            merged += 1;
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::value::Value;

    fn store(sections: &[(&str, &[(&str, &str)])]) -> IndexMap<String, Section> {
        sections
            .iter()
            .map(|&(name, pairs)| {
                let mut section = Section::new(name.to_owned());
                for &(key, value) in pairs {
                    section.assign(key.to_owned(), Value::from(value));
                }
                (name.to_owned(), section)
            })
            .collect()
    }

    fn parents(names: &[&str]) -> Vec<String> {
        names.iter().map(|&n| n.to_owned()).collect()
    }

    #[test]
    fn child_values_win() {
        let mut sections = store(&[
            ("bar", &[("data", "some"), ("bar_data", "bar data")]),
            ("baz", &[("data", "different")]),
        ]);
        let mut pending = Pending::default();
        pending.declare("baz", parents(&["bar"]));

        assert_eq!(resolve(&mut sections, &mut pending), 1);
        assert_eq!(sections["baz"]["data"], Value::from("different"));
        assert_eq!(sections["baz"]["bar_data"], Value::from("bar data"));
        assert!(pending.is_empty());
    }

    #[test]
    fn earlier_parent_takes_precedence() {
        let mut sections = store(&[
            ("a", &[("k", "from a"), ("only_a", "1")]),
            ("b", &[("k", "from b"), ("only_b", "2")]),
            ("c", &[]),
        ]);
        let mut pending = Pending::default();
        pending.declare("c", parents(&["a", "b"]));

        resolve(&mut sections, &mut pending);

        let c = &sections["c"];
        assert_eq!(c["k"], Value::from("from a"));
        assert_eq!(c.keys().collect::<Vec<_>>(), vec!["k", "only_a", "only_b"]);
    }

    #[test]
    fn missing_parent_stays_pending() {
        let mut sections = store(&[("bar", &[("x", "1")]), ("quux", &[])]);
        let mut pending = Pending::default();
        pending.declare("quux", parents(&["something_else", "bar"]));

        assert_eq!(resolve(&mut sections, &mut pending), 1);
        assert_eq!(pending.get("quux"), ["something_else".to_owned()]);
        assert_eq!(sections["quux"]["x"], Value::from("1"));
        assert_eq!(
            pending.unresolved().collect::<Vec<_>>(),
            vec![("quux", &["something_else".to_owned()][..])]
        );
    }

    #[test]
    fn resolving_twice_changes_nothing() {
        let mut sections = store(&[("bar", &[("x", "1")]), ("baz", &[]), ("quux", &[])]);
        let mut pending = Pending::default();
        pending.declare("baz", parents(&["bar"]));
        pending.declare("quux", parents(&["nowhere"]));

        resolve(&mut sections, &mut pending);
        let (sections_before, pending_before) = (sections.clone(), pending.clone());

        assert_eq!(resolve(&mut sections, &mut pending), 0);
        assert_eq!(sections, sections_before);
        assert_eq!(pending, pending_before);
    }

    #[test]
    fn parents_are_copied_as_they_are_when_visited() {
        let mut sections = store(&[("a", &[]), ("b", &[("y", "2")]), ("c", &[("x", "1")])]);
        let mut pending = Pending::default();
        pending.declare("a", parents(&["b"]));
        pending.declare("b", parents(&["c"]));

        assert_eq!(resolve(&mut sections, &mut pending), 2);
        assert_eq!(sections["a"]["y"], Value::from("2"));
        assert_eq!(sections["a"].get("x"), None);
        assert_eq!(sections["b"]["x"], Value::from("1"));

        // a's link to b is gone, so a later pass does not bring x over either.
        assert_eq!(resolve(&mut sections, &mut pending), 0);
        assert_eq!(sections["a"].get("x"), None);
    }

    #[test]
    fn chain_declared_parent_first_reaches_the_end() {
        let mut sections = store(&[("a", &[]), ("b", &[("y", "2")]), ("c", &[("x", "1")])]);
        let mut pending = Pending::default();
        pending.declare("b", parents(&["c"]));
        pending.declare("a", parents(&["b"]));

        resolve(&mut sections, &mut pending);

        assert_eq!(sections["a"]["x"], Value::from("1"));
        assert_eq!(sections["a"]["y"], Value::from("2"));
    }

    #[test]
    fn mutual_parents_copy_both_ways() {
        let mut sections = store(&[("a", &[("x", "1")]), ("b", &[("y", "2")])]);
        let mut pending = Pending::default();
        pending.declare("a", parents(&["b"]));
        pending.declare("b", parents(&["a"]));

        resolve(&mut sections, &mut pending);

        assert!(pending.is_empty());
        assert_eq!(sections["a"]["y"], Value::from("2"));
        assert_eq!(sections["b"]["x"], Value::from("1"));
    }

    #[test]
    fn declare_appends() {
        let mut pending = Pending::default();
        pending.declare("a", parents(&["b"]));
        pending.declare("a", parents(&["c"]));
        pending.declare("d", vec![]);

        assert_eq!(pending.get("a"), parents(&["b", "c"]).as_slice());
        assert!(pending.get("d").is_empty());
        assert!(pending.get("never declared").is_empty());
    }
}
