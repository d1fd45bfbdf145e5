//! Conflict resolution for sorted documents.
//!
//! Two kinds of key clashes are resolved, in this order:
//!
//! 1. **Duplicate keys.** Of a run of equal keys only the last one (latest
//!    insertion, since sorting is stable) stays visible; the others are
//!    marked [`Value::Ignore`].
//! 2. **Leaf/namespace clashes.** A field `K` next to fields `K.*` cannot be
//!    represented once keys are expanded into objects. The leaf is renamed to
//!    `K.value`, its group is re-sorted and duplicates are resolved again, so
//!    an explicit `K.value` field wins over the renamed one.
//!
//! Fields are never removed, only marked, so the field list keeps its length.
//! Nested objects, including objects inside arrays, are resolved the same way.

use crate::document::{Document, Field};
use crate::value::Value;

const VALUE_SUFFIX: &str = ".value";

impl Document {
    /// Resolve duplicate and leaf/namespace key conflicts.
    ///
    /// The document is sorted first, so calling [`Document::sort`] beforehand
    /// is cheap but not required. Running `dedup` twice yields the same
    /// visible fields as running it once.
    pub fn dedup(&mut self) {
        self.sort();
        mark_duplicates(&mut self.fields);

        let mut i = 0;
        while i < self.fields.len() {
            // A demotion re-sorts the group starting at `i`, so the field now
            // at `i` has not been inspected yet.
            if !demote_shadowed_leaf(&mut self.fields, i) {
                i += 1;
            }
        }

        for field in &mut self.fields {
            field.value.dedup();
        }
    }
}

/// Mark every field followed by a field with the same key as ignored.
fn mark_duplicates(fields: &mut [Field]) {
    for i in 1..fields.len() {
        if fields[i - 1].key == fields[i].key && !fields[i - 1].value.is_ignore() {
            tracing::trace!(key = %fields[i - 1].key, "field superseded by a later duplicate");
            fields[i - 1].value = Value::Ignore;
        }
    }
}

/// If the visible field at `idx` has visible siblings under `key.`, rename it
/// to `key.value` and re-resolve the affected group. Returns whether a rename
/// happened.
fn demote_shadowed_leaf(fields: &mut [Field], idx: usize) -> bool {
    let (head, tail) = fields.split_at(idx + 1);
    let leaf = &head[idx];
    if leaf.value.is_ignore() {
        return false;
    }

    // Everything starting with `key` is contiguous after sorting; `key.*`
    // entries are a sub-range of it.
    let key = leaf.key.as_str();
    let group_len = tail
        .iter()
        .take_while(|f| f.key.starts_with(key))
        .count();
    let shadowed = tail[..group_len]
        .iter()
        .any(|f| !f.value.is_ignore() && is_dotted_child(&f.key, key));
    if !shadowed {
        return false;
    }

    tracing::debug!(key, "leaf field shadowed by a namespace, moving it to `.value`");

    let group = &mut fields[idx..=idx + group_len];
    group[0].key.push_str(VALUE_SUFFIX);
    group.sort_by(|a, b| a.key.cmp(&b.key));
    mark_duplicates(group);
    true
}

/// `child` lives in the namespace `parent.`.
fn is_dotted_child(child: &str, parent: &str) -> bool {
    child.len() > parent.len()
        && child.starts_with(parent)
        && child.as_bytes()[parent.len()] == b'.'
}
