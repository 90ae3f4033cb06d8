use std::collections::BTreeSet;

use crate::attribute::{AttributeKey, Constraint, Element};

use super::Query;

/// Compute the attributes to submit from a set of declared elements.
///
/// Read-only and empty elements are skipped. On duplicate keys the element
/// declared first wins. Constraints are collected during the walk and applied
/// afterwards, so the result does not depend on the order in which
/// conflicting elements are declared. An `OverriddenBy(k)` element that ends
/// up in the result removes `k`. Two present elements that override each
/// other are both removed. Resolution never fails.
pub fn resolve<'a, I>(elements: I) -> Query
where
    I: IntoIterator<Item = &'a dyn Element>,
{
    let mut resolved = Query::new();
    let mut will_unset: BTreeSet<AttributeKey> = BTreeSet::new();
    // (if_present, unset)
    let mut conditional_unset: Vec<(AttributeKey, AttributeKey)> = Vec::new();

    for element in elements {
        if element.is_read_only() {
            continue;
        }
        let Some(value) = element.attr_value() else {
            continue;
        };

        for constraint in element.constraints() {
            match constraint {
                Constraint::Override(other) => {
                    will_unset.insert(*other);
                }
                Constraint::OverriddenBy(other) => {
                    conditional_unset.push((element.key(), *other));
                }
            }
        }

        if !resolved.contains_key(&element.key()) {
            resolved.insert(element.key(), value);
        }
    }

    for (if_present, unset) in conditional_unset {
        if resolved.contains_key(&if_present) {
            will_unset.insert(unset);
        }
    }

    for key in &will_unset {
        resolved.remove(key);
    }

    resolved
}
