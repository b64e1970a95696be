//! Unknown-keyword validation (I6), ported from `validate_policy`.

use crate::ast::{Actor, Grid, OEntry, Policy, RawPref};

/// Every individual keyword component referenced by any `o`/`x` entry
/// in the policy that does not appear anywhere in the grid, paired
/// with the actor that referenced it — empty iff I6 holds.
pub fn validate_policy(grid: &Grid, policy: &Policy) -> Vec<(String, Actor)> {
    let known = grid.all_keywords();
    let mut found = Vec::new();
    for (actor, prefs) in &policy.0 {
        for pref in prefs {
            match pref {
                RawPref::O(entries) => {
                    for entry in entries {
                        check(entry.key().components(), &known, actor, &mut found);
                    }
                }
                RawPref::X(keys) => {
                    for key in keys {
                        check(key.components(), &known, actor, &mut found);
                    }
                }
                _ => {}
            }
        }
    }
    found
}

fn check(
    components: &[String],
    known: &std::collections::HashSet<&str>,
    actor: &str,
    found: &mut Vec<(String, Actor)>,
) {
    for c in components {
        if !known.contains(c.as_str()) {
            found.push((c.clone(), actor.to_string()));
        }
    }
}
