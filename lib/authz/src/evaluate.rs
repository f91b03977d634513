//! Wildcard permission evaluation.

/// Check whether a granted permission set satisfies a required code.
///
/// Match rules, first hit wins:
///
/// 1. exact membership of `required` in `granted`
/// 2. a granted code of `*` grants everything
/// 3. equal segment count, comparing segment-by-segment with `*`
///    matching any required segment
/// 4. a granted code that is *shorter* than `required` and ends in `*`
///    matches when its non-wildcard prefix equals the same-length
///    prefix of `required`
///
/// A granted code longer than `required` never matches. Comparison is
/// case-sensitive. Deterministic and side-effect-free.
pub fn allows(granted: &[String], required: &str) -> bool {
    if granted.iter().any(|g| g == required) {
        return true;
    }

    let required_parts: Vec<&str> = required.split(':').collect();

    for code in granted {
        if code == "*" {
            return true;
        }

        let granted_parts: Vec<&str> = code.split(':').collect();

        if granted_parts.len() == required_parts.len() {
            let matches = granted_parts
                .iter()
                .zip(&required_parts)
                .all(|(g, r)| *g == "*" || g == r);
            if matches {
                return true;
            }
        }

        if granted_parts.len() < required_parts.len()
            && granted_parts.last() == Some(&"*")
        {
            let prefix_len = granted_parts.len() - 1;
            if granted_parts[..prefix_len] == required_parts[..prefix_len] {
                return true;
            }
        }
    }

    false
}
