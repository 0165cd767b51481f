//! Version comparison.
//!
//! Versions are dot-separated numeric components compared by position.
//! There is no pre-release or build-metadata handling.

/// Current version of freshen itself.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Compare versions to check whether `remote` is newer than `local`.
///
/// Walks `remote`'s components in order. The first position where the two
/// differ decides the result. A component `local` lacks counts as `0`, and a
/// position where either side has no leading digits never decides.
pub fn is_update_needed(local: &str, remote: &str) -> bool {
    let local_parts: Vec<_> = local.split('.').map(parse_component).collect();

    for (i, remote_part) in remote.split('.').map(parse_component).enumerate() {
        let local_part = local_parts.get(i).copied().unwrap_or(Some(ZERO));

        let (Some(r), Some(l)) = (remote_part, local_part) else {
            continue;
        };

        if r > l {
            return true;
        }
        if r < l {
            return false;
        }
    }

    false
}

/// Numeric component held as its digits, so values of any length compare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Component<'a>(&'a str);

const ZERO: Component<'static> = Component("");

impl Ord for Component<'_> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0
            .len()
            .cmp(&other.0.len())
            .then_with(|| self.0.cmp(other.0))
    }
}

impl PartialOrd for Component<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Take the leading digits of a component (`"3-beta"` → 3).
///
/// Leading zeros are dropped; zero itself is the empty digit string.
fn parse_component(part: &str) -> Option<Component<'_>> {
    let trimmed = part.trim_start();
    let end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    if end == 0 {
        return None;
    }
    Some(Component(trimmed[..end].trim_start_matches('0')))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_constant_exists() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn newer_minor_needs_update() {
        assert!(is_update_needed("2.10.0", "2.11.0"));
        assert!(is_update_needed("3.1.0", "3.2.0"));
    }

    #[test]
    fn newer_major_and_patch_need_update() {
        assert!(is_update_needed("1.9.9", "2.0.0"));
        assert!(is_update_needed("1.0.4", "1.0.5"));
        assert!(is_update_needed("9.99.99", "10.0.0"));
    }

    #[test]
    fn identical_versions_do_not_need_update() {
        assert!(!is_update_needed("2.10.0", "2.10.0"));
        assert!(!is_update_needed("0.0.1", "0.0.1"));
    }

    #[test]
    fn older_remote_does_not_need_update() {
        assert!(!is_update_needed("2.10.0", "2.9.9"));
        assert!(!is_update_needed("2.0.0", "1.9.9"));
    }

    #[test]
    fn numeric_not_lexicographic() {
        // "10" > "9" numerically even though "1" < "9" as text
        assert!(is_update_needed("2.9", "2.10"));
        assert!(!is_update_needed("2.10", "2.9"));
    }

    #[test]
    fn longer_remote_treats_missing_local_component_as_zero() {
        assert!(is_update_needed("2.10.0", "2.10.0.1"));
        assert!(!is_update_needed("2.10.0", "2.10.0.0"));
        assert!(is_update_needed("2", "2.1"));
    }

    #[test]
    fn shorter_remote_with_equal_prefix_does_not_need_update() {
        assert!(!is_update_needed("2.10.1", "2.10"));
        assert!(!is_update_needed("2.10.0", "2"));
    }

    #[test]
    fn leading_digits_are_used() {
        assert!(is_update_needed("1.0.0-beta.1", "1.0.1"));
        assert!(!is_update_needed("1.0.0", "1.0.0-beta"));
    }

    #[test]
    fn unparseable_components_are_skipped() {
        assert!(!is_update_needed("1.0.0", "abc"));
        assert!(is_update_needed("1.x.0", "1.y.1"));
    }

    #[test]
    fn empty_local_is_unparseable_first_component() {
        // "" splits into one unparseable component; the rest count as 0
        assert!(is_update_needed("", "0.1.0"));
        assert!(!is_update_needed("", "0.0.0"));
    }

    #[test]
    fn parse_component_cases() {
        assert_eq!(parse_component("12"), Some(Component("12")));
        assert_eq!(parse_component("3-rc"), Some(Component("3")));
        assert_eq!(parse_component(" 7"), Some(Component("7")));
        assert_eq!(parse_component("007"), Some(Component("7")));
        assert_eq!(parse_component("0"), Some(ZERO));
        assert_eq!(parse_component("rc"), None);
        assert_eq!(parse_component(""), None);
    }

    #[test]
    fn components_beyond_u64_still_compare() {
        assert!(is_update_needed("1.0.0", "99999999999999999999.0"));
        assert!(!is_update_needed("99999999999999999999.0", "1.0.0"));
        assert!(is_update_needed(
            "1.18446744073709551616",
            "1.18446744073709551617"
        ));
    }

    #[test]
    fn leading_zeros_do_not_change_value() {
        assert!(!is_update_needed("1.02.0", "1.2.0"));
        assert!(is_update_needed("1.0", "1.00.1"));
    }
}
