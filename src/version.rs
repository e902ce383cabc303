//! Dot-separated numeric version comparison.
//!
//! Versions like `23.01` or `8.10.16` are compared component by component.
//! Missing trailing components count as zero, so `1.2` equals `1.2.0`.
//! A segment that is not a non-negative integer is normalized to `0` rather
//! than rejected.

use std::cmp::Ordering;

/// Parses a version string into its numeric components.
///
/// Segments are trimmed before parsing. Anything that does not parse as a
/// non-negative integer (including empty segments) becomes `0`.
pub fn parse_components(version: &str) -> Vec<u64> {
    version
        .split('.')
        .map(|segment| segment.trim().parse::<u64>().unwrap_or(0))
        .collect()
}

/// Compares two version strings numerically.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let left = parse_components(a);
    let right = parse_components(b);
    let len = left.len().max(right.len());

    for i in 0..len {
        let l = left.get(i).copied().unwrap_or(0);
        let r = right.get(i).copied().unwrap_or(0);
        match l.cmp(&r) {
            Ordering::Equal => continue,
            other => return other,
        }
    }

    Ordering::Equal
}

/// Same as [`compare_versions`] but as `-1`, `0` or `1`.
pub fn compare_versions_sign(a: &str, b: &str) -> i8 {
    match compare_versions(a, b) {
        Ordering::Less => -1,
        Ordering::Equal => 0,
        Ordering::Greater => 1,
    }
}

/// Returns the highest version in `versions`, or `None` if there are none.
///
/// When two entries compare equal (e.g. `1.0` and `1.0.0`) the first one wins.
pub fn max_version<'a, I>(versions: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    versions.into_iter().fold(None, |latest, current| match latest {
        Some(best) if compare_versions(current, best) != Ordering::Greater => Some(best),
        _ => Some(current),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // ─── Parsing Tests ──────────────────────────────────────────────────────

    #[test]
    fn test_parse_components_numeric() {
        assert_eq!(parse_components("23.01"), vec![23, 1]);
        assert_eq!(parse_components("8.10.16"), vec![8, 10, 16]);
        assert_eq!(parse_components("7"), vec![7]);
    }

    #[test]
    fn test_parse_components_malformed_segments_are_zero() {
        assert_eq!(parse_components("1.x.3"), vec![1, 0, 3]);
        assert_eq!(parse_components("beta"), vec![0]);
        assert_eq!(parse_components(""), vec![0]);
        assert_eq!(parse_components("1..2"), vec![1, 0, 2]);
        assert_eq!(parse_components("-1.2"), vec![0, 2]);
    }

    // ─── Comparison Tests ───────────────────────────────────────────────────

    #[test]
    fn test_compare_known_pairs() {
        assert_eq!(compare_versions_sign("23.01", "22.01"), 1);
        assert_eq!(compare_versions_sign("19.00", "21.07"), -1);
        assert_eq!(compare_versions_sign("8.10.16", "8.9.12"), 1);
    }

    #[test]
    fn test_compare_reflexive() {
        for v in ["23.01", "8.10.16", "0", "1.2.3.4", "19.00"] {
            assert_eq!(compare_versions(v, v), Ordering::Equal, "{v}");
        }
    }

    #[test]
    fn test_compare_antisymmetric() {
        let versions = ["23.01", "22.01", "21.07", "19.00", "8.10.16", "8.9.12", "8.8.0"];
        for a in versions {
            for b in versions {
                assert_eq!(
                    compare_versions_sign(a, b),
                    -compare_versions_sign(b, a),
                    "{a} vs {b}"
                );
            }
        }
    }

    #[test]
    fn test_compare_pads_missing_components() {
        assert_eq!(compare_versions("1.2", "1.2.0"), Ordering::Equal);
        assert_eq!(compare_versions("1.2", "1.2.1"), Ordering::Less);
        assert_eq!(compare_versions("2", "1.99.99"), Ordering::Greater);
    }

    #[test]
    fn test_compare_leading_zeros_are_numeric() {
        assert_eq!(compare_versions("23.01", "23.1"), Ordering::Equal);
        assert_eq!(compare_versions("23.010", "23.9"), Ordering::Greater);
    }

    #[test]
    fn test_compare_malformed_treated_as_zero() {
        assert_eq!(compare_versions("1.x", "1.0"), Ordering::Equal);
        assert_eq!(compare_versions("abc", "0.0.1"), Ordering::Less);
    }

    // ─── Max Version Tests ──────────────────────────────────────────────────

    #[test]
    fn test_max_version_order_independent() {
        let expected = Some("23.01");
        assert_eq!(max_version(["23.01", "22.01", "21.07", "19.00"]), expected);
        assert_eq!(max_version(["19.00", "21.07", "22.01", "23.01"]), expected);
        assert_eq!(max_version(["21.07", "23.01", "19.00", "22.01"]), expected);
    }

    #[test]
    fn test_max_version_empty() {
        assert_eq!(max_version(Vec::<&str>::new()), None);
    }

    #[test]
    fn test_max_version_ties_keep_first() {
        assert_eq!(max_version(["1.0", "1.0.0"]), Some("1.0"));
    }
}
