//! Matching a user-typed target against the labels `gn ls` prints.

/// Splits `dir:name`; a target without ':' is a bare name
pub fn split_target(target: &str) -> (&str, &str) {
    target.rsplit_once(':').unwrap_or(("", target))
}

/// Label with any `(//toolchain:name)` suffix removed
fn strip_toolchain(label: &str) -> &str {
    match label.find('(') {
        Some(idx) if label.ends_with(')') => &label[..idx],
        _ => label,
    }
}

/// First label in `listing` (one per line) whose name equals the target's
/// name and, when the target names a directory, whose directory matches too
pub fn find_label<'a>(listing: &'a str, target: &str) -> Option<&'a str> {
    let (want_dir, want_name) = split_target(target);

    listing.lines().map(str::trim).find(|label| {
        let Some((dir, name)) = strip_toolchain(label).split_once(':') else {
            return false;
        };
        name == want_name && (want_dir.is_empty() || dir == want_dir)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = "\
//base:base
//src:app
//src:app_unittests
//tools/gen:app
//third_party/zlib:zlib(//build/toolchain:host)
";

    #[test]
    fn test_split_target() {
        assert_eq!(split_target("//src:app"), ("//src", "app"));
        assert_eq!(split_target("app"), ("", "app"));
    }

    #[test]
    fn test_bare_name_takes_first_match() {
        assert_eq!(find_label(LISTING, "app"), Some("//src:app"));
        assert_eq!(find_label(LISTING, "base"), Some("//base:base"));
    }

    #[test]
    fn test_dir_narrows_the_match() {
        assert_eq!(find_label(LISTING, "//tools/gen:app"), Some("//tools/gen:app"));
        assert_eq!(find_label(LISTING, "//base:app"), None);
    }

    #[test]
    fn test_toolchain_suffix_is_ignored_for_matching() {
        assert_eq!(
            find_label(LISTING, "zlib"),
            Some("//third_party/zlib:zlib(//build/toolchain:host)")
        );
    }

    #[test]
    fn test_unknown_and_malformed() {
        assert_eq!(find_label(LISTING, "missing"), None);
        assert_eq!(find_label("not a label\n\n", "label"), None);
    }
}
