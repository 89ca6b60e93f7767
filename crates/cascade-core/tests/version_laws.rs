use cascade_core::{TagName, Version};
use proptest::prelude::*;

fn prerelease_identifier() -> impl Strategy<Value = String> {
    prop_oneof![
        (0u64..1000).prop_map(|n| n.to_string()),
        "[a-z][a-z0-9]{0,6}",
    ]
}

fn field() -> impl Strategy<Value = u64> {
    prop_oneof![4 => 0u64..500, 1 => Just(u64::MAX)]
}

fn version_text() -> impl Strategy<Value = String> {
    (
        field(),
        field(),
        field(),
        proptest::option::of(proptest::collection::vec(prerelease_identifier(), 1..4)),
        proptest::option::of("[a-zA-Z0-9]{1,8}"),
        any::<bool>(),
    )
        .prop_map(|(major, minor, patch, pre, build, leading_v)| {
            let mut text = format!("{major}.{minor}.{patch}");
            if let Some(pre) = pre {
                text.push('-');
                text.push_str(&pre.join("."));
            }
            if let Some(build) = build {
                text.push('+');
                text.push_str(&build);
            }
            if leading_v {
                text.insert(0, 'v');
            }
            text
        })
}

proptest! {
    #[test]
    fn parse_is_stable_under_reparse(text in version_text()) {
        let parsed = Version::parse(&text).expect("generated version is valid");
        let reparsed = Version::parse(&parsed.to_string()).expect("canonical form parses");
        prop_assert_eq!(&reparsed, &parsed);
        prop_assert!(!parsed.to_string().starts_with('v'));
    }

    #[test]
    fn bump_patch_only_touches_patch(text in version_text()) {
        let version = Version::parse(&text).expect("generated version is valid");
        let bumped = version.bump_patch();
        prop_assert_eq!(bumped.major(), version.major());
        prop_assert_eq!(bumped.minor(), version.minor());
        prop_assert_eq!(bumped.patch(), version.patch().saturating_add(1));
        prop_assert!(bumped.prerelease().is_none());
        if version.patch() < u64::MAX || version.prerelease().is_some() {
            prop_assert!(bumped > version);
        }
    }

    #[test]
    fn bump_minor_and_major_reset_lower_fields(text in version_text()) {
        let version = Version::parse(&text).expect("generated version is valid");

        let minor = version.bump_minor();
        prop_assert_eq!(minor.major(), version.major());
        prop_assert_eq!(minor.minor(), version.minor().saturating_add(1));
        prop_assert_eq!(minor.patch(), 0);
        prop_assert!(minor.prerelease().is_none());

        let major = version.bump_major();
        prop_assert_eq!(major.major(), version.major().saturating_add(1));
        prop_assert_eq!((major.minor(), major.patch()), (0, 0));
        prop_assert!(major.prerelease().is_none());
    }

    #[test]
    fn ordering_agrees_with_canonical_form(a in version_text(), b in version_text()) {
        let a = Version::parse(&a).expect("generated version is valid");
        let b = Version::parse(&b).expect("generated version is valid");
        let a2 = Version::parse(&a.to_string()).expect("canonical form parses");
        let b2 = Version::parse(&b.to_string()).expect("canonical form parses");
        prop_assert_eq!(a.cmp(&b), a2.cmp(&b2));
    }

    #[test]
    fn tag_names_round_trip(
        text in version_text(),
        component in proptest::option::of("[a-z@/_][a-z0-9_/-]{0,12}"),
    ) {
        let version = Version::parse(&text).expect("generated version is valid");
        let tag = TagName::new(version, component);
        let formatted = tag.to_string();
        let parsed = TagName::parse(&formatted).expect("formatted tag parses");
        prop_assert_eq!(parsed.to_string(), formatted);
        prop_assert_eq!(parsed, tag);
    }
}
