//! Integration property tests for filter-input.
//!
//! These tests validate cross-module invariants using property-based
//! testing.

use filter_input::web::{ExtractTaintedInputs, RequestAdapter};
use filter_input::{
    is_valid_email, normalize_float, FilterInput, FilterValue, FloatSanitizer, HtmlSanitizer,
    InputSource, IntegerSanitizer, IpRanges, Sanitizer, Sentinel, StringSanitizer, Tainted,
    ValueKind,
};
use proptest::prelude::*;

// Strategy: Generate an arbitrary value kind
fn arb_kind() -> impl Strategy<Value = ValueKind> {
    prop_oneof![
        Just(ValueKind::Raw),
        any::<bool>().prop_map(|encode_high| ValueKind::String { encode_high }),
        Just(ValueKind::UrlEncoded),
        Just(ValueKind::SlashEscaped),
        Just(ValueKind::Html),
        Just(ValueKind::Float),
        Just(ValueKind::Integer),
        Just(ValueKind::Email),
        any::<bool>().prop_map(|add_scheme| ValueKind::Url { add_scheme }),
        Just(ValueKind::Ip(IpRanges::any().without_private())),
    ]
}

// Strategy: Generate an arbitrary concrete source
fn arb_source() -> impl Strategy<Value = InputSource> {
    prop::sample::select(InputSource::ALL.to_vec())
}

proptest! {
    /// Property: Filtering never panics and is deterministic
    #[test]
    fn proptest_filter_is_deterministic(
        source in arb_source(),
        kind in arb_kind(),
        value in any::<String>(),
    ) {
        let mut adapter = RequestAdapter::new("req-prop".to_string());
        adapter.add_query_param("v".to_string(), value.clone());
        adapter.add_form_field("v".to_string(), value.clone());
        adapter.add_cookie("v".to_string(), value.clone());
        adapter.add_server_var("v".to_string(), value.clone());
        adapter.add_env_var("v".to_string(), value);
        let input = FilterInput::from_request(&adapter);

        let first = input.filter_sentinel(source, "v", &kind);
        let second = input.filter_sentinel(source, "v", &kind);
        prop_assert_eq!(first, second);
    }

    /// Property: Present input never produces an absence sentinel
    #[test]
    fn proptest_present_input_is_never_absent(
        source in arb_source(),
        kind in arb_kind(),
        value in "[ -~]{0,40}",
    ) {
        let mut adapter = RequestAdapter::new("req-prop".to_string());
        adapter.add_query_param("v".to_string(), value.clone());
        adapter.add_form_field("v".to_string(), value.clone());
        adapter.add_cookie("v".to_string(), value.clone());
        adapter.add_server_var("v".to_string(), value.clone());
        adapter.add_env_var("v".to_string(), value);
        let input = FilterInput::new(adapter.extract_tainted_inputs());

        let sentinel = input.filter_sentinel(source, "v", &kind);
        prop_assert!(sentinel != Sentinel::Null);
        prop_assert!(!input.filter(source, "v", &kind).is_absent());
    }

    /// Property: Merged lookup returns the form value whenever it is usable
    #[test]
    fn proptest_request_prefers_usable_form_value(
        form in "[a-z]{1,12}",
        query in "[a-z]{1,12}",
    ) {
        let mut adapter = RequestAdapter::new("req-prop".to_string());
        adapter.add_form_field("k".to_string(), form.clone());
        adapter.add_query_param("k".to_string(), query);
        let input = FilterInput::from_request(&adapter);

        prop_assert_eq!(
            input.filter_sentinel(InputSource::Request, "k", &ValueKind::Raw),
            Sentinel::Value(FilterValue::Text(form))
        );
    }

    /// Property: Plain-string output never contains control characters
    #[test]
    fn proptest_string_output_has_no_control_chars(
        value in any::<String>(),
        encode_high in any::<bool>(),
    ) {
        let sanitizer = if encode_high {
            StringSanitizer::encoding_high()
        } else {
            StringSanitizer::new()
        };
        let out = sanitizer.sanitize(Tainted::new(value)).unwrap().into_inner();
        prop_assert!(out.chars().all(|c| c as u32 >= 32));
        if encode_high {
            prop_assert!(out.is_ascii());
        }
    }

    /// Property: HTML output never contains raw markup characters
    #[test]
    fn proptest_html_output_has_no_markup(value in any::<String>()) {
        let out = HtmlSanitizer.sanitize(Tainted::new(value)).unwrap().into_inner();
        prop_assert!(!out.contains('<'));
        prop_assert!(!out.contains('>'));
        prop_assert!(!out.contains('"'));
        prop_assert!(!out.contains('\''));
    }

    /// Property: Plain decimal integers survive unchanged
    #[test]
    fn proptest_decimal_integers_round_trip(n in (1i64..=i64::MAX)) {
        let negated = -n;
        for value in [n, negated] {
            let parsed = IntegerSanitizer
                .sanitize(Tainted::new(value.to_string()))
                .unwrap()
                .into_inner();
            prop_assert_eq!(parsed, value);
        }
    }

    /// Property: Grouped thousands with either separator style parse the same
    #[test]
    fn proptest_float_separator_styles_agree(
        whole in 1_000u32..1_000_000,
        cents in 0u32..100,
    ) {
        let thousands = whole / 1000;
        let rest = whole % 1000;
        let english = format!("{},{:03}.{:02}", thousands, rest, cents);
        let german = format!("{}.{:03},{:02}", thousands, rest, cents);

        let a = FloatSanitizer.sanitize(Tainted::new(english)).unwrap().into_inner();
        let b = FloatSanitizer.sanitize(Tainted::new(german)).unwrap().into_inner();
        prop_assert_eq!(a, b);
        prop_assert_eq!(normalize_float(&format!("{}.{:02}", whole, cents)), format!("{}.{:02}", whole, cents));
    }

    /// Property: Rejection errors never echo the input
    #[test]
    fn proptest_errors_do_not_leak_input(secret in "[A-Z]{12,24}") {
        let err = IntegerSanitizer
            .sanitize(Tainted::new(secret.clone()))
            .unwrap_err();
        prop_assert!(!err.to_string().contains(&secret));
    }

    /// Property: Single-label domains never validate
    #[test]
    fn proptest_single_label_domains_rejected(
        local in "[a-z]{1,20}",
        host in "[a-z]{1,20}",
    ) {
        let single = format!("{}@{}", local, host);
        let dotted = format!("{}@{}.example", local, host);
        prop_assert!(!is_valid_email(&single));
        prop_assert!(is_valid_email(&dotted));
    }
}
