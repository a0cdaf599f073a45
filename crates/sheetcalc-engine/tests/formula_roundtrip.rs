use proptest::prelude::*;
use sheetcalc_engine::Formula;

fn leaf() -> impl Strategy<Value = String> {
    prop_oneof![
        (0u32..100_000).prop_map(|n| n.to_string()),
        (0u32..10_000, 1u32..1000).prop_map(|(i, f)| format!("{i}.{f:03}")),
        (1u32..100, -12i32..12).prop_map(|(m, e)| format!("{m}e{e}")),
        (1u32..100, -12i32..12).prop_map(|(m, e)| format!("{m}.5E{e:+}")),
        ("[a-zA-Z]{1,3}", 0u32..1000).prop_map(|(letters, n)| format!("{letters}{n}")),
    ]
}

fn expression() -> impl Strategy<Value = String> {
    leaf().prop_recursive(6, 48, 2, |inner| {
        prop_oneof![
            (inner.clone(), prop::sample::select(vec!['+', '-', '*', '/']), inner.clone())
                .prop_map(|(l, op, r)| format!("{l} {op} {r}")),
            inner.prop_map(|e| format!("( {e} )")),
        ]
    })
}

fn lookup(name: &str) -> Option<f64> {
    Some(name.len() as f64 + 0.25)
}

proptest! {
    #[test]
    fn canonical_form_round_trips(text in expression()) {
        let formula = Formula::new(&text).unwrap();
        let reparsed = Formula::new(&formula.to_string()).unwrap();
        prop_assert_eq!(&reparsed, &formula);
        prop_assert_eq!(reparsed.to_string(), formula.to_string());
        prop_assert_eq!(reparsed.get_variables(), formula.get_variables());
    }

    #[test]
    fn canonical_form_evaluates_identically(text in expression()) {
        let formula = Formula::new(&text).unwrap();
        let reparsed = Formula::new(&formula.to_string()).unwrap();
        let a = formula.evaluate(lookup);
        let b = reparsed.evaluate(lookup);
        match (a, b) {
            (Ok(x), Ok(y)) => prop_assert!(x.to_bits() == y.to_bits() || (x.is_nan() && y.is_nan())),
            (Err(x), Err(y)) => prop_assert_eq!(x, y),
            (x, y) => prop_assert!(false, "{:?} vs {:?}", x, y),
        }
    }

    #[test]
    fn canonical_form_has_no_whitespace_or_lowercase(text in expression()) {
        let canonical = Formula::new(&text).unwrap().to_string();
        prop_assert!(!canonical.contains(char::is_whitespace));
        prop_assert!(!canonical.chars().any(|c| c.is_ascii_lowercase()));
    }
}
