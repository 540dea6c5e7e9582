use super::*;

#[test]
fn set_replaces_in_place_and_keeps_order() {
    let mut a = Attrs::new();
    a.set("x", 10.0);
    a.set("fill", "red");
    a.set("x", 20.0);
    let keys: Vec<&str> = a.iter().map(|(k, _)| k).collect();
    assert_eq!(keys, ["x", "fill"]);
    assert_eq!(a.num("x"), Some(20.0));
}

#[test]
fn lenient_numeric_reads() {
    let a: Attrs = [("w", AttrValue::from("26px")), ("h", AttrValue::from(true))]
        .into_iter()
        .collect();
    assert_eq!(a.num("w"), Some(26.0));
    assert_eq!(a.num("h"), None);
    assert_eq!(a.num_or("missing", 4.0), 4.0);
    assert_eq!(a.str("w"), Some("26px"));
}

#[test]
fn deserialize_preserves_authoring_order_and_drops_nulls() {
    let a: Attrs =
        serde_json::from_str(r#"{"z": 1, "a": "b", "gone": null, "m": false}"#).unwrap();
    let keys: Vec<&str> = a.iter().map(|(k, _)| k).collect();
    assert_eq!(keys, ["z", "a", "m"]);
    assert_eq!(a.get("m"), Some(&AttrValue::Bool(false)));
}

#[test]
fn integral_numbers_serialize_without_fraction() {
    let a: Attrs = [("x", 400.0), ("o", 0.76)].into_iter().collect();
    assert_eq!(serde_json::to_string(&a).unwrap(), r#"{"x":400,"o":0.76}"#);
}

#[test]
fn display_uses_shortest_numbers() {
    assert_eq!(AttrValue::Num(12.0).to_string(), "12");
    assert_eq!(AttrValue::Num(0.5).to_string(), "0.5");
    assert_eq!(AttrValue::Bool(true).to_string(), "true");
}

#[test]
fn remove_returns_value() {
    let mut a: Attrs = [("x", 1.0)].into_iter().collect();
    assert_eq!(a.remove("x"), Some(AttrValue::Num(1.0)));
    assert!(a.is_empty());
    assert_eq!(a.remove("x"), None);
}
