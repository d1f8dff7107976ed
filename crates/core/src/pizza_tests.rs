// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]

use super::*;
use serde_json::json;
use yare::parameterized;

#[parameterized(
    personal = { "personal", Size::Personal },
    small_upper = { "SMALL", Size::Small },
    medium_mixed = { "Medium", Size::Medium },
    large = { "large", Size::Large },
    extra_large_spaced = { "Extra Large", Size::ExtraLarge },
    extra_large_dashed = { "extra-large", Size::ExtraLarge },
    extra_large_short = { "xl", Size::ExtraLarge },
)]
fn size_from_str_valid(input: &str, expected: Size) {
    assert_eq!(input.parse::<Size>().unwrap(), expected);
}

#[parameterized(
    invalid = { "family" },
    empty = { "" },
)]
fn size_from_str_invalid(input: &str) {
    assert!(matches!(input.parse::<Size>(), Err(Error::InvalidSize(_))));
}

#[test]
fn size_defaults_to_large() {
    assert_eq!(Size::default(), Size::Large);
    assert_eq!(Pizza::new("Plain", "Sam").size, Size::Large);
}

#[test]
fn payload_uses_camel_case_fields() {
    let payload = Pizza::new("Plain", "Sam")
        .with_size(Size::ExtraLarge)
        .with_toppings(["Cheese", "Basil"])
        .to_payload()
        .unwrap();

    assert_eq!(
        payload,
        json!({
            "pizzaName": "Plain",
            "createdBy": "Sam",
            "size": "Extra Large",
            "toppings": ["Cheese", "Basil"],
        })
    );
}

#[test]
fn deserialize_fills_defaults() {
    let pizza: Pizza =
        serde_json::from_value(json!({"pizzaName": "Plain", "createdBy": "Sam"})).unwrap();
    assert_eq!(pizza.size, Size::Large);
    assert!(pizza.toppings.is_empty());
}

#[parameterized(
    empty_name = { "", "Sam", "pizzaName" },
    blank_name = { "   ", "Sam", "pizzaName" },
    empty_author = { "Plain", "", "createdBy" },
)]
fn validate_rejects_missing_fields(name: &str, by: &str, field: &str) {
    let err = Pizza::new(name, by).validate().unwrap_err();
    match err {
        Error::FieldEmpty { field: f } => assert_eq!(f, field),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn validate_rejects_blank_topping() {
    let pizza = Pizza::new("Plain", "Sam").with_toppings(["Cheese", " "]);
    assert!(matches!(
        pizza.validate(),
        Err(Error::FieldEmpty { field: "topping" })
    ));
}

#[test]
fn validate_accepts_complete_pizza() {
    Pizza::new("Plain", "Sam")
        .with_toppings(["Cheese"])
        .validate()
        .unwrap();
}
