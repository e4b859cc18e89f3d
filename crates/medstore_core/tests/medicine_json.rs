use medstore_core::Medicine;
use serde_json::json;

#[test]
fn serializes_lowercase_field_names() {
    let value = serde_json::to_value(Medicine::with_id(4, "aspirin", 10, 2.5)).unwrap();
    assert_eq!(
        value,
        json!({"id": 4, "name": "aspirin", "quantity": 10, "price": 2.5})
    );
}

#[test]
fn accepts_capitalized_field_names() {
    let medicine: Medicine =
        serde_json::from_str(r#"{"ID": 3, "Name": "saline", "Quantity": 7, "Price": 1.5}"#)
            .unwrap();
    assert_eq!(medicine, Medicine::with_id(3, "saline", 7, 1.5));
}

#[test]
fn missing_fields_default_to_zero_values() {
    let medicine: Medicine = serde_json::from_str(r#"{"name": "aspirin"}"#).unwrap();
    assert_eq!(medicine, Medicine::new("aspirin", 0, 0.0));
}

#[test]
fn wrong_field_types_are_rejected() {
    assert!(serde_json::from_str::<Medicine>(r#"{"quantity": "ten"}"#).is_err());
    assert!(serde_json::from_str::<Medicine>(r#"{"name": "aspirin""#).is_err());
}

#[test]
fn trailing_data_and_null_body_are_rejected() {
    assert!(serde_json::from_slice::<Medicine>(br#"{"name": "aspirin"} {"name": "x"}"#).is_err());
    assert!(serde_json::from_slice::<Medicine>(b"null").is_err());
}

#[test]
fn other_casings_are_skipped_as_unknown_fields() {
    let medicine: Medicine =
        serde_json::from_str(r#"{"NAME": "saline", "quantity": 7, "pRiCe": 1.5}"#).unwrap();
    assert_eq!(medicine, Medicine::new("", 7, 0.0));
}
