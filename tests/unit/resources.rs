// tests/unit/resources.rs
//! Unit tests for the resource catalogue and API key validation.

use carelist::{ApiKey, Resource};
use pretty_assertions::assert_eq;

#[test]
fn every_resource_parses_from_its_collection_name() {
    for resource in Resource::ALL {
        let parsed: Resource = resource.collection().parse().unwrap();
        assert_eq!(parsed, resource);
    }
}

#[test]
fn parsing_is_case_and_whitespace_tolerant() {
    assert_eq!(" Medicines ".parse::<Resource>().unwrap(), Resource::Medicines);
    assert!("prescriptions".parse::<Resource>().is_err());
}

#[test]
fn api_key_rejects_implausible_values() {
    assert!(ApiKey::new("short").is_err());
    assert!(ApiKey::new("has a space in it").is_err());
    assert!(ApiKey::new("sk-live-0123456789").is_ok());
}
