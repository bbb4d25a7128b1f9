//! Response assertions for conformance tests
//!
//! Negative tests expect a specific rejection; these helpers turn the
//! client's `UnexpectedStatus` into readable assertion failures.

use std::fmt::Debug;

use serde_json::Value;

use manila_conformance::{ClientError, Resource};

/// Assert that a call was rejected with `expected`
pub fn assert_status<T: Debug>(result: Result<T, ClientError>, expected: u16) {
    assert_status_in(result, &[expected]);
}

/// Assert that a call was rejected with one of `expected`
pub fn assert_status_in<T: Debug>(result: Result<T, ClientError>, expected: &[u16]) {
    match result {
        Ok(value) => panic!("Expected HTTP {:?}, but the call succeeded: {:?}", expected, value),
        Err(e) => {
            let status = e.status();
            assert!(
                status.is_some_and(|s| expected.contains(&s)),
                "Expected HTTP {:?}, got {:?}: {}",
                expected,
                status,
                e
            );
        }
    }
}

pub fn assert_forbidden<T: Debug>(result: Result<T, ClientError>) {
    assert_status(result, 403);
}

pub fn assert_not_found<T: Debug>(result: Result<T, ClientError>) {
    assert_status(result, 404);
}

pub fn assert_bad_request<T: Debug>(result: Result<T, ClientError>) {
    assert_status(result, 400);
}

/// Assert that a listing includes the resource with `id`
pub fn assert_listed(resources: &[Resource], id: &str) {
    assert!(
        resources.iter().any(|r| r.id().ok() == Some(id)),
        "Expected {} in listing of {} resources",
        id,
        resources.len()
    );
}

/// Assert that a listing does not include `id`
pub fn assert_not_listed(resources: &[Resource], id: &str) {
    assert!(
        !resources.iter().any(|r| r.id().ok() == Some(id)),
        "Did not expect {} in listing",
        id
    );
}

/// Assert a string field's value
pub fn assert_field(resource: &Resource, field: &str, expected: &str) {
    assert_eq!(
        resource.str_field(field),
        Some(expected),
        "Field {} mismatch on {:?}",
        field,
        resource.id().ok()
    );
}

/// Assert that a JSON object carries every key
pub fn assert_has_keys(value: &Value, keys: &[&str]) {
    let object = value
        .as_object()
        .unwrap_or_else(|| panic!("Expected a JSON object, got {}", value));
    let missing: Vec<&str> = keys.iter().copied().filter(|k| !object.contains_key(*k)).collect();
    assert!(missing.is_empty(), "Missing keys {:?} in {}", missing, value);
}
