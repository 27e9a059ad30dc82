// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;
use rstest::rstest;

#[rstest]
#[case(None, 0)]
#[case(Some(0), 0)]
#[case(Some(1), 1)]
#[case(Some(130), 130)]
fn test_code_defaults_to_zero(#[case] code: Option<i32>, #[case] expected: i32) {
    let completion = Completion::new("out", "err", code);
    assert_eq!(completion.code, expected);
    assert_eq!(completion.success(), expected == 0);
}

#[test]
fn test_into_parts() {
    let completion = Completion::new("Hello, World!", "", Some(1));
    assert_eq!(
        completion.into_parts(),
        ("Hello, World!".to_string(), String::new(), 1)
    );
}

#[test]
fn test_completion_serialization() {
    let completion = Completion::new("out\n", "warn\n", Some(2));
    let json = serde_json::to_value(&completion).unwrap();

    assert_eq!(json["stdout"], "out\n");
    assert_eq!(json["stderr"], "warn\n");
    assert_eq!(json["code"], 2);
}
