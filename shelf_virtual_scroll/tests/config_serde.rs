// Copyright 2025 the Shelf Virtual Scroll Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host view props deserialized into a scroller configuration.

#![cfg(feature = "serde")]

use shelf_virtual_scroll::{RangeStrategy, ScrollAlign, ScrollerConfig, VisibleRange};

#[test]
fn camel_case_props_fill_missing_fields_from_defaults() {
    let props = r#"{
        "containerHeight": 720.0,
        "overscan": 3,
        "endMessage": null,
        "rangeStrategy": "exact"
    }"#;
    let config: ScrollerConfig<f64> = serde_json::from_str(props).unwrap();
    assert_eq!(config.container_height, 720.0);
    assert_eq!(config.overscan, 3);
    assert_eq!(config.end_message, None);
    assert_eq!(config.range_strategy, RangeStrategy::Exact);
    // Not given, so defaulted.
    assert_eq!(config.estimated_item_height, 50.0);
    assert_eq!(config.load_more_threshold, 200.0);
    assert_eq!(config.retain_margin, None);
}

#[test]
fn value_types_use_camel_case() {
    let json = serde_json::to_value(ScrollerConfig::<f32>::default()).unwrap();
    assert_eq!(json["estimatedItemHeight"], 50.0);
    assert_eq!(json["endMessage"], "No more items");
    assert_eq!(json["rangeStrategy"], "average");

    let align: ScrollAlign = serde_json::from_str("\"nearest\"").unwrap();
    assert_eq!(align, ScrollAlign::Nearest);

    let range: VisibleRange = serde_json::from_str(r#"{"start":5,"end":17}"#).unwrap();
    assert_eq!(range, VisibleRange::new(5, 17));
}

#[test]
fn reversed_range_bounds_are_normalized() {
    let range: VisibleRange = serde_json::from_str(r#"{"start":9,"end":2}"#).unwrap();
    assert_eq!(range, VisibleRange { start: 2, end: 9 });
    assert_eq!(range.item_count(), 8);

    let json = serde_json::to_string(&range).unwrap();
    assert_eq!(json, r#"{"start":2,"end":9}"#);
}
