use std::collections::BTreeMap;

use htmlfaker_core::{
    BlockKind, ColumnType, Configuration, Error, InlineKind, PartialConfiguration,
    PartialImageOptions, PartialLeadOptions,
};

#[test]
fn empty_overrides_resolve_to_defaults() {
    let resolved = Configuration::resolve(&PartialConfiguration::default()).expect("resolve");
    assert_eq!(resolved, Configuration::default());
    assert_eq!(resolved.paragraphs, 3);
    assert_eq!(resolved.paragraph_length, 6);
    assert_eq!(resolved.table_row_count, 25);
    assert_eq!(resolved.heading_level, 1);
    assert_eq!(resolved.inline_element_weights.get(InlineKind::Strong), Some(1.0));
    assert_eq!(resolved.inline_element_weights.get(InlineKind::Code), Some(0.1));
}

#[test]
fn weight_maps_merge_key_by_key() {
    let overrides = PartialConfiguration {
        inline_element_weights: BTreeMap::from([("code".to_string(), 3.0)]),
        block_element_weights: BTreeMap::from([("p".to_string(), 2.0)]),
        ..PartialConfiguration::default()
    };
    let resolved = Configuration::resolve(&overrides).expect("resolve");

    assert_eq!(resolved.inline_element_weights.get(InlineKind::Code), Some(3.0));
    assert_eq!(resolved.inline_element_weights.get(InlineKind::Em), Some(1.0));
    assert_eq!(resolved.block_element_weights.get(BlockKind::Ul), Some(1.0));
    let last = resolved.block_element_weights.entries().last().copied();
    assert_eq!(last, Some((BlockKind::P, 2.0)), "new keys are appended");
}

#[test]
fn unknown_keys_are_rejected() {
    let overrides = PartialConfiguration {
        inline_element_weights: BTreeMap::from([("blink".to_string(), 1.0)]),
        ..PartialConfiguration::default()
    };
    assert_eq!(
        Configuration::resolve(&overrides),
        Err(Error::UnknownElementKind("blink".to_string()))
    );

    let overrides = PartialConfiguration {
        type_classes: BTreeMap::from([("date".to_string(), "muted".to_string())]),
        ..PartialConfiguration::default()
    };
    assert_eq!(
        Configuration::resolve(&overrides),
        Err(Error::UnknownColumnType("date".to_string()))
    );
}

#[test]
fn probabilities_and_levels_are_clamped() {
    let overrides = PartialConfiguration {
        heading_probability: Some(4.0),
        block_element_probability: Some(-1.0),
        paragraph_length_variation: Some(3.0),
        heading_level: Some(9),
        heading_level_max: Some(4),
        ..PartialConfiguration::default()
    };
    let resolved = Configuration::resolve(&overrides).expect("resolve");
    assert_eq!(resolved.heading_probability, 1.0);
    assert_eq!(resolved.block_element_probability, 0.0);
    assert_eq!(resolved.paragraph_length_variation, 1.0);
    assert_eq!(resolved.heading_level_max, 4);
    assert_eq!(resolved.heading_level, 4);
}

#[test]
fn non_finite_and_negative_numbers_are_invalid() {
    let overrides = PartialConfiguration {
        inline_element_probability: Some(f64::NAN),
        ..PartialConfiguration::default()
    };
    assert!(matches!(
        Configuration::resolve(&overrides),
        Err(Error::InvalidConfig(_))
    ));

    let overrides = PartialConfiguration {
        block_element_weights: BTreeMap::from([("ul".to_string(), -0.5)]),
        ..PartialConfiguration::default()
    };
    assert!(matches!(
        Configuration::resolve(&overrides),
        Err(Error::InvalidConfig(_))
    ));

    let overrides = PartialConfiguration {
        image: Some(PartialImageOptions {
            size_min: Some(500.0),
            size_max: Some(100.0),
            ..PartialImageOptions::default()
        }),
        ..PartialConfiguration::default()
    };
    assert!(matches!(
        Configuration::resolve(&overrides),
        Err(Error::InvalidConfig(_))
    ));
}

#[test]
fn toggles_remove_kinds_and_disable_empty_branches() {
    let overrides = PartialConfiguration {
        headings: Some(false),
        links: Some(false),
        unordered_lists: Some(false),
        ordered_lists: Some(false),
        blockquotes: Some(false),
        tables: Some(false),
        figures: Some(false),
        images: Some(false),
        rules: Some(false),
        pre: Some(false),
        ..PartialConfiguration::default()
    };
    let resolved = Configuration::resolve(&overrides).expect("resolve");

    assert_eq!(resolved.heading_probability, 0.0);
    assert_eq!(resolved.inline_element_weights.get(InlineKind::A), None);
    assert!(resolved.block_element_weights.is_empty());
    assert_eq!(resolved.block_element_probability, 0.0);
    assert!(resolved.inline_element_probability > 0.0);
}

#[test]
fn class_lookup_prefers_most_specific_path() {
    let overrides = PartialConfiguration {
        element_classes: BTreeMap::from([
            ("li".to_string(), "item".to_string()),
            ("ol > li".to_string(), "step".to_string()),
            ("p".to_string(), String::new()),
        ]),
        ..PartialConfiguration::default()
    };
    let resolved = Configuration::resolve(&overrides).expect("resolve");

    assert_eq!(resolved.class_for(&["ol", "li"]), Some("step"));
    assert_eq!(resolved.class_for(&["ul", "li"]), Some("item"));
    assert_eq!(resolved.class_for(&["p"]), None);
    assert_eq!(resolved.type_class(ColumnType::Currency), Some("numeric"));
    assert_eq!(resolved.type_class(ColumnType::Text), None);
}

#[test]
fn partial_merge_overlays_nested_options() {
    let mut base = PartialConfiguration {
        paragraphs: Some(5),
        lead: Some(PartialLeadOptions {
            paragraphs: Some(1),
            class: Some("intro".to_string()),
            ..PartialLeadOptions::default()
        }),
        ..PartialConfiguration::default()
    };
    let flags = PartialConfiguration {
        lead: Some(PartialLeadOptions {
            paragraphs: Some(2),
            ..PartialLeadOptions::default()
        }),
        ..PartialConfiguration::default()
    };
    base.merge(&flags);

    assert_eq!(base.paragraphs, Some(5));
    let lead = base.lead.expect("lead options");
    assert_eq!(lead.paragraphs, Some(2));
    assert_eq!(lead.class.as_deref(), Some("intro"));
}

#[test]
fn partial_configuration_loads_from_toml() {
    let source = r#"
paragraphs = 2
heading_probability = 0.5

[inline_element_weights]
code = 0.0

[element_classes]
"ul > li" = "bullet"

[image]
aspect_ratios = [1.0]
"#;
    let partial: PartialConfiguration = toml::from_str(source).expect("parse toml");
    let resolved = Configuration::resolve(&partial).expect("resolve");

    assert_eq!(resolved.paragraphs, 2);
    assert_eq!(resolved.heading_probability, 0.5);
    assert_eq!(resolved.inline_element_weights.get(InlineKind::Code), Some(0.0));
    assert_eq!(resolved.class_for(&["ul", "li"]), Some("bullet"));
    assert_eq!(resolved.image.aspect_ratios, vec![1.0]);
}

#[test]
fn exported_defaults_resolve_back_to_defaults() {
    let defaults = Configuration::default();
    let resolved = Configuration::resolve(&defaults.to_partial()).expect("resolve");
    assert_eq!(resolved, defaults);
}
