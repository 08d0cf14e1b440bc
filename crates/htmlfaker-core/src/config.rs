//! Generation parameters: caller overrides and the resolved configuration.
//!
//! Overrides arrive as a [`PartialConfiguration`] (usually deserialized from a
//! TOML or JSON file). [`Configuration::resolve`] merges them over the
//! documented defaults; weight and class maps merge key by key.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::elements::{BlockKind, ColumnType, InlineKind};
use crate::error::{Error, Result};
use crate::probability;
use crate::weights::WeightTable;

pub const HEADING_LEVEL_MIN: u8 = 1;
pub const HEADING_LEVEL_MAX: u8 = 6;
/// Height/width ratio used when no aspect ratio candidates are configured.
pub const DEFAULT_ASPECT_RATIO: f64 = 0.75;

/// Caller overrides for lead paragraphs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PartialLeadOptions {
    /// Number of lead paragraphs emitted before the body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paragraphs: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paragraphs_variation: Option<f64>,
    /// Sentences per lead paragraph.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paragraph_length: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paragraph_length_variation: Option<f64>,
    /// CSS class carried by lead paragraphs instead of the `p` class.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
}

/// Caller overrides for generated images.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PartialImageOptions {
    /// Candidate height/width ratios.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aspect_ratios: Option<Vec<f64>>,
    /// Lower bound of the base width in pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_min: Option<f64>,
    /// Upper bound of the base width in pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_variation: Option<f64>,
    /// Image source template; `{width}` and `{height}` are substituted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url_template: Option<String>,
}

/// Caller overrides merged over [`Configuration::default`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PartialConfiguration {
    /// Number of body units (paragraphs or block elements).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paragraphs: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paragraphs_variation: Option<f64>,
    /// Sentences per paragraph.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paragraph_length: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paragraph_length_variation: Option<f64>,
    /// Items per list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_length: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_length_variation: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_column_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_column_count_variation: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_row_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_row_count_variation: Option<f64>,
    /// Starting heading level (1-6). Level 1 emits a leading `<h1>`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading_level: Option<u8>,
    /// Deepest heading level the document may reach.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading_level_max: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading_probability: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_element_probability: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_element_probability: Option<f64>,
    /// Prefix of currency table cells.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency_symbol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headings: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unordered_lists: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ordered_lists: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blockquotes: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tables: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub figures: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pre: Option<bool>,
    /// Relative weights of inline element kinds, merged key by key.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub inline_element_weights: BTreeMap<String, f64>,
    /// Relative weights of block element kinds, merged key by key.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub block_element_weights: BTreeMap<String, f64>,
    /// CSS classes keyed by tag (`li`) or tag path (`ol > li`).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub element_classes: BTreeMap<String, String>,
    /// CSS classes of table cells keyed by column value type.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub type_classes: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lead: Option<PartialLeadOptions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<PartialImageOptions>,
}

impl PartialConfiguration {
    /// Overlay `other` on top of `self`; fields set in `other` win.
    pub fn merge(&mut self, other: &PartialConfiguration) {
        overlay(&mut self.paragraphs, &other.paragraphs);
        overlay(&mut self.paragraphs_variation, &other.paragraphs_variation);
        overlay(&mut self.paragraph_length, &other.paragraph_length);
        overlay(
            &mut self.paragraph_length_variation,
            &other.paragraph_length_variation,
        );
        overlay(&mut self.list_length, &other.list_length);
        overlay(&mut self.list_length_variation, &other.list_length_variation);
        overlay(&mut self.table_column_count, &other.table_column_count);
        overlay(
            &mut self.table_column_count_variation,
            &other.table_column_count_variation,
        );
        overlay(&mut self.table_row_count, &other.table_row_count);
        overlay(
            &mut self.table_row_count_variation,
            &other.table_row_count_variation,
        );
        overlay(&mut self.heading_level, &other.heading_level);
        overlay(&mut self.heading_level_max, &other.heading_level_max);
        overlay(&mut self.heading_probability, &other.heading_probability);
        overlay(
            &mut self.inline_element_probability,
            &other.inline_element_probability,
        );
        overlay(
            &mut self.block_element_probability,
            &other.block_element_probability,
        );
        overlay(&mut self.currency_symbol, &other.currency_symbol);
        overlay(&mut self.headings, &other.headings);
        overlay(&mut self.links, &other.links);
        overlay(&mut self.images, &other.images);
        overlay(&mut self.unordered_lists, &other.unordered_lists);
        overlay(&mut self.ordered_lists, &other.ordered_lists);
        overlay(&mut self.blockquotes, &other.blockquotes);
        overlay(&mut self.tables, &other.tables);
        overlay(&mut self.figures, &other.figures);
        overlay(&mut self.rules, &other.rules);
        overlay(&mut self.pre, &other.pre);
        self.inline_element_weights
            .extend(other.inline_element_weights.clone());
        self.block_element_weights
            .extend(other.block_element_weights.clone());
        self.element_classes.extend(other.element_classes.clone());
        self.type_classes.extend(other.type_classes.clone());

        if let Some(lead) = &other.lead {
            let target = self.lead.get_or_insert_with(PartialLeadOptions::default);
            overlay(&mut target.paragraphs, &lead.paragraphs);
            overlay(&mut target.paragraphs_variation, &lead.paragraphs_variation);
            overlay(&mut target.paragraph_length, &lead.paragraph_length);
            overlay(
                &mut target.paragraph_length_variation,
                &lead.paragraph_length_variation,
            );
            overlay(&mut target.class, &lead.class);
        }

        if let Some(image) = &other.image {
            let target = self.image.get_or_insert_with(PartialImageOptions::default);
            overlay(&mut target.aspect_ratios, &image.aspect_ratios);
            overlay(&mut target.size_min, &image.size_min);
            overlay(&mut target.size_max, &image.size_max);
            overlay(&mut target.size_variation, &image.size_variation);
            overlay(&mut target.url_template, &image.url_template);
        }
    }
}

fn overlay<T: Clone>(target: &mut Option<T>, value: &Option<T>) {
    if value.is_some() {
        target.clone_from(value);
    }
}

/// Resolved lead paragraph parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct LeadOptions {
    pub paragraphs: u32,
    pub paragraphs_variation: f64,
    pub paragraph_length: u32,
    pub paragraph_length_variation: f64,
    pub class: String,
}

impl Default for LeadOptions {
    fn default() -> Self {
        Self {
            paragraphs: 0,
            paragraphs_variation: 0.0,
            paragraph_length: 4,
            paragraph_length_variation: 0.2,
            class: "lead".to_string(),
        }
    }
}

/// Resolved image parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageOptions {
    pub aspect_ratios: Vec<f64>,
    pub size_min: f64,
    pub size_max: f64,
    pub size_variation: f64,
    pub url_template: String,
}

impl Default for ImageOptions {
    fn default() -> Self {
        Self {
            aspect_ratios: vec![0.5625, 0.6667, DEFAULT_ASPECT_RATIO, 1.0],
            size_min: 320.0,
            size_max: 960.0,
            size_variation: 0.2,
            url_template: "https://picsum.photos/{width}/{height}".to_string(),
        }
    }
}

/// Fully resolved generation parameters, immutable for one generation call.
#[derive(Debug, Clone, PartialEq)]
pub struct Configuration {
    pub paragraphs: u32,
    pub paragraphs_variation: f64,
    pub paragraph_length: u32,
    pub paragraph_length_variation: f64,
    pub list_length: u32,
    pub list_length_variation: f64,
    pub table_column_count: u32,
    pub table_column_count_variation: f64,
    pub table_row_count: u32,
    pub table_row_count_variation: f64,
    pub heading_level: u8,
    pub heading_level_max: u8,
    pub heading_probability: f64,
    pub inline_element_probability: f64,
    pub block_element_probability: f64,
    pub inline_element_weights: WeightTable<InlineKind>,
    pub block_element_weights: WeightTable<BlockKind>,
    pub element_classes: BTreeMap<String, String>,
    pub type_classes: BTreeMap<ColumnType, String>,
    pub currency_symbol: String,
    pub lead: LeadOptions,
    pub image: ImageOptions,
}

impl Default for Configuration {
    fn default() -> Self {
        let type_classes = ColumnType::ALL
            .into_iter()
            .filter(|kind| kind.is_numeric())
            .map(|kind| (kind, "numeric".to_string()))
            .collect();

        Self {
            paragraphs: 3,
            paragraphs_variation: 0.0,
            paragraph_length: 6,
            paragraph_length_variation: 0.2,
            list_length: 6,
            list_length_variation: 0.4,
            table_column_count: 4,
            table_column_count_variation: 0.25,
            table_row_count: 25,
            table_row_count_variation: 0.4,
            heading_level: HEADING_LEVEL_MIN,
            heading_level_max: HEADING_LEVEL_MAX,
            heading_probability: probability::UNLIKELY,
            inline_element_probability: probability::UNLIKELY,
            block_element_probability: probability::UNLIKELY,
            inline_element_weights: WeightTable::from_entries(
                "inline_element_weights",
                InlineKind::ALL.map(|kind| (kind, kind.default_weight())),
            ),
            block_element_weights: WeightTable::from_entries(
                "block_element_weights",
                BlockKind::ALL
                    .into_iter()
                    .filter(|kind| kind.default_weight() > 0.0)
                    .map(|kind| (kind, kind.default_weight())),
            ),
            element_classes: BTreeMap::new(),
            type_classes,
            currency_symbol: "€".to_string(),
            lead: LeadOptions::default(),
            image: ImageOptions::default(),
        }
    }
}

impl Configuration {
    /// Merge `overrides` over the defaults and validate the result.
    pub fn resolve(overrides: &PartialConfiguration) -> Result<Self> {
        let mut config = Self::default();
        config.apply_counts(overrides)?;
        config.apply_headings(overrides)?;
        config.apply_tables(overrides)?;
        config.apply_toggles(overrides);
        if let Some(lead) = &overrides.lead {
            config.apply_lead(lead)?;
        }
        if let Some(image) = &overrides.image {
            config.apply_image(image)?;
        }
        config.disable_unselectable();
        Ok(config)
    }

    fn apply_counts(&mut self, o: &PartialConfiguration) -> Result<()> {
        if let Some(value) = o.paragraphs {
            self.paragraphs = value;
        }
        if let Some(value) = o.paragraphs_variation {
            self.paragraphs_variation = fraction("paragraphs_variation", value)?;
        }
        if let Some(value) = o.paragraph_length {
            self.paragraph_length = value;
        }
        if let Some(value) = o.paragraph_length_variation {
            self.paragraph_length_variation = fraction("paragraph_length_variation", value)?;
        }
        if let Some(value) = o.list_length {
            self.list_length = value;
        }
        if let Some(value) = o.list_length_variation {
            self.list_length_variation = fraction("list_length_variation", value)?;
        }
        if let Some(value) = o.table_column_count {
            self.table_column_count = value;
        }
        if let Some(value) = o.table_column_count_variation {
            self.table_column_count_variation = fraction("table_column_count_variation", value)?;
        }
        if let Some(value) = o.table_row_count {
            self.table_row_count = value;
        }
        if let Some(value) = o.table_row_count_variation {
            self.table_row_count_variation = fraction("table_row_count_variation", value)?;
        }
        if let Some(value) = o.inline_element_probability {
            self.inline_element_probability = checked_probability("inline_element_probability", value)?;
        }
        if let Some(value) = o.block_element_probability {
            self.block_element_probability = checked_probability("block_element_probability", value)?;
        }
        if let Some(symbol) = &o.currency_symbol {
            self.currency_symbol.clone_from(symbol);
        }
        Ok(())
    }

    fn apply_headings(&mut self, o: &PartialConfiguration) -> Result<()> {
        if let Some(level) = o.heading_level_max {
            self.heading_level_max = level.clamp(HEADING_LEVEL_MIN, HEADING_LEVEL_MAX);
        }
        if let Some(level) = o.heading_level {
            self.heading_level = level.clamp(HEADING_LEVEL_MIN, HEADING_LEVEL_MAX);
        }
        self.heading_level = self.heading_level.min(self.heading_level_max);
        if let Some(value) = o.heading_probability {
            self.heading_probability = checked_probability("heading_probability", value)?;
        }
        if o.headings == Some(false) {
            self.heading_probability = probability::NEVER;
        }
        Ok(())
    }

    fn apply_tables(&mut self, o: &PartialConfiguration) -> Result<()> {
        for (key, weight) in &o.inline_element_weights {
            let kind: InlineKind = key.parse()?;
            self.inline_element_weights
                .set(kind, checked_weight("inline_element_weights", key, *weight)?);
        }
        for (key, weight) in &o.block_element_weights {
            let kind: BlockKind = key.parse()?;
            self.block_element_weights
                .set(kind, checked_weight("block_element_weights", key, *weight)?);
        }
        self.element_classes.extend(o.element_classes.clone());
        for (key, class) in &o.type_classes {
            let kind: ColumnType = key.parse()?;
            self.type_classes.insert(kind, class.clone());
        }
        Ok(())
    }

    fn apply_toggles(&mut self, o: &PartialConfiguration) {
        let disabled = |toggle: Option<bool>| toggle == Some(false);
        if disabled(o.links) {
            self.inline_element_weights.remove(InlineKind::A);
        }
        if disabled(o.images) {
            self.inline_element_weights.remove(InlineKind::Img);
            self.block_element_weights.remove(BlockKind::Img);
        }
        let blocks = [
            (o.unordered_lists, BlockKind::Ul),
            (o.ordered_lists, BlockKind::Ol),
            (o.blockquotes, BlockKind::Blockquote),
            (o.tables, BlockKind::Table),
            (o.figures, BlockKind::Figure),
            (o.rules, BlockKind::Hr),
            (o.pre, BlockKind::Pre),
        ];
        for (toggle, kind) in blocks {
            if disabled(toggle) {
                self.block_element_weights.remove(kind);
            }
        }
    }

    fn apply_lead(&mut self, lead: &PartialLeadOptions) -> Result<()> {
        if let Some(value) = lead.paragraphs {
            self.lead.paragraphs = value;
        }
        if let Some(value) = lead.paragraphs_variation {
            self.lead.paragraphs_variation = fraction("lead.paragraphs_variation", value)?;
        }
        if let Some(value) = lead.paragraph_length {
            self.lead.paragraph_length = value;
        }
        if let Some(value) = lead.paragraph_length_variation {
            self.lead.paragraph_length_variation =
                fraction("lead.paragraph_length_variation", value)?;
        }
        if let Some(class) = &lead.class {
            self.lead.class.clone_from(class);
        }
        Ok(())
    }

    fn apply_image(&mut self, image: &PartialImageOptions) -> Result<()> {
        if let Some(ratios) = &image.aspect_ratios {
            if let Some(bad) = ratios.iter().find(|ratio| !ratio.is_finite() || **ratio <= 0.0) {
                return Err(Error::InvalidConfig(format!(
                    "image.aspect_ratios: ratio {bad} must be a positive number"
                )));
            }
            self.image.aspect_ratios.clone_from(ratios);
        }
        if let Some(value) = image.size_min {
            self.image.size_min = size("image.size_min", value)?;
        }
        if let Some(value) = image.size_max {
            self.image.size_max = size("image.size_max", value)?;
        }
        if self.image.size_min > self.image.size_max {
            return Err(Error::InvalidConfig(format!(
                "image.size_min ({}) must be <= image.size_max ({})",
                self.image.size_min, self.image.size_max
            )));
        }
        if let Some(value) = image.size_variation {
            self.image.size_variation = fraction("image.size_variation", value)?;
        }
        if let Some(template) = &image.url_template {
            self.image.url_template.clone_from(template);
        }
        Ok(())
    }

    /// Switch off branches whose weight table has nothing to select.
    fn disable_unselectable(&mut self) {
        if self.inline_element_weights.positive_count() == 0
            && self.inline_element_probability > 0.0
        {
            warn!(
                table = self.inline_element_weights.name(),
                "no selectable inline elements, inline elements disabled"
            );
            self.inline_element_probability = probability::NEVER;
        }
        if self.block_element_weights.positive_count() == 0
            && self.block_element_probability > 0.0
        {
            warn!(
                table = self.block_element_weights.name(),
                "no selectable block elements, block elements disabled"
            );
            self.block_element_probability = probability::NEVER;
        }
    }

    /// CSS class for the innermost tag of `path`.
    ///
    /// The most specific key wins: for `["ol", "li"]` the map is searched for
    /// `ol > li`, then `li`. Empty classes count as unset.
    pub fn class_for(&self, path: &[&str]) -> Option<&str> {
        (0..path.len())
            .map(|start| path[start..].join(" > "))
            .find_map(|key| {
                self.element_classes
                    .get(&key)
                    .map(String::as_str)
                    .filter(|class| !class.is_empty())
            })
    }

    pub fn type_class(&self, column_type: ColumnType) -> Option<&str> {
        self.type_classes
            .get(&column_type)
            .map(String::as_str)
            .filter(|class| !class.is_empty())
    }

    /// Export as overrides, e.g. to print the effective defaults.
    pub fn to_partial(&self) -> PartialConfiguration {
        PartialConfiguration {
            paragraphs: Some(self.paragraphs),
            paragraphs_variation: Some(self.paragraphs_variation),
            paragraph_length: Some(self.paragraph_length),
            paragraph_length_variation: Some(self.paragraph_length_variation),
            list_length: Some(self.list_length),
            list_length_variation: Some(self.list_length_variation),
            table_column_count: Some(self.table_column_count),
            table_column_count_variation: Some(self.table_column_count_variation),
            table_row_count: Some(self.table_row_count),
            table_row_count_variation: Some(self.table_row_count_variation),
            heading_level: Some(self.heading_level),
            heading_level_max: Some(self.heading_level_max),
            heading_probability: Some(self.heading_probability),
            inline_element_probability: Some(self.inline_element_probability),
            block_element_probability: Some(self.block_element_probability),
            currency_symbol: Some(self.currency_symbol.clone()),
            inline_element_weights: self.inline_element_weights.to_map(),
            block_element_weights: self.block_element_weights.to_map(),
            element_classes: self.element_classes.clone(),
            type_classes: self
                .type_classes
                .iter()
                .map(|(kind, class)| (kind.to_string(), class.clone()))
                .collect(),
            lead: Some(PartialLeadOptions {
                paragraphs: Some(self.lead.paragraphs),
                paragraphs_variation: Some(self.lead.paragraphs_variation),
                paragraph_length: Some(self.lead.paragraph_length),
                paragraph_length_variation: Some(self.lead.paragraph_length_variation),
                class: Some(self.lead.class.clone()),
            }),
            image: Some(PartialImageOptions {
                aspect_ratios: Some(self.image.aspect_ratios.clone()),
                size_min: Some(self.image.size_min),
                size_max: Some(self.image.size_max),
                size_variation: Some(self.image.size_variation),
                url_template: Some(self.image.url_template.clone()),
            }),
            ..PartialConfiguration::default()
        }
    }
}

fn finite(name: &str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::InvalidConfig(format!("{name} must be a finite number")))
    }
}

fn fraction(name: &str, value: f64) -> Result<f64> {
    finite(name, value).map(|value| value.clamp(0.0, 1.0))
}

fn checked_probability(name: &str, value: f64) -> Result<f64> {
    finite(name, value).map(probability::clamp)
}

fn checked_weight(table: &str, key: &str, value: f64) -> Result<f64> {
    let value = finite(table, value)?;
    if value < 0.0 {
        return Err(Error::InvalidConfig(format!(
            "{table}: weight of '{key}' must be >= 0"
        )));
    }
    Ok(value)
}

fn size(name: &str, value: f64) -> Result<f64> {
    let value = finite(name, value)?;
    if value < 0.0 {
        return Err(Error::InvalidConfig(format!("{name} must be >= 0")));
    }
    Ok(value)
}
