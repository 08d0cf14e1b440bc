//! Closed registry of element kinds and table column value types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Span-level elements that can wrap a sentence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InlineKind {
    Strong,
    B,
    Em,
    I,
    Mark,
    Abbr,
    Code,
    A,
    Img,
}

impl InlineKind {
    /// Every inline kind in registry order.
    pub const ALL: [InlineKind; 9] = [
        InlineKind::Strong,
        InlineKind::B,
        InlineKind::Em,
        InlineKind::I,
        InlineKind::Mark,
        InlineKind::Abbr,
        InlineKind::Code,
        InlineKind::A,
        InlineKind::Img,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            Self::Strong => "strong",
            Self::B => "b",
            Self::Em => "em",
            Self::I => "i",
            Self::Mark => "mark",
            Self::Abbr => "abbr",
            Self::Code => "code",
            Self::A => "a",
            Self::Img => "img",
        }
    }

    /// Relative weight used when no override is given.
    pub fn default_weight(self) -> f64 {
        match self {
            Self::Strong | Self::B | Self::Em | Self::I => 1.0,
            Self::Mark | Self::Abbr | Self::Code => 0.1,
            Self::A => 0.1,
            Self::Img => 0.0,
        }
    }
}

impl fmt::Display for InlineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for InlineKind {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        InlineKind::ALL
            .into_iter()
            .find(|kind| kind.tag() == value)
            .ok_or_else(|| Error::UnknownElementKind(value.to_string()))
    }
}

/// Structural units occupying their own block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    P,
    Ul,
    Ol,
    Blockquote,
    Table,
    Figure,
    Img,
    Hr,
    Pre,
}

impl BlockKind {
    /// Every block kind in registry order.
    pub const ALL: [BlockKind; 9] = [
        BlockKind::P,
        BlockKind::Ul,
        BlockKind::Ol,
        BlockKind::Blockquote,
        BlockKind::Table,
        BlockKind::Figure,
        BlockKind::Img,
        BlockKind::Hr,
        BlockKind::Pre,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            Self::P => "p",
            Self::Ul => "ul",
            Self::Ol => "ol",
            Self::Blockquote => "blockquote",
            Self::Table => "table",
            Self::Figure => "figure",
            Self::Img => "img",
            Self::Hr => "hr",
            Self::Pre => "pre",
        }
    }

    /// Relative weight used when no override is given; `p` starts at zero.
    pub fn default_weight(self) -> f64 {
        match self {
            Self::P => 0.0,
            Self::Ul | Self::Ol => 1.0,
            Self::Blockquote => 0.5,
            Self::Table | Self::Figure | Self::Pre => 0.25,
            Self::Img | Self::Hr => 0.15,
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for BlockKind {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        BlockKind::ALL
            .into_iter()
            .find(|kind| kind.tag() == value)
            .ok_or_else(|| Error::UnknownElementKind(value.to_string()))
    }
}

/// Value type of a generated table column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Int,
    Currency,
    Percentage,
    String,
    Text,
}

impl ColumnType {
    pub const ALL: [ColumnType; 5] = [
        ColumnType::Int,
        ColumnType::Currency,
        ColumnType::Percentage,
        ColumnType::String,
        ColumnType::Text,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Currency => "currency",
            Self::Percentage => "percentage",
            Self::String => "string",
            Self::Text => "text",
        }
    }

    /// Numeric columns are right-aligned by the default class map.
    pub fn is_numeric(self) -> bool {
        matches!(self, Self::Int | Self::Currency | Self::Percentage)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColumnType {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        ColumnType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == value)
            .ok_or_else(|| Error::UnknownColumnType(value.to_string()))
    }
}
