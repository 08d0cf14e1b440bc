//! Block-level units: paragraphs, lists, tables, quotes, images and rules.

use htmlfaker_core::probability::MAYBE;
use htmlfaker_core::{BlockKind, ColumnType, DEFAULT_ASPECT_RATIO, Result};

use crate::context::{ComposeContext, GenerationState};
use crate::inline::render_sentence_or_inline;
use crate::markup::{element, escape_text, text_element, void_element};

const BLOCKQUOTE_SENTENCES_MIN: i64 = 1;
const BLOCKQUOTE_SENTENCES_MAX: i64 = 3;
const PRE_LINES_MIN: i64 = 2;
const PRE_LINES_MAX: i64 = 5;
const CELL_FLOAT_PRECISION: u32 = 2;
const CELL_FLOAT_MIN: f64 = 0.0;
const CELL_FLOAT_MAX: f64 = 100.0;

/// Paragraph of jittered length; `class` replaces the `p` class (lead runs).
pub fn render_paragraph(
    ctx: &mut ComposeContext<'_>,
    length: u32,
    variation: f64,
    class: Option<&str>,
) -> Result<String> {
    let count = ctx.random.jitter_count(length, variation)?;
    let mut units = Vec::with_capacity(count);
    for _ in 0..count {
        units.push(render_sentence_or_inline(ctx)?);
    }
    Ok(element("p", class, units.join(" ").trim()))
}

/// Paragraph using the body length settings and the `p` class.
pub fn render_body_paragraph(ctx: &mut ComposeContext<'_>) -> Result<String> {
    let config = ctx.config;
    render_paragraph(
        ctx,
        config.paragraph_length,
        config.paragraph_length_variation,
        config.class_for(&["p"]),
    )
}

/// Weighted block element that never repeats the previous block kind while
/// another selectable kind exists.
pub fn render_block_element(
    ctx: &mut ComposeContext<'_>,
    state: &mut GenerationState,
) -> Result<String> {
    let config = ctx.config;
    let weights = &config.block_element_weights;
    let kind = match state.last_block {
        Some(previous)
            if weights
                .entries()
                .iter()
                .any(|(kind, weight)| *kind != previous && *weight > 0.0) =>
        {
            ctx.random.weighted_choice(&weights.without(previous))?
        }
        _ => ctx.random.weighted_choice(weights)?,
    };
    state.last_block = Some(kind);
    ctx.report.record_block(kind);
    render_block_kind(ctx, kind)
}

/// Render one block of `kind`. A `p` block always uses the body paragraph
/// length and class, also when drawn inside a lead run.
pub fn render_block_kind(ctx: &mut ComposeContext<'_>, kind: BlockKind) -> Result<String> {
    match kind {
        BlockKind::P => render_body_paragraph(ctx),
        BlockKind::Ul | BlockKind::Ol => render_list(ctx, kind),
        BlockKind::Blockquote => render_blockquote(ctx),
        BlockKind::Table => render_table(ctx),
        BlockKind::Figure => render_figure(ctx),
        BlockKind::Img => render_image(ctx, &[kind.tag()]),
        BlockKind::Hr => Ok(render_rule(ctx)),
        BlockKind::Pre => render_pre(ctx),
    }
}

/// `ul` or `ol` with jittered item count.
pub fn render_list(ctx: &mut ComposeContext<'_>, kind: BlockKind) -> Result<String> {
    let config = ctx.config;
    let tag = kind.tag();
    let count = ctx
        .random
        .jitter_count(config.list_length, config.list_length_variation)?;
    let item_class = config.class_for(&[tag, "li"]);
    let mut items = String::new();
    for _ in 0..count {
        let content = render_sentence_or_inline(ctx)?;
        items.push_str(&element("li", item_class, &content));
    }
    Ok(element(tag, config.class_for(&[tag]), &items))
}

pub fn render_blockquote(ctx: &mut ComposeContext<'_>) -> Result<String> {
    let config = ctx.config;
    let count = ctx
        .random
        .int_between(BLOCKQUOTE_SENTENCES_MIN, BLOCKQUOTE_SENTENCES_MAX)?;
    let paragraph_class = config.class_for(&["blockquote", "p"]);
    let paragraphs: String = ctx
        .text
        .sentences(count as usize)
        .iter()
        .map(|sentence| text_element("p", paragraph_class, sentence))
        .collect();
    Ok(element(
        "blockquote",
        config.class_for(&["blockquote"]),
        &paragraphs,
    ))
}

/// Column of a generated table; its type is fixed for every row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TableColumn {
    pub value_type: ColumnType,
}

/// Table content before serialization.
#[derive(Clone, Debug, PartialEq)]
pub struct GeneratedTable {
    pub columns: Vec<TableColumn>,
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Draw a column plan, a header word per column and typed cells per row.
pub fn build_table(ctx: &mut ComposeContext<'_>) -> Result<GeneratedTable> {
    let config = ctx.config;
    let column_count = ctx
        .random
        .jitter_count(config.table_column_count, config.table_column_count_variation)?;
    let mut columns = Vec::with_capacity(column_count);
    for _ in 0..column_count {
        if let Some(value_type) = ctx.random.pick(&ColumnType::ALL) {
            columns.push(TableColumn { value_type });
        }
    }

    let header: Vec<String> = columns.iter().map(|_| ctx.text.word()).collect();

    let row_count = ctx
        .random
        .jitter_count(config.table_row_count, config.table_row_count_variation)?;
    let mut rows = Vec::with_capacity(row_count);
    for _ in 0..row_count {
        let row: Vec<String> = columns
            .iter()
            .map(|column| cell_value(ctx, column.value_type))
            .collect();
        rows.push(row);
    }
    ctx.report.record_table_rows(rows.len());

    Ok(GeneratedTable {
        columns,
        header,
        rows,
    })
}

fn cell_value(ctx: &mut ComposeContext<'_>, value_type: ColumnType) -> String {
    match value_type {
        ColumnType::Int => ctx.text.random_number().to_string(),
        ColumnType::Currency => {
            let amount =
                ctx.text
                    .random_float(CELL_FLOAT_PRECISION, CELL_FLOAT_MIN, CELL_FLOAT_MAX);
            format!("{} {amount:.2}", ctx.config.currency_symbol)
        }
        ColumnType::Percentage => {
            let amount =
                ctx.text
                    .random_float(CELL_FLOAT_PRECISION, CELL_FLOAT_MIN, CELL_FLOAT_MAX);
            format!("{amount:.2}%")
        }
        ColumnType::String => ctx.text.word(),
        ColumnType::Text => ctx.text.sentence(),
    }
}

pub fn render_table(ctx: &mut ComposeContext<'_>) -> Result<String> {
    let table = build_table(ctx)?;
    Ok(table_html(ctx, &table))
}

fn table_html(ctx: &ComposeContext<'_>, table: &GeneratedTable) -> String {
    let config = ctx.config;
    let header: String = table
        .columns
        .iter()
        .zip(&table.header)
        .map(|(column, label)| {
            let class = config
                .type_class(column.value_type)
                .or_else(|| config.class_for(&["thead", "th"]));
            text_element("th", class, label)
        })
        .collect();

    let body: String = table
        .rows
        .iter()
        .map(|row| {
            let cells: String = table
                .columns
                .iter()
                .zip(row)
                .map(|(column, value)| {
                    let class = config
                        .type_class(column.value_type)
                        .or_else(|| config.class_for(&["tbody", "td"]));
                    text_element("td", class, value)
                })
                .collect();
            element("tr", config.class_for(&["tbody", "tr"]), &cells)
        })
        .collect();

    let thead = element(
        "thead",
        config.class_for(&["thead"]),
        &element("tr", config.class_for(&["thead", "tr"]), &header),
    );
    let tbody = element("tbody", config.class_for(&["tbody"]), &body);
    element(
        "table",
        config.class_for(&["table"]),
        &format!("{thead}{tbody}"),
    )
}

/// Image with jittered size; `path` selects the class (`img`, `figure > img`).
pub fn render_image(ctx: &mut ComposeContext<'_>, path: &[&str]) -> Result<String> {
    let config = ctx.config;
    let image = &config.image;
    let ratio = ctx
        .random
        .pick(&image.aspect_ratios)
        .unwrap_or(DEFAULT_ASPECT_RATIO);
    let base = ctx.random.float_between(image.size_min, image.size_max);
    let width = ctx.random.jitter_size(base, image.size_variation);
    let height = width * ratio;
    let (width, height) = (width.round() as u64, height.round() as u64);

    let src = image
        .url_template
        .replace("{width}", &width.to_string())
        .replace("{height}", &height.to_string());
    let alt = ctx.text.sentence();

    Ok(void_element(
        "img",
        &[
            ("src", src),
            ("width", width.to_string()),
            ("height", height.to_string()),
            ("alt", alt),
        ],
        config.class_for(path),
    ))
}

/// Image inside `figure`, captioned half of the time.
pub fn render_figure(ctx: &mut ComposeContext<'_>) -> Result<String> {
    let config = ctx.config;
    let mut inner = render_image(ctx, &["figure", "img"])?;
    if ctx.random.chance(MAYBE) {
        let caption = ctx.text.sentence();
        inner.push_str(&text_element(
            "figcaption",
            config.class_for(&["figure", "figcaption"]),
            &caption,
        ));
    }
    Ok(element("figure", config.class_for(&["figure"]), &inner))
}

pub fn render_rule(ctx: &ComposeContext<'_>) -> String {
    void_element("hr", &[], ctx.config.class_for(&["hr"]))
}

/// Raw sentences, one per line, without inline elements.
pub fn render_pre(ctx: &mut ComposeContext<'_>) -> Result<String> {
    let config = ctx.config;
    let count = ctx.random.int_between(PRE_LINES_MIN, PRE_LINES_MAX)?;
    let text = ctx.text.sentences(count as usize).join("\n");
    Ok(element("pre", config.class_for(&["pre"]), &escape_text(&text)))
}
