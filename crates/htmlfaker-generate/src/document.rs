//! Top-level loop interleaving headings, paragraphs and block elements.

use tracing::debug;

use htmlfaker_core::{Configuration, HEADING_LEVEL_MIN, Result};

use crate::block::{render_block_element, render_paragraph};
use crate::context::{ComposeContext, GenerationState, UnitKind};
use crate::markup::text_element;

/// Probability that a heading moves one level deeper rather than back up.
const DEEPER_HEADING_PROBABILITY: f64 = 0.4;

/// Parameters of one paragraph run (lead or body).
#[derive(Clone, Debug, PartialEq)]
pub struct ParagraphRun<'a> {
    pub paragraphs: u32,
    pub paragraphs_variation: f64,
    pub paragraph_length: u32,
    pub paragraph_length_variation: f64,
    pub class: Option<&'a str>,
    pub headings: bool,
    pub lead: bool,
}

impl<'a> ParagraphRun<'a> {
    pub fn body(config: &'a Configuration) -> Self {
        Self {
            paragraphs: config.paragraphs,
            paragraphs_variation: config.paragraphs_variation,
            paragraph_length: config.paragraph_length,
            paragraph_length_variation: config.paragraph_length_variation,
            class: config.class_for(&["p"]),
            headings: true,
            lead: false,
        }
    }

    pub fn lead(config: &'a Configuration) -> Self {
        let lead = &config.lead;
        Self {
            paragraphs: lead.paragraphs,
            paragraphs_variation: lead.paragraphs_variation,
            paragraph_length: lead.paragraph_length,
            paragraph_length_variation: lead.paragraph_length_variation,
            class: Some(lead.class.as_str()).filter(|class| !class.is_empty()),
            headings: false,
            lead: true,
        }
    }
}

/// Compose a full fragment: optional `<h1>`, lead paragraphs, then the body.
pub fn compose_document(ctx: &mut ComposeContext<'_>) -> Result<String> {
    let config = ctx.config;
    let mut state = GenerationState::new(config.heading_level);
    let mut html = String::new();

    if config.heading_probability > 0.0 && config.heading_level == HEADING_LEVEL_MIN {
        html.push_str(&render_heading(ctx, HEADING_LEVEL_MIN));
        state.last_unit = Some(UnitKind::Heading);
        state.heading_level = (HEADING_LEVEL_MIN + 1).min(config.heading_level_max);
    }

    if config.lead.paragraphs > 0 {
        html.push_str(&compose_run(ctx, &mut state, &ParagraphRun::lead(config))?);
    }
    html.push_str(&compose_run(ctx, &mut state, &ParagraphRun::body(config))?);

    debug!(
        units = ctx.report.units(),
        paragraphs = ctx.report.paragraphs,
        lead_paragraphs = ctx.report.lead_paragraphs,
        bytes = html.len(),
        "document composed"
    );
    Ok(html)
}

/// Run the heading/paragraph/block loop once.
///
/// Heading levels never climb above the level the run started at and never
/// exceed `heading_level_max`. A block element is only emitted after some
/// other unit, so a document never opens mid-structure.
pub fn compose_run(
    ctx: &mut ComposeContext<'_>,
    state: &mut GenerationState,
    run: &ParagraphRun<'_>,
) -> Result<String> {
    let config = ctx.config;
    state.begin_run();
    let count = ctx
        .random
        .jitter_count(run.paragraphs, run.paragraphs_variation)?;

    let mut html = String::new();
    for _ in 0..count {
        if run.headings && ctx.random.chance(config.heading_probability) {
            html.push_str(&render_heading(ctx, state.heading_level));
            let deeper = ctx.random.chance(DEEPER_HEADING_PROBABILITY);
            state.step_heading(deeper, config.heading_level_max);
            state.last_unit = Some(UnitKind::Heading);
        }

        if state.last_unit.is_some() && ctx.random.chance(config.block_element_probability) {
            html.push_str(&render_block_element(ctx, state)?);
            state.last_unit = Some(UnitKind::Block);
        } else {
            html.push_str(&render_paragraph(
                ctx,
                run.paragraph_length,
                run.paragraph_length_variation,
                run.class,
            )?);
            ctx.report.record_paragraph(run.lead);
            state.last_unit = Some(UnitKind::Paragraph);
        }
    }
    Ok(html)
}

pub fn render_heading(ctx: &mut ComposeContext<'_>, level: u8) -> String {
    let config = ctx.config;
    let tag = format!("h{level}");
    ctx.report.record_heading(level);
    text_element(&tag, config.class_for(&[tag.as_str()]), &ctx.text.sentence())
}
