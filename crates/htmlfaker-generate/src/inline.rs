//! Span-level content: plain sentences and inline elements.

use htmlfaker_core::{InlineKind, Result};

use crate::block::render_image;
use crate::context::ComposeContext;
use crate::markup::{element_with_attrs, escape_text, text_element};

/// One sentence, wrapped in an inline element with the configured probability.
pub fn render_sentence_or_inline(ctx: &mut ComposeContext<'_>) -> Result<String> {
    if ctx.random.chance(ctx.config.inline_element_probability) {
        return render_inline_element(ctx);
    }
    Ok(escape_text(&ctx.text.sentence()))
}

/// Inline element of a weighted-chosen kind.
pub fn render_inline_element(ctx: &mut ComposeContext<'_>) -> Result<String> {
    let kind = ctx
        .random
        .weighted_choice(&ctx.config.inline_element_weights)?;
    ctx.report.record_inline(kind);
    render_inline_kind(ctx, kind)
}

pub fn render_inline_kind(ctx: &mut ComposeContext<'_>, kind: InlineKind) -> Result<String> {
    let config = ctx.config;
    let class = config.class_for(&[kind.tag()]);
    match kind {
        InlineKind::A => {
            let href = ctx.text.url();
            let text = ctx.text.sentence();
            Ok(element_with_attrs(
                kind.tag(),
                &[("href", href)],
                class,
                &escape_text(&text),
            ))
        }
        InlineKind::Img => render_image(ctx, &[kind.tag()]),
        InlineKind::Strong
        | InlineKind::B
        | InlineKind::Em
        | InlineKind::I
        | InlineKind::Mark
        | InlineKind::Abbr
        | InlineKind::Code => Ok(text_element(kind.tag(), class, &ctx.text.sentence())),
    }
}
