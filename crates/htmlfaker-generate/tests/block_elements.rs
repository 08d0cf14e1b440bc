use htmlfaker_core::{
    BlockKind, ColumnType, Configuration, InlineKind, PartialConfiguration, PartialImageOptions,
};
use htmlfaker_generate::block::{
    build_table, render_block_element, render_blockquote, render_figure, render_image,
    render_list, render_pre, render_table,
};
use htmlfaker_generate::inline::render_inline_kind;
use htmlfaker_generate::{
    ComposeContext, DocumentReport, GenerationState, LoremTextSource, RandomSource, TextSource,
};

/// Text source answering every request with the same fragment.
struct ScriptedText;

impl TextSource for ScriptedText {
    fn sentence(&mut self) -> String {
        "x".to_string()
    }

    fn word(&mut self) -> String {
        "w".to_string()
    }

    fn url(&mut self) -> String {
        "https://example.test/w".to_string()
    }

    fn random_number(&mut self) -> u64 {
        42
    }

    fn random_float(&mut self, _precision: u32, _min: f64, _max: f64) -> f64 {
        12.5
    }
}

fn with_scripted_context<T>(
    overrides: &PartialConfiguration,
    seed: u64,
    render: impl FnOnce(&mut ComposeContext<'_>) -> T,
) -> T {
    let config = Configuration::resolve(overrides).expect("resolve");
    let mut random = RandomSource::seeded(seed);
    let mut text = ScriptedText;
    let mut report = DocumentReport::default();
    let mut ctx = ComposeContext::new(&config, &mut random, &mut text, &mut report);
    render(&mut ctx)
}

fn fixed_image() -> PartialConfiguration {
    PartialConfiguration {
        image: Some(PartialImageOptions {
            aspect_ratios: Some(vec![0.5]),
            size_min: Some(400.0),
            size_max: Some(400.0),
            size_variation: Some(0.0),
            url_template: Some("https://img.test/{width}x{height}".to_string()),
        }),
        ..PartialConfiguration::default()
    }
}

const FIXED_IMAGE: &str =
    "<img src=\"https://img.test/400x200\" width=\"400\" height=\"200\" alt=\"x\" />";

#[test]
fn block_kind_never_repeats_back_to_back() {
    let config = Configuration::default();
    let mut random = RandomSource::seeded(11);
    let mut text = LoremTextSource::seeded(11);
    let mut report = DocumentReport::default();
    let mut ctx = ComposeContext::new(&config, &mut random, &mut text, &mut report);
    let mut state = GenerationState::new(config.heading_level);

    let mut previous = None;
    for _ in 0..200 {
        render_block_element(&mut ctx, &mut state).expect("block");
        assert_ne!(state.last_block, previous);
        previous = state.last_block;
    }
}

#[test]
fn lone_block_kind_may_repeat() {
    let overrides = PartialConfiguration {
        unordered_lists: Some(false),
        ordered_lists: Some(false),
        blockquotes: Some(false),
        tables: Some(false),
        figures: Some(false),
        images: Some(false),
        pre: Some(false),
        ..PartialConfiguration::default()
    };
    let config = Configuration::resolve(&overrides).expect("resolve");
    let mut random = RandomSource::seeded(12);
    let mut text = LoremTextSource::seeded(12);
    let mut report = DocumentReport::default();
    let mut ctx = ComposeContext::new(&config, &mut random, &mut text, &mut report);
    let mut state = GenerationState::new(config.heading_level);

    for _ in 0..3 {
        assert_eq!(
            render_block_element(&mut ctx, &mut state).expect("block"),
            "<hr />"
        );
    }
    assert_eq!(report.blocks.get("hr"), Some(&3));
}

#[test]
fn table_rows_match_the_column_plan() {
    let config = Configuration::default();
    let mut random = RandomSource::seeded(13);
    let mut text = LoremTextSource::seeded(13);
    let mut report = DocumentReport::default();
    let mut ctx = ComposeContext::new(&config, &mut random, &mut text, &mut report);

    for _ in 0..20 {
        let table = build_table(&mut ctx).expect("table");
        assert!(!table.columns.is_empty());
        assert_eq!(table.header.len(), table.columns.len());
        for row in &table.rows {
            assert_eq!(row.len(), table.columns.len());
            for (column, value) in table.columns.iter().zip(row) {
                match column.value_type {
                    ColumnType::Currency => {
                        assert!(value.starts_with("€ "), "{value}");
                        let decimals = value.rsplit('.').next().unwrap_or_default();
                        assert_eq!(decimals.len(), 2, "{value}");
                    }
                    ColumnType::Percentage => assert!(value.ends_with('%'), "{value}"),
                    ColumnType::Int => assert!(value.parse::<u64>().is_ok(), "{value}"),
                    ColumnType::String | ColumnType::Text => assert!(!value.is_empty()),
                }
            }
        }
    }
}

#[test]
fn numeric_columns_carry_the_type_class() {
    let overrides = PartialConfiguration {
        table_column_count: Some(30),
        table_column_count_variation: Some(0.0),
        table_row_count: Some(1),
        table_row_count_variation: Some(0.0),
        currency_symbol: Some("$".to_string()),
        ..PartialConfiguration::default()
    };
    let config = Configuration::resolve(&overrides).expect("resolve");
    let mut random = RandomSource::seeded(14);
    let mut text = LoremTextSource::seeded(14);
    let mut report = DocumentReport::default();
    let mut ctx = ComposeContext::new(&config, &mut random, &mut text, &mut report);

    let html = render_table(&mut ctx).expect("table");
    assert!(html.starts_with("<table><thead><tr>"), "{html}");
    assert!(html.contains("<td class=\"numeric\">"), "{html}");
    assert!(html.ends_with("</tr></tbody></table>"), "{html}");
    assert_eq!(html.matches("<tr>").count(), 2);
}

#[test]
fn image_size_follows_ratio_and_template() {
    let html = with_scripted_context(&fixed_image(), 21, |ctx| render_image(ctx, &["img"]))
        .expect("image");
    assert_eq!(html, FIXED_IMAGE);
}

#[test]
fn inline_image_uses_the_image_renderer() {
    let html = with_scripted_context(&fixed_image(), 22, |ctx| {
        render_inline_kind(ctx, InlineKind::Img)
    })
    .expect("inline image");
    assert_eq!(html, FIXED_IMAGE);
}

#[test]
fn link_takes_its_href_from_the_text_source() {
    let html = with_scripted_context(&PartialConfiguration::default(), 23, |ctx| {
        render_inline_kind(ctx, InlineKind::A)
    })
    .expect("link");
    assert_eq!(html, "<a href=\"https://example.test/w\">x</a>");
}

#[test]
fn figure_holds_one_image_and_an_occasional_caption() {
    let figures = with_scripted_context(&fixed_image(), 24, |ctx| {
        (0..64)
            .map(|_| render_figure(ctx).expect("figure"))
            .collect::<Vec<_>>()
    });

    let mut captioned = 0;
    for html in &figures {
        assert!(html.starts_with(&format!("<figure>{FIXED_IMAGE}")), "{html}");
        assert!(html.ends_with("</figure>"), "{html}");
        assert_eq!(html.matches("<img ").count(), 1);
        if html.contains("<figcaption>x</figcaption>") {
            captioned += 1;
        }
    }
    assert!(captioned > 0 && captioned < figures.len(), "captioned {captioned}");
}

#[test]
fn blockquote_holds_one_to_three_paragraphs() {
    let quotes = with_scripted_context(&PartialConfiguration::default(), 25, |ctx| {
        (0..64)
            .map(|_| render_blockquote(ctx).expect("blockquote"))
            .collect::<Vec<_>>()
    });

    for html in &quotes {
        let paragraphs = html.matches("<p>x</p>").count();
        assert!((1..=3).contains(&paragraphs), "{html}");
        assert_eq!(
            html,
            &format!("<blockquote>{}</blockquote>", "<p>x</p>".repeat(paragraphs))
        );
    }
}

#[test]
fn list_items_stay_within_jitter_bounds() {
    let overrides = PartialConfiguration {
        list_length: Some(5),
        list_length_variation: Some(0.4),
        inline_element_probability: Some(0.0),
        ..PartialConfiguration::default()
    };
    let lists = with_scripted_context(&overrides, 26, |ctx| {
        (0..64)
            .map(|_| render_list(ctx, BlockKind::Ol).expect("list"))
            .collect::<Vec<_>>()
    });

    for html in &lists {
        assert!(html.starts_with("<ol><li>x</li>"), "{html}");
        assert!(html.ends_with("</li></ol>"), "{html}");
        let items = html.matches("<li>").count();
        assert!((3..=7).contains(&items), "{items} items");
    }
}

#[test]
fn pre_is_raw_text_even_with_inline_elements_forced() {
    let overrides = PartialConfiguration {
        inline_element_probability: Some(1.0),
        ..PartialConfiguration::default()
    };
    let blocks = with_scripted_context(&overrides, 27, |ctx| {
        (0..32)
            .map(|_| render_pre(ctx).expect("pre"))
            .collect::<Vec<_>>()
    });

    for html in &blocks {
        let body = html
            .strip_prefix("<pre>")
            .and_then(|rest| rest.strip_suffix("</pre>"))
            .expect("pre element");
        assert!(!body.contains('<'), "{html}");
        let lines: Vec<&str> = body.split('\n').collect();
        assert!((2..=5).contains(&lines.len()), "{html}");
        assert!(lines.iter().all(|line| *line == "x"));
    }
}
