use tracing::debug;

use htmlfaker_core::{Configuration, Error, PartialConfiguration, Result};

use crate::block::{render_block_element, render_body_paragraph};
use crate::context::{ComposeContext, GenerationState};
use crate::document::compose_document;
use crate::model::{DocumentReport, GeneratedDocument};
use crate::random::RandomSource;
use crate::text::{LoremTextSource, TextSource};

/// Entry point for generating HTML fragments.
///
/// Owns the random source and the text source; every call resolves its own
/// [`Configuration`] and [`GenerationState`], so calls are independent apart
/// from advancing the shared random sequences.
pub struct HtmlFaker {
    random: RandomSource,
    text: Box<dyn TextSource>,
}

impl std::fmt::Debug for HtmlFaker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HtmlFaker")
            .field("random", &self.random)
            .finish_non_exhaustive()
    }
}

impl HtmlFaker {
    pub fn new(text: impl TextSource + 'static, random: RandomSource) -> Self {
        Self {
            random,
            text: Box::new(text),
        }
    }

    pub fn builder() -> HtmlFakerBuilder {
        HtmlFakerBuilder::default()
    }

    /// Lorem text and random draws both derived from `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self::new(
            LoremTextSource::seeded(hash_seed(seed, "text")),
            RandomSource::seeded(seed),
        )
    }

    /// Generate a fragment with `overrides` merged over the defaults.
    pub fn generate(&mut self, overrides: &PartialConfiguration) -> Result<String> {
        self.generate_with_report(overrides)
            .map(|document| document.html)
    }

    pub fn generate_with_report(
        &mut self,
        overrides: &PartialConfiguration,
    ) -> Result<GeneratedDocument> {
        let config = Configuration::resolve(overrides)?;
        self.compose(&config)
    }

    /// Generate with an already resolved configuration.
    pub fn compose(&mut self, config: &Configuration) -> Result<GeneratedDocument> {
        let mut report = DocumentReport::default();
        let html = {
            let mut ctx = self.context(config, &mut report);
            compose_document(&mut ctx)?
        };
        debug!(units = report.units(), "fragment generated");
        Ok(GeneratedDocument { html, report })
    }

    /// A single body paragraph.
    pub fn paragraph(&mut self, overrides: &PartialConfiguration) -> Result<String> {
        let config = Configuration::resolve(overrides)?;
        let mut report = DocumentReport::default();
        let mut ctx = self.context(&config, &mut report);
        render_body_paragraph(&mut ctx)
    }

    /// A single weighted block element.
    pub fn block_element(&mut self, overrides: &PartialConfiguration) -> Result<String> {
        let config = Configuration::resolve(overrides)?;
        let mut report = DocumentReport::default();
        let mut state = GenerationState::new(config.heading_level);
        let mut ctx = self.context(&config, &mut report);
        render_block_element(&mut ctx, &mut state)
    }

    fn context<'a>(
        &'a mut self,
        config: &'a Configuration,
        report: &'a mut DocumentReport,
    ) -> ComposeContext<'a> {
        ComposeContext::new(config, &mut self.random, self.text.as_mut(), report)
    }
}

/// Builder requiring an explicit text source.
#[derive(Default)]
pub struct HtmlFakerBuilder {
    text: Option<Box<dyn TextSource>>,
    random: Option<RandomSource>,
}

impl HtmlFakerBuilder {
    pub fn text_source(mut self, text: impl TextSource + 'static) -> Self {
        self.text = Some(Box::new(text));
        self
    }

    pub fn random_source(mut self, random: RandomSource) -> Self {
        self.random = Some(random);
        self
    }

    pub fn seed(self, seed: u64) -> Self {
        self.random_source(RandomSource::seeded(seed))
    }

    pub fn build(self) -> Result<HtmlFaker> {
        let text = self.text.ok_or(Error::MissingTextSource)?;
        Ok(HtmlFaker {
            random: self.random.unwrap_or_else(RandomSource::from_entropy),
            text,
        })
    }
}

/// Derive an independent seed for `key` from a run seed (FNV-1a mixing).
pub fn hash_seed(seed: u64, key: &str) -> u64 {
    let mut hash = seed ^ 0xcbf29ce484222325;
    for byte in key.as_bytes() {
        hash ^= *byte as u64;
        hash = hash.wrapping_mul(0x100000001b3);
    }
    hash
}
