//! Natural-language fragments consumed by the composers.

use std::ops::Range;

use fake::Fake;
use fake::faker::internet::en::DomainSuffix;
use fake::faker::lorem::en::{Sentence, Word};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of sentences, words, links and numbers.
///
/// The composers treat implementations as opaque: output is inserted as text
/// and escaped by the markup layer.
pub trait TextSource {
    fn sentence(&mut self) -> String;

    fn sentences(&mut self, count: usize) -> Vec<String> {
        (0..count).map(|_| self.sentence()).collect()
    }

    fn word(&mut self) -> String;

    fn url(&mut self) -> String;

    fn random_number(&mut self) -> u64;

    /// Float in `[min, max]` rounded to `precision` decimals.
    fn random_float(&mut self, precision: u32, min: f64, max: f64) -> f64;
}

const DEFAULT_SENTENCE_WORDS: Range<usize> = 4..12;
const MAX_RANDOM_NUMBER: u64 = 999_999;

/// Lorem ipsum text backed by the `fake` lorem and internet fakers.
#[derive(Debug, Clone)]
pub struct LoremTextSource {
    rng: ChaCha8Rng,
    sentence_words: Range<usize>,
}

impl LoremTextSource {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            sentence_words: DEFAULT_SENTENCE_WORDS,
        }
    }

    pub fn from_entropy() -> Self {
        Self::seeded(rand::random())
    }

    /// Word count range for generated sentences; an empty range is ignored.
    pub fn with_sentence_words(mut self, words: Range<usize>) -> Self {
        if !words.is_empty() {
            self.sentence_words = words;
        }
        self
    }
}

impl TextSource for LoremTextSource {
    fn sentence(&mut self) -> String {
        Sentence(self.sentence_words.clone()).fake_with_rng(&mut self.rng)
    }

    fn word(&mut self) -> String {
        Word().fake_with_rng(&mut self.rng)
    }

    fn url(&mut self) -> String {
        let host: String = Word().fake_with_rng(&mut self.rng);
        let suffix: String = DomainSuffix().fake_with_rng(&mut self.rng);
        let path: String = Word().fake_with_rng(&mut self.rng);
        format!(
            "https://{}.{}/{}",
            host.to_lowercase(),
            suffix.to_lowercase(),
            path.to_lowercase()
        )
    }

    fn random_number(&mut self) -> u64 {
        self.rng.random_range(0..=MAX_RANDOM_NUMBER)
    }

    fn random_float(&mut self, precision: u32, min: f64, max: f64) -> f64 {
        let value = min + self.rng.random::<f64>() * (max - min);
        let factor = 10_f64.powi(precision.min(15) as i32);
        (value * factor).round() / factor
    }
}
