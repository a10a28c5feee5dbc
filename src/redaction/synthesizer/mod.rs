//! Replacement synthesizer
//!
//! Produces a stand-in value for a category. Generators are looked up by
//! category; a category without a generator always receives its placeholder
//! token (`[LOCATION_CITY]`), so every category has a non-empty replacement.
//!
//! The random source is owned by the synthesizer and can be seeded, which
//! makes whole runs reproducible in tests.
//!
//! # Examples
//!
//! ```
//! use veil::domain::Category;
//! use veil::redaction::synthesizer::{ReplacementStrategy, Synthesizer};
//!
//! let synthesizer = Synthesizer::with_seed(ReplacementStrategy::Synthetic, 42);
//! let value = synthesizer.synthesize(&Category::new("dob"));
//! assert_eq!(value.len(), "01/01/1990".len());
//!
//! let fallback = synthesizer.synthesize(&Category::new("unregistered category xyz"));
//! assert_eq!(fallback, "[UNREGISTERED_CATEGORY_XYZ]");
//! ```

pub mod generators;

use crate::domain::Category;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::{Mutex, PoisonError};

/// Something that can produce a replacement value for one category
pub trait ValueGenerator: Send + Sync {
    /// Produce a fresh value
    fn generate(&self, rng: &mut dyn RngCore) -> String;

    /// Fixed value used by [`ReplacementStrategy::Static`]
    fn sample(&self) -> Option<String> {
        None
    }
}

impl<F> ValueGenerator for F
where
    F: Fn(&mut dyn RngCore) -> String + Send + Sync,
{
    fn generate(&self, rng: &mut dyn RngCore) -> String {
        (self)(rng)
    }
}

/// How replacement values are chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplacementStrategy {
    /// Realistic generated values
    #[default]
    Synthetic,
    /// Each generator's fixed sample value; no randomness
    Static,
    /// Placeholder token for every category
    Redact,
}

impl fmt::Display for ReplacementStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Synthetic => write!(f, "synthetic"),
            Self::Static => write!(f, "static"),
            Self::Redact => write!(f, "redact"),
        }
    }
}

impl FromStr for ReplacementStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "synthetic" => Ok(Self::Synthetic),
            "static" => Ok(Self::Static),
            "redact" => Ok(Self::Redact),
            _ => Err(format!(
                "Invalid replacement strategy '{s}'. Must be one of: synthetic, static, redact"
            )),
        }
    }
}

/// Category-keyed replacement value source
pub struct Synthesizer {
    strategy: ReplacementStrategy,
    generators: HashMap<Category, Box<dyn ValueGenerator>>,
    rng: Mutex<StdRng>,
}

impl Synthesizer {
    /// Create a synthesizer with the built-in generators and an entropy-seeded RNG
    pub fn new(strategy: ReplacementStrategy) -> Self {
        Self::with_rng(strategy, StdRng::from_entropy())
    }

    /// Create a synthesizer whose output sequence is fixed by `seed`
    pub fn with_seed(strategy: ReplacementStrategy, seed: u64) -> Self {
        Self::with_rng(strategy, StdRng::seed_from_u64(seed))
    }

    /// Create a synthesizer from an optional seed
    pub fn from_seed(strategy: ReplacementStrategy, seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::with_seed(strategy, seed),
            None => Self::new(strategy),
        }
    }

    fn with_rng(strategy: ReplacementStrategy, rng: StdRng) -> Self {
        let mut registry: HashMap<Category, Box<dyn ValueGenerator>> = HashMap::new();
        for (name, builtin) in generators::BUILTINS {
            registry.insert(Category::from(*name), Box::new(*builtin));
        }
        Self {
            strategy,
            generators: registry,
            rng: Mutex::new(rng),
        }
    }

    /// Create a synthesizer with no generators at all; every value is a placeholder
    pub fn empty() -> Self {
        Self {
            strategy: ReplacementStrategy::Synthetic,
            generators: HashMap::new(),
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Register (or replace) the generator for a category
    pub fn register<G>(&mut self, category: impl Into<Category>, generator: G)
    where
        G: ValueGenerator + 'static,
    {
        self.generators.insert(category.into(), Box::new(generator));
    }

    /// Check whether a category has a registered generator
    pub fn has_generator(&self, category: &str) -> bool {
        self.generators.contains_key(category)
    }

    /// Active strategy
    pub fn strategy(&self) -> ReplacementStrategy {
        self.strategy
    }

    /// Produce a replacement value for `category`
    ///
    /// Never returns an empty string: a missing generator, a generator
    /// without a sample under the static strategy, or a generator that
    /// returns nothing all fall back to [`Category::placeholder`].
    pub fn synthesize(&self, category: &Category) -> String {
        let value = match (self.strategy, self.generators.get(category.as_str())) {
            (ReplacementStrategy::Redact, _) | (_, None) => None,
            (ReplacementStrategy::Static, Some(generator)) => generator.sample(),
            (ReplacementStrategy::Synthetic, Some(generator)) => {
                let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
                Some(generator.generate(&mut *rng))
            }
        };

        match value {
            Some(value) if !value.is_empty() => value,
            _ => category.placeholder(),
        }
    }
}

impl Default for Synthesizer {
    fn default() -> Self {
        Self::new(ReplacementStrategy::default())
    }
}

impl fmt::Debug for Synthesizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Synthesizer")
            .field("strategy", &self.strategy)
            .field("generators", &self.generators.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::redaction::taxonomy;

    #[test]
    fn test_placeholder_for_unregistered_category() {
        let synthesizer = Synthesizer::default();
        let value = synthesizer.synthesize(&Category::new("unregistered category xyz"));
        assert_eq!(value, "[UNREGISTERED_CATEGORY_XYZ]");
    }

    #[test]
    fn test_redact_strategy_always_placeholder() {
        let synthesizer = Synthesizer::new(ReplacementStrategy::Redact);
        assert_eq!(synthesizer.synthesize(&Category::new("ssn")), "[SSN]");
        assert_eq!(
            synthesizer.synthesize(&Category::new("location city")),
            "[LOCATION_CITY]"
        );
    }

    #[test]
    fn test_static_strategy_uses_samples() {
        let synthesizer = Synthesizer::new(ReplacementStrategy::Static);
        assert_eq!(synthesizer.synthesize(&Category::new("name")), "John Doe");
        assert_eq!(synthesizer.synthesize(&Category::new("ssn")), "123-45-6789");
        assert_eq!(synthesizer.synthesize(&Category::new("name")), "John Doe");
    }

    #[test]
    fn test_seeded_synthesizers_agree() {
        let a = Synthesizer::with_seed(ReplacementStrategy::Synthetic, 99);
        let b = Synthesizer::with_seed(ReplacementStrategy::Synthetic, 99);
        for category in ["name", "email address", "phone number", "money"] {
            let category = Category::new(category);
            assert_eq!(a.synthesize(&category), b.synthesize(&category));
        }
    }

    #[test]
    fn test_every_category_has_generator() {
        let synthesizer = Synthesizer::default();
        for category in taxonomy::all_categories() {
            assert!(synthesizer.has_generator(category.as_str()));
            assert!(!synthesizer.synthesize(&category).is_empty());
        }
    }

    #[test]
    fn test_register_closure_generator() {
        let mut synthesizer = Synthesizer::with_seed(ReplacementStrategy::Synthetic, 1);
        synthesizer.register("employee id", |_rng: &mut dyn RngCore| "EMP-000000".to_string());
        assert_eq!(
            synthesizer.synthesize(&Category::new("employee id")),
            "EMP-000000"
        );
    }

    #[test]
    fn test_empty_generator_output_falls_back() {
        let mut synthesizer = Synthesizer::with_seed(ReplacementStrategy::Synthetic, 1);
        synthesizer.register("name", |_rng: &mut dyn RngCore| String::new());
        assert_eq!(synthesizer.synthesize(&Category::new("name")), "[NAME]");
    }

    #[test]
    fn test_static_without_sample_falls_back() {
        let mut synthesizer = Synthesizer::new(ReplacementStrategy::Static);
        synthesizer.register("name", |_rng: &mut dyn RngCore| "Jane".to_string());
        assert_eq!(synthesizer.synthesize(&Category::new("name")), "[NAME]");
    }

    #[test]
    fn test_empty_synthesizer() {
        let synthesizer = Synthesizer::empty();
        assert!(!synthesizer.has_generator("name"));
        assert_eq!(synthesizer.synthesize(&Category::new("name")), "[NAME]");
    }

    #[test]
    fn test_strategy_from_str() {
        assert_eq!(
            "STATIC".parse::<ReplacementStrategy>().unwrap(),
            ReplacementStrategy::Static
        );
        assert!("token".parse::<ReplacementStrategy>().is_err());
        assert_eq!(ReplacementStrategy::Redact.to_string(), "redact");
    }

    #[test]
    fn test_synthesizer_is_shareable_across_threads() {
        let synthesizer = std::sync::Arc::new(Synthesizer::with_seed(
            ReplacementStrategy::Synthetic,
            5,
        ));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let synthesizer = std::sync::Arc::clone(&synthesizer);
                std::thread::spawn(move || synthesizer.synthesize(&Category::new("name")))
            })
            .collect();
        for handle in handles {
            assert!(!handle.join().unwrap().is_empty());
        }
    }
}
