//! Finds the total amount in text recognized from a receipt image.
//!
//! Text recognizers confuse some characters with each other (e.g. `0` for
//! `o`), so the "total" keyword is matched through a table of accepted
//! look-alikes. The table is configurable so new confusions can be added
//! without touching the intake flow.

use std::collections::{BTreeMap, BTreeSet};

use regex::Regex;

use crate::amount::Amount;

/// The keyword that introduces the amount due on a receipt.
pub const TOTAL_KEYWORD: &str = "total";

/// The currency symbols accepted between the keyword and the amount by default.
pub const DEFAULT_CURRENCY_SYMBOLS: [char; 4] = ['$', '€', '£', '¥'];

/// Characters a text recognizer is known to produce in place of a letter.
///
/// Matching is case-insensitive, so entries only need to be given in lower case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confusions(BTreeMap<char, BTreeSet<char>>);

impl Confusions {
    /// A table without any confusions: the keyword must be spelled exactly.
    pub fn none() -> Self {
        Self(BTreeMap::new())
    }

    /// Accept `look_alike` wherever `letter` is expected.
    pub fn with(mut self, letter: char, look_alike: char) -> Self {
        self.0
            .entry(letter.to_ascii_lowercase())
            .or_default()
            .insert(look_alike.to_ascii_lowercase());
        self
    }

    /// The look-alikes accepted for `letter`.
    pub fn look_alikes(&self, letter: char) -> impl Iterator<Item = char> + '_ {
        self.0
            .get(&letter.to_ascii_lowercase())
            .into_iter()
            .flat_map(|look_alikes| look_alikes.iter().copied())
    }

    /// A regex fragment that matches `letter` or any of its look-alikes.
    fn pattern_for(&self, letter: char) -> String {
        let mut characters = String::new();
        for character in std::iter::once(letter).chain(self.look_alikes(letter)) {
            characters.push_str(&regex::escape(&character.to_string()));
        }

        format!("[{characters}]")
    }
}

impl Default for Confusions {
    /// The confusions seen in practice: zero for "o" and "i" for "l".
    fn default() -> Self {
        Self::none().with('o', '0').with('l', 'i')
    }
}

/// Extracts the total from unstructured receipt text.
#[derive(Debug, Clone)]
pub struct AmountParser {
    pattern: Regex,
}

impl AmountParser {
    /// Build a parser that tolerates `confusions` in the "total" keyword and
    /// accepts any of `currency_symbols` before the amount.
    pub fn new(confusions: &Confusions, currency_symbols: &[char]) -> Result<Self, regex::Error> {
        let keyword: String = TOTAL_KEYWORD
            .chars()
            .map(|letter| confusions.pattern_for(letter))
            .collect();

        let currency = if currency_symbols.is_empty() {
            String::new()
        } else {
            let symbols: String = currency_symbols
                .iter()
                .map(|symbol| regex::escape(&symbol.to_string()))
                .collect();
            format!("(?:[{symbols}]\\s*)?")
        };

        let pattern = Regex::new(&format!(
            r"(?i){keyword}\s*:?\s*{currency}(\d+\.\d{{2}})\b"
        ))?;

        Ok(Self { pattern })
    }

    /// Find the amount on the last "total" line of `text`.
    ///
    /// Receipts list subtotals and taxes before the grand total, so the last
    /// match wins, including the rightmost of several matches on one line. An
    /// amount must have exactly two decimal places.
    ///
    /// # Returns
    /// `None` if there is no match or the last match is not a positive amount.
    pub fn parse(&self, text: &str) -> Option<Amount> {
        let last_match = self
            .pattern
            .captures_iter(text)
            .filter_map(|captures| captures.get(1))
            .last()?;

        match last_match.as_str().parse() {
            Ok(amount) => {
                tracing::debug!("Found total {amount} in recognized text");
                Some(amount)
            }
            Err(error) => {
                tracing::debug!("Ignoring total \"{}\": {error}", last_match.as_str());
                None
            }
        }
    }
}

impl Default for AmountParser {
    fn default() -> Self {
        Self::new(&Confusions::default(), &DEFAULT_CURRENCY_SYMBOLS)
            .expect("the default total pattern should always compile")
    }
}
