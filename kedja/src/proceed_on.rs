//! Chain-continuation sets.
//!
//! A `ProceedOn` names the verdicts that let the chain continue past a
//! slot; everything else is final there. The composer folds it into the
//! per-slot continuation bitmask the dispatch driver tests.

use kedja_core::{ParseError, Verdict};

/// The set of verdicts that permit the chain to proceed past one slot.
///
/// An empty set falls back to the flavor's default: accept plus the
/// unbound-slot sentinel, so a freshly composed chain runs end to end
/// even across unbound slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProceedOn<V: Verdict>(Vec<V>);

impl<V: Verdict> ProceedOn<V> {
    /// Build a continuation set from explicit verdicts. Empty input
    /// selects the flavor default.
    pub fn new<I: IntoIterator<Item = V>>(verdicts: I) -> Self {
        verdicts.into_iter().collect()
    }

    /// Parse a continuation set from raw wire values.
    pub fn from_raw_values<T: AsRef<[i32]>>(values: T) -> Result<Self, ParseError> {
        let entries = values.as_ref();
        if entries.is_empty() {
            return Ok(Self::default());
        }
        let mut res = Vec::with_capacity(entries.len());
        for e in entries {
            res.push(V::from_raw(*e)?);
        }
        Ok(ProceedOn(res))
    }

    /// Parse a continuation set from verdict names.
    pub fn from_names<S, T>(names: T) -> Result<Self, ParseError>
    where
        S: AsRef<str>,
        T: AsRef<[S]>,
        V: std::str::FromStr<Err = ParseError>,
    {
        let entries = names.as_ref();
        if entries.is_empty() {
            return Ok(Self::default());
        }
        let mut res = Vec::with_capacity(entries.len());
        for e in entries {
            res.push(e.as_ref().parse()?);
        }
        Ok(ProceedOn(res))
    }

    /// Fold the set into a continuation bitmask, using the flavor's
    /// verdict-to-bit mapping.
    pub fn mask(&self) -> u32 {
        self.0
            .iter()
            .fold(0, |mask, verdict| mask | (1u32 << verdict.chain_bit()))
    }

    /// The verdicts in this set, in insertion order.
    pub fn verdicts(&self) -> &[V] {
        &self.0
    }
}

impl<V: Verdict> Default for ProceedOn<V> {
    fn default() -> Self {
        ProceedOn(V::default_proceed_on().to_vec())
    }
}

impl<V: Verdict> FromIterator<V> for ProceedOn<V> {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        let mut iter = iter.into_iter().peekable();

        // make sure to default if the set is empty
        if iter.peek().is_none() {
            return Self::default();
        }

        ProceedOn(iter.collect())
    }
}

impl<V: Verdict> std::fmt::Display for ProceedOn<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let res: Vec<String> = self.0.iter().map(|v| v.to_string()).collect();
        write!(f, "{}", res.join(", "))
    }
}
