use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

use crate::core::bias::resolve_bias;
use crate::core::classifier::StrengthClassifier;
use crate::core::confidence;
use crate::errors::Result;
use crate::models::{Bias, CorrelationInput, Currency, GroupIndex, PairGroup, StrengthLabel};

/// A correlation row with its derived score and band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClassifiedCurrency {
    pub id: Currency,
    pub d1: f64,
    pub h4: f64,
    pub h1: f64,
    pub total: f64,
    pub label: StrengthLabel,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResolvedPair {
    pub symbol: &'static str,
    pub base: Currency,
    pub quote: Currency,
    pub base_label: StrengthLabel,
    pub quote_label: StrengthLabel,
    pub bias: Bias,
    pub base_score: f64,
    pub quote_score: f64,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedGroup {
    pub index: GroupIndex,
    pub pairs: Vec<ResolvedPair>,
}

/// Which biases a trade-plan view shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BiasFilter {
    #[default]
    All,
    /// BUY or SELL.
    Actionable,
    Neutral,
}

impl BiasFilter {
    pub fn admits(&self, bias: Bias) -> bool {
        match self {
            BiasFilter::All => true,
            BiasFilter::Actionable => bias.is_actionable(),
            BiasFilter::Neutral => bias == Bias::Neutral,
        }
    }

    pub fn from_str_loose(s: &str) -> Option<BiasFilter> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Some(BiasFilter::All),
            "actionable" | "buy-or-sell" | "trade" => Some(BiasFilter::Actionable),
            "neutral" => Some(BiasFilter::Neutral),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PairFilter {
    pub bias: BiasFilter,
    /// Case-insensitive substring of the pair symbol or group index.
    pub text: String,
}

/// Everything derived from one correlation snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradePlan {
    pub currencies: Vec<ClassifiedCurrency>,
    pub groups: Vec<ResolvedGroup>,
}

pub fn classify_currencies(
    inputs: &[CorrelationInput],
    classifier: &StrengthClassifier,
) -> Result<Vec<ClassifiedCurrency>> {
    inputs
        .iter()
        .map(|row| {
            let total = row.total();
            Ok(ClassifiedCurrency {
                id: row.id,
                d1: row.d1,
                h4: row.h4,
                h1: row.h1,
                total,
                label: classifier.classify(total)?,
            })
        })
        .collect()
}

/// Resolve every pair in `groups` against the given readings. A currency with
/// no row resolves as Neutral with a zero score.
pub fn resolve_pairs(
    inputs: &[CorrelationInput],
    groups: &[PairGroup],
    classifier: &StrengthClassifier,
) -> Result<TradePlan> {
    let currencies = classify_currencies(inputs, classifier)?;

    let lookup: HashMap<Currency, (StrengthLabel, f64)> = currencies
        .iter()
        .map(|c| (c.id, (c.label, c.total)))
        .collect();
    let side = |c: Currency| {
        lookup
            .get(&c)
            .copied()
            .unwrap_or((StrengthLabel::Neutral, 0.0))
    };

    let groups: Vec<ResolvedGroup> = groups
        .iter()
        .map(|group| ResolvedGroup {
            index: group.index,
            pairs: group
                .pairs
                .iter()
                .map(|p| {
                    let (base_label, base_score) = side(p.base);
                    let (quote_label, quote_score) = side(p.quote);
                    ResolvedPair {
                        symbol: p.symbol,
                        base: p.base,
                        quote: p.quote,
                        base_label,
                        quote_label,
                        bias: resolve_bias(base_label, quote_label),
                        base_score,
                        quote_score,
                        confidence: confidence::score(base_score, quote_score),
                    }
                })
                .collect(),
        })
        .collect();

    let plan = TradePlan { currencies, groups };
    debug!(
        pairs = plan.pairs().count(),
        actionable = plan.pairs().filter(|p| p.bias.is_actionable()).count(),
        "Trade plan resolved"
    );
    Ok(plan)
}

/// True once any currency has a non-zero strength score.
pub fn has_correlation_values(inputs: &[CorrelationInput]) -> bool {
    inputs.iter().any(|row| row.total() != 0.0)
}

pub fn filter_currencies<'a>(
    currencies: &'a [ClassifiedCurrency],
    text: &str,
) -> Vec<&'a ClassifiedCurrency> {
    let needle = text.trim().to_ascii_lowercase();
    currencies
        .iter()
        .filter(|c| c.id.as_str().to_ascii_lowercase().contains(&needle))
        .collect()
}

impl TradePlan {
    pub fn pairs(&self) -> impl Iterator<Item = &ResolvedPair> {
        self.groups.iter().flat_map(|g| g.pairs.iter())
    }

    pub fn find(&self, symbol: &str) -> Option<&ResolvedPair> {
        let symbol = symbol.trim();
        self.pairs().find(|p| p.symbol.eq_ignore_ascii_case(symbol))
    }

    pub fn has_correlation_values(&self) -> bool {
        self.currencies.iter().any(|c| c.total != 0.0)
    }

    /// BUY and SELL pairs, strongest confidence first. Ties keep taxonomy order.
    pub fn ranked_actionable(&self) -> Vec<&ResolvedPair> {
        let mut out: Vec<&ResolvedPair> =
            self.pairs().filter(|p| p.bias.is_actionable()).collect();
        out.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        out
    }

    /// Apply a view filter. The plan itself is never modified; groups left with
    /// no pairs are dropped from the view.
    pub fn filter(&self, filter: &PairFilter) -> Vec<ResolvedGroup> {
        let needle = filter.text.trim().to_ascii_lowercase();

        self.groups
            .iter()
            .filter_map(|group| {
                let index_matches = !needle.is_empty()
                    && group.index.as_str().to_ascii_lowercase().contains(&needle);
                let pairs: Vec<ResolvedPair> = group
                    .pairs
                    .iter()
                    .filter(|p| filter.bias.admits(p.bias))
                    .filter(|p| {
                        needle.is_empty()
                            || index_matches
                            || p.symbol.to_ascii_lowercase().contains(&needle)
                    })
                    .copied()
                    .collect();
                if pairs.is_empty() {
                    None
                } else {
                    Some(ResolvedGroup {
                        index: group.index,
                        pairs,
                    })
                }
            })
            .collect()
    }
}
