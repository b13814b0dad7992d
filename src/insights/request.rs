use serde::{Deserialize, Serialize};

use crate::core::aggregator::ResolvedPair;
use crate::models::Bias;

/// The minimal per-pair shape the recommendation service consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairSignal {
    pub pair: String,
    pub bias: Bias,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightRequest {
    pub pairs: Vec<PairSignal>,
    /// How many recommendations to ask for.
    pub top_n: usize,
}

impl InsightRequest {
    pub fn expected_len(&self) -> usize {
        self.top_n
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty() || self.top_n == 0
    }
}

/// Strip resolved pairs down to `{pair, bias, confidence}`, preserving order.
/// `top_n` is capped at the number of pairs offered.
pub fn build_request<'a, I>(resolved: I, top_n: usize) -> InsightRequest
where
    I: IntoIterator<Item = &'a ResolvedPair>,
{
    let pairs: Vec<PairSignal> = resolved
        .into_iter()
        .map(|p| PairSignal {
            pair: p.symbol.to_string(),
            bias: p.bias,
            confidence: p.confidence,
        })
        .collect();
    let top_n = top_n.min(pairs.len());
    InsightRequest { pairs, top_n }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{resolve_pairs, StrengthClassifier, StrengthProfile};
    use crate::models::PAIR_GROUPS;
    use crate::test_helpers::sample_correlations;

    #[test]
    fn request_mirrors_plan_order() {
        let plan = resolve_pairs(
            sample_correlations().as_slice(),
            PAIR_GROUPS,
            &StrengthClassifier::new(StrengthProfile::Narrow),
        )
        .unwrap();
        let req = build_request(plan.pairs(), 5);
        assert_eq!(req.pairs.len(), 21);
        assert_eq!(req.top_n, 5);
        for (sig, p) in req.pairs.iter().zip(plan.pairs()) {
            assert_eq!(sig.pair, p.symbol);
            assert_eq!(sig.bias, p.bias);
            assert_eq!(sig.confidence, p.confidence);
        }
    }

    #[test]
    fn top_n_is_capped() {
        let plan = resolve_pairs(
            sample_correlations().as_slice(),
            PAIR_GROUPS,
            &StrengthClassifier::new(StrengthProfile::Narrow),
        )
        .unwrap();
        let req = build_request(plan.pairs().take(3), 6);
        assert_eq!(req.top_n, 3);
        let empty = build_request(std::iter::empty(), 5);
        assert!(empty.is_empty());
    }

    #[test]
    fn wire_shape() {
        let req = InsightRequest {
            pairs: vec![PairSignal {
                pair: "EURUSD".into(),
                bias: Bias::Buy,
                confidence: 11.0,
            }],
            top_n: 1,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["pairs"][0]["pair"], "EURUSD");
        assert_eq!(json["pairs"][0]["bias"], "BUY");
        assert_eq!(json["pairs"][0]["confidence"], 11.0);
        assert_eq!(json["top_n"], 1);
    }
}
