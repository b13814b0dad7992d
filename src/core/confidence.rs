/// Signal-strength proxy for a pair: the sum of both legs' absolute scores.
/// Used for sorting and display only.
pub fn score(t_base: f64, t_quote: f64) -> f64 {
    t_base.abs() + t_quote.abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adds_magnitudes() {
        assert!((score(7.0, -4.0) - 11.0).abs() < 1e-9);
        assert!((score(-2.5, -2.5) - 5.0).abs() < 1e-9);
        assert_eq!(score(0.0, 0.0), 0.0);
    }
}
