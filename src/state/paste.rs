use std::collections::BTreeSet;
use tracing::debug;

use crate::models::{CorrelationSet, Currency};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PasteReport {
    /// Distinct currencies whose readings were replaced.
    pub updated: usize,
    /// Non-blank rows that were ignored.
    pub skipped: usize,
}

/// Apply tab-separated `Currency\tD1\t4H\t1H` rows to `set`.
///
/// A row is applied only when its first cell names a known currency and the
/// next three cells are finite numbers; extra trailing cells are ignored.
/// Anything else (headers, typos, short rows) is skipped without touching
/// the set.
pub fn import_paste(set: &mut CorrelationSet, text: &str) -> PasteReport {
    let mut updated = BTreeSet::new();
    let mut skipped = 0;

    for line in text.lines() {
        if line.trim().is_empty() {
            continue;
        }
        match parse_row(line) {
            Some((currency, d1, h4, h1)) if set.set_all(currency, d1, h4, h1).is_ok() => {
                updated.insert(currency);
            }
            _ => {
                debug!("Skipping paste row: {:?}", line);
                skipped += 1;
            }
        }
    }

    PasteReport {
        updated: updated.len(),
        skipped,
    }
}

fn parse_row(line: &str) -> Option<(Currency, f64, f64, f64)> {
    let cells: Vec<&str> = line.split('\t').map(str::trim).collect();
    if cells.len() < 4 {
        return None;
    }
    let currency = Currency::from_str_loose(cells[0])?;
    let num = |s: &str| s.parse::<f64>().ok().filter(|v| v.is_finite());
    Some((currency, num(cells[1])?, num(cells[2])?, num(cells[3])?))
}
