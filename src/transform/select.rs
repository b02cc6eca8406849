//! Top-N category selection for the sectoral chart.

use crate::domain::Observation;

/// Map category codes to display labels, sum per label across all periods,
/// and keep the `n` labels with the largest totals.
///
/// Categories without a label mapping are dropped. Ties in summed value break
/// by first appearance order in `obs`, so the result is deterministic.
pub fn top_categories(
    obs: &[Observation],
    labels: &[(&str, &str)],
    n: usize,
) -> Vec<Observation> {
    let labeled: Vec<Observation> = obs
        .iter()
        .filter_map(|o| {
            let label = labels.iter().find(|(code, _)| *code == o.key)?.1;
            Some(Observation {
                key: label.to_string(),
                year: o.year,
                value: o.value,
            })
        })
        .collect();

    // Totals in first-seen order; the stable sort keeps that order on ties.
    let mut totals: Vec<(String, f64)> = Vec::new();
    for o in &labeled {
        match totals.iter_mut().find(|(label, _)| *label == o.key) {
            Some((_, sum)) => *sum += o.value,
            None => totals.push((o.key.clone(), o.value)),
        }
    }
    totals.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    let keep: Vec<&str> = totals.iter().take(n).map(|(label, _)| label.as_str()).collect();

    labeled
        .into_iter()
        .filter(|o| keep.contains(&o.key.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const LABELS: &[(&str, &str)] = &[
        ("A", "Agriculture"),
        ("C", "Manufacturing"),
        ("L", "Real estate"),
    ];

    fn obs(key: &str, year: i32, value: f64) -> Observation {
        Observation {
            key: key.to_string(),
            year,
            value,
        }
    }

    #[test]
    fn keeps_the_largest_totals_and_drops_unmapped_codes() {
        let input = vec![
            obs("A", 2020, 1.0),
            obs("A", 2021, 1.0),
            obs("C", 2020, 5.0),
            obs("L", 2020, 3.0),
            // No mapping entry: dropped before ranking.
            obs("Z", 2020, 100.0),
        ];
        let top = top_categories(&input, LABELS, 2);

        let keys: Vec<&str> = top.iter().map(|o| o.key.as_str()).collect();
        assert!(keys.contains(&"Manufacturing"));
        assert!(keys.contains(&"Real estate"));
        assert!(!keys.contains(&"Agriculture"));
        assert!(!keys.iter().any(|k| *k == "Z"));
    }

    #[test]
    fn never_returns_more_than_n_labels() {
        let input = vec![obs("A", 2020, 1.0), obs("C", 2020, 2.0), obs("L", 2020, 3.0)];
        let top = top_categories(&input, LABELS, 7);
        let mut distinct: Vec<&str> = top.iter().map(|o| o.key.as_str()).collect();
        distinct.sort_unstable();
        distinct.dedup();
        assert!(distinct.len() <= 7);
        assert_eq!(distinct.len(), 3);
    }

    #[test]
    fn ties_break_by_first_appearance() {
        let input = vec![
            obs("L", 2020, 2.0),
            obs("A", 2020, 2.0),
            obs("C", 2020, 2.0),
        ];
        let top = top_categories(&input, LABELS, 2);
        let keys: Vec<&str> = top.iter().map(|o| o.key.as_str()).collect();
        assert_eq!(keys, vec!["Real estate", "Agriculture"]);
    }
}
