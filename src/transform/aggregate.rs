//! Reference-set averaging and assembly of the indicator render input.

use std::collections::{BTreeMap, HashSet};

use crate::domain::Observation;

/// Mean value per year across the reference entities, tagged with the
/// sentinel key.
///
/// The mean at each year runs over the reference entities that actually have
/// data there; a year with no reference data simply produces no row.
pub fn reference_average(
    obs: &[Observation],
    reference: &[&str],
    sentinel: &str,
) -> Vec<Observation> {
    let mut sums: BTreeMap<i32, (f64, usize)> = BTreeMap::new();
    for o in obs {
        if reference.iter().any(|r| *r == o.key) {
            let entry = sums.entry(o.year).or_insert((0.0, 0));
            entry.0 += o.value;
            entry.1 += 1;
        }
    }

    sums.into_iter()
        .map(|(year, (sum, n))| Observation {
            key: sentinel.to_string(),
            year,
            value: sum / n as f64,
        })
        .collect()
}

/// Combine the headline series with the synthetic average into the final
/// render input: restrict to the headline keys, drop (key, year) duplicates
/// keeping the first occurrence, sort by (key, year), and drop non-positive
/// values.
pub fn combine(
    obs: &[Observation],
    headline: &[&str],
    average: Vec<Observation>,
) -> Vec<Observation> {
    let mut combined: Vec<Observation> = obs
        .iter()
        .filter(|o| headline.iter().any(|h| *h == o.key))
        .cloned()
        .collect();
    combined.extend(average);

    // Duplicates appear when a dataset carries several unit/item combinations
    // for one (geo, year); the first occurrence wins.
    let mut seen: HashSet<(String, i32)> = HashSet::new();
    combined.retain(|o| seen.insert((o.key.clone(), o.year)));

    combined.sort_by(|a, b| a.key.cmp(&b.key).then(a.year.cmp(&b.year)));
    combined.retain(|o| o.value.is_finite() && o.value > 0.0);
    combined
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(key: &str, year: i32, value: f64) -> Observation {
        Observation {
            key: key.to_string(),
            year,
            value,
        }
    }

    #[test]
    fn averages_only_entities_present_at_each_year() {
        // X: {2020: 10, 2021: 20}, Y: {2020: 30}.
        let input = vec![obs("X", 2020, 10.0), obs("X", 2021, 20.0), obs("Y", 2020, 30.0)];
        let avg = reference_average(&input, &["X", "Y"], "AVG");

        assert_eq!(avg.len(), 2);
        assert_eq!(avg[0], obs("AVG", 2020, 20.0));
        assert_eq!(avg[1], obs("AVG", 2021, 20.0));
    }

    #[test]
    fn ignores_entities_outside_the_reference_set() {
        let input = vec![obs("X", 2020, 10.0), obs("EL", 2020, 1000.0)];
        let avg = reference_average(&input, &["X"], "AVG");
        assert_eq!(avg, vec![obs("AVG", 2020, 10.0)]);
    }

    #[test]
    fn year_without_reference_data_produces_no_row() {
        let avg = reference_average(&[obs("EL", 2020, 5.0)], &["X", "Y"], "AVG");
        assert!(avg.is_empty());
    }

    #[test]
    fn combine_restricts_dedups_sorts_and_filters() {
        let input = vec![
            obs("EL", 2021, 2.0),
            obs("EL", 2020, 1.0),
            // Duplicate (EL, 2020) from a second unit; first wins.
            obs("EL", 2020, 99.0),
            // Not a headline key.
            obs("DE", 2020, 7.0),
            // Non-positive values never reach the renderer.
            obs("EU27_2020", 2020, 0.0),
            obs("EU27_2020", 2021, -3.0),
            obs("EU27_2020", 2022, 4.0),
        ];
        let combined = combine(&input, &["EL", "EU27_2020"], vec![obs("AVG", 2020, 5.0)]);

        assert_eq!(
            combined,
            vec![
                obs("AVG", 2020, 5.0),
                obs("EL", 2020, 1.0),
                obs("EL", 2021, 2.0),
                obs("EU27_2020", 2022, 4.0),
            ]
        );

        // No duplicate (key, year) pairs, ascending order.
        let mut pairs: Vec<(String, i32)> =
            combined.iter().map(|o| (o.key.clone(), o.year)).collect();
        let sorted = pairs.clone();
        pairs.dedup();
        assert_eq!(pairs, sorted);
    }
}
