/*!

An implementation of the PROMETHEE II outranking method.

Given a set of alternatives scored on several criteria, each criterion with
a direction, a weight and a preference function, PROMETHEE II compares every
pair of alternatives criterion by criterion, aggregates the preferences and
derives for each alternative:

- a positive flow (how much it outranks the others),
- a negative flow (how much it is outranked),
- a net flow, the difference of both, which induces a complete ranking.

```
use outranking::*;

let criteria = vec![
    Criterion::new("cost", Direction::Minimize, 2.0, PreferenceFunction::VShape { p: 100.0 }),
    Criterion::new("quality", Direction::Maximize, 1.0, PreferenceFunction::Usual),
];
let alternatives = vec![Alternative::new("Acme"), Alternative::new("Globex")];
let scores = vec![
    Score::new("Acme", "cost", 950.0),
    Score::new("Acme", "quality", 4.0),
    Score::new("Globex", "cost", 1000.0),
    Score::new("Globex", "quality", 3.0),
];

let result = run_promethee(&scores, &criteria, &alternatives, &RankingRules::DEFAULT_RULES)?;
assert_eq!(result.ranked_names(), vec!["Acme".to_string(), "Globex".to_string()]);
# Ok::<(), OutrankingError>(())
```

See the [manual] for the details of the computation.
*/
pub mod builder;
mod config;
pub mod manual;
mod preference;

use log::{debug, info};
use snafu::ensure;

use std::collections::{HashMap, HashSet};

pub use crate::config::*;

// **** Private structures ****

/// The validated input of a run: only the selected alternatives and
/// criteria, and a complete matrix of scores.
struct CheckResult {
    alternatives: Vec<String>,
    criteria: Vec<Criterion>,
    // scores[alternative][criterion]
    scores: Vec<Vec<f64>>,
    total_weight: f64,
}

/// Runs PROMETHEE II on the given scores.
///
/// Arguments:
/// * `scores` the cells of the performance matrix. Cells for alternatives or
/// criteria that are not selected are ignored.
/// * `criteria` the criteria, in the order they are aggregated
/// * `alternatives` the alternatives. The order is kept for the output matrices
/// and to order alternatives with exactly the same net flow.
/// * `rules` the scoring conventions
///
/// All the inputs are validated before anything is computed.
pub fn run_promethee(
    scores: &[Score],
    criteria: &[Criterion],
    alternatives: &[Alternative],
    rules: &RankingRules,
) -> Result<OutrankingResult, OutrankingError> {
    info!(
        "Processing {:?} scores, {:?} alternatives, {:?} criteria, rules: {:?}",
        scores.len(),
        alternatives.len(),
        criteria.len(),
        rules
    );

    let cr = checks(scores, criteria, alternatives, rules)?;
    for (idx, name) in cr.alternatives.iter().enumerate() {
        info!("Alternative: {}: {}", idx + 1, name);
    }
    for c in cr.criteria.iter() {
        info!(
            "Criterion: {} ({}, weight {}, {:?})",
            c.name,
            c.direction.name(),
            c.weight,
            c.function
        );
    }

    let n = cr.alternatives.len();
    let mut criteria_matrices: Vec<CriterionMatrices> = Vec::new();
    let mut aggregated: Vec<Vec<f64>> = vec![vec![0.0; n]; n];

    for (k, criterion) in cr.criteria.iter().enumerate() {
        let column: Vec<f64> = cr.scores.iter().map(|row| row[k]).collect();
        let oriented = oriented_scores(&column, criterion.direction, rules.score_mode);
        debug!(
            "run_promethee: criterion {:?} oriented scores: {:?}",
            criterion.name, oriented
        );

        let mut differences: Vec<Vec<f64>> = vec![vec![0.0; n]; n];
        let mut preferences: Vec<Vec<f64>> = vec![vec![0.0; n]; n];
        for i in 0..n {
            for j in 0..n {
                if i == j {
                    continue;
                }
                let d = oriented[i] - oriented[j];
                let pref = criterion.function.evaluate(d);
                differences[i][j] = d;
                preferences[i][j] = pref;
                aggregated[i][j] += criterion.weight * pref;
            }
        }
        criteria_matrices.push(CriterionMatrices {
            criterion: criterion.name.clone(),
            differences,
            preferences,
        });
    }

    if rules.flow_scaling.divides_by_total_weight() {
        for row in aggregated.iter_mut() {
            for x in row.iter_mut() {
                *x /= cr.total_weight;
            }
        }
    }
    debug!("run_promethee: aggregated preferences: {:?}", aggregated);

    let pair_divisor = if rules.flow_scaling.divides_by_pair_count() {
        (n - 1) as f64
    } else {
        1.0
    };
    let flows: Vec<(f64, f64)> = (0..n)
        .map(|i| {
            let mut outgoing = 0.0;
            let mut incoming = 0.0;
            for j in (0..n).filter(|j| *j != i) {
                outgoing += aggregated[i][j];
                incoming += aggregated[j][i];
            }
            (outgoing / pair_divisor, incoming / pair_divisor)
        })
        .collect();

    let ranking = rank_alternatives(&cr.alternatives, &flows);
    for f in ranking.iter() {
        info!(
            "{:>4} {:<20} phi+ {:>8.4} phi- {:>8.4} phi {:>8.4}",
            f.rank, f.name, f.positive_flow, f.negative_flow, f.net_flow
        );
    }
    let relations = pairwise_relations(&ranking, rules.indifference_threshold);

    Ok(OutrankingResult {
        alternatives: cr.alternatives,
        ranking,
        relations,
        criteria: criteria_matrices,
        aggregated,
        total_weight: cr.total_weight,
    })
}

/// Scores turned such that a higher value is always more desirable.
///
/// In raw mode, minimized criteria are negated, which negates the differences.
/// In min-max mode, the direction is folded in the normalization itself.
fn oriented_scores(column: &[f64], direction: Direction, mode: ScoreMode) -> Vec<f64> {
    match mode {
        ScoreMode::Raw => match direction {
            Direction::Maximize => column.to_vec(),
            Direction::Minimize => column.iter().map(|x| -x).collect(),
        },
        ScoreMode::MinMax => {
            let min = column.iter().cloned().fold(f64::INFINITY, f64::min);
            let max = column.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            // Halved so that the range of finite scores stays finite.
            let (min, max) = (min / 2.0, max / 2.0);
            let range = max - min;
            // A constant column cannot discriminate anything.
            if range <= 0.0 {
                return vec![0.0; column.len()];
            }
            column
                .iter()
                .map(|x| match direction {
                    Direction::Maximize => (x / 2.0 - min) / range,
                    Direction::Minimize => (max - x / 2.0) / range,
                })
                .collect()
        }
    }
}

// Sorted by decreasing net flow. The sort is stable: exact ties keep the input order.
fn rank_alternatives(names: &[String], flows: &[(f64, f64)]) -> Vec<AlternativeFlows> {
    let mut res: Vec<AlternativeFlows> = names
        .iter()
        .zip(flows.iter())
        .map(|(name, (pos, neg))| AlternativeFlows {
            name: name.clone(),
            rank: 0,
            positive_flow: *pos,
            negative_flow: *neg,
            net_flow: pos - neg,
        })
        .collect();
    res.sort_by(|a, b| b.net_flow.total_cmp(&a.net_flow));
    for (idx, f) in res.iter_mut().enumerate() {
        f.rank = (idx + 1) as u32;
    }
    res
}

fn pairwise_relations(ranking: &[AlternativeFlows], threshold: f64) -> Vec<PairwiseRelation> {
    let mut res: Vec<PairwiseRelation> = Vec::new();
    for (idx, first) in ranking.iter().enumerate() {
        for second in ranking[idx + 1..].iter() {
            let relation = if (first.net_flow - second.net_flow).abs() < threshold {
                Relation::Indifference
            } else {
                Relation::Preference
            };
            res.push(PairwiseRelation {
                first: first.name.clone(),
                relation,
                second: second.name.clone(),
            });
        }
    }
    res
}

// Validation of all the preconditions. Nothing gets computed if any of them fails.
fn checks(
    scores: &[Score],
    criteria: &[Criterion],
    alternatives: &[Alternative],
    rules: &RankingRules,
) -> Result<CheckResult, OutrankingError> {
    let threshold = rules.indifference_threshold;
    ensure!(
        threshold.is_finite() && threshold >= 0.0,
        InvalidIndifferenceThresholdSnafu { value: threshold }
    );

    let mut seen: HashSet<&str> = HashSet::new();
    for a in alternatives.iter() {
        ensure!(
            seen.insert(a.name.as_str()),
            DuplicateAlternativeSnafu {
                name: a.name.clone()
            }
        );
    }
    let selected_alternatives: Vec<String> = alternatives
        .iter()
        .filter(|a| !a.excluded)
        .map(|a| a.name.clone())
        .collect();
    ensure!(
        selected_alternatives.len() >= 2,
        InsufficientAlternativesSnafu {
            count: selected_alternatives.len()
        }
    );

    let mut seen: HashSet<&str> = HashSet::new();
    for c in criteria.iter() {
        ensure!(
            seen.insert(c.name.as_str()),
            DuplicateCriterionSnafu {
                name: c.name.clone()
            }
        );
    }
    let selected_criteria: Vec<Criterion> =
        criteria.iter().filter(|c| !c.excluded).cloned().collect();
    ensure!(
        !selected_criteria.is_empty(),
        InsufficientCriteriaSnafu {
            count: selected_criteria.len()
        }
    );

    for c in selected_criteria.iter() {
        ensure!(
            c.weight.is_finite() && c.weight >= 0.0,
            InvalidWeightsSnafu {
                criterion: Some(c.name.clone()),
                weight: c.weight
            }
        );
        c.function.validate(&c.name)?;
    }
    let total_weight: f64 = selected_criteria.iter().map(|c| c.weight).sum();
    ensure!(
        total_weight.is_finite() && total_weight > 0.0,
        InvalidWeightsSnafu {
            criterion: None::<String>,
            weight: total_weight
        }
    );

    let alternative_ids: HashMap<&str, usize> = selected_alternatives
        .iter()
        .enumerate()
        .map(|(idx, name)| (name.as_str(), idx))
        .collect();
    let criterion_ids: HashMap<&str, usize> = selected_criteria
        .iter()
        .enumerate()
        .map(|(idx, c)| (c.name.as_str(), idx))
        .collect();

    let mut cells: Vec<Vec<Option<f64>>> =
        vec![vec![None; selected_criteria.len()]; selected_alternatives.len()];
    for s in scores.iter() {
        let (i, k) = match (
            alternative_ids.get(s.alternative.as_str()),
            criterion_ids.get(s.criterion.as_str()),
        ) {
            (Some(i), Some(k)) => (*i, *k),
            _ => {
                debug!("checks: ignoring score {:?}", s);
                continue;
            }
        };
        ensure!(
            s.value.is_finite(),
            InvalidScoreSnafu {
                alternative: s.alternative.clone(),
                criterion: s.criterion.clone(),
                value: s.value
            }
        );
        ensure!(
            cells[i][k].is_none(),
            DuplicateScoreSnafu {
                alternative: s.alternative.clone(),
                criterion: s.criterion.clone()
            }
        );
        cells[i][k] = Some(s.value);
    }

    let mut complete: Vec<Vec<f64>> = Vec::new();
    for (i, row) in cells.iter().enumerate() {
        let mut values: Vec<f64> = Vec::new();
        for (k, cell) in row.iter().enumerate() {
            match cell {
                Some(x) => values.push(*x),
                None => {
                    return MissingDataSnafu {
                        alternative: selected_alternatives[i].clone(),
                        criterion: selected_criteria[k].name.clone(),
                    }
                    .fail();
                }
            }
        }
        complete.push(values);
    }

    debug!(
        "checks: {:?} alternatives, {:?} criteria, total weight {:?}",
        selected_alternatives.len(),
        selected_criteria.len(),
        total_weight
    );
    Ok(CheckResult {
        alternatives: selected_alternatives,
        criteria: selected_criteria,
        scores: complete,
        total_weight,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn alternatives(names: &[&str]) -> Vec<Alternative> {
        names.iter().map(|n| Alternative::new(*n)).collect()
    }

    // One row per alternative, values in the order of the criteria.
    fn table(rows: &[(&str, Vec<f64>)], criteria: &[Criterion]) -> Vec<Score> {
        let mut res = Vec::new();
        for (name, values) in rows.iter() {
            for (c, v) in criteria.iter().zip(values.iter()) {
                res.push(Score::new(*name, c.name.clone(), *v));
            }
        }
        res
    }

    fn run(rows: &[(&str, Vec<f64>)], criteria: &[Criterion]) -> OutrankingResult {
        let names: Vec<&str> = rows.iter().map(|(n, _)| *n).collect();
        run_promethee(
            &table(rows, criteria),
            criteria,
            &alternatives(&names),
            &RankingRules::DEFAULT_RULES,
        )
        .unwrap()
    }

    fn mixed_criteria() -> Vec<Criterion> {
        vec![
            Criterion::new(
                "cost",
                Direction::Minimize,
                3.0,
                PreferenceFunction::VShape { p: 200.0 },
            ),
            Criterion::new("quality", Direction::Maximize, 2.0, PreferenceFunction::Usual),
            Criterion::new(
                "delivery",
                Direction::Minimize,
                1.0,
                PreferenceFunction::VShapeIndifference { q: 2.0, p: 10.0 },
            ),
            Criterion::new(
                "experience",
                Direction::Maximize,
                1.5,
                PreferenceFunction::Gaussian { s: 4.0 },
            ),
        ]
    }

    fn suppliers() -> Vec<(&'static str, Vec<f64>)> {
        vec![
            ("S1", vec![1000.0, 4.0, 12.0, 10.0]),
            ("S2", vec![850.0, 3.0, 20.0, 4.0]),
            ("S3", vec![1200.0, 5.0, 7.0, 15.0]),
            ("S4", vec![990.0, 4.0, 15.0, 8.0]),
        ]
    }

    #[test]
    fn scenario_two_alternatives() {
        init_logger();
        let criteria = vec![Criterion::new(
            "c",
            Direction::Maximize,
            1.0,
            PreferenceFunction::Usual,
        )];
        let res = run(&[("A", vec![5.0]), ("B", vec![3.0])], &criteria);
        assert_eq!(res.aggregated_preference("A", "B"), Some(1.0));
        assert_eq!(res.aggregated_preference("B", "A"), Some(0.0));
        let a = res.flows("A").unwrap();
        assert_eq!(a.positive_flow, 1.0);
        assert_eq!(a.negative_flow, 0.0);
        assert_eq!(a.net_flow, 1.0);
        assert_eq!(res.flows("B").unwrap().net_flow, -1.0);
        assert_eq!(res.ranked_names(), vec!["A".to_string(), "B".to_string()]);
        assert_eq!(
            res.relations,
            vec![PairwiseRelation {
                first: "A".to_string(),
                relation: Relation::Preference,
                second: "B".to_string()
            }]
        );
    }

    #[test]
    fn scenario_minimized_criterion_with_tie() {
        init_logger();
        let criteria = vec![Criterion::new(
            "price",
            Direction::Minimize,
            1.0,
            PreferenceFunction::Usual,
        )];
        let res = run(
            &[("A", vec![10.0]), ("B", vec![20.0]), ("C", vec![10.0])],
            &criteria,
        );
        assert_eq!(res.criteria[0].differences[0][1], 10.0);
        assert_eq!(res.aggregated_preference("A", "B"), Some(1.0));
        assert_eq!(res.aggregated_preference("A", "C"), Some(0.0));

        let a = res.flows("A").unwrap().net_flow;
        let b = res.flows("B").unwrap().net_flow;
        let c = res.flows("C").unwrap().net_flow;
        assert!(a >= b);
        assert_eq!(a, 0.5);
        assert_eq!(c, 0.5);
        assert_eq!(b, -1.0);
        // Exact ties keep the input order.
        assert_eq!(
            res.ranked_names(),
            vec!["A".to_string(), "C".to_string(), "B".to_string()]
        );
        assert_eq!(res.relations[0].relation, Relation::Indifference);
        assert_eq!(res.relations[0].first, "A");
        assert_eq!(res.relations[0].second, "C");
        assert_eq!(res.relations[1].relation, Relation::Preference);
    }

    #[test]
    fn scenario_zero_weights() {
        let mut criteria = mixed_criteria();
        for c in criteria.iter_mut() {
            c.weight = 0.0;
        }
        let rows = suppliers();
        let names: Vec<&str> = rows.iter().map(|(n, _)| *n).collect();
        let res = run_promethee(
            &table(&rows, &criteria),
            &criteria,
            &alternatives(&names),
            &RankingRules::DEFAULT_RULES,
        );
        assert_eq!(
            res,
            Err(OutrankingError::InvalidWeights {
                criterion: None,
                weight: 0.0
            })
        );
    }

    #[test]
    fn total_weight_overflow() {
        let criteria = vec![
            Criterion::new("a", Direction::Maximize, 1e308, PreferenceFunction::Usual),
            Criterion::new("b", Direction::Maximize, 1e308, PreferenceFunction::Usual),
        ];
        let rows: Vec<(&str, Vec<f64>)> = vec![("X", vec![2.0, 2.0]), ("Y", vec![1.0, 1.0])];
        let res = run_promethee(
            &table(&rows, &criteria),
            &criteria,
            &alternatives(&["X", "Y"]),
            &RankingRules::DEFAULT_RULES,
        );
        assert_eq!(
            res,
            Err(OutrankingError::InvalidWeights {
                criterion: None,
                weight: f64::INFINITY
            })
        );
    }

    #[test]
    fn min_max_extreme_scores() {
        let criteria = vec![Criterion::new(
            "c",
            Direction::Maximize,
            1.0,
            PreferenceFunction::VShape { p: 0.5 },
        )];
        let rows: Vec<(&str, Vec<f64>)> = vec![("Low", vec![-1e308]), ("High", vec![1e308])];
        let rules = RankingRules {
            score_mode: ScoreMode::MinMax,
            ..RankingRules::DEFAULT_RULES
        };
        let res = run_promethee(
            &table(&rows, &criteria),
            &criteria,
            &alternatives(&["Low", "High"]),
            &rules,
        )
        .unwrap();
        assert_eq!(res.criteria[0].differences[1][0], 1.0);
        assert_eq!(res.criteria[0].differences[0][1], -1.0);
        assert_eq!(res.aggregated_preference("Low", "High"), Some(0.0));
        assert_eq!(res.aggregated_preference("High", "Low"), Some(1.0));
        assert_eq!(
            res.ranked_names(),
            vec!["High".to_string(), "Low".to_string()]
        );
        assert_eq!(res.ranking[0].net_flow, 1.0);
        assert_eq!(res.ranking[1].net_flow, -1.0);
    }

    #[test]
    fn scenario_level_thresholds_reversed() {
        let criteria = vec![Criterion::new(
            "quality",
            Direction::Maximize,
            1.0,
            PreferenceFunction::Level { q: 10.0, p: 5.0 },
        )];
        let res = run_promethee(
            &table(&[("A", vec![1.0]), ("B", vec![2.0])], &criteria),
            &criteria,
            &alternatives(&["A", "B"]),
            &RankingRules::DEFAULT_RULES,
        );
        assert!(matches!(
            res,
            Err(OutrankingError::InvalidThreshold { ref criterion, .. }) if criterion == "quality"
        ));
    }

    #[test]
    fn negative_weight() {
        let mut criteria = mixed_criteria();
        criteria[1].weight = -1.0;
        let rows = suppliers();
        let res = run_promethee(
            &table(&rows, &criteria),
            &criteria,
            &alternatives(&["S1", "S2", "S3", "S4"]),
            &RankingRules::DEFAULT_RULES,
        );
        assert_eq!(
            res,
            Err(OutrankingError::InvalidWeights {
                criterion: Some("quality".to_string()),
                weight: -1.0
            })
        );
    }

    #[test]
    fn insufficient_inputs() {
        let criteria = mixed_criteria();
        let rows = suppliers();
        let res = run_promethee(
            &table(&rows, &criteria),
            &criteria,
            &alternatives(&["S1"]),
            &RankingRules::DEFAULT_RULES,
        );
        assert_eq!(
            res,
            Err(OutrankingError::InsufficientAlternatives { count: 1 })
        );

        let res = run_promethee(
            &table(&rows, &criteria),
            &[],
            &alternatives(&["S1", "S2"]),
            &RankingRules::DEFAULT_RULES,
        );
        assert_eq!(res, Err(OutrankingError::InsufficientCriteria { count: 0 }));
    }

    #[test]
    fn excluded_entries_are_not_selected() {
        let mut criteria = mixed_criteria();
        criteria[0].excluded = true;
        let mut alts = alternatives(&["S1", "S2", "S3"]);
        alts[1].excluded = true;
        // No scores at all for the excluded criterion and alternative.
        let scores: Vec<Score> = table(&suppliers(), &criteria)
            .into_iter()
            .filter(|s| s.criterion != "cost" && s.alternative != "S2")
            .collect();
        let res =
            run_promethee(&scores, &criteria, &alts, &RankingRules::DEFAULT_RULES).unwrap();
        assert_eq!(res.alternatives, vec!["S1".to_string(), "S3".to_string()]);
        assert_eq!(res.criteria.len(), 3);
        assert_eq!(res.total_weight, 4.5);

        // With only one alternative left, nothing can be compared.
        alts[2].excluded = true;
        let res = run_promethee(&scores, &criteria, &alts, &RankingRules::DEFAULT_RULES);
        assert_eq!(
            res,
            Err(OutrankingError::InsufficientAlternatives { count: 1 })
        );
    }

    #[test]
    fn malformed_matrices() {
        let criteria = mixed_criteria();
        let mut scores = table(&suppliers(), &criteria);
        let alts = alternatives(&["S1", "S2", "S3", "S4"]);

        let removed = scores.remove(5);
        let res = run_promethee(&scores, &criteria, &alts, &RankingRules::DEFAULT_RULES);
        assert_eq!(
            res,
            Err(OutrankingError::MissingData {
                alternative: removed.alternative.clone(),
                criterion: removed.criterion.clone()
            })
        );

        scores.push(removed.clone());
        scores.push(removed.clone());
        let res = run_promethee(&scores, &criteria, &alts, &RankingRules::DEFAULT_RULES);
        assert_eq!(
            res,
            Err(OutrankingError::DuplicateScore {
                alternative: removed.alternative.clone(),
                criterion: removed.criterion.clone()
            })
        );

        scores.pop();
        scores.push(Score::new("S9", "cost", 1.0));
        assert!(run_promethee(&scores, &criteria, &alts, &RankingRules::DEFAULT_RULES).is_ok());

        scores[0].value = f64::INFINITY;
        assert!(matches!(
            run_promethee(&scores, &criteria, &alts, &RankingRules::DEFAULT_RULES),
            Err(OutrankingError::InvalidScore { .. })
        ));

        let res = run_promethee(
            &scores,
            &criteria,
            &alternatives(&["S1", "S2", "S1"]),
            &RankingRules::DEFAULT_RULES,
        );
        assert_eq!(
            res,
            Err(OutrankingError::DuplicateAlternative {
                name: "S1".to_string()
            })
        );
    }

    #[test]
    fn deterministic() {
        let criteria = mixed_criteria();
        let rows = suppliers();
        let r1 = run(&rows, &criteria);
        let r2 = run(&rows, &criteria);
        assert_eq!(r1, r2);
    }

    #[test]
    fn flows_aggregate_rows_and_columns() {
        init_logger();
        let criteria = mixed_criteria();
        let res = run(&suppliers(), &criteria);
        let n = res.alternatives.len();
        let mut net_sum = 0.0;
        for (i, name) in res.alternatives.iter().enumerate() {
            let f = res.flows(name).unwrap();
            let row: f64 = (0..n).filter(|j| *j != i).map(|j| res.aggregated[i][j]).sum();
            let col: f64 = (0..n).filter(|j| *j != i).map(|j| res.aggregated[j][i]).sum();
            assert!((f.positive_flow - row / (n - 1) as f64).abs() < 1e-12);
            assert!((f.negative_flow - col / (n - 1) as f64).abs() < 1e-12);
            assert!((0.0..=1.0).contains(&f.positive_flow));
            assert!((0.0..=1.0).contains(&f.negative_flow));
            net_sum += f.net_flow;
        }
        assert!(net_sum.abs() < 1e-12);
        for row in res.aggregated.iter() {
            for x in row.iter() {
                assert!((0.0..=1.0).contains(x));
            }
        }
        let net = res.net_flow_matrix();
        assert_eq!(net[0][1], -net[1][0]);
    }

    #[test]
    fn aggregated_preference_ignores_other_alternatives() {
        let criteria = mixed_criteria();
        let rows = suppliers();
        let full = run(&rows, &criteria);
        let without_s3: Vec<(&str, Vec<f64>)> =
            rows.iter().filter(|(n, _)| *n != "S3").cloned().collect();
        let partial = run(&without_s3, &criteria);
        for a in ["S1", "S2", "S4"] {
            for b in ["S1", "S2", "S4"] {
                assert_eq!(
                    full.aggregated_preference(a, b),
                    partial.aggregated_preference(a, b)
                );
            }
        }
    }

    #[test]
    fn raising_a_score_never_hurts() {
        let criteria = mixed_criteria();
        let base = suppliers();
        let reference = run(&base, &criteria);
        let mut previous = reference.flows("S2").unwrap().clone();
        for step in 1..40 {
            let experience = 4.0 + 0.5 * step as f64;
            let rows: Vec<(&str, Vec<f64>)> = base
                .iter()
                .map(|(n, v)| {
                    if *n == "S2" {
                        (*n, vec![850.0, 3.0, 20.0, experience])
                    } else {
                        (*n, v.clone())
                    }
                })
                .collect();
            let res = run(&rows, &criteria);
            let current = res.flows("S2").unwrap().clone();
            assert!(current.positive_flow >= previous.positive_flow);
            assert!(current.negative_flow <= previous.negative_flow);
            previous = current;
        }
    }

    #[test]
    fn flow_scaling_keeps_the_order() {
        let criteria = mixed_criteria();
        let rows = suppliers();
        let names: Vec<&str> = rows.iter().map(|(n, _)| *n).collect();
        let scores = table(&rows, &criteria);
        let standard = run(&rows, &criteria);
        for scaling in [
            FlowScaling::TotalWeightOnly,
            FlowScaling::PairCountOnly,
            FlowScaling::Unscaled,
        ] {
            let rules = RankingRules {
                flow_scaling: scaling,
                ..RankingRules::DEFAULT_RULES
            };
            let res =
                run_promethee(&scores, &criteria, &alternatives(&names), &rules).unwrap();
            assert_eq!(res.ranked_names(), standard.ranked_names(), "{:?}", scaling);
        }

        let rules = RankingRules {
            flow_scaling: FlowScaling::Unscaled,
            ..RankingRules::DEFAULT_RULES
        };
        let unscaled = run_promethee(&scores, &criteria, &alternatives(&names), &rules).unwrap();
        let factor = standard.total_weight * (names.len() - 1) as f64;
        for f in standard.ranking.iter() {
            let g = unscaled.flows(&f.name).unwrap();
            assert!((g.net_flow - f.net_flow * factor).abs() < 1e-9);
        }
    }

    #[test]
    fn min_max_mode() {
        let criteria = vec![
            Criterion::new(
                "cost",
                Direction::Minimize,
                1.0,
                PreferenceFunction::VShape { p: 0.5 },
            ),
            Criterion::new(
                "flat",
                Direction::Maximize,
                1.0,
                PreferenceFunction::VShape { p: 0.5 },
            ),
        ];
        let rows: Vec<(&str, Vec<f64>)> = vec![
            ("A", vec![100.0, 3.0]),
            ("B", vec![200.0, 3.0]),
            ("C", vec![150.0, 3.0]),
        ];
        let rules = RankingRules {
            score_mode: ScoreMode::MinMax,
            ..RankingRules::DEFAULT_RULES
        };
        let res = run_promethee(
            &table(&rows, &criteria),
            &criteria,
            &alternatives(&["A", "B", "C"]),
            &rules,
        )
        .unwrap();

        // The cheapest normalizes to 1, the most expensive to 0.
        assert_eq!(res.criteria[0].differences[0][1], 1.0);
        assert_eq!(res.criteria[0].differences[0][2], 0.5);
        assert_eq!(res.criteria[0].preferences[0][2], 1.0);
        assert_eq!(res.criteria[0].preferences[2][1], 1.0);
        // A constant column has no discriminating power.
        assert!(res.criteria[1]
            .preferences
            .iter()
            .all(|row| row.iter().all(|x| *x == 0.0)));
        assert!(res.criteria[1]
            .differences
            .iter()
            .all(|row| row.iter().all(|x| *x == 0.0)));
        assert_eq!(
            res.ranked_names(),
            vec!["A".to_string(), "C".to_string(), "B".to_string()]
        );
    }

    #[test]
    fn indifference_threshold() {
        let criteria = vec![Criterion::new(
            "c",
            Direction::Maximize,
            1.0,
            PreferenceFunction::VShape { p: 1000.0 },
        )];
        let rows: Vec<(&str, Vec<f64>)> =
            vec![("A", vec![0.0]), ("B", vec![0.04]), ("C", vec![500.0])];
        let res = run(&rows, &criteria);
        assert_eq!(
            res.ranked_names(),
            vec!["C".to_string(), "B".to_string(), "A".to_string()]
        );
        let last = res.relations.last().unwrap();
        assert_eq!(last.first, "B");
        assert_eq!(last.second, "A");
        assert_eq!(last.relation, Relation::Indifference);

        let rules = RankingRules {
            indifference_threshold: -1.0,
            ..RankingRules::DEFAULT_RULES
        };
        let res = run_promethee(
            &table(&rows, &criteria),
            &criteria,
            &alternatives(&["A", "B", "C"]),
            &rules,
        );
        assert_eq!(
            res,
            Err(OutrankingError::InvalidIndifferenceThreshold { value: -1.0 })
        );
    }
}
