pub use crate::config::*;
use crate::config::{DuplicateAlternativeSnafu, DuplicateCriterionSnafu, DuplicateScoreSnafu};

/// A builder for declaring a decision problem step by step.
///
/// It is convenient when the performance matrix is filled cell by cell, for
/// example while reading a spreadsheet.
///
/// ```
/// pub use outranking::builder::Builder;
/// pub use outranking::{Criterion, Direction, PreferenceFunction, RankingRules};
/// # use outranking::OutrankingError;
///
/// let mut builder = Builder::new(&RankingRules::DEFAULT_RULES)?
///     .alternatives(&["Acme".to_string(), "Globex".to_string()])?;
///
/// builder.add_criterion(Criterion::new(
///     "delivery",
///     Direction::Minimize,
///     1.0,
///     PreferenceFunction::Level { q: 1.0, p: 5.0 },
/// ))?;
/// builder.add_score("Acme", "delivery", 12.0)?;
/// builder.add_score("Globex", "delivery", 15.0)?;
///
/// let result = builder.rank()?;
/// assert_eq!(result.ranking[0].name, "Acme");
///
/// # Ok::<(), OutrankingError>(())
/// ```
pub struct Builder {
    pub(crate) _rules: RankingRules,
    pub(crate) _alternatives: Vec<Alternative>,
    pub(crate) _criteria: Vec<Criterion>,
    pub(crate) _scores: Vec<Score>,
}

impl Builder {
    pub fn new(rules: &RankingRules) -> Result<Builder, OutrankingError> {
        Ok(Builder {
            _rules: rules.clone(),
            _alternatives: Vec::new(),
            _criteria: Vec::new(),
            _scores: Vec::new(),
        })
    }

    /// Declares the alternatives, replacing the ones already declared.
    pub fn alternatives(self, names: &[String]) -> Result<Builder, OutrankingError> {
        Ok(Builder {
            _alternatives: names.iter().map(|n| Alternative::new(n.clone())).collect(),
            ..self
        })
    }

    pub fn add_alternative(&mut self, alternative: Alternative) -> Result<(), OutrankingError> {
        if self
            ._alternatives
            .iter()
            .any(|a| a.name == alternative.name)
        {
            return DuplicateAlternativeSnafu {
                name: alternative.name,
            }
            .fail();
        }
        self._alternatives.push(alternative);
        Ok(())
    }

    /// Adds a criterion. Criteria are aggregated in the order they are added.
    ///
    /// The parameters of the preference function are checked immediately.
    pub fn add_criterion(&mut self, criterion: Criterion) -> Result<(), OutrankingError> {
        if self._criteria.iter().any(|c| c.name == criterion.name) {
            return DuplicateCriterionSnafu {
                name: criterion.name,
            }
            .fail();
        }
        criterion.function.validate(&criterion.name)?;
        self._criteria.push(criterion);
        Ok(())
    }

    /// Sets the score of one alternative on one criterion.
    ///
    /// Names that are not declared when ranking are ignored.
    pub fn add_score(
        &mut self,
        alternative: &str,
        criterion: &str,
        value: f64,
    ) -> Result<(), OutrankingError> {
        if self
            ._scores
            .iter()
            .any(|s| s.alternative == alternative && s.criterion == criterion)
        {
            return DuplicateScoreSnafu {
                alternative,
                criterion,
            }
            .fail();
        }
        self._scores.push(Score::new(alternative, criterion, value));
        Ok(())
    }

    /// Runs the ranking on everything declared so far.
    pub fn rank(&self) -> Result<OutrankingResult, OutrankingError> {
        crate::run_promethee(
            &self._scores,
            &self._criteria,
            &self._alternatives,
            &self._rules,
        )
    }
}
