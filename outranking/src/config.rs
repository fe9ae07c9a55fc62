// ********* Input data structures ***********

use snafu::Snafu;

pub use crate::preference::PreferenceFunction;

/// Whether higher or lower scores are more desirable on a criterion.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum Direction {
    Maximize,
    Minimize,
}

impl Direction {
    pub fn name(&self) -> &'static str {
        match self {
            Direction::Maximize => "maximize",
            Direction::Minimize => "minimize",
        }
    }
}

/// An entity being ranked (a supplier, a proposal, ...).
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct Alternative {
    pub name: String,
    /// Excluded alternatives are dropped before any validation happens.
    pub excluded: bool,
}

impl Alternative {
    pub fn new(name: impl Into<String>) -> Alternative {
        Alternative {
            name: name.into(),
            excluded: false,
        }
    }
}

/// An evaluation dimension.
#[derive(PartialEq, Debug, Clone)]
pub struct Criterion {
    pub name: String,
    pub direction: Direction,
    /// Must be finite and non-negative. At least one selected criterion
    /// must carry a positive weight.
    pub weight: f64,
    pub function: PreferenceFunction,
    pub excluded: bool,
}

impl Criterion {
    pub fn new(
        name: impl Into<String>,
        direction: Direction,
        weight: f64,
        function: PreferenceFunction,
    ) -> Criterion {
        Criterion {
            name: name.into(),
            direction,
            weight,
            function,
            excluded: false,
        }
    }
}

/// One cell of the performance matrix.
#[derive(PartialEq, Debug, Clone)]
pub struct Score {
    pub alternative: String,
    pub criterion: String,
    pub value: f64,
}

impl Score {
    pub fn new(alternative: impl Into<String>, criterion: impl Into<String>, value: f64) -> Score {
        Score {
            alternative: alternative.into(),
            criterion: criterion.into(),
            value,
        }
    }
}

// ******** Output data structures *********

/// The flows of one alternative, and its position in the final ranking.
#[derive(PartialEq, Debug, Clone)]
pub struct AlternativeFlows {
    pub name: String,
    /// 1-based position in the ranking. Indifferent alternatives still get
    /// distinct positions, in input order.
    pub rank: u32,
    pub positive_flow: f64,
    pub negative_flow: f64,
    pub net_flow: f64,
}

#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum Relation {
    /// The first alternative is strictly preferred (P).
    Preference,
    /// The net flows are within the indifference threshold (I).
    Indifference,
}

impl Relation {
    pub fn symbol(&self) -> &'static str {
        match self {
            Relation::Preference => "P",
            Relation::Indifference => "I",
        }
    }
}

/// The relation between two alternatives, the first one being ranked higher.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct PairwiseRelation {
    pub first: String,
    pub relation: Relation,
    pub second: String,
}

/// Per-criterion intermediate matrices, indexed like
/// `OutrankingResult::alternatives`. The diagonal is always zero.
#[derive(PartialEq, Debug, Clone)]
pub struct CriterionMatrices {
    pub criterion: String,
    /// Direction-adjusted differences d(a,b).
    pub differences: Vec<Vec<f64>>,
    /// Preference degrees P(a,b) in [0, 1].
    pub preferences: Vec<Vec<f64>>,
}

#[derive(PartialEq, Debug, Clone)]
pub struct OutrankingResult {
    /// The selected alternatives, in input order.
    pub alternatives: Vec<String>,
    /// The alternatives sorted by decreasing net flow.
    pub ranking: Vec<AlternativeFlows>,
    /// All the pairs of alternatives, following the order of the ranking.
    pub relations: Vec<PairwiseRelation>,
    pub criteria: Vec<CriterionMatrices>,
    /// The aggregated preference matrix pi(a,b), after weight scaling.
    pub aggregated: Vec<Vec<f64>>,
    pub total_weight: f64,
}

impl OutrankingResult {
    fn index_of(&self, name: &str) -> Option<usize> {
        self.alternatives.iter().position(|n| n == name)
    }

    /// The aggregated preference of `a` over `b`.
    pub fn aggregated_preference(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.index_of(a)?;
        let j = self.index_of(b)?;
        Some(self.aggregated[i][j])
    }

    pub fn flows(&self, name: &str) -> Option<&AlternativeFlows> {
        self.ranking.iter().find(|f| f.name == name)
    }

    pub fn ranked_names(&self) -> Vec<String> {
        self.ranking.iter().map(|f| f.name.clone()).collect()
    }

    /// pi(a,b) - pi(b,a) for every pair, indexed like `alternatives`.
    pub fn net_flow_matrix(&self) -> Vec<Vec<f64>> {
        let n = self.alternatives.len();
        (0..n)
            .map(|i| {
                (0..n)
                    .map(|j| self.aggregated[i][j] - self.aggregated[j][i])
                    .collect()
            })
            .collect()
    }
}

/// Errors that prevent the ranking from being computed.
///
/// They are all detected before any computation starts.
#[derive(PartialEq, Debug, Clone, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum OutrankingError {
    #[snafu(display("No score for alternative {alternative:?} on criterion {criterion:?}"))]
    MissingData {
        alternative: String,
        criterion: String,
    },

    #[snafu(display(
        "Invalid weight {weight} for {}: weights must be non-negative and sum to a positive total",
        criterion.as_deref().unwrap_or("the total of all criteria")
    ))]
    InvalidWeights {
        /// None when the total weight is the problem.
        criterion: Option<String>,
        weight: f64,
    },

    #[snafu(display("Invalid parameters for criterion {criterion:?} ({function}): {reason}"))]
    InvalidThreshold {
        criterion: String,
        function: String,
        reason: String,
    },

    #[snafu(display("At least 2 alternatives are required, got {count}"))]
    InsufficientAlternatives { count: usize },

    #[snafu(display("At least 1 criterion is required, got {count}"))]
    InsufficientCriteria { count: usize },

    #[snafu(display("Alternative {name:?} is declared more than once"))]
    DuplicateAlternative { name: String },

    #[snafu(display("Criterion {name:?} is declared more than once"))]
    DuplicateCriterion { name: String },

    #[snafu(display("Alternative {alternative:?} has several scores on criterion {criterion:?}"))]
    DuplicateScore {
        alternative: String,
        criterion: String,
    },

    #[snafu(display(
        "Score {value} of alternative {alternative:?} on criterion {criterion:?} is not a finite number"
    ))]
    InvalidScore {
        alternative: String,
        criterion: String,
        value: f64,
    },

    #[snafu(display("The indifference threshold must be finite and non-negative, got {value}"))]
    InvalidIndifferenceThreshold { value: f64 },
}

// ********* Configuration **********

/// How scores are turned into differences.
///
/// The preference thresholds (q, p, s) are expressed in the units chosen here.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum ScoreMode {
    /// Raw score differences. Thresholds are in the units of each criterion.
    Raw,
    /// Each criterion column is first rescaled to [0, 1], best value at 1.
    /// Thresholds are fractions of the observed range.
    MinMax,
}

/// The divisors applied to the aggregated preferences and to the flows.
///
/// They only rescale the flows: the ranking order is the same for all of them.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum FlowScaling {
    /// pi(a,b) is divided by the total weight, flows by n - 1.
    Standard,
    TotalWeightOnly,
    PairCountOnly,
    Unscaled,
}

impl FlowScaling {
    pub(crate) fn divides_by_total_weight(&self) -> bool {
        matches!(self, FlowScaling::Standard | FlowScaling::TotalWeightOnly)
    }

    pub(crate) fn divides_by_pair_count(&self) -> bool {
        matches!(self, FlowScaling::Standard | FlowScaling::PairCountOnly)
    }
}

#[derive(PartialEq, Debug, Clone)]
pub struct RankingRules {
    pub score_mode: ScoreMode,
    pub flow_scaling: FlowScaling,
    /// Two net flows closer than this are reported as indifferent.
    pub indifference_threshold: f64,
}

impl RankingRules {
    pub const DEFAULT_INDIFFERENCE_THRESHOLD: f64 = 1e-4;

    pub const DEFAULT_RULES: RankingRules = RankingRules {
        score_mode: ScoreMode::Raw,
        flow_scaling: FlowScaling::Standard,
        indifference_threshold: RankingRules::DEFAULT_INDIFFERENCE_THRESHOLD,
    };
}

impl Default for RankingRules {
    fn default() -> Self {
        RankingRules::DEFAULT_RULES
    }
}
