use crate::rank::*;

use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;

#[derive(PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(rename = "decisionName")]
    pub decision_name: Option<String>,
    #[serde(rename = "outputFile")]
    pub output_file: Option<String>,
    #[serde(rename = "includeDiagnostics")]
    pub include_diagnostics: Option<bool>,
}

#[derive(PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatrixSource {
    pub provider: Option<String>,
    #[serde(rename = "filePath")]
    pub file_path: Option<String>,
    #[serde(rename = "alternativeColumnIndex")]
    pub alternative_column_index: Option<JSValue>,
    #[serde(rename = "firstCriterionColumnIndex")]
    pub first_criterion_column_index: Option<JSValue>,
    #[serde(rename = "excelWorksheetName")]
    pub excel_worksheet_name: Option<String>,
}

impl MatrixSource {
    /// The column holding the names of the alternatives, starting at 0.
    pub fn alternative_column(&self) -> RankResult<usize> {
        match &self.alternative_column_index {
            Some(_) => Ok(read_js_int(&self.alternative_column_index)? - 1),
            None => Ok(0),
        }
    }

    /// The first criterion column, starting at 0. By default, the column right
    /// after the names.
    pub fn first_criterion_column(&self) -> RankResult<usize> {
        match &self.first_criterion_column_index {
            Some(_) => Ok(read_js_int(&self.first_criterion_column_index)? - 1),
            None => Ok(self.alternative_column()? + 1),
        }
    }
}

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct AlternativeConfig {
    pub name: String,
    pub excluded: Option<bool>,
}

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct CriterionConfig {
    pub name: String,
    pub direction: Option<String>,
    pub weight: Option<f64>,
    pub function: Option<String>,
    pub q: Option<f64>,
    pub p: Option<f64>,
    pub s: Option<f64>,
    pub excluded: Option<bool>,
}

#[derive(PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct RulesConfig {
    #[serde(rename = "scoreMode")]
    pub score_mode: Option<String>,
    #[serde(rename = "flowScaling")]
    pub flow_scaling: Option<String>,
    #[serde(rename = "indifferenceThreshold")]
    pub indifference_threshold: Option<f64>,
}

#[derive(PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct RankConfig {
    #[serde(rename = "outputSettings")]
    pub output_settings: Option<OutputSettings>,
    #[serde(rename = "matrixSource")]
    pub matrix_source: Option<MatrixSource>,
    pub alternatives: Option<Vec<AlternativeConfig>>,
    pub criteria: Option<Vec<CriterionConfig>>,
    pub rules: Option<RulesConfig>,
}

const DEFAULT_Q: f64 = 0.1;
const DEFAULT_P: f64 = 0.5;
const DEFAULT_S: f64 = 0.5;

pub fn read_config(path: &str) -> RankResult<RankConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let config: RankConfig =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(config)
}

pub fn read_summary(path: &str) -> RankResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(js)
}

/// Reads a column index, starting at 1.
///
/// Excel-style column letters are accepted: A is 1, Z is 26, AA is 27.
pub fn read_js_int(x: &Option<JSValue>) -> RankResult<usize> {
    let res: Option<usize> = match x {
        Some(JSValue::Number(n)) => n.as_u64().map(|x| x as usize),
        Some(JSValue::String(s))
            if !s.is_empty() && s.chars().all(|c| c.is_ascii_alphabetic()) =>
        {
            s.to_ascii_lowercase().chars().try_fold(0_usize, |idx, c| {
                idx.checked_mul(26)?
                    .checked_add((c as usize) - ('a' as usize) + 1)
            })
        }
        Some(JSValue::String(s)) => s.trim().parse::<usize>().ok(),
        _ => None,
    };
    match res {
        Some(idx) if idx >= 1 => Ok(idx),
        _ => ParsingColumnIndexSnafu {
            content: format!("{:?}", x),
        }
        .fail(),
    }
}

pub fn parse_direction(s: &str) -> RankResult<Direction> {
    match s.to_lowercase().as_str() {
        "maximize" | "max" => Ok(Direction::Maximize),
        "minimize" | "min" => Ok(Direction::Minimize),
        _ => whatever!("unknown direction: {:?} (expected maximize or minimize)", s),
    }
}

fn param_or_default(x: Option<f64>, param: &str, default: f64, criterion: &str) -> f64 {
    match x {
        Some(v) => v,
        None => {
            warn!(
                "Criterion {:?}: parameter {} is missing, using the default value {}",
                criterion, param, default
            );
            default
        }
    }
}

/// Builds the preference function of a criterion from its name and parameters.
pub fn parse_function(cc: &CriterionConfig) -> RankResult<PreferenceFunction> {
    let name = cc.function.clone().unwrap_or_else(|| "Usual".to_string());
    let c = cc.name.as_str();
    let q = |x| param_or_default(x, "q", DEFAULT_Q, c);
    let p = |x| param_or_default(x, "p", DEFAULT_P, c);
    let res = match name.as_str() {
        "Usual" | "usual" => PreferenceFunction::Usual,
        "U-Shape" | "uShape" => PreferenceFunction::UShape { q: q(cc.q) },
        "V-Shape" | "vShape" => PreferenceFunction::VShape { p: p(cc.p) },
        "Level" | "level" => PreferenceFunction::Level {
            q: q(cc.q),
            p: p(cc.p),
        },
        "V-Shape with Indifference" | "vShapeWithIndifference" => {
            PreferenceFunction::VShapeIndifference {
                q: q(cc.q),
                p: p(cc.p),
            }
        }
        "Gaussian" | "gaussian" => PreferenceFunction::Gaussian {
            s: param_or_default(cc.s, "s", DEFAULT_S, c),
        },
        x => whatever!(
            "Criterion {:?}: unknown preference function {:?}, expected one of {:?}",
            c,
            x,
            PreferenceFunction::NAMES
        ),
    };
    Ok(res)
}

pub fn validate_criterion(cc: &CriterionConfig) -> RankResult<Criterion> {
    let direction = match &cc.direction {
        Some(d) => parse_direction(d)?,
        None => catalog::lookup(&cc.name)
            .map(|entry| entry.direction)
            .unwrap_or(Direction::Maximize),
    };
    let function = parse_function(cc)?;
    Ok(Criterion {
        name: cc.name.clone(),
        direction,
        weight: cc.weight.unwrap_or(1.0),
        function,
        excluded: cc.excluded.unwrap_or(false),
    })
}

pub fn validate_rules(rules: &Option<RulesConfig>) -> RankResult<RankingRules> {
    let mut res = RankingRules::DEFAULT_RULES;
    let rules = match rules {
        Some(r) => r,
        None => return Ok(res),
    };
    if let Some(mode) = &rules.score_mode {
        res.score_mode = match mode.as_str() {
            "raw" => ScoreMode::Raw,
            "minMax" => ScoreMode::MinMax,
            x => whatever!("Unknown score mode {:?}: use raw or minMax", x),
        };
    }
    if let Some(scaling) = &rules.flow_scaling {
        res.flow_scaling = match scaling.as_str() {
            "standard" => FlowScaling::Standard,
            "totalWeightOnly" => FlowScaling::TotalWeightOnly,
            "pairCountOnly" => FlowScaling::PairCountOnly,
            "unscaled" => FlowScaling::Unscaled,
            x => whatever!(
                "Unknown flow scaling {:?}: use standard, totalWeightOnly, pairCountOnly or unscaled",
                x
            ),
        };
    }
    if let Some(t) = rules.indifference_threshold {
        if !(t.is_finite() && t >= 0.0) {
            return Err(RankError::Outranking {
                source: OutrankingError::InvalidIndifferenceThreshold { value: t },
            });
        }
        res.indifference_threshold = t;
    }
    Ok(res)
}

pub fn score_mode_name(mode: ScoreMode) -> &'static str {
    match mode {
        ScoreMode::Raw => "raw",
        ScoreMode::MinMax => "minMax",
    }
}

pub fn flow_scaling_name(scaling: FlowScaling) -> &'static str {
    match scaling {
        FlowScaling::Standard => "standard",
        FlowScaling::TotalWeightOnly => "totalWeightOnly",
        FlowScaling::PairCountOnly => "pairCountOnly",
        FlowScaling::Unscaled => "unscaled",
    }
}
