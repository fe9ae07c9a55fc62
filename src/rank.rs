use log::{debug, info, warn};

use outranking::*;
use snafu::{prelude::*, Snafu};

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::json;
use serde_json::Map as JSMap;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;
use crate::rank::config_reader::*;

pub mod catalog;
pub mod config_reader;
mod io_common;
mod io_csv;
mod io_xlsx;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum RankError {
    #[snafu(display("Error opening Excel file {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("The Excel file {path} does not contain any worksheet"))]
    EmptyExcel { path: String },
    #[snafu(display("Worksheet {name:?} not found in {path}"))]
    MissingWorksheet { name: String, path: String },
    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Column index {content} is not understood (expected a number from 1 or a column letter)"))]
    ParsingColumnIndex { content: String },
    #[snafu(display("Error opening CSV file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Error reading line {lineno} of the CSV file"))]
    CsvLineParse { source: csv::Error, lineno: usize },
    #[snafu(display("The table in {path} is empty: a header row is required"))]
    MissingHeader { path: String },
    #[snafu(display("The table in {path} has no criterion column after column {column}"))]
    MissingCriteriaColumns { path: String, column: usize },
    #[snafu(display("Line {lineno}: no name for the alternative"))]
    MissingAlternativeName { lineno: usize },
    #[snafu(display("Line {lineno}: the score of criterion {criterion:?} is not a number: {content:?}"))]
    InvalidCell {
        lineno: usize,
        criterion: String,
        content: String,
    },
    #[snafu(display("The ranking could not be computed: {source}"))]
    Outranking { source: OutrankingError },
    #[snafu(display("Error writing the summary to {path}"))]
    WritingSummary {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Difference detected between the computed summary and the reference summary {path}"))]
    ReferenceMismatch { path: String },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type RankResult<T> = Result<T, RankError>;

/// A performance table, as parsed by the readers.
/// This is before checking it against the configured criteria.
#[derive(PartialEq, Debug, Clone)]
pub struct ParsedTable {
    /// The criterion names, from the header row.
    pub criteria: Vec<String>,
    pub rows: Vec<ParsedRow>,
}

#[derive(PartialEq, Debug, Clone)]
pub struct ParsedRow {
    /// The line in the file, starting at 1 with the header.
    pub lineno: usize,
    pub alternative: String,
    /// One cell per criterion of the header. Empty cells are None.
    pub cells: Vec<Option<f64>>,
}

/// The input of the engine, as assembled from a table and a configuration.
#[derive(PartialEq, Debug, Clone)]
struct Problem {
    alternatives: Vec<Alternative>,
    criteria: Vec<Criterion>,
    scores: Vec<Score>,
}

fn read_table(path: &str, provider: &str, source: &MatrixSource) -> RankResult<ParsedTable> {
    info!("Attempting to read performance table {:?} ({})", path, provider);
    let table = match provider {
        "csv" => io_csv::read_csv_table(path, source)?,
        "xlsx" | "excel" => io_xlsx::read_xlsx_table(path, source)?,
        x => {
            whatever!("Provider not implemented {:?}: use csv or xlsx", x)
        }
    };
    debug!("read_table: criteria: {:?}", table.criteria);
    debug!("read_table: {:?} rows", table.rows.len());
    Ok(table)
}

fn infer_provider(path: &str) -> String {
    let extension = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());
    match extension.as_deref() {
        Some("xlsx") | Some("xlsm") => "xlsx".to_string(),
        _ => "csv".to_string(),
    }
}

fn build_problem(config: &RankConfig, table: &ParsedTable) -> RankResult<Problem> {
    let criteria: Vec<Criterion> = match &config.criteria {
        Some(ccs) => {
            let mut res: Vec<Criterion> = Vec::new();
            for cc in ccs.iter() {
                if !table.criteria.contains(&cc.name) {
                    warn!(
                        "Criterion {:?} does not match any column of the table {:?}",
                        cc.name, table.criteria
                    );
                }
                res.push(validate_criterion(cc)?);
            }
            res
        }
        None => table
            .criteria
            .iter()
            .map(|name| {
                let direction = catalog::lookup(name)
                    .map(|entry| entry.direction)
                    .unwrap_or(Direction::Maximize);
                Criterion::new(name.clone(), direction, 1.0, PreferenceFunction::Usual)
            })
            .collect(),
    };

    let alternatives: Vec<Alternative> = match &config.alternatives {
        Some(acs) => {
            for row in table.rows.iter() {
                if !acs.iter().any(|ac| ac.name == row.alternative) {
                    warn!(
                        "Line {}: alternative {:?} is not in the configuration, ignored",
                        row.lineno, row.alternative
                    );
                }
            }
            acs.iter()
                .map(|ac| Alternative {
                    name: ac.name.clone(),
                    excluded: ac.excluded.unwrap_or(false),
                })
                .collect()
        }
        None => table
            .rows
            .iter()
            .map(|row| Alternative::new(row.alternative.clone()))
            .collect(),
    };

    let mut scores: Vec<Score> = Vec::new();
    for row in table.rows.iter() {
        for (name, cell) in table.criteria.iter().zip(row.cells.iter()) {
            if let Some(value) = cell {
                scores.push(Score::new(row.alternative.clone(), name.clone(), *value));
            }
        }
    }

    check_qualitative_scales(&criteria, &scores);

    Ok(Problem {
        alternatives,
        criteria,
        scores,
    })
}

// The qualitative criteria of the catalog are scored from 1 to 5.
fn check_qualitative_scales<'a>(criteria: &[Criterion], scores: &'a [Score]) -> Vec<&'a Score> {
    let mut res: Vec<&Score> = Vec::new();
    for c in criteria.iter().filter(|c| !c.excluded) {
        let qualitative = catalog::lookup(&c.name)
            .map(|entry| entry.qualitative)
            .unwrap_or(false);
        if !qualitative {
            continue;
        }
        for s in scores.iter().filter(|s| s.criterion == c.name) {
            if !(1.0..=5.0).contains(&s.value) {
                warn!(
                    "Score {} of {:?} on {:?} is outside of the qualitative scale 1-5",
                    s.value, s.alternative, s.criterion
                );
                res.push(s);
            }
        }
    }
    res
}

fn matrix_to_json(names: &[String], matrix: &[Vec<f64>]) -> JSValue {
    let mut res: JSMap<String, JSValue> = JSMap::new();
    for (name, row) in names.iter().zip(matrix.iter()) {
        let mut cols: JSMap<String, JSValue> = JSMap::new();
        for (other, x) in names.iter().zip(row.iter()) {
            if other != name {
                cols.insert(other.clone(), json!(x));
            }
        }
        res.insert(name.clone(), JSValue::Object(cols));
    }
    JSValue::Object(res)
}

fn criteria_to_json(criteria: &[Criterion]) -> Vec<JSValue> {
    criteria
        .iter()
        .filter(|c| !c.excluded)
        .map(|c| {
            let (q, p, s) = c.function.parameters();
            json!({
                "criterion": c.name,
                "direction": c.direction.name(),
                "function": c.function.name(),
                "weight": c.weight,
                "q": q,
                "p": p,
                "s": s,
            })
        })
        .collect()
}

fn diagnostics_to_json(result: &OutrankingResult) -> JSValue {
    let mut differences: JSMap<String, JSValue> = JSMap::new();
    let mut preferences: JSMap<String, JSValue> = JSMap::new();
    for cm in result.criteria.iter() {
        differences.insert(
            cm.criterion.clone(),
            matrix_to_json(&result.alternatives, &cm.differences),
        );
        preferences.insert(
            cm.criterion.clone(),
            matrix_to_json(&result.alternatives, &cm.preferences),
        );
    }
    json!({
        "differences": differences,
        "preferences": preferences,
        "aggregated": matrix_to_json(&result.alternatives, &result.aggregated),
        "netFlowMatrix": matrix_to_json(&result.alternatives, &result.net_flow_matrix()),
    })
}

fn build_summary_js(
    decision: &str,
    rules: &RankingRules,
    criteria: &[Criterion],
    result: &OutrankingResult,
    include_diagnostics: bool,
) -> JSValue {
    let ranking: Vec<JSValue> = result
        .ranking
        .iter()
        .map(|f| {
            json!({
                "rank": f.rank,
                "alternative": f.name,
                "positiveFlow": f.positive_flow,
                "negativeFlow": f.negative_flow,
                "netFlow": f.net_flow,
            })
        })
        .collect();
    let relations: Vec<JSValue> = result
        .relations
        .iter()
        .map(|r| {
            json!({
                "first": r.first,
                "relation": r.relation.symbol(),
                "second": r.second,
            })
        })
        .collect();
    let mut js = json!({
        "config": {
            "decision": decision,
            "scoreMode": score_mode_name(rules.score_mode),
            "flowScaling": flow_scaling_name(rules.flow_scaling),
            "indifferenceThreshold": rules.indifference_threshold,
            "totalWeight": result.total_weight,
        },
        "criteria": criteria_to_json(criteria),
        "ranking": ranking,
        "relations": relations,
    });
    if include_diagnostics {
        js["diagnostics"] = diagnostics_to_json(result);
    }
    js
}

fn write_summary(pretty_js: &str, out: &Option<String>) -> RankResult<()> {
    match out.as_deref() {
        None | Some("stdout") => {
            println!("{}", pretty_js);
        }
        Some(path) => {
            info!("Writing summary to {:?}", path);
            fs::write(path, pretty_js).context(WritingSummarySnafu { path })?;
        }
    }
    Ok(())
}

fn resolve(root: &Path, file: &str) -> String {
    let p: PathBuf = [root, Path::new(file)].iter().collect();
    p.as_path().display().to_string()
}

/// Runs a complete ranking from the command line arguments, and returns the summary.
pub fn run_ranking(args: &Args) -> RankResult<JSValue> {
    let (config, root): (RankConfig, PathBuf) = match &args.config {
        Some(config_path) => {
            let config = read_config(config_path)?;
            let root = Path::new(config_path)
                .parent()
                .map(|p| p.to_path_buf())
                .unwrap_or_default();
            (config, root)
        }
        None => (RankConfig::default(), PathBuf::new()),
    };
    info!("config: {:?}", config);

    // Validate the rules first, nothing is read if they are wrong.
    let rules = validate_rules(&config.rules)?;

    let mut source: MatrixSource = config.matrix_source.clone().unwrap_or_default();
    if let Some(name) = &args.excel_worksheet_name {
        source.excel_worksheet_name = Some(name.clone());
    }
    let table_path: String = match (&args.input, &source.file_path) {
        (Some(input), _) => input.clone(),
        (None, Some(file_path)) => resolve(&root, file_path),
        (None, None) => {
            whatever!("No performance table given: use --input or matrixSource.filePath in the configuration")
        }
    };
    let provider: String = args
        .input_type
        .clone()
        .or_else(|| source.provider.clone())
        .unwrap_or_else(|| infer_provider(&table_path));

    let table = read_table(&table_path, &provider, &source)?;
    let problem = build_problem(&config, &table)?;
    debug!("problem: {:?}", problem);

    let result = run_promethee(
        &problem.scores,
        &problem.criteria,
        &problem.alternatives,
        &rules,
    )
    .context(OutrankingSnafu {})?;

    let output_settings = config.output_settings.clone().unwrap_or_default();
    let decision = output_settings
        .decision_name
        .clone()
        .unwrap_or_else(|| io_common::simplify_file_name(&table_path));
    let result_js = build_summary_js(
        &decision,
        &rules,
        &problem.criteria,
        &result,
        output_settings.include_diagnostics.unwrap_or(false),
    );
    let pretty_js = serde_json::to_string_pretty(&result_js).context(ParsingJsonSnafu {})?;

    let out: Option<String> = args.out.clone().or_else(|| {
        output_settings
            .output_file
            .as_ref()
            .map(|f| resolve(&root, f))
    });
    write_summary(&pretty_js, &out)?;

    // The reference summary, if provided for comparison
    if let Some(reference_path) = &args.reference {
        let summary_ref = read_summary(reference_path)?;
        let pretty_js_ref =
            serde_json::to_string_pretty(&summary_ref).context(ParsingJsonSnafu {})?;
        if pretty_js_ref != pretty_js {
            warn!("Found differences with the reference summary");
            print_diff(pretty_js_ref.as_str(), pretty_js.as_str(), "\n");
            return ReferenceMismatchSnafu {
                path: reference_path.clone(),
            }
            .fail();
        }
        info!("The summary matches the reference {:?}", reference_path);
    }

    Ok(result_js)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_dir(test_name: &str) -> String {
        format!("{}/tests/data/{}", env!("CARGO_MANIFEST_DIR"), test_name)
    }

    fn fixture_args(test_name: &str) -> Args {
        let dir = test_dir(test_name);
        Args {
            config: Some(format!("{}/{}_config.json", dir, test_name)),
            reference: Some(format!("{}/{}_expected_summary.json", dir, test_name)),
            out: Some("stdout".to_string()),
            input: None,
            input_type: None,
            excel_worksheet_name: None,
            catalog: false,
            verbose: false,
        }
    }

    fn test_wrapper(test_name: &str) {
        let _ = env_logger::builder().is_test(true).try_init();
        info!("Running test {}", test_name);
        if let Err(e) = run_ranking(&fixture_args(test_name)) {
            panic!("test {} failed: {}", test_name, e);
        }
    }

    #[test]
    fn supplier_selection() {
        test_wrapper("supplier_selection");
    }

    #[test]
    fn decimal_comma_minmax() {
        test_wrapper("decimal_comma_minmax");
    }

    #[test]
    fn excel_supplier_selection() {
        test_wrapper("excel_supplier_selection");
    }

    #[test]
    fn excel_worksheet_from_arguments() {
        let mut args = fixture_args("excel_supplier_selection");
        args.excel_worksheet_name = Some("Notes".to_string());
        assert!(matches!(
            run_ranking(&args),
            Err(RankError::MissingCriteriaColumns { column: 1, .. })
        ));
    }

    #[test]
    fn stale_reference_is_reported() {
        let mut args = fixture_args("supplier_selection");
        args.reference = Some(format!(
            "{}/stale_summary.json",
            test_dir("supplier_selection")
        ));
        let res = run_ranking(&args);
        assert!(matches!(res, Err(RankError::ReferenceMismatch { .. })));
    }

    #[test]
    fn missing_score_is_refused() {
        let mut args = fixture_args("supplier_selection");
        args.input = Some(format!("{}/missing_score.csv", test_dir("supplier_selection")));
        args.reference = None;
        let res = run_ranking(&args);
        match res {
            Err(RankError::Outranking {
                source:
                    OutrankingError::MissingData {
                        alternative,
                        criterion,
                    },
            }) => {
                assert_eq!(alternative, "Globex");
                assert_eq!(criterion, "C2 - Quality");
            }
            x => panic!("unexpected result {:?}", x),
        }
    }

    #[test]
    fn defaults_without_configuration() {
        let args = Args {
            config: None,
            reference: None,
            out: None,
            input: Some(format!("{}/suppliers.csv", test_dir("supplier_selection"))),
            input_type: None,
            excel_worksheet_name: None,
            catalog: false,
            verbose: false,
        };
        let js = run_ranking(&args).unwrap();
        assert_eq!(js["config"]["decision"], json!("suppliers.csv"));
        assert_eq!(js["config"]["totalWeight"], json!(3.0));
        // The cost criterion is minimized, as in the catalog.
        assert_eq!(js["criteria"][0]["direction"], json!("minimize"));
        assert_eq!(js["criteria"][2]["direction"], json!("maximize"));
        assert_eq!(js["ranking"].as_array().map(|a| a.len()), Some(3));
        assert!(js.get("diagnostics").is_none());
    }

    #[test]
    fn unknown_provider() {
        let mut args = fixture_args("supplier_selection");
        args.input_type = Some("ods".to_string());
        assert!(matches!(
            run_ranking(&args),
            Err(RankError::Whatever { .. })
        ));
    }

    #[test]
    fn diagnostics_matrices() {
        let criteria = vec![Criterion::new(
            "c",
            Direction::Maximize,
            1.0,
            PreferenceFunction::Usual,
        )];
        let scores = vec![Score::new("A", "c", 5.0), Score::new("B", "c", 3.0)];
        let alternatives = vec![Alternative::new("A"), Alternative::new("B")];
        let rules = RankingRules::DEFAULT_RULES;
        let result = run_promethee(&scores, &criteria, &alternatives, &rules).unwrap();
        let js = build_summary_js("test", &rules, &criteria, &result, true);
        let diag = &js["diagnostics"];
        assert_eq!(diag["differences"]["c"]["A"]["B"], json!(2.0));
        assert_eq!(diag["differences"]["c"]["B"]["A"], json!(-2.0));
        assert_eq!(diag["preferences"]["c"]["A"]["B"], json!(1.0));
        assert_eq!(diag["aggregated"]["B"]["A"], json!(0.0));
        assert_eq!(diag["netFlowMatrix"]["B"]["A"], json!(-1.0));
        assert!(diag["aggregated"]["A"].get("A").is_none());
        assert_eq!(js["relations"][0]["relation"], json!("P"));
    }

    #[test]
    fn qualitative_scale_warnings() {
        let mut criteria = vec![
            Criterion::new("C2 - Quality", Direction::Maximize, 1.0, PreferenceFunction::Usual),
            Criterion::new("C13", Direction::Maximize, 1.0, PreferenceFunction::Usual),
            Criterion::new("C1 - Cost", Direction::Minimize, 1.0, PreferenceFunction::Usual),
        ];
        let scores = vec![
            Score::new("A", "C2 - Quality", 7.0),
            Score::new("B", "C2 - Quality", 5.0),
            Score::new("A", "C13", 0.0),
            Score::new("A", "C1 - Cost", 1200.0),
        ];
        let flagged: Vec<(&str, f64)> = check_qualitative_scales(&criteria, &scores)
            .iter()
            .map(|s| (s.criterion.as_str(), s.value))
            .collect();
        assert_eq!(flagged, vec![("C2 - Quality", 7.0), ("C13", 0.0)]);

        criteria[0].excluded = true;
        let flagged = check_qualitative_scales(&criteria, &scores);
        assert_eq!(flagged.len(), 1);
        assert_eq!(flagged[0].criterion, "C13");
    }

    #[test]
    fn provider_from_extension() {
        assert_eq!(infer_provider("a/b/suppliers.XLSX"), "xlsx");
        assert_eq!(infer_provider("suppliers.csv"), "csv");
        assert_eq!(infer_provider("suppliers"), "csv");
    }
}
