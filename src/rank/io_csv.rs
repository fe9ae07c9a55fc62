// Primitives for reading CSV files.

use std::fs::File;

use crate::rank::{io_common::parse_score, *};

pub fn read_csv_table(path: &str, source: &MatrixSource) -> RankResult<ParsedTable> {
    let name_col = source.alternative_column()?;
    let first_col = source.first_criterion_column()?;

    let mut records = get_records(path)?;
    let header = match records.next() {
        Some(line_r) => line_r.context(CsvLineParseSnafu { lineno: 1_usize })?,
        None => return MissingHeaderSnafu { path }.fail(),
    };
    let criteria: Vec<String> = header
        .iter()
        .skip(first_col)
        .map(|s| s.trim().to_string())
        .collect();
    debug!("read_csv_table: header: {:?}", header);
    ensure!(
        !criteria.is_empty(),
        MissingCriteriaColumnsSnafu {
            path,
            column: first_col
        }
    );

    let mut rows: Vec<ParsedRow> = Vec::new();
    for (idx, line_r) in records.enumerate() {
        let lineno = idx + 2;
        let line = line_r.context(CsvLineParseSnafu { lineno })?;
        debug!("read_csv_table: lineno: {:?} line: {:?}", lineno, line);
        if line.iter().all(|s| s.trim().is_empty()) {
            continue;
        }
        let alternative = line
            .get(name_col)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .context(MissingAlternativeNameSnafu { lineno })?;
        let mut cells: Vec<Option<f64>> = Vec::new();
        for (cidx, criterion) in criteria.iter().enumerate() {
            let content = line.get(first_col + cidx).unwrap_or("");
            let cell = parse_score(content).map_err(|content| RankError::InvalidCell {
                lineno,
                criterion: criterion.clone(),
                content,
            })?;
            cells.push(cell);
        }
        rows.push(ParsedRow {
            lineno,
            alternative,
            cells,
        });
    }
    Ok(ParsedTable { criteria, rows })
}

fn get_records(path: &str) -> RankResult<csv::StringRecordsIntoIter<File>> {
    let rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .context(CsvOpenSnafu { path })?;
    Ok(rdr.into_records())
}
