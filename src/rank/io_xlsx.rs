use calamine::{open_workbook, DataType, Range, Reader, Xlsx};

use crate::rank::{io_common::parse_score, *};

fn get_range(path: &str, worksheet: &Option<String>) -> RankResult<Range<DataType>> {
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path })?;
    let wrange = match worksheet {
        Some(name) => workbook
            .worksheet_range(name)
            .context(MissingWorksheetSnafu { name, path })?
            .context(OpeningExcelSnafu { path })?,
        None => workbook
            .worksheet_range_at(0)
            .context(EmptyExcelSnafu { path })?
            .context(OpeningExcelSnafu { path })?,
    };
    Ok(wrange)
}

fn cell_text(cell: &DataType) -> String {
    match cell {
        DataType::String(s) => s.trim().to_string(),
        DataType::Int(i) => format!("{}", i),
        DataType::Float(f) => format!("{}", f),
        DataType::Empty => "".to_string(),
        x => format!("{:?}", x),
    }
}

/// Reads a score cell. Text cells go through the same parser as CSV files.
fn read_score_calamine(
    cell: &DataType,
    lineno: usize,
    criterion: &str,
) -> RankResult<Option<f64>> {
    let res = match cell {
        DataType::Float(f) => Ok(Some(*f)),
        DataType::Int(i) => Ok(Some(*i as f64)),
        DataType::Empty => Ok(None),
        DataType::String(s) => parse_score(s),
        x => Err(format!("{:?}", x)),
    };
    res.map_err(|content| RankError::InvalidCell {
        lineno,
        criterion: criterion.to_string(),
        content,
    })
}

pub fn read_xlsx_table(path: &str, source: &MatrixSource) -> RankResult<ParsedTable> {
    let wrange = get_range(path, &source.excel_worksheet_name)?;
    let name_col = source.alternative_column()?;
    let first_col = source.first_criterion_column()?;

    let mut iter = wrange.rows();
    let header = iter.next().context(MissingHeaderSnafu { path })?;
    debug!("read_xlsx_table: header: {:?}", header);
    let criteria: Vec<String> = header.iter().skip(first_col).map(cell_text).collect();
    // Trailing empty columns are formatting leftovers.
    let num_criteria = criteria
        .iter()
        .rposition(|c| !c.is_empty())
        .map(|i| i + 1)
        .unwrap_or(0);
    let criteria: Vec<String> = criteria.into_iter().take(num_criteria).collect();
    ensure!(
        !criteria.is_empty(),
        MissingCriteriaColumnsSnafu {
            path,
            column: first_col
        }
    );

    let mut rows: Vec<ParsedRow> = Vec::new();
    for (idx, row) in iter.enumerate() {
        let lineno = idx + 2;
        debug!("read_xlsx_table: lineno: {:?} row: {:?}", lineno, row);
        if row.iter().all(|c| cell_text(c).is_empty()) {
            continue;
        }
        let alternative = row
            .get(name_col)
            .map(cell_text)
            .filter(|s| !s.is_empty())
            .context(MissingAlternativeNameSnafu { lineno })?;
        let mut cells: Vec<Option<f64>> = Vec::new();
        for (cidx, criterion) in criteria.iter().enumerate() {
            let cell = match row.get(first_col + cidx) {
                Some(c) => read_score_calamine(c, lineno, criterion)?,
                None => None,
            };
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
