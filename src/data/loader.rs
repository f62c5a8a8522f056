//! CSV Dataset Loader Module
//! Reads the state population CSV with Polars and normalizes its numeric columns.

use super::columns::*;
use super::processor::ratio;
use super::table::PopulationTable;
use polars::prelude::*;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Dataset file not found: {0}")]
    FileNotFound(PathBuf),
    #[error("Failed to load CSV: {0}")]
    Csv(#[from] PolarsError),
    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
    #[error("Row {0} has a blank State")]
    BlankState(usize),
    #[error("State '{0}' appears more than once")]
    DuplicateState(String),
}

/// How a raw text cell is normalized before numeric parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cleaning {
    /// Strip thousands separators: "1,234,567"
    Thousands,
    /// Strip the percent sign: "17.6%"
    Percent,
    /// Already numeric text
    Plain,
}

const NUMERIC_COLUMNS: [(&str, Cleaning); 9] = [
    (POPULATION, Cleaning::Thousands),
    (MALES, Cleaning::Thousands),
    (FEMALES, Cleaning::Thousands),
    (RURAL_POPULATION, Cleaning::Thousands),
    (URBAN_POPULATION, Cleaning::Thousands),
    (AREA, Cleaning::Thousands),
    (DENSITY, Cleaning::Thousands),
    (DECADAL_GROWTH, Cleaning::Percent),
    (LITERACY_RATE, Cleaning::Plain),
];

/// Every column the dashboard needs from the file.
pub const REQUIRED_COLUMNS: [&str; 10] = [
    STATE,
    POPULATION,
    MALES,
    FEMALES,
    RURAL_POPULATION,
    URBAN_POPULATION,
    AREA,
    DENSITY,
    DECADAL_GROWTH,
    LITERACY_RATE,
];

/// Parse one raw cell. Anything that does not parse becomes `None`.
pub fn parse_cell(raw: Option<&str>, cleaning: Cleaning) -> Option<f64> {
    let raw = raw?.trim();
    let cleaned = match cleaning {
        Cleaning::Thousands => raw.replace(',', ""),
        Cleaning::Percent => raw.replace('%', ""),
        Cleaning::Plain => raw.to_string(),
    };
    cleaned
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Loads the population CSV into a cleaned [`PopulationTable`].
pub struct DatasetLoader;

impl DatasetLoader {
    /// Load and clean a CSV file using Polars.
    pub fn load_csv(path: &Path) -> Result<PopulationTable, LoaderError> {
        if !path.is_file() {
            return Err(LoaderError::FileNotFound(path.to_path_buf()));
        }

        let path_str = path.to_string_lossy().to_string();

        // Read every column as text; cleaning decides what is numeric
        let raw = LazyCsvReader::new(&path_str)
            .with_infer_schema_length(Some(0))
            .finish()?
            .collect()?;

        info!(
            path = %path.display(),
            rows = raw.height(),
            columns = raw.width(),
            "read population CSV"
        );

        Self::clean(raw)
    }

    /// Clean an already-read frame: validate the header, parse numeric
    /// columns and add the urbanization rate.
    pub fn clean(raw: DataFrame) -> Result<PopulationTable, LoaderError> {
        let present: HashSet<String> = raw
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|name| !present.contains(**name))
            .map(|name| name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(LoaderError::MissingColumns(missing));
        }

        let states = Self::read_states(&raw)?;

        let mut parsed: Vec<(&str, Vec<Option<f64>>)> = Vec::with_capacity(NUMERIC_COLUMNS.len());
        for (name, cleaning) in NUMERIC_COLUMNS {
            let text = raw.column(name)?.cast(&DataType::String)?;
            let values: Vec<Option<f64>> = text
                .str()?
                .into_iter()
                .map(|cell| parse_cell(cell, cleaning))
                .collect();

            let nulls = values.iter().filter(|v| v.is_none()).count();
            if nulls > 0 {
                warn!(column = name, nulls, "cells left null after cleaning");
            } else {
                debug!(column = name, "column fully parsed");
            }
            parsed.push((name, values));
        }

        let urbanization = {
            let lookup = |wanted: &str| {
                parsed
                    .iter()
                    .find(|(name, _)| *name == wanted)
                    .map(|(_, values)| values.as_slice())
                    .unwrap_or_default()
            };
            ratio(lookup(URBAN_POPULATION), lookup(POPULATION))
        };

        let mut columns = Vec::with_capacity(parsed.len() + 2);
        columns.push(Column::new(STATE.into(), states));
        for (name, values) in parsed {
            columns.push(Column::new(name.into(), values));
        }
        columns.push(Column::new(URBANIZATION_RATE.into(), urbanization));

        let df = DataFrame::new(columns)?;
        info!(states = df.height(), "population table ready");

        Ok(PopulationTable::new(df))
    }

    fn read_states(raw: &DataFrame) -> Result<Vec<String>, LoaderError> {
        let text = raw.column(STATE)?.cast(&DataType::String)?;
        let mut seen: HashSet<String> = HashSet::new();
        let mut states = Vec::with_capacity(raw.height());

        for (row, cell) in text.str()?.into_iter().enumerate() {
            let state = cell
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .ok_or(LoaderError::BlankState(row + 1))?;

            if !seen.insert(state.to_string()) {
                return Err(LoaderError::DuplicateState(state.to_string()));
            }
            states.push(state.to_string());
        }

        Ok(states)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::{raw_frame, two_states};

    #[test]
    fn parse_cell_strips_separators_and_percent() {
        assert_eq!(parse_cell(Some("1,234,567"), Cleaning::Thousands), Some(1_234_567.0));
        assert_eq!(parse_cell(Some(" 17.64% "), Cleaning::Percent), Some(17.64));
        assert_eq!(parse_cell(Some("74.04"), Cleaning::Plain), Some(74.04));
        assert_eq!(parse_cell(Some("-0.5%"), Cleaning::Percent), Some(-0.5));
    }

    #[test]
    fn parse_cell_maps_garbage_to_null() {
        assert_eq!(parse_cell(None, Cleaning::Thousands), None);
        assert_eq!(parse_cell(Some(""), Cleaning::Thousands), None);
        assert_eq!(parse_cell(Some("n/a"), Cleaning::Percent), None);
        assert_eq!(parse_cell(Some("12%"), Cleaning::Thousands), None);
        assert_eq!(parse_cell(Some("inf"), Cleaning::Plain), None);
    }

    #[test]
    fn clean_converts_columns_and_adds_urbanization() {
        let table = two_states();

        assert_eq!(table.states(), vec!["A".to_string(), "B".to_string()]);
        assert_eq!(table.numeric(AREA).unwrap(), vec![Some(1000.0), Some(2000.0)]);
        assert_eq!(table.numeric(DENSITY).unwrap(), vec![Some(500.0), Some(1000.0)]);
        assert_eq!(table.numeric(DECADAL_GROWTH).unwrap(), vec![Some(5.0), Some(10.0)]);
        assert_eq!(
            table.numeric(URBANIZATION_RATE).unwrap(),
            vec![Some(0.3), Some(0.75)]
        );
    }

    #[test]
    fn urbanization_is_null_without_population() {
        let raw = raw_frame(&[
            ["A", "", "1", "1", "1", "1", "1", "1", "1%", "1"],
            ["B", "0", "1", "1", "1", "1", "1", "1", "1%", "1"],
            ["C", "10", "5", "5", "8", "2", "1", "1", "1%", "1"],
        ]);
        let table = DatasetLoader::clean(raw).unwrap();
        assert_eq!(
            table.numeric(URBANIZATION_RATE).unwrap(),
            vec![None, None, Some(0.2)]
        );
    }

    #[test]
    fn missing_columns_are_all_reported() {
        let raw = raw_frame(&[["A", "1", "1", "1", "1", "1", "1", "1", "1%", "1"]])
            .drop(DENSITY)
            .unwrap()
            .drop(LITERACY_RATE)
            .unwrap();

        match DatasetLoader::clean(raw) {
            Err(LoaderError::MissingColumns(missing)) => {
                assert_eq!(missing, vec![DENSITY.to_string(), LITERACY_RATE.to_string()]);
            }
            other => panic!("expected MissingColumns, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_and_blank_states_are_rejected() {
        let dup = raw_frame(&[
            ["A", "1", "1", "1", "1", "1", "1", "1", "1%", "1"],
            [" A ", "2", "1", "1", "1", "1", "1", "1", "1%", "1"],
        ]);
        assert!(matches!(
            DatasetLoader::clean(dup),
            Err(LoaderError::DuplicateState(s)) if s == "A"
        ));

        let blank = raw_frame(&[
            ["A", "1", "1", "1", "1", "1", "1", "1", "1%", "1"],
            ["  ", "2", "1", "1", "1", "1", "1", "1", "1%", "1"],
        ]);
        assert!(matches!(
            DatasetLoader::clean(blank),
            Err(LoaderError::BlankState(2))
        ));
    }

    #[test]
    fn missing_file_is_fatal() {
        let err = DatasetLoader::load_csv(Path::new("/definitely/not/here/population.csv"))
            .unwrap_err();
        assert!(matches!(err, LoaderError::FileNotFound(_)));
    }
}
