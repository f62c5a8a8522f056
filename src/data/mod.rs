//! Data module - CSV loading, cleaning and derived values

mod loader;
mod processor;
mod table;

pub use loader::{parse_cell, Cleaning, DatasetLoader, LoaderError, REQUIRED_COLUMNS};
pub use processor::{descending_order, percentage, population_share, ratio, top_n, DerivedView};
pub use table::{ColumnError, PopulationTable};

/// Header names of the population CSV.
pub mod columns {
    pub const STATE: &str = "State";
    pub const POPULATION: &str = "Population";
    pub const MALES: &str = "Males";
    pub const FEMALES: &str = "Females";
    pub const RURAL_POPULATION: &str = "Rural Population";
    pub const URBAN_POPULATION: &str = "Urban Population";
    pub const AREA: &str = "Area (km*km)";
    pub const DENSITY: &str = "Density (1/km*km)";
    pub const DECADAL_GROWTH: &str = "Decadal Growth (%)";
    pub const LITERACY_RATE: &str = "Literacy Rate (%)";

    /// Added at load time, never read from the file.
    pub const URBANIZATION_RATE: &str = "Urbanization Rate";
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::columns::*;
    use super::{DatasetLoader, PopulationTable};
    use polars::prelude::*;

    /// Raw all-text frame shaped like the CSV after reading.
    pub fn raw_frame(rows: &[[&str; 10]]) -> DataFrame {
        let names = [
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
        let columns: Vec<Column> = names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let cells: Vec<&str> = rows.iter().map(|row| row[i]).collect();
                Column::new((*name).into(), cells)
            })
            .collect();
        DataFrame::new(columns).expect("fixture frame")
    }

    /// The two-state fixture: A (100 people) and B (200 people).
    pub fn two_states() -> PopulationTable {
        let raw = raw_frame(&[
            ["A", "100", "60", "40", "70", "30", "1,000", "500", "5%", "80"],
            ["B", "200", "90", "110", "50", "150", "2,000", "1,000", "10%", "90"],
        ]);
        DatasetLoader::clean(raw).expect("fixture cleans")
    }

    /// Twelve states with distinct growth and a couple of gaps.
    pub fn twelve_states() -> PopulationTable {
        let raw = raw_frame(&[
            ["S01", "1,000", "510", "490", "600", "400", "10", "100", "12.5%", "71"],
            ["S02", "2,000", "1,020", "980", "1,500", "500", "20", "250", "3%", "64"],
            ["S03", "3,500", "1,800", "1,700", "2,000", "1,500", "30", "13,500", "21%", "88"],
            ["S04", "800", "400", "400", "700", "100", "40", "45", "8%", "59"],
            ["S05", "", "300", "310", "500", "110", "50", "60", "17%", "77"],
            ["S06", "4,100", "2,000", "2,100", "3,000", "1,100", "60", "1,200", "n/a", "81"],
            ["S07", "650", "330", "320", "200", "450", "70", "9,000", "25%", "92"],
            ["S08", "1,250", "640", "610", "900", "350", "80", "310", "14%", "68"],
            ["S09", "900", "460", "440", "450", "450", "90", "700", "19%", "74"],
            ["S10", "2,700", "1,380", "1,320", "1,900", "800", "100", "520", "9%", "70"],
            ["S11", "1,600", "820", "780", "1,000", "600", "110", "880", "11%", "66"],
            ["S12", "3,000", "1,530", "1,470", "2,100", "900", "120", "2,400", "14%", "85"],
        ]);
        DatasetLoader::clean(raw).expect("fixture cleans")
    }
}
