//! Stats module - Aggregates and correlation

mod calculator;

pub use calculator::{
    CategoryTotal, CorrelationMatrix, DatasetSummary, GrowthEntry, StatsCalculator,
    CORRELATION_COLUMNS, TOP_GROWTH_COUNT,
};
