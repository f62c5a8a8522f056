use popdash::data::columns::{DENSITY, LITERACY_RATE, URBANIZATION_RATE};
use popdash::stats::DatasetSummary;
use popdash::{generate_dashboard, ChartKind, DatasetLoader, LoaderError};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const HEADER: &str = "State,Population,Males,Females,Rural Population,Urban Population,\
Area (km*km),Density (1/km*km),Decadal Growth (%),Literacy Rate (%)";

const ROWS: &[&str] = &[
    r#"Uttar Pradesh,"199,812,341","104,480,510","95,331,831","155,317,278","44,495,063","240,928",828,20.23%,67.68"#,
    r#"Maharashtra,"112,374,333","58,243,056","54,131,277","61,556,074","50,818,259","307,713",365,15.99%,82.34"#,
    r#"Bihar,"104,099,452","54,278,157","49,821,295","92,341,436","11,758,016","94,163","1,106",25.42%,61.80"#,
    r#"Delhi,"16,787,941","8,887,326","7,900,615","419,042","16,368,899","1,484","11,320",21.21%,86.21"#,
    r#"Kerala,"33,406,061","16,027,412","17,378,649","17,471,135","15,934,926","38,852",860,4.91%,94.00"#,
    r#"Sikkim,"610,577","323,070","287,507","456,999","153,578","7,096",86,12.89%,81.42"#,
    r#"Nagaland,"1,978,502","1,024,649","953,853","1,407,536","570,966","16,579",119,-0.58%,79.55"#,
];

fn write_csv(rows: &[&str]) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("population.csv");
    let mut text = String::from(HEADER);
    for row in rows {
        text.push('\n');
        text.push_str(row);
    }
    text.push('\n');
    fs::write(&path, text).unwrap();
    (dir, path)
}

#[test]
fn loads_quoted_thousands_and_percentages() {
    let (_dir, path) = write_csv(ROWS);
    let table = DatasetLoader::load_csv(&path).unwrap();

    assert_eq!(table.height(), ROWS.len());
    assert_eq!(table.states()[3], "Delhi");

    let density = table.numeric(DENSITY).unwrap();
    assert_eq!(density[3], Some(11_320.0));

    let literacy = table.numeric(LITERACY_RATE).unwrap();
    assert_eq!(literacy[4], Some(94.0));

    let urbanization = table.numeric(URBANIZATION_RATE).unwrap();
    let expected = 16_368_899.0 / 16_787_941.0;
    assert!((urbanization[3].unwrap() - expected).abs() < 1e-12);
}

#[test]
fn dashboard_is_complete_and_deterministic() {
    let (_dir, path) = write_csv(ROWS);
    let table = DatasetLoader::load_csv(&path).unwrap();

    let first = generate_dashboard(&table).unwrap();
    let second = generate_dashboard(&table).unwrap();

    let kinds: Vec<ChartKind> = first.iter().map(|c| c.kind).collect();
    assert_eq!(kinds, ChartKind::ALL.to_vec());
    for chart in first.iter() {
        assert!(chart.png.starts_with(&[0x89, b'P', b'N', b'G']), "{:?}", chart.kind);
    }
    assert_eq!(first, second);
}

#[test]
fn summary_ranks_growth() {
    let (_dir, path) = write_csv(ROWS);
    let table = DatasetLoader::load_csv(&path).unwrap();
    let summary = DatasetSummary::compute(&table).unwrap();

    let order: Vec<&str> = summary.top_growth.iter().map(|g| g.state.as_str()).collect();
    assert_eq!(
        order,
        vec!["Bihar", "Delhi", "Uttar Pradesh", "Maharashtra", "Sikkim", "Kerala", "Nagaland"]
    );
}

#[test]
fn bad_cells_become_gaps_not_failures() {
    let mut rows = ROWS.to_vec();
    rows.push(r#"Ladakh,"274,289","151,808","122,481","225,364","48,925",unknown,n/a,,77.20"#);
    let (_dir, path) = write_csv(&rows);

    let table = DatasetLoader::load_csv(&path).unwrap();
    assert_eq!(table.numeric(DENSITY).unwrap()[7], None);
    assert_eq!(generate_dashboard(&table).unwrap().len(), 7);
}

#[test]
fn missing_column_is_reported_by_name() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("population.csv");
    fs::write(&path, "State,Population\nKerala,\"33,406,061\"\n").unwrap();

    match DatasetLoader::load_csv(&path) {
        Err(LoaderError::MissingColumns(missing)) => {
            assert_eq!(missing.len(), 8);
            assert!(missing.iter().any(|c| c == DENSITY));
        }
        other => panic!("expected missing columns, got {:?}", other.map(|t| t.height())),
    }
}

#[test]
fn missing_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.csv");
    assert!(matches!(
        DatasetLoader::load_csv(&path),
        Err(LoaderError::FileNotFound(p)) if p == path
    ));
}
