use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use popdash::web::{render_page, PAGE_TITLE};
use popdash::{generate_dashboard, ChartKind, DatasetLoader};
use std::fs;

const CSV: &str = "State,Population,Males,Females,Rural Population,Urban Population,\
Area (km*km),Density (1/km*km),Decadal Growth (%),Literacy Rate (%)
A,100,60,40,70,30,\"1,000\",500,5%,80
B,200,90,110,50,150,\"2,000\",\"1,000\",10%,90
";

#[test]
fn page_embeds_decodable_charts_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("population.csv");
    fs::write(&path, CSV).unwrap();

    let table = DatasetLoader::load_csv(&path).unwrap();
    let dashboard = generate_dashboard(&table).unwrap();
    let html = render_page(&dashboard);

    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains(PAGE_TITLE));

    let prefix = "data:image/png;base64,";
    let payloads: Vec<&str> = html
        .split(prefix)
        .skip(1)
        .map(|rest| &rest[..rest.find('"').unwrap()])
        .collect();
    assert_eq!(payloads.len(), ChartKind::ALL.len());

    for (payload, chart) in payloads.iter().zip(dashboard.iter()) {
        assert_eq!(STANDARD.decode(payload).unwrap(), chart.png);
    }

    let mut last = 0;
    for kind in ChartKind::ALL {
        let at = html.find(&format!("id=\"{}\"", kind.slug())).unwrap();
        assert!(at > last);
        last = at;
    }
}
