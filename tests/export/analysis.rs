//! Event and detection export: EVENT, ORIGERR, ORIGIN, ASSOC, ARRIVAL

use crate::common::*;

fn export_event(catalog: Catalog) -> (TestExport, ExportSummary) {
    let test = TestExport::new(catalog);
    let summary = test
        .exporter
        .export_events(&EventSelection::Ids(vec![id(EVENT)]))
        .unwrap();
    (test, summary)
}

fn field(test: &TestExport, table: Table, name: &str) -> String {
    let lines = test.lines(table);
    column(table, &lines[0], name).trim_end().to_string()
}

fn float_field(test: &TestExport, table: Table, name: &str) -> f64 {
    field(test, table, name).parse().unwrap()
}

const EVENT_TABLES: [Table; 5] = [
    Table::Event,
    Table::Origerr,
    Table::Origin,
    Table::Assoc,
    Table::Arrival,
];

#[test]
fn full_chain_writes_one_row_per_table() {
    let (_test, summary) = export_event(demo_catalog());
    for table in EVENT_TABLES {
        assert_eq!(summary.rows(table), 1, "{}", table);
    }
    assert_eq!(summary.na_rows(), 0);
}

#[test]
fn keys_join_across_tables() {
    let (test, _) = export_event(demo_catalog());
    assert_eq!(field(&test, Table::Event, "evid"), "4000");
    assert_eq!(field(&test, Table::Event, "prefor"), "5000");
    assert_eq!(field(&test, Table::Origin, "orid"), "5000");
    assert_eq!(field(&test, Table::Origin, "evid"), "4000");
    assert_eq!(field(&test, Table::Origerr, "orid"), "5000");
    assert_eq!(field(&test, Table::Assoc, "orid"), "5000");
    assert_eq!(field(&test, Table::Assoc, "arid"), "6000");
    assert_eq!(field(&test, Table::Arrival, "arid"), "6000");
}

#[test]
fn origin_columns() {
    let (test, _) = export_event(demo_catalog());
    assert_eq!(float_field(&test, Table::Origin, "lat"), 10.0);
    assert_eq!(float_field(&test, Table::Origin, "lon"), 20.0);
    assert_eq!(field(&test, Table::Origin, "time"), "1309478700.000");
    assert_eq!(field(&test, Table::Origin, "jdate"), "2011182");
    assert_eq!(field(&test, Table::Origin, "nass"), "1");
    assert_eq!(field(&test, Table::Origin, "ndef"), "1");
    assert_eq!(field(&test, Table::Origin, "auth"), "IDC");
}

#[test]
fn origerr_columns() {
    let (test, _) = export_event(demo_catalog());
    assert_eq!(float_field(&test, Table::Origerr, "sxx"), 1.5);
    assert_eq!(field(&test, Table::Origerr, "syy"), "-1.0");
    assert_eq!(field(&test, Table::Origerr, "conf"), "0.0");
}

#[test]
fn assoc_residuals_come_from_arrival_time_behavior() {
    let (test, _) = export_event(demo_catalog());
    assert_eq!(field(&test, Table::Assoc, "sta"), "ASAR");
    assert_eq!(field(&test, Table::Assoc, "phase"), "P");
    assert_eq!(float_field(&test, Table::Assoc, "timeres"), 0.5);
    assert_eq!(field(&test, Table::Assoc, "timedef"), "d");
    assert_eq!(float_field(&test, Table::Assoc, "wgt"), 1.0);
    // no behavior points at the azimuth measurement
    assert_eq!(field(&test, Table::Assoc, "azdef"), "-");
}

#[test]
fn arrival_columns() {
    let (test, _) = export_event(demo_catalog());
    assert_eq!(field(&test, Table::Arrival, "sta"), "ASAR");
    assert_eq!(field(&test, Table::Arrival, "time"), "1309478760.500");
    assert_eq!(field(&test, Table::Arrival, "jdate"), "2011182");
    assert_eq!(field(&test, Table::Arrival, "iphase"), "P");
    assert_eq!(float_field(&test, Table::Arrival, "azimuth"), 45.0);
    assert_eq!(float_field(&test, Table::Arrival, "delaz"), 2.0);
    assert_eq!(float_field(&test, Table::Arrival, "deltim"), 0.12);
    assert_eq!(field(&test, Table::Arrival, "auth"), "IDC");
}

#[test]
fn unknown_event_writes_empty_files() {
    let mut catalog = demo_catalog();
    catalog.events.clear();
    let (test, summary) = export_event(catalog);
    assert_eq!(summary.tables.len(), 5);
    assert_eq!(summary.total_rows(), 0);
    for table in EVENT_TABLES {
        assert!(test.read(table).is_empty(), "{}", table);
    }
}

#[test]
fn event_without_hypotheses_stops_after_origerr() {
    let mut catalog = demo_catalog();
    catalog.events[0].hypotheses.clear();
    catalog.events[0].preferred_event_hypothesis_history.clear();
    let (test, summary) = export_event(catalog);
    assert_eq!(summary.rows(Table::Event), 1);
    assert_eq!(summary.rows(Table::Origerr), 1);
    assert_eq!(summary.rows(Table::Origin), 0);
    assert_eq!(summary.rows(Table::Assoc), 0);
    assert_eq!(summary.rows(Table::Arrival), 0);

    // the bare orid still links EVENT and ORIGERR
    assert_eq!(field(&test, Table::Event, "prefor"), "5000");
    assert_eq!(field(&test, Table::Origerr, "orid"), "5000");
    assert_eq!(field(&test, Table::Origerr, "sxx"), "-1.0");
}

#[test]
fn hypothesis_without_associations_stops_after_origerr() {
    let mut catalog = demo_catalog();
    catalog.events[0].hypotheses[0].associations.clear();
    let (test, summary) = export_event(catalog);
    assert_eq!(summary.rows(Table::Event), 1);
    assert_eq!(summary.rows(Table::Origerr), 1);
    assert_eq!(summary.rows(Table::Origin), 0);
    assert!(test.read(Table::Assoc).is_empty());
    assert!(test.read(Table::Arrival).is_empty());
}

#[test]
fn missing_detection_hypotheses_stop_after_origerr() {
    let mut catalog = demo_catalog();
    catalog.signal_detection_hypotheses.clear();
    let (_test, summary) = export_event(catalog);
    assert_eq!(summary.rows(Table::Event), 1);
    assert_eq!(summary.rows(Table::Origerr), 1);
    assert_eq!(summary.rows(Table::Origin) + summary.rows(Table::Arrival), 0);
}

#[test]
fn missing_parent_detection_leaves_station_na() {
    let mut catalog = demo_catalog();
    catalog.signal_detections.clear();
    let (test, summary) = export_event(catalog);
    assert_eq!(summary.rows(Table::Arrival), 1);
    assert_eq!(field(&test, Table::Arrival, "sta"), "-");
    assert_eq!(field(&test, Table::Arrival, "auth"), "-");
}

#[test]
fn window_selection_matches_origin_time() {
    let test = TestExport::new(demo_catalog());
    let inside = TimeWindow::between(at(2011, 7, 1), at(2011, 7, 2));
    let summary = test
        .exporter
        .export_events(&EventSelection::Window(inside))
        .unwrap();
    assert_eq!(summary.rows(Table::Event), 1);

    let outside = TimeWindow::between(at(2012, 1, 1), at(2012, 2, 1));
    let summary = test
        .exporter
        .export_events(&EventSelection::Window(outside))
        .unwrap();
    assert_eq!(summary.total_rows(), 0);
}

#[test]
fn detection_export_writes_arrival_only() {
    let test = TestExport::new(demo_catalog());
    let summary = test.exporter.export_detections(&[id(SDH)]).unwrap();
    assert_eq!(summary.tables.len(), 1);
    assert_eq!(summary.rows(Table::Arrival), 1);
    assert_eq!(field(&test, Table::Arrival, "arid"), "6000");
    assert!(!test.table_path(Table::Event).exists());
}

#[test]
fn unknown_detection_writes_empty_arrival() {
    let test = TestExport::new(demo_catalog());
    let summary = test.exporter.export_detections(&[id(9999)]).unwrap();
    assert_eq!(summary.rows(Table::Arrival), 0);
    assert!(test.read(Table::Arrival).is_empty());
}
