//! Whole-run properties: idempotence, key sequences, source independence

use crate::common::*;
use css_export::KeyBases;
use std::collections::HashSet;

fn export_everything(test: &TestExport) {
    let all = TimeWindow::all();
    test.exporter.export_reference(id(CHANNEL), &all).unwrap();
    test.exporter.export_waveforms(id(CHANNEL), &all).unwrap();
    test.exporter
        .export_events(&EventSelection::Ids(vec![id(EVENT)]))
        .unwrap();
}

fn two_event_catalog() -> Catalog {
    let mut catalog = demo_catalog();
    catalog.events.push(event(EVENT + 1, HYPOTHESIS + 100, &[]));
    catalog
}

#[test]
fn repeated_runs_are_byte_identical() {
    let test = TestExport::new(demo_catalog());
    export_everything(&test);
    let first = test.snapshot();
    assert!(!first.is_empty());

    export_everything(&test);
    assert_eq!(test.snapshot(), first);
}

#[test]
fn json_catalog_exports_identically() {
    let catalog = demo_catalog();
    let json = catalog.to_json().unwrap();
    let reloaded = Catalog::from_json(&json).unwrap();

    let original = TestExport::new(catalog);
    let roundtrip = TestExport::new(reloaded);
    export_everything(&original);
    export_everything(&roundtrip);
    assert_eq!(original.snapshot(), roundtrip.snapshot());
}

#[test]
fn origin_and_origerr_rows_correspond() {
    let test = TestExport::new(two_event_catalog());
    let summary = test
        .exporter
        .export_events(&EventSelection::Ids(vec![id(EVENT), id(EVENT + 1)]))
        .unwrap();
    assert_eq!(summary.rows(Table::Event), 2);
    assert_eq!(summary.rows(Table::Origin), 2);
    assert_eq!(summary.rows(Table::Origerr), summary.rows(Table::Origin));
    // the hypothesis without associations keeps one placeholder ASSOC row
    assert_eq!(summary.rows(Table::Assoc), 2);
    assert_eq!(summary.get(Table::Assoc).unwrap().na_rows, 1);

    let orids = |table: Table| -> Vec<String> {
        test.lines(table)
            .iter()
            .map(|l| column(table, l, "orid").trim_end().to_string())
            .collect()
    };
    assert_eq!(orids(Table::Origin), orids(Table::Origerr));
}

#[test]
fn keys_increase_and_never_repeat() {
    let test = TestExport::new(two_event_catalog());
    test.exporter
        .export_events(&EventSelection::Ids(vec![id(EVENT), id(EVENT + 1)]))
        .unwrap();

    let evids: Vec<u64> = test
        .lines(Table::Event)
        .iter()
        .map(|l| column(Table::Event, l, "evid").trim_end().parse().unwrap())
        .collect();
    assert_eq!(evids, vec![4000, 4001]);

    let orids: Vec<u64> = test
        .lines(Table::Origin)
        .iter()
        .map(|l| column(Table::Origin, l, "orid").trim_end().parse().unwrap())
        .collect();
    assert!(orids.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(orids.iter().collect::<HashSet<_>>().len(), orids.len());
}

#[test]
fn configured_key_bases_are_used() {
    let test = TestExport::with_config(demo_catalog(), |c| {
        c.with_keys(KeyBases {
            evid: 70000,
            orid: 80000,
            ..KeyBases::default()
        })
    });
    test.exporter
        .export_events(&EventSelection::Ids(vec![id(EVENT)]))
        .unwrap();
    let lines = test.lines(Table::Event);
    assert_eq!(column(Table::Event, &lines[0], "evid").trim_end(), "70000");
    assert_eq!(column(Table::Event, &lines[0], "prefor").trim_end(), "80000");
}

#[test]
fn file_prefix_names_every_file() {
    let test = TestExport::with_config(demo_catalog(), |c| c.with_file_prefix("asar"));
    test.exporter
        .export_waveforms(id(CHANNEL), &TimeWindow::all())
        .unwrap();
    assert!(test.path("asar.wfdisc").exists());
    assert!(test.path("asar.3000.w").exists());
    assert!(!test.path("css.wfdisc").exists());
}
