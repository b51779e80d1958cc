//! Reference export: NETWORK, SITECHAN, SITE, AFFILIATION, SENSOR, INSTRUMENT

use crate::common::*;
use std::fs;

fn export(catalog: Catalog) -> (TestExport, ExportSummary) {
    let test = TestExport::new(catalog);
    let summary = test
        .exporter
        .export_reference(id(CHANNEL), &TimeWindow::all())
        .unwrap();
    (test, summary)
}

#[test]
fn writes_all_reference_tables() {
    let (test, summary) = export(demo_catalog());
    assert_eq!(summary.rows(Table::Network), 1);
    assert_eq!(summary.rows(Table::Sitechan), 2);
    assert_eq!(summary.rows(Table::Site), 3);
    assert_eq!(summary.rows(Table::Affiliation), 2);
    assert_eq!(summary.rows(Table::Sensor), 1);
    assert_eq!(summary.rows(Table::Instrument), 1);

    for table in [
        Table::Network,
        Table::Sitechan,
        Table::Site,
        Table::Affiliation,
        Table::Sensor,
        Table::Instrument,
    ] {
        assert!(test.table_path(table).exists(), "{} missing", table);
    }
    assert!(!test.table_path(Table::Wfdisc).exists());
}

#[test]
fn network_scenario() {
    let (test, _) = export(demo_catalog());
    let lines = test.lines(Table::Network);
    assert_eq!(column(Table::Network, &lines[0], "net"), "demo    ");
    assert_eq!(column(Table::Network, &lines[0], "nettype"), "LO  ");
}

#[test]
fn station_without_description_has_dash_staname() {
    let (test, _) = export(demo_catalog());
    let lines = test.lines(Table::Site);
    assert_eq!(
        column(Table::Site, &lines[0], "staname"),
        format!("{:<50}", "-")
    );
}

#[test]
fn every_fixed_width_row_has_layout_length() {
    let (test, _) = export(demo_catalog());
    for table in [
        Table::Network,
        Table::Site,
        Table::Affiliation,
        Table::Sensor,
        Table::Instrument,
    ] {
        let expected = table.row_len().unwrap();
        for line in test.lines(table) {
            assert_eq!(line.len(), expected, "{} row length", table);
        }
    }
}

#[test]
fn sensor_chanid_matches_sitechan() {
    let (test, _) = export(demo_catalog());
    let sitechan = test.lines(Table::Sitechan);
    let sensor = test.lines(Table::Sensor);
    let sitechan_ids: Vec<&str> = sitechan
        .iter()
        .map(|l| column(Table::Sitechan, l, "chanid"))
        .collect();
    let sensor_chanid = column(Table::Sensor, &sensor[0], "chanid").trim_end();
    assert!(sitechan_ids.contains(&sensor_chanid));
}

#[test]
fn response_side_file_named_in_instrument_row() {
    let (test, summary) = export(demo_catalog());
    assert_eq!(summary.sidecars(), 1);
    let lines = test.lines(Table::Instrument);
    let dfile = column(Table::Instrument, &lines[0], "dfile").trim_end().to_string();
    assert_eq!(fs::read(test.path(&dfile)).unwrap(), b"poles and zeros");
}

#[test]
fn missing_station_membership_empties_every_table() {
    let mut catalog = demo_catalog();
    catalog.station_memberships.clear();
    let (test, summary) = export(catalog);
    assert_eq!(summary.total_rows(), 0);
    assert_eq!(summary.tables.len(), 6);
    assert!(test.read(Table::Site).is_empty());
    assert!(test.read(Table::Network).is_empty());
}

#[test]
fn out_of_order_versions_empty_every_table() {
    let mut catalog = demo_catalog();
    catalog.channels.reverse();
    let (test, summary) = export(catalog);
    assert_eq!(summary.total_rows(), 0);
    assert!(test.read(Table::Sitechan).is_empty());
}

#[test]
fn incomplete_instrument_chain_only_empties_instrument_tables() {
    let mut catalog = demo_catalog();
    catalog.calibrations.clear();
    let (test, summary) = export(catalog);
    assert_eq!(summary.rows(Table::Sensor), 0);
    assert_eq!(summary.rows(Table::Instrument), 0);
    assert_eq!(summary.rows(Table::Site), 3);
    assert!(test.table_path(Table::Sensor).exists());
}

#[test]
fn rerun_truncates_previous_files() {
    let test = TestExport::new(demo_catalog());
    test.exporter
        .export_reference(id(CHANNEL), &TimeWindow::all())
        .unwrap();
    let first = test.read(Table::Site);
    test.exporter
        .export_reference(id(CHANNEL), &TimeWindow::all())
        .unwrap();
    assert_eq!(test.read(Table::Site), first);
    assert_eq!(test.lines(Table::Site).len(), 3);
}

#[test]
fn window_limits_versions() {
    let test = TestExport::new(demo_catalog());
    let window = TimeWindow::between(at(2009, 1, 1), at(2011, 1, 1));
    let summary = test.exporter.export_reference(id(CHANNEL), &window).unwrap();
    assert_eq!(summary.rows(Table::Sitechan), 1);
}

#[test]
fn unwritable_response_file_keeps_instrument_row() {
    let test = TestExport::new(demo_catalog());
    // a directory in the way makes the response file unwritable
    fs::create_dir(test.path("css.2000.resp")).unwrap();
    let summary = test
        .exporter
        .export_reference(id(CHANNEL), &TimeWindow::all())
        .unwrap();
    assert_eq!(summary.rows(Table::Instrument), 1);
    assert_eq!(summary.get(Table::Instrument).unwrap().detached, 1);

    let instrument = test.lines(Table::Instrument);
    assert_eq!(column(Table::Instrument, &instrument[0], "dir").trim_end(), "-");
    assert_eq!(column(Table::Instrument, &instrument[0], "dfile").trim_end(), "-");
    let sensor = test.lines(Table::Sensor);
    assert_eq!(
        column(Table::Sensor, &sensor[0], "inid"),
        column(Table::Instrument, &instrument[0], "inid")
    );
}

#[test]
fn station_in_two_networks_gets_a_row_in_each() {
    let mut catalog = demo_catalog();
    catalog.networks.push(Network {
        entity_id: id(NETWORK + 50),
        name: "IMS".to_string(),
        description: None,
        region: NetworkRegion::Global,
        originating_organization: None,
        system_change_time: Some(at(2009, 1, 1)),
    });
    // earlier than the demo membership, but in a different network
    catalog.network_memberships.push(NetworkMembership {
        id: id(301),
        network_id: id(NETWORK + 50),
        station_id: id(STATION),
        actual_change_time: at(2009, 1, 1),
        status: MembershipStatus::Active,
    });
    let (test, summary) = export(catalog);
    assert_eq!(summary.rows(Table::Network), 2);
    let nets: Vec<String> = test
        .lines(Table::Network)
        .iter()
        .map(|l| column(Table::Network, l, "net").trim_end().to_string())
        .collect();
    assert!(nets.contains(&"demo".to_string()));
    assert!(nets.contains(&"IMS".to_string()));
}

#[test]
fn channel_moved_between_sites_follows_each_site() {
    let mut catalog = demo_catalog();
    let moved = Site {
        entity_id: id(SITE + 10),
        version_id: id(411),
        name: "AS02".to_string(),
        actual_change_time: at(2011, 6, 1),
        ..catalog.sites[0].clone()
    };
    catalog.sites.insert(0, moved);
    catalog.site_channels.push(SiteChannel {
        site_id: id(SITE + 10),
        channel_id: id(CHANNEL),
    });
    catalog.station_memberships.push(StationMembership {
        id: id(510),
        station_id: id(STATION),
        site_id: id(SITE + 10),
        actual_change_time: at(2011, 6, 1),
        status: MembershipStatus::Active,
    });
    let (test, _) = export(catalog);
    let stas: Vec<String> = test
        .lines(Table::Sitechan)
        .iter()
        .map(|l| column(Table::Sitechan, l, "sta").trim_end().to_string())
        .collect();
    assert_eq!(stas, vec!["AS01", "AS02"]);
}
