//! Table layouts
//!
//! Column order, width and NA sentinel of every exported table. These are
//! the compatibility contract with the legacy readers.

use crate::codec::{Column, Kind};
use crate::na;

/// An exported table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Table {
    /// Networks
    Network,
    /// Network/station and station/site affiliations
    Affiliation,
    /// Station and site locations with on/off dates
    Site,
    /// Channel emplacement per site
    Sitechan,
    /// Sensor/instrument assignment per channel
    Sensor,
    /// Instrument descriptions and response files
    Instrument,
    /// Waveform descriptors
    Wfdisc,
    /// Events
    Event,
    /// Origins
    Origin,
    /// Origin errors
    Origerr,
    /// Arrival/origin associations
    Assoc,
    /// Arrivals
    Arrival,
}

impl Table {
    /// Every table, in export order
    pub const ALL: [Table; 12] = [
        Table::Network,
        Table::Affiliation,
        Table::Site,
        Table::Sitechan,
        Table::Sensor,
        Table::Instrument,
        Table::Wfdisc,
        Table::Event,
        Table::Origerr,
        Table::Origin,
        Table::Assoc,
        Table::Arrival,
    ];

    /// Table name, used as the file extension
    pub fn name(&self) -> &'static str {
        match self {
            Table::Network => "network",
            Table::Affiliation => "affiliation",
            Table::Site => "site",
            Table::Sitechan => "sitechan",
            Table::Sensor => "sensor",
            Table::Instrument => "instrument",
            Table::Wfdisc => "wfdisc",
            Table::Event => "event",
            Table::Origin => "origin",
            Table::Origerr => "origerr",
            Table::Assoc => "assoc",
            Table::Arrival => "arrival",
        }
    }

    /// Column layout
    pub fn columns(&self) -> &'static [Column] {
        match self {
            Table::Network => NETWORK,
            Table::Affiliation => AFFILIATION,
            Table::Site => SITE,
            Table::Sitechan => SITECHAN,
            Table::Sensor => SENSOR,
            Table::Instrument => INSTRUMENT,
            Table::Wfdisc => WFDISC,
            Table::Event => EVENT,
            Table::Origin => ORIGIN,
            Table::Origerr => ORIGERR,
            Table::Assoc => ASSOC,
            Table::Arrival => ARRIVAL,
        }
    }

    /// Position of a column by name
    pub fn position(&self, name: &str) -> Option<usize> {
        self.columns().iter().position(|c| c.name == name)
    }

    /// Length of a rendered row, if every column has a fixed width
    pub fn row_len(&self) -> Option<usize> {
        let cols = self.columns();
        let mut total = cols.len().saturating_sub(1);
        for c in cols {
            match c.width {
                crate::Width::Fixed(w) => total += w,
                crate::Width::Free => return None,
            }
        }
        Some(total)
    }
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

const LDDATE: Column = Column::new("lddate", Kind::LoadDate, 17, na::DASH);
const COMMID_9: Column = Column::int("commid", 9, na::INT);
const COMMID_8: Column = Column::int("commid", 8, na::INT);
const AUTH: Column = Column::text("auth", 15, na::DASH);
const STA: Column = Column::text("sta", 6, na::DASH);
const CHAN: Column = Column::text("chan", 8, na::DASH);
const TIME: Column = Column::epoch("time", 17, na::TIME);
const ENDTIME: Column = Column::epoch("endtime", 17, na::ENDTIME);
const JDATE: Column = Column::jdate("jdate", 8, na::INT);
const CHANID: Column = Column::int("chanid", 8, na::INT);
const INID: Column = Column::int("inid", 8, na::INT);
const CALPER: Column = Column::float("calper", 16, na::FLOAT);
const SAMPRATE: Column = Column::float("samprate", 11, na::FLOAT);
const DIR: Column = Column::text("dir", 64, na::DASH);
const DFILE: Column = Column::text("dfile", 32, na::DASH);
const ORID: Column = Column::int("orid", 9, na::INT);
const EVID: Column = Column::int("evid", 9, na::INT);
const ARID: Column = Column::int("arid", 9, na::INT);

/// NETWORK layout
pub const NETWORK: &[Column] = &[
    Column::text("net", 8, na::DASH),
    Column::text("netname", 80, na::DASH),
    Column::text("nettype", 4, na::DASH),
    AUTH,
    COMMID_9,
    LDDATE,
];

/// AFFILIATION layout
pub const AFFILIATION: &[Column] = &[Column::text("net", 8, na::DASH), STA, LDDATE];

/// SITE layout
pub const SITE: &[Column] = &[
    STA,
    Column::jdate("ondate", 8, na::INT),
    Column::jdate("offdate", 8, na::INT),
    Column::float("lat", 11, na::COORD),
    Column::float("lon", 11, na::COORD),
    Column::float("elev", 9, na::COORD),
    Column::text("staname", 50, na::DASH),
    Column::text("statype", 4, na::DASH),
    Column::text("refsta", 6, na::DASH),
    Column::float("dnorth", 9, na::ZERO_FLOAT),
    Column::float("deast", 9, na::ZERO_FLOAT),
    LDDATE,
];

/// SITECHAN layout
pub const SITECHAN: &[Column] = &[
    STA,
    CHAN,
    Column::jdate("ondate", 8, na::INT),
    Column::free_int("chanid", na::INT),
    Column::jdate("offdate", 8, na::INT),
    Column::text("ctype", 4, na::DASH),
    Column::float("edepth", 24, na::FLOAT),
    Column::float("hang", 24, na::FLOAT),
    Column::float("vang", 24, na::FLOAT),
    Column::text("descrip", 50, na::DASH),
    LDDATE,
];

/// SENSOR layout
pub const SENSOR: &[Column] = &[
    STA,
    CHAN,
    TIME,
    ENDTIME,
    INID,
    CHANID,
    JDATE,
    Column::float("calratio", 16, na::CALRATIO),
    CALPER,
    Column::float("tshift", 16, na::ZERO_FLOAT),
    Column::text("instant", 1, na::DASH),
    LDDATE,
];

/// INSTRUMENT layout
pub const INSTRUMENT: &[Column] = &[
    INID,
    Column::text("insname", 50, na::DASH),
    Column::text("instype", 6, na::DASH),
    Column::text("band", 1, na::DASH),
    Column::text("digital", 1, na::DASH),
    SAMPRATE,
    Column::float("ncalib", 16, na::FLOAT),
    Column::float("ncalper", 16, na::FLOAT),
    DIR,
    DFILE,
    Column::text("rsptype", 6, na::DASH),
    LDDATE,
];

/// WFDISC layout
pub const WFDISC: &[Column] = &[
    STA,
    CHAN,
    TIME,
    Column::int("wfid", 8, na::INT),
    CHANID,
    JDATE,
    ENDTIME,
    Column::int("nsamp", 8, na::INT),
    SAMPRATE,
    Column::float("calib", 16, na::FLOAT),
    CALPER,
    Column::text("instype", 6, na::DASH),
    Column::text("segtype", 1, na::DASH),
    Column::text("datatype", 2, na::DASH),
    Column::text("clip", 1, na::DASH),
    DIR,
    DFILE,
    Column::int("foff", 10, na::ZERO),
    COMMID_8,
    LDDATE,
];

/// EVENT layout
pub const EVENT: &[Column] = &[
    EVID,
    Column::text("evname", 32, na::DASH),
    Column::int("prefor", 8, na::INT),
    AUTH,
    COMMID_9,
    LDDATE,
];

/// ORIGIN layout
pub const ORIGIN: &[Column] = &[
    Column::float("lat", 11, na::COORD),
    Column::float("lon", 11, na::COORD),
    Column::float("depth", 9, na::COORD),
    TIME,
    ORID,
    EVID,
    JDATE,
    Column::int("nass", 4, na::ZERO),
    Column::int("ndef", 4, na::ZERO),
    Column::int("ndp", 4, na::ZERO),
    Column::int("grn", 8, na::INT),
    Column::int("srn", 8, na::INT),
    Column::text("etype", 7, na::DASH),
    Column::float("depdp", 9, na::COORD),
    Column::text("dtype", 1, na::DASH),
    Column::float("mb", 7, na::COORD),
    Column::int("mbid", 9, na::INT),
    Column::float("ms", 7, na::COORD),
    Column::int("msid", 9, na::INT),
    Column::float("ml", 7, na::COORD),
    Column::int("mlid", 9, na::INT),
    Column::text("algorithm", 15, na::DASH),
    AUTH,
    COMMID_9,
    LDDATE,
];

/// ORIGERR layout
pub const ORIGERR: &[Column] = &[
    ORID,
    Column::float("sxx", 15, na::FLOAT),
    Column::float("syy", 15, na::FLOAT),
    Column::float("szz", 15, na::FLOAT),
    Column::float("stt", 15, na::FLOAT),
    Column::float("sxy", 15, na::FLOAT),
    Column::float("sxz", 15, na::FLOAT),
    Column::float("syz", 15, na::FLOAT),
    Column::float("sxt", 15, na::FLOAT),
    Column::float("syt", 15, na::FLOAT),
    Column::float("szt", 15, na::FLOAT),
    Column::float("sdobs", 9, na::FLOAT),
    Column::float("smajax", 9, na::FLOAT),
    Column::float("sminax", 9, na::FLOAT),
    Column::float("strike", 6, na::FLOAT),
    Column::float("sdepth", 9, na::FLOAT),
    Column::float("stime", 6, na::FLOAT),
    Column::float("conf", 5, na::ZERO_FLOAT),
    COMMID_9,
    LDDATE,
];

/// ARRIVAL layout
pub const ARRIVAL: &[Column] = &[
    STA,
    TIME,
    ARID,
    JDATE,
    Column::int("stassid", 9, na::INT),
    CHANID,
    CHAN,
    Column::text("iphase", 8, na::DASH),
    Column::text("stype", 1, na::DASH),
    Column::float("deltim", 6, na::FLOAT),
    Column::float("azimuth", 7, na::FLOAT),
    Column::float("delaz", 7, na::FLOAT),
    Column::float("slow", 7, na::FLOAT),
    Column::float("delslo", 7, na::FLOAT),
    Column::float("ema", 7, na::FLOAT),
    Column::float("rect", 7, na::FLOAT),
    Column::float("amp", 11, na::FLOAT),
    Column::float("per", 7, na::FLOAT),
    Column::float("logat", 7, na::COORD),
    Column::text("clip", 1, na::DASH),
    Column::text("fm", 2, na::DASH),
    Column::float("snr", 10, na::FLOAT),
    Column::text("qual", 1, na::DASH),
    AUTH,
    COMMID_9,
    LDDATE,
];

/// ASSOC layout
pub const ASSOC: &[Column] = &[
    ARID,
    ORID,
    STA,
    Column::text("phase", 8, na::DASH),
    Column::float("belief", 4, na::INT),
    Column::float("delta", 8, na::FLOAT),
    Column::float("seaz", 7, na::COORD),
    Column::float("esaz", 7, na::COORD),
    Column::float("timeres", 8, na::COORD),
    Column::flag("timedef", 1, na::DASH),
    Column::float("azres", 7, na::COORD),
    Column::flag("azdef", 1, na::DASH),
    Column::float("slores", 7, na::COORD),
    Column::flag("slodef", 1, na::DASH),
    Column::float("emares", 7, na::COORD),
    Column::float("wgt", 6, na::FLOAT),
    Column::text("vmodel", 15, na::DASH),
    COMMID_9,
    LDDATE,
];
