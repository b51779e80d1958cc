//! Temporal segmentation of versioned entities
//!
//! A version is current from its own change time until the next version's
//! change time; the last version stays open. Input must already be
//! ascending by change time: the segmenter checks in a single pass and
//! refuses to re-sort. Versions sharing a change time collapse into the
//! last of them, so every interval is non-empty.

use chrono::{DateTime, Utc};
use css_core::{
    Channel, ExportError, NetworkMembership, Sensor, Site, Station, StationMembership,
};
use uuid::Uuid;

/// An entity with a version history
pub trait Versioned {
    /// Id shared by all versions of the entity
    fn entity_id(&self) -> Uuid;
    /// Time this version became effective
    fn change_time(&self) -> DateTime<Utc>;
}

impl<T: Versioned + ?Sized> Versioned for &T {
    fn entity_id(&self) -> Uuid {
        (**self).entity_id()
    }
    fn change_time(&self) -> DateTime<Utc> {
        (**self).change_time()
    }
}

impl Versioned for Station {
    fn entity_id(&self) -> Uuid {
        self.entity_id
    }
    fn change_time(&self) -> DateTime<Utc> {
        self.actual_change_time
    }
}

impl Versioned for Site {
    fn entity_id(&self) -> Uuid {
        self.entity_id
    }
    fn change_time(&self) -> DateTime<Utc> {
        self.actual_change_time
    }
}

impl Versioned for Channel {
    fn entity_id(&self) -> Uuid {
        self.entity_id
    }
    fn change_time(&self) -> DateTime<Utc> {
        self.actual_time
    }
}

impl Versioned for Sensor {
    fn entity_id(&self) -> Uuid {
        self.id
    }
    fn change_time(&self) -> DateTime<Utc> {
        self.actual_time
    }
}

impl Versioned for StationMembership {
    fn entity_id(&self) -> Uuid {
        self.station_id
    }
    fn change_time(&self) -> DateTime<Utc> {
        self.actual_change_time
    }
}

/// Keyed by station; a station's memberships in different networks are
/// separate histories and must be split by `network_id` first
impl Versioned for NetworkMembership {
    fn entity_id(&self) -> Uuid {
        self.station_id
    }
    fn change_time(&self) -> DateTime<Utc> {
        self.actual_change_time
    }
}

/// End of a validity interval
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidUntil {
    /// Superseded at this instant
    At(DateTime<Utc>),
    /// Still current
    Open,
}

impl ValidUntil {
    /// The closing instant, if any
    pub fn at(&self) -> Option<DateTime<Utc>> {
        match self {
            ValidUntil::At(t) => Some(*t),
            ValidUntil::Open => None,
        }
    }

    /// Whether the interval is open-ended
    pub fn is_open(&self) -> bool {
        matches!(self, ValidUntil::Open)
    }
}

/// `[from, until)` range during which a version is current
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidityInterval {
    /// Inclusive start
    pub from: DateTime<Utc>,
    /// Exclusive end
    pub until: ValidUntil,
}

impl ValidityInterval {
    /// Whether `t` lies inside the interval
    pub fn contains(&self, t: DateTime<Utc>) -> bool {
        t >= self.from && self.until.at().map_or(true, |u| t < u)
    }
}

/// A version together with its validity interval
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment<'a, T> {
    /// First version of the run
    pub entity: &'a T,
    /// When the run was current
    pub interval: ValidityInterval,
    /// Number of input versions folded into this segment
    pub run_len: usize,
}

/// Segmentation failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SegmentError {
    /// A version is earlier than its predecessor
    #[error("Version {index} of {entity} changes before its predecessor")]
    OutOfOrder {
        /// Entity of the offending version
        entity: Uuid,
        /// Position of the offending version
        index: usize,
    },
}

impl From<SegmentError> for ExportError {
    fn from(e: SegmentError) -> Self {
        match e {
            SegmentError::OutOfOrder { entity, index } => ExportError::OutOfOrder { entity, index },
        }
    }
}

/// Verify versions are ascending by change time
pub fn ensure_ascending<T: Versioned>(versions: &[T]) -> Result<(), SegmentError> {
    for (i, pair) in versions.windows(2).enumerate() {
        if pair[1].change_time() < pair[0].change_time() {
            return Err(SegmentError::OutOfOrder {
                entity: pair[1].entity_id(),
                index: i + 1,
            });
        }
    }
    Ok(())
}

/// Versions that are current for a non-empty time: the last of each run
/// of equal change times
fn current_versions<T: Versioned>(versions: &[T]) -> Vec<usize> {
    (0..versions.len())
        .filter(|&i| {
            versions
                .get(i + 1)
                .map_or(true, |next| next.change_time() > versions[i].change_time())
        })
        .collect()
}

/// One segment per version
///
/// Versions sharing a change time collapse into the last of them, so no
/// interval is empty; `run_len` counts the collapsed versions.
pub fn segment<T: Versioned>(versions: &[T]) -> Result<Vec<Segment<'_, T>>, SegmentError> {
    ensure_ascending(versions)?;
    let current = current_versions(versions);
    Ok(current
        .iter()
        .enumerate()
        .map(|(n, &i)| Segment {
            entity: &versions[i],
            interval: ValidityInterval {
                from: versions[i].change_time(),
                until: current
                    .get(n + 1)
                    .map_or(ValidUntil::Open, |&next| ValidUntil::At(versions[next].change_time())),
            },
            run_len: i + 1 - n.checked_sub(1).map_or(0, |p| current[p] + 1),
        })
        .collect())
}

/// One segment per run of adjacent versions sharing `key`
///
/// A run spans from its first version's change time to the first version
/// of the next run. Equal change times collapse as in [`segment`].
pub fn segment_coalesced<T, K, F>(versions: &[T], key: F) -> Result<Vec<Segment<'_, T>>, SegmentError>
where
    T: Versioned,
    K: PartialEq,
    F: Fn(&T) -> K,
{
    ensure_ascending(versions)?;
    let current = current_versions(versions);
    // first input index folded into the n-th current version
    let first_folded = |n: usize| n.checked_sub(1).map_or(0, |p| current[p] + 1);

    let mut starts: Vec<usize> = Vec::new();
    for (n, &i) in current.iter().enumerate() {
        match starts.last() {
            Some(&s) if key(&versions[current[s]]) == key(&versions[i]) => {}
            _ => starts.push(n),
        }
    }
    Ok(starts
        .iter()
        .enumerate()
        .map(|(r, &s)| {
            let next = starts.get(r + 1).copied();
            let first = &versions[current[s]];
            Segment {
                entity: first,
                interval: ValidityInterval {
                    from: first.change_time(),
                    until: next.map_or(ValidUntil::Open, |n| {
                        ValidUntil::At(versions[current[n]].change_time())
                    }),
                },
                run_len: next.map_or(versions.len(), first_folded) - first_folded(s),
            }
        })
        .collect())
}

/// Split a mixed collection into per-entity version lists, keeping the
/// first-seen entity order and the input order within each entity
pub fn group_by_entity<T: Versioned + Clone>(versions: &[T]) -> Vec<(Uuid, Vec<T>)> {
    let mut groups: Vec<(Uuid, Vec<T>)> = Vec::new();
    for v in versions {
        let id = v.entity_id();
        match groups.iter_mut().find(|(g, _)| *g == id) {
            Some((_, list)) => list.push(v.clone()),
            None => groups.push((id, vec![v.clone()])),
        }
    }
    groups
}

/// Version current at `t`: the last one changed at or before `t`, or the
/// earliest when `t` precedes them all
pub fn effective_at<T: Versioned>(versions: &[T], t: DateTime<Utc>) -> Option<&T> {
    versions
        .iter()
        .filter(|v| v.change_time() <= t)
        .last()
        .or_else(|| versions.iter().min_by_key(|v| v.change_time()))
}

/// Version current at `t` across several histories: the latest change at
/// or before `t` among all of them, or the earliest overall when `t`
/// precedes them all
pub fn effective_among<'a, T, I>(histories: I, t: DateTime<Utc>) -> Option<&'a T>
where
    T: Versioned + 'a,
    I: IntoIterator<Item = &'a [T]>,
{
    let mut latest: Option<&T> = None;
    let mut earliest: Option<&T> = None;
    for v in histories.into_iter().flatten() {
        let changed = v.change_time();
        if changed <= t && latest.map_or(true, |l| changed >= l.change_time()) {
            latest = Some(v);
        }
        if earliest.map_or(true, |e| changed < e.change_time()) {
            earliest = Some(v);
        }
    }
    latest.or(earliest)
}
