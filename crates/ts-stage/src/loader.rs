//! Read `<ride>` and `<transport>` route fragments back into stages.
//!
//! Recognised attributes: `from`, `to`, `busStop`, `lines` (space
//! separated), `intended`, `depart`, `arrivalPos`.  Other elements and
//! attributes are skipped, so whole route files can be fed in.

use std::path::Path;

use log::warn;
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use ts_core::{EdgeId, SimTime, StopId, TransportableKind, VehicleId};
use ts_network::Network;

use crate::{DrivingStage, StageError, StageResult};

/// One ride element as read from a route file.
#[derive(Clone, Debug)]
pub struct LoadedRide {
    pub kind:  TransportableKind,
    /// The `from` edge, if written.
    pub from:  Option<EdgeId>,
    pub stage: DrivingStage,
}

/// Parse every ride and transport in `xml`, in document order.
///
/// The destination defaults to the edge of `busStop` when `to` is absent;
/// the arrival position defaults to the end of the destination stop, else
/// the length of the destination edge.
pub fn load_rides(xml: &str, network: &Network) -> StageResult<Vec<LoadedRide>> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut rides = Vec::new();
    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) => {
                let kind = match e.name().as_ref() {
                    b"ride" => TransportableKind::Person,
                    b"transport" => TransportableKind::Container,
                    _ => continue,
                };
                rides.push(parse_ride(&e, kind, network)?);
            }
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(rides)
}

/// [`load_rides`] on the contents of a file.
pub fn load_rides_from_path(path: &Path, network: &Network) -> StageResult<Vec<LoadedRide>> {
    let xml = std::fs::read_to_string(path)?;
    load_rides(&xml, network)
}

fn parse_ride(e: &BytesStart<'_>, kind: TransportableKind, network: &Network) -> StageResult<LoadedRide> {
    let tag = kind.ride_tag();
    let mut from = None;
    let mut to = None;
    let mut stop = None;
    let mut lines = None;
    let mut intended = None;
    let mut depart = None;
    let mut arrival_pos = None;

    for attr in e.attributes() {
        let attr = attr?;
        let value = attr.unescape_value()?.into_owned();
        match attr.key.as_ref() {
            b"from" => from = Some(EdgeId::new(value)),
            b"to" => to = Some(EdgeId::new(value)),
            b"busStop" => stop = Some(StopId::new(value)),
            b"lines" => lines = Some(value),
            b"intended" => intended = Some(VehicleId::new(value)),
            b"depart" => depart = Some(value.parse::<SimTime>()?),
            b"arrivalPos" => {
                let pos = value.parse::<f64>().map_err(|_| StageError::InvalidAttribute {
                    attr:  "arrivalPos".to_owned(),
                    value: value.clone(),
                })?;
                arrival_pos = Some(pos);
            }
            _ => {}
        }
    }

    if let Some(stop) = &stop {
        if network.stop(stop).is_none() {
            return Err(StageError::UnknownStop(stop.clone()));
        }
    }
    let destination = match (to, &stop) {
        (Some(edge), _) => edge,
        (None, Some(stop)) => network
            .stop_edge(stop)
            .cloned()
            .ok_or_else(|| StageError::UnknownStop(stop.clone()))?,
        (None, None) => {
            return Err(StageError::MissingAttribute { tag: tag.to_owned(), attr: "to" });
        }
    };
    let edge_length = network
        .edge_length(&destination)
        .ok_or_else(|| StageError::UnknownEdge(destination.clone()))?;
    if let Some(from) = &from {
        if network.edge(from).is_none() {
            warn!("<{tag}> starts on unknown edge '{from}'");
        }
    }

    let lines = lines.ok_or_else(|| StageError::MissingAttribute { tag: tag.to_owned(), attr: "lines" })?;
    let arrival_pos = arrival_pos.unwrap_or_else(|| {
        stop.as_ref()
            .and_then(|s| network.stop(s))
            .map_or(edge_length, |s| s.end_pos)
    });

    let stage = DrivingStage::new(destination, stop, arrival_pos, lines.split_whitespace())
        .with_intended(intended, depart);
    Ok(LoadedRide { kind, from, stage })
}
