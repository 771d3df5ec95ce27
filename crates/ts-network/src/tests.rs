//! Unit tests for ts-network.

use ts_core::{Polyline, Position};

use crate::{Network, NetworkBuilder, StoppingPlace};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn straight(x0: f64, x1: f64) -> Polyline {
    Polyline::new(vec![Position::new(x0, 0.0), Position::new(x1, 0.0)])
}

/// Two consecutive eastbound edges, 200 m each, with a stop on the second.
fn two_edge_network(lefthand: bool) -> Network {
    let mut b = NetworkBuilder::new();
    b.add_edge("E0", straight(0.0, 200.0), 2)
        .add_edge("E1", straight(200.0, 400.0), 1)
        .add_stop(StoppingPlace::new("stopB", "E1_0", 50.0, 70.0).with_name("Market Square"))
        .add_stop(StoppingPlace::new("stopC", "E1_0", 100.0, 101.2))
        .lefthand(lefthand);
    b.build().unwrap()
}

// ── Network ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod network {
    use ts_core::{EdgeId, LaneId, StopId};

    use super::*;
    use crate::NetworkError;

    #[test]
    fn lanes_named_after_edge() {
        let net = two_edge_network(false);
        let e0 = net.edge(&EdgeId::from("E0")).unwrap();
        assert_eq!(e0.lanes, [LaneId::from("E0_0"), LaneId::from("E0_1")]);
        assert_eq!(net.lane_edge(&LaneId::from("E0_1")), Some(&EdgeId::from("E0")));
        assert!((e0.length - 200.0).abs() < 1e-9);
    }

    #[test]
    fn stop_edge_lookup() {
        let net = two_edge_network(false);
        assert_eq!(net.stop_edge(&StopId::from("stopB")), Some(&EdgeId::from("E1")));
        assert_eq!(net.stop_edge(&StopId::from("nowhere")), None);
    }

    #[test]
    fn roadside_mirrors_for_lefthand() {
        let right = two_edge_network(false);
        let left = two_edge_network(true);
        let e = EdgeId::from("E0");
        let p_r = right.edge_position(&e, 10.0, right.roadside_offset()).unwrap();
        let p_l = left.edge_position(&e, 10.0, left.roadside_offset()).unwrap();
        assert!(p_r.almost_same(Position::new(10.0, -3.0), 1e-9));
        assert!(p_l.almost_same(Position::new(10.0, 3.0), 1e-9));
    }

    #[test]
    fn unknown_edge_geometry_is_none() {
        let net = two_edge_network(false);
        assert!(net.edge_position(&EdgeId::from("nope"), 0.0, 0.0).is_none());
        assert!(net.edge_angle(&EdgeId::from("nope"), 0.0).is_none());
    }

    #[test]
    fn stop_wait_position_rows() {
        let net = two_edge_network(false);
        let stop = StopId::from("stopB");
        // Slot 0 stands 0.4 m before the stop end, half a lane width off.
        let p0 = net.stop_wait_position(&stop, Some(0)).unwrap();
        assert!(p0.almost_same(Position::new(200.0 + 69.6, -1.6), 1e-9));
        // No slot → midpoint.
        let mid = net.stop_wait_position(&stop, None).unwrap();
        assert!(mid.almost_same(Position::new(260.0, -1.6), 1e-9));
        // stopC fits one abreast, so slot 1 starts the second row.
        let narrow = StopId::from("stopC");
        let p1 = net.stop_wait_position(&narrow, Some(1)).unwrap();
        assert!(p1.almost_same(Position::new(200.0 + 100.8, -2.6), 1e-9));
    }

    #[test]
    fn builder_rejects_bad_input() {
        let mut dup = NetworkBuilder::new();
        dup.add_edge("E", straight(0.0, 10.0), 1).add_edge("E", straight(0.0, 10.0), 1);
        assert_eq!(dup.build().unwrap_err(), NetworkError::DuplicateEdge("E".into()));

        let mut degenerate = NetworkBuilder::new();
        degenerate.add_edge("E", Polyline::new(vec![Position::new(0.0, 0.0)]), 1);
        assert!(matches!(degenerate.build(), Err(NetworkError::DegenerateEdge(_))));

        let mut bad_lane = NetworkBuilder::new();
        bad_lane.add_edge("E", straight(0.0, 10.0), 1).add_stop(StoppingPlace::new("s", "X_0", 0.0, 5.0));
        assert!(matches!(bad_lane.build(), Err(NetworkError::UnknownLane { .. })));

        let mut too_long = NetworkBuilder::new();
        too_long.add_edge("E", straight(0.0, 10.0), 1).add_stop(StoppingPlace::new("s", "E_0", 5.0, 15.0));
        assert!(matches!(too_long.build(), Err(NetworkError::InvalidStopRange { .. })));
    }
}

// ── StoppingPlace ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod stop {
    use super::*;

    #[test]
    fn waiting_positions_fill_from_stop_end() {
        let stop = StoppingPlace::new("s", "E_0", 10.0, 12.0);
        assert_eq!(stop.transportables_abreast(), 2);
        assert!((stop.waiting_position_on_lane(Some(0)) - 11.6).abs() < 1e-9);
        assert!((stop.waiting_position_on_lane(Some(1)) - 10.8).abs() < 1e-9);
        // Wraps into the next row at the same lane offset as slot 0.
        assert!((stop.waiting_position_on_lane(Some(2)) - 11.6).abs() < 1e-9);
        assert_eq!(stop.waiting_row(Some(2)), 1);
        assert!((stop.waiting_position_on_lane(None) - 11.0).abs() < 1e-9);
    }

    #[test]
    fn tiny_stop_still_fits_one() {
        let stop = StoppingPlace::new("s", "E_0", 10.0, 10.5);
        assert_eq!(stop.transportables_abreast(), 1);
    }

    #[test]
    fn contains_with_tolerance() {
        let stop = StoppingPlace::new("s", "E_0", 10.0, 20.0);
        assert!(stop.contains(15.0, 0.0));
        assert!(!stop.contains(21.0, 0.0));
        assert!(stop.contains(21.0, 1.5));
    }
}

// ── Occupancy ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod occupancy {
    use ts_core::{EdgeId, StopId, TransportableId, TransportableKind, VehicleId};

    use crate::{EdgeOccupancy, Occupancy, StopOccupancy};

    #[test]
    fn edge_lists_keep_arrival_order_without_duplicates() {
        let mut occ = EdgeOccupancy::default();
        occ.add_transportable(TransportableKind::Person, "p2".into());
        occ.add_transportable(TransportableKind::Person, "p1".into());
        occ.add_transportable(TransportableKind::Person, "p2".into());
        occ.add_transportable(TransportableKind::Container, "c1".into());
        let persons: Vec<_> = occ.transportables(TransportableKind::Person).iter().map(|t| t.as_str()).collect();
        assert_eq!(persons, ["p2", "p1"]);
        assert!(occ.remove_transportable(TransportableKind::Container, &TransportableId::from("c1")));
        assert!(!occ.remove_transportable(TransportableKind::Container, &TransportableId::from("c1")));
    }

    #[test]
    fn waiting_vehicles_add_remove() {
        let mut occ = EdgeOccupancy::default();
        occ.add_waiting_vehicle("bus".into());
        occ.add_waiting_vehicle("bus".into());
        assert_eq!(occ.waiting_vehicles().len(), 1);
        assert!(occ.remove_waiting_vehicle(&VehicleId::from("bus")));
        assert!(occ.is_empty());
    }

    #[test]
    fn stop_slots_reuse_lowest_free() {
        let mut stop = StopOccupancy::default();
        assert_eq!(stop.add_transportable("a".into()), 0);
        assert_eq!(stop.add_transportable("b".into()), 1);
        assert_eq!(stop.add_transportable("c".into()), 2);
        assert_eq!(stop.remove_transportable(&"b".into()), Some(1));
        assert_eq!(stop.add_transportable("d".into()), 1);
        assert_eq!(stop.add_transportable("a".into()), 0);
        assert_eq!(stop.waiting_count(), 3);
    }

    #[test]
    fn occupancy_creates_entries_lazily() {
        let mut occ = Occupancy::new();
        let e = EdgeId::from("E0");
        assert!(occ.edge(&e).is_none());
        occ.edge_mut(&e).add_waiting_vehicle("v".into());
        assert_eq!(occ.edge(&e).unwrap().waiting_vehicles().len(), 1);

        let s = StopId::from("s");
        let t = TransportableId::from("p");
        occ.stop_mut(&s).add_transportable(t.clone());
        assert_eq!(occ.stop_slot(&s, &t), Some(0));
        occ.leave_stops(&t);
        assert_eq!(occ.stop_slot(&s, &t), None);
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_derives {
    use serde::Serialize;
    use serde::de::DeserializeOwned;

    use crate::{Edge, EdgeOccupancy, Lane, Network, Occupancy, StopOccupancy, StoppingPlace};

    fn assert_serde<T: Serialize + DeserializeOwned>() {}

    #[test]
    fn feature_covers_network_and_occupancy() {
        assert_serde::<Edge>();
        assert_serde::<Lane>();
        assert_serde::<Network>();
        assert_serde::<StoppingPlace>();
        assert_serde::<EdgeOccupancy>();
        assert_serde::<StopOccupancy>();
        assert_serde::<Occupancy>();
    }
}
