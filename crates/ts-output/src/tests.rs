//! Unit tests for ts-output.

#[cfg(test)]
mod recorder {
    use crate::{OutputError, OutputSink, TagRecorder};

    #[test]
    fn records_attributes_in_write_order() {
        let mut rec = TagRecorder::new();
        rec.open_tag("ride").unwrap();
        rec.write_attr("to", "E1").unwrap();
        rec.write_attr("busStop", "stopB").unwrap();
        rec.write_attr("lines", "bus1").unwrap();
        rec.close_tag(Some("Market Square")).unwrap();

        let tag = &rec.tags()[0];
        assert_eq!(tag.name, "ride");
        assert_eq!(tag.attr_names(), ["to", "busStop", "lines"]);
        assert_eq!(tag.attr("lines"), Some("bus1"));
        assert_eq!(tag.comment.as_deref(), Some("Market Square"));
        assert!(rec.is_balanced());
    }

    #[test]
    fn nested_depths() {
        let mut rec = TagRecorder::new();
        rec.open_tag("person").unwrap();
        rec.open_tag("ride").unwrap();
        rec.close_tag(None).unwrap();
        assert!(!rec.is_balanced());
        rec.close_tag(None).unwrap();

        let depths: Vec<usize> = rec.tags().iter().map(|t| t.depth).collect();
        assert_eq!(depths, [0, 1]);
    }

    #[test]
    fn attribute_after_child_rejected() {
        let mut rec = TagRecorder::new();
        rec.open_tag("person").unwrap();
        rec.open_tag("ride").unwrap();
        rec.close_tag(None).unwrap();
        let err = rec.write_attr("id", "p0").unwrap_err();
        assert!(matches!(err, OutputError::AttributeOutsideTag(ref a) if a == "id"));
    }

    #[test]
    fn close_without_open() {
        let mut rec = TagRecorder::new();
        assert!(matches!(rec.close_tag(None), Err(OutputError::NoOpenTag)));
    }
}

#[cfg(test)]
mod xml {
    use crate::{OutputError, OutputSink, XmlSink};

    fn render(f: impl FnOnce(&mut XmlSink<Vec<u8>>)) -> String {
        let mut sink = XmlSink::new(Vec::new());
        f(&mut sink);
        String::from_utf8(sink.finish().unwrap()).unwrap()
    }

    #[test]
    fn childless_element_is_empty_tag() {
        let out = render(|s| {
            s.open_tag("ride").unwrap();
            s.write_attr("from", "E0").unwrap();
            s.write_attr("to", "E1").unwrap();
            s.close_tag(None).unwrap();
        });
        assert_eq!(out, r#"<ride from="E0" to="E1"/>"#);
    }

    #[test]
    fn nested_elements_get_end_tag() {
        let out = render(|s| {
            s.open_tag("person").unwrap();
            s.write_attr("id", "p0").unwrap();
            s.open_tag("ride").unwrap();
            s.write_attr("lines", "bus1").unwrap();
            s.close_tag(None).unwrap();
            s.close_tag(None).unwrap();
        });
        assert!(out.starts_with(r#"<person id="p0">"#));
        assert!(out.contains(r#"<ride lines="bus1"/>"#));
        assert!(out.trim_end().ends_with("</person>"));
    }

    #[test]
    fn comment_follows_element() {
        let out = render(|s| {
            s.open_tag("ride").unwrap();
            s.write_attr("busStop", "stopB").unwrap();
            s.close_tag(Some("Market Square")).unwrap();
        });
        assert_eq!(out, r#"<ride busStop="stopB"/> <!-- Market Square -->"#);
    }

    #[test]
    fn comment_masks_double_hyphen() {
        let out = render(|s| {
            s.open_tag("routes").unwrap();
            s.open_tag("ride").unwrap();
            s.close_tag(Some("A & B -- C")).unwrap();
            s.open_tag("ride").unwrap();
            s.close_tag(None).unwrap();
            s.close_tag(None).unwrap();
        });
        assert!(out.contains("<ride/> <!-- A &amp; B &#45;&#45; C -->\n"));

        let body = &out[out.find("<!--").unwrap() + 4..out.find("-->").unwrap()];
        assert!(!body.contains("--"));

        let mut reader = quick_xml::Reader::from_str(&out);
        let mut comments = 0;
        loop {
            match reader.read_event().unwrap() {
                quick_xml::events::Event::Comment(_) => comments += 1,
                quick_xml::events::Event::Eof => break,
                _ => {}
            }
        }
        assert_eq!(comments, 1);
    }

    #[test]
    fn attribute_values_escaped() {
        let out = render(|s| {
            s.open_tag("ride").unwrap();
            s.write_attr("lines", "a<b").unwrap();
            s.close_tag(None).unwrap();
        });
        assert!(out.contains("a&lt;b"));
    }

    #[test]
    fn unclosed_element_reported() {
        let mut sink = XmlSink::new(Vec::new());
        sink.open_tag("person").unwrap();
        sink.open_tag("ride").unwrap();
        assert!(matches!(sink.finish(), Err(OutputError::UnclosedTags(2))));
    }

    #[test]
    fn attribute_without_element_rejected() {
        let mut sink = XmlSink::new(Vec::new());
        assert!(matches!(
            sink.write_attr("id", "x"),
            Err(OutputError::AttributeOutsideTag(_))
        ));
    }
}

#[cfg(test)]
mod stats {
    use ts_core::{OutputConfig, SimTime, TransportableKind, VehicleClass};

    use crate::{RideStatistics, RideStatsSink, RideSummary, TagRecorder};

    fn ride(kind: TransportableKind, vclass: VehicleClass, duration: i64, wait: Option<i64>) -> RideSummary {
        RideSummary {
            kind,
            route_length: 100.0,
            duration:     SimTime::from_secs(duration),
            vclass,
            line:         "l".into(),
            waiting_time: wait.map(SimTime::from_secs),
        }
    }

    #[test]
    fn non_positive_duration_counts_as_aborted() {
        let mut stats = RideStatistics::new();
        stats.add_ride(&ride(TransportableKind::Person, VehicleClass::Bus, 20, Some(5))).unwrap();
        stats.add_ride(&ride(TransportableKind::Person, VehicleClass::Bus, -1, None)).unwrap();
        stats.add_ride(&ride(TransportableKind::Person, VehicleClass::Bus, 0, Some(3))).unwrap();

        let t = stats.totals(TransportableKind::Person);
        assert_eq!(t.count, 3);
        assert_eq!(t.aborted, 2);
        assert_eq!(t.completed(), 1);
        assert_eq!(t.bus, 1);
        assert_eq!(t.waiting_time, SimTime::from_secs(5));
        assert_eq!(t.route_length, 100.0);
    }

    #[test]
    fn vehicle_class_breakdown() {
        let mut stats = RideStatistics::new();
        for vc in [VehicleClass::Rail, VehicleClass::Tram, VehicleClass::Bicycle, VehicleClass::Taxi, VehicleClass::Passenger] {
            stats.add_ride(&ride(TransportableKind::Container, vc, 10, Some(0))).unwrap();
        }
        let t = stats.totals(TransportableKind::Container);
        assert_eq!((t.rail, t.bike, t.taxi, t.bus), (2, 1, 1, 0));
        assert_eq!(t.completed(), 5);
        assert_eq!(stats.totals(TransportableKind::Person).count, 0);
    }

    #[test]
    fn means_over_completed_rides() {
        let mut stats = RideStatistics::new();
        stats.add_ride(&ride(TransportableKind::Person, VehicleClass::Bus, 10, Some(4))).unwrap();
        stats.add_ride(&ride(TransportableKind::Person, VehicleClass::Bus, 30, Some(8))).unwrap();
        let t = stats.totals(TransportableKind::Person);
        assert_eq!(t.mean_duration(), 20.0);
        assert_eq!(t.mean_waiting_time(), 6.0);
        assert_eq!(t.mean_route_length(), 100.0);
    }

    #[test]
    fn write_emits_both_elements() {
        let mut stats = RideStatistics::new();
        stats.add_ride(&ride(TransportableKind::Person, VehicleClass::Bus, 10, Some(4))).unwrap();
        let mut rec = TagRecorder::new();
        stats.write(&mut rec, &OutputConfig::default()).unwrap();
        assert!(rec.is_balanced());

        let tags = rec.tags();
        assert_eq!(tags[0].name, "rideStatistics");
        assert_eq!(tags[0].attr("number"), Some("1"));
        assert_eq!(tags[0].attr("duration"), Some("10.00"));
        assert_eq!(tags[1].name, "transportStatistics");
        assert_eq!(tags[1].attr_names(), ["number"]);
    }
}

#[cfg(test)]
mod csv_tests {
    use ts_core::{SimTime, TransportableKind, VehicleClass};

    use crate::{CsvRideWriter, RideStatsSink, RideSummary};

    #[test]
    fn header_and_rows() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("rides.csv");
        let mut w = CsvRideWriter::new(&path).unwrap();
        w.add_ride(&RideSummary {
            kind:         TransportableKind::Person,
            route_length: 120.0,
            duration:     SimTime::from_secs(15),
            vclass:       VehicleClass::Bus,
            line:         "bus1".into(),
            waiting_time: None,
        })
        .unwrap();
        w.finish().unwrap();
        w.finish().unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("kind,vclass,line,route_length,duration,waiting_time"));
        assert_eq!(lines.next(), Some("person,bus,bus1,120.00,15.00,"));
        assert_eq!(lines.next(), None);
    }
}
