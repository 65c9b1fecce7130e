//! Parse a Celestrak-style station catalog

use track_protocol::*;

const CATALOG: &str = include_str!("../test_fixtures/stations.txt");

#[test]
fn stations_catalog() {
    let sets = parse_catalog(CATALOG).unwrap();
    assert_eq!(sets.len(), 4);

    let names: Vec<&str> = sets.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["ISS (ZARYA)", "VANGUARD 1", "GEO1", "GEO2"]);

    for set in sets.iter() {
        assert_eq!(set.line1.len(), TLE_LINE_LEN);
        assert_eq!(set.line2.len(), TLE_LINE_LEN);
        assert_eq!(set.line1[2..7], set.line2[2..7]);
    }
}

#[test]
fn stations_catalog_streamed_line_by_line() {
    let mut sets = Vec::new();
    let mut buf = String::new();

    for l in CATALOG.split_inclusive('\n') {
        buf.push_str(l);
        if buf.lines().count() < 3 {
            continue;
        }
        match parse_element_sets(&buf) {
            Ok((rest, mut parsed)) => {
                assert_eq!(rest, "");
                sets.append(&mut parsed);
                buf.clear();
            }
            Err(e) => {
                if !e.is_failure() {
                    continue;
                } else {
                    panic!("Parse error. {e}");
                }
            }
        }
    }

    assert_eq!(sets.len(), 4);
    assert_eq!(sets[1].catalog_number(), Some("00005"));
}
