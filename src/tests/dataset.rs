use crate::{
    prelude::{ObservationReader, ObservationType},
    tests::toolkit::ALL_TYPES,
};
use std::path::PathBuf;

fn resources() -> PathBuf {
    PathBuf::new()
        .join(env!("CARGO_MANIFEST_DIR"))
        .join("data/B3")
}

#[test]
fn parse_dataset() {
    let path = resources().join("sample.b3");
    let content = std::fs::read_to_string(&path).unwrap();

    let observations = ObservationReader::from_file(&path)
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();

    assert_eq!(observations.len(), 13);

    // one sensor pass: 4 lines, 10s apart
    let pass = &observations[..5];
    for obs in pass {
        assert_eq!(obs.satellite, 43013);
        assert_eq!(obs.sensor, 342);
        assert_eq!(obs.observation_type(), ObservationType::AzElRange);
    }
    for window in pass[..4].windows(2) {
        let dt = window[1].epoch - window[0].epoch;
        assert_eq!(dt.to_seconds(), 10.0);
    }

    let tagged = &observations[4];
    assert_eq!(tagged.track_position, Some(1));
    assert_eq!(tagged.astat, Some(0));
    assert_eq!(tagged.site_tag, Some(1234));
    assert_eq!(tagged.spadoc_tag, Some(43013));

    for (obs, line) in observations[5..].iter().zip(ALL_TYPES.iter()) {
        assert_eq!(obs.source_line(), Some(*line));
    }

    // lines regenerate identically
    for (obs, line) in observations.iter().zip(content.lines()) {
        assert_eq!(obs.format_line().unwrap(), line);
    }
}

#[test]
#[cfg(feature = "flate2")]
fn parse_gzip_dataset() {
    let plain = ObservationReader::from_file(resources().join("sample.b3"))
        .unwrap()
        .collect::<Result<Vec<crate::prelude::Observation>, _>>()
        .unwrap();

    let compressed = ObservationReader::from_file(resources().join("sample.b3.gz"))
        .unwrap()
        .collect::<Result<Vec<crate::prelude::Observation>, _>>()
        .unwrap();

    assert_eq!(plain, compressed);
}
