use std::{collections::HashSet, fs, path::Path};
use tracker_lib::{
    scenario::{config::Config, TrackerConfig},
    source::{CatalogFileSource, ElementSource},
};

const CONFIG_FILES: &[&str] = &["iss_target.toml", "nominal.toml", "vanguard.toml"];
const CATALOG_FILES: &[&str] = &["stations.txt"];

#[test]
fn example_scenario_config_file_list_matches_expected() {
    let cfg_files: HashSet<String> = fs::read_dir("../scenarios")
        .unwrap()
        .map(|d| d.unwrap().file_name().into_string().unwrap())
        .collect();
    let expected: HashSet<String> = CONFIG_FILES
        .iter()
        .chain(CATALOG_FILES.iter())
        .map(|f| f.to_string())
        .collect();
    assert_eq!(cfg_files, expected, "Example scenarios directory is missing an expected config file or contains a new config file that should be tested");
}

#[test]
fn example_scenario_config_files_parse() {
    let dir = Path::new("../scenarios");
    for cfg_file in CONFIG_FILES {
        let p = dir.join(cfg_file);
        let cfg = Config::load(&p).unwrap();
        cfg.tracker_config().unwrap();
    }
}

#[test]
fn example_scenario_satellites_resolve() {
    let dir = Path::new("../scenarios");
    for cfg_file in CONFIG_FILES {
        let cfg = TrackerConfig::load(Some(dir.join(cfg_file))).unwrap();
        if let Some(tle) = cfg.tle.as_ref() {
            let mut source = CatalogFileSource::new(tle, cfg.selection.clone());
            source.fetch().unwrap();
        }
    }
}
