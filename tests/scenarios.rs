//! Data-driven checks against hand-written scenarios in `tests/data`.

use imgsearch::{search, Algorithm, Match, PixelGrid, Rgb, SearchConfig};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Deserialize)]
struct Pixel {
    x: usize,
    y: usize,
    rgb: [u8; 3],
}

#[derive(Debug, Deserialize)]
struct GridSpec {
    width: usize,
    height: usize,
    fill: [u8; 3],
    #[serde(default)]
    pixels: Vec<Pixel>,
}

impl GridSpec {
    fn build(&self) -> PixelGrid {
        let mut grid = PixelGrid::filled(self.width, self.height, Rgb::from(self.fill)).unwrap();
        for px in &self.pixels {
            assert!(grid.set(px.x, px.y, Rgb::from(px.rgb)), "pixel outside grid");
        }
        grid
    }
}

#[derive(Debug, Deserialize)]
struct Case {
    name: String,
    algorithm: String,
    threads: Vec<usize>,
    large: GridSpec,
    small: GridSpec,
    expected: Vec<[usize; 2]>,
}

#[derive(Debug, Deserialize)]
struct Scenarios {
    cases: Vec<Case>,
}

fn load_scenarios() -> Scenarios {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data/scenarios.json");
    let text = fs::read_to_string(&path).unwrap();
    serde_json::from_str(&text).unwrap()
}

#[test]
fn scenarios_produce_expected_anchors() {
    let scenarios = load_scenarios();
    assert!(!scenarios.cases.is_empty());

    for case in &scenarios.cases {
        let large = case.large.build();
        let small = case.small.build();
        let algorithm: Algorithm = case.algorithm.parse().unwrap();
        let expected: Vec<Match> = case
            .expected
            .iter()
            .map(|&[row, col]| Match { row, col })
            .collect();

        for &threads in &case.threads {
            let cfg = SearchConfig {
                algorithm,
                threads,
                ..SearchConfig::default()
            };
            let found = search(&large, &small, &cfg).unwrap().into_vec();
            assert_eq!(found, expected, "case {} with {threads} threads", case.name);
        }
    }
}
