use serde::{Deserialize, Serialize};

use crate::config::BoardConfig;
use crate::rng::SessionRng;

#[rustfmt::skip]
pub const CLASSIC_SEQUENCE: [u8; 27] = [
    1, 2, 3, 4, 5, 6, 7, 8, 9,
    1, 1, 1, 2, 1, 3, 1, 4, 1,
    5, 1, 6, 1, 7, 1, 8, 1, 9,
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameMode {
    Classic,
    Random,
    Easy,
    Levels,
}

impl GameMode {
    pub const ALL: [GameMode; 4] = [
        GameMode::Classic,
        GameMode::Random,
        GameMode::Easy,
        GameMode::Levels,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            GameMode::Classic => "classic",
            GameMode::Random => "random",
            GameMode::Easy => "easy",
            GameMode::Levels => "levels",
        }
    }
}

impl std::str::FromStr for GameMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GameMode::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown game mode: {}", s))
    }
}

/// Values for a fresh board. A `0` marks an inert placeholder.
pub(crate) fn initial_values(
    mode: GameMode,
    pattern: Option<&[&str]>,
    config: &BoardConfig,
    rng: &mut SessionRng,
) -> Vec<u8> {
    match mode {
        GameMode::Classic => CLASSIC_SEQUENCE.to_vec(),
        GameMode::Random => (0..config.random_cells).map(|_| rng.digit()).collect(),
        GameMode::Easy => easy_values(config.easy_cells, config.easy_pair_bias, rng),
        GameMode::Levels => pattern
            .map(|lines| parse_level_pattern(lines, config.row_width))
            .unwrap_or_default(),
    }
}

fn easy_values(count: usize, pair_bias: f64, rng: &mut SessionRng) -> Vec<u8> {
    let mut values: Vec<u8> = Vec::with_capacity(count);
    for _ in 0..count {
        let value = match values.last() {
            Some(&prev) if rng.chance(pair_bias) => {
                if rng.chance(0.5) { prev } else { 10 - prev }
            }
            _ => rng.digit(),
        };
        values.push(value);
    }
    values
}

/// One line per row. Digits 1-9 are playable; anything else, `0` included,
/// becomes a placeholder. Lines are padded or cut to `row_width`.
pub fn parse_level_pattern(lines: &[&str], row_width: usize) -> Vec<u8> {
    let mut values = Vec::with_capacity(lines.len() * row_width);
    for line in lines {
        let mut row: Vec<u8> = line
            .chars()
            .take(row_width)
            .map(|ch| match ch.to_digit(10) {
                Some(d) => d as u8,
                None => 0,
            })
            .collect();
        row.resize(row_width, 0);
        values.extend(row);
    }
    values
}
