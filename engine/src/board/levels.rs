/// A fixed layout. Each pattern line is one row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Level {
    pub id: &'static str,
    pub pattern: &'static [&'static str],
}

const LEVELS: &[Level] = &[
    Level {
        id: "steps",
        pattern: &[
            "123456789",
            "987654321",
            "19.28.37.",
            "46.55.64.",
        ],
    },
    Level {
        id: "frame",
        pattern: &[
            "555555555",
            "1.......9",
            "2.......8",
            "3.......7",
            "464646464",
        ],
    },
    Level {
        id: "columns",
        pattern: &[
            "1.3.5.7.9",
            "9.7.5.3.1",
            "2.4.6.8.2",
            "8.6.4.2.8",
            "5.5.5.5.5",
        ],
    },
];

pub struct LevelCatalog;

impl LevelCatalog {
    pub fn all() -> &'static [Level] {
        LEVELS
    }

    pub fn find(id: &str) -> Option<&'static Level> {
        LEVELS.iter().find(|level| level.id == id)
    }
}
