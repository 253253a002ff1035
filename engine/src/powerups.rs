use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PowerupKind {
    /// Crosses out one chosen cell.
    Hammer,
    /// Permutes the values still in play.
    Shuffle,
}

/// One charge pool shared by every powerup kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Powerups {
    charges: u32,
}

impl Powerups {
    pub fn new(charges: u32) -> Self {
        Self { charges }
    }

    pub fn charges(&self) -> u32 {
        self.charges
    }

    pub fn has_charges(&self) -> bool {
        self.charges > 0
    }

    pub fn try_spend(&mut self, _kind: PowerupKind) -> bool {
        if self.charges == 0 {
            return false;
        }
        self.charges -= 1;
        true
    }

    pub fn refund(&mut self, _kind: PowerupKind) {
        self.charges = self.charges.saturating_add(1);
    }
}
