use serde::{Deserialize, Serialize};

use super::hammer::find_hammer_target;
use super::search::find_best_move;
use crate::board::{Board, CellSnapshot};
use crate::config::EngineConfig;

/// Messages from the session to the bot worker. Pure data, so the worker can
/// run anywhere the snapshot can be sent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum BotRequest {
    Find {
        cells: Vec<CellSnapshot>,
        #[serde(default)]
        check_hammer: bool,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum BotResponse {
    MoveFound {
        #[serde(rename = "move")]
        best_move: Option<(usize, usize)>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        hammer_target: Option<usize>,
    },
}

impl BotRequest {
    pub fn find(board: &Board, check_hammer: bool) -> Self {
        Self::Find {
            cells: board.snapshot(),
            check_hammer,
        }
    }
}

/// Runs one request to completion. Blocking; the links in the snapshot are
/// used as they are.
pub fn handle_request(config: &EngineConfig, request: BotRequest) -> BotResponse {
    match request {
        BotRequest::Find {
            cells,
            check_hammer,
        } => {
            let mut board = Board::from_snapshot(config.board.row_width, cells);
            let best = find_best_move(&mut board, &config.search);

            let hammer_target = if best.is_none() && check_hammer {
                find_hammer_target(&board)
            } else {
                None
            };

            BotResponse::MoveFound {
                best_move: best.map(|m| m.pair()),
                hammer_target,
            }
        }
    }
}
