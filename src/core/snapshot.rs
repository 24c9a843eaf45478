//! Serializable views of a game.
//!
//! A [`Snapshot`] captures what the board looks like at one moment:
//! every zone's contents with effective stats. It is plain serde data and
//! encodes with bincode for replay files and network transfer.

use serde::{Deserialize, Serialize};

use super::entity::EntityId;
use super::player::PlayerId;
use super::state::{Phase, World};
use crate::cards::CardId;
use crate::error::Result;
use crate::rules::GameResult;
use crate::zones::ZoneKind;

/// One entity as seen in a snapshot. Hidden entities keep only their id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityView {
    pub id: EntityId,
    pub card: Option<CardId>,
    pub name: Option<String>,
    pub attack: i64,
    pub health: i64,
    pub cost: i64,
}

impl EntityView {
    fn hidden(id: EntityId) -> Self {
        Self {
            id,
            card: None,
            name: None,
            attack: 0,
            health: 0,
            cost: 0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneSnapshot {
    pub kind: ZoneKind,
    pub entities: Vec<EntityView>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub player: PlayerId,
    pub mana: i64,
    pub max_mana: i64,
    pub zones: Vec<ZoneSnapshot>,
}

impl PlayerSnapshot {
    #[must_use]
    pub fn zone(&self, kind: ZoneKind) -> Option<&ZoneSnapshot> {
        self.zones.iter().find(|z| z.kind == kind)
    }
}

/// The full board at one moment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub turn: u32,
    pub active_player: PlayerId,
    pub phase: Phase,
    pub players: Vec<PlayerSnapshot>,
    pub result: Option<GameResult>,
}

impl Snapshot {
    /// Capture every zone of both players.
    #[must_use]
    pub fn capture(world: &World) -> Self {
        let players = PlayerId::all()
            .map(|player| {
                let resources = world.player(player);
                let zones = ZoneKind::ALL
                    .iter()
                    .map(|&kind| ZoneSnapshot {
                        kind,
                        entities: world
                            .zone(kind, player)
                            .iter()
                            .map(|&id| EntityView {
                                id,
                                card: world.entity(id).and_then(|e| e.card),
                                name: world.definition(id).map(|d| d.name.clone()),
                                attack: world.attack(id),
                                health: world.health(id),
                                cost: world.cost(id),
                            })
                            .collect(),
                    })
                    .collect();
                PlayerSnapshot {
                    player,
                    mana: resources.available_mana(),
                    max_mana: resources.max_mana,
                    zones,
                }
            })
            .collect();
        Self {
            turn: world.turn().number,
            active_player: world.active_player(),
            phase: world.phase(),
            players,
            result: world.result(),
        }
    }

    /// What `viewer` is allowed to see: the opponent's hand and secrets
    /// and both decks are reduced to bare ids.
    #[must_use]
    pub fn visible_to(&self, viewer: PlayerId) -> Self {
        let mut view = self.clone();
        for player in &mut view.players {
            for zone in &mut player.zones {
                let private = matches!(zone.kind, ZoneKind::Hand | ZoneKind::Secret);
                let hidden = zone.kind == ZoneKind::Deck || (private && player.player != viewer);
                if hidden {
                    for entity in &mut zone.entities {
                        *entity = EntityView::hidden(entity.id);
                    }
                }
            }
        }
        view
    }

    #[must_use]
    pub fn player(&self, player: PlayerId) -> Option<&PlayerSnapshot> {
        self.players.iter().find(|p| p.player == player)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(bincode::deserialize(bytes)?)
    }
}
