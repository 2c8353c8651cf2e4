//! Battle engine: turn order, action resolution and victory detection
//!
//! Every action runs: resolve -> base control -> victory check. Once a
//! winner is known the turn order is cleared and the engine is Concluded;
//! from then on only reads have any effect.

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::battle::actions::Action;
use crate::battle::ai::choose_action;
use crate::battle::constants::{is_step_vector, BASE_CONTROL_TO_WIN};
use crate::battle::field::BattleField;
use crate::battle::log::{BattleEventType, TurnLog};
use crate::battle::status::{BattleStatus, UnitStatus};
use crate::battle::units::{Skill, Unit};
use crate::core::config::BattleConfig;
use crate::core::error::{BattleError, Result};
use crate::core::types::{Faction, Position, UnitId};

/// Battle phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BattlePhase {
    #[default]
    Active,
    Concluded,
}

/// Consecutive post-action checks each side has held the opposing base
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BaseControl {
    pub player: u32,
    pub enemy: u32,
}

impl BaseControl {
    pub fn streak(&self, faction: Faction) -> u32 {
        match faction {
            Faction::Player => self.player,
            Faction::Enemy => self.enemy,
        }
    }
}

/// Complete match state
#[derive(Debug, Clone)]
pub struct BattleEngine {
    field: BattleField,
    order: Vec<UnitId>,
    cursor: usize,
    graveyard: Vec<(UnitId, Unit)>,
    base_control: BaseControl,
    base_control_threshold: u32,
    log: TurnLog,
    forced_winner: Option<Faction>,
    phase: BattlePhase,
}

impl BattleEngine {
    /// Wrap an already populated field
    pub fn new(field: BattleField) -> Self {
        Self::with_threshold(field, BASE_CONTROL_TO_WIN)
    }

    fn with_threshold(field: BattleField, base_control_threshold: u32) -> Self {
        let order = field.turn_order();
        Self {
            field,
            order,
            cursor: 0,
            graveyard: Vec::new(),
            base_control: BaseControl::default(),
            base_control_threshold,
            log: TurnLog::new(),
            forced_winner: None,
            phase: BattlePhase::Active,
        }
    }

    /// Place both sides on a fresh default field
    ///
    /// Players receive ids first, in the order given, then enemies.
    pub fn start_battle(
        players: Vec<Unit>,
        enemies: Vec<Unit>,
        obstacles: impl IntoIterator<Item = Position>,
    ) -> Result<Self> {
        Self::start_battle_with_config(&BattleConfig::default(), players, enemies, obstacles)
    }

    pub fn start_battle_with_config(
        config: &BattleConfig,
        players: Vec<Unit>,
        enemies: Vec<Unit>,
        obstacles: impl IntoIterator<Item = Position>,
    ) -> Result<Self> {
        if let Err(err) = config.validate() {
            tracing::warn!("Rejected battle config: {}", err);
            return Err(err);
        }

        let mut field = BattleField::with_config(config, obstacles);
        for unit in players.into_iter().chain(enemies) {
            if unit.skills.is_empty() {
                return Err(BattleError::NoSkills(unit.name));
            }
            if !unit.is_alive() {
                return Err(BattleError::NotAlive(unit.name));
            }
            field.add_unit(unit)?;
        }

        tracing::info!(
            "Battle started: {} player units, {} enemy units on a {}x{} field",
            field.units_of(Faction::Player).len(),
            field.units_of(Faction::Enemy).len(),
            field.width(),
            field.height()
        );

        Ok(Self::with_threshold(field, config.base_control_threshold))
    }

    pub fn field(&self) -> &BattleField {
        &self.field
    }

    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    pub fn is_concluded(&self) -> bool {
        matches!(self.phase, BattlePhase::Concluded)
    }

    /// Current round-robin turn order
    pub fn turn_order(&self) -> &[UnitId] {
        &self.order
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Fallen units in the order they fell
    pub fn graveyard(&self) -> &[(UnitId, Unit)] {
        &self.graveyard
    }

    pub fn is_in_graveyard(&self, id: UnitId) -> bool {
        self.graveyard.iter().any(|(fallen, _)| *fallen == id)
    }

    pub fn base_control(&self) -> BaseControl {
        self.base_control
    }

    pub fn forced_winner(&self) -> Option<Faction> {
        self.forced_winner
    }

    pub fn log(&self) -> &TurnLog {
        &self.log
    }

    pub fn turn_logs(&self) -> impl Iterator<Item = &str> {
        self.log.lines()
    }

    /// Id of the first live unit with this name
    pub fn unit_named(&self, name: &str) -> Option<UnitId> {
        self.field
            .units()
            .find(|(_, unit)| unit.name == name)
            .map(|(id, _)| id)
    }

    /// Live unit or fallen unit, whichever holds `id`
    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.field.unit(id).or_else(|| {
            self.graveyard
                .iter()
                .find(|(fallen, _)| *fallen == id)
                .map(|(_, unit)| unit)
        })
    }

    fn name_of(&self, id: UnitId) -> String {
        self.unit(id)
            .map(|unit| unit.name.clone())
            .unwrap_or_else(|| id.to_string())
    }

    /// Unit whose turn it is; wraps around indefinitely
    ///
    /// Does not check liveness: ids leave the order when units fall.
    pub fn next_unit(&mut self) -> Option<UnitId> {
        if self.order.is_empty() {
            return None;
        }
        self.cursor %= self.order.len();
        let id = self.order[self.cursor];
        self.cursor += 1;
        Some(id)
    }

    /// Resolve one action for `unit_id`
    ///
    /// No-op if the unit is not on the field or the battle is over.
    pub fn take_turn(&mut self, unit_id: UnitId, action: Action) {
        if self.is_concluded() {
            tracing::debug!("Ignoring {} for {}: battle concluded", action.kind(), unit_id);
            return;
        }
        let Some(unit) = self.field.unit(unit_id) else {
            tracing::debug!("Ignoring {} for {}: not on field", action.kind(), unit_id);
            return;
        };
        let name = unit.name.clone();
        let faction = unit.faction;

        tracing::debug!("{} ({}) takes action {}", name, unit_id, action.kind());

        match action {
            Action::Move { dx, dy } => self.resolve_move(unit_id, &name, dx, dy),
            Action::Attack { targets, skill } => {
                self.resolve_attack(unit_id, &name, &targets, skill)
            }
            Action::Pass => self.log.push(
                BattleEventType::Passed { unit_id },
                format!("{} passed", name),
            ),
            Action::Surrender => {
                self.log.push(
                    BattleEventType::Surrendered { unit_id },
                    format!("{} surrendered", name),
                );
                self.force_winner(faction.opponent());
                return;
            }
            Action::Unrecognized(_) => self.log.push(
                BattleEventType::Idle { unit_id },
                format!("{} did nothing", name),
            ),
        }

        self.after_action();
    }

    fn resolve_move(&mut self, unit_id: UnitId, name: &str, dx: i32, dy: i32) {
        let destination = self
            .field
            .unit(unit_id)
            .map(|unit| unit.position().offset(dx, dy));

        let moved = match destination {
            Some(to) if is_step_vector(dx, dy) => self.field.move_unit(unit_id, to).map(|_| to),
            Some(to) => Err(BattleError::OccupiedOrOutOfBounds(to)),
            None => Err(BattleError::UnitNotOnField(unit_id)),
        };

        match moved {
            Ok(to) => self.log.push(
                BattleEventType::Moved { unit_id, to },
                format!("{} moved to {}", name, to),
            ),
            Err(err) => {
                tracing::debug!("{} failed to move by ({}, {}): {}", name, dx, dy, err);
                self.log.push(
                    BattleEventType::MoveFailed { unit_id },
                    format!("{} failed to move", name),
                );
            }
        }
    }

    fn resolve_attack(
        &mut self,
        attacker: UnitId,
        attacker_name: &str,
        targets: &[UnitId],
        skill: Option<Skill>,
    ) {
        let Some(origin) = self.field.unit(attacker).map(|unit| unit.position()) else {
            return;
        };
        let skill = match skill.or_else(|| {
            self.field
                .unit(attacker)
                .and_then(|unit| unit.primary_skill().cloned())
        }) {
            Some(skill) => skill,
            None => {
                self.log.push(
                    BattleEventType::Idle { unit_id: attacker },
                    format!("{} did nothing", attacker_name),
                );
                return;
            }
        };

        for &target in targets {
            let target_name = self.name_of(target);
            let in_reach = self
                .field
                .unit(target)
                .is_some_and(|unit| skill.reaches(origin.distance(&unit.position())));

            if !in_reach {
                self.log.push(
                    BattleEventType::Missed { attacker, target },
                    format!("{} missed {}", attacker_name, target_name),
                );
                continue;
            }

            let Some(defeated) = self
                .field
                .unit_mut(target)
                .map(|unit| unit.take_damage(skill.power))
            else {
                continue;
            };

            self.log.push(
                BattleEventType::Damaged {
                    attacker,
                    target,
                    amount: skill.power,
                },
                format!(
                    "{} used {} on {} for {} damage",
                    attacker_name, skill.name, target_name, skill.power
                ),
            );

            if defeated {
                self.log.push(
                    BattleEventType::Defeated { unit_id: target },
                    format!("{} was defeated", target_name),
                );
                if let Some(fallen) = self.field.remove_unit(target) {
                    self.order.retain(|id| *id != target);
                    self.graveyard.push((target, fallen));
                }
            }
        }
    }

    fn after_action(&mut self) {
        self.update_base_control();
        if let Some(winner) = self.check_victory() {
            self.conclude(winner);
        }
    }

    fn holds(&self, faction: Faction, cell: Position) -> bool {
        self.field
            .unit_at(cell)
            .and_then(|id| self.field.unit(id))
            .is_some_and(|unit| unit.faction == faction)
    }

    fn update_base_control(&mut self) {
        for faction in [Faction::Player, Faction::Enemy] {
            let target = self.field.base_of(faction.opponent());
            let holds = self.holds(faction, target);
            let streak = match faction {
                Faction::Player => &mut self.base_control.player,
                Faction::Enemy => &mut self.base_control.enemy,
            };
            *streak = if holds { streak.saturating_add(1) } else { 0 };
        }
    }

    /// Winner if the match is decided, checked in priority order
    pub fn check_victory(&self) -> Option<Faction> {
        if let Some(winner) = self.forced_winner {
            return Some(winner);
        }
        if !self.field.has_faction(Faction::Enemy) {
            return Some(Faction::Player);
        }
        if !self.field.has_faction(Faction::Player) {
            return Some(Faction::Enemy);
        }
        if self.base_control.player >= self.base_control_threshold {
            return Some(Faction::Player);
        }
        if self.base_control.enemy >= self.base_control_threshold {
            return Some(Faction::Enemy);
        }
        None
    }

    fn conclude(&mut self, winner: Faction) {
        self.log.push(
            BattleEventType::BattleEnded { winner },
            format!("{} wins!", winner),
        );
        self.order.clear();
        self.phase = BattlePhase::Concluded;
        tracing::info!("Battle concluded: {} wins", winner);
    }

    fn force_winner(&mut self, winner: Faction) {
        self.forced_winner = Some(winner);
        self.conclude(winner);
    }

    /// Forcefully end the battle; `victory` means the player wins
    pub fn end_battle(&mut self, victory: bool) {
        if self.is_concluded() {
            return;
        }
        let winner = if victory {
            Faction::Player
        } else {
            Faction::Enemy
        };
        self.force_winner(winner);
    }

    /// Draw the next unit and pass for it
    pub fn skip_turn(&mut self) -> Option<UnitId> {
        if self.is_concluded() {
            return None;
        }
        let id = self.next_unit()?;
        self.take_turn(id, Action::Pass);
        Some(id)
    }

    /// Take a unit out of the match without it counting as fallen
    pub fn withdraw_unit(&mut self, id: UnitId) -> Option<Unit> {
        if self.is_concluded() {
            return None;
        }
        let unit = self.field.remove_unit(id)?;
        self.order.retain(|other| *other != id);
        self.log.push(
            BattleEventType::Withdrawn { unit_id: id },
            format!("{} was withdrawn", unit.name),
        );
        Some(unit)
    }

    /// One simultaneous step
    ///
    /// Player commands (move or attack only) resolve in the order given,
    /// at most one per unit, then every enemy still standing acts on the
    /// opponent policy. The turn-order cursor is not touched.
    pub fn real_time_step(&mut self, commands: impl IntoIterator<Item = (UnitId, Action)>) {
        if self.is_concluded() {
            return;
        }

        let mut commanded = AHashSet::new();
        for (unit_id, action) in commands {
            if !commanded.insert(unit_id) {
                tracing::debug!("Dropping repeat real-time command for {}", unit_id);
                continue;
            }
            let controllable = self
                .field
                .unit(unit_id)
                .is_some_and(|unit| unit.faction == Faction::Player);
            if !controllable {
                tracing::debug!("Dropping real-time command for {}", unit_id);
                continue;
            }
            match action {
                Action::Move { .. } | Action::Attack { .. } => self.take_turn(unit_id, action),
                other => {
                    tracing::debug!("Dropping real-time {} for {}", other.kind(), unit_id)
                }
            }
        }

        for enemy in self.field.units_of(Faction::Enemy) {
            if self.is_concluded() {
                break;
            }
            if let Some(action) = choose_action(&self.field, enemy) {
                self.take_turn(enemy, action);
            }
        }
    }

    /// HP and side of every unit on the field, plus the current winner
    pub fn battle_status(&self) -> BattleStatus {
        BattleStatus {
            units: self
                .field
                .units()
                .map(|(id, unit)| UnitStatus {
                    id,
                    name: unit.name.clone(),
                    hp: unit.hp,
                    faction: unit.faction,
                    position: unit.position(),
                })
                .collect(),
            winner: self.check_victory(),
        }
    }
}
