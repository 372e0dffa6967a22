//! The protocol engine.
//!
//! Reads engine commands line by line, keeps the `State` synchronized,
//! invokes the strategy when the engine asks for decisions, and writes
//! protocol responses. Exactly one response line is emitted per `go`
//! sub-command and per `pick_starting_regions`; every other command is
//! silent on stdout.
//!
//! No condition other than end-of-input is fatal. A malformed line is
//! abandoned, a bad entry inside a valid command is skipped, and the
//! loop keeps reading either way.

use std::io::{BufRead, Write};

use crate::board::{Move, NameTable, Region};
use crate::log::Logger;
use crate::protocol::moves::{format_moves, parse_move};
use crate::protocol::parser::{parse_command, Command, MapUpdate};
use crate::state::State;
use crate::strategy::{Strategy, STARTING_PICKS};

/// Where the session currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Receiving identity and topology; the board is under construction.
    Setup,
    /// The per-turn loop of reports and action requests.
    Turn,
    /// Input ended; no further lines will be processed.
    Terminated,
}

/// Drives one protocol session for one strategy.
pub struct Engine<S: Strategy> {
    state: State,
    strategy: S,
    log: Logger,
    names: NameTable,
    phase: Phase,
}

impl<S: Strategy> Engine<S> {
    pub fn new(strategy: S, log: Logger) -> Self {
        Engine {
            state: State::new(log.clone()),
            strategy,
            log,
            names: NameTable::empty(),
            phase: Phase::Setup,
        }
    }

    /// Installs an id-to-name table used purely for log output.
    pub fn with_names(mut self, names: NameTable) -> Self {
        self.names = names;
        self
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The blocking read loop: one line in, fully processed, response
    /// flushed, before the next line is read. Returns at end-of-input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) {
        self.log.info("engine: starting read loop");

        for line in input.lines() {
            match line {
                Ok(line) => self.handle_line(&line, out),
                Err(e) => {
                    self.log.error(&format!("engine: read failed: {}", e));
                    break;
                }
            }
        }

        self.phase = Phase::Terminated;
        self.log.info("engine: input ended, stopping");
    }

    /// Parses and dispatches one line. Protocol errors have already
    /// been logged by the parser; the line is simply dropped here.
    pub fn handle_line<W: Write>(&mut self, line: &str, out: &mut W) {
        let command = match parse_command(line, &self.log) {
            Some(c) => c,
            None => return,
        };

        match command {
            Command::YourBot(name) => self.state.set_my_name(name),
            Command::OpponentBot(name) => self.state.set_opponent_name(name),
            Command::StartingArmies(n) => self.state.set_starting_armies(n),
            Command::SetupContinents(pairs) => self.setup_continents(&pairs),
            Command::SetupRegions(pairs) => self.setup_regions(&pairs),
            Command::SetupNeighbors(entries) => self.setup_neighbors(&entries),
            Command::PickStartingRegions(ids) => self.pick_starting_regions(&ids, out),
            Command::UpdateMap(updates) => self.update_map(&updates),
            Command::OpponentMoves(slots) => self.opponent_moves(&slots),
            Command::GoPlaceArmies => self.go_place_armies(out),
            Command::GoAttackTransfer => self.go_attack_transfer(out),
        }
    }

    fn enter_turn_loop(&mut self) {
        if self.phase == Phase::Setup {
            self.phase = Phase::Turn;
            self.log.info("engine: setup complete, entering turn loop");
        }
    }

    fn setup_continents(&mut self, pairs: &[(u32, i32)]) {
        for &(id, reward) in pairs {
            self.state.define_continent(id, reward);
            if self.log.is_debug() {
                self.log.debug(&format!(
                    "engine: continent {} with reward {}",
                    self.names.continent_label(id),
                    reward
                ));
            }
        }
    }

    fn setup_regions(&mut self, pairs: &[(u32, u32)]) {
        for &(id, continent) in pairs {
            if let Err(e) = self.state.define_region(id, continent) {
                self.log.warn(&format!(
                    "engine: skipping region {}: {}",
                    self.names.region_label(id),
                    e
                ));
            }
        }
    }

    fn setup_neighbors(&mut self, entries: &[(u32, Vec<u32>)]) {
        for (id, neighbors) in entries {
            for &neighbor in neighbors {
                if let Err(e) = self.state.link_regions(*id, neighbor) {
                    self.log.warn(&format!(
                        "engine: skipping edge {}-{}: {}",
                        id, neighbor, e
                    ));
                }
            }
        }
    }

    fn pick_starting_regions<W: Write>(&mut self, ids: &[u32], out: &mut W) {
        self.enter_turn_loop();

        let mut candidates: Vec<&Region> = Vec::with_capacity(ids.len());
        for &id in ids {
            match self.state.complete_map().region(id) {
                Some(region) => candidates.push(region),
                None => self.log.warn(&format!(
                    "engine: skipping unknown candidate region {}",
                    id
                )),
            }
        }

        let picks = self.strategy.pick_starting_regions(&self.state, &candidates);
        if picks.len() != STARTING_PICKS {
            self.log.error(&format!(
                "not enough starting regions picked: {} of {}",
                picks.len(),
                STARTING_PICKS
            ));
        }

        let response = picks
            .iter()
            .take(STARTING_PICKS)
            .map(|r| r.id().to_string())
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(out, "{}", response).unwrap();
        out.flush().unwrap();
    }

    fn update_map(&mut self, updates: &[MapUpdate]) {
        self.enter_turn_loop();

        for update in updates {
            if let Err(e) = self.state.update_map(update.region, &update.owner, update.armies) {
                self.log.warn(&format!(
                    "engine: skipping update for region {}: {}",
                    self.names.region_label(update.region),
                    e
                ));
            }
        }
        // Once per batch, after the whole batch: mid-batch ownership
        // must not look like a stable transition.
        self.state.check_rewards();
    }

    fn opponent_moves(&mut self, slots: &[String]) {
        let mut batch: Vec<Move> = Vec::with_capacity(slots.len());

        for slot in slots {
            let mv = match parse_move(slot) {
                Ok(mv) => mv,
                Err(e) => {
                    self.log.warn(&format!("engine: skipping opponent move: {}", e));
                    continue;
                }
            };
            if let Some(unknown) = self.unknown_region_in(&mv) {
                self.log.warn(&format!(
                    "engine: skipping opponent move referencing unknown region {}",
                    unknown
                ));
                continue;
            }
            // Applied entry by entry: a later entry in the same report
            // sees the army counts this one produced.
            self.state.process_move(&mv);
            batch.push(mv);
        }

        self.state.set_opponent_moves(batch);
    }

    /// The first region id in the move that the complete map does not
    /// know, if any.
    fn unknown_region_in(&self, mv: &Move) -> Option<u32> {
        let map = self.state.complete_map();
        match mv {
            Move::PlaceArmies(m) => (map.region(m.region).is_none()).then_some(m.region),
            Move::AttackTransfer(m) => {
                if map.region(m.source).is_none() {
                    Some(m.source)
                } else if map.region(m.target).is_none() {
                    Some(m.target)
                } else {
                    None
                }
            }
        }
    }

    fn go_place_armies<W: Write>(&mut self, out: &mut W) {
        let allowance = self.state.my_production();
        let moves = self.strategy.place_armies(&self.state, allowance);
        for mv in &moves {
            self.state.process_place_armies(mv);
        }
        writeln!(out, "{}", format_moves(&moves)).unwrap();
        out.flush().unwrap();
    }

    fn go_attack_transfer<W: Write>(&mut self, out: &mut W) {
        let moves = self.strategy.attack_or_transfer(&self.state);
        for mv in &moves {
            self.state.process_attack_transfer(mv);
        }
        writeln!(out, "{}", format_moves(&moves)).unwrap();
        out.flush().unwrap();
    }
}
