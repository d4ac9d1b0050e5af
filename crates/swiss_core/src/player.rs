//! Player records and the standings table

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use crate::error::PairingError;

/// Rating given to players registered without a usable rating
pub const DEFAULT_RATING: u32 = 100;

/// Stable identifier of a registered player
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u32);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Side of the board. White is the advantaged color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    White,
    Black,
}

/// A competitor and everything the pairing engine needs to know about them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub rating: u32,
    /// Sum of 1 / 0.5 / 0 per round, byes included
    pub score: f64,
    /// Opponents in the order they were met
    pub opponents: Vec<PlayerId>,
    /// Colors in the order they were played
    pub colors: Vec<Side>,
    /// +1 per white game, -1 per black game
    pub color_balance: i32,
    /// At most one full-point bye per tournament
    pub had_full_bye: bool,
    /// Present for the round about to be paired
    pub present: bool,
}

impl Player {
    pub fn new(id: PlayerId, name: &str, rating: u32) -> Self {
        Self {
            id,
            name: name.to_string(),
            rating,
            score: 0.0,
            opponents: Vec::new(),
            colors: Vec::new(),
            color_balance: 0,
            had_full_bye: false,
            present: true,
        }
    }

    /// Whether the two players have met in any earlier round
    pub fn has_met(&self, other: PlayerId) -> bool {
        self.opponents.contains(&other)
    }

    /// Number of games played with a color (byes excluded)
    pub fn games_played(&self) -> usize {
        self.colors.len()
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} points)", self.name, self.score)
    }
}

/// Pairing priority: score descending, rating descending, id ascending.
///
/// Every component that needs "the order of the pool" uses this, so the
/// same inputs always give the same pairing.
pub fn priority_order(a: &Player, b: &Player) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| b.rating.cmp(&a.rating))
        .then_with(|| a.id.cmp(&b.id))
}

/// Parse a rating from free text, taking the first integer token.
///
/// Falls back to [`DEFAULT_RATING`] when nothing usable is found.
pub fn parse_rating(text: &str) -> u32 {
    if let Ok(rating) = text.trim().parse::<u32>() {
        return rating;
    }
    text.split(|c: char| !c.is_ascii_digit())
        .find(|token| !token.is_empty())
        .and_then(|token| token.parse().ok())
        .unwrap_or(DEFAULT_RATING)
}

/// The standings table. Owns every player record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Standings {
    /// Sorted by id; ids are handed out sequentially
    players: Vec<Player>,
    next_id: u32,
}

impl Standings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a player, or update the rating of an existing player with
    /// the same name (case-insensitive). Returns the player's id.
    pub fn register(&mut self, name: &str, rating: u32) -> PlayerId {
        let wanted = name.trim().to_lowercase();
        if let Some(existing) = self
            .players
            .iter_mut()
            .find(|p| p.name.to_lowercase() == wanted)
        {
            existing.rating = rating;
            return existing.id;
        }

        let id = PlayerId(self.next_id);
        self.next_id += 1;
        self.players.push(Player::new(id, name.trim(), rating));
        id
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Ids strictly increasing and all below the next id to hand out.
    /// Lookups rely on this; check it on tables read from outside.
    pub fn is_consistent(&self) -> bool {
        let sorted = self.players.windows(2).all(|w| w[0].id < w[1].id);
        let below_next = self.players.last().map_or(true, |p| p.id.0 < self.next_id);
        sorted && below_next
    }

    fn index_of(&self, id: PlayerId) -> Option<usize> {
        self.players.binary_search_by_key(&id, |p| p.id).ok()
    }

    pub fn get(&self, id: PlayerId) -> Option<&Player> {
        self.index_of(id).map(|i| &self.players[i])
    }

    pub fn get_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        let i = self.index_of(id)?;
        Some(&mut self.players[i])
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Player> {
        let wanted = name.trim().to_lowercase();
        self.players.iter().find(|p| p.name.to_lowercase() == wanted)
    }

    /// Look up a player, failing with [`PairingError::UnknownPlayer`]
    pub fn require(&self, id: PlayerId) -> Result<&Player, PairingError> {
        self.get(id).ok_or(PairingError::UnknownPlayer(id))
    }

    /// Two distinct players, mutably
    pub fn pair_mut(
        &mut self,
        a: PlayerId,
        b: PlayerId,
    ) -> Result<(&mut Player, &mut Player), PairingError> {
        let ia = self.index_of(a).ok_or(PairingError::UnknownPlayer(a))?;
        let ib = self.index_of(b).ok_or(PairingError::UnknownPlayer(b))?;
        if ia == ib {
            return Err(PairingError::DuplicateInFixedPairs(a));
        }
        if ia < ib {
            let (left, right) = self.players.split_at_mut(ib);
            Ok((&mut left[ia], &mut right[0]))
        } else {
            let (left, right) = self.players.split_at_mut(ia);
            Ok((&mut right[0], &mut left[ib]))
        }
    }

    pub fn set_present(&mut self, id: PlayerId, present: bool) -> Result<(), PairingError> {
        let player = self.get_mut(id).ok_or(PairingError::UnknownPlayer(id))?;
        player.present = present;
        Ok(())
    }

    pub fn add_points(&mut self, id: PlayerId, points: f64) -> Result<(), PairingError> {
        let player = self.get_mut(id).ok_or(PairingError::UnknownPlayer(id))?;
        player.score += points;
        Ok(())
    }

    /// Mark that a player received their one full-point bye
    pub fn grant_full_bye(&mut self, id: PlayerId) -> Result<(), PairingError> {
        let player = self.get_mut(id).ok_or(PairingError::UnknownPlayer(id))?;
        player.had_full_bye = true;
        Ok(())
    }

    /// Players ordered by [`priority_order`]
    pub fn ranked(&self) -> Vec<&Player> {
        let mut ranked: Vec<&Player> = self.players.iter().collect();
        ranked.sort_by(|a, b| priority_order(a, b));
        ranked
    }
}

#[cfg(test)]
#[path = "player_tests.rs"]
mod player_tests;
