//! Color assignment
//!
//! White goes to the player whose balance counter is lower (more black games
//! so far). Ties go to the lower score, then the lower rating, then the lower
//! id.

use std::cmp::Ordering;

use crate::player::{Player, Side};

fn white_priority(a: &Player, b: &Player) -> Ordering {
    a.color_balance
        .cmp(&b.color_balance)
        .then_with(|| a.score.total_cmp(&b.score))
        .then_with(|| a.rating.cmp(&b.rating))
        .then_with(|| a.id.cmp(&b.id))
}

/// Order a pair as (white, black)
pub fn assign_colors<'a>(a: &'a Player, b: &'a Player) -> (&'a Player, &'a Player) {
    if white_priority(a, b) == Ordering::Greater {
        (b, a)
    } else {
        (a, b)
    }
}

/// Record a played color on one player
pub fn record_color(player: &mut Player, side: Side) {
    player.colors.push(side);
    player.color_balance += match side {
        Side::White => 1,
        Side::Black => -1,
    };
}

/// Update both counters for a pairing, regardless of the eventual result
pub fn apply_colors(white: &mut Player, black: &mut Player) {
    record_color(white, Side::White);
    record_color(black, Side::Black);
}
