//! Splitting a court's four players into two even teams.

use crate::models::{CourtSlots, Player, SLOTS_PER_COURT};

/// Team A gets the strongest and weakest, team B the two middle players:
/// `[best, worst, second, third]`.
///
/// With fewer than four players the ones given are seated in order and the
/// remaining slots stay empty. Extra players beyond four are ignored.
pub fn balance_court(players: &[&Player]) -> CourtSlots {
    if players.len() != SLOTS_PER_COURT {
        log::warn!(
            "Balancing a court with {} players; seating in order",
            players.len()
        );
        let ids: Vec<_> = players.iter().map(|p| p.id).collect();
        return CourtSlots::from_prefix(&ids);
    }
    let mut sorted = players.to_vec();
    sorted.sort_by(|a, b| b.level.cmp(&a.level));
    let [best, second, third, worst] = [sorted[0], sorted[1], sorted[2], sorted[3]];
    CourtSlots::new([Some(best.id), Some(worst.id), Some(second.id), Some(third.id)])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(slots: &CourtSlots, players: &[Player], i: usize) -> i32 {
        let id = slots.get(i).unwrap();
        players.iter().find(|p| p.id == id).unwrap().level
    }

    #[test]
    fn extremes_against_middles() {
        let players: Vec<Player> = [6, 10, 4, 8]
            .iter()
            .enumerate()
            .map(|(i, &l)| Player::new(format!("P{i}"), l))
            .collect();
        let refs: Vec<&Player> = players.iter().collect();
        let slots = balance_court(&refs);
        let levels: Vec<i32> = (0..4).map(|i| level(&slots, &players, i)).collect();
        assert_eq!(levels, vec![10, 4, 8, 6]);
    }

    #[test]
    fn partial_court_seats_in_order() {
        let players = vec![Player::new("A", 3), Player::new("B", 9)];
        let refs: Vec<&Player> = players.iter().collect();
        let slots = balance_court(&refs);
        assert_eq!(slots.get(0), Some(players[0].id));
        assert_eq!(slots.get(1), Some(players[1].id));
        assert_eq!(slots.get(2), None);
        assert_eq!(slots.get(3), None);
    }
}
