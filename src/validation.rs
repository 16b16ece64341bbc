use std::collections::HashSet;
use crate::game_state::Player;
use crate::result::TransitionError;
use crate::rules::total_rounds_for;

pub const MAX_NAME_LEN: usize = 32;

/// Validate and sanitize a player display name.
/// Returns the trimmed name on success, or an error message.
pub fn validate_player_name(raw: &str) -> Result<String, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err("Name cannot be empty".to_string());
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(format!("Name must be {} characters or fewer", MAX_NAME_LEN));
    }
    Ok(trimmed.to_string())
}

/// Check a finalized roster and return it with trimmed names.
///
/// The player count is checked first so an unsupported table size is always reported
/// as `InvalidPlayerCount`, whatever else is wrong with the names.
pub fn validate_roster(players: Vec<Player>) -> Result<Vec<Player>, TransitionError> {
    total_rounds_for(players.len())?;

    let mut seen_names = HashSet::new();
    let mut seen_ids = HashSet::new();
    let mut roster = Vec::with_capacity(players.len());
    for mut player in players {
        let name = validate_player_name(&player.name).map_err(TransitionError::InvalidPlayer)?;
        if !seen_names.insert(name.to_lowercase()) {
            return Err(TransitionError::InvalidPlayer(format!("Name '{}' is already taken", name)));
        }
        if !seen_ids.insert(player.id) {
            return Err(TransitionError::InvalidPlayer(format!("Duplicate player id {}", player.id)));
        }
        player.name = name;
        roster.push(player);
    }
    Ok(roster)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ntest::test_case;

    fn roster(names: &[&str]) -> Vec<Player> {
        names.iter().map(|n| Player::new(n)).collect()
    }

    #[test_case("  Ann  ", "Ann")]
    #[test_case("Bo", "Bo")]
    fn names_are_trimmed(raw: &str, expected: &str) {
        assert_eq!(validate_player_name(raw), Ok(expected.to_string()));
    }

    #[test]
    fn empty_and_long_names_rejected() {
        assert!(validate_player_name("   ").is_err());
        assert!(validate_player_name(&"x".repeat(MAX_NAME_LEN + 1)).is_err());
        assert!(validate_player_name(&"x".repeat(MAX_NAME_LEN)).is_ok());
    }

    #[test]
    fn roster_rejects_duplicate_names_ignoring_case() {
        let err = validate_roster(roster(&["Ann", "bob", "BOB "])).unwrap_err();
        assert!(matches!(err, TransitionError::InvalidPlayer(_)));
    }

    #[test]
    fn roster_rejects_duplicate_ids() {
        let mut players = roster(&["Ann", "Bob", "Cy"]);
        players[2].id = players[0].id;
        assert!(matches!(validate_roster(players), Err(TransitionError::InvalidPlayer(_))));
    }

    #[test]
    fn roster_count_checked_before_names() {
        assert_eq!(validate_roster(roster(&["", ""])), Err(TransitionError::InvalidPlayerCount(2)));
    }

    #[test]
    fn valid_roster_keeps_order() {
        let players = validate_roster(roster(&[" Ann", "Bob ", "Cy"])).unwrap();
        let names: Vec<&str> = players.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Ann", "Bob", "Cy"]);
    }
}
