//! Player identification and per-player data storage.
//!
//! ## PlayerId
//!
//! Type-safe player identifier. Player numbering is 1-based: the first
//! player is `PlayerId(1)`, matching the mover indices reported by game
//! engines for alternating-move games.
//!
//! ## PlayerMap
//!
//! Per-player data storage backed by `Vec` for O(1) access. Slot 0 exists
//! but is unused, mirroring the 1-based numbering, so `map[PlayerId(p)]`
//! never needs an index shift.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Player identifier supporting 1-255 players.
///
/// Player indices are 1-based: the first player is `PlayerId(1)`.
/// `PlayerId::NONE` (index 0) is a sentinel for "no player configured".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Sentinel value representing no player.
    pub const NONE: PlayerId = PlayerId(0);

    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index (1-based; 0 is the sentinel).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Check if this is the NONE sentinel.
    #[inline]
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    /// Iterate over all player IDs for a game with `player_count` players.
    ///
    /// ```
    /// use uct_agent::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::all(4).collect();
    /// assert_eq!(players.len(), 4);
    /// assert_eq!(players[0], PlayerId::new(1));
    /// assert_eq!(players[3], PlayerId::new(4));
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (1..=player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Per-player data storage with O(1) access.
///
/// Backed by a `Vec<T>` with `player_count + 1` entries; entry 0 is unused
/// and holds a default-constructed value. Use `PlayerMap::new()` to create
/// with a factory function, or `PlayerMap::with_value()` to initialize all
/// entries to the same value.
///
/// ## Example
///
/// ```
/// use uct_agent::core::{PlayerId, PlayerMap};
///
/// let mut scores: PlayerMap<f64> = PlayerMap::with_value(2, 0.0);
/// scores[PlayerId::new(1)] += 1.0;
/// assert_eq!(scores[PlayerId::new(1)], 1.0);
/// assert_eq!(scores[PlayerId::new(2)], 0.0);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    ///
    /// The factory receives the `PlayerId` for each player (1-based).
    pub fn new(player_count: usize, factory: impl Fn(PlayerId) -> T) -> Self
    where
        T: Default,
    {
        assert!(player_count > 0, "Must have at least 1 player");
        assert!(player_count <= 255, "At most 255 players supported");

        let mut data = Vec::with_capacity(player_count + 1);
        data.push(T::default());
        data.extend((1..=player_count as u8).map(|i| factory(PlayerId(i))));

        Self { data }
    }

    /// Create a new PlayerMap with all entries set to the same value.
    pub fn with_value(player_count: usize, value: T) -> Self
    where
        T: Clone + Default,
    {
        Self::new(player_count, |_| value.clone())
    }

    /// Get the number of players (excludes the unused slot 0).
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len() - 1
    }

    /// Get a reference to a player's data.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    /// Get a mutable reference to a player's data.
    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over `(PlayerId, &T)` pairs, skipping the unused slot 0.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .skip(1)
            .map(|(i, v)| (PlayerId(i as u8), v))
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &T {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut T {
        self.get_mut(player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_basics() {
        let p = PlayerId::new(3);
        assert_eq!(p.index(), 3);
        assert!(!p.is_none());
        assert_eq!(format!("{}", p), "Player 3");

        assert!(PlayerId::NONE.is_none());
    }

    #[test]
    fn test_player_id_all_is_one_based() {
        let players: Vec<_> = PlayerId::all(3).collect();
        assert_eq!(
            players,
            vec![PlayerId::new(1), PlayerId::new(2), PlayerId::new(3)]
        );
    }

    #[test]
    fn test_map_indexing() {
        let mut map: PlayerMap<i64> = PlayerMap::with_value(2, 10);

        map[PlayerId::new(2)] = 25;

        assert_eq!(map[PlayerId::new(1)], 10);
        assert_eq!(map[PlayerId::new(2)], 25);
        assert_eq!(map.player_count(), 2);
    }

    #[test]
    fn test_map_factory() {
        let map: PlayerMap<usize> = PlayerMap::new(4, |p| p.index() * 2);

        assert_eq!(map[PlayerId::new(1)], 2);
        assert_eq!(map[PlayerId::new(4)], 8);
    }

    #[test]
    fn test_map_iter_skips_slot_zero() {
        let map: PlayerMap<f64> = PlayerMap::with_value(3, 0.5);
        let pairs: Vec<_> = map.iter().collect();

        assert_eq!(pairs.len(), 3);
        assert_eq!(pairs[0].0, PlayerId::new(1));
        assert_eq!(pairs[2].0, PlayerId::new(3));
    }

    #[test]
    fn test_map_serialization() {
        let map: PlayerMap<f64> = PlayerMap::with_value(2, 1.5);
        let json = serde_json::to_string(&map).unwrap();
        let deserialized: PlayerMap<f64> = serde_json::from_str(&json).unwrap();

        assert_eq!(map, deserialized);
    }

    #[test]
    #[should_panic(expected = "at least 1 player")]
    fn test_map_requires_players() {
        let _: PlayerMap<i32> = PlayerMap::with_value(0, 0);
    }
}
