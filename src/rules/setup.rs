//! New game setup.

use im::Vector;
use tracing::debug;

use crate::board::Tile;
use crate::core::config::HAND_SIZE;
use crate::core::{AcquireConfig, ConfigError, GameRng, GameState, Player, PlayerMap};

/// Shuffle all 108 tiles, deal a hand to every seat and put the rest in the
/// pool.
///
/// The shuffle is the only random step in the game, so the same config and
/// seed always give the same game.
///
/// ```
/// use acquire_engine::core::{AcquireConfig, GameRng};
/// use acquire_engine::rules::new_game;
///
/// let config = AcquireConfig::new(3);
/// let a = new_game(&config, &mut GameRng::new(42)).unwrap();
/// let b = new_game(&config, &mut GameRng::new(42)).unwrap();
///
/// assert_eq!(a, b);
/// assert_eq!(a.tile_pool.len(), 108 - 3 * 6);
/// ```
pub fn new_game(config: &AcquireConfig, rng: &mut GameRng) -> Result<GameState, ConfigError> {
    config.validate()?;

    let mut tiles: Vec<Tile> = Tile::all().collect();
    rng.shuffle(&mut tiles);

    let players = PlayerMap::new(config.player_count, |id| {
        let start = id.index() * HAND_SIZE;
        let mut player = Player::new(config.player_name(id.index()), config.starting_cash);
        player.hand = tiles[start..start + HAND_SIZE].iter().copied().collect();
        player
    });
    let pool: Vector<Tile> = tiles[config.player_count * HAND_SIZE..].iter().copied().collect();

    debug!(
        players = config.player_count,
        seed = rng.seed(),
        pool = pool.len(),
        "new game"
    );
    Ok(GameState::new(config.clone(), players, pool))
}
