//! Playing games: one game on the current thread, or a whole match on the
//! blocking pool.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use engine_core::{GameAction, GameState, PlayerId};
use games_petersburg::{PetersburgState, NUM_PLAYERS};
use indicatif::{ProgressBar, ProgressStyle};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::players::{EngineSettings, Player, PlayerKind};
use crate::stats::ArenaStats;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForfeitReason {
    /// The player's clock ran out during its move.
    Timeout,
    /// The returned index was not a legal action.
    IllegalAction(usize),
    /// The engine failed to produce a move.
    EngineError(String),
}

impl fmt::Display for ForfeitReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ForfeitReason::Timeout => write!(f, "out of time"),
            ForfeitReason::IllegalAction(index) => write!(f, "illegal action index {index}"),
            ForfeitReason::EngineError(e) => write!(f, "engine error: {e}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Forfeit {
    pub seat: PlayerId,
    pub reason: ForfeitReason,
}

/// Outcome of one game, by seat.
#[derive(Debug, Clone)]
pub struct GameRecord {
    /// Seats that won; both seats on a draw.
    pub winners: Vec<PlayerId>,
    pub points: [i32; NUM_PLAYERS],
    pub plies: u32,
    /// Legal-action index played at each ply. Replaying these against the
    /// deal for the same seed reproduces the game.
    pub moves: Vec<usize>,
    pub forfeit: Option<Forfeit>,
    /// Clock left per seat when the game ended.
    pub clock_left: [Duration; NUM_PLAYERS],
}

impl GameRecord {
    pub fn is_draw(&self) -> bool {
        self.winners.len() > 1
    }
}

/// Play one game from a deal seeded with `seed`. Each seat starts with
/// `clock`; running out of it, failing, or answering with an out-of-range
/// index loses the game on the spot.
pub fn play_game(players: &mut [Player; NUM_PLAYERS], seed: u64, clock: Duration) -> GameRecord {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let mut state = PetersburgState::new(&mut rng);
    let mut clocks = [clock; NUM_PLAYERS];
    let mut plies = 0u32;
    let mut moves = Vec::new();
    let mut forfeit = None;

    while !state.is_terminal() {
        let seat = state.acting_player();
        let actions = state.legal_actions();

        let start = Instant::now();
        let choice = players[seat].select_action(&state, Some(clocks[seat]));
        let spent = start.elapsed();

        let reason = match clocks[seat].checked_sub(spent) {
            None => {
                clocks[seat] = Duration::ZERO;
                Some(ForfeitReason::Timeout)
            }
            Some(left) => {
                clocks[seat] = left;
                match choice {
                    Ok(index) if index < actions.len() => {
                        actions[index].apply(&mut state, &mut rng);
                        moves.push(index);
                        plies += 1;
                        None
                    }
                    Ok(index) => Some(ForfeitReason::IllegalAction(index)),
                    Err(e) => Some(ForfeitReason::EngineError(e.to_string())),
                }
            }
        };

        if let Some(reason) = reason {
            warn!(
                seat,
                player = players[seat].name(),
                ply = plies,
                %reason,
                "Player forfeits"
            );
            forfeit = Some(Forfeit { seat, reason });
            break;
        }
    }

    let winners = match &forfeit {
        Some(f) => vec![1 - f.seat],
        None => state.winners(),
    };
    let record = GameRecord {
        winners,
        points: [state.player(0).points, state.player(1).points],
        plies,
        moves,
        forfeit,
        clock_left: clocks,
    };
    debug!(
        seed,
        plies = record.plies,
        points_0 = record.points[0],
        points_1 = record.points[1],
        winners = ?record.winners,
        clock_left_ms = ?record.clock_left.map(|c| c.as_millis() as u64),
        "Game finished"
    );
    record
}

/// One finished game of a match.
#[derive(Debug, Clone)]
pub struct MatchGame {
    pub game: u32,
    /// Seat taken by the first contestant; the second sits opposite.
    pub first_seat: PlayerId,
    pub record: GameRecord,
}

/// Seeds for game `game`: the deal, then one engine seed per contestant.
fn game_seeds(base: Option<u64>, game: u32) -> (u64, [Option<u64>; 2]) {
    match base {
        Some(base) => {
            let deal = base.wrapping_add(u64::from(game));
            let engine = deal.wrapping_mul(0x9E37_79B9_7F4A_7C15);
            (deal, [Some(engine), Some(engine.wrapping_add(1))])
        }
        None => (rand::random(), [None, None]),
    }
}

fn play_match_game(
    game: u32,
    kinds: [PlayerKind; 2],
    settings: &EngineSettings,
    base_seed: Option<u64>,
    clock: Duration,
) -> MatchGame {
    let (deal_seed, engine_seeds) = game_seeds(base_seed, game);
    let first_seat = (game % 2) as PlayerId;

    let one = settings.build(kinds[0], engine_seeds[0]);
    let two = settings.build(kinds[1], engine_seeds[1]);
    let mut players = if first_seat == 0 { [one, two] } else { [two, one] };

    MatchGame {
        game,
        first_seat,
        record: play_game(&mut players, deal_seed, clock),
    }
}

fn progress_bar(games: u32) -> Result<Option<ProgressBar>> {
    if !std::io::IsTerminal::is_terminal(&std::io::stderr()) {
        return Ok(None);
    }
    let pb = ProgressBar::new(u64::from(games));
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} games ({eta})")?
            .progress_chars("#>-"),
    );
    Ok(Some(pb))
}

/// Play every game of the configured match, at most `workers` at a time.
///
/// Each game runs on the blocking pool with its own state and freshly
/// built engines. Games not yet started when `shutdown` is raised are
/// skipped.
pub async fn run_match(
    config: &Config,
    settings: Arc<EngineSettings>,
    shutdown: Arc<AtomicBool>,
) -> Result<ArenaStats> {
    let kinds = config.players()?;
    let clock = config.player_clock();
    let base_seed = config.fixed_seed();
    let semaphore = Arc::new(Semaphore::new(config.workers));

    info!(
        games = config.games,
        workers = config.workers,
        player_one = %kinds[0],
        player_two = %kinds[1],
        clock_ms = clock.as_millis() as u64,
        "Starting match"
    );

    let mut handles = Vec::with_capacity(config.games as usize);
    for game in 0..config.games {
        let semaphore = Arc::clone(&semaphore);
        let settings = Arc::clone(&settings);
        let shutdown = Arc::clone(&shutdown);
        handles.push(tokio::spawn(async move {
            let _permit = semaphore.acquire_owned().await?;
            if shutdown.load(Ordering::Relaxed) {
                return Ok::<_, anyhow::Error>(None);
            }
            let played = tokio::task::spawn_blocking(move || {
                play_match_game(game, kinds, &settings, base_seed, clock)
            })
            .await?;
            Ok(Some(played))
        }));
    }

    let progress = progress_bar(config.games)?;
    let mut stats = ArenaStats::new([kinds[0].to_string(), kinds[1].to_string()]);
    let mut skipped = 0u32;
    for handle in handles {
        match handle.await?? {
            Some(played) => {
                debug!(
                    game = played.game,
                    first_seat = played.first_seat,
                    "Recording game"
                );
                stats.record(played.first_seat, &played.record);
            }
            None => skipped += 1,
        }
        if let Some(ref pb) = progress {
            pb.inc(1);
        }
    }
    if let Some(pb) = progress {
        pb.finish_and_clear();
    }
    if skipped > 0 {
        info!(skipped, "Games skipped after shutdown");
    }
    Ok(stats)
}
