//! Match statistics, per contestant rather than per seat.

use tracing::info;

use crate::match_runner::GameRecord;

/// Aggregated results of a match between two contestants.
#[derive(Debug, Clone)]
pub struct ArenaStats {
    names: [String; 2],
    games: u32,
    wins: [u32; 2],
    draws: u32,
    /// Games lost by forfeit
    forfeits: [u32; 2],
    total_points: [i64; 2],
    total_plies: u64,
}

impl ArenaStats {
    pub fn new(names: [String; 2]) -> Self {
        Self {
            names,
            games: 0,
            wins: [0; 2],
            draws: 0,
            forfeits: [0; 2],
            total_points: [0; 2],
            total_plies: 0,
        }
    }

    /// Record a game in which the first contestant sat in `first_seat`.
    pub fn record(&mut self, first_seat: usize, record: &GameRecord) {
        let seat_of = |contestant: usize| (first_seat + contestant) % 2;

        self.games += 1;
        self.total_plies += u64::from(record.plies);
        for contestant in 0..2 {
            let seat = seat_of(contestant);
            self.total_points[contestant] += i64::from(record.points[seat]);
            if record.forfeit.as_ref().is_some_and(|f| f.seat == seat) {
                self.forfeits[contestant] += 1;
            }
        }

        if record.is_draw() {
            self.draws += 1;
        } else if let Some(&winner) = record.winners.first() {
            let contestant = if winner == seat_of(0) { 0 } else { 1 };
            self.wins[contestant] += 1;
        }
    }

    pub fn games(&self) -> u32 {
        self.games
    }

    pub fn wins(&self, contestant: usize) -> u32 {
        self.wins[contestant]
    }

    pub fn draws(&self) -> u32 {
        self.draws
    }

    pub fn forfeits(&self, contestant: usize) -> u32 {
        self.forfeits[contestant]
    }

    pub fn mean_points(&self, contestant: usize) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        self.total_points[contestant] as f64 / f64::from(self.games)
    }

    pub fn mean_plies(&self) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        self.total_plies as f64 / f64::from(self.games)
    }

    /// Share of games won, counting draws as half.
    pub fn score(&self, contestant: usize) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        (f64::from(self.wins[contestant]) + 0.5 * f64::from(self.draws)) / f64::from(self.games)
    }

    pub fn log_summary(&self) {
        info!(
            games = self.games(),
            draws = self.draws(),
            mean_plies = format!("{:.1}", self.mean_plies()),
            "Match complete"
        );
        for (contestant, name) in self.names.iter().enumerate() {
            info!(
                player = %name,
                wins = self.wins(contestant),
                forfeits = self.forfeits(contestant),
                mean_points = format!("{:.2}", self.mean_points(contestant)),
                score = format!("{:.1}%", 100.0 * self.score(contestant)),
                "Player summary"
            );
        }
    }
}
