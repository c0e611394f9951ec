//! Q-value persistence
//!
//! The learned table lives in a single SQLite file so training sessions
//! accumulate: every run opens the same database and keeps improving the
//! values already there. Values are stored as text rounded to two decimal
//! places, which keeps the file diffable and the table readable by hand.

use super::encoder::StateKey;
use crate::game::TurnCommand;
use anyhow::{Context, Result};
use rusqlite::{params, Connection};
use std::collections::HashMap;
use std::path::Path;

/// Round to the two decimal places the table stores.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// The learned value of each turn command in one state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QTriplet {
    pub straight: f64,
    pub turn_left: f64,
    pub turn_right: f64,
}

impl QTriplet {
    pub const ZERO: Self = Self {
        straight: 0.0,
        turn_left: 0.0,
        turn_right: 0.0,
    };

    pub fn get(&self, command: TurnCommand) -> f64 {
        match command {
            TurnCommand::Straight => self.straight,
            TurnCommand::TurnLeft => self.turn_left,
            TurnCommand::TurnRight => self.turn_right,
        }
    }

    pub fn set(&mut self, command: TurnCommand, value: f64) {
        match command {
            TurnCommand::Straight => self.straight = value,
            TurnCommand::TurnLeft => self.turn_left = value,
            TurnCommand::TurnRight => self.turn_right = value,
        }
    }

    /// Highest value across the three commands.
    pub fn max(&self) -> f64 {
        self.straight.max(self.turn_left).max(self.turn_right)
    }

    /// Command holding the highest value. Ties go to the earlier command
    /// in the order straight, left, right.
    pub fn best_command(&self) -> TurnCommand {
        let mut best = TurnCommand::Straight;
        let mut best_value = self.straight;
        for command in [TurnCommand::TurnLeft, TurnCommand::TurnRight] {
            let value = self.get(command);
            if value > best_value {
                best = command;
                best_value = value;
            }
        }
        best
    }

    /// Copy with every slot rounded to two decimal places.
    pub fn rounded(&self) -> Self {
        Self {
            straight: round2(self.straight),
            turn_left: round2(self.turn_left),
            turn_right: round2(self.turn_right),
        }
    }
}

/// Storage behind the Q-table.
///
/// `get` creates the row on first sight, so callers always receive a
/// usable triplet and never handle a missing state themselves.
pub trait ValueStore {
    /// Fetch the triplet for a key, inserting zeros first if the key is new.
    fn get(&mut self, key: &StateKey) -> Result<QTriplet>;

    /// Persist a triplet, rounded to two decimal places.
    fn put(&mut self, key: &StateKey, triplet: QTriplet) -> Result<()>;
}

/// SQLite-backed store. One row per state, one text column per command.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open or create the database at `path` and make sure the table exists.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path)
            .with_context(|| format!("failed to open q-value database at {}", path.display()))?;
        Self::init(conn)
    }

    /// Open a private in-memory database. Nothing survives the drop.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("failed to open in-memory database")?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;
             PRAGMA busy_timeout = 5000;",
        )
        .context("failed to configure database")?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS q_values (
                state TEXT PRIMARY KEY,
                straight TEXT NOT NULL,
                left TEXT NOT NULL,
                right TEXT NOT NULL
            )",
            [],
        )
        .context("failed to create q_values table")?;
        Ok(Self { conn })
    }

    /// Number of states the table has seen so far.
    pub fn len(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM q_values", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

fn parse_value(text: &str) -> Result<f64> {
    text.parse::<f64>()
        .with_context(|| format!("corrupt q-value {:?} in database", text))
}

impl ValueStore for SqliteStore {
    fn get(&mut self, key: &StateKey) -> Result<QTriplet> {
        self.conn
            .execute(
                "INSERT OR IGNORE INTO q_values (state, straight, left, right)
                 VALUES (?1, '0', '0', '0')",
                params![key.as_str()],
            )
            .context("failed to seed q-value row")?;

        let (straight, left, right) = self
            .conn
            .query_row(
                "SELECT straight, left, right FROM q_values WHERE state = ?1",
                params![key.as_str()],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                    ))
                },
            )
            .context("failed to read q-value row")?;

        Ok(QTriplet {
            straight: parse_value(&straight)?,
            turn_left: parse_value(&left)?,
            turn_right: parse_value(&right)?,
        })
    }

    fn put(&mut self, key: &StateKey, triplet: QTriplet) -> Result<()> {
        let rounded = triplet.rounded();
        self.conn
            .execute(
                "INSERT OR REPLACE INTO q_values (state, straight, left, right)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    key.as_str(),
                    format!("{:.2}", rounded.straight),
                    format!("{:.2}", rounded.turn_left),
                    format!("{:.2}", rounded.turn_right),
                ],
            )
            .context("failed to write q-value row")?;
        Ok(())
    }
}

/// In-memory store with the same create-on-read behavior, for tests and
/// throwaway runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    table: HashMap<StateKey, QTriplet>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl ValueStore for MemoryStore {
    fn get(&mut self, key: &StateKey) -> Result<QTriplet> {
        Ok(*self.table.entry(key.clone()).or_insert(QTriplet::ZERO))
    }

    fn put(&mut self, key: &StateKey, triplet: QTriplet) -> Result<()> {
        self.table.insert(key.clone(), triplet.rounded());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Position;
    use crate::rl::encoder::encode_state;

    fn key(n: i32) -> StateKey {
        encode_state(Position::new(n, 5), &[Position::new(3, 5)])
    }

    #[test]
    fn test_best_command_breaks_ties_toward_straight() {
        assert_eq!(QTriplet::ZERO.best_command(), TurnCommand::Straight);

        let tied = QTriplet {
            straight: 0.5,
            turn_left: 0.5,
            turn_right: 0.2,
        };
        assert_eq!(tied.best_command(), TurnCommand::Straight);

        let left_and_right = QTriplet {
            straight: 0.0,
            turn_left: 0.5,
            turn_right: 0.5,
        };
        assert_eq!(left_and_right.best_command(), TurnCommand::TurnLeft);
    }

    #[test]
    fn test_best_command_picks_strict_maximum() {
        let triplet = QTriplet {
            straight: -0.3,
            turn_left: -0.1,
            turn_right: -0.2,
        };
        assert_eq!(triplet.best_command(), TurnCommand::TurnLeft);
        assert_eq!(triplet.max(), -0.1);
    }

    #[test]
    fn test_rounded_two_decimals() {
        let triplet = QTriplet {
            straight: 0.577,
            turn_left: 1.0 / 3.0,
            turn_right: -0.004,
        };
        let rounded = triplet.rounded();

        assert_eq!(rounded.straight, 0.58);
        assert_eq!(rounded.turn_left, 0.33);
        assert_eq!(rounded.turn_right, 0.0);
    }

    #[test]
    fn test_missing_key_returns_zeros_and_creates_row() {
        let mut store = SqliteStore::open_in_memory().unwrap();

        let triplet = store.get(&key(8)).unwrap();

        assert_eq!(triplet, QTriplet::ZERO);
        assert_eq!(store.len().unwrap(), 1);

        // A second read finds the same row instead of creating another.
        let again = store.get(&key(8)).unwrap();
        assert_eq!(again, QTriplet::ZERO);
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn test_put_rounds_before_storing() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let k = key(8);

        store
            .put(
                &k,
                QTriplet {
                    straight: 0.577,
                    turn_left: -1.0,
                    turn_right: 0.333,
                },
            )
            .unwrap();
        let triplet = store.get(&k).unwrap();

        assert_eq!(triplet.straight, 0.58);
        assert_eq!(triplet.turn_left, -1.0);
        assert_eq!(triplet.turn_right, 0.33);
    }

    #[test]
    fn test_put_overwrites_existing_row() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let k = key(8);

        store
            .put(
                &k,
                QTriplet {
                    straight: 0.1,
                    turn_left: 0.2,
                    turn_right: 0.3,
                },
            )
            .unwrap();
        store
            .put(
                &k,
                QTriplet {
                    straight: 0.4,
                    turn_left: 0.2,
                    turn_right: 0.3,
                },
            )
            .unwrap();

        assert_eq!(store.get(&k).unwrap().straight, 0.4);
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("q.db");
        let k = key(8);

        {
            let mut store = SqliteStore::open(&path).unwrap();
            store
                .put(
                    &k,
                    QTriplet {
                        straight: 0.58,
                        turn_left: 0.0,
                        turn_right: -1.0,
                    },
                )
                .unwrap();
        }

        let mut store = SqliteStore::open(&path).unwrap();
        let triplet = store.get(&k).unwrap();

        assert_eq!(triplet.straight, 0.58);
        assert_eq!(triplet.turn_right, -1.0);
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn test_memory_store_mirrors_sqlite_behavior() {
        let mut store = MemoryStore::new();
        assert!(store.is_empty());

        let triplet = store.get(&key(8)).unwrap();
        assert_eq!(triplet, QTriplet::ZERO);
        assert_eq!(store.len(), 1);

        store
            .put(
                &key(8),
                QTriplet {
                    straight: 0.577,
                    turn_left: 0.0,
                    turn_right: 0.0,
                },
            )
            .unwrap();
        assert_eq!(store.get(&key(8)).unwrap().straight, 0.58);
        assert_eq!(store.len(), 1);
    }
}
