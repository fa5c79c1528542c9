use thiserror::Error;

use crate::models::{validate_draw, Draw, Game, Pool};

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("indice de tirage {index} hors limites (historique de {len} tirages)")]
    OutOfRange { index: usize, len: usize },

    #[error("le pool {pool} ne fait pas partie du jeu {game}")]
    PoolMismatch { pool: Pool, game: Game },

    #[error("tirage {draw_id} invalide : {reason}")]
    MalformedDraw { draw_id: String, reason: String },
}

/// Historique ordonné des tirages, du plus ancien au plus récent.
/// Les calculs en aval lisent l'historique sans jamais le modifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawHistory {
    game: Game,
    draws: Vec<Draw>,
}

impl DrawHistory {
    pub fn new(game: Game) -> Self {
        Self {
            game,
            draws: Vec::new(),
        }
    }

    pub fn from_draws(game: Game, draws: Vec<Draw>) -> Result<Self, HistoryError> {
        let mut history = Self::new(game);
        for draw in draws {
            history.push(draw)?;
        }
        Ok(history)
    }

    /// Ajoute un tirage en fin d'historique après validation complète.
    pub fn push(&mut self, draw: Draw) -> Result<(), HistoryError> {
        validate_draw(self.game, &draw)?;
        self.draws.push(draw);
        Ok(())
    }

    pub fn game(&self) -> Game {
        self.game
    }

    pub fn len(&self) -> usize {
        self.draws.len()
    }

    pub fn is_empty(&self) -> bool {
        self.draws.is_empty()
    }

    pub fn draws(&self) -> &[Draw] {
        &self.draws
    }

    pub fn check_pool(&self, pool: Pool) -> Result<(), HistoryError> {
        if pool.game() != self.game {
            return Err(HistoryError::PoolMismatch {
                pool,
                game: self.game,
            });
        }
        Ok(())
    }

    pub fn numbers_at(&self, index: usize, pool: Pool) -> Result<&[u8], HistoryError> {
        self.check_pool(pool)?;
        let draw = self.draws.get(index).ok_or(HistoryError::OutOfRange {
            index,
            len: self.draws.len(),
        })?;
        Ok(pool.numbers_from(draw))
    }

    pub fn universe_size(&self, pool: Pool) -> Result<u8, HistoryError> {
        self.check_pool(pool)?;
        Ok(pool.size())
    }

    /// Fenêtre sur les `n` derniers tirages (ordre chronologique conservé).
    pub fn tail(&self, n: usize) -> DrawHistory {
        let start = self.draws.len().saturating_sub(n);
        DrawHistory {
            game: self.game,
            draws: self.draws[start..].to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ssq_history(n: usize) -> DrawHistory {
        let draws = (0..n)
            .map(|i| {
                let base = (i % 5) as u8;
                Draw {
                    draw_id: format!("2023{:03}", i + 1),
                    primary: vec![
                        base + 1,
                        base + 7,
                        base + 13,
                        base + 19,
                        base + 25,
                        base.min(2) + 31,
                    ],
                    secondary: vec![base + 1],
                }
            })
            .collect();
        DrawHistory::from_draws(Game::Ssq, draws).unwrap()
    }

    #[test]
    fn test_numbers_at() {
        let history = ssq_history(3);
        let numbers = history.numbers_at(0, Pool::SsqRed).unwrap();
        assert_eq!(numbers.len(), 6);
        assert_eq!(history.numbers_at(2, Pool::SsqBlue).unwrap(), &[3]);
    }

    #[test]
    fn test_numbers_at_out_of_range() {
        let history = ssq_history(3);
        let err = history.numbers_at(3, Pool::SsqRed).unwrap_err();
        assert!(matches!(err, HistoryError::OutOfRange { index: 3, len: 3 }));
    }

    #[test]
    fn test_pool_mismatch() {
        let history = ssq_history(2);
        let err = history.numbers_at(0, Pool::DltFront).unwrap_err();
        assert!(matches!(err, HistoryError::PoolMismatch { .. }));
        assert!(history.universe_size(Pool::DltBack).is_err());
    }

    #[test]
    fn test_universe_size() {
        let history = ssq_history(1);
        assert_eq!(history.universe_size(Pool::SsqRed).unwrap(), 33);
        assert_eq!(history.universe_size(Pool::SsqBlue).unwrap(), 16);
    }

    #[test]
    fn test_push_rejects_malformed() {
        let mut history = DrawHistory::new(Game::Ssq);
        let bad = Draw {
            draw_id: "2023001".to_string(),
            primary: vec![1, 2, 3, 4, 5, 40],
            secondary: vec![1],
        };
        assert!(history.push(bad).is_err());
        assert!(history.is_empty());
    }

    #[test]
    fn test_tail() {
        let history = ssq_history(10);
        let window = history.tail(4);
        assert_eq!(window.len(), 4);
        assert_eq!(window.draws()[0].draw_id, "2023007");
        assert_eq!(window.draws()[3].draw_id, "2023010");
        assert_eq!(history.tail(50).len(), 10);
    }
}
