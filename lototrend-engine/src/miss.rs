use serde::Serialize;

use lototrend_history::history::{DrawHistory, HistoryError};
use lototrend_history::models::Pool;

/// Retard de statut attribué à un numéro jamais sorti : froid d'office.
/// Valeur fixe, identique pour tous les pools.
pub const STATUS_MISS_NEVER_DRAWN: u32 = 18;

/// Retards d'une période pour tous les numéros d'un pool (indexés par numéro).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MissRow {
    values: Vec<u32>,
}

impl MissRow {
    pub fn value(&self, number: u8) -> u32 {
        self.values[(number - 1) as usize]
    }

    pub fn values(&self) -> &[u32] {
        &self.values
    }
}

/// Retards d'affichage : à la première période, un numéro absent démarre à 1.
/// Ensuite : sorti = 0, absent = retard précédent + 1.
/// Ces valeurs servent uniquement à l'affichage dans les tableaux de tendance,
/// jamais au classement chaud/tiède/froid.
pub fn display_miss_rows<'a, I>(draws: I, universe: u8) -> Vec<MissRow>
where
    I: IntoIterator<Item = &'a [u8]>,
{
    miss_rows(draws, universe, 1)
}

/// Retards de statut : à la première période, un numéro absent vaut 18
/// (jamais sorti = froid d'office). Ensuite : sorti = 0, absent = retard
/// précédent + 1. C'est la seule série utilisée pour le classement
/// chaud/tiède/froid ; elle n'est pas interchangeable avec les retards
/// d'affichage.
pub fn status_miss_rows<'a, I>(draws: I, universe: u8) -> Vec<MissRow>
where
    I: IntoIterator<Item = &'a [u8]>,
{
    miss_rows(draws, universe, STATUS_MISS_NEVER_DRAWN)
}

/// Récurrence commune : une seule passe, un scalaire porté par numéro.
/// Les deux séries ne diffèrent que par la valeur d'un absent en première
/// période. Un numéro absent juste après une sortie retombe bien à 1 dans
/// les deux séries (précédent = 0).
fn miss_rows<'a, I>(draws: I, universe: u8, first_absent: u32) -> Vec<MissRow>
where
    I: IntoIterator<Item = &'a [u8]>,
{
    let size = universe as usize;
    let mut rows: Vec<MissRow> = Vec::new();

    for numbers in draws {
        let mut present = vec![false; size];
        for &n in numbers {
            let idx = (n - 1) as usize;
            if idx < size {
                present[idx] = true;
            }
        }

        let values: Vec<u32> = match rows.last() {
            None => (0..size)
                .map(|i| if present[i] { 0 } else { first_absent })
                .collect(),
            Some(prev) => (0..size)
                .map(|i| if present[i] { 0 } else { prev.values[i] + 1 })
                .collect(),
        };

        rows.push(MissRow { values });
    }

    rows
}

pub fn compute_display_miss(
    history: &DrawHistory,
    pool: Pool,
) -> Result<Vec<MissRow>, HistoryError> {
    history.check_pool(pool)?;
    Ok(display_miss_rows(
        history.draws().iter().map(|d| pool.numbers_from(d)),
        pool.size(),
    ))
}

pub fn compute_status_miss(
    history: &DrawHistory,
    pool: Pool,
) -> Result<Vec<MissRow>, HistoryError> {
    history.check_pool(pool)?;
    Ok(status_miss_rows(
        history.draws().iter().map(|d| pool.numbers_from(d)),
        pool.size(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lototrend_history::models::{Draw, Game};

    fn draws_3x5() -> Vec<Vec<u8>> {
        vec![vec![1, 3], vec![2, 3], vec![1, 2]]
    }

    fn rows(draws: &[Vec<u8>]) -> impl Iterator<Item = &[u8]> {
        draws.iter().map(|d| d.as_slice())
    }

    #[test]
    fn test_display_scenario() {
        let draws = draws_3x5();
        let display = display_miss_rows(rows(&draws), 5);
        assert_eq!(display[0].values(), &[0, 1, 0, 1, 1]);
        assert_eq!(display[1].values(), &[1, 0, 0, 2, 2]);
        assert_eq!(display[2].values(), &[0, 0, 1, 3, 3]);
    }

    #[test]
    fn test_status_scenario() {
        let draws = draws_3x5();
        let status = status_miss_rows(rows(&draws), 5);
        assert_eq!(status[0].values(), &[0, 18, 0, 18, 18]);
        assert_eq!(status[1].values(), &[1, 0, 0, 19, 19]);
        assert_eq!(status[2].values(), &[0, 0, 1, 20, 20]);
    }

    #[test]
    fn test_zero_on_appearance() {
        let draws = draws_3x5();
        let display = display_miss_rows(rows(&draws), 5);
        let status = status_miss_rows(rows(&draws), 5);
        for (i, numbers) in draws.iter().enumerate() {
            for &n in numbers {
                assert_eq!(display[i].value(n), 0);
                assert_eq!(status[i].value(n), 0);
            }
        }
    }

    #[test]
    fn test_restart_after_hit() {
        // Le numéro 3 sort en période 1 puis reste absent : 1, 2, 3...
        let draws = vec![vec![3u8, 4], vec![3, 4], vec![1, 2], vec![1, 2], vec![1, 2]];
        let display = display_miss_rows(rows(&draws), 5);
        let status = status_miss_rows(rows(&draws), 5);
        assert_eq!(display[2].value(3), 1);
        assert_eq!(display[3].value(3), 2);
        assert_eq!(display[4].value(3), 3);
        assert_eq!(status[2].value(3), 1);
        assert_eq!(status[3].value(3), 2);
        assert_eq!(status[4].value(3), 3);
    }

    #[test]
    fn test_never_drawn_accumulates_from_sentinel() {
        let draws = vec![vec![1u8, 2], vec![1, 2], vec![1, 2]];
        let status = status_miss_rows(rows(&draws), 5);
        assert_eq!(status[0].value(5), 18);
        assert_eq!(status[1].value(5), 19);
        assert_eq!(status[2].value(5), 20);
        let display = display_miss_rows(rows(&draws), 5);
        assert_eq!(display[0].value(5), 1);
        assert_eq!(display[2].value(5), 3);
    }

    #[test]
    fn test_empty_history() {
        let history = DrawHistory::new(Game::Ssq);
        assert!(compute_display_miss(&history, Pool::SsqRed).unwrap().is_empty());
        assert!(compute_status_miss(&history, Pool::SsqRed).unwrap().is_empty());
    }

    #[test]
    fn test_pool_mismatch_surfaces() {
        let history = DrawHistory::new(Game::Ssq);
        assert!(compute_display_miss(&history, Pool::DltFront).is_err());
    }

    #[test]
    fn test_determinism() {
        let draws = draws_3x5();
        let a = status_miss_rows(rows(&draws), 5);
        let b = status_miss_rows(rows(&draws), 5);
        assert_eq!(a, b);
        let c = display_miss_rows(rows(&draws), 5);
        let d = display_miss_rows(rows(&draws), 5);
        assert_eq!(c, d);
    }

    #[test]
    fn test_history_wrappers() {
        let draws = vec![
            Draw {
                draw_id: "2023001".to_string(),
                primary: vec![1, 2, 3, 4, 5, 6],
                secondary: vec![7],
            },
            Draw {
                draw_id: "2023002".to_string(),
                primary: vec![1, 2, 3, 4, 5, 7],
                secondary: vec![7],
            },
        ];
        let history = DrawHistory::from_draws(Game::Ssq, draws).unwrap();
        let display = compute_display_miss(&history, Pool::SsqRed).unwrap();
        assert_eq!(display.len(), 2);
        assert_eq!(display[1].value(6), 1);
        assert_eq!(display[1].value(7), 0);
        let blue = compute_status_miss(&history, Pool::SsqBlue).unwrap();
        assert_eq!(blue[0].value(7), 0);
        assert_eq!(blue[1].value(16), 19);
    }
}
