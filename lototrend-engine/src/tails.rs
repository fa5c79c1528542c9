use serde::Serialize;

use lototrend_history::history::{DrawHistory, HistoryError};
use lototrend_history::models::Pool;

/// Terminaisons (0-9) d'une période : combien de numéros sortis partagent
/// chaque terminaison, et le retard de la terminaison. Une terminaison ne
/// compte comme « sortie » que si au moins deux numéros la partagent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TailRow {
    counts: Vec<u8>,
    miss: Vec<u32>,
}

impl TailRow {
    pub fn count(&self, tail: u8) -> u8 {
        self.counts[tail as usize]
    }

    pub fn miss(&self, tail: u8) -> u32 {
        self.miss[tail as usize]
    }

    /// Sortie = au moins deux numéros sur cette terminaison.
    pub fn is_present(&self, tail: u8) -> bool {
        self.counts[tail as usize] >= 2
    }
}

/// Tendance des terminaisons : même récurrence que les retards d'affichage
/// (première période absente = 1, puis cumul, remise à zéro à chaque sortie).
pub fn compute_tail_trend(
    history: &DrawHistory,
    pool: Pool,
) -> Result<Vec<TailRow>, HistoryError> {
    history.check_pool(pool)?;
    let mut rows: Vec<TailRow> = Vec::with_capacity(history.len());

    for draw in history.draws() {
        let mut counts = vec![0u8; 10];
        for &n in pool.numbers_from(draw) {
            counts[(n % 10) as usize] += 1;
        }

        let miss: Vec<u32> = (0..10)
            .map(|t| {
                if counts[t] >= 2 {
                    0
                } else {
                    match rows.last() {
                        None => 1,
                        Some(prev) => prev.miss[t] + 1,
                    }
                }
            })
            .collect();

        rows.push(TailRow { counts, miss });
    }

    Ok(rows)
}
