use serde::Serialize;

use lototrend_history::history::{DrawHistory, HistoryError};
use lototrend_history::models::Pool;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NumberStats {
    pub number: u8,
    pub frequency: u32,
    pub gap: u32,
}

/// Fréquence d'apparition et retard courant de chaque numéro sur la fenêtre.
/// Le retard compte depuis le tirage le plus récent ; un numéro jamais sorti
/// vaut la taille de la fenêtre.
pub fn compute_stats(
    history: &DrawHistory,
    pool: Pool,
) -> Result<Vec<NumberStats>, HistoryError> {
    history.check_pool(pool)?;
    let size = pool.size() as usize;
    let len = history.len();

    let mut frequency = vec![0u32; size];
    let mut last_seen: Vec<Option<usize>> = vec![None; size];

    for (i, draw) in history.draws().iter().enumerate() {
        for &n in pool.numbers_from(draw) {
            let idx = (n - 1) as usize;
            if idx < size {
                frequency[idx] += 1;
                last_seen[idx] = Some(i);
            }
        }
    }

    Ok((0..size)
        .map(|idx| NumberStats {
            number: (idx + 1) as u8,
            frequency: frequency[idx],
            gap: match last_seen[idx] {
                Some(i) => (len - 1 - i) as u32,
                None => len as u32,
            },
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lototrend_history::models::{Draw, Game};

    fn history() -> DrawHistory {
        let draws = vec![
            Draw {
                draw_id: "2023001".to_string(),
                primary: vec![1, 2, 3, 4, 5, 6],
                secondary: vec![7],
            },
            Draw {
                draw_id: "2023002".to_string(),
                primary: vec![1, 7, 13, 19, 25, 31],
                secondary: vec![7],
            },
            Draw {
                draw_id: "2023003".to_string(),
                primary: vec![2, 7, 14, 20, 26, 32],
                secondary: vec![9],
            },
        ];
        DrawHistory::from_draws(Game::Ssq, draws).unwrap()
    }

    #[test]
    fn test_frequency_and_gap() {
        let stats = compute_stats(&history(), Pool::SsqRed).unwrap();
        assert_eq!(stats.len(), 33);

        let n1 = &stats[0];
        assert_eq!(n1.number, 1);
        assert_eq!(n1.frequency, 2);
        assert_eq!(n1.gap, 1);

        let n2 = &stats[1];
        assert_eq!(n2.frequency, 2);
        assert_eq!(n2.gap, 0);

        let n7 = &stats[6];
        assert_eq!(n7.frequency, 2);
        assert_eq!(n7.gap, 0);
    }

    #[test]
    fn test_never_drawn_gap_is_window_len() {
        let stats = compute_stats(&history(), Pool::SsqRed).unwrap();
        let n33 = &stats[32];
        assert_eq!(n33.frequency, 0);
        assert_eq!(n33.gap, 3);
    }

    #[test]
    fn test_bonus_pool() {
        let stats = compute_stats(&history(), Pool::SsqBlue).unwrap();
        assert_eq!(stats.len(), 16);
        assert_eq!(stats[6].frequency, 2);
        assert_eq!(stats[6].gap, 1);
        assert_eq!(stats[8].gap, 0);
    }

    #[test]
    fn test_empty_history() {
        let empty = DrawHistory::new(Game::Ssq);
        let stats = compute_stats(&empty, Pool::SsqRed).unwrap();
        assert_eq!(stats.len(), 33);
        assert!(stats.iter().all(|s| s.frequency == 0 && s.gap == 0));
    }
}
