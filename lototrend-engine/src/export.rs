use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use lototrend_history::history::{DrawHistory, HistoryError};
use lototrend_history::models::Pool;

use crate::miss::{compute_display_miss, compute_status_miss, MissRow};
use crate::params::{compute_params, DrawParams};
use crate::tier::{tier_ratios, tier_rows, TierRow};

/// Toutes les matrices d'un pool, prêtes à être sérialisées : périodes,
/// numéros sortis, retards d'affichage, retards de statut, statuts,
/// ratios froid:tiède:chaud et paramètres par période.
#[derive(Debug, Clone, Serialize)]
pub struct TrendExport {
    pub game: String,
    pub pool: String,
    pub issues: Vec<String>,
    pub winning_numbers: Vec<Vec<u8>>,
    pub missed_values: Vec<MissRow>,
    pub status_missed: Vec<MissRow>,
    pub status_matrix: Vec<TierRow>,
    pub tier_ratios: Vec<String>,
    pub parameters: Vec<DrawParams>,
}

impl TrendExport {
    pub fn build(history: &DrawHistory, pool: Pool) -> Result<Self, HistoryError> {
        let status = compute_status_miss(history, pool)?;
        let numbers = || history.draws().iter().map(|d| pool.numbers_from(d));

        Ok(TrendExport {
            game: history.game().code().to_string(),
            pool: pool.code().to_string(),
            issues: history
                .draws()
                .iter()
                .map(|d| d.draw_id.clone())
                .collect(),
            winning_numbers: history
                .draws()
                .iter()
                .map(|d| pool.numbers_from(d).to_vec())
                .collect(),
            missed_values: compute_display_miss(history, pool)?,
            status_matrix: tier_rows(&status, numbers()),
            tier_ratios: tier_ratios(&status, numbers())
                .iter()
                .map(|r| r.to_string())
                .collect(),
            status_missed: status,
            parameters: compute_params(history, pool)?,
        })
    }
}

pub fn save_export(export: &TrendExport, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(export)
        .context("Échec de la sérialisation JSON")?;
    std::fs::write(path, json)
        .with_context(|| format!("Impossible d'écrire {:?}", path))?;
    Ok(())
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
                primary: vec![1, 2, 3, 4, 5, 7],
                secondary: vec![8],
            },
        ];
        DrawHistory::from_draws(Game::Ssq, draws).unwrap()
    }

    #[test]
    fn test_build_shapes() {
        let export = TrendExport::build(&history(), Pool::SsqRed).unwrap();
        assert_eq!(export.game, "ssq");
        assert_eq!(export.pool, "red");
        assert_eq!(export.issues, vec!["2023001", "2023002"]);
        assert_eq!(export.winning_numbers[1], vec![1, 2, 3, 4, 5, 7]);
        assert_eq!(export.missed_values.len(), 2);
        assert_eq!(export.status_missed.len(), 2);
        assert_eq!(export.status_matrix.len(), 2);
        assert_eq!(export.tier_ratios.len(), 2);
        assert_eq!(export.parameters.len(), 2);
    }

    #[test]
    fn test_json_shape() {
        let export = TrendExport::build(&history(), Pool::SsqBlue).unwrap();
        let json = serde_json::to_string(&export).unwrap();
        // Les matrices sont des tableaux plats indexés par numéro.
        assert!(json.contains("\"missed_values\":[[1,1,1,1,1,1,0,"));
        assert!(json.contains("\"tier_ratios\":[\"1:0:0\",\"1:0:0\"]"));
        assert!(json.contains("\"cold\""));
    }

    #[test]
    fn test_empty_history() {
        let empty = DrawHistory::new(Game::Dlt);
        let export = TrendExport::build(&empty, Pool::DltFront).unwrap();
        assert!(export.issues.is_empty());
        assert!(export.missed_values.is_empty());
    }
}
