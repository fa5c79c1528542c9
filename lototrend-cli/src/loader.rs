use std::path::Path;

use anyhow::{Context, Result};

use lototrend_history::history::DrawHistory;
use lototrend_history::models::{Draw, Game};

pub struct LoadResult {
    pub history: DrawHistory,
    pub total_records: u32,
    pub loaded: u32,
    pub skipped: u32,
    pub errors: u32,
}

/// Charge un fichier CSV d'historique (une ligne d'en-tête, puis
/// `période,numéros du pool principal...,numéros du pool bonus...`).
/// Les lignes invalides sont comptées et ignorées, jamais fatales.
/// Les tirages sont triés par période croissante, doublons écartés.
pub fn load_csv(game: Game, path: &Path) -> Result<LoadResult> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible d'ouvrir {:?}", path))?;
    // Certains exports ajoutent un BOM UTF-8 devant l'en-tête.
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(&raw);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(raw.as_bytes());

    let mut total_records = 0u32;
    let mut errors = 0u32;
    let mut draws: Vec<Draw> = Vec::new();

    for record_result in reader.records() {
        total_records += 1;
        match record_result {
            Ok(record) => match parse_record(game, &record) {
                Ok(draw) => draws.push(draw),
                Err(e) => {
                    eprintln!("Ligne {} ignorée : {}", total_records, e);
                    errors += 1;
                }
            },
            Err(e) => {
                eprintln!("Erreur lecture ligne {} : {}", total_records, e);
                errors += 1;
            }
        }
    }

    draws.sort_by(|a, b| a.draw_id.cmp(&b.draw_id));
    let before = draws.len();
    draws.dedup_by(|a, b| a.draw_id == b.draw_id);
    let skipped = (before - draws.len()) as u32;

    let mut history = DrawHistory::new(game);
    let mut loaded = 0u32;
    for draw in draws {
        match history.push(draw) {
            Ok(()) => loaded += 1,
            Err(e) => {
                eprintln!("Tirage ignoré : {}", e);
                errors += 1;
            }
        }
    }

    Ok(LoadResult {
        history,
        total_records,
        loaded,
        skipped,
        errors,
    })
}

fn parse_record(game: Game, record: &csv::StringRecord) -> Result<Draw> {
    let get = |idx: usize| -> Result<&str> {
        record
            .get(idx)
            .map(str::trim)
            .with_context(|| format!("champ manquant à l'index {}", idx))
    };
    let get_u8 = |idx: usize| -> Result<u8> {
        let s = get(idx)?;
        s.parse::<u8>()
            .with_context(|| format!("impossible de parser '{}' (index {})", s, idx))
    };

    let draw_id = get(0)?.to_string();
    if draw_id.is_empty() {
        anyhow::bail!("période vide");
    }

    let primary_count = game.primary_pool().pick_count();
    let secondary_count = game.secondary_pool().pick_count();

    let mut primary = Vec::with_capacity(primary_count);
    for i in 0..primary_count {
        primary.push(get_u8(1 + i)?);
    }
    primary.sort_unstable();

    let mut secondary = Vec::with_capacity(secondary_count);
    for i in 0..secondary_count {
        secondary.push(get_u8(1 + primary_count + i)?);
    }
    secondary.sort_unstable();

    Ok(Draw {
        draw_id,
        primary,
        secondary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_csv(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_ssq() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            &dir,
            "ssq.csv",
            "期号,红球1,红球2,红球3,红球4,红球5,红球6,蓝球\n\
             2023002,9,4,21,33,17,2,16\n\
             2023001,1,2,3,4,5,6,7\n",
        );
        let result = load_csv(Game::Ssq, &path).unwrap();
        assert_eq!(result.total_records, 2);
        assert_eq!(result.loaded, 2);
        assert_eq!(result.errors, 0);
        // Tri par période, numéros triés dans le tirage.
        let draws = result.history.draws();
        assert_eq!(draws[0].draw_id, "2023001");
        assert_eq!(draws[1].primary, vec![2, 4, 9, 17, 21, 33]);
        assert_eq!(draws[1].secondary, vec![16]);
    }

    #[test]
    fn test_load_dlt() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            &dir,
            "dlt.csv",
            "期号,前区1,前区2,前区3,前区4,前区5,后区1,后区2\n\
             24001,35,1,12,24,8,12,3\n",
        );
        let result = load_csv(Game::Dlt, &path).unwrap();
        assert_eq!(result.loaded, 1);
        let draw = &result.history.draws()[0];
        assert_eq!(draw.primary, vec![1, 8, 12, 24, 35]);
        assert_eq!(draw.secondary, vec![3, 12]);
    }

    #[test]
    fn test_bom_and_bad_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            &dir,
            "ssq.csv",
            "\u{feff}期号,红球1,红球2,红球3,红球4,红球5,红球6,蓝球\n\
             2023001,1,2,3,4,5,6,7\n\
             2023002,1,2,3,4,5\n\
             2023003,1,2,3,4,5,99,7\n\
             2023004,1,2,3,4,5,6,8\n",
        );
        let result = load_csv(Game::Ssq, &path).unwrap();
        assert_eq!(result.total_records, 4);
        // Ligne tronquée + numéro hors limites : deux erreurs.
        assert_eq!(result.errors, 2);
        assert_eq!(result.loaded, 2);
        assert_eq!(result.history.draws()[0].draw_id, "2023001");
    }

    #[test]
    fn test_duplicate_issue_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            &dir,
            "ssq.csv",
            "期号,红球1,红球2,红球3,红球4,红球5,红球6,蓝球\n\
             2023001,1,2,3,4,5,6,7\n\
             2023001,1,2,3,4,5,6,7\n",
        );
        let result = load_csv(Game::Ssq, &path).unwrap();
        assert_eq!(result.loaded, 1);
        assert_eq!(result.skipped, 1);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_csv(Game::Ssq, &dir.path().join("absent.csv")).is_err());
    }
}
