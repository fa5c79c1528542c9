mod display;
mod loader;

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand, ValueEnum};

use lototrend_engine::export::{save_export, TrendExport};
use lototrend_engine::miss::{compute_display_miss, compute_status_miss};
use lototrend_engine::params::compute_params;
use lototrend_engine::stats::compute_stats;
use lototrend_engine::tails::compute_tail_trend;
use lototrend_engine::tier::{tier_ratios, tier_rows};
use lototrend_history::history::DrawHistory;
use lototrend_history::models::{Game, Pool};

use crate::display::{
    display_draws, display_load_summary, display_param_chart, display_params,
    display_ratios, display_stats, display_status, display_tails, display_trend,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum GameArg {
    Ssq,
    Dlt,
}

impl From<GameArg> for Game {
    fn from(arg: GameArg) -> Self {
        match arg {
            GameArg::Ssq => Game::Ssq,
            GameArg::Dlt => Game::Dlt,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PoolArg {
    /// Pool principal (rouges SSQ, zone avant DLT)
    Main,
    /// Pool bonus (bleue SSQ, zone arrière DLT)
    Bonus,
}

impl PoolArg {
    fn resolve(self, game: Game) -> Pool {
        match self {
            PoolArg::Main => game.primary_pool(),
            PoolArg::Bonus => game.secondary_pool(),
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ChartParam {
    Sum,
    Span,
    Ac,
    Head,
    TailEnd,
    Amplitude,
}

#[derive(Parser)]
#[command(name = "lototrend", about = "Analyseur de tendances SSQ / DLT")]
struct Cli {
    /// Fichier CSV d'historique des tirages
    #[arg(short, long, default_value = "data/ssqhistory.csv", global = true)]
    file: PathBuf,

    /// Jeu analysé
    #[arg(short, long, value_enum, default_value = "ssq", global = true)]
    game: GameArg,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Lister les derniers tirages
    History {
        /// Nombre de tirages à afficher
        #[arg(short, long, default_value = "20")]
        last: usize,

        /// Filtrer sur une année (préfixe de la période)
        #[arg(short, long)]
        year: Option<String>,
    },

    /// Tableau de tendance (retards affichés, couleurs chaud/tiède/froid)
    Trend {
        #[arg(short, long, value_enum, default_value = "main")]
        pool: PoolArg,

        /// Fenêtre d'analyse (nombre de tirages)
        #[arg(short, long, default_value = "30")]
        last: usize,
    },

    /// État chaud/tiède/froid de chaque numéro à la dernière période
    Status {
        #[arg(short, long, value_enum, default_value = "main")]
        pool: PoolArg,
    },

    /// Fréquences et retards par numéro
    Stats {
        #[arg(short, long, value_enum, default_value = "main")]
        pool: PoolArg,

        /// Fenêtre d'analyse (nombre de tirages)
        #[arg(short, long, default_value = "100")]
        window: usize,
    },

    /// Paramètres par tirage (tête, queue, somme, étendue, AC, ratios...)
    Params {
        #[arg(short, long, value_enum, default_value = "main")]
        pool: PoolArg,

        #[arg(short, long, default_value = "30")]
        last: usize,
    },

    /// Ratios par tirage (impair/pair, zones, froid/tiède/chaud)
    Ratios {
        #[arg(short, long, value_enum, default_value = "main")]
        pool: PoolArg,

        #[arg(short, long, default_value = "30")]
        last: usize,
    },

    /// Tendance des terminaisons communes du pool principal
    Tails {
        #[arg(short, long, default_value = "30")]
        last: usize,
    },

    /// Graphique terminal d'un paramètre numérique
    Chart {
        #[arg(short, long, value_enum, default_value = "main")]
        pool: PoolArg,

        /// Paramètre tracé
        #[arg(long, value_enum, default_value = "sum")]
        param: ChartParam,

        #[arg(short, long, default_value = "100")]
        last: usize,
    },

    /// Exporter les matrices et paramètres d'un pool en JSON
    Export {
        #[arg(short, long, value_enum, default_value = "main")]
        pool: PoolArg,

        /// Fichier de sortie
        #[arg(short, long, default_value = "trend.json")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let game: Game = cli.game.into();

    let result = loader::load_csv(game, &cli.file)?;
    if result.errors > 0 || result.skipped > 0 {
        display_load_summary(&result);
    }
    let history = result.history;
    if history.is_empty() {
        println!("Aucun tirage valide dans {:?}.", cli.file);
        return Ok(());
    }

    match cli.command {
        Command::History { last, year } => cmd_history(&history, last, year),
        Command::Trend { pool, last } => cmd_trend(&history, pool.resolve(game), last),
        Command::Status { pool } => cmd_status(&history, pool.resolve(game)),
        Command::Stats { pool, window } => cmd_stats(&history, pool.resolve(game), window),
        Command::Params { pool, last } => cmd_params(&history, pool.resolve(game), last),
        Command::Ratios { pool, last } => cmd_ratios(&history, pool.resolve(game), last),
        Command::Tails { last } => cmd_tails(&history, game.primary_pool(), last),
        Command::Chart { pool, param, last } => {
            cmd_chart(&history, pool.resolve(game), param, last)
        }
        Command::Export { pool, output } => cmd_export(&history, pool.resolve(game), &output),
    }
}

fn cmd_history(history: &DrawHistory, last: usize, year: Option<String>) -> Result<()> {
    let game = history.game();
    let draws: Vec<_> = match &year {
        Some(y) => history
            .draws()
            .iter()
            .filter(|d| d.draw_id.starts_with(y.as_str()))
            .cloned()
            .collect(),
        None => history.draws().to_vec(),
    };
    if draws.is_empty() {
        println!("Aucun tirage pour ce filtre.");
        return Ok(());
    }
    let start = draws.len().saturating_sub(last);
    display_draws(&draws[start..], game.primary_pool(), game.secondary_pool());
    Ok(())
}

fn cmd_trend(history: &DrawHistory, pool: Pool, last: usize) -> Result<()> {
    let window = history.tail(last);
    let display_miss = compute_display_miss(&window, pool)?;
    let status = compute_status_miss(&window, pool)?;
    let numbers = || window.draws().iter().map(|d| pool.numbers_from(d));
    let tiers = tier_rows(&status, numbers());
    let ratios = tier_ratios(&status, numbers());
    display_trend(window.draws(), pool, &display_miss, &tiers, &ratios);
    Ok(())
}

fn cmd_status(history: &DrawHistory, pool: Pool) -> Result<()> {
    let status = compute_status_miss(history, pool)?;
    let tiers = tier_rows(
        &status,
        history.draws().iter().map(|d| pool.numbers_from(d)),
    );
    let last_index = history.len() - 1;
    display_status(&status[last_index], &tiers[last_index], pool);
    Ok(())
}

fn cmd_stats(history: &DrawHistory, pool: Pool, window: usize) -> Result<()> {
    let window_history = history.tail(window);
    let stats = compute_stats(&window_history, pool)?;
    display_stats(&stats, pool, window_history.len());
    Ok(())
}

fn cmd_params(history: &DrawHistory, pool: Pool, last: usize) -> Result<()> {
    let window = history.tail(last);
    let params = compute_params(&window, pool)?;
    display_params(window.draws(), &params, pool);
    Ok(())
}

fn cmd_ratios(history: &DrawHistory, pool: Pool, last: usize) -> Result<()> {
    let window = history.tail(last);
    let params = compute_params(&window, pool)?;
    let ratios = lototrend_engine::tier::compute_tier_ratios(&window, pool)?;
    display_ratios(window.draws(), &params, &ratios);
    Ok(())
}

fn cmd_tails(history: &DrawHistory, pool: Pool, last: usize) -> Result<()> {
    let window = history.tail(last);
    let rows = compute_tail_trend(&window, pool)?;
    display_tails(window.draws(), &rows);
    Ok(())
}

fn cmd_chart(history: &DrawHistory, pool: Pool, param: ChartParam, last: usize) -> Result<()> {
    let window = history.tail(last);
    let params = compute_params(&window, pool)?;

    let (label, values): (&str, Vec<f64>) = match param {
        ChartParam::Sum => (
            "Somme",
            params.iter().map(|p| f64::from(p.sum_value)).collect(),
        ),
        ChartParam::Span => (
            "Étendue",
            params.iter().map(|p| f64::from(p.span)).collect(),
        ),
        ChartParam::Ac => (
            "Valeur AC",
            params.iter().map(|p| f64::from(p.ac_value)).collect(),
        ),
        ChartParam::Head => (
            "Tête",
            params.iter().map(|p| f64::from(p.dragon_head)).collect(),
        ),
        ChartParam::TailEnd => (
            "Queue",
            params.iter().map(|p| f64::from(p.phoenix_tail)).collect(),
        ),
        ChartParam::Amplitude => {
            if pool.pick_count() != 1 {
                bail!("L'amplitude n'est définie que pour les pools à un numéro");
            }
            (
                "Amplitude",
                params
                    .iter()
                    .map(|p| f64::from(p.amplitude.unwrap_or(0)))
                    .collect(),
            )
        }
    };

    display_param_chart(
        &format!("{} · {} · {} tirages", label, pool.label(), window.len()),
        &values,
    );
    Ok(())
}

fn cmd_export(history: &DrawHistory, pool: Pool, output: &std::path::Path) -> Result<()> {
    let export = TrendExport::build(history, pool)?;
    save_export(&export, output)?;
    println!(
        "Export écrit dans {:?} ({} tirages, pool {}).",
        output,
        export.issues.len(),
        pool
    );
    Ok(())
}
