use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};
use textplots::Plot;

use lototrend_engine::miss::MissRow;
use lototrend_engine::params::DrawParams;
use lototrend_engine::stats::NumberStats;
use lototrend_engine::tails::TailRow;
use lototrend_engine::tier::{Tier, TierRatio, TierRow};
use lototrend_history::models::{Draw, Pool};

use crate::loader::LoadResult;

/// Couleurs alignées sur la palette classique des grilles :
/// chaud en rouge, tiède en orange, froid en bleu ciel.
fn tier_color(tier: Tier) -> Color {
    match tier {
        Tier::Hot => Color::Red,
        Tier::Warm => Color::Yellow,
        Tier::Cold => Color::Cyan,
    }
}

pub fn display_load_summary(result: &LoadResult) {
    println!("Chargement du fichier :");
    println!("  Lignes lues       : {}", result.total_records);
    println!("  Tirages chargés   : {}", result.loaded);
    if result.skipped > 0 {
        println!("  Doublons ignorés  : {}", result.skipped);
    }
    if result.errors > 0 {
        println!("  Erreurs           : {}", result.errors);
    }
}

pub fn display_draws(draws: &[Draw], primary: Pool, secondary: Pool) {
    if draws.is_empty() {
        println!("Aucun tirage à afficher.");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Période", primary.label(), secondary.label()]);

    for draw in draws {
        table.add_row(vec![
            draw.draw_id.clone(),
            join_numbers(&draw.primary),
            join_numbers(&draw.secondary),
        ]);
    }

    println!("{table}");
}

fn join_numbers(numbers: &[u8]) -> String {
    numbers
        .iter()
        .map(|n| format!("{:02}", n))
        .collect::<Vec<_>>()
        .join(" - ")
}

/// Tableau de tendance : une ligne par période, une colonne par numéro.
/// Numéro sorti = affiché sur deux chiffres, coloré selon son statut ;
/// numéro absent = son retard d'affichage, en grisé.
pub fn display_trend(
    draws: &[Draw],
    pool: Pool,
    display_miss: &[MissRow],
    tiers: &[TierRow],
    ratios: &[TierRatio],
) {
    println!("\n── Tendance · {} ──", pool.label());

    let mut table = Table::new();
    // Tableau large : on laisse le terminal défiler plutôt que replier.
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Disabled);

    let mut header = vec![Cell::new("Période")];
    for n in 1..=pool.size() {
        header.push(Cell::new(format!("{:02}", n)));
    }
    header.push(Cell::new("F:T:C"));
    table.set_header(header);

    for (i, draw) in draws.iter().enumerate() {
        let numbers = pool.numbers_from(draw);
        let mut row = vec![Cell::new(&draw.draw_id)];
        for n in 1..=pool.size() {
            if numbers.contains(&n) {
                row.push(
                    Cell::new(format!("{:02}", n)).fg(tier_color(tiers[i].value(n))),
                );
            } else {
                row.push(
                    Cell::new(display_miss[i].value(n).to_string()).fg(Color::DarkGrey),
                );
            }
        }
        row.push(Cell::new(ratios[i].to_string()));
        table.add_row(row);
    }

    println!("{table}");
}

/// État chaud/tiède/froid de chaque numéro à la dernière période.
pub fn display_status(status: &MissRow, tiers: &TierRow, pool: Pool) {
    println!("\n── Statut · {} ──", pool.label());

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Numéro", "Retard", "État"]);

    let mut counts = [0usize; 3];
    for n in 1..=pool.size() {
        let tier = tiers.value(n);
        counts[match tier {
            Tier::Hot => 0,
            Tier::Warm => 1,
            Tier::Cold => 2,
        }] += 1;
        table.add_row(vec![
            Cell::new(format!("{:02}", n)),
            Cell::new(status.value(n).to_string()),
            Cell::new(tier.to_string()).fg(tier_color(tier)),
        ]);
    }

    println!("{table}");
    println!(
        "Chauds : {} · Tièdes : {} · Froids : {}",
        counts[0], counts[1], counts[2]
    );
}

pub fn display_stats(stats: &[NumberStats], pool: Pool, window: usize) {
    println!(
        "\n── Fréquences et retards · {} · {} derniers tirages ──",
        pool.label(),
        window
    );

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Numéro", "Fréquence", "Retard"]);

    let mut sorted = stats.to_vec();
    sorted.sort_by(|a, b| b.frequency.cmp(&a.frequency));

    for stat in &sorted {
        table.add_row(vec![
            format!("{:02}", stat.number),
            stat.frequency.to_string(),
            stat.gap.to_string(),
        ]);
    }

    println!("{table}");
}

pub fn display_params(draws: &[Draw], params: &[DrawParams], pool: Pool) {
    println!("\n── Paramètres · {} ──", pool.label());

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    if pool.is_primary() {
        table.set_header(vec![
            "Période",
            "Tête",
            "Queue",
            "Somme",
            "Étendue",
            "AC",
            "I:P",
            "G:P",
            "Pr:Co",
            "012",
            "Zones",
            "Consécutifs",
            "Terminaisons",
            "Répétés",
            "Voisins",
        ]);
        for (draw, p) in draws.iter().zip(params) {
            table.add_row(vec![
                draw.draw_id.clone(),
                p.dragon_head.to_string(),
                p.phoenix_tail.to_string(),
                p.sum_value.to_string(),
                p.span.to_string(),
                p.ac_value.to_string(),
                p.odd_even_ratio.clone(),
                p.size_ratio.clone(),
                p.prime_ratio.clone(),
                p.road012_ratio.clone(),
                p.zone_ratio.clone(),
                p.consecutive.clone(),
                p.same_tail.clone(),
                p.repeat.to_string(),
                p.neighbor.to_string(),
            ]);
        }
    } else {
        table.set_header(vec![
            "Période",
            "Numéros",
            "Somme",
            "Étendue",
            "I:P",
            "G:P",
            "Pr:Co",
            "012",
            "Zones",
            "Répétés",
            "Voisins",
            "Amplitude",
        ]);
        for (draw, p) in draws.iter().zip(params) {
            let amplitude = p
                .amplitude
                .map(|a| a.to_string())
                .unwrap_or_else(|| "—".to_string());
            table.add_row(vec![
                draw.draw_id.clone(),
                join_numbers(pool.numbers_from(draw)),
                p.sum_value.to_string(),
                p.span.to_string(),
                p.odd_even_ratio.clone(),
                p.size_ratio.clone(),
                p.prime_ratio.clone(),
                p.road012_ratio.clone(),
                p.zone_ratio.clone(),
                p.repeat.to_string(),
                p.neighbor.to_string(),
                amplitude,
            ]);
        }
    }

    println!("{table}");
}

pub fn display_ratios(draws: &[Draw], params: &[DrawParams], ratios: &[TierRatio]) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            "Période",
            "Impair:Pair",
            "Zones",
            "Froid:Tiède:Chaud",
        ]);

    for ((draw, p), ratio) in draws.iter().zip(params).zip(ratios) {
        table.add_row(vec![
            draw.draw_id.clone(),
            p.odd_even_ratio.clone(),
            p.zone_ratio.clone(),
            ratio.to_string(),
        ]);
    }

    println!("{table}");
}

/// Tendance des terminaisons : une sortie (≥ 2 numéros sur la même
/// terminaison) affiche le nombre de numéros, sinon le retard en grisé.
pub fn display_tails(draws: &[Draw], rows: &[TailRow]) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Disabled);

    let mut header = vec![Cell::new("Période")];
    for t in 0..10u8 {
        header.push(Cell::new(t.to_string()));
    }
    table.set_header(header);

    for (draw, row) in draws.iter().zip(rows) {
        let mut cells = vec![Cell::new(&draw.draw_id)];
        for t in 0..10u8 {
            if row.is_present(t) {
                cells.push(Cell::new(format!("×{}", row.count(t))).fg(Color::Red));
            } else {
                cells.push(Cell::new(row.miss(t).to_string()).fg(Color::DarkGrey));
            }
        }
        table.add_row(cells);
    }

    println!("{table}");
}

/// Graphique ASCII simple avec textplots.
pub fn display_param_chart(title: &str, values: &[f64]) {
    println!("\n== {} ==\n", title);

    if values.is_empty() {
        println!("  (Pas de données à afficher)");
        return;
    }

    let points: Vec<(f32, f32)> = values
        .iter()
        .enumerate()
        .map(|(i, &v)| (i as f32, v as f32))
        .collect();

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let y_min = sorted[0] as f32 - 1.0;
    let y_max = sorted[sorted.len() - 1] as f32 + 1.0;

    let shape = textplots::Shape::Lines(&points);
    let mut chart = textplots::Chart::new_with_y_range(
        120,
        40,
        0.0,
        (values.len().saturating_sub(1)).max(1) as f32,
        y_min,
        y_max,
    );
    println!("{}", chart.lineplot(&shape));
}
