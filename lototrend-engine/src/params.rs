use std::collections::HashSet;

use serde::Serialize;

use lototrend_history::history::{DrawHistory, HistoryError};
use lototrend_history::models::Pool;

/// Paramètres dérivés d'une période pour un pool : tête/queue, somme, étendue,
/// valeur AC, ratios de répartition et motifs (consécutifs, terminaisons,
/// répétés, voisins). L'amplitude n'existe que pour les pools à un numéro.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DrawParams {
    pub dragon_head: u8,
    pub phoenix_tail: u8,
    pub sum_value: u32,
    pub span: u8,
    pub ac_value: u8,
    pub odd_even_ratio: String,
    pub size_ratio: String,
    pub prime_ratio: String,
    pub road012_ratio: String,
    pub zone_ratio: String,
    pub consecutive: String,
    pub same_tail: String,
    pub repeat: usize,
    pub neighbor: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amplitude: Option<u8>,
}

pub fn compute_params(
    history: &DrawHistory,
    pool: Pool,
) -> Result<Vec<DrawParams>, HistoryError> {
    history.check_pool(pool)?;
    let mut out = Vec::with_capacity(history.len());
    let mut prev: Option<&[u8]> = None;
    for draw in history.draws() {
        let numbers = pool.numbers_from(draw);
        out.push(params_for(numbers, prev, pool));
        prev = Some(numbers);
    }
    Ok(out)
}

fn params_for(numbers: &[u8], prev: Option<&[u8]>, pool: Pool) -> DrawParams {
    let mut sorted = numbers.to_vec();
    sorted.sort_unstable();

    let dragon_head = sorted.first().copied().unwrap_or(0);
    let phoenix_tail = sorted.last().copied().unwrap_or(0);
    let sum_value = sorted.iter().map(|&n| u32::from(n)).sum();
    let span = phoenix_tail - dragon_head;

    let odd = sorted.iter().filter(|&&n| n % 2 == 1).count();
    // Grand : strictement au-dessus de la moitié du pool.
    let big = sorted
        .iter()
        .filter(|&&n| u32::from(n) * 2 > u32::from(pool.size()))
        .count();
    let prime = sorted.iter().filter(|&&n| is_grid_prime(n)).count();

    let mut roads = [0usize; 3];
    for &n in &sorted {
        roads[(n % 3) as usize] += 1;
    }

    let zone_ratio = pool
        .zones()
        .iter()
        .map(|&(min, max)| {
            sorted
                .iter()
                .filter(|&&n| n >= min && n <= max)
                .count()
                .to_string()
        })
        .collect::<Vec<_>>()
        .join(":");

    let repeat = prev
        .map(|p| sorted.iter().filter(|n| p.contains(n)).count())
        .unwrap_or(0);
    let neighbor = prev.map(|p| neighbor_count(&sorted, p)).unwrap_or(0);

    let amplitude = if pool.pick_count() == 1 {
        let current = i16::from(dragon_head);
        Some(
            prev.and_then(|p| p.first())
                .map(|&p| (current - i16::from(p)).unsigned_abs() as u8)
                .unwrap_or(0),
        )
    } else {
        None
    };

    DrawParams {
        dragon_head,
        phoenix_tail,
        sum_value,
        span,
        ac_value: ac_value(&sorted),
        odd_even_ratio: format!("{}:{}", odd, sorted.len() - odd),
        size_ratio: format!("{}:{}", big, sorted.len() - big),
        prime_ratio: format!("{}:{}", prime, sorted.len() - prime),
        road012_ratio: format!("{}:{}:{}", roads[0], roads[1], roads[2]),
        zone_ratio,
        consecutive: run_label(&sorted),
        same_tail: tail_label(&sorted),
        repeat,
        neighbor,
        amplitude,
    }
}

/// Convention des grilles pour le ratio premier:composé — le 1 compte
/// comme premier.
fn is_grid_prime(n: u8) -> bool {
    matches!(n, 1 | 2 | 3 | 5 | 7 | 11 | 13 | 17 | 19 | 23 | 29 | 31)
}

/// Nombre d'écarts deux à deux distincts, moins (tirés - 1).
fn ac_value(sorted: &[u8]) -> u8 {
    if sorted.len() < 2 {
        return 0;
    }
    let mut diffs = HashSet::new();
    for i in 0..sorted.len() {
        for j in (i + 1)..sorted.len() {
            diffs.insert(sorted[j] - sorted[i]);
        }
    }
    (diffs.len() - (sorted.len() - 1)) as u8
}

/// Numéros de la période courante adjacents (±1) à un numéro de la
/// période précédente.
fn neighbor_count(current: &[u8], prev: &[u8]) -> usize {
    let mut neighbors = HashSet::new();
    for &n in prev {
        if n > 1 {
            neighbors.insert(n - 1);
        }
        neighbors.insert(n + 1);
    }
    current.iter().filter(|n| neighbors.contains(n)).count()
}

/// Tailles des suites consécutives (longueur ≥ 2), croissantes, jointes
/// par « + ». « — » quand il n'y en a aucune.
fn run_label(sorted: &[u8]) -> String {
    let mut groups: Vec<usize> = Vec::new();
    let mut run = 1usize;
    for w in sorted.windows(2) {
        if w[1] == w[0] + 1 {
            run += 1;
        } else {
            if run >= 2 {
                groups.push(run);
            }
            run = 1;
        }
    }
    if run >= 2 {
        groups.push(run);
    }
    group_label(groups)
}

/// Tailles des groupes de numéros partageant la même terminaison
/// (taille ≥ 2), croissantes, jointes par « + ».
fn tail_label(numbers: &[u8]) -> String {
    let mut counts = [0usize; 10];
    for &n in numbers {
        counts[(n % 10) as usize] += 1;
    }
    let groups: Vec<usize> = counts.iter().copied().filter(|&c| c >= 2).collect();
    group_label(groups)
}

fn group_label(mut groups: Vec<usize>) -> String {
    if groups.is_empty() {
        return "—".to_string();
    }
    groups.sort_unstable();
    groups
        .iter()
        .map(|g| g.to_string())
        .collect::<Vec<_>>()
        .join("+")
}
