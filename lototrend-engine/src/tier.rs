use std::fmt;

use serde::Serialize;

use lototrend_history::history::{DrawHistory, HistoryError};
use lototrend_history::models::Pool;

use crate::miss::{compute_status_miss, MissRow, STATUS_MISS_NEVER_DRAWN};

/// Classement d'un numéro selon son retard de statut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Hot,
    Warm,
    Cold,
}

impl Tier {
    /// Chaud : retard 0-3, tiède : 4-16, froid : 17 et plus.
    pub fn from_miss(miss: u32) -> Self {
        if miss < 4 {
            Tier::Hot
        } else if miss <= 16 {
            Tier::Warm
        } else {
            Tier::Cold
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::Hot => write!(f, "CHAUD"),
            Tier::Warm => write!(f, "TIÈDE"),
            Tier::Cold => write!(f, "FROID"),
        }
    }
}

/// Classement d'une période pour tous les numéros d'un pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TierRow {
    tiers: Vec<Tier>,
}

impl TierRow {
    pub fn value(&self, number: u8) -> Tier {
        self.tiers[(number - 1) as usize]
    }

    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }
}

/// Répartition froid:tiède:chaud des numéros sortis à une période.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TierRatio {
    pub cold: usize,
    pub warm: usize,
    pub hot: usize,
}

impl fmt::Display for TierRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.cold, self.warm, self.hot)
    }
}

/// Statut d'un numéro SORTI à la période `index` : son retard avant la
/// sortie, donc la ligne de statut de la période précédente. En première
/// période, tout numéro sorti est jugé sur le retard « jamais sorti ».
pub fn drawn_tier(status: &[MissRow], index: usize, number: u8) -> Tier {
    if index == 0 {
        return Tier::from_miss(STATUS_MISS_NEVER_DRAWN);
    }
    Tier::from_miss(status[index - 1].value(number))
}

/// Statut de chaque numéro, période par période. Un numéro sorti est jugé
/// sur la période précédente (voir `drawn_tier`) ; un numéro absent est
/// jugé sur son retard courant, sans regard en arrière.
pub fn tier_rows<'a, I>(status: &[MissRow], draws: I) -> Vec<TierRow>
where
    I: IntoIterator<Item = &'a [u8]>,
{
    draws
        .into_iter()
        .enumerate()
        .map(|(index, numbers)| {
            let row = &status[index];
            let size = row.values().len();
            let mut present = vec![false; size];
            for &n in numbers {
                let idx = (n - 1) as usize;
                if idx < size {
                    present[idx] = true;
                }
            }
            let tiers = (0..size)
                .map(|i| {
                    let number = (i + 1) as u8;
                    if present[i] {
                        drawn_tier(status, index, number)
                    } else {
                        Tier::from_miss(row.value(number))
                    }
                })
                .collect();
            TierRow { tiers }
        })
        .collect()
}

/// Répartition froid:tiède:chaud par période, comptée uniquement sur les
/// numéros sortis, chacun jugé sur la période précédente. La somme vaut
/// toujours le nombre de numéros tirés du pool.
pub fn tier_ratios<'a, I>(status: &[MissRow], draws: I) -> Vec<TierRatio>
where
    I: IntoIterator<Item = &'a [u8]>,
{
    draws
        .into_iter()
        .enumerate()
        .map(|(index, numbers)| {
            let mut ratio = TierRatio::default();
            for &n in numbers {
                match drawn_tier(status, index, n) {
                    Tier::Cold => ratio.cold += 1,
                    Tier::Warm => ratio.warm += 1,
                    Tier::Hot => ratio.hot += 1,
                }
            }
            ratio
        })
        .collect()
}

pub fn compute_tier_rows(
    history: &DrawHistory,
    pool: Pool,
) -> Result<Vec<TierRow>, HistoryError> {
    let status = compute_status_miss(history, pool)?;
    Ok(tier_rows(
        &status,
        history.draws().iter().map(|d| pool.numbers_from(d)),
    ))
}

pub fn compute_tier_ratios(
    history: &DrawHistory,
    pool: Pool,
) -> Result<Vec<TierRatio>, HistoryError> {
    let status = compute_status_miss(history, pool)?;
    Ok(tier_ratios(
        &status,
        history.draws().iter().map(|d| pool.numbers_from(d)),
    ))
}
