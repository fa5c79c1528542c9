use std::fmt;

use crate::history::HistoryError;

/// Jeux supportés : double-couleur (SSQ, 6/33 + 1/16) et grand loto (DLT, 5/35 + 2/12).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Game {
    Ssq,
    Dlt,
}

impl Game {
    pub fn pools(&self) -> [Pool; 2] {
        match self {
            Game::Ssq => [Pool::SsqRed, Pool::SsqBlue],
            Game::Dlt => [Pool::DltFront, Pool::DltBack],
        }
    }

    pub fn primary_pool(&self) -> Pool {
        self.pools()[0]
    }

    pub fn secondary_pool(&self) -> Pool {
        self.pools()[1]
    }

    pub fn code(&self) -> &'static str {
        match self {
            Game::Ssq => "ssq",
            Game::Dlt => "dlt",
        }
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Game::Ssq => write!(f, "SSQ"),
            Game::Dlt => write!(f, "DLT"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pool {
    SsqRed,
    SsqBlue,
    DltFront,
    DltBack,
}

impl Pool {
    pub fn game(&self) -> Game {
        match self {
            Pool::SsqRed | Pool::SsqBlue => Game::Ssq,
            Pool::DltFront | Pool::DltBack => Game::Dlt,
        }
    }

    /// Nombre de numéros possibles dans le pool.
    pub fn size(&self) -> u8 {
        match self {
            Pool::SsqRed => 33,
            Pool::SsqBlue => 16,
            Pool::DltFront => 35,
            Pool::DltBack => 12,
        }
    }

    /// Nombre de numéros tirés à chaque période.
    pub fn pick_count(&self) -> usize {
        match self {
            Pool::SsqRed => 6,
            Pool::SsqBlue => 1,
            Pool::DltFront => 5,
            Pool::DltBack => 2,
        }
    }

    /// Découpage en zones pour le ratio de répartition.
    pub fn zones(&self) -> &'static [(u8, u8)] {
        match self {
            Pool::SsqRed => &[(1, 11), (12, 22), (23, 33)],
            Pool::SsqBlue => &[(1, 4), (5, 8), (9, 12), (13, 16)],
            Pool::DltFront => &[(1, 12), (13, 24), (25, 35)],
            Pool::DltBack => &[(1, 4), (5, 8), (9, 12)],
        }
    }

    pub fn is_primary(&self) -> bool {
        matches!(self, Pool::SsqRed | Pool::DltFront)
    }

    pub fn numbers_from<'a>(&self, draw: &'a Draw) -> &'a [u8] {
        if self.is_primary() {
            &draw.primary
        } else {
            &draw.secondary
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Pool::SsqRed => "red",
            Pool::SsqBlue => "blue",
            Pool::DltFront => "front",
            Pool::DltBack => "back",
        }
    }

    /// Libellé affiché dans les en-têtes de tableaux.
    pub fn label(&self) -> &'static str {
        match self {
            Pool::SsqRed => "Boules rouges (1-33)",
            Pool::SsqBlue => "Boule bleue (1-16)",
            Pool::DltFront => "Zone avant (1-35)",
            Pool::DltBack => "Zone arrière (1-12)",
        }
    }
}

impl fmt::Display for Pool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pool::SsqRed => write!(f, "rouge"),
            Pool::SsqBlue => write!(f, "bleu"),
            Pool::DltFront => write!(f, "avant"),
            Pool::DltBack => write!(f, "arrière"),
        }
    }
}

/// Un tirage : une période, les numéros du pool principal et ceux du pool bonus.
/// `draw_id` est un libellé opaque (ex: "2023001"), jamais utilisé dans un calcul.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draw {
    pub draw_id: String,
    pub primary: Vec<u8>,
    pub secondary: Vec<u8>,
}

pub fn validate_draw(game: Game, draw: &Draw) -> Result<(), HistoryError> {
    for pool in game.pools() {
        let numbers = pool.numbers_from(draw);
        if numbers.len() != pool.pick_count() {
            return Err(malformed(
                draw,
                format!(
                    "{} numéros dans le pool {} au lieu de {}",
                    numbers.len(),
                    pool,
                    pool.pick_count()
                ),
            ));
        }
        for &n in numbers {
            if n < 1 || n > pool.size() {
                return Err(malformed(
                    draw,
                    format!("numéro {} hors limites (1-{}) dans le pool {}", n, pool.size(), pool),
                ));
            }
        }
        for i in 0..numbers.len() {
            for j in (i + 1)..numbers.len() {
                if numbers[i] == numbers[j] {
                    return Err(malformed(
                        draw,
                        format!("numéro en double : {}", numbers[i]),
                    ));
                }
            }
        }
    }
    Ok(())
}

fn malformed(draw: &Draw, reason: String) -> HistoryError {
    HistoryError::MalformedDraw {
        draw_id: draw.draw_id.clone(),
        reason,
    }
}
