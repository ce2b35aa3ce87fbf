// src/noyau/intervalle.rs
//
// Intervalle d’étude [x min, x max] : validé une fois, avant tout tracé / résolution.

use super::erreurs::ErreurIntervalle;
use super::reglages::{X_MAX_DEFAUT, X_MIN_DEFAUT};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Intervalle {
    pub min: f64,
    pub max: f64,
}

impl Default for Intervalle {
    fn default() -> Self {
        Self {
            min: X_MIN_DEFAUT,
            max: X_MAX_DEFAUT,
        }
    }
}

impl Intervalle {
    /// Bornes finies et min < max, sinon RangeError.
    pub fn new(min: f64, max: f64) -> Result<Self, ErreurIntervalle> {
        if !min.is_finite() || !max.is_finite() {
            return Err(ErreurIntervalle::NonFini);
        }
        if min >= max {
            return Err(ErreurIntervalle::Vide { min, max });
        }
        Ok(Self { min, max })
    }

    /// Bornes tapées dans les champs. Virgule décimale acceptée ("1,5").
    pub fn depuis_texte(min: &str, max: &str) -> Result<Self, ErreurIntervalle> {
        Self::new(lire_borne(min)?, lire_borne(max)?)
    }

    /// `n` points régulièrement espacés, extrémités comprises (n ≥ 2).
    pub fn echantillons(&self, n: usize) -> Vec<f64> {
        let n = n.max(2);
        let pas = (self.max - self.min) / (n - 1) as f64;

        let mut xs: Vec<f64> = (0..n).map(|i| self.min + pas * i as f64).collect();
        // dernier point exact (pas d’accumulation d’arrondi)
        if let Some(dernier) = xs.last_mut() {
            *dernier = self.max;
        }
        xs
    }
}

fn lire_borne(texte: &str) -> Result<f64, ErreurIntervalle> {
    let t = texte.trim().replace(',', ".");
    let v: f64 = t
        .parse()
        .map_err(|_| ErreurIntervalle::NonNumerique(texte.trim().to_string()))?;
    if !v.is_finite() {
        return Err(ErreurIntervalle::NonFini);
    }
    Ok(v)
}
