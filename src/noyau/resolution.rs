//! Noyau : intersections de f et g sur un intervalle
//!
//! Politique (dans l’ordre) :
//! 1. f ou g absente          -> aucune intersection, pas d’erreur
//! 2. f ≡ g (même arbre)      -> InfiniteSolutions (avant tout contrôle d’intervalle)
//! 3. exact : f - g polynôme sur ℚ -> racines réelles exactes, filtrées sur [min-ε, max+ε]
//!    (f - g identiquement nul -> InfiniteSolutions)
//! 4. sinon balayage : changements de signe de h = f - g, puis bissection
//! 5. échec des deux -> ErreurResolution::Echec
//!
//! « Aucune racine » est un succès (liste vide).

use log::{debug, info, warn};

use super::erreurs::ErreurResolution;
use super::eval::FonctionNumerique;
use super::expr::Expr;
use super::poly::{racines_reelles, Polynome, RacinesExactes};
use super::reglages::{Reglages, EPSILON_BORD, RESOLUTION_MAX};

/// Point (x, y) où f(x) = g(x).
pub type Intersection = (f64, f64);

/// Chemin effectivement suivi (drapeau de capacité).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategie {
    /// Rien à résoudre (f ou g absente).
    Aucune,
    /// Racines exactes d’un polynôme sur ℚ.
    Symbolique,
    /// Changements de signe + bissection.
    Numerique,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Resolution {
    /// Triées par x croissant, sans doublon.
    pub intersections: Vec<Intersection>,
    pub strategie: Strategie,
}

impl Resolution {
    fn vide() -> Self {
        Self {
            intersections: Vec::new(),
            strategie: Strategie::Aucune,
        }
    }
}

/// API publique : toutes les solutions réelles de f(x) = g(x) dans [min(xs), max(xs)].
pub fn resoudre(
    fx: Option<&Expr>,
    gx: Option<&Expr>,
    xs: &[f64],
    reglages: &Reglages,
) -> Result<Resolution, ErreurResolution> {
    let (Some(fx), Some(gx)) = (fx, gx) else {
        return Ok(Resolution::vide());
    };

    if fx == gx {
        debug!("f et g identiques : infinité de solutions");
        return Err(ErreurResolution::InfiniteSolutions);
    }

    let (min, max) = bornes(xs)?;
    let f = FonctionNumerique::compiler(fx)?;
    let g = FonctionNumerique::compiler(gx)?;

    let h = Expr::Sub(Box::new(fx.clone()), Box::new(gx.clone()));
    let resolution = match Polynome::depuis_expr(&h).and_then(|p| racines_reelles(&p)) {
        Some(RacinesExactes::Toutes) => {
            debug!("f - g identiquement nul : infinité de solutions");
            return Err(ErreurResolution::InfiniteSolutions);
        }
        Some(RacinesExactes::Liste(racines)) => {
            debug!("résolution exacte : {} racine(s) réelle(s)", racines.len());
            Resolution {
                intersections: retenir(racines, min, max, &g, 0.0),
                strategie: Strategie::Symbolique,
            }
        }
        None => {
            debug!("{h} hors du cadre exact : balayage numérique");
            let racines = balayage(&f, &g, xs, min, max, reglages);
            Resolution {
                intersections: retenir(racines, min, max, &f, 2.0 * reglages.tolerance),
                strategie: Strategie::Numerique,
            }
        }
    };

    info!(
        "{} intersection(s) sur [{min}, {max}] ({:?})",
        resolution.intersections.len(),
        resolution.strategie
    );
    Ok(resolution)
}

/// min / max de l’échantillon ; refuse un échantillon vide ou non fini.
fn bornes(xs: &[f64]) -> Result<(f64, f64), ErreurResolution> {
    if xs.is_empty() {
        return Err(ErreurResolution::Echec("aucun point dans l’intervalle".into()));
    }
    if xs.iter().any(|x| !x.is_finite()) {
        return Err(ErreurResolution::Echec("intervalle non fini".into()));
    }
    let min = xs.iter().copied().fold(f64::INFINITY, f64::min);
    let max = xs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    Ok((min, max))
}

/// Filtre intervalle (± ε) + y fini, tri par x, dédoublonnage à `ecart` près.
/// Chemin exact : ecart = 0 (deux racines distinctes ne fusionnent jamais).
fn retenir(
    racines: Vec<f64>,
    min: f64,
    max: f64,
    y_de: &FonctionNumerique,
    ecart: f64,
) -> Vec<Intersection> {
    let mut out: Vec<Intersection> = racines
        .into_iter()
        .filter(|x| *x >= min - EPSILON_BORD && *x <= max + EPSILON_BORD)
        .map(|x| (x, y_de.valeur(x)))
        .filter(|(_, y)| y.is_finite())
        .collect();

    out.sort_by(|a, b| a.0.total_cmp(&b.0));
    out.dedup_by(|b, a| (b.0 - a.0).abs() <= ecart);
    out
}

/// Grille du balayage : xs tel quel s’il est assez dense, sinon ré-échantillonnage régulier.
fn grille(xs: &[f64], min: f64, max: f64, reglages: &Reglages) -> Vec<f64> {
    if min == max {
        return vec![min];
    }

    let voulu = reglages.points_balayage.min(RESOLUTION_MAX);
    if xs.len() >= voulu && xs.len() <= RESOLUTION_MAX {
        let mut g = xs.to_vec();
        g.sort_by(|a, b| a.total_cmp(b));
        g.dedup();
        return g;
    }

    let pas = (max - min) / (voulu - 1) as f64;
    let mut g: Vec<f64> = (0..voulu).map(|i| min + pas * i as f64).collect();
    if let Some(dernier) = g.last_mut() {
        *dernier = max;
    }
    g
}

/// Changements de signe de h = f - g sur la grille, affinés par bissection.
fn balayage(
    f: &FonctionNumerique,
    g: &FonctionNumerique,
    xs: &[f64],
    min: f64,
    max: f64,
    reglages: &Reglages,
) -> Vec<f64> {
    let h = |x: f64| f.valeur(x) - g.valeur(x);

    let grille = grille(xs, min, max, reglages);
    let valeurs: Vec<f64> = grille.iter().map(|&x| h(x)).collect();

    let mut racines = Vec::new();
    for (i, (&x, &hx)) in grille.iter().zip(&valeurs).enumerate() {
        if hx == 0.0 {
            racines.push(x);
            continue;
        }

        let (Some(&x2), Some(&hx2)) = (grille.get(i + 1), valeurs.get(i + 1)) else {
            continue;
        };
        if !hx.is_finite() || !hx2.is_finite() || hx2 == 0.0 || hx.signum() == hx2.signum() {
            continue;
        }

        match bissection(&h, x, x2, hx, reglages) {
            Some(r) => {
                // pôle ou saut : |h| dépasse ses deux valeurs aux bords du crochet
                let hr = h(r).abs();
                if hr.is_finite() && hr <= hx.abs().max(hx2.abs()) {
                    racines.push(r);
                } else {
                    warn!("changement de signe sans racine près de x = {r} (discontinuité)");
                }
            }
            None => debug!("bissection abandonnée sur [{x}, {x2}]"),
        }
    }
    racines
}

/// Bissection sur [a, b] avec h(a) = ha, signe(h(a)) ≠ signe(h(b)).
/// None si h devient NaN en route.
fn bissection(h: &impl Fn(f64) -> f64, a: f64, b: f64, ha: f64, reglages: &Reglages) -> Option<f64> {
    let (mut lo, mut hi, mut hlo) = (a, b, ha);

    for _ in 0..reglages.iterations_max {
        let mid = 0.5 * (lo + hi);
        if hi - lo <= reglages.tolerance || mid <= lo || mid >= hi {
            return Some(mid);
        }

        let hm = h(mid);
        if hm.is_nan() {
            return None;
        }
        if hm == 0.0 {
            return Some(mid);
        }

        if hm.signum() == hlo.signum() {
            lo = mid;
            hlo = hm;
        } else {
            hi = mid;
        }
    }

    Some(0.5 * (lo + hi))
}
