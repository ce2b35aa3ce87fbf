// src/noyau/cadrage.rs
//
// Fenêtre « ajuster aux points » : rectangle qui encadre les intersections.
// - aucun point    -> None
// - un point       -> carré de demi-côté MARGE_POINT_SEUL
// - plusieurs      -> marge = MARGE_RELATIVE × étendue, axe par axe
// - axe plat (tous les x, ou tous les y, égaux) -> même marge fixe qu’un point seul

use super::reglages::{MARGE_POINT_SEUL, MARGE_RELATIVE};
use super::resolution::Intersection;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cadre {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

pub fn cadrage(points: &[Intersection]) -> Option<Cadre> {
    let (&(x0, y0), reste) = points.split_first()?;

    if reste.is_empty() {
        return Some(Cadre {
            x_min: x0 - MARGE_POINT_SEUL,
            x_max: x0 + MARGE_POINT_SEUL,
            y_min: y0 - MARGE_POINT_SEUL,
            y_max: y0 + MARGE_POINT_SEUL,
        });
    }

    let (x_min, x_max) = etendue(points.iter().map(|p| p.0));
    let (y_min, y_max) = etendue(points.iter().map(|p| p.1));
    let (x_min, x_max) = avec_marge(x_min, x_max);
    let (y_min, y_max) = avec_marge(y_min, y_max);

    Some(Cadre {
        x_min,
        x_max,
        y_min,
        y_max,
    })
}

fn etendue(valeurs: impl Iterator<Item = f64>) -> (f64, f64) {
    valeurs.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    })
}

fn avec_marge(min: f64, max: f64) -> (f64, f64) {
    let marge = if max > min {
        MARGE_RELATIVE * (max - min)
    } else {
        MARGE_POINT_SEUL
    };
    (min - marge, max + marge)
}
