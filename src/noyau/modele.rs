//! Modèle : les deux créneaux f / g + les dernières intersections.
//!
//! Seule porte d’entrée de la couche présentation : textes et tableaux de f64
//! en entrée, tableaux / listes / erreurs typées en sortie.
//! Pas de verrou : une instance appartient à un seul fil.

use log::debug;

use super::analyse::analyser;
use super::cadrage::{cadrage, Cadre};
use super::erreurs::{ErreurAnalyse, ErreurEvaluation, ErreurResolution};
use super::eval::evaluer;
use super::expr::Expr;
use super::reglages::{Precision, Reglages};
use super::resolution::{resoudre, Intersection, Resolution};

#[derive(Clone, Debug, Default)]
pub struct ModeleFonctions {
    fx: Option<Expr>,
    gx: Option<Expr>,
    intersections: Vec<Intersection>,
    precision: Precision,
}

impl ModeleFonctions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn precision(&self) -> Precision {
        self.precision
    }

    pub fn set_precision(&mut self, precision: Precision) {
        self.precision = precision;
    }

    pub fn reglages(&self) -> Reglages {
        Reglages::pour(self.precision)
    }

    pub fn fx(&self) -> Option<&Expr> {
        self.fx.as_ref()
    }

    pub fn gx(&self) -> Option<&Expr> {
        self.gx.as_ref()
    }

    /// Remplace f. `None` vide le créneau ; en cas d’erreur, f reste inchangée.
    pub fn set_f(&mut self, texte: Option<&str>) -> Result<(), ErreurAnalyse> {
        self.fx = analyser(texte)?;
        debug!("f = {:?}", self.fx.as_ref().map(|e| e.to_string()));
        Ok(())
    }

    /// Remplace g. Mêmes règles que `set_f`.
    pub fn set_g(&mut self, texte: Option<&str>) -> Result<(), ErreurAnalyse> {
        self.gx = analyser(texte)?;
        debug!("g = {:?}", self.gx.as_ref().map(|e| e.to_string()));
        Ok(())
    }

    pub fn evaluer_f(&self, xs: &[f64]) -> Result<Option<Vec<f64>>, ErreurEvaluation> {
        evaluer(self.fx.as_ref(), xs)
    }

    pub fn evaluer_g(&self, xs: &[f64]) -> Result<Option<Vec<f64>>, ErreurEvaluation> {
        evaluer(self.gx.as_ref(), xs)
    }

    /// Résout f = g sur [min(xs), max(xs)] et mémorise la liste pour `cadrage`.
    /// Une erreur (y compris l’infinité de solutions) vide la liste mémorisée.
    pub fn resoudre(&mut self, xs: &[f64]) -> Result<Vec<Intersection>, ErreurResolution> {
        self.resoudre_detail(xs).map(|r| r.intersections)
    }

    /// Comme `resoudre`, avec la stratégie suivie (exacte ou numérique).
    pub fn resoudre_detail(&mut self, xs: &[f64]) -> Result<Resolution, ErreurResolution> {
        self.intersections.clear();
        let r = resoudre(self.fx.as_ref(), self.gx.as_ref(), xs, &self.reglages())?;
        self.intersections = r.intersections.clone();
        Ok(r)
    }

    pub fn intersections(&self) -> &[Intersection] {
        &self.intersections
    }

    /// Fenêtre encadrant les dernières intersections (None si aucune).
    pub fn cadrage(&self) -> Option<Cadre> {
        cadrage(&self.intersections)
    }

    /// Vide f, g et les intersections (la précision choisie est gardée).
    pub fn reset(&mut self) {
        self.fx = None;
        self.gx = None;
        self.intersections.clear();
    }
}
