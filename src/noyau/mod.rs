//! Noyau du traceur (aucune dépendance UI)
//!
//! Organisation interne :
//! - jetons.rs     : tokenisation
//! - rpn.rs        : shunting-yard + construction Expr
//! - expr.rs       : AST immuable + symboles libres + fonctions reconnues
//! - analyse.rs    : texte -> Expr validée (seul x libre)
//! - eval.rs       : Expr -> fonction numérique vectorisée
//! - poly.rs       : polynômes exacts sur ℚ + racines réelles
//! - resolution.rs : intersections f = g (exact puis balayage)
//! - cadrage.rs    : fenêtre « ajuster aux points »
//! - intervalle.rs : bornes x min / x max + échantillons
//! - reglages.rs   : constantes + précision basse/moyenne/haute
//! - erreurs.rs    : erreurs typées
//! - modele.rs     : agrégat f / g / intersections

pub mod analyse;
pub mod cadrage;
pub mod erreurs;
pub mod eval;
pub mod expr;
pub mod intervalle;
pub mod jetons;
pub mod modele;
pub mod poly;
pub mod reglages;
pub mod resolution;
pub mod rpn;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use cadrage::Cadre;
pub use erreurs::{ErreurAnalyse, ErreurEvaluation, ErreurIntervalle, ErreurResolution};
pub use intervalle::Intervalle;
pub use modele::ModeleFonctions;
pub use reglages::Precision;
pub use resolution::{Intersection, Strategie};
