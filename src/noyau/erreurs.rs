//! Taxonomie d’erreurs du noyau.
//!
//! Les étapes internes (jetons, RPN) parlent en `String` ; la surface publique
//! ne rend que ces types. Aucune erreur ne sort en panique.

use thiserror::Error;

/// Texte d’une fonction refusé par l’analyseur.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErreurAnalyse {
    #[error("expression vide")]
    Vide,

    #[error("symbole(s) inconnu(s) : {}", .0.join(", "))]
    SymbolesInconnus(Vec<String>),

    #[error("expression invalide : {0}")]
    Invalide(String),
}

/// L’évaluation numérique a échoué pour tout l’appel (pas un simple NaN).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("erreur d’évaluation de la fonction : {0}")]
pub struct ErreurEvaluation(pub String);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErreurResolution {
    /// f et g sont la même fonction : à afficher à part, ce n’est pas un échec.
    #[error("infinité de solutions")]
    InfiniteSolutions,

    #[error("résolution impossible : {0}")]
    Echec(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErreurIntervalle {
    #[error("borne non numérique : {0:?}")]
    NonNumerique(String),

    #[error("borne non finie")]
    NonFini,

    #[error("intervalle vide : x min ({min}) doit être < x max ({max})")]
    Vide { min: f64, max: f64 },
}

impl From<ErreurEvaluation> for ErreurResolution {
    fn from(e: ErreurEvaluation) -> Self {
        ErreurResolution::Echec(e.0)
    }
}
