//! Noyau : analyse d’une fonction tapée par l’utilisateur
//!
//! texte -> jetons -> RPN -> Expr -> contrôle des symboles libres
//!
//! Contrat :
//! - `None` : « vider le créneau », pas une erreur.
//! - Texte vide ou blanc : `ErreurAnalyse::Vide`.
//! - Aucune simplification : l’arbre garde la forme tapée.
//! - Seul `x` (ou `X`) peut rester libre ; `e`, `E`, `pi`, `π` sont des constantes.

use log::debug;

use super::erreurs::ErreurAnalyse;
use super::expr::{Expr, Fonction, VARIABLE};
use super::jetons::{format_tokens, tokenize, Tok};
use super::reglages::JETONS_MAX;
use super::rpn::{from_rpn, to_rpn};

/// API publique : texte optionnel -> expression validée (ou rien).
pub fn analyser(texte: Option<&str>) -> Result<Option<Expr>, ErreurAnalyse> {
    match texte {
        None => Ok(None),
        Some(t) => analyser_texte(t).map(Some),
    }
}

/// Variante non optionnelle : un texte doit donner une expression.
pub fn analyser_texte(texte: &str) -> Result<Expr, ErreurAnalyse> {
    let s = texte.trim();
    if s.is_empty() {
        return Err(ErreurAnalyse::Vide);
    }

    let jetons = tokenize(s).map_err(ErreurAnalyse::Invalide)?;
    if jetons.len() > JETONS_MAX {
        return Err(ErreurAnalyse::Invalide("expression trop longue".into()));
    }
    verifier_appels(&jetons)?;

    let rpn = to_rpn(&jetons).map_err(ErreurAnalyse::Invalide)?;
    debug!("analyse {s:?} : rpn = {}", format_tokens(&rpn));

    let expr = from_rpn(&rpn).map_err(ErreurAnalyse::Invalide)?;

    let inconnus = expr.symboles_inconnus();
    if !inconnus.is_empty() {
        return Err(ErreurAnalyse::SymbolesInconnus(inconnus));
    }

    Ok(expr)
}

/// Un identificateur suivi de '(' doit être une fonction connue.
/// (sinon le message “opérateur manquant” du RPN serait trompeur)
fn verifier_appels(jetons: &[Tok]) -> Result<(), ErreurAnalyse> {
    for paire in jetons.windows(2) {
        let nom = match paire {
            [Tok::Pi, Tok::LPar] => "pi",
            [Tok::Ident(nom), Tok::LPar] => nom.as_str(),
            _ => continue,
        };
        if Fonction::depuis_nom(nom).is_some() {
            continue;
        }
        let constante = nom == "pi"
            || nom.eq_ignore_ascii_case(VARIABLE)
            || nom.eq_ignore_ascii_case("e");
        let detail = if constante {
            format!("{nom} n’est pas une fonction (écrire {nom}*(…))")
        } else {
            format!("fonction inconnue : {nom}")
        };
        return Err(ErreurAnalyse::Invalide(detail));
    }
    Ok(())
}
