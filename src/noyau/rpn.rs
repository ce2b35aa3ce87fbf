// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> AST
// Objectif:
// - Convertir une suite de Tok en RPN (postfix), en refusant tout ce qui n’est pas infixe
// - Puis reconstruire Expr (sans simplifier)
//
// Règles:
// - Ident(name):
//    - si name est une fonction connue (sin, log, …) => fonction unaire, '(' obligatoire
//    - "x"/"X" => la variable ; "e"/"E" => constante d’Euler
//    - sinon => symbole (Expr::Var), refusé plus tard par l’analyseur
// - Moins unaire: Tok::Neg, priorité entre * et ^ (donc -x^2 = -(x^2), 2*-x = 2*(-x))
// - Plus unaire: ignoré
//
// NOTE:
// - Les fonctions sont traitées comme des opérateurs “collés” à leur argument
//   et sont sorties après la parenthèse fermante.

use num_bigint::BigInt;
use num_traits::{One, ToPrimitive};

use super::expr::{Expr, Fonction, VARIABLE};
use super::jetons::Tok;
use super::reglages::PROFONDEUR_MAX;

fn precedence(t: &Tok) -> i32 {
    match t {
        Tok::Plus | Tok::Minus => 1,
        Tok::Star | Tok::Slash => 2,
        Tok::Neg => 3,
        Tok::Caret => 4,
        _ => 0,
    }
}

fn is_right_associative(t: &Tok) -> bool {
    matches!(t, Tok::Caret | Tok::Neg)
}

/// Identificateurs reconnus comme fonctions (unaire).
fn is_fonction_ident(name: &str) -> bool {
    Fonction::depuis_nom(name).is_some()
}

/// Vrai si `top` (sommet de pile) bloque le dépilement : '(' ou fonction.
fn bloque_depilement(top: &Tok) -> bool {
    match top {
        Tok::LPar => true,
        Tok::Ident(name) => is_fonction_ident(name.as_str()),
        _ => false,
    }
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Ident("sin"), LPar, Pi, Slash, Num(2), RPar]
///   rpn:    [Pi, Num(2), Slash, Ident("sin")]
pub fn to_rpn(tokens: &[Tok]) -> Result<Vec<Tok>, String> {
    let mut out: Vec<Tok> = Vec::new();
    let mut ops: Vec<Tok> = Vec::new();

    // “valeur” = un atome ou une expression fermée.
    // Sert à détecter les opérateurs unaires et les opérandes manquants.
    let mut prev_was_value = false;

    // Après un nom de fonction, seul '(' est admis.
    let mut attend_parenthese = false;

    for tok in tokens.iter().cloned() {
        if attend_parenthese && tok != Tok::LPar {
            return Err("fonction sans parenthèses".into());
        }
        attend_parenthese = false;

        match tok {
            Tok::Num(_) | Tok::Pi => {
                if prev_was_value {
                    return Err("opérateur manquant".into());
                }
                out.push(tok);
                prev_was_value = true;
            }

            Tok::Ident(name) => {
                if prev_was_value {
                    return Err("opérateur manquant".into());
                }
                if is_fonction_ident(&name) {
                    // fonction : on la garde sur la pile (elle sortira après son argument)
                    ops.push(Tok::Ident(name));
                    attend_parenthese = true;
                    prev_was_value = false;
                } else {
                    // variable/atome : sortie directe
                    out.push(Tok::Ident(name));
                    prev_was_value = true;
                }
            }

            Tok::LPar => {
                if prev_was_value {
                    return Err("opérateur manquant avant '('".into());
                }
                ops.push(tok);
                prev_was_value = false;
            }

            Tok::RPar => {
                if !prev_was_value {
                    return Err("opérande manquant avant ')'".into());
                }

                // dépile jusqu’à '('
                let mut ouvrante = false;
                while let Some(top) = ops.pop() {
                    if matches!(top, Tok::LPar) {
                        ouvrante = true;
                        break;
                    }
                    out.push(top);
                }
                if !ouvrante {
                    return Err("parenthèse fermante en trop".into());
                }

                // si une fonction est au sommet, on la sort aussi
                if let Some(Tok::Ident(name)) = ops.last() {
                    if is_fonction_ident(name.as_str()) {
                        if let Some(f) = ops.pop() {
                            out.push(f);
                        }
                    }
                }

                prev_was_value = true;
            }

            Tok::Plus | Tok::Minus if !prev_was_value => {
                // unaire : '+' ne fait rien, '-' devient Neg (préfixe, ne dépile rien)
                if tok == Tok::Minus {
                    ops.push(Tok::Neg);
                }
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Caret => {
                if !prev_was_value {
                    return Err("opérande manquant".into());
                }

                // dépile tant que:
                // - on n'est pas bloqué par '(' ou par une fonction
                // - et la précédence/associativité exige de sortir l'opérateur du haut
                while let Some(top) = ops.last() {
                    if bloque_depilement(top) {
                        break;
                    }

                    let p_top = precedence(top);
                    let p_tok = precedence(&tok);

                    let doit_pop = if is_right_associative(&tok) {
                        p_top > p_tok
                    } else {
                        p_top >= p_tok
                    };

                    if !doit_pop {
                        break;
                    }
                    if let Some(op) = ops.pop() {
                        out.push(op);
                    }
                }

                ops.push(tok);
                prev_was_value = false;
            }

            Tok::Neg => return Err("jeton inattendu".into()),
        }
    }

    if attend_parenthese {
        return Err("fonction sans parenthèses".into());
    }
    if !prev_was_value {
        return Err("expression incomplète".into());
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        if matches!(op, Tok::LPar) {
            return Err("parenthèses non fermées".into());
        }
        out.push(op);
    }

    Ok(out)
}

/// Construit une Expr à partir d’une RPN, sans rien simplifier.
///
/// - Ident(name):
///     - fonction connue => Expr::Appel
///     - x / X => Expr::Var("x") ; e / E => Expr::E
///     - sinon => Expr::Var(name) tel que tapé
/// - Caret: exposant entier littéral => PowInt, sinon Pow
///
/// La profondeur est suivie pendant la construction : au-delà de PROFONDEUR_MAX
/// l’arbre n’est jamais construit (les parcours récursifs restent bornés).
pub fn from_rpn(rpn: &[Tok]) -> Result<Expr, String> {
    // (sous-arbre, profondeur)
    let mut st: Vec<(Expr, usize)> = Vec::new();

    let noeud = |e: Expr, prof: usize| -> Result<(Expr, usize), String> {
        if prof > PROFONDEUR_MAX {
            return Err("expression trop imbriquée".into());
        }
        Ok((e, prof))
    };

    for tok in rpn.iter().cloned() {
        match tok {
            Tok::Num(r) => st.push((Expr::Rat(r), 1)),
            Tok::Pi => st.push((Expr::Pi, 1)),

            Tok::Neg => {
                let (a, pa) = st.pop().ok_or("moins sans opérande")?;
                st.push(noeud(Expr::Neg(Box::new(a)), pa + 1)?);
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Caret => {
                let (b, pb) = st.pop().ok_or("expression invalide")?;
                let (a, pa) = st.pop().ok_or("expression invalide")?;

                let e = match tok {
                    Tok::Plus => Expr::Add(Box::new(a), Box::new(b)),
                    Tok::Minus => Expr::Sub(Box::new(a), Box::new(b)),
                    Tok::Star => Expr::Mul(Box::new(a), Box::new(b)),
                    Tok::Slash => Expr::Div(Box::new(a), Box::new(b)),
                    _ => match exposant_entier(&b) {
                        Some(n) => Expr::PowInt(Box::new(a), n),
                        None => Expr::Pow(Box::new(a), Box::new(b)),
                    },
                };

                st.push(noeud(e, pa.max(pb) + 1)?);
            }

            Tok::Ident(name) => {
                if let Some(f) = Fonction::depuis_nom(&name) {
                    let (x, px) = st.pop().ok_or("fonction sans argument")?;
                    st.push(noeud(Expr::Appel(f, Box::new(x)), px + 1)?);
                } else if name.eq_ignore_ascii_case(VARIABLE) {
                    st.push((Expr::Var(VARIABLE.to_string()), 1));
                } else if name.eq_ignore_ascii_case("e") {
                    st.push((Expr::E, 1));
                } else {
                    st.push((Expr::Var(name), 1));
                }
            }

            Tok::LPar | Tok::RPar => return Err("parenthèse inattendue en RPN".into()),
        }
    }

    if st.len() != 1 {
        return Err("expression invalide".into());
    }
    st.pop()
        .map(|(e, _)| e)
        .ok_or_else(|| "expression invalide".into())
}

/// Exposant littéral entier (ex: x^2) ; None pour x^(-1), x^0.5, x^y…
fn exposant_entier(b: &Expr) -> Option<i64> {
    match b {
        Expr::Rat(r) if r.denom().is_one() => big_to_i64(r.numer()),
        _ => None,
    }
}

/// Conversion SAFE vers i64 (None si trop grand).
fn big_to_i64(x: &BigInt) -> Option<i64> {
    x.to_i64()
}
