// src/noyau/expr.rs
//
// AST d’une fonction d’une variable.
// - Rat : rationnel exact (les décimaux tapés restent exacts : 0.1 = 1/10)
// - Pi, E : constantes nommées (ne comptent pas comme symboles libres)
// - Var : "x" (normalisé) ou un symbole inconnu, gardé tel que tapé
//
// IMPORTANT:
// - Aucune simplification à la construction : la forme tapée est conservée,
//   l’égalité structurelle (PartialEq) sert à détecter f ≡ g.
// - L’AST est immuable : on le remplace en bloc, on ne le modifie jamais.
// - Profondeur bornée par l’analyseur (reglages::PROFONDEUR_MAX) : les parcours
//   récursifs (Display, valeur_rationnelle, Drop, PartialEq) restent sûrs.

use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};

use std::collections::BTreeSet;
use std::fmt;

/// Nom de l’unique variable libre admise.
pub const VARIABLE: &str = "x";

/// Fonctions unaires reconnues par l’analyseur.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fonction {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
    Exp,
    Ln, // "log" et "ln" : logarithme naturel
    Log10,
    Sqrt,
    Abs,
}

impl Fonction {
    /// Identificateur -> fonction (insensible à la casse).
    pub fn depuis_nom(nom: &str) -> Option<Fonction> {
        use Fonction::*;

        let f = match nom.to_ascii_lowercase().as_str() {
            "sin" => Sin,
            "cos" => Cos,
            "tan" => Tan,
            "asin" | "arcsin" => Asin,
            "acos" | "arccos" => Acos,
            "atan" | "arctan" => Atan,
            "sinh" => Sinh,
            "cosh" => Cosh,
            "tanh" => Tanh,
            "exp" => Exp,
            "log" | "ln" => Ln,
            "log10" => Log10,
            "sqrt" => Sqrt,
            "abs" => Abs,
            _ => return None,
        };
        Some(f)
    }

    pub fn nom(self) -> &'static str {
        use Fonction::*;

        match self {
            Sin => "sin",
            Cos => "cos",
            Tan => "tan",
            Asin => "asin",
            Acos => "acos",
            Atan => "atan",
            Sinh => "sinh",
            Cosh => "cosh",
            Tanh => "tanh",
            Exp => "exp",
            Ln => "log",
            Log10 => "log10",
            Sqrt => "sqrt",
            Abs => "abs",
        }
    }

    /// Arithmétique réelle IEEE : hors domaine => NaN, jamais de panique.
    pub fn appliquer(self, v: f64) -> f64 {
        use Fonction::*;

        match self {
            Sin => v.sin(),
            Cos => v.cos(),
            Tan => v.tan(),
            Asin => v.asin(),
            Acos => v.acos(),
            Atan => v.atan(),
            Sinh => v.sinh(),
            Cosh => v.cosh(),
            Tanh => v.tanh(),
            Exp => v.exp(),
            Ln => v.ln(),
            Log10 => v.log10(),
            Sqrt => v.sqrt(),
            Abs => v.abs(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expr {
    Rat(BigRational),
    Pi,
    E,

    Var(String),

    Neg(Box<Expr>),

    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),

    PowInt(Box<Expr>, i64),     // x^n (n entier littéral)
    Pow(Box<Expr>, Box<Expr>),  // x^y (tout le reste)
    Appel(Fonction, Box<Expr>), // sin(x), log(x)…
}

impl Expr {
    /// Ensemble des symboles libres (x compris). Ordre stable pour les messages.
    pub fn symboles_libres(&self) -> BTreeSet<String> {
        use Expr::*;

        let mut out = BTreeSet::new();
        let mut pile: Vec<&Expr> = Vec::with_capacity(64);
        pile.push(self);

        while let Some(e) = pile.pop() {
            match e {
                Var(nom) => {
                    out.insert(nom.clone());
                }
                Rat(_) | Pi | E => {}
                Neg(a) | PowInt(a, _) | Appel(_, a) => pile.push(a.as_ref()),
                Add(a, b) | Sub(a, b) | Mul(a, b) | Div(a, b) | Pow(a, b) => {
                    pile.push(a.as_ref());
                    pile.push(b.as_ref());
                }
            }
        }

        out
    }

    /// Symboles libres autres que x (ce que l’analyseur refuse).
    pub fn symboles_inconnus(&self) -> Vec<String> {
        self.symboles_libres()
            .into_iter()
            .filter(|s| s != VARIABLE)
            .collect()
    }

    /// Vrai si l’expression ne dépend pas de x.
    pub fn est_constante(&self) -> bool {
        self.symboles_libres().is_empty()
    }

    /// Valeur rationnelle exacte si l’expression n’est faite que de rationnels
    /// (+ - * / puissances entières). None sinon (π, e, fonctions, x, division par 0).
    pub fn valeur_rationnelle(&self) -> Option<BigRational> {
        use Expr::*;

        match self {
            Rat(r) => Some(r.clone()),
            Neg(a) => Some(-a.valeur_rationnelle()?),
            Add(a, b) => Some(a.valeur_rationnelle()? + b.valeur_rationnelle()?),
            Sub(a, b) => Some(a.valeur_rationnelle()? - b.valeur_rationnelle()?),
            Mul(a, b) => Some(a.valeur_rationnelle()? * b.valeur_rationnelle()?),
            Div(a, b) => {
                let d = b.valeur_rationnelle()?;
                if d.is_zero() {
                    return None;
                }
                Some(a.valeur_rationnelle()? / d)
            }
            PowInt(a, n) => rational_pow_int(a.valeur_rationnelle()?, *n),
            Pow(a, b) => {
                let n = b.valeur_rationnelle()?;
                if !n.denom().is_one() {
                    return None;
                }
                rational_pow_int(a.valeur_rationnelle()?, n.numer().to_i64()?)
            }
            Pi | E | Var(_) | Appel(..) => None,
        }
    }
}

/// Garde-fou : au-delà, on refuse l’exact (taille des entiers).
const EXPOSANT_EXACT_MAX: i64 = 256;

/// b^n exact (n négatif accepté si b ≠ 0). None si trop grand ou 0^(-n).
pub fn rational_pow_int(base: BigRational, exp: i64) -> Option<BigRational> {
    if exp.unsigned_abs() > EXPOSANT_EXACT_MAX.unsigned_abs() {
        return None;
    }
    if exp == 0 {
        return Some(BigRational::one());
    }
    if exp < 0 {
        if base.is_zero() {
            return None;
        }
        let pos = rational_pow_int(base, -exp)?;
        return Some(BigRational::one() / pos);
    }

    let mut e = exp as u64;
    let mut acc = BigRational::one();
    let mut b = base;

    while e > 0 {
        if (e & 1) == 1 {
            acc *= b.clone();
        }
        e >>= 1;
        if e > 0 {
            b *= b.clone();
        }
    }
    Some(acc)
}

/* ------------------------ Affichage (journal) ------------------------ */

fn fmt_rat(r: &BigRational, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if r.denom().is_one() {
        if r.is_negative() {
            write!(f, "({})", r.numer())
        } else {
            write!(f, "{}", r.numer())
        }
    } else {
        write!(f, "({}/{})", r.numer(), r.denom())
    }
}

// Forme entièrement parenthésée : lisible dans les journaux, pas une “jolie” forme.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Expr::*;

        match self {
            Rat(r) => fmt_rat(r, f),
            Pi => write!(f, "pi"),
            E => write!(f, "e"),
            Var(nom) => write!(f, "{nom}"),
            Neg(a) => write!(f, "(-{a})"),
            Add(a, b) => write!(f, "({a} + {b})"),
            Sub(a, b) => write!(f, "({a} - {b})"),
            Mul(a, b) => write!(f, "({a} * {b})"),
            Div(a, b) => write!(f, "({a} / {b})"),
            PowInt(a, n) => write!(f, "{a}^{n}"),
            Pow(a, b) => write!(f, "{a}^{b}"),
            Appel(g, a) => write!(f, "{}({a})", g.nom()),
        }
    }
}
