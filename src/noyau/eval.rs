//! Noyau : évaluation numérique
//!
//! Expr -> code à pile (compilé une fois) -> valeurs f64 sur un tableau de x
//!
//! Remarques :
//! - Arithmétique IEEE : log(-1), 1/0, débordement donnent NaN / ±inf,
//!   ce sont des valeurs valides du tableau, pas des erreurs.
//! - Une expression constante donne un tableau de même longueur que xs.
//! - Les sous-arbres purement rationnels sont repliés à la compilation.

use log::trace;
use num_rational::BigRational;
use num_traits::{One, ToPrimitive, Zero};

use super::erreurs::ErreurEvaluation;
use super::expr::{rational_pow_int, Expr, Fonction, VARIABLE};

#[derive(Clone, Copy, Debug, PartialEq)]
enum Instr {
    Const(f64),
    X,
    Neg,
    Add,
    Sub,
    Mul,
    Div,
    PowI(i32),
    Pow,
    Appel(Fonction),
}

/// Fonction d’une variable, prête à évaluer.
#[derive(Clone, Debug)]
pub struct FonctionNumerique {
    code: Vec<Instr>,
    pile_max: usize,
}

impl FonctionNumerique {
    /// Compile l’expression. Échoue seulement sur un symbole autre que x
    /// ou une constante non représentable.
    pub fn compiler(expr: &Expr) -> Result<Self, ErreurEvaluation> {
        let mut c = Compilateur::default();
        c.emettre(expr)?;
        trace!("compilé {expr} : {} instructions", c.code.len());
        Ok(Self {
            code: c.code,
            pile_max: c.pile_max.max(1),
        })
    }

    /// Valeur en un point.
    pub fn valeur(&self, x: f64) -> f64 {
        let mut pile = Vec::with_capacity(self.pile_max);
        self.executer(x, &mut pile)
    }

    /// Valeurs sur tout le tableau (une seule pile réutilisée).
    pub fn appliquer(&self, xs: &[f64]) -> Vec<f64> {
        let mut pile = Vec::with_capacity(self.pile_max);
        xs.iter().map(|&x| self.executer(x, &mut pile)).collect()
    }

    fn executer(&self, x: f64, pile: &mut Vec<f64>) -> f64 {
        pile.clear();

        for instr in &self.code {
            match *instr {
                Instr::Const(v) => pile.push(v),
                Instr::X => pile.push(x),
                Instr::Neg | Instr::PowI(_) | Instr::Appel(_) => {
                    let a = pile.pop().unwrap_or(f64::NAN);
                    let r = match *instr {
                        Instr::Neg => -a,
                        Instr::PowI(n) => a.powi(n),
                        Instr::Appel(f) => f.appliquer(a),
                        _ => f64::NAN,
                    };
                    pile.push(r);
                }
                Instr::Add | Instr::Sub | Instr::Mul | Instr::Div | Instr::Pow => {
                    let b = pile.pop().unwrap_or(f64::NAN);
                    let a = pile.pop().unwrap_or(f64::NAN);
                    let r = match *instr {
                        Instr::Add => a + b,
                        Instr::Sub => a - b,
                        Instr::Mul => a * b,
                        Instr::Div => a / b,
                        _ => puissance_reelle(a, b),
                    };
                    pile.push(r);
                }
            }
        }

        pile.pop().unwrap_or(f64::NAN)
    }
}

/// a^b réel : base négative admise seulement pour un exposant entier
/// (x^(1/3) en x < 0 donne NaN, comme une calculatrice réelle).
fn puissance_reelle(a: f64, b: f64) -> f64 {
    if b.fract() == 0.0 && b.abs() <= i32::MAX as f64 {
        a.powi(b as i32)
    } else {
        a.powf(b)
    }
}

#[derive(Default)]
struct Compilateur {
    code: Vec<Instr>,
    pile: usize,
    pile_max: usize,
}

impl Compilateur {
    fn pousser(&mut self, i: Instr) {
        match i {
            Instr::Const(_) | Instr::X => self.pile += 1,
            Instr::Add | Instr::Sub | Instr::Mul | Instr::Div | Instr::Pow => self.pile -= 1,
            Instr::Neg | Instr::PowI(_) | Instr::Appel(_) => {}
        }
        self.pile_max = self.pile_max.max(self.pile);
        self.code.push(i);
    }

    fn constante(&mut self, r: &BigRational) -> Result<(), ErreurEvaluation> {
        let v = r
            .to_f64()
            .ok_or_else(|| ErreurEvaluation(format!("constante hors limites : {r}")))?;
        self.pousser(Instr::Const(v));
        Ok(())
    }

    /// Remplace les `n` dernières constantes émises par leur valeur combinée.
    fn replier(&mut self, n: usize, r: BigRational) -> Result<Option<BigRational>, ErreurEvaluation> {
        self.code.truncate(self.code.len() - n);
        self.pile -= n;
        self.constante(&r)?;
        Ok(Some(r))
    }

    /// Émet le code du sous-arbre, en une passe.
    /// `Some(r)` : le code émis est une seule constante, de valeur exacte r
    /// (les sous-arbres rationnels 1/3, 2^10… sont repliés au fil de l’eau).
    fn emettre(&mut self, expr: &Expr) -> Result<Option<BigRational>, ErreurEvaluation> {
        use Expr::*;

        match expr {
            Rat(r) => {
                self.constante(r)?;
                return Ok(Some(r.clone()));
            }
            Pi => self.pousser(Instr::Const(std::f64::consts::PI)),
            E => self.pousser(Instr::Const(std::f64::consts::E)),
            Var(nom) if nom == VARIABLE => self.pousser(Instr::X),
            Var(nom) => return Err(ErreurEvaluation(format!("symbole inconnu : {nom}"))),

            Neg(a) => {
                if let Some(r) = self.emettre(a)? {
                    return self.replier(1, -r);
                }
                self.pousser(Instr::Neg);
            }
            Appel(f, a) => {
                self.emettre(a)?;
                self.pousser(Instr::Appel(*f));
            }
            PowInt(a, n) => {
                if let Some(v) = self.emettre(a)?.and_then(|r| rational_pow_int(r, *n)) {
                    return self.replier(1, v);
                }
                match i32::try_from(*n) {
                    Ok(n) => self.pousser(Instr::PowI(n)),
                    Err(_) => {
                        self.pousser(Instr::Const(*n as f64));
                        self.pousser(Instr::Pow);
                    }
                }
            }

            Add(a, b) | Sub(a, b) | Mul(a, b) | Div(a, b) | Pow(a, b) => {
                let ra = self.emettre(a)?;
                let rb = self.emettre(b)?;
                if let (Some(ra), Some(rb)) = (ra, rb) {
                    if let Some(v) = combiner(expr, ra, rb) {
                        return self.replier(2, v);
                    }
                }
                let op = match expr {
                    Add(..) => Instr::Add,
                    Sub(..) => Instr::Sub,
                    Mul(..) => Instr::Mul,
                    Div(..) => Instr::Div,
                    _ => Instr::Pow,
                };
                self.pousser(op);
            }
        }

        Ok(None)
    }
}

/// Opération binaire exacte ; None si non rationnelle (division par 0, exposant non entier…).
fn combiner(op: &Expr, a: BigRational, b: BigRational) -> Option<BigRational> {
    match op {
        Expr::Add(..) => Some(a + b),
        Expr::Sub(..) => Some(a - b),
        Expr::Mul(..) => Some(a * b),
        Expr::Div(..) => (!b.is_zero()).then(|| a / b),
        Expr::Pow(..) => {
            if !b.denom().is_one() {
                return None;
            }
            rational_pow_int(a, b.numer().to_i64()?)
        }
        _ => None,
    }
}

/// API publique : évalue une fonction (optionnelle) sur un échantillon.
/// - `None` -> Ok(None) : rien à évaluer n’est pas une erreur.
/// - échantillon vide -> erreur (l’appelant valide l’intervalle avant).
pub fn evaluer(expr: Option<&Expr>, xs: &[f64]) -> Result<Option<Vec<f64>>, ErreurEvaluation> {
    let Some(expr) = expr else {
        return Ok(None);
    };
    if xs.is_empty() {
        return Err(ErreurEvaluation("aucun point à évaluer".into()));
    }
    let f = FonctionNumerique::compiler(expr)?;
    Ok(Some(f.appliquer(xs)))
}
