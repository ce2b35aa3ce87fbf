// src/noyau/poly.rs
//
// Polynômes exacts sur ℚ (coefficients BigRational, degré croissant).
// - Extraction depuis Expr : + - * /constante, puissances entières, x, rationnels
// - Racines réelles exactes :
//     degré ≤ 2 en forme close (discriminant, carré parfait => rationnel)
//     degré > 2 : racines rationnelles (théorème des racines rationnelles) + déflation
//
// Tout ce qui sort de ce cadre (π, e, sin, 1/x, cubique irréductible…) rend None :
// l’appelant passe alors au balayage numérique.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};

use super::expr::{rational_pow_int, Expr, VARIABLE};
use super::reglages::{CANDIDATS_MAX, DEGRE_EXACT_MAX, DIVISEURS_BORNE};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Polynome {
    // coeffs[i] = coefficient de x^i ; jamais de zéro en tête ; vide = polynôme nul
    coeffs: Vec<BigRational>,
}

impl Polynome {
    pub fn new(mut coeffs: Vec<BigRational>) -> Self {
        while coeffs.last().is_some_and(|c| c.is_zero()) {
            coeffs.pop();
        }
        Self { coeffs }
    }

    pub fn nul() -> Self {
        Self { coeffs: Vec::new() }
    }

    pub fn constante(c: BigRational) -> Self {
        Self::new(vec![c])
    }

    pub fn x() -> Self {
        Self::new(vec![BigRational::zero(), BigRational::one()])
    }

    pub fn est_nul(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// Degré ; None pour le polynôme nul.
    pub fn degre(&self) -> Option<usize> {
        self.coeffs.len().checked_sub(1)
    }

    pub fn coeffs(&self) -> &[BigRational] {
        &self.coeffs
    }

    fn coeff(&self, i: usize) -> BigRational {
        self.coeffs.get(i).cloned().unwrap_or_else(BigRational::zero)
    }

    /// Constante si degré ≤ 0.
    fn comme_constante(&self) -> Option<BigRational> {
        match self.degre() {
            None => Some(BigRational::zero()),
            Some(0) => Some(self.coeffs[0].clone()),
            _ => None,
        }
    }

    fn add(&self, o: &Polynome) -> Polynome {
        let n = self.coeffs.len().max(o.coeffs.len());
        Polynome::new((0..n).map(|i| self.coeff(i) + o.coeff(i)).collect())
    }

    fn neg(&self) -> Polynome {
        Polynome::new(self.coeffs.iter().map(|c| -c.clone()).collect())
    }

    fn sub(&self, o: &Polynome) -> Polynome {
        self.add(&o.neg())
    }

    fn echelle(&self, k: &BigRational) -> Polynome {
        Polynome::new(self.coeffs.iter().map(|c| c * k).collect())
    }

    /// Produit ; None si le degré dépasse DEGRE_EXACT_MAX.
    fn mul(&self, o: &Polynome) -> Option<Polynome> {
        let (Some(da), Some(db)) = (self.degre(), o.degre()) else {
            return Some(Polynome::nul());
        };
        if da + db > DEGRE_EXACT_MAX {
            return None;
        }

        let mut out = vec![BigRational::zero(); da + db + 1];
        for (i, a) in self.coeffs.iter().enumerate() {
            if a.is_zero() {
                continue;
            }
            for (j, b) in o.coeffs.iter().enumerate() {
                out[i + j] += a * b;
            }
        }
        Some(Polynome::new(out))
    }

    fn puissance(&self, n: u32) -> Option<Polynome> {
        let d = match self.degre() {
            // base constante : exposant plafonné comme tout repli exact (2^60000 -> None)
            None | Some(0) => {
                return rational_pow_int(self.comme_constante()?, i64::from(n))
                    .map(Polynome::constante);
            }
            Some(d) => d,
        };
        if d.checked_mul(n as usize)? > DEGRE_EXACT_MAX {
            return None;
        }

        let mut acc = Polynome::constante(BigRational::one());
        for _ in 0..n {
            acc = acc.mul(self)?;
        }
        Some(acc)
    }

    /// Horner exact.
    pub fn valeur(&self, x: &BigRational) -> BigRational {
        self.coeffs
            .iter()
            .rev()
            .fold(BigRational::zero(), |acc, c| acc * x + c)
    }

    /// Division synthétique par (x - r), r racine exacte (reste nul ignoré).
    fn deflation(&self, r: &BigRational) -> Polynome {
        let Some(d) = self.degre() else {
            return Polynome::nul();
        };
        if d == 0 {
            return Polynome::nul();
        }

        let mut q = vec![BigRational::zero(); d];
        let mut reste = BigRational::zero();
        for i in (0..=d).rev() {
            reste = reste * r + &self.coeffs[i];
            if i > 0 {
                q[i - 1] = reste.clone();
            }
        }
        Polynome::new(q)
    }

    /// Conversion Expr -> polynôme en x. None si ce n’est pas un polynôme
    /// à coefficients rationnels (ou s’il est trop gros).
    pub fn depuis_expr(e: &Expr) -> Option<Polynome> {
        use Expr::*;

        match e {
            Rat(r) => Some(Polynome::constante(r.clone())),
            Var(nom) if nom == VARIABLE => Some(Polynome::x()),
            Var(_) | Pi | E | Appel(..) => None,

            Neg(a) => Some(Polynome::depuis_expr(a)?.neg()),
            Add(a, b) => Some(Polynome::depuis_expr(a)?.add(&Polynome::depuis_expr(b)?)),
            Sub(a, b) => Some(Polynome::depuis_expr(a)?.sub(&Polynome::depuis_expr(b)?)),
            Mul(a, b) => Polynome::depuis_expr(a)?.mul(&Polynome::depuis_expr(b)?),

            Div(a, b) => {
                // division par une constante non nulle seulement
                let d = Polynome::depuis_expr(b)?.comme_constante()?;
                if d.is_zero() {
                    return None;
                }
                Some(Polynome::depuis_expr(a)?.echelle(&d.recip()))
            }

            PowInt(a, n) => Polynome::puissance_entiere(a, *n),
            Pow(a, b) => {
                let n = b.valeur_rationnelle()?;
                if !n.denom().is_one() {
                    return None;
                }
                Polynome::puissance_entiere(a, n.numer().to_i64()?)
            }
        }
    }

    fn puissance_entiere(base: &Expr, n: i64) -> Option<Polynome> {
        if n >= 0 {
            let n = u32::try_from(n).ok()?;
            return Polynome::depuis_expr(base)?.puissance(n);
        }
        // exposant négatif : seulement une base constante (2^-1 = 1/2)
        let v = base.valeur_rationnelle()?;
        rational_pow_int(v, n).map(Polynome::constante)
    }
}

/* ------------------------ Racines réelles exactes ------------------------ */

/// Issue de la résolution exacte de p(x) = 0.
#[derive(Clone, Debug, PartialEq)]
pub enum RacinesExactes {
    /// p est identiquement nul : tout x est solution.
    Toutes,
    /// Racines réelles distinctes, triées.
    Liste(Vec<f64>),
}

/// Racines réelles de p. None si p n’est pas traitable exactement
/// (cubique+ sans racine rationnelle, coefficients trop grands).
pub fn racines_reelles(p: &Polynome) -> Option<RacinesExactes> {
    if p.est_nul() {
        return Some(RacinesExactes::Toutes);
    }

    let mut reste = p.clone();
    let mut racines: Vec<f64> = Vec::new();

    // racines rationnelles tant que le degré dépasse 2
    while reste.degre().is_some_and(|d| d > 2) {
        let r = racine_rationnelle(&reste)?;
        racines.push(r.to_f64()?);
        reste = reste.deflation(&r);
    }

    racines.extend(racines_degre_2(&reste)?);

    racines.sort_by(|a, b| a.total_cmp(b));
    racines.dedup();
    Some(RacinesExactes::Liste(racines))
}

/// Degré 0, 1 ou 2 en forme close.
fn racines_degre_2(p: &Polynome) -> Option<Vec<f64>> {
    match p.degre() {
        None | Some(0) => Some(Vec::new()),
        Some(1) => {
            let r = -p.coeff(0) / p.coeff(1);
            Some(vec![r.to_f64()?])
        }
        Some(2) => {
            let (c, b, a) = (p.coeff(0), p.coeff(1), p.coeff(2));
            let disc = &b * &b - BigRational::from_integer(4.into()) * &a * &c;

            if disc.is_negative() {
                return Some(Vec::new());
            }
            let deux_a = &a + &a;
            if disc.is_zero() {
                return Some(vec![(-b / deux_a).to_f64()?]);
            }

            // carré parfait : racines rationnelles exactes
            if let Some(s) = racine_carree_exacte(&disc) {
                let r1 = (-&b - &s) / &deux_a;
                let r2 = (-&b + &s) / &deux_a;
                return Some(vec![r1.to_f64()?, r2.to_f64()?]);
            }

            // irrationnelles : forme stable (pas d’annulation catastrophique)
            let (a, b, c, d) = (a.to_f64()?, b.to_f64()?, c.to_f64()?, disc.to_f64()?);
            let signe = if b < 0.0 { -1.0 } else { 1.0 };
            let q = -0.5 * (b + signe * d.sqrt());
            Some(vec![q / a, c / q])
        }
        Some(_) => None,
    }
}

/// √r si r ≥ 0 est le carré d’un rationnel.
fn racine_carree_exacte(r: &BigRational) -> Option<BigRational> {
    if r.is_negative() {
        return None;
    }
    let n = r.numer().sqrt();
    let d = r.denom().sqrt();
    if &(&n * &n) == r.numer() && &(&d * &d) == r.denom() {
        Some(BigRational::new(n, d))
    } else {
        None
    }
}

/// Cherche une racine rationnelle p/q (p | a0, q | an) après passage en entiers.
fn racine_rationnelle(p: &Polynome) -> Option<BigRational> {
    // x = 0 d’abord (a0 = 0)
    if p.coeff(0).is_zero() {
        return Some(BigRational::zero());
    }

    let entiers = coefficients_entiers(p);
    let a0 = entiers.first()?.abs().to_u64()?;
    let an = entiers.last()?.abs().to_u64()?;
    if a0 > DIVISEURS_BORNE || an > DIVISEURS_BORNE {
        return None;
    }

    let (nums, dens) = (diviseurs(a0), diviseurs(an));
    if nums.len() * dens.len() > CANDIDATS_MAX {
        return None;
    }

    for &num in &nums {
        for &den in &dens {
            if pgcd_u64(num, den) != 1 {
                continue;
            }
            let q = BigInt::from(den);
            for signe in [1i64, -1] {
                let n = BigInt::from(num) * signe;
                if annule(&entiers, &n, &q) {
                    return Some(BigRational::new(n, q));
                }
            }
        }
    }
    None
}

/// Σ a_i n^i q^(d-i) = 0 : test de n/q sans passer par les rationnels.
fn annule(entiers: &[BigInt], n: &BigInt, q: &BigInt) -> bool {
    let mut acc = BigInt::zero();
    let mut q_puissance = BigInt::one();
    for a in entiers.iter().rev() {
        acc = acc * n + a * &q_puissance;
        q_puissance *= q;
    }
    acc.is_zero()
}

fn pgcd_u64(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Multiplie par le ppcm des dénominateurs : coefficients entiers, mêmes racines.
fn coefficients_entiers(p: &Polynome) -> Vec<BigInt> {
    let ppcm = p
        .coeffs
        .iter()
        .fold(BigInt::one(), |acc, c| ppcm_big(&acc, c.denom()));

    p.coeffs
        .iter()
        .map(|c| (c * BigRational::from_integer(ppcm.clone())).to_integer())
        .collect()
}

fn pgcd_big(a: &BigInt, b: &BigInt) -> BigInt {
    let mut a = a.abs();
    let mut b = b.abs();
    while !b.is_zero() {
        let t = &a % &b;
        a = b;
        b = t;
    }
    a
}

fn ppcm_big(a: &BigInt, b: &BigInt) -> BigInt {
    let g = pgcd_big(a, b);
    if g.is_zero() {
        return BigInt::zero();
    }
    (a / g * b).abs()
}

/// Diviseurs positifs de n (n ≥ 1), ordre croissant.
fn diviseurs(n: u64) -> Vec<u64> {
    let mut petits = Vec::new();
    let mut grands = Vec::new();
    let mut i = 1u64;
    while i * i <= n {
        if n % i == 0 {
            petits.push(i);
            if i != n / i {
                grands.push(n / i);
            }
        }
        i += 1;
    }
    petits.extend(grands.into_iter().rev());
    petits
}

#[cfg(test)]
mod tests {
    use super::super::analyse::analyser_texte;
    use super::*;

    fn poly(s: &str) -> Option<Polynome> {
        Polynome::depuis_expr(&analyser_texte(s).unwrap())
    }

    fn racines(s: &str) -> Option<RacinesExactes> {
        racines_reelles(&poly(s)?)
    }

    fn q(n: i64) -> BigRational {
        BigRational::from_integer(BigInt::from(n))
    }

    #[test]
    fn extraction_developpe() {
        // (x+1)^2 = 1 + 2x + x^2
        assert_eq!(poly("(x+1)^2").unwrap().coeffs(), &[q(1), q(2), q(1)]);
        // division par constante
        let p = poly("x/2 - 0.5").unwrap();
        assert_eq!(
            p.coeffs(),
            &[BigRational::new((-1).into(), 2.into()), BigRational::new(1.into(), 2.into())]
        );
        // x - x = polynôme nul
        assert!(poly("x - x").unwrap().est_nul());
    }

    #[test]
    fn extraction_refusee() {
        assert!(poly("sin(x)").is_none());
        assert!(poly("1/x").is_none());
        assert!(poly("pi*x").is_none());
        assert!(poly("x^0.5").is_none());
        assert!(poly("x/0").is_none());
        assert!(poly("x^100").is_none());
    }

    #[test]
    fn lineaire_et_quadratique() {
        assert_eq!(racines("2*x"), Some(RacinesExactes::Liste(vec![0.0])));
        assert_eq!(racines("x^2 - x - 2"), Some(RacinesExactes::Liste(vec![-1.0, 2.0])));
        assert_eq!(racines("x^2 + 1"), Some(RacinesExactes::Liste(vec![])));
        assert_eq!(racines("x^2 - 2*x + 1"), Some(RacinesExactes::Liste(vec![1.0])));
        assert_eq!(racines("5"), Some(RacinesExactes::Liste(vec![])));
    }

    #[test]
    fn quadratique_irrationnelle() {
        let Some(RacinesExactes::Liste(r)) = racines("x^2 - 2") else {
            panic!("attendu deux racines");
        };
        assert_eq!(r.len(), 2);
        assert!((r[0] + 2f64.sqrt()).abs() < 1e-15);
        assert!((r[1] - 2f64.sqrt()).abs() < 1e-15);
    }

    #[test]
    fn cubique_deflation() {
        // (x-1)(x+2)(2x-1) = 2x^3 + x^2 - 5x + 2
        assert_eq!(
            racines("2*x^3 + x^2 - 5*x + 2"),
            Some(RacinesExactes::Liste(vec![-2.0, 0.5, 1.0]))
        );
        // racine double en 0 : x^3 - x^2
        assert_eq!(racines("x^3 - x^2"), Some(RacinesExactes::Liste(vec![0.0, 1.0])));
        // (x^2-2)(x-3) : rationnelle puis irrationnelles
        let Some(RacinesExactes::Liste(r)) = racines("(x^2 - 2)*(x - 3)") else {
            panic!("attendu trois racines");
        };
        assert_eq!(r.len(), 3);
        assert_eq!(r[2], 3.0);
    }

    #[test]
    fn cubique_irreductible_non_traitable() {
        // x^3 - 2 : aucune racine rationnelle
        assert_eq!(racines("x^3 - 2"), None);
    }

    #[test]
    fn identiquement_nul() {
        assert_eq!(racines("(x+1)^2 - x^2 - 2*x - 1"), Some(RacinesExactes::Toutes));
    }

    #[test]
    fn base_constante_exposant_plafonne() {
        let t0 = std::time::Instant::now();
        assert!(poly("x + 1^400000000").is_none());
        assert!(poly("x + 2^60000").is_none());
        assert!(poly("x + 2^-60000").is_none());
        assert!(t0.elapsed() < std::time::Duration::from_millis(200));

        // petits exposants : toujours exacts
        assert_eq!(poly("x + 2^10").unwrap().coeffs(), &[q(1024), q(1)]);
        assert_eq!(poly("(1/2)^3*x").unwrap().coeffs(), &[q(0), BigRational::new(1.into(), 8.into())]);
    }

    #[test]
    fn diviseurs_ordonnes() {
        assert_eq!(diviseurs(12), vec![1, 2, 3, 4, 6, 12]);
        assert_eq!(diviseurs(1), vec![1]);
    }

    #[test]
    fn test_entier_homogene() {
        // 2x^2 + x - 1 = (2x - 1)(x + 1)
        let e = [BigInt::from(-1), BigInt::from(1), BigInt::from(2)];
        assert!(annule(&e, &BigInt::from(1), &BigInt::from(2)));
        assert!(annule(&e, &BigInt::from(-1), &BigInt::from(1)));
        assert!(!annule(&e, &BigInt::from(1), &BigInt::from(1)));
    }
}
