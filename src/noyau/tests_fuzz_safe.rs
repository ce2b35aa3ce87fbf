//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler analyse / évaluation / résolution sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - invariants clés :
//!   * aucune opération publique ne panique (texte quelconque accepté en entrée)
//!   * toute intersection rendue est dans l’intervalle (± ε), y fini, et f(x) ≈ g(x)

use std::time::{Duration, Instant};

use super::eval::FonctionNumerique;
use super::reglages::EPSILON_BORD;
use super::{ErreurResolution, ModeleFonctions};

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

fn gen_atom(rng: &mut Rng) -> String {
    match rng.pick(6) {
        0 | 1 | 2 => "x".to_string(),
        3 => format!("{}", 1 + rng.pick(5)),
        4 => format!("{}/{}", 1 + rng.pick(5), 1 + rng.pick(4)),
        _ => "0.5".to_string(),
    }
}

/// Expressions lisses à pente modérée sur [-3, 3] (pas de division par x).
fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return gen_atom(rng);
    }

    match rng.pick(8) {
        0 => gen_atom(rng),
        1 => format!("({}+{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        2 => format!("({}-{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        3 => format!("({}*{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        4 => format!("sin({})", gen_expr(rng, depth - 1)),
        5 => format!("cos({})", gen_expr(rng, depth - 1)),
        6 => format!("({})^{}", gen_expr(rng, depth - 1), 2 + rng.pick(2)),
        _ => {
            if rng.coin() {
                format!("-{}", gen_expr(rng, depth - 1))
            } else {
                format!("{}/{}", gen_expr(rng, depth - 1), 2 + rng.pick(3))
            }
        }
    }
}

/// Texte quelconque (souvent invalide) sur un alphabet de calculatrice.
fn gen_bruit(rng: &mut Rng) -> String {
    const ALPHABET: &[&str] = &[
        "x", "y", "e", "pi", "sin", "log", "(", ")", "+", "-", "*", "/", "^", "**", "1", "2.5",
        ".", " ", "foo", "√",
    ];
    let n = rng.pick(12) as usize;
    (0..n)
        .map(|_| ALPHABET[rng.pick(ALPHABET.len() as u32) as usize])
        .collect()
}

fn check_intersections(f: &str, g: &str, pts: &[(f64, f64)], min: f64, max: f64) {
    let ff = FonctionNumerique::compiler(&super::analyse::analyser_texte(f).unwrap()).unwrap();
    let gg = FonctionNumerique::compiler(&super::analyse::analyser_texte(g).unwrap()).unwrap();

    for w in pts.windows(2) {
        assert!(w[0].0 < w[1].0, "non trié / doublon: f={f:?} g={g:?} {pts:?}");
    }
    for &(x, y) in pts {
        assert!(
            x >= min - EPSILON_BORD && x <= max + EPSILON_BORD,
            "hors intervalle: f={f:?} g={g:?} x={x}"
        );
        assert!(y.is_finite(), "y non fini: f={f:?} g={g:?} x={x}");

        // |f - g| petit, ou changement de signe tout près (pentes raides : sin(x^9)…)
        let h = |t: f64| ff.valeur(t) - gg.valeur(t);
        let (fv, gv) = (ff.valeur(x), gg.valeur(x));
        let echelle = 1.0 + fv.abs() + gv.abs();
        let proche = (fv - gv).abs() <= 1e-6 * echelle;
        let encadre = h(x - 1e-7) * h(x + 1e-7) <= 0.0;
        assert!(
            proche || encadre,
            "f(x) ≠ g(x): f={f:?} g={g:?} x={x} f(x)={fv} g(x)={gv}"
        );
    }
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_bruit_jamais_de_panique() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut rng = Rng::new(0xC0FFEE_u64);
    let mut m = ModeleFonctions::new();

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..400 {
        budget(t0, max);

        let texte = gen_bruit(&mut rng);
        match m.set_f(Some(&texte)) {
            Ok(()) => {
                seen_ok += 1;
                let _ = m.evaluer_f(&[-1.0, 0.0, 1.0]);
            }
            Err(e) => {
                assert!(!e.to_string().is_empty());
                seen_err += 1;
            }
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 0, "aucun succès: fuzz trop “bruyant”");
    assert!(seen_err > 10, "trop peu d’erreurs: {seen_err}");
}

#[test]
fn fuzz_safe_intersections_valides() {
    let t0 = Instant::now();
    let max = Duration::from_secs(10);

    let mut rng = Rng::new(0xBADC0DE_u64);
    let (min, max_x) = (-3.0, 3.0);
    let xs = [min, max_x];

    let mut vues = 0usize;

    for _ in 0..60 {
        budget(t0, max);

        let f = gen_expr(&mut rng, 3);
        let g = gen_expr(&mut rng, 2);

        let mut m = ModeleFonctions::new();
        m.set_f(Some(&f)).unwrap_or_else(|e| panic!("f={f:?} err={e}"));
        m.set_g(Some(&g)).unwrap_or_else(|e| panic!("g={g:?} err={e}"));

        match m.resoudre(&xs) {
            Ok(pts) => {
                check_intersections(&f, &g, &pts, min, max_x);
                vues += pts.len();
            }
            Err(ErreurResolution::InfiniteSolutions) => {}
            Err(e) => panic!("erreur non attendue: f={f:?} g={g:?} err={e}"),
        }
    }

    assert!(vues > 0, "aucune intersection sur tout le fuzz");
}

#[test]
fn fuzz_safe_determinisme() {
    let mut a = Rng::new(42);
    let mut b = Rng::new(42);

    for _ in 0..20 {
        let f = gen_expr(&mut a, 3);
        assert_eq!(f, gen_expr(&mut b, 3));

        let mut m1 = ModeleFonctions::new();
        let mut m2 = ModeleFonctions::new();
        for m in [&mut m1, &mut m2] {
            m.set_f(Some(&f)).unwrap();
            m.set_g(Some("1/2")).unwrap();
        }
        assert_eq!(m1.resoudre(&[-2.0, 2.0]), m2.resoudre(&[-2.0, 2.0]));
    }
}

#[test]
fn fuzz_safe_parentheses_profondes() {
    let t0 = Instant::now();

    let mut s = "x".to_string();
    for _ in 0..200 {
        s = format!("({s}+1)");
    }

    let mut m = ModeleFonctions::new();
    m.set_f(Some(&s)).unwrap();
    m.set_g(Some("0")).unwrap();

    // x + 200 = 0 -> x = -200, hors de [-10, 10]
    assert_eq!(m.resoudre(&[-10.0, 10.0]), Ok(vec![]));
    assert_eq!(m.resoudre(&[-300.0, 0.0]), Ok(vec![(-200.0, 0.0)]));

    budget(t0, Duration::from_millis(500));
}
