//! Tests scientifiques (campagne) : propriétés du modèle, bout à bout.
//!
//! But : vérifier le contrat vu par la couche présentation
//! (textes + tableaux de f64 en entrée, listes / erreurs en sortie).
//!
//! Notes :
//! - Les égalités exactes ne portent que sur le chemin exact (polynômes sur ℚ).
//! - Le chemin numérique est testé à tolérance, avec un budget temps global.

use std::time::{Duration, Instant};

use super::intervalle::Intervalle;
use super::{ErreurAnalyse, ErreurResolution, ModeleFonctions, Precision, Strategie};

fn modele(f: &str, g: &str) -> ModeleFonctions {
    let mut m = ModeleFonctions::new();
    m.set_f(Some(f)).unwrap_or_else(|e| panic!("f={f:?} err={e}"));
    m.set_g(Some(g)).unwrap_or_else(|e| panic!("g={g:?} err={e}"));
    m
}

fn xs_defaut() -> Vec<f64> {
    (-10..=10).map(f64::from).collect()
}

fn assert_proche(a: f64, b: f64, tol: f64, ctx: &str) {
    assert!((a - b).abs() <= tol, "{ctx}: {a} vs {b} (tol {tol})");
}

/// Budget global anti-gel.
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Analyse ------------------------ */

#[test]
fn sci_symboles_libres_inclus_dans_x() {
    let mut m = ModeleFonctions::new();
    for s in [
        "x^2 + 2*x + 1",
        "e^x - pi",
        "E * X",
        "sin(x)/x",
        "log(x) + log10(x) + ln(x)",
        "sqrt(abs(x)) - exp(-x^2)",
        "-(x - 1)^3",
        "3.25",
    ] {
        m.set_f(Some(s)).unwrap_or_else(|e| panic!("{s:?}: {e}"));
        let libres = m.fx().map(|e| e.symboles_libres()).unwrap_or_default();
        assert!(libres.iter().all(|v| v == "x"), "{s:?} -> {libres:?}");
    }
}

#[test]
fn sci_y_refuse_et_nomme() {
    let mut m = ModeleFonctions::new();
    let err = m.set_f(Some("y+1")).unwrap_err();
    assert!(err.to_string().contains('y'));
    assert!(m.fx().is_none());
}

#[test]
fn sci_expressions_longues_bornees() {
    let mut m = ModeleFonctions::new();

    // 400 termes : accepté, évalué
    let s = format!("x{}", "+x".repeat(399));
    m.set_f(Some(&s)).unwrap();
    assert_eq!(m.evaluer_f(&[1.0]), Ok(Some(vec![400.0])));

    // trop profond ou trop long : refus propre, la fonction précédente reste
    let profond = format!("x{}", "+x".repeat(600));
    let e = m.set_f(Some(&profond)).unwrap_err();
    assert!(e.to_string().contains("trop imbriquée"), "{e}");

    let long = format!("x{}", "+x".repeat(50_000));
    let e = m.set_f(Some(&long)).unwrap_err();
    assert!(matches!(e, ErreurAnalyse::Invalide(ref d) if d.contains("trop longue")), "{e}");

    assert_eq!(m.evaluer_f(&[1.0]), Ok(Some(vec![400.0])));
}

#[test]
fn sci_vide_et_blanc() {
    let mut m = ModeleFonctions::new();
    assert_eq!(m.set_f(Some("")), Err(ErreurAnalyse::Vide));
    assert_eq!(m.set_g(Some("   ")), Err(ErreurAnalyse::Vide));
}

/* ------------------------ Évaluation ------------------------ */

#[test]
fn sci_evaluer_sans_fonction() {
    let m = ModeleFonctions::new();
    assert_eq!(m.evaluer_f(&[1.0, 2.0, 3.0]), Ok(None));
}

#[test]
fn sci_caret_normalise() {
    let mut m = ModeleFonctions::new();
    m.set_f(Some("x^2")).unwrap();
    assert_eq!(m.evaluer_f(&[0.0, 1.0, 2.0]), Ok(Some(vec![0.0, 1.0, 4.0])));
}

#[test]
fn sci_evaluer_idempotent() {
    let m = modele("x^3 - sin(x)", "0");
    let xs = Intervalle::default().echantillons(101);
    let a = m.evaluer_f(&xs).unwrap();
    let b = m.evaluer_f(&xs).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.map(|v| v.len()), Some(101));
}

/* ------------------------ Résolution ------------------------ */

#[test]
fn sci_x_egal_moins_x() {
    let mut m = modele("x", "-x");
    assert_eq!(m.resoudre(&[-10.0, 10.0]), Ok(vec![(0.0, 0.0)]));
}

#[test]
fn sci_paralleles_sans_infinite() {
    let mut m = modele("x+1", "x-1");
    assert_eq!(m.resoudre(&[0.0, 1.0]), Ok(vec![]));
}

#[test]
fn sci_identiques_infinite() {
    let mut m = modele("x", "x");
    assert_eq!(m.resoudre(&xs_defaut()), Err(ErreurResolution::InfiniteSolutions));
    // l’identité l’emporte sur le contrôle d’intervalle
    assert_eq!(m.resoudre(&[1.0, 2.0]), Err(ErreurResolution::InfiniteSolutions));
}

#[test]
fn sci_parabole_droite() {
    let mut m = modele("x**2 - 4", "x - 2");
    let r = m.resoudre_detail(&xs_defaut()).unwrap();
    assert_eq!(r.strategie, Strategie::Symbolique);
    assert_eq!(r.intersections, vec![(-1.0, -3.0), (2.0, 0.0)]);
}

#[test]
fn sci_racines_hors_intervalle_filtrees() {
    // x^2 = 9 : ±3, seul +3 dans [0, 5]
    let mut m = modele("x^2", "9");
    assert_eq!(m.resoudre(&[0.0, 5.0]), Ok(vec![(3.0, 9.0)]));
}

#[test]
fn sci_numerique_cos_x() {
    // cos(x) = x : point fixe de Dottie
    let mut m = modele("cos(x)", "x");
    let r = m.resoudre_detail(&xs_defaut()).unwrap();
    assert_eq!(r.strategie, Strategie::Numerique);
    assert_eq!(r.intersections.len(), 1);
    let (x, y) = r.intersections[0];
    assert_proche(x, 0.739_085_133_215_160_6, 1e-8, "dottie x");
    assert_proche(y, x, 1e-8, "dottie y");
}

#[test]
fn sci_numerique_exp_log() {
    // e^x = x + 2 : deux racines sur [-3, 3]
    let mut m = modele("exp(x)", "x + 2");
    let r = m.resoudre(&[-3.0, 3.0]).unwrap();
    assert_eq!(r.len(), 2);
    for (x, y) in r {
        assert_proche(x.exp(), x + 2.0, 1e-7, "e^x = x+2");
        assert_proche(y, x + 2.0, 1e-7, "y");
    }
}

#[test]
fn sci_numerique_log_hors_domaine() {
    // log(x) indéfini pour x ≤ 0 : pas d’erreur, une seule racine (x = 1)
    let mut m = modele("log(x)", "0");
    let r = m.resoudre(&xs_defaut()).unwrap();
    assert_eq!(r.len(), 1);
    assert_proche(r[0].0, 1.0, 1e-8, "log(x) = 0");
}

#[test]
fn sci_precisions_coherentes() {
    let start = Instant::now();
    for p in Precision::TOUTES {
        let mut m = modele("sin(x)", "cos(x)");
        m.set_precision(p);
        let tol = m.reglages().tolerance * 10.0;
        let r = m.resoudre(&xs_defaut()).unwrap();
        // sin = cos en π/4 + kπ : 6 valeurs dans [-10, 10]
        assert_eq!(r.len(), 6, "précision {}", p.libelle());
        for (x, _) in r {
            let k = ((x - std::f64::consts::FRAC_PI_4) / std::f64::consts::PI).round();
            let attendu = std::f64::consts::FRAC_PI_4 + k * std::f64::consts::PI;
            assert_proche(x, attendu, tol, p.libelle());
        }
        budget(start, Duration::from_secs(5));
    }
}

#[test]
fn sci_xs_dense_fourni_par_l_appelant() {
    // xs accumulé pas à pas (comme un tracé) : un point tombe à ~1e-16 de la racine
    let start = Instant::now();
    for p in Precision::TOUTES {
        let mut m = modele("sin(x)", "0");
        m.set_precision(p);
        let reglages = m.reglages();
        let pas = 2.0 / reglages.points_balayage as f64;
        let xs: Vec<f64> = std::iter::successors(Some(-1.0_f64), |x| Some(x + pas))
            .take(reglages.points_balayage + 1)
            .collect();

        let r = m.resoudre_detail(&xs).unwrap();
        assert_eq!(r.strategie, Strategie::Numerique);
        assert_eq!(r.intersections.len(), 1, "précision {} : {:?}", p.libelle(), r.intersections);
        assert_proche(r.intersections[0].0, 0.0, reglages.tolerance, p.libelle());
        budget(start, Duration::from_secs(5));
    }
}

/* ------------------------ Cadrage ------------------------ */

#[test]
fn sci_cadrage_point_seul() {
    let mut m = modele("x", "1");
    m.resoudre(&xs_defaut()).unwrap();
    let c = m.cadrage().unwrap();
    assert_eq!((c.x_min, c.x_max, c.y_min, c.y_max), (-1.0, 3.0, -1.0, 3.0));
}

#[test]
fn sci_cadrage_symetrique() {
    let mut m = modele("x^2", "2*x");
    let pts = m.resoudre(&xs_defaut()).unwrap();
    assert_eq!(pts, vec![(0.0, 0.0), (2.0, 4.0)]);

    let c = m.cadrage().unwrap();
    assert!(c.x_min < 0.0 && c.x_max > 2.0);
    assert_proche(0.0 - c.x_min, c.x_max - 2.0, 1e-12, "marge x");
    assert_proche(0.0 - c.x_min, 0.6 * 2.0, 1e-12, "0.6 × étendue x");
    assert_proche(0.0 - c.y_min, 0.6 * 4.0, 1e-12, "0.6 × étendue y");
}
