//! src/app/etat.rs
//!
//! État UI (sans vue).
//!
//! Rôle : contenir les champs tapés, les courbes à dessiner, la fenêtre de tracé,
//! les intersections et les messages ; offrir des opérations simples
//! (effacer, déposer un résultat, une erreur) sans logique d’affichage.
//!
//! Contrats :
//! - Les fonctions f / g vivent dans le modèle du noyau, jamais ici.
//! - Actions déterministes, sans effet de bord caché.

use crate::noyau::reglages::{X_MAX_DEFAUT, X_MIN_DEFAUT};
use crate::noyau::{Cadre, Intersection, ModeleFonctions};

/// Fenêtre verticale quand rien n’est tracé.
const Y_DEFAUT: f64 = 10.0;

/// Garde-fou : au-delà, la courbe sort de la fenêtre (asymptotes, exp…).
const Y_BORNE: f64 = 1e6;

/// Une courbe échantillonnée, prête à dessiner (NaN / ±inf = trou).
#[derive(Clone, Debug, Default)]
pub struct Courbe {
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
}

#[derive(Clone, Debug)]
pub struct AppTraceur {
    // --- entrées utilisateur ---
    pub entree_f: String,
    pub entree_g: String,
    pub entree_x_min: String,
    pub entree_x_max: String,

    // --- noyau ---
    pub modele: ModeleFonctions,

    // --- sorties ---
    pub courbe_f: Option<Courbe>,
    pub courbe_g: Option<Courbe>,
    pub intersections: Vec<Intersection>,
    pub fenetre: Cadre,
    pub message: String, // barre d’état (ex: "2 intersection(s)")
    pub erreur: String,  // message d’erreur (analyse, intervalle, résolution)
}

impl Default for AppTraceur {
    fn default() -> Self {
        Self {
            entree_f: String::new(),
            entree_g: String::new(),
            entree_x_min: format!("{X_MIN_DEFAUT}"),
            entree_x_max: format!("{X_MAX_DEFAUT}"),
            modele: ModeleFonctions::new(),
            courbe_f: None,
            courbe_g: None,
            intersections: Vec::new(),
            fenetre: fenetre_defaut(X_MIN_DEFAUT, X_MAX_DEFAUT),
            message: String::new(),
            erreur: String::new(),
        }
    }
}

impl AppTraceur {
    /* ------------------------ Actions “boutons” (état seulement) ------------------------ */

    /// Reset : entrées + modèle + tracé (la précision choisie est gardée).
    pub fn reset_total(&mut self) {
        let precision = self.modele.precision();
        *self = Self::default();
        self.modele.set_precision(precision);
    }

    /// Utilitaire : placer une erreur (on garde le dernier tracé à l’écran).
    pub fn set_erreur(&mut self, msg: impl Into<String>) {
        self.erreur = msg.into();
        self.message.clear();
    }

    /// Utilitaire : placer un message d’état (efface l’erreur).
    pub fn set_message(&mut self, msg: impl Into<String>) {
        self.erreur.clear();
        self.message = msg.into();
    }

    /// Recadre la fenêtre sur [x_min, x_max] et sur les valeurs finies des courbes.
    pub fn recadrer_sur_courbes(&mut self, x_min: f64, x_max: f64) {
        let ys = self
            .courbe_f
            .iter()
            .chain(self.courbe_g.iter())
            .flat_map(|c| c.ys.iter().copied())
            .filter(|y| y.is_finite() && y.abs() <= Y_BORNE);

        let (lo, hi) = ys.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), y| {
            (lo.min(y), hi.max(y))
        });

        self.fenetre = if lo.is_finite() && hi.is_finite() {
            let marge = if hi > lo { 0.05 * (hi - lo) } else { 1.0 };
            Cadre {
                x_min,
                x_max,
                y_min: lo - marge,
                y_max: hi + marge,
            }
        } else {
            fenetre_defaut(x_min, x_max)
        };
    }
}

fn fenetre_defaut(x_min: f64, x_max: f64) -> Cadre {
    Cadre {
        x_min,
        x_max,
        y_min: -Y_DEFAUT,
        y_max: Y_DEFAUT,
    }
}
