//! Réglages du noyau (constantes + précision choisie par l’utilisateur).
//!
//! Les bornes ci-dessous sont aussi le budget du chemin exact :
//! au-delà, on passe directement au balayage numérique.

/// Intervalle par défaut (champs « x min » / « x max »).
pub const X_MIN_DEFAUT: f64 = -10.0;
pub const X_MAX_DEFAUT: f64 = 10.0;

/// Tolérance aux bords de l’intervalle (arrondi flottant).
pub const EPSILON_BORD: f64 = 1e-9;

/// Résolution minimale du balayage numérique (ré-échantillonnage si xs est creux).
pub const RESOLUTION_MIN: usize = 1000;

/// Garde-fou : nombre de points maximal accepté pour un balayage.
pub const RESOLUTION_MAX: usize = 100_000;

/// Degré maximal d’un polynôme traité exactement.
pub const DEGRE_EXACT_MAX: usize = 32;

/// Garde-fou : |coefficient| au-delà duquel on n’énumère pas les diviseurs.
pub const DIVISEURS_BORNE: u64 = 1_000_000;

/// Garde-fou : nombre de candidats p/q essayés par déflation.
pub const CANDIDATS_MAX: usize = 20_000;

/// Garde-fou : nombre de jetons maximal d’une expression tapée.
pub const JETONS_MAX: usize = 4096;

/// Garde-fou : profondeur maximale de l’arbre (les parcours sont récursifs).
pub const PROFONDEUR_MAX: usize = 512;

/// Rembourrage fixe du cadrage autour d’un point seul (ou d’un axe plat).
pub const MARGE_POINT_SEUL: f64 = 2.0;

/// Rembourrage proportionnel du cadrage (fraction de l’étendue).
pub const MARGE_RELATIVE: f64 = 0.6;

/// Menu « Précision » : basse / moyenne / haute.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Precision {
    Basse,
    #[default]
    Moyenne,
    Haute,
}

impl Precision {
    pub const TOUTES: [Precision; 3] = [Precision::Basse, Precision::Moyenne, Precision::Haute];

    pub fn libelle(self) -> &'static str {
        match self {
            Precision::Basse => "basse",
            Precision::Moyenne => "moyenne",
            Precision::Haute => "haute",
        }
    }
}

/// Paramètres numériques effectifs d’un calcul.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Reglages {
    /// Points pour tracer une courbe.
    pub points_trace: usize,
    /// Points du balayage (au moins RESOLUTION_MIN).
    pub points_balayage: usize,
    /// Largeur finale du crochet de bissection.
    pub tolerance: f64,
    /// Itérations maximales de bissection.
    pub iterations_max: usize,
}

impl Reglages {
    pub fn pour(precision: Precision) -> Self {
        match precision {
            Precision::Basse => Self {
                points_trace: 200,
                points_balayage: RESOLUTION_MIN,
                tolerance: 1e-6,
                iterations_max: 60,
            },
            Precision::Moyenne => Self {
                points_trace: 1000,
                points_balayage: 2000,
                tolerance: 1e-9,
                iterations_max: 100,
            },
            Precision::Haute => Self {
                points_trace: 5000,
                points_balayage: 10_000,
                tolerance: 1e-12,
                iterations_max: 200,
            },
        }
    }
}

impl Default for Reglages {
    fn default() -> Self {
        Reglages::pour(Precision::default())
    }
}
