// src/app.rs
//
// Traceur Q-pur : module App (racine)
// ----------------------------------
// Rôle:
// - Déclarer les sous-modules (etat.rs + vue.rs)
// - Ré-exporter AppTraceur (pour main.rs: use crate::app::AppTraceur;)
// - Fournir l’impl eframe::App (compatible NATIF + WEB)
//
// Important:
// - La touche Enter (résoudre) est gérée dans vue.rs, quand un champ a le focus.

pub mod etat;
pub mod vue;

// Ré-export pratique : `use crate::app::AppTraceur;`
pub use etat::AppTraceur;

use eframe::egui;

impl eframe::App for AppTraceur {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Raccourci clavier global minimal : ESC = reset (comme le bouton).
        let esc = ctx.input(|i| i.key_pressed(egui::Key::Escape));
        if esc {
            self.reset_total();
        }

        egui::SidePanel::left("panneau_commandes")
            .resizable(false)
            .min_width(320.0)
            .show(ctx, |ui| {
                self.ui_commandes(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.ui_trace(ui);
        });
    }
}
