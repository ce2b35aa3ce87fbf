// src/app/vue.rs
//
// Vue (UI egui) : natif + web
// ---------------------------
// Objectifs :
// - Même AppTraceur (etat.rs) pour natif + wasm
// - Panneau de gauche : f(x), g(x), intervalle, précision, boutons, solutions
// - Zone centrale : tracé dessiné au Painter (pas de crate de graphes)
// - Clavier : Enter dans un champ = Résoudre
//
// Note :
// - Les courbes sont coupées aux valeurs non finies (log hors domaine, 1/x en 0…)
//   et aux sauts hors fenêtre (asymptotes de tan).

use eframe::egui;

use super::etat::{AppTraceur, Courbe};
use crate::noyau::{Cadre, ErreurResolution, Intervalle, Precision};

const COULEUR_F: egui::Color32 = egui::Color32::from_rgb(40, 110, 220);
const COULEUR_G: egui::Color32 = egui::Color32::from_rgb(220, 70, 50);
const COULEUR_POINT: egui::Color32 = egui::Color32::from_rgb(250, 190, 30);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Creneau {
    F,
    G,
}

impl Creneau {
    fn nom(self) -> &'static str {
        match self {
            Creneau::F => "f",
            Creneau::G => "g",
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum Action {
    TracerF,
    TracerG,
    Resoudre,
    Ajuster,
    ResetTotal,
}

impl AppTraceur {
    /* ------------------------ Panneau de commandes ------------------------ */

    pub fn ui_commandes(&mut self, ui: &mut egui::Ui) {
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading("Traceur Q-pur");
                ui.add_space(6.0);

                self.ui_entrees(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_boutons(ui);

                if !self.erreur.is_empty() {
                    ui.add_space(6.0);
                    ui.colored_label(ui.visuals().error_fg_color, &self.erreur);
                }
                if !self.message.is_empty() {
                    ui.add_space(6.0);
                    ui.label(&self.message);
                }

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_solutions(ui);
            });
    }

    fn ui_entrees(&mut self, ui: &mut egui::Ui) {
        let mut enter = false;

        ui.colored_label(COULEUR_F, "f(x) =");
        enter |= champ(ui, &mut self.entree_f, "Ex: x^2 - 4", "entree_f");

        ui.colored_label(COULEUR_G, "g(x) =");
        enter |= champ(ui, &mut self.entree_g, "Ex: x - 2", "entree_g");

        ui.add_space(4.0);
        ui.horizontal(|ui| {
            ui.label("x min");
            enter |= ui
                .add(egui::TextEdit::singleline(&mut self.entree_x_min).desired_width(70.0))
                .lost_focus()
                && ui.input(|i| i.key_pressed(egui::Key::Enter));
            ui.label("x max");
            enter |= ui
                .add(egui::TextEdit::singleline(&mut self.entree_x_max).desired_width(70.0))
                .lost_focus()
                && ui.input(|i| i.key_pressed(egui::Key::Enter));
        });

        ui.add_space(4.0);
        let mut p = self.modele.precision();
        egui::ComboBox::from_label("Précision")
            .selected_text(p.libelle())
            .show_ui(ui, |ui| {
                for q in Precision::TOUTES {
                    ui.selectable_value(&mut p, q, q.libelle());
                }
            });
        if p != self.modele.precision() {
            self.modele.set_precision(p);
        }

        if enter {
            self.resoudre_via_noyau();
        }
    }

    fn ui_boutons(&mut self, ui: &mut egui::Ui) {
        ui.horizontal_wrapped(|ui| {
            self.bouton_action(ui, "Tracer f", "Trace f sur l’intervalle", Action::TracerF);
            self.bouton_action(ui, "Tracer g", "Trace g sur l’intervalle", Action::TracerG);
            self.bouton_action(ui, "Résoudre", "Intersections f = g", Action::Resoudre);
        });
        ui.horizontal_wrapped(|ui| {
            self.bouton_action(
                ui,
                "Ajuster",
                "Recadre le tracé sur les intersections",
                Action::Ajuster,
            );
            self.bouton_action(ui, "Effacer", "Remise à zéro totale", Action::ResetTotal);
        });
    }

    fn ui_solutions(&self, ui: &mut egui::Ui) {
        ui.label("Intersections :");

        let contenu = if self.intersections.is_empty() {
            "aucune".to_string()
        } else {
            self.intersections
                .iter()
                .map(|(x, y)| format!("x = {x:>12.6}   y = {y:>12.6}"))
                .collect::<Vec<_>>()
                .join("\n")
        };

        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                egui::ScrollArea::vertical()
                    .id_salt("liste_intersections")
                    .max_height(220.0)
                    .show(ui, |ui| {
                        ui.monospace(contenu);
                    });
            });
    }

    fn bouton_action(&mut self, ui: &mut egui::Ui, label: &str, tip: &str, action: Action) {
        let resp = ui
            .add_sized([92.0, 30.0], egui::Button::new(label))
            .on_hover_text(tip);

        if resp.clicked() {
            match action {
                Action::TracerF => self.tracer_via_noyau(Creneau::F),
                Action::TracerG => self.tracer_via_noyau(Creneau::G),
                Action::Resoudre => self.resoudre_via_noyau(),
                Action::Ajuster => self.ajuster_via_noyau(),
                Action::ResetTotal => self.reset_total(),
            }
        }
    }

    /* ------------------------ Tracé ------------------------ */

    pub fn ui_trace(&mut self, ui: &mut egui::Ui) {
        egui::Frame::canvas(ui.style()).show(ui, |ui| {
            let taille = ui.available_size();
            let (rect, resp) = ui.allocate_exact_size(taille, egui::Sense::hover());
            let painter = ui.painter_at(rect);
            let ecran = Ecran {
                rect,
                cadre: self.fenetre,
            };
            let trait_fin = egui::Stroke::new(1.0, ui.visuals().weak_text_color());
            let texte = ui.visuals().text_color();

            // axes (seulement s’ils sont dans la fenêtre)
            let c = ecran.cadre;
            if c.x_min <= 0.0 && 0.0 <= c.x_max {
                painter.line_segment([ecran.vers(0.0, c.y_min), ecran.vers(0.0, c.y_max)], trait_fin);
            }
            if c.y_min <= 0.0 && 0.0 <= c.y_max {
                painter.line_segment([ecran.vers(c.x_min, 0.0), ecran.vers(c.x_max, 0.0)], trait_fin);
            }

            for (courbe, couleur) in [(&self.courbe_f, COULEUR_F), (&self.courbe_g, COULEUR_G)] {
                if let Some(courbe) = courbe {
                    for morceau in ecran.morceaux(courbe) {
                        painter.add(egui::Shape::line(morceau, egui::Stroke::new(2.0, couleur)));
                    }
                }
            }

            for &(x, y) in &self.intersections {
                painter.circle_filled(ecran.vers(x, y), 4.5, COULEUR_POINT);
            }

            let police = egui::FontId::monospace(11.0);
            painter.text(
                rect.left_top() + egui::vec2(4.0, 4.0),
                egui::Align2::LEFT_TOP,
                format!("y ∈ [{:.4}, {:.4}]", c.y_min, c.y_max),
                police.clone(),
                texte,
            );
            painter.text(
                rect.left_bottom() + egui::vec2(4.0, -4.0),
                egui::Align2::LEFT_BOTTOM,
                format!("x ∈ [{:.4}, {:.4}]", c.x_min, c.x_max),
                police.clone(),
                texte,
            );
            if let Some(pos) = resp.hover_pos() {
                let (x, y) = ecran.depuis(pos);
                painter.text(
                    rect.right_top() + egui::vec2(-4.0, 4.0),
                    egui::Align2::RIGHT_TOP,
                    format!("({x:.4}, {y:.4})"),
                    police,
                    texte,
                );
            }
        });
    }

    /* ------------------------ Appels noyau ------------------------ */

    /// Lit l’intervalle tapé ; en cas d’erreur, la dépose et renvoie None.
    fn intervalle_via_noyau(&mut self) -> Option<Intervalle> {
        match Intervalle::depuis_texte(&self.entree_x_min, &self.entree_x_max) {
            Ok(iv) => Some(iv),
            Err(e) => {
                self.set_erreur(e.to_string());
                None
            }
        }
    }

    /// Pose le texte du créneau dans le modèle (champ vide = créneau vide).
    fn poser_via_noyau(&mut self, c: Creneau) -> bool {
        let res = match c {
            Creneau::F => self.modele.set_f(texte_option(&self.entree_f)),
            Creneau::G => self.modele.set_g(texte_option(&self.entree_g)),
        };
        match res {
            Ok(()) => true,
            Err(e) => {
                self.set_erreur(format!("{}(x) : {e}", c.nom()));
                false
            }
        }
    }

    /// Échantillonne le créneau sur xs et range la courbe (None si créneau vide).
    fn echantillonner_via_noyau(&mut self, c: Creneau, xs: &[f64]) -> bool {
        let res = match c {
            Creneau::F => self.modele.evaluer_f(xs),
            Creneau::G => self.modele.evaluer_g(xs),
        };
        match res {
            Ok(ys) => {
                let courbe = ys.map(|ys| Courbe { xs: xs.to_vec(), ys });
                match c {
                    Creneau::F => self.courbe_f = courbe,
                    Creneau::G => self.courbe_g = courbe,
                }
                true
            }
            Err(e) => {
                self.set_erreur(format!("{}(x) : {e}", c.nom()));
                false
            }
        }
    }

    fn tracer_via_noyau(&mut self, c: Creneau) {
        let Some(iv) = self.intervalle_via_noyau() else {
            return;
        };
        if !self.poser_via_noyau(c) {
            return;
        }
        let xs = iv.echantillons(self.modele.reglages().points_trace);
        if !self.echantillonner_via_noyau(c, &xs) {
            return;
        }
        self.recadrer_sur_courbes(iv.min, iv.max);
        self.set_message(format!("{}(x) tracée", c.nom()));
    }

    /// Résout f = g sur l’intervalle ; trace aussi les deux courbes.
    fn resoudre_via_noyau(&mut self) {
        let Some(iv) = self.intervalle_via_noyau() else {
            return;
        };
        for c in [Creneau::F, Creneau::G] {
            if !self.poser_via_noyau(c) {
                return;
            }
        }

        let xs = iv.echantillons(self.modele.reglages().points_trace);
        for c in [Creneau::F, Creneau::G] {
            if !self.echantillonner_via_noyau(c, &xs) {
                return;
            }
        }
        self.recadrer_sur_courbes(iv.min, iv.max);

        if self.modele.fx().is_none() || self.modele.gx().is_none() {
            self.intersections.clear();
            self.set_erreur("f(x) et g(x) sont requises pour résoudre");
            return;
        }

        match self.modele.resoudre(&xs) {
            Ok(pts) => {
                self.intersections = pts;
                let n = self.intersections.len();
                if n == 0 {
                    self.set_message("Aucune intersection sur l’intervalle");
                } else {
                    self.set_message(format!("{n} intersection(s)"));
                }
            }
            Err(ErreurResolution::InfiniteSolutions) => {
                self.intersections.clear();
                self.set_message("Infinité de solutions : f et g coïncident");
            }
            Err(e) => {
                self.intersections.clear();
                self.set_erreur(e.to_string());
            }
        }
    }

    fn ajuster_via_noyau(&mut self) {
        match self.modele.cadrage() {
            Some(cadre) => self.fenetre = cadre,
            None => self.set_message("Aucune intersection à cadrer"),
        }
    }
}

fn texte_option(s: &str) -> Option<&str> {
    let t = s.trim();
    (!t.is_empty()).then_some(t)
}

/// Champ d’expression ; renvoie true si Enter a été pressé dedans.
fn champ(ui: &mut egui::Ui, texte: &mut String, hint: &str, id: &str) -> bool {
    let resp = ui.add(
        egui::TextEdit::singleline(texte)
            .desired_width(ui.available_width())
            .hint_text(hint)
            .id_salt(id)
            .code_editor(),
    );
    resp.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter))
}

/* ------------------------ Repère écran ------------------------ */

struct Ecran {
    rect: egui::Rect,
    cadre: Cadre,
}

impl Ecran {
    fn vers(&self, x: f64, y: f64) -> egui::Pos2 {
        let c = &self.cadre;
        let tx = ((x - c.x_min) / (c.x_max - c.x_min)) as f32;
        let ty = ((y - c.y_min) / (c.y_max - c.y_min)) as f32;
        egui::pos2(
            self.rect.left() + tx * self.rect.width(),
            self.rect.bottom() - ty * self.rect.height(),
        )
    }

    fn depuis(&self, p: egui::Pos2) -> (f64, f64) {
        let c = &self.cadre;
        let tx = f64::from((p.x - self.rect.left()) / self.rect.width());
        let ty = f64::from((self.rect.bottom() - p.y) / self.rect.height());
        (
            c.x_min + tx * (c.x_max - c.x_min),
            c.y_min + ty * (c.y_max - c.y_min),
        )
    }

    /// Découpe une courbe en polylignes continues, dans une bande autour de la fenêtre.
    fn morceaux(&self, courbe: &Courbe) -> Vec<Vec<egui::Pos2>> {
        let c = &self.cadre;
        let h = c.y_max - c.y_min;
        let (bas, haut) = (c.y_min - h, c.y_max + h);

        let mut morceaux = Vec::new();
        let mut courant = Vec::new();
        for (&x, &y) in courbe.xs.iter().zip(&courbe.ys) {
            if y.is_finite() && (bas..=haut).contains(&y) {
                courant.push(self.vers(x, y));
            } else if !courant.is_empty() {
                morceaux.push(std::mem::take(&mut courant));
            }
        }
        morceaux.push(courant);
        morceaux.retain(|m| m.len() >= 2);
        morceaux
    }
}
