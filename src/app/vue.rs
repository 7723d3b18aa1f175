// src/app/vue.rs
//
// Vue (UI egui) — natif + web
// ---------------------------
// - Écran : ligne de formule (petite) + affichage principal (grand, à droite)
// - Pavé : grille construite depuis session::CLAVIER
// - Historique : panneau repliable, clic = rappel, bouton pour tout effacer

use calculatrice_studenthub::session::{Touche, CLAVIER};
use eframe::egui;

use super::etat::AppCalc;

const TAILLE_BOUTON: [f32; 2] = [64.0, 44.0];

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("Calculatrice");
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let titre = if self.afficher_historique {
                            "Masquer l’historique"
                        } else {
                            "Historique"
                        };
                        if ui.button(titre).clicked() {
                            self.basculer_historique();
                        }
                    });
                });
                ui.add_space(6.0);

                self.ui_ecran(ui);

                ui.add_space(8.0);

                if self.afficher_historique {
                    self.ui_historique(ui);
                } else {
                    self.ui_pave(ui);
                }
            });
    }

    fn ui_ecran(&mut self, ui: &mut egui::Ui) {
        let erreur = self.session.erreur().map(|e| e.to_string());

        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                ui.with_layout(egui::Layout::top_down(egui::Align::Max), |ui| {
                    ui.label(
                        egui::RichText::new(self.session.formule())
                            .monospace()
                            .weak(),
                    );

                    let mut ecran = egui::RichText::new(self.session.affichage())
                        .monospace()
                        .size(32.0);
                    if erreur.is_some() {
                        ecran = ecran.color(ui.visuals().error_fg_color);
                    }
                    let resp = ui.label(ecran);

                    // cause exacte au survol ("Error" seul à l’écran)
                    if let Some(msg) = erreur {
                        resp.on_hover_text(msg);
                    }
                });
            });
    }

    fn ui_pave(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("pave_calculatrice")
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                for ligne in CLAVIER {
                    for touche in ligne {
                        self.bouton(ui, *touche);
                    }
                    ui.end_row();
                }
            });
    }

    fn bouton(&mut self, ui: &mut egui::Ui, touche: Touche) {
        let mut texte = egui::RichText::new(touche.libelle()).size(18.0);
        if touche == Touche::Egal {
            texte = texte.strong();
        }

        if ui.add_sized(TAILLE_BOUTON, egui::Button::new(texte)).clicked() {
            self.session.appuyer(touche);
        }
    }

    fn ui_historique(&mut self, ui: &mut egui::Ui) {
        let entrees = self.session.historique();

        if entrees.is_empty() {
            ui.weak("Aucun calcul pour l’instant.");
            return;
        }

        let mut rappel = None;
        for (i, entree) in entrees.iter().enumerate() {
            let resp = ui.add(
                egui::Button::new(
                    egui::RichText::new(format!("{} = {}", entree.formule, entree.resultat))
                        .monospace(),
                )
                .min_size(egui::vec2(ui.available_width(), 28.0)),
            );
            if resp.clicked() {
                rappel = Some(i);
            }
        }
        if let Some(i) = rappel {
            self.rappeler(i);
        }

        ui.add_space(8.0);
        if ui.button("Effacer l’historique").clicked() {
            self.session.effacer_historique();
        }
    }
}
