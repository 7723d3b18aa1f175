// src/app.rs
//
// Calculatrice StudentHub — module App (racine)
// ---------------------------------------------
// Rôle:
// - Déclarer les sous-modules (etat.rs + vue.rs)
// - Fournir l’impl eframe::App (compatible NATIF + WEB)
// - Clavier physique -> touches de la session

pub mod etat;
pub mod vue;

pub use etat::AppCalc;

use calculatrice_studenthub::session::Touche;
use eframe::egui;

impl eframe::App for AppCalc {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Pas de champ texte : l’écran est en lecture seule, le clavier est lu ici.
        for touche in touches_clavier(ctx) {
            self.session.appuyer(touche);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.ui(ui);
        });
    }
}

/// Touches de la frame : Échap = C, Entrée = "=", Retour arrière = ⌫, puis le texte tapé.
fn touches_clavier(ctx: &egui::Context) -> Vec<Touche> {
    ctx.input(|i| {
        let mut touches = Vec::new();
        if i.key_pressed(egui::Key::Escape) {
            touches.push(Touche::Effacer);
        }
        if i.key_pressed(egui::Key::Backspace) {
            touches.push(Touche::Retour);
        }
        for ev in &i.events {
            if let egui::Event::Text(t) = ev {
                touches.extend(t.chars().filter_map(Touche::depuis_caractere));
            }
        }
        if i.key_pressed(egui::Key::Enter) {
            touches.push(Touche::Egal);
        }
        touches
    })
}
