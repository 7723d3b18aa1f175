//! src/app/etat.rs
//!
//! État UI : la session de calcul + quelques drapeaux d’affichage.
//!
//! Contrats :
//! - Aucune évaluation ici : tout passe par `SessionCalcul::appuyer`.
//! - L’historique choisi par les réglages (mémoire ou fichier) est injecté à la construction.

use calculatrice_studenthub::historique::HistoriqueStore;
use calculatrice_studenthub::reglages::Reglages;
use calculatrice_studenthub::session::SessionCalcul;

pub type Historique = Box<dyn HistoriqueStore + Send>;

pub struct AppCalc {
    pub session: SessionCalcul<Historique>,

    /// Panneau historique déplié.
    pub afficher_historique: bool,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self::avec_reglages(&Reglages::default())
    }
}

impl AppCalc {
    pub fn avec_reglages(reglages: &Reglages) -> Self {
        Self {
            session: SessionCalcul::new(reglages.ouvrir_historique()),
            afficher_historique: false,
        }
    }

    pub fn basculer_historique(&mut self) {
        self.afficher_historique = !self.afficher_historique;
    }

    /// Rappel depuis le panneau : recharge l’entrée et referme le panneau.
    pub fn rappeler(&mut self, index: usize) {
        if self.session.rappeler(index) {
            self.afficher_historique = false;
        }
    }
}
