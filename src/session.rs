//! Session de calculatrice (état, sans vue).
//!
//! Rôle : tenir l’écran (saisie en forme affichage), la ligne de formule, l’état "Error"
//! et l’historique, et réagir aux touches du clavier. Le noyau reste pur : la session
//! l’appelle sur "=" et ne lui transmet que du texte.
//!
//! Contrats :
//! - Écran initial "0" ; une touche de saisie remplace ce "0" (sauf `.` et + × ÷ ^).
//! - "=" réussi : entrée ajoutée en tête de l’historique, l’écran montre le résultat.
//! - "=" en échec : écran "Error", formule abandonnée, historique intact.
//! - En état "Error", seules C et ⌫ sont prises en compte.

use tracing::{debug, trace, warn};

use crate::historique::{EntreeHistorique, HistoriqueMemoire, HistoriqueStore};
use crate::noyau::expr::{Constante, Fonction};
use crate::noyau::notation::VOCABULAIRE_AFFICHAGE;
use crate::noyau::{evaluate_display, Calcul, EvalError};

/// Texte affiché pour toute erreur d’évaluation.
pub const AFFICHAGE_ERREUR: &str = "Error";

const ECRAN_VIDE: &str = "0";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Touche {
    Chiffre(u8),
    Point,
    Plus,
    Moins,
    Fois,
    Divise,
    Puissance,
    ParOuvrante,
    ParFermante,
    Fonction(Fonction),
    Constante(Constante),
    Egal,
    /// C
    Effacer,
    /// ⌫
    Retour,
}

/// Disposition du pavé (lignes de haut en bas).
pub const CLAVIER: [&[Touche]; 7] = [
    &[
        Touche::Effacer,
        Touche::ParOuvrante,
        Touche::ParFermante,
        Touche::Retour,
    ],
    &[
        Touche::Fonction(Fonction::Sin),
        Touche::Fonction(Fonction::Cos),
        Touche::Fonction(Fonction::Tan),
        Touche::Divise,
    ],
    &[
        Touche::Chiffre(7),
        Touche::Chiffre(8),
        Touche::Chiffre(9),
        Touche::Fois,
    ],
    &[
        Touche::Chiffre(4),
        Touche::Chiffre(5),
        Touche::Chiffre(6),
        Touche::Moins,
    ],
    &[
        Touche::Chiffre(1),
        Touche::Chiffre(2),
        Touche::Chiffre(3),
        Touche::Plus,
    ],
    &[
        Touche::Fonction(Fonction::Log),
        Touche::Fonction(Fonction::Ln),
        Touche::Chiffre(0),
        Touche::Point,
        Touche::Egal,
    ],
    &[
        Touche::Constante(Constante::Pi),
        Touche::Constante(Constante::E),
        Touche::Fonction(Fonction::Sqrt),
        Touche::Puissance,
    ],
];

impl Touche {
    /// Texte inséré à l’écran (None pour les touches de commande).
    pub fn saisie(self) -> Option<String> {
        let s = match self {
            Touche::Chiffre(d @ 0..=9) => return Some(d.to_string()),
            // hors pavé : rien à insérer
            Touche::Chiffre(_) => return None,
            Touche::Point => ".",
            Touche::Plus => "+",
            Touche::Moins => "-",
            Touche::Fois => "×",
            Touche::Divise => "÷",
            Touche::Puissance => "^",
            Touche::ParOuvrante => "(",
            Touche::ParFermante => ")",
            Touche::Fonction(f) => return Some(format!("{}(", f.nom())),
            Touche::Constante(k) => k.glyphe(),
            Touche::Egal | Touche::Effacer | Touche::Retour => return None,
        };
        Some(s.to_string())
    }

    /// Libellé du bouton.
    pub fn libelle(self) -> String {
        match self {
            Touche::Egal => "=".to_string(),
            Touche::Effacer => "C".to_string(),
            Touche::Retour => "⌫".to_string(),
            Touche::Fonction(Fonction::Sqrt) => "√".to_string(),
            Touche::Fonction(f) => f.nom().to_string(),
            t => t.saisie().unwrap_or_default(),
        }
    }

    /// Touches qui s’ajoutent au "0" initial au lieu de le remplacer.
    fn prolonge_zero(self) -> bool {
        matches!(
            self,
            Touche::Point | Touche::Plus | Touche::Fois | Touche::Divise | Touche::Puissance
        )
    }

    /// Clavier physique : un caractère tapé -> touche.
    pub fn depuis_caractere(c: char) -> Option<Touche> {
        let t = match c {
            '0'..='9' => Touche::Chiffre(c as u8 - b'0'),
            '.' | ',' => Touche::Point,
            '+' => Touche::Plus,
            '-' => Touche::Moins,
            '*' | '×' | 'x' => Touche::Fois,
            '/' | '÷' => Touche::Divise,
            '^' => Touche::Puissance,
            '(' => Touche::ParOuvrante,
            ')' => Touche::ParFermante,
            'π' | 'p' => Touche::Constante(Constante::Pi),
            'e' => Touche::Constante(Constante::E),
            '=' => Touche::Egal,
            _ => return None,
        };
        Some(t)
    }
}

#[derive(Debug)]
pub struct SessionCalcul<H: HistoriqueStore = HistoriqueMemoire> {
    saisie: String,
    formule: String,
    erreur: Option<EvalError>,
    historique: H,
}

impl Default for SessionCalcul<HistoriqueMemoire> {
    fn default() -> Self {
        Self::new(HistoriqueMemoire::new())
    }
}

impl<H: HistoriqueStore> SessionCalcul<H> {
    pub fn new(historique: H) -> Self {
        Self {
            saisie: ECRAN_VIDE.to_string(),
            formule: String::new(),
            erreur: None,
            historique,
        }
    }

    /* ------------------------ Lecture ------------------------ */

    /// Texte de l’écran principal ("Error" en cas d’échec).
    pub fn affichage(&self) -> &str {
        if self.erreur.is_some() {
            AFFICHAGE_ERREUR
        } else {
            &self.saisie
        }
    }

    /// Ligne au-dessus de l’écran : dernière formule évaluée (vide sinon).
    pub fn formule(&self) -> &str {
        &self.formule
    }

    pub fn erreur(&self) -> Option<&EvalError> {
        self.erreur.as_ref()
    }

    pub fn historique(&self) -> Vec<EntreeHistorique> {
        self.historique.lister()
    }

    /* ------------------------ Actions ------------------------ */

    pub fn appuyer(&mut self, touche: Touche) {
        match touche {
            Touche::Effacer => self.effacer(),
            Touche::Retour => self.retour(),
            Touche::Egal => {
                if let Err(e) = self.egal() {
                    trace!(erreur = %e, "écran en erreur");
                }
            }
            t => {
                if let Some(texte) = t.saisie() {
                    self.inserer(t, &texte);
                }
            }
        }
    }

    /// C : écran "0", formule vidée, erreur oubliée. L’historique n’est pas touché.
    pub fn effacer(&mut self) {
        self.saisie = ECRAN_VIDE.to_string();
        self.formule.clear();
        self.erreur = None;
    }

    /// ⌫ : retire le dernier jeton entier ("sin(", "π", un chiffre…).
    pub fn retour(&mut self) {
        if self.erreur.is_some() {
            self.effacer();
            return;
        }

        let jeton = VOCABULAIRE_AFFICHAGE
            .iter()
            .filter(|j| self.saisie.ends_with(**j))
            .max_by_key(|j| j.len());

        match jeton {
            Some(j) => {
                let n = self.saisie.len() - j.len();
                self.saisie.truncate(n);
            }
            None => {
                self.saisie.pop();
            }
        }

        if self.saisie.is_empty() {
            self.saisie = ECRAN_VIDE.to_string();
        }
    }

    /// "=" : évalue l’écran. Le résultat (ou l’erreur) est aussi rendu à l’appelant.
    pub fn egal(&mut self) -> Result<Calcul, EvalError> {
        if let Some(e) = &self.erreur {
            return Err(e.clone());
        }

        let formule = self.saisie.clone();
        match evaluate_display(&formule) {
            Ok(calcul) => {
                let entree = EntreeHistorique::new(formule.clone(), calcul.resultat_affiche.clone());
                if let Err(e) = self.historique.ajouter(entree) {
                    // le calcul reste valable même si l’historique n’a pas suivi
                    warn!(erreur = %e, "historique : ajout impossible");
                }
                debug!(formule = %formule, resultat = %calcul.resultat_affiche, "calcul");

                self.saisie = calcul.resultat_affiche.clone();
                self.formule = formule;
                Ok(calcul)
            }
            Err(e) => {
                debug!(formule = %formule, erreur = %e, "calcul refusé");
                self.erreur = Some(e.clone());
                self.formule.clear();
                Err(e)
            }
        }
    }

    /// Recharge une entrée de l’historique (écran = résultat, formule = formule).
    pub fn rappeler(&mut self, index: usize) -> bool {
        match self.historique.lister().into_iter().nth(index) {
            Some(entree) => {
                self.saisie = entree.resultat;
                self.formule = entree.formule;
                self.erreur = None;
                true
            }
            None => false,
        }
    }

    pub fn effacer_historique(&mut self) {
        if let Err(e) = self.historique.vider() {
            warn!(erreur = %e, "historique : vidage impossible");
        }
    }

    fn inserer(&mut self, touche: Touche, texte: &str) {
        if self.erreur.is_some() {
            debug!(?touche, "touche ignorée : effacer d’abord");
            return;
        }

        if self.saisie == ECRAN_VIDE && !touche.prolonge_zero() {
            self.saisie = texte.to_string();
        } else {
            self.saisie.push_str(texte);
        }
    }
}
