//! Historique des calculs (le plus récent en premier).
//!
//! Le noyau n’en dépend pas : c’est la session qui ajoute une entrée après chaque "=" réussi.
//! Deux implémentations :
//! - `HistoriqueMemoire` : durée de la session seulement (comportement historique de l’app)
//! - `HistoriqueFichier` : même chose, recopiée dans un fichier JSON après chaque changement

use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntreeHistorique {
    /// Formule en forme affichage (ex: "2×π").
    pub formule: String,
    /// Résultat tel qu’affiché.
    pub resultat: String,
}

impl EntreeHistorique {
    pub fn new(formule: impl Into<String>, resultat: impl Into<String>) -> Self {
        Self {
            formule: formule.into(),
            resultat: resultat.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum HistoriqueError {
    #[error("historique {chemin}: {source}")]
    Io {
        chemin: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("historique {chemin}: JSON invalide: {source}")]
    Json {
        chemin: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Collaborateur "historique" : ajouter / lister / vider.
pub trait HistoriqueStore {
    /// Ajoute en tête (append).
    fn ajouter(&mut self, entree: EntreeHistorique) -> Result<(), HistoriqueError>;

    /// Entrées, la plus récente d’abord (list).
    fn lister(&self) -> Vec<EntreeHistorique>;

    /// Vide tout, sans condition (clear).
    fn vider(&mut self) -> Result<(), HistoriqueError>;

    fn len(&self) -> usize {
        self.lister().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/* ------------------------ Mémoire ------------------------ */

#[derive(Clone, Debug, Default)]
pub struct HistoriqueMemoire {
    entrees: VecDeque<EntreeHistorique>,
    /// None = illimité ; sinon les plus anciennes sont oubliées.
    capacite: Option<usize>,
}

impl HistoriqueMemoire {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn avec_capacite(capacite: usize) -> Self {
        Self {
            entrees: VecDeque::new(),
            capacite: Some(capacite),
        }
    }

    fn borne(&mut self) {
        if let Some(max) = self.capacite {
            self.entrees.truncate(max);
        }
    }
}

impl HistoriqueStore for HistoriqueMemoire {
    fn ajouter(&mut self, entree: EntreeHistorique) -> Result<(), HistoriqueError> {
        self.entrees.push_front(entree);
        self.borne();
        Ok(())
    }

    fn lister(&self) -> Vec<EntreeHistorique> {
        self.entrees.iter().cloned().collect()
    }

    fn vider(&mut self) -> Result<(), HistoriqueError> {
        self.entrees.clear();
        Ok(())
    }

    fn len(&self) -> usize {
        self.entrees.len()
    }
}

/* ------------------------ Fichier JSON ------------------------ */

/// Copie mémoire + fichier JSON réécrit après chaque ajout / vidage.
#[derive(Debug)]
pub struct HistoriqueFichier {
    chemin: PathBuf,
    memoire: HistoriqueMemoire,
}

impl HistoriqueFichier {
    /// Ouvre (ou crée à la première écriture) le fichier. Fichier absent = historique vide.
    pub fn ouvrir(
        chemin: impl Into<PathBuf>,
        capacite: Option<usize>,
    ) -> Result<Self, HistoriqueError> {
        let chemin = chemin.into();
        let mut memoire = HistoriqueMemoire {
            entrees: VecDeque::new(),
            capacite,
        };

        match fs::read_to_string(&chemin) {
            Ok(texte) => {
                let entrees: Vec<EntreeHistorique> =
                    serde_json::from_str(&texte).map_err(|source| HistoriqueError::Json {
                        chemin: chemin.clone(),
                        source,
                    })?;
                memoire.entrees = entrees.into();
                memoire.borne();
                debug!(chemin = %chemin.display(), n = memoire.entrees.len(), "historique chargé");
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(source) => return Err(HistoriqueError::Io { chemin, source }),
        }

        Ok(Self { chemin, memoire })
    }

    pub fn chemin(&self) -> &Path {
        &self.chemin
    }

    fn sauver(&self) -> Result<(), HistoriqueError> {
        let io = |source| HistoriqueError::Io {
            chemin: self.chemin.clone(),
            source,
        };

        if let Some(dossier) = self.chemin.parent() {
            fs::create_dir_all(dossier).map_err(io)?;
        }
        let texte = serde_json::to_string_pretty(&self.memoire.lister()).map_err(|source| {
            HistoriqueError::Json {
                chemin: self.chemin.clone(),
                source,
            }
        })?;
        fs::write(&self.chemin, texte).map_err(io)
    }
}

impl HistoriqueStore for HistoriqueFichier {
    fn ajouter(&mut self, entree: EntreeHistorique) -> Result<(), HistoriqueError> {
        self.memoire.ajouter(entree)?;
        self.sauver()
    }

    fn lister(&self) -> Vec<EntreeHistorique> {
        self.memoire.lister()
    }

    fn vider(&mut self) -> Result<(), HistoriqueError> {
        self.memoire.vider()?;
        self.sauver()
    }

    fn len(&self) -> usize {
        self.memoire.len()
    }
}

/// Choix à l’exécution (réglages) sans rendre la session générique côté UI.
impl HistoriqueStore for Box<dyn HistoriqueStore + Send> {
    fn ajouter(&mut self, entree: EntreeHistorique) -> Result<(), HistoriqueError> {
        (**self).ajouter(entree)
    }

    fn lister(&self) -> Vec<EntreeHistorique> {
        (**self).lister()
    }

    fn vider(&mut self) -> Result<(), HistoriqueError> {
        (**self).vider()
    }

    fn len(&self) -> usize {
        (**self).len()
    }
}
