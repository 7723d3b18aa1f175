//! Réglages (fichier TOML dans le dossier de configuration de l’utilisateur).
//!
//! `<config_dir>/calculatrice-studenthub/reglages.toml`, par exemple :
//!
//! ```toml
//! journal = "calculatrice_studenthub=debug"
//!
//! [historique]
//! persistant = true
//! capacite = 50   # absent : historique illimité
//! ```
//!
//! Fichier absent => valeurs par défaut. Fichier illisible => erreur (l’appelant décide).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::historique::{HistoriqueFichier, HistoriqueMemoire, HistoriqueStore};

/// Nom du dossier (config + données).
pub const DOSSIER_APP: &str = "calculatrice-studenthub";

#[derive(Debug, Error)]
pub enum ReglagesError {
    #[error("réglages {chemin}: {source}")]
    Io {
        chemin: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("réglages {chemin}: TOML invalide: {source}")]
    Toml {
        chemin: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reglages {
    /// Filtre du journal (syntaxe `EnvFilter`) ; `RUST_LOG` garde la priorité.
    #[serde(default = "default_journal")]
    pub journal: String,

    #[serde(default)]
    pub historique: ReglagesHistorique,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReglagesHistorique {
    /// false : historique en mémoire, perdu à la fermeture.
    #[serde(default)]
    pub persistant: bool,

    /// Nombre maximal d’entrées conservées ; absent = illimité.
    #[serde(default)]
    pub capacite: Option<usize>,

    /// Fichier JSON ; par défaut `<data_dir>/calculatrice-studenthub/historique.json`.
    #[serde(default)]
    pub fichier: Option<PathBuf>,
}

fn default_journal() -> String {
    "warn".to_string()
}

impl Default for Reglages {
    fn default() -> Self {
        Self {
            journal: default_journal(),
            historique: ReglagesHistorique::default(),
        }
    }
}

impl Default for ReglagesHistorique {
    fn default() -> Self {
        Self {
            persistant: false,
            capacite: None,
            fichier: None,
        }
    }
}

impl Reglages {
    /// Emplacement standard (None si la plateforme n’a pas de dossier de config, ex: wasm).
    pub fn chemin_standard() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(DOSSIER_APP).join("reglages.toml"))
    }

    /// Charge le fichier standard, ou les défauts s’il n’existe pas.
    pub fn charger() -> Result<Self, ReglagesError> {
        match Self::chemin_standard() {
            Some(chemin) => Self::depuis_fichier(&chemin),
            None => Ok(Self::default()),
        }
    }

    pub fn depuis_fichier(chemin: &Path) -> Result<Self, ReglagesError> {
        let texte = match std::fs::read_to_string(chemin) {
            Ok(t) => t,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ReglagesError::Io {
                    chemin: chemin.to_path_buf(),
                    source,
                })
            }
        };
        Self::depuis_texte(&texte).map_err(|source| ReglagesError::Toml {
            chemin: chemin.to_path_buf(),
            source,
        })
    }

    pub fn depuis_texte(texte: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(texte)
    }

    /// Fichier d’historique effectif (réglage explicite, sinon dossier de données).
    pub fn fichier_historique(&self) -> Option<PathBuf> {
        self.historique.fichier.clone().or_else(|| {
            dirs::data_dir().map(|d| d.join(DOSSIER_APP).join("historique.json"))
        })
    }

    /// Construit le store demandé. Persistant impossible (pas de dossier, fichier illisible)
    /// => repli sur la mémoire, avec un avertissement.
    pub fn ouvrir_historique(&self) -> Box<dyn HistoriqueStore + Send> {
        if !self.historique.persistant {
            return Box::new(self.historique_memoire());
        }

        let Some(chemin) = self.fichier_historique() else {
            tracing::warn!("aucun dossier de données : historique en mémoire");
            return Box::new(self.historique_memoire());
        };

        match HistoriqueFichier::ouvrir(chemin, self.historique.capacite) {
            Ok(h) => Box::new(h),
            Err(e) => {
                tracing::warn!(erreur = %e, "historique persistant indisponible : mémoire");
                Box::new(self.historique_memoire())
            }
        }
    }

    fn historique_memoire(&self) -> HistoriqueMemoire {
        match self.historique.capacite {
            Some(max) => HistoriqueMemoire::avec_capacite(max),
            None => HistoriqueMemoire::new(),
        }
    }
}
