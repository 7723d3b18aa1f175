//! Calculatrice StudentHub : noyau d’évaluation, historique, réglages et session clavier.
//!
//! La vue egui (binaire) ne fait qu’appuyer sur des touches de `session::SessionCalcul`.

pub mod historique;
pub mod noyau;
pub mod reglages;
pub mod session;

pub use historique::{EntreeHistorique, HistoriqueStore};
pub use noyau::{evaluate, evaluate_display, to_canonical, to_display, EvalError};
pub use session::{SessionCalcul, Touche};
