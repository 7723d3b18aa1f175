//! Noyau de calcul (pur, sans état)
//!
//! Organisation interne :
//! - notation.rs : affichage (× ÷ π log() <-> canonique (* / pi log10()
//! - jetons.rs   : tokenisation de la forme canonique
//! - syntaxe.rs  : descente récursive -> Expr
//! - expr.rs     : AST + vocabulaire (fonctions, constantes, opérateurs)
//! - eval.rs     : pipeline complet + évaluation vérifiée
//! - format.rs   : rendu texte d’un résultat
//! - erreur.rs   : EvalError (une variante par cause)

pub mod erreur;
pub mod eval;
pub mod expr;
pub mod format;
pub mod jetons;
pub mod notation;
pub mod syntaxe;

#[cfg(test)]
mod tests_proprietes;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use erreur::EvalError;
pub use eval::{evaluate, evaluate_display, Calcul};
pub use format::format_nombre;
pub use notation::{to_canonical, to_display};
