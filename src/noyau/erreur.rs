// src/noyau/erreur.rs
//
// Erreurs du noyau : une variante par cause, jamais de fourre-tout.
// L’UI affiche "Error" pour toutes, mais les tests (et le journal) inspectent la variante.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, EvalError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// Caractère hors vocabulaire (ex: '#', '.' isolé).
    #[error("caractère invalide '{caractere}' (octet {position})")]
    InvalidCharacter { caractere: char, position: usize },

    /// Mot inconnu (ni fonction ni constante).
    #[error("symbole inconnu '{symbole}' (octet {position})")]
    UnknownSymbol { symbole: String, position: usize },

    /// Violation de grammaire. `trouve == None` : fin d’expression prématurée.
    #[error("jeton inattendu {} (octet {position})", .trouve.as_deref().unwrap_or("<fin>"))]
    UnexpectedToken {
        trouve: Option<String>,
        position: usize,
    },

    #[error("parenthèse non appariée (octet {position})")]
    UnmatchedParenthesis { position: usize },

    #[error("expression vide")]
    EmptyExpression,

    #[error("division par zéro")]
    DivisionByZero,

    /// Argument hors domaine : √ négatif, log/ln non positif, puissance sans valeur réelle.
    #[error("hors domaine : {operation} appliqué à {argument}")]
    DomainError {
        operation: &'static str,
        argument: f64,
    },

    /// Résultat non fini (ex: e^1000).
    #[error("dépassement de capacité")]
    Overflow,
}

impl EvalError {
    /// Erreur levée avant l’évaluation (lexique ou syntaxe) ?
    pub fn est_syntaxique(&self) -> bool {
        matches!(
            self,
            EvalError::InvalidCharacter { .. }
                | EvalError::UnknownSymbol { .. }
                | EvalError::UnexpectedToken { .. }
                | EvalError::UnmatchedParenthesis { .. }
                | EvalError::EmptyExpression
        )
    }
}
