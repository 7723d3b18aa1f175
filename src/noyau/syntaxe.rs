// src/noyau/syntaxe.rs
//
// Descente récursive : jetons -> Expr.
//
// Grammaire (priorité croissante) :
//   expr    := terme (('+'|'-') terme)*
//   terme   := puiss (('*'|'/') puiss)*
//   puiss   := unaire ('^' puiss)?          (associative à droite)
//   unaire  := '-' unaire | primaire
//   primaire:= NOMBRE | CONST | FONCTION '(' expr ')' | '(' expr ')'
//
// Conséquence voulue : le moins unaire lie plus fort que '^' => "-2^2" = (-2)^2 = 4.
//
// Erreurs :
// - aucun jeton             => EmptyExpression
// - parenthèses déséquilibrées (compte) => UnmatchedParenthesis, avant la grammaire
// - le reste                => UnexpectedToken (trouve = None en fin d’entrée)
// - imbrication au-delà de PROFONDEUR_MAX (parenthèses, fonctions, '-' unaires, '^' en
//   chaîne) => UnexpectedToken sur le jeton qui ouvre le niveau de trop
//
// Les chaînes + - * / sont lues en boucle : leur longueur n’est pas bornée.

use super::erreur::{EvalError, Result};
use super::expr::{Expr, Operateur};
use super::jetons::{Genre, Jeton};

/// Niveaux d’imbrication acceptés par la descente récursive.
pub const PROFONDEUR_MAX: usize = 256;

pub fn parse(jetons: &[Jeton<'_>]) -> Result<Expr> {
    if jetons.is_empty() {
        return Err(EvalError::EmptyExpression);
    }
    verifie_parentheses(jetons)?;

    let mut p = Parseur {
        jetons,
        pos: 0,
        profondeur: 0,
    };
    let e = p.expr()?;

    if let Some(j) = p.courant() {
        return Err(p.inattendu(j));
    }
    Ok(e)
}

/// Compte les parenthèses : une ')' sans '(' ou une '(' jamais fermée.
fn verifie_parentheses(jetons: &[Jeton<'_>]) -> Result<()> {
    let mut ouvertes: Vec<usize> = Vec::new();
    for j in jetons {
        match j.genre {
            Genre::ParOuvrante => ouvertes.push(j.position),
            Genre::ParFermante => {
                if ouvertes.pop().is_none() {
                    return Err(EvalError::UnmatchedParenthesis {
                        position: j.position,
                    });
                }
            }
            _ => {}
        }
    }
    match ouvertes.first() {
        Some(&position) => Err(EvalError::UnmatchedParenthesis { position }),
        None => Ok(()),
    }
}

struct Parseur<'j, 'a> {
    jetons: &'j [Jeton<'a>],
    pos: usize,
    profondeur: usize,
}

impl<'j, 'a> Parseur<'j, 'a> {
    fn courant(&self) -> Option<&'j Jeton<'a>> {
        self.jetons.get(self.pos)
    }

    fn avance(&mut self) -> Option<&'j Jeton<'a>> {
        let j = self.jetons.get(self.pos);
        if j.is_some() {
            self.pos += 1;
        }
        j
    }

    fn operateur_courant(&self) -> Option<Operateur> {
        match self.courant() {
            Some(Jeton {
                genre: Genre::Operateur(op),
                ..
            }) => Some(*op),
            _ => None,
        }
    }

    fn inattendu(&self, j: &Jeton<'_>) -> EvalError {
        EvalError::UnexpectedToken {
            trouve: Some(j.texte.to_string()),
            position: j.position,
        }
    }

    fn fin_prematuree(&self) -> EvalError {
        let position = self
            .jetons
            .last()
            .map(|j| j.position + j.texte.len())
            .unwrap_or(0);
        EvalError::UnexpectedToken {
            trouve: None,
            position,
        }
    }

    /// Exécute `suite` un niveau plus bas ; refuse le jeton courant au-delà de la borne.
    fn imbrique<T>(&mut self, suite: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        if self.profondeur >= PROFONDEUR_MAX {
            return Err(match self.courant() {
                Some(j) => self.inattendu(j),
                None => self.fin_prematuree(),
            });
        }
        self.profondeur += 1;
        let r = suite(self);
        self.profondeur -= 1;
        r
    }

    fn expr(&mut self) -> Result<Expr> {
        let mut gauche = self.terme()?;
        while let Some(op @ (Operateur::Plus | Operateur::Moins)) = self.operateur_courant() {
            self.pos += 1;
            let droite = self.terme()?;
            gauche = Expr::binaire(op, gauche, droite);
        }
        Ok(gauche)
    }

    fn terme(&mut self) -> Result<Expr> {
        let mut gauche = self.puiss()?;
        while let Some(op @ (Operateur::Fois | Operateur::Divise)) = self.operateur_courant() {
            self.pos += 1;
            let droite = self.puiss()?;
            gauche = Expr::binaire(op, gauche, droite);
        }
        Ok(gauche)
    }

    fn puiss(&mut self) -> Result<Expr> {
        let base = self.unaire()?;
        if self.operateur_courant() == Some(Operateur::Puissance) {
            // récursion à droite => 2^3^2 = 2^(3^2)
            let exposant = self.imbrique(|p| {
                p.pos += 1;
                p.puiss()
            })?;
            return Ok(Expr::binaire(Operateur::Puissance, base, exposant));
        }
        Ok(base)
    }

    fn unaire(&mut self) -> Result<Expr> {
        if self.operateur_courant() == Some(Operateur::Moins) {
            let x = self.imbrique(|p| {
                p.pos += 1;
                p.unaire()
            })?;
            return Ok(Expr::negation(x));
        }
        self.primaire()
    }

    fn primaire(&mut self) -> Result<Expr> {
        match self.courant() {
            Some(Jeton {
                genre: Genre::Fonction(_) | Genre::ParOuvrante,
                ..
            }) => self.imbrique(Self::groupe),
            _ => self.groupe(),
        }
    }

    /// NOMBRE | CONST | FONCTION '(' expr ')' | '(' expr ')'
    fn groupe(&mut self) -> Result<Expr> {
        let j = self.avance().ok_or_else(|| self.fin_prematuree())?;

        match j.genre {
            Genre::Nombre(v) => Ok(Expr::Litteral(v)),
            Genre::Constante(k) => Ok(Expr::Constante(k)),
            Genre::Fonction(f) => {
                // argument obligatoirement parenthésé : sin(…)
                self.attend_ouvrante()?;
                let x = self.expr()?;
                self.attend_fermante()?;
                Ok(Expr::appel(f, x))
            }
            Genre::ParOuvrante => {
                let x = self.expr()?;
                self.attend_fermante()?;
                Ok(x)
            }
            Genre::Operateur(_) | Genre::ParFermante => Err(self.inattendu(j)),
        }
    }

    fn attend_ouvrante(&mut self) -> Result<()> {
        match self.avance() {
            Some(Jeton {
                genre: Genre::ParOuvrante,
                ..
            }) => Ok(()),
            Some(j) => Err(self.inattendu(j)),
            None => Err(self.fin_prematuree()),
        }
    }

    fn attend_fermante(&mut self) -> Result<()> {
        match self.avance() {
            Some(Jeton {
                genre: Genre::ParFermante,
                ..
            }) => Ok(()),
            Some(j) => Err(self.inattendu(j)),
            None => Err(self.fin_prematuree()),
        }
    }
}
