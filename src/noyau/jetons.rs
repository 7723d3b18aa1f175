// src/noyau/jetons.rs
//
// Tokenisation de la forme CANONIQUE.
// Supporte:
// - nombres décimaux : chiffres + au plus un point (ex: 12, 3.5, .5, 5.)
// - identifiants : sin cos tan log log10 ln sqrt (fonctions), pi π e (constantes)
// - opérateurs + - * / ^ et `**` (puissance, deux caractères)
// - parenthèses ( )
// Tout le reste échoue : InvalidCharacter / UnknownSymbol.

use super::erreur::{EvalError, Result};
use super::expr::{Constante, Fonction, Operateur};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Genre {
    Nombre(f64),
    Fonction(Fonction),
    Constante(Constante),
    Operateur(Operateur),
    ParOuvrante,
    ParFermante,
}

/// Jeton + texte source + position (octet) dans l’entrée.
#[derive(Clone, Debug, PartialEq)]
pub struct Jeton<'a> {
    pub genre: Genre,
    pub texte: &'a str,
    pub position: usize,
}

pub fn tokenize(s: &str) -> Result<Vec<Jeton<'_>>> {
    let mut out = Vec::new();
    let mut it = s.char_indices().peekable();

    while let Some(&(i, c)) = it.peek() {
        if c.is_whitespace() {
            it.next();
            continue;
        }

        // Nombre : chiffres + au plus un point
        if c.is_ascii_digit() || c == '.' {
            let mut fin = i;
            let mut point = false;
            let mut chiffres = false;
            while let Some(&(j, d)) = it.peek() {
                if d.is_ascii_digit() {
                    chiffres = true;
                } else if d == '.' && !point {
                    point = true;
                } else {
                    break;
                }
                fin = j + d.len_utf8();
                it.next();
            }

            if !chiffres {
                return Err(EvalError::InvalidCharacter {
                    caractere: '.',
                    position: i,
                });
            }

            let texte = &s[i..fin];
            // "5." et ".5" sont acceptés par f64::from_str ; seul le point isolé est exclu plus haut.
            let v: f64 = texte.parse().map_err(|_| EvalError::InvalidCharacter {
                caractere: c,
                position: i,
            })?;
            out.push(Jeton {
                genre: Genre::Nombre(v),
                texte,
                position: i,
            });
            continue;
        }

        // Identifiant : lettre puis lettres/chiffres (log10)
        if c.is_alphabetic() {
            let mut fin = i;
            while let Some(&(j, d)) = it.peek() {
                if !d.is_alphanumeric() {
                    break;
                }
                fin = j + d.len_utf8();
                it.next();
            }

            let texte = &s[i..fin];
            let genre = if let Some(f) = Fonction::depuis_nom(texte) {
                Genre::Fonction(f)
            } else if let Some(k) = Constante::depuis_nom(texte) {
                Genre::Constante(k)
            } else {
                return Err(EvalError::UnknownSymbol {
                    symbole: texte.to_string(),
                    position: i,
                });
            };
            out.push(Jeton {
                genre,
                texte,
                position: i,
            });
            continue;
        }

        it.next();
        let genre = match c {
            '(' => Genre::ParOuvrante,
            ')' => Genre::ParFermante,
            '+' => Genre::Operateur(Operateur::Plus),
            '-' => Genre::Operateur(Operateur::Moins),
            '/' => Genre::Operateur(Operateur::Divise),
            '^' => Genre::Operateur(Operateur::Puissance),
            '*' => {
                // `**` = puissance
                if matches!(it.peek(), Some(&(_, '*'))) {
                    it.next();
                    out.push(Jeton {
                        genre: Genre::Operateur(Operateur::Puissance),
                        texte: &s[i..i + 2],
                        position: i,
                    });
                    continue;
                }
                Genre::Operateur(Operateur::Fois)
            }
            _ => {
                return Err(EvalError::InvalidCharacter {
                    caractere: c,
                    position: i,
                })
            }
        };
        out.push(Jeton {
            genre,
            texte: &s[i..i + c.len_utf8()],
            position: i,
        });
    }

    Ok(out)
}

/// Format utilitaire (journal) : liste de jetons en texte.
pub fn format_jetons(jetons: &[Jeton<'_>]) -> String {
    jetons
        .iter()
        .map(|j| j.texte)
        .collect::<Vec<_>>()
        .join(" ")
}
