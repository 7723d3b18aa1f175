// src/noyau/expr.rs
//
// AST flottant (f64) + vocabulaire fixe du clavier.
// - Litteral  : nombre saisi
// - Constante : π ou e
// - Appel     : fonction unaire (sin, cos, tan, log, ln, sqrt)
// - Binaire   : + - * / ^
// - Negation  : moins unaire
//
// L’arbre est immuable une fois construit : l’évaluation le parcourt sans le modifier.

use std::fmt;

/// Fonctions unaires proposées par le clavier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Fonction {
    Sin,
    Cos,
    Tan,
    /// Logarithme décimal (bouton "log").
    Log,
    /// Logarithme népérien (bouton "ln").
    Ln,
    Sqrt,
}

impl Fonction {
    pub const TOUTES: [Fonction; 6] = [
        Fonction::Sin,
        Fonction::Cos,
        Fonction::Tan,
        Fonction::Log,
        Fonction::Ln,
        Fonction::Sqrt,
    ];

    /// Nom tel qu’il apparaît à l’écran (forme affichage).
    pub fn nom(self) -> &'static str {
        match self {
            Fonction::Sin => "sin",
            Fonction::Cos => "cos",
            Fonction::Tan => "tan",
            Fonction::Log => "log",
            Fonction::Ln => "ln",
            Fonction::Sqrt => "sqrt",
        }
    }

    /// Nom en forme canonique (seul `log` change : `log10`).
    pub fn nom_canonique(self) -> &'static str {
        match self {
            Fonction::Log => "log10",
            f => f.nom(),
        }
    }

    /// Reconnaît un identifiant canonique (accepte aussi `log` tel quel).
    pub fn depuis_nom(nom: &str) -> Option<Fonction> {
        match nom {
            "sin" => Some(Fonction::Sin),
            "cos" => Some(Fonction::Cos),
            "tan" => Some(Fonction::Tan),
            "log" | "log10" => Some(Fonction::Log),
            "ln" => Some(Fonction::Ln),
            "sqrt" => Some(Fonction::Sqrt),
            _ => None,
        }
    }
}

impl fmt::Display for Fonction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.nom())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Constante {
    Pi,
    E,
}

impl Constante {
    pub fn valeur(self) -> f64 {
        match self {
            Constante::Pi => std::f64::consts::PI,
            Constante::E => std::f64::consts::E,
        }
    }

    /// Glyphe affiché (π, e).
    pub fn glyphe(self) -> &'static str {
        match self {
            Constante::Pi => "π",
            Constante::E => "e",
        }
    }

    /// `pi`, `π` et `e` (casse exacte).
    pub fn depuis_nom(nom: &str) -> Option<Constante> {
        match nom {
            "pi" | "π" => Some(Constante::Pi),
            "e" => Some(Constante::E),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operateur {
    Plus,
    Moins,
    Fois,
    Divise,
    Puissance,
}

impl Operateur {
    /// Symbole canonique (la puissance s’écrit `^`, même si `**` est accepté en entrée).
    pub fn symbole(self) -> &'static str {
        match self {
            Operateur::Plus => "+",
            Operateur::Moins => "-",
            Operateur::Fois => "*",
            Operateur::Divise => "/",
            Operateur::Puissance => "^",
        }
    }
}

impl fmt::Display for Operateur {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbole())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Litteral(f64),
    Constante(Constante),
    Appel(Fonction, Box<Expr>),
    Binaire(Operateur, Box<Expr>, Box<Expr>),
    Negation(Box<Expr>),
}

impl Expr {
    pub fn binaire(op: Operateur, a: Expr, b: Expr) -> Expr {
        Expr::Binaire(op, Box::new(a), Box::new(b))
    }

    pub fn appel(f: Fonction, x: Expr) -> Expr {
        Expr::Appel(f, Box::new(x))
    }

    pub fn negation(x: Expr) -> Expr {
        Expr::Negation(Box::new(x))
    }

    fn est_feuille(&self) -> bool {
        matches!(self, Expr::Litteral(_) | Expr::Constante(_))
    }

    /// Décroche les sous-arbres non triviaux (remplacés par une feuille) vers `pile`.
    fn detache_enfants(&mut self, pile: &mut Vec<Box<Expr>>) {
        let mut detache = |x: &mut Box<Expr>| {
            if !x.est_feuille() {
                pile.push(std::mem::replace(x, Box::new(Expr::Litteral(0.0))));
            }
        };
        match self {
            Expr::Appel(_, x) | Expr::Negation(x) => detache(x),
            Expr::Binaire(_, a, b) => {
                detache(a);
                detache(b);
            }
            Expr::Litteral(_) | Expr::Constante(_) => {}
        }
    }
}

/// Libération itérative : la profondeur de l’arbre n’est pas bornée (longues sommes).
impl Drop for Expr {
    fn drop(&mut self) {
        let mut pile = Vec::new();
        self.detache_enfants(&mut pile);
        while let Some(mut noeud) = pile.pop() {
            noeud.detache_enfants(&mut pile);
        }
    }
}

/// Forme entièrement parenthésée, utile au journal et aux tests de précédence.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Litteral(v) => write!(f, "{v}"),
            Expr::Constante(c) => f.write_str(c.glyphe()),
            Expr::Appel(fonction, x) => write!(f, "{fonction}({x})"),
            Expr::Binaire(op, a, b) => write!(f, "({a} {op} {b})"),
            Expr::Negation(x) => write!(f, "(-{x})"),
        }
    }
}
