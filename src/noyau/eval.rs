//! Noyau — évaluation (pipeline réel)
//!
//! forme canonique -> jetons -> Expr -> valeur f64 (post-ordre, vérifiée à chaque nœud)
//!
//! Aucune exécution dynamique de code : seule la grammaire fixe du clavier est acceptée.
//! Chaque appel possède ses jetons et son arbre ; rien n’est partagé entre appels.

use tracing::{debug, trace};

use super::erreur::{EvalError, Result};
use super::expr::{Expr, Fonction, Operateur};
use super::format::format_nombre;
use super::jetons::{format_jetons, tokenize};
use super::notation::{to_canonical, to_display};
use super::syntaxe::parse;

/// Résultat complet d’un "=" (les deux formes, pour l’écran et l’historique).
#[derive(Clone, Debug, PartialEq)]
pub struct Calcul {
    pub formule_canonique: String,
    pub valeur: f64,
    /// Nombre en forme canonique (ex: "0.5", "1e+21").
    pub resultat: String,
    /// Même nombre, passé par `to_display`.
    pub resultat_affiche: String,
}

/// API publique : évalue une expression en forme canonique.
pub fn evaluate(expr_canonique: &str) -> Result<f64> {
    // 1) Jetons
    let jetons = tokenize(expr_canonique)?;
    trace!(jetons = %format_jetons(&jetons), "tokenisation");

    // 2) AST
    let arbre = parse(&jetons)?;
    trace!(jetons = jetons.len(), "analyse");

    // 3) Valeur
    let v = evaluer(&arbre)?;
    debug!(expression = expr_canonique, valeur = v, "évaluation réussie");
    Ok(v)
}

/// Chaîne complète côté appelant : affichage -> canonique -> valeur -> affichage.
pub fn evaluate_display(expr_affichee: &str) -> Result<Calcul> {
    let formule_canonique = to_canonical(expr_affichee);

    let valeur = evaluate(&formule_canonique).inspect_err(|e| {
        debug!(expression = %formule_canonique, erreur = %e, "évaluation refusée");
    })?;

    let resultat = format_nombre(valeur);
    let resultat_affiche = to_display(&resultat);

    Ok(Calcul {
        formule_canonique,
        valeur,
        resultat,
        resultat_affiche,
    })
}

/// Étape du parcours : descendre dans un nœud, ou appliquer un nœud dont les opérandes
/// sont déjà sur la pile de valeurs.
enum Etape<'e> {
    Visite(&'e Expr),
    Negation,
    Fonction(Fonction),
    Operateur(Operateur),
}

/// Parcours post-ordre à pile explicite (gauche avant droite).
/// Toute valeur non finie est refusée au nœud qui la produit.
pub fn evaluer(expr: &Expr) -> Result<f64> {
    let mut etapes = vec![Etape::Visite(expr)];
    let mut valeurs: Vec<f64> = Vec::new();

    while let Some(etape) = etapes.pop() {
        let v = match etape {
            Etape::Visite(e) => match e {
                Expr::Litteral(v) => *v,
                Expr::Constante(k) => k.valeur(),
                Expr::Negation(x) => {
                    etapes.push(Etape::Negation);
                    etapes.push(Etape::Visite(&**x));
                    continue;
                }
                Expr::Appel(f, x) => {
                    etapes.push(Etape::Fonction(*f));
                    etapes.push(Etape::Visite(&**x));
                    continue;
                }
                Expr::Binaire(op, a, b) => {
                    etapes.push(Etape::Operateur(*op));
                    etapes.push(Etape::Visite(&**b));
                    etapes.push(Etape::Visite(&**a));
                    continue;
                }
            },
            Etape::Negation => -depile(&mut valeurs)?,
            Etape::Fonction(f) => applique_fonction(f, depile(&mut valeurs)?)?,
            Etape::Operateur(op) => {
                let b = depile(&mut valeurs)?;
                let a = depile(&mut valeurs)?;
                applique_operateur(op, a, b)?
            }
        };
        valeurs.push(fini(v)?);
    }

    depile(&mut valeurs)
}

/// Un opérande manquant ne peut venir que d’un arbre vide.
fn depile(valeurs: &mut Vec<f64>) -> Result<f64> {
    valeurs.pop().ok_or(EvalError::EmptyExpression)
}

fn applique_fonction(f: Fonction, x: f64) -> Result<f64> {
    match f {
        Fonction::Sin => Ok(x.sin()),
        Fonction::Cos => Ok(x.cos()),
        Fonction::Tan => Ok(x.tan()),
        Fonction::Log | Fonction::Ln if x <= 0.0 => Err(EvalError::DomainError {
            operation: f.nom(),
            argument: x,
        }),
        Fonction::Log => Ok(x.log10()),
        Fonction::Ln => Ok(x.ln()),
        Fonction::Sqrt if x < 0.0 => Err(EvalError::DomainError {
            operation: f.nom(),
            argument: x,
        }),
        Fonction::Sqrt => Ok(x.sqrt()),
    }
}

fn applique_operateur(op: Operateur, a: f64, b: f64) -> Result<f64> {
    match op {
        Operateur::Plus => Ok(a + b),
        Operateur::Moins => Ok(a - b),
        Operateur::Fois => Ok(a * b),
        // 0.0 == -0.0 : les deux zéros sont refusés
        Operateur::Divise if b == 0.0 => Err(EvalError::DivisionByZero),
        Operateur::Divise => Ok(a / b),
        Operateur::Puissance => {
            let v = a.powf(b);
            if v.is_nan() {
                // base négative + exposant non entier : pas de valeur réelle
                return Err(EvalError::DomainError {
                    operation: op.symbole(),
                    argument: a,
                });
            }
            Ok(v)
        }
    }
}

fn fini(v: f64) -> Result<f64> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(EvalError::Overflow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(s: &str) -> f64 {
        evaluate(s).unwrap_or_else(|e| panic!("evaluate({s:?}) erreur: {e}"))
    }

    fn err(s: &str) -> EvalError {
        match evaluate(s) {
            Ok(v) => panic!("evaluate({s:?}) devait échouer, obtenu {v}"),
            Err(e) => e,
        }
    }

    fn proche(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-12 * b.abs().max(1.0)
    }

    // --- Priorités ---

    #[test]
    fn priorites_de_base() {
        assert_eq!(ok("2+3*4"), 14.0);
        assert_eq!(ok("(2+3)*4"), 20.0);
        assert_eq!(ok("2^3^2"), 512.0);
        assert_eq!(ok("2**3**2"), 512.0);
        assert_eq!(ok("10-4-3"), 3.0);
        assert_eq!(ok("64/4/2"), 8.0);
    }

    #[test]
    fn moins_unaire() {
        assert_eq!(ok("-3"), -3.0);
        assert_eq!(ok("-2^2"), 4.0);
        assert_eq!(ok("2^-2"), 0.25);
        assert_eq!(ok("5--2"), 7.0);
        assert_eq!(ok("-(2+3)*2"), -10.0);
    }

    #[test]
    fn decimales_ieee() {
        assert_eq!(ok("0.1+0.2"), 0.1 + 0.2);
        assert_eq!(ok(".5*4"), 2.0);
    }

    // --- Fonctions et constantes ---

    #[test]
    fn fonctions_et_constantes() {
        assert_eq!(ok("sin(0)"), 0.0);
        assert_eq!(ok("cos(0)"), 1.0);
        assert_eq!(ok("pi"), std::f64::consts::PI);
        assert_eq!(ok("π"), std::f64::consts::PI);
        assert_eq!(ok("e"), std::f64::consts::E);
        assert_eq!(ok("sqrt(16)"), 4.0);
        assert_eq!(ok("log10(1000)"), 3.0);
        assert_eq!(ok("log(100)"), 2.0);
        assert_eq!(ok("ln(e)"), 1.0);
        assert!(proche(ok("tan(pi/4)"), 1.0));
        assert!(proche(ok("sin(pi/6)*2"), 1.0));
    }

    // --- Erreurs d’évaluation ---

    #[test]
    fn division_par_zero() {
        assert_eq!(err("5/0"), EvalError::DivisionByZero);
        assert_eq!(err("5/(2-2)"), EvalError::DivisionByZero);
        assert_eq!(err("1/-0"), EvalError::DivisionByZero);
    }

    #[test]
    fn erreurs_de_domaine() {
        assert_eq!(
            err("sqrt(-4)"),
            EvalError::DomainError {
                operation: "sqrt",
                argument: -4.0
            }
        );
        assert!(matches!(
            err("log(0)"),
            EvalError::DomainError {
                operation: "log",
                ..
            }
        ));
        assert!(matches!(
            err("ln(-1)"),
            EvalError::DomainError { operation: "ln", .. }
        ));
        assert!(matches!(
            err("(-8)^(1/3)"),
            EvalError::DomainError { operation: "^", .. }
        ));
    }

    #[test]
    fn depassement() {
        assert_eq!(err("e^1000"), EvalError::Overflow);
        assert_eq!(err("10^400"), EvalError::Overflow);
        assert_eq!(err(&"9".repeat(400)), EvalError::Overflow);
    }

    #[test]
    fn entrees_mal_formees() {
        assert!(matches!(
            err("2+"),
            EvalError::UnexpectedToken { .. } | EvalError::EmptyExpression
        ));
        assert!(matches!(err("(2+3"), EvalError::UnmatchedParenthesis { .. }));
        assert_eq!(err(""), EvalError::EmptyExpression);
        assert_eq!(err("   "), EvalError::EmptyExpression);
        assert!(matches!(err("2$"), EvalError::InvalidCharacter { .. }));
        assert!(matches!(err("Math.PI"), EvalError::UnknownSymbol { .. }));
    }

    #[test]
    fn deterministe() {
        for s in ["2+3*4", "sin(1)/3", "5/0", "sqrt(-1)", "(("] {
            assert_eq!(evaluate(s), evaluate(s), "expr={s:?}");
        }
    }

    // --- Chaîne affichage <-> canonique ---

    #[test]
    fn chaine_affichage() {
        let c = evaluate_display("2×π÷π").unwrap();
        assert_eq!(c.formule_canonique, "2*pi/pi");
        assert_eq!(c.valeur, 2.0);
        assert_eq!(c.resultat, "2");
        assert_eq!(c.resultat_affiche, "2");

        let c = evaluate_display("log(1000)+2^3").unwrap();
        assert_eq!(c.formule_canonique, "log10(1000)+2^3");
        assert_eq!(c.resultat, "11");

        assert_eq!(evaluate_display("7÷0"), Err(EvalError::DivisionByZero));
    }
}
