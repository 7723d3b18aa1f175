//! Tests de propriétés : les garanties observables du noyau, vues de l’extérieur.
//!
//! - aller-retour affichage -> canonique -> affichage
//! - déterminisme (aucun état caché)
//! - priorités, erreurs typées, constantes
//! - une erreur syntaxique court-circuite toute évaluation

use super::{evaluate, evaluate_display, to_canonical, to_display, EvalError};

fn ok(expr: &str) -> f64 {
    evaluate(expr).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
}

/* ------------------------ Priorités ------------------------ */

#[test]
fn prop_priorites() {
    assert_eq!(ok("2+3*4"), 14.0);
    assert_eq!(ok("2^3^2"), 512.0);
    assert_eq!(ok("(2+3)*4"), 20.0);
}

/* ------------------------ Erreurs typées ------------------------ */

#[test]
fn prop_division_par_zero_jamais_infini() {
    assert_eq!(evaluate("5/0"), Err(EvalError::DivisionByZero));
    assert_eq!(evaluate("0/0"), Err(EvalError::DivisionByZero));
}

#[test]
fn prop_domaines() {
    assert!(matches!(
        evaluate("sqrt(-4)"),
        Err(EvalError::DomainError { .. })
    ));
    assert!(matches!(
        evaluate("log(0)"),
        Err(EvalError::DomainError { .. })
    ));
}

#[test]
fn prop_fonctions_constantes() {
    assert_eq!(ok("sin(0)"), 0.0);
    assert_eq!(ok("pi"), std::f64::consts::PI);
}

#[test]
fn prop_entrees_mal_formees() {
    assert!(matches!(
        evaluate("2+"),
        Err(EvalError::UnexpectedToken { .. } | EvalError::EmptyExpression)
    ));
    assert!(matches!(
        evaluate("(2+3"),
        Err(EvalError::UnmatchedParenthesis { .. })
    ));
}

#[test]
fn prop_syntaxe_avant_evaluation() {
    // "5/0" serait DivisionByZero, mais la parenthèse manquante est vue d’abord
    let e = evaluate("(5/0").unwrap_err();
    assert!(e.est_syntaxique(), "erreur={e:?}");

    let e = evaluate("sqrt(-1) +").unwrap_err();
    assert!(e.est_syntaxique(), "erreur={e:?}");

    assert!(!EvalError::DivisionByZero.est_syntaxique());
}

/* ------------------------ Déterminisme ------------------------ */

#[test]
fn prop_determinisme() {
    for s in [
        "2+3*4",
        "sin(1)+cos(1)",
        "e^pi",
        "5/0",
        "log(-1)",
        ")(",
        "",
    ] {
        let a = evaluate(s);
        let b = evaluate(s);
        assert_eq!(a, b, "expr={s:?}");
    }
}

#[test]
fn prop_concurrence_sans_etat_partage() {
    let attendu = evaluate("sqrt(2)*sqrt(2)");
    let fils: Vec<_> = (0..4)
        .map(|_| std::thread::spawn(|| evaluate("sqrt(2)*sqrt(2)")))
        .collect();
    for f in fils {
        assert_eq!(f.join().unwrap(), attendu);
    }
}

/* ------------------------ Aller-retour ------------------------ */

#[test]
fn prop_aller_retour_touches() {
    let touches = [
        "7", "×", "(", "π", "÷", "2", ")", "^", "2", "-", "log(", "e", ")", "+", "sqrt(", "9",
        ")",
    ];
    let mut s = String::new();
    for t in touches {
        s.push_str(t);
        assert_eq!(to_display(&to_canonical(&s)), s, "s={s:?}");
    }
}

#[test]
fn prop_affichage_complet() {
    let c = evaluate_display("2×(3+4)").unwrap();
    assert_eq!(c.valeur, 14.0);
    assert_eq!(c.resultat_affiche, "14");

    let c = evaluate_display("1÷4").unwrap();
    assert_eq!(c.resultat, "0.25");

    let c = evaluate_display("10^21").unwrap();
    assert_eq!(c.resultat, "1e+21");
}
