//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - invariant clé : Ok(v) => v fini ; jamais de panique ; deux appels = même résultat

use std::time::{Duration, Instant};

use super::notation::VOCABULAIRE_AFFICHAGE;
use super::{evaluate, evaluate_display, to_canonical, to_display, EvalError};

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

fn gen_atom(rng: &mut Rng) -> String {
    match rng.pick(6) {
        0 => format!("{}", rng.pick(10)),
        1 => format!("{}.{}", rng.pick(100), rng.pick(100)),
        2 => "pi".to_string(),
        3 => "e".to_string(),
        4 => "0".to_string(), // zéros fréquents : divisions et log à tester
        _ => format!("-{}", rng.pick(5)),
    }
}

fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return gen_atom(rng);
    }

    let a = gen_expr(rng, depth - 1);
    match rng.pick(12) {
        0 => a,
        1 => format!("({a}+{})", gen_expr(rng, depth - 1)),
        2 => format!("({a}-{})", gen_expr(rng, depth - 1)),
        3 => format!("({a}*{})", gen_expr(rng, depth - 1)),
        4 => format!("({a}/{})", gen_expr(rng, depth - 1)),
        5 => format!("({a}^{})", gen_expr(rng, depth - 1)),
        6 => format!("sin({a})"),
        7 => format!("cos({a})"),
        8 => format!("tan({a})"),
        9 => format!("log10({a})"),
        10 => format!("ln({a})"),
        _ => format!("sqrt({a})"),
    }
}

/// Chaîne de touches au hasard (souvent invalide : c’est le but).
fn gen_touches(rng: &mut Rng, n: usize) -> String {
    (0..n)
        .map(|_| VOCABULAIRE_AFFICHAGE[rng.pick(VOCABULAIRE_AFFICHAGE.len() as u32) as usize])
        .collect()
}

/* ------------------------ Campagnes ------------------------ */

#[test]
fn fuzz_expressions_bien_formees() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);
    let mut rng = Rng::new(0x5eed_cafe);

    let mut succes = 0usize;
    for _ in 0..400 {
        let s = gen_expr(&mut rng, 4);
        let r = evaluate(&s);

        match &r {
            Ok(v) => {
                assert!(v.is_finite(), "expr={s:?} v={v}");
                succes += 1;
            }
            // bien formée => seules les erreurs d’évaluation sont possibles
            Err(e) => assert!(
                matches!(
                    e,
                    EvalError::DivisionByZero | EvalError::DomainError { .. } | EvalError::Overflow
                ),
                "expr={s:?} err={e:?}"
            ),
        }

        assert_eq!(r, evaluate(&s), "non déterministe: {s:?}");
        budget(t0, max);
    }

    assert!(succes > 0, "aucune expression évaluée avec succès");
}

#[test]
fn fuzz_touches_au_hasard() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);
    let mut rng = Rng::new(42);

    for k in 0..600 {
        let s = gen_touches(&mut rng, 1 + k % 24);

        // aller-retour exact, quelle que soit la validité
        assert_eq!(to_display(&to_canonical(&s)), s, "s={s:?}");

        // jamais de panique, toujours un résultat typé
        if let Ok(c) = evaluate_display(&s) {
            assert!(c.valeur.is_finite(), "s={s:?}");
            assert!(!c.resultat.is_empty());
        }
        budget(t0, max);
    }
}

#[test]
fn fuzz_imbrication_profonde_bornee() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    // 200 niveaux de parenthèses : reste dans la pile
    let n = 200;
    let s = format!("{}1{}", "(".repeat(n), ")".repeat(n));
    assert_eq!(evaluate(&s), Ok(1.0));

    let s = format!("{}2", "-".repeat(n));
    assert_eq!(evaluate(&s), Ok(2.0));

    let s = format!("{}1{}", "(".repeat(n), ")".repeat(n - 1));
    assert!(matches!(
        evaluate(&s),
        Err(EvalError::UnmatchedParenthesis { .. })
    ));
    budget(t0, max);
}

#[test]
fn fuzz_somme_longue() {
    let t0 = Instant::now();
    let max = Duration::from_secs(3);

    // arbre de 200 000 niveaux à gauche : évaluation et libération sans récursion
    let s = vec!["1"; 200_000].join("+");
    assert_eq!(evaluate(&s), Ok(200_000.0));

    let s = vec!["0.5"; 2000].join("+");
    assert_eq!(evaluate(&s), Ok(1000.0));

    let s = format!("({})*2", vec!["1"; 100_000].join("-"));
    assert_eq!(evaluate(&s), Ok(-199_996.0));
    budget(t0, max);
}

#[test]
fn fuzz_imbrication_extreme_refusee() {
    let t0 = Instant::now();
    let max = Duration::from_secs(3);

    // 100 000 parenthèses : erreur typée, jamais d’abandon du processus
    let n = 100_000;
    let s = format!("{}1{}", "(".repeat(n), ")".repeat(n));
    let e = evaluate(&s).unwrap_err();
    assert!(
        matches!(e, EvalError::UnexpectedToken { .. }),
        "erreur={e:?}"
    );
    assert!(e.est_syntaxique());

    let s = format!("{}1{}", "sqrt(".repeat(n), ")".repeat(n));
    assert!(matches!(
        evaluate(&s),
        Err(EvalError::UnexpectedToken { .. })
    ));

    let s = format!("{}1", "-".repeat(n));
    assert!(matches!(
        evaluate(&s),
        Err(EvalError::UnexpectedToken { .. })
    ));

    let s = vec!["1"; n].join("^");
    assert!(matches!(
        evaluate(&s),
        Err(EvalError::UnexpectedToken { .. })
    ));
    budget(t0, max);
}
