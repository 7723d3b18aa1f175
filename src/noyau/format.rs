// src/noyau/format.rs
//
// Rendu texte d’un résultat fini (forme canonique).
// Règles (identiques à l’ancien écran) :
// - plus court décimal qui relit la même valeur (0.1+0.2 -> 0.30000000000000004)
// - -0 s’affiche 0
// - |v| >= 1e21 ou |v| < 1e-6 : notation exposant, signe explicite (1e+21, 1.5e-7)

/// Seuils de bascule vers la notation exposant.
const SEUIL_GRAND: f64 = 1e21;
const SEUIL_PETIT: f64 = 1e-6;

pub fn format_nombre(v: f64) -> String {
    if v == 0.0 {
        return "0".to_string();
    }

    let a = v.abs();
    if a >= SEUIL_GRAND || a < SEUIL_PETIT {
        // `{:e}` donne déjà la mantisse la plus courte : 1.5e-7, 1e21
        let s = format!("{v:e}");
        return match s.split_once('e') {
            Some((mantisse, exp)) if !exp.starts_with('-') => format!("{mantisse}e+{exp}"),
            _ => s,
        };
    }

    format!("{v}")
}
