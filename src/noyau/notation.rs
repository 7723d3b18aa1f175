// src/noyau/notation.rs
//
// Traduction forme AFFICHAGE (× ÷ π log( …) <-> forme CANONIQUE (* / pi log10( …).
//
// Table :
//   ×    <-> *
//   ÷    <-> /
//   π    <-> pi
//   log( <-> log10(
//   e, ^, sin( cos( tan( ln( sqrt( : inchangés
//
// Jamais de remplacement de sous-chaîne à l’aveugle : une suite de lettres n’est traduite
// que si elle se découpe ENTIÈREMENT en mots du vocabulaire (sinon elle est recopiée telle
// quelle). Le vocabulaire n’a aucun mot préfixe d’un autre, donc le découpage est unique.
//
// Les deux fonctions sont totales : tout caractère hors table est recopié.

/// Mots reconnus dans une suite de lettres ASCII.
const MOTS: [&str; 8] = ["sqrt", "sin", "cos", "tan", "log", "ln", "pi", "e"];

/// Jetons du clavier en forme affichage (utile aux tests d’aller-retour et à l’effacement).
pub const VOCABULAIRE_AFFICHAGE: [&str; 26] = [
    "0", "1", "2", "3", "4", "5", "6", "7", "8", "9", ".", "+", "-", "×", "÷", "^", "(", ")",
    "sin(", "cos(", "tan(", "log(", "ln(", "sqrt(", "π", "e",
];

#[derive(Clone, Copy, PartialEq, Eq)]
enum Sens {
    VersCanonique,
    VersAffichage,
}

/// Affichage -> canonique.
pub fn to_canonical(affiche: &str) -> String {
    traduit(affiche, Sens::VersCanonique)
}

/// Canonique -> affichage.
pub fn to_display(canonique: &str) -> String {
    traduit(canonique, Sens::VersAffichage)
}

/// Découpe une suite de lettres en mots du vocabulaire ; None si un reste ne correspond à rien.
fn decoupe(suite: &str) -> Option<Vec<&'static str>> {
    let mut reste = suite;
    let mut mots = Vec::new();
    while !reste.is_empty() {
        let m = MOTS.iter().find(|m| reste.starts_with(**m))?;
        mots.push(*m);
        reste = &reste[m.len()..];
    }
    Some(mots)
}

fn traduit(s: &str, sens: Sens) -> String {
    let mut out = String::with_capacity(s.len() + 8);
    let mut i = 0;

    while let Some(c) = s[i..].chars().next() {
        if c.is_ascii_alphabetic() {
            let mut fin = s[i..]
                .find(|d: char| !d.is_ascii_alphabetic())
                .map_or(s.len(), |n| i + n);
            let lettres = &s[i..fin];

            match decoupe(lettres) {
                None => out.push_str(lettres),
                Some(mots) => {
                    let apres = &s[fin..];
                    for (k, mot) in mots.iter().enumerate() {
                        let dernier = k + 1 == mots.len();
                        match (sens, *mot) {
                            // seul un `log` collé à sa parenthèse est une fonction
                            (Sens::VersCanonique, "log") if dernier && apres.starts_with('(') => {
                                out.push_str("log10");
                            }
                            (Sens::VersAffichage, "log") if dernier && apres.starts_with("10(") => {
                                out.push_str("log");
                                fin += 2;
                            }
                            (Sens::VersAffichage, "pi") => out.push('π'),
                            (_, m) => out.push_str(m),
                        }
                    }
                }
            }

            i = fin;
            continue;
        }

        match (sens, c) {
            (Sens::VersCanonique, '×') => out.push('*'),
            (Sens::VersCanonique, '÷') => out.push('/'),
            (Sens::VersCanonique, 'π') => out.push_str("pi"),
            // `**` n’est jamais produit ici : "××" doit revenir "××"
            (Sens::VersAffichage, '*') => out.push('×'),
            (Sens::VersAffichage, '/') => out.push('÷'),
            (_, c) => out.push(c),
        }
        i += c.len_utf8();
    }

    out
}
