//! Tests scientifiques (campagne) : scénarios bout à bout + limites contrôlées.
//!
//! But : exercer le noyau comme le fait un clavier, sans faire chauffer la machine.
//! - saisie touche par touche (glyphes séparés par des espaces)
//! - "=" avec ou sans valeur de x
//! - solveurs (système, polynôme) sur les cas de référence
//! - stress borné (profondeur, longueur, gros entiers) sous budget temps

use std::time::{Duration, Instant};

use super::{
    resoudre_systeme, trouver_racines, Commande, Editeur, SaisieInvalide, Solution, Symbole,
    Variante,
};

fn touches(saisie: &str) -> Vec<Symbole> {
    saisie
        .split_whitespace()
        .map(|t| t.parse().unwrap_or_else(|e| panic!("touche {t:?} : {e}")))
        .collect()
}

/// Tape toutes les touches (chacune doit être acceptée) puis "=".
fn calculer(saisie: &str) -> String {
    let mut e = Editeur::new();
    for s in touches(saisie) {
        e.ajouter(s)
            .unwrap_or_else(|_| panic!("touche {s} refusée dans {saisie:?}"));
    }
    e.resoudre(None).unwrap_or_else(|_| panic!("\"=\" refusé pour {saisie:?}"))
}

/// Budget global anti-gel.
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Scénarios éditeur ------------------------ */

#[test]
fn sci_aller_retour_parentheses() {
    assert_eq!(calculer("() 3 + 4 ()"), "7");
}

#[test]
fn sci_priorites() {
    assert_eq!(calculer("3 + 4 * 2"), "11");
    assert_eq!(calculer("2 * 3 ^ 2"), "18");
    assert_eq!(calculer("2 + 4 P 2"), "30");
}

#[test]
fn sci_division_par_zero_sentinelle() {
    let mut e = Editeur::new();
    for s in touches("1 / 0") {
        e.ajouter(s).unwrap();
    }
    assert_eq!(e.resoudre(None).as_deref(), Ok("ERROR"));

    // sentinelle : plus de saisie, "=" refusé, effacement seul recours
    assert_eq!(e.ajouter(Symbole::Chiffre(5)), Err(SaisieInvalide));
    assert_eq!(e.resoudre(None), Err(SaisieInvalide));
    assert_eq!(e.executer(Commande::Effacer).as_deref(), Ok(""));
    assert_eq!(e.ajouter(Symbole::Chiffre(5)).as_deref(), Ok("5"));
}

#[test]
fn sci_idempotence_du_resultat() {
    let mut e = Editeur::new();
    for s in touches("1 . 5 * 3") {
        e.ajouter(s).unwrap();
    }
    assert_eq!(e.resoudre(None).as_deref(), Ok("4.5"));
    assert_eq!(e.resoudre(None).as_deref(), Ok("4.5"));
    assert_eq!(e.etat().len(), 1);
}

#[test]
fn sci_fermeture_automatique() {
    // groupes laissés ouverts : fermés à "=", compteurs remis à zéro
    let mut e = Editeur::new();
    for s in touches("2 * () 3 + |x| 0 - 5") {
        e.ajouter(s).unwrap();
    }
    assert_eq!((e.parentheses_ouvertes(), e.abs_ouverts()), (1, 1));
    assert_eq!(e.resoudre(None).as_deref(), Ok("16"));
    assert_eq!((e.parentheses_ouvertes(), e.abs_ouverts()), (0, 0));
}

#[test]
fn sci_multiplication_implicite() {
    assert_eq!(calculer("2 pi"), "6.28319");
    assert_eq!(calculer("() 1 + 1 () 3"), "6");
    assert_eq!(calculer("() 2 () ()  3"), "6");
}

#[test]
fn sci_trigonometrie_degres_et_pi() {
    assert_eq!(calculer("sin 3 0"), "0.5");
    assert_eq!(calculer("cos pi"), "-1");
    assert_eq!(calculer("tan 9 0"), "ERROR");
    assert_eq!(calculer("asin 1"), "90");
}

#[test]
fn sci_fonctions_droites() {
    assert_eq!(calculer("() 5 ^2"), "25");
    assert_eq!(calculer("() 5 !"), "120");
    assert_eq!(calculer("() 5 0 %"), "0.5");
    assert_eq!(calculer("sqrt 8 1 ^2"), "81");
}

#[test]
fn sci_signe_et_retour_arriere() {
    let mut e = Editeur::new();
    for s in touches("1 2") {
        e.ajouter(s).unwrap();
    }
    assert_eq!(e.basculer_signe().as_deref(), Ok("-12"));
    assert_eq!(e.basculer_signe().as_deref(), Ok("12"));
    assert_eq!(e.supprimer(), "1");
    assert_eq!(e.ajouter(Symbole::Chiffre(2)).as_deref(), Ok("12"));
}

#[test]
fn sci_variable_x() {
    let mut e = Editeur::new();
    for s in touches("x ^ 2 + 1") {
        e.ajouter(s).unwrap();
    }
    let modele = e.etat().to_vec();
    assert_eq!(e.resoudre(Some("3")).as_deref(), Ok("10"));

    // sans valeur valable : suite fermée renvoyée telle quelle
    let mut e = Editeur::new();
    e.definir_etat(modele.clone());
    assert_eq!(e.resoudre(Some("abc")).as_deref(), Ok("x^2+1"));
    let mut e = Editeur::new();
    e.definir_etat(modele);
    assert_eq!(e.resoudre(None).as_deref(), Ok("x^2+1"));
}

#[test]
fn sci_variante_basique() {
    let mut e = Editeur::avec_variante(Variante::Basique);
    assert_eq!(e.ajouter("sqrt".parse().unwrap()), Err(SaisieInvalide));
    assert_eq!(e.ajouter("pi".parse().unwrap()), Err(SaisieInvalide));
    for s in touches("() 1 + 2") {
        e.ajouter(s).unwrap();
    }
    // groupe ouvert : "=" refusé en basique
    assert_eq!(e.resoudre(None), Err(SaisieInvalide));
    e.ajouter(Symbole::Parenthese).unwrap();
    assert_eq!(e.resoudre(None).as_deref(), Ok("3"));
}

/* ------------------------ Solveurs ------------------------ */

#[test]
fn sci_systeme_deux_equations() {
    let unique = resoudre_systeme(&[vec!["1", "1", "3"], vec!["2", "1", "4"]]);
    assert_eq!(unique, Ok(Solution::Unique(vec!["1".into(), "2".into()])));
    let infinie = resoudre_systeme(&[vec!["1", "1", "3"], vec!["2", "2", "6"]]);
    assert_eq!(infinie.map(|s| s.to_string()).as_deref(), Ok("INF"));
    let aucune = resoudre_systeme(&[vec!["1", "1", "3"], vec!["2", "2", "7"]]);
    assert_eq!(aucune, Ok(Solution::Aucune));
}

#[test]
fn sci_racines_quadratiques_complexes() {
    let r = trouver_racines(&["2", "2", "1"], 2).unwrap();
    let textes: Vec<String> = r.into_iter().flatten().map(|z| z.to_string()).collect();
    assert_eq!(textes, ["-1 + i", "-1 - i"]);
}

#[test]
fn sci_racine_triple() {
    let r = trouver_racines(&["-1", "3", "-3", "1"], 3).unwrap();
    let textes: Vec<String> = r.into_iter().flatten().map(|z| z.to_string()).collect();
    assert_eq!(textes, ["1", "1", "1"]);
}

/* ------------------------ Stress contrôlé (sans brûler) ------------------------ */

#[test]
fn sci_stress_profondeur() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut e = Editeur::new();
    for _ in 0..60 {
        e.ajouter(Symbole::Parenthese).unwrap();
        budget(t0, max);
    }
    e.ajouter(Symbole::Chiffre(1)).unwrap();
    assert_eq!(e.parentheses_ouvertes(), 60);
    assert_eq!(e.resoudre(None).as_deref(), Ok("1"));
    budget(t0, max);
}

#[test]
fn sci_stress_longue_somme() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let saisie = vec!["1"; 200].join(" + ");
    budget(t0, max);
    assert_eq!(calculer(&saisie), "200");
    budget(t0, max);
}

#[test]
fn sci_stress_gros_entiers() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let p = calculer("2 ^ 1 0 0 0");
    assert_eq!(p.len(), 302);
    assert!(p.starts_with("10715086"));

    // au-delà des garde-fous : sentinelle, pas de gel
    assert_eq!(calculer("2 ^ 1 0 0 0 0 0"), "ERROR");
    assert_eq!(calculer("() 5 0 0 0 !"), "ERROR");
    budget(t0, max);
}
