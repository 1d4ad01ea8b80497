//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler l’éditeur sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - suites de touches courtes, toutes les touches du clavier
//! - puissances bornées en exposant et en taille (sentinelle, pas de gel)
//! - budget temps global
//! - invariants vérifiés après chaque commande :
//!   * compteurs == rescan complet de la suite
//!   * refus => état inchangé
//!   * "=" accepté => aucun groupe ouvert
//!   * signe basculé deux fois => littéral d’origine

use std::time::{Duration, Instant};

use super::editeur::piles_ouvertes;
use super::{Commande, Editeur, Jeton, Symbole, Variante};

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

/* ------------------------ Génération de commandes ------------------------ */

const TOUCHES: [&str; 27] = [
    ".", "+", "-", "*", "/", "^", "P", "C", "()", "|x|", "pi", "e", "x", "sqrt", "sin", "cos",
    "tan", "asin", "acos", "atan", "log", "ln", "e^", "^-1", "^2", "!", "%",
];

fn gen_commande(rng: &mut Rng) -> Commande {
    match rng.pick(20) {
        // chiffres majoritaires, sinon rien ne s’évalue
        0..=6 => Commande::Ajouter(Symbole::Chiffre(rng.pick(10) as u8)),
        7..=14 => {
            let t = TOUCHES[rng.pick(TOUCHES.len() as u32) as usize];
            Commande::Ajouter(t.parse().unwrap_or_else(|e| panic!("touche {t:?} : {e}")))
        }
        15 | 16 => Commande::Supprimer,
        17 => Commande::BasculerSigne,
        18 => Commande::Resoudre(Some("2".into())),
        _ => {
            if rng.pick(4) == 0 {
                Commande::Effacer
            } else {
                Commande::Resoudre(None)
            }
        }
    }
}

/* ------------------------ Invariants ------------------------ */

fn check_compteurs(e: &Editeur, contexte: &str) {
    let (parentheses, abs) = piles_ouvertes(e.etat());
    assert_eq!(
        (e.parentheses_ouvertes(), e.abs_ouverts()),
        (parentheses.len(), abs.len()),
        "compteurs faux après {contexte} : {:?}",
        e.affichage()
    );
}

/// Exécute une commande et vérifie les invariants ; renvoie l’affichage si acceptée.
fn executer_verifie(e: &mut Editeur, commande: Commande) -> Option<String> {
    let avant = e.clone();
    let resoudre = matches!(commande, Commande::Resoudre(_));
    let trace = format!("{commande:?} sur {:?}", avant.affichage());

    match e.executer(commande) {
        Ok(affiche) => {
            assert_eq!(affiche, e.affichage(), "{trace}");
            if resoudre {
                assert_eq!((e.parentheses_ouvertes(), e.abs_ouverts()), (0, 0), "{trace}");
            }
            check_compteurs(e, &trace);
            Some(affiche)
        }
        Err(_) => {
            assert_eq!(e.etat(), avant.etat(), "refus => état inchangé ({trace})");
            assert_eq!(e.parentheses_ouvertes(), avant.parentheses_ouvertes(), "{trace}");
            assert_eq!(e.abs_ouverts(), avant.abs_ouverts(), "{trace}");
            None
        }
    }
}

fn campagne(seed: u64, variante: Variante, sessions: usize, longueur: u32) -> Vec<String> {
    let mut rng = Rng::new(seed);
    let mut journal = Vec::new();

    for _ in 0..sessions {
        let mut e = Editeur::avec_variante(variante);
        for _ in 0..1 + rng.pick(longueur) {
            let commande = gen_commande(&mut rng);
            journal.push(executer_verifie(&mut e, commande).unwrap_or_default());
        }
        journal.push(executer_verifie(&mut e, Commande::Resoudre(None)).unwrap_or_default());
    }
    journal
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_invariants_scientifique() {
    let t0 = Instant::now();
    let max = Duration::from_millis(3000);

    let journal = campagne(0xC0FFEE_u64, Variante::Scientifique, 300, 14);
    budget(t0, max);

    // on veut voir des résultats et des échecs, sinon le fuzz ne “balaye” rien
    let nombres = journal.iter().filter(|s| s.parse::<f64>().is_ok()).count();
    let erreurs = journal.iter().filter(|s| s.as_str() == "ERROR").count();
    assert!(nombres > 10, "trop peu de nombres: {nombres}");
    assert!(erreurs > 0, "aucune sentinelle vue: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_invariants_basique() {
    let t0 = Instant::now();
    let max = Duration::from_millis(3000);

    campagne(0xBADC0DE_u64, Variante::Basique, 200, 14);
    budget(t0, max);
}

#[test]
fn fuzz_safe_determinisme() {
    let t0 = Instant::now();
    let max = Duration::from_millis(3000);

    // même seed => mêmes commandes => mêmes affichages
    let a = campagne(42, Variante::Scientifique, 60, 12);
    let b = campagne(42, Variante::Scientifique, 60, 12);
    assert_eq!(a, b);
    budget(t0, max);
}

#[test]
fn fuzz_safe_signe_involutif() {
    let t0 = Instant::now();
    let max = Duration::from_millis(1000);

    let mut rng = Rng::new(7);
    for _ in 0..200 {
        let mut e = Editeur::new();
        for _ in 0..1 + rng.pick(8) {
            if let Commande::Ajouter(s) = gen_commande(&mut rng) {
                let _ = e.ajouter(s);
            }
        }
        let avant = e.etat().to_vec();
        if e.basculer_signe().is_ok() {
            assert!(matches!(e.etat().last(), Some(Jeton::Nombre(_))));
            e.basculer_signe().unwrap();
        }
        assert_eq!(e.etat(), avant.as_slice());
        budget(t0, max);
    }
}

#[test]
fn fuzz_safe_retour_arriere_puis_retape() {
    let t0 = Instant::now();
    let max = Duration::from_millis(1000);

    // retirer puis retaper un chiffre redonne le même affichage
    let mut rng = Rng::new(0x5EED);
    for _ in 0..200 {
        let mut e = Editeur::new();
        for _ in 0..1 + rng.pick(10) {
            if let Commande::Ajouter(s) = gen_commande(&mut rng) {
                let _ = e.ajouter(s);
            }
        }
        let chiffre = rng.pick(10) as u8;
        if e.ajouter(Symbole::Chiffre(chiffre)).is_err() {
            continue;
        }
        let affiche = e.affichage();
        e.supprimer();
        check_compteurs(&e, "retour arrière");
        assert_eq!(e.ajouter(Symbole::Chiffre(chiffre)).ok(), Some(affiche));
        budget(t0, max);
    }
}
