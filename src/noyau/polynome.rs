// src/noyau/polynome.rs
//
// Racines d’un polynôme de degré 1 à 3 (formules fermées)
// -------------------------------------------------------
// Coefficients par degré croissant : [c0, c1, c2, c3] pour c0 + c1·x + c2·x² + c3·x³.
// Coefficient dominant nul => délégation au degré inférieur.
// Degré 1 sans racine (m = 0) => [None].

use super::complexe::Complexe;
use super::decimal::Decimal;
use super::erreur::{ErreurCalcul, Resultat};

pub type Racines = Vec<Option<Complexe>>;

fn entier(n: i64) -> Decimal {
    Decimal::depuis_entier(n)
}

fn produit(facteurs: &[&Decimal]) -> Decimal {
    facteurs
        .iter()
        .fold(Decimal::un(), |acc, f| &acc * *f)
}

/// Aiguillage par ordre (1 à 3).
pub fn trouver_racines<S: AsRef<str>>(coefficients: &[S], ordre: usize) -> Resultat<Racines> {
    if !(1..=3).contains(&ordre) {
        return Err(ErreurCalcul::OrdreNonSupporte(ordre));
    }
    if coefficients.len() < ordre + 1 {
        return Err(ErreurCalcul::Dimensions(format!(
            "ordre {ordre} : {} coefficients attendus, {} reçus",
            ordre + 1,
            coefficients.len()
        )));
    }

    let c: Vec<&str> = coefficients.iter().map(|s| s.as_ref()).collect();
    match ordre {
        1 => racine_lineaire(c[0], c[1]),
        2 => racines_quadratiques(c[0], c[1], c[2]),
        _ => racines_cubiques(c[0], c[1], c[2], c[3]),
    }
}

/// m·x + c = 0
pub fn racine_lineaire(ordre0: &str, ordre1: &str) -> Resultat<Racines> {
    let m = Decimal::analyser(ordre1)?;
    if m.est_zero() {
        return Ok(vec![None]);
    }
    let c = Decimal::analyser(ordre0)?;
    Ok(vec![Some(Complexe::reel((-&c).diviser(&m)?))])
}

/// a·x² + b·x + c = 0
pub fn racines_quadratiques(ordre0: &str, ordre1: &str, ordre2: &str) -> Resultat<Racines> {
    let a = Decimal::analyser(ordre2)?;
    if a.est_zero() {
        return racine_lineaire(ordre0, ordre1);
    }
    let b = Decimal::analyser(ordre1)?;
    let c = Decimal::analyser(ordre0)?;

    let delta = &(&b * &b) - &produit(&[&entier(4), &a, &c]);
    let denominateur = &entier(2) * &a;

    if !delta.est_negatif() {
        let r = delta.racine_approx()?;
        let x1 = (&-&b + &r).diviser(&denominateur)?;
        let x2 = (&-&b - &r).diviser(&denominateur)?;
        return Ok(vec![Some(Complexe::reel(x1)), Some(Complexe::reel(x2))]);
    }

    let r = delta.abs().racine_approx()?;
    let re = (-&b).diviser(&denominateur)?;
    let im = r.diviser(&denominateur)?;
    Ok(vec![
        Some(Complexe::new(re.clone(), im.clone())),
        Some(Complexe::new(re, -im)),
    ])
}

/// a·x³ + b·x² + c·x + d = 0 (ramené à a = 1)
///
/// Δ = 18bcd − 4b³d + b²c² − 4c³ − 27d², Δ0 = b² − 3c, Δ1 = 2b³ − 9bc + 27d.
/// - Δ = 0 : racines réelles, triple si Δ0 = 0, sinon double + simple
/// - sinon : C = ∛((Δ1 ± √(Δ1² − 4Δ0³))/2), x = −(b + C + Δ0/C)/3 pour les trois
///   branches de C
pub fn racines_cubiques(
    ordre0: &str,
    ordre1: &str,
    ordre2: &str,
    ordre3: &str,
) -> Resultat<Racines> {
    let a = Decimal::analyser(ordre3)?;
    if a.est_zero() {
        return racines_quadratiques(ordre0, ordre1, ordre2);
    }
    let b = Decimal::analyser(ordre2)?.diviser(&a)?;
    let c = Decimal::analyser(ordre1)?.diviser(&a)?;
    let d = Decimal::analyser(ordre0)?.diviser(&a)?;

    let b2 = &b * &b;
    let b3 = &b2 * &b;
    let c2 = &c * &c;
    let c3 = &c2 * &c;
    let d2 = &d * &d;

    let delta = &(&(&(&produit(&[&entier(18), &b, &c, &d]) - &produit(&[&entier(4), &b3, &d]))
        + &(&b2 * &c2))
        - &(&entier(4) * &c3))
        - &(&entier(27) * &d2);
    let delta0 = &b2 - &(&entier(3) * &c);
    let delta1 =
        &(&(&entier(2) * &b3) - &produit(&[&entier(9), &b, &c])) + &(&entier(27) * &d);

    let moins_trois = entier(-3);

    if delta.est_zero() {
        if delta0.est_zero() {
            let x = b.diviser(&moins_trois)?;
            return Ok(vec![Some(Complexe::reel(x)); 3]);
        }
        let simple = (&(&produit(&[&entier(4), &b, &c]) - &(&entier(9) * &d)) - &b3)
            .diviser(&delta0)?;
        let double =
            (&(&entier(9) * &d) - &(&b * &c)).diviser(&(&entier(2) * &delta0))?;
        return Ok(vec![
            Some(Complexe::reel(simple)),
            Some(Complexe::reel(double.clone())),
            Some(Complexe::reel(double)),
        ]);
    }

    // √(Δ1² − 4Δ0³), réelle ou imaginaire pure
    let pseudo = &(&delta1 * &delta1) - &produit(&[&entier(4), &delta0, &delta0, &delta0]);
    let racine = pseudo.abs().racine_approx()?;
    let sqrt_e = if pseudo.est_negatif() {
        Complexe::new(Decimal::zero(), racine)
    } else {
        Complexe::reel(racine)
    };

    // branche non nulle (évite C = 0)
    let candidat = sqrt_e.ajouter_reel(&delta1);
    let candidat = if candidat.est_non_nul() {
        candidat
    } else {
        (-&sqrt_e).ajouter_reel(&delta1)
    };
    let branches = candidat.diviser_reel(&entier(2))?.racines_cubiques()?;

    branches
        .iter()
        .map(|cc| {
            let terme = cc.inverse()?.multiplier_reel(&delta0);
            Ok(Some((cc + &terme).ajouter_reel(&b).diviser_reel(&moins_trois)?))
        })
        .collect()
}
