//! Noyau — évaluation d’une suite de jetons finalisée
//!
//! groupes (parenthèses / |·|) du plus interne au plus externe
//!   -> calcul arithmétique par étages (^ ; * / ; - + ; P C)
//!   -> fonction gauche du groupe (sqrt, sin, ...) puis fonction droite (^2, !, %)
//!   -> passe finale + arrondi de sortie
//!
//! L’entrée ne contient plus la variable indépendante (substituée par l’éditeur).

use tracing::trace;

use super::decimal::{euler, pi, Decimal};
use super::erreur::{ErreurCalcul, Resultat};
use super::fonctions::{self, Angle};
use super::jetons::{
    format_jetons, Constante, FonctionDroite, FonctionGauche, Jeton, OpMilieu, Operateur,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Ouverture {
    Parenthese(Option<FonctionGauche>),
    Abs,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Fermeture {
    Parenthese(Option<FonctionDroite>),
    Abs,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Binaire {
    Op(Operateur),
    Milieu(OpMilieu),
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Element {
    Valeur(Decimal),
    Pi,
    Euler,
    Binaire(Binaire),
    Ouvrante(Ouverture),
    Fermante(Fermeture),
}

/// Étages de précédence, chacun réduit de gauche à droite.
/// `-` et `+` partagent un étage : l’ordre d’écriture décide.
const ETAGES: [&[Binaire]; 4] = [
    &[Binaire::Milieu(OpMilieu::Puissance)],
    &[
        Binaire::Op(Operateur::Multiplier),
        Binaire::Op(Operateur::Diviser),
    ],
    &[Binaire::Op(Operateur::Moins), Binaire::Op(Operateur::Plus)],
    &[
        Binaire::Milieu(OpMilieu::Permutation),
        Binaire::Milieu(OpMilieu::Combinaison),
    ],
];

fn element(j: &Jeton) -> Resultat<Element> {
    Ok(match j {
        Jeton::Nombre(s) => Element::Valeur(Decimal::analyser(s)?),
        Jeton::Constante(Constante::Pi) => Element::Pi,
        Jeton::Constante(Constante::Euler) => Element::Euler,
        Jeton::Constante(Constante::X) => return Err(ErreurCalcul::VariableLibre),
        Jeton::Operateur(o) => Element::Binaire(Binaire::Op(*o)),
        Jeton::Milieu(m) => Element::Binaire(Binaire::Milieu(*m)),
        Jeton::Ouvrante(g) => Element::Ouvrante(Ouverture::Parenthese(*g)),
        Jeton::AbsOuvrante => Element::Ouvrante(Ouverture::Abs),
        Jeton::Fermante(d) => Element::Fermante(Fermeture::Parenthese(*d)),
        Jeton::AbsFermante => Element::Fermante(Fermeture::Abs),
        Jeton::Erreur => return Err(ErreurCalcul::ExpressionInvalide("sentinelle d’erreur")),
    })
}

/// Évalue et renvoie la valeur à l’échelle de calcul.
pub fn evaluer(jetons: &[Jeton]) -> Resultat<Decimal> {
    trace!(jetons = %format_jetons(jetons), "évaluation");
    let mut elements = jetons.iter().map(element).collect::<Resultat<Vec<_>>>()?;

    // Une pile d’ouvrants par genre, un seul balayage.
    let mut parentheses: Vec<usize> = Vec::new();
    let mut abs: Vec<usize> = Vec::new();

    let mut i = 0;
    while i < elements.len() {
        let (pile, autre) = match &elements[i] {
            Element::Ouvrante(Ouverture::Parenthese(_)) => {
                parentheses.push(i);
                i += 1;
                continue;
            }
            Element::Ouvrante(Ouverture::Abs) => {
                abs.push(i);
                i += 1;
                continue;
            }
            Element::Fermante(Fermeture::Parenthese(_)) => (&mut parentheses, &abs),
            Element::Fermante(Fermeture::Abs) => (&mut abs, &parentheses),
            _ => {
                i += 1;
                continue;
            }
        };

        let o = pile
            .pop()
            .ok_or(ErreurCalcul::ExpressionInvalide("fermant sans ouvrant"))?;
        if autre.last().is_some_and(|&a| a > o) {
            return Err(ErreurCalcul::ExpressionInvalide("groupes entrelacés"));
        }

        let valeur = calcul_arithmetique(&elements[o..=i])?;
        trace!(debut = o, fin = i, valeur = %valeur, "groupe réduit");

        elements.drain(o + 1..=i);
        elements[o] = Element::Valeur(valeur);
        i = o + 1;
    }

    if !parentheses.is_empty() || !abs.is_empty() {
        return Err(ErreurCalcul::ExpressionInvalide("groupe non fermé"));
    }

    calcul_arithmetique(&elements)
}

/// API publique : évalue puis arrondit à la précision de sortie.
pub fn resoudre(jetons: &[Jeton]) -> Resultat<String> {
    evaluer(jetons).map(|v| v.vers_sortie())
}

/* ---------------- Calcul d’une tranche ---------------- */

enum Terme {
    Valeur(Decimal),
    Binaire(Binaire),
}

/// Tranche sans groupe interne, éventuellement délimitée par un ouvrant et son fermant.
fn calcul_arithmetique(tranche: &[Element]) -> Resultat<Decimal> {
    // π dans la tranche : trig de la fonction englobante en radians
    let angle = if tranche.iter().any(|e| matches!(e, Element::Pi)) {
        Angle::Radians
    } else {
        Angle::Degres
    };

    let (gauche, corps, droite) = match tranche {
        [Element::Ouvrante(g), corps @ .., Element::Fermante(d)] => (Some(*g), corps, Some(*d)),
        _ => (None, tranche, None),
    };

    let mut termes = corps
        .iter()
        .map(|e| match e {
            Element::Valeur(v) => Ok(Terme::Valeur(v.clone())),
            Element::Pi => Ok(Terme::Valeur(pi())),
            Element::Euler => Ok(Terme::Valeur(euler())),
            Element::Binaire(b) => Ok(Terme::Binaire(*b)),
            Element::Ouvrante(_) | Element::Fermante(_) => {
                Err(ErreurCalcul::ExpressionInvalide("groupe mal apparié"))
            }
        })
        .collect::<Resultat<Vec<_>>>()?;

    for etage in ETAGES {
        reduire_etage(&mut termes, etage)?;
    }

    let valeur = match termes.as_slice() {
        [Terme::Valeur(v)] => v.clone(),
        [] => return Err(ErreurCalcul::ExpressionInvalide("groupe vide")),
        _ => return Err(ErreurCalcul::ExpressionInvalide("opérande manquant")),
    };

    let valeur = match gauche {
        Some(Ouverture::Abs) => valeur.abs(),
        Some(Ouverture::Parenthese(Some(g))) => appliquer_gauche(g, &valeur, angle)?,
        _ => valeur,
    };

    match droite {
        Some(Fermeture::Parenthese(Some(d))) => appliquer_droite(d, &valeur),
        _ => Ok(valeur),
    }
}

/// Réduit (gauche op droite) -> valeur, de gauche à droite, pour les opérations de l’étage.
fn reduire_etage(termes: &mut Vec<Terme>, etage: &[Binaire]) -> Resultat<()> {
    let mut i = 0;
    while i < termes.len() {
        let op = match &termes[i] {
            Terme::Binaire(b) if etage.contains(b) => *b,
            _ => {
                i += 1;
                continue;
            }
        };

        let (gauche, droite) = match (i.checked_sub(1).map(|g| &termes[g]), termes.get(i + 1)) {
            (Some(Terme::Valeur(g)), Some(Terme::Valeur(d))) => (g, d),
            _ => return Err(ErreurCalcul::ExpressionInvalide("opérande manquant")),
        };
        let resultat = appliquer_binaire(op, gauche, droite)?;

        termes.drain(i..=i + 1);
        termes[i - 1] = Terme::Valeur(resultat);
        // i pointe maintenant sur l’élément qui suivait l’opérande droit
    }
    Ok(())
}

fn appliquer_binaire(op: Binaire, g: &Decimal, d: &Decimal) -> Resultat<Decimal> {
    match op {
        Binaire::Op(Operateur::Plus) => Ok(g + d),
        Binaire::Op(Operateur::Moins) => Ok(g - d),
        Binaire::Op(Operateur::Multiplier) => Ok(g * d),
        Binaire::Op(Operateur::Diviser) => g.diviser(d),
        Binaire::Milieu(OpMilieu::Puissance) => g.puissance(d),
        Binaire::Milieu(OpMilieu::Permutation) => Decimal::permutation(g, d),
        Binaire::Milieu(OpMilieu::Combinaison) => Decimal::combinaison(g, d),
    }
}

fn appliquer_gauche(f: FonctionGauche, x: &Decimal, angle: Angle) -> Resultat<Decimal> {
    match f {
        FonctionGauche::Racine => x.racine_approx(),
        FonctionGauche::Inverse => fonctions::inverse(x),
        FonctionGauche::Sin => fonctions::sin(x, angle),
        FonctionGauche::Cos => fonctions::cos(x, angle),
        FonctionGauche::Tan => fonctions::tan(x, angle),
        FonctionGauche::Asin => fonctions::asin(x),
        FonctionGauche::Acos => fonctions::acos(x),
        FonctionGauche::Atan => fonctions::atan(x),
        FonctionGauche::Log => fonctions::log10(x),
        FonctionGauche::Ln => fonctions::ln(x),
        FonctionGauche::Exp => fonctions::exp(x),
    }
}

fn appliquer_droite(f: FonctionDroite, x: &Decimal) -> Resultat<Decimal> {
    match f {
        FonctionDroite::Carre => Ok(x * x),
        FonctionDroite::Factorielle => x.factorielle(),
        FonctionDroite::Pourcentage => x.diviser(&Decimal::depuis_entier(100)),
    }
}
