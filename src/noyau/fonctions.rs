// src/noyau/fonctions.rs
//
// Fonctions transcendantes (trig, réciproques, log, exp)
// ------------------------------------------------------
// Passage par f64 puis re-quantification à l’échelle de calcul.
// - sin/cos/tan : argument en degrés, sauf si l’appelant demande les radians
//   (argument contenant π)
// - asin/acos/atan : résultat toujours en degrés
// - tan(90° + k·180°) : hors domaine
// - log10 / ln : argument > 0

use std::f64::consts::PI;

use super::decimal::Decimal;
use super::erreur::{ErreurCalcul, Resultat};

/// Convention d’angle pour sin/cos/tan.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Angle {
    #[default]
    Degres,
    Radians,
}

impl Angle {
    fn vers_radians(self, x: &Decimal) -> f64 {
        match self {
            Angle::Degres => x.vers_f64() * (PI / 180.0),
            Angle::Radians => x.vers_f64(),
        }
    }
}

pub fn radians_vers_degres(radians: &Decimal) -> Resultat<Decimal> {
    Decimal::depuis_f64(radians.vers_f64() * (180.0 / PI))
}

/* ---------------- Trig directe ---------------- */

pub fn sin(x: &Decimal, angle: Angle) -> Resultat<Decimal> {
    Decimal::depuis_f64(angle.vers_radians(x).sin())
}

pub fn cos(x: &Decimal, angle: Angle) -> Resultat<Decimal> {
    Decimal::depuis_f64(angle.vers_radians(x).cos())
}

pub fn tan(x: &Decimal, angle: Angle) -> Resultat<Decimal> {
    if angle == Angle::Degres && est_multiple_impair_de_90(x) {
        return Err(ErreurCalcul::HorsDomaine(format!("tan({})", x.vers_sortie())));
    }
    Decimal::depuis_f64(angle.vers_radians(x).tan())
}

/// x = 90 + 180·k (exactement, à l’échelle de calcul).
fn est_multiple_impair_de_90(x: &Decimal) -> bool {
    let decale = x - &Decimal::depuis_entier(90);
    decale
        .diviser(&Decimal::depuis_entier(180))
        .map(|q| q.est_entier())
        .unwrap_or(false)
}

/* ---------------- Trig réciproque (degrés) ---------------- */

pub fn asin(x: &Decimal) -> Resultat<Decimal> {
    radians_vers_degres(&Decimal::depuis_f64(x.vers_f64().asin())?)
}

pub fn acos(x: &Decimal) -> Resultat<Decimal> {
    radians_vers_degres(&Decimal::depuis_f64(x.vers_f64().acos())?)
}

pub fn atan(x: &Decimal) -> Resultat<Decimal> {
    radians_vers_degres(&Decimal::depuis_f64(x.vers_f64().atan())?)
}

/* ---------------- Log / exp ---------------- */

pub fn log10(x: &Decimal) -> Resultat<Decimal> {
    if x.est_negatif() || x.est_zero() {
        return Err(ErreurCalcul::HorsDomaine(format!("log({})", x.vers_sortie())));
    }
    Decimal::depuis_f64(x.vers_f64().log10())
}

pub fn ln(x: &Decimal) -> Resultat<Decimal> {
    if x.est_negatif() || x.est_zero() {
        return Err(ErreurCalcul::HorsDomaine(format!("ln({})", x.vers_sortie())));
    }
    Decimal::depuis_f64(x.vers_f64().ln())
}

pub fn exp(x: &Decimal) -> Resultat<Decimal> {
    Decimal::depuis_f64(x.vers_f64().exp())
}

/// 1/x (division par zéro => erreur).
pub fn inverse(x: &Decimal) -> Resultat<Decimal> {
    Decimal::un().diviser(x)
}
