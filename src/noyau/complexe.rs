// src/noyau/complexe.rs
//
// Nombre complexe (forme rectangulaire) à l’échelle de calcul.
// Module et phase sont dérivés, jamais stockés.
// Utilisé par la recherche de racines (cubique) et comme type de résultat.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Neg};

use super::decimal::{pi, Decimal};
use super::erreur::Resultat;
use super::reglages::SYMBOLE_IMAGINAIRE;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Complexe {
    pub re: Decimal,
    pub im: Decimal,
}

impl Complexe {
    pub fn new(re: Decimal, im: Decimal) -> Self {
        Self { re, im }
    }

    pub fn reel(re: Decimal) -> Self {
        Self::new(re, Decimal::zero())
    }

    pub fn est_non_nul(&self) -> bool {
        !self.re.est_zero() || !self.im.est_zero()
    }

    fn module_carre(&self) -> Decimal {
        &(&self.re * &self.re) + &(&self.im * &self.im)
    }

    /// |z| (racine approchée).
    pub fn module(&self) -> Resultat<Decimal> {
        self.module_carre().racine_approx()
    }

    /// arg(z) en radians, dans ]-π, π].
    pub fn phase(&self) -> Resultat<Decimal> {
        Decimal::depuis_f64(self.im.vers_f64().atan2(self.re.vers_f64()))
    }

    /// 1/z = conj(z) / |z|².
    pub fn inverse(&self) -> Resultat<Complexe> {
        let m2 = self.module_carre();
        Ok(Self::new(self.re.diviser(&m2)?, (-&self.im).diviser(&m2)?))
    }

    pub fn ajouter_reel(&self, x: &Decimal) -> Complexe {
        Self::new(&self.re + x, self.im.clone())
    }

    pub fn multiplier_reel(&self, x: &Decimal) -> Complexe {
        Self::new(&self.re * x, &self.im * x)
    }

    pub fn diviser_reel(&self, x: &Decimal) -> Resultat<Complexe> {
        Ok(Self::new(self.re.diviser(x)?, self.im.diviser(x)?))
    }

    /// Les trois racines cubiques (méthode trigonométrique).
    ///
    /// Angles : (φ + δ)/3 pour δ ∈ {0, 2π, -2π}, puis tri par |partie réelle|
    /// décroissante (tri stable).
    pub fn racines_cubiques(&self) -> Resultat<Vec<Complexe>> {
        let module = Decimal::depuis_f64(self.module()?.vers_f64().cbrt())?;
        let phase = self.phase()?;
        let deux_pi = &Decimal::depuis_entier(2) * &pi();
        let trois = Decimal::depuis_entier(3);

        let mut racines = Vec::with_capacity(3);
        for decalage in [Decimal::zero(), deux_pi.clone(), -&deux_pi] {
            let angle = (&phase + &decalage).diviser(&trois)?.vers_f64();
            racines.push(Complexe::new(
                &module * &Decimal::depuis_f64(angle.cos())?,
                &module * &Decimal::depuis_f64(angle.sin())?,
            ));
        }

        racines.sort_by(|a, b| comparer_re_abs(b, a));
        Ok(racines)
    }
}

fn comparer_re_abs(a: &Complexe, b: &Complexe) -> Ordering {
    a.re.abs().cmp(&b.re.abs())
}

impl Add for &Complexe {
    type Output = Complexe;

    fn add(self, autre: &Complexe) -> Complexe {
        Complexe::new(&self.re + &autre.re, &self.im + &autre.im)
    }
}

impl Neg for &Complexe {
    type Output = Complexe;

    fn neg(self) -> Complexe {
        Complexe::new(-&self.re, -&self.im)
    }
}

/// Affichage à la précision de sortie :
/// "a + bi", "a - bi", "a", "+bi", "-i" ; coefficient 1 omis ; "0" si tout s’arrondit à zéro.
impl fmt::Display for Complexe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let re = self.re.vers_sortie();
        let im = self.im.abs().vers_sortie();

        let mut sortie = String::new();
        if re != "0" {
            sortie.push_str(&re);
        }

        if im != "0" {
            let negatif = self.im.est_negatif();
            if sortie.is_empty() {
                sortie.push(if negatif { '-' } else { '+' });
            } else {
                sortie.push_str(if negatif { " - " } else { " + " });
            }
            if im != "1" {
                sortie.push_str(&im);
            }
            sortie.push_str(SYMBOLE_IMAGINAIRE);
        }

        if sortie.is_empty() {
            sortie.push('0');
        }
        f.write_str(&sortie)
    }
}
