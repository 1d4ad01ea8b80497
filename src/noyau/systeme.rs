// src/noyau/systeme.rs
//
// Système linéaire n×n (matrice augmentée n×(n+1))
// ------------------------------------------------
// - élimination de Gauss : pivot = première ligne (à partir de la diagonale)
//   non nulle dans la colonne ; colonne entièrement nulle => ignorée
// - remontée : ligne à diagonale nulle
//     * constante non nulle             => aucune solution
//     * constante nulle, ligne nulle    => infinité de solutions
//     * constante nulle, autres termes  => 0 = Σ connus : infinité si vrai, aucune sinon

use std::fmt;

use tracing::debug;

use super::decimal::Decimal;
use super::erreur::{ErreurCalcul, Resultat};
use super::reglages::SYMBOLE_INFINI;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Solution {
    /// Valeurs des inconnues, dans l’ordre, à la précision de sortie.
    Unique(Vec<String>),
    Infinie,
    Aucune,
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Solution::Unique(valeurs) => f.write_str(&valeurs.join(", ")),
            Solution::Infinie => f.write_str(SYMBOLE_INFINI),
            Solution::Aucune => f.write_str("aucune solution"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct SystemeLineaire {
    reduite: Vec<Vec<Decimal>>,
}

impl SystemeLineaire {
    /// Lit la matrice augmentée (littéraux décimaux) puis la réduit.
    pub fn new<S: AsRef<str>>(lignes: &[Vec<S>]) -> Resultat<Self> {
        let n = lignes.len();
        if n == 0 {
            return Err(ErreurCalcul::Dimensions("système vide".into()));
        }
        if let Some(l) = lignes.iter().find(|l| l.len() != n + 1) {
            return Err(ErreurCalcul::Dimensions(format!(
                "{n} équations : {} colonnes attendues, {} reçues",
                n + 1,
                l.len()
            )));
        }

        let reduite = lignes
            .iter()
            .map(|l| l.iter().map(|c| Decimal::analyser(c.as_ref())).collect())
            .collect::<Resultat<Vec<Vec<Decimal>>>>()?;

        let mut systeme = Self { reduite };
        systeme.eliminer()?;
        Ok(systeme)
    }

    fn inconnues(&self) -> usize {
        self.reduite.len()
    }

    fn eliminer(&mut self) -> Resultat<()> {
        let n = self.inconnues();
        for col in 0..n.saturating_sub(1) {
            let Some(pivot) = (col..n).find(|&l| !self.reduite[l][col].est_zero()) else {
                continue;
            };
            self.reduite.swap(col, pivot);

            for cible in col + 1..n {
                self.reduire_ligne(col, cible)?;
            }
        }
        Ok(())
    }

    /// cible -= ancre · (cible[ancre] / ancre[ancre])
    fn reduire_ligne(&mut self, ancre: usize, cible: usize) -> Resultat<()> {
        if self.reduite[cible][ancre].est_zero() {
            return Ok(());
        }
        let ratio = self.reduite[cible][ancre].diviser(&self.reduite[ancre][ancre])?;
        for col in ancre..=self.inconnues() {
            let delta = &self.reduite[ancre][col] * &ratio;
            self.reduite[cible][col] = &self.reduite[cible][col] - &delta;
        }
        Ok(())
    }

    pub fn solution(&self) -> Resultat<Solution> {
        let n = self.inconnues();
        let mut valeurs = vec![Decimal::zero(); n];

        for ligne in (0..n).rev() {
            let l = &self.reduite[ligne];
            let constante = &l[n];

            if l[ligne].est_zero() && !constante.est_zero() {
                debug!(ligne, constante = %constante, "système incompatible");
                return Ok(Solution::Aucune);
            }

            let connus = (ligne + 1..n)
                .fold(Decimal::zero(), |acc, c| &acc + &(&l[c] * &valeurs[c]));

            if l[ligne].est_zero() {
                // ligne nulle ou 0 = Σ connus vérifié : variable libre
                if connus.est_zero() {
                    debug!(ligne, "variable libre : infinité de solutions");
                    return Ok(Solution::Infinie);
                }
                debug!(ligne, reste = %connus, "système incompatible");
                return Ok(Solution::Aucune);
            }
            valeurs[ligne] = (constante - &connus).diviser(&l[ligne])?;
        }

        Ok(Solution::Unique(
            valeurs.iter().map(Decimal::vers_sortie).collect(),
        ))
    }
}

/// Lecture + réduction + remontée.
pub fn resoudre_systeme<S: AsRef<str>>(lignes: &[Vec<S>]) -> Resultat<Solution> {
    SystemeLineaire::new(lignes)?.solution()
}
