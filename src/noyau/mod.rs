//! Noyau de calcul
//!
//! Organisation interne (des feuilles vers la racine) :
//! - reglages.rs        : échelles, glyphes, garde-fous + `Reglages`
//! - erreur.rs          : `ErreurCalcul` / `SaisieInvalide`
//! - decimal.rs         : décimal à échelle fixe (entier scalé) + π, e
//! - fonctions.rs       : trig (degrés/radians), log, exp, inverse
//! - complexe.rs        : a + bi, racines cubiques
//! - jetons.rs          : jetons typés + touches du clavier
//! - evaluateur.rs      : évaluation par groupes (priorités par étage)
//! - editeur.rs         : édition de la suite de jetons + "="
//! - champ.rs           : champ numérique des formulaires
//! - systeme.rs         : Gauss (unique / infinie / aucune)
//! - polynome.rs        : racines degré 1 à 3
//! - echantillonnage.rs : tableau de valeurs, points de courbe

pub mod champ;
pub mod complexe;
pub mod decimal;
pub mod echantillonnage;
pub mod editeur;
pub mod erreur;
pub mod evaluateur;
pub mod fonctions;
pub mod jetons;
pub mod polynome;
pub mod reglages;
pub mod systeme;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use complexe::Complexe;
pub use decimal::Decimal;
pub use echantillonnage::{echantillonner, tableau_valeurs, LigneTableau, Point};
pub use editeur::{Commande, Editeur, Variante};
pub use erreur::{ErreurCalcul, Resultat, SaisieInvalide};
pub use jetons::{lire_jetons, Jeton, Symbole};
pub use polynome::trouver_racines;
pub use reglages::Reglages;
pub use systeme::{resoudre_systeme, Solution, SystemeLineaire};
