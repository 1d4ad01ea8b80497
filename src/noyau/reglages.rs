// src/noyau/reglages.rs
//
// Réglages du noyau (constantes fixes + réglages d’exécution).
//
// - Échelles décimales : calcul (10) / sortie (5), arrondi « moitié vers le haut ».
// - Glyphes affichés : ERROR, INF, i.
// - Garde-fous : bornes sur exposants, factorielles, tableaux, courbes (anti-gel).

/// Nombre de chiffres après la virgule pour tous les calculs intermédiaires.
pub const ECHELLE_CALCUL: u32 = 10;

/// Nombre maximal de chiffres après la virgule dans un résultat affiché.
pub const ECHELLE_SORTIE: u32 = 5;

/// Jeton sentinelle affiché quand une évaluation échoue.
pub const SYMBOLE_ERREUR: &str = "ERROR";

/// Marqueur « infinité de solutions » du solveur linéaire.
pub const SYMBOLE_INFINI: &str = "INF";

/// Suffixe de la partie imaginaire.
pub const SYMBOLE_IMAGINAIRE: &str = "i";

/// Garde-fou : plus grand exposant entier calculé exactement.
pub const EXPOSANT_MAX: u32 = 2_000;

/// Garde-fou : taille maximale (en bits) d’une puissance entière avant calcul.
pub const BITS_PUISSANCE_MAX: u64 = 1 << 18;

/// Garde-fou : plus grand argument accepté par la factorielle.
pub const FACTORIELLE_MAX: u64 = 3_000;

/// Garde-fou : nombre maximal de lignes d’un tableau de valeurs.
pub const LIGNES_TABLEAU_MAX: usize = 10_000;

/// Nombre de points échantillonnés par défaut pour une courbe.
const POINTS_COURBE_DEFAUT: usize = 1_000;

const POINTS_COURBE_MIN: usize = 2;
const POINTS_COURBE_MAX: usize = 10_000;

/// Réglages d’exécution (modifiables par l’appelant).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reglages {
    points_courbe: usize,
}

impl Default for Reglages {
    fn default() -> Self {
        Self {
            points_courbe: POINTS_COURBE_DEFAUT,
        }
    }
}

impl Reglages {
    pub fn points_courbe(&self) -> usize {
        self.points_courbe
    }

    /// Garde-fou : borne le nombre de points (une courbe demande au moins 2 points).
    pub fn set_points_courbe(&mut self, points: usize) {
        self.points_courbe = points.clamp(POINTS_COURBE_MIN, POINTS_COURBE_MAX);
    }
}
