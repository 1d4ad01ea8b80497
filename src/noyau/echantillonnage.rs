// src/noyau/echantillonnage.rs
//
// Tableau de valeurs / échantillonnage de courbe d’un modèle en x.
// Chaque évaluation passe par un éditeur neuf : le modèle n’est jamais modifié.

use num_traits::ToPrimitive;
use tracing::debug;

use super::decimal::Decimal;
use super::editeur::Editeur;
use super::erreur::{ErreurCalcul, Resultat};
use super::jetons::{affichage, Jeton};
use super::reglages::{Reglages, LIGNES_TABLEAU_MAX, SYMBOLE_ERREUR};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LigneTableau {
    /// x à la précision de sortie.
    pub x: String,
    /// f(x) affiché, ou ERROR.
    pub fx: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Point {
    pub x: Decimal,
    /// Absent si l’évaluation échoue ou ne donne pas un nombre.
    pub y: Option<Decimal>,
}

/// Résultat affiché du modèle pour une valeur de x.
fn evaluer_en(modele: &[Jeton], x: &Decimal) -> String {
    let mut editeur = Editeur::new();
    editeur.definir_etat(modele.to_vec());
    match editeur.resoudre(Some(&x.to_string())) {
        Ok(texte) => texte,
        Err(_) => SYMBOLE_ERREUR.to_string(),
    }
}

/// x_k = debut + k·pas, k = 0..=⌊(fin − debut)/pas⌋
pub fn tableau_valeurs(
    modele: &[Jeton],
    debut: &Decimal,
    fin: &Decimal,
    pas: &Decimal,
) -> Resultat<Vec<LigneTableau>> {
    if pas.est_negatif() || pas.est_zero() {
        return Err(ErreurCalcul::HorsDomaine(format!("pas {} <= 0", pas.vers_sortie())));
    }
    if fin < debut {
        return Ok(Vec::new());
    }

    let lignes = (fin - debut)
        .diviser(pas)?
        .plancher()
        .to_usize()
        .filter(|n| *n < LIGNES_TABLEAU_MAX)
        .ok_or(ErreurCalcul::Depassement("tableau trop long"))?
        + 1;

    let mut echecs = 0usize;
    let tableau: Vec<LigneTableau> = (0..lignes)
        .map(|k| {
            let x = debut + &(pas * &Decimal::depuis_entier(k as i64));
            let fx = evaluer_en(modele, &x);
            if fx == SYMBOLE_ERREUR {
                echecs += 1;
            }
            LigneTableau {
                x: x.vers_sortie(),
                fx,
            }
        })
        .collect();

    if echecs > 0 {
        debug!(modele = %affichage(modele), echecs, lignes, "tableau : lignes en erreur");
    }
    Ok(tableau)
}

/// `points_courbe` abscisses régulièrement espacées sur [debut, fin], bornes comprises.
pub fn echantillonner(
    modele: &[Jeton],
    debut: &Decimal,
    fin: &Decimal,
    reglages: &Reglages,
) -> Resultat<Vec<Point>> {
    if fin <= debut {
        return Err(ErreurCalcul::HorsDomaine(format!(
            "intervalle [{}, {}] vide",
            debut.vers_sortie(),
            fin.vers_sortie()
        )));
    }

    let n = reglages.points_courbe();
    let pas = (fin - debut).diviser(&Decimal::depuis_entier(n as i64 - 1))?;

    let points: Vec<Point> = (0..n)
        .map(|k| {
            let x = if k + 1 == n {
                fin.clone()
            } else {
                debut + &(&pas * &Decimal::depuis_entier(k as i64))
            };
            let y = Decimal::analyser(&evaluer_en(modele, &x)).ok();
            Point { x, y }
        })
        .collect();

    let manquants = points.iter().filter(|p| p.y.is_none()).count();
    if manquants > 0 {
        debug!(modele = %affichage(modele), manquants, points = n, "courbe : points absents");
    }
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noyau::jetons::lire_jetons;

    fn d(s: &str) -> Decimal {
        Decimal::analyser(s).unwrap()
    }

    fn modele(glyphes: &[&str]) -> Vec<Jeton> {
        lire_jetons(glyphes).unwrap()
    }

    fn colonnes(t: &[LigneTableau]) -> (Vec<&str>, Vec<&str>) {
        t.iter().map(|l| (l.x.as_str(), l.fx.as_str())).unzip()
    }

    #[test]
    fn tableau_carre() {
        let t = tableau_valeurs(&modele(&["x", "^", "2"]), &d("0"), &d("2"), &d("0.5")).unwrap();
        let (xs, fxs) = colonnes(&t);
        assert_eq!(xs, ["0", "0.5", "1", "1.5", "2"]);
        assert_eq!(fxs, ["0", "0.25", "1", "2.25", "4"]);
    }

    #[test]
    fn tableau_pas_non_multiple() {
        // 0, 0.4, 0.8 : 1 n’est pas atteint
        let t = tableau_valeurs(&modele(&["x", "+", "1"]), &d("0"), &d("1"), &d("0.4")).unwrap();
        let (xs, fxs) = colonnes(&t);
        assert_eq!(xs, ["0", "0.4", "0.8"]);
        assert_eq!(fxs, ["1", "1.4", "1.8"]);
    }

    #[test]
    fn tableau_lignes_en_erreur() {
        let m = modele(&["sqrt(", "x", ")"]);
        let t = tableau_valeurs(&m, &d("-1"), &d("1"), &d("1")).unwrap();
        let (_, fxs) = colonnes(&t);
        assert_eq!(fxs, ["ERROR", "0", "1"]);
        // modèle inchangé
        assert_eq!(m, modele(&["sqrt(", "x", ")"]));
    }

    #[test]
    fn tableau_bornes() {
        let m = modele(&["x"]);
        assert!(matches!(
            tableau_valeurs(&m, &d("0"), &d("1"), &d("0")),
            Err(ErreurCalcul::HorsDomaine(_))
        ));
        assert!(matches!(
            tableau_valeurs(&m, &d("0"), &d("1"), &d("-1")),
            Err(ErreurCalcul::HorsDomaine(_))
        ));
        assert_eq!(tableau_valeurs(&m, &d("2"), &d("1"), &d("1")), Ok(Vec::new()));
        assert_eq!(
            tableau_valeurs(&m, &d("0"), &d("100000"), &d("1")),
            Err(ErreurCalcul::Depassement("tableau trop long"))
        );
        assert_eq!(tableau_valeurs(&m, &d("3"), &d("3"), &d("1")).map(|t| t.len()), Ok(1));
    }

    #[test]
    fn courbe_reguliere() {
        let mut reglages = Reglages::default();
        reglages.set_points_courbe(5);
        let p = echantillonner(&modele(&["2", "*", "x"]), &d("0"), &d("1"), &reglages).unwrap();
        let xs: Vec<String> = p.iter().map(|p| p.x.vers_sortie()).collect();
        let ys: Vec<Option<String>> = p.iter().map(|p| p.y.as_ref().map(Decimal::vers_sortie)).collect();
        assert_eq!(xs, ["0", "0.25", "0.5", "0.75", "1"]);
        assert_eq!(
            ys,
            [Some("0"), Some("0.5"), Some("1"), Some("1.5"), Some("2")].map(|s| s.map(String::from))
        );
    }

    #[test]
    fn courbe_points_absents() {
        let mut reglages = Reglages::default();
        reglages.set_points_courbe(3);
        let p = echantillonner(&modele(&["1", "/", "x"]), &d("-1"), &d("1"), &reglages).unwrap();
        assert_eq!(p.len(), 3);
        assert!(p[1].y.is_none());
        assert_eq!(p[0].y, Some(d("-1")));
        assert_eq!(p[2].y, Some(d("1")));
    }

    #[test]
    fn courbe_points_par_defaut() {
        let p = echantillonner(&modele(&["x"]), &d("0"), &d("10"), &Reglages::default()).unwrap();
        assert_eq!(p.len(), 1000);
        assert_eq!(p.last().map(|p| p.x.clone()), Some(d("10")));
        assert!(echantillonner(&modele(&["x"]), &d("1"), &d("1"), &Reglages::default()).is_err());
    }
}
