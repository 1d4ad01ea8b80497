// src/noyau/champ.rs
//
// Champ numérique secondaire (saisie des coefficients : systèmes, polynômes,
// bornes d’un tableau). Pur : texte courant + touche -> nouveau texte.

use super::erreur::SaisieInvalide;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToucheChamp {
    Chiffre(u8),
    Point,
    Signe,
    Effacer,
    Supprimer,
}

pub fn saisir(courant: &str, touche: ToucheChamp) -> Result<String, SaisieInvalide> {
    match touche {
        ToucheChamp::Effacer => Ok(String::new()),

        ToucheChamp::Supprimer => {
            let mut s = courant.to_string();
            s.pop();
            // un signe seul ne reste pas affiché
            if s == "-" {
                s.clear();
            }
            Ok(s)
        }

        ToucheChamp::Signe => match courant.strip_prefix('-') {
            _ if courant.trim().is_empty() => Err(SaisieInvalide),
            Some(reste) => Ok(reste.to_string()),
            None => Ok(format!("-{courant}")),
        },

        ToucheChamp::Point if courant.contains('.') => Err(SaisieInvalide),
        ToucheChamp::Point if courant.is_empty() => Ok("0.".to_string()),
        ToucheChamp::Point => Ok(format!("{courant}.")),

        ToucheChamp::Chiffre(c) if c <= 9 => Ok(format!("{courant}{c}")),
        ToucheChamp::Chiffre(_) => Err(SaisieInvalide),
    }
}
