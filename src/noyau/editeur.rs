//! Éditeur de la suite de jetons (saisie touche par touche)
//!
//! Machine à états sur la catégorie du dernier jeton :
//! - chaque touche acceptée modifie la suite et renvoie le texte affiché
//! - une touche refusée renvoie `SaisieInvalide` et laisse l’état intact
//! - `resoudre` ferme les groupes, substitue x, évalue ; tout échec de calcul
//!   devient la sentinelle ERROR
//!
//! Les compteurs de profondeur (parenthèses, |·|) valent toujours la profondeur
//! nette obtenue en rebalayant la suite.

use tracing::debug;

use super::decimal::Decimal;
use super::erreur::SaisieInvalide;
use super::evaluateur;
use super::jetons::{
    affichage, Constante, FonctionDroite, FonctionGauche, Jeton, Operateur, Symbole,
};

/// Jeu de touches accepté.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Variante {
    /// Clavier complet.
    #[default]
    Scientifique,
    /// Chiffres, point, + - * /, parenthèses ; résolution refusée tant qu’un groupe est ouvert.
    Basique,
}

/// Commandes du clavier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Commande {
    Ajouter(Symbole),
    Supprimer,
    BasculerSigne,
    Effacer,
    /// "=" avec la valeur éventuelle de la variable indépendante.
    Resoudre(Option<String>),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Contexte {
    Vide,
    Nombre,
    Constante,
    /// Opérateur arithmétique ou opération du milieu.
    Operateur,
    Ouvrant,
    Fermant,
    Erreur,
}

/// Indices des ouvrants encore ouverts, par genre (parenthèses, |·|).
pub fn piles_ouvertes(jetons: &[Jeton]) -> (Vec<usize>, Vec<usize>) {
    let mut parentheses = Vec::new();
    let mut abs = Vec::new();
    for (i, j) in jetons.iter().enumerate() {
        match j {
            Jeton::Ouvrante(_) => parentheses.push(i),
            Jeton::Fermante(_) => {
                parentheses.pop();
            }
            Jeton::AbsOuvrante => abs.push(i),
            Jeton::AbsFermante => {
                abs.pop();
            }
            _ => {}
        }
    }
    (parentheses, abs)
}

#[derive(Clone, Debug, Default)]
pub struct Editeur {
    jetons: Vec<Jeton>,
    parentheses: usize,
    abs: usize,
    variante: Variante,
}

impl Editeur {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn avec_variante(variante: Variante) -> Self {
        Self {
            variante,
            ..Self::default()
        }
    }

    /* ---------------- État ---------------- */

    pub fn affichage(&self) -> String {
        affichage(&self.jetons)
    }

    pub fn etat(&self) -> &[Jeton] {
        &self.jetons
    }

    /// Remplace la suite (modèle stocké, tests) ; recompte les profondeurs, sans contrôle.
    pub fn definir_etat(&mut self, jetons: Vec<Jeton>) {
        let (parentheses, abs) = piles_ouvertes(&jetons);
        self.parentheses = parentheses.len();
        self.abs = abs.len();
        self.jetons = jetons;
    }

    pub fn parentheses_ouvertes(&self) -> usize {
        self.parentheses
    }

    pub fn abs_ouverts(&self) -> usize {
        self.abs
    }

    fn contexte(&self) -> Contexte {
        match self.jetons.last() {
            None => Contexte::Vide,
            Some(j) if j.est_nombre() => Contexte::Nombre,
            Some(j) if j.est_ouvrant() => Contexte::Ouvrant,
            Some(j) if j.est_fermant() => Contexte::Fermant,
            Some(Jeton::Constante(_)) => Contexte::Constante,
            Some(Jeton::Erreur) => Contexte::Erreur,
            Some(_) => Contexte::Operateur,
        }
    }

    /* ---------------- Commandes ---------------- */

    pub fn executer(&mut self, commande: Commande) -> Result<String, SaisieInvalide> {
        match commande {
            Commande::Ajouter(s) => self.ajouter(s),
            Commande::Supprimer => Ok(self.supprimer()),
            Commande::BasculerSigne => self.basculer_signe(),
            Commande::Effacer => Ok(self.effacer()),
            Commande::Resoudre(x) => self.resoudre(x.as_deref()),
        }
    }

    pub fn ajouter(&mut self, symbole: Symbole) -> Result<String, SaisieInvalide> {
        if self.variante == Variante::Basique
            && !matches!(
                symbole,
                Symbole::Chiffre(_) | Symbole::Point | Symbole::Operateur(_) | Symbole::Parenthese
            )
        {
            return Err(SaisieInvalide);
        }

        match symbole {
            Symbole::Chiffre(c) if c <= 9 => self.ajouter_chiffre(char::from(b'0' + c))?,
            Symbole::Chiffre(_) => return Err(SaisieInvalide),
            Symbole::Point => self.ajouter_point()?,
            Symbole::Constante(c) => self.ajouter_constante(c)?,
            Symbole::Operateur(o) => self.ajouter_operateur(Jeton::Operateur(o))?,
            Symbole::Milieu(m) => self.ajouter_operateur(Jeton::Milieu(m))?,
            Symbole::Parenthese => self.basculer_parenthese()?,
            Symbole::ValeurAbsolue => self.basculer_abs()?,
            Symbole::FonctionGauche(g) => self.ajouter_fonction_gauche(g)?,
            Symbole::FonctionDroite(d) => self.ajouter_fonction_droite(d)?,
        }
        Ok(self.affichage())
    }

    fn multiplier(&mut self) {
        self.jetons.push(Jeton::Operateur(Operateur::Multiplier));
    }

    fn ajouter_chiffre(&mut self, chiffre: char) -> Result<(), SaisieInvalide> {
        match self.contexte() {
            Contexte::Erreur => return Err(SaisieInvalide),
            Contexte::Nombre => {
                if let Some(Jeton::Nombre(s)) = self.jetons.last_mut() {
                    s.push(chiffre);
                }
                return Ok(());
            }
            Contexte::Constante | Contexte::Fermant => self.multiplier(),
            Contexte::Vide | Contexte::Operateur | Contexte::Ouvrant => {}
        }
        self.jetons.push(Jeton::Nombre(chiffre.to_string()));
        Ok(())
    }

    fn ajouter_constante(&mut self, c: Constante) -> Result<(), SaisieInvalide> {
        match self.contexte() {
            Contexte::Erreur => return Err(SaisieInvalide),
            Contexte::Nombre | Contexte::Constante | Contexte::Fermant => self.multiplier(),
            Contexte::Vide | Contexte::Operateur | Contexte::Ouvrant => {}
        }
        self.jetons.push(Jeton::Constante(c));
        Ok(())
    }

    fn ajouter_point(&mut self) -> Result<(), SaisieInvalide> {
        match self.contexte() {
            Contexte::Erreur => return Err(SaisieInvalide),
            Contexte::Nombre => {
                return match self.jetons.last_mut() {
                    Some(Jeton::Nombre(s)) if !s.contains('.') => {
                        s.push('.');
                        Ok(())
                    }
                    _ => Err(SaisieInvalide),
                };
            }
            Contexte::Constante | Contexte::Fermant => self.multiplier(),
            Contexte::Vide | Contexte::Operateur | Contexte::Ouvrant => {}
        }
        self.jetons.push(Jeton::Nombre("0.".into()));
        Ok(())
    }

    fn ajouter_operateur(&mut self, op: Jeton) -> Result<(), SaisieInvalide> {
        match self.contexte() {
            Contexte::Nombre | Contexte::Constante | Contexte::Fermant => {
                self.jetons.push(op);
                Ok(())
            }
            _ => Err(SaisieInvalide),
        }
    }

    fn ouvrir(&mut self, jeton: Jeton) {
        match jeton {
            Jeton::AbsOuvrante => self.abs += 1,
            _ => self.parentheses += 1,
        }
        self.jetons.push(jeton);
    }

    fn basculer_parenthese(&mut self) -> Result<(), SaisieInvalide> {
        match self.contexte() {
            Contexte::Vide | Contexte::Ouvrant | Contexte::Operateur => {
                self.ouvrir(Jeton::Ouvrante(None));
            }
            Contexte::Nombre | Contexte::Constante | Contexte::Fermant => {
                if self.parentheses > 0 {
                    self.fermer_parenthese(None);
                } else if self.contexte() == Contexte::Fermant
                    && self.variante == Variante::Basique
                {
                    return Err(SaisieInvalide);
                } else {
                    self.multiplier();
                    self.ouvrir(Jeton::Ouvrante(None));
                }
            }
            Contexte::Erreur => return Err(SaisieInvalide),
        }
        Ok(())
    }

    fn basculer_abs(&mut self) -> Result<(), SaisieInvalide> {
        match self.contexte() {
            Contexte::Vide | Contexte::Ouvrant | Contexte::Operateur => {
                self.ouvrir(Jeton::AbsOuvrante);
            }
            Contexte::Nombre | Contexte::Constante | Contexte::Fermant => {
                if self.abs > 0 {
                    self.fermer_abs();
                } else {
                    self.multiplier();
                    self.ouvrir(Jeton::AbsOuvrante);
                }
            }
            Contexte::Erreur => return Err(SaisieInvalide),
        }
        Ok(())
    }

    fn ajouter_fonction_gauche(&mut self, g: FonctionGauche) -> Result<(), SaisieInvalide> {
        match self.contexte() {
            Contexte::Vide | Contexte::Ouvrant | Contexte::Operateur => {}
            Contexte::Nombre if self.parentheses == 0 => self.multiplier(),
            _ => return Err(SaisieInvalide),
        }
        self.ouvrir(Jeton::Ouvrante(Some(g)));
        Ok(())
    }

    fn ajouter_fonction_droite(&mut self, d: FonctionDroite) -> Result<(), SaisieInvalide> {
        match self.contexte() {
            Contexte::Nombre | Contexte::Constante | Contexte::Fermant if self.parentheses > 0 => {
                self.fermer_parenthese(Some(d));
                Ok(())
            }
            _ => Err(SaisieInvalide),
        }
    }

    /// Ferme la parenthèse la plus interne ; les |·| ouverts après elle sont fermés d’abord.
    fn fermer_parenthese(&mut self, d: Option<FonctionDroite>) {
        let (parentheses, abs) = piles_ouvertes(&self.jetons);
        let interne = parentheses.last().copied();
        let a_fermer = abs.iter().filter(|&&a| Some(a) > interne).count();
        for _ in 0..a_fermer {
            self.jetons.push(Jeton::AbsFermante);
        }
        self.abs -= a_fermer;
        self.jetons.push(Jeton::Fermante(d));
        self.parentheses -= 1;
    }

    /// Ferme le |·| le plus interne ; les parenthèses ouvertes après lui sont fermées d’abord.
    fn fermer_abs(&mut self) {
        let (parentheses, abs) = piles_ouvertes(&self.jetons);
        let interne = abs.last().copied();
        let a_fermer = parentheses.iter().filter(|&&p| Some(p) > interne).count();
        for _ in 0..a_fermer {
            self.jetons.push(Jeton::Fermante(None));
        }
        self.parentheses -= a_fermer;
        self.jetons.push(Jeton::AbsFermante);
        self.abs -= 1;
    }

    /// Ferme tous les groupes ouverts, le plus récemment ouvert d’abord.
    fn fermer_tout(&mut self) {
        let (parentheses, abs) = piles_ouvertes(&self.jetons);
        let mut p = parentheses.iter().rev().peekable();
        let mut a = abs.iter().rev().peekable();
        loop {
            let fermant = match (p.peek(), a.peek()) {
                (None, None) => break,
                (Some(_), None) => {
                    p.next();
                    Jeton::Fermante(None)
                }
                (Some(ip), Some(ia)) if ip > ia => {
                    p.next();
                    Jeton::Fermante(None)
                }
                _ => {
                    a.next();
                    Jeton::AbsFermante
                }
            };
            self.jetons.push(fermant);
        }
        self.parentheses = 0;
        self.abs = 0;
    }

    pub fn basculer_signe(&mut self) -> Result<String, SaisieInvalide> {
        match self.jetons.last_mut() {
            Some(Jeton::Nombre(s)) => {
                if s.starts_with('-') {
                    s.remove(0);
                } else {
                    s.insert(0, '-');
                }
                Ok(self.affichage())
            }
            _ => Err(SaisieInvalide),
        }
    }

    /// Retour arrière : raccourcit le nombre en cours ou retire le dernier jeton.
    pub fn supprimer(&mut self) -> String {
        match self.jetons.pop() {
            Some(Jeton::Nombre(mut s)) => {
                if s.trim_start_matches('-').len() > 1 {
                    s.pop();
                    self.jetons.push(Jeton::Nombre(s));
                }
            }
            Some(Jeton::Fermante(_)) => self.parentheses += 1,
            Some(Jeton::AbsFermante) => self.abs += 1,
            Some(Jeton::Ouvrante(_)) => self.parentheses = self.parentheses.saturating_sub(1),
            Some(Jeton::AbsOuvrante) => self.abs = self.abs.saturating_sub(1),
            _ => {}
        }
        self.affichage()
    }

    pub fn effacer(&mut self) -> String {
        self.jetons.clear();
        self.parentheses = 0;
        self.abs = 0;
        String::new()
    }

    /// "=" : normalise, ferme, substitue x puis évalue.
    ///
    /// Refusé sur ouvrant final ou sentinelle (et, en variante basique, groupe ouvert).
    /// Sans valeur valable pour x, la suite fermée est renvoyée sans évaluation.
    pub fn resoudre(&mut self, valeur_x: Option<&str>) -> Result<String, SaisieInvalide> {
        if matches!(self.contexte(), Contexte::Erreur | Contexte::Ouvrant) {
            return Err(SaisieInvalide);
        }
        if self.variante == Variante::Basique && (self.parentheses > 0 || self.abs > 0) {
            return Err(SaisieInvalide);
        }

        while matches!(
            self.jetons.last(),
            Some(Jeton::Operateur(_) | Jeton::Milieu(_))
        ) {
            self.jetons.pop();
        }
        if self.jetons.is_empty() {
            return Ok(String::new());
        }

        self.fermer_tout();

        let x = Jeton::Constante(Constante::X);
        if self.jetons.contains(&x) {
            match valeur_x.filter(|v| Decimal::analyser(v).is_ok()) {
                Some(v) => {
                    for j in self.jetons.iter_mut().filter(|j| **j == x) {
                        *j = Jeton::Nombre(v.trim().to_string());
                    }
                }
                None => return Ok(self.affichage()),
            }
        }

        match evaluateur::resoudre(&self.jetons) {
            Ok(resultat) => self.jetons = vec![Jeton::Nombre(resultat)],
            Err(e) => {
                debug!(expression = %self.affichage(), erreur = %e, "évaluation impossible");
                self.jetons = vec![Jeton::Erreur];
            }
        }
        Ok(self.affichage())
    }
}
