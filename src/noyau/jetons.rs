// src/noyau/jetons.rs
//
// Vocabulaire fermé de la calculatrice
// ------------------------------------
// - `Jeton`   : unité d’une expression composée (ce que l’éditeur stocke)
// - `Symbole` : touche du clavier (ce que l’éditeur reçoit)
//
// Les deux se lisent depuis leurs glyphes ("sqrt(", ")^2", "|(", "()", "|x|", ...)
// pour écrire modèles et tests comme des listes de glyphes.

use std::fmt;
use std::str::FromStr;

use super::decimal::Decimal;
use super::erreur::ErreurCalcul;
use super::reglages::SYMBOLE_ERREUR;

/* ---------------- Familles de glyphes ---------------- */

fn chercher<T: Copy>(tous: &[T], glyphe: fn(T) -> &'static str, s: &str) -> Option<T> {
    tous.iter().copied().find(|t| glyphe(*t) == s)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operateur {
    Diviser,
    Multiplier,
    Plus,
    Moins,
}

impl Operateur {
    pub const TOUS: [Operateur; 4] = [
        Operateur::Diviser,
        Operateur::Multiplier,
        Operateur::Plus,
        Operateur::Moins,
    ];

    pub fn glyphe(self) -> &'static str {
        match self {
            Operateur::Diviser => "/",
            Operateur::Multiplier => "*",
            Operateur::Plus => "+",
            Operateur::Moins => "-",
        }
    }
}

/// Opération “du milieu” : binaire, écrite comme un opérateur.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OpMilieu {
    Puissance,
    Permutation,
    Combinaison,
}

impl OpMilieu {
    pub const TOUS: [OpMilieu; 3] = [
        OpMilieu::Puissance,
        OpMilieu::Permutation,
        OpMilieu::Combinaison,
    ];

    pub fn glyphe(self) -> &'static str {
        match self {
            OpMilieu::Puissance => "^",
            OpMilieu::Permutation => "P",
            OpMilieu::Combinaison => "C",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Constante {
    Pi,
    Euler,
    /// Variable indépendante.
    X,
}

impl Constante {
    pub const TOUS: [Constante; 3] = [Constante::Pi, Constante::Euler, Constante::X];

    pub fn glyphe(self) -> &'static str {
        match self {
            Constante::Pi => "pi",
            Constante::Euler => "e",
            Constante::X => "x",
        }
    }
}

/// Fonction fusionnée avec la parenthèse ouvrante : "sin(".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FonctionGauche {
    Racine,
    Inverse,
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Log,
    Ln,
    Exp,
}

impl FonctionGauche {
    pub const TOUS: [FonctionGauche; 11] = [
        FonctionGauche::Racine,
        FonctionGauche::Inverse,
        FonctionGauche::Sin,
        FonctionGauche::Cos,
        FonctionGauche::Tan,
        FonctionGauche::Asin,
        FonctionGauche::Acos,
        FonctionGauche::Atan,
        FonctionGauche::Log,
        FonctionGauche::Ln,
        FonctionGauche::Exp,
    ];

    pub fn glyphe(self) -> &'static str {
        match self {
            FonctionGauche::Racine => "sqrt",
            FonctionGauche::Inverse => "^-1",
            FonctionGauche::Sin => "sin",
            FonctionGauche::Cos => "cos",
            FonctionGauche::Tan => "tan",
            FonctionGauche::Asin => "asin",
            FonctionGauche::Acos => "acos",
            FonctionGauche::Atan => "atan",
            FonctionGauche::Log => "log",
            FonctionGauche::Ln => "ln",
            FonctionGauche::Exp => "e^",
        }
    }
}

/// Fonction postfixe fusionnée avec la parenthèse fermante : ")!".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FonctionDroite {
    Carre,
    Factorielle,
    Pourcentage,
}

impl FonctionDroite {
    pub const TOUS: [FonctionDroite; 3] = [
        FonctionDroite::Carre,
        FonctionDroite::Factorielle,
        FonctionDroite::Pourcentage,
    ];

    pub fn glyphe(self) -> &'static str {
        match self {
            FonctionDroite::Carre => "^2",
            FonctionDroite::Factorielle => "!",
            FonctionDroite::Pourcentage => "%",
        }
    }
}

/* ---------------- Jeton ---------------- */

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Jeton {
    /// Littéral décimal en cours d’édition ("7", "-0.", "12.5").
    Nombre(String),
    Constante(Constante),
    Operateur(Operateur),
    Milieu(OpMilieu),
    /// "(" ou "f(".
    Ouvrante(Option<FonctionGauche>),
    /// "|(".
    AbsOuvrante,
    /// ")" ou ")g".
    Fermante(Option<FonctionDroite>),
    /// ")|".
    AbsFermante,
    /// Sentinelle d’échec d’évaluation.
    Erreur,
}

impl Jeton {
    pub fn est_ouvrant(&self) -> bool {
        matches!(self, Jeton::Ouvrante(_) | Jeton::AbsOuvrante)
    }

    pub fn est_fermant(&self) -> bool {
        matches!(self, Jeton::Fermante(_) | Jeton::AbsFermante)
    }

    pub fn est_nombre(&self) -> bool {
        matches!(self, Jeton::Nombre(_))
    }
}

impl fmt::Display for Jeton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Jeton::Nombre(s) => f.write_str(s),
            Jeton::Constante(c) => f.write_str(c.glyphe()),
            Jeton::Operateur(o) => f.write_str(o.glyphe()),
            Jeton::Milieu(m) => f.write_str(m.glyphe()),
            Jeton::Ouvrante(None) => f.write_str("("),
            Jeton::Ouvrante(Some(g)) => write!(f, "{}(", g.glyphe()),
            Jeton::AbsOuvrante => f.write_str("|("),
            Jeton::Fermante(None) => f.write_str(")"),
            Jeton::Fermante(Some(d)) => write!(f, "){}", d.glyphe()),
            Jeton::AbsFermante => f.write_str(")|"),
            Jeton::Erreur => f.write_str(SYMBOLE_ERREUR),
        }
    }
}

impl FromStr for Jeton {
    type Err = ErreurCalcul;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "(" => return Ok(Jeton::Ouvrante(None)),
            ")" => return Ok(Jeton::Fermante(None)),
            "|(" => return Ok(Jeton::AbsOuvrante),
            ")|" => return Ok(Jeton::AbsFermante),
            _ if s == SYMBOLE_ERREUR => return Ok(Jeton::Erreur),
            _ => {}
        }

        if let Some(o) = chercher(&Operateur::TOUS, Operateur::glyphe, s) {
            return Ok(Jeton::Operateur(o));
        }
        if let Some(m) = chercher(&OpMilieu::TOUS, OpMilieu::glyphe, s) {
            return Ok(Jeton::Milieu(m));
        }
        if let Some(c) = chercher(&Constante::TOUS, Constante::glyphe, s) {
            return Ok(Jeton::Constante(c));
        }
        if let Some(nom) = s.strip_suffix('(') {
            if let Some(g) = chercher(&FonctionGauche::TOUS, FonctionGauche::glyphe, nom) {
                return Ok(Jeton::Ouvrante(Some(g)));
            }
        }
        if let Some(nom) = s.strip_prefix(')') {
            if let Some(d) = chercher(&FonctionDroite::TOUS, FonctionDroite::glyphe, nom) {
                return Ok(Jeton::Fermante(Some(d)));
            }
        }
        if Decimal::analyser(s).is_ok() {
            return Ok(Jeton::Nombre(s.to_string()));
        }

        Err(ErreurCalcul::SymboleInconnu(s.to_string()))
    }
}

/// Lit une liste de glyphes ("(", "3", "+", ...).
pub fn lire_jetons<S: AsRef<str>>(glyphes: &[S]) -> Result<Vec<Jeton>, ErreurCalcul> {
    glyphes.iter().map(|g| g.as_ref().parse()).collect()
}

/// Texte affiché : jetons concaténés sans séparateur.
pub fn affichage(jetons: &[Jeton]) -> String {
    jetons.iter().map(|j| j.to_string()).collect()
}

/// Format utilitaire (journal/debug) : jetons séparés par un espace.
pub fn format_jetons(jetons: &[Jeton]) -> String {
    jetons
        .iter()
        .map(|j| j.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/* ---------------- Symbole (touche) ---------------- */

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Symbole {
    Chiffre(u8),
    Point,
    Operateur(Operateur),
    Milieu(OpMilieu),
    /// Bascule "()" : ouvre ou ferme selon le contexte.
    Parenthese,
    /// Bascule "|x|".
    ValeurAbsolue,
    Constante(Constante),
    FonctionGauche(FonctionGauche),
    FonctionDroite(FonctionDroite),
}

impl fmt::Display for Symbole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbole::Chiffre(c) => write!(f, "{c}"),
            Symbole::Point => f.write_str("."),
            Symbole::Operateur(o) => f.write_str(o.glyphe()),
            Symbole::Milieu(m) => f.write_str(m.glyphe()),
            Symbole::Parenthese => f.write_str("()"),
            Symbole::ValeurAbsolue => f.write_str("|x|"),
            Symbole::Constante(c) => f.write_str(c.glyphe()),
            Symbole::FonctionGauche(g) => f.write_str(g.glyphe()),
            Symbole::FonctionDroite(d) => f.write_str(d.glyphe()),
        }
    }
}

impl FromStr for Symbole {
    type Err = ErreurCalcul;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "." => return Ok(Symbole::Point),
            "()" => return Ok(Symbole::Parenthese),
            "|x|" => return Ok(Symbole::ValeurAbsolue),
            _ => {}
        }

        if let [c] = s.as_bytes() {
            if c.is_ascii_digit() {
                return Ok(Symbole::Chiffre(c - b'0'));
            }
        }
        if let Some(o) = chercher(&Operateur::TOUS, Operateur::glyphe, s) {
            return Ok(Symbole::Operateur(o));
        }
        if let Some(m) = chercher(&OpMilieu::TOUS, OpMilieu::glyphe, s) {
            return Ok(Symbole::Milieu(m));
        }
        if let Some(c) = chercher(&Constante::TOUS, Constante::glyphe, s) {
            return Ok(Symbole::Constante(c));
        }
        if let Some(g) = chercher(&FonctionGauche::TOUS, FonctionGauche::glyphe, s) {
            return Ok(Symbole::FonctionGauche(g));
        }
        if let Some(d) = chercher(&FonctionDroite::TOUS, FonctionDroite::glyphe, s) {
            return Ok(Symbole::FonctionDroite(d));
        }

        Err(ErreurCalcul::SymboleInconnu(s.to_string()))
    }
}
