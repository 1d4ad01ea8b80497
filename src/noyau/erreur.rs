// src/noyau/erreur.rs
//
// Taxonomie des erreurs du noyau.
//
// - `ErreurCalcul` : échec arithmétique / domaine / format (levé par le noyau numérique,
//   l’évaluateur et les solveurs).
// - `SaisieInvalide` : édition refusée (état de l’éditeur inchangé). Jamais la sentinelle
//   ERROR : celle-ci est réservée aux échecs d’évaluation.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErreurCalcul {
    #[error("division par zéro")]
    DivisionParZero,

    #[error("hors domaine : {0}")]
    HorsDomaine(String),

    #[error("factorielle d’un nombre négatif")]
    FactorielleNegative,

    #[error("nombre invalide : {0:?}")]
    NombreInvalide(String),

    #[error("symbole inconnu : {0:?}")]
    SymboleInconnu(String),

    #[error("expression invalide : {0}")]
    ExpressionInvalide(&'static str),

    #[error("variable indépendante sans valeur")]
    VariableLibre,

    #[error("dépassement : {0}")]
    Depassement(&'static str),

    #[error("dimensions invalides : {0}")]
    Dimensions(String),

    #[error("ordre {0} non supporté (1 à 3 seulement)")]
    OrdreNonSupporte(usize),
}

pub type Resultat<T> = std::result::Result<T, ErreurCalcul>;

/// Édition refusée : la saisie viole la grammaire, l’état reste inchangé.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("saisie invalide")]
pub struct SaisieInvalide;
