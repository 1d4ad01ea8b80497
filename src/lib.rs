// src/lib.rs
//
// Calculatrice avancée — noyau sans interface
// -------------------------------------------
// - expressions saisies jeton par jeton (éditeur + évaluation décimale)
// - systèmes linéaires (Gauss)
// - racines de polynômes de degré 1 à 3 (complexes)
// - tableaux de valeurs / points de courbe
//
// Aucun subscriber `tracing` n’est installé ici : c’est à l’application de le faire.

pub mod noyau;

pub use noyau::{
    echantillonner, lire_jetons, resoudre_systeme, tableau_valeurs, trouver_racines, Commande,
    Complexe, Decimal, Editeur, ErreurCalcul, Jeton, Reglages, Resultat, SaisieInvalide,
    Solution, Symbole, Variante,
};
