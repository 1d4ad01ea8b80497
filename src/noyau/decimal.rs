// src/noyau/decimal.rs
//
// Noyau décimal à échelle fixe
// ----------------------------
// Un `Decimal` est un entier “scalé” (×10^ECHELLE_CALCUL) : toutes les opérations
// restent à l’échelle de calcul, arrondi moitié vers le haut (loin de zéro).
// L’échelle de sortie (ECHELLE_SORTIE) n’est appliquée qu’à l’affichage final.
//
// Les fonctions transcendantes passent par f64 puis sont re-quantifiées :
// précision bornée par le double, approximation assumée.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;
use std::sync::OnceLock;

use super::erreur::{ErreurCalcul, Resultat};
use super::reglages::{
    BITS_PUISSANCE_MAX, ECHELLE_CALCUL, ECHELLE_SORTIE, EXPOSANT_MAX, FACTORIELLE_MAX,
};

/* ------------------------ Entiers scalés ------------------------ */

fn pow10(n: u32) -> BigInt {
    BigInt::from(10).pow(n)
}

/// n/d arrondi au plus proche, moitié loin de zéro. `d` non nul.
fn diviser_arrondi(n: BigInt, d: BigInt) -> BigInt {
    BigRational::new(n, d).round().to_integer()
}

/// Entier “scalé” (×10^chiffres) -> texte décimal complet.
fn ecrire_echelle(scaled: &BigInt, chiffres: u32) -> String {
    let neg = scaled.is_negative();
    let abs = scaled.abs();

    if chiffres == 0 {
        return if neg { format!("-{abs}") } else { format!("{abs}") };
    }

    let scale = pow10(chiffres);
    let int_part = &abs / &scale;
    let mut frac = (&abs % &scale).to_str_radix(10);
    while frac.len() < chiffres as usize {
        frac.insert(0, '0');
    }

    if neg {
        format!("-{int_part}.{frac}")
    } else {
        format!("{int_part}.{frac}")
    }
}

/* ------------------------ Decimal ------------------------ */

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Decimal {
    brut: BigInt,
}

impl Decimal {
    pub fn zero() -> Self {
        Self {
            brut: BigInt::zero(),
        }
    }

    pub fn un() -> Self {
        Self::depuis_entier(1)
    }

    pub fn depuis_entier(n: i64) -> Self {
        Self {
            brut: BigInt::from(n) * pow10(ECHELLE_CALCUL),
        }
    }

    /// Quantifie un rationnel exact à l’échelle de calcul.
    pub fn depuis_rationnel(r: &BigRational) -> Self {
        let scaled = r * BigRational::from_integer(pow10(ECHELLE_CALCUL));
        Self {
            brut: scaled.round().to_integer(),
        }
    }

    /// Re-quantifie un résultat flottant. NaN / ±∞ => hors domaine.
    pub fn depuis_f64(x: f64) -> Resultat<Self> {
        BigRational::from_float(x)
            .map(|r| Self::depuis_rationnel(&r))
            .ok_or_else(|| ErreurCalcul::HorsDomaine(format!("résultat non fini ({x})")))
    }

    /// Lit un littéral décimal : `-`? chiffres (`.` chiffres?)?, au moins un chiffre.
    pub fn analyser(texte: &str) -> Resultat<Self> {
        let invalide = || ErreurCalcul::NombreInvalide(texte.to_string());

        let t = texte.trim();
        let (negatif, corps) = match t.strip_prefix('-') {
            Some(reste) => (true, reste),
            None => (false, t),
        };
        let (entier, fraction) = corps.split_once('.').unwrap_or((corps, ""));

        let chiffres_ok = |s: &str| s.chars().all(|c| c.is_ascii_digit());
        if (entier.is_empty() && fraction.is_empty()) || !chiffres_ok(entier) || !chiffres_ok(fraction)
        {
            return Err(invalide());
        }

        let mantisse = format!("{entier}{fraction}");
        let n = BigInt::parse_bytes(mantisse.as_bytes(), 10).ok_or_else(invalide)?;
        let n = if negatif { -n } else { n };

        let exposant = u32::try_from(fraction.len()).map_err(|_| invalide())?;
        Ok(Self::depuis_rationnel(&BigRational::new(n, pow10(exposant))))
    }

    pub fn vers_rationnel(&self) -> BigRational {
        BigRational::new(self.brut.clone(), pow10(ECHELLE_CALCUL))
    }

    /// Conversion vers f64 (via le texte décimal, arrondi correct).
    pub fn vers_f64(&self) -> f64 {
        self.to_string().parse().unwrap_or(f64::NAN)
    }

    /// Affichage final : échelle de sortie, zéros de queue retirés, jamais “-0”.
    pub fn vers_sortie(&self) -> String {
        let arrondi = diviser_arrondi(self.brut.clone(), pow10(ECHELLE_CALCUL - ECHELLE_SORTIE));
        let texte = ecrire_echelle(&arrondi, ECHELLE_SORTIE);
        if texte.contains('.') {
            texte.trim_end_matches('0').trim_end_matches('.').to_string()
        } else {
            texte
        }
    }

    pub fn est_zero(&self) -> bool {
        self.brut.is_zero()
    }

    pub fn est_negatif(&self) -> bool {
        self.brut.is_negative()
    }

    pub fn est_entier(&self) -> bool {
        (&self.brut % pow10(ECHELLE_CALCUL)).is_zero()
    }

    pub fn abs(&self) -> Self {
        Self {
            brut: self.brut.abs(),
        }
    }

    /// Plus grand entier inférieur ou égal.
    pub fn plancher(&self) -> BigInt {
        self.vers_rationnel().floor().to_integer()
    }

    pub fn diviser(&self, autre: &Decimal) -> Resultat<Decimal> {
        if autre.est_zero() {
            return Err(ErreurCalcul::DivisionParZero);
        }
        Ok(Self {
            brut: diviser_arrondi(&self.brut * pow10(ECHELLE_CALCUL), autre.brut.clone()),
        })
    }

    /// self^ordre.
    /// - ordre < 0 : inverse de la puissance positive
    /// - ordre entier : produit exact, quantifié une seule fois
    /// - sinon : exp(ordre · ln(self)) en flottant
    pub fn puissance(&self, ordre: &Decimal) -> Resultat<Decimal> {
        if ordre.est_negatif() {
            return Decimal::un().diviser(&self.puissance(&ordre.abs())?);
        }

        if ordre.est_entier() {
            let n = ordre
                .plancher()
                .to_u32()
                .filter(|n| *n <= EXPOSANT_MAX)
                .ok_or(ErreurCalcul::Depassement("exposant trop grand"))?;
            if n == 0 {
                return Ok(Decimal::un());
            }
            if self.brut.bits().saturating_mul(u64::from(n)) > BITS_PUISSANCE_MAX {
                return Err(ErreurCalcul::Depassement("puissance trop grande"));
            }
            let exact = self.brut.pow(n);
            return Ok(Self {
                brut: diviser_arrondi(exact, pow10(ECHELLE_CALCUL * (n - 1))),
            });
        }

        let ln = Decimal::depuis_f64(self.vers_f64().ln())?;
        Decimal::depuis_f64((&ln * ordre).vers_f64().exp())
    }

    /// Racine carrée approchée (flottant puis re-quantification).
    pub fn racine_approx(&self) -> Resultat<Decimal> {
        if self.est_negatif() {
            return Err(ErreurCalcul::HorsDomaine(format!("√({self})")));
        }
        Decimal::depuis_f64(self.vers_f64().sqrt())
    }

    /// n! sur la partie entière (plancher) ; refusée si négatif.
    pub fn factorielle(&self) -> Resultat<Decimal> {
        if self.est_negatif() {
            return Err(ErreurCalcul::FactorielleNegative);
        }
        let n = self
            .plancher()
            .to_u64()
            .filter(|n| *n <= FACTORIELLE_MAX)
            .ok_or(ErreurCalcul::Depassement("factorielle trop grande"))?;

        let mut acc = BigInt::one();
        for k in 2..=n {
            acc *= k;
        }
        Ok(Self {
            brut: acc * pow10(ECHELLE_CALCUL),
        })
    }

    /// nPr = n! / (n-r)!
    pub fn permutation(n: &Decimal, r: &Decimal) -> Resultat<Decimal> {
        n.factorielle()?.diviser(&(n - r).factorielle()?)
    }

    /// nCr = n! / ((n-r)! · r!)
    pub fn combinaison(n: &Decimal, r: &Decimal) -> Resultat<Decimal> {
        let denominateur = &(n - r).factorielle()? * &r.factorielle()?;
        n.factorielle()?.diviser(&denominateur)
    }
}

/* ------------------------ Constantes (π, e) + cache ------------------------ */

/// Chiffres supplémentaires pour amortir les troncatures des séries.
const EXTRA: u32 = 10;

/// arctan(1/q) en entier scalé (troncature) via série:
/// atan(z) = z - z^3/3 + z^5/5 - ...
fn arctan_inv_q_scaled(q: i64, scale: &BigInt) -> BigInt {
    let q = BigInt::from(q);
    let q2 = &q * &q;

    let mut k: i64 = 0;
    let mut q_pow = q.clone();
    let mut sum = BigInt::zero();

    loop {
        let term = scale / (&q_pow * BigInt::from(2 * k + 1));
        if term.is_zero() {
            break;
        }
        if k % 2 == 0 {
            sum += &term;
        } else {
            sum -= &term;
        }
        q_pow *= &q2;
        k += 1;
    }

    sum
}

/// π à l’échelle de calcul (Machin : π = 16·atan(1/5) - 4·atan(1/239)).
pub fn pi() -> Decimal {
    static PI: OnceLock<Decimal> = OnceLock::new();
    PI.get_or_init(|| {
        let scale = pow10(ECHELLE_CALCUL + EXTRA);
        let a = arctan_inv_q_scaled(5, &scale);
        let b = arctan_inv_q_scaled(239, &scale);
        let brut = BigInt::from(16) * a - BigInt::from(4) * b;
        Decimal {
            brut: diviser_arrondi(brut, pow10(EXTRA)),
        }
    })
    .clone()
}

/// e à l’échelle de calcul (série Σ 1/k!).
pub fn euler() -> Decimal {
    static E: OnceLock<Decimal> = OnceLock::new();
    E.get_or_init(|| {
        let mut term = pow10(ECHELLE_CALCUL + EXTRA);
        let mut sum = BigInt::zero();
        let mut k: u32 = 1;
        while !term.is_zero() {
            sum += &term;
            term /= k;
            k += 1;
        }
        Decimal {
            brut: diviser_arrondi(sum, pow10(EXTRA)),
        }
    })
    .clone()
}

/* ------------------------ Traits ------------------------ */

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&ecrire_echelle(&self.brut, ECHELLE_CALCUL))
    }
}

impl FromStr for Decimal {
    type Err = ErreurCalcul;

    fn from_str(s: &str) -> Resultat<Self> {
        Decimal::analyser(s)
    }
}

impl Add for &Decimal {
    type Output = Decimal;

    fn add(self, autre: &Decimal) -> Decimal {
        Decimal {
            brut: &self.brut + &autre.brut,
        }
    }
}

impl Add for Decimal {
    type Output = Decimal;

    fn add(self, autre: Decimal) -> Decimal {
        &self + &autre
    }
}

impl Sub for &Decimal {
    type Output = Decimal;

    fn sub(self, autre: &Decimal) -> Decimal {
        Decimal {
            brut: &self.brut - &autre.brut,
        }
    }
}

impl Sub for Decimal {
    type Output = Decimal;

    fn sub(self, autre: Decimal) -> Decimal {
        &self - &autre
    }
}

impl Mul for &Decimal {
    type Output = Decimal;

    fn mul(self, autre: &Decimal) -> Decimal {
        Decimal {
            brut: diviser_arrondi(&self.brut * &autre.brut, pow10(ECHELLE_CALCUL)),
        }
    }
}

impl Mul for Decimal {
    type Output = Decimal;

    fn mul(self, autre: Decimal) -> Decimal {
        &self * &autre
    }
}

impl Neg for &Decimal {
    type Output = Decimal;

    fn neg(self) -> Decimal {
        Decimal {
            brut: -&self.brut,
        }
    }
}

impl Neg for Decimal {
    type Output = Decimal;

    fn neg(self) -> Decimal {
        -&self
    }
}
