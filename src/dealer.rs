//! Trusted-dealer key generation, for tests and single-operator deployments.

use rand_core::CryptoRngCore;
use tracing::debug;

use crate::{
    curve::Scalar,
    decryption::{Participant, ShareId},
    elgamal::PublicKey,
    error::Error,
    params::SchemeParams,
    tools::Secret,
};

#[derive(Debug)]
struct Polynomial<P: SchemeParams>(Vec<Secret<Scalar<P>>>);

impl<P: SchemeParams> Polynomial<P> {
    /// Creates a random polynomial with `threshold` coefficients and the given constant term.
    fn random(rng: &mut impl CryptoRngCore, coeff0: Secret<Scalar<P>>, threshold: usize) -> Self {
        let mut coeffs = Vec::with_capacity(threshold);
        coeffs.push(coeff0);
        for _ in 1..threshold {
            coeffs.push(Secret::init_with(|| Scalar::random_nonzero(rng)));
        }
        Self(coeffs)
    }

    fn evaluate(&self, x: &Scalar<P>) -> Secret<Scalar<P>> {
        // Evaluate in reverse to save on multiplications.
        // Basically: a0 + a1 x + a2 x^2 + a3 x^3 == (((a3 x) + a2) x + a1) x + a0
        match self.0.split_last() {
            Some((acc, coeffs)) => coeffs
                .iter()
                .rev()
                .fold(acc.clone(), |acc, coeff| acc * x + coeff.expose_secret()),
            None => Secret::init_with(|| Scalar::ZERO),
        }
    }
}

/// Splits `secret` into `num_shares` Shamir shares at `x = 1, ..., num_shares`,
/// any `threshold` of which can decrypt.
pub fn split_secret<P: SchemeParams>(
    rng: &mut impl CryptoRngCore,
    secret: Scalar<P>,
    threshold: usize,
    num_shares: usize,
) -> Result<Vec<Participant<P>>, Error> {
    if threshold == 0 || threshold > num_shares {
        return Err(Error::InvalidConfig(format!(
            "threshold must be between 1 and {num_shares}, got {threshold}"
        )));
    }
    let num_shares = u64::try_from(num_shares)
        .map_err(|_| Error::InvalidConfig(format!("too many shares: {num_shares}")))?;

    let polynomial = Polynomial::random(rng, Secret::init_with(|| secret), threshold);
    let participants = (1..=num_shares)
        .map(|id| -> Result<_, Error> {
            let share = polynomial.evaluate(&Scalar::from(id));
            Ok(Participant::from_secret(ShareId::new(id)?, share))
        })
        .collect::<Result<Vec<_>, _>>()?;

    debug!("Dealt {num_shares} key shares with threshold {threshold}");
    Ok(participants)
}

/// Generates a fresh election key and splits it between `num_shares` participants.
pub fn make_key_shares<P: SchemeParams>(
    rng: &mut impl CryptoRngCore,
    threshold: usize,
    num_shares: usize,
) -> Result<(Vec<Participant<P>>, PublicKey<P>), Error> {
    let secret = Scalar::random_nonzero(rng);
    let public_key = PublicKey::new(secret.mul_by_generator());
    let participants = split_secret(rng, secret, threshold, num_shares)?;
    Ok((participants, public_key))
}
