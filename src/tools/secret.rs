use core::{
    fmt::Debug,
    ops::{Add, Mul},
};

use secrecy::{ExposeSecret, SecretBox};
use serde::{de::Error, Deserialize, Deserializer, Serialize, Serializer};
use serde_encoded_bytes::{Hex, SliceLike};
use zeroize::Zeroize;

use crate::{
    curve::{Point, Scalar},
    params::SchemeParams,
};

/// A helper wrapper for managing secret values.
///
/// On top of `secrecy::SecretBox` functionality, it provides:
/// - Safe `Clone` implementation (without needing to impl `CloneableSecret`)
/// - Safe `Debug` implementation
/// - Safe serialization/deserialization (down to `serde` API; what happens there we cannot control)
pub(crate) struct Secret<T: Zeroize>(SecretBox<T>);

impl<T> Secret<T>
where
    T: Zeroize,
{
    pub fn expose_secret(&self) -> &T {
        self.0.expose_secret()
    }
}

impl<T> Secret<T>
where
    T: Zeroize + Clone,
{
    pub fn init_with(ctr: impl FnOnce() -> T) -> Self {
        Self(SecretBox::init_with(ctr))
    }

    pub fn try_init_with<E>(ctr: impl FnOnce() -> Result<T, E>) -> Result<Self, E> {
        Ok(Self(SecretBox::try_init_with(ctr)?))
    }
}

impl<T> Clone for Secret<T>
where
    T: Zeroize + Clone,
{
    fn clone(&self) -> Self {
        Self::init_with(|| self.0.expose_secret().clone())
    }
}

impl<T> Debug for Secret<T>
where
    T: Zeroize,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Secret<{}>(...)", core::any::type_name::<T>())
    }
}

// Scalar-specific impls

impl<P> Serialize for Secret<Scalar<P>>
where
    P: SchemeParams,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let bytes = SecretBox::<[u8]>::from(self.expose_secret().to_bytes());
        SliceLike::<Hex>::serialize(&bytes.expose_secret(), serializer)
    }
}

impl<'de, P> Deserialize<'de> for Secret<Scalar<P>>
where
    P: SchemeParams,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let bytes: Box<[u8]> = SliceLike::<Hex>::deserialize(deserializer)?;
        let bytes = SecretBox::<[u8]>::from(bytes);
        Self::try_init_with(|| Scalar::try_from_bytes(bytes.expose_secret())).map_err(D::Error::custom)
    }
}

impl<P> Add<&Scalar<P>> for Secret<Scalar<P>>
where
    P: SchemeParams,
{
    type Output = Secret<Scalar<P>>;
    fn add(self, rhs: &Scalar<P>) -> Self::Output {
        Secret::init_with(|| self.expose_secret() + rhs)
    }
}

impl<P> Mul<&Scalar<P>> for Secret<Scalar<P>>
where
    P: SchemeParams,
{
    type Output = Secret<Scalar<P>>;
    fn mul(self, rhs: &Scalar<P>) -> Self::Output {
        Secret::init_with(|| self.expose_secret() * rhs)
    }
}

impl<P> Secret<Scalar<P>>
where
    P: SchemeParams,
{
    pub fn mul_by_generator(&self) -> Point<P> {
        self.expose_secret().mul_by_generator()
    }
}

impl<P> Mul<&Secret<Scalar<P>>> for &Point<P>
where
    P: SchemeParams,
{
    type Output = Point<P>;
    fn mul(self, scalar: &Secret<Scalar<P>>) -> Self::Output {
        self * scalar.expose_secret()
    }
}

#[cfg(test)]
mod tests {
    use rand_core::OsRng;

    use super::Secret;
    use crate::{curve::Scalar, params::dev::TestParams};

    #[test]
    fn debug_does_not_leak() {
        let secret = Secret::init_with(|| Scalar::<TestParams>::from(1234u64));
        let debug = format!("{:?}", secret);
        assert!(debug.starts_with("Secret<"));
        assert!(!debug.contains("1234"));
    }

    #[test]
    fn serde_roundtrip() {
        let scalar = Scalar::<TestParams>::random(&mut OsRng);
        let secret = Secret::init_with(|| scalar);
        let json = serde_json::to_string(&secret).unwrap();
        let restored: Secret<Scalar<TestParams>> = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.expose_secret(), &scalar);
    }
}
