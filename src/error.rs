use displaydoc::Display;

/// Errors returned by the tallying and decryption operations.
#[derive(Display, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// No batch is open, call `start_batch()` first
    BatchNotOpen,
    /// A batch is already open
    BatchAlreadyOpen,
    /// Too many votes for this batch (capacity {capacity})
    BatchFull {
        /// The configured maximum number of votes per batch.
        capacity: usize,
    },
    /// The ballot stored for this nullifier could not be decoded: {0}
    CorruptStoredBallot(String),
    /// Ballot store error: {0}
    Store(String),
    /// A Lagrange denominator has no inverse modulo the group order
    NoModularInverse,
    /// Share ID 0 is reserved for the secret itself
    ZeroShareId,
    /// Partial decryption for share ID {0} is missing
    MissingPartialDecryption(u64),
    /// At least one participant is required
    EmptyParticipantSet,
    /// Baby-step table collision between steps {first} and {second}
    BabyStepCollision {
        /// The step that was inserted first.
        first: u64,
        /// The step that collided with it.
        second: u64,
    },
    /// Failed to decrypt message, discrete logarithm problem unsolved
    DiscreteLogUnsolved,
    /// Discrete log search bound {max_message} is too close to the group order
    SearchSpaceTooLarge {
        /// The configured search bound.
        max_message: u64,
    },
    /// Failed to start the discrete log worker pool: {0}
    WorkerPool(String),
    /// Invalid configuration: {0}
    InvalidConfig(String),
    /// Invalid encoding: {0}
    InvalidEncoding(String),
}

impl Error {
    /// Configuration errors that indicate a broken setup and must not be retried.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::NoModularInverse
                | Self::ZeroShareId
                | Self::BabyStepCollision { .. }
                | Self::SearchSpaceTooLarge { .. }
                | Self::InvalidConfig(_)
        )
    }

    /// Errors after which the caller can open a fresh batch and try again.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::BatchNotOpen | Self::BatchFull { .. })
    }
}

impl std::error::Error for Error {}
