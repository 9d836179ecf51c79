use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum AddressError {
    #[error("At least one seed is required to derive an address")]
    EmptySeeds,
    #[error("Allowed number of seeds {max} provided {actual}")]
    TooManySeeds { max: usize, actual: usize },
}

impl From<AddressError> for u32 {
    fn from(e: AddressError) -> u32 {
        match e {
            AddressError::EmptySeeds => 7101,
            AddressError::TooManySeeds { .. } => 7102,
        }
    }
}
