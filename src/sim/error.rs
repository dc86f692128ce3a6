use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvError {
    #[error("step called before the first reset")]
    NotReset,
}
