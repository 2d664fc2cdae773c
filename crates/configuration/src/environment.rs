//! Access to environment variables, abstracted so tests can supply their own.

use std::collections::HashMap;
use std::ffi::OsString;

use thiserror::Error;

use crate::values::Variable;

pub trait Environment {
    fn read(&self, variable: &Variable) -> Result<String, Error>;
}

/// Reads from the environment of the running process.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnvironment;

impl Environment for ProcessEnvironment {
    fn read(&self, variable: &Variable) -> Result<String, Error> {
        std::env::var(variable.as_str()).map_err(|err| match err {
            std::env::VarError::NotPresent => Error::VariableNotPresent(variable.clone()),
            std::env::VarError::NotUnicode(value) => Error::NonUnicodeValue(value),
        })
    }
}

/// An environment with no variables at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyEnvironment;

impl Environment for EmptyEnvironment {
    fn read(&self, variable: &Variable) -> Result<String, Error> {
        Err(Error::VariableNotPresent(variable.clone()))
    }
}

impl Environment for HashMap<Variable, String> {
    fn read(&self, variable: &Variable) -> Result<String, Error> {
        self.get(variable)
            .cloned()
            .ok_or_else(|| Error::VariableNotPresent(variable.clone()))
    }
}

impl<E: Environment> Environment for &E {
    fn read(&self, variable: &Variable) -> Result<String, Error> {
        (*self).read(variable)
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("the environment variable '{0}' is not set")]
    VariableNotPresent(Variable),
    #[error("the environment variable has a non-unicode value: {0:?}")]
    NonUnicodeValue(OsString),
}
