use crate::geometry::tile::WrapRule;
use serde::Deserialize;
use serde_with::{serde_as, DisplayFromStr};
use std::{
    collections::HashMap,
    num::NonZeroUsize,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Location of the configuration file, if the user has a config directory.
pub fn path() -> Option<PathBuf> {
    Some(dirs::config_dir()?.join("adventofcode").join("config.toml"))
}

#[serde_as]
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Paths are independently configured per year.
    #[serde_as(as = "HashMap<DisplayFromStr, _>")]
    pub paths: HashMap<u32, Paths>,

    /// How the input map is tiled for the second answer.
    pub expansion: Expansion,
}

#[derive(Debug, Default, Deserialize)]
pub struct Paths {
    /// Path to input files
    pub input_files: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Expansion {
    /// Number of copies of the input map in each dimension.
    pub factor: NonZeroUsize,
    pub wrap: WrapRule,
}

const DEFAULT_FACTOR: NonZeroUsize = match NonZeroUsize::new(5) {
    Some(factor) => factor,
    None => panic!("default factor must be nonzero"),
};

impl Default for Expansion {
    fn default() -> Self {
        Expansion {
            factor: DEFAULT_FACTOR,
            wrap: WrapRule::default(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, Error> {
        Self::load_from(&path().ok_or(Error::NoConfigDir)?)
    }

    pub fn load_from(path: &Path) -> Result<Self, Error> {
        let data = std::fs::read_to_string(path)?;
        toml::from_str(&data).map_err(Into::into)
    }

    /// Load the configuration, or use defaults if there is no configuration file.
    ///
    /// A configuration file which exists but cannot be read is still an error.
    pub fn load_or_default() -> Result<Self, Error> {
        match Self::load() {
            Err(Error::NoConfigDir) => Ok(Self::default()),
            Err(Error::CouldNotLoad(err)) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("no configuration file; using defaults");
                Ok(Self::default())
            }
            otherwise => otherwise,
        }
    }

    fn input_files_inner(&self, year: u32) -> Option<PathBuf> {
        Some(self.paths.get(&year)?.input_files.as_ref()?.to_owned())
    }

    /// Directory holding the input files for a year.
    ///
    /// Defaults to `inputs` under the current directory.
    pub fn input_files(&self, year: u32) -> PathBuf {
        self.input_files_inner(year)
            .unwrap_or_else(|| PathBuf::from("inputs"))
    }

    pub fn input_for(&self, year: u32, day: u8) -> PathBuf {
        self.input_files(year).join(format!("input-{:02}.txt", day))
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("no configuration directory for this user")]
    NoConfigDir,
    #[error("configuration could not be loaded")]
    CouldNotLoad(#[from] std::io::Error),
    #[error("malformed configuration")]
    Malformed(#[from] toml::de::Error),
}
