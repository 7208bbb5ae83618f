use std::path::Path;
use toml::Value;

#[derive(Debug)]
pub enum ConfigLoadError {
    Io(std::io::Error),
    De(toml::de::Error),
    WrongType {
        field: &'static str,
        expected: &'static str,
    },
    UnknownField(String),
}

impl From<std::io::Error> for ConfigLoadError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl std::fmt::Display for ConfigLoadError {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(fmt, "unable to read config file ({err})"),
            Self::De(err) => write!(fmt, "config file parsing error: {err}"),
            Self::WrongType { field, expected } => {
                write!(fmt, "expected type `{expected}` for field `{field}`")
            }
            Self::UnknownField(field) => write!(fmt, "unknown field `{field}`"),
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct Config {
    pub steps: Option<u64>,
    pub trace: bool,
    pub reset_vector: bool,
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self, ConfigLoadError> {
        let text = std::fs::read_to_string(path)?;
        let value: Value = toml::from_str(&text).map_err(ConfigLoadError::De)?;
        let table = value.as_table().ok_or(ConfigLoadError::WrongType {
            field: "<root>",
            expected: "table",
        })?;
        let mut config = Self::default();
        for (key, val) in table {
            match key.as_str() {
                "steps" => {
                    let steps = val.as_integer().ok_or(ConfigLoadError::WrongType {
                        field: "steps",
                        expected: "integer",
                    })?;
                    config.steps = Some(steps as u64)
                }
                "trace" => {
                    config.trace = val.as_bool().ok_or(ConfigLoadError::WrongType {
                        field: "trace",
                        expected: "boolean",
                    })?
                }
                "reset-vector" => {
                    config.reset_vector = val.as_bool().ok_or(ConfigLoadError::WrongType {
                        field: "reset-vector",
                        expected: "boolean",
                    })?
                }
                _ => return Err(ConfigLoadError::UnknownField(key.clone())),
            }
        }
        Ok(config)
    }
}
