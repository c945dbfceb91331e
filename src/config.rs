/// Generator options, fixed for the duration of one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// File name of the generated module.
    pub models_file: String,
    /// Tortoise app label used to qualify relation targets (`models.User`).
    pub app_name: String,
    pub class_name_pascal_case: bool,
    pub value_name_snake_case: bool,
    /// Write an empty `__init__.py` next to the module if none exists.
    pub create_py_package_init_file: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown generator option: {0} (expected one of: {known})", known = known_options())]
    UnknownOption(String),
    #[error("option {option} expects a boolean, got {value:?}")]
    InvalidFlag { option: &'static str, value: String },
    #[error("option {0} must not be empty")]
    EmptyValue(&'static str),
}

/// Typed setter; the variant decides how the raw value is coerced.
enum Setter {
    Text(fn(&mut Config, String)),
    Flag(fn(&mut Config, bool)),
}

struct OptionSpec {
    name: &'static str,
    setter: Setter,
}

const OPTIONS: &[OptionSpec] = &[
    OptionSpec {
        name: "modelsFile",
        setter: Setter::Text(|config, value| config.models_file = value),
    },
    OptionSpec {
        name: "appName",
        setter: Setter::Text(|config, value| config.app_name = value),
    },
    OptionSpec {
        name: "classNamePascalCase",
        setter: Setter::Flag(|config, value| config.class_name_pascal_case = value),
    },
    OptionSpec {
        name: "valueNameSnakeCase",
        setter: Setter::Flag(|config, value| config.value_name_snake_case = value),
    },
    OptionSpec {
        name: "createPyPackageInitFile",
        setter: Setter::Flag(|config, value| config.create_py_package_init_file = value),
    },
];

impl Default for Config {
    fn default() -> Self {
        Self {
            models_file: "models.py".to_string(),
            app_name: "models".to_string(),
            class_name_pascal_case: true,
            value_name_snake_case: true,
            create_py_package_init_file: true,
        }
    }
}

impl Config {
    /// Build a config from raw `name = value` generator options.
    pub fn from_options<I, K, V>(options: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut config = Self::default();
        for (name, value) in options {
            let name = name.as_ref();
            let spec = OPTIONS
                .iter()
                .find(|spec| spec.name == name)
                .ok_or_else(|| ConfigError::UnknownOption(name.to_string()))?;
            spec.apply(&mut config, value.as_ref())?;
        }
        Ok(config)
    }

    /// Names of every recognised option.
    pub fn option_names() -> impl Iterator<Item = &'static str> {
        OPTIONS.iter().map(|spec| spec.name)
    }
}

fn known_options() -> String {
    Config::option_names().collect::<Vec<_>>().join(", ")
}

impl OptionSpec {
    fn apply(&self, config: &mut Config, raw: &str) -> Result<(), ConfigError> {
        let raw = raw.trim();
        match self.setter {
            Setter::Text(_) if raw.is_empty() => Err(ConfigError::EmptyValue(self.name)),
            Setter::Text(set) => {
                set(config, raw.to_string());
                Ok(())
            }
            Setter::Flag(set) => {
                set(config, parse_flag(raw).ok_or_else(|| ConfigError::InvalidFlag {
                    option: self.name,
                    value: raw.to_string(),
                })?);
                Ok(())
            }
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
