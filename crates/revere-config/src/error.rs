use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("yaml parse error in {path}: {source}")]
    YamlParse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("missing required field: {0}")]
    Missing(&'static str),

    #[error(
        "service-to-component mapping for ({service}, {environment}) names undeclared component '{component}'"
    )]
    UnknownComponentInMapping {
        service: String,
        environment: String,
        component: String,
    },

    #[error("environment variable {name} is not a valid {expected}: {value}")]
    BadEnvVar {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}
