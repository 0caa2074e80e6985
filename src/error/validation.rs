use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Unable to parse the resolver address '{value}' ({reason})")]
    InvalidResolver { value: String, reason: String },
    #[error("Invalid DOH endpoint '{value}': {source}")]
    InvalidDohEndpoint {
        value: String,
        #[source]
        source: url::ParseError,
    },
    #[error("Unsupported DOH endpoint scheme '{scheme}'. Use http or https.")]
    UnsupportedDohScheme { scheme: String },
    #[error("Invalid domain '{value}'.")]
    InvalidDomain { value: String },
    #[error("At least one target domain is required.")]
    MissingDomains,
    #[error("Invalid record type '{value}'.")]
    InvalidRecordType { value: String },
    #[error("Duration must not be empty.")]
    DurationEmpty,
    #[error("Invalid duration '{value}'.")]
    InvalidDurationFormat { value: String },
    #[error("Invalid duration '{value}': {source}")]
    InvalidDurationNumber {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("Duration overflow.")]
    DurationOverflow,
    #[error("Invalid duration unit '{unit}'.")]
    InvalidDurationUnit { unit: String },
    #[error("Duration must be > 0.")]
    DurationZero,
    #[error("Value must be >= {min}.")]
    ValueTooSmall { min: u64 },
    #[error("Invalid value: {source}")]
    InvalidNumber {
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("--flood-limit requires --flood.")]
    FloodLimitWithoutFlood,
    #[cfg(test)]
    #[error("Test expectation failed: {message}")]
    TestExpectation { message: &'static str },
    #[cfg(test)]
    #[error("Test expectation failed: {message}: {value}")]
    TestExpectationValue {
        message: &'static str,
        value: String,
    },
}
