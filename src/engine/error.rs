/// Which kind of record a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Owner {
    Room,
    Booking,
}

/// Field that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Rate,
    Discount,
}

/// The rule a value broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Text,
    Integer,
    NonNegative,
    Percentage,
}

impl Rule {
    /// Short label for metrics.
    pub fn label(&self) -> &'static str {
        match self {
            Rule::Text => "text",
            Rule::Integer => "integer",
            Rule::NonNegative => "non_negative",
            Rule::Percentage => "percentage",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    MissingProperty {
        owner: Owner,
        name: String,
        property: &'static str,
    },
    Invalid {
        owner: Owner,
        name: String,
        field: Field,
        value: String,
        rule: Rule,
    },
    DuplicateRoom(String),
    RoomNotFound(String),
    Snapshot(String),
}

impl std::fmt::Display for Owner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Owner::Room => write!(f, "room"),
            Owner::Booking => write!(f, "booking"),
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Field::Name => write!(f, "name"),
            Field::Rate => write!(f, "rate"),
            Field::Discount => write!(f, "discount"),
        }
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::Text => write!(f, "must be a string"),
            Rule::Integer => write!(f, "must be an integer"),
            Rule::NonNegative => write!(f, "must not be negative"),
            Rule::Percentage => write!(f, "must be a percentage between 0 and 100"),
        }
    }
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::MissingProperty {
                owner,
                name,
                property,
            } => write!(f, "{owner} {name} is missing property {property}"),
            EngineError::Invalid {
                owner,
                name,
                field,
                value,
                rule,
            } => write!(f, "{owner} {name} has an invalid {field}: {value} ({rule})"),
            EngineError::DuplicateRoom(name) => write!(f, "duplicate room name: {name}"),
            EngineError::RoomNotFound(name) => write!(f, "room not found: {name}"),
            EngineError::Snapshot(e) => write!(f, "snapshot error: {e}"),
        }
    }
}

impl std::error::Error for EngineError {}
