use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Backend-neutral column type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PortableType {
    Byte { signed: bool },
    Short { signed: bool },
    Integer { signed: bool },
    Long { signed: bool },
    Float { signed: bool },
    Double { signed: bool },
    Decimal { precision: u32, scale: u32 },
    FixedChar { length: u32 },
    VarChar { length: u32 },
    StringUnbounded,
    Binary,
    Boolean,
    Date,
    Time,
    Timestamp { has_time_zone: bool },
    /// A backend type the portable model cannot express, kept by name.
    External { raw_name: String },
}

impl PortableType {
    pub fn byte() -> Self {
        PortableType::Byte { signed: true }
    }

    pub fn short() -> Self {
        PortableType::Short { signed: true }
    }

    pub fn integer() -> Self {
        PortableType::Integer { signed: true }
    }

    pub fn long() -> Self {
        PortableType::Long { signed: true }
    }

    pub fn float() -> Self {
        PortableType::Float { signed: true }
    }

    pub fn double() -> Self {
        PortableType::Double { signed: true }
    }

    pub fn decimal(precision: u32, scale: u32) -> Self {
        PortableType::Decimal { precision, scale }
    }

    pub fn external(raw_name: impl Into<String>) -> Self {
        PortableType::External {
            raw_name: raw_name.into(),
        }
    }

    /// Whether literals of this type render as bare numeric text.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            PortableType::Byte { .. }
                | PortableType::Short { .. }
                | PortableType::Integer { .. }
                | PortableType::Long { .. }
                | PortableType::Float { .. }
                | PortableType::Double { .. }
                | PortableType::Decimal { .. }
        )
    }

    /// Short human-readable description used in error messages.
    pub fn simple_string(&self) -> String {
        let unsigned = |signed: &bool| if *signed { "" } else { " unsigned" };
        match self {
            PortableType::Byte { signed } => format!("byte{}", unsigned(signed)),
            PortableType::Short { signed } => format!("short{}", unsigned(signed)),
            PortableType::Integer { signed } => format!("integer{}", unsigned(signed)),
            PortableType::Long { signed } => format!("long{}", unsigned(signed)),
            PortableType::Float { signed } => format!("float{}", unsigned(signed)),
            PortableType::Double { signed } => format!("double{}", unsigned(signed)),
            PortableType::Decimal { precision, scale } => {
                format!("decimal({},{})", precision, scale)
            }
            PortableType::FixedChar { length } => format!("char({})", length),
            PortableType::VarChar { length } => format!("varchar({})", length),
            PortableType::StringUnbounded => "string".to_string(),
            PortableType::Binary => "binary".to_string(),
            PortableType::Boolean => "boolean".to_string(),
            PortableType::Date => "date".to_string(),
            PortableType::Time => "time".to_string(),
            PortableType::Timestamp { has_time_zone } => {
                if *has_time_zone {
                    "timestamp_tz".to_string()
                } else {
                    "timestamp".to_string()
                }
            }
            PortableType::External { raw_name } => format!("external({})", raw_name),
        }
    }
}

impl fmt::Display for PortableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.simple_string())
    }
}

/// Type information as reported by backend metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialectTypeDescriptor {
    pub type_name: String,
    pub column_size: Option<u32>,
    pub scale: Option<u32>,
}

static SIZED_TYPE: OnceLock<Regex> = OnceLock::new();

impl DialectTypeDescriptor {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            column_size: None,
            scale: None,
        }
    }

    pub fn sized(type_name: impl Into<String>, column_size: u32, scale: Option<u32>) -> Self {
        Self {
            type_name: type_name.into(),
            column_size: Some(column_size),
            scale,
        }
    }

    /// Splits a rendered type name such as `DECIMAL(10,2)` back into its
    /// name, size and scale. Names without a size suffix pass through whole.
    pub fn parse(rendered: &str) -> Self {
        let re = SIZED_TYPE.get_or_init(|| {
            Regex::new(r"^\s*([A-Za-z_][A-Za-z0-9_ ]*?)\s*\(\s*(\d+)\s*(?:,\s*(\d+)\s*)?\)\s*$")
                .expect("sized type pattern is valid")
        });

        match re.captures(rendered) {
            Some(caps) => Self {
                type_name: caps[1].to_string(),
                column_size: caps[2].parse().ok(),
                scale: caps.get(3).and_then(|m| m.as_str().parse().ok()),
            },
            None => Self::new(rendered.trim()),
        }
    }
}
