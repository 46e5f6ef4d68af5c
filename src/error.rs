use thiserror::Error;

#[derive(Error, Debug)]
pub enum CovdiagError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML parse error at position {position}: {source}")]
    Xml {
        source: quick_xml::Error,
        position: usize,
    },

    #[error("<{element}> is missing the '{attribute}' attribute")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },

    #[error("<{element}> has an invalid '{attribute}' attribute: '{value}'")]
    InvalidAttribute {
        element: &'static str,
        attribute: &'static str,
        value: String,
    },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid argument")]
    InvalidArgument,

    #[error(transparent)]
    Cli(#[from] clap::Error),
}

pub type Result<T> = std::result::Result<T, CovdiagError>;
