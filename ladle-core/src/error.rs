use thiserror::Error;

#[derive(Error, Debug)]
pub enum NormalizeError {
    #[error("No decodable recipe data in generated output")]
    Unparsable,

    #[error("Missing required field: {0}")]
    MissingField(String),
}
