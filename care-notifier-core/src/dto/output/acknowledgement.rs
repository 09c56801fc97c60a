use serde::Serialize;

///
/// Body of successful requests that return no data
///
#[derive(Serialize)]
pub struct Acknowledgement {
    pub success: bool,
}

impl Acknowledgement {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

///
/// Body of every failed request
///
#[derive(Serialize)]
pub struct Failure {
    pub success: bool,
    pub message: String,
}

impl Failure {
    pub fn new(message: String) -> Self {
        Self {
            success: false,
            message,
        }
    }
}
