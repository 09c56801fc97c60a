use serde::Deserialize;

///
/// Fields present in every response of the remote service
///
#[derive(Deserialize)]
pub struct Envelope {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}
