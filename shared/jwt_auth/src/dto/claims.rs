use serde::Deserialize;
use uuid::Uuid;

#[derive(Deserialize)]
pub struct Claims {
    pub sub: Uuid,

    #[serde(default)]
    pub roles: Vec<String>,
}
