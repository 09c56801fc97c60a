use reqwest::Url;

pub struct RestNotificationsServiceConfig {
    /// Address of care-notifier-core, e.g. `http://127.0.0.1:8080`
    pub base_url: Url,

    /// Bearer token of the signed in user
    pub token: String,
}
