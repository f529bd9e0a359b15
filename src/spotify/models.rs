// src/spotify/models.rs

use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub struct CallbackParams {
    pub code: Option<String>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct TrendingParams {
    pub access_token: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub query: Option<String>,
    pub access_token: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}
