use serde::Serialize;
use ts_rs::TS;

use super::entities::Material;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../web/src/types/generated/material.ts")]
pub struct MaterialListResponse {
    pub items: Vec<Material>,
}
