use crate::database::kyc::KycDocumentType;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SubmitKycRequest {
    pub full_name: String,
    pub document_type: KycDocumentType,
    pub document_number: String,
    /// URL returned by `POST /uploads`.
    pub document_url: String,
    pub selfie_url: String,
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ReviewKycRequest {
    pub approve: bool,
    pub note: Option<String>,
}
