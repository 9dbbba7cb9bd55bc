use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::application::{ApplicationStatus, ContactOverrides};

/// Optional contact fields re-submitted alongside an application.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ApplyPayload {
    #[validate(length(max = 120))]
    pub full_name: Option<String>,
    #[validate(length(max = 32))]
    pub phone: Option<String>,
    #[validate(length(max = 200))]
    pub area: Option<String>,
    #[validate(length(max = 120))]
    pub district: Option<String>,
    #[validate(length(max = 120))]
    pub state: Option<String>,
    #[validate(length(max = 12))]
    pub pincode: Option<String>,
    #[validate(length(max = 2000))]
    pub about: Option<String>,
}

impl From<ApplyPayload> for ContactOverrides {
    fn from(value: ApplyPayload) -> Self {
        Self {
            full_name: value.full_name,
            phone: value.phone,
            area: value.area,
            district: value.district,
            state: value.state,
            pincode: value.pincode,
            about: value.about,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateApplicationStatusPayload {
    pub status: ApplicationStatus,
}
