use rocket::serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct CreateFolderRequest {
    pub name: String,
    /// `None` or `0` for a top-level folder
    #[serde(rename = "parentId")]
    pub parent_id: Option<u32>,
}

impl CreateFolderRequest {
    pub fn parent_id(&self) -> Option<u32> {
        if let Some(0) = self.parent_id {
            None
        } else {
            self.parent_id
        }
    }
}
