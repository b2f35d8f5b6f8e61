pub mod admin_list;
pub mod catalog_editor;
pub mod equipments;
pub mod home;
pub mod login;
pub mod player;
pub mod player_editor;
pub mod players;

/// Whether an editor is creating a row or editing the one with this id
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    Edit(String),
}

impl EditorMode {
    pub fn id(&self) -> Option<&str> {
        match self {
            EditorMode::Create => None,
            EditorMode::Edit(id) => Some(id),
        }
    }
}
