//! Studio team roster offered as assignees.

use serde::{Deserialize, Serialize};

fn default_members() -> Vec<String> {
    vec![
        String::from("user1@kingsizegames.com"),
        String::from("user2@kingsizegames.com"),
        String::from("user3@kingsizegames.com"),
    ]
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TeamConfig {
    #[serde(default = "default_members")]
    pub members: Vec<String>,
}

impl Default for TeamConfig {
    fn default() -> Self {
        Self {
            members: default_members(),
        }
    }
}
