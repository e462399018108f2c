use chrono::{DateTime, Utc};
use recipebook_core_types::UserId;
use serde::{Deserialize, Serialize};

/// Number of optional image slots on a recipe
pub const IMAGE_SLOTS: usize = 3;

/// Reference to a stored image, as handed out by the image collaborator
///
/// The recipe only ever holds references; bytes live with the collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(String);

impl ImageRef {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ImageRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Recipe - the root entity owning steps, ingredients and tags
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    /// Unique identifier (UUID v7)
    pub id: String,

    /// Exclusive owner; every child is reachable only through the recipe
    pub user_id: UserId,

    pub name: String,
    pub description: String,

    /// Cooking time in minutes, always > 0
    pub cooking_time: u32,

    pub category: String,

    /// Optional images, slot order is significant (image_1..image_3)
    pub images: [Option<ImageRef>; IMAGE_SLOTS],

    /// Set once at creation
    pub created_at: DateTime<Utc>,

    /// Refreshed on every mutation
    pub updated_at: DateTime<Utc>,
}

impl Recipe {
    /// Fresh recipe id; UUIDv7 so ids sort by creation time
    pub fn generate_id() -> String {
        uuid::Uuid::now_v7().to_string()
    }

    /// Create a recipe with current timestamps and no images
    pub fn new(
        id: String,
        user_id: UserId,
        name: String,
        description: String,
        cooking_time: u32,
        category: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            user_id,
            name,
            description,
            cooking_time,
            category,
            images: Default::default(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_owned_by(&self, user: &UserId) -> bool {
        &self.user_id == user
    }

    /// Image references currently attached, in slot order
    pub fn image_refs(&self) -> impl Iterator<Item = &ImageRef> {
        self.images.iter().flatten()
    }
}
