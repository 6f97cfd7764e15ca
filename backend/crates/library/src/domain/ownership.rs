//! Ownership
//!
//! Every owned resource answers "who created me". Update and delete paths
//! call [`OwnedByUser::check_ownership`] after loading the row and before
//! touching it.

use kernel::id::UserId;

use crate::domain::entities::{Comment, Favorite, Rating};
use crate::error::{LibraryError, LibraryResult};

pub trait OwnedByUser {
    /// Plural resource name used in the Forbidden message
    const RESOURCE: &'static str;

    fn owner_id(&self) -> &UserId;

    fn is_owner(&self, user_id: &UserId) -> bool {
        self.owner_id() == user_id
    }

    /// `Forbidden` unless `user_id` created this resource
    fn check_ownership(&self, user_id: &UserId) -> LibraryResult<()> {
        if self.is_owner(user_id) {
            Ok(())
        } else {
            Err(LibraryError::Forbidden {
                resource: Self::RESOURCE,
            })
        }
    }
}

impl OwnedByUser for Favorite {
    const RESOURCE: &'static str = "favorites";

    fn owner_id(&self) -> &UserId {
        &self.user_id
    }
}

impl OwnedByUser for Rating {
    const RESOURCE: &'static str = "ratings";

    fn owner_id(&self) -> &UserId {
        &self.user_id
    }
}

impl OwnedByUser for Comment {
    const RESOURCE: &'static str = "comments";

    fn owner_id(&self) -> &UserId {
        &self.user_id
    }
}
