use serde::Deserialize;
use validator::Validate;

use crate::domain::types::{Email, PersonName};
use crate::domain::user::NewUser;
use crate::forms::{FormError, field};
use crate::{SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE};

/// Roles that can be granted from the users page.
pub const ASSIGNABLE_ROLES: [&str; 2] = [SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE];

#[derive(Debug, Deserialize, Validate)]
/// Form data for inviting or editing a dashboard user.
pub struct UserForm {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    pub role: String,
}

impl TryFrom<UserForm> for NewUser {
    type Error = FormError;

    fn try_from(form: UserForm) -> Result<Self, Self::Error> {
        form.validate()?;
        let role = form.role.trim().to_string();
        if !ASSIGNABLE_ROLES.contains(&role.as_str()) {
            return Err(FormError::InvalidField {
                field: "role",
                source: crate::domain::types::TypeConstraintError::InvalidValue(role),
            });
        }

        Ok(NewUser {
            name: field("name", PersonName::new(form.name))?,
            email: field("email", Email::new(form.email))?,
            role,
        })
    }
}
